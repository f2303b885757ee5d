pub mod automata_oracle;
pub mod config;
pub mod dataset;
pub mod generator;
pub mod ltl;
pub mod nuxmv;
pub mod oracle;
pub mod pipeline;
pub mod results;
pub mod schema_registry;
pub mod tableau;
