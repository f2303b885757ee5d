pub mod models;
pub mod traits;
pub mod errors;
pub mod config;
pub mod implementations;
#[cfg(test)]
pub mod tests;

// Re-export core components
pub use config::RunConfig;
pub use errors::{ BenchError, BenchResult, RecoverableError };
pub use implementations::automata_oracle::{ decide_via_automata, AutomataOracle };
pub use implementations::config::ToolConfig;
pub use implementations::nuxmv::NuXmvDecider;
pub use implementations::oracle::{ classify, ModelCheckingOracle };
pub use implementations::pipeline::BatchDriver;
pub use implementations::schema_registry::SchemaRegistry;
pub use models::{
    common::{ Domain, OracleKind },
    formula::{ normalize, Formula },
    schema::{ VarType, VariableDeclaration, VariableSchema },
    verification::{ EquivalenceVerdict, InconclusiveReason },
};
pub use traits::{ EquivalenceDecider, EquivalenceOracle, FormulaGenerator, RecordSink };
