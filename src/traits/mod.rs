pub mod equivalence;
pub mod formula_generator;
pub mod record_sink;

// Re-export traits
pub use equivalence::{EquivalenceDecider, EquivalenceOracle};
pub use formula_generator::FormulaGenerator;
pub use record_sink::RecordSink;
