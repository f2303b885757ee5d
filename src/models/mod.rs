pub mod common;
pub mod formula;
pub mod record;
pub mod schema;
pub mod smv;
pub mod verification;

// Re-export common model types
pub use common::{Domain, OracleKind};
pub use formula::Formula;
pub use record::{EvaluationRecord, LtlExample, RequirementRow, SuccessTally};
pub use schema::{VarType, VariableDeclaration, VariableSchema};
pub use smv::SmvModel;
pub use verification::{EquivalenceVerdict, InconclusiveReason, RawOutput};
