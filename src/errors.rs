use thiserror::Error;

/// Custom error types for the ptLTL bench
#[derive(Debug, Error)]
pub enum BenchError {
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Schema error for domain {domain}: {message}")]
    SchemaError { domain: String, message: String },

    #[error("Unknown domain: {0}")]
    UnknownDomain(String),

    #[error("Verifier executable not found: {0}")]
    VerifierNotFound(String),

    #[error("Error in external tool {tool}: {message}")]
    ExternalToolError { tool: String, message: String },

    #[error("Formula generation error: {0}")]
    GenerationError(String),

    #[error("Failed to parse formula `{formula}`: {message}")]
    FormulaParseError { formula: String, message: String },

    #[error("Dataset error: {0}")]
    DatasetError(String),

    #[error("Result output error: {0}")]
    OutputError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

/// Result type specific to bench operations
pub type BenchResult<T> = Result<T, BenchError>;

/// Recoverable vs. non-recoverable errors
pub trait RecoverableError {
    fn is_recoverable(&self) -> bool;
    fn recovery_strategy(&self) -> Option<String>;
}

impl RecoverableError for BenchError {
    fn is_recoverable(&self) -> bool {
        matches!(
            self,
            BenchError::GenerationError(_) | BenchError::FormulaParseError { .. }
        )
    }

    fn recovery_strategy(&self) -> Option<String> {
        match self {
            BenchError::GenerationError(_) =>
                Some("skip the record and retry on the next attempt".to_string()),
            BenchError::FormulaParseError { .. } =>
                Some("treat the comparison as inconclusive".to_string()),
            BenchError::VerifierNotFound(tool) =>
                Some(format!("install {} or set verifier.executable in the config file", tool)),
            _ => None,
        }
    }
}
