use std::{ fmt, time::Duration };

use serde::{ Serialize, Serializer };

/// Outcome of comparing two formulas over all traces
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EquivalenceVerdict {
    Equivalent,
    NotEquivalent,
    Inconclusive(InconclusiveReason),
}

/// Why a comparison could not be decided
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InconclusiveReason {
    /// The verifier did not finish within the configured bound
    Timeout(Duration),
    /// Neither result marker appeared in the verifier output
    UnrecognizedOutput,
    /// A formula could not be parsed by the in-process decision procedure
    ParseFailure(String),
}

impl EquivalenceVerdict {
    pub fn is_conclusive(&self) -> bool {
        !matches!(self, EquivalenceVerdict::Inconclusive(_))
    }

    pub fn is_equivalent(&self) -> bool {
        matches!(self, EquivalenceVerdict::Equivalent)
    }

    /// Boolean view for conclusive verdicts only
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            EquivalenceVerdict::Equivalent => Some(true),
            EquivalenceVerdict::NotEquivalent => Some(false),
            EquivalenceVerdict::Inconclusive(_) => None,
        }
    }
}

impl fmt::Display for EquivalenceVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EquivalenceVerdict::Equivalent => write!(f, "Equivalent"),
            EquivalenceVerdict::NotEquivalent => write!(f, "Not Equivalent"),
            EquivalenceVerdict::Inconclusive(reason) => write!(f, "Inconclusive ({})", reason),
        }
    }
}

impl fmt::Display for InconclusiveReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InconclusiveReason::Timeout(limit) => write!(f, "timed out after {:?}", limit),
            InconclusiveReason::UnrecognizedOutput => write!(f, "unrecognized verifier output"),
            InconclusiveReason::ParseFailure(msg) => write!(f, "parse failure: {}", msg),
        }
    }
}

/// Results tables store `True`, `False` or `Inconclusive`
impl Serialize for EquivalenceVerdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            EquivalenceVerdict::Equivalent => serializer.serialize_str("True"),
            EquivalenceVerdict::NotEquivalent => serializer.serialize_str("False"),
            EquivalenceVerdict::Inconclusive(_) => serializer.serialize_str("Inconclusive"),
        }
    }
}

/// Captured run of the external verifier
#[derive(Debug, Clone, Default)]
pub struct RawOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
    pub timed_out: bool,
    pub elapsed: Duration,
}

impl RawOutput {
    pub fn timed_out(elapsed: Duration) -> Self {
        Self {
            timed_out: true,
            elapsed,
            ..Self::default()
        }
    }
}
