use std::path::PathBuf;

use crate::errors::{ BenchError, BenchResult };
use crate::models::common::{ Domain, OracleKind };

/// Parameters of one evaluation run, passed explicitly to the batch driver
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Model override; `None` uses the configured default
    pub model: Option<String>,
    pub temperature: f32,
    /// Passes over the dataset, or round trips for generated runs
    pub iterations: u32,
    /// Requirements sent per translation request
    pub chunk_size: usize,
    pub domain: Domain,
    pub oracle: OracleKind,
    /// Attempts per round trip before it is recorded as inconclusive
    pub max_attempts: u32,
    /// Explicit results path; `None` writes a timestamped file under `results/`
    pub output: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            model: None,
            temperature: 0.0,
            iterations: 1,
            chunk_size: 5,
            domain: Domain::Master,
            oracle: OracleKind::default(),
            max_attempts: 3,
            output: None,
        }
    }
}

impl RunConfig {
    pub fn validate(&self) -> BenchResult<()> {
        if self.iterations == 0 {
            return Err(BenchError::InvalidInput("iterations must be at least 1".into()));
        }
        if self.chunk_size == 0 {
            return Err(BenchError::InvalidInput("chunk size must be at least 1".into()));
        }
        if self.max_attempts == 0 {
            return Err(BenchError::InvalidInput("max attempts must be at least 1".into()));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(
                BenchError::InvalidInput(
                    format!("temperature {} is outside 0.0..=2.0", self.temperature)
                )
            );
        }
        Ok(())
    }
}
