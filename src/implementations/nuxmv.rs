use std::io::{ ErrorKind, Write };
use std::process::Stdio;
use std::time::{ Duration, Instant };

use async_trait::async_trait;
use log::{ debug, info, trace };
use tokio::process::Command;

use crate::errors::{ BenchError, BenchResult };
use crate::implementations::config::VerifierConfig;
use crate::models::smv::SmvModel;
use crate::models::verification::RawOutput;
use crate::traits::EquivalenceDecider;

/// Runs nuXmv as a subprocess on a temporary `.smv` file
#[derive(Debug, Clone)]
pub struct NuXmvDecider {
    executable: String,
    timeout: Duration,
}

impl NuXmvDecider {
    pub fn new(executable: impl Into<String>, timeout: Duration) -> Self {
        Self {
            executable: executable.into(),
            timeout,
        }
    }

    pub fn from_config(config: &VerifierConfig) -> Self {
        Self::new(config.executable.clone(), config.timeout())
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    fn spawn_error(&self, err: std::io::Error) -> BenchError {
        if err.kind() == ErrorKind::NotFound {
            BenchError::VerifierNotFound(self.executable.clone())
        } else {
            BenchError::ExternalToolError {
                tool: self.executable.clone(),
                message: format!("failed to start: {}", err),
            }
        }
    }
}

#[async_trait]
impl EquivalenceDecider for NuXmvDecider {
    fn tool_name(&self) -> &str {
        &self.executable
    }

    async fn decide(&self, model: &SmvModel) -> BenchResult<RawOutput> {
        let mut file = tempfile::Builder::new().prefix("ptltl-").suffix(".smv").tempfile()?;
        file.write_all(model.as_str().as_bytes())?;
        file.flush()?;
        // Removed when `path` goes out of scope, on every exit path
        let path = file.into_temp_path();
        trace!("Model written to {}:\n{}", path.display(), model);

        let started = Instant::now();
        let child = Command::new(&self.executable)
            .arg(&*path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(output) => output?,
            Err(_) => {
                info!("{} exceeded {:?}, abandoning the check", self.executable, self.timeout);
                return Ok(RawOutput::timed_out(started.elapsed()));
            }
        };

        let raw = RawOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code(),
            timed_out: false,
            elapsed: started.elapsed(),
        };
        debug!(
            "{} finished in {:?} with exit code {:?}",
            self.executable,
            raw.elapsed,
            raw.exit_code
        );
        Ok(raw)
    }

    async fn check_available(&self) -> BenchResult<bool> {
        let probe = Command::new(&self.executable)
            .arg("-h")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .status();

        match tokio::time::timeout(Duration::from_secs(10), probe).await {
            Ok(Ok(_)) => Ok(true),
            Ok(Err(e)) if e.kind() == ErrorKind::NotFound => Ok(false),
            Ok(Err(e)) => Err(self.spawn_error(e)),
            // It started, which is all the probe asks
            Err(_) => Ok(true),
        }
    }
}
