//! Single-script executor
//!
//! Runs one generator script as an isolated child process: working
//! directory pinned to the script's own directory, stdio captured rather
//! than streamed, a hard per-script timeout, and artifact verification on
//! zero exit. Exit code 0 alone is not success evidence when an artifact
//! is expected.

use std::process::Stdio;
use std::time::{Duration, Instant};

use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::engine::outcome::{bounded_text, RunOutcome, ScriptReport};
use crate::script::GeneratorScript;

#[derive(Debug, Clone)]
pub struct ScriptExecutor {
    interpreter: String,
    timeout: Duration,
}

impl ScriptExecutor {
    pub fn new(interpreter: impl Into<String>, timeout: Duration) -> Self {
        Self {
            interpreter: interpreter.into(),
            timeout,
        }
    }

    /// Execute one script and record whatever happened. Never returns
    /// `Err`: every failure mode is a `RunOutcome`.
    pub async fn run(&self, script: &GeneratorScript) -> ScriptReport {
        let started = Instant::now();
        let outcome = self.run_inner(script).await;
        ScriptReport {
            script: script.clone(),
            outcome,
            duration_ms: started.elapsed().as_millis() as u64,
        }
    }

    async fn run_inner(&self, script: &GeneratorScript) -> RunOutcome {
        let mut cmd = Command::new(&self.interpreter);
        cmd.arg(&script.path)
            .current_dir(&script.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!(script = %script.path.display(), "Launching generator");

        let child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                return RunOutcome::LaunchError {
                    message: bounded_text(&e.to_string()),
                }
            }
        };

        // On expiry the dropped wait future takes the child with it and
        // kill_on_drop terminates the process.
        let output = match timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return RunOutcome::LaunchError {
                    message: bounded_text(&e.to_string()),
                }
            }
            Err(_) => {
                warn!(script = %script.path.display(), "Generator timed out");
                return RunOutcome::TimedOut {
                    limit_secs: self.timeout.as_secs(),
                };
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return RunOutcome::FailedNonZeroExit {
                code: output.status.code().unwrap_or(-1),
                stderr: bounded_text(&stderr),
            };
        }

        if let Some(artifact) = &script.artifact {
            if !artifact.exists() {
                return RunOutcome::MissingArtifact {
                    path: artifact.clone(),
                };
            }
        }

        RunOutcome::Succeeded
    }
}
