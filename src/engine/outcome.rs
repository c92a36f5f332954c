//! Run outcome and summary types

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::script::GeneratorScript;

/// Captured error text is bounded so long stack traces stay scannable.
pub const ERROR_TEXT_LIMIT: usize = 200;

/// Marker appended when captured text is cut at the limit.
pub const TRUNCATION_MARKER: &str = " [truncated]";

/// Trim and bound captured process output.
pub fn bounded_text(text: &str) -> String {
    let text = text.trim();
    if text.chars().count() <= ERROR_TEXT_LIMIT {
        return text.to_string();
    }
    let prefix: String = text.chars().take(ERROR_TEXT_LIMIT).collect();
    format!("{}{}", prefix, TRUNCATION_MARKER)
}

/// The outcome of executing one generator script. Created once when the
/// run completes or is abandoned; never mutated, never retried within a
/// batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RunOutcome {
    /// Exit code 0 and the expected artifact (if any) exists
    Succeeded,

    /// Non-zero exit, with a bounded prefix of captured stderr
    FailedNonZeroExit { code: i32, stderr: String },

    /// Exit code 0 but the expected artifact was not written
    MissingArtifact { path: PathBuf },

    /// Forcibly terminated after exceeding the time budget
    TimedOut { limit_secs: u64 },

    /// The process could not be started at all
    LaunchError { message: String },
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Succeeded)
    }

    /// One-line human-readable reason for reports.
    pub fn reason(&self) -> String {
        match self {
            RunOutcome::Succeeded => "ok".to_string(),
            RunOutcome::FailedNonZeroExit { code, stderr } if stderr.is_empty() => {
                format!("exit code {}", code)
            }
            RunOutcome::FailedNonZeroExit { code, stderr } => {
                format!("exit code {}: {}", code, stderr)
            }
            RunOutcome::MissingArtifact { path } => {
                format!("exited 0 but artifact missing: {}", path.display())
            }
            RunOutcome::TimedOut { limit_secs } => {
                format!("timed out after {}s", limit_secs)
            }
            RunOutcome::LaunchError { message } => {
                format!("failed to launch: {}", message)
            }
        }
    }
}

/// One script, one outcome.
#[derive(Debug, Clone, Serialize)]
pub struct ScriptReport {
    pub script: GeneratorScript,
    pub outcome: RunOutcome,
    pub duration_ms: u64,
}

/// Aggregate over one batch invocation. `reports` is in discovery order
/// regardless of completion order; `skipped` holds scripts never launched
/// because the batch was interrupted.
#[derive(Debug, Serialize)]
pub struct BatchSummary {
    pub batch_id: String,
    pub root: PathBuf,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub reports: Vec<ScriptReport>,
    pub skipped: Vec<PathBuf>,
}

impl BatchSummary {
    /// Scripts attempted. Always `succeeded() + failed()`.
    pub fn total(&self) -> usize {
        self.reports.len()
    }

    pub fn succeeded(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| r.outcome.is_success())
            .count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    /// Overall batch health: every attempted script succeeded and nothing
    /// was skipped by an interrupt.
    pub fn success(&self) -> bool {
        self.skipped.is_empty() && self.reports.iter().all(|r| r.outcome.is_success())
    }

    /// Failing reports in discovery order, for the end of the textual
    /// summary.
    pub fn failures(&self) -> impl Iterator<Item = &ScriptReport> {
        self.reports.iter().filter(|r| !r.outcome.is_success())
    }
}
