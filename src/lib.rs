//! # chart-regen
//!
//! A batch runner for the generator scripts of a course-materials tree.
//! Each lecture directory carries a conventionally-named entry-point
//! script that renders one chart artifact; this crate discovers those
//! scripts, executes each as an isolated child process with a bounded
//! time budget, verifies the artifact it is expected to leave behind, and
//! reports a CI-consumable aggregate.
//!
//! ## Guarantees
//!
//! - **Isolation** - one script's crash, hang, or launch failure never
//!   prevents subsequent scripts from running; there is no fail-fast.
//! - **One report per script** - every attempted script yields exactly
//!   one outcome; `total == succeeded + failed` always holds.
//! - **Deterministic reporting** - discovery is lexicographic by path and
//!   summaries are aggregated in discovery order, even under a worker
//!   pool, so repeated runs compare directly.
//! - **Strict success** - a zero exit code counts as success only when
//!   the configured artifact actually exists.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chart_regen::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let summary = BatchRunner::new("course-materials")
//!         .on_report(|report, done, total| {
//!             println!("[{}/{}] {}", done, total, report.outcome.reason());
//!         })
//!         .run()
//!         .await?;
//!
//!     println!(
//!         "total {} succeeded {} failed {}",
//!         summary.total(),
//!         summary.succeeded(),
//!         summary.failed()
//!     );
//!     Ok(())
//! }
//! ```

pub mod engine;
pub mod script;

// Re-export main types
pub use engine::{
    bounded_text, run_script_directory, BatchRunner, BatchSummary, ProgressFn, RunOutcome,
    RunnerError, ScriptExecutor, ScriptReport, ERROR_TEXT_LIMIT, TRUNCATION_MARKER,
};
pub use script::{
    ArtifactSpec, ConfigError, GeneratorScript, RunnerConfig, ScanError, ScriptScanner,
    CONFIG_FILE,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::engine::{
        run_script_directory, BatchRunner, BatchSummary, RunOutcome, RunnerError, ScriptExecutor,
        ScriptReport,
    };
    pub use crate::script::{
        ArtifactSpec, GeneratorScript, RunnerConfig, ScanError, ScriptScanner, CONFIG_FILE,
    };
}
