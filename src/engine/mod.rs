//! Batch execution engine module
//!
//! This module contains:
//! - `executor` - runs one script as an isolated child process
//! - `batch` - the directory batch runner
//! - `outcome` - run outcome, report, and summary types
//! - `error` - batch-level error types

pub mod batch;
pub mod error;
pub mod executor;
pub mod outcome;

pub use batch::{run_script_directory, BatchRunner, ProgressFn};
pub use error::RunnerError;
pub use executor::ScriptExecutor;
pub use outcome::{
    bounded_text, BatchSummary, RunOutcome, ScriptReport, ERROR_TEXT_LIMIT, TRUNCATION_MARKER,
};
