//! Runner error types
//!
//! Only errors that abort a batch before it starts live here. A failing
//! script is data (`RunOutcome`), not an error: nothing per-script
//! propagates as `Err`.

use crate::script::{ConfigError, ScanError};

#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Interpreter not found on PATH: {0}")]
    InterpreterNotFound(String),
}
