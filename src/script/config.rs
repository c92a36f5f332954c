//! Runner configuration
//!
//! Configuration for the batch runner, loaded from `runner.yaml` in the
//! scanned root. Every field has a default so a bare tree runs without
//! any config file; CLI flags override file values.
//!
//! ```yaml
//! # runner.yaml
//! script_name: generate.py
//! interpreter: python3
//! timeout_secs: 60
//! workers: 1
//! exclude:
//!   - tools
//!   - old
//! artifact:
//!   type: fixed
//!   name: chart.pdf
//! ```

use serde::{Deserialize, Serialize};

use super::artifact::ArtifactSpec;

/// File name the runner looks for in the scanned root.
pub const CONFIG_FILE: &str = "runner.yaml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error in {file}: {error}")]
    Yaml {
        file: String,
        error: serde_yaml::Error,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Entry-point file name that marks a directory's generator
    #[serde(default = "default_script_name")]
    pub script_name: String,

    /// Interpreter the scripts are launched with
    #[serde(default = "default_interpreter")]
    pub interpreter: String,

    /// Directory names pruned from discovery, at any depth
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Per-script time budget in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Scripts run at once; 1 = sequential
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Artifact each script must leave behind to count as succeeded
    #[serde(default)]
    pub artifact: ArtifactSpec,
}

fn default_script_name() -> String {
    "generate.py".to_string()
}

fn default_interpreter() -> String {
    "python3".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_workers() -> usize {
    1
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            script_name: default_script_name(),
            interpreter: default_interpreter(),
            exclude: Vec::new(),
            timeout_secs: default_timeout_secs(),
            workers: default_workers(),
            artifact: ArtifactSpec::default(),
        }
    }
}

impl RunnerConfig {
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config: RunnerConfig =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::Yaml {
                file: path.display().to_string(),
                error: e,
            })?;
        Ok(config)
    }
}
