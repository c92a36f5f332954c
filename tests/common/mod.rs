#![allow(dead_code)]

use std::fs;
use std::path::Path;

use chart_regen::{ArtifactSpec, RunnerConfig};
use tempfile::TempDir;

pub fn create_test_tree() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Config that drives the runner with plain `sh` scripts so tests need no
/// plotting toolchain.
pub fn sh_config() -> RunnerConfig {
    RunnerConfig {
        script_name: "generate.sh".to_string(),
        interpreter: "sh".to_string(),
        timeout_secs: 5,
        ..RunnerConfig::default()
    }
}

pub fn sh_config_with_artifact(name: &str) -> RunnerConfig {
    RunnerConfig {
        artifact: ArtifactSpec::Fixed {
            name: name.to_string(),
        },
        ..sh_config()
    }
}

/// Write a generator script at `<root>/<rel_dir>/generate.sh`.
pub fn write_script(root: &Path, rel_dir: &str, body: &str) {
    let dir = root.join(rel_dir);
    fs::create_dir_all(&dir).expect("Failed to create script directory");
    fs::write(dir.join("generate.sh"), body).expect("Failed to write script");
}

/// Exits 0 after writing the named artifact next to itself.
pub fn artifact_script(artifact: &str) -> String {
    format!("printf pdf > {}\nexit 0\n", artifact)
}

/// Exits 0 without producing anything.
pub fn silent_script() -> String {
    "exit 0\n".to_string()
}

/// Prints `message` to stderr and exits with `code`.
pub fn failing_script(code: i32, message: &str) -> String {
    format!("echo {} >&2\nexit {}\n", message, code)
}

/// Sleeps well past any test timeout.
pub fn sleeping_script() -> String {
    "sleep 60\n".to_string()
}
