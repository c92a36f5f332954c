//! Generator script discovery
//!
//! Recursive scan under a root directory. A file is a generator iff its
//! name matches the configured entry-point convention; subtrees whose
//! directory name is in the exclusion set are pruned entirely. Results
//! are ordered lexicographically by path, so repeated scans of an
//! unchanged tree are directly comparable.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::artifact::ArtifactSpec;
use super::config::RunnerConfig;
use super::generator::GeneratorScript;

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not a directory: {0}")]
    NotADirectory(String),
}

pub struct ScriptScanner {
    script_name: String,
    exclude: HashSet<String>,
    artifact: ArtifactSpec,
}

impl ScriptScanner {
    pub fn new(script_name: impl Into<String>) -> Self {
        Self {
            script_name: script_name.into(),
            exclude: HashSet::new(),
            artifact: ArtifactSpec::default(),
        }
    }

    pub fn from_config(config: &RunnerConfig) -> Self {
        Self::new(&config.script_name)
            .exclude(config.exclude.iter().cloned())
            .artifact(config.artifact.clone())
    }

    /// Directory names to prune from the walk, at any depth.
    pub fn exclude(mut self, names: impl IntoIterator<Item = String>) -> Self {
        self.exclude.extend(names);
        self
    }

    pub fn artifact(mut self, spec: ArtifactSpec) -> Self {
        self.artifact = spec;
        self
    }

    pub fn scan(&self, root: impl AsRef<Path>) -> Result<Vec<GeneratorScript>, ScanError> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(ScanError::NotADirectory(root.display().to_string()));
        }

        let mut paths = Vec::new();
        self.walk(root, &mut paths)?;
        paths.sort();

        Ok(paths
            .into_iter()
            .map(|p| GeneratorScript::from_path(p, &self.artifact))
            .collect())
    }

    fn walk(&self, dir: &Path, paths: &mut Vec<PathBuf>) -> Result<(), ScanError> {
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            let name = entry.file_name();
            let name = name.to_string_lossy();

            if path.is_dir() {
                if self.exclude.contains(name.as_ref()) {
                    continue;
                }
                self.walk(&path, paths)?;
            } else if name == self.script_name {
                paths.push(path);
            }
        }
        Ok(())
    }
}
