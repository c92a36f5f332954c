//! Expected-artifact configuration
//!
//! A generator script proves it ran by leaving a file behind. The spec
//! names that file either directly or by deriving it from the script's
//! own stem:
//!
//! ```yaml
//! # runner.yaml
//! artifact:
//!   type: fixed
//!   name: chart.pdf
//!
//! # or: generate.py -> generate.pdf
//! artifact:
//!   type: stem
//!   extension: pdf
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// What artifact a generator is expected to produce in its own directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ArtifactSpec {
    /// Exit code is the only success evidence
    #[default]
    None,

    /// A fixed file name next to the script
    Fixed { name: String },

    /// The script's stem with a different extension
    Stem { extension: String },
}

impl ArtifactSpec {
    /// Resolve the expected artifact path for a script, or `None` when no
    /// artifact is configured.
    pub fn resolve(&self, script_path: &Path) -> Option<PathBuf> {
        match self {
            ArtifactSpec::None => None,
            ArtifactSpec::Fixed { name } => Some(script_path.with_file_name(name)),
            ArtifactSpec::Stem { extension } => Some(script_path.with_extension(extension)),
        }
    }
}
