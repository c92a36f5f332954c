//! Generator script definitions
//!
//! A `GeneratorScript` is one unit of work: the path to an entry-point
//! script, the directory it runs in (so its relative output paths land
//! next to it), and the artifact it is expected to produce.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::artifact::ArtifactSpec;

/// One discovered generator script. Immutable once discovered.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct GeneratorScript {
    /// Path to the entry-point script
    pub path: PathBuf,

    /// Directory the script runs in; its relative writes resolve here
    pub working_dir: PathBuf,

    /// Expected output artifact, when the configuration names one
    pub artifact: Option<PathBuf>,
}

impl GeneratorScript {
    /// Build a script from its path, deriving the working directory from
    /// the parent and the expected artifact from the spec.
    pub fn from_path(path: impl Into<PathBuf>, artifact: &ArtifactSpec) -> Self {
        let path = path.into();
        let working_dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let artifact = artifact.resolve(&path);

        Self {
            path,
            working_dir,
            artifact,
        }
    }

    /// Path rendered for reports and filtering.
    pub fn display_name(&self) -> String {
        self.path.display().to_string()
    }

    /// Path relative to a batch root, falling back to the full path when
    /// the script lives outside it.
    pub fn relative_to(&self, root: &Path) -> PathBuf {
        self.path
            .strip_prefix(root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| self.path.clone())
    }
}
