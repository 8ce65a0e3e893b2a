//! 3MF package access
//!
//! 3MF files are ZIP archives. Slicers such as Bambu Studio and OrcaSlicer
//! store their project configuration next to the model parts under
//! `Metadata/`. A [`Package`] is the archive extracted into a private scratch
//! directory that is removed when the package is dropped.

mod reader;
mod validation;

use crate::error::Result;
use std::fs::File;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::debug;

pub(crate) use validation::normalize_path;

/// Project settings (JSON) path within the archive
pub const PROJECT_SETTINGS_PATH: &str = "Metadata/project_settings.config";

/// Model settings (XML) path within the archive
pub const MODEL_SETTINGS_PATH: &str = "Metadata/model_settings.config";

/// Prefix of scratch directories created for extraction
const SCRATCH_PREFIX: &str = ".3mf-settings-";

/// An extracted 3MF package
///
/// The scratch directory lives exactly as long as the package.
#[derive(Debug)]
pub struct Package {
    scratch: TempDir,
    members: Vec<String>,
}

impl Package {
    /// Extract the archive at `path` into a fresh directory under the system
    /// temporary directory
    pub fn extract(path: &Path) -> Result<Self> {
        Self::extract_in(path, &std::env::temp_dir())
    }

    /// Extract the archive at `path` into a fresh directory under `scratch_root`
    ///
    /// On any error (unreadable file, invalid archive, unsafe member path)
    /// the scratch directory has already been removed when this returns.
    pub fn extract_in(path: &Path, scratch_root: &Path) -> Result<Self> {
        let scratch = tempfile::Builder::new()
            .prefix(SCRATCH_PREFIX)
            .tempdir_in(scratch_root)?;
        debug!(archive = %path.display(), scratch = %scratch.path().display(), "opening package");

        let file = File::open(path)?;
        let members = reader::extract_all(file, scratch.path())?;

        Ok(Self { scratch, members })
    }

    /// Root of the extracted tree
    pub fn root(&self) -> &Path {
        self.scratch.path()
    }

    /// Member names in archive order
    pub fn file_names(&self) -> &[String] {
        &self.members
    }

    /// Check if a part exists in the package
    pub fn has_file(&self, name: &str) -> bool {
        let name = normalize_path(name);
        self.members.iter().any(|m| normalize_path(m) == name)
    }

    /// Get a part as text, or `None` when the package does not contain it
    pub fn get_file(&self, name: &str) -> Result<Option<String>> {
        reader::read_text(self.root(), normalize_path(name))
    }

    /// Remove the scratch directory, reporting removal failures
    ///
    /// Dropping the package removes it as well but ignores errors.
    pub fn close(self) -> Result<PathBuf> {
        let root = self.scratch.path().to_path_buf();
        self.scratch.close()?;
        Ok(root)
    }
}
