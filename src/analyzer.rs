//! Archive-to-analysis driver

use crate::error::{Error, Result};
use crate::model::{ModelSettings, Profile, Row, SettingsMap};
use crate::opc::{MODEL_SETTINGS_PATH, PROJECT_SETTINGS_PATH, Package};
use crate::parser::{Settings, parse_model_settings};
use crate::rows::build_rows;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Configuration for analyzing 3MF files
#[derive(Debug, Clone, Default)]
pub struct AnalyzerConfig {
    /// Directory in which scratch extraction directories are created
    scratch_root: Option<PathBuf>,
}

impl AnalyzerConfig {
    /// Create a configuration using the system temporary directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract archives below `root` instead of the system temporary directory
    pub fn with_scratch_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.scratch_root = Some(root.into());
        self
    }

    /// Configured scratch root, if any
    pub fn scratch_root(&self) -> Option<&Path> {
        self.scratch_root.as_deref()
    }
}

/// Everything extracted from one project file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    /// File name of the analyzed archive, without directories
    pub file: String,
    /// Resolved global profile
    pub profile: Profile,
    /// The complete raw project settings
    pub profile_full: SettingsMap,
    /// Settings changed relative to the system preset, in declared order
    pub custom_global: SettingsMap,
    /// Object and part rows in plate order
    pub rows: Vec<Row>,
}

impl Analysis {
    /// Assemble an analysis from already-parsed documents
    pub fn new(file: impl Into<String>, settings: Settings, model: &ModelSettings) -> Self {
        let profile = settings.profile();
        let custom_global = settings.custom_global_settings();
        let rows = build_rows(&profile, model);

        Self {
            file: file.into(),
            profile,
            profile_full: settings.into_raw(),
            custom_global,
            rows,
        }
    }
}

/// Analyzes a single 3MF project file
///
/// # Example
///
/// ```no_run
/// use threemf_settings::Analyzer;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let analysis = Analyzer::new("benchy.3mf").analyze()?;
/// for row in &analysis.rows {
///     println!("{} {}", row.plate, row.name);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Analyzer {
    path: PathBuf,
    config: AnalyzerConfig,
}

impl Analyzer {
    /// Create an analyzer with the default configuration
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_config(path, AnalyzerConfig::default())
    }

    /// Create an analyzer with a custom configuration
    pub fn with_config(path: impl Into<PathBuf>, config: AnalyzerConfig) -> Self {
        Self {
            path: path.into(),
            config,
        }
    }

    /// Path of the file being analyzed
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Extract the archive, parse both settings documents and build the rows
    ///
    /// A missing settings document is not an error: the profile falls back
    /// to defaults, and a missing model settings document yields no rows.
    /// The scratch directory is removed before this returns, whatever the
    /// outcome.
    pub fn analyze(&self) -> Result<Analysis> {
        if !self.path.exists() {
            return Err(Error::FileNotFound(self.path.clone()));
        }
        debug!("Starting analysis of {}", self.path.display());

        let package = match self.config.scratch_root() {
            Some(root) => Package::extract_in(&self.path, root)?,
            None => Package::extract(&self.path)?,
        };

        let settings = match package.get_file(PROJECT_SETTINGS_PATH)? {
            Some(text) => Settings::from_json(&text)?,
            None => {
                warn!("Project settings not found: {}", PROJECT_SETTINGS_PATH);
                Settings::default()
            }
        };

        let model = match package.get_file(MODEL_SETTINGS_PATH)? {
            Some(xml) => parse_model_settings(&xml)?,
            None => {
                warn!("Model settings not found: {}", MODEL_SETTINGS_PATH);
                ModelSettings::new()
            }
        };

        match package.close() {
            Ok(root) => debug!(scratch = %root.display(), "removed scratch directory"),
            Err(e) => warn!("Failed to remove scratch directory: {}", e),
        }

        let file = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string());

        let analysis = Analysis::new(file, settings, &model);
        debug!(rows = analysis.rows.len(), "analysis complete");
        Ok(analysis)
    }
}
