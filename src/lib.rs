//! # threemf-settings
//!
//! Inspect the slicer settings stored in 3MF project files written by Bambu
//! Studio, OrcaSlicer and compatible slicers.
//!
//! A project file is a ZIP archive. Next to the mesh data it carries two
//! slicer documents:
//!
//! - `Metadata/project_settings.config`: the global print profile as JSON
//! - `Metadata/model_settings.config`: objects, parts and plates with their
//!   per-object and per-part overrides as XML
//!
//! The analyzer resolves the global profile, merges object and part
//! overrides over it, flags the values that diverge, and produces one row per
//! placed object and part, grouped by plate in slicer display order.
//!
//! ## Features
//!
//! - Pure Rust implementation with no unsafe code
//! - Archive extraction that rejects path traversal before writing anything
//! - Missing documents degrade to defaults instead of failing
//! - Text report with optional colors and a JSON document for scripting
//!
//! ## Example
//!
//! ```no_run
//! use threemf_settings::{Analyzer, ReportOptions, write_report};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let analysis = Analyzer::new("model.3mf").analyze()?;
//!
//! println!("Printer: {}", analysis.profile.printer);
//! for row in analysis.rows.iter().filter(|r| r.has_custom_fields()) {
//!     println!("{} overrides the profile", row.name.trim());
//! }
//!
//! write_report(&analysis, &ReportOptions::new().with_color(false), std::io::stdout())?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
pub mod error;
pub mod model;
pub mod opc;
pub mod parser;
pub mod report;
pub mod rows;

pub use analyzer::{Analysis, Analyzer, AnalyzerConfig};
pub use error::{Error, Result};
pub use model::{
    Field, ModelSettings, Object, Part, Plate, PlateInstance, Profile, Row, RowKind, SettingsMap,
};
pub use parser::{ListIndex, Settings, parse_model_settings};
pub use report::{ReportOptions, write_json, write_report};
pub use rows::build_rows;
