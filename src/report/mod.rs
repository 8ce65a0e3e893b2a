//! Text and JSON presentation of an [`Analysis`]
//!
//! The text report is a sequence of boxed panels (header, profile, global
//! settings, custom global settings) followed by the objects table.

mod sections;
mod table;

use crate::analyzer::Analysis;
use crate::error::Result;
use std::io::Write;

/// Options for the text report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Annotate custom values with the profile default they replace
    pub show_diff: bool,
    /// Emit ANSI color codes
    pub color: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            show_diff: false,
            color: true,
        }
    }
}

impl ReportOptions {
    /// Create the default options: colored, without defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Show profile defaults next to custom values
    pub fn with_diff(mut self, show_diff: bool) -> Self {
        self.show_diff = show_diff;
        self
    }

    /// Enable or disable ANSI colors
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }
}

/// Write the analysis as pretty-printed JSON followed by a newline
///
/// Keys keep their document order and non-ASCII text is written verbatim.
pub fn write_json<W: Write>(analysis: &Analysis, mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, analysis)?;
    writeln!(writer)?;
    Ok(())
}

/// Write the human-readable report
pub fn write_report<W: Write>(
    analysis: &Analysis,
    options: &ReportOptions,
    mut writer: W,
) -> Result<()> {
    let mut painter = table::Painter::new(&mut writer, options.color);

    sections::header(&mut painter, analysis)?;
    sections::profile(&mut painter, &analysis.profile)?;
    sections::global_settings(&mut painter, &analysis.profile)?;
    sections::custom_global(&mut painter, &analysis.custom_global)?;
    sections::objects(&mut painter, analysis, options)?;

    writer.flush()?;
    Ok(())
}
