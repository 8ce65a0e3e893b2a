//! Error types for 3MF settings analysis
//!
//! Every error carries an error code for categorization and enough context to
//! tell which document inside the archive failed.
//!
//! # Error Codes
//!
//! Error codes follow the pattern: `E<category><number>`
//!
//! Categories:
//! - **E1xxx**: I/O, archive and security errors
//! - **E2xxx**: Document parsing errors
//!
//! ## Common Error Codes
//!
//! - `E1001`: I/O error reading or extracting the file
//! - `E1002`: ZIP archive format error
//! - `E1003`: Input file not found
//! - `E1004`: Unsafe member path in archive (zip slip)
//! - `E2001`: Malformed project settings (JSON)
//! - `E2002`: Malformed model settings (XML)
//! - `E2003`: JSON output serialization error

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for analysis operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while analyzing a 3MF project
#[derive(Error, Debug)]
pub enum Error {
    /// IO error occurred while reading the file or extracting the archive
    ///
    /// **Error Code**: E1001
    ///
    /// **Common Causes**:
    /// - Insufficient permissions
    /// - Scratch directory could not be created
    /// - Disk full while extracting
    #[error("[E1001] I/O error: {0}")]
    Io(#[from] io::Error),

    /// ZIP archive error
    ///
    /// **Error Code**: E1002
    ///
    /// **Common Causes**:
    /// - The file is not a 3MF (ZIP) archive
    /// - Corrupted or truncated archive
    ///
    /// **Suggestions**:
    /// - Verify the file was saved as a project (3MF) by the slicer
    #[error("[E1002] Invalid or corrupted ZIP/3MF file: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// The input file does not exist
    ///
    /// **Error Code**: E1003
    #[error("[E1003] File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// An archive member would be written outside the scratch directory
    ///
    /// **Error Code**: E1004
    ///
    /// Raised before anything is extracted. Absolute member paths and member
    /// paths whose `..` components escape the extraction root are rejected.
    #[error("[E1004] Unsafe path in archive: {member} ({reason})")]
    UnsafePath {
        /// Member name as stored in the archive
        member: String,
        /// Why the member was rejected
        reason: &'static str,
    },

    /// The project settings document is not valid JSON
    ///
    /// **Error Code**: E2001
    ///
    /// **Common Causes**:
    /// - Truncated or hand-edited `project_settings.config`
    /// - Top-level value is not a JSON object
    #[error("[E2001] Failed to parse project settings '{file}': {message}")]
    Settings {
        /// Path of the document inside the archive
        file: String,
        /// Parser message
        message: String,
    },

    /// The model settings document is not valid XML
    ///
    /// **Error Code**: E2002
    ///
    /// **Common Causes**:
    /// - Unclosed or mismatched elements
    /// - DOCTYPE declarations (rejected for security reasons)
    #[error("[E2002] Failed to parse model settings '{file}': {message}")]
    ModelSettings {
        /// Path of the document inside the archive
        file: String,
        /// Parser message, with position when available
        message: String,
    },

    /// Serializing the analysis to JSON failed
    ///
    /// **Error Code**: E2003
    #[error("[E2003] JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a Settings error for the given document
    pub fn settings(file: &str, message: impl Into<String>) -> Self {
        Error::Settings {
            file: file.to_string(),
            message: message.into(),
        }
    }

    /// Create a ModelSettings error for the given document
    pub fn model_settings(file: &str, message: impl Into<String>) -> Self {
        Error::ModelSettings {
            file: file.to_string(),
            message: message.into(),
        }
    }

    /// Create an UnsafePath error
    pub fn unsafe_path(member: &str, reason: &'static str) -> Self {
        Error::UnsafePath {
            member: member.to_string(),
            reason,
        }
    }

    /// Process exit code for this error category
    ///
    /// Exit code 2 is left to command-line usage errors.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Io(_) | Error::Json(_) => 1,
            Error::FileNotFound(_) => 3,
            Error::Zip(_) => 4,
            Error::Settings { .. } => 5,
            Error::ModelSettings { .. } => 6,
            Error::UnsafePath { .. } => 7,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_in_messages() {
        let io_err = Error::Io(io::Error::new(io::ErrorKind::PermissionDenied, "test"));
        assert!(io_err.to_string().contains("[E1001]"));

        let missing = Error::FileNotFound(PathBuf::from("model.3mf"));
        assert!(missing.to_string().contains("[E1003]"));
        assert!(missing.to_string().contains("model.3mf"));

        let unsafe_path = Error::unsafe_path("../../etc/passwd", "escapes extraction directory");
        assert!(unsafe_path.to_string().contains("[E1004]"));
        assert!(unsafe_path.to_string().contains("../../etc/passwd"));

        let settings = Error::settings("Metadata/project_settings.config", "EOF");
        assert!(settings.to_string().contains("[E2001]"));
        assert!(settings.to_string().contains("project_settings.config"));

        let model = Error::model_settings("Metadata/model_settings.config", "unclosed");
        assert!(model.to_string().contains("[E2002]"));
        assert!(model.to_string().contains("model_settings.config"));
    }

    #[test]
    fn test_exit_codes_are_distinct_per_category() {
        let errors = [
            Error::Io(io::Error::other("x")),
            Error::FileNotFound(PathBuf::from("x")),
            Error::Zip(zip::result::ZipError::FileNotFound),
            Error::settings("a", "b"),
            Error::model_settings("a", "b"),
            Error::unsafe_path("a", "b"),
        ];
        let mut codes: Vec<u8> = errors.iter().map(Error::exit_code).collect();
        assert!(codes.iter().all(|&c| c != 0 && c != 2));
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_zip_error_conversion() {
        let err = Error::from(zip::result::ZipError::InvalidArchive("bad".into()));
        assert!(err.to_string().contains("[E1002]"));
        assert_eq!(err.exit_code(), 4);
    }
}
