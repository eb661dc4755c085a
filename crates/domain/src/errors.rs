//! Error types for the evalboard domain.
//!
//! Everything here is an input validation failure: these errors are raised
//! before any request reaches the evaluation service.

use std::path::PathBuf;

/// Result alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level validation error
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    /// A system output file does not follow the `<number>[_label].<ext>` convention
    #[error(
        "system output file name: {} should start with a number, for example: 8.json",
        path.display()
    )]
    InvalidOutputFileName {
        /// Offending path as given on the command line
        path: PathBuf,
    },

    /// The manifest lists more datasets than there are output files
    #[error("benchmark lists {entries} datasets but only {files} system output files were given")]
    OutputCountMismatch {
        /// Number of manifest entries
        entries: usize,
        /// Number of output files
        files: usize,
    },

    /// The benchmark manifest could not be parsed
    #[error("invalid benchmark manifest: {0}")]
    InvalidManifest(#[source] serde_json::Error),

    /// The system details document is not a JSON object
    #[error("system details must be a JSON object, got {found}")]
    InvalidSystemDetails {
        /// JSON type that was found instead
        found: &'static str,
    },

    /// A file type name is not one of the supported formats
    #[error("unknown file type '{0}', expected one of: text, json, tsv, conll")]
    UnknownFileType(String),
}

impl DomainError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidOutputFileName { .. } => "INVALID_OUTPUT_FILE_NAME",
            Self::OutputCountMismatch { .. } => "OUTPUT_COUNT_MISMATCH",
            Self::InvalidManifest(_) => "INVALID_MANIFEST",
            Self::InvalidSystemDetails { .. } => "INVALID_SYSTEM_DETAILS",
            Self::UnknownFileType(_) => "UNKNOWN_FILE_TYPE",
        }
    }
}
