//! Error types for the raddec-filter core library.
//!
//! Building and evaluating a filter never fails: malformed parameters leave
//! a criterion unconfigured and incomplete raddecs are rejected. The only
//! failure modes are reading and parsing a filter parameter file.
//!
//! # Example
//!
//! ```rust
//! use raddec_filter_core::error::{FilterError, Result};
//! use std::path::PathBuf;
//!
//! fn require_file(path: &PathBuf) -> Result<()> {
//!     if !path.exists() {
//!         return Err(FilterError::FilterFileNotFound(path.clone()));
//!     }
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading filter parameters.
#[derive(Debug, Error)]
pub enum FilterError {
    /// The filter parameter file was not found at the expected path.
    #[error("Filter parameter file not found at: {}", .0.display())]
    FilterFileNotFound(PathBuf),

    /// The filter parameter file could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        /// Path being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON.
    #[error("Failed to parse JSON filter parameters in {}: {source}", .path.display())]
    ParseJson {
        /// Path being parsed.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The file is not valid TOML.
    #[error("Failed to parse TOML filter parameters in {}: {source}", .path.display())]
    ParseToml {
        /// Path being parsed.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },
}

/// A specialized [`Result`] type for filter parameter loading.
pub type Result<T> = std::result::Result<T, FilterError>;

impl FilterError {
    /// Returns an HTTP-appropriate status code for this error.
    #[inline]
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::FilterFileNotFound(_) => 404,
            Self::ParseJson { .. } | Self::ParseToml { .. } => 422,
            Self::Io { .. } => 500,
        }
    }

    /// Returns a machine-readable error code for API responses.
    #[inline]
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::FilterFileNotFound(_) => "FILTER_FILE_NOT_FOUND",
            Self::Io { .. } => "FILTER_FILE_IO_ERROR",
            Self::ParseJson { .. } => "FILTER_FILE_INVALID_JSON",
            Self::ParseToml { .. } => "FILTER_FILE_INVALID_TOML",
        }
    }
}
