//! Application-wide error types.
//!
//! This module provides a unified error hierarchy for the application.
//! Library modules use specific error types via `thiserror`, while
//! CLI/main uses `anyhow` for convenient error propagation.
//!
//! # Design
//!
//! - [`Error`]: Top-level application error enum
//! - Module-specific errors ([`MetadataError`], [`ConfigError`]) for detailed handling
//! - Fetcher errors never reach this level during a lookup; they only
//!   surface here when building the HTTP client fails
//!
//! # Example
//!
//! ```ignore
//! use practice_minder::error::{Result, ResultExt};
//!
//! fn read_record(path: &Path) -> Result<SongRecord> {
//!     let text = std::fs::read_to_string(path).with_context("reading song record")?;
//!     Ok(serde_json::from_str(&text)?)
//! }
//! ```

use std::path::PathBuf;

use crate::config::ConfigError;
use crate::enrichment::MetadataError;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Metadata source setup error
    #[error("Metadata error: {0}")]
    Metadata(#[from] MetadataError),

    /// Song record (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A song record that cannot be looked up
    #[error("Invalid song record {path}: {message}")]
    InvalidRecord { path: PathBuf, message: String },

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create an invalid record error.
    pub fn invalid_record(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::InvalidRecord {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Io(e).context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, serde_json::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Json(e).context(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_record_display() {
        let err = Error::invalid_record("/songs/hey-jude.json", "title is empty");
        let msg = err.to_string();
        assert!(msg.contains("hey-jude.json"));
        assert!(msg.contains("title is empty"));
    }

    #[test]
    fn test_error_with_context() {
        let err = Error::from(MetadataError::Client("no TLS backend".to_string()))
            .context("while building sources");
        let msg = err.to_string();
        assert!(msg.contains("while building sources"));
        assert!(msg.contains("no TLS backend"));
    }

    #[test]
    fn test_result_ext() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        let with_ctx = result.with_context("reading song record");
        assert!(
            with_ctx
                .unwrap_err()
                .to_string()
                .contains("reading song record")
        );
    }

    #[test]
    fn test_json_errors_convert() {
        let parsed: std::result::Result<u32, _> = serde_json::from_str("not json");
        let err: Error = parsed.unwrap_err().into();
        assert!(matches!(err, Error::Json(_)));
    }
}
