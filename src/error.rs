use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for build-semver operations
#[derive(Error, Debug)]
pub enum VersionError {
    #[error("Version properties file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Invalid value for '{key}': '{value}' is not a non-negative integer")]
    Parse { key: String, value: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience type alias for Results in build-semver
pub type Result<T> = std::result::Result<T, VersionError>;

impl VersionError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        VersionError::Config(msg.into())
    }

    /// Create a parse error for a store key
    pub fn parse(key: impl Into<String>, value: impl Into<String>) -> Self {
        VersionError::Parse {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        VersionError::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the error belongs to the degradable I/O family.
    ///
    /// `NotFound` and `Io` let the caller fall back to a configuration-only
    /// version; everything else aborts the operation.
    pub fn is_io(&self) -> bool {
        matches!(self, VersionError::NotFound { .. } | VersionError::Io { .. })
    }
}
