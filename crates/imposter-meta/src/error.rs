//! Error types for imposter-meta

use std::path::PathBuf;

/// Result type for imposter-meta operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while locating or decoding the settings file
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to get current user's home directory")]
    HomeDirUnavailable,

    #[error("failed to open config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode config file as {format} {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Config file too large: {path} is {size} bytes (max {max})")]
    ConfigTooLarge { path: PathBuf, size: u64, max: u64 },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
