//! Error types for imposter-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from imposter-core
    #[error(transparent)]
    Core(#[from] imposter_core::Error),

    /// Error from imposter-meta
    #[error(transparent)]
    Meta(#[from] imposter_meta::Error),

    /// Error from imposter-git
    #[error(transparent)]
    Git(#[from] imposter_git::Error),

    /// Error from imposter-github
    #[error(transparent)]
    GitHub(#[from] imposter_github::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Logging setup error
    #[error("Failed to initialize logging: {0}")]
    Logging(String),
}
