//! Error types for imposter-git

/// Result type for imposter-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving the target repository
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("repository name is not specified")]
    RepositoryNotSpecified,

    #[error("Unrecognized remote URL: {url}")]
    UnrecognizedRemote { url: String },

    #[error("Git error: {0}")]
    Git(#[from] git2::Error),
}
