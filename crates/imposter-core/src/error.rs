//! Error types for imposter-core

/// Result type for imposter-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during reconciliation
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A mutation failed; no later rules were attempted
    #[error("failed to {action} branch protection rule '{pattern}': {source}")]
    Mutation {
        action: String,
        pattern: String,
        #[source]
        source: imposter_github::Error,
    },

    /// The observer asked to stop before this rule was applied
    #[error("stopped before {action} of branch protection rule '{pattern}'")]
    Stopped { action: String, pattern: String },

    // Transparent wrappers for underlying crate errors
    /// Settings error from imposter-meta
    #[error(transparent)]
    Meta(#[from] imposter_meta::Error),

    /// Repository resolution error from imposter-git
    #[error(transparent)]
    Git(#[from] imposter_git::Error),

    /// API error from imposter-github
    #[error(transparent)]
    GitHub(#[from] imposter_github::Error),
}
