//! Error types for imposter-github

/// Result type for imposter-github operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to the GitHub API
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {endpoint}: {body}")]
    Status {
        status: u16,
        endpoint: String,
        body: String,
    },

    #[error("GraphQL: {}", messages.join(", "))]
    GraphQl { messages: Vec<String> },

    #[error("Could not resolve to a Repository with the name '{owner}/{name}'")]
    RepositoryNotFound { owner: String, name: String },

    #[error(
        "no authentication token found for {host}; set GH_TOKEN or run `gh auth login`"
    )]
    AuthTokenMissing { host: String },

    #[error("Invalid hosts file at {path}: {message}")]
    InvalidHostsFile { path: String, message: String },

    #[error("Response for {operation} is missing data")]
    MissingData { operation: String },
}
