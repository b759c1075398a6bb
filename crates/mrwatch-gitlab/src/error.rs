//! Error types for the GitLab client.

use thiserror::Error;

/// Errors that can occur while querying GitLab.
#[derive(Debug, Error)]
pub enum GitLabError {
    /// HTTP transport failure.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// GitLab rejected the request at the HTTP level.
    #[error("GitLab API returned status {status}: {message}")]
    Api { status: u16, message: String },

    /// The GraphQL layer reported errors.
    #[error("GraphQL errors: {}", .messages.join("; "))]
    GraphQl { messages: Vec<String> },

    /// The response carried no group data (unknown path or no access).
    #[error("no group found for path {group_path:?}")]
    GroupNotFound { group_path: String },

    /// A page claimed to have a successor but carried no cursor.
    #[error("pagination cursor missing on a non-final page")]
    MissingCursor,
}

/// Result type alias for GitLab operations.
pub type Result<T> = std::result::Result<T, GitLabError>;
