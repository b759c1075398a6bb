//! Error types for classification inputs.

use thiserror::Error;

/// Errors parsing the configured rosters.
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// The eligible-reviewers JSON is malformed.
    #[error("invalid reviewer roster: {0}")]
    InvalidRoster(#[source] serde_json::Error),

    /// The deadlines YAML is malformed.
    #[error("invalid deadlines roster: {0}")]
    InvalidDeadlines(#[source] serde_yaml::Error),
}

/// Result type alias for classification operations.
pub type Result<T> = std::result::Result<T, ClassifyError>;
