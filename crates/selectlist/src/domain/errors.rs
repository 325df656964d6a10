//! Domain-specific errors.

use thiserror::Error;

/// Failure while building a [`Selection`](crate::domain::model::Selection) from encoded data.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid item at index {index}: {message}")]
    Item { index: usize, message: String },
    #[error("invalid JSON sequence")]
    Json(#[from] serde_json::Error),
    #[error("invalid YAML sequence")]
    Yaml(#[from] serde_yaml::Error),
}
