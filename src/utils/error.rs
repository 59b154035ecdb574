use crate::domain::model::{ArticleId, UserId};
use thiserror::Error;

/// Errors raised by storage adapters behind the rating ports.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("Vote already exists for article {article_id} and user {user_id}")]
    Conflict { article_id: ArticleId, user_id: UserId },

    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("No vote found for article {article_id} and user {user_id}")]
    VoteNotFound { article_id: ArticleId, user_id: UserId },

    #[error("Storage backend error: {0}")]
    Backend(String),
}

#[derive(Error, Debug)]
pub enum RatingError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

impl RatingError {
    /// True when a concurrent cast already persisted a vote for the same pair.
    pub fn is_conflict(&self) -> bool {
        matches!(self, RatingError::Storage(StorageError::Conflict { .. }))
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            RatingError::Storage(StorageError::Conflict { .. }) => {
                "This vote was already recorded by another request".to_string()
            }
            RatingError::Storage(StorageError::UserNotFound(user_id)) => {
                format!("Unknown user {}", user_id)
            }
            RatingError::Storage(_) => "The vote store is unavailable".to_string(),
            RatingError::IoError(e) => format!("Could not read file: {}", e),
            RatingError::ConfigError { message } => format!("Invalid configuration: {}", message),
            RatingError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid value for '{}': {}", field, reason)
            }
            RatingError::MissingConfigError { field } => {
                format!("Missing required setting '{}'", field)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, RatingError>;
