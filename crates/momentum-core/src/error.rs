//! Error types for momentum-core.
//!
//! One thiserror enum per concern, rolled up into [`CoreError`] at the
//! library boundary.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for momentum-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Identity service errors
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Suggestion generation errors
    #[error("Suggestion error: {0}")]
    Suggest(#[from] SuggestError),

    /// Domain validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Key-value storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the backing database
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// A value could not be serialized for storage
    #[error("Failed to encode value: {0}")]
    Encode(#[from] serde_json::Error),
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::QueryFailed(err.to_string())
    }
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Value cannot be coerced into the key's type
    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Identity service errors.
#[derive(Error, Debug)]
pub enum AuthError {
    /// The identity service endpoint is not configured
    #[error("Identity service is not configured")]
    NotConfigured,

    /// No stored session; the operation requires one
    #[error("Not signed in")]
    NotAuthenticated,

    /// The account exists but the email has not been confirmed
    #[error("Please check your email for the confirmation link")]
    EmailNotConfirmed,

    /// The identity service rejected the request
    #[error("Identity service rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Transport-level failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Malformed endpoint URL
    #[error("Invalid identity service URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// OS keyring failure while persisting or loading the session
    #[error("Keyring error: {0}")]
    Keyring(String),

    /// The async runtime could not be started
    #[error("Runtime error: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Suggestion generation errors.
#[derive(Error, Debug)]
pub enum SuggestError {
    /// The remote suggester is not configured or the app is offline
    #[error("Remote suggestions are unavailable")]
    Unavailable,

    /// Transport-level failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The model reply could not be parsed into suggestions
    #[error("Malformed suggestion reply: {0}")]
    MalformedReply(String),

    /// The async runtime could not be started
    #[error("Runtime error: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Domain validation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Goal targets and progress ratios are undefined for a zero target
    #[error("Goal target must be at least 1")]
    ZeroTarget,

    /// Titles must contain at least one non-whitespace character
    #[error("Title must not be empty")]
    EmptyTitle,

    /// The referenced category does not exist
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// The referenced action does not exist
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    /// The referenced goal does not exist
    #[error("Unknown goal: {0}")]
    UnknownGoal(String),

    /// The referenced reward does not exist
    #[error("Unknown reward: {0}")]
    UnknownReward(String),

    /// At least one category must exist at all times
    #[error("The last category cannot be removed")]
    LastCategory,

    /// Seed rewards cannot be deleted
    #[error("Default rewards cannot be deleted")]
    DefaultReward,

    /// The reward is still locked and cannot be claimed
    #[error("Reward is locked: {0}")]
    RewardLocked(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
