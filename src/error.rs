//! Error types for the trex crate

use thiserror::Error;

/// Main error type for the trex crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid {axis} buckets: {message}")]
    InvalidBuckets { axis: &'static str, message: String },

    #[error("state index {index} is out of range (model has {num_states} states)")]
    StateOutOfRange { index: usize, num_states: usize },

    #[error("action '{action}' is not part of the modeled action set")]
    UnmodeledAction { action: String },

    #[error("no decidable actions configured for the policy")]
    NoDecidableActions,

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("unsupported save format version {version} (expected {expected})")]
    UnsupportedSaveVersion { version: u32, expected: u32 },

    #[error(
        "saved model shape does not match its grid: grid defines {expected} states, model has {got}"
    )]
    ModelShapeMismatch { expected: usize, got: usize },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to {operation}: {message}")]
    SerializationContext { operation: String, message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
