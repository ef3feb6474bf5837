use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum PolicyError {
    /// The input was not syntactically valid JSON. `escaped` holds the
    /// offending text percent-encoded so it can be logged safely.
    #[error("failed to parse policy: {message} (document: {escaped})")]
    ParseError { message: String, escaped: String },

    /// The input was valid JSON but did not match the policy grammar at `path`.
    #[error("invalid policy shape at {path}: {message}")]
    SchemaError { path: String, message: String },

    #[error("failed to decode escaped policy: {0}")]
    DecodeError(String),

    #[error("failed to serialize policy: {0}")]
    SerializeError(String),
}

impl From<serde_json::Error> for PolicyError {
    fn from(err: serde_json::Error) -> Self {
        PolicyError::SerializeError(err.to_string())
    }
}

impl PolicyError {
    pub(crate) fn schema(path: impl Into<String>, message: impl Into<String>) -> Self {
        PolicyError::SchemaError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// The field path of a schema error, if this is one.
    pub fn path(&self) -> Option<&str> {
        match self {
            PolicyError::SchemaError { path, .. } => Some(path),
            _ => None,
        }
    }
}
