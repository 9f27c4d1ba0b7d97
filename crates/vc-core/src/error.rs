use thiserror::Error;

/// A color string the CSS parser could not understand.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("invalid color {0:?}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed surface config: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Color(#[from] ColorError),
    #[error("invalid `{field}`: {reason}")]
    OutOfRange { field: &'static str, reason: String },
}
