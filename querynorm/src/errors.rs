use std::borrow::Cow;

use thiserror::Error;

/// Top-level error type returned while normalizing query options.
#[derive(Debug, Error)]
pub enum OptionsError {
    /// A value could not be coerced into the canonical shape of its key.
    #[error("invalid argument for '{key}': {message}")]
    InvalidArgument { key: String, message: String },

    /// A JSON seed document could not be parsed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration file could not be read or parsed.
    #[error("config error: {message}")]
    Config { message: Cow<'static, str> },
}

impl OptionsError {
    /// Convenience helper for constructing an invalid-argument error.
    pub fn invalid(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Convenience helper for constructing a configuration error.
    pub fn config(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Convenience alias for fallible normalizer operations.
pub type OptionsResult<T> = Result<T, OptionsError>;
