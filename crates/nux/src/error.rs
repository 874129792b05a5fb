//! Error types for the input crate.
//!
//! Event dispatch and gesture arbitration never fail: they report outcomes
//! through `bool` and `Option` returns. These errors cover the setup surface.

use nux_core::ObjectError;

/// Result type alias for fallible input operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring input handling.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Object registry misuse, e.g. parenting an area under a dead handle.
    #[error("object error: {0}")]
    Object(#[from] ObjectError),

    /// The configuration is not valid TOML or does not fit the schema.
    #[error("failed to parse input configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// A configuration value is out of range.
    #[error("invalid value for '{field}': {message}")]
    InvalidConfig { field: String, message: String },
}

impl Error {
    /// Create a configuration value error.
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::invalid_config("double_click_time_ms", "must be greater than zero");
        assert_eq!(
            err.to_string(),
            "invalid value for 'double_click_time_ms': must be greater than zero"
        );

        let err: Error = ObjectError::InvalidObjectId.into();
        assert!(matches!(err, Error::Object(ObjectError::InvalidObjectId)));
    }
}
