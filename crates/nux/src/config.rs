//! Input handling configuration.
//!
//! ```
//! use nux::InputConfig;
//!
//! let config = InputConfig::from_toml_str("double_click_time_ms = 300").unwrap();
//! assert_eq!(config.double_click_time_ms, 300);
//! assert!(config.gestures_enabled);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Tunables for pointer and gesture handling.
///
/// Every field has a default, so a partial TOML document is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Longest interval between two presses that still counts as a double click.
    pub double_click_time_ms: u64,
    /// Farthest the pointer may travel between the presses of a double click.
    pub double_click_distance: f32,
    /// When false, gesture events are dropped before reaching the broker.
    pub gestures_enabled: bool,
    /// Pointer travel while a button is held before moves are reported as
    /// drags. Zero reports every held move.
    pub drag_threshold: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            double_click_time_ms: 500,
            double_click_distance: 5.0,
            gestures_enabled: true,
            drag_threshold: 0.0,
        }
    }
}

impl InputConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes to TOML.
    pub fn to_toml_string(&self) -> String {
        // Plain scalars always serialize.
        toml::to_string(self).unwrap_or_default()
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.double_click_time_ms == 0 {
            return Err(Error::invalid_config(
                "double_click_time_ms",
                "must be greater than zero",
            ));
        }
        if self.double_click_distance.is_nan() || self.double_click_distance < 0.0 {
            return Err(Error::invalid_config(
                "double_click_distance",
                "must be a non-negative number",
            ));
        }
        if self.drag_threshold.is_nan() || self.drag_threshold < 0.0 {
            return Err(Error::invalid_config(
                "drag_threshold",
                "must be a non-negative number",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = InputConfig::default();
        assert_eq!(config.double_click_time_ms, 500);
        assert_eq!(config.double_click_distance, 5.0);
        assert!(config.gestures_enabled);
        assert_eq!(config.drag_threshold, 0.0);
    }

    #[test]
    fn test_partial_document_uses_defaults() {
        let config = InputConfig::from_toml_str(
            r#"
            gestures_enabled = false
            drag_threshold = 8.0
            "#,
        )
        .unwrap();
        assert!(!config.gestures_enabled);
        assert_eq!(config.drag_threshold, 8.0);
        assert_eq!(config.double_click_time_ms, 500);
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(InputConfig::from_toml_str("").unwrap(), InputConfig::default());
    }

    #[test]
    fn test_rejects_zero_double_click_time() {
        let err = InputConfig::from_toml_str("double_click_time_ms = 0").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { ref field, .. } if field == "double_click_time_ms"));
    }

    #[test]
    fn test_rejects_negative_distance() {
        let err = InputConfig::from_toml_str("double_click_distance = -1.0").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }

    #[test]
    fn test_parse_error() {
        let err = InputConfig::from_toml_str("double_click_time_ms = \"soon\"").unwrap_err();
        assert!(matches!(err, Error::ConfigParse(_)));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = InputConfig {
            double_click_time_ms: 250,
            ..InputConfig::default()
        };
        let parsed = InputConfig::from_toml_str(&config.to_toml_string()).unwrap();
        assert_eq!(parsed, config);
    }
}
