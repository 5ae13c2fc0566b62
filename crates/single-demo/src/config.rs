//! Demo configuration
//!
//! Loaded from an optional TOML file; CLI flags override individual fields.

use crate::error::DemoError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Fallback used when no value is supplied
pub const DEFAULT_FALLBACK: &str = "Hello World";

/// Log filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "debug";

/// Demo pipeline configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Upstream value; `None` exercises the fallback
    pub value: Option<String>,
    /// Value substituted when `value` is absent
    pub fallback: String,
    /// `EnvFilter` directive for the subscriber
    pub log_filter: String,
}

impl DemoConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    ///
    /// Missing keys keep their defaults.
    ///
    /// # Errors
    /// - `DemoError::Io` if the file cannot be read
    /// - `DemoError::Parse` if it is not valid TOML
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DemoError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| DemoError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&raw)
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    /// `DemoError::Parse` if the text is not valid TOML
    pub fn from_toml(raw: &str) -> Result<Self, DemoError> {
        Ok(toml::from_str(raw)?)
    }

    /// With upstream value
    #[inline]
    #[must_use]
    pub fn with_value(mut self, value: Option<String>) -> Self {
        self.value = value;
        self
    }

    /// With fallback
    #[inline]
    #[must_use]
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }

    /// With log filter
    #[inline]
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            value: None,
            fallback: DEFAULT_FALLBACK.to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_demo() {
        let config = DemoConfig::new();
        assert_eq!(config.value, None);
        assert_eq!(config.fallback, "Hello World");
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = DemoConfig::from_toml("value = \"given\"").unwrap();
        assert_eq!(config.value.as_deref(), Some("given"));
        assert_eq!(config.fallback, DEFAULT_FALLBACK);
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "fallback = \"from file\"\nlog_filter = \"info\"").unwrap();

        let config = DemoConfig::load(file.path()).unwrap();
        assert_eq!(
            config,
            DemoConfig::new()
                .with_fallback("from file")
                .with_log_filter("info")
        );
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = DemoConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, DemoError::Io { .. }));
        assert!(err.is_config());
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        let err = DemoConfig::from_toml("fallback = [").unwrap_err();
        assert!(matches!(err, DemoError::Parse(_)));
    }
}
