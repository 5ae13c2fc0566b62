//! Error types for the demo pipeline
//!
//! The container itself has no failure modes; these cover the surfaces
//! around it:
//! - Reading and parsing the configuration file
//! - Installing the tracing subscriber
//! - Spawned activations that panicked

use std::path::PathBuf;

/// Main demo error type
#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    /// Configuration file could not be read
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        /// Path that was read
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for [`DemoConfig`](crate::DemoConfig)
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Tracing subscriber could not be installed
    #[error("logging initialisation failed: {0}")]
    Logging(String),

    /// Spawned activation did not complete
    #[error("activation failed: {0}")]
    Activation(#[from] tokio::task::JoinError),
}

impl DemoError {
    /// Check if the error comes from configuration input
    #[inline]
    #[must_use]
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::Parse(_))
    }
}
