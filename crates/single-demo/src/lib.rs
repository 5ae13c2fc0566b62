//! Single Demo - the default-if-empty pipeline
//!
//! Runs an empty upstream through a `"Hello World"` fallback and logs
//! `message => Hello World` at debug level.
//!
//! # Example
//!
//! ```rust,ignore
//! use single_demo::{init_tracing, run, DemoConfig};
//! use single_core::TracingSink;
//!
//! let config = DemoConfig::new();
//! init_tracing(&config.log_filter)?;
//! run(&config, TracingSink);
//! ```

#![warn(unreachable_pub)]

pub mod config;
pub mod error;
pub mod pipeline;

pub use config::{DemoConfig, DEFAULT_FALLBACK, DEFAULT_LOG_FILTER};
pub use error::DemoError;
pub use pipeline::{default_if_empty_pipeline, run, run_spawned};

use tracing_subscriber::EnvFilter;

/// Build the subscriber filter
///
/// `env_directives` (the value of `RUST_LOG`, if set) takes precedence over
/// `default_filter`. A set but invalid `RUST_LOG` is an error, not a reason
/// to fall back.
///
/// # Errors
/// `DemoError::Logging` if the selected directives do not parse
pub fn build_env_filter(
    env_directives: Option<&str>,
    default_filter: &str,
) -> Result<EnvFilter, DemoError> {
    match env_directives {
        Some(directives) => EnvFilter::try_new(directives).map_err(|e| {
            DemoError::Logging(format!("invalid {}: {e}", EnvFilter::DEFAULT_ENV))
        }),
        None => EnvFilter::try_new(default_filter)
            .map_err(|e| DemoError::Logging(format!("invalid log filter {default_filter:?}: {e}"))),
    }
}

/// Install `filter` on the global `fmt` subscriber
///
/// # Errors
/// `DemoError::Logging` if a global subscriber is already installed
pub fn install_subscriber(filter: EnvFilter) -> Result<(), DemoError> {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| DemoError::Logging(e.to_string()))
}

/// Install the global `fmt` subscriber
///
/// `RUST_LOG` takes precedence over `default_filter` when set.
///
/// # Errors
/// `DemoError::Logging` if `RUST_LOG` is not valid unicode, the selected
/// filter is invalid, or a subscriber is already installed
pub fn init_tracing(default_filter: &str) -> Result<(), DemoError> {
    let env_directives = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) => Some(directives),
        Err(std::env::VarError::NotPresent) => None,
        Err(e) => {
            return Err(DemoError::Logging(format!(
                "invalid {}: {e}",
                EnvFilter::DEFAULT_ENV
            )))
        }
    };

    install_subscriber(build_env_filter(env_directives.as_deref(), default_filter)?)
}
