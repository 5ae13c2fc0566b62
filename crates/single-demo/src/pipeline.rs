//! Default-if-empty pipeline
//!
//! Builds `from_optional(value).with_default(fallback)` with a logging tap
//! and activates it.

use crate::config::DemoConfig;
use crate::error::DemoError;
use single_core::{message_observer, LogSink, Single};

/// Build the demo pipeline without activating it
pub fn default_if_empty_pipeline<S>(value: Option<String>, fallback: String, sink: S) -> Single<String>
where
    S: LogSink + 'static,
{
    Single::from_optional(value)
        .with_default(fallback)
        .on_each(message_observer(sink))
}

/// Build and activate the pipeline on the calling thread
pub fn run<S>(config: &DemoConfig, sink: S)
where
    S: LogSink + 'static,
{
    tracing::debug!(
        value_present = config.value.is_some(),
        fallback = %config.fallback,
        "running default-if-empty pipeline"
    );
    default_if_empty_pipeline(config.value.clone(), config.fallback.clone(), sink).activate();
}

/// Build the pipeline and activate it on the tokio runtime
///
/// # Errors
/// `DemoError::Activation` if the spawned activation panicked
pub async fn run_spawned<S>(config: &DemoConfig, sink: S) -> Result<(), DemoError>
where
    S: LogSink + 'static,
{
    default_if_empty_pipeline(config.value.clone(), config.fallback.clone(), sink)
        .spawn()
        .await?;
    Ok(())
}
