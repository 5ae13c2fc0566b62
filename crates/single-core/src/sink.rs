//! Diagnostic log sinks
//!
//! Observers that log do so through a [`LogSink`] rather than a concrete
//! logging framework. [`TracingSink`] forwards to `tracing` at debug level.

use std::fmt;
use std::sync::Arc;

/// Target used by [`TracingSink`]
pub const MESSAGE_TARGET: &str = "single::message";

/// Capability for writing diagnostic messages
pub trait LogSink: Send + Sync {
    /// Write one formatted message
    fn write(&self, message: &str);
}

impl<S: LogSink + ?Sized> LogSink for &S {
    fn write(&self, message: &str) {
        (**self).write(message);
    }
}

impl<S: LogSink + ?Sized> LogSink for Arc<S> {
    fn write(&self, message: &str) {
        (**self).write(message);
    }
}

impl<S: LogSink + ?Sized> LogSink for Box<S> {
    fn write(&self, message: &str) {
        (**self).write(message);
    }
}

/// Sink that emits each message as a `tracing` debug event
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn write(&self, message: &str) {
        tracing::debug!(target: MESSAGE_TARGET, "{message}");
    }
}

/// Format a value the way [`message_observer`] writes it
#[inline]
#[must_use]
pub fn format_message<T: fmt::Display + ?Sized>(value: &T) -> String {
    format!("message => {value}")
}

/// Observer writing `message => {value}` to `sink`
///
/// Intended for [`Single::on_each`](crate::Single::on_each).
pub fn message_observer<T, S>(sink: S) -> impl FnOnce(&T) + Send + 'static
where
    T: fmt::Display + 'static,
    S: LogSink + 'static,
{
    move |value: &T| sink.write(&format_message(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct VecSink(Mutex<Vec<String>>);

    impl LogSink for VecSink {
        fn write(&self, message: &str) {
            self.0.lock().unwrap().push(message.to_string());
        }
    }

    #[test]
    fn format_message_matches_log_line() {
        assert_eq!(format_message("Hello World"), "message => Hello World");
        assert_eq!(format_message(&42), "message => 42");
    }

    #[test]
    fn message_observer_writes_to_shared_sink() {
        let sink = Arc::new(VecSink::default());

        let observer = message_observer::<String, _>(Arc::clone(&sink));
        observer(&"hi".to_string());

        assert_eq!(*sink.0.lock().unwrap(), vec!["message => hi"]);
    }

    #[test]
    fn boxed_sink_forwards() {
        let inner = Arc::new(VecSink::default());
        let boxed: Box<dyn LogSink> = Box::new(Arc::clone(&inner));

        boxed.write("one");
        let by_ref: &dyn LogSink = &boxed;
        by_ref.write("two");

        assert_eq!(*inner.0.lock().unwrap(), vec!["one", "two"]);
    }
}
