//! Testing utilities for the Single workspace
//!
//! Recording sinks and observers shared by the crate test suites.

#![allow(missing_docs)]

use parking_lot::Mutex;
use single_core::LogSink;
use std::fmt;
use std::sync::Arc;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// Log sink that keeps every written message
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.messages.lock().len()
    }
}

impl LogSink for RecordingSink {
    fn write(&self, message: &str) {
        self.messages.lock().push(message.to_string());
    }
}

/// Records `(label, value)` pairs in the order observers fire
#[derive(Debug)]
pub struct Recorder<T> {
    calls: Arc<Mutex<Vec<(String, T)>>>,
}

impl<T> Clone for Recorder<T> {
    fn clone(&self) -> Self {
        Self {
            calls: Arc::clone(&self.calls),
        }
    }
}

impl<T> Default for Recorder<T> {
    fn default() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<T: Clone + Send + 'static> Recorder<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observer that records `label` together with the value it sees
    pub fn observer(&self, label: &str) -> impl FnOnce(&T) + Send + 'static {
        let calls = Arc::clone(&self.calls);
        let label = label.to_string();
        move |value: &T| calls.lock().push((label, value.clone()))
    }

    pub fn calls(&self) -> Vec<(String, T)> {
        self.calls.lock().clone()
    }

    pub fn values(&self) -> Vec<T> {
        self.calls.lock().iter().map(|(_, v)| v.clone()).collect()
    }

    pub fn labels(&self) -> Vec<String> {
        self.calls.lock().iter().map(|(l, _)| l.clone()).collect()
    }

    pub fn count(&self) -> usize {
        self.calls.lock().len()
    }
}

/// One event seen by [`EventCapture`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedEvent {
    pub level: Level,
    pub target: String,
    pub message: String,
}

/// `tracing` layer that keeps every event it sees
#[derive(Debug, Clone, Default)]
pub struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl EventCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` with this capture installed as the thread's default subscriber
    pub fn in_scope<R>(&self, f: impl FnOnce() -> R) -> R {
        let subscriber = tracing_subscriber::registry().with(self.clone());
        tracing::subscriber::with_default(subscriber, f)
    }

    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().clone()
    }

    /// Events emitted under `target`
    pub fn for_target(&self, target: &str) -> Vec<CapturedEvent> {
        self.events
            .lock()
            .iter()
            .filter(|e| e.target == target)
            .cloned()
            .collect()
    }
}

impl<S: Subscriber> Layer<S> for EventCapture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let metadata = event.metadata();
        self.events.lock().push(CapturedEvent {
            level: *metadata.level(),
            target: metadata.target().to_string(),
            message: visitor.message,
        });
    }
}

#[derive(Default)]
struct MessageVisitor {
    message: String,
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        }
    }
}
