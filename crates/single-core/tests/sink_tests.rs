//! Sink Tests
//!
//! `TracingSink` output as seen by an installed subscriber.

use pretty_assertions::assert_eq;
use single_core::prelude::*;
use single_core::MESSAGE_TARGET;
use single_test_utils::{CapturedEvent, EventCapture};
use tracing::Level;

#[test]
fn test_tracing_sink_logs_hello_world_at_debug() {
    let capture = EventCapture::new();

    capture.in_scope(|| {
        Single::<String>::from_optional(None)
            .with_default("Hello World".to_string())
            .on_each(message_observer(TracingSink))
            .activate();
    });

    assert_eq!(
        capture.for_target(MESSAGE_TARGET),
        vec![CapturedEvent {
            level: Level::DEBUG,
            target: MESSAGE_TARGET.to_string(),
            message: "message => Hello World".to_string(),
        }]
    );
}

#[test]
fn test_tracing_sink_writes_each_message_once() {
    let capture = EventCapture::new();

    capture.in_scope(|| {
        TracingSink.write("first");
        TracingSink.write("second");
    });

    let messages: Vec<String> = capture
        .for_target(MESSAGE_TARGET)
        .into_iter()
        .map(|e| e.message)
        .collect();
    assert_eq!(messages, vec!["first".to_string(), "second".to_string()]);
}

#[test]
fn test_activation_emits_trace_event() {
    let capture = EventCapture::new();

    capture.in_scope(|| Single::just(1u8).activate());

    let events = capture.events();
    assert!(events
        .iter()
        .any(|e| e.level == Level::TRACE && e.message == "single activated"));
}

#[test]
fn test_nothing_logged_without_activation() {
    let capture = EventCapture::new();

    capture.in_scope(|| {
        let pipeline = Single::just("idle".to_string()).on_each(message_observer(TracingSink));
        drop(pipeline);
    });

    assert!(capture.events().is_empty());
}
