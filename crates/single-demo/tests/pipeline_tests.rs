//! Pipeline Tests
//!
//! The default-if-empty demo end to end, through a recording sink.

use pretty_assertions::assert_eq;
use single_core::LogSink;
use single_demo::{default_if_empty_pipeline, run, run_spawned, DemoConfig, DemoError};
use single_test_utils::RecordingSink;

#[test]
fn test_absent_value_logs_hello_world() {
    let sink = RecordingSink::new();

    run(&DemoConfig::new(), sink.clone());

    assert_eq!(sink.messages(), vec!["message => Hello World".to_string()]);
}

#[test]
fn test_present_value_is_logged_unchanged() {
    let sink = RecordingSink::new();
    let config = DemoConfig::new().with_value(Some("supplied".to_string()));

    run(&config, sink.clone());

    assert_eq!(sink.messages(), vec!["message => supplied".to_string()]);
}

#[test]
fn test_pipeline_is_inert_until_activated() {
    let sink = RecordingSink::new();

    let pipeline = default_if_empty_pipeline(None, "unused".to_string(), sink.clone());
    assert_eq!(pipeline.step_count(), 2);
    assert_eq!(sink.count(), 0);

    pipeline.activate();
    assert_eq!(sink.messages(), vec!["message => unused".to_string()]);
}

#[tokio::test]
async fn test_spawned_run_uses_custom_fallback() {
    let sink = RecordingSink::new();
    let config = DemoConfig::new().with_fallback("custom");

    run_spawned(&config, sink.clone()).await.unwrap();

    assert_eq!(sink.messages(), vec!["message => custom".to_string()]);
}

struct FailingSink;

impl LogSink for FailingSink {
    fn write(&self, message: &str) {
        panic!("sink rejected {message}");
    }
}

#[tokio::test]
async fn test_spawned_run_reports_observer_panic() {
    let err = run_spawned(&DemoConfig::new(), FailingSink).await.unwrap_err();

    match err {
        DemoError::Activation(join) => assert!(join.is_panic()),
        other => panic!("unexpected error: {other}"),
    }
}
