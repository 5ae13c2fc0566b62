//! Tracing Init Tests
//!
//! Global subscriber installation; kept in its own binary since a global
//! subscriber can only be set once per process.

use single_demo::{install_subscriber, DemoError};
use tracing_subscriber::EnvFilter;

#[test]
fn test_second_install_is_rejected() {
    install_subscriber(EnvFilter::new("debug")).unwrap();

    let err = install_subscriber(EnvFilter::new("debug")).unwrap_err();
    assert!(matches!(err, DemoError::Logging(_)));
}
