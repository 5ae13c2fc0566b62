//! Single Core - deferred single-value containers
//!
//! Provides:
//! - [`Single`]: a computation that yields at most one value, resolved only
//!   when activated
//! - Default-if-empty substitution and tap-style observers
//! - [`LogSink`]: the injected capability observers log through
//!
//! # Example
//!
//! ```rust
//! use single_core::{message_observer, Single, TracingSink};
//!
//! Single::<String>::from_optional(None)
//!     .with_default("Hello World".to_string())
//!     .on_each(message_observer(TracingSink))
//!     .activate();
//! ```

#![warn(unreachable_pub)]

pub mod single;
pub mod sink;

pub use single::{Single, CURRENT_THREAD_PANIC};
pub use sink::{format_message, message_observer, LogSink, TracingSink, MESSAGE_TARGET};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for building and activating containers
    pub use crate::{message_observer, LogSink, Single, TracingSink};
}
