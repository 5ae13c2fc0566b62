//! Deferred single-value container
//!
//! A [`Single`] produces at most one value, or completes empty. Nothing runs
//! until the container is activated:
//! - the upstream value is resolved (ready, deferred closure, or future)
//! - registered steps run in registration order
//! - the container is consumed

use futures::future::BoxFuture;
use futures::FutureExt;
use std::fmt;
use std::future::Future;
use tokio::runtime::{self, Handle, RuntimeFlavor};
use tokio::task::JoinHandle;

/// Panic message for a blocking activation inside a current-thread runtime
pub const CURRENT_THREAD_PANIC: &str =
    "Single::activate cannot block on a future upstream inside a current-thread runtime; use activate_async or spawn";

/// Side-effecting callback run with the resolved value
type Observer<T> = Box<dyn FnOnce(&T) + Send>;

/// Source of the (optional) value
enum Upstream<T> {
    /// Value known at construction time
    Ready(Option<T>),
    /// Value computed on activation
    Deferred(Box<dyn FnOnce() -> Option<T> + Send>),
    /// Value awaited on activation
    Future(BoxFuture<'static, Option<T>>),
}

impl<T> Upstream<T> {
    fn kind(&self) -> &'static str {
        match self {
            Self::Ready(Some(_)) => "ready",
            Self::Ready(None) => "empty",
            Self::Deferred(_) => "deferred",
            Self::Future(_) => "future",
        }
    }
}

/// Registered step applied during activation
enum Step<T> {
    /// Substitute the fallback if no value is present yet
    Default(T),
    /// Tap the value if one is present
    Observe(Observer<T>),
}

/// Deferred computation producing at most one value
///
/// Built with [`Single::from_optional`] (or one of the other constructors),
/// extended with [`Single::with_default`] and [`Single::on_each`], and
/// triggered with [`Single::activate`].
///
/// Activation takes `self` by value, so a container can be activated at
/// most once.
///
/// # Example
///
/// ```rust
/// use single_core::Single;
/// use std::sync::{Arc, Mutex};
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&seen);
///
/// Single::<String>::from_optional(None)
///     .with_default("Hello World".to_string())
///     .on_each(move |message| sink.lock().unwrap().push(message.clone()))
///     .activate();
///
/// assert_eq!(*seen.lock().unwrap(), vec!["Hello World".to_string()]);
/// ```
#[must_use = "a Single does nothing until it is activated"]
pub struct Single<T> {
    upstream: Upstream<T>,
    steps: Vec<Step<T>>,
}

impl<T> Single<T> {
    /// Create a container from an optional value
    ///
    /// `None` gives a container that completes empty.
    #[inline]
    pub fn from_optional(value: Option<T>) -> Self {
        Self::with_upstream(Upstream::Ready(value))
    }

    /// Create a container holding `value`
    #[inline]
    pub fn just(value: T) -> Self {
        Self::from_optional(Some(value))
    }

    /// Create a container that completes empty
    #[inline]
    pub fn empty() -> Self {
        Self::from_optional(None)
    }

    /// Create a container whose value is computed on activation
    ///
    /// `producer` is called exactly once, during activation.
    #[inline]
    pub fn defer<F>(producer: F) -> Self
    where
        F: FnOnce() -> Option<T> + Send + 'static,
    {
        Self::with_upstream(Upstream::Deferred(Box::new(producer)))
    }

    /// Create a container whose value is awaited on activation
    ///
    /// The future is not polled before activation.
    #[inline]
    pub fn from_future<F>(future: F) -> Self
    where
        F: Future<Output = Option<T>> + Send + 'static,
    {
        Self::with_upstream(Upstream::Future(future.boxed()))
    }

    fn with_upstream(upstream: Upstream<T>) -> Self {
        Self {
            upstream,
            steps: Vec::new(),
        }
    }

    /// Substitute `fallback` when the upstream completes empty
    ///
    /// A present value is left untouched. If several defaults are
    /// registered, the first one that sees an empty container wins.
    #[inline]
    pub fn with_default(mut self, fallback: T) -> Self {
        self.steps.push(Step::Default(fallback));
        self
    }

    /// Register an observer invoked with the value, if one is present
    ///
    /// The observer runs at most once, in registration order relative to
    /// the other steps. An observer registered before a default on an empty
    /// upstream never runs.
    #[inline]
    pub fn on_each<F>(mut self, observer: F) -> Self
    where
        F: FnOnce(&T) + Send + 'static,
    {
        self.steps.push(Step::Observe(Box::new(observer)));
        self
    }

    /// Number of registered steps (defaults and observers)
    #[inline]
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Whether the upstream value is only known after activation
    #[inline]
    #[must_use]
    pub fn is_deferred(&self) -> bool {
        matches!(self.upstream, Upstream::Deferred(_) | Upstream::Future(_))
    }

    /// Trigger evaluation on the calling thread
    ///
    /// A future upstream is driven to completion according to the ambient
    /// tokio runtime:
    /// - no runtime: a temporary current-thread runtime with timers and IO
    /// - multi-thread runtime: the current worker blocks in place
    ///
    /// Use [`Single::activate_async`] or [`Single::spawn`] from async code.
    ///
    /// # Panics
    /// - Propagates any panic raised by the upstream or an observer.
    /// - Panics if a future upstream is activated from a current-thread
    ///   runtime, where blocking would stall the runtime driving it.
    pub fn activate(self) {
        let Self { upstream, steps } = self;
        let value = match upstream {
            Upstream::Ready(value) => value,
            Upstream::Deferred(producer) => producer(),
            Upstream::Future(future) => block_on_upstream(future),
        };
        complete(value, steps);
    }

    /// Trigger evaluation, awaiting a future upstream
    ///
    /// # Panics
    /// Propagates any panic raised by the upstream or an observer.
    pub async fn activate_async(self) {
        let Self { upstream, steps } = self;
        let value = match upstream {
            Upstream::Ready(value) => value,
            Upstream::Deferred(producer) => producer(),
            Upstream::Future(future) => future.await,
        };
        complete(value, steps);
    }
}

impl<T: Send + 'static> Single<T> {
    /// Schedule activation onto the tokio runtime
    ///
    /// A panicking observer surfaces as a [`tokio::task::JoinError`] when
    /// the handle is awaited.
    ///
    /// # Panics
    /// Panics if called outside of a tokio runtime.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.activate_async())
    }
}

/// Drive a future upstream to completion from synchronous code
fn block_on_upstream<T>(future: BoxFuture<'static, Option<T>>) -> Option<T> {
    match Handle::try_current() {
        Ok(handle) => match handle.runtime_flavor() {
            RuntimeFlavor::CurrentThread => panic!("{CURRENT_THREAD_PANIC}"),
            _ => tokio::task::block_in_place(|| handle.block_on(future)),
        },
        Err(_) => match runtime::Builder::new_current_thread().enable_all().build() {
            Ok(rt) => rt.block_on(future),
            Err(err) => {
                tracing::warn!(error = %err, "runtime unavailable, polling upstream on the calling thread");
                futures::executor::block_on(future)
            }
        },
    }
}

/// Apply steps to the resolved value, in order
fn complete<T>(mut value: Option<T>, steps: Vec<Step<T>>) {
    let mut fallback_used = false;
    let mut observed = 0usize;

    for step in steps {
        match step {
            Step::Default(fallback) => {
                if value.is_none() {
                    value = Some(fallback);
                    fallback_used = true;
                }
            }
            Step::Observe(observer) => {
                if let Some(current) = value.as_ref() {
                    observer(current);
                    observed += 1;
                }
            }
        }
    }

    tracing::trace!(
        present = value.is_some(),
        fallback_used,
        observed,
        "single activated"
    );
}

impl<T> Default for Single<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<Option<T>> for Single<T> {
    fn from(value: Option<T>) -> Self {
        Self::from_optional(value)
    }
}

impl<T> fmt::Debug for Single<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Single")
            .field("upstream", &self.upstream.kind())
            .field("steps", &self.steps.len())
            .finish()
    }
}
