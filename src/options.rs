use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

use serde::Deserialize;
use tracing::subscriber::NoSubscriber;
use tracing::{dispatcher, error, trace};

use crate::result::SafeResult;

type LoggerFn<E> = Arc<dyn Fn(&E) + Send + Sync>;
type ProcessErrorFn<E> = Arc<dyn Fn(&E) -> Option<E> + Send + Sync>;

/// Failure handling policy for a wrapped computation
///
/// Options are immutable once built and cheap to clone, so the same policy can be shared
/// between any number of invocations.
///
/// | setting         | default        | effect                                              |
/// |-----------------|----------------|-----------------------------------------------------|
/// | `silent`        | `true`         | when true, failures are never logged                |
/// | `logger`        | [default_logger] | sink called with the failure when logging        |
/// | `process_error` | none           | transform applied to the failure before returning it |
///
/// The `silent` flag can be read from any serde format. The callbacks cannot, and unknown
/// fields are ignored.
///
/// ```rust
/// use safe_async::Options;
///
/// let opts: Options = serde_json::from_str(r#"{"silent": false}"#).unwrap();
/// assert!(!opts.is_silent());
/// ```
#[derive(Deserialize)]
#[serde(bound = "")]
pub struct Options<E = anyhow::Error> {
    #[serde(default = "default_silent")]
    silent: bool,
    #[serde(skip)]
    logger: Option<LoggerFn<E>>,
    #[serde(skip)]
    process_error: Option<ProcessErrorFn<E>>,
}

fn default_silent() -> bool {
    true
}

/// Log the failure as a `tracing` error event
///
/// This is the logger used when logging is enabled and no custom logger was given. The
/// event has target `safe_async` and carries the failure `Debug` output in the `error`
/// field. If no tracing subscriber is active, the `Debug` output is written to stderr
/// instead, so the failure is never lost.
pub fn default_logger<E: fmt::Debug + ?Sized>(failure: &E) {
    report(failure, io::stderr());
}

fn report<E: fmt::Debug + ?Sized, W: Write>(failure: &E, mut fallback: W) {
    error!(target: "safe_async", error = ?failure, "async operation failed");
    if !has_subscriber() {
        // a failing stderr has nowhere else to be reported
        let _ = writeln!(fallback, "{failure:?}");
    }
}

/// Check whether the dispatcher in scope for the current thread can record events
fn has_subscriber() -> bool {
    dispatcher::get_default(|dispatch| !dispatch.is::<NoSubscriber>())
}

impl<E> Default for Options<E> {
    fn default() -> Self {
        Self {
            silent: default_silent(),
            logger: None,
            process_error: None,
        }
    }
}

impl<E> Clone for Options<E> {
    fn clone(&self) -> Self {
        Self {
            silent: self.silent,
            logger: self.logger.clone(),
            process_error: self.process_error.clone(),
        }
    }
}

impl<E> fmt::Debug for Options<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("silent", &self.silent)
            .field("logger", &self.logger.as_ref().map(|_| "custom"))
            .field("process_error", &self.process_error.is_some())
            .finish()
    }
}

impl<E> Options<E> {
    /// Create options with the default policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable failure logging
    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Replace the default logger
    ///
    /// The logger is called at most once per failure, and only if `silent` is false.
    pub fn logger<L>(mut self, logger: L) -> Self
    where
        L: Fn(&E) + Send + Sync + 'static,
    {
        self.logger = Some(Arc::new(logger));
        self
    }

    /// Set a function to process failures before they are returned or logged
    ///
    /// If the function returns a new failure, that failure replaces the original one, both
    /// in the result and in the logs. If the function returns `None`, the original failure
    /// is returned but it will not be logged, independently of the value of `silent`.
    pub fn process_error<P>(mut self, process: P) -> Self
    where
        P: Fn(&E) -> Option<E> + Send + Sync + 'static,
    {
        self.process_error = Some(Arc::new(process));
        self
    }

    /// Return true if failures will not be logged
    pub fn is_silent(&self) -> bool {
        self.silent
    }

    /// Apply the failure policy to an already settled outcome
    ///
    /// This is what the wrapped futures do once the pending computation is resolved.
    pub fn settle<T>(&self, outcome: Result<T, E>) -> SafeResult<T, E>
    where
        E: fmt::Debug,
    {
        let raw = match outcome {
            Ok(value) => return SafeResult::Success(value),
            Err(e) => e,
        };
        trace!(silent = self.silent, "pending computation failed");

        let mut should_log = !self.silent;
        let failure = match &self.process_error {
            Some(process) => match process(&raw) {
                Some(processed) => processed,
                None => {
                    trace!("failure logging suppressed by error processor");
                    should_log = false;
                    raw
                }
            },
            None => raw,
        };

        if should_log {
            match &self.logger {
                Some(logger) => logger(&failure),
                None => default_logger(&failure),
            }
        }

        SafeResult::Failure(failure)
    }
}
