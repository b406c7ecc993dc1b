//! safe-async turns the outcome of a fallible future into an explicit, inspectable result pair.
//!
//! Instead of propagating failures with `?` at every call site, a pending computation is
//! wrapped with [safe_async] (or [safe_async_with] to customize the failure policy) and the
//! call site gets back a [SafeResult], holding either the failure or the success value,
//! never both.
//!
//! ```rust
//! use safe_async::safe_async;
//!
//! async fn fetch_user(id: u32) -> anyhow::Result<String> {
//!     if id == 0 {
//!         anyhow::bail!("user not found");
//!     }
//!     Ok(format!("user-{id}"))
//! }
//!
//! # tokio_test::block_on(async {
//! let (err, user) = safe_async(fetch_user(0)).await.into_pair();
//! assert!(err.is_some());
//! assert!(user.is_none());
//! # })
//! ```
//!
//! # Failure policy
//!
//! What happens to a failure before it is returned is controlled with [Options].
//!
//! - `silent` (default `true`). When disabled, every failure is passed to the logger.
//! - `logger`. A custom sink for failures. The [default_logger] emits a `tracing` error event,
//!   or writes to stderr if no subscriber is active.
//! - `process_error`. A function receiving the raw failure. Returning `Some` replaces the
//!   failure (in the result and in the logs). Returning `None` keeps the original failure in
//!   the result but disables logging for that call.
//!
//! ```rust
//! use safe_async::{safe_async_with, Options};
//!
//! #[derive(Debug, PartialEq)]
//! enum ApiError {
//!     NotFound,
//!     Other(String),
//! }
//!
//! // Not found errors are expected, there is no need to log them
//! let opts = Options::new()
//!     .silent(false)
//!     .process_error(|e: &ApiError| match e {
//!         ApiError::NotFound => None,
//!         ApiError::Other(msg) => Some(ApiError::Other(format!("api: {msg}"))),
//!     });
//!
//! # tokio_test::block_on(async {
//! let res = safe_async_with(async { Err::<(), _>(ApiError::NotFound) }, opts.clone()).await;
//! assert_eq!(res.failure(), Some(&ApiError::NotFound));
//!
//! let res = safe_async_with(async { Err::<(), _>(ApiError::Other("500".into())) }, opts).await;
//! assert_eq!(res.failure(), Some(&ApiError::Other("api: 500".into())));
//! # })
//! ```
//!
//! The wrapper has no state of its own. It does not retry, time out or cancel the wrapped
//! future; dropping the returned future drops the pending computation with it.
//!
//! # Panics
//!
//! [safe_async] only captures `Err` outcomes. Use [safe_async_unwind] to also convert a panic
//! inside the wrapped future into a [Panicked] failure. Panics raised by the `process_error`
//! function or by the logger are not caught.
//!
//! # Observability
//!
//! The default logger and the internal trace events use the [tracing](https://crates.io/crates/tracing)
//! crate. Use [tracing_subscriber](https://crates.io/crates/tracing_subscriber) to route them.
//!
//! ```rust,no_run
//! use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
//!
//! tracing_subscriber::registry()
//!     .with(EnvFilter::from_default_env())
//!     .with(fmt::layer().with_writer(std::io::stderr))
//!     .init();
//! ```

mod errors;
mod ext;
mod invoke;
mod options;
mod result;

pub use errors::Panicked;
pub use ext::SafeAsyncExt;
pub use invoke::{safe_async, safe_async_unwind, safe_async_with};
pub use options::{default_logger, Options};
pub use result::SafeResult;
