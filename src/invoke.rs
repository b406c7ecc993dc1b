use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;

use crate::errors::Panicked;
use crate::options::Options;
use crate::result::SafeResult;

/// Await a fallible future and return its outcome as a [SafeResult]
///
/// Uses the default [Options], meaning failures are returned but never logged.
///
/// ```rust
/// use safe_async::safe_async;
///
/// # tokio_test::block_on(async {
/// let (err, value) = safe_async(async { Ok::<_, std::io::Error>("success") })
///     .await
///     .into_pair();
/// assert!(err.is_none());
/// assert_eq!(value, Some("success"));
/// # })
/// ```
pub async fn safe_async<Fut, T, E>(pending: Fut) -> SafeResult<T, E>
where
    Fut: Future<Output = Result<T, E>>,
    E: fmt::Debug,
{
    safe_async_with(pending, Options::default()).await
}

/// Await a fallible future and return its outcome as a [SafeResult], applying the given
/// failure policy
///
/// The pending future is awaited exactly once. Failures are never propagated, they always
/// end up in the failure slot of the result, after being processed and logged according
/// to `options`.
///
/// ```rust
/// use safe_async::{safe_async_with, Options};
///
/// # tokio_test::block_on(async {
/// let opts = Options::new()
///     .silent(false)
///     .process_error(|e: &String| Some(format!("request failed: {e}")));
///
/// let res = safe_async_with(async { Err::<(), _>("timeout".to_string()) }, opts).await;
/// assert_eq!(res.failure().map(String::as_str), Some("request failed: timeout"));
/// # })
/// ```
pub async fn safe_async_with<Fut, T, E>(pending: Fut, options: Options<E>) -> SafeResult<T, E>
where
    Fut: Future<Output = Result<T, E>>,
    E: fmt::Debug,
{
    let outcome = pending.await;
    options.settle(outcome)
}

/// Like [safe_async_with], but also catches panics raised while polling the pending future
///
/// A panic is converted into a [Panicked] failure which is then processed and logged like
/// any other failure.
pub async fn safe_async_unwind<Fut, T, E>(pending: Fut, options: Options<E>) -> SafeResult<T, E>
where
    Fut: Future<Output = Result<T, E>>,
    E: From<Panicked> + fmt::Debug,
{
    let outcome = match AssertUnwindSafe(pending).catch_unwind().await {
        Ok(outcome) => outcome,
        Err(payload) => Err(Panicked::from_payload(payload.as_ref()).into()),
    };
    options.settle(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Mutex};
    use thiserror::Error;
    use tokio::time::{sleep, Duration};
    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::{prelude::*, EnvFilter};

    #[derive(Debug, Error)]
    enum JobError {
        #[error("job failed: {0}")]
        Failed(&'static str),

        #[error(transparent)]
        Panicked(#[from] Panicked),
    }

    fn init() {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_target(false)
                    .with_line_number(true)
                    .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE),
            )
            .with(EnvFilter::from_default_env())
            .try_init()
            .unwrap_or(());
    }

    async fn explode() -> Result<i32, JobError> {
        sleep(Duration::from_millis(5)).await;
        panic!("boom")
    }

    #[tokio::test]
    async fn it_awaits_the_pending_computation() {
        init();
        let res = safe_async(async {
            sleep(Duration::from_millis(10)).await;
            Ok::<_, JobError>(42)
        })
        .await;

        assert_eq!(res.into_pair().1, Some(42));
    }

    #[tokio::test]
    async fn it_captures_failures_without_propagating() {
        init();
        let res: SafeResult<i32, JobError> = safe_async(async {
            sleep(Duration::from_millis(10)).await;
            Err(JobError::Failed("network"))
        })
        .await;

        assert!(matches!(res, SafeResult::Failure(JobError::Failed("network"))));
    }

    #[tokio::test]
    async fn it_converts_panics_into_failures() {
        init();
        let logged = Arc::new(Mutex::new(Vec::new()));
        let sink = logged.clone();
        let opts = Options::new()
            .silent(false)
            .logger(move |e: &JobError| sink.lock().unwrap().push(e.to_string()));

        let res = safe_async_unwind(explode(), opts).await;

        match res {
            SafeResult::Failure(JobError::Panicked(p)) => assert_eq!(p.message(), "boom"),
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(
            *logged.lock().unwrap(),
            vec!["pending computation panicked: boom".to_string()]
        );
    }

    #[tokio::test]
    async fn it_processes_caught_panics() {
        init();
        let opts = Options::new().process_error(|e: &JobError| match e {
            JobError::Panicked(_) => Some(JobError::Failed("crashed")),
            _ => None,
        });

        let res = safe_async_unwind(explode(), opts).await;
        assert!(matches!(res, SafeResult::Failure(JobError::Failed("crashed"))));
    }

    #[tokio::test]
    #[should_panic(expected = "error processor bug")]
    async fn it_does_not_catch_panics_from_the_error_processor() {
        let opts = Options::new().process_error(|_: &JobError| -> Option<JobError> {
            panic!("error processor bug")
        });

        let _ = safe_async_unwind(async { Err::<(), _>(JobError::Failed("network")) }, opts).await;
    }

    #[tokio::test]
    #[should_panic(expected = "logger bug")]
    async fn it_does_not_catch_panics_from_the_logger() {
        let opts = Options::new()
            .silent(false)
            .logger(|_: &JobError| panic!("logger bug"));

        let _ = safe_async_unwind(async { Err::<(), _>(JobError::Failed("network")) }, opts).await;
    }

    #[tokio::test]
    #[should_panic(expected = "error processor bug")]
    async fn it_does_not_catch_panics_from_the_error_processor_after_a_caught_panic() {
        let opts = Options::new().process_error(|_: &JobError| -> Option<JobError> {
            panic!("error processor bug")
        });

        let _ = safe_async_unwind(explode(), opts).await;
    }

    #[tokio::test]
    async fn it_leaves_regular_outcomes_alone_when_catching_panics() {
        init();
        let res = safe_async_unwind(async { Ok::<_, JobError>(1) }, Options::default()).await;
        assert!(matches!(res, SafeResult::Success(1)));

        let res: SafeResult<i32, JobError> = safe_async_unwind(
            async { Err(JobError::Failed("network")) },
            Options::default(),
        )
        .await;
        assert!(matches!(res, SafeResult::Failure(JobError::Failed("network"))));
    }
}
