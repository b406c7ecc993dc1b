use std::fmt;
use std::future::Future;

use futures::{TryFuture, TryFutureExt};

use crate::errors::Panicked;
use crate::invoke::{safe_async, safe_async_unwind, safe_async_with};
use crate::options::Options;
use crate::result::SafeResult;

/// Adapters for wrapping any [TryFuture] in combinator position
///
/// ```rust
/// use safe_async::{Options, SafeAsyncExt, SafeResult};
///
/// # tokio_test::block_on(async {
/// let res = async { Err::<i32, _>("fail") }.safe_with(Options::new()).await;
/// assert_eq!(res, SafeResult::Failure("fail"));
/// # })
/// ```
pub trait SafeAsyncExt: TryFuture + Sized {
    /// Wrap the future using the default options. See [safe_async].
    fn safe(self) -> impl Future<Output = SafeResult<Self::Ok, Self::Error>>
    where
        Self::Error: fmt::Debug,
    {
        safe_async(TryFutureExt::into_future(self))
    }

    /// Wrap the future with the given options. See [safe_async_with].
    fn safe_with(
        self,
        options: Options<Self::Error>,
    ) -> impl Future<Output = SafeResult<Self::Ok, Self::Error>>
    where
        Self::Error: fmt::Debug,
    {
        safe_async_with(TryFutureExt::into_future(self), options)
    }

    /// Wrap the future with the given options, catching panics. See [safe_async_unwind].
    fn safe_unwind(
        self,
        options: Options<Self::Error>,
    ) -> impl Future<Output = SafeResult<Self::Ok, Self::Error>>
    where
        Self::Error: From<Panicked> + fmt::Debug,
    {
        safe_async_unwind(TryFutureExt::into_future(self), options)
    }
}

impl<F: TryFuture> SafeAsyncExt for F {}
