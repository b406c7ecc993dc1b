use std::any::Any;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("pending computation panicked: {message}")]
/// The wrapped future panicked while being polled.
///
/// Only produced by [safe_async_unwind](`crate::safe_async_unwind`), which requires the failure
/// type to be convertible from this error.
pub struct Panicked {
    message: String,
}

impl Panicked {
    /// Build the error from a panic payload as returned by `catch_unwind`
    pub fn from_payload(payload: &(dyn Any + Send)) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic".to_string()
        };
        Self { message }
    }

    /// The panic message
    pub fn message(&self) -> &str {
        &self.message
    }
}
