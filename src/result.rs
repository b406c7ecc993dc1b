use std::fmt;

use serde::de::{Deserialize, Deserializer, Error as _};
use serde::ser::{Serialize, Serializer};

/// The settled outcome of a wrapped computation
///
/// A `SafeResult` is the `(failure, success)` pair returned by
/// [safe_async](`crate::safe_async`) and friends. Exactly one of the two slots is populated,
/// which is why the pair is modelled as an enum rather than as two `Option`s. Use
/// [into_pair](`SafeResult::into_pair`) to get the literal pair back.
///
/// ```rust
/// use safe_async::SafeResult;
///
/// let res: SafeResult<i32, &str> = SafeResult::Success(1);
/// let (err, value) = res.into_pair();
/// assert_eq!(err, None);
/// assert_eq!(value, Some(1));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum SafeResult<T, E = anyhow::Error> {
    /// The computation failed, possibly with a processed failure value
    Failure(E),
    /// The computation succeeded
    Success(T),
}

impl<T, E> SafeResult<T, E> {
    /// Split the result into its `(failure, success)` slots
    pub fn into_pair(self) -> (Option<E>, Option<T>) {
        match self {
            SafeResult::Failure(e) => (Some(e), None),
            SafeResult::Success(v) => (None, Some(v)),
        }
    }

    /// Convert into a standard library `Result`
    pub fn into_result(self) -> Result<T, E> {
        match self {
            SafeResult::Failure(e) => Err(e),
            SafeResult::Success(v) => Ok(v),
        }
    }

    /// Return true if the failure slot is populated
    pub fn is_failure(&self) -> bool {
        matches!(self, SafeResult::Failure(_))
    }

    /// Return true if the success slot is populated
    pub fn is_success(&self) -> bool {
        matches!(self, SafeResult::Success(_))
    }

    /// Return a reference to the failure, if any
    pub fn failure(&self) -> Option<&E> {
        match self {
            SafeResult::Failure(e) => Some(e),
            SafeResult::Success(_) => None,
        }
    }

    /// Return a reference to the success value, if any
    pub fn success(&self) -> Option<&T> {
        match self {
            SafeResult::Failure(_) => None,
            SafeResult::Success(v) => Some(v),
        }
    }

    /// Transform the success value, leaving failures untouched
    pub fn map<O, F: FnOnce(T) -> O>(self, f: F) -> SafeResult<O, E> {
        match self {
            SafeResult::Failure(e) => SafeResult::Failure(e),
            SafeResult::Success(v) => SafeResult::Success(f(v)),
        }
    }

    /// Transform the failure value, leaving successes untouched
    pub fn map_failure<E1, F: FnOnce(E) -> E1>(self, f: F) -> SafeResult<T, E1> {
        match self {
            SafeResult::Failure(e) => SafeResult::Failure(f(e)),
            SafeResult::Success(v) => SafeResult::Success(v),
        }
    }
}

impl<T, E> From<Result<T, E>> for SafeResult<T, E> {
    fn from(res: Result<T, E>) -> Self {
        match res {
            Ok(v) => SafeResult::Success(v),
            Err(e) => SafeResult::Failure(e),
        }
    }
}

impl<T, E> From<SafeResult<T, E>> for Result<T, E> {
    fn from(res: SafeResult<T, E>) -> Self {
        res.into_result()
    }
}

impl<T: fmt::Debug, E: fmt::Debug> fmt::Debug for SafeResult<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SafeResult::Failure(e) => f.debug_tuple("Failure").field(e).finish(),
            SafeResult::Success(v) => f.debug_tuple("Success").field(v).finish(),
        }
    }
}

/// Results serialize as the two element sequence `[failure, success]`, with `null` on
/// the absent slot.
impl<T: Serialize, E: Serialize> Serialize for SafeResult<T, E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SafeResult::Failure(e) => (Some(e), None::<&T>).serialize(serializer),
            SafeResult::Success(v) => (None::<&E>, Some(v)).serialize(serializer),
        }
    }
}

/// Deserializing requires exactly one of the two slots to be non-null. Note that a success
/// value that itself serializes to `null` (e.g. `()`) cannot be read back.
impl<'de, T: Deserialize<'de>, E: Deserialize<'de>> Deserialize<'de> for SafeResult<T, E> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match <(Option<E>, Option<T>)>::deserialize(deserializer)? {
            (Some(e), None) => Ok(SafeResult::Failure(e)),
            (None, Some(v)) => Ok(SafeResult::Success(v)),
            (Some(_), Some(_)) => Err(D::Error::custom(
                "invalid result pair: both failure and success are set",
            )),
            (None, None) => Err(D::Error::custom(
                "invalid result pair: neither failure nor success is set",
            )),
        }
    }
}
