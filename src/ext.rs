//! Raising errors as panics.

use std::panic;

use crate::error::Error;

/// Panic with `error` as the payload.
///
/// This is the counterpart of [`protect`](crate::protect): the payload is an
/// [`Error`], so the intercepted error keeps its identity and can be matched by
/// a catch branch.
///
/// ```
/// use try_catch_chain::{protect, throw, Error};
///
/// let e = Error::msg("rejected");
/// let caught = protect(|| throw(e.clone())).unwrap_err();
/// assert_eq!(caught, e);
/// ```
#[track_caller]
pub fn throw(error: impl Into<Error>) -> ! {
    panic::panic_any(error.into())
}

/// Extension trait for turning `Result` errors into panics.
pub trait ThrowExt<T> {
    /// Return the value, or [`throw`] the error.
    fn or_throw(self) -> T;

    /// Return the value, or [`throw`] the error wrapped with a context message.
    fn or_throw_context(self, ctx: impl Into<String>) -> T;
}

impl<T, E: Into<Error>> ThrowExt<T> for Result<T, E> {
    #[track_caller]
    fn or_throw(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => throw(e),
        }
    }

    #[track_caller]
    fn or_throw_context(self, ctx: impl Into<String>) -> T {
        match self {
            Ok(v) => v,
            Err(e) => throw(e.into().context(ctx)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protect_return;
    use std::num::ParseIntError;

    #[test]
    fn ok_passes_through() {
        let v = protect_return(|| "12".parse::<u8>().or_throw()).unwrap();
        assert_eq!(v, 12);
    }

    #[test]
    fn err_is_thrown_as_error_payload() {
        let err = protect_return(|| "x".parse::<u8>().or_throw()).unwrap_err();
        assert!(!err.is_panic());
        assert!(err.downcast_ref::<ParseIntError>().is_some());
    }

    #[test]
    fn context_wraps_thrown_error() {
        let base = Error::msg("missing");
        let thrown = base.clone();
        let err = protect_return(move || Err::<(), _>(thrown).or_throw_context("loading"))
            .unwrap_err();
        assert!(err.is(&base));
        assert_eq!(err.to_string(), "loading: missing");
    }
}
