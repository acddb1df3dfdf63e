//! Panic interception: run a closure, turn a panic into an [`Error`].
//!
//! This module is the only place the crate calls `catch_unwind`. Everything
//! downstream works on ordinary `Result` values.

use std::any::Any;
use std::error::Error as StdError;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use crate::error::{Error, PanicError};

/// A panic that was intercepted, normalized, and can still be re-raised.
pub(crate) struct Unwound {
    pub(crate) error: Error,
    payload: Box<dyn Any + Send>,
}

impl Unwound {
    fn from_payload(payload: Box<dyn Any + Send>) -> Self {
        if let Some(error) = payload.downcast_ref::<Error>() {
            let error = error.clone();
            return Self { error, payload };
        }

        match payload.downcast::<Box<dyn StdError + Send + Sync>>() {
            Ok(boxed) => {
                let inner: &(dyn StdError + Send + Sync) = &**boxed;
                let reraised = inner.downcast_ref::<SharedError>().map(|shared| shared.0.clone());
                let error = match reraised {
                    Some(error) => error,
                    None => Error::from_box(*boxed),
                };
                // The object now lives in the Error, so the payload re-raised in
                // its place is a box of the same type pointing back at it.
                let shared: Box<dyn StdError + Send + Sync> = Box::new(SharedError(error.clone()));
                Self {
                    payload: Box::new(shared),
                    error,
                }
            }
            Err(payload) => Self {
                error: Error::new(PanicError::from_payload(&*payload)),
                payload,
            },
        }
    }

    /// Continue unwinding with the original payload.
    ///
    /// Does not run the panic hook a second time.
    pub(crate) fn resume(self) -> ! {
        tracing::debug!(error = %self.error, "re-raising unhandled panic");
        panic::resume_unwind(self.payload)
    }

    pub(crate) fn into_error(self) -> Error {
        self.error
    }
}

/// Stand-in for a boxed `dyn Error` payload whose object moved into an
/// [`Error`]. Intercepting it again yields that same `Error`.
struct SharedError(Error);

impl fmt::Debug for SharedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.0.as_dyn_error(), f)
    }
}

impl fmt::Display for SharedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.0.as_dyn_error(), f)
    }
}

impl StdError for SharedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.as_dyn_error().source()
    }
}

/// Run `work`, intercepting a panic and keeping its payload for re-raising.
pub(crate) fn intercept<R, F>(work: F) -> Result<R, Unwound>
where
    F: FnOnce() -> R,
{
    panic::catch_unwind(AssertUnwindSafe(work)).map_err(|payload| {
        let unwound = Unwound::from_payload(payload);
        tracing::debug!(error = %unwound.error, "intercepted panic in protected work");
        unwound
    })
}

/// Run `work` and convert a panic into an `Err`.
///
/// A panic whose payload is an [`Error`] (see [`throw`](crate::throw)) yields
/// that same error, so it still matches with [`Error::is`]. A boxed
/// `dyn Error` payload yields an `Error` around the boxed object. Any other
/// payload becomes a [`PanicError`] reading `panic: <payload>`.
///
/// A concrete error type handed straight to [`std::panic::panic_any`] cannot
/// be recognized as an error and reads `panic: Box<dyn Any>`. Raise errors
/// with [`throw`](crate::throw), [`throw!`](crate::throw!) or
/// [`ThrowExt`](crate::ThrowExt) to keep them typed.
///
/// The closure runs under `AssertUnwindSafe`; state it mutated before
/// panicking is observed as-is.
///
/// # Examples
///
/// ```
/// use try_catch_chain::{protect, throw, Error};
///
/// assert!(protect(|| {}).is_ok());
///
/// let err = protect(|| panic!("boom")).unwrap_err();
/// assert_eq!(err.to_string(), "panic: boom");
///
/// let denied = Error::msg("denied");
/// let err = protect(|| throw(denied.clone())).unwrap_err();
/// assert!(err.is(&denied));
/// ```
pub fn protect<F>(work: F) -> Result<(), Error>
where
    F: FnOnce(),
{
    protect_return(work)
}

/// Run `work` and discard any panic it raises.
pub fn protect_ignore<F>(work: F)
where
    F: FnOnce(),
{
    let _ = protect(work);
}

/// Run `work` returning its value, or the normalized panic.
pub fn protect_return<R, F>(work: F) -> Result<R, Error>
where
    F: FnOnce() -> R,
{
    intercept(work).map_err(Unwound::into_error)
}

/// Two-value form of [`protect_return`].
pub fn protect_return2<A, B, F>(work: F) -> Result<(A, B), Error>
where
    F: FnOnce() -> (A, B),
{
    protect_return(work)
}

/// Three-value form of [`protect_return`].
pub fn protect_return3<A, B, C, F>(work: F) -> Result<(A, B, C), Error>
where
    F: FnOnce() -> (A, B, C),
{
    protect_return(work)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn error_payload_keeps_identity() {
        let foo = Error::msg("foo");
        let payload = foo.clone();
        let err = protect(move || panic::panic_any(payload)).unwrap_err();
        assert_eq!(err, foo);
        assert!(!err.is_panic());
    }

    #[test]
    fn boxed_error_payload_is_not_stringified() {
        let err = protect(|| {
            let boxed: Box<dyn StdError + Send + Sync> =
                Box::new(io::Error::new(io::ErrorKind::TimedOut, "slow"));
            panic::panic_any(boxed)
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "slow");
        let kind = err.downcast_ref::<io::Error>().map(io::Error::kind);
        assert_eq!(kind, Some(io::ErrorKind::TimedOut));
    }

    #[test]
    fn formatted_panic_message() {
        let code = 7;
        let err = protect(|| panic!("code {}", code)).unwrap_err();
        assert!(err.is_panic());
        assert_eq!(err.to_string(), "panic: code 7");
    }

    #[test]
    fn non_error_payloads() {
        let err = protect(|| panic::panic_any(404_u16)).unwrap_err();
        assert_eq!(err.to_string(), "panic: 404");

        let err = protect(|| panic::panic_any(vec!["opaque"])).unwrap_err();
        assert_eq!(err.to_string(), "panic: Box<dyn Any>");
    }

    #[test]
    fn resume_keeps_original_payload() {
        let unwound = match intercept(|| panic::panic_any(String::from("original"))) {
            Ok(()) => unreachable!("work panics"),
            Err(unwound) => unwound,
        };
        let payload = panic::catch_unwind(AssertUnwindSafe(|| unwound.resume())).unwrap_err();
        assert_eq!(payload.downcast_ref::<String>().map(String::as_str), Some("original"));
    }

    #[test]
    fn boxed_error_payload_resumes_as_boxed_error() {
        let unwound = match intercept(|| {
            let boxed: Box<dyn StdError + Send + Sync> = "boxed".into();
            panic::panic_any(boxed)
        }) {
            Ok(()) => unreachable!("work panics"),
            Err(unwound) => unwound,
        };
        let first = unwound.error.clone();
        let payload = panic::catch_unwind(AssertUnwindSafe(|| unwound.resume())).unwrap_err();

        let boxed = payload.downcast_ref::<Box<dyn StdError + Send + Sync>>();
        assert_eq!(boxed.map(ToString::to_string).as_deref(), Some("boxed"));

        // Intercepting the re-raised payload again yields the same error.
        let again = protect(move || panic::resume_unwind(payload)).unwrap_err();
        assert_eq!(again, first);
    }

    #[test]
    fn concrete_error_payload_is_opaque() {
        let disk = || io::Error::new(io::ErrorKind::Other, "disk");

        let err = protect(|| panic::panic_any(disk())).unwrap_err();
        assert!(err.is_panic());
        assert_eq!(err.to_string(), "panic: Box<dyn Any>");

        let err = protect(|| crate::throw(disk())).unwrap_err();
        assert!(!err.is_panic());
        assert_eq!(err.to_string(), "disk");
    }

    #[test]
    fn ignore_swallows() {
        let mut ran = false;
        protect_ignore(|| {
            ran = true;
            panic!("ignored");
        });
        assert!(ran);
    }
}
