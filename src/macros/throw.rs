//! The `throw!` macro.

/// Panic with an [`Error`](crate::Error) payload.
///
/// - `throw!("literal")` and `throw!("fmt {}", args)` throw a fresh message error;
/// - `throw!(expr)` throws anything that converts into `Error`, including an
///   existing `Error`, whose identity is kept.
///
/// ```
/// use try_catch_chain::{protect, throw, Error};
///
/// let err = protect(|| throw!("bad id {}", 7)).unwrap_err();
/// assert_eq!(err.to_string(), "bad id 7");
/// assert!(!err.is_panic());
///
/// let sentinel = Error::msg("sentinel");
/// let err = protect(|| throw!(sentinel.clone())).unwrap_err();
/// assert!(err.is(&sentinel));
/// ```
#[macro_export]
macro_rules! throw {
    ($msg:literal $(,)?) => {
        $crate::__throw_fmt(::core::format_args!($msg))
    };
    ($err:expr $(,)?) => {
        $crate::__throw_error($err)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::__throw_fmt(::core::format_args!($fmt, $($arg)*))
    };
}
