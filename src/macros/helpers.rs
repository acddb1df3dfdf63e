//! Helper functions for macros.

use core::fmt;

use crate::Error;

/// Throw a formatted message as a fresh [`Error`].
#[doc(hidden)]
#[track_caller]
#[cold]
pub fn __throw_fmt(args: fmt::Arguments<'_>) -> ! {
    let message = match args.as_str() {
        Some(s) => s.to_owned(),
        None => args.to_string(),
    };
    crate::throw(Error::msg(message))
}

/// Throw anything convertible into an [`Error`].
#[doc(hidden)]
#[track_caller]
#[cold]
pub fn __throw_error(e: impl Into<Error>) -> ! {
    crate::throw(e)
}
