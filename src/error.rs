//! Core error type and related structures.

use std::any::Any;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

// ============================================================
// Core types
// ============================================================

/// Type-erased, shared error value.
///
/// `Error` is the value handlers receive and the value catch branches match
/// against. Clones share one allocation, and that allocation *is* the error's
/// identity: two `Error`s are the same error exactly when they point at the
/// same underlying object, no matter what their messages say.
///
/// Wrapping an error with [`Error::context`] links the original into the new
/// error's `source()` chain, so [`Error::is`] still recognizes it.
///
/// # Examples
///
/// ```
/// use try_catch_chain::Error;
///
/// let not_found = Error::msg("not found");
/// let wrapped = not_found.clone().context("loading profile");
///
/// assert!(wrapped.is(&not_found));
/// assert!(!wrapped.is(&Error::msg("not found")));
/// assert_eq!(wrapped.to_string(), "loading profile: not found");
/// ```
#[derive(Debug, Clone)]
pub struct Error(Arc<dyn StdError + Send + Sync + 'static>);

impl Error {
    /// Create from any error type.
    #[inline]
    pub fn new<E: StdError + Send + Sync + 'static>(e: E) -> Self {
        Self(Arc::new(e))
    }

    /// Create from a boxed error, keeping the boxed object as the identity.
    #[inline]
    pub fn from_box(e: Box<dyn StdError + Send + Sync + 'static>) -> Self {
        Self(Arc::from(e))
    }

    /// Create a fresh error from a message.
    ///
    /// Every call yields a distinct identity, which makes this the way to
    /// declare sentinel errors.
    #[inline]
    pub fn msg(message: impl Into<String>) -> Self {
        Self::new(MessageError(message.into()))
    }

    /// Wrap this error in a new one that prefixes `message`.
    ///
    /// The result displays as `"{message}: {self}"` and keeps `self` in its
    /// cause chain.
    pub fn context(self, message: impl Into<String>) -> Self {
        Self::new(Contextual {
            message: message.into(),
            cause: self,
        })
    }

    /// Whether this error is `target` or wraps it anywhere in its cause chain.
    pub fn is(&self, target: &Error) -> bool {
        let target = address(target.as_dyn_error());
        self.causes().any(|cause| address(cause) == target)
    }

    /// Iterate over this error and everything below it in the `source()` chain.
    ///
    /// The first item is always the error itself.
    pub fn causes(&self) -> Causes<'_> {
        Causes {
            next: Some(self.as_dyn_error()),
        }
    }

    /// The innermost error of the cause chain.
    pub fn root_cause(&self) -> &(dyn StdError + 'static) {
        self.causes().last().unwrap_or_else(|| self.as_dyn_error())
    }

    /// Get the inner error as a trait object reference.
    #[inline]
    pub fn as_dyn_error(&self) -> &(dyn StdError + 'static) {
        &*self.0
    }

    /// Try to downcast the outermost error to a specific type.
    #[inline]
    pub fn downcast_ref<T: StdError + 'static>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Find the first error of type `T` in the cause chain.
    pub fn find<T: StdError + 'static>(&self) -> Option<&T> {
        self.causes().find_map(|cause| cause.downcast_ref::<T>())
    }

    /// Whether this error was synthesized from a non-error panic payload.
    pub fn is_panic(&self) -> bool {
        self.downcast_ref::<PanicError>().is_some()
    }
}

#[inline]
fn address(e: &(dyn StdError + 'static)) -> *const () {
    e as *const (dyn StdError + 'static) as *const ()
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0, f)
    }
}

// Identity, not message equality.
impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        address(self.as_dyn_error()) == address(other.as_dyn_error())
    }
}

impl Eq for Error {}

// Error does not implement StdError itself, so this never overlaps `From<T> for T`.
impl<E: StdError + Send + Sync + 'static> From<E> for Error {
    fn from(e: E) -> Self {
        Error::new(e)
    }
}

/// Iterator over an error's cause chain, outermost first.
#[derive(Debug, Clone)]
pub struct Causes<'a> {
    next: Option<&'a (dyn StdError + 'static)>,
}

impl<'a> Iterator for Causes<'a> {
    type Item = &'a (dyn StdError + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.source();
        Some(current)
    }
}

// ============================================================
// Concrete error types
// ============================================================

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct MessageError(String);

#[derive(Debug)]
struct Contextual {
    message: String,
    cause: Error,
}

impl fmt::Display for Contextual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.message, self.cause)
    }
}

// The source must be the cause's shared allocation for identity matching to see it.
impl StdError for Contextual {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.cause.as_dyn_error())
    }
}

/// Error synthesized from a panic whose payload was not an error.
///
/// Displays as `panic: <payload>`.
#[derive(Debug, Clone, thiserror::Error)]
#[error("panic: {payload}")]
pub struct PanicError {
    payload: String,
}

impl PanicError {
    pub(crate) fn from_payload(payload: &(dyn Any + Send)) -> Self {
        Self {
            payload: describe(payload),
        }
    }

    /// The formatted panic payload, without the `panic: ` prefix.
    pub fn payload(&self) -> &str {
        &self.payload
    }
}

/// Render a panic payload the way `panic!` messages read.
fn describe(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        return (*s).to_owned();
    }
    if let Some(s) = payload.downcast_ref::<String>() {
        return s.clone();
    }

    macro_rules! describe_primitive {
        ($($t:ty),*) => {
            $(
                if let Some(v) = payload.downcast_ref::<$t>() {
                    return v.to_string();
                }
            )*
        };
    }

    describe_primitive!(
        bool, char, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64
    );

    // Same text std prints for payloads it cannot render.
    String::from("Box<dyn Any>")
}

// ============================================================
// anyhow / eyre interop
// ============================================================

#[cfg(feature = "anyhow")]
impl Error {
    /// Convert an `anyhow::Error`, keeping its object as the identity.
    pub fn from_anyhow(e: anyhow::Error) -> Self {
        Self::from_box(e.into())
    }
}

#[cfg(feature = "eyre")]
impl Error {
    /// Convert an `eyre::Report`, keeping its object as the identity.
    pub fn from_eyre(e: eyre::Report) -> Self {
        Self::from_box(e.into())
    }
}

// ============================================================
// Serde support
// ============================================================

#[cfg(feature = "serde")]
mod serde_impl {
    use super::Error;
    use serde::ser::{Serialize, SerializeStruct, Serializer};

    impl Serialize for Error {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let causes: Vec<String> = self.causes().skip(1).map(|c| c.to_string()).collect();
            let mut state = serializer.serialize_struct("Error", 2)?;
            state.serialize_field("message", &self.to_string())?;
            state.serialize_field("causes", &causes)?;
            state.end()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn clones_share_identity() {
        let e = Error::msg("foo");
        let copy = e.clone();
        assert_eq!(e, copy);
        assert!(copy.is(&e));
    }

    #[test]
    fn equal_messages_are_distinct_errors() {
        let a = Error::msg("same");
        let b = Error::msg("same");
        assert_ne!(a, b);
        assert!(!a.is(&b));
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn context_keeps_cause_reachable() {
        let root = Error::msg("disk full");
        let mid = root.clone().context("writing block");
        let top = mid.clone().context("saving file");

        assert_eq!(top.to_string(), "saving file: writing block: disk full");
        assert!(top.is(&root));
        assert!(top.is(&mid));
        assert!(top.is(&top));
        assert!(!root.is(&top));
        assert_eq!(top.causes().count(), 3);
        assert_eq!(top.root_cause().to_string(), "disk full");
    }

    #[test]
    fn find_walks_the_chain() {
        let io = Error::new(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let top = io.context("opening");

        assert!(top.downcast_ref::<io::Error>().is_none());
        let found = top.find::<io::Error>().map(io::Error::kind);
        assert_eq!(found, Some(io::ErrorKind::NotFound));
    }

    #[test]
    fn from_box_keeps_boxed_object() {
        let boxed: Box<dyn StdError + Send + Sync> = Box::new(io::Error::new(io::ErrorKind::Other, "boxed"));
        let e = Error::from_box(boxed);
        assert_eq!(e.to_string(), "boxed");
        assert!(e.downcast_ref::<io::Error>().is_some());
    }

    #[test]
    fn describes_common_payloads() {
        assert_eq!(describe(&"static"), "static");
        assert_eq!(describe(&String::from("owned")), "owned");
        assert_eq!(describe(&42_i32), "42");
        assert_eq!(describe(&7_u64), "7");
        assert_eq!(describe(&true), "true");
        assert_eq!(describe(&'x'), "x");
        assert_eq!(describe(&1.5_f64), "1.5");
        assert_eq!(describe(&vec![1, 2]), "Box<dyn Any>");
    }

    #[test]
    fn panic_error_display() {
        let e = Error::new(PanicError::from_payload(&"boom"));
        assert!(e.is_panic());
        assert_eq!(e.to_string(), "panic: boom");
        assert_eq!(e.downcast_ref::<PanicError>().map(PanicError::payload), Some("boom"));
    }
}
