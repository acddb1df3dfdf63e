//! The try/catch/else/finally handler chain.

use core::fmt;
use core::marker::PhantomData;

use smallvec::SmallVec;

use crate::error::Error;
use crate::protect;

/// Catch branches stored inline before spilling to the heap.
const INLINE_BRANCHES: usize = 4;

/// Typestate marker: the branch has not been registered yet.
#[derive(Debug, Clone, Copy)]
pub enum Unset {}

/// Typestate marker: the branch is registered.
#[derive(Debug, Clone, Copy)]
pub enum Set {}

type Work<'a> = Box<dyn FnOnce() + 'a>;
type ErrorHandler<'a> = Box<dyn FnOnce(Error) + 'a>;
type Handler<'a> = Box<dyn FnOnce() + 'a>;

struct CatchBranch<'a> {
    target: Error,
    handler: ErrorHandler<'a>,
}

/// A protected unit of work and the handlers that react to how it ends.
///
/// Built with [`try_catch`] or [`Try::new`], configured with any mix of
/// [`catch`](Try::catch), [`default_catch`](Try::default_catch),
/// [`otherwise`](Try::otherwise) and [`finally`](Try::finally), then executed
/// with [`run`](Try::run).
///
/// The type parameters track which of the single-use branches are registered
/// (`D` for the default catch, `E` for else, `F` for finally). Each can be set
/// once, in any order:
///
/// ```compile_fail
/// use try_catch_chain::try_catch;
///
/// try_catch(|| {})
///     .finally(|| println!("first"))
///     .finally(|| println!("second"))
///     .run();
/// ```
///
/// ```compile_fail
/// use try_catch_chain::try_catch;
///
/// try_catch(|| {})
///     .default_catch(|_| {})
///     .otherwise(|| {})
///     .default_catch(|_| {})
///     .run();
/// ```
///
/// # Dispatch
///
/// When the work returns normally the else handler runs. When it panics, the
/// panic is normalized into an [`Error`] and handed to the first catch branch
/// whose target it [`is`](Error::is), in registration order. Without a match
/// the default handler takes it. Without a default handler the original panic
/// resumes unwinding out of `run`. The finally handler runs last on every
/// path, including that one.
///
/// A chain is built and run on a single thread.
pub struct Try<'a, D = Unset, E = Unset, F = Unset> {
    work: Work<'a>,
    catches: SmallVec<[CatchBranch<'a>; INLINE_BRANCHES]>,
    default: Option<ErrorHandler<'a>>,
    otherwise: Option<Handler<'a>>,
    finally: Option<Handler<'a>>,
    _state: PhantomData<(D, E, F)>,
}

/// Start a chain around `work`.
///
/// # Examples
///
/// ```
/// use try_catch_chain::{throw, try_catch, Error};
///
/// let timeout = Error::msg("timeout");
/// let mut log = Vec::new();
///
/// try_catch(|| throw(timeout.clone().context("fetching")))
///     .catch(&timeout, |e| log.push(format!("caught {}", e)))
///     .run();
///
/// assert_eq!(log, ["caught fetching: timeout"]);
/// ```
pub fn try_catch<'a, W>(work: W) -> Try<'a>
where
    W: FnOnce() + 'a,
{
    Try::new(work)
}

impl<'a> Try<'a> {
    /// Wrap `work` in a chain with no branches.
    pub fn new<W>(work: W) -> Self
    where
        W: FnOnce() + 'a,
    {
        Self {
            work: Box::new(work),
            catches: SmallVec::new(),
            default: None,
            otherwise: None,
            finally: None,
            _state: PhantomData,
        }
    }
}

impl<'a, D, E, F> Try<'a, D, E, F> {
    /// Handle errors that are, or wrap, `target`.
    ///
    /// Branches are tried in the order they were added; only the first match
    /// runs.
    pub fn catch<H>(mut self, target: &Error, handler: H) -> Self
    where
        H: FnOnce(Error) + 'a,
    {
        self.catches.push(CatchBranch {
            target: target.clone(),
            handler: Box::new(handler),
        });
        self
    }

    /// Execute the work and dispatch to the matching branch.
    ///
    /// # Panics
    ///
    /// Resumes the original panic when no catch branch matches and no default
    /// handler is registered. Panics raised by a handler propagate as well.
    pub fn run(self) {
        let Self {
            work,
            catches,
            default,
            otherwise,
            finally,
            ..
        } = self;

        let _finally = FinallyGuard(finally);

        let unwound = match protect::intercept(work) {
            Ok(()) => {
                if let Some(handler) = otherwise {
                    tracing::trace!("dispatching to else handler");
                    handler();
                }
                return;
            }
            Err(unwound) => unwound,
        };

        let matched = catches
            .into_iter()
            .enumerate()
            .find(|(_, branch)| unwound.error.is(&branch.target));

        if let Some((index, branch)) = matched {
            tracing::trace!(index, "dispatching to catch handler");
            (branch.handler)(unwound.into_error());
        } else if let Some(handler) = default {
            tracing::trace!("dispatching to default handler");
            handler(unwound.into_error());
        } else {
            unwound.resume();
        }
    }

    fn retype<D2, E2, F2>(self) -> Try<'a, D2, E2, F2> {
        Try {
            work: self.work,
            catches: self.catches,
            default: self.default,
            otherwise: self.otherwise,
            finally: self.finally,
            _state: PhantomData,
        }
    }
}

impl<'a, E, F> Try<'a, Unset, E, F> {
    /// Handle any error no catch branch matched.
    pub fn default_catch<H>(mut self, handler: H) -> Try<'a, Set, E, F>
    where
        H: FnOnce(Error) + 'a,
    {
        self.default = Some(Box::new(handler));
        self.retype()
    }
}

impl<'a, D, F> Try<'a, D, Unset, F> {
    /// Run `handler` when the work returns without panicking.
    pub fn otherwise<H>(mut self, handler: H) -> Try<'a, D, Set, F>
    where
        H: FnOnce() + 'a,
    {
        self.otherwise = Some(Box::new(handler));
        self.retype()
    }
}

impl<'a, D, E> Try<'a, D, E, Unset> {
    /// Run `handler` after everything else, however the run ends.
    pub fn finally<H>(mut self, handler: H) -> Try<'a, D, E, Set>
    where
        H: FnOnce() + 'a,
    {
        self.finally = Some(Box::new(handler));
        self.retype()
    }
}

impl<D, E, F> fmt::Debug for Try<'_, D, E, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Try")
            .field("catches", &self.catches.len())
            .field("default", &self.default.is_some())
            .field("otherwise", &self.otherwise.is_some())
            .field("finally", &self.finally.is_some())
            .finish()
    }
}

/// Runs the finally handler when dropped, including during unwinding.
struct FinallyGuard<'a>(Option<Handler<'a>>);

impl Drop for FinallyGuard<'_> {
    fn drop(&mut self) {
        if let Some(handler) = self.0.take() {
            tracing::trace!("running finally handler");
            handler();
        }
    }
}
