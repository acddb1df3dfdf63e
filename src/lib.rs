//! try-catch-chain - try/catch/else/finally handler chains over panics
//!
//! # Overview
//!
//! `try-catch-chain` runs a closure, intercepts a panic raised inside it, turns
//! the panic into a typed [`Error`], and dispatches that error to declarative
//! handlers. Errors are matched by identity: a catch branch fires when the
//! error *is* its target or wraps it somewhere in its cause chain.
//!
//! # Quick Start
//!
//! ```
//! use try_catch_chain::{throw, try_catch, Error};
//!
//! let not_found = Error::msg("not found");
//! let denied = Error::msg("denied");
//!
//! try_catch(|| throw(denied.clone().context("opening file")))
//!     .catch(&not_found, |e| println!("missing: {}", e))
//!     .catch(&denied, |e| println!("no access: {}", e))
//!     .default_catch(|e| println!("other: {}", e))
//!     .otherwise(|| println!("opened"))
//!     .finally(|| println!("done"))
//!     .run();
//! ```
//!
//! # Chain branches
//!
//! | Method | Fires when | Count |
//! |--------|------------|-------|
//! | `catch(&target, \|e\| ..)` | error is or wraps `target`, first match wins | any |
//! | `default_catch(\|e\| ..)` | error matched no catch branch | at most one |
//! | `otherwise(\|\| ..)` | work returned without panicking | at most one |
//! | `finally(\|\| ..)` | always, after everything else | at most one |
//!
//! If the work panics and neither a catch branch nor a default handler takes
//! the error, `run` resumes the original panic after `finally` has run.
//!
//! # Direct form
//!
//! | Function | Returns |
//! |----------|---------|
//! | `protect(f)` | `Result<(), Error>` |
//! | `protect_return(f)` | `Result<R, Error>` |
//! | `protect_return2(f)` / `protect_return3(f)` | `Result<(A, B), Error>` / `Result<(A, B, C), Error>` |
//! | `protect_ignore(f)` | `()`, panic discarded |
//!
//! # Payloads
//!
//! | Panic payload | Resulting error |
//! |---------------|-----------------|
//! | [`Error`] (from [`throw`], [`throw!`], [`ThrowExt`]) | the same error |
//! | `Box<dyn std::error::Error + Send + Sync>` | an `Error` around the boxed object |
//! | anything else | [`PanicError`], displayed as `panic: <payload>` |
//!
//! Interception does not touch the process-wide panic hook, so a panic that a
//! chain or [`protect`] handles is still reported by the hook (the default one
//! prints to stderr). Install a quieter hook with [`std::panic::set_hook`] if
//! that output is unwanted.
//!
//! # Features
//!
//! | Feature | Adds |
//! |---------|------|
//! | `anyhow` | `Error::from_anyhow` |
//! | `eyre` | `Error::from_eyre` |
//! | `serde` | `Serialize` for `Error` |

// ============================================================
// Modules
// ============================================================

mod chain;
mod error;
mod ext;
mod macros;
mod protect;

// ============================================================
// Re-exports
// ============================================================

pub use chain::{try_catch, Set, Try, Unset};
pub use error::{Causes, Error, PanicError};
pub use ext::{throw, ThrowExt};
pub use protect::{protect, protect_ignore, protect_return, protect_return2, protect_return3};

// Re-export helper functions for macros
#[doc(hidden)]
pub use macros::{__throw_error, __throw_fmt};

// ============================================================
// Type aliases
// ============================================================

/// Result type alias.
pub type Result<T, E = Error> = core::result::Result<T, E>;
