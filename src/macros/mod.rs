//! Declarative macros for try-catch-chain.

mod helpers;

// The throw! macro is defined here with #[macro_export], which exports it at crate root
#[macro_use]
mod throw;

pub use helpers::*;
