//! Environment-preparing wrapper around the `md2cf` publishing tool.
//!
//! The wrapper resolves configuration, checks it, and hands off to `md2cf`
//! with a fixed set of flags. It never talks to the wiki itself.
//!
//! - **[`core`]**: Pure logic (`.env` parsing, value normalization,
//!   environment merging, required-variable checks, argument vectors).
//! - **[`io`]**: Side effects (settings and `.env` files, virtualenv
//!   activation, tool lookup, process launching).
//!
//! [`publish`] strings the two together into a single fail-fast run.

pub mod core;
pub mod error;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod publish;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
