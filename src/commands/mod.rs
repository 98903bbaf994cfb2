//! Command implementations
//!
//! - `porcelain`: the user-facing commands (init, add, commit, log, ...)
//!
//! Each command is an `impl Repository` block: it runs the matching engine
//! from `artifacts` and renders the result through the repository's writer.

pub mod porcelain;
