//! sit: a small content-addressed version control engine
//!
//! The crate is split the same way the on-disk repository is:
//!
//! - `areas`: persisted state (objects, refs, index) and the working tree
//! - `artifacts`: the types and algorithms derived from that state
//!   (commit graph, status, diff, checkout, fast-forward merge)
//! - `commands`: user-facing commands rendering those results
//! - `errors`: the error type shared by all of the above

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;

pub use areas::layout::RepositoryLayout;
pub use areas::repository::Repository;
pub use errors::{SitError, SitResult};
