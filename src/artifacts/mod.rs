//! Version control data structures and algorithms
//!
//! This module contains the types and algorithms derived from repository state:
//!
//! - `branch`: Branch names and symbolic refs
//! - `checkout`: Switching branches and restoring a commit onto the working tree
//! - `diff`: Line diffing (LCS) and working tree diffs
//! - `graph`: Commit building, history walks and ancestry search
//! - `merge`: Fast-forward merges
//! - `objects`: Object types (blob, commit) and their ids
//! - `status`: Working tree status inspection

pub mod branch;
pub mod checkout;
pub mod diff;
pub mod graph;
pub mod merge;
pub mod objects;
pub mod status;
