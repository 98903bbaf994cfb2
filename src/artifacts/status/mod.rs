//! Working tree status inspection
//!
//! Compares the HEAD commit, the index and the working tree and sorts every
//! differing path into four sets: staged, modified, deleted and untracked.
//!
//! ## Components
//!
//! - `file_change`: Enum types for categorizing changes
//! - `inspector`: The three-way reconciliation itself
//! - `status_info`: Loading the three views and presenting the result
//!
//! ## Terminology
//!
//! - staged: the index differs from HEAD
//! - modified: a tracked file's bytes differ from the index
//! - deleted: tracked (in the index or in HEAD) but gone from disk
//! - untracked: on disk but not in the index

pub mod file_change;
pub mod inspector;
pub mod status_info;
