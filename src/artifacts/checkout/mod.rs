//! Branch checkout
//!
//! Switching to a branch:
//! - Restores every file of the branch's commit onto the working tree
//! - Replaces the index with that commit's file list
//! - Attaches HEAD to the branch
//!
//! Restoring is best effort: a file whose blob is missing is skipped and
//! reported, the rest of the tree is still written. Files that are not part
//! of the target commit are left where they are.

pub mod restore;
pub mod switch;
