//! Merging branches
//!
//! Only fast-forward merges are supported: the current branch moves to the
//! target commit when the target already contains all of its history.
//! Diverged branches are refused without touching any state.

pub mod fast_forward;
