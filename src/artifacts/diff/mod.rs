//! Line diffs
//!
//! - `lcs`: longest-common-subsequence edit scripts between two line sequences
//! - `workspace_diff`: what changed between the index and the working tree
//!
//! Only insertions and deletions are reported; unchanged lines never appear
//! in an edit script.

pub mod lcs;
pub mod workspace_diff;
