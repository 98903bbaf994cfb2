//! Commit graph
//!
//! Commits form a DAG through their parent ids. Linear history follows the
//! first parent; ancestry searches follow every parent.

pub mod commit_graph;
pub mod rev_list;
