//! Core repository components
//!
//! This module contains the fundamental building blocks of a sit repository:
//!
//! - `layout`: Where every piece of repository state lives on disk
//! - `database`: Object database for storing blobs and commit records
//! - `index`: Staging area mapping paths to blob ids
//! - `refs`: Reference management (HEAD and branches)
//! - `repository`: Composition root wiring the areas together
//! - `workspace`: Working directory file system operations

pub mod database;
pub mod index;
pub mod layout;
pub mod refs;
pub mod repository;
pub mod workspace;
