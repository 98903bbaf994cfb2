//! Stored object types
//!
//! sit stores two kinds of content-addressed objects:
//!
//! - **Blob**: File content (raw bytes)
//! - **Commit**: Snapshot record (parents, author, date, message, file list)
//!
//! Both are identified by the SHA-1 digest of their serialized bytes.

pub mod blob;
pub mod commit;
pub mod entry;
pub mod object;
pub mod object_id;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of an abbreviated object id
pub const SHORT_OBJECT_ID_LENGTH: usize = 7;
