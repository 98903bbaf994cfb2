//! `<path>:<digest>` entry lines
//!
//! Shared by the index file and the file list of commit records. Paths may
//! contain colons, digests never do, so a line is always split on its last
//! colon.

use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{SitError, SitResult};
use std::path::{Path, PathBuf};

pub const ENTRY_SEPARATOR: char = ':';

/// Render a path with `/` separators regardless of platform
pub fn path_to_entry_name(path: &Path) -> String {
    path.components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

pub fn format_entry_line(path: &Path, oid: &ObjectId) -> String {
    format!("{}{}{}", path_to_entry_name(path), ENTRY_SEPARATOR, oid)
}

/// Split an entry line on its last colon
///
/// # Returns
///
/// `Ok(None)` for a line without any colon, `MalformedRecord` when the part
/// after the colon is not a valid object id
pub fn parse_entry_line(what: &'static str, line: &str) -> SitResult<Option<(PathBuf, ObjectId)>> {
    let Some(separator) = line.rfind(ENTRY_SEPARATOR) else {
        return Ok(None);
    };

    let (path, oid) = (&line[..separator], line[separator + 1..].trim());
    let oid = ObjectId::try_parse(oid.to_string()).map_err(|_| SitError::MalformedRecord {
        what,
        line: line.to_string(),
    })?;

    Ok(Some((PathBuf::from(path), oid)))
}
