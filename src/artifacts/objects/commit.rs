//! Commit object
//!
//! Commits represent snapshots of the index at specific points in time.
//! They contain:
//! - Parent commit ID(s) (none for a root commit)
//! - Author and date
//! - A single-line commit message
//! - The full list of tracked files with their blob ids
//!
//! ## Format
//!
//! On disk (`.sit/commits/<id>`), where `<id>` is the digest of this text:
//! ```text
//! parent: <parent-id>
//! author: <name> <<email>>
//! date: <date>
//! message: <message>
//!
//! <path>:<blob-id>
//! ```

use crate::artifacts::objects::entry::{format_entry_line, parse_entry_line};
use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{SitError, SitResult};
use bytes::Bytes;
use std::path::PathBuf;

const PARENT_PREFIX: &str = "parent: ";
const AUTHOR_PREFIX: &str = "author: ";
const DATE_PREFIX: &str = "date: ";
const MESSAGE_PREFIX: &str = "message: ";

pub const AUTHOR_NAME_ENV: &str = "SIT_AUTHOR_NAME";
pub const AUTHOR_EMAIL_ENV: &str = "SIT_AUTHOR_EMAIL";
pub const AUTHOR_DATE_ENV: &str = "SIT_AUTHOR_DATE";

const DEFAULT_AUTHOR_NAME: &str = "User";
const DEFAULT_AUTHOR_EMAIL: &str = "user@example.com";
const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// Author information recorded in a commit
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Author {
    name: String,
    email: String,
    date: String,
}

impl Author {
    /// Create a new author dated now, in local time
    pub fn new(name: String, email: String) -> Self {
        Author {
            name,
            email,
            date: chrono::Local::now().format(DATE_FORMAT).to_string(),
        }
    }

    pub fn new_with_date(name: String, email: String, date: String) -> Self {
        Author { name, email, date }
    }

    /// Load author information from environment variables
    ///
    /// Reads SIT_AUTHOR_NAME, SIT_AUTHOR_EMAIL and SIT_AUTHOR_DATE, falling
    /// back to a placeholder identity and the current time.
    pub fn load_from_env() -> Self {
        let name =
            std::env::var(AUTHOR_NAME_ENV).unwrap_or_else(|_| DEFAULT_AUTHOR_NAME.to_string());
        let email =
            std::env::var(AUTHOR_EMAIL_ENV).unwrap_or_else(|_| DEFAULT_AUTHOR_EMAIL.to_string());

        match std::env::var(AUTHOR_DATE_ENV) {
            Ok(date) if !date.trim().is_empty() => {
                Author::new_with_date(name, email, date.trim().to_string())
            }
            _ => Author::new(name, email),
        }
    }

    /// Format author name and email as "Name <email@example.com>"
    pub fn display_name(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }

    pub fn date(&self) -> &str {
        &self.date
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Parent commit IDs (empty for a root commit)
    parents: Vec<ObjectId>,
    author: String,
    date: String,
    message: String,
    /// Tracked files in index order
    entries: Vec<(PathBuf, ObjectId)>,
}

impl Commit {
    pub fn new(
        parents: Vec<ObjectId>,
        author: &Author,
        message: &str,
        entries: Vec<(PathBuf, ObjectId)>,
    ) -> Self {
        Commit {
            parents,
            author: author.display_name(),
            date: author.date().to_string(),
            message: Self::normalize_message(message),
            entries,
        }
    }

    /// Collapse a message onto one line so the header stays one field per line
    pub fn normalize_message(message: &str) -> String {
        message
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Parse a serialized commit record
    ///
    /// Header fields are recognised by prefix until the first blank line;
    /// every following line is a `<path>:<id>` entry split on its last colon.
    pub fn parse(content: &str) -> SitResult<Self> {
        let mut parents = Vec::new();
        let mut author = String::new();
        let mut date = String::new();
        let mut message = String::new();
        let mut entries = Vec::new();

        let mut lines = content.lines();

        for line in lines.by_ref() {
            if line.is_empty() {
                break;
            }

            if let Some(parent) = line.strip_prefix(PARENT_PREFIX) {
                let parent = ObjectId::try_parse(parent.trim().to_string()).map_err(|_| {
                    SitError::MalformedRecord {
                        what: "commit",
                        line: line.to_string(),
                    }
                })?;
                parents.push(parent);
            } else if let Some(value) = line.strip_prefix(AUTHOR_PREFIX) {
                author = value.to_string();
            } else if let Some(value) = line.strip_prefix(DATE_PREFIX) {
                date = value.to_string();
            } else if let Some(value) = line.strip_prefix(MESSAGE_PREFIX) {
                message = value.to_string();
            }
        }

        for line in lines {
            if let Some(entry) = parse_entry_line("commit", line)? {
                entries.push(entry);
            }
        }

        Ok(Commit {
            parents,
            author,
            date,
            message,
            entries,
        })
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    /// The first parent, followed by linear history walks
    pub fn parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    pub fn entries(&self) -> &[(PathBuf, ObjectId)] {
        &self.entries
    }

    /// The serialized record, the exact text stored on disk
    pub fn to_text(&self) -> String {
        let mut text = String::new();

        for parent in &self.parents {
            text.push_str(&format!("{PARENT_PREFIX}{parent}\n"));
        }
        text.push_str(&format!("{AUTHOR_PREFIX}{}\n", self.author));
        text.push_str(&format!("{DATE_PREFIX}{}\n", self.date));
        text.push_str(&format!("{MESSAGE_PREFIX}{}\n", self.message));
        text.push('\n');

        for (path, oid) in &self.entries {
            text.push_str(&format_entry_line(path, oid));
            text.push('\n');
        }

        text
    }
}

impl Packable for Commit {
    fn serialize(&self) -> Bytes {
        Bytes::from(self.to_text())
    }
}

impl Object for Commit {}
