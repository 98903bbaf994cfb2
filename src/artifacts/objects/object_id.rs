//! Object identifier (SHA-1 content digest)
//!
//! Object IDs are 40-character lowercase hexadecimal strings. Blobs and commit
//! records are both addressed by the digest of their bytes, so they share a
//! single id space.
//!
//! ## Storage
//!
//! Blobs live at `.sit/objects/<id>` and commits at `.sit/commits/<id>`,
//! one flat file per id.

use crate::artifacts::objects::{OBJECT_ID_LENGTH, SHORT_OBJECT_ID_LENGTH};
use crate::errors::{SitError, SitResult};
use sha1::{Digest, Sha1};

/// Content digest identifying a blob or a commit record
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID from a string
    ///
    /// # Returns
    ///
    /// Validated ObjectId, or `InvalidObjectId` on a bad length or character
    pub fn try_parse(id: String) -> SitResult<Self> {
        if id.len() != OBJECT_ID_LENGTH || !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(SitError::InvalidObjectId(id));
        }
        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Hash raw bytes into an object ID
    pub fn digest(content: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(content);

        Self(format!("{:x}", hasher.finalize()))
    }

    /// First 7 characters of the digest
    pub fn to_short_oid(&self) -> String {
        self.0[..SHORT_OBJECT_ID_LENGTH].to_string()
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
