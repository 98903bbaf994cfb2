//! Blob object
//!
//! Blobs store file content. They contain only the raw bytes, without any
//! metadata like the file name (that lives in the index and commit entries).
//! Unlike git, no type/size header is prepended: the stored bytes are the
//! file's bytes and the id is the digest of exactly those bytes.

use crate::artifacts::objects::object::{Object, Packable};
use bytes::Bytes;
use derive_new::new;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Blob {
    content: Bytes,
}

impl Blob {
    pub fn content(&self) -> &Bytes {
        &self.content
    }

    /// Content split into lines, lossily decoded as UTF-8
    pub fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.content)
            .lines()
            .map(str::to_string)
            .collect()
    }
}

impl From<Vec<u8>> for Blob {
    fn from(content: Vec<u8>) -> Self {
        Blob::new(content.into())
    }
}

impl Packable for Blob {
    fn serialize(&self) -> Bytes {
        self.content.clone()
    }
}

impl Object for Blob {}
