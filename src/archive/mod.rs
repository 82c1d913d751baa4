// SPDX-License-Identifier: MPL-2.0
//! In-memory inspection of the processed archive returned by the backend.
//!
//! The archive is never unpacked to disk. Every operation re-parses the
//! payload's central directory, so no decoded state outlives a call:
//!
//! - [`inspector`] - folder index and entry filtering over the raw bytes
//! - [`resource`] - image decoding into displayable handles
//! - [`tasks`] - async wrappers that run the above off the UI thread

pub mod inspector;
pub mod resource;
pub mod tasks;

pub use inspector::{list_folders, list_images, HIDDEN_ENTRY_NAME, SEPARATOR};
pub use resource::{ImageResource, ImageSet};

use crate::error::{Error, Result};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Raw bytes of a ZIP archive held in memory.
///
/// Cloning shares the same buffer; the bytes are never copied after the
/// response body has been collected.
#[derive(Clone, PartialEq, Eq)]
pub struct ArchivePayload {
    bytes: Arc<[u8]>,
}

impl ArchivePayload {
    /// Wraps an owned buffer.
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Reads an archive previously saved to disk.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read.
    pub fn read_from(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| Error::Io(e.to_string()))?;
        Ok(Self::from_bytes(bytes))
    }

    /// Writes the payload to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be written.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, &self.bytes)?;
        Ok(())
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl From<Vec<u8>> for ArchivePayload {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_bytes(bytes)
    }
}

impl fmt::Debug for ArchivePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArchivePayload")
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn debug_output_hides_bytes() {
        let payload = ArchivePayload::from_bytes(vec![1, 2, 3]);
        assert_eq!(format!("{payload:?}"), "ArchivePayload { len: 3 }");
    }

    #[test]
    fn clones_share_the_buffer() {
        let payload = ArchivePayload::from_bytes(vec![7; 16]);
        let clone = payload.clone();
        assert!(std::ptr::eq(payload.as_bytes(), clone.as_bytes()));
    }

    #[test]
    fn write_then_read_preserves_bytes() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("nested").join("processed_images.zip");
        let payload = ArchivePayload::from_bytes(b"PK\x05\x06".to_vec());

        payload.write_to(&path).expect("write should create directories");
        let restored = ArchivePayload::read_from(&path).expect("read should succeed");

        assert_eq!(restored, payload);
    }

    #[test]
    fn read_missing_file_is_io_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let err = ArchivePayload::read_from(&temp_dir.path().join("absent.zip"))
            .expect_err("missing file should fail");
        assert!(matches!(err, Error::Io(_)));
    }
}
