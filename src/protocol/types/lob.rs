//! Large-object handle over blob column data.
//!
//! The store returns blob cells inline, so a handle always owns its bytes.
//! Positions follow the protocol convention and are 1-based.

use bytes::Bytes;
use std::io::Cursor;

use crate::error::{Error, Result};

/// Opaque large-object handle for a blob cell.
#[derive(Debug, Clone, PartialEq)]
pub struct BlobHandle {
    data: Bytes,
}

impl BlobHandle {
    /// Wrap blob bytes.
    pub fn new(data: Bytes) -> Self {
        Self { data }
    }

    /// Length in bytes.
    pub fn length(&self) -> u64 {
        self.data.len() as u64
    }

    /// Copy `len` bytes starting at 1-based position `pos`.
    ///
    /// Reading past the end returns the bytes that are available.
    pub fn get_bytes(&self, pos: u64, len: usize) -> Result<Bytes> {
        if pos == 0 || pos > self.length() + 1 {
            return Err(Error::type_conversion(format!(
                "Blob position {} out of range (length {})",
                pos,
                self.length()
            )));
        }
        let start = (pos - 1) as usize;
        let end = start.saturating_add(len).min(self.data.len());
        Ok(self.data.slice(start..end))
    }

    /// Stream over the whole blob.
    pub fn binary_stream(&self) -> Cursor<Bytes> {
        Cursor::new(self.data.clone())
    }

    /// All bytes of the blob.
    pub fn as_bytes(&self) -> &Bytes {
        &self.data
    }
}
