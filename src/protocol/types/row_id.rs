//! Opaque row identifier.

use bytes::Bytes;
use std::fmt;

/// Row identifier backed by the raw key bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RowId(Bytes);

impl RowId {
    /// Create a row id from raw bytes.
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self(bytes.into())
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}
