//! Column metadata as reported by the native store client.
//!
//! This struct carries only what the store knows about a result column.
//! For the protocol-facing view, use `Column` which adds the mapped type code.

use super::native_type::NativeType;

/// Native column metadata for a result set or bind variable.
///
/// Use `Column` for user-facing API.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMetadata {
    /// Column name.
    pub name: String,
    /// Native column type.
    pub native_type: NativeType,
    /// Whether NULL values are allowed.
    pub nullable: bool,
}

impl ColumnMetadata {
    /// Create new column metadata; columns are nullable unless stated otherwise.
    pub fn new(name: impl Into<String>, native_type: NativeType) -> Self {
        Self {
            name: name.into(),
            native_type,
            nullable: true,
        }
    }

    /// Mark the column as not nullable.
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }
}
