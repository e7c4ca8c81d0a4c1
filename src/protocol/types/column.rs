//! Column and ColumnInfo types for user-facing API.
//!
//! These types describe result columns in protocol terms, derived from the
//! native `ColumnMetadata` through the type table.

use super::mapping::mapping_for;
use super::metadata::ColumnMetadata;
use super::native_type::NativeType;
use super::type_code::{HostClass, TypeCode};

/// A column in a result set (user-facing representation).
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Whether NULL values are allowed.
    pub nullable: bool,
    /// Native column type.
    pub native_type: NativeType,
    /// Protocol type code.
    pub type_code: TypeCode,
    /// Default host representation.
    pub host_class: HostClass,
    /// Maximum display width.
    pub display_size: i32,
    /// Precision or maximum length.
    pub precision: i32,
    /// Whether values compare case sensitively.
    pub case_sensitive: bool,
}

impl Column {
    /// Create a column for a native type.
    pub fn new(name: impl Into<String>, native_type: NativeType, nullable: bool) -> Self {
        let mapping = mapping_for(&native_type);
        Self {
            name: name.into(),
            nullable,
            type_code: mapping.type_code,
            host_class: mapping.host_class,
            display_size: mapping.display_size,
            precision: mapping.precision,
            case_sensitive: mapping.case_sensitive,
            native_type,
        }
    }

    /// Create a column from native metadata.
    pub fn from_metadata(meta: &ColumnMetadata) -> Self {
        Self::new(meta.name.clone(), meta.native_type.clone(), meta.nullable)
    }

    /// Column label; the store has no aliases distinct from names.
    pub fn label(&self) -> &str {
        &self.name
    }

    /// Native type name as shown in `TYPE_NAME`.
    pub fn type_name(&self) -> String {
        self.native_type.to_string()
    }
}

/// Shared column information for all rows in a result set.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnInfo {
    /// Column definitions.
    pub columns: Vec<Column>,
}

impl ColumnInfo {
    /// Create new column info from columns.
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Create column info from native metadata.
    pub fn from_metadata(metadata: &[ColumnMetadata]) -> Self {
        Self::new(metadata.iter().map(Column::from_metadata).collect())
    }

    /// Get column names.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Get the number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Get column by 0-based index.
    pub fn get(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Find column index by name (case-insensitive, first match wins).
    pub fn find_by_name(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(name))
    }
}
