//! Transient descriptor records folded from introspection results.

use crate::protocol::types::{mapping_for, NativeType, TypeCode};

use super::introspection::{NativeColumn, NativeIndex, NativeTable, TableKind};

/// The single synthetic catalog standing for the whole cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogDescriptor {
    pub name: String,
}

impl CatalogDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Whether a caller-supplied catalog filter admits this catalog.
    ///
    /// An absent filter matches; otherwise names compare case-insensitively.
    pub fn accepts(&self, filter: Option<&str>) -> bool {
        filter.map_or(true, |f| f.eq_ignore_ascii_case(&self.name))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDescriptor {
    pub name: String,
    /// Always absent; keyspaces are not nested in catalogs.
    pub catalog: Option<String>,
}

impl SchemaDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            catalog: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDescriptor {
    pub name: String,
    /// 1-based declared position.
    pub ordinal_position: i32,
    pub native_type: NativeType,
    pub type_code: TypeCode,
    pub nullable: bool,
    pub is_primary_key_component: bool,
}

impl ColumnDescriptor {
    /// Fold a native column. Key components never hold nulls.
    ///
    /// A column is a key component when its kind says so or when it is named
    /// in `primary_key`.
    pub fn from_native(column: &NativeColumn, ordinal_position: i32, primary_key: &[String]) -> Self {
        let native_type = NativeType::parse(&column.cql_type);
        let is_key = column.kind.is_key() || primary_key.iter().any(|k| k == &column.name);
        Self {
            name: column.name.clone(),
            ordinal_position,
            type_code: mapping_for(&native_type).type_code,
            native_type,
            nullable: !is_key,
            is_primary_key_component: is_key,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableDescriptor {
    pub name: String,
    pub schema: String,
    pub kind: TableKind,
    pub remarks: Option<String>,
    pub columns: Vec<ColumnDescriptor>,
}

impl TableDescriptor {
    /// A table without its column list.
    pub fn from_native(schema: &str, table: &NativeTable) -> Self {
        Self {
            name: table.name.clone(),
            schema: schema.to_string(),
            kind: table.kind,
            remarks: table.comment.clone().filter(|c| !c.is_empty()),
            columns: Vec::new(),
        }
    }

    /// Attach columns, numbering them in declared order.
    pub fn with_columns(mut self, columns: &[NativeColumn], primary_key: &[String]) -> Self {
        self.columns = columns
            .iter()
            .zip(1..)
            .map(|(c, ordinal)| ColumnDescriptor::from_native(c, ordinal, primary_key))
            .collect();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexDescriptor {
    pub index_name: String,
    pub table_name: String,
    pub column_name: String,
    pub is_unique: bool,
}

impl IndexDescriptor {
    pub fn from_native(table: &str, index: &NativeIndex) -> Self {
        Self {
            index_name: index.name.clone(),
            table_name: table.to_string(),
            column_name: index.column.clone(),
            is_unique: index.unique,
        }
    }
}
