//! Schema introspection collaborator.
//!
//! Implemented by the store client on top of the store's system schema
//! tables. Every call is a live query; the bridge never caches the answers.

use crate::error::StoreResult;

/// Kind of a table-like object in a keyspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TableKind {
    Table,
    View,
}

impl TableKind {
    /// Protocol table-type name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TableKind::Table => "TABLE",
            TableKind::View => "VIEW",
        }
    }
}

/// Role of a column in its table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    PartitionKey,
    Clustering,
    Regular,
    Static,
}

impl ColumnKind {
    /// Partition and clustering columns make up the primary key.
    pub fn is_key(&self) -> bool {
        matches!(self, ColumnKind::PartitionKey | ColumnKind::Clustering)
    }
}

/// A table or materialized view as reported by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeTable {
    pub name: String,
    pub kind: TableKind,
    pub comment: Option<String>,
}

impl NativeTable {
    pub fn table(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TableKind::Table,
            comment: None,
        }
    }

    pub fn view(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TableKind::View,
            comment: None,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// A column as reported by the store, in declared order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeColumn {
    pub name: String,
    /// Native type name, e.g. `int` or `map<text, int>`.
    pub cql_type: String,
    pub kind: ColumnKind,
}

impl NativeColumn {
    pub fn new(name: impl Into<String>, cql_type: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            name: name.into(),
            cql_type: cql_type.into(),
            kind,
        }
    }
}

/// A secondary index over one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeIndex {
    pub name: String,
    pub column: String,
    pub unique: bool,
}

impl NativeIndex {
    pub fn new(name: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column: column.into(),
            unique: false,
        }
    }
}

/// Blocking access to the store's live schema.
pub trait SchemaIntrospection: Send + Sync {
    /// Cluster names; the first one becomes the synthetic catalog.
    fn list_catalogs(&self) -> StoreResult<Vec<String>>;

    /// Keyspace names.
    fn list_schemas(&self) -> StoreResult<Vec<String>>;

    /// Tables and views in a keyspace.
    fn list_tables(&self, schema: &str) -> StoreResult<Vec<NativeTable>>;

    /// Columns of a table in declared order.
    fn list_columns(&self, schema: &str, table: &str) -> StoreResult<Vec<NativeColumn>>;

    fn list_indexes(&self, schema: &str, table: &str) -> StoreResult<Vec<NativeIndex>>;

    /// Primary key column names, partition key first, in key order.
    fn list_primary_key_columns(&self, schema: &str, table: &str) -> StoreResult<Vec<String>>;
}
