//! Virtual metadata result sets.
//!
//! Each call re-queries the store through [`SchemaIntrospection`], folds the
//! answers into descriptors and renders them as rows under a fixed column
//! layout. Nothing is cached between calls.

use tracing::debug;

use crate::config::BridgeConfig;
use crate::connection::{ConnectionContext, TRANSACTION_NONE};
use crate::cursor::ResultSet;
use crate::error::{Error, Result};
use crate::protocol::types::{mapping_for, HostClass, NativeValue, TypeCode};

use super::descriptors::{
    CatalogDescriptor, ColumnDescriptor, IndexDescriptor, SchemaDescriptor, TableDescriptor,
};
use super::introspection::{SchemaIntrospection, TableKind};
use super::layout::{self, name_matches};

/// `tableIndexOther` in the protocol's index type enumeration.
const INDEX_TYPE_OTHER: i16 = 3;

/// Reported store version.
pub const DB_MAJOR_VERSION: i32 = 3;
pub const DB_MINOR_VERSION: i32 = 0;

fn text(s: &str) -> NativeValue {
    NativeValue::Text(s.to_string())
}

fn opt_text(s: Option<&str>) -> NativeValue {
    s.map_or(NativeValue::Null, text)
}

/// Database metadata for one connection.
pub struct DatabaseMetadata<'a> {
    config: &'a BridgeConfig,
    context: &'a ConnectionContext,
    introspection: &'a dyn SchemaIntrospection,
}

impl<'a> DatabaseMetadata<'a> {
    pub(crate) fn new(
        config: &'a BridgeConfig,
        context: &'a ConnectionContext,
        introspection: &'a dyn SchemaIntrospection,
    ) -> Self {
        Self {
            config,
            context,
            introspection,
        }
    }

    fn catalog(&self) -> CatalogDescriptor {
        CatalogDescriptor::new(self.context.catalog())
    }

    /// Keyspaces a schema filter selects, sorted by name.
    ///
    /// An absent filter falls back to the current schema, or all keyspaces
    /// when none is selected.
    fn resolve_schemas(&self, filter: Option<&str>, call: &'static str) -> Result<Vec<String>> {
        let effective = filter.or(self.context.schema());
        let mut names: Vec<String> = self
            .introspection
            .list_schemas()
            .map_err(|e| Error::store(call, e))?
            .into_iter()
            .filter(|s| name_matches(effective, s))
            .collect();
        names.sort();
        Ok(names)
    }

    fn load_tables(
        &self,
        schema: &str,
        table_filter: Option<&str>,
        call: &'static str,
    ) -> Result<Vec<TableDescriptor>> {
        let tables = self
            .introspection
            .list_tables(schema)
            .map_err(|e| Error::store(format!("{call} ({schema})"), e))?;
        Ok(tables
            .iter()
            .filter(|t| name_matches(table_filter, &t.name))
            .map(|t| TableDescriptor::from_native(schema, t))
            .collect())
    }

    /// The single synthetic catalog.
    pub fn get_catalogs(&self) -> Result<ResultSet> {
        let catalog = self.catalog();
        debug!(catalog = %catalog.name, "get_catalogs");
        Ok(ResultSet::from_rows(
            layout::column_info(layout::CATALOGS),
            vec![vec![text(&catalog.name)]],
        ))
    }

    /// Keyspaces, ordered by name. An absent pattern lists all of them.
    pub fn get_schemas(
        &self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
    ) -> Result<ResultSet> {
        let columns = layout::column_info(layout::SCHEMAS);
        if !self.catalog().accepts(catalog) {
            debug!(?catalog, "get_schemas: catalog mismatch");
            return Ok(ResultSet::empty(columns));
        }

        let mut schemas: Vec<SchemaDescriptor> = self
            .introspection
            .list_schemas()
            .map_err(|e| Error::store("get_schemas", e))?
            .into_iter()
            .filter(|s| name_matches(schema_pattern, s))
            .map(SchemaDescriptor::new)
            .collect();
        schemas.sort_by(|a, b| a.name.cmp(&b.name));
        debug!(count = schemas.len(), "get_schemas");

        let rows = schemas
            .iter()
            .map(|s| vec![text(&s.name), opt_text(s.catalog.as_deref())])
            .collect();
        Ok(ResultSet::from_rows(columns, rows))
    }

    pub fn get_table_types(&self) -> Result<ResultSet> {
        let rows = [TableKind::Table, TableKind::View]
            .iter()
            .map(|k| vec![text(k.as_str())])
            .collect();
        Ok(ResultSet::from_rows(
            layout::column_info(layout::TABLE_TYPES),
            rows,
        ))
    }

    /// Tables and views, ordered by type, catalog, schema and name.
    ///
    /// An absent or empty `types` means `TABLE` and `VIEW`.
    pub fn get_tables(
        &self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        table_pattern: Option<&str>,
        types: Option<&[&str]>,
    ) -> Result<ResultSet> {
        let columns = layout::column_info(layout::TABLES);
        let kinds: Vec<TableKind> = match types {
            None | Some([]) => vec![TableKind::Table, TableKind::View],
            Some(requested) => [TableKind::Table, TableKind::View]
                .into_iter()
                .filter(|k| requested.iter().any(|r| r.eq_ignore_ascii_case(k.as_str())))
                .collect(),
        };
        let catalog_desc = self.catalog();
        if !catalog_desc.accepts(catalog) || kinds.is_empty() {
            debug!(?catalog, ?types, "get_tables: nothing to match");
            return Ok(ResultSet::empty(columns));
        }

        let mut tables = Vec::new();
        for schema in self.resolve_schemas(schema_pattern, "get_tables")? {
            tables.extend(
                self.load_tables(&schema, table_pattern, "get_tables")?
                    .into_iter()
                    .filter(|t| kinds.contains(&t.kind)),
            );
        }
        tables.sort_by(|a, b| {
            (a.kind.as_str(), &a.schema, &a.name).cmp(&(b.kind.as_str(), &b.schema, &b.name))
        });
        debug!(count = tables.len(), "get_tables");

        let rows = tables
            .iter()
            .map(|t| {
                let mut row = vec![
                    text(&catalog_desc.name),
                    text(&t.schema),
                    text(&t.name),
                    text(t.kind.as_str()),
                    opt_text(t.remarks.as_deref()),
                ];
                row.resize(layout::TABLES.len(), NativeValue::Null);
                row
            })
            .collect();
        Ok(ResultSet::from_rows(columns, rows))
    }

    /// Columns ordered by catalog, schema, table and ordinal position.
    pub fn get_columns(
        &self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        table_pattern: Option<&str>,
        column_pattern: Option<&str>,
    ) -> Result<ResultSet> {
        let columns = layout::column_info(layout::COLUMNS);
        let catalog_desc = self.catalog();
        if !catalog_desc.accepts(catalog) {
            debug!(?catalog, "get_columns: catalog mismatch");
            return Ok(ResultSet::empty(columns));
        }

        let mut tables = Vec::new();
        for schema in self.resolve_schemas(schema_pattern, "get_columns")? {
            for table in self.load_tables(&schema, table_pattern, "get_columns")? {
                let context = format!("get_columns ({}.{})", schema, table.name);
                let native_columns = self
                    .introspection
                    .list_columns(&schema, &table.name)
                    .map_err(|e| Error::store(context.clone(), e))?;
                let primary_key = self
                    .introspection
                    .list_primary_key_columns(&schema, &table.name)
                    .map_err(|e| Error::store(context, e))?;
                tables.push(table.with_columns(&native_columns, &primary_key));
            }
        }
        tables.sort_by(|a, b| (&a.schema, &a.name).cmp(&(&b.schema, &b.name)));

        let mut rows = Vec::new();
        for table in &tables {
            for column in &table.columns {
                if name_matches(column_pattern, &column.name) {
                    rows.push(column_row(&catalog_desc.name, table, column));
                }
            }
        }
        debug!(tables = tables.len(), columns = rows.len(), "get_columns");
        Ok(ResultSet::from_rows(columns, rows))
    }

    /// One row per indexed column, ordered by table then store order.
    ///
    /// With `unique` set only unique indexes are listed. `approximate` has
    /// no effect; no statistics are kept.
    pub fn get_index_info(
        &self,
        catalog: Option<&str>,
        schema: Option<&str>,
        table: Option<&str>,
        unique: bool,
        _approximate: bool,
    ) -> Result<ResultSet> {
        let columns = layout::column_info(layout::INDEXES);
        let catalog_desc = self.catalog();
        if !catalog_desc.accepts(catalog) {
            debug!(?catalog, "get_index_info: catalog mismatch");
            return Ok(ResultSet::empty(columns));
        }

        let mut indexes: Vec<(String, IndexDescriptor)> = Vec::new();
        for schema in self.resolve_schemas(schema, "get_index_info")? {
            for t in self.load_tables(&schema, table, "get_index_info")? {
                let found = self
                    .introspection
                    .list_indexes(&schema, &t.name)
                    .map_err(|e| Error::store(format!("get_index_info ({}.{})", schema, t.name), e))?;
                indexes.extend(
                    found
                        .iter()
                        .filter(|i| !unique || i.unique)
                        .map(|i| (schema.clone(), IndexDescriptor::from_native(&t.name, i))),
                );
            }
        }
        indexes.sort_by(|(sa, a), (sb, b)| (sa, &a.table_name).cmp(&(sb, &b.table_name)));
        debug!(count = indexes.len(), "get_index_info");

        let rows = indexes
            .iter()
            .map(|(schema, index)| {
                let mut row = vec![
                    text(&catalog_desc.name),
                    text(schema),
                    text(&index.table_name),
                    text(&index.index_name),
                    text(&index.column_name),
                    NativeValue::Boolean(!index.is_unique),
                    NativeValue::SmallInt(INDEX_TYPE_OTHER),
                    NativeValue::SmallInt(1),
                ];
                row.resize(layout::INDEXES.len(), NativeValue::Null);
                row
            })
            .collect();
        Ok(ResultSet::from_rows(columns, rows))
    }

    /// Primary key columns ordered by table then key sequence.
    pub fn get_primary_keys(
        &self,
        catalog: Option<&str>,
        schema: Option<&str>,
        table: Option<&str>,
    ) -> Result<ResultSet> {
        let columns = layout::column_info(layout::PRIMARY_KEYS);
        let catalog_desc = self.catalog();
        if !catalog_desc.accepts(catalog) {
            debug!(?catalog, "get_primary_keys: catalog mismatch");
            return Ok(ResultSet::empty(columns));
        }

        let mut keys: Vec<(String, String, Vec<String>)> = Vec::new();
        for schema in self.resolve_schemas(schema, "get_primary_keys")? {
            for t in self.load_tables(&schema, table, "get_primary_keys")? {
                let key = self
                    .introspection
                    .list_primary_key_columns(&schema, &t.name)
                    .map_err(|e| {
                        Error::store(format!("get_primary_keys ({}.{})", schema, t.name), e)
                    })?;
                keys.push((schema.clone(), t.name, key));
            }
        }
        keys.sort_by(|a, b| (&a.0, &a.1).cmp(&(&b.0, &b.1)));

        let mut rows = Vec::new();
        for (schema, table, key) in &keys {
            for (column, seq) in key.iter().zip(1i16..) {
                rows.push(vec![
                    text(&catalog_desc.name),
                    text(schema),
                    text(table),
                    text(column),
                    NativeValue::SmallInt(seq),
                    NativeValue::Null,
                ]);
            }
        }
        debug!(count = rows.len(), "get_primary_keys");
        Ok(ResultSet::from_rows(columns, rows))
    }

    pub fn get_imported_keys(
        &self,
        _catalog: Option<&str>,
        _schema: Option<&str>,
        _table: &str,
    ) -> Result<ResultSet> {
        Ok(ResultSet::empty(layout::column_info(layout::FOREIGN_KEYS)))
    }

    pub fn get_exported_keys(
        &self,
        _catalog: Option<&str>,
        _schema: Option<&str>,
        _table: &str,
    ) -> Result<ResultSet> {
        Ok(ResultSet::empty(layout::column_info(layout::FOREIGN_KEYS)))
    }

    pub fn get_type_info(&self) -> Result<ResultSet> {
        Ok(ResultSet::empty(layout::column_info(layout::TYPE_INFO)))
    }

    pub fn get_table_privileges(
        &self,
        _catalog: Option<&str>,
        _schema_pattern: Option<&str>,
        _table_pattern: Option<&str>,
    ) -> Result<ResultSet> {
        Ok(ResultSet::empty(layout::column_info(layout::TABLE_PRIVILEGES)))
    }

    pub fn get_cross_reference(
        &self,
        _parent_catalog: Option<&str>,
        _parent_schema: Option<&str>,
        _parent_table: &str,
        _foreign_catalog: Option<&str>,
        _foreign_schema: Option<&str>,
        _foreign_table: &str,
    ) -> Result<ResultSet> {
        Ok(ResultSet::empty(layout::column_info(layout::FOREIGN_KEYS)))
    }

    pub fn get_version_columns(
        &self,
        _catalog: Option<&str>,
        _schema: Option<&str>,
        _table: &str,
    ) -> Result<ResultSet> {
        Ok(ResultSet::empty(layout::column_info(layout::ROW_IDENTIFIER)))
    }

    pub fn get_best_row_identifier(
        &self,
        _catalog: Option<&str>,
        _schema: Option<&str>,
        _table: &str,
        _scope: i32,
        _nullable: bool,
    ) -> Result<ResultSet> {
        Ok(ResultSet::empty(layout::column_info(layout::ROW_IDENTIFIER)))
    }

    pub fn get_column_privileges(
        &self,
        _catalog: Option<&str>,
        _schema: Option<&str>,
        _table: &str,
        _column_pattern: Option<&str>,
    ) -> Result<ResultSet> {
        Ok(ResultSet::empty(layout::column_info(layout::COLUMN_PRIVILEGES)))
    }

    pub fn get_functions(
        &self,
        _catalog: Option<&str>,
        _schema_pattern: Option<&str>,
        _function_pattern: Option<&str>,
    ) -> Result<ResultSet> {
        Ok(ResultSet::empty(layout::column_info(layout::FUNCTIONS)))
    }

    pub fn get_function_columns(
        &self,
        _catalog: Option<&str>,
        _schema_pattern: Option<&str>,
        _function_pattern: Option<&str>,
        _column_pattern: Option<&str>,
    ) -> Result<ResultSet> {
        Ok(ResultSet::empty(layout::column_info(layout::FUNCTION_COLUMNS)))
    }

    pub fn get_udts(
        &self,
        _catalog: Option<&str>,
        _schema_pattern: Option<&str>,
        _type_pattern: Option<&str>,
        _types: Option<&[TypeCode]>,
    ) -> Result<ResultSet> {
        Ok(ResultSet::empty(layout::column_info(layout::UDTS)))
    }

    pub fn get_super_tables(
        &self,
        _catalog: Option<&str>,
        _schema_pattern: Option<&str>,
        _table_pattern: Option<&str>,
    ) -> Result<ResultSet> {
        Ok(ResultSet::empty(layout::column_info(layout::SUPER_TABLES)))
    }

    pub fn get_super_types(
        &self,
        _catalog: Option<&str>,
        _schema_pattern: Option<&str>,
        _type_pattern: Option<&str>,
    ) -> Result<ResultSet> {
        Ok(ResultSet::empty(layout::column_info(layout::SUPER_TYPES)))
    }

    pub fn get_attributes(
        &self,
        _catalog: Option<&str>,
        _schema_pattern: Option<&str>,
        _type_pattern: Option<&str>,
        _attribute_pattern: Option<&str>,
    ) -> Result<ResultSet> {
        Ok(ResultSet::empty(layout::column_info(layout::ATTRIBUTES)))
    }

    pub fn get_client_info_properties(&self) -> Result<ResultSet> {
        Ok(ResultSet::empty(layout::column_info(layout::CLIENT_INFO_PROPERTIES)))
    }

    pub fn get_procedures(
        &self,
        _catalog: Option<&str>,
        _schema_pattern: Option<&str>,
        _procedure_pattern: Option<&str>,
    ) -> Result<ResultSet> {
        Err(Error::not_supported("stored procedures"))
    }

    pub fn get_procedure_columns(
        &self,
        _catalog: Option<&str>,
        _schema_pattern: Option<&str>,
        _procedure_pattern: Option<&str>,
        _column_pattern: Option<&str>,
    ) -> Result<ResultSet> {
        Err(Error::not_supported("stored procedures"))
    }

    pub fn get_pseudo_columns(
        &self,
        _catalog: Option<&str>,
        _schema_pattern: Option<&str>,
        _table_pattern: Option<&str>,
        _column_pattern: Option<&str>,
    ) -> Result<ResultSet> {
        Err(Error::not_supported("pseudo columns"))
    }

    pub fn generated_key_always_returned(&self) -> Result<bool> {
        Err(Error::not_supported("generated keys"))
    }

    pub fn database_product_name(&self) -> &'static str {
        "Cassandra"
    }

    pub fn database_product_version(&self) -> String {
        format!("{}.{}", DB_MAJOR_VERSION, DB_MINOR_VERSION)
    }

    pub fn database_major_version(&self) -> i32 {
        DB_MAJOR_VERSION
    }

    pub fn database_minor_version(&self) -> i32 {
        DB_MINOR_VERSION
    }

    pub fn driver_name(&self) -> &'static str {
        env!("CARGO_PKG_NAME")
    }

    pub fn driver_version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    pub fn driver_major_version(&self) -> i32 {
        env!("CARGO_PKG_VERSION_MAJOR").parse().unwrap_or(0)
    }

    pub fn driver_minor_version(&self) -> i32 {
        env!("CARGO_PKG_VERSION_MINOR").parse().unwrap_or(0)
    }

    /// URL of the connection this metadata belongs to.
    pub fn url(&self) -> String {
        self.config.url()
    }

    /// Configured user name, empty when none was given.
    pub fn user_name(&self) -> &str {
        self.config.user.as_deref().unwrap_or("")
    }

    pub fn default_transaction_isolation(&self) -> i32 {
        TRANSACTION_NONE
    }

    pub fn catalog_term(&self) -> &'static str {
        "Cluster"
    }

    pub fn schema_term(&self) -> &'static str {
        "Keyspace"
    }

    pub fn identifier_quote_string(&self) -> &'static str {
        "\""
    }

    pub fn search_string_escape(&self) -> &'static str {
        "\\"
    }

    pub fn catalog_separator(&self) -> &'static str {
        ""
    }

    pub fn supports_transactions(&self) -> bool {
        false
    }

    pub fn supports_batch_updates(&self) -> bool {
        false
    }

    pub fn supports_savepoints(&self) -> bool {
        false
    }

    pub fn supports_stored_procedures(&self) -> bool {
        false
    }

    pub fn supports_get_generated_keys(&self) -> bool {
        false
    }
}

fn column_row(catalog: &str, table: &TableDescriptor, column: &ColumnDescriptor) -> Vec<NativeValue> {
    let mapping = mapping_for(&column.native_type);
    let numeric = matches!(
        column.type_code,
        TypeCode::TinyInt
            | TypeCode::SmallInt
            | TypeCode::Integer
            | TypeCode::BigInt
            | TypeCode::Float
            | TypeCode::Real
            | TypeCode::Double
            | TypeCode::Decimal
            | TypeCode::Numeric
    );
    let yes_no = |b: bool| text(if b { "YES" } else { "NO" });

    vec![
        text(catalog),
        text(&table.schema),
        text(&table.name),
        text(&column.name),
        NativeValue::Int(column.type_code.code()),
        text(&column.native_type.to_string()),
        NativeValue::Int(column.ordinal_position),
        NativeValue::Int(i32::from(column.nullable)),
        NativeValue::Int(mapping.precision),
        NativeValue::Null,
        NativeValue::Null,
        if numeric {
            NativeValue::Int(10)
        } else {
            NativeValue::Null
        },
        NativeValue::Null,
        NativeValue::Null,
        NativeValue::Null,
        NativeValue::Null,
        if mapping.host_class == HostClass::String {
            NativeValue::Int(mapping.precision)
        } else {
            NativeValue::Null
        },
        yes_no(column.nullable),
        NativeValue::Null,
        NativeValue::Null,
        NativeValue::Null,
        NativeValue::Null,
        yes_no(false),
        yes_no(false),
    ]
}
