//! Fixed column contracts of the metadata result sets.
//!
//! Leading columns are the ones every client reads by position; trailing
//! columns complete the standard layout and are null or constant here.

use std::sync::Arc;

use crate::protocol::types::{Column, ColumnInfo, NativeType};

type Layout = &'static [(&'static str, NativeType)];

pub(crate) const CATALOGS: Layout = &[("CATALOG_NAME", NativeType::Text)];

pub(crate) const SCHEMAS: Layout = &[
    ("SCHEMA_NAME", NativeType::Text),
    ("CATALOG_NAME", NativeType::Text),
];

pub(crate) const TABLE_TYPES: Layout = &[("TABLE_TYPE", NativeType::Text)];

pub(crate) const TABLES: Layout = &[
    ("TABLE_CAT", NativeType::Text),
    ("TABLE_SCHEM", NativeType::Text),
    ("TABLE_NAME", NativeType::Text),
    ("TABLE_TYPE", NativeType::Text),
    ("REMARKS", NativeType::Text),
    ("TYPE_CAT", NativeType::Text),
    ("TYPE_SCHEM", NativeType::Text),
    ("TYPE_NAME", NativeType::Text),
    ("SELF_REFERENCING_COL_NAME", NativeType::Text),
    ("REF_GENERATION", NativeType::Text),
];

pub(crate) const COLUMNS: Layout = &[
    ("TABLE_CAT", NativeType::Text),
    ("TABLE_SCHEM", NativeType::Text),
    ("TABLE_NAME", NativeType::Text),
    ("COLUMN_NAME", NativeType::Text),
    ("DATA_TYPE", NativeType::Int),
    ("TYPE_NAME", NativeType::Text),
    ("ORDINAL_POSITION", NativeType::Int),
    ("NULLABLE", NativeType::Int),
    ("COLUMN_SIZE", NativeType::Int),
    ("BUFFER_LENGTH", NativeType::Int),
    ("DECIMAL_DIGITS", NativeType::Int),
    ("NUM_PREC_RADIX", NativeType::Int),
    ("REMARKS", NativeType::Text),
    ("COLUMN_DEF", NativeType::Text),
    ("SQL_DATA_TYPE", NativeType::Int),
    ("SQL_DATETIME_SUB", NativeType::Int),
    ("CHAR_OCTET_LENGTH", NativeType::Int),
    ("IS_NULLABLE", NativeType::Text),
    ("SCOPE_CATALOG", NativeType::Text),
    ("SCOPE_SCHEMA", NativeType::Text),
    ("SCOPE_TABLE", NativeType::Text),
    ("SOURCE_DATA_TYPE", NativeType::SmallInt),
    ("IS_AUTOINCREMENT", NativeType::Text),
    ("IS_GENERATEDCOLUMN", NativeType::Text),
];

pub(crate) const INDEXES: Layout = &[
    ("TABLE_CAT", NativeType::Text),
    ("TABLE_SCHEM", NativeType::Text),
    ("TABLE_NAME", NativeType::Text),
    ("INDEX_NAME", NativeType::Text),
    ("COLUMN_NAME", NativeType::Text),
    ("NON_UNIQUE", NativeType::Boolean),
    ("TYPE", NativeType::SmallInt),
    ("ORDINAL_POSITION", NativeType::SmallInt),
    ("ASC_OR_DESC", NativeType::Text),
    ("CARDINALITY", NativeType::BigInt),
    ("PAGES", NativeType::BigInt),
    ("FILTER_CONDITION", NativeType::Text),
    ("INDEX_QUALIFIER", NativeType::Text),
];

pub(crate) const PRIMARY_KEYS: Layout = &[
    ("TABLE_CAT", NativeType::Text),
    ("TABLE_SCHEM", NativeType::Text),
    ("TABLE_NAME", NativeType::Text),
    ("COLUMN_NAME", NativeType::Text),
    ("KEY_SEQ", NativeType::SmallInt),
    ("PK_NAME", NativeType::Text),
];

pub(crate) const FOREIGN_KEYS: Layout = &[
    ("PKTABLE_CAT", NativeType::Text),
    ("PKTABLE_SCHEM", NativeType::Text),
    ("PKTABLE_NAME", NativeType::Text),
    ("PKCOLUMN_NAME", NativeType::Text),
    ("FKTABLE_CAT", NativeType::Text),
    ("FKTABLE_SCHEM", NativeType::Text),
    ("FKTABLE_NAME", NativeType::Text),
    ("FKCOLUMN_NAME", NativeType::Text),
    ("KEY_SEQ", NativeType::SmallInt),
    ("UPDATE_RULE", NativeType::SmallInt),
    ("DELETE_RULE", NativeType::SmallInt),
    ("FK_NAME", NativeType::Text),
    ("PK_NAME", NativeType::Text),
    ("DEFERRABILITY", NativeType::SmallInt),
];

pub(crate) const TYPE_INFO: Layout = &[
    ("TYPE_NAME", NativeType::Text),
    ("DATA_TYPE", NativeType::Int),
    ("PRECISION", NativeType::Int),
    ("LITERAL_PREFIX", NativeType::Text),
    ("LITERAL_SUFFIX", NativeType::Text),
    ("CREATE_PARAMS", NativeType::Text),
    ("NULLABLE", NativeType::SmallInt),
    ("CASE_SENSITIVE", NativeType::Boolean),
    ("SEARCHABLE", NativeType::SmallInt),
    ("UNSIGNED_ATTRIBUTE", NativeType::Boolean),
    ("FIXED_PREC_SCALE", NativeType::Boolean),
    ("AUTO_INCREMENT", NativeType::Boolean),
    ("LOCAL_TYPE_NAME", NativeType::Text),
    ("MINIMUM_SCALE", NativeType::SmallInt),
    ("MAXIMUM_SCALE", NativeType::SmallInt),
    ("SQL_DATA_TYPE", NativeType::Int),
    ("SQL_DATETIME_SUB", NativeType::Int),
    ("NUM_PREC_RADIX", NativeType::Int),
];

pub(crate) const TABLE_PRIVILEGES: Layout = &[
    ("TABLE_CAT", NativeType::Text),
    ("TABLE_SCHEM", NativeType::Text),
    ("TABLE_NAME", NativeType::Text),
    ("GRANTOR", NativeType::Text),
    ("GRANTEE", NativeType::Text),
    ("PRIVILEGE", NativeType::Text),
    ("IS_GRANTABLE", NativeType::Text),
];

pub(crate) const COLUMN_PRIVILEGES: Layout = &[
    ("TABLE_CAT", NativeType::Text),
    ("TABLE_SCHEM", NativeType::Text),
    ("TABLE_NAME", NativeType::Text),
    ("COLUMN_NAME", NativeType::Text),
    ("GRANTOR", NativeType::Text),
    ("GRANTEE", NativeType::Text),
    ("PRIVILEGE", NativeType::Text),
    ("IS_GRANTABLE", NativeType::Text),
];

/// Shared by best row identifier and version columns.
pub(crate) const ROW_IDENTIFIER: Layout = &[
    ("SCOPE", NativeType::SmallInt),
    ("COLUMN_NAME", NativeType::Text),
    ("DATA_TYPE", NativeType::Int),
    ("TYPE_NAME", NativeType::Text),
    ("COLUMN_SIZE", NativeType::Int),
    ("BUFFER_LENGTH", NativeType::Int),
    ("DECIMAL_DIGITS", NativeType::SmallInt),
    ("PSEUDO_COLUMN", NativeType::SmallInt),
];

pub(crate) const FUNCTIONS: Layout = &[
    ("FUNCTION_CAT", NativeType::Text),
    ("FUNCTION_SCHEM", NativeType::Text),
    ("FUNCTION_NAME", NativeType::Text),
    ("REMARKS", NativeType::Text),
    ("FUNCTION_TYPE", NativeType::SmallInt),
    ("SPECIFIC_NAME", NativeType::Text),
];

pub(crate) const FUNCTION_COLUMNS: Layout = &[
    ("FUNCTION_CAT", NativeType::Text),
    ("FUNCTION_SCHEM", NativeType::Text),
    ("FUNCTION_NAME", NativeType::Text),
    ("COLUMN_NAME", NativeType::Text),
    ("COLUMN_TYPE", NativeType::SmallInt),
    ("DATA_TYPE", NativeType::Int),
    ("TYPE_NAME", NativeType::Text),
    ("PRECISION", NativeType::Int),
    ("LENGTH", NativeType::Int),
    ("SCALE", NativeType::SmallInt),
    ("RADIX", NativeType::SmallInt),
    ("NULLABLE", NativeType::SmallInt),
    ("REMARKS", NativeType::Text),
    ("CHAR_OCTET_LENGTH", NativeType::Int),
    ("ORDINAL_POSITION", NativeType::Int),
    ("IS_NULLABLE", NativeType::Text),
    ("SPECIFIC_NAME", NativeType::Text),
];

pub(crate) const UDTS: Layout = &[
    ("TYPE_CAT", NativeType::Text),
    ("TYPE_SCHEM", NativeType::Text),
    ("TYPE_NAME", NativeType::Text),
    ("CLASS_NAME", NativeType::Text),
    ("DATA_TYPE", NativeType::Int),
    ("REMARKS", NativeType::Text),
    ("BASE_TYPE", NativeType::SmallInt),
];

pub(crate) const SUPER_TABLES: Layout = &[
    ("TABLE_CAT", NativeType::Text),
    ("TABLE_SCHEM", NativeType::Text),
    ("TABLE_NAME", NativeType::Text),
    ("SUPERTABLE_NAME", NativeType::Text),
];

pub(crate) const SUPER_TYPES: Layout = &[
    ("TYPE_CAT", NativeType::Text),
    ("TYPE_SCHEM", NativeType::Text),
    ("TYPE_NAME", NativeType::Text),
    ("SUPERTYPE_CAT", NativeType::Text),
    ("SUPERTYPE_SCHEM", NativeType::Text),
    ("SUPERTYPE_NAME", NativeType::Text),
];

pub(crate) const ATTRIBUTES: Layout = &[
    ("TYPE_CAT", NativeType::Text),
    ("TYPE_SCHEM", NativeType::Text),
    ("TYPE_NAME", NativeType::Text),
    ("ATTR_NAME", NativeType::Text),
    ("DATA_TYPE", NativeType::Int),
    ("ATTR_TYPE_NAME", NativeType::Text),
    ("ATTR_SIZE", NativeType::Int),
    ("DECIMAL_DIGITS", NativeType::Int),
    ("NUM_PREC_RADIX", NativeType::Int),
    ("NULLABLE", NativeType::Int),
    ("REMARKS", NativeType::Text),
    ("ATTR_DEF", NativeType::Text),
    ("SQL_DATA_TYPE", NativeType::Int),
    ("SQL_DATETIME_SUB", NativeType::Int),
    ("CHAR_OCTET_LENGTH", NativeType::Int),
    ("ORDINAL_POSITION", NativeType::Int),
    ("IS_NULLABLE", NativeType::Text),
    ("SCOPE_CATALOG", NativeType::Text),
    ("SCOPE_SCHEMA", NativeType::Text),
    ("SCOPE_TABLE", NativeType::Text),
    ("SOURCE_DATA_TYPE", NativeType::SmallInt),
];

pub(crate) const CLIENT_INFO_PROPERTIES: Layout = &[
    ("NAME", NativeType::Text),
    ("MAX_LEN", NativeType::Int),
    ("DEFAULT_VALUE", NativeType::Text),
    ("DESCRIPTION", NativeType::Text),
];

/// Build the shared column info for a layout.
pub(crate) fn column_info(layout: Layout) -> Arc<ColumnInfo> {
    Arc::new(ColumnInfo::new(
        layout
            .iter()
            .map(|(name, native_type)| Column::new(*name, native_type.clone(), true))
            .collect(),
    ))
}

/// Name filter: absent or `%` matches anything, otherwise exact and case-sensitive.
pub(crate) fn name_matches(filter: Option<&str>, name: &str) -> bool {
    match filter {
        None | Some("%") => true,
        Some(f) => f == name,
    }
}
