//! Metadata synthesis against the in-memory store.

mod common;

use std::error::Error as _;

use cassandra_bridge_rs::metadata::{
    ColumnKind, NativeColumn, NativeTable, DB_MAJOR_VERSION, DB_MINOR_VERSION,
};
use cassandra_bridge_rs::{BridgeConfig, Cursor, Error, ResultSet, StoreErrorKind, TypeCode};
use common::{FakeStore, FakeTable, CATALOG, KEYSPACE, OTHER_KEYSPACE};

fn strings(rs: &mut ResultSet, column: &str) -> Vec<String> {
    let mut out = Vec::new();
    while rs.next().unwrap() {
        out.push(rs.get_string(column).unwrap().unwrap_or_default());
    }
    out
}

#[test]
fn test_columns_in_declared_order() {
    let store = FakeStore::sample();
    let conn = common::connect(&store);
    let meta = conn.metadata().unwrap();

    let mut rs = meta
        .get_columns(None, None, Some("regressiontest"), None)
        .unwrap();
    let mut seen = Vec::new();
    while rs.next().unwrap() {
        seen.push((
            rs.get_string("COLUMN_NAME").unwrap().unwrap(),
            rs.get_i32("ORDINAL_POSITION").unwrap().unwrap(),
            rs.get_i32("DATA_TYPE").unwrap().unwrap(),
            rs.get_i32("NULLABLE").unwrap().unwrap(),
        ));
    }
    assert_eq!(
        seen,
        vec![
            ("keyname".to_string(), 1, TypeCode::VarChar.code(), 0),
            ("bvalue".to_string(), 2, TypeCode::Boolean.code(), 1),
            ("ivalue".to_string(), 3, TypeCode::Integer.code(), 1),
        ]
    );
}

#[test]
fn test_columns_layout_and_type_names() {
    let store = FakeStore::sample();
    let conn = common::open(&store, BridgeConfig::new("localhost"));
    let meta = conn.metadata().unwrap();

    let mut rs = meta
        .get_columns(None, Some(OTHER_KEYSPACE), Some("users"), None)
        .unwrap();
    assert_eq!(rs.metadata().len(), 24);
    assert_eq!(
        &rs.metadata().column_names()[..4],
        &["TABLE_CAT", "TABLE_SCHEM", "TABLE_NAME", "COLUMN_NAME"]
    );

    assert!(rs.next().unwrap());
    assert_eq!(rs.get_string(1).unwrap().as_deref(), Some(CATALOG));
    assert_eq!(rs.get_string("type_name").unwrap().as_deref(), Some("uuid"));
    assert_eq!(rs.get_i32(5).unwrap(), Some(TypeCode::Other.code()));
    assert_eq!(rs.get_string("IS_NULLABLE").unwrap().as_deref(), Some("NO"));

    assert!(rs.next().unwrap());
    assert_eq!(rs.get_string("TYPE_NAME").unwrap().as_deref(), Some("set<text>"));
    assert_eq!(rs.get_i32("DATA_TYPE").unwrap(), Some(TypeCode::Array.code()));

    assert!(rs.next().unwrap());
    assert_eq!(
        rs.get_string("TYPE_NAME").unwrap().as_deref(),
        Some("map<text, int>")
    );
    assert_eq!(
        rs.get_i32("DATA_TYPE").unwrap(),
        Some(TypeCode::JavaObject.code())
    );
    assert!(!rs.next().unwrap());
}

#[test]
fn test_column_name_filter() {
    let store = FakeStore::sample();
    let conn = common::connect(&store);
    let meta = conn.metadata().unwrap();

    let mut rs = meta
        .get_columns(None, None, Some("regressiontest"), Some("ivalue"))
        .unwrap();
    assert!(rs.next().unwrap());
    assert_eq!(rs.get_i32("ORDINAL_POSITION").unwrap(), Some(3));
    assert!(!rs.next().unwrap());
}

#[test]
fn test_tables_default_types() {
    let store = FakeStore::sample();
    let conn = common::connect(&store);
    let meta = conn.metadata().unwrap();

    let mut rs = meta.get_tables(None, None, None, None).unwrap();
    let mut seen = Vec::new();
    while rs.next().unwrap() {
        seen.push((
            rs.get_string("TABLE_TYPE").unwrap().unwrap(),
            rs.get_string("TABLE_NAME").unwrap().unwrap(),
        ));
    }
    assert_eq!(
        seen,
        vec![
            ("TABLE".to_string(), "regressiontest".to_string()),
            ("VIEW".to_string(), "by_ivalue".to_string()),
        ]
    );

    let mut rs = meta.get_tables(None, None, None, Some(&[])).unwrap();
    assert_eq!(rs.fetch_all().unwrap().len(), 2);
}

#[test]
fn test_tables_type_filter_excludes_views() {
    let store = FakeStore::sample();
    let conn = common::connect(&store);
    let meta = conn.metadata().unwrap();

    let mut rs = meta.get_tables(None, None, None, Some(&["TABLE"])).unwrap();
    assert_eq!(strings(&mut rs, "TABLE_NAME"), vec!["regressiontest"]);

    let mut rs = meta.get_tables(None, None, None, Some(&["VIEW"])).unwrap();
    assert_eq!(strings(&mut rs, "TABLE_NAME"), vec!["by_ivalue"]);

    let mut rs = meta
        .get_tables(None, None, None, Some(&["SYSTEM TABLE"]))
        .unwrap();
    assert!(!rs.next().unwrap());
}

#[test]
fn test_tables_type_filter_ignores_case() {
    let store = FakeStore::sample();
    let conn = common::connect(&store);
    let meta = conn.metadata().unwrap();

    let mut rs = meta.get_tables(None, None, None, Some(&["table"])).unwrap();
    assert_eq!(strings(&mut rs, "TABLE_NAME"), vec!["regressiontest"]);

    let mut rs = meta
        .get_tables(None, None, None, Some(&["View", "tAbLe"]))
        .unwrap();
    assert_eq!(strings(&mut rs, "TABLE_NAME"), vec!["regressiontest", "by_ivalue"]);
}

#[test]
fn test_tables_remarks() {
    let store = FakeStore::sample();
    let conn = common::connect(&store);
    let meta = conn.metadata().unwrap();

    let mut rs = meta
        .get_tables(None, None, Some("regressiontest"), None)
        .unwrap();
    assert!(rs.next().unwrap());
    assert_eq!(
        rs.get_string("REMARKS").unwrap().as_deref(),
        Some("regression data")
    );
    assert_eq!(rs.get_string("TYPE_CAT").unwrap(), None);
}

#[test]
fn test_null_schema_uses_current_schema() {
    let store = FakeStore::sample();
    let mut conn = common::connect(&store);

    let mut rs = conn
        .metadata()
        .unwrap()
        .get_tables(None, None, None, Some(&["TABLE"]))
        .unwrap();
    assert_eq!(strings(&mut rs, "TABLE_SCHEM"), vec![KEYSPACE]);

    conn.set_schema(OTHER_KEYSPACE).unwrap();
    let mut rs = conn
        .metadata()
        .unwrap()
        .get_tables(None, None, None, Some(&["TABLE"]))
        .unwrap();
    assert_eq!(strings(&mut rs, "TABLE_NAME"), vec!["users"]);

    let mut rs = conn
        .metadata()
        .unwrap()
        .get_tables(None, Some(KEYSPACE), None, Some(&["TABLE"]))
        .unwrap();
    assert_eq!(strings(&mut rs, "TABLE_NAME"), vec!["regressiontest"]);
}

#[test]
fn test_null_schema_without_selection_lists_all() {
    let store = FakeStore::sample();
    let conn = common::open(&store, BridgeConfig::new("localhost"));
    let meta = conn.metadata().unwrap();

    let mut rs = meta.get_tables(None, None, None, Some(&["TABLE"])).unwrap();
    assert_eq!(strings(&mut rs, "TABLE_SCHEM"), vec![OTHER_KEYSPACE, KEYSPACE]);

    let mut rs = meta.get_tables(None, Some("%"), None, Some(&["TABLE"])).unwrap();
    assert_eq!(rs.fetch_all().unwrap().len(), 2);
}

#[test]
fn test_name_filters_are_exact() {
    let store = FakeStore::sample();
    let conn = common::connect(&store);
    let meta = conn.metadata().unwrap();

    let mut rs = meta.get_tables(None, None, Some("regression%"), None).unwrap();
    assert!(!rs.next().unwrap());
    let mut rs = meta.get_tables(None, None, Some("RegressionTest"), None).unwrap();
    assert!(!rs.next().unwrap());
}

#[test]
fn test_catalog_mismatch_yields_empty_results() {
    let store = FakeStore::sample();
    let conn = common::connect(&store);
    let meta = conn.metadata().unwrap();
    let other = Some("Other Cluster");

    let mut results = vec![
        meta.get_schemas(other, None).unwrap(),
        meta.get_tables(other, None, None, None).unwrap(),
        meta.get_columns(other, None, None, None).unwrap(),
        meta.get_index_info(other, None, Some("regressiontest"), false, false)
            .unwrap(),
        meta.get_primary_keys(other, None, Some("regressiontest"))
            .unwrap(),
    ];
    for rs in &mut results {
        assert!(!rs.metadata().is_empty());
        assert!(!rs.next().unwrap());
    }
}

#[test]
fn test_catalog_match_ignores_case() {
    let store = FakeStore::sample();
    let conn = common::connect(&store);
    let meta = conn.metadata().unwrap();

    let mut rs = meta
        .get_tables(Some("TEST CLUSTER"), None, None, Some(&["TABLE"]))
        .unwrap();
    assert_eq!(strings(&mut rs, "TABLE_CAT"), vec![CATALOG]);
}

#[test]
fn test_catalogs_schemas_and_types() {
    let store = FakeStore::sample();
    let conn = common::connect(&store);
    let meta = conn.metadata().unwrap();

    let mut rs = meta.get_catalogs().unwrap();
    assert_eq!(strings(&mut rs, "CATALOG_NAME"), vec![CATALOG]);

    let mut rs = meta.get_schemas(None, None).unwrap();
    assert_eq!(rs.metadata().column_names(), vec!["SCHEMA_NAME", "CATALOG_NAME"]);
    assert!(rs.next().unwrap());
    assert_eq!(rs.get_string(1).unwrap().as_deref(), Some(OTHER_KEYSPACE));
    assert_eq!(rs.get_string(2).unwrap(), None);
    assert!(rs.next().unwrap());
    assert_eq!(rs.get_string(1).unwrap().as_deref(), Some(KEYSPACE));
    assert!(!rs.next().unwrap());

    let mut rs = meta.get_schemas(None, Some(KEYSPACE)).unwrap();
    assert_eq!(strings(&mut rs, "SCHEMA_NAME"), vec![KEYSPACE]);

    let mut rs = meta.get_table_types().unwrap();
    assert_eq!(strings(&mut rs, "TABLE_TYPE"), vec!["TABLE", "VIEW"]);
}

#[test]
fn test_index_info() {
    let store = FakeStore::sample();
    let conn = common::connect(&store);
    let meta = conn.metadata().unwrap();

    let mut rs = meta
        .get_index_info(None, None, Some("regressiontest"), false, true)
        .unwrap();
    assert!(rs.next().unwrap());
    assert_eq!(rs.get_string("INDEX_NAME").unwrap().as_deref(), Some("ivalue_idx"));
    assert_eq!(rs.get_string("COLUMN_NAME").unwrap().as_deref(), Some("ivalue"));
    assert_eq!(rs.get_bool("NON_UNIQUE").unwrap(), Some(true));
    assert!(!rs.next().unwrap());

    let mut rs = meta
        .get_index_info(None, None, Some("regressiontest"), true, true)
        .unwrap();
    assert!(!rs.next().unwrap());
}

#[test]
fn test_primary_keys() {
    let store = FakeStore::sample();
    let conn = common::connect(&store);
    let meta = conn.metadata().unwrap();

    let mut rs = meta.get_primary_keys(None, None, Some("by_ivalue")).unwrap();
    let mut seen = Vec::new();
    while rs.next().unwrap() {
        seen.push((
            rs.get_string("COLUMN_NAME").unwrap().unwrap(),
            rs.get_i16("KEY_SEQ").unwrap().unwrap(),
        ));
    }
    assert_eq!(
        seen,
        vec![("ivalue".to_string(), 1), ("keyname".to_string(), 2)]
    );
}

#[test]
fn test_metadata_reflects_live_schema() {
    let store = FakeStore::sample();
    let conn = common::connect(&store);
    let meta = conn.metadata().unwrap();

    let before = store.introspection_calls();
    let mut rs = meta.get_tables(None, None, None, Some(&["TABLE"])).unwrap();
    assert_eq!(rs.fetch_all().unwrap().len(), 1);

    store.add_table(
        KEYSPACE,
        FakeTable {
            table: NativeTable::table("added"),
            columns: vec![NativeColumn::new("k", "bigint", ColumnKind::PartitionKey)],
            primary_key: vec!["k".to_string()],
            indexes: vec![],
        },
    );
    let mut rs = meta.get_tables(None, None, None, Some(&["TABLE"])).unwrap();
    assert_eq!(strings(&mut rs, "TABLE_NAME"), vec!["added", "regressiontest"]);
    assert!(store.introspection_calls() >= before + 4);
}

#[test]
fn test_store_failure_is_surfaced() {
    let store = FakeStore::sample();
    let conn = common::connect(&store);
    store.set_unavailable(true);

    let err = conn
        .metadata()
        .unwrap()
        .get_columns(None, None, None, None)
        .unwrap_err();
    match &err {
        Error::Store { context, source } => {
            assert_eq!(context, "get_columns");
            assert_eq!(source.kind, StoreErrorKind::Unavailable);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.source().is_some());
}

#[test]
fn test_metadata_extras() {
    let store = FakeStore::sample();
    let conn = common::connect(&store);
    let meta = conn.metadata().unwrap();

    assert_eq!(meta.catalog_term(), "Cluster");
    assert_eq!(meta.schema_term(), "Keyspace");
    assert_eq!(meta.identifier_quote_string(), "\"");
    assert_eq!(meta.search_string_escape(), "\\");
    assert_eq!(meta.catalog_separator(), "");
    assert_eq!(meta.driver_name(), "cassandra-bridge-rs");
    assert!(!meta.supports_transactions());
    assert!(!meta.supports_savepoints());
    assert!(!meta.supports_batch_updates());
    assert!(!meta.supports_stored_procedures());
    assert!(!meta.supports_get_generated_keys());

    let mut rs = meta.get_imported_keys(None, None, "regressiontest").unwrap();
    assert_eq!(rs.metadata().len(), 14);
    assert!(!rs.next().unwrap());
    assert!(!meta.get_exported_keys(None, None, "t").unwrap().next().unwrap());
    assert_eq!(meta.get_type_info().unwrap().metadata().len(), 18);
    assert_eq!(
        meta.get_table_privileges(None, None, None)
            .unwrap()
            .metadata()
            .len(),
        7
    );

    assert!(matches!(
        meta.get_procedures(None, None, None),
        Err(Error::NotSupported { .. })
    ));
    assert!(matches!(
        meta.get_procedure_columns(None, None, None, None),
        Err(Error::NotSupported { .. })
    ));
    assert!(matches!(
        meta.get_pseudo_columns(None, None, None, None),
        Err(Error::NotSupported { .. })
    ));
    assert!(matches!(
        meta.generated_key_always_returned(),
        Err(Error::NotSupported { .. })
    ));
}

#[test]
fn test_product_and_driver_identity() {
    let store = FakeStore::sample();
    let conn = common::open(
        &store,
        BridgeConfig::new("localhost")
            .with_keyspace(KEYSPACE)
            .with_user("cassandra"),
    );
    let meta = conn.metadata().unwrap();

    assert_eq!(meta.database_product_name(), "Cassandra");
    assert_eq!(meta.database_major_version(), DB_MAJOR_VERSION);
    assert_eq!(meta.database_minor_version(), DB_MINOR_VERSION);
    assert_eq!(
        meta.database_product_version(),
        format!("{}.{}", DB_MAJOR_VERSION, DB_MINOR_VERSION)
    );
    assert_eq!(meta.driver_version(), "0.1.0");
    assert_eq!(meta.driver_major_version(), 0);
    assert_eq!(meta.driver_minor_version(), 1);
    assert_eq!(meta.url(), "jdbc:cassandra://localhost:9042/testks?user=cassandra");
    assert_eq!(meta.user_name(), "cassandra");
    assert_eq!(meta.default_transaction_isolation(), 0);
    assert_eq!(conn.transaction_isolation(), 0);

    let anonymous = common::connect(&store);
    assert_eq!(anonymous.metadata().unwrap().user_name(), "");
}

#[test]
fn test_empty_catalog_queries_keep_layouts() {
    let store = FakeStore::sample();
    let conn = common::connect(&store);
    let meta = conn.metadata().unwrap();

    let mut rs = meta
        .get_cross_reference(None, None, "regressiontest", None, None, "by_ivalue")
        .unwrap();
    assert_eq!(rs.metadata().len(), 14);
    assert_eq!(rs.metadata().column_names()[3], "PKCOLUMN_NAME");
    assert!(!rs.next().unwrap());

    let mut rs = meta.get_version_columns(None, None, "regressiontest").unwrap();
    assert_eq!(rs.metadata().len(), 8);
    assert_eq!(rs.metadata().column_names()[7], "PSEUDO_COLUMN");
    assert!(!rs.next().unwrap());

    let mut rs = meta
        .get_best_row_identifier(None, None, "regressiontest", 0, true)
        .unwrap();
    assert_eq!(rs.metadata().column_names()[0], "SCOPE");
    assert!(!rs.next().unwrap());

    let layouts = [
        (meta.get_functions(None, None, None).unwrap(), 6, "FUNCTION_CAT"),
        (
            meta.get_column_privileges(None, None, "regressiontest", None)
                .unwrap(),
            8,
            "TABLE_CAT",
        ),
        (meta.get_super_tables(None, None, None).unwrap(), 4, "TABLE_CAT"),
        (meta.get_super_types(None, None, None).unwrap(), 6, "TYPE_CAT"),
        (meta.get_attributes(None, None, None, None).unwrap(), 21, "TYPE_CAT"),
        (meta.get_client_info_properties().unwrap(), 4, "NAME"),
        (
            meta.get_function_columns(None, None, None, None).unwrap(),
            17,
            "FUNCTION_CAT",
        ),
        (meta.get_udts(None, None, None, None).unwrap(), 7, "TYPE_CAT"),
    ];
    for (mut rs, width, first) in layouts {
        assert_eq!(rs.metadata().len(), width, "{first}");
        assert_eq!(rs.metadata().column_names()[0], first);
        assert!(!rs.next().unwrap());
    }
    assert_eq!(
        meta.get_functions(None, None, None)
            .unwrap()
            .metadata()
            .column_names()[2],
        "FUNCTION_NAME"
    );
}
