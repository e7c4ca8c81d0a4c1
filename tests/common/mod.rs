//! In-memory store used by the integration tests.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, RwLock};

use bytes::Bytes;
use cassandra_bridge_rs::metadata::{ColumnKind, NativeColumn, NativeIndex, NativeTable};
use cassandra_bridge_rs::protocol::{BoundParameters, BoundValue};
use cassandra_bridge_rs::{
    BridgeConfig, ColumnMetadata, Connection, NativeResult, NativeSession, NativeType,
    NativeValue, PreparedHandle, SchemaIntrospection, StoreError, StoreResult,
};

pub const CATALOG: &str = "Test Cluster";
pub const KEYSPACE: &str = "testks";
pub const OTHER_KEYSPACE: &str = "otherks";

#[derive(Debug, Clone)]
pub struct FakeTable {
    pub table: NativeTable,
    pub columns: Vec<NativeColumn>,
    pub primary_key: Vec<String>,
    pub indexes: Vec<NativeIndex>,
}

/// Store double implementing both collaborator traits.
///
/// Executing a statement echoes the bound values back as a single row whose
/// columns are the statement's bind variables.
#[derive(Default)]
pub struct FakeStore {
    pub catalogs: Vec<String>,
    pub keyspaces: RwLock<BTreeMap<String, Vec<FakeTable>>>,
    pub variables: Mutex<BTreeMap<String, Vec<ColumnMetadata>>>,
    pub executions: Mutex<Vec<(String, BoundParameters)>>,
    pub introspection_calls: Mutex<usize>,
    pub unavailable: Mutex<bool>,
}

impl FakeStore {
    /// Two keyspaces; `testks` holds the regression table and a view over it.
    pub fn sample() -> Arc<Self> {
        let store = Self {
            catalogs: vec![CATALOG.to_string()],
            ..Default::default()
        };
        store.add_table(
            KEYSPACE,
            FakeTable {
                table: NativeTable::table("regressiontest").with_comment("regression data"),
                columns: vec![
                    NativeColumn::new("keyname", "text", ColumnKind::PartitionKey),
                    NativeColumn::new("bvalue", "boolean", ColumnKind::Regular),
                    NativeColumn::new("ivalue", "int", ColumnKind::Regular),
                ],
                primary_key: vec!["keyname".to_string()],
                indexes: vec![NativeIndex::new("ivalue_idx", "ivalue")],
            },
        );
        store.add_table(
            KEYSPACE,
            FakeTable {
                table: NativeTable::view("by_ivalue"),
                columns: vec![
                    NativeColumn::new("ivalue", "int", ColumnKind::PartitionKey),
                    NativeColumn::new("keyname", "text", ColumnKind::Clustering),
                ],
                primary_key: vec!["ivalue".to_string(), "keyname".to_string()],
                indexes: vec![],
            },
        );
        store.add_table(
            OTHER_KEYSPACE,
            FakeTable {
                table: NativeTable::table("users"),
                columns: vec![
                    NativeColumn::new("id", "uuid", ColumnKind::PartitionKey),
                    NativeColumn::new("tags", "set<text>", ColumnKind::Regular),
                    NativeColumn::new("attrs", "frozen<map<text, int>>", ColumnKind::Regular),
                ],
                primary_key: vec!["id".to_string()],
                indexes: vec![],
            },
        );
        Arc::new(store)
    }

    pub fn add_table(&self, keyspace: &str, table: FakeTable) {
        if let Ok(mut keyspaces) = self.keyspaces.write() {
            keyspaces.entry(keyspace.to_string()).or_default().push(table);
        }
    }

    /// Declare the bind variables a statement text prepares with.
    pub fn declare(&self, cql: &str, variables: Vec<ColumnMetadata>) {
        self.variables
            .lock()
            .unwrap()
            .insert(cql.to_string(), variables);
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.lock().unwrap() = unavailable;
    }

    pub fn execution_count(&self) -> usize {
        self.executions.lock().unwrap().len()
    }

    pub fn last_execution(&self) -> Option<(String, BoundParameters)> {
        self.executions.lock().unwrap().last().cloned()
    }

    pub fn introspection_calls(&self) -> usize {
        *self.introspection_calls.lock().unwrap()
    }

    fn enter(&self) -> StoreResult<()> {
        *self.introspection_calls.lock().unwrap() += 1;
        if *self.unavailable.lock().unwrap() {
            return Err(StoreError::unavailable("no host available"));
        }
        Ok(())
    }

    fn with_table<T>(
        &self,
        schema: &str,
        table: &str,
        f: impl FnOnce(&FakeTable) -> T,
    ) -> StoreResult<Option<T>> {
        self.enter()?;
        let keyspaces = self.keyspaces.read().unwrap();
        Ok(keyspaces
            .get(schema)
            .and_then(|tables| tables.iter().find(|t| t.table.name == table))
            .map(f))
    }
}

impl SchemaIntrospection for FakeStore {
    fn list_catalogs(&self) -> StoreResult<Vec<String>> {
        self.enter()?;
        Ok(self.catalogs.clone())
    }

    fn list_schemas(&self) -> StoreResult<Vec<String>> {
        self.enter()?;
        // Reverse order, so sorting is the bridge's job.
        Ok(self.keyspaces.read().unwrap().keys().rev().cloned().collect())
    }

    fn list_tables(&self, schema: &str) -> StoreResult<Vec<NativeTable>> {
        self.enter()?;
        Ok(self
            .keyspaces
            .read()
            .unwrap()
            .get(schema)
            .map(|tables| tables.iter().rev().map(|t| t.table.clone()).collect())
            .unwrap_or_default())
    }

    fn list_columns(&self, schema: &str, table: &str) -> StoreResult<Vec<NativeColumn>> {
        Ok(self
            .with_table(schema, table, |t| t.columns.clone())?
            .unwrap_or_default())
    }

    fn list_indexes(&self, schema: &str, table: &str) -> StoreResult<Vec<NativeIndex>> {
        Ok(self
            .with_table(schema, table, |t| t.indexes.clone())?
            .unwrap_or_default())
    }

    fn list_primary_key_columns(&self, schema: &str, table: &str) -> StoreResult<Vec<String>> {
        Ok(self
            .with_table(schema, table, |t| t.primary_key.clone())?
            .unwrap_or_default())
    }
}

impl NativeSession for FakeStore {
    fn prepare(&self, cql: &str) -> StoreResult<PreparedHandle> {
        let variables = self
            .variables
            .lock()
            .unwrap()
            .get(cql)
            .cloned()
            .unwrap_or_else(|| {
                (1..=cql.matches('?').count())
                    .map(|i| ColumnMetadata::new(format!("p{i}"), NativeType::Text))
                    .collect()
            });
        Ok(PreparedHandle::new(Bytes::from(cql.to_string()), cql, variables))
    }

    fn execute(
        &self,
        statement: &PreparedHandle,
        params: &BoundParameters,
    ) -> StoreResult<Option<NativeResult>> {
        if *self.unavailable.lock().unwrap() {
            return Err(StoreError::unavailable("no host available"));
        }
        self.executions
            .lock()
            .unwrap()
            .push((statement.cql.clone(), params.clone()));

        if statement.cql.starts_with("USE ") {
            return Ok(None);
        }
        let row = params
            .iter()
            .map(|cell| match cell {
                Some(BoundValue::Value(v)) => v.clone(),
                _ => NativeValue::Null,
            })
            .collect();
        let result = NativeResult::new(statement.variables.clone(), vec![row]);
        if statement.cql.contains("IF NOT EXISTS") {
            return Ok(Some(result.not_applied()));
        }
        Ok(Some(result))
    }
}

pub fn open(store: &Arc<FakeStore>, config: BridgeConfig) -> Connection {
    Connection::open(config, store.clone(), store.clone()).unwrap()
}

/// Connection with `testks` selected.
pub fn connect(store: &Arc<FakeStore>) -> Connection {
    open(store, BridgeConfig::new("localhost").with_keyspace(KEYSPACE))
}
