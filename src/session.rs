//! Native bind/execute collaborator.
//!
//! The bridge never talks to the network itself. A connected, authenticated
//! store client implements [`NativeSession`] and the statement layer drives it.

use bytes::Bytes;

use crate::error::StoreResult;
use crate::protocol::bind::BoundParameters;
use crate::protocol::types::{ColumnMetadata, NativeValue};

/// A statement prepared by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedHandle {
    /// Opaque statement id assigned by the store.
    pub id: Bytes,
    /// Statement text as submitted.
    pub cql: String,
    /// Bind variables in declaration order.
    pub variables: Vec<ColumnMetadata>,
}

impl PreparedHandle {
    pub fn new(id: impl Into<Bytes>, cql: impl Into<String>, variables: Vec<ColumnMetadata>) -> Self {
        Self {
            id: id.into(),
            cql: cql.into(),
            variables,
        }
    }

    /// Number of bind variables.
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }
}

/// Rows returned by one execution, plus the conditional-update flag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NativeResult {
    pub columns: Vec<ColumnMetadata>,
    pub rows: Vec<Vec<NativeValue>>,
    /// False when a conditional write did not apply.
    pub applied: bool,
}

impl NativeResult {
    pub fn new(columns: Vec<ColumnMetadata>, rows: Vec<Vec<NativeValue>>) -> Self {
        Self {
            columns,
            rows,
            applied: true,
        }
    }

    /// Mark the result as not applied.
    pub fn not_applied(mut self) -> Self {
        self.applied = false;
        self
    }

    /// Rows available without another round trip.
    pub fn available(&self) -> usize {
        self.rows.len()
    }
}

/// Blocking bind/execute interface of the underlying store client.
pub trait NativeSession: Send + Sync {
    /// Prepare a statement.
    fn prepare(&self, cql: &str) -> StoreResult<PreparedHandle>;

    /// Execute a prepared statement with its bindings.
    ///
    /// Returns `None` when the store produced no result at all.
    fn execute(
        &self,
        statement: &PreparedHandle,
        params: &BoundParameters,
    ) -> StoreResult<Option<NativeResult>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::types::NativeType;

    #[test]
    fn test_prepared_handle() {
        let handle = PreparedHandle::new(
            Bytes::from_static(b"\x01\x02"),
            "SELECT * FROM t WHERE k = ?",
            vec![ColumnMetadata::new("k", NativeType::Text)],
        );
        assert_eq!(handle.variable_count(), 1);
        assert_eq!(handle.cql, "SELECT * FROM t WHERE k = ?");
    }

    #[test]
    fn test_native_result_applied_flag() {
        let result = NativeResult::new(vec![], vec![vec![NativeValue::Int(1)]]);
        assert!(result.applied);
        assert_eq!(result.available(), 1);
        assert!(!result.not_applied().applied);
    }
}
