//! Prepared statements.
//!
//! A statement owns its [`BoundParameters`] exclusively. It is not meant to
//! be shared across threads; nothing here locks the bindings.

use std::io::Read;
use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use tracing::{debug, trace};

use crate::cursor::ResultSet;
use crate::error::{Error, Result};
use crate::protocol::bind::{self, BoundParameters};
use crate::protocol::decode::{date_to_timestamp, time_to_timestamp};
use crate::protocol::types::{map_to_native_type, HostValue, RowId, TypeCode};
use crate::session::{NativeResult, NativeSession, PreparedHandle};

/// A statement prepared on the store, with its parameter bindings.
pub struct PreparedStatement {
    session: Arc<dyn NativeSession>,
    handle: PreparedHandle,
    params: BoundParameters,
    result: Option<NativeResult>,
    update_count: Option<u64>,
    applied: bool,
    closed: bool,
}

impl PreparedStatement {
    pub(crate) fn new(session: Arc<dyn NativeSession>, handle: PreparedHandle) -> Self {
        let params = BoundParameters::new(handle.variable_count());
        Self {
            session,
            handle,
            params,
            result: None,
            update_count: None,
            applied: true,
            closed: false,
        }
    }

    /// Statement text.
    pub fn cql(&self) -> &str {
        &self.handle.cql
    }

    /// Number of bind variables.
    pub fn parameter_count(&self) -> usize {
        self.handle.variable_count()
    }

    /// Current bindings.
    pub fn parameters(&self) -> &BoundParameters {
        &self.params
    }

    fn check_open(&self) -> Result<()> {
        if self.closed {
            return Err(Error::ClosedResource {
                resource: "statement",
            });
        }
        Ok(())
    }

    /// Validate a 1-based index and return the native position.
    fn position(&self, index: usize) -> Result<usize> {
        self.check_open()?;
        bind::native_index(index, self.params.len())
    }

    /// Bind a host value, dispatching on its runtime category.
    pub fn set_object(&mut self, index: usize, value: impl Into<HostValue>) -> Result<()> {
        self.check_open()?;
        bind::bind_object(&mut self.params, index, &value.into()).map(|_| ())
    }

    /// Same as [`set_object`](Self::set_object); the type hint does not
    /// influence dispatch.
    pub fn set_object_typed(
        &mut self,
        index: usize,
        value: impl Into<HostValue>,
        type_code: TypeCode,
    ) -> Result<()> {
        trace!(
            index,
            hint = %type_code,
            hinted_native = ?map_to_native_type(type_code),
            "ignoring bind type hint"
        );
        self.set_object(index, value)
    }

    pub fn set_null(&mut self, index: usize, type_code: TypeCode) -> Result<()> {
        let pos = self.position(index)?;
        trace!(index, %type_code, "binding null");
        self.params.set_to_null(pos)
    }

    pub fn set_null_typed(&mut self, index: usize, type_code: TypeCode, type_name: &str) -> Result<()> {
        trace!(index, type_name, "binding typed null");
        self.set_null(index, type_code)
    }

    pub fn set_string(&mut self, index: usize, value: impl Into<String>) -> Result<()> {
        let pos = self.position(index)?;
        self.params.set_string(pos, value.into())
    }

    pub fn set_nstring(&mut self, index: usize, value: impl Into<String>) -> Result<()> {
        self.set_string(index, value)
    }

    /// Bind a URL as its string form.
    pub fn set_url(&mut self, index: usize, url: &str) -> Result<()> {
        self.set_string(index, url)
    }

    pub fn set_int(&mut self, index: usize, value: i32) -> Result<()> {
        let pos = self.position(index)?;
        self.params.set_int(pos, value)
    }

    /// Widened to a 32-bit integer.
    pub fn set_short(&mut self, index: usize, value: i16) -> Result<()> {
        self.set_int(index, i32::from(value))
    }

    /// Bound as a one-byte blob.
    pub fn set_byte(&mut self, index: usize, value: i8) -> Result<()> {
        let pos = self.position(index)?;
        self.params
            .set_bytes(pos, Bytes::copy_from_slice(&value.to_be_bytes()))
    }

    pub fn set_long(&mut self, index: usize, value: i64) -> Result<()> {
        let pos = self.position(index)?;
        self.params.set_long(pos, value)
    }

    pub fn set_bool(&mut self, index: usize, value: bool) -> Result<()> {
        let pos = self.position(index)?;
        self.params.set_bool(pos, value)
    }

    pub fn set_double(&mut self, index: usize, value: f64) -> Result<()> {
        let pos = self.position(index)?;
        self.params.set_double(pos, value)
    }

    pub fn set_float(&mut self, index: usize, value: f32) -> Result<()> {
        let pos = self.position(index)?;
        self.params.set_float(pos, value)
    }

    /// Bind a decimal given in its canonical string form.
    pub fn set_decimal(&mut self, index: usize, value: impl Into<String>) -> Result<()> {
        let pos = self.position(index)?;
        self.params.set_decimal(pos, value.into())
    }

    pub fn set_bytes(&mut self, index: usize, value: impl Into<Bytes>) -> Result<()> {
        let pos = self.position(index)?;
        self.params.set_bytes(pos, value.into())
    }

    /// Drain a reader into a blob.
    pub fn set_blob<R: Read>(&mut self, index: usize, mut reader: R) -> Result<()> {
        let pos = self.position(index)?;
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        self.params.set_bytes(pos, Bytes::from(buf))
    }

    pub fn set_timestamp(&mut self, index: usize, value: DateTime<Utc>) -> Result<()> {
        let pos = self.position(index)?;
        self.params.set_timestamp(pos, value)
    }

    /// Bound as a timestamp at midnight UTC.
    pub fn set_date(&mut self, index: usize, value: NaiveDate) -> Result<()> {
        self.set_timestamp(index, date_to_timestamp(value))
    }

    /// Bound as a timestamp on 1970-01-01.
    pub fn set_time(&mut self, index: usize, value: NaiveTime) -> Result<()> {
        self.set_timestamp(index, time_to_timestamp(value))
    }

    pub fn set_row_id(&mut self, _index: usize, _value: &RowId) -> Result<()> {
        self.check_open()?;
        Err(Error::not_supported("row ids"))
    }

    /// Replace all bindings with a fresh, empty set.
    pub fn clear_parameters(&mut self) -> Result<()> {
        self.check_open()?;
        self.params = BoundParameters::new(self.handle.variable_count());
        Ok(())
    }

    /// Execute with the current bindings. Returns true when a result is available.
    pub fn execute(&mut self) -> Result<bool> {
        self.check_open()?;
        debug!(
            cql = %self.handle.cql,
            bound = self.params.bound_count(),
            "executing statement"
        );
        self.result = None;
        self.update_count = None;
        self.applied = true;
        let result = self
            .session
            .execute(&self.handle, &self.params)
            .map_err(|e| Error::store(format!("execute ({})", self.handle.cql), e))?;

        if let Some(r) = &result {
            self.applied = r.applied;
            if r.applied {
                self.update_count = Some(r.available() as u64);
            }
        }
        self.result = result;
        Ok(self.result.is_some())
    }

    /// Execute and return the rows.
    pub fn execute_query(&mut self) -> Result<ResultSet> {
        self.execute()?;
        self.result
            .take()
            .map(ResultSet::from_native)
            .ok_or(Error::NoResultSet)
    }

    /// Execute and return the update count.
    pub fn execute_update(&mut self) -> Result<u64> {
        if !self.execute()? {
            return Err(Error::NoUpdateCount);
        }
        self.update_count.ok_or(Error::NoUpdateCount)
    }

    /// Whether the last conditional write was applied.
    pub fn was_applied(&self) -> Result<bool> {
        self.check_open()?;
        Ok(self.applied)
    }

    pub fn update_count(&self) -> Result<Option<u64>> {
        self.check_open()?;
        Ok(self.update_count)
    }

    /// Take the result of the last execution, if it has not been taken yet.
    pub fn result_set(&mut self) -> Result<Option<ResultSet>> {
        self.check_open()?;
        Ok(self.result.take().map(ResultSet::from_native))
    }

    pub fn add_batch(&mut self) -> Result<()> {
        self.check_open()?;
        Err(Error::not_supported("batch updates"))
    }

    pub fn generated_keys(&self) -> Result<ResultSet> {
        self.check_open()?;
        Err(Error::not_supported("generated keys"))
    }

    pub fn parameter_metadata(&self) -> Result<()> {
        self.check_open()?;
        Err(Error::not_supported("parameter metadata"))
    }

    /// Close the statement. Closing twice is a no-op.
    pub fn close(&mut self) {
        if !self.closed {
            debug!(cql = %self.handle.cql, "closing statement");
            self.closed = true;
            self.params = BoundParameters::new(0);
            self.result = None;
            self.update_count = None;
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}
