//! Forward-only result sets.
//!
//! The `Cursor` trait is the common iteration interface. `ResultSet` backs
//! both rows returned by statement execution and the virtual rows built by
//! the metadata synthesizer, and adds positional accessors that read from
//! the row the cursor currently sits on.

use std::io::Cursor as ByteCursor;
use std::net::IpAddr;
use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::protocol::types::{
    BlobHandle, ColumnIndex, ColumnInfo, HostMap, HostValue, NativeValue, Row,
};
use crate::session::NativeResult;

/// Base trait for all cursor types.
///
/// # Example
///
/// ```no_run
/// use cassandra_bridge_rs::{Cursor, Row};
///
/// fn count_rows<C: Cursor<Item = Row>>(cursor: &mut C) -> cassandra_bridge_rs::Result<u64> {
///     let mut count = 0;
///     while cursor.fetch_next()?.is_some() {
///         count += 1;
///     }
///     Ok(count)
/// }
/// ```
pub trait Cursor {
    /// The type of item this cursor yields.
    type Item;

    /// Column information for this cursor.
    fn columns(&self) -> &ColumnInfo;

    /// Number of items consumed so far.
    fn row_count(&self) -> u64;

    /// Check if the cursor is closed.
    fn is_closed(&self) -> bool;

    /// Check if more items are available.
    fn has_more(&self) -> bool;

    /// Close the cursor and drop buffered rows.
    fn close(&mut self);

    /// Get the next item. Returns `Ok(None)` when exhausted.
    fn fetch_next(&mut self) -> Result<Option<Self::Item>>;

    /// Take all remaining items. The cursor is closed afterwards.
    fn fetch_all(&mut self) -> Result<Vec<Self::Item>>;
}

/// Tabular result consumed row by row.
#[derive(Debug, Clone)]
pub struct ResultSet {
    columns: Arc<ColumnInfo>,
    buffer: Vec<Row>,
    buffer_pos: usize,
    current: Option<Row>,
    rows_fetched: u64,
    applied: bool,
    closed: bool,
}

impl ResultSet {
    /// Build a result set from in-memory rows.
    pub fn from_rows(columns: Arc<ColumnInfo>, rows: Vec<Vec<NativeValue>>) -> Self {
        let buffer = rows
            .into_iter()
            .map(|values| Row::new(values, Arc::clone(&columns)))
            .collect();
        Self {
            columns,
            buffer,
            buffer_pos: 0,
            current: None,
            rows_fetched: 0,
            applied: true,
            closed: false,
        }
    }

    /// A zero-row result with the given columns.
    pub fn empty(columns: Arc<ColumnInfo>) -> Self {
        Self::from_rows(columns, Vec::new())
    }

    /// Wrap a native execution result.
    pub fn from_native(result: NativeResult) -> Self {
        let columns = Arc::new(ColumnInfo::from_metadata(&result.columns));
        let mut rs = Self::from_rows(columns, result.rows);
        rs.applied = result.applied;
        rs
    }

    /// Column descriptions.
    pub fn metadata(&self) -> &ColumnInfo {
        &self.columns
    }

    /// Whether the write that produced this result was applied.
    pub fn was_applied(&self) -> bool {
        self.applied
    }

    /// Number of rows not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.buffer_pos)
    }

    /// 1-based position of a column by name.
    pub fn find_column(&self, name: &str) -> Result<usize> {
        self.check_open()?;
        self.columns
            .find_by_name(name)
            .map(|i| i + 1)
            .ok_or_else(|| Error::ColumnNotFound {
                name: name.to_string(),
            })
    }

    /// Move to the next row. Returns false once the rows are exhausted.
    pub fn next(&mut self) -> Result<bool> {
        self.check_open()?;
        self.current = self.take_next();
        Ok(self.current.is_some())
    }

    /// The row the cursor is positioned on.
    pub fn current_row(&self) -> Result<&Row> {
        self.check_open()?;
        self.current.as_ref().ok_or(Error::NoCurrentRow)
    }

    fn check_open(&self) -> Result<()> {
        if self.closed {
            return Err(Error::ClosedResource {
                resource: "result set",
            });
        }
        Ok(())
    }

    fn take_next(&mut self) -> Option<Row> {
        let row = self.buffer.get(self.buffer_pos).cloned()?;
        self.buffer_pos += 1;
        self.rows_fetched += 1;
        Some(row)
    }

    pub fn get_string<I: ColumnIndex>(&self, column: I) -> Result<Option<String>> {
        self.current_row()?.get_string(column)
    }

    pub fn get_bool<I: ColumnIndex>(&self, column: I) -> Result<Option<bool>> {
        self.current_row()?.get_bool(column)
    }

    pub fn get_i8<I: ColumnIndex>(&self, column: I) -> Result<Option<i8>> {
        self.current_row()?.get_i8(column)
    }

    pub fn get_i16<I: ColumnIndex>(&self, column: I) -> Result<Option<i16>> {
        self.current_row()?.get_i16(column)
    }

    pub fn get_i32<I: ColumnIndex>(&self, column: I) -> Result<Option<i32>> {
        self.current_row()?.get_i32(column)
    }

    pub fn get_i64<I: ColumnIndex>(&self, column: I) -> Result<Option<i64>> {
        self.current_row()?.get_i64(column)
    }

    pub fn get_f32<I: ColumnIndex>(&self, column: I) -> Result<Option<f32>> {
        self.current_row()?.get_f32(column)
    }

    pub fn get_f64<I: ColumnIndex>(&self, column: I) -> Result<Option<f64>> {
        self.current_row()?.get_f64(column)
    }

    pub fn get_decimal<I: ColumnIndex>(&self, column: I) -> Result<Option<String>> {
        self.current_row()?.get_decimal(column)
    }

    pub fn get_bytes<I: ColumnIndex>(&self, column: I) -> Result<Option<Bytes>> {
        self.current_row()?.get_bytes(column)
    }

    pub fn get_blob<I: ColumnIndex>(&self, column: I) -> Result<Option<BlobHandle>> {
        self.current_row()?.get_blob(column)
    }

    pub fn get_binary_stream<I: ColumnIndex>(
        &self,
        column: I,
    ) -> Result<Option<ByteCursor<Bytes>>> {
        self.current_row()?.get_binary_stream(column)
    }

    pub fn get_timestamp<I: ColumnIndex>(&self, column: I) -> Result<Option<DateTime<Utc>>> {
        self.current_row()?.get_timestamp(column)
    }

    pub fn get_date<I: ColumnIndex>(&self, column: I) -> Result<Option<NaiveDate>> {
        self.current_row()?.get_date(column)
    }

    pub fn get_time<I: ColumnIndex>(&self, column: I) -> Result<Option<NaiveTime>> {
        self.current_row()?.get_time(column)
    }

    pub fn get_uuid<I: ColumnIndex>(&self, column: I) -> Result<Option<Uuid>> {
        self.current_row()?.get_uuid(column)
    }

    pub fn get_inet<I: ColumnIndex>(&self, column: I) -> Result<Option<IpAddr>> {
        self.current_row()?.get_inet(column)
    }

    pub fn get_list<I: ColumnIndex>(&self, column: I) -> Result<Option<Vec<HostValue>>> {
        self.current_row()?.get_list(column)
    }

    pub fn get_set<I: ColumnIndex>(&self, column: I) -> Result<Option<Vec<HostValue>>> {
        self.current_row()?.get_set(column)
    }

    pub fn get_map<I: ColumnIndex>(&self, column: I) -> Result<Option<HostMap>> {
        self.current_row()?.get_map(column)
    }

    /// Value in its default host representation; `HostValue::Null` for NULL.
    pub fn get_object<I: ColumnIndex>(&self, column: I) -> Result<HostValue> {
        self.current_row()?.get_object(column)
    }
}

impl Cursor for ResultSet {
    type Item = Row;

    fn columns(&self) -> &ColumnInfo {
        &self.columns
    }

    fn row_count(&self) -> u64 {
        self.rows_fetched
    }

    fn is_closed(&self) -> bool {
        self.closed
    }

    fn has_more(&self) -> bool {
        !self.closed && self.buffer_pos < self.buffer.len()
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.buffer.clear();
            self.buffer_pos = 0;
            self.current = None;
        }
    }

    fn fetch_next(&mut self) -> Result<Option<Self::Item>> {
        self.check_open()?;
        let row = self.take_next();
        self.current = row.clone();
        Ok(row)
    }

    fn fetch_all(&mut self) -> Result<Vec<Self::Item>> {
        self.check_open()?;
        let mut all_rows = std::mem::take(&mut self.buffer);
        let rest = all_rows.split_off(self.buffer_pos.min(all_rows.len()));
        self.rows_fetched += rest.len() as u64;
        self.close();
        Ok(rest)
    }
}
