//! Row type for query results.
//!
//! Typed getters address columns through [`ColumnIndex`]: a `usize` is the
//! protocol's 1-based position, a `&str` is a case-insensitive name.

use bytes::Bytes;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use std::net::IpAddr;
use std::sync::Arc;
use uuid::Uuid;

use super::column::{Column, ColumnInfo};
use super::host::{HostMap, HostValue};
use super::lob::BlobHandle;
use super::value::NativeValue;
use crate::error::{Error, Result};
use crate::protocol::decode::accessor;

/// A way of addressing a column.
pub trait ColumnIndex {
    /// Resolve to a 0-based position.
    fn resolve(&self, columns: &ColumnInfo) -> Result<usize>;
}

impl ColumnIndex for usize {
    fn resolve(&self, columns: &ColumnInfo) -> Result<usize> {
        if *self == 0 || *self > columns.len() {
            return Err(Error::ColumnIndexOutOfBounds {
                index: *self,
                count: columns.len(),
            });
        }
        Ok(self - 1)
    }
}

impl ColumnIndex for &str {
    fn resolve(&self, columns: &ColumnInfo) -> Result<usize> {
        columns
            .find_by_name(self)
            .ok_or_else(|| Error::ColumnNotFound {
                name: self.to_string(),
            })
    }
}

/// A row of query results.
#[derive(Debug, Clone)]
pub struct Row {
    /// Column values.
    values: Vec<NativeValue>,
    /// Shared column information (reference counted).
    column_info: Arc<ColumnInfo>,
}

impl Row {
    /// Create a new row with values and shared column info.
    pub fn new(values: Vec<NativeValue>, column_info: Arc<ColumnInfo>) -> Self {
        Self {
            values,
            column_info,
        }
    }

    /// Get value by column index (0-based).
    pub fn get(&self, index: usize) -> Option<&NativeValue> {
        self.values.get(index)
    }

    /// Get value by column name (case-insensitive).
    pub fn get_by_name(&self, name: &str) -> Option<&NativeValue> {
        self.column_info
            .find_by_name(name)
            .and_then(|idx| self.values.get(idx))
    }

    /// Resolve a column reference to its cell.
    pub fn cell<I: ColumnIndex>(&self, column: I) -> Result<&NativeValue> {
        let idx = column.resolve(&self.column_info)?;
        self.values.get(idx).ok_or(Error::ColumnIndexOutOfBounds {
            index: idx + 1,
            count: self.values.len(),
        })
    }

    /// Get the number of columns.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the row is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get all values.
    pub fn values(&self) -> &[NativeValue] {
        &self.values
    }

    /// Get column information.
    pub fn columns(&self) -> &[Column] {
        &self.column_info.columns
    }

    /// Get column names.
    pub fn column_names(&self) -> Vec<&str> {
        self.column_info.column_names()
    }

    /// Iterate over values.
    pub fn iter(&self) -> impl Iterator<Item = &NativeValue> {
        self.values.iter()
    }

    pub fn get_string<I: ColumnIndex>(&self, column: I) -> Result<Option<String>> {
        Ok(accessor::to_string(self.cell(column)?))
    }

    pub fn get_bool<I: ColumnIndex>(&self, column: I) -> Result<Option<bool>> {
        accessor::to_bool(self.cell(column)?)
    }

    pub fn get_i8<I: ColumnIndex>(&self, column: I) -> Result<Option<i8>> {
        accessor::to_i8(self.cell(column)?)
    }

    pub fn get_i16<I: ColumnIndex>(&self, column: I) -> Result<Option<i16>> {
        accessor::to_i16(self.cell(column)?)
    }

    pub fn get_i32<I: ColumnIndex>(&self, column: I) -> Result<Option<i32>> {
        accessor::to_i32(self.cell(column)?)
    }

    pub fn get_i64<I: ColumnIndex>(&self, column: I) -> Result<Option<i64>> {
        accessor::to_i64(self.cell(column)?)
    }

    pub fn get_f32<I: ColumnIndex>(&self, column: I) -> Result<Option<f32>> {
        accessor::to_f32(self.cell(column)?)
    }

    pub fn get_f64<I: ColumnIndex>(&self, column: I) -> Result<Option<f64>> {
        accessor::to_f64(self.cell(column)?)
    }

    /// Decimal value in its exact textual form.
    pub fn get_decimal<I: ColumnIndex>(&self, column: I) -> Result<Option<String>> {
        accessor::to_decimal(self.cell(column)?)
    }

    pub fn get_bytes<I: ColumnIndex>(&self, column: I) -> Result<Option<Bytes>> {
        accessor::to_bytes(self.cell(column)?)
    }

    pub fn get_blob<I: ColumnIndex>(&self, column: I) -> Result<Option<BlobHandle>> {
        accessor::to_blob(self.cell(column)?)
    }

    /// Blob contents as a reader.
    pub fn get_binary_stream<I: ColumnIndex>(
        &self,
        column: I,
    ) -> Result<Option<std::io::Cursor<Bytes>>> {
        Ok(self.get_blob(column)?.map(|blob| blob.binary_stream()))
    }

    pub fn get_timestamp<I: ColumnIndex>(&self, column: I) -> Result<Option<DateTime<Utc>>> {
        accessor::to_timestamp(self.cell(column)?)
    }

    pub fn get_date<I: ColumnIndex>(&self, column: I) -> Result<Option<NaiveDate>> {
        accessor::to_date(self.cell(column)?)
    }

    pub fn get_time<I: ColumnIndex>(&self, column: I) -> Result<Option<NaiveTime>> {
        accessor::to_time(self.cell(column)?)
    }

    pub fn get_uuid<I: ColumnIndex>(&self, column: I) -> Result<Option<Uuid>> {
        accessor::to_uuid(self.cell(column)?)
    }

    pub fn get_inet<I: ColumnIndex>(&self, column: I) -> Result<Option<IpAddr>> {
        accessor::to_inet(self.cell(column)?)
    }

    pub fn get_list<I: ColumnIndex>(&self, column: I) -> Result<Option<Vec<HostValue>>> {
        accessor::to_list(self.cell(column)?)
    }

    pub fn get_set<I: ColumnIndex>(&self, column: I) -> Result<Option<Vec<HostValue>>> {
        accessor::to_set(self.cell(column)?)
    }

    pub fn get_map<I: ColumnIndex>(&self, column: I) -> Result<Option<HostMap>> {
        accessor::to_map(self.cell(column)?)
    }

    /// Value in the column's default host representation.
    pub fn get_object<I: ColumnIndex>(&self, column: I) -> Result<HostValue> {
        Ok(accessor::to_host(self.cell(column)?))
    }
}

impl IntoIterator for Row {
    type Item = NativeValue;
    type IntoIter = std::vec::IntoIter<NativeValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a Row {
    type Item = &'a NativeValue;
    type IntoIter = std::slice::Iter<'a, NativeValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
