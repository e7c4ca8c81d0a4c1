//! Parameter binding.
//!
//! Host values are classified by an ordered list of guards and the first
//! matching category selects the native bind path. Categories are disjoint
//! over [`HostValue`] variants, so the order only matters for readers
//! comparing against the protocol's documented precedence.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::net::IpAddr;
use tracing::trace;

use crate::error::{Error, Result};
use crate::protocol::decode::{date_to_timestamp, normalize_timestamp};
use crate::protocol::types::{HostMap, HostValue, NativeValue};

/// Bind category selected for a host value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindCategory {
    Set,
    Map,
    Bytes,
    Inet,
    List,
    /// Timestamps and dates; both bind as the native timestamp.
    Timestamp,
    Text,
    Int,
    Long,
    Boolean,
    Double,
}

fn is_set(v: &HostValue) -> bool {
    matches!(v, HostValue::Set(_))
}

fn is_map(v: &HostValue) -> bool {
    matches!(v, HostValue::Map(_))
}

fn is_bytes(v: &HostValue) -> bool {
    matches!(v, HostValue::Bytes(_))
}

fn is_inet(v: &HostValue) -> bool {
    matches!(v, HostValue::Inet(_))
}

fn is_list(v: &HostValue) -> bool {
    matches!(v, HostValue::List(_))
}

fn is_temporal(v: &HostValue) -> bool {
    matches!(v, HostValue::Timestamp(_) | HostValue::Date(_))
}

fn is_text(v: &HostValue) -> bool {
    matches!(v, HostValue::Text(_))
}

fn is_int(v: &HostValue) -> bool {
    matches!(v, HostValue::Int(_))
}

fn is_long(v: &HostValue) -> bool {
    matches!(v, HostValue::Long(_))
}

fn is_boolean(v: &HostValue) -> bool {
    matches!(v, HostValue::Boolean(_))
}

fn is_double(v: &HostValue) -> bool {
    matches!(v, HostValue::Double(_))
}

/// Guards in dispatch order.
static DISPATCH_ORDER: [(BindCategory, fn(&HostValue) -> bool); 11] = [
    (BindCategory::Set, is_set),
    (BindCategory::Map, is_map),
    (BindCategory::Bytes, is_bytes),
    (BindCategory::Inet, is_inet),
    (BindCategory::List, is_list),
    (BindCategory::Timestamp, is_temporal),
    (BindCategory::Text, is_text),
    (BindCategory::Int, is_int),
    (BindCategory::Long, is_long),
    (BindCategory::Boolean, is_boolean),
    (BindCategory::Double, is_double),
];

/// Classify a host value; the first matching guard wins.
///
/// # Errors
/// Returns `Error::UnsupportedBindType` naming the value's category when no
/// guard matches.
pub fn classify(value: &HostValue) -> Result<BindCategory> {
    DISPATCH_ORDER
        .iter()
        .find(|(_, guard)| guard(value))
        .map(|(category, _)| *category)
        .ok_or(Error::UnsupportedBindType {
            category: value.category(),
        })
}

/// A bound parameter cell.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundValue {
    /// Explicit "no value" marker.
    Null,
    /// A native value.
    Value(NativeValue),
}

/// Per-statement parameter bindings, indexed by 0-based native position.
///
/// Owned by exactly one statement. Resetting parameters replaces the whole
/// structure; cells are never cleared one by one.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundParameters {
    slots: Vec<Option<BoundValue>>,
}

impl BoundParameters {
    /// Allocate an empty binding structure for `count` variables.
    pub fn new(count: usize) -> Self {
        Self {
            slots: vec![None; count],
        }
    }

    /// Number of bind variables.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if the statement has no bind variables.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Binding at a 0-based position, `None` if never bound.
    pub fn get(&self, index: usize) -> Option<&BoundValue> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Number of positions that have been bound.
    pub fn bound_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Iterate over all positions in order.
    pub fn iter(&self) -> impl Iterator<Item = Option<&BoundValue>> {
        self.slots.iter().map(Option::as_ref)
    }

    fn put(&mut self, index: usize, value: BoundValue) -> Result<()> {
        let count = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(Error::ParameterIndexOutOfBounds {
                index: index + 1,
                count,
            })?;
        *slot = Some(value);
        Ok(())
    }

    pub fn set_set(&mut self, index: usize, items: Vec<NativeValue>) -> Result<()> {
        self.put(index, BoundValue::Value(NativeValue::Set(items)))
    }

    pub fn set_map(&mut self, index: usize, entries: Vec<(NativeValue, NativeValue)>) -> Result<()> {
        self.put(index, BoundValue::Value(NativeValue::Map(entries)))
    }

    pub fn set_bytes(&mut self, index: usize, bytes: Bytes) -> Result<()> {
        self.put(index, BoundValue::Value(NativeValue::Blob(bytes)))
    }

    pub fn set_inet(&mut self, index: usize, addr: IpAddr) -> Result<()> {
        self.put(index, BoundValue::Value(NativeValue::Inet(addr)))
    }

    pub fn set_list(&mut self, index: usize, items: Vec<NativeValue>) -> Result<()> {
        self.put(index, BoundValue::Value(NativeValue::List(items)))
    }

    pub fn set_timestamp(&mut self, index: usize, ts: DateTime<Utc>) -> Result<()> {
        let ts = normalize_timestamp(ts);
        self.put(index, BoundValue::Value(NativeValue::Timestamp(ts)))
    }

    pub fn set_string(&mut self, index: usize, value: String) -> Result<()> {
        self.put(index, BoundValue::Value(NativeValue::Text(value)))
    }

    pub fn set_int(&mut self, index: usize, value: i32) -> Result<()> {
        self.put(index, BoundValue::Value(NativeValue::Int(value)))
    }

    pub fn set_long(&mut self, index: usize, value: i64) -> Result<()> {
        self.put(index, BoundValue::Value(NativeValue::BigInt(value)))
    }

    pub fn set_bool(&mut self, index: usize, value: bool) -> Result<()> {
        self.put(index, BoundValue::Value(NativeValue::Boolean(value)))
    }

    pub fn set_double(&mut self, index: usize, value: f64) -> Result<()> {
        self.put(index, BoundValue::Value(NativeValue::Double(value)))
    }

    pub fn set_float(&mut self, index: usize, value: f32) -> Result<()> {
        self.put(index, BoundValue::Value(NativeValue::Float(value)))
    }

    pub fn set_decimal(&mut self, index: usize, value: String) -> Result<()> {
        self.put(index, BoundValue::Value(NativeValue::Decimal(value)))
    }

    pub fn set_to_null(&mut self, index: usize) -> Result<()> {
        self.put(index, BoundValue::Null)
    }
}

/// Convert a 1-based protocol parameter index to the native position.
pub fn native_index(index: usize, count: usize) -> Result<usize> {
    if index == 0 || index > count {
        return Err(Error::ParameterIndexOutOfBounds { index, count });
    }
    Ok(index - 1)
}

/// Bind `value` at 1-based `index`, dispatching on its runtime category.
///
/// A null host value stores the null marker.
pub fn bind_object(
    params: &mut BoundParameters,
    index: usize,
    value: &HostValue,
) -> Result<Option<BindCategory>> {
    let pos = native_index(index, params.len())?;
    if value.is_null() {
        trace!(index, "binding null object");
        params.set_to_null(pos)?;
        return Ok(None);
    }

    let category = classify(value)?;
    trace!(index, ?category, "binding object");
    match (category, value) {
        (BindCategory::Set, HostValue::Set(items)) => params.set_set(pos, to_native_all(items)),
        (BindCategory::Map, HostValue::Map(map)) => params.set_map(pos, to_native_entries(map)),
        (BindCategory::Bytes, HostValue::Bytes(bytes)) => params.set_bytes(pos, bytes.clone()),
        (BindCategory::Inet, HostValue::Inet(addr)) => params.set_inet(pos, *addr),
        (BindCategory::List, HostValue::List(items)) => params.set_list(pos, to_native_all(items)),
        (BindCategory::Timestamp, HostValue::Timestamp(ts)) => params.set_timestamp(pos, *ts),
        (BindCategory::Timestamp, HostValue::Date(date)) => {
            params.set_timestamp(pos, date_to_timestamp(*date))
        }
        (BindCategory::Text, HostValue::Text(s)) => params.set_string(pos, s.clone()),
        (BindCategory::Int, HostValue::Int(n)) => params.set_int(pos, *n),
        (BindCategory::Long, HostValue::Long(n)) => params.set_long(pos, *n),
        (BindCategory::Boolean, HostValue::Boolean(b)) => params.set_bool(pos, *b),
        (BindCategory::Double, HostValue::Double(f)) => params.set_double(pos, *f),
        _ => Err(Error::UnsupportedBindType {
            category: value.category(),
        }),
    }?;
    Ok(Some(category))
}

/// Convert a collection element to its native form.
///
/// Elements are not limited to the top-level bind categories: every host
/// value has a native counterpart the store accepts inside a collection.
fn to_native(value: &HostValue) -> NativeValue {
    match value {
        HostValue::Null => NativeValue::Null,
        HostValue::Set(items) => NativeValue::Set(to_native_all(items)),
        HostValue::Map(map) => NativeValue::Map(to_native_entries(map)),
        HostValue::Bytes(b) => NativeValue::Blob(b.clone()),
        HostValue::Inet(addr) => NativeValue::Inet(*addr),
        HostValue::List(items) => NativeValue::List(to_native_all(items)),
        HostValue::Timestamp(ts) => NativeValue::Timestamp(normalize_timestamp(*ts)),
        HostValue::Date(d) => NativeValue::Timestamp(date_to_timestamp(*d)),
        HostValue::Text(s) => NativeValue::Text(s.clone()),
        HostValue::Int(n) => NativeValue::Int(*n),
        HostValue::Long(n) => NativeValue::BigInt(*n),
        HostValue::Boolean(b) => NativeValue::Boolean(*b),
        HostValue::Double(f) => NativeValue::Double(*f),
        HostValue::Byte(n) => NativeValue::TinyInt(*n),
        HostValue::Short(n) => NativeValue::SmallInt(*n),
        HostValue::Float(f) => NativeValue::Float(*f),
        HostValue::Decimal(d) => NativeValue::Decimal(d.clone()),
        HostValue::BigInteger(n) => NativeValue::VarInt(n.clone()),
        HostValue::Uuid(u) => NativeValue::Uuid(*u),
        HostValue::Time(t) => NativeValue::Time(*t),
    }
}

fn to_native_all(items: &[HostValue]) -> Vec<NativeValue> {
    items.iter().map(to_native).collect()
}

fn to_native_entries(map: &HostMap) -> Vec<(NativeValue, NativeValue)> {
    map.iter().map(|(k, v)| (to_native(k), to_native(v))).collect()
}
