//! Host-side values handed to the binder and returned by generic accessors.
//!
//! The set of categories is closed. The binder classifies a value by its
//! variant; nothing is inspected beyond the tag.

use bytes::Bytes;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use std::net::IpAddr;
use uuid::Uuid;

/// A host value of any supported category.
#[derive(Debug, Clone, PartialEq)]
pub enum HostValue {
    Null,
    Set(Vec<HostValue>),
    Map(HostMap),
    Bytes(Bytes),
    Inet(IpAddr),
    List(Vec<HostValue>),
    Timestamp(DateTime<Utc>),
    /// Date without a time component.
    Date(NaiveDate),
    Text(String),
    Int(i32),
    Long(i64),
    Boolean(bool),
    Double(f64),
    Byte(i8),
    Short(i16),
    Float(f32),
    Decimal(String),
    BigInteger(String),
    Uuid(Uuid),
    Time(NaiveTime),
}

impl HostValue {
    /// Category name reported in binding errors.
    pub fn category(&self) -> &'static str {
        match self {
            HostValue::Null => "null",
            HostValue::Set(_) => "set",
            HostValue::Map(_) => "map",
            HostValue::Bytes(_) => "bytes",
            HostValue::Inet(_) => "inet",
            HostValue::List(_) => "list",
            HostValue::Timestamp(_) => "timestamp",
            HostValue::Date(_) => "date",
            HostValue::Text(_) => "text",
            HostValue::Int(_) => "int",
            HostValue::Long(_) => "long",
            HostValue::Boolean(_) => "boolean",
            HostValue::Double(_) => "double",
            HostValue::Byte(_) => "byte",
            HostValue::Short(_) => "short",
            HostValue::Float(_) => "float",
            HostValue::Decimal(_) => "decimal",
            HostValue::BigInteger(_) => "biginteger",
            HostValue::Uuid(_) => "uuid",
            HostValue::Time(_) => "time",
        }
    }

    /// Check if the value is NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, HostValue::Null)
    }
}

/// Keyed container preserving the store's entry order.
///
/// Keys are compared with `==`, so lookups work for every key category,
/// including floating point keys that cannot live in a hashed map.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HostMap {
    entries: Vec<(HostValue, HostValue)>,
}

impl HostMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the value for `key`.
    pub fn insert(&mut self, key: HostValue, value: HostValue) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Look up a value by key.
    pub fn get(&self, key: &HostValue) -> Option<&HostValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in order.
    pub fn iter(&self) -> impl Iterator<Item = &(HostValue, HostValue)> {
        self.entries.iter()
    }
}

impl FromIterator<(HostValue, HostValue)> for HostMap {
    fn from_iter<T: IntoIterator<Item = (HostValue, HostValue)>>(iter: T) -> Self {
        let mut map = HostMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl IntoIterator for HostMap {
    type Item = (HostValue, HostValue);
    type IntoIter = std::vec::IntoIter<(HostValue, HostValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

macro_rules! host_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for HostValue {
                fn from(value: $ty) -> Self {
                    HostValue::$variant(value)
                }
            }
        )*
    };
}

host_from! {
    String => Text,
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    bool => Boolean,
    Bytes => Bytes,
    IpAddr => Inet,
    DateTime<Utc> => Timestamp,
    NaiveDate => Date,
    NaiveTime => Time,
    Uuid => Uuid,
    HostMap => Map,
}

impl From<&str> for HostValue {
    fn from(value: &str) -> Self {
        HostValue::Text(value.to_string())
    }
}

impl From<Vec<u8>> for HostValue {
    fn from(value: Vec<u8>) -> Self {
        HostValue::Bytes(Bytes::from(value))
    }
}

impl<T: Into<HostValue>> From<Option<T>> for HostValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(HostValue::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_map_insert_and_get() {
        let mut map = HostMap::new();
        map.insert("a".into(), 1i32.into());
        map.insert("b".into(), 2i32.into());
        map.insert("a".into(), 3i32.into());

        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&"a".into()), Some(&HostValue::Int(3)));
        assert_eq!(map.get(&"missing".into()), None);
    }

    #[test]
    fn test_from_conversions() {
        assert_eq!(HostValue::from(7i64), HostValue::Long(7));
        assert_eq!(HostValue::from(vec![1u8, 2]), HostValue::Bytes(Bytes::from_static(&[1, 2])));
        assert_eq!(HostValue::from(None::<i32>), HostValue::Null);
        assert_eq!(HostValue::from(1.5f32).category(), "float");
    }
}
