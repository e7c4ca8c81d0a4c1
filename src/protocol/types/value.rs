//! Native cell values as decoded by the store client.

use base64::Engine;
use bytes::Bytes;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use std::fmt;
use std::net::IpAddr;
use uuid::Uuid;

/// Native value enum representing a single cell or bound parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeValue {
    /// No value.
    Null,
    /// Text value (`text`, `varchar`, `ascii`).
    Text(String),
    /// 8-bit integer (`tinyint`).
    TinyInt(i8),
    /// 16-bit integer (`smallint`).
    SmallInt(i16),
    /// 32-bit integer (`int`).
    Int(i32),
    /// 64-bit integer (`bigint`).
    BigInt(i64),
    /// Counter column value.
    Counter(i64),
    /// Single-precision float.
    Float(f32),
    /// Double-precision float.
    Double(f64),
    /// Arbitrary-precision decimal kept in its textual form.
    Decimal(String),
    /// Arbitrary-precision integer kept in its textual form.
    VarInt(String),
    /// Boolean.
    Boolean(bool),
    /// Raw bytes (`blob`).
    Blob(Bytes),
    /// Network address (`inet`).
    Inet(IpAddr),
    /// Random or name-based UUID.
    Uuid(Uuid),
    /// Time-based UUID.
    TimeUuid(Uuid),
    /// Millisecond-precision instant.
    Timestamp(DateTime<Utc>),
    /// Calendar date without time.
    Date(NaiveDate),
    /// Time of day.
    Time(NaiveTime),
    /// Ordered list.
    List(Vec<NativeValue>),
    /// Set, in the order the store returned it.
    Set(Vec<NativeValue>),
    /// Map entries, in the order the store returned them.
    Map(Vec<(NativeValue, NativeValue)>),
    /// Tuple fields.
    Tuple(Vec<NativeValue>),
    /// Serialized value of a type the bridge does not decode.
    Custom(Bytes),
}

impl NativeValue {
    /// Check if the value is NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, NativeValue::Null)
    }

    /// Try to get the value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            NativeValue::Text(s) | NativeValue::Decimal(s) | NativeValue::VarInt(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the value as raw bytes.
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            NativeValue::Blob(b) | NativeValue::Custom(b) => Some(b),
            _ => None,
        }
    }

    /// Short category name used in conversion errors.
    pub fn kind(&self) -> &'static str {
        match self {
            NativeValue::Null => "null",
            NativeValue::Text(_) => "text",
            NativeValue::TinyInt(_) => "tinyint",
            NativeValue::SmallInt(_) => "smallint",
            NativeValue::Int(_) => "int",
            NativeValue::BigInt(_) => "bigint",
            NativeValue::Counter(_) => "counter",
            NativeValue::Float(_) => "float",
            NativeValue::Double(_) => "double",
            NativeValue::Decimal(_) => "decimal",
            NativeValue::VarInt(_) => "varint",
            NativeValue::Boolean(_) => "boolean",
            NativeValue::Blob(_) => "blob",
            NativeValue::Inet(_) => "inet",
            NativeValue::Uuid(_) => "uuid",
            NativeValue::TimeUuid(_) => "timeuuid",
            NativeValue::Timestamp(_) => "timestamp",
            NativeValue::Date(_) => "date",
            NativeValue::Time(_) => "time",
            NativeValue::List(_) => "list",
            NativeValue::Set(_) => "set",
            NativeValue::Map(_) => "map",
            NativeValue::Tuple(_) => "tuple",
            NativeValue::Custom(_) => "custom",
        }
    }
}

impl fmt::Display for NativeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NativeValue::Null => write!(f, "NULL"),
            NativeValue::Text(s) | NativeValue::Decimal(s) | NativeValue::VarInt(s) => {
                write!(f, "{}", s)
            }
            NativeValue::TinyInt(n) => write!(f, "{}", n),
            NativeValue::SmallInt(n) => write!(f, "{}", n),
            NativeValue::Int(n) => write!(f, "{}", n),
            NativeValue::BigInt(n) | NativeValue::Counter(n) => write!(f, "{}", n),
            NativeValue::Float(n) => write!(f, "{}", n),
            NativeValue::Double(n) => write!(f, "{}", n),
            NativeValue::Boolean(b) => write!(f, "{}", b),
            NativeValue::Blob(b) | NativeValue::Custom(b) => {
                write!(f, "{}", base64::engine::general_purpose::STANDARD.encode(b))
            }
            NativeValue::Inet(addr) => write!(f, "{}", addr),
            NativeValue::Uuid(u) | NativeValue::TimeUuid(u) => write!(f, "{}", u),
            NativeValue::Timestamp(ts) => write!(f, "{}", ts.format("%Y-%m-%d %H:%M:%S%.3f%z")),
            NativeValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            NativeValue::Time(t) => write!(f, "{}", t.format("%H:%M:%S%.f")),
            NativeValue::List(items) | NativeValue::Tuple(items) => {
                write_joined(f, "[", items.iter(), "]")
            }
            NativeValue::Set(items) => write_joined(f, "{", items.iter(), "}"),
            NativeValue::Map(entries) => {
                write!(f, "{{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", k, v)?;
                }
                write!(f, "}}")
            }
        }
    }
}

fn write_joined<'a>(
    f: &mut fmt::Formatter<'_>,
    open: &str,
    items: impl Iterator<Item = &'a NativeValue>,
    close: &str,
) -> fmt::Result {
    f.write_str(open)?;
    for (i, item) in items.enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    f.write_str(close)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_value_null() {
        let val = NativeValue::Null;
        assert!(val.is_null());
        assert_eq!(val.as_str(), None);
        assert_eq!(format!("{}", val), "NULL");
    }

    #[test]
    fn test_native_value_text() {
        let val = NativeValue::Text("hello".to_string());
        assert!(!val.is_null());
        assert_eq!(val.as_str(), Some("hello"));
        assert_eq!(val.kind(), "text");
    }

    #[test]
    fn test_display_collections_and_blob() {
        let set = NativeValue::Set(vec![NativeValue::Int(10), NativeValue::Int(20)]);
        assert_eq!(set.to_string(), "{10, 20}");

        let map = NativeValue::Map(vec![(
            NativeValue::Text("a".to_string()),
            NativeValue::BigInt(1),
        )]);
        assert_eq!(map.to_string(), "{a: 1}");

        let blob = NativeValue::Blob(Bytes::from_static(b"hi"));
        assert_eq!(blob.to_string(), "aGk=");
    }
}
