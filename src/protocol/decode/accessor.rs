//! Conversions from native cells to protocol accessor results.
//!
//! Every accessor returns `Ok(None)` for a NULL cell. Integer accessors widen
//! freely and narrow only when the value fits. Floating point cells read as
//! integers only when they have no fraction, and doubles read as floats round
//! to the nearest float but must stay within its range. Anything else that
//! cannot be represented is a `TypeConversion` error rather than a silent
//! truncation.

use bytes::Bytes;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use std::net::IpAddr;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::protocol::types::{BlobHandle, HostMap, HostValue, NativeValue};

use super::timestamp::{date_to_timestamp, normalize_timestamp, timestamp_from_millis};

fn mismatch(value: &NativeValue, target: &str) -> Error {
    Error::type_conversion(format!("Cannot read {} value as {}", value.kind(), target))
}

fn out_of_range(value: impl std::fmt::Display, target: &str) -> Error {
    Error::type_conversion(format!("Value {} out of range for {}", value, target))
}

/// Text rendering of any value.
pub fn to_string(value: &NativeValue) -> Option<String> {
    match value {
        NativeValue::Null => None,
        NativeValue::Text(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

pub fn to_bool(value: &NativeValue) -> Result<Option<bool>> {
    match value {
        NativeValue::Null => Ok(None),
        NativeValue::Boolean(b) => Ok(Some(*b)),
        NativeValue::Text(s) if s.eq_ignore_ascii_case("true") => Ok(Some(true)),
        NativeValue::Text(s) if s.eq_ignore_ascii_case("false") => Ok(Some(false)),
        other => match integral(other) {
            Some(n) => Ok(Some(n != 0)),
            None => Err(mismatch(other, "boolean")),
        },
    }
}

/// Exact integer value of a fixed-width integer cell.
fn integral(value: &NativeValue) -> Option<i64> {
    match value {
        NativeValue::TinyInt(n) => Some(i64::from(*n)),
        NativeValue::SmallInt(n) => Some(i64::from(*n)),
        NativeValue::Int(n) => Some(i64::from(*n)),
        NativeValue::BigInt(n) | NativeValue::Counter(n) => Some(*n),
        _ => None,
    }
}

pub fn to_i64(value: &NativeValue) -> Result<Option<i64>> {
    if value.is_null() {
        return Ok(None);
    }
    if let Some(n) = integral(value) {
        return Ok(Some(n));
    }
    let n = match value {
        NativeValue::Boolean(b) => i64::from(*b),
        NativeValue::Float(f) => float_to_i64(f64::from(*f))?,
        NativeValue::Double(f) => float_to_i64(*f)?,
        NativeValue::Text(s) | NativeValue::VarInt(s) | NativeValue::Decimal(s) => {
            parse_integral(s)?
        }
        NativeValue::Timestamp(ts) => ts.timestamp_millis(),
        other => return Err(mismatch(other, "long")),
    };
    Ok(Some(n))
}

/// Integral floats only; `i64::MAX as f64` rounds up to 2^63, hence `<`.
fn float_to_i64(f: f64) -> Result<i64> {
    if !(f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64) {
        return Err(out_of_range(f, "long"));
    }
    if f.fract() != 0.0 {
        return Err(Error::type_conversion(format!("Cannot read {} as long without truncation", f)));
    }
    Ok(f as i64)
}

fn parse_integral(s: &str) -> Result<i64> {
    let trimmed = s.trim();
    if let Ok(n) = trimmed.parse::<i64>() {
        return Ok(n);
    }
    // Decimal text with a zero fraction ("42.000") is still an integer.
    match trimmed.split_once('.') {
        Some((whole, frac)) if frac.chars().all(|c| c == '0') => whole
            .parse::<i64>()
            .map_err(|_| out_of_range(s, "long")),
        _ => Err(Error::type_conversion(format!("Cannot parse '{}' as long", s))),
    }
}

pub fn to_i32(value: &NativeValue) -> Result<Option<i32>> {
    narrow(value, "int")
}

pub fn to_i16(value: &NativeValue) -> Result<Option<i16>> {
    narrow(value, "short")
}

pub fn to_i8(value: &NativeValue) -> Result<Option<i8>> {
    narrow(value, "byte")
}

fn narrow<T: TryFrom<i64>>(value: &NativeValue, target: &str) -> Result<Option<T>> {
    match to_i64(value)? {
        None => Ok(None),
        Some(n) => T::try_from(n).map(Some).map_err(|_| out_of_range(n, target)),
    }
}

pub fn to_f64(value: &NativeValue) -> Result<Option<f64>> {
    if value.is_null() {
        return Ok(None);
    }
    if let Some(n) = integral(value) {
        return Ok(Some(n as f64));
    }
    let f = match value {
        NativeValue::Float(f) => f64::from(*f),
        NativeValue::Double(f) => *f,
        NativeValue::Text(s) | NativeValue::Decimal(s) | NativeValue::VarInt(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| Error::type_conversion(format!("Cannot parse '{}' as double", s)))?,
        other => return Err(mismatch(other, "double")),
    };
    Ok(Some(f))
}

/// Doubles narrow with rounding; finite values beyond the float range are errors.
pub fn to_f32(value: &NativeValue) -> Result<Option<f32>> {
    if let NativeValue::Float(f) = value {
        return Ok(Some(*f));
    }
    match to_f64(value)? {
        None => Ok(None),
        Some(f) if f.is_finite() && f.abs() > f64::from(f32::MAX) => Err(out_of_range(f, "float")),
        Some(f) => Ok(Some(f as f32)),
    }
}

/// Decimal text for numeric cells.
pub fn to_decimal(value: &NativeValue) -> Result<Option<String>> {
    match value {
        NativeValue::Null => Ok(None),
        NativeValue::Decimal(s) | NativeValue::VarInt(s) => Ok(Some(s.clone())),
        NativeValue::Float(_) | NativeValue::Double(_) => Ok(to_string(value)),
        NativeValue::Text(s) => s
            .trim()
            .parse::<f64>()
            .map(|_| Some(s.trim().to_string()))
            .map_err(|_| Error::type_conversion(format!("Cannot parse '{}' as decimal", s))),
        other => match integral(other) {
            Some(n) => Ok(Some(n.to_string())),
            None => Err(mismatch(other, "decimal")),
        },
    }
}

pub fn to_bytes(value: &NativeValue) -> Result<Option<Bytes>> {
    match value {
        NativeValue::Null => Ok(None),
        NativeValue::Blob(b) | NativeValue::Custom(b) => Ok(Some(b.clone())),
        NativeValue::Text(s) => Ok(Some(Bytes::copy_from_slice(s.as_bytes()))),
        other => Err(mismatch(other, "bytes")),
    }
}

pub fn to_blob(value: &NativeValue) -> Result<Option<BlobHandle>> {
    match value {
        NativeValue::Null => Ok(None),
        NativeValue::Blob(b) | NativeValue::Custom(b) => Ok(Some(BlobHandle::new(b.clone()))),
        other => Err(mismatch(other, "blob")),
    }
}

/// Any temporal cell as a normalized instant.
pub fn to_timestamp(value: &NativeValue) -> Result<Option<DateTime<Utc>>> {
    match value {
        NativeValue::Null => Ok(None),
        NativeValue::Timestamp(ts) => Ok(Some(normalize_timestamp(*ts))),
        NativeValue::Date(d) => Ok(Some(date_to_timestamp(*d))),
        NativeValue::BigInt(ms) | NativeValue::Counter(ms) => timestamp_from_millis(*ms).map(Some),
        other => Err(mismatch(other, "timestamp")),
    }
}

pub fn to_date(value: &NativeValue) -> Result<Option<NaiveDate>> {
    match value {
        NativeValue::Date(d) => Ok(Some(*d)),
        other => Ok(to_timestamp(other)?.map(|ts| ts.date_naive())),
    }
}

pub fn to_time(value: &NativeValue) -> Result<Option<NaiveTime>> {
    match value {
        NativeValue::Null => Ok(None),
        NativeValue::Time(t) => Ok(Some(*t)),
        NativeValue::Timestamp(ts) => Ok(Some(normalize_timestamp(*ts).time())),
        other => Err(mismatch(other, "time")),
    }
}

pub fn to_uuid(value: &NativeValue) -> Result<Option<Uuid>> {
    match value {
        NativeValue::Null => Ok(None),
        NativeValue::Uuid(u) | NativeValue::TimeUuid(u) => Ok(Some(*u)),
        NativeValue::Text(s) => Uuid::parse_str(s.trim())
            .map(Some)
            .map_err(|_| Error::type_conversion(format!("Cannot parse '{}' as uuid", s))),
        other => Err(mismatch(other, "uuid")),
    }
}

pub fn to_inet(value: &NativeValue) -> Result<Option<IpAddr>> {
    match value {
        NativeValue::Null => Ok(None),
        NativeValue::Inet(addr) => Ok(Some(*addr)),
        other => Err(mismatch(other, "inet")),
    }
}

/// Ordered host container for list, set and tuple cells.
pub fn to_list(value: &NativeValue) -> Result<Option<Vec<HostValue>>> {
    match value {
        NativeValue::Null => Ok(None),
        NativeValue::List(items) | NativeValue::Set(items) | NativeValue::Tuple(items) => {
            Ok(Some(items.iter().map(to_host).collect()))
        }
        other => Err(mismatch(other, "list")),
    }
}

/// Set cells as a host container; duplicates cannot occur in stored sets.
pub fn to_set(value: &NativeValue) -> Result<Option<Vec<HostValue>>> {
    match value {
        NativeValue::Null => Ok(None),
        NativeValue::Set(items) | NativeValue::List(items) => {
            let mut out: Vec<HostValue> = Vec::with_capacity(items.len());
            for item in items.iter().map(to_host) {
                if !out.contains(&item) {
                    out.push(item);
                }
            }
            Ok(Some(out))
        }
        other => Err(mismatch(other, "set")),
    }
}

pub fn to_map(value: &NativeValue) -> Result<Option<HostMap>> {
    match value {
        NativeValue::Null => Ok(None),
        NativeValue::Map(entries) => Ok(Some(
            entries.iter().map(|(k, v)| (to_host(k), to_host(v))).collect(),
        )),
        other => Err(mismatch(other, "map")),
    }
}

/// Default host representation of a cell.
pub fn to_host(value: &NativeValue) -> HostValue {
    match value {
        NativeValue::Null => HostValue::Null,
        NativeValue::Text(s) => HostValue::Text(s.clone()),
        NativeValue::TinyInt(n) => HostValue::Byte(*n),
        NativeValue::SmallInt(n) => HostValue::Short(*n),
        NativeValue::Int(n) => HostValue::Int(*n),
        NativeValue::BigInt(n) | NativeValue::Counter(n) => HostValue::Long(*n),
        NativeValue::Float(f) => HostValue::Float(*f),
        NativeValue::Double(f) => HostValue::Double(*f),
        NativeValue::Decimal(s) => HostValue::Decimal(s.clone()),
        NativeValue::VarInt(s) => HostValue::BigInteger(s.clone()),
        NativeValue::Boolean(b) => HostValue::Boolean(*b),
        NativeValue::Blob(b) | NativeValue::Custom(b) => HostValue::Bytes(b.clone()),
        NativeValue::Inet(addr) => HostValue::Inet(*addr),
        NativeValue::Uuid(u) | NativeValue::TimeUuid(u) => HostValue::Uuid(*u),
        NativeValue::Timestamp(ts) => HostValue::Timestamp(normalize_timestamp(*ts)),
        NativeValue::Date(d) => HostValue::Timestamp(date_to_timestamp(*d)),
        NativeValue::Time(t) => HostValue::Time(*t),
        NativeValue::List(items) | NativeValue::Tuple(items) => {
            HostValue::List(items.iter().map(to_host).collect())
        }
        NativeValue::Set(items) => HostValue::Set(items.iter().map(to_host).collect()),
        NativeValue::Map(entries) => HostValue::Map(
            entries.iter().map(|(k, v)| (to_host(k), to_host(v))).collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_integer_widening_and_narrowing() {
        let small = NativeValue::Int(2000);
        assert_eq!(to_i32(&small).unwrap(), Some(2000));
        assert_eq!(to_i64(&small).unwrap(), Some(2000));
        assert_eq!(to_f64(&small).unwrap(), Some(2000.0));
        assert!(to_i8(&small).is_err());

        let big = NativeValue::BigInt(i64::from(i32::MAX) + 1);
        assert!(to_i32(&big).is_err());
        assert_eq!(to_i64(&big).unwrap(), Some(i64::from(i32::MAX) + 1));
    }

    #[test]
    fn test_null_is_none_everywhere() {
        let null = NativeValue::Null;
        assert_eq!(to_string(&null), None);
        assert_eq!(to_bool(&null).unwrap(), None);
        assert_eq!(to_i32(&null).unwrap(), None);
        assert_eq!(to_f64(&null).unwrap(), None);
        assert_eq!(to_bytes(&null).unwrap(), None);
        assert_eq!(to_timestamp(&null).unwrap(), None);
        assert_eq!(to_list(&null).unwrap(), None);
        assert_eq!(to_host(&null), HostValue::Null);
    }

    #[test]
    fn test_bool_from_integer_and_text() {
        assert_eq!(to_bool(&NativeValue::Int(0)).unwrap(), Some(false));
        assert_eq!(to_bool(&NativeValue::TinyInt(3)).unwrap(), Some(true));
        assert_eq!(to_bool(&NativeValue::Text("TRUE".into())).unwrap(), Some(true));
        assert!(to_bool(&NativeValue::Double(1.0)).is_err());
    }

    #[test]
    fn test_decimal_text_to_long() {
        assert_eq!(to_i64(&NativeValue::Decimal("42.000".into())).unwrap(), Some(42));
        assert!(to_i64(&NativeValue::Decimal("42.5".into())).is_err());
    }

    #[test]
    fn test_float_to_long_rejects_fractions() {
        assert_eq!(to_i64(&NativeValue::Double(42.0)).unwrap(), Some(42));
        assert_eq!(to_i32(&NativeValue::Float(-7.0)).unwrap(), Some(-7));
        assert!(to_i64(&NativeValue::Double(42.5)).is_err());
        assert!(to_i64(&NativeValue::Double(f64::NAN)).is_err());
        assert!(to_i64(&NativeValue::Double(9.3e18)).is_err());
    }

    #[test]
    fn test_double_to_float_range() {
        assert_eq!(to_f32(&NativeValue::Double(1.5)).unwrap(), Some(1.5));
        assert_eq!(to_f32(&NativeValue::Int(3)).unwrap(), Some(3.0));
        assert!(to_f32(&NativeValue::Double(1e300)).is_err());
        assert!(to_f32(&NativeValue::Double(-1e300)).is_err());
        assert_eq!(
            to_f32(&NativeValue::Double(f64::INFINITY)).unwrap(),
            Some(f32::INFINITY)
        );
        assert_eq!(to_f32(&NativeValue::Null).unwrap(), None);
    }

    #[test]
    fn test_date_and_timestamp_normalize_to_same_instant() {
        let date = NaiveDate::from_ymd_opt(2015, 6, 1).unwrap();
        let midnight = Utc.with_ymd_and_hms(2015, 6, 1, 0, 0, 0).unwrap();
        assert_eq!(to_timestamp(&NativeValue::Date(date)).unwrap(), Some(midnight));
        assert_eq!(to_timestamp(&NativeValue::Timestamp(midnight)).unwrap(), Some(midnight));
        assert_eq!(to_date(&NativeValue::Timestamp(midnight)).unwrap(), Some(date));
    }

    #[test]
    fn test_blob_as_bytes_and_handle() {
        let blob = NativeValue::Blob(Bytes::from_static(b"\x00\x01\x02"));
        assert_eq!(to_bytes(&blob).unwrap().unwrap().len(), 3);
        let handle = to_blob(&blob).unwrap().unwrap();
        assert_eq!(handle.length(), 3);
        assert!(to_blob(&NativeValue::Int(1)).is_err());
    }

    #[test]
    fn test_collections_become_host_containers() {
        let list = NativeValue::List(vec![NativeValue::Int(1), NativeValue::Int(2)]);
        assert_eq!(
            to_list(&list).unwrap(),
            Some(vec![HostValue::Int(1), HostValue::Int(2)])
        );

        let map = NativeValue::Map(vec![(
            NativeValue::Text("k".into()),
            NativeValue::Set(vec![NativeValue::BigInt(9)]),
        )]);
        let host = to_map(&map).unwrap().unwrap();
        assert_eq!(
            host.get(&HostValue::from("k")),
            Some(&HostValue::Set(vec![HostValue::Long(9)]))
        );
        assert!(to_map(&list).is_err());
    }
}
