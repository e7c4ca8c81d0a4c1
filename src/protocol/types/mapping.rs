//! Static native-type ↔ protocol-type table.
//!
//! The table is built once per process and never mutated. Lookups are total:
//! any native type without an entry resolves to the OTHER mapping.

use std::collections::HashMap;
use std::sync::OnceLock;

use super::native_type::NativeType;
use super::type_code::{HostClass, TypeCode};

/// Unbounded size reported for variable-length types.
const UNBOUNDED: i32 = i32::MAX;

/// One row of the type table.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeMapping {
    /// Native base type name (`int`, `list`, ...), or `other` for the fallback.
    pub native_type_id: &'static str,
    /// Protocol type code.
    pub type_code: TypeCode,
    /// Default host representation.
    pub host_class: HostClass,
    /// Maximum display width in characters.
    pub display_size: i32,
    /// Numeric precision or maximum length.
    pub precision: i32,
    /// Whether comparisons on this type are case sensitive.
    pub case_sensitive: bool,
}

const fn entry(
    native_type_id: &'static str,
    type_code: TypeCode,
    host_class: HostClass,
    display_size: i32,
    precision: i32,
    case_sensitive: bool,
) -> TypeMapping {
    TypeMapping {
        native_type_id,
        type_code,
        host_class,
        display_size,
        precision,
        case_sensitive,
    }
}

const ENTRIES: &[TypeMapping] = &[
    entry("ascii", TypeCode::VarChar, HostClass::String, UNBOUNDED, UNBOUNDED, true),
    entry("bigint", TypeCode::BigInt, HostClass::Long, 20, 19, false),
    entry("blob", TypeCode::Binary, HostClass::Bytes, UNBOUNDED, UNBOUNDED, false),
    entry("boolean", TypeCode::Boolean, HostClass::Boolean, 5, 0, false),
    entry("counter", TypeCode::BigInt, HostClass::Long, 20, 19, false),
    entry("date", TypeCode::Date, HostClass::Timestamp, 10, 10, false),
    entry("decimal", TypeCode::Decimal, HostClass::BigDecimal, UNBOUNDED, 0, false),
    entry("double", TypeCode::Double, HostClass::Double, 24, 15, false),
    entry("duration", TypeCode::Other, HostClass::Object, UNBOUNDED, 0, false),
    entry("float", TypeCode::Float, HostClass::Float, 14, 7, false),
    entry("inet", TypeCode::Other, HostClass::InetAddress, 39, 39, false),
    entry("int", TypeCode::Integer, HostClass::Integer, 11, 10, false),
    entry("smallint", TypeCode::SmallInt, HostClass::Short, 6, 5, false),
    entry("text", TypeCode::VarChar, HostClass::String, UNBOUNDED, UNBOUNDED, true),
    entry("time", TypeCode::Time, HostClass::Time, 18, 18, false),
    entry("timestamp", TypeCode::Timestamp, HostClass::Timestamp, 31, 31, false),
    entry("timeuuid", TypeCode::Other, HostClass::Uuid, 36, 36, false),
    entry("tinyint", TypeCode::TinyInt, HostClass::Byte, 4, 3, false),
    entry("uuid", TypeCode::Other, HostClass::Uuid, 36, 36, false),
    entry("varchar", TypeCode::VarChar, HostClass::String, UNBOUNDED, UNBOUNDED, true),
    entry("varint", TypeCode::Numeric, HostClass::BigInteger, UNBOUNDED, 0, false),
    entry("list", TypeCode::Array, HostClass::List, UNBOUNDED, 0, false),
    entry("set", TypeCode::Array, HostClass::Set, UNBOUNDED, 0, false),
    entry("map", TypeCode::JavaObject, HostClass::Map, UNBOUNDED, 0, false),
    entry("tuple", TypeCode::Struct, HostClass::Object, UNBOUNDED, 0, false),
];

static OTHER: TypeMapping = entry("other", TypeCode::Other, HostClass::Object, UNBOUNDED, 0, false);

static TYPE_TABLE: OnceLock<HashMap<&'static str, TypeMapping>> = OnceLock::new();

fn table() -> &'static HashMap<&'static str, TypeMapping> {
    TYPE_TABLE.get_or_init(|| {
        ENTRIES
            .iter()
            .map(|mapping| (mapping.native_type_id, mapping.clone()))
            .collect()
    })
}

/// Full mapping row for a native type; unknown types get the OTHER row.
pub fn mapping_for(native: &NativeType) -> &'static TypeMapping {
    if let NativeType::Custom(_) = native {
        return &OTHER;
    }
    table().get(native.base_name()).unwrap_or(&OTHER)
}

/// Map a native type to its protocol code and default host class.
pub fn map_to_protocol_code(native: &NativeType) -> (TypeCode, HostClass) {
    let mapping = mapping_for(native);
    (mapping.type_code, mapping.host_class)
}

/// Map a protocol code back to the native type a typed bind would target.
///
/// Returns `None` for codes without a single native counterpart (collections,
/// structs, OTHER).
pub fn map_to_native_type(code: TypeCode) -> Option<NativeType> {
    let native = match code {
        TypeCode::Char | TypeCode::VarChar | TypeCode::LongVarChar => NativeType::Text,
        TypeCode::BigInt => NativeType::BigInt,
        TypeCode::Integer => NativeType::Int,
        TypeCode::SmallInt => NativeType::SmallInt,
        TypeCode::TinyInt => NativeType::TinyInt,
        TypeCode::Bit | TypeCode::Boolean => NativeType::Boolean,
        TypeCode::Double => NativeType::Double,
        TypeCode::Float | TypeCode::Real => NativeType::Float,
        TypeCode::Decimal => NativeType::Decimal,
        TypeCode::Numeric => NativeType::VarInt,
        TypeCode::Binary | TypeCode::VarBinary | TypeCode::LongVarBinary | TypeCode::Blob => {
            NativeType::Blob
        }
        TypeCode::Date => NativeType::Date,
        TypeCode::Time => NativeType::Time,
        TypeCode::Timestamp => NativeType::Timestamp,
        TypeCode::Null
        | TypeCode::Other
        | TypeCode::JavaObject
        | TypeCode::Struct
        | TypeCode::Array => return None,
    };
    Some(native)
}
