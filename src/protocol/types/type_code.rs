//! Protocol type codes and default host representations.
//!
//! Codes are the `java.sql.Types` values every relational client expects in
//! `DATA_TYPE` columns and result-set metadata.

use std::fmt;

/// Protocol type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(i32)]
pub enum TypeCode {
    Bit = -7,
    TinyInt = -6,
    BigInt = -5,
    LongVarBinary = -4,
    VarBinary = -3,
    Binary = -2,
    LongVarChar = -1,
    Null = 0,
    Char = 1,
    Numeric = 2,
    Decimal = 3,
    Integer = 4,
    SmallInt = 5,
    Float = 6,
    Real = 7,
    Double = 8,
    VarChar = 12,
    Boolean = 16,
    Date = 91,
    Time = 92,
    Timestamp = 93,
    Other = 1111,
    JavaObject = 2000,
    Struct = 2002,
    Array = 2003,
    Blob = 2004,
}

impl TypeCode {
    /// Numeric code as carried in metadata rows.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Look up a code; unknown values become `Other`.
    pub fn from_code(code: i32) -> Self {
        match code {
            -7 => TypeCode::Bit,
            -6 => TypeCode::TinyInt,
            -5 => TypeCode::BigInt,
            -4 => TypeCode::LongVarBinary,
            -3 => TypeCode::VarBinary,
            -2 => TypeCode::Binary,
            -1 => TypeCode::LongVarChar,
            0 => TypeCode::Null,
            1 => TypeCode::Char,
            2 => TypeCode::Numeric,
            3 => TypeCode::Decimal,
            4 => TypeCode::Integer,
            5 => TypeCode::SmallInt,
            6 => TypeCode::Float,
            7 => TypeCode::Real,
            8 => TypeCode::Double,
            12 => TypeCode::VarChar,
            16 => TypeCode::Boolean,
            91 => TypeCode::Date,
            92 => TypeCode::Time,
            93 => TypeCode::Timestamp,
            2000 => TypeCode::JavaObject,
            2002 => TypeCode::Struct,
            2003 => TypeCode::Array,
            2004 => TypeCode::Blob,
            _ => TypeCode::Other,
        }
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeCode::Bit => "BIT",
            TypeCode::TinyInt => "TINYINT",
            TypeCode::BigInt => "BIGINT",
            TypeCode::LongVarBinary => "LONGVARBINARY",
            TypeCode::VarBinary => "VARBINARY",
            TypeCode::Binary => "BINARY",
            TypeCode::LongVarChar => "LONGVARCHAR",
            TypeCode::Null => "NULL",
            TypeCode::Char => "CHAR",
            TypeCode::Numeric => "NUMERIC",
            TypeCode::Decimal => "DECIMAL",
            TypeCode::Integer => "INTEGER",
            TypeCode::SmallInt => "SMALLINT",
            TypeCode::Float => "FLOAT",
            TypeCode::Real => "REAL",
            TypeCode::Double => "DOUBLE",
            TypeCode::VarChar => "VARCHAR",
            TypeCode::Boolean => "BOOLEAN",
            TypeCode::Date => "DATE",
            TypeCode::Time => "TIME",
            TypeCode::Timestamp => "TIMESTAMP",
            TypeCode::Other => "OTHER",
            TypeCode::JavaObject => "JAVA_OBJECT",
            TypeCode::Struct => "STRUCT",
            TypeCode::Array => "ARRAY",
            TypeCode::Blob => "BLOB",
        };
        f.write_str(name)
    }
}

/// Host representation a column decodes to when read generically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostClass {
    String,
    Byte,
    Short,
    Integer,
    Long,
    Float,
    Double,
    BigDecimal,
    BigInteger,
    Boolean,
    Bytes,
    Timestamp,
    Time,
    Uuid,
    InetAddress,
    List,
    Set,
    Map,
    Object,
}
