//! Cassandra column types as reported by schema introspection.
//!
//! Type names come back from the store as CQL strings such as `int`,
//! `map<text, frozen<list<int>>>` or a fully-qualified custom marshal class.
//! Parsing never fails: anything unrecognised is kept as [`NativeType::Custom`].

use std::fmt;

/// Cassandra data type with collection parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NativeType {
    Ascii,
    BigInt,
    Blob,
    Boolean,
    Counter,
    Date,
    Decimal,
    Double,
    Duration,
    Float,
    Inet,
    Int,
    SmallInt,
    Text,
    Time,
    Timestamp,
    TimeUuid,
    TinyInt,
    Uuid,
    Varchar,
    VarInt,
    /// `list<T>`.
    List(Box<NativeType>),
    /// `set<T>`.
    Set(Box<NativeType>),
    /// `map<K, V>`.
    Map(Box<NativeType>, Box<NativeType>),
    /// `tuple<...>`.
    Tuple(Vec<NativeType>),
    /// Anything else: user-defined types and custom marshal classes.
    Custom(String),
}

impl NativeType {
    /// Parse a CQL type name. `frozen<...>` wrappers are transparent.
    pub fn parse(name: &str) -> Self {
        let trimmed = name.trim();
        let lower = trimmed.to_ascii_lowercase();

        if let Some((base, params)) = split_params(&lower) {
            let args = split_top_level(params);
            return match (base, args.as_slice()) {
                ("frozen", [inner]) => NativeType::parse(inner),
                ("list", [elem]) => NativeType::List(Box::new(NativeType::parse(elem))),
                ("set", [elem]) => NativeType::Set(Box::new(NativeType::parse(elem))),
                ("map", [key, value]) => NativeType::Map(
                    Box::new(NativeType::parse(key)),
                    Box::new(NativeType::parse(value)),
                ),
                ("tuple", elems) if !elems.is_empty() => {
                    NativeType::Tuple(elems.iter().map(|e| NativeType::parse(e)).collect())
                }
                _ => NativeType::Custom(trimmed.to_string()),
            };
        }

        match lower.as_str() {
            "ascii" => NativeType::Ascii,
            "bigint" => NativeType::BigInt,
            "blob" => NativeType::Blob,
            "boolean" => NativeType::Boolean,
            "counter" => NativeType::Counter,
            "date" => NativeType::Date,
            "decimal" => NativeType::Decimal,
            "double" => NativeType::Double,
            "duration" => NativeType::Duration,
            "float" => NativeType::Float,
            "inet" => NativeType::Inet,
            "int" => NativeType::Int,
            "smallint" => NativeType::SmallInt,
            "text" => NativeType::Text,
            "time" => NativeType::Time,
            "timestamp" => NativeType::Timestamp,
            "timeuuid" => NativeType::TimeUuid,
            "tinyint" => NativeType::TinyInt,
            "uuid" => NativeType::Uuid,
            "varchar" => NativeType::Varchar,
            "varint" => NativeType::VarInt,
            _ => NativeType::Custom(trimmed.to_string()),
        }
    }

    /// Base type name used as the mapping key (`list`, `map`, `int`, ...).
    pub fn base_name(&self) -> &str {
        match self {
            NativeType::Ascii => "ascii",
            NativeType::BigInt => "bigint",
            NativeType::Blob => "blob",
            NativeType::Boolean => "boolean",
            NativeType::Counter => "counter",
            NativeType::Date => "date",
            NativeType::Decimal => "decimal",
            NativeType::Double => "double",
            NativeType::Duration => "duration",
            NativeType::Float => "float",
            NativeType::Inet => "inet",
            NativeType::Int => "int",
            NativeType::SmallInt => "smallint",
            NativeType::Text => "text",
            NativeType::Time => "time",
            NativeType::Timestamp => "timestamp",
            NativeType::TimeUuid => "timeuuid",
            NativeType::TinyInt => "tinyint",
            NativeType::Uuid => "uuid",
            NativeType::Varchar => "varchar",
            NativeType::VarInt => "varint",
            NativeType::List(_) => "list",
            NativeType::Set(_) => "set",
            NativeType::Map(_, _) => "map",
            NativeType::Tuple(_) => "tuple",
            NativeType::Custom(name) => name,
        }
    }

    /// Whether this is a list, set or map.
    pub fn is_collection(&self) -> bool {
        matches!(
            self,
            NativeType::List(_) | NativeType::Set(_) | NativeType::Map(_, _)
        )
    }
}

impl fmt::Display for NativeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NativeType::List(elem) => write!(f, "list<{}>", elem),
            NativeType::Set(elem) => write!(f, "set<{}>", elem),
            NativeType::Map(key, value) => write!(f, "map<{}, {}>", key, value),
            NativeType::Tuple(elems) => {
                write!(f, "tuple<")?;
                for (i, elem) in elems.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", elem)?;
                }
                write!(f, ">")
            }
            other => write!(f, "{}", other.base_name()),
        }
    }
}

/// Split `base<params>` into its parts; `None` when there are no parameters.
fn split_params(name: &str) -> Option<(&str, &str)> {
    let start = name.find('<')?;
    let end = name.rfind('>')?;
    if end < start {
        return None;
    }
    Some((name[..start].trim(), &name[start + 1..end]))
}

/// Split on commas that are not nested inside angle brackets.
fn split_top_level(params: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut last = 0;
    for (i, c) in params.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(params[last..i].trim());
                last = i + 1;
            }
            _ => {}
        }
    }
    let tail = params[last..].trim();
    if !tail.is_empty() {
        parts.push(tail);
    }
    parts
}
