//! Native and host data types, and the mapping between them.

mod column;
mod host;
mod lob;
mod mapping;
mod metadata;
mod native_type;
mod row;
mod row_id;
mod type_code;
mod value;

pub use column::{Column, ColumnInfo};
pub use host::{HostMap, HostValue};
pub use lob::BlobHandle;
pub use mapping::{map_to_native_type, map_to_protocol_code, mapping_for, TypeMapping};
pub use metadata::ColumnMetadata;
pub use native_type::NativeType;
pub use row::{ColumnIndex, Row};
pub use row_id::RowId;
pub use type_code::{HostClass, TypeCode};
pub use value::NativeValue;
