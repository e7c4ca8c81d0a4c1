//! Type mapping, parameter binding and value decoding between the
//! relational host model and the native store.

pub mod bind;
pub mod decode;
pub mod types;

pub use bind::{BindCategory, BoundParameters, BoundValue};
pub use types::{
    BlobHandle, Column, ColumnIndex, ColumnInfo, ColumnMetadata, HostClass, HostMap, HostValue,
    NativeType, NativeValue, Row, RowId, TypeCode,
};
