//! Relational metadata synthesized from the store's live schema.

mod descriptors;
mod introspection;
mod layout;
mod synthesizer;

pub use descriptors::{
    CatalogDescriptor, ColumnDescriptor, IndexDescriptor, SchemaDescriptor, TableDescriptor,
};
pub use introspection::{
    ColumnKind, NativeColumn, NativeIndex, NativeTable, SchemaIntrospection, TableKind,
};
pub use synthesizer::{DatabaseMetadata, DB_MAJOR_VERSION, DB_MINOR_VERSION};
