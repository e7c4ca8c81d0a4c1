//! Cassandra bridge for relational clients.
//!
//! Exposes a wide-column store through a catalog/schema/table access model:
//! native column types map to protocol type codes, schema metadata is
//! synthesized into virtual result sets, host values bind to prepared
//! statements by runtime category, and native row values decode through
//! typed accessors.
//!
//! The bridge is synchronous and does no networking of its own. A connected
//! store client supplies the [`SchemaIntrospection`] and [`NativeSession`]
//! collaborators.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use cassandra_bridge_rs::{BridgeConfig, Connection, NativeSession, Result, SchemaIntrospection};
//!
//! fn run(
//!     introspection: Arc<dyn SchemaIntrospection>,
//!     session: Arc<dyn NativeSession>,
//! ) -> Result<()> {
//!     let conn = Connection::open(BridgeConfig::parse("jdbc:cassandra://localhost/demo")?, introspection, session)?;
//!
//!     let mut stmt = conn.prepare_statement("SELECT ivalue FROM regressiontest WHERE keyname = ?")?;
//!     stmt.set_object(1, "key0")?;
//!     let mut rows = stmt.execute_query()?;
//!     while rows.next()? {
//!         println!("{:?}", rows.get_i64(1)?);
//!     }
//!     stmt.close();
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod connection;
pub mod cursor;
pub mod error;
pub mod logging;
pub mod metadata;
pub mod protocol;
pub mod session;
pub mod statement;

// Re-export main types
pub use config::BridgeConfig;
pub use connection::{Connection, ConnectionContext};
pub use cursor::{Cursor, ResultSet};
pub use error::{Error, Result, StoreError, StoreErrorKind, StoreResult};
pub use metadata::{DatabaseMetadata, SchemaIntrospection};
pub use protocol::types::{
    BlobHandle, Column, ColumnInfo, ColumnMetadata, HostClass, HostMap, HostValue, NativeType,
    NativeValue, Row, RowId, TypeCode,
};
pub use session::{NativeResult, NativeSession, PreparedHandle};
pub use statement::PreparedStatement;
