//! High-level connection API.

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::BridgeConfig;
use crate::error::{Error, Result};
use crate::logging::{init_logging, LogConfig};
use crate::metadata::{DatabaseMetadata, SchemaIntrospection};
use crate::session::NativeSession;
use crate::statement::PreparedStatement;

/// Catalog used when neither the config nor the store names one.
pub const DEFAULT_CATALOG: &str = "Cassandra";

/// `TRANSACTION_NONE` in the protocol's isolation levels.
pub const TRANSACTION_NONE: i32 = 0;

/// Naming context consulted when metadata filters are absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionContext {
    catalog: String,
    schema: Option<String>,
}

impl ConnectionContext {
    pub fn new(catalog: impl Into<String>, schema: Option<String>) -> Self {
        Self {
            catalog: catalog.into(),
            schema,
        }
    }

    /// The synthetic catalog; constant for the connection's lifetime.
    pub fn catalog(&self) -> &str {
        &self.catalog
    }

    /// The currently selected keyspace.
    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub fn set_schema(&mut self, schema: Option<String>) {
        self.schema = schema;
    }
}

/// A bridge connection over an already connected store client.
pub struct Connection {
    config: BridgeConfig,
    context: ConnectionContext,
    introspection: Arc<dyn SchemaIntrospection>,
    session: Arc<dyn NativeSession>,
    closed: bool,
}

impl Connection {
    /// Open a connection.
    ///
    /// The catalog name comes from the config, else from the first name the
    /// store reports, else [`DEFAULT_CATALOG`].
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use std::sync::Arc;
    /// # use cassandra_bridge_rs::{BridgeConfig, Connection, NativeSession, SchemaIntrospection};
    /// # fn demo(
    /// #     introspection: Arc<dyn SchemaIntrospection>,
    /// #     session: Arc<dyn NativeSession>,
    /// # ) -> cassandra_bridge_rs::Result<()> {
    /// let config = BridgeConfig::parse("jdbc:cassandra://localhost:9042/demo")?;
    /// let conn = Connection::open(config, introspection, session)?;
    /// let mut tables = conn.metadata()?.get_tables(None, None, None, None)?;
    /// while tables.next()? {
    ///     println!("{:?}", tables.get_string("TABLE_NAME")?);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn open(
        config: BridgeConfig,
        introspection: Arc<dyn SchemaIntrospection>,
        session: Arc<dyn NativeSession>,
    ) -> Result<Self> {
        init_logging(&LogConfig::from(&config));

        let catalog = match &config.catalog {
            Some(name) => name.clone(),
            None => introspection
                .list_catalogs()
                .map_err(|e| Error::store("open", e))?
                .into_iter()
                .next()
                .unwrap_or_else(|| DEFAULT_CATALOG.to_string()),
        };
        info!(
            hosts = ?config.hosts,
            port = config.port,
            %catalog,
            keyspace = ?config.keyspace,
            "connection opened"
        );

        let context = ConnectionContext::new(catalog, config.keyspace.clone());
        Ok(Self {
            config,
            context,
            introspection,
            session,
            closed: false,
        })
    }

    fn check_open(&self) -> Result<()> {
        if self.closed {
            return Err(Error::ClosedResource {
                resource: "connection",
            });
        }
        Ok(())
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn context(&self) -> &ConnectionContext {
        &self.context
    }

    pub fn catalog(&self) -> Result<&str> {
        self.check_open()?;
        Ok(self.context.catalog())
    }

    /// Accept only the connection's own catalog.
    pub fn set_catalog(&mut self, catalog: &str) -> Result<()> {
        self.check_open()?;
        if !catalog.eq_ignore_ascii_case(self.context.catalog()) {
            return Err(Error::CatalogMismatch {
                requested: catalog.to_string(),
                catalog: self.context.catalog().to_string(),
            });
        }
        Ok(())
    }

    pub fn schema(&self) -> Result<Option<&str>> {
        self.check_open()?;
        Ok(self.context.schema())
    }

    /// Select the keyspace later metadata calls default to.
    pub fn set_schema(&mut self, schema: &str) -> Result<()> {
        self.check_open()?;
        debug!(schema, "switching current schema");
        self.context.set_schema(Some(schema.to_string()));
        Ok(())
    }

    pub fn metadata(&self) -> Result<DatabaseMetadata<'_>> {
        self.check_open()?;
        Ok(DatabaseMetadata::new(&self.config, &self.context, self.introspection.as_ref()))
    }

    pub fn prepare_statement(&self, cql: &str) -> Result<PreparedStatement> {
        self.check_open()?;
        let handle = self
            .session
            .prepare(cql)
            .map_err(|e| Error::store(format!("prepare ({cql})"), e))?;
        debug!(cql, variables = handle.variable_count(), "statement prepared");
        Ok(PreparedStatement::new(Arc::clone(&self.session), handle))
    }

    pub fn prepare_call(&self, _call: &str) -> Result<PreparedStatement> {
        self.check_open()?;
        Err(Error::not_supported("stored procedures"))
    }

    /// Writes are applied immediately; there is nothing to commit.
    pub fn commit(&self) -> Result<()> {
        self.check_open()
    }

    pub fn rollback(&self) -> Result<()> {
        self.check_open()?;
        Err(Error::not_supported("transactions"))
    }

    pub fn set_savepoint(&self, _name: &str) -> Result<()> {
        self.check_open()?;
        Err(Error::not_supported("savepoints"))
    }

    pub fn auto_commit(&self) -> bool {
        true
    }

    pub fn transaction_isolation(&self) -> i32 {
        TRANSACTION_NONE
    }

    /// Close the connection. Closing twice is a no-op.
    pub fn close(&mut self) {
        if !self.closed {
            info!(catalog = %self.context.catalog(), "connection closed");
            self.closed = true;
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}
