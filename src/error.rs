//! Error types for the Cassandra bridge.

use thiserror::Error;

/// Result type alias for bridge operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Result type alias for calls into the store collaborators.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Error type for bridge operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A capability the store fundamentally cannot provide.
    #[error("Feature not supported: {feature}")]
    NotSupported { feature: &'static str },

    /// Catalog name that is neither absent nor the synthetic cluster catalog.
    #[error("Catalog '{requested}' does not match the connection catalog '{catalog}'")]
    CatalogMismatch { requested: String, catalog: String },

    /// A bind value whose runtime category is not in the dispatch list.
    #[error("Object type not supported for binding: {category}")]
    UnsupportedBindType { category: &'static str },

    /// Operation against a statement, result set or connection after close.
    #[error("Operation on closed {resource}")]
    ClosedResource { resource: &'static str },

    /// Failure surfaced by the schema introspection or execution collaborator.
    #[error("Store failure during {context}: {source}")]
    Store {
        context: String,
        #[source]
        source: StoreError,
    },

    /// Type conversion error.
    #[error("Type conversion error: {message}")]
    TypeConversion { message: String },

    /// Column not found.
    #[error("Column not found: {name}")]
    ColumnNotFound { name: String },

    /// Column index out of bounds (1-based).
    #[error("Column index {index} out of bounds (columns: {count})")]
    ColumnIndexOutOfBounds { index: usize, count: usize },

    /// Parameter index out of bounds (1-based).
    #[error("Parameter index {index} out of bounds (parameters: {count})")]
    ParameterIndexOutOfBounds { index: usize, count: usize },

    /// Accessor called before `next()` or after the cursor was exhausted.
    #[error("No current row")]
    NoCurrentRow,

    /// The statement did not produce a result set.
    #[error("No result set was returned")]
    NoResultSet,

    /// The statement did not produce an update count.
    #[error("No update count was returned")]
    NoUpdateCount,

    /// Invalid connect string.
    #[error("Invalid connect string: {message}")]
    InvalidConnectString { message: String },

    /// I/O error while draining a caller-supplied stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a type conversion error.
    pub fn type_conversion(message: impl Into<String>) -> Self {
        Self::TypeConversion {
            message: message.into(),
        }
    }

    /// Wrap a collaborator failure with the call that produced it.
    pub fn store(context: impl Into<String>, source: StoreError) -> Self {
        Self::Store {
            context: context.into(),
            source,
        }
    }

    /// Create a not-supported error.
    pub fn not_supported(feature: &'static str) -> Self {
        Self::NotSupported { feature }
    }
}

/// Broad classification of collaborator failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    /// No host could be reached.
    Unavailable,
    /// The request timed out on the store side.
    Timeout,
    /// The store rejected the request (syntax, invalid keyspace, ...).
    Rejected,
    /// Anything else.
    Other,
}

/// Error reported by a store collaborator.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{kind:?}: {message}")]
pub struct StoreError {
    pub kind: StoreErrorKind,
    pub message: String,
}

impl StoreError {
    /// Create a store error.
    pub fn new(kind: StoreErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Connectivity failure.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::Unavailable, message)
    }
}
