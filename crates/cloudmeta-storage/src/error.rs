use sea_orm::{DbErr, SqlErr};

/// Errors that can occur within the storage layer.
///
/// Validation failures are raised synchronously before anything reaches the
/// database, so a rejected operation never leaves a partially written row;
/// unique-index conflicts are raised by the backing store at execution time
/// and mapped to [`StorageError::UniqueViolation`] here. Nothing is retried
/// or swallowed.
///
/// # Examples
///
/// ```rust
/// use cloudmeta_storage::error::StorageError;
///
/// let err = StorageError::NotFound {
///     entity: "amazon image",
///     id: "ami-42".to_string(),
/// };
/// assert!(err.to_string().contains("ami-42"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A required environment variable was absent while assembling the
    /// database connection URL.
    #[error("Storage: environment variable {name} is required")]
    MissingEnv { name: &'static str },

    /// An otherwise malformed connection setting (e.g. an unparseable port).
    #[error("Storage: configuration error: {0}")]
    Configuration(String),

    /// A field-level or cross-field invariant was violated. The offending
    /// value is rejected and the stored record keeps its prior state.
    #[error("Storage: validation failed for {table}.{field} = {value:?}: {reason}")]
    Validation {
        table: &'static str,
        field: &'static str,
        value: String,
        reason: String,
    },

    /// The backing store rejected a write that would duplicate a unique key
    /// (e.g. a non-null region+address pair).
    #[error("Storage: unique constraint violated: {0}")]
    UniqueViolation(#[source] DbErr),

    /// A required record was not found in the database.
    #[error("Storage: {entity} not found (id={id})")]
    NotFound { entity: &'static str, id: String },

    /// A stored column value could not be decoded into its domain type,
    /// which should be unreachable while the CHECK constraints hold.
    #[error("Storage: invalid {column} value {value:?} stored in {table}")]
    Decode {
        table: &'static str,
        column: &'static str,
        value: String,
    },

    /// An underlying database error.
    #[error("Storage: database error: {0}")]
    Db(#[from] DbErr),

    /// An I/O failure (e.g. opening the SQL statement log file).
    #[error("Storage: io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience `Result` alias for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Maps database errors onto the storage taxonomy, surfacing unique-index
/// conflicts as their own variant.
pub(crate) fn map_db_err(err: DbErr) -> StorageError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => StorageError::UniqueViolation(err),
        _ => StorageError::Db(err),
    }
}
