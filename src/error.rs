//! Error types for the storage layer.
//!
//! All fallible operations return [`StorageResult`]. Driver errors from `sqlx`
//! are folded into [`StorageError`] so callers never have to match on raw
//! driver variants.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    #[error("Connection failed: {message}")]
    Connection { message: String },

    #[error("Database error: {message}")]
    Database {
        message: String,
        /// e.g., "42P01" for undefined table
        sql_state: Option<String>,
    },

    #[error("No rows returned")]
    NotFound,

    #[error("Failed to decode row: {message}")]
    Decode { message: String },

    #[error("Transaction error: {message}")]
    Transaction { message: String },

    #[error("Timeout: {operation}")]
    Timeout { operation: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl StorageError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a connection error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a database error with optional SQL state.
    pub fn database(message: impl Into<String>, sql_state: Option<String>) -> Self {
        Self::Database {
            message: message.into(),
            sql_state,
        }
    }

    /// Create a row decoding error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a transaction error.
    pub fn transaction(message: impl Into<String>) -> Self {
        Self::Transaction {
            message: message.into(),
        }
    }

    /// Create a timeout error.
    pub fn timeout(operation: impl Into<String>) -> Self {
        Self::Timeout {
            operation: operation.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// True when the query matched no rows. The single-row lookups return this
    /// instead of a driver error so callers can branch without string matching.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Connection { .. } | Self::Timeout { .. })
    }

    /// SQLSTATE code reported by the server, if any.
    pub fn sql_state(&self) -> Option<&str> {
        match self {
            Self::Database { sql_state, .. } => sql_state.as_deref(),
            _ => None,
        }
    }
}

/// Convert sqlx errors to StorageError.
impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Configuration(msg) => StorageError::config(msg.to_string()),
            sqlx::Error::Database(db_err) => {
                let code = db_err.code().map(|c| c.to_string());
                StorageError::database(db_err.message(), code)
            }
            sqlx::Error::RowNotFound => StorageError::NotFound,
            sqlx::Error::PoolTimedOut => StorageError::timeout("connection pool acquire"),
            sqlx::Error::PoolClosed => StorageError::connection("Connection pool is closed"),
            sqlx::Error::Io(io_err) => StorageError::connection(format!("I/O error: {}", io_err)),
            sqlx::Error::Tls(tls_err) => {
                StorageError::connection(format!("TLS error: {}", tls_err))
            }
            sqlx::Error::Protocol(msg) => {
                StorageError::connection(format!("Protocol error: {}", msg))
            }
            sqlx::Error::TypeNotFound { type_name } => {
                StorageError::decode(format!("Type not found: {}", type_name))
            }
            sqlx::Error::ColumnNotFound(col) => {
                StorageError::decode(format!("Column not found: {}", col))
            }
            sqlx::Error::ColumnIndexOutOfBounds { index, len } => StorageError::decode(format!(
                "Column index {} out of bounds (len: {})",
                index, len
            )),
            sqlx::Error::ColumnDecode { index, source } => {
                StorageError::decode(format!("Failed to decode column {}: {}", index, source))
            }
            sqlx::Error::Decode(source) => {
                StorageError::decode(format!("Decode error: {}", source))
            }
            sqlx::Error::WorkerCrashed => StorageError::internal("Database worker crashed"),
            _ => StorageError::internal(format!("Unknown database error: {}", err)),
        }
    }
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StorageError::connection("Failed to connect");
        assert!(err.to_string().contains("Connection failed"));
    }

    #[test]
    fn test_error_retryable() {
        assert!(StorageError::timeout("query").is_retryable());
        assert!(StorageError::connection("err").is_retryable());
        assert!(!StorageError::database("syntax error", None).is_retryable());
        assert!(!StorageError::NotFound.is_retryable());
    }

    #[test]
    fn test_not_found_predicate() {
        assert!(StorageError::NotFound.is_not_found());
        assert!(!StorageError::internal("boom").is_not_found());
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err: StorageError = sqlx::Error::RowNotFound.into();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_pool_timed_out_maps_to_timeout() {
        let err: StorageError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, StorageError::Timeout { .. }));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_pool_closed_maps_to_connection() {
        let err: StorageError = sqlx::Error::PoolClosed.into();
        assert!(matches!(err, StorageError::Connection { .. }));
    }

    #[test]
    fn test_column_not_found_maps_to_decode() {
        let err: StorageError = sqlx::Error::ColumnNotFound("name".into()).into();
        assert!(matches!(err, StorageError::Decode { .. }));
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn test_sql_state_accessor() {
        let err = StorageError::database("relation does not exist", Some("42P01".to_string()));
        assert_eq!(err.sql_state(), Some("42P01"));
        assert_eq!(StorageError::NotFound.sql_state(), None);
    }
}
