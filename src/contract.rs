//! The storage access contract.
//!
//! [`Storage`] declares the common data-access operations implemented by
//! concrete backends such as [`Db`](crate::Db). Services depend on this trait
//! so storage can be swapped or stubbed in tests.

use crate::db::params::SqlParam;
use crate::error::StorageResult;
use async_trait::async_trait;
use sqlx::FromRow;
use sqlx::postgres::PgRow;

#[async_trait]
pub trait Storage {
    /// Run a query expected to return exactly one row and scan it into `T`.
    /// Zero rows is [`StorageError::NotFound`](crate::StorageError::NotFound).
    async fn query_struct<T>(&self, sql: &str, params: &[SqlParam]) -> StorageResult<T>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin;

    /// Run a query and scan every returned row into `T`.
    async fn query_structs<T>(&self, sql: &str, params: &[SqlParam]) -> StorageResult<Vec<T>>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin;

    /// Execute a statement without returning rows; returns the number of
    /// affected rows.
    async fn exec(&self, sql: &str, params: &[SqlParam]) -> StorageResult<u64>;

    /// Release any resources.
    async fn close(&self);
}
