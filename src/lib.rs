//! Thin PostgreSQL storage layer.
//!
//! Wraps a `sqlx` connection pool behind the [`Storage`] contract, with
//! ambient (task-local) transaction propagation and optional tracing spans
//! around every operation.
//!
//! ```no_run
//! use pg_storage::{Db, PostgresConfig, params};
//!
//! #[derive(sqlx::FromRow)]
//! struct User {
//!     id: i64,
//!     name: String,
//! }
//!
//! # async fn run() -> pg_storage::StorageResult<()> {
//! let config = PostgresConfig::from_env()?;
//! let db = Db::connect(&config).await?.with_telemetry(true);
//! let tx = db.tx_manager();
//!
//! tx.with_transaction(|| async {
//!     db.exec("INSERT INTO users (name) VALUES ($1)", &params!["alice"])
//!         .await?;
//!     let user: User = db
//!         .query_struct("SELECT id, name FROM users WHERE name = $1", &params!["alice"])
//!         .await?;
//!     assert_eq!(user.name, "alice");
//!     Ok(())
//! })
//! .await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod contract;
pub mod db;
pub mod error;

pub use config::{PoolOptions, PostgresConfig};
pub use contract::Storage;
pub use db::{Db, SqlParam, TxManager};
pub use error::{StorageError, StorageResult};
