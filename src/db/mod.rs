//! Database access layer.
//!
//! - Connection pool wrapper with struct scanning ([`postgres`])
//! - Ambient transaction management ([`transaction`])
//! - Runtime-typed query parameters ([`params`])

pub mod params;
pub mod postgres;
pub mod transaction;

pub use params::SqlParam;
pub use postgres::Db;
pub use transaction::TxManager;
