//! Ambient transaction management.
//!
//! [`TxManager::with_transaction`] begins a transaction and installs it in a
//! task-local scope for the duration of the closure. Every [`Db`](crate::Db)
//! operation running inside that scope executes on the transaction instead of
//! the pool, so repositories stay oblivious to transaction boundaries. Nested
//! `with_transaction` calls join the enclosing transaction.
//!
//! The scope is task-local: work handed to `tokio::spawn` inside the closure
//! does not inherit the transaction.

use crate::error::{StorageError, StorageResult};
use sqlx::{PgPool, Postgres, Transaction};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

/// A transaction shared between the manager and the query methods running
/// inside its scope. `None` once the transaction has been consumed.
pub(crate) type SharedTx = Arc<Mutex<Option<Transaction<'static, Postgres>>>>;

tokio::task_local! {
    static AMBIENT_TX: SharedTx;
}

/// Get the transaction installed for the current task scope, if any.
pub(crate) fn ambient_transaction() -> Option<SharedTx> {
    AMBIENT_TX.try_with(|tx| tx.clone()).ok()
}

/// Runs closures inside database transactions.
///
/// Cloneable; shares the connection pool with the [`Db`](crate::Db) it was
/// created from.
#[derive(Clone)]
pub struct TxManager {
    pool: PgPool,
}

impl TxManager {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run `f` inside a transaction.
    ///
    /// Commits when the closure returns `Ok`, rolls back when it returns
    /// `Err` (the closure's error is returned either way; a failed rollback
    /// is logged). When called inside an already-active transaction scope the
    /// closure joins that transaction and no commit or rollback happens here.
    pub async fn with_transaction<F, Fut, T>(&self, f: F) -> StorageResult<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = StorageResult<T>>,
    {
        if ambient_transaction().is_some() {
            debug!("Joining enclosing transaction");
            return f().await;
        }

        let tx = self.pool.begin().await.map_err(StorageError::from)?;
        let transaction_id = generate_transaction_id();
        info!(transaction_id = %transaction_id, "Transaction started");

        let shared: SharedTx = Arc::new(Mutex::new(Some(tx)));
        let result = AMBIENT_TX.scope(shared.clone(), f()).await;

        let tx = shared.lock().await.take().ok_or_else(|| {
            StorageError::transaction("Transaction is no longer active")
        })?;

        match result {
            Ok(value) => {
                tx.commit().await.map_err(StorageError::from)?;
                info!(transaction_id = %transaction_id, "Transaction committed");
                Ok(value)
            }
            Err(err) => {
                // Best effort: the closure's error wins over a rollback failure.
                if let Err(rollback_err) = tx.rollback().await {
                    error!(
                        transaction_id = %transaction_id,
                        error = %rollback_err,
                        "Failed to roll back transaction"
                    );
                } else {
                    info!(transaction_id = %transaction_id, "Transaction rolled back");
                }
                Err(err)
            }
        }
    }
}

/// Generate a unique transaction ID for log correlation.
fn generate_transaction_id() -> String {
    format!("tx_{}", uuid::Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_id_format() {
        let id = generate_transaction_id();
        assert!(id.starts_with("tx_"));
        assert_eq!(id.len(), 3 + 32); // "tx_" + 32 hex chars
    }

    #[test]
    fn test_no_ambient_transaction_outside_scope() {
        assert!(ambient_transaction().is_none());
    }

    #[tokio::test]
    async fn test_no_ambient_transaction_in_plain_task() {
        assert!(ambient_transaction().is_none());
    }
}
