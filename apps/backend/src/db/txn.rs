use std::future::Future;
use std::pin::Pin;

use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use tracing::warn;

use crate::error::AppError;

/// Boxed future borrowed from the transaction for the duration of the closure.
pub type TxnFuture<'c, R> = Pin<Box<dyn Future<Output = Result<R, AppError>> + Send + 'c>>;

/// Execute a function within a database transaction.
///
/// Begins a transaction, runs the closure, commits on `Ok` and rolls back on
/// `Err`. The closure's error is returned unchanged; a failed rollback is
/// only logged.
///
/// ```ignore
/// let game = with_txn(db, |txn| Box::pin(async move {
///     games::require_game(txn, "abc-def-ghi").await.map_err(AppError::from)
/// })).await?;
/// ```
pub async fn with_txn<R, F>(db: &DatabaseConnection, f: F) -> Result<R, AppError>
where
    F: for<'c> FnOnce(&'c DatabaseTransaction) -> TxnFuture<'c, R>,
{
    let txn = db.begin().await?;
    let out = f(&txn).await;

    match out {
        Ok(val) => {
            txn.commit().await?;
            Ok(val)
        }
        Err(err) => {
            if let Err(rollback_err) = txn.rollback().await {
                warn!(error = %rollback_err, "rollback failed");
            }
            Err(err)
        }
    }
}
