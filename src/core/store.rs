//! `FortuneStore` - the explicit store object shared by the scheduler and the
//! command layer.
//!
//! Every mutating operation takes the write gate first and then runs inside one
//! database transaction, so "select and mark used" and "read counter and
//! increment" can never interleave. Reads go straight to the connection.

use crate::{
    config::preloaded::PreloadedEntry,
    core::{
        export::{self, Export},
        fortune as fortune_ops,
        import::{self, ImportReport},
        rotation, state, submission as submission_ops,
    },
    entities::{fortune, submission},
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use std::future::Future;
use tokio::sync::Mutex;
use tracing::{info, instrument};

/// Owner of the database connection and the single-writer gate.
pub struct FortuneStore {
    db: DatabaseConnection,
    writer: Mutex<()>,
}

impl FortuneStore {
    /// Wraps an open connection whose tables already exist.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            writer: Mutex::new(()),
        }
    }

    /// Runs `op` in a transaction while holding the write gate. The transaction
    /// is committed only when `op` succeeds; on error it is rolled back when
    /// dropped.
    async fn write<T, F, Fut>(&self, op: F) -> Result<T>
    where
        F: FnOnce(DatabaseTransaction) -> Fut,
        Fut: Future<Output = (DatabaseTransaction, Result<T>)>,
    {
        let _gate = self.writer.lock().await;
        let txn = self.db.begin().await?;
        let (txn, result) = op(txn).await;
        let value = result?;
        txn.commit().await?;
        Ok(value)
    }

    /// Inserts a single preloaded fortune.
    #[instrument(skip(self))]
    pub async fn insert_preloaded(&self, ordinal: i64, text: &str) -> Result<fortune::Model> {
        self.write(|txn| async move {
            let result = fortune_ops::insert_preloaded(&txn, ordinal, text).await;
            (txn, result)
        })
        .await
    }

    /// Imports a batch of preloaded entries in one transaction.
    #[instrument(skip(self, entries), fields(rows = entries.len()))]
    pub async fn import_preloaded(&self, entries: &[PreloadedEntry]) -> Result<ImportReport> {
        let report = self
            .write(|txn| async move {
                let result = import::import_preloaded(&txn, entries).await;
                (txn, result)
            })
            .await?;
        info!(
            inserted = report.inserted,
            duplicates = report.duplicates,
            malformed = report.malformed,
            "Preloaded fortunes imported"
        );
        Ok(report)
    }

    /// Records a pending submission.
    #[instrument(skip(self))]
    pub async fn submit(
        &self,
        text: &str,
        origin_community: Option<&str>,
        submitted_by: &str,
    ) -> Result<submission::Model> {
        self.write(|txn| async move {
            let result = submission_ops::submit(&txn, text, origin_community, submitted_by).await;
            (txn, result)
        })
        .await
    }

    /// Approves a pending submission, returning the new fortune.
    #[instrument(skip(self))]
    pub async fn approve(&self, submission_id: i64, approver: &str) -> Result<fortune::Model> {
        self.write(|txn| async move {
            let result = submission_ops::approve(&txn, submission_id, approver).await;
            (txn, result)
        })
        .await
    }

    /// Rejects a pending submission; `false` if it was not pending.
    #[instrument(skip(self))]
    pub async fn reject(&self, submission_id: i64, moderator: &str) -> Result<bool> {
        self.write(|txn| async move {
            let result = submission_ops::reject(&txn, submission_id, moderator).await;
            (txn, result)
        })
        .await
    }

    /// Deletes a guild fortune; `false` for other provenances or unknown ids.
    #[instrument(skip(self))]
    pub async fn remove(&self, fortune_id: i64) -> Result<bool> {
        self.write(|txn| async move {
            let result = fortune_ops::remove(&txn, fortune_id).await;
            (txn, result)
        })
        .await
    }

    /// Selects and marks the next fortune; `None` when nothing is deliverable.
    #[instrument(skip(self))]
    pub async fn select_next(&self) -> Result<Option<fortune::Model>> {
        self.write(|txn| async move {
            let result = rotation::select_next(&txn).await;
            (txn, result)
        })
        .await
    }

    /// Starts a new rotation cycle.
    #[instrument(skip(self))]
    pub async fn reset(&self) -> Result<()> {
        self.write(|txn| async move {
            let result = rotation::reset_cycle(&txn).await;
            (txn, result)
        })
        .await
    }

    /// Selects the scheduled fortune and records today's delivery in the same
    /// transaction.
    #[instrument(skip(self))]
    pub async fn deliver_scheduled(&self, today: NaiveDate) -> Result<Option<fortune::Model>> {
        self.write(|txn| async move {
            let result: Result<Option<fortune::Model>> = async {
                let delivered = rotation::select_next(&txn).await?;
                state::set_last_delivery_date(&txn, today).await?;
                Ok(delivered)
            }
            .await;
            (txn, result)
        })
        .await
    }

    /// Date of the last scheduled delivery.
    pub async fn last_delivery_date(&self) -> Result<Option<NaiveDate>> {
        state::get_last_delivery_date(&self.db).await
    }

    /// All fortunes in listing order.
    pub async fn list(&self) -> Result<Vec<fortune::Model>> {
        fortune_ops::list_fortunes(&self.db).await
    }

    /// Pending submissions, oldest first.
    pub async fn pending(&self) -> Result<Vec<submission::Model>> {
        submission_ops::list_pending(&self.db).await
    }

    /// Full read-only dump.
    pub async fn export(&self) -> Result<Export> {
        export::export_all(&self.db).await
    }

    /// Closes the connection pool.
    pub async fn close(self) -> Result<()> {
        self.db.close().await?;
        Ok(())
    }
}
