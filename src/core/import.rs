//! Bulk import of preloaded fortunes.

use crate::{
    config::preloaded::PreloadedEntry,
    core::fortune as fortune_ops,
    errors::{Error, Result},
};
use sea_orm::ConnectionTrait;
use tracing::{debug, warn};

/// Outcome counts of one import run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Rows stored as new fortunes
    pub inserted: usize,
    /// Rows whose text already existed
    pub duplicates: usize,
    /// Rows with a missing or non-positive ordinal, or empty text
    pub malformed: usize,
}

/// Inserts every entry as a preloaded fortune. Bad or duplicate rows are
/// counted and skipped; only storage failures abort the batch.
pub async fn import_preloaded<C>(db: &C, entries: &[PreloadedEntry]) -> Result<ImportReport>
where
    C: ConnectionTrait,
{
    let mut report = ImportReport::default();

    for entry in entries {
        let (Some(ordinal), Some(text)) = (entry.ordinal, entry.text.as_deref()) else {
            report.malformed += 1;
            continue;
        };

        match fortune_ops::insert_preloaded(db, ordinal, text).await {
            Ok(_) => report.inserted += 1,
            Err(Error::Duplicate { text }) => {
                debug!(ordinal, %text, "Skipping duplicate preloaded fortune");
                report.duplicates += 1;
            }
            Err(Error::InvalidInput { message }) => {
                warn!(ordinal, %message, "Skipping malformed preloaded fortune");
                report.malformed += 1;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(report)
}
