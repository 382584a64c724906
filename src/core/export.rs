//! Read-only dump of the fortune and submission tables.

use crate::{
    core::fortune as fortune_ops,
    entities::{Submission, SubmissionStatus, fortune::Provenance, submission},
    errors::Result,
};
use chrono::NaiveDateTime;
use sea_orm::{QueryOrder, prelude::*};
use serde::Serialize;

/// One exported fortune
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportedFortune {
    /// Storage id
    pub id: i64,
    /// Provenance-scoped display id
    pub display_id: i64,
    /// Fortune text
    pub text: String,
    /// Origin category
    pub provenance: Provenance,
    /// Guild the fortune came from
    pub origin_community: Option<String>,
    /// Delivered in the current cycle
    pub used: bool,
    /// When it became deliverable
    pub approved_at: NaiveDateTime,
}

/// One exported submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportedSubmission {
    /// Submission id
    pub id: i64,
    /// Submitted text
    pub text: String,
    /// Moderation state
    pub status: SubmissionStatus,
    /// Guild the submission came from
    pub origin_community: Option<String>,
    /// Author's user id
    pub submitted_by: String,
    /// Fortune created on approval
    pub fortune_id: Option<i64>,
}

/// Full export document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Export {
    /// All fortunes in listing order
    pub fortunes: Vec<ExportedFortune>,
    /// All submissions, any state, oldest first
    pub submissions: Vec<ExportedSubmission>,
}

impl Export {
    /// Number of pending submissions in the export.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.submissions
            .iter()
            .filter(|s| s.status == SubmissionStatus::Pending)
            .count()
    }
}

/// Reads both tables into an [`Export`].
pub async fn export_all<C>(db: &C) -> Result<Export>
where
    C: ConnectionTrait,
{
    let fortunes = fortune_ops::list_fortunes(db)
        .await?
        .into_iter()
        .map(|f| ExportedFortune {
            id: f.id,
            display_id: f.display_id,
            text: f.text,
            provenance: f.provenance,
            origin_community: f.origin_community,
            used: f.used,
            approved_at: f.approved_at,
        })
        .collect();

    let submissions = Submission::find()
        .order_by_asc(submission::Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(|s| ExportedSubmission {
            id: s.id,
            text: s.text,
            status: s.status,
            origin_community: s.origin_community,
            submitted_by: s.submitted_by,
            fortune_id: s.fortune_id,
        })
        .collect();

    Ok(Export {
        fortunes,
        submissions,
    })
}

/// Encodes an export as pretty JSON.
pub fn to_json(export: &Export) -> Result<String> {
    Ok(serde_json::to_string_pretty(export)?)
}
