//! Submission workflow - `pending -> approved | rejected`.
//!
//! A submission only becomes a deliverable fortune when a moderator approves
//! it. The display id is allocated at that moment from the counter of the
//! submission's partition (global, or one per community), so ids inside a
//! partition are dense, start at 1 and are never handed out twice.

use crate::{
    core::{fortune as fortune_ops, state},
    entities::{Submission, SubmissionStatus, fortune, fortune::Provenance, submission},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::debug;

/// Records a new pending submission.
///
/// `origin_community` is the guild the text was submitted from; `None` makes it
/// a global submission.
///
/// # Errors
/// - `InvalidInput` if the text is empty
/// - `Duplicate` if the text is already a fortune or a pending submission
pub async fn submit<C>(
    db: &C,
    text: &str,
    origin_community: Option<&str>,
    submitted_by: &str,
) -> Result<submission::Model>
where
    C: ConnectionTrait,
{
    let text = fortune_ops::normalize_text(text)?;
    if fortune_ops::text_exists(db, &text).await? {
        return Err(Error::Duplicate { text });
    }

    let model = submission::ActiveModel {
        text: Set(text),
        origin_community: Set(origin_community.map(ToString::to_string)),
        submitted_by: Set(submitted_by.to_string()),
        status: Set(SubmissionStatus::Pending),
        fortune_id: Set(None),
        resolved_by: Set(None),
        created_at: Set(Utc::now().naive_utc()),
        resolved_at: Set(None),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

async fn find_pending<C>(db: &C, submission_id: i64) -> Result<Option<submission::Model>>
where
    C: ConnectionTrait,
{
    Submission::find_by_id(submission_id)
        .filter(submission::Column::Status.eq(SubmissionStatus::Pending))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Approves a pending submission and materializes it as a fortune.
///
/// # Errors
/// Returns `SubmissionNotFound` if the id is unknown or the submission was
/// already approved or rejected.
pub async fn approve<C>(db: &C, submission_id: i64, approver: &str) -> Result<fortune::Model>
where
    C: ConnectionTrait,
{
    let pending = find_pending(db, submission_id)
        .await?
        .ok_or(Error::SubmissionNotFound { id: submission_id })?;

    let provenance = if pending.origin_community.is_some() {
        Provenance::Guild
    } else {
        Provenance::Global
    };
    let counter_key = state::display_counter_key(pending.origin_community.as_deref());
    let display_id = state::next_counter(db, &counter_key).await?;
    debug!(submission_id, display_id, ?provenance, "Allocated display id");

    let now = Utc::now().naive_utc();
    let created = fortune::ActiveModel {
        display_id: Set(display_id),
        text: Set(pending.text.clone()),
        provenance: Set(provenance),
        origin_community: Set(pending.origin_community.clone()),
        used: Set(false),
        submission_id: Set(Some(pending.id)),
        approved_by: Set(Some(approver.to_string())),
        created_at: Set(pending.created_at),
        approved_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;

    let mut resolved: submission::ActiveModel = pending.into();
    resolved.status = Set(SubmissionStatus::Approved);
    resolved.fortune_id = Set(Some(created.id));
    resolved.resolved_by = Set(Some(approver.to_string()));
    resolved.resolved_at = Set(Some(now));
    resolved.update(db).await?;

    Ok(created)
}

/// Rejects a pending submission. Returns `false` without touching anything
/// when the id is unknown or the submission is already resolved.
pub async fn reject<C>(db: &C, submission_id: i64, moderator: &str) -> Result<bool>
where
    C: ConnectionTrait,
{
    let Some(pending) = find_pending(db, submission_id).await? else {
        return Ok(false);
    };

    let mut resolved: submission::ActiveModel = pending.into();
    resolved.status = Set(SubmissionStatus::Rejected);
    resolved.resolved_by = Set(Some(moderator.to_string()));
    resolved.resolved_at = Set(Some(Utc::now().naive_utc()));
    resolved.update(db).await?;
    Ok(true)
}

/// Pending submissions, oldest first.
pub async fn list_pending<C>(db: &C) -> Result<Vec<submission::Model>>
where
    C: ConnectionTrait,
{
    Submission::find()
        .filter(submission::Column::Status.eq(SubmissionStatus::Pending))
        .order_by_asc(submission::Column::CreatedAt)
        .order_by_asc(submission::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a submission by id regardless of its state.
pub async fn get_submission_by_id<C>(db: &C, submission_id: i64) -> Result<Option<submission::Model>>
where
    C: ConnectionTrait,
{
    Submission::find_by_id(submission_id)
        .one(db)
        .await
        .map_err(Into::into)
}
