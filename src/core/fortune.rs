//! Fortune store operations.
//!
//! Deduplicated storage of deliverable fortunes plus the mutators the rotation
//! selector relies on. Functions are generic over [`ConnectionTrait`] so the
//! caller decides the transaction boundary; [`crate::core::store::FortuneStore`]
//! wraps each public operation in one transaction behind its write gate.

use crate::{
    entities::{Fortune, Submission, SubmissionStatus, fortune, fortune::Provenance, submission},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, prelude::*, sea_query::Expr};

/// Normalizes user or file supplied text. Empty text is rejected.
pub fn normalize_text(text: &str) -> Result<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput {
            message: "Fortune text cannot be empty".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

/// Returns true if `text` is already a fortune or a pending submission.
///
/// Matching is exact and case-sensitive. Rejected and approved submissions are
/// not counted; an approved one already exists as a fortune.
pub async fn text_exists<C>(db: &C, text: &str) -> Result<bool>
where
    C: ConnectionTrait,
{
    let as_fortune = Fortune::find()
        .filter(fortune::Column::Text.eq(text))
        .count(db)
        .await?;
    if as_fortune > 0 {
        return Ok(true);
    }

    let as_pending = Submission::find()
        .filter(submission::Column::Text.eq(text))
        .filter(submission::Column::Status.eq(SubmissionStatus::Pending))
        .count(db)
        .await?;
    Ok(as_pending > 0)
}

/// Inserts one preloaded fortune.
///
/// # Errors
/// - `InvalidInput` if the ordinal is not positive or the text is empty
/// - `Duplicate` if the text already exists anywhere in the store
pub async fn insert_preloaded<C>(db: &C, ordinal: i64, text: &str) -> Result<fortune::Model>
where
    C: ConnectionTrait,
{
    if ordinal < 1 {
        return Err(Error::InvalidInput {
            message: format!("Preloaded ordinal must be positive, got {ordinal}"),
        });
    }
    let text = normalize_text(text)?;
    if text_exists(db, &text).await? {
        return Err(Error::Duplicate { text });
    }

    let now = Utc::now().naive_utc();
    let model = fortune::ActiveModel {
        display_id: Set(ordinal),
        text: Set(text),
        provenance: Set(Provenance::Preloaded),
        origin_community: Set(None),
        used: Set(false),
        submission_id: Set(None),
        approved_by: Set(None),
        created_at: Set(now),
        approved_at: Set(now),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

/// Retrieves a fortune by storage id.
pub async fn get_fortune_by_id<C>(db: &C, fortune_id: i64) -> Result<Option<fortune::Model>>
where
    C: ConnectionTrait,
{
    Fortune::find_by_id(fortune_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Deletes a guild fortune. Preloaded and global fortunes are protected and
/// unknown ids are ignored; both return `false`.
pub async fn remove<C>(db: &C, fortune_id: i64) -> Result<bool>
where
    C: ConnectionTrait,
{
    let result = Fortune::delete_many()
        .filter(fortune::Column::Id.eq(fortune_id))
        .filter(fortune::Column::Provenance.eq(Provenance::Guild))
        .exec(db)
        .await?;
    Ok(result.rows_affected > 0)
}

/// Flags a fortune as delivered in the current cycle.
pub async fn mark_used<C>(db: &C, fortune_id: i64) -> Result<fortune::Model>
where
    C: ConnectionTrait,
{
    let mut active: fortune::ActiveModel = Fortune::find_by_id(fortune_id)
        .one(db)
        .await?
        .ok_or(Error::FortuneNotFound { id: fortune_id })?
        .into();
    active.used = Set(true);
    active.update(db).await.map_err(Into::into)
}

/// Clears the `used` flag on every fortune.
pub async fn reset_all_used<C>(db: &C) -> Result<u64>
where
    C: ConnectionTrait,
{
    let result = Fortune::update_many()
        .col_expr(fortune::Column::Used, Expr::value(false))
        .filter(fortune::Column::Used.eq(true))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// All fortunes, guild first, then global, then preloaded; each tier by
/// community and display id.
pub async fn list_fortunes<C>(db: &C) -> Result<Vec<fortune::Model>>
where
    C: ConnectionTrait,
{
    let mut fortunes = Fortune::find()
        .order_by_asc(fortune::Column::DisplayId)
        .order_by_asc(fortune::Column::Id)
        .all(db)
        .await?;
    fortunes.sort_by(|a, b| {
        a.provenance
            .priority()
            .cmp(&b.provenance.priority())
            .then_with(|| a.origin_community.cmp(&b.origin_community))
            .then_with(|| a.display_id.cmp(&b.display_id))
            .then_with(|| a.id.cmp(&b.id))
    });
    Ok(fortunes)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::submission;
    use crate::test_utils::*;

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("  hello  ").unwrap(), "hello");
        assert!(matches!(
            normalize_text("   "),
            Err(Error::InvalidInput { .. })
        ));
    }

    #[tokio::test]
    async fn test_insert_preloaded() -> Result<()> {
        let db = setup_test_db().await?;

        let fortune = insert_preloaded(&db, 5, "  A journey begins.  ").await?;
        assert_eq!(fortune.display_id, 5);
        assert_eq!(fortune.text, "A journey begins.");
        assert_eq!(fortune.provenance, Provenance::Preloaded);
        assert!(!fortune.used);
        assert!(fortune.origin_community.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_insert_preloaded_rejects_duplicates_and_bad_ordinals() -> Result<()> {
        let db = setup_test_db().await?;
        insert_preloaded(&db, 1, "Same text").await?;

        let duplicate = insert_preloaded(&db, 2, "Same text").await;
        assert!(matches!(duplicate, Err(Error::Duplicate { .. })));

        let bad_ordinal = insert_preloaded(&db, 0, "Other text").await;
        assert!(matches!(bad_ordinal, Err(Error::InvalidInput { .. })));

        let empty = insert_preloaded(&db, 3, "  ").await;
        assert!(matches!(empty, Err(Error::InvalidInput { .. })));

        assert_eq!(Fortune::find().count(&db).await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_text_exists_is_case_sensitive() -> Result<()> {
        let db = setup_test_db().await?;
        insert_preloaded(&db, 1, "Lucky day").await?;

        assert!(text_exists(&db, "Lucky day").await?);
        assert!(!text_exists(&db, "lucky day").await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_text_exists_covers_pending_submissions() -> Result<()> {
        let db = setup_test_db().await?;
        let pending = submission::submit(&db, "Pending text", Some("1"), "author").await?;
        assert!(text_exists(&db, "Pending text").await?);

        submission::reject(&db, pending.id, "mod").await?;
        assert!(!text_exists(&db, "Pending text").await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_remove_only_guild_fortunes() -> Result<()> {
        let db = setup_test_db().await?;
        let preloaded = insert_preloaded(&db, 1, "Protected").await?;
        let global = create_approved_fortune(&db, "Global one", None).await?;
        let guild = create_approved_fortune(&db, "Guild one", Some("9")).await?;

        assert!(!remove(&db, preloaded.id).await?);
        assert!(!remove(&db, global.id).await?);
        assert!(!remove(&db, 9999).await?);
        assert!(remove(&db, guild.id).await?);
        assert!(!remove(&db, guild.id).await?);

        assert!(get_fortune_by_id(&db, preloaded.id).await?.is_some());
        assert!(get_fortune_by_id(&db, guild.id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_mark_used_and_reset() -> Result<()> {
        let db = setup_test_db().await?;
        let first = insert_preloaded(&db, 1, "One").await?;
        let second = insert_preloaded(&db, 2, "Two").await?;

        assert!(mark_used(&db, first.id).await?.used);
        assert!(mark_used(&db, second.id).await?.used);
        assert!(matches!(
            mark_used(&db, 404).await,
            Err(Error::FortuneNotFound { id: 404 })
        ));

        assert_eq!(reset_all_used(&db).await?, 2);
        let all = list_fortunes(&db).await?;
        assert!(all.iter().all(|f| !f.used));
        Ok(())
    }

    #[tokio::test]
    async fn test_list_orders_by_tier_then_display_id() -> Result<()> {
        let db = setup_test_db().await?;
        insert_preloaded(&db, 2, "Preloaded two").await?;
        insert_preloaded(&db, 1, "Preloaded one").await?;
        create_approved_fortune(&db, "Global", None).await?;
        create_approved_fortune(&db, "Guild", Some("5")).await?;

        let texts: Vec<String> = list_fortunes(&db)
            .await?
            .into_iter()
            .map(|f| f.text)
            .collect();
        assert_eq!(
            texts,
            vec!["Guild", "Global", "Preloaded one", "Preloaded two"]
        );
        Ok(())
    }
}
