//! Rotation selector - decides which fortune is delivered next.
//!
//! Priority is strict: unused guild fortunes (oldest approval first), then
//! unused global fortunes (lowest display id first), then the preloaded archive
//! in ordinal order at the rotation cursor. When nothing is left the whole pool
//! is reset once and the selection retried; a second miss means the store has
//! nothing to deliver.

use crate::{
    core::{fortune as fortune_ops, state},
    entities::{Fortune, fortune, fortune::Provenance},
    errors::Result,
};
use sea_orm::{QueryOrder, QuerySelect, prelude::*};
use tracing::{debug, info};

/// Oldest unused guild fortune by approval time.
async fn next_guild<C>(db: &C) -> Result<Option<fortune::Model>>
where
    C: ConnectionTrait,
{
    Fortune::find()
        .filter(fortune::Column::Provenance.eq(Provenance::Guild))
        .filter(fortune::Column::Used.eq(false))
        .order_by_asc(fortune::Column::ApprovedAt)
        .order_by_asc(fortune::Column::Id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Unused global fortune with the lowest display id.
async fn next_global<C>(db: &C) -> Result<Option<fortune::Model>>
where
    C: ConnectionTrait,
{
    Fortune::find()
        .filter(fortune::Column::Provenance.eq(Provenance::Global))
        .filter(fortune::Column::Used.eq(false))
        .order_by_asc(fortune::Column::DisplayId)
        .order_by_asc(fortune::Column::Id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Preloaded fortune at the cursor position, if it is still unused.
async fn preloaded_at_cursor<C>(db: &C) -> Result<Option<fortune::Model>>
where
    C: ConnectionTrait,
{
    let cursor = state::get_cursor(db).await?;
    let Ok(offset) = u64::try_from(cursor) else {
        return Ok(None);
    };

    let candidate = Fortune::find()
        .filter(fortune::Column::Provenance.eq(Provenance::Preloaded))
        .order_by_asc(fortune::Column::DisplayId)
        .order_by_asc(fortune::Column::Id)
        .offset(offset)
        .limit(1)
        .one(db)
        .await?;

    Ok(candidate.filter(|f| !f.used))
}

/// One pass over the three tiers without resetting.
async fn select_once<C>(db: &C) -> Result<Option<fortune::Model>>
where
    C: ConnectionTrait,
{
    if let Some(candidate) = next_guild(db).await? {
        return fortune_ops::mark_used(db, candidate.id).await.map(Some);
    }

    if let Some(candidate) = next_global(db).await? {
        return fortune_ops::mark_used(db, candidate.id).await.map(Some);
    }

    if let Some(candidate) = preloaded_at_cursor(db).await? {
        let delivered = fortune_ops::mark_used(db, candidate.id).await?;
        state::advance_cursor(db).await?;
        return Ok(Some(delivered));
    }

    Ok(None)
}

/// Clears every `used` flag and rewinds the cursor, starting a new cycle.
pub async fn reset_cycle<C>(db: &C) -> Result<()>
where
    C: ConnectionTrait,
{
    let cleared = fortune_ops::reset_all_used(db).await?;
    state::reset_cursor(db).await?;
    info!(cleared, "Rotation cycle reset");
    Ok(())
}

/// Selects the next fortune and marks it used.
///
/// Returns `Ok(None)` when the store holds nothing deliverable even after one
/// reset. Callers must run this inside a single transaction so selection and
/// marking are atomic.
pub async fn select_next<C>(db: &C) -> Result<Option<fortune::Model>>
where
    C: ConnectionTrait,
{
    if let Some(delivered) = select_once(db).await? {
        debug!(id = delivered.id, provenance = ?delivered.provenance, "Selected fortune");
        return Ok(Some(delivered));
    }

    reset_cycle(db).await?;
    let retried = select_once(db).await?;
    if retried.is_none() {
        debug!("No fortunes available after reset");
    }
    Ok(retried)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::fortune::insert_preloaded;
    use crate::core::submission;
    use crate::test_utils::*;
    use std::collections::HashSet;

    async fn next_text<C: ConnectionTrait>(db: &C) -> Result<Option<String>> {
        Ok(select_next(db).await?.map(|f| f.text))
    }

    #[tokio::test]
    async fn test_empty_store_returns_none() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(select_next(&db).await?.is_none());
        assert!(select_next(&db).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_preloaded_exhaustion_and_replay() -> Result<()> {
        let db = setup_test_db().await?;
        insert_preloaded(&db, 3, "Third").await?;
        insert_preloaded(&db, 1, "First").await?;
        insert_preloaded(&db, 2, "Second").await?;

        assert_eq!(next_text(&db).await?.as_deref(), Some("First"));
        assert_eq!(next_text(&db).await?.as_deref(), Some("Second"));
        assert_eq!(next_text(&db).await?.as_deref(), Some("Third"));
        assert_eq!(state::get_cursor(&db).await?, 3);

        // Wraps around
        assert_eq!(next_text(&db).await?.as_deref(), Some("First"));
        assert_eq!(state::get_cursor(&db).await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_priority_guild_then_global_then_preloaded() -> Result<()> {
        let db = setup_test_db().await?;
        insert_preloaded(&db, 1, "Preloaded").await?;
        create_approved_fortune(&db, "Global", None).await?;
        create_approved_fortune(&db, "Guild", Some("10")).await?;

        assert_eq!(next_text(&db).await?.as_deref(), Some("Guild"));
        assert_eq!(next_text(&db).await?.as_deref(), Some("Global"));
        assert_eq!(next_text(&db).await?.as_deref(), Some("Preloaded"));
        Ok(())
    }

    #[tokio::test]
    async fn test_guild_fortunes_by_approval_order() -> Result<()> {
        let db = setup_test_db().await?;
        let early = submission::submit(&db, "Submitted first", Some("1"), "a").await?;
        let late = submission::submit(&db, "Submitted second", Some("2"), "b").await?;

        // Approval order, not submission order, decides
        submission::approve(&db, late.id, "mod").await?;
        submission::approve(&db, early.id, "mod").await?;

        assert_eq!(next_text(&db).await?.as_deref(), Some("Submitted second"));
        assert_eq!(next_text(&db).await?.as_deref(), Some("Submitted first"));
        Ok(())
    }

    #[tokio::test]
    async fn test_pending_submissions_are_never_delivered() -> Result<()> {
        let db = setup_test_db().await?;
        submission::submit(&db, "Still pending", Some("1"), "a").await?;
        insert_preloaded(&db, 1, "Only preloaded").await?;

        for _ in 0..3 {
            assert_eq!(next_text(&db).await?.as_deref(), Some("Only preloaded"));
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_no_double_delivery_within_cycle() -> Result<()> {
        let db = setup_test_db().await?;
        for i in 1..=4 {
            insert_preloaded(&db, i, &format!("Preloaded {i}")).await?;
        }
        create_approved_fortune(&db, "Guild", Some("1")).await?;
        create_approved_fortune(&db, "Global", None).await?;

        let mut seen = HashSet::new();
        for _ in 0..6 {
            let delivered = select_next(&db).await?.unwrap();
            assert!(seen.insert(delivered.id), "delivered {} twice", delivered.id);
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_submissions_only_pool_replays_after_reset() -> Result<()> {
        let db = setup_test_db().await?;
        create_approved_fortune(&db, "Lonely guild fortune", Some("1")).await?;

        assert_eq!(
            next_text(&db).await?.as_deref(),
            Some("Lonely guild fortune")
        );
        assert_eq!(
            next_text(&db).await?.as_deref(),
            Some("Lonely guild fortune")
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_used_item_at_cursor_triggers_reset() -> Result<()> {
        let db = setup_test_db().await?;
        let first = insert_preloaded(&db, 1, "First").await?;
        insert_preloaded(&db, 2, "Second").await?;
        fortune_ops::mark_used(&db, first.id).await?;

        // Cursor 0 points at an already-used item, so the cycle restarts
        assert_eq!(next_text(&db).await?.as_deref(), Some("First"));
        assert_eq!(next_text(&db).await?.as_deref(), Some("Second"));
        Ok(())
    }

    #[tokio::test]
    async fn test_reset_cycle_restarts_preloaded_sequence() -> Result<()> {
        let db = setup_test_db().await?;
        insert_preloaded(&db, 1, "First").await?;
        insert_preloaded(&db, 2, "Second").await?;

        assert_eq!(next_text(&db).await?.as_deref(), Some("First"));
        reset_cycle(&db).await?;
        assert_eq!(next_text(&db).await?.as_deref(), Some("First"));
        Ok(())
    }
}
