//! Key/value bookkeeping in the `system_state` table.
//!
//! The rotation cursor, the display-id counters and the last scheduled delivery
//! date all live here. Every helper is generic over [`ConnectionTrait`] so it can
//! run inside the caller's transaction.

use crate::{
    entities::{SystemState, system_state},
    errors::{Error, Result},
};
use chrono::{NaiveDate, Utc};
use sea_orm::{Set, prelude::*};

/// Key of the preloaded rotation cursor
pub const ROTATION_CURSOR_KEY: &str = "rotation_cursor";

/// Key of the last scheduled delivery date
pub const LAST_DELIVERY_KEY: &str = "last_delivery_date";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Counter key for a display-id partition: one for global submissions and one
/// per community for guild submissions.
#[must_use]
pub fn display_counter_key(origin_community: Option<&str>) -> String {
    origin_community.map_or_else(
        || "display_id:global".to_string(),
        |community| format!("display_id:guild:{community}"),
    )
}

/// Reads a raw value.
pub async fn get_value<C>(db: &C, key: &str) -> Result<Option<String>>
where
    C: ConnectionTrait,
{
    Ok(SystemState::find_by_id(key.to_string())
        .one(db)
        .await?
        .map(|state| state.value))
}

/// Inserts or overwrites a raw value.
pub async fn set_value<C>(db: &C, key: &str, value: String) -> Result<()>
where
    C: ConnectionTrait,
{
    let now = Utc::now().naive_utc();

    if let Some(state) = SystemState::find_by_id(key.to_string()).one(db).await? {
        let mut active_model: system_state::ActiveModel = state.into();
        active_model.value = Set(value);
        active_model.updated_at = Set(now);
        active_model.update(db).await?;
    } else {
        let new_state = system_state::ActiveModel {
            key: Set(key.to_string()),
            value: Set(value),
            updated_at: Set(now),
        };
        new_state.insert(db).await?;
    }

    Ok(())
}

/// Reads an integer value, defaulting to 0 when the key is absent.
pub async fn get_integer<C>(db: &C, key: &str) -> Result<i64>
where
    C: ConnectionTrait,
{
    match get_value(db, key).await? {
        Some(raw) => raw.parse::<i64>().map_err(|e| {
            Error::Database(format!("Corrupt integer under state key {key:?}: {e}"))
        }),
        None => Ok(0),
    }
}

/// Increments the counter under `key` and returns the new value. The first
/// call for a key returns 1.
pub async fn next_counter<C>(db: &C, key: &str) -> Result<i64>
where
    C: ConnectionTrait,
{
    let next = get_integer(db, key).await? + 1;
    set_value(db, key, next.to_string()).await?;
    Ok(next)
}

/// Current offset into the ordered preloaded sequence.
pub async fn get_cursor<C>(db: &C) -> Result<i64>
where
    C: ConnectionTrait,
{
    get_integer(db, ROTATION_CURSOR_KEY).await
}

/// Moves the cursor one position forward.
pub async fn advance_cursor<C>(db: &C) -> Result<i64>
where
    C: ConnectionTrait,
{
    next_counter(db, ROTATION_CURSOR_KEY).await
}

/// Puts the cursor back to the start of the preloaded sequence.
pub async fn reset_cursor<C>(db: &C) -> Result<()>
where
    C: ConnectionTrait,
{
    set_value(db, ROTATION_CURSOR_KEY, "0".to_string()).await
}

/// Date of the last scheduled delivery, if any.
pub async fn get_last_delivery_date<C>(db: &C) -> Result<Option<NaiveDate>>
where
    C: ConnectionTrait,
{
    match get_value(db, LAST_DELIVERY_KEY).await? {
        Some(raw) => NaiveDate::parse_from_str(&raw, DATE_FORMAT)
            .map(Some)
            .map_err(|e| Error::Database(format!("Corrupt last delivery date {raw:?}: {e}"))),
        None => Ok(None),
    }
}

/// Records the date of a scheduled delivery.
pub async fn set_last_delivery_date<C>(db: &C, date: NaiveDate) -> Result<()>
where
    C: ConnectionTrait,
{
    set_value(db, LAST_DELIVERY_KEY, date.format(DATE_FORMAT).to_string()).await
}
