//! Shared test utilities.
//!
//! Helpers for setting up in-memory databases and creating fortunes in a
//! given state with sensible defaults.

use crate::{
    core::{FortuneStore, submission},
    entities,
    errors::Result,
};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// A single pooled connection keeps every query on the same in-memory database.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options).await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a [`FortuneStore`] over a fresh in-memory database.
pub async fn setup_test_store() -> Result<FortuneStore> {
    Ok(FortuneStore::new(setup_test_db().await?))
}

/// Submits and immediately approves `text`.
///
/// # Defaults
/// * `submitted_by`: `"test_author"`
/// * `approver`: `"test_moderator"`
pub async fn create_approved_fortune<C>(
    db: &C,
    text: &str,
    origin_community: Option<&str>,
) -> Result<entities::fortune::Model>
where
    C: ConnectionTrait,
{
    let pending = submission::submit(db, text, origin_community, "test_author").await?;
    submission::approve(db, pending.id, "test_moderator").await
}
