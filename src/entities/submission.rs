//! Submission entity - user-provided fortune text awaiting moderation.

use sea_orm::entity::prelude::*;
use sea_orm::sea_query::StringLen;
use serde::{Deserialize, Serialize};

/// Moderation state. `Approved` and `Rejected` are terminal.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    /// Waiting for a moderator
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Materialized as a fortune
    #[sea_orm(string_value = "approved")]
    Approved,
    /// Discarded; no fortune was created
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// Submission database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
    /// Submission id used by approve/reject
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Submitted text, already trimmed
    #[sea_orm(column_type = "Text")]
    pub text: String,
    /// Discord guild id; `None` makes this a global submission
    pub origin_community: Option<String>,
    /// Discord user id of the author
    pub submitted_by: String,
    /// Current moderation state
    pub status: SubmissionStatus,
    /// Fortune created on approval
    pub fortune_id: Option<i64>,
    /// Moderator who approved or rejected
    pub resolved_by: Option<String>,
    /// Submission time
    pub created_at: DateTime,
    /// Time of the approve/reject decision
    pub resolved_at: Option<DateTime>,
}

/// Standalone table, no relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
