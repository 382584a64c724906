//! Fortune entity - a deliverable item in the rotation.
//!
//! Rows are created by the preloaded import or by approving a submission. The
//! `text` column is unique across the whole table.

use sea_orm::entity::prelude::*;
use sea_orm::sea_query::StringLen;
use serde::{Deserialize, Serialize};

/// Where a fortune came from. Governs delivery priority and display-id scope.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Bulk-imported at startup, approved by construction
    #[sea_orm(string_value = "preloaded")]
    Preloaded,
    /// Approved submission made outside any community (e.g. a direct message)
    #[sea_orm(string_value = "global")]
    Global,
    /// Approved submission made inside a community
    #[sea_orm(string_value = "guild")]
    Guild,
}

impl Provenance {
    /// Lower rank is delivered first.
    #[must_use]
    pub const fn priority(self) -> u8 {
        match self {
            Self::Guild => 0,
            Self::Global => 1,
            Self::Preloaded => 2,
        }
    }

    /// Human-facing label used in listings and posts.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Preloaded => "Batune",
            Self::Global => "Global",
            Self::Guild => "Guild",
        }
    }
}

/// Fortune database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "fortunes")]
pub struct Model {
    /// Storage id; never reused
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Sequence number scoped to (provenance, origin community); source ordinal for preloaded rows
    pub display_id: i64,
    /// The fortune itself
    #[sea_orm(column_type = "Text", unique)]
    pub text: String,
    /// Origin category
    pub provenance: Provenance,
    /// Discord guild id for guild fortunes
    pub origin_community: Option<String>,
    /// Delivered during the current rotation cycle
    pub used: bool,
    /// Submission this fortune was materialized from
    pub submission_id: Option<i64>,
    /// Discord user id of the approving moderator
    pub approved_by: Option<String>,
    /// When the underlying text entered the system
    pub created_at: DateTime,
    /// When the fortune became deliverable
    pub approved_at: DateTime,
}

/// Standalone table, no relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
