//! System state entity - key/value rows for rotation bookkeeping.
//! Holds the rotation cursor, the per-partition display-id counters
//! and the date of the last scheduled delivery.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Key/value row
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "system_state")]
pub struct Model {
    /// State key (e.g. `"rotation_cursor"`, `"display_id:guild:1234"`)
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    /// Value stored as string
    pub value: String,
    /// Last write time
    pub updated_at: DateTime,
}

/// Standalone table, no relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
