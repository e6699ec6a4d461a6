//! Key-value entry entity - Backs the on-device key-value storage.
//!
//! Each row holds one serialized JSON blob under a storage key, e.g.
//! `"traveho_trips"`. Stores always read and write the whole value.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Key-value storage model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "kv_entries")]
pub struct Model {
    /// Storage key, unique per entity collection
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    /// Serialized JSON value
    #[sea_orm(column_type = "Text")]
    pub value: String,
    /// When this key was last written
    pub updated_at: DateTimeUtc,
}

/// Key-value entries have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
