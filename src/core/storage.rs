//! Key-value storage - whole-value JSON blobs keyed by collection name.
//!
//! This is the device storage every store persists through. Values are read
//! whole on load and overwritten whole on every write; there are no partial
//! updates and no versioning. Writes are awaited, so once a call returns `Ok`
//! the value is durable in the database.

use crate::{
    entities::{KvEntry, kv_entry},
    errors::Result,
};
use chrono::Utc;
use sea_orm::{DatabaseConnection, QueryOrder, Set, TransactionTrait, prelude::*};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, warn};

/// Handle to the key-value table. Cheap to clone; clones share one connection pool.
#[derive(Clone, Debug)]
pub struct KvStorage {
    db: DatabaseConnection,
}

impl KvStorage {
    /// Wraps an open database connection whose tables already exist.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// The underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Reads the raw string stored under `key`.
    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let entry = KvEntry::find_by_id(key.to_string()).one(&self.db).await?;
        Ok(entry.map(|e| e.value))
    }

    /// Reads and deserializes the value stored under `key`.
    ///
    /// Returns `Ok(None)` when nothing is stored. A value that does not parse
    /// is an error rather than an empty result, so a corrupt blob is never
    /// silently replaced on the next write.
    #[instrument(skip(self))]
    pub async fn load_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(raw) = self.get(key).await? else {
            debug!("No stored value");
            return Ok(None);
        };
        serde_json::from_str(&raw).map(Some).map_err(|e| {
            warn!(error = %e, "Stored value failed to parse");
            e.into()
        })
    }

    /// Serializes `value` and writes it under `key`, replacing any previous value.
    #[instrument(skip(self, value))]
    pub async fn save_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        upsert(&self.db, key, json).await?;
        debug!("Saved");
        Ok(())
    }

    /// Writes several pre-serialized values in one database transaction.
    /// Either every key is written or none is.
    #[instrument(skip(self, entries), fields(count = entries.len()))]
    pub async fn save_many(&self, entries: Vec<(String, String)>) -> Result<()> {
        let txn = self.db.begin().await?;
        for (key, value) in entries {
            upsert(&txn, &key, value).await?;
        }
        txn.commit().await?;
        Ok(())
    }

    /// Deletes the value under `key`. Removing an absent key is not an error.
    #[instrument(skip(self))]
    pub async fn remove(&self, key: &str) -> Result<()> {
        KvEntry::delete_by_id(key.to_string()).exec(&self.db).await?;
        Ok(())
    }

    /// Lists every stored key in ascending order.
    pub async fn keys(&self) -> Result<Vec<String>> {
        let entries = KvEntry::find()
            .order_by_asc(kv_entry::Column::Key)
            .all(&self.db)
            .await?;
        Ok(entries.into_iter().map(|e| e.key).collect())
    }
}

/// Inserts or overwrites the value for `key`.
async fn upsert<C>(db: &C, key: &str, value: String) -> Result<()>
where
    C: ConnectionTrait,
{
    let now = Utc::now();

    let existing = KvEntry::find_by_id(key.to_string()).one(db).await?;

    if let Some(entry) = existing {
        let mut active_model: kv_entry::ActiveModel = entry.into();
        active_model.value = Set(value);
        active_model.updated_at = Set(now);
        active_model.update(db).await?;
    } else {
        let new_entry = kv_entry::ActiveModel {
            key: Set(key.to_string()),
            value: Set(value),
            updated_at: Set(now),
        };
        new_entry.insert(db).await?;
    }

    Ok(())
}
