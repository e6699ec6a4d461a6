//! Persisted collections - an in-memory list bound to one storage key.
//!
//! Every mutation is write-through: the next state is built on a copy,
//! written to storage, and only committed in memory once the write succeeds.
//! A failed write returns the error and leaves the collection unchanged.

use crate::{
    core::storage::KvStorage,
    errors::{Error, Result},
    models::Record,
};
use chrono::Utc;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, error, info};

/// Where new items go.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// New items are prepended
    NewestFirst,
    /// New items are appended
    OldestFirst,
}

/// A list of records persisted as one JSON array under `key`.
#[derive(Debug)]
pub struct Collection<T> {
    storage: KvStorage,
    key: &'static str,
    placement: Placement,
    items: Vec<T>,
}

impl<T> Collection<T>
where
    T: Record + Clone + Serialize + DeserializeOwned,
{
    /// Loads the collection stored under `key`; an absent key yields an empty list.
    pub async fn load(storage: KvStorage, key: &'static str, placement: Placement) -> Result<Self> {
        let items: Vec<T> = storage
            .load_json(key)
            .await
            .inspect_err(|e| error!(key, "Error loading {}: {e}", T::KIND))?
            .unwrap_or_default();
        info!(key, count = items.len(), "Loaded {} collection", T::KIND);
        Ok(Self {
            storage,
            key,
            placement,
            items,
        })
    }

    /// Storage key this collection persists under.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        self.key
    }

    /// Storage handle this collection writes through.
    #[must_use]
    pub const fn storage(&self) -> &KvStorage {
        &self.storage
    }

    /// Current items in their persisted order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the collection holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The item with `id`, if present.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Whether an item with `id` is present.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Generates an id from the current time in milliseconds, bumped past any
    /// id already in the collection.
    #[must_use]
    pub fn next_id(&self) -> String {
        let mut candidate = Utc::now().timestamp_millis();
        while self.contains(&candidate.to_string()) {
            candidate += 1;
        }
        candidate.to_string()
    }

    /// Adds `item` according to the collection's [`Placement`].
    ///
    /// # Errors
    /// [`Error::DuplicateId`] if an item with the same id exists, or the
    /// storage error if the write fails.
    pub async fn insert(&mut self, item: T) -> Result<&T> {
        if self.contains(item.id()) {
            return Err(Error::DuplicateId {
                kind: T::KIND,
                id: item.id().to_string(),
            });
        }

        let mut next = self.items.clone();
        let index = match self.placement {
            Placement::NewestFirst => {
                next.insert(0, item);
                0
            }
            Placement::OldestFirst => {
                next.push(item);
                next.len() - 1
            }
        };
        self.commit(next).await?;
        Ok(&self.items[index])
    }

    /// Applies `change` to the item with `id` and persists the result.
    ///
    /// # Errors
    /// [`Error::NotFound`] for an unknown id, [`Error::Validation`] if
    /// `change` alters the id, or the storage error if the write fails.
    pub async fn update<F>(&mut self, id: &str, change: F) -> Result<&T>
    where
        F: FnOnce(&mut T),
    {
        let index = self.position(id)?;
        let mut next = self.items.clone();
        change(&mut next[index]);

        if next[index].id() != id {
            return Err(Error::validation(format!(
                "{} id cannot change from '{id}'",
                T::KIND
            )));
        }

        self.commit(next).await?;
        Ok(&self.items[index])
    }

    /// Removes exactly the item with `id` and returns it.
    ///
    /// # Errors
    /// [`Error::NotFound`] if no item has `id`, or the storage error if the
    /// write fails.
    pub async fn remove(&mut self, id: &str) -> Result<T> {
        let index = self.position(id)?;
        let mut next = self.items.clone();
        let removed = next.remove(index);
        self.commit(next).await?;
        Ok(removed)
    }

    /// Replaces the whole collection.
    pub async fn replace_all(&mut self, items: Vec<T>) -> Result<()> {
        self.commit(items).await
    }

    /// Serializes `items` as this collection's stored entry, for a write
    /// that spans several keys in one transaction.
    pub(crate) fn encode(&self, items: &[T]) -> Result<(String, String)> {
        Ok((self.key.to_string(), serde_json::to_string(items)?))
    }

    /// Adopts `items` after they were persisted by [`KvStorage::save_many`].
    pub(crate) fn set_persisted(&mut self, items: Vec<T>) {
        debug!(key = self.key, count = items.len(), "Committed");
        self.items = items;
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.items
            .iter()
            .position(|item| item.id() == id)
            .ok_or_else(|| Error::NotFound {
                kind: T::KIND,
                id: id.to_string(),
            })
    }

    async fn commit(&mut self, next: Vec<T>) -> Result<()> {
        self.storage
            .save_json(self.key, &next)
            .await
            .inspect_err(|e| error!(key = self.key, "Error saving {}: {e}", T::KIND))?;
        debug!(key = self.key, count = next.len(), "Committed");
        self.items = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::models::EmergencyContact;
    use crate::test_utils::*;

    async fn contacts(placement: Placement) -> Result<(KvStorage, Collection<EmergencyContact>)> {
        let storage = setup_test_storage().await?;
        let collection = Collection::load(storage.clone(), "contacts", placement).await?;
        Ok((storage, collection))
    }

    #[tokio::test]
    async fn test_insert_respects_placement() -> Result<()> {
        let (_, mut newest) = contacts(Placement::NewestFirst).await?;
        newest.insert(sample_contact("1", "Alice")).await?;
        newest.insert(sample_contact("2", "Bob")).await?;
        assert_eq!(newest.items()[0].id, "2");

        let (_, mut oldest) = contacts(Placement::OldestFirst).await?;
        oldest.insert(sample_contact("1", "Alice")).await?;
        oldest.insert(sample_contact("2", "Bob")).await?;
        assert_eq!(oldest.items()[0].id, "1");
        Ok(())
    }

    #[tokio::test]
    async fn test_insert_persists_and_reloads() -> Result<()> {
        let (storage, mut collection) = contacts(Placement::OldestFirst).await?;
        collection.insert(sample_contact("1", "Alice")).await?;

        let reloaded: Collection<EmergencyContact> =
            Collection::load(storage, "contacts", Placement::OldestFirst).await?;
        assert_eq!(reloaded.items(), collection.items());
        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_id_is_rejected() -> Result<()> {
        let (_, mut collection) = contacts(Placement::OldestFirst).await?;
        collection.insert(sample_contact("1", "Alice")).await?;

        let result = collection.insert(sample_contact("1", "Impostor")).await;
        assert!(matches!(result, Err(Error::DuplicateId { .. })));
        assert_eq!(collection.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_remove_deletes_exactly_one() -> Result<()> {
        let (_, mut collection) = contacts(Placement::OldestFirst).await?;
        for (id, name) in [("1", "Alice"), ("2", "Bob"), ("3", "Carol")] {
            collection.insert(sample_contact(id, name)).await?;
        }

        let removed = collection.remove("2").await?;
        assert_eq!(removed.name, "Bob");
        assert_eq!(collection.len(), 2);
        assert!(collection.contains("1"));
        assert!(collection.contains("3"));

        let missing = collection.remove("2").await;
        assert!(matches!(missing, Err(Error::NotFound { .. })));
        assert_eq!(collection.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_cannot_change_id() -> Result<()> {
        let (_, mut collection) = contacts(Placement::OldestFirst).await?;
        collection.insert(sample_contact("1", "Alice")).await?;

        let result = collection.update("1", |c| c.id = "9".to_string()).await;
        assert!(matches!(result, Err(Error::Validation { .. })));
        assert!(collection.contains("1"));
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_write_leaves_state_unchanged() -> Result<()> {
        let (storage, mut collection) = contacts(Placement::OldestFirst).await?;
        collection.insert(sample_contact("1", "Alice")).await?;

        drop_kv_table(&storage).await?;

        let result = collection.insert(sample_contact("2", "Bob")).await;
        assert!(matches!(result, Err(Error::Database(_))));
        assert_eq!(collection.len(), 1);

        let result = collection.update("1", |c| c.name = "Changed".to_string()).await;
        assert!(result.is_err());
        assert_eq!(collection.get("1").unwrap().name, "Alice");
        Ok(())
    }

    #[tokio::test]
    async fn test_next_id_skips_existing() -> Result<()> {
        let (_, mut collection) = contacts(Placement::OldestFirst).await?;
        let first = collection.next_id();
        collection.insert(sample_contact(&first, "Alice")).await?;

        let second = collection.next_id();
        assert_ne!(first, second);
        assert!(second.parse::<i64>().unwrap() >= first.parse::<i64>().unwrap());
        Ok(())
    }
}
