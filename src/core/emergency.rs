//! Emergency contact business logic.

use crate::{
    core::{
        collection::{Collection, Placement},
        storage::KvStorage,
    },
    errors::{Error, Result},
    models::{ContactType, EmergencyContact},
};

/// Storage key for emergency contacts
pub const EMERGENCY_CONTACTS_STORAGE_KEY: &str = "traveho_emergency_contacts";

/// Emergency contacts, in the order they were added.
#[derive(Debug)]
pub struct EmergencyStore {
    contacts: Collection<EmergencyContact>,
}

impl EmergencyStore {
    /// Loads the stored contacts.
    pub async fn load(storage: &KvStorage) -> Result<Self> {
        Ok(Self {
            contacts: Collection::load(
                storage.clone(),
                EMERGENCY_CONTACTS_STORAGE_KEY,
                Placement::OldestFirst,
            )
            .await?,
        })
    }

    /// Every contact.
    #[must_use]
    pub fn contacts(&self) -> &[EmergencyContact] {
        self.contacts.items()
    }

    /// Adds a fully-formed contact as given.
    pub async fn add_contact(&mut self, contact: EmergencyContact) -> Result<&EmergencyContact> {
        self.contacts.insert(contact).await
    }

    /// Creates a contact from user input. Name and number must not be blank.
    pub async fn create_contact(
        &mut self,
        name: &str,
        number: &str,
        contact_type: ContactType,
    ) -> Result<&EmergencyContact> {
        if name.trim().is_empty() || number.trim().is_empty() {
            return Err(Error::validation("Please fill in all fields"));
        }

        let contact = EmergencyContact {
            id: self.contacts.next_id(),
            name: name.trim().to_string(),
            number: number.trim().to_string(),
            contact_type,
        };
        self.contacts.insert(contact).await
    }

    /// Applies `change` to the contact with `id`.
    pub async fn update_contact<F>(&mut self, id: &str, change: F) -> Result<&EmergencyContact>
    where
        F: FnOnce(&mut EmergencyContact),
    {
        self.contacts.update(id, change).await
    }

    /// Deletes the contact with `id` and returns it.
    pub async fn delete_contact(&mut self, id: &str) -> Result<EmergencyContact> {
        self.contacts.remove(id).await
    }

    /// Contacts of one type.
    #[must_use]
    pub fn by_type(&self, contact_type: ContactType) -> Vec<&EmergencyContact> {
        self.contacts
            .items()
            .iter()
            .filter(|c| c.contact_type == contact_type)
            .collect()
    }
}
