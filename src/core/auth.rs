//! Authenticated user state - sign in, sign out and profile edits.
//!
//! One user per device. Every operation awaits its storage write before the
//! in-memory user changes, so a failed write leaves the previous state intact.

use crate::{
    core::{storage::KvStorage, vcard::VCard},
    errors::{Error, Result},
    models::{ProfileUpdate, User},
};
use tracing::{error, info};

/// Storage key for the signed-in user
pub const AUTH_STORAGE_KEY: &str = "traveho_auth_user";

/// The signed-in user, if any.
#[derive(Debug)]
pub struct AuthStore {
    storage: KvStorage,
    user: Option<User>,
}

impl AuthStore {
    /// Restores the stored user, if any.
    pub async fn load(storage: &KvStorage) -> Result<Self> {
        let user: Option<User> = storage
            .load_json(AUTH_STORAGE_KEY)
            .await
            .inspect_err(|e| error!("Error loading stored user: {e}"))?;
        info!(authenticated = user.is_some(), "Loaded auth state");
        Ok(Self {
            storage: storage.clone(),
            user,
        })
    }

    /// The signed-in user.
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Whether someone is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Makes `user` the active user, replacing any previous one.
    pub async fn sign_in(&mut self, user: User) -> Result<&User> {
        self.persist(&user)
            .await
            .inspect_err(|e| error!("Error signing in: {e}"))?;
        info!(email = %user.email, "User signed in");
        Ok(&*self.user.insert(user))
    }

    /// Forgets the active user. Signing out while signed out is a no-op.
    pub async fn sign_out(&mut self) -> Result<()> {
        self.storage
            .remove(AUTH_STORAGE_KEY)
            .await
            .inspect_err(|e| error!("Error signing out: {e}"))?;
        self.user = None;
        info!("User signed out");
        Ok(())
    }

    /// Applies `update` to the active user's profile.
    ///
    /// # Errors
    /// [`Error::NotAuthenticated`] when nobody is signed in.
    pub async fn update_profile(&mut self, update: ProfileUpdate) -> Result<&User> {
        self.modify(|user| update.apply(user))
            .await
            .inspect_err(|e| error!("Error updating profile: {e}"))
    }

    /// Builds the vCard payload from the current profile and stores it as the
    /// user's business card QR content.
    pub async fn generate_business_card_qr(&mut self) -> Result<&User> {
        self.modify(|user| user.business_card_qr = Some(VCard::from_user(user).render()))
            .await
    }

    /// Removes the stored QR payload.
    pub async fn clear_business_card_qr(&mut self) -> Result<&User> {
        self.modify(|user| user.business_card_qr = None).await
    }

    async fn modify<F>(&mut self, change: F) -> Result<&User>
    where
        F: FnOnce(&mut User),
    {
        let mut next = self.user.clone().ok_or(Error::NotAuthenticated)?;
        change(&mut next);
        self.persist(&next).await?;
        Ok(&*self.user.insert(next))
    }

    async fn persist(&self, user: &User) -> Result<()> {
        self.storage.save_json(AUTH_STORAGE_KEY, user).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_sign_in_persists_across_reload() -> Result<()> {
        let storage = setup_test_storage().await?;
        let mut auth = AuthStore::load(&storage).await?;
        assert!(!auth.is_authenticated());

        auth.sign_in(sample_user()).await?;

        let reloaded = AuthStore::load(&storage).await?;
        assert!(reloaded.is_authenticated());
        assert_eq!(reloaded.user(), Some(&sample_user()));
        Ok(())
    }

    #[tokio::test]
    async fn test_sign_out_clears_storage() -> Result<()> {
        let storage = setup_test_storage().await?;
        let mut auth = AuthStore::load(&storage).await?;
        auth.sign_in(sample_user()).await?;
        auth.sign_out().await?;
        auth.sign_out().await?;

        assert!(auth.user().is_none());
        assert!(!AuthStore::load(&storage).await?.is_authenticated());
        Ok(())
    }

    #[tokio::test]
    async fn test_update_profile_requires_user() -> Result<()> {
        let storage = setup_test_storage().await?;
        let mut auth = AuthStore::load(&storage).await?;

        let result = auth.update_profile(ProfileUpdate::default()).await;
        assert!(matches!(result, Err(Error::NotAuthenticated)));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_profile_merges_fields() -> Result<()> {
        let storage = setup_test_storage().await?;
        let mut auth = AuthStore::load(&storage).await?;
        auth.sign_in(sample_user()).await?;

        let user = auth
            .update_profile(ProfileUpdate {
                phone_number: Some("+1-555-0100".to_string()),
                ..ProfileUpdate::default()
            })
            .await?;
        assert_eq!(user.phone_number.as_deref(), Some("+1-555-0100"));
        assert_eq!(user.name, "Alex Traveler");

        let reloaded = AuthStore::load(&storage).await?;
        assert_eq!(
            reloaded.user().unwrap().phone_number.as_deref(),
            Some("+1-555-0100")
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_business_card_qr_generate_and_clear() -> Result<()> {
        let storage = setup_test_storage().await?;
        let mut auth = AuthStore::load(&storage).await?;
        auth.sign_in(sample_user()).await?;

        let qr = auth
            .generate_business_card_qr()
            .await?
            .business_card_qr
            .clone()
            .unwrap();
        assert!(qr.starts_with("BEGIN:VCARD\nVERSION:3.0\nFN:Alex Traveler"));

        auth.clear_business_card_qr().await?;
        assert!(auth.user().unwrap().business_card_qr.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_write_keeps_previous_user() -> Result<()> {
        let storage = setup_test_storage().await?;
        let mut auth = AuthStore::load(&storage).await?;
        auth.sign_in(sample_user()).await?;

        drop_kv_table(&storage).await?;

        let result = auth
            .update_profile(ProfileUpdate {
                name: Some("Someone Else".to_string()),
                ..ProfileUpdate::default()
            })
            .await;
        assert!(result.is_err());
        assert_eq!(auth.user().unwrap().name, "Alex Traveler");
        Ok(())
    }
}
