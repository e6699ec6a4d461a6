//! The signed-in user and profile edits.

use serde::{Deserialize, Serialize};

/// How the user signed in
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    /// Google account
    Google,
    /// Apple ID
    Apple,
    /// Email and password
    Email,
}

/// The single active user on this device
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Identifier issued by the sign-in provider
    pub id: String,
    /// Email address
    pub email: String,
    /// Display name
    pub name: String,
    /// How the user signed in
    pub provider: AuthProvider,
    /// Profile photo URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    /// Phone number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// `LinkedIn` profile URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_in_profile: Option<String>,
    /// vCard payload rendered as the virtual business card QR code
    #[serde(
        rename = "businessCardQR",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub business_card_qr: Option<String>,
}

/// Profile fields to change. `None` leaves a field as it is.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub photo_url: Option<String>,
    pub phone_number: Option<String>,
    pub linked_in_profile: Option<String>,
}

impl ProfileUpdate {
    /// Applies the set fields onto `user`.
    pub fn apply(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(photo_url) = self.photo_url {
            user.photo_url = Some(photo_url);
        }
        if let Some(phone_number) = self.phone_number {
            user.phone_number = Some(phone_number);
        }
        if let Some(linked_in_profile) = self.linked_in_profile {
            user.linked_in_profile = Some(linked_in_profile);
        }
    }
}
