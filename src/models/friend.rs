//! Travel friends shown in the connections feed and as meeting attendees.

use serde::{Deserialize, Serialize};

/// A travel friend. The directory is read-only and seeded from configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelFriend {
    /// Unique identifier, referenced by meetings
    pub id: String,
    /// Display name
    pub name: String,
    /// Avatar image URL
    #[serde(default)]
    pub avatar: String,
    /// Home city, e.g. `"New York, NY"`
    #[serde(default)]
    pub location: String,
    /// Presence indicator
    #[serde(default)]
    pub is_online: bool,
    /// Number of shared connections
    #[serde(default)]
    pub mutual_connections: u32,
    /// Email address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Phone number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Whether the friend is connected; defaults to `true`
    #[serde(default = "default_connected")]
    pub is_connected: bool,
}

const fn default_connected() -> bool {
    true
}
