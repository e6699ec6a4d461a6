//! Emergency contact records.

use serde::{Deserialize, Serialize};

/// Who an emergency number reaches
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactType {
    /// Travel insurance hotline
    Insurance,
    /// Family member or colleague
    Personal,
    /// Local emergency services
    Local,
}

/// A number to call in an emergency
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyContact {
    /// Unique identifier for the contact
    pub id: String,
    /// Who answers
    pub name: String,
    /// Phone number as dialed
    pub number: String,
    /// Who the number reaches
    #[serde(rename = "type")]
    pub contact_type: ContactType,
}
