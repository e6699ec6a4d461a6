//! Document metadata, scheduled meetings, business cards and to-dos.
//!
//! No file content is stored for documents, only metadata.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Kind of travel document
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    /// Flight ticket or e-ticket receipt
    Flight,
    /// Hotel reservation
    Hotel,
    /// Passport scan
    Passport,
    /// Visa or entry permit
    Visa,
    /// Boarding pass
    Boarding,
    /// Travel insurance policy
    Insurance,
    /// Vaccination certificate
    Vaccination,
    /// Anything else
    Other,
}

/// Metadata of an uploaded travel document
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Unique identifier for the document
    pub id: String,
    /// File name as picked by the user
    pub name: String,
    /// Kind of document
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    /// Day the document was added
    pub upload_date: NaiveDate,
}

/// User input for adding a document; the store assigns the id and upload date.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewDocument {
    /// File name, must not be blank
    pub name: String,
    /// Kind of document
    pub doc_type: DocumentType,
}

/// A scheduled meeting.
///
/// `friend_attendees` holds ids into the friend directory. They are not
/// checked; unknown ids are skipped when attendees are resolved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    /// Unique identifier for the meeting
    pub id: String,
    /// Meeting title
    pub title: String,
    /// Calendar day of the meeting
    pub date: NaiveDate,
    /// Start time as entered, e.g. `"09:00"`
    pub time: String,
    /// Free-text duration, e.g. `"30 min"`
    pub duration: String,
    /// Where the meeting takes place
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Free-text attendee names
    #[serde(default)]
    pub attendees: Vec<String>,
    /// Ids of travel friends attending
    #[serde(default)]
    pub friend_attendees: Vec<String>,
    /// Agenda or notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether a recording exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_recording: Option<bool>,
    /// Whether a summary has been written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_summary: Option<bool>,
}

/// User input for scheduling a meeting; the store assigns the id.
///
/// `attendees` is the raw comma-separated text from the form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewMeeting {
    /// Meeting title, must not be blank
    pub title: String,
    /// Calendar day of the meeting
    pub date: NaiveDate,
    /// Start time, e.g. `"09:00"`
    pub time: String,
    /// Free-text duration, e.g. `"30 min"`
    pub duration: String,
    /// Location; blank means none
    pub location: String,
    /// Description; blank means none
    pub description: String,
    /// Comma-separated attendee names
    pub attendees: String,
    /// Ids of selected travel friends
    pub friend_attendees: Vec<String>,
}

/// A business card collected from someone else
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessCard {
    /// Unique identifier for the card
    pub id: String,
    /// Card holder's name
    pub name: String,
    /// Company name
    pub company: String,
    /// Job title
    pub position: String,
    /// Email address
    pub email: String,
    /// Phone number
    pub phone: String,
    /// Day the card was scanned
    pub scanned_date: NaiveDate,
}

/// The user's own business card. Stored as a single value, not a collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyBusinessCard {
    /// Full name
    pub name: String,
    /// Company name
    pub company: String,
    /// Job title
    pub position: String,
    /// Email address
    pub email: String,
    /// Phone number
    pub phone: String,
    /// Company or personal website
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Free-text postal address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// To-do priority, ordered from low to high
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum TodoPriority {
    Low,
    Medium,
    High,
}

/// What a to-do relates to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TodoCategory {
    /// Meeting preparation or follow-up
    Meeting,
    /// Paperwork to obtain or upload
    Document,
    /// Travel arrangements
    Travel,
    /// Everything else
    General,
}

/// A to-do item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    /// Unique identifier for the to-do
    pub id: String,
    /// Short title
    pub title: String,
    /// Optional details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the to-do is done
    pub completed: bool,
    /// Priority
    pub priority: TodoPriority,
    /// Day the to-do is due, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// Day the to-do was created
    pub created_date: NaiveDate,
    /// What the to-do relates to
    pub category: TodoCategory,
}

/// User input for adding a to-do; the store assigns the id and creation date.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewTodo {
    /// Title, must not be blank
    pub title: String,
    /// Description; blank means none
    pub description: String,
    /// Priority
    pub priority: TodoPriority,
    /// Due day, if any
    pub due_date: Option<NaiveDate>,
    /// What the to-do relates to
    pub category: TodoCategory,
}

impl Default for NewTodo {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            priority: TodoPriority::Medium,
            due_date: None,
            category: TodoCategory::General,
        }
    }
}
