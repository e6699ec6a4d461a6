//! Trip records and their nested meetings and itinerary items.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Where a trip stands relative to today.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripStatus {
    /// Starts after today
    Upcoming,
    /// Today falls within the trip's dates
    Current,
    /// Ended before today
    Completed,
}

/// A business trip
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    /// Unique identifier for the trip
    pub id: String,
    /// City and country, e.g. `"Tokyo, Japan"`
    pub destination: String,
    /// First day of the trip
    pub start_date: NaiveDate,
    /// Last day of the trip, inclusive
    pub end_date: NaiveDate,
    /// Status as of the last refresh
    pub status: TripStatus,
    /// Reason for travelling
    pub purpose: String,
    /// Cover image URL
    #[serde(default)]
    pub image_url: String,
    /// Outbound flight, e.g. `"JL 61"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight_number: Option<String>,
    /// Hotel name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel: Option<String>,
    /// Whether reminders are enabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_notifications: Option<bool>,
    /// Meetings shown on the trip card
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub meetings: Vec<TripMeeting>,
    /// Day-by-day itinerary
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub itinerary: Vec<ItineraryItem>,
}

/// A meeting slot shown on a trip card
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct TripMeeting {
    pub id: String,
    pub title: String,
    /// Display time, e.g. `"10:00 AM"`
    pub time: String,
    /// Number of attendees
    pub attendees: u32,
}

/// Kind of itinerary entry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum ItineraryKind {
    Flight,
    Meeting,
    Hotel,
    Transport,
    Meal,
}

/// One line of a trip's itinerary
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryItem {
    /// Unique within the trip
    pub id: String,
    /// Display time, e.g. `"2:30 PM"`
    pub time: String,
    /// What happens
    pub title: String,
    /// Kind of entry
    #[serde(rename = "type")]
    pub kind: ItineraryKind,
    /// Where it happens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// User input for creating a trip; the store assigns the id and status.
#[derive(Clone, Debug, PartialEq)]
pub struct NewTrip {
    /// Destination, must not be blank
    pub destination: String,
    /// First day
    pub start_date: NaiveDate,
    /// Last day; must not be before `start_date` or today
    pub end_date: NaiveDate,
    /// Purpose, must not be blank
    pub purpose: String,
    /// Outbound flight; blank means none
    pub flight_number: Option<String>,
    /// Hotel; blank means none
    pub hotel: Option<String>,
    /// Cover image; a stock image when `None`
    pub image_url: Option<String>,
}
