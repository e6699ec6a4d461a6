//! Shared test utilities for `TravelBuddy`.
//!
//! This module provides helpers for setting up an in-memory database and
//! building records with sensible defaults.

use crate::{
    config::database::{create_connection, create_tables},
    core::storage::KvStorage,
    errors::Result,
    models::{
        AuthProvider, ContactType, EmergencyContact, Expense, ExpenseCategory, Meeting, NewTrip,
        TodoCategory, TodoItem, TodoPriority, Trip, TripStatus, User,
    },
};
use chrono::NaiveDate;
use sea_orm::ConnectionTrait;

/// Creates an in-memory `SQLite` database with the key-value table initialized.
/// This is the standard setup for all store tests.
pub async fn setup_test_storage() -> Result<KvStorage> {
    let db = create_connection("sqlite::memory:").await?;
    create_tables(&db).await?;
    Ok(KvStorage::new(db))
}

/// Drops the key-value table so every following write fails.
pub async fn drop_kv_table(storage: &KvStorage) -> Result<()> {
    storage
        .connection()
        .execute_unprepared("DROP TABLE kv_entries")
        .await?;
    Ok(())
}

/// Installs triggers that abort every insert or update of `key`, so a write
/// spanning several keys fails part-way through.
pub async fn reject_writes_to(storage: &KvStorage, key: &str) -> Result<()> {
    for event in ["insert", "update"] {
        let sql = format!(
            "CREATE TRIGGER reject_{event}_{key} BEFORE {event} ON kv_entries \
             WHEN NEW.key = '{key}' BEGIN SELECT RAISE(ABORT, 'write rejected'); END"
        );
        storage.connection().execute_unprepared(&sql).await?;
    }
    Ok(())
}

/// Parses a `YYYY-MM-DD` literal.
///
/// # Panics
/// On a malformed literal; test input only.
#[allow(clippy::expect_used)]
pub fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("valid test date")
}

/// A trip to Tokyo between the given dates, initially marked upcoming.
pub fn sample_trip(id: &str, start: &str, end: &str) -> Trip {
    Trip {
        id: id.to_string(),
        destination: "Tokyo, Japan".to_string(),
        start_date: date(start),
        end_date: date(end),
        status: TripStatus::Upcoming,
        purpose: "Tech Conference".to_string(),
        image_url: String::new(),
        flight_number: Some("JL 61".to_string()),
        hotel: None,
        has_notifications: None,
        meetings: Vec::new(),
        itinerary: Vec::new(),
    }
}

pub fn sample_new_trip(start: &str, end: &str) -> NewTrip {
    NewTrip {
        destination: "Tokyo, Japan".to_string(),
        start_date: date(start),
        end_date: date(end),
        purpose: "Tech Conference".to_string(),
        flight_number: Some("JL 61".to_string()),
        hotel: Some(String::new()),
        image_url: None,
    }
}

pub fn sample_expense(id: &str, amount: f64, currency: &str, category: ExpenseCategory) -> Expense {
    Expense {
        id: id.to_string(),
        title: format!("Expense {id}"),
        amount,
        currency: currency.to_string(),
        category,
        date: date("2025-10-03"),
        has_receipt: false,
    }
}

pub fn sample_contact(id: &str, name: &str) -> EmergencyContact {
    EmergencyContact {
        id: id.to_string(),
        name: name.to_string(),
        number: "+1-555-0100".to_string(),
        contact_type: ContactType::Personal,
    }
}

pub fn sample_todo(id: &str, priority: TodoPriority) -> TodoItem {
    TodoItem {
        id: id.to_string(),
        title: format!("Todo {id}"),
        description: None,
        completed: false,
        priority,
        due_date: None,
        created_date: date("2025-10-01"),
        category: TodoCategory::General,
    }
}

/// A meeting on `on` with one named attendee ("Client") and the given friend ids.
pub fn sample_meeting(id: &str, on: &str, friend_ids: &[&str]) -> Meeting {
    Meeting {
        id: id.to_string(),
        title: "Quarterly review".to_string(),
        date: date(on),
        time: "10:00 AM".to_string(),
        duration: "1h".to_string(),
        location: None,
        attendees: vec!["Client".to_string()],
        friend_attendees: friend_ids.iter().map(|f| (*f).to_string()).collect(),
        description: None,
        has_recording: None,
        has_summary: None,
    }
}

pub fn sample_user() -> User {
    User {
        id: "user-1".to_string(),
        email: "alex@example.com".to_string(),
        name: "Alex Traveler".to_string(),
        provider: AuthProvider::Email,
        photo_url: None,
        phone_number: None,
        linked_in_profile: None,
        business_card_qr: None,
    }
}
