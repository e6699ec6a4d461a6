//! Domain records persisted by the stores.
//!
//! All records serialize as camelCase JSON with calendar dates rendered as
//! `YYYY-MM-DD`, so a stored blob reads the same as the collection it came from.

pub mod contact;
pub mod document;
pub mod expense;
pub mod friend;
pub mod trip;
pub mod user;

pub use contact::{ContactType, EmergencyContact};
pub use document::{
    BusinessCard, Document, DocumentType, Meeting, MyBusinessCard, NewDocument, NewMeeting,
    NewTodo, TodoCategory, TodoItem, TodoPriority,
};
pub use expense::{Expense, ExpenseCategory, NewExpense, ScannedReceipt};
pub use friend::TravelFriend;
pub use trip::{ItineraryItem, ItineraryKind, NewTrip, Trip, TripMeeting, TripStatus};
pub use user::{AuthProvider, ProfileUpdate, User};

/// A record with an opaque string identifier, unique within its store.
pub trait Record {
    /// Human-readable name of the record family, used in error messages.
    const KIND: &'static str;

    /// The record's identifier.
    fn id(&self) -> &str;
}

/// Implements [`Record`] for types with a `pub id: String` field.
macro_rules! impl_record {
    ($($ty:ty => $kind:literal),+ $(,)?) => {
        $(
            impl Record for $ty {
                const KIND: &'static str = $kind;

                fn id(&self) -> &str {
                    &self.id
                }
            }
        )+
    };
}

impl_record! {
    Trip => "Trip",
    Expense => "Expense",
    ScannedReceipt => "Receipt",
    Document => "Document",
    Meeting => "Meeting",
    BusinessCard => "Business card",
    TodoItem => "Todo",
    EmergencyContact => "Emergency contact",
}
