//! Core business logic - framework-agnostic stores, derived views and the
//! composition root that wires them together.

/// Composition root holding every store
pub mod app;
/// Signed-in user and virtual business card
pub mod auth;
/// Generic write-through persisted collection
pub mod collection;
/// Documents, meetings, business cards and to-dos
pub mod documents;
/// Emergency contacts
pub mod emergency;
/// Expenses and scanned receipts
pub mod expenses;
/// Read-only travel friend directory
pub mod friends;
/// Key-value storage over `SQLite`
pub mod storage;
/// Trips and trip status derivation
pub mod trips;
/// vCard payload rendering
pub mod vcard;

pub use app::{DashboardSummary, TravelBuddy};
pub use storage::KvStorage;
