//! Composition root - builds every store from one storage handle.
//!
//! Stores are plain values owned by [`TravelBuddy`]; callers reach them
//! through accessors rather than through any global.

use crate::{
    config::AppConfig,
    core::{
        auth::AuthStore, documents::DocumentStore, emergency::EmergencyStore,
        expenses::ExpenseStore, friends::FriendDirectory, storage::KvStorage, trips::TripStore,
    },
    errors::Result,
    models::Trip,
    services::{CurrencyConverter, Translator},
};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::info;

/// Snapshot of the home screen.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    /// Trips not yet completed
    pub active_trips: usize,
    /// The trip in progress today, if any
    pub current_trip: Option<Trip>,
    /// Trips starting after today
    pub upcoming_trips: usize,
    /// Number of logged expenses
    pub expense_count: usize,
    /// Plain sum across currencies
    pub expense_total: f64,
    /// Expense sums per currency code
    pub expense_totals_by_currency: BTreeMap<String, f64>,
    /// To-dos not yet completed
    pub pending_todos: usize,
    /// Number of emergency contacts
    pub emergency_contacts: usize,
    /// Whether a user is signed in
    pub signed_in: bool,
}

/// Every store and service, loaded from one storage handle and configuration.
#[derive(Debug)]
pub struct TravelBuddy {
    /// Active and archived trips
    pub trips: TripStore,
    /// Expenses and receipts
    pub expenses: ExpenseStore,
    /// Documents, meetings, business cards and to-dos
    pub documents: DocumentStore,
    /// Emergency contacts
    pub emergency: EmergencyStore,
    /// Signed-in user
    pub auth: AuthStore,
    /// Travel friends from configuration
    pub friends: FriendDirectory,
    /// Exchange-rate client
    pub currency: CurrencyConverter,
    /// Translation client
    pub translator: Translator,
}

impl TravelBuddy {
    /// Loads every store. Fails on the first store whose stored data cannot be read.
    pub async fn load(storage: &KvStorage, config: &AppConfig) -> Result<Self> {
        let app = Self {
            trips: TripStore::load(storage).await?,
            expenses: ExpenseStore::load(storage, &config.default_currency).await?,
            documents: DocumentStore::load(storage, config.my_business_card.clone()).await?,
            emergency: EmergencyStore::load(storage).await?,
            auth: AuthStore::load(storage).await?,
            friends: FriendDirectory::new(config.friends.clone()),
            currency: CurrencyConverter::new(&config.services),
            translator: Translator::new(&config.services),
        };
        info!("All stores loaded");
        Ok(app)
    }

    /// Re-derives trip statuses for `today`. Returns the number of trips archived.
    pub async fn refresh(&mut self, today: NaiveDate) -> Result<usize> {
        self.trips.refresh(today).await
    }

    /// Dashboard counts as of `today`.
    #[must_use]
    pub fn summary(&self, today: NaiveDate) -> DashboardSummary {
        DashboardSummary {
            active_trips: self.trips.trips().len(),
            current_trip: self.trips.current_trip(today).cloned(),
            upcoming_trips: self.trips.upcoming_trips(today).len(),
            expense_count: self.expenses.expenses().len(),
            expense_total: self.expenses.total(),
            expense_totals_by_currency: self.expenses.totals_by_currency(),
            pending_todos: self.documents.todo_stats().pending,
            emergency_contacts: self.emergency.contacts().len(),
            signed_in: self.auth.is_authenticated(),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::models::{ExpenseCategory, TodoPriority};
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_load_empty_storage() -> Result<()> {
        let storage = setup_test_storage().await?;
        let app = TravelBuddy::load(&storage, &AppConfig::default()).await?;

        let summary = app.summary(date("2025-10-03"));
        assert_eq!(summary.active_trips, 0);
        assert!(summary.current_trip.is_none());
        assert_eq!(summary.expense_total, 0.0);
        assert!(!summary.signed_in);
        assert_eq!(app.friends.connected_friends().len(), 5);
        Ok(())
    }

    #[tokio::test]
    async fn test_summary_after_refresh_and_reload() -> Result<()> {
        let storage = setup_test_storage().await?;
        let config = AppConfig::default();
        let mut app = TravelBuddy::load(&storage, &config).await?;

        app.trips.add_trip(sample_trip("done", "2025-09-01", "2025-09-02")).await?;
        app.trips.add_trip(sample_trip("now", "2025-10-02", "2025-10-05")).await?;
        app.trips.add_trip(sample_trip("next", "2025-11-02", "2025-11-05")).await?;
        app.expenses
            .add_expense(sample_expense("e1", 45.50, "USD", ExpenseCategory::Food))
            .await?;
        app.expenses
            .add_expense(sample_expense("e2", 20.0, "EUR", ExpenseCategory::Transport))
            .await?;
        app.documents.add_todo(sample_todo("t1", TodoPriority::High)).await?;
        app.auth.sign_in(sample_user()).await?;

        let today = date("2025-10-03");
        assert_eq!(app.refresh(today).await?, 1);

        let reloaded = TravelBuddy::load(&storage, &config).await?;
        let summary = reloaded.summary(today);
        assert_eq!(summary.active_trips, 2);
        assert_eq!(summary.current_trip.map(|t| t.id), Some("now".to_string()));
        assert_eq!(summary.upcoming_trips, 1);
        assert_eq!(summary.expense_count, 2);
        assert_eq!(summary.expense_total, 65.50);
        assert_eq!(summary.expense_totals_by_currency["EUR"], 20.0);
        assert_eq!(summary.pending_todos, 1);
        assert!(summary.signed_in);
        assert_eq!(reloaded.trips.archived().len(), 1);
        Ok(())
    }
}
