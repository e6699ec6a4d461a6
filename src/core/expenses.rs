//! Expense business logic - expense and receipt CRUD plus spending summaries.
//!
//! Amounts are kept in each entry's own currency. [`ExpenseStore::total`] is a
//! plain sum with no conversion; [`ExpenseStore::totals_by_currency`] gives the
//! per-currency breakdown.

use crate::{
    core::{
        collection::{Collection, Placement},
        storage::KvStorage,
    },
    errors::{Error, Result},
    models::{Expense, ExpenseCategory, NewExpense, ScannedReceipt},
};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::info;

/// Storage key for expenses
pub const EXPENSES_STORAGE_KEY: &str = "traveho_expenses";
/// Storage key for scanned receipts
pub const RECEIPTS_STORAGE_KEY: &str = "traveho_receipts";

/// Checks that `amount` is a usable expense amount: finite and positive.
///
/// # Errors
/// [`Error::InvalidAmount`] otherwise.
pub fn validate_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(Error::InvalidAmount { amount });
    }
    Ok(())
}

/// Display symbol of the popular currencies offered for conversion.
#[must_use]
pub fn currency_symbol(code: &str) -> Option<&'static str> {
    let symbol = match code {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" | "CNY" => "¥",
        "AUD" => "A$",
        "CAD" => "C$",
        "CHF" => "Fr",
        "INR" => "₹",
        "SGD" => "S$",
        _ => return None,
    };
    Some(symbol)
}

/// Formats an amount for display with two decimals.
///
/// Known currencies use their symbol (`"$380.50"`, `"Fr 12.00"`); any other
/// code is spelled out (`"SEK 99.00"`).
#[must_use]
pub fn format_amount(amount: f64, currency: &str) -> String {
    match currency_symbol(currency) {
        Some(symbol) if symbol.ends_with(|c: char| c.is_ascii_alphabetic()) => {
            format!("{symbol} {amount:.2}")
        }
        Some(symbol) => format!("{symbol}{amount:.2}"),
        None => format!("{currency} {amount:.2}"),
    }
}

/// Expenses and scanned receipts, both newest first.
#[derive(Debug)]
pub struct ExpenseStore {
    expenses: Collection<Expense>,
    receipts: Collection<ScannedReceipt>,
    default_currency: String,
}

impl ExpenseStore {
    /// Loads expenses and receipts. `default_currency` applies to new expenses
    /// that do not name a currency.
    pub async fn load(storage: &KvStorage, default_currency: &str) -> Result<Self> {
        Ok(Self {
            expenses: Collection::load(
                storage.clone(),
                EXPENSES_STORAGE_KEY,
                Placement::NewestFirst,
            )
            .await?,
            receipts: Collection::load(
                storage.clone(),
                RECEIPTS_STORAGE_KEY,
                Placement::NewestFirst,
            )
            .await?,
            default_currency: default_currency.to_string(),
        })
    }

    /// Expenses, newest first.
    #[must_use]
    pub fn expenses(&self) -> &[Expense] {
        self.expenses.items()
    }

    /// Scanned receipts, newest first.
    #[must_use]
    pub fn receipts(&self) -> &[ScannedReceipt] {
        self.receipts.items()
    }

    /// The expense with `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Expense> {
        self.expenses.get(id)
    }

    /// Adds a fully-formed expense as given.
    pub async fn add_expense(&mut self, expense: Expense) -> Result<&Expense> {
        self.expenses.insert(expense).await
    }

    /// Logs an expense from user input, dated `today`.
    pub async fn create_expense(
        &mut self,
        new_expense: NewExpense,
        today: NaiveDate,
    ) -> Result<&Expense> {
        if new_expense.title.trim().is_empty() {
            return Err(Error::validation("Please enter expense title"));
        }
        validate_amount(new_expense.amount)?;

        let currency = new_expense
            .currency
            .map(|c| c.trim().to_uppercase())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| self.default_currency.clone());

        let expense = Expense {
            id: self.expenses.next_id(),
            title: new_expense.title.trim().to_string(),
            amount: new_expense.amount,
            currency,
            category: new_expense.category,
            date: today,
            has_receipt: new_expense.has_receipt,
        };
        info!(
            expense_id = %expense.id,
            amount = expense.amount,
            currency = %expense.currency,
            "Logging expense"
        );
        self.expenses.insert(expense).await
    }

    /// Applies `change` to the expense with `id`.
    pub async fn update_expense<F>(&mut self, id: &str, change: F) -> Result<&Expense>
    where
        F: FnOnce(&mut Expense),
    {
        self.expenses.update(id, change).await
    }

    /// Deletes the expense with `id` and returns it.
    pub async fn delete_expense(&mut self, id: &str) -> Result<Expense> {
        self.expenses.remove(id).await
    }

    /// Adds a fully-formed receipt as given.
    pub async fn add_receipt(&mut self, receipt: ScannedReceipt) -> Result<&ScannedReceipt> {
        self.receipts.insert(receipt).await
    }

    /// Records a receipt captured `today`, optionally pointing at an image.
    pub async fn capture_receipt(
        &mut self,
        today: NaiveDate,
        image_uri: Option<String>,
    ) -> Result<&ScannedReceipt> {
        let receipt = ScannedReceipt {
            id: self.receipts.next_id(),
            date: today,
            image_uri,
        };
        self.receipts.insert(receipt).await
    }

    /// Deletes the receipt with `id` and returns it.
    pub async fn delete_receipt(&mut self, id: &str) -> Result<ScannedReceipt> {
        self.receipts.remove(id).await
    }

    /// Sum of every amount, regardless of currency.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.expenses.items().iter().map(|e| e.amount).sum()
    }

    /// Sum of amounts per currency code.
    #[must_use]
    pub fn totals_by_currency(&self) -> BTreeMap<String, f64> {
        let mut totals = BTreeMap::new();
        for expense in self.expenses.items() {
            *totals.entry(expense.currency.clone()).or_insert(0.0) += expense.amount;
        }
        totals
    }

    /// Sum of amounts per category, regardless of currency.
    #[must_use]
    pub fn totals_by_category(&self) -> BTreeMap<ExpenseCategory, f64> {
        let mut totals = BTreeMap::new();
        for expense in self.expenses.items() {
            *totals.entry(expense.category).or_insert(0.0) += expense.amount;
        }
        totals
    }

    /// Number of scanned receipts.
    #[must_use]
    pub fn receipt_count(&self) -> usize {
        self.receipts.len()
    }
}
