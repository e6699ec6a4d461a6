//! Expense and scanned-receipt records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Expense category
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum ExpenseCategory {
    Transport,
    Food,
    Accommodation,
    Entertainment,
    Other,
}

/// A logged expense. The amount is in the entry's own currency.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Unique identifier for the expense
    pub id: String,
    /// What was paid for
    pub title: String,
    /// Positive amount in `currency`
    pub amount: f64,
    /// ISO 4217 code, e.g. `"USD"`
    pub currency: String,
    /// Spending category
    pub category: ExpenseCategory,
    /// Day the expense was logged
    pub date: NaiveDate,
    /// Whether a receipt was captured
    pub has_receipt: bool,
}

/// A captured receipt image reference
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScannedReceipt {
    /// Unique identifier for the receipt
    pub id: String,
    /// Day the receipt was captured
    pub date: NaiveDate,
    /// Local image location, when one was kept
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,
}

/// User input for logging an expense.
///
/// `currency` falls back to the configured default when `None`.
#[derive(Clone, Debug, PartialEq)]
pub struct NewExpense {
    /// What was paid for, must not be blank
    pub title: String,
    /// Must be finite and positive
    pub amount: f64,
    /// Currency code; the default currency when `None` or blank
    pub currency: Option<String>,
    /// Spending category
    pub category: ExpenseCategory,
    /// Whether a receipt was captured
    pub has_receipt: bool,
}
