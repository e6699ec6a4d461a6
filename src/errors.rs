//! Unified error type for `TravelBuddy`.
//!
//! Every store, storage and service operation returns [`Result`]. Nothing is
//! retried; callers log the error and surface it to the user.

use thiserror::Error;

/// Errors raised by storage, the stores and the external services
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Key-value table read or write failed
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A stored value or payload is not valid JSON for its type
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Request failed, timed out, or its body did not parse
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service answered with a non-2xx status
    #[error("HTTP error! status: {status}")]
    HttpStatus {
        /// Response status code
        status: u16,
    },

    /// Rate service answered without a usable rate
    #[error("Unable to fetch exchange rate from {from} to {to}")]
    RateUnavailable {
        /// Source currency code
        from: String,
        /// Target currency code
        to: String,
    },

    /// No record with this id
    #[error("{kind} '{id}' not found")]
    NotFound {
        /// Record family, e.g. `"Trip"`
        kind: &'static str,
        /// The id looked up
        id: String,
    },

    /// A record with this id already exists
    #[error("{kind} with id '{id}' already exists")]
    DuplicateId {
        /// Record family, e.g. `"Trip"`
        kind: &'static str,
        /// The conflicting id
        id: String,
    },

    /// Amount is not finite and positive
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: f64,
    },

    /// End date precedes start date
    #[error("Invalid date range: end {end} is before start {start}")]
    InvalidDateRange {
        /// First day
        start: chrono::NaiveDate,
        /// Last day
        end: chrono::NaiveDate,
    },

    /// User input failed a check
    #[error("Validation error: {message}")]
    Validation {
        /// Message shown to the user
        message: String,
    },

    /// The operation needs a signed-in user
    #[error("No user is signed in")]
    NotAuthenticated,

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable could not be read
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

impl Error {
    /// Shorthand for a [`Error::Validation`] with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
