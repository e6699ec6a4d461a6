//! Clients for the external HTTP services.
//!
//! Both are plain request/response: no retries and no caching. Each request
//! is bounded by the configured timeout.

/// Exchange-rate lookup and amount conversion
pub mod currency;
/// Text translation
pub mod translation;

pub use currency::CurrencyConverter;
pub use translation::Translator;

use crate::config::ServicesConfig;
use std::time::Duration;

/// Builds the shared HTTP client for the given service settings.
pub(crate) fn http_client(config: &ServicesConfig) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .user_agent(concat!("travel-buddy/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_default()
}
