//! Currency conversion against a Frankfurter-compatible exchange-rate API.
//!
//! `GET {base}/latest?from=EUR&to=USD` answers `{"rates": {"USD": 1.08}}`;
//! the converted value is `amount × rate`.

use crate::{
    config::ServicesConfig,
    core::expenses::validate_amount,
    errors::{Error, Result},
};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, error, info};

/// Body of a `/latest` response. Other fields are ignored.
#[derive(Debug, Deserialize)]
pub struct RatesResponse {
    /// Target currency code to the rate from the requested base currency
    #[serde(default)]
    pub rates: HashMap<String, f64>,
}

impl RatesResponse {
    /// Rate to `to`, or [`Error::RateUnavailable`] if the response lacks it.
    pub fn rate_for(&self, from: &str, to: &str) -> Result<f64> {
        self.rates
            .get(to)
            .copied()
            .filter(|rate| rate.is_finite() && *rate > 0.0)
            .ok_or_else(|| Error::RateUnavailable {
                from: from.to_string(),
                to: to.to_string(),
            })
    }
}

/// Normalizes a currency code to upper case and checks it is three ASCII letters.
///
/// # Errors
/// [`Error::Validation`] for anything that is not a three-letter code.
pub fn normalize_code(code: &str) -> Result<String> {
    let code = code.trim().to_ascii_uppercase();
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(code)
    } else {
        Err(Error::validation(format!("Invalid currency code '{code}'")))
    }
}

/// Client for the exchange-rate service.
///
/// Conversions always use the latest published rate; rates are not cached
/// between calls.
#[derive(Debug, Clone)]
pub struct CurrencyConverter {
    client: reqwest::Client,
    base_url: String,
}

impl CurrencyConverter {
    /// Builds a converter for the configured API base URL and timeout.
    #[must_use]
    pub fn new(config: &ServicesConfig) -> Self {
        Self {
            client: super::http_client(config),
            base_url: config.currency_api_url.trim_end_matches('/').to_string(),
        }
    }

    /// URL of the latest-rates endpoint.
    #[must_use]
    pub fn latest_url(&self) -> String {
        format!("{}/latest", self.base_url)
    }

    /// Fetches the current exchange rate from `from` to `to`.
    ///
    /// Converting a currency to itself answers `1.0` without a request.
    ///
    /// # Errors
    /// - [`Error::Validation`] for a malformed currency code
    /// - [`Error::Http`] when the request fails or times out
    /// - [`Error::HttpStatus`] for a non-2xx response
    /// - [`Error::RateUnavailable`] when the response has no usable rate
    pub async fn rate(&self, from: &str, to: &str) -> Result<f64> {
        let from = normalize_code(from)?;
        let to = normalize_code(to)?;
        if from == to {
            return Ok(1.0);
        }

        let url = self.latest_url();
        debug!(%url, %from, %to, "Fetching exchange rate");

        let response = self
            .client
            .get(&url)
            .query(&[("from", from.as_str()), ("to", to.as_str())])
            .send()
            .await
            .inspect_err(|e| error!("Currency conversion error: {e}"))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            error!(status, "Exchange rate request failed");
            return Err(Error::HttpStatus { status });
        }

        let body: RatesResponse = response.json().await?;
        body.rate_for(&from, &to)
    }

    /// Converts `amount` from one currency to another.
    ///
    /// # Errors
    /// [`Error::InvalidAmount`] unless `amount` is finite and positive; any
    /// error from [`Self::rate`].
    pub async fn convert(&self, amount: f64, from: &str, to: &str) -> Result<f64> {
        validate_amount(amount)?;
        let rate = self.rate(from, to).await?;
        let converted = amount * rate;
        info!(amount, %from, %to, rate, converted, "Converted currency");
        Ok(converted)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    fn converter(base: &str) -> CurrencyConverter {
        CurrencyConverter::new(&ServicesConfig {
            currency_api_url: base.to_string(),
            ..ServicesConfig::default()
        })
    }

    #[test]
    fn test_parse_rates_response() {
        let body: RatesResponse = serde_json::from_str(
            r#"{"amount":1.0,"base":"EUR","date":"2025-10-03","rates":{"USD":1.0845}}"#,
        )
        .unwrap();
        assert_eq!(body.rate_for("EUR", "USD").unwrap(), 1.0845);
    }

    #[test]
    fn test_missing_rate_is_unavailable() {
        let body: RatesResponse = serde_json::from_str(r#"{"message":"not found"}"#).unwrap();
        assert!(matches!(
            body.rate_for("EUR", "XYZ"),
            Err(Error::RateUnavailable { .. })
        ));
    }

    #[test]
    fn test_normalize_code() {
        assert_eq!(normalize_code(" usd ").unwrap(), "USD");
        assert!(normalize_code("US").is_err());
        assert!(normalize_code("U$D").is_err());
    }

    #[test]
    fn test_latest_url_trims_trailing_slash() {
        assert_eq!(
            converter("https://api.frankfurter.app/").latest_url(),
            "https://api.frankfurter.app/latest"
        );
    }

    #[tokio::test]
    async fn test_same_currency_needs_no_request() {
        // Unroutable base URL: any request would fail.
        let converter = converter("http://127.0.0.1:9");
        assert_eq!(converter.convert(42.0, "usd", "USD").await.unwrap(), 42.0);
    }

    #[tokio::test]
    async fn test_invalid_amount_is_rejected_before_request() {
        let converter = converter("http://127.0.0.1:9");
        assert!(matches!(
            converter.convert(-5.0, "USD", "EUR").await,
            Err(Error::InvalidAmount { .. })
        ));
    }

    #[tokio::test]
    async fn test_convert_uses_latest_rate() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/latest"))
            .and(query_param("from", "EUR"))
            .and(query_param("to", "USD"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "amount": 1.0,
                "base": "EUR",
                "date": "2025-10-03",
                "rates": { "USD": 1.25 }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let converted = converter(&server.uri()).convert(100.0, "eur", "usd").await?;
        assert_eq!(converted, 125.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/latest"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let result = converter(&server.uri()).rate("EUR", "USD").await;
        assert!(matches!(result, Err(Error::HttpStatus { status: 404 })));
    }

    #[tokio::test]
    async fn test_response_without_requested_rate() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/latest"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "rates": { "GBP": 0.85 } })),
            )
            .mount(&server)
            .await;

        let result = converter(&server.uri()).convert(10.0, "EUR", "USD").await;
        assert!(matches!(
            result,
            Err(Error::RateUnavailable { ref from, ref to }) if from == "EUR" && to == "USD"
        ));
    }
}
