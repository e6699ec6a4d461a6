//! Application settings loading from config.toml
//!
//! Every section has defaults, so a missing or partial config.toml still
//! produces a usable [`AppConfig`]. The `[[friends]]` entries seed the
//! read-only friend directory and `[my_business_card]` seeds the user's own
//! card until it is edited and persisted.

use crate::errors::{Error, Result};
use crate::models::{MyBusinessCard, TravelFriend};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Currency assigned to new expenses that do not name one
    pub default_currency: String,
    /// External HTTP services
    pub services: ServicesConfig,
    /// Business card used until the user saves their own
    pub my_business_card: MyBusinessCard,
    /// Travel friend directory
    pub friends: Vec<TravelFriend>,
}

/// Endpoints and limits for the currency and translation services
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServicesConfig {
    /// Base URL of the exchange-rate API (Frankfurter-compatible)
    pub currency_api_url: String,
    /// Translation endpoint (LibreTranslate-compatible)
    pub translate_api_url: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            currency_api_url: "https://api.frankfurter.app".to_string(),
            translate_api_url: "https://libretranslate.com/translate".to_string(),
            request_timeout_secs: 10,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_currency: "USD".to_string(),
            services: ServicesConfig::default(),
            my_business_card: default_business_card(),
            friends: default_friends(),
        }
    }
}

fn default_business_card() -> MyBusinessCard {
    MyBusinessCard {
        name: "John Doe".to_string(),
        company: "Tech Solutions Inc.".to_string(),
        position: "Senior Product Manager".to_string(),
        email: "john.doe@techsolutions.com".to_string(),
        phone: "+1-555-0789".to_string(),
        website: Some("www.techsolutions.com".to_string()),
        address: Some("San Francisco, CA".to_string()),
    }
}

fn friend(
    id: &str,
    name: &str,
    location: &str,
    is_online: bool,
    mutual_connections: u32,
    email: &str,
    phone: &str,
) -> TravelFriend {
    TravelFriend {
        id: id.to_string(),
        name: name.to_string(),
        avatar: String::new(),
        location: location.to_string(),
        is_online,
        mutual_connections,
        email: Some(email.to_string()),
        phone: Some(phone.to_string()),
        is_connected: true,
    }
}

fn default_friends() -> Vec<TravelFriend> {
    vec![
        friend(
            "1",
            "Sarah Johnson",
            "New York, NY",
            true,
            3,
            "sarah.johnson@email.com",
            "+1-555-0123",
        ),
        friend(
            "2",
            "Mike Chen",
            "San Francisco, CA",
            false,
            1,
            "mike.chen@email.com",
            "+1-555-0456",
        ),
        friend(
            "3",
            "Emma Wilson",
            "London, UK",
            true,
            5,
            "emma.wilson@email.com",
            "+44-20-1234-5678",
        ),
        friend(
            "4",
            "David Rodriguez",
            "Barcelona, Spain",
            true,
            2,
            "david.rodriguez@email.com",
            "+34-123-456-789",
        ),
        friend(
            "5",
            "Lisa Park",
            "Seoul, South Korea",
            false,
            4,
            "lisa.park@email.com",
            "+82-10-1234-5678",
        ),
    ]
}

/// Parses configuration from a TOML string.
///
/// # Errors
/// Returns [`Error::Config`] if the TOML syntax is invalid or a field has the
/// wrong type.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;
    parse_config(&contents)
}

/// Loads configuration from `./config.toml`, falling back to the built-in
/// defaults when the file does not exist.
pub fn load_default_config() -> Result<AppConfig> {
    let path = Path::new("config.toml");
    if path.exists() {
        load_config(path)
    } else {
        info!("No config.toml found, using built-in defaults");
        Ok(AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            default_currency = "EUR"

            [services]
            currency_api_url = "http://localhost:8080"
            translate_api_url = "http://localhost:5000/translate"
            request_timeout_secs = 3

            [my_business_card]
            name = "Ada Lovelace"
            company = "Analytical Engines"
            position = "Engineer"
            email = "ada@example.com"
            phone = "+44-1"

            [[friends]]
            id = "f1"
            name = "Grace Hopper"
            location = "Arlington, VA"

            [[friends]]
            id = "f2"
            name = "Alan Turing"
            isConnected = false
        "#;

        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.default_currency, "EUR");
        assert_eq!(config.services.currency_api_url, "http://localhost:8080");
        assert_eq!(config.services.request_timeout_secs, 3);
        assert_eq!(config.my_business_card.name, "Ada Lovelace");
        assert!(config.my_business_card.website.is_none());
        assert_eq!(config.friends.len(), 2);
        assert!(config.friends[0].is_connected);
        assert!(!config.friends[1].is_connected);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.default_currency, "USD");
        assert_eq!(config.services.currency_api_url, "https://api.frankfurter.app");
        assert_eq!(config.friends.len(), 5);
        assert_eq!(config.my_business_card.name, "John Doe");
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let result = parse_config("default_currency = 12");
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
