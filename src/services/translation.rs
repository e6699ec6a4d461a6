//! Text translation against a LibreTranslate-compatible endpoint.

use crate::{
    config::ServicesConfig,
    errors::{Error, Result},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

/// Request body for `POST /translate`.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct TranslateRequest<'a> {
    /// Text to translate
    pub q: &'a str,
    /// Source language code
    pub source: &'a str,
    /// Target language code
    pub target: &'a str,
    /// Always `"text"`
    pub format: &'a str,
}

/// Successful translation response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateResponse {
    /// The translation
    pub translated_text: String,
}

/// Client for the translation service.
#[derive(Debug, Clone)]
pub struct Translator {
    client: reqwest::Client,
    url: String,
}

impl Translator {
    /// Builds a translator for the configured endpoint and timeout.
    #[must_use]
    pub fn new(config: &ServicesConfig) -> Self {
        Self {
            client: super::http_client(config),
            url: config.translate_api_url.clone(),
        }
    }

    /// Builds the request body, rejecting blank text.
    ///
    /// # Errors
    /// [`Error::Validation`] when `text` is empty or whitespace.
    pub fn request<'a>(
        text: &'a str,
        source: &'a str,
        target: &'a str,
    ) -> Result<TranslateRequest<'a>> {
        if text.trim().is_empty() {
            return Err(Error::validation("Nothing to translate"));
        }
        Ok(TranslateRequest {
            q: text,
            source,
            target,
            format: "text",
        })
    }

    /// Translates `text` from `source` to `target` (language codes such as `"en"`).
    ///
    /// # Errors
    /// - [`Error::Validation`] for blank text, before any request is sent
    /// - [`Error::Http`] when the request fails or the body does not parse
    /// - [`Error::HttpStatus`] for a non-2xx response
    pub async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String> {
        let body = Self::request(text, source, target)?;
        debug!(url = %self.url, %source, %target, "Translating text");

        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .inspect_err(|e| error!("Translation error: {e}"))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            error!(status, "Translation failed");
            return Err(Error::HttpStatus { status });
        }

        let parsed: TranslateResponse = response.json().await?;
        Ok(parsed.translated_text)
    }
}
