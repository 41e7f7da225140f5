use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::errors::ProviderError;
use super::{RetryPolicy, Translator, classify_status, classify_transport_error};

/// Google Cloud Translation (v2) client
#[derive(Debug)]
pub struct GoogleTranslate {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API base URL, e.g. `https://translation.googleapis.com`
    endpoint: String,
    /// Retry settings for transient failures
    retry: RetryPolicy,
}

/// Google translate request body
#[derive(Debug, Serialize)]
struct GoogleRequest<'a> {
    /// Text to translate
    q: &'a str,
    /// Target language tag
    target: &'a str,
    /// "text" keeps the API from HTML-escaping the result
    format: &'a str,
}

/// Google translate response
#[derive(Debug, Deserialize)]
pub struct GoogleResponse {
    pub data: GoogleResponseData,
}

#[derive(Debug, Deserialize)]
pub struct GoogleResponseData {
    pub translations: Vec<GoogleTranslation>,
}

/// One translated text
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleTranslation {
    pub translated_text: String,
    #[serde(default)]
    pub detected_source_language: Option<String>,
}

impl GoogleTranslate {
    /// Create a new Google client
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>, timeout: Duration, retry: RetryPolicy) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            retry,
        }
    }

    /// Translate endpoint with the API key as query parameter
    fn api_url(&self) -> Result<Url, ProviderError> {
        let base = if self.endpoint.is_empty() {
            "https://translation.googleapis.com"
        } else {
            self.endpoint.trim_end_matches('/')
        };

        let mut url = Url::parse(&format!("{}/language/translate/v2", base))
            .map_err(|e| ProviderError::RequestFailed(format!("Invalid Google endpoint '{}': {}", base, e)))?;
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }

    /// Extract the translated text from a response body
    pub fn parse_response(body: &str) -> Result<String, ProviderError> {
        let response: GoogleResponse = serde_json::from_str(body)
            .map_err(|e| ProviderError::ParseError(format!("Invalid Google response: {}", e)))?;

        let translation = response.data.translations.into_iter().next()
            .ok_or_else(|| ProviderError::ParseError("Google response contained no translations".to_string()))?;

        if let Some(source) = &translation.detected_source_language {
            debug!("Google detected source language: {}", source);
        }

        Ok(translation.translated_text)
    }

    /// Send one request without retrying
    async fn send_once(&self, url: &Url, text: &str, target_language: &str) -> Result<String, ProviderError> {
        let request = GoogleRequest {
            q: text,
            target: target_language,
            format: "text",
        };

        let response = self.client.post(url.clone())
            .json(&request)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(classify_transport_error)?;

        if !status.is_success() {
            error!("Google Translate API error ({}): {}", status, body);
            return Err(classify_status(status.as_u16(), body));
        }

        Self::parse_response(&body)
    }
}

#[async_trait]
impl Translator for GoogleTranslate {
    fn name(&self) -> &str {
        "Google Translate"
    }

    async fn translate(&self, text: &str, target_language: &str) -> Result<String, ProviderError> {
        let url = self.api_url()?;
        self.retry.run(self.name(), || self.send_once(&url, text, target_language)).await
    }
}
