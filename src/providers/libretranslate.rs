use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::ProviderError;
use crate::language_utils;
use super::{RetryPolicy, Translator, classify_status, classify_transport_error};

/// LibreTranslate client
#[derive(Debug)]
pub struct LibreTranslate {
    /// HTTP client for API requests
    client: Client,
    /// Optional API key, required by some public instances
    api_key: String,
    /// Instance base URL
    endpoint: String,
    /// Retry settings for transient failures
    retry: RetryPolicy,
}

/// LibreTranslate request body
#[derive(Debug, Serialize)]
struct LibreRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

/// LibreTranslate response, either a translation or an error message
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibreResponse {
    #[serde(default)]
    pub translated_text: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl LibreTranslate {
    /// Create a new LibreTranslate client
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

    fn api_url(&self) -> String {
        format!("{}/translate", self.endpoint.trim_end_matches('/'))
    }

    /// LibreTranslate expects bare language codes (`zh`, not `zh-CN`)
    pub fn target_code(target_language: &str) -> String {
        language_utils::primary_subtag(target_language).to_lowercase()
    }

    /// Extract the translated text from a response body
    pub fn parse_response(body: &str) -> Result<String, ProviderError> {
        let response: LibreResponse = serde_json::from_str(body)
            .map_err(|e| ProviderError::ParseError(format!("Invalid LibreTranslate response: {}", e)))?;

        match (response.translated_text, response.error) {
            (Some(text), _) => Ok(text),
            (None, Some(message)) => Err(ProviderError::ApiError { status_code: 200, message }),
            (None, None) => Err(ProviderError::ParseError("LibreTranslate response had no translatedText".to_string())),
        }
    }

    async fn send_once(&self, text: &str, target: &str) -> Result<String, ProviderError> {
        let request = LibreRequest {
            q: text,
            source: "auto",
            target,
            format: "text",
            api_key: Some(self.api_key.as_str()).filter(|key| !key.is_empty()),
        };

        let response = self.client.post(self.api_url())
            .json(&request)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(classify_transport_error)?;

        if !status.is_success() {
            error!("LibreTranslate API error ({}): {}", status, body);
            return Err(classify_status(status.as_u16(), body));
        }

        Self::parse_response(&body)
    }
}

#[async_trait]
impl Translator for LibreTranslate {
    fn name(&self) -> &str {
        "LibreTranslate"
    }

    async fn translate(&self, text: &str, target_language: &str) -> Result<String, ProviderError> {
        let target = Self::target_code(target_language);
        self.retry.run(self.name(), || self.send_once(text, &target)).await
    }
}
