/*!
 * Provider implementations for machine translation services.
 *
 * This module contains client implementations for the supported services:
 * - Google: Google Cloud Translation v2 REST API
 * - LibreTranslate: self-hosted or public LibreTranslate instance
 * - Mock: configurable in-process translator used by tests
 */

use async_trait::async_trait;
use log::warn;
use std::fmt::Debug;
use std::future::Future;
use std::time::Duration;

use crate::errors::ProviderError;

/// Common trait for all translation providers
///
/// Implementations translate one request string into the target language and
/// classify failures so callers can tell quota exhaustion from other errors.
#[async_trait]
pub trait Translator: Send + Sync + Debug {
    /// Human readable provider name for logs
    fn name(&self) -> &str;

    /// Translate text into the target language
    ///
    /// # Arguments
    /// * `text` - The text to translate
    /// * `target_language` - Target language tag such as `zh-CN`
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The translated text or a classified error
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, ProviderError>;
}

/// Retry settings for transient transport failures
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Base backoff time in milliseconds for exponential backoff
    pub backoff_base_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            backoff_base_ms: 1000,
        }
    }
}

impl RetryPolicy {
    /// Backoff before the given retry (1-based): base, 2x base, 4x base, ...
    pub fn backoff(&self, attempt: u32) -> Duration {
        let shift = attempt.saturating_sub(1).min(16);
        Duration::from_millis(self.backoff_base_ms.saturating_mul(1u64 << shift))
    }

    /// Run an operation, retrying only errors that are transient
    ///
    /// Rate-limit and client errors are returned at once; the scheduler owns
    /// the cooldown for quota exhaustion.
    pub async fn run<T, F, Fut>(&self, provider: &str, mut operation: F) -> Result<T, ProviderError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ProviderError>>,
    {
        let mut attempt = 0;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    attempt += 1;
                    let backoff = self.backoff(attempt);
                    warn!("{} request failed: {} - retrying in {:?} (attempt {}/{})",
                        provider, e, backoff, attempt + 1, self.max_retries + 1);
                    tokio::time::sleep(backoff).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Classify a non-success HTTP status
///
/// 403 is how Google reports an exhausted quota; 429 is the generic form.
pub fn classify_status(status_code: u16, body: String) -> ProviderError {
    match status_code {
        401 => ProviderError::AuthenticationError(body),
        403 | 429 => ProviderError::RateLimitExceeded(body),
        _ => ProviderError::ApiError { status_code, message: body },
    }
}

/// Map a reqwest transport failure to a provider error
pub fn classify_transport_error(error: reqwest::Error) -> ProviderError {
    if error.is_timeout() || error.is_connect() {
        ProviderError::ConnectionError(error.to_string())
    } else if error.is_decode() {
        ProviderError::ParseError(error.to_string())
    } else {
        ProviderError::RequestFailed(error.to_string())
    }
}

pub mod google;
pub mod libretranslate;
pub mod mock;
