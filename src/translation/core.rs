/*!
 * Core translation service implementation.
 *
 * This module contains the TranslationService struct, which owns the
 * configured provider client and exposes a single text translation call.
 */

use std::sync::Arc;
use log::debug;

use crate::app_config::{TranslationConfig, TranslationProvider};
use crate::errors::ProviderError;
use crate::providers::google::GoogleTranslate;
use crate::providers::libretranslate::LibreTranslate;
use crate::providers::{RetryPolicy, Translator};

/// Translation service wrapping one provider
#[derive(Clone, Debug)]
pub struct TranslationService {
    /// Provider client
    provider: Arc<dyn Translator>,

    /// Maximum concurrent provider calls per file
    max_concurrent_requests: usize,
}

impl TranslationService {
    /// Build the service for the provider selected in the configuration
    pub fn new(config: &TranslationConfig) -> Self {
        let retry = RetryPolicy {
            max_retries: config.retry_count,
            backoff_base_ms: config.retry_backoff_ms,
        };
        let api_key = config.get_api_key();
        let endpoint = config.get_endpoint();
        let timeout = config.get_timeout();

        let provider: Arc<dyn Translator> = match config.provider {
            TranslationProvider::Google => Arc::new(GoogleTranslate::new(api_key, endpoint, timeout, retry)),
            TranslationProvider::LibreTranslate => Arc::new(LibreTranslate::new(api_key, endpoint, timeout, retry)),
        };

        Self::with_translator(provider, config.max_concurrent_requests)
    }

    /// Build the service around an existing translator
    pub fn with_translator(provider: Arc<dyn Translator>, max_concurrent_requests: usize) -> Self {
        Self {
            provider,
            max_concurrent_requests: max_concurrent_requests.max(1),
        }
    }

    /// Name of the underlying provider
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Upper bound on concurrent calls for one file
    pub fn max_concurrent_requests(&self) -> usize {
        self.max_concurrent_requests
    }

    /// Translate one request string
    pub async fn translate_text(&self, text: &str, target_language: &str) -> Result<String, ProviderError> {
        debug!("Translating {} chars to {} via {}", text.chars().count(), target_language, self.provider.name());
        self.provider.translate(text, target_language).await
    }
}
