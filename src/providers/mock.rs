/*!
 * Mock translator implementations for testing.
 *
 * This module provides a mock translator that simulates different behaviors:
 * - `MockProvider::identity()` - Returns the input unchanged
 * - `MockProvider::uppercase()` - Returns the input in upper case
 * - `MockProvider::failing()` - Always fails with a server error
 * - `MockProvider::rate_limited(n)` - Reports quota exhaustion for the first n calls
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::ProviderError;
use crate::providers::Translator;

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Echoes the request text
    Identity,
    /// Upper-cases the request text
    Uppercase,
    /// Always fails with an error
    Failing,
    /// Fails with a rate-limit error for the first `times` requests, then echoes
    RateLimited { times: usize },
    /// Echoes after a delay (for concurrency testing)
    Slow { delay_ms: u64 },
}

/// Mock provider for testing translation behavior
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter shared between clones
    request_count: Arc<AtomicUsize>,
    /// Every request text received, in arrival order
    requests: Arc<Mutex<Vec<String>>>,
    /// Highest number of requests seen running at once
    max_in_flight: Arc<AtomicUsize>,
    in_flight: Arc<AtomicUsize>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
            max_in_flight: Arc::new(AtomicUsize::new(0)),
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn identity() -> Self {
        Self::new(MockBehavior::Identity)
    }

    pub fn uppercase() -> Self {
        Self::new(MockBehavior::Uppercase)
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    pub fn rate_limited(times: usize) -> Self {
        Self::new(MockBehavior::RateLimited { times })
    }

    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Number of translate calls so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Copy of every request text received
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }

    /// Highest observed number of concurrent calls
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl Clone for MockProvider {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            request_count: Arc::clone(&self.request_count),
            requests: Arc::clone(&self.requests),
            max_in_flight: Arc::clone(&self.max_in_flight),
            in_flight: Arc::clone(&self.in_flight),
        }
    }
}

#[async_trait]
impl Translator for MockProvider {
    fn name(&self) -> &str {
        "Mock"
    }

    async fn translate(&self, text: &str, _target_language: &str) -> Result<String, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(text.to_string());

        match self.behavior {
            MockBehavior::Identity => Ok(text.to_string()),

            MockBehavior::Uppercase => Ok(text.to_uppercase()),

            MockBehavior::Failing => Err(ProviderError::ApiError {
                message: "Simulated provider failure".to_string(),
                status_code: 400,
            }),

            MockBehavior::RateLimited { times } => {
                if count < times {
                    Err(ProviderError::RateLimitExceeded(format!("Simulated quota exhaustion (request #{})", count + 1)))
                } else {
                    Ok(text.to_string())
                }
            }

            MockBehavior::Slow { delay_ms } => {
                let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                self.max_in_flight.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(tokio::time::Duration::from_millis(delay_ms)).await;
                self.in_flight.fetch_sub(1, Ordering::SeqCst);
                Ok(text.to_string())
            }
        }
    }
}
