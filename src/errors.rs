/*!
 * Error types for the sentsub application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The provider reported quota exhaustion
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

impl ProviderError {
    /// Whether the provider asked us to back off
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimitExceeded(_))
    }

    /// Whether retrying the same request later may succeed
    pub fn is_transient(&self) -> bool {
        match self {
            Self::ConnectionError(_) | Self::RequestFailed(_) => true,
            Self::ApiError { status_code, .. } => *status_code >= 500,
            _ => false,
        }
    }
}

/// Errors that can occur while decoding or parsing a subtitle file
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// Unknown encoding label or bytes that are invalid in that encoding
    #[error("Failed to decode subtitle as {encoding}: {message}")]
    Decode {
        /// Encoding label that was requested
        encoding: String,
        /// What went wrong
        message: String,
    },

    /// Malformed SubRip content
    #[error("Malformed subtitle at line {line}: {message}")]
    Parse {
        /// 1-based line number where parsing stopped
        line: usize,
        /// What went wrong
        message: String,
    },
}

/// Errors that can occur during translation
#[derive(Error, Debug)]
pub enum TranslationError {
    /// A sentence group was rejected because the provider quota is exhausted
    #[error("Sentence {sentence_no} rate limited: {source}")]
    RateLimited {
        /// Sentence number of the rejected group
        sentence_no: usize,
        /// Underlying provider error
        #[source]
        source: ProviderError,
    },

    /// Any other provider failure for a sentence group
    #[error("Sentence {sentence_no} failed: {source}")]
    Provider {
        /// Sentence number of the rejected group
        sentence_no: usize,
        /// Underlying provider error
        #[source]
        source: ProviderError,
    },

    /// The translated text could not be mapped back onto its fragments
    #[error("Failed to redistribute translation: {0}")]
    Redistribution(String),
}

impl TranslationError {
    /// Wrap a provider error for the given sentence group
    pub fn from_provider(sentence_no: usize, source: ProviderError) -> Self {
        if source.is_rate_limited() {
            Self::RateLimited { sentence_no, source }
        } else {
            Self::Provider { sentence_no, source }
        }
    }

    /// Whether this failure should pause the scheduler
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}

/// Per-file error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error reading the input file
    #[error("File error: {0}")]
    File(String),

    /// Error from subtitle decoding or parsing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Error writing the output file
    #[error("Failed to write {path}: {message}")]
    Write {
        /// Output path that could not be written
        path: PathBuf,
        /// What went wrong
        message: String,
    },
}

impl AppError {
    /// Whether this failure should pause the scheduler and retry the file later
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::Translation(e) if e.is_rate_limited())
    }
}
