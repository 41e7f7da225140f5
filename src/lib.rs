/*!
 * # sentsub - Sentence-aware subtitle translator
 *
 * A Rust library that translates SubRip subtitles one sentence at a time,
 * even when a sentence runs over several timed cues, and writes the
 * translation under each original line.
 *
 * ## Features
 *
 * - Sentence segmentation that carries open sentences across cues
 * - One provider call per sentence, with bounded concurrency per file
 * - Proportional redistribution of each translated sentence onto its cues
 * - Translation through machine translation services:
 *   - Google Cloud Translation v2
 *   - LibreTranslate
 * - Directory mode with a throttled batch scheduler that pauses and retries
 *   when the provider quota is exhausted
 * - Input decoding for any WHATWG encoding label (`utf-8`, `gbk`, `big5`, ...)
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `subtitle_processor`: SubRip parsing and serialization
 * - `text_decoder`: Character decoding of raw subtitle bytes
 * - `translation`: Sentence-aware translation:
 *   - `translation::formatting`: Annotation line removal
 *   - `translation::segmentation`: Fragments and sentence groups
 *   - `translation::core`: Provider-backed translation service
 *   - `translation::batch`: Per-sentence translation and proportional split
 *   - `translation::merge`: Appending translations onto cues
 * - `scheduler`: Throttled, pausable directory scheduler
 * - `file_utils`: Discovery, output naming and atomic writes
 * - `app_controller`: Single-file pipeline and run modes
 * - `language_utils`: Language tag validation
 * - `providers`: Client implementations for translation services:
 *   - `providers::google`: Google Cloud Translation client
 *   - `providers::libretranslate`: LibreTranslate client
 *   - `providers::mock`: Configurable test double
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod file_utils;
pub mod subtitle_processor;
pub mod text_decoder;
pub mod translation;
pub mod scheduler;
pub mod app_controller;
pub mod language_utils;
pub mod providers;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use scheduler::{FileProcessor, Scheduler, SchedulerState};
pub use subtitle_processor::{SubtitleCollection, SubtitleEntry};
pub use translation::TranslationService;
pub use language_utils::{validate_language_tag, get_language_name};
pub use errors::{AppError, ProviderError, SubtitleError, TranslationError};
