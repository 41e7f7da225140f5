/*!
 * Common test utilities for the sentsub test suite
 */

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use anyhow::Result;
use tempfile::TempDir;

use sentsub::app_config::Config;
use sentsub::app_controller::Controller;
use sentsub::providers::mock::MockProvider;
use sentsub::translation::TranslationService;

/// Route library logs through the test harness
pub fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Sample subtitle whose first sentence spans three cues
pub const SPANNING_SUBTITLE: &str = "1
00:00:01,000 --> 00:00:03,000
I never thought

2
00:00:03,000 --> 00:00:05,000
we would see

3
00:00:05,000 --> 00:00:08,000
the ocean again. Did you?

";

/// Creates a sample subtitle file for testing
pub fn create_test_subtitle(dir: &Path, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, SPANNING_SUBTITLE)
}

/// Controller backed by a mock translator
pub fn mock_controller(config: Config, mock: &MockProvider) -> Controller {
    let service = TranslationService::with_translator(
        Arc::new(mock.clone()),
        config.translation.max_concurrent_requests,
    );
    Controller::with_service(config, service)
}
