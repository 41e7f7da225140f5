/*!
 * End-to-end tests of the single file pipeline
 */

use std::fs;
use sentsub::app_config::Config;
use sentsub::errors::AppError;
use sentsub::providers::mock::MockProvider;

use crate::common::{create_temp_dir, create_test_file, create_test_subtitle, init_test_logger, mock_controller};

#[tokio::test]
async fn test_translate_file_withSpanningSentence_shouldSendOneRequestPerSentence() {
    init_test_logger();
    let dir = create_temp_dir().unwrap();
    let input = create_test_subtitle(dir.path(), "ocean.srt").unwrap();

    let mock = MockProvider::uppercase();
    let output = mock_controller(Config::default(), &mock).translate_file(&input).await.unwrap();

    let mut requests = mock.requests();
    requests.sort();
    assert_eq!(requests, vec![
        " Did you?".to_string(),
        "I never thought we would see the ocean again.".to_string(),
    ]);

    let written = fs::read_to_string(output).unwrap();
    assert_eq!(written, "1
00:00:01,000 --> 00:00:03,000
I never thought
I NEVER THOUGHT

2
00:00:03,000 --> 00:00:05,000
we would see
WE WOULD SEE

3
00:00:05,000 --> 00:00:08,000
the ocean again. Did you?
THE OCEAN AGAIN. DID YOU?

");
}

#[tokio::test]
async fn test_translate_file_withAnnotations_shouldDropMarkedLines() {
    let dir = create_temp_dir().unwrap();
    let input = create_test_file(dir.path(), "notes.srt",
        "1\n00:00:01,000 --> 00:00:02,000\nGood morning.\n---- translator note\n\n").unwrap();

    let mock = MockProvider::identity();
    let output = mock_controller(Config::default(), &mock).translate_file(&input).await.unwrap();

    assert_eq!(mock.requests(), vec!["Good morning.".to_string()]);
    let written = fs::read_to_string(output).unwrap();
    assert_eq!(written, "1\n00:00:01,000 --> 00:00:02,000\nGood morning.\nGood morning.\n\n");
}

#[tokio::test]
async fn test_translate_file_withGbkInput_shouldDecodeWithConfiguredEncoding() {
    let dir = create_temp_dir().unwrap();
    let content = "1\n00:00:01,000 --> 00:00:02,000\n你好。\n\n";
    let (bytes, _, had_errors) = encoding_rs::GBK.encode(content);
    assert!(!had_errors);
    let input = dir.path().join("gbk.srt");
    fs::write(&input, &bytes).unwrap();

    let config = Config { source_encoding: "gbk".to_string(), ..Config::default() };
    let mock = MockProvider::identity();
    let output = mock_controller(config.clone(), &mock).translate_file(&input).await.unwrap();

    // Output is always UTF-8
    let written = fs::read_to_string(output).unwrap();
    assert!(written.contains("你好。\n你好。"));

    // The same bytes read as UTF-8 are rejected
    let error = mock_controller(Config::default(), &mock).translate_file(&input).await.unwrap_err();
    assert!(matches!(error, AppError::Subtitle(_)));
}

#[tokio::test]
async fn test_translate_file_withFailingProvider_shouldNotBeRateLimited() {
    let dir = create_temp_dir().unwrap();
    let input = create_test_subtitle(dir.path(), "fail.srt").unwrap();

    let error = mock_controller(Config::default(), &MockProvider::failing())
        .translate_file(&input).await.unwrap_err();

    assert!(matches!(error, AppError::Translation(_)));
    assert!(!error.is_rate_limited());
    assert!(!dir.path().join("fail[zh-CN].srt").exists());
}

#[tokio::test]
async fn test_run_file_withMissingInput_shouldFail() {
    let dir = create_temp_dir().unwrap();
    let controller = mock_controller(Config::default(), &MockProvider::identity());
    assert!(controller.run_file(dir.path().join("missing.srt")).await.is_err());
}

#[tokio::test(start_paused = true)]
async fn test_run_file_withRateLimit_shouldRetryAfterCooldown() {
    let dir = create_temp_dir().unwrap();
    let input = create_test_file(dir.path(), "quota.srt", "1\n00:00:01,000 --> 00:00:02,000\nHi.\n\n").unwrap();

    let mock = MockProvider::rate_limited(1);
    let controller = mock_controller(Config::default(), &mock);
    controller.run_file(input).await.unwrap();

    assert_eq!(mock.request_count(), 2);
    assert!(dir.path().join("quota[zh-CN].srt").exists());
}
