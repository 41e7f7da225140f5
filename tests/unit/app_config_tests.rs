/*!
 * Tests for application configuration functionality
 */

use sentsub::app_config::{Config, LogLevel, SchedulerConfig, TranslationProvider};
use std::time::Duration;

fn config_with_key() -> Config {
    let mut config = Config::default();
    config.translation.active_provider_config_mut().api_key = "test-key".to_string();
    config
}

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.target_language, "zh-CN");
    assert_eq!(config.source_encoding, "utf-8");
    assert_eq!(config.annotation_marker, "----");
    assert_eq!(config.translation.provider, TranslationProvider::Google);
    assert_eq!(config.translation.max_concurrent_requests, 8);
    assert_eq!(config.scheduler.batch_size, 3);
    assert_eq!(config.scheduler.tick_interval(), Duration::from_secs(5));
    assert_eq!(config.scheduler.cooldown(), Duration::from_secs(60));
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = config_with_key();
    assert!(config.validate().is_ok());

    config.target_language = "xyz-1".to_string();
    assert!(config.validate().is_err());
    config.target_language = "pt-BR".to_string();
    assert!(config.validate().is_ok());

    config.source_encoding = "not-an-encoding".to_string();
    assert!(config.validate().is_err());
    config.source_encoding = "gbk".to_string();

    config.scheduler.batch_size = 0;
    assert!(config.validate().is_err());
    config.scheduler.batch_size = 3;

    config.translation.max_concurrent_requests = 0;
    assert!(config.validate().is_err());
    config.translation.max_concurrent_requests = 8;

    config.annotation_marker.clear();
    assert!(config.validate().is_err());
}

#[test]
fn test_config_validation_withGoogleAndNoKey_shouldFail() {
    let mut config = Config::default();
    assert!(config.validate().is_err());

    // LibreTranslate instances may run without a key
    config.translation.provider = TranslationProvider::LibreTranslate;
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_json_withPartialFields_shouldFillDefaults() {
    let json = r#"{
        "target_language": "ja",
        "translation": { "provider": "libretranslate" },
        "scheduler": { "cooldown_secs": 5 }
    }"#;
    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(config.target_language, "ja");
    assert_eq!(config.source_encoding, "utf-8");
    assert_eq!(config.translation.provider, TranslationProvider::LibreTranslate);
    assert_eq!(config.translation.get_endpoint(), "http://localhost:5000");
    assert_eq!(config.scheduler.cooldown_secs, 5);
    assert_eq!(config.scheduler.batch_size, 3);
}

#[test]
fn test_config_json_roundTrip_shouldPreserveValues() {
    let mut config = config_with_key();
    config.scheduler = SchedulerConfig { batch_size: 5, tick_interval_ms: 250, cooldown_secs: 30 };
    config.log_level = LogLevel::Debug;

    let json = serde_json::to_string_pretty(&config).unwrap();
    let parsed: Config = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.scheduler.batch_size, 5);
    assert_eq!(parsed.scheduler.tick_interval_ms, 250);
    assert_eq!(parsed.log_level, LogLevel::Debug);
    assert_eq!(parsed.translation.get_api_key(), "test-key");
}

#[test]
fn test_provider_fromStr_shouldAcceptKnownNames() {
    assert_eq!("Google".parse::<TranslationProvider>().unwrap(), TranslationProvider::Google);
    assert_eq!("libretranslate".parse::<TranslationProvider>().unwrap(), TranslationProvider::LibreTranslate);
    assert!("deepl".parse::<TranslationProvider>().is_err());
    assert_eq!(TranslationProvider::LibreTranslate.to_string(), "libretranslate");
}

#[test]
fn test_active_provider_config_mut_withMissingEntry_shouldCreateIt() {
    let mut config = Config::default();
    config.translation.available_providers.clear();
    config.translation.provider = TranslationProvider::LibreTranslate;

    config.translation.active_provider_config_mut().api_key = "abc".to_string();

    assert_eq!(config.translation.available_providers.len(), 1);
    assert_eq!(config.translation.get_api_key(), "abc");
}
