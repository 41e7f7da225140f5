/*!
 * Directory mode tests: discovery, throttled dispatch and rate-limit recovery
 */

use std::fs;
use std::sync::Arc;
use sentsub::app_config::{Config, SchedulerConfig};
use sentsub::providers::mock::MockProvider;

use crate::common::{create_temp_dir, create_test_subtitle, init_test_logger, mock_controller};

fn fast_config(cooldown_secs: u64) -> Config {
    Config {
        scheduler: SchedulerConfig { batch_size: 3, tick_interval_ms: 10, cooldown_secs },
        ..Config::default()
    }
}

#[tokio::test]
async fn test_run_folder_withNestedFiles_shouldTranslateEveryFile() {
    init_test_logger();
    let dir = create_temp_dir().unwrap();
    let nested = dir.path().join("season1");
    fs::create_dir(&nested).unwrap();

    let inputs = vec![
        create_test_subtitle(dir.path(), "a.srt").unwrap(),
        create_test_subtitle(dir.path(), "b.SRT").unwrap(),
        create_test_subtitle(&nested, "c.srt").unwrap(),
        create_test_subtitle(&nested, "d.srt").unwrap(),
    ];
    fs::write(dir.path().join("notes.txt"), "not a subtitle").unwrap();

    let mock = MockProvider::identity();
    let controller = Arc::new(mock_controller(fast_config(60), &mock));
    controller.run_folder(dir.path().to_path_buf()).await.unwrap();

    // Two sentences per file
    assert_eq!(mock.request_count(), 8);
    assert!(dir.path().join("a[zh-CN].srt").exists());
    assert!(dir.path().join("b[zh-CN].srt").exists());
    assert!(nested.join("c[zh-CN].srt").exists());
    assert!(nested.join("d[zh-CN].srt").exists());
    for input in inputs {
        assert_eq!(fs::read_to_string(input).unwrap(), crate::common::SPANNING_SUBTITLE);
    }
}

#[tokio::test]
async fn test_run_folder_withExistingTranslation_shouldSkipOutputFiles() {
    let dir = create_temp_dir().unwrap();
    create_test_subtitle(dir.path(), "movie.srt").unwrap();
    create_test_subtitle(dir.path(), "movie[zh-CN].srt").unwrap();

    let mock = MockProvider::identity();
    let controller = Arc::new(mock_controller(fast_config(60), &mock));
    controller.run_folder(dir.path().to_path_buf()).await.unwrap();

    assert_eq!(mock.request_count(), 2);
    assert!(!dir.path().join("movie[zh-CN][zh-CN].srt").exists());
}

#[tokio::test]
async fn test_run_folder_withUnwritableOutput_shouldStillTranslateOtherFiles() {
    let dir = create_temp_dir().unwrap();
    create_test_subtitle(dir.path(), "a.srt").unwrap();
    create_test_subtitle(dir.path(), "b.srt").unwrap();
    create_test_subtitle(dir.path(), "c.srt").unwrap();
    // A directory where b's output should go makes its write fail
    fs::create_dir(dir.path().join("b[zh-CN].srt")).unwrap();

    let mock = MockProvider::identity();
    let controller = Arc::new(mock_controller(fast_config(60), &mock));
    controller.run_folder(dir.path().to_path_buf()).await.unwrap();

    assert!(dir.path().join("a[zh-CN].srt").is_file());
    assert!(dir.path().join("b[zh-CN].srt").is_dir());
    assert!(dir.path().join("c[zh-CN].srt").is_file());
    assert_eq!(mock.request_count(), 6);
}

#[tokio::test]
async fn test_run_folder_withRateLimit_shouldRetryAfterCooldown() {
    let dir = create_temp_dir().unwrap();
    create_test_subtitle(dir.path(), "quota.srt").unwrap();

    let mock = MockProvider::rate_limited(1);
    let controller = Arc::new(mock_controller(fast_config(1), &mock));

    let started = std::time::Instant::now();
    controller.run_folder(dir.path().to_path_buf()).await.unwrap();

    assert!(started.elapsed() >= std::time::Duration::from_secs(1));
    // Both sentences sent on the failed attempt and again on the retry
    assert_eq!(mock.request_count(), 4);
    assert!(dir.path().join("quota[zh-CN].srt").exists());
}

#[tokio::test]
async fn test_run_folder_withEmptyDirectory_shouldFinishImmediately() {
    let dir = create_temp_dir().unwrap();
    let mock = MockProvider::identity();
    let controller = Arc::new(mock_controller(fast_config(60), &mock));

    controller.run_folder(dir.path().to_path_buf()).await.unwrap();
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn test_run_folder_withMissingDirectory_shouldFail() {
    let dir = create_temp_dir().unwrap();
    let controller = Arc::new(mock_controller(fast_config(60), &MockProvider::identity()));
    assert!(controller.run_folder(dir.path().join("missing")).await.is_err());
}
