/*!
 * Tests for file and directory utilities
 */

use std::fs;
use std::path::PathBuf;
use sentsub::file_utils::FileManager;

use crate::common::{create_temp_dir, create_test_subtitle};

#[tokio::test]
async fn test_discover_subtitles_withTranslatedOutput_shouldExcludeIt() {
    let dir = create_temp_dir().unwrap();
    create_test_subtitle(dir.path(), "movie.srt").unwrap();
    create_test_subtitle(dir.path(), "movie[zh-CN].srt").unwrap();

    let found = FileManager::discover_subtitles(dir.path(), "zh-CN").await.unwrap();
    assert_eq!(found, vec![dir.path().join("movie.srt")]);

    // A different target language still sees both files
    let found = FileManager::discover_subtitles(dir.path(), "ja").await.unwrap();
    assert_eq!(found.len(), 2);
}

#[tokio::test]
async fn test_discover_subtitles_withManySubdirs_shouldVisitEveryLevel() {
    let dir = create_temp_dir().unwrap();
    let mut expected = Vec::new();
    for season in 1..=3 {
        let season_dir = dir.path().join(format!("season{}", season));
        fs::create_dir(&season_dir).unwrap();
        for episode in 1..=4 {
            expected.push(create_test_subtitle(&season_dir, &format!("e{}.srt", episode)).unwrap());
        }
    }

    let mut found = FileManager::discover_subtitles(dir.path(), "zh-CN").await.unwrap();
    found.sort();
    expected.sort();
    assert_eq!(found, expected);
}

#[test]
fn test_output_path_for_withRelativePath_shouldStayInSameDir() {
    assert_eq!(
        FileManager::output_path_for("subs/ep01.srt", "ja"),
        PathBuf::from("subs/ep01[ja].srt")
    );
    assert_eq!(FileManager::output_path_for("ep01.srt", "ja"), PathBuf::from("ep01[ja].srt"));
}

#[test]
fn test_write_to_file_withNewTarget_shouldCreateFile() {
    let dir = create_temp_dir().unwrap();
    let target = dir.path().join("nested.srt");
    FileManager::write_to_file(&target, "1\n").unwrap();
    assert!(FileManager::file_exists(&target));
}
