/*!
 * Tests for SubRip parsing and serialization
 */

use std::path::PathBuf;
use sentsub::errors::SubtitleError;
use sentsub::subtitle_processor::{SubtitleCollection, SubtitleEntry};

use crate::common::SPANNING_SUBTITLE;

#[test]
fn test_from_srt_string_withSpanningSubtitle_shouldKeepIdsAndTiming() {
    let collection = SubtitleCollection::from_srt_string(PathBuf::from("movie.srt"), SPANNING_SUBTITLE).unwrap();

    assert_eq!(collection.entries.len(), 3);
    assert_eq!(collection.entries[2].seq_num, 3);
    assert_eq!(collection.entries[2].start_time_ms, 5_000);
    assert_eq!(collection.entries[2].end_time_ms, 8_000);
    assert_eq!(collection.entries[2].text, "the ocean again. Did you?");
}

#[test]
fn test_to_srt_string_withCanonicalInput_shouldRoundTripExactly() {
    let collection = SubtitleCollection::from_srt_string(PathBuf::from("movie.srt"), SPANNING_SUBTITLE).unwrap();
    assert_eq!(collection.to_srt_string(), SPANNING_SUBTITLE);
}

#[test]
fn test_parse_srt_string_withMultiLineCue_shouldPreserveLines() {
    let content = "1\n00:00:01,000 --> 00:00:02,000\n- Where?\n- Here.\n\n";
    let entries = SubtitleCollection::parse_srt_string(content).unwrap();
    assert_eq!(entries[0].text, "- Where?\n- Here.");
    assert_eq!(SubtitleCollection::serialize_entries(&entries), content);
}

#[test]
fn test_parse_srt_string_withMissingTimingLine_shouldReportParseError() {
    let error = SubtitleCollection::parse_srt_string("1\n").unwrap_err();
    assert!(matches!(error, SubtitleError::Parse { .. }));
}

#[test]
fn test_parse_srt_string_withNonNumericId_shouldFail() {
    let error = SubtitleCollection::parse_srt_string("one\n00:00:01,000 --> 00:00:02,000\nHi\n").unwrap_err();
    assert!(matches!(error, SubtitleError::Parse { line: 1, .. }));
}

#[test]
fn test_format_timestamp_withLargeValue_shouldPadFields() {
    assert_eq!(SubtitleEntry::format_timestamp(3_723_004), "01:02:03,004");
    assert_eq!(SubtitleEntry::format_timestamp(100 * 3_600_000), "100:00:00,000");
}

#[test]
fn test_parse_srt_string_withOutOfRangeMinutes_shouldFail() {
    let error = SubtitleCollection::parse_srt_string("1\n01:99:03,004 --> 01:99:04,000\nHi\n").unwrap_err();
    assert!(matches!(error, SubtitleError::Parse { line: 2, .. }));
}

#[test]
fn test_to_srt_string_withDotSeparators_shouldKeepOriginalTiming() {
    let content = "3\n00:00:01.250 --> 00:00:02.500\nDots.\n\n";
    let collection = SubtitleCollection::from_srt_string(PathBuf::from("dots.srt"), content).unwrap();
    assert_eq!(collection.entries[0].start_time_ms, 1_250);
    assert_eq!(collection.to_srt_string(), content);
}
