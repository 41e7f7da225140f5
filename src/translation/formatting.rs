/*!
 * Cue text sanitizing.
 *
 * Subtitle files sometimes carry translator or typesetter notes on their own
 * lines, set off by a marker such as `----`. Those lines are removed before
 * segmentation so they are neither translated nor counted in sentence lengths.
 */

use crate::subtitle_processor::SubtitleEntry;

/// Remove every line containing the annotation marker
pub fn remove_annotations(text: &str, marker: &str) -> String {
    if marker.is_empty() {
        return text.to_string();
    }

    text.split('\n')
        .filter(|line| !line.contains(marker))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Sanitize the text of every cue in place
pub fn sanitize_entries(entries: &mut [SubtitleEntry], marker: &str) {
    for entry in entries.iter_mut() {
        entry.text = remove_annotations(&entry.text, marker);
    }
}
