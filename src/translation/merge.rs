//! Merging fragment translations back into cues

use std::collections::HashMap;

use crate::subtitle_processor::SubtitleEntry;

use super::batch::FragmentTranslation;

/// Append each cue's translation as a new line after its original text
///
/// Results are grouped by cue id and concatenated in sentence / fragment
/// order without a separator. Cues that produced no fragments keep their text.
pub fn merge_translations(entries: &mut [SubtitleEntry], mut translations: Vec<FragmentTranslation>) {
    translations.sort_by_key(|t| (t.sentence_no, t.fragment_index));

    let mut by_cue: HashMap<usize, String> = HashMap::new();
    for translation in translations {
        by_cue.entry(translation.cue_id)
            .or_default()
            .push_str(&translation.translated_text);
    }

    for entry in entries.iter_mut() {
        if let Some(translated) = by_cue.remove(&entry.seq_num) {
            entry.text.push('\n');
            entry.text.push_str(&translated);
        }
    }
}
