/*!
 * Sentence segmentation across cues.
 *
 * A sentence often starts in one cue and ends in a later one. The segmenter
 * cuts each cue's text after every sentence-terminal character and tags the
 * pieces with a sentence number that keeps counting across the whole file, so
 * the leading piece of a cue joins the sentence left open by the cue before it.
 *
 * Boundary detection is a punctuation heuristic only.
 */

use log::trace;
use std::collections::BTreeMap;

use crate::subtitle_processor::SubtitleEntry;

/// Characters that end a sentence (ASCII and full-width variants)
pub const SENTENCE_TERMINATORS: [char; 7] = ['.', '!', '?', '。', '！', '？', '．'];

/// A piece of one cue's text belonging to a single sentence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Sequence number of the cue the text comes from
    pub cue_id: usize,

    /// Sentence this piece belongs to
    pub sentence_no: usize,

    /// Byte offset of the first character in the cue text
    pub start_offset: usize,

    /// Byte offset one past the last character in the cue text
    pub end_offset: usize,

    /// The text itself
    pub text: String,
}

/// All fragments of one sentence, in emission order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceGroup {
    pub sentence_no: usize,
    pub fragments: Vec<Fragment>,
}

impl SentenceGroup {
    /// Text sent to the translator: the fragments joined by single spaces
    pub fn request_text(&self) -> String {
        self.fragments.iter()
            .map(|fragment| fragment.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Splits cue text into fragments while carrying the sentence counter from cue to cue
#[derive(Debug, Default)]
pub struct SentenceSegmenter {
    sentence_no: usize,
}

impl SentenceSegmenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of the sentence currently open
    pub fn current_sentence(&self) -> usize {
        self.sentence_no
    }

    /// Segment the sanitized text of one cue
    ///
    /// Every terminator closes a fragment tagged with the current sentence
    /// number and then advances the counter. A non-empty remainder without a
    /// terminator becomes one more fragment in the still-open sentence.
    pub fn segment(&mut self, cue_id: usize, text: &str) -> Vec<Fragment> {
        let mut fragments = Vec::new();
        let mut cut = 0;

        for (index, ch) in text.char_indices() {
            if !SENTENCE_TERMINATORS.contains(&ch) {
                continue;
            }

            let end = index + ch.len_utf8();
            fragments.push(Fragment {
                cue_id,
                sentence_no: self.sentence_no,
                start_offset: cut,
                end_offset: end,
                text: text[cut..end].to_string(),
            });
            self.sentence_no += 1;
            cut = end;
        }

        if cut < text.len() {
            fragments.push(Fragment {
                cue_id,
                sentence_no: self.sentence_no,
                start_offset: cut,
                end_offset: text.len(),
                text: text[cut..].to_string(),
            });
        }

        fragments
    }
}

/// Segment every cue of a file in order with one shared counter
pub fn segment_entries(entries: &[SubtitleEntry]) -> Vec<Fragment> {
    let mut segmenter = SentenceSegmenter::new();
    let fragments: Vec<Fragment> = entries.iter()
        .flat_map(|entry| segmenter.segment(entry.seq_num, &entry.text))
        .collect();

    trace!("{} cues, {} fragments, {} closed sentences",
        entries.len(), fragments.len(), segmenter.current_sentence());
    fragments
}

/// Group fragments by sentence number, ascending, keeping emission order inside a group
pub fn group_fragments(fragments: Vec<Fragment>) -> Vec<SentenceGroup> {
    let mut groups: BTreeMap<usize, Vec<Fragment>> = BTreeMap::new();
    for fragment in fragments {
        groups.entry(fragment.sentence_no).or_default().push(fragment);
    }

    groups.into_iter()
        .map(|(sentence_no, fragments)| SentenceGroup { sentence_no, fragments })
        .collect()
}
