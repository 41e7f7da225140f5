/*!
 * Sentence translation and proportional redistribution.
 *
 * Every sentence group is translated with one provider call. The translated
 * sentence is then cut back into as many pieces as the group has fragments,
 * each piece sized in proportion to its fragment's original length. The cut
 * is an approximation: it does not know where words of one language map to
 * words of the other.
 */

use log::{debug, warn};
use std::sync::atomic::{AtomicUsize, Ordering};
use futures::stream::{self, StreamExt};

use crate::errors::TranslationError;

use super::core::TranslationService;
use super::segmentation::SentenceGroup;

/// Translated text for one fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentTranslation {
    /// Cue the fragment belongs to
    pub cue_id: usize,
    /// Sentence the fragment belongs to
    pub sentence_no: usize,
    /// Position of the fragment inside its sentence group
    pub fragment_index: usize,
    /// Share of the translated sentence assigned to the fragment
    pub translated_text: String,
}

/// Per-fragment character allocation, `ceil(w_i * T / L)` for every weight
///
/// Computed in integer arithmetic so exact multiples never round up.
pub fn allocate_lengths(weights: &[usize], translated_len: usize) -> Vec<usize> {
    let total: usize = weights.iter().sum();
    if total == 0 {
        return vec![0; weights.len()];
    }

    weights.iter()
        .map(|weight| (weight * translated_len).div_ceil(total))
        .collect()
}

/// Split a translated sentence across fragments in proportion to their length
///
/// A fragment's weight is its character count plus one for the space that
/// joins it to the next fragment in the request; the last fragment has no
/// such space. Each non-final fragment takes its allocation from a running
/// cursor (clipped at the end of the string, so it may come out short or
/// empty) and loses one trailing space if it ends with one. The final
/// fragment takes everything after the cursor.
pub fn split_proportionally(fragments: &[&str], translated: &str) -> Vec<String> {
    if fragments.is_empty() {
        return Vec::new();
    }

    let chars: Vec<char> = translated.chars().collect();
    let last = fragments.len() - 1;
    let weights: Vec<usize> = fragments.iter()
        .enumerate()
        .map(|(index, text)| text.chars().count() + usize::from(index < last))
        .collect();
    let allocations = allocate_lengths(&weights, chars.len());

    let mut pieces = Vec::with_capacity(fragments.len());
    let mut cursor = 0;
    for allocation in &allocations[..last] {
        let start = cursor.min(chars.len());
        let end = (cursor + allocation).min(chars.len());
        let mut piece: String = chars[start..end].iter().collect();
        if piece.ends_with(' ') {
            piece.pop();
        }
        pieces.push(piece);
        cursor += allocation;
    }

    pieces.push(chars[cursor.min(chars.len())..].iter().collect());
    pieces
}

/// Map a translated sentence back onto its group's fragments
pub fn redistribute(group: &SentenceGroup, translated: &str) -> Result<Vec<FragmentTranslation>, TranslationError> {
    if group.fragments.is_empty() {
        return Err(TranslationError::Redistribution(format!(
            "sentence {} has no fragments", group.sentence_no
        )));
    }

    let originals: Vec<&str> = group.fragments.iter().map(|f| f.text.as_str()).collect();
    let pieces = split_proportionally(&originals, translated);

    Ok(group.fragments.iter()
        .zip(pieces)
        .enumerate()
        .map(|(fragment_index, (fragment, translated_text))| FragmentTranslation {
            cue_id: fragment.cue_id,
            sentence_no: fragment.sentence_no,
            fragment_index,
            translated_text,
        })
        .collect())
}

/// Translates all sentence groups of a file with bounded concurrency
pub struct SentenceTranslator {
    /// The translation service to use
    service: TranslationService,
}

impl SentenceTranslator {
    /// Create a new sentence translator
    pub fn new(service: TranslationService) -> Self {
        Self { service }
    }

    // @returns: Fragment translations of one sentence group
    async fn translate_group(
        &self,
        group: &SentenceGroup,
        target_language: &str,
    ) -> Result<Vec<FragmentTranslation>, TranslationError> {
        let request = group.request_text();
        let translated = self.service.translate_text(&request, target_language).await
            .map_err(|e| TranslationError::from_provider(group.sentence_no, e))?;
        redistribute(group, &translated)
    }

    /// Translate every group, one provider call each
    ///
    /// All groups are attempted even when some fail. If any group was rate
    /// limited the rate-limit error is returned so the caller can pause;
    /// otherwise the first other failure is returned. On success the results
    /// are ordered by sentence number and fragment index.
    pub async fn translate_groups(
        &self,
        groups: &[SentenceGroup],
        target_language: &str,
        progress_callback: impl Fn(usize, usize) + Send + Sync,
    ) -> Result<Vec<FragmentTranslation>, TranslationError> {
        let total = groups.len();
        let completed = AtomicUsize::new(0);
        let completed = &completed;
        let progress_callback = &progress_callback;

        let futures: Vec<_> = groups.iter()
            .map(|group| async move {
                let result = self.translate_group(group, target_language).await;

                let current = completed.fetch_add(1, Ordering::SeqCst) + 1;
                progress_callback(current, total);
                result
            })
            .collect();

        let results = stream::iter(futures)
            .buffer_unordered(self.service.max_concurrent_requests())
            .collect::<Vec<_>>()
            .await;

        let mut translations = Vec::new();
        let mut rate_limited: Option<TranslationError> = None;
        let mut failed: Option<TranslationError> = None;

        for result in results {
            match result {
                Ok(mut fragments) => translations.append(&mut fragments),
                Err(e) if e.is_rate_limited() => {
                    warn!("{}", e);
                    rate_limited.get_or_insert(e);
                }
                Err(e) => {
                    debug!("{}", e);
                    failed.get_or_insert(e);
                }
            }
        }

        if let Some(e) = rate_limited.or(failed) {
            return Err(e);
        }

        translations.sort_by_key(|t| (t.sentence_no, t.fragment_index));
        Ok(translations)
    }
}
