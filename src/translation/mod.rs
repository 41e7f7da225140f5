/*!
 * Sentence-aware subtitle translation.
 *
 * This module turns a file's cues into translated cues. It is split into
 * several submodules:
 *
 * - `formatting`: Annotation line removal before translation
 * - `segmentation`: Sentence fragments across cues and their grouping
 * - `core`: Translation service definition wrapping a provider
 * - `batch`: Per-sentence translation and proportional redistribution
 * - `merge`: Appending translations back onto cues
 */

// Re-export main types for easier usage
pub use self::batch::{FragmentTranslation, SentenceTranslator, split_proportionally};
pub use self::core::TranslationService;
pub use self::formatting::{remove_annotations, sanitize_entries};
pub use self::merge::merge_translations;
pub use self::segmentation::{Fragment, SentenceGroup, SentenceSegmenter, group_fragments, segment_entries};

// Submodules
pub mod batch;
pub mod core;
pub mod formatting;
pub mod merge;
pub mod segmentation;
