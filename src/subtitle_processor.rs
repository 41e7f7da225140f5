use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;
use regex::Regex;
use once_cell::sync::Lazy;
use log::{debug, warn};

use crate::errors::SubtitleError;

// @module: SubRip parsing and serialization

// @const: SRT timing line regex, accepts ',' or '.' before the milliseconds
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+):(\d{2}):(\d{2})[,.](\d{3})\s*-->\s*(\d+):(\d{2}):(\d{2})[,.](\d{3})").unwrap()
});

// @struct: Single subtitle entry (cue)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleEntry {
    // @field: Sequence number, unique within a file
    pub seq_num: usize,

    // @field: Start time in ms
    pub start_time_ms: u64,

    // @field: End time in ms
    pub end_time_ms: u64,

    // @field: Subtitle text, possibly multi-line
    pub text: String,

    // @field: Timing line as read, written back unchanged (keeps '.' separators and position fields)
    pub original_timing: Option<String>,
}

impl SubtitleEntry {
    /// Creates a new subtitle entry
    pub fn new(seq_num: usize, start_time_ms: u64, end_time_ms: u64, text: String) -> Self {
        SubtitleEntry {
            seq_num,
            start_time_ms,
            end_time_ms,
            text,
            original_timing: None,
        }
    }

    /// Timing line to write: the original one when parsed, otherwise formatted
    pub fn timing_line(&self) -> String {
        match &self.original_timing {
            Some(line) => line.clone(),
            None => format!("{} --> {}", self.format_start_time(), self.format_end_time()),
        }
    }

    /// Convert start time to formatted SRT timestamp
    pub fn format_start_time(&self) -> String {
        Self::format_timestamp(self.start_time_ms)
    }

    /// Convert end time to formatted SRT timestamp
    pub fn format_end_time(&self) -> String {
        Self::format_timestamp(self.end_time_ms)
    }

    /// Format a timestamp in milliseconds to SRT format (HH:MM:SS,mmm)
    pub fn format_timestamp(ms: u64) -> String {
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }
}

impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.seq_num)?;
        writeln!(f, "{}", self.timing_line())?;
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

/// Collection of subtitle entries read from one file
#[derive(Debug)]
pub struct SubtitleCollection {
    /// Source filename
    pub source_file: PathBuf,

    /// List of subtitle entries in file order
    pub entries: Vec<SubtitleEntry>,
}

impl SubtitleCollection {
    /// Parse decoded SRT content into a collection
    pub fn from_srt_string(source_file: PathBuf, content: &str) -> Result<Self, SubtitleError> {
        let entries = Self::parse_srt_string(content)?;
        debug!("Parsed {} cues from {}", entries.len(), source_file.display());
        Ok(SubtitleCollection { source_file, entries })
    }

    /// Serialize the collection back to SRT text
    pub fn to_srt_string(&self) -> String {
        Self::serialize_entries(&self.entries)
    }

    /// Serialize entries to SRT text, one blank line after every cue
    pub fn serialize_entries(entries: &[SubtitleEntry]) -> String {
        let mut output = String::new();
        for entry in entries {
            output.push_str(&entry.to_string());
        }
        output
    }

    /// Parse SRT format string into subtitle entries
    ///
    /// Entries keep their sequence numbers and file order. Line endings may be
    /// `\n` or `\r\n` and a leading byte order mark is ignored.
    pub fn parse_srt_string(content: &str) -> Result<Vec<SubtitleEntry>, SubtitleError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut entries: Vec<SubtitleEntry> = Vec::new();
        let mut seen_ids = HashSet::new();
        let mut lines = content.lines().enumerate().peekable();

        loop {
            // Skip blank lines between cues
            while lines.peek().is_some_and(|(_, line)| line.trim().is_empty()) {
                lines.next();
            }

            let Some((index_line_no, index_line)) = lines.next() else {
                break;
            };

            let seq_num: usize = index_line.trim().parse().map_err(|_| SubtitleError::Parse {
                line: index_line_no + 1,
                message: format!("expected cue number, found '{}'", index_line.trim()),
            })?;

            if !seen_ids.insert(seq_num) {
                return Err(SubtitleError::Parse {
                    line: index_line_no + 1,
                    message: format!("duplicate cue number {}", seq_num),
                });
            }

            let (timing_line_no, timing_line) = lines.next().ok_or_else(|| SubtitleError::Parse {
                line: index_line_no + 2,
                message: format!("cue {} has no timing line", seq_num),
            })?;

            let timing_line = timing_line.trim();
            let caps = TIMESTAMP_REGEX.captures(timing_line).ok_or_else(|| SubtitleError::Parse {
                line: timing_line_no + 1,
                message: format!("invalid timing line '{}'", timing_line),
            })?;

            let start_time_ms = Self::parse_timestamp_to_ms(&caps, 1, timing_line_no + 1)?;
            let end_time_ms = Self::parse_timestamp_to_ms(&caps, 5, timing_line_no + 1)?;
            if end_time_ms < start_time_ms {
                warn!("Cue {} ends before it starts", seq_num);
            }

            let mut text_lines = Vec::new();
            while let Some((_, line)) = lines.peek() {
                if line.trim().is_empty() {
                    break;
                }
                text_lines.push(*line);
                lines.next();
            }

            let mut entry = SubtitleEntry::new(seq_num, start_time_ms, end_time_ms, text_lines.join("\n"));
            entry.original_timing = Some(timing_line.to_string());
            entries.push(entry);
        }

        if entries.is_empty() {
            return Err(SubtitleError::Parse {
                line: 1,
                message: "no subtitle entries found".to_string(),
            });
        }

        Ok(entries)
    }

    /// Parse one timestamp of a timing line to milliseconds
    ///
    /// Minutes and seconds above 59 are rejected rather than carried over.
    fn parse_timestamp_to_ms(caps: &regex::Captures, start_idx: usize, line: usize) -> Result<u64, SubtitleError> {
        let mut fields = [0u64; 4];
        for (offset, field) in fields.iter_mut().enumerate() {
            let text = caps.get(start_idx + offset).map_or("", |m| m.as_str());
            *field = text.parse().map_err(|_| SubtitleError::Parse {
                line,
                message: format!("invalid timestamp field '{}'", text),
            })?;
        }

        let [hours, minutes, seconds, millis] = fields;
        if hours >= 1_000_000 || minutes >= 60 || seconds >= 60 {
            return Err(SubtitleError::Parse {
                line,
                message: format!("timestamp out of range: {:02}:{:02}:{:02}", hours, minutes, seconds),
            });
        }

        Ok((hours * 3600 + minutes * 60 + seconds) * 1000 + millis)
    }
}
