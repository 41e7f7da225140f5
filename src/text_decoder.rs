use encoding_rs::Encoding;
use log::debug;

use crate::errors::SubtitleError;

// @module: Character decoding of raw subtitle bytes

/// Check that an encoding label is known
pub fn is_supported_encoding(label: &str) -> bool {
    Encoding::for_label(label.trim().as_bytes()).is_some()
}

/// Decode raw subtitle bytes using a WHATWG encoding label (`utf-8`, `gbk`, `big5`, ...)
///
/// A byte order mark takes precedence over the label. Bytes that are not
/// valid in the chosen encoding are rejected, never replaced.
pub fn decode(bytes: &[u8], label: &str) -> Result<String, SubtitleError> {
    let encoding = Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| SubtitleError::Decode {
        encoding: label.to_string(),
        message: "unknown encoding label".to_string(),
    })?;

    let (text, used, had_errors) = encoding.decode(bytes);
    if used != encoding {
        debug!("Byte order mark overrides {} with {}", encoding.name(), used.name());
    }

    if had_errors {
        return Err(SubtitleError::Decode {
            encoding: used.name().to_string(),
            message: "input contains byte sequences that are invalid in this encoding".to_string(),
        });
    }

    Ok(text.into_owned())
}
