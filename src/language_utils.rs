//! Language utilities for target language tags
//!
//! Providers accept BCP 47 style tags such as `zh-CN`, `pt-BR` or plain `fr`.
//! The primary subtag is checked against ISO 639-1 / ISO 639-2 with isolang;
//! the remaining subtags only need the right shape.

use anyhow::{Result, anyhow};
use isolang::Language;

/// ISO 639-2/B codes that differ from their 639-2/T counterpart
fn part2b_to_part2t(code: &str) -> Option<&'static str> {
    match code {
        "fre" => Some("fra"),
        "ger" => Some("deu"),
        "dut" => Some("nld"),
        "gre" => Some("ell"),
        "chi" => Some("zho"),
        "cze" => Some("ces"),
        "ice" => Some("isl"),
        "alb" => Some("sqi"),
        "arm" => Some("hye"),
        "baq" => Some("eus"),
        "bur" => Some("mya"),
        "per" => Some("fas"),
        "geo" => Some("kat"),
        "may" => Some("msa"),
        "mac" => Some("mkd"),
        "rum" => Some("ron"),
        "slo" => Some("slk"),
        "wel" => Some("cym"),
        _ => None,
    }
}

/// Return the primary language subtag of a tag (`zh-CN` -> `zh`)
pub fn primary_subtag(tag: &str) -> &str {
    tag.trim().split(['-', '_']).next().unwrap_or_default()
}

/// Resolve the primary subtag of a tag to an isolang language
pub fn resolve_language(tag: &str) -> Option<Language> {
    let primary = primary_subtag(tag).to_lowercase();

    match primary.len() {
        2 => Language::from_639_1(&primary),
        3 => Language::from_639_3(part2b_to_part2t(&primary).unwrap_or(&primary)),
        _ => None,
    }
}

/// Validate a target language tag such as `zh-CN`, `zh-Hant-TW` or `de`
pub fn validate_language_tag(tag: &str) -> Result<()> {
    if resolve_language(tag).is_none() {
        return Err(anyhow!("Invalid language code: {}", tag));
    }

    for subtag in tag.trim().split(['-', '_']).skip(1) {
        let well_formed = match subtag.len() {
            2 => subtag.chars().all(|c| c.is_ascii_alphabetic()),
            3 => subtag.chars().all(|c| c.is_ascii_digit()),
            4 => subtag.chars().all(|c| c.is_ascii_alphabetic()),
            _ => false,
        };
        if !well_formed {
            return Err(anyhow!("Invalid subtag '{}' in language code: {}", subtag, tag));
        }
    }

    Ok(())
}

/// Get the English language name from a tag
pub fn get_language_name(tag: &str) -> Result<String> {
    resolve_language(tag)
        .map(|lang| lang.to_name().to_string())
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", tag))
}

/// Marker that tags translated output files, e.g. `[zh-CN]`
pub fn output_marker(tag: &str) -> String {
    format!("[{}]", tag.trim())
}
