//! Normalization of raw capture text into tag values.
//!
//! - Text: trimmed, whitespace runs collapsed, optional `_` -> ` `
//! - Numbers: leading zeros dropped; `track`/`disc` accept "n/total"
//! - Empty captures are skipped, never written as empty tags

use super::super::tags::util::parse_slash_pair_u32;
use super::super::types::{TagField, TagValue};

/// Result of normalizing one captured value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Normalized {
    /// Nothing usable was captured.
    Skip,
    Value(TagValue),
    /// A numbering field captured as "n/total".
    WithTotal(u32, u32),
    /// A numeric field captured something that is not a number.
    Invalid,
}

pub(crate) fn normalize_text(raw: &str, underscores: bool) -> Option<String> {
    let replaced;
    let raw = if underscores {
        replaced = raw.replace('_', " ");
        replaced.as_str()
    } else {
        raw
    };

    let out = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if out.is_empty() { None } else { Some(out) }
}

pub(crate) fn normalize_value(field: TagField, raw: &str, underscores: bool) -> Normalized {
    if !field.is_numeric() {
        return match normalize_text(raw, underscores) {
            Some(s) => Normalized::Value(TagValue::Text(s)),
            None => Normalized::Skip,
        };
    }

    let raw = raw.trim();
    if raw.is_empty() {
        return Normalized::Skip;
    }

    if field.total_field().is_some() && raw.contains('/') {
        return match parse_slash_pair_u32(Some(raw)) {
            (Some(n), Some(total)) => Normalized::WithTotal(n, total),
            (Some(n), None) => Normalized::Value(TagValue::Number(n)),
            _ => Normalized::Invalid,
        };
    }

    match raw.parse::<u32>() {
        Ok(n) => Normalized::Value(TagValue::Number(n)),
        Err(_) => Normalized::Invalid,
    }
}
