//! Per-type coercion primitives for untrusted JSON fields.
//!
//! Every field read out of a client-supplied record goes through one of
//! `coerce_string`, `coerce_string_list`, or `coerce_number`. There is no
//! implicit conversion path: a field that fails its coercion is absent,
//! not defaulted.

use serde_json::Value;

pub const ELLIPSIS: char = '…';

// Field-specific max lengths, in chars. The renderer breaks long unbroken
// runs poorly, so each field is bounded by what its line can plausibly hold.
pub const MAX_NAME_CHARS: usize = 100;
pub const MAX_EMAIL_CHARS: usize = 254;
pub const MAX_PHONE_CHARS: usize = 40;
pub const MAX_LINK_CHARS: usize = 200;
pub const MAX_ADDRESS_CHARS: usize = 200;
pub const MAX_SUMMARY_CHARS: usize = 1000;
pub const MAX_TITLE_CHARS: usize = 150;
pub const MAX_ORG_CHARS: usize = 150;
pub const MAX_DATE_CHARS: usize = 40;
pub const MAX_BULLET_CHARS: usize = 500;
pub const MAX_SKILL_CHARS: usize = 80;
pub const MAX_GPA_CHARS: usize = 20;
pub const MAX_PROFICIENCY_CHARS: usize = 40;

/// Coerces a scalar JSON value to bounded printable text.
///
/// Strings are cleaned as-is; numbers and booleans are formatted. Null,
/// arrays, and objects do not coerce. `None` means the field is absent.
pub fn coerce_string(value: Option<&Value>, max_chars: usize) -> Option<String> {
    let raw = match value? {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    clean_text(&raw, max_chars)
}

/// Coerces a JSON value to a list of printable strings.
///
/// Accepts a real array (each element string-coerced, failures dropped), a
/// single string (split on commas), or any other scalar (single-element
/// list). Null, objects, and absent fields give an empty list. Never fails.
pub fn coerce_string_list(value: Option<&Value>, max_chars: usize) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| coerce_string(Some(item), max_chars))
            .collect(),
        Some(Value::String(s)) => s
            .split(',')
            .filter_map(|fragment| clean_text(fragment, max_chars))
            .collect(),
        Some(Value::Number(_)) | Some(Value::Bool(_)) => {
            coerce_string(value, max_chars).into_iter().collect()
        }
        _ => Vec::new(),
    }
}

/// Coerces a scalar JSON value to a number. Non-numeric input means the
/// field is absent, never zero.
pub fn coerce_number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Strips control characters and Unicode noncharacters, collapses
/// whitespace runs, and truncates to `max_chars` (the last char becomes an
/// ellipsis when truncation happened). Returns `None` when nothing
/// printable survives.
pub(crate) fn clean_text(raw: &str, max_chars: usize) -> Option<String> {
    let cleaned: String = raw
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .filter(|c| !c.is_control() && !is_noncharacter(*c))
        .collect();
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return None;
    }
    if collapsed.chars().count() <= max_chars {
        return Some(collapsed);
    }
    let mut truncated: String = collapsed
        .chars()
        .take(max_chars.saturating_sub(1))
        .collect();
    truncated.push(ELLIPSIS);
    Some(truncated)
}

fn is_noncharacter(c: char) -> bool {
    let cp = c as u32;
    (0xFDD0..=0xFDEF).contains(&cp) || (cp & 0xFFFE) == 0xFFFE
}
