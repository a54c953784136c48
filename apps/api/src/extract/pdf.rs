//! PDF text extraction with a fixed fallback chain.
//!
//! Strategies run in priority order, stopping at the first non-empty result:
//! 1. whole-document text-layer read (`pdf_extract`)
//! 2. page-by-page content read (`lopdf`), tolerant of single bad pages
//! 3. raw-byte scan for `Tj`/`TJ` show-text operands, for files too damaged
//!    to parse structurally
//!
//! When the whole chain fails, the collected failure reasons are classified
//! into a [`FailureCategory`] by message inspection: encryption markers beat
//! structural-damage markers, and a structurally-sound file that simply has
//! no text is assumed to be a scan needing OCR.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::{ExtractError, FailureCategory};

/// Raw-scan results shorter than this are noise (page labels, form field
/// names), not resume text.
const MIN_RAW_TEXT_CHARS: usize = 50;

static SHOW_TEXT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(((?:\\.|[^\\()])*)\)\s*Tj").unwrap());
static SHOW_TEXT_ARRAY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\[\]]*)\]\s*TJ").unwrap());
static LITERAL_STRING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(((?:\\.|[^\\()])*)\)").unwrap());

pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut failures: Vec<String> = Vec::new();

    match pdf_extract::extract_text_from_mem(bytes) {
        Ok(text) if !text.trim().is_empty() => return Ok(text),
        Ok(_) => failures.push("text-layer read returned no text".to_string()),
        Err(e) => failures.push(format!("text-layer read failed: {e}")),
    }
    debug!("pdf text-layer read produced nothing, trying page-by-page");

    match extract_pages(bytes) {
        Ok(text) => return Ok(text),
        Err(reason) => failures.push(format!("page-by-page read failed: {reason}")),
    }
    debug!("pdf page-by-page read produced nothing, trying raw scan");

    match scan_raw_show_text(bytes) {
        Some(text) => return Ok(text),
        None => failures.push(format!(
            "raw content scan found fewer than {MIN_RAW_TEXT_CHARS} chars of text"
        )),
    }

    Err(classify_failures(&failures))
}

// ────────────────────────────────────────────────────────────────────────────
// Strategy 2: page-by-page via lopdf
// ────────────────────────────────────────────────────────────────────────────

fn extract_pages(bytes: &[u8]) -> Result<String, String> {
    let doc = lopdf::Document::load_mem(bytes).map_err(|e| format!("document load: {e}"))?;

    if doc.trailer.get(b"Encrypt").is_ok() {
        return Err("document is encrypted".to_string());
    }

    let pages = doc.get_pages();
    let page_count = pages.len();
    let mut texts: Vec<String> = Vec::new();
    let mut first_page_error: Option<String> = None;

    for (page_num, _object_id) in pages {
        match doc.extract_text(&[page_num]) {
            Ok(text) if !text.trim().is_empty() => texts.push(text.trim().to_string()),
            Ok(_) => {}
            Err(e) => {
                if first_page_error.is_none() {
                    first_page_error = Some(format!("page {page_num}: {e}"));
                }
            }
        }
    }

    if texts.is_empty() {
        return Err(match first_page_error {
            Some(err) => format!("no text on any of {page_count} pages ({err})"),
            None => format!("no text on any of {page_count} pages"),
        });
    }
    Ok(texts.join("\n"))
}

// ────────────────────────────────────────────────────────────────────────────
// Strategy 3: raw show-text operand scan
// ────────────────────────────────────────────────────────────────────────────

/// Scans the raw bytes for `(…) Tj` and `[(…) …] TJ` show-text operands.
/// Works on uncompressed content streams that survive in damaged files.
fn scan_raw_show_text(bytes: &[u8]) -> Option<String> {
    let haystack = String::from_utf8_lossy(bytes);
    let mut pieces: Vec<(usize, String)> = Vec::new();

    for caps in SHOW_TEXT_RE.captures_iter(&haystack) {
        let position = caps.get(0).map_or(0, |m| m.start());
        pieces.push((position, unescape_literal(&caps[1])));
    }
    for caps in SHOW_TEXT_ARRAY_RE.captures_iter(&haystack) {
        let position = caps.get(0).map_or(0, |m| m.start());
        for inner in LITERAL_STRING_RE.captures_iter(&caps[1]) {
            pieces.push((position, unescape_literal(&inner[1])));
        }
    }
    pieces.sort_by_key(|(position, _)| *position);

    let text = pieces
        .into_iter()
        .map(|(_, piece)| {
            piece
                .chars()
                .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
                .collect::<String>()
        })
        .filter(|piece| !piece.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    if text.trim().chars().count() >= MIN_RAW_TEXT_CHARS {
        Some(text)
    } else {
        None
    }
}

/// Resolves the escape sequences PDF literal strings allow. Octal escapes
/// and anything unrecognized degrade to the escaped character itself.
fn unescape_literal(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

// ────────────────────────────────────────────────────────────────────────────
// Failure classification
// ────────────────────────────────────────────────────────────────────────────

fn classify_failures(reasons: &[String]) -> ExtractError {
    let joined = reasons.join("; ");
    let lowered = joined.to_lowercase();

    let category = if lowered.contains("encrypt") || lowered.contains("password") {
        FailureCategory::PasswordProtected
    } else if lowered.contains("invalid")
        || lowered.contains("malformed")
        || lowered.contains("corrupt")
        || lowered.contains("xref")
        || lowered.contains("header")
        || lowered.contains("expected")
    {
        FailureCategory::Corrupted
    } else {
        // Structurally sound but no text layer anywhere: a scanned image.
        FailureCategory::ImageBased
    };

    ExtractError::new(
        category,
        format!("PDF text extraction failed ({} strategies tried): {joined}", reasons.len()),
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
