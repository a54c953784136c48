//! Text extraction from uploaded resume documents.
//!
//! # Architecture
//! - `extract` dispatches on the resolved [`MediaType`] and returns plain
//!   text with `\n` line endings, or a categorized [`ExtractError`].
//! - PDF extraction (`pdf.rs`) runs a fixed fallback chain of three
//!   strategies; DOCX (`docx.rs`) is a single structural parse; legacy DOC
//!   is a best-effort lossy decode, not a structural parse.
//! - An empty-after-trim result is always a failure, never a valid empty
//!   resume. Callers run `extract` inside `spawn_blocking`; nothing here is
//!   async.

mod docx;
mod pdf;

use thiserror::Error;

pub use docx::extract_docx_text;
pub use pdf::extract_pdf_text;

// ────────────────────────────────────────────────────────────────────────────
// Media types
// ────────────────────────────────────────────────────────────────────────────

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const DOC_MIME: &str = "application/msword";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Pdf,
    Docx,
    Doc,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Pdf => "pdf",
            MediaType::Docx => "docx",
            MediaType::Doc => "doc",
        }
    }
}

/// Resolves the media type from the declared content type, falling back to
/// the filename extension when the declaration is missing or generic
/// (`application/octet-stream`). A specific-but-unknown declared type is
/// rejected without consulting the extension.
pub fn resolve_media_type(declared: Option<&str>, filename: Option<&str>) -> Option<MediaType> {
    if let Some(declared) = declared {
        // Strip parameters like `; charset=…` before matching.
        let essence = declared
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            PDF_MIME => return Some(MediaType::Pdf),
            DOCX_MIME => return Some(MediaType::Docx),
            DOC_MIME => return Some(MediaType::Doc),
            "" | "application/octet-stream" => {}
            _ => return None,
        }
    }

    let extension = filename
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("pdf") => Some(MediaType::Pdf),
        Some("docx") => Some(MediaType::Docx),
        Some("doc") => Some(MediaType::Doc),
        _ => None,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────────────────────────────────────

/// Machine-checkable failure category. The category picks the user's
/// remediation message, so it must survive serialization boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    /// PDF with no text layer (scan/photo). Needs OCR upstream.
    ImageBased,
    PasswordProtected,
    Corrupted,
    Unsupported,
}

impl FailureCategory {
    pub fn code(&self) -> &'static str {
        match self {
            FailureCategory::ImageBased => "IMAGE_BASED_PDF",
            FailureCategory::PasswordProtected => "PASSWORD_PROTECTED",
            FailureCategory::Corrupted => "CORRUPTED_DOCUMENT",
            FailureCategory::Unsupported => "UNSUPPORTED_MEDIA_TYPE",
        }
    }

    pub fn remediation(&self) -> &'static str {
        match self {
            FailureCategory::ImageBased => {
                "This PDF appears to be a scanned image with no text layer. \
                 Run OCR on it or upload a text-based export instead."
            }
            FailureCategory::PasswordProtected => {
                "The document is password-protected. Remove the password and upload it again."
            }
            FailureCategory::Corrupted => {
                "The file could not be read as a valid document. \
                 Re-export it from the original editor and try again."
            }
            FailureCategory::Unsupported => "Upload a PDF, DOCX, or DOC file.",
        }
    }
}

#[derive(Debug, Error)]
#[error("{message}")]
pub struct ExtractError {
    pub category: FailureCategory,
    pub message: String,
}

impl ExtractError {
    pub fn new(category: FailureCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }

    pub fn remediation(&self) -> &'static str {
        self.category.remediation()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Extraction entry point
// ────────────────────────────────────────────────────────────────────────────

/// Extracts plain text from a document. CPU-bound; callers wrap it in
/// `tokio::task::spawn_blocking`.
pub fn extract(bytes: &[u8], media_type: MediaType) -> Result<String, ExtractError> {
    let text = match media_type {
        MediaType::Pdf => extract_pdf_text(bytes)?,
        MediaType::Docx => extract_docx_text(bytes)?,
        MediaType::Doc => extract_doc_text(bytes)?,
    };
    Ok(normalize_line_endings(&text))
}

/// Legacy `.doc` files get a lossy decode with non-printables stripped.
/// Word's binary format is not parsed structurally; this recovers the text
/// runs that survive a raw read, which is usually enough for the heuristic
/// parser downstream.
fn extract_doc_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let decoded = String::from_utf8_lossy(bytes);
    let mut text = String::with_capacity(decoded.len());
    for c in decoded.chars() {
        if c == '\n' || c == '\t' || c == ' ' || (!c.is_control() && c != '\u{FFFD}') {
            text.push(c);
        } else if c == '\r' || c == '\x0B' || c == '\x0C' {
            text.push('\n');
        }
    }

    // Binary sections decode to long runs of symbol soup; keep only lines
    // that contain at least one alphanumeric character.
    let cleaned: String = text
        .lines()
        .map(str::trim)
        .filter(|line| line.chars().any(|c| c.is_alphanumeric()))
        .collect::<Vec<_>>()
        .join("\n");

    if cleaned.trim().is_empty() {
        return Err(ExtractError::new(
            FailureCategory::Corrupted,
            "no readable text found in DOC file",
        ));
    }
    Ok(cleaned)
}

pub(crate) fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace(['\r', '\x0C'], "\n")
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_declared_mime_types() {
        assert_eq!(
            resolve_media_type(Some("application/pdf"), None),
            Some(MediaType::Pdf)
        );
        assert_eq!(
            resolve_media_type(Some(DOCX_MIME), Some("resume.txt")),
            Some(MediaType::Docx)
        );
        assert_eq!(
            resolve_media_type(Some("application/msword"), None),
            Some(MediaType::Doc)
        );
    }

    #[test]
    fn strips_mime_parameters() {
        assert_eq!(
            resolve_media_type(Some("application/pdf; charset=binary"), None),
            Some(MediaType::Pdf)
        );
    }

    #[test]
    fn octet_stream_falls_back_to_extension() {
        assert_eq!(
            resolve_media_type(Some("application/octet-stream"), Some("resume.PDF")),
            Some(MediaType::Pdf)
        );
        assert_eq!(
            resolve_media_type(None, Some("resume.docx")),
            Some(MediaType::Docx)
        );
        assert_eq!(resolve_media_type(None, Some("resume.doc")), Some(MediaType::Doc));
    }

    #[test]
    fn specific_unknown_type_is_rejected_despite_extension() {
        assert_eq!(resolve_media_type(Some("image/png"), Some("scan.pdf")), None);
    }

    #[test]
    fn unknown_extension_without_declaration_is_rejected() {
        assert_eq!(resolve_media_type(None, Some("resume.txt")), None);
        assert_eq!(resolve_media_type(None, None), None);
    }

    #[test]
    fn doc_extraction_keeps_text_runs_and_drops_binary_noise() {
        let mut bytes = vec![0xD0u8, 0xCF, 0x11, 0xE0, 0x00, 0x01];
        bytes.extend_from_slice(b"John Smith\x00\x01\x02Senior Engineer\r\n");
        bytes.extend_from_slice(&[0xFF, 0xFE, 0x05]);
        bytes.extend_from_slice(b"john@example.com");

        let text = extract_doc_text(&bytes).unwrap();
        assert!(text.contains("John Smith"));
        assert!(text.contains("john@example.com"));
        assert!(!text.contains('\x00'));
    }

    #[test]
    fn doc_extraction_fails_on_pure_binary() {
        let bytes: Vec<u8> = (0u8..=8).cycle().take(256).collect();
        let err = extract_doc_text(&bytes).unwrap_err();
        assert_eq!(err.category, FailureCategory::Corrupted);
    }

    #[test]
    fn normalizes_carriage_returns_and_form_feeds() {
        assert_eq!(normalize_line_endings("a\r\nb\rc\x0Cd"), "a\nb\nc\nd");
    }
}
