//! DOCX text extraction: unzip the OOXML container, read
//! `word/document.xml`, and collect the text runs of each `w:p` paragraph
//! into one line. No fallback chain; any structural failure is terminal.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;

use super::{ExtractError, FailureCategory};

pub fn extract_docx_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let cursor = Cursor::new(bytes);
    let mut archive = zip::ZipArchive::new(cursor)
        .map_err(|e| corrupted(format!("not a valid DOCX container: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| corrupted(format!("word/document.xml missing: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| corrupted(format!("word/document.xml unreadable: {e}")))?;

    let mut reader = Reader::from_str(&xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut current = String::new();
    let mut lines: Vec<String> = Vec::new();
    let mut in_paragraph = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                if e.name().as_ref() == b"w:p" {
                    in_paragraph = true;
                    current.clear();
                }
            }
            Ok(Event::End(e)) => {
                if e.name().as_ref() == b"w:p" {
                    if !current.trim().is_empty() {
                        lines.push(current.trim().to_string());
                    }
                    current.clear();
                    in_paragraph = false;
                }
            }
            // Word splits runs mid-word; text nodes concatenate without
            // separators, tabs become a single space.
            Ok(Event::Text(e)) => {
                if in_paragraph {
                    let value = e
                        .xml_content()
                        .map_err(|err| corrupted(format!("bad text node: {err}")))?
                        .into_owned();
                    current.push_str(&value);
                }
            }
            Ok(Event::Empty(e)) => {
                if in_paragraph && e.name().as_ref() == b"w:tab" {
                    current.push(' ');
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(corrupted(format!("document.xml parse error: {err}"))),
            _ => {}
        }

        buf.clear();
    }

    let text = lines.join("\n");
    if text.trim().is_empty() {
        return Err(corrupted("document contained no paragraph text"));
    }
    Ok(text)
}

fn corrupted(message: impl Into<String>) -> ExtractError {
    ExtractError::new(FailureCategory::Corrupted, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    /// Zips a minimal OOXML package around the given document body XML.
    fn make_docx(document_xml: &str) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        writer
            .start_file("[Content_Types].xml", options)
            .expect("start content types");
        writer
            .write_all(br#"<?xml version="1.0"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"/>"#)
            .expect("write content types");
        writer
            .start_file("word/document.xml", options)
            .expect("start document.xml");
        writer
            .write_all(document_xml.as_bytes())
            .expect("write document.xml");
        writer.finish().expect("finish zip").into_inner()
    }

    fn wrap_body(paragraphs: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>{paragraphs}</w:body>
</w:document>"#
        )
    }

    #[test]
    fn collects_paragraphs_as_lines() {
        let xml = wrap_body(
            "<w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p>\
             <w:p><w:r><w:t>jane@example.com</w:t></w:r></w:p>",
        );
        let text = extract_docx_text(&make_docx(&xml)).unwrap();
        assert_eq!(text, "Jane Doe\njane@example.com");
    }

    #[test]
    fn concatenates_split_runs_within_a_paragraph() {
        let xml = wrap_body(
            "<w:p><w:r><w:t>Exper</w:t></w:r><w:r><w:t>ience</w:t></w:r></w:p>",
        );
        let text = extract_docx_text(&make_docx(&xml)).unwrap();
        assert_eq!(text, "Experience");
    }

    #[test]
    fn skips_empty_paragraphs() {
        let xml = wrap_body(
            "<w:p><w:r><w:t>Skills</w:t></w:r></w:p>\
             <w:p></w:p>\
             <w:p><w:r><w:t>Rust</w:t></w:r></w:p>",
        );
        let text = extract_docx_text(&make_docx(&xml)).unwrap();
        assert_eq!(text, "Skills\nRust");
    }

    #[test]
    fn rejects_non_zip_bytes() {
        let err = extract_docx_text(b"this is not a zip file").unwrap_err();
        assert_eq!(err.category, FailureCategory::Corrupted);
        assert!(err.message.contains("DOCX container"));
    }

    #[test]
    fn rejects_zip_without_document_xml() {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("unrelated.txt", SimpleFileOptions::default())
            .expect("start file");
        writer.write_all(b"hello").expect("write file");
        let bytes = writer.finish().expect("finish zip").into_inner();

        let err = extract_docx_text(&bytes).unwrap_err();
        assert!(err.message.contains("document.xml"));
    }

    #[test]
    fn rejects_document_with_no_text() {
        let xml = wrap_body("<w:p></w:p>");
        assert!(extract_docx_text(&make_docx(&xml)).is_err());
    }
}
