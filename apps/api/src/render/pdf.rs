//! PDF layout backend over `lopdf`.
//!
//! Single-column Letter layout: bold header, section titles, greedy
//! word-wrapped body lines, fixed leading. Content is paginated by line
//! count; every page shares one resources dictionary.

use async_trait::async_trait;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use tracing::debug;

use super::{RenderError, ResumeRenderer};
use crate::models::sanitized::SanitizedResume;

const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;
const MARGIN: f32 = 54.0;
const LEADING: f32 = 14.0;

/// Approximate column budget for body text: the text width (504pt) over
/// the average Helvetica char width at 10pt (~5.3pt).
const WRAP_COLUMNS: usize = 95;
const LINES_PER_PAGE: usize = 48;

pub struct PdfRenderer;

#[async_trait]
impl ResumeRenderer for PdfRenderer {
    async fn render(&self, resume: &SanitizedResume) -> Result<Vec<u8>, RenderError> {
        // CPU-bound document assembly, off the async executor.
        let resume = resume.clone();
        tokio::task::spawn_blocking(move || render_document(&resume))
            .await
            .map_err(|e| RenderError::Renderer(format!("render task failed to complete: {e}")))?
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Document assembly
// ────────────────────────────────────────────────────────────────────────────

fn render_document(resume: &SanitizedResume) -> Result<Vec<u8>, RenderError> {
    let lines = layout_lines(resume);

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => regular_id, "F2" => bold_id },
    });

    let mut page_ids: Vec<Object> = Vec::new();
    for page_lines in lines.chunks(LINES_PER_PAGE) {
        let content = page_content(page_lines);
        let encoded = content
            .encode()
            .map_err(|e| RenderError::Renderer(format!("content stream encoding: {e}")))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        page_ids.push(page_id.into());
    }

    let page_count = page_ids.len();
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => page_ids,
        "Count" => page_count as i64,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| RenderError::Renderer(format!("document serialization: {e}")))?;
    debug!(pages = page_count, bytes = bytes.len(), "rendered resume pdf");
    Ok(bytes)
}

fn page_content(lines: &[Line]) -> Content {
    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("TL", vec![LEADING.into()]),
        Operation::new("Td", vec![MARGIN.into(), (PAGE_HEIGHT - MARGIN - LEADING).into()]),
    ];
    for line in lines {
        if !line.text.is_empty() {
            operations.push(Operation::new(
                "Tf",
                vec![line.style.font_name().into(), line.style.size().into()],
            ));
            operations.push(Operation::new(
                "Tj",
                vec![Object::string_literal(line.text.as_str())],
            ));
        }
        operations.push(Operation::new("T*", vec![]));
    }
    operations.push(Operation::new("ET", vec![]));
    Content { operations }
}

// ────────────────────────────────────────────────────────────────────────────
// Line layout
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
enum Style {
    Heading,
    Section,
    Body,
}

impl Style {
    fn font_name(self) -> &'static str {
        match self {
            Style::Heading | Style::Section => "F2",
            Style::Body => "F1",
        }
    }

    fn size(self) -> f32 {
        match self {
            Style::Heading => 18.0,
            Style::Section => 12.0,
            Style::Body => 10.0,
        }
    }
}

#[derive(Debug, Clone)]
struct Line {
    text: String,
    style: Style,
}

impl Line {
    fn body(text: impl Into<String>) -> Self {
        Line {
            text: text.into(),
            style: Style::Body,
        }
    }

    fn gap() -> Self {
        Line {
            text: String::new(),
            style: Style::Body,
        }
    }
}

fn layout_lines(resume: &SanitizedResume) -> Vec<Line> {
    let mut lines = vec![Line {
        text: resume.name.clone(),
        style: Style::Heading,
    }];

    let contact: Vec<&str> = [
        resume.email.as_deref(),
        resume.phone.as_deref(),
        resume.address.as_deref(),
        resume.linkedin.as_deref(),
        resume.github.as_deref(),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !contact.is_empty() {
        lines.push(Line::body(contact.join(" | ")));
    }

    if let Some(summary) = &resume.summary {
        push_section(&mut lines, "Summary");
        push_wrapped(&mut lines, summary);
    }

    if !resume.work_experience.is_empty() {
        push_section(&mut lines, "Experience");
        for work in &resume.work_experience {
            push_entry_heading(&mut lines, &work.job_title, work.company.as_deref());
            if let Some(span) = date_span(&work.start_date, &work.end_date) {
                lines.push(Line::body(span));
            }
            for achievement in &work.achievements {
                push_bullet(&mut lines, achievement);
            }
        }
    }

    if !resume.education.is_empty() {
        push_section(&mut lines, "Education");
        for education in &resume.education {
            push_entry_heading(&mut lines, &education.degree, education.institution.as_deref());
            if let Some(span) = date_span(&education.start_date, &education.end_date) {
                lines.push(Line::body(span));
            }
            if let Some(gpa) = &education.gpa {
                lines.push(Line::body(format!("GPA: {gpa}")));
            }
            if !education.coursework.is_empty() {
                push_wrapped(
                    &mut lines,
                    &format!("Coursework: {}", education.coursework.join(", ")),
                );
            }
            for honor in &education.honors {
                push_bullet(&mut lines, honor);
            }
        }
    }

    if !resume.skills.is_empty() {
        push_section(&mut lines, "Skills");
        push_wrapped(&mut lines, &resume.skills.join(", "));
    }

    if !resume.projects.is_empty() {
        push_section(&mut lines, "Projects");
        for project in &resume.projects {
            push_entry_heading(&mut lines, &project.name, None);
            if let Some(span) = date_span(&project.start_date, &project.end_date) {
                lines.push(Line::body(span));
            }
            for highlight in &project.highlights {
                push_bullet(&mut lines, highlight);
            }
        }
    }

    if !resume.volunteer_experience.is_empty() {
        push_section(&mut lines, "Volunteer Experience");
        for volunteer in &resume.volunteer_experience {
            push_entry_heading(&mut lines, &volunteer.role, volunteer.organization.as_deref());
            if let Some(span) = date_span(&volunteer.start_date, &volunteer.end_date) {
                lines.push(Line::body(span));
            }
            for highlight in &volunteer.highlights {
                push_bullet(&mut lines, highlight);
            }
        }
    }

    if !resume.certifications.is_empty() {
        push_section(&mut lines, "Certifications");
        for certification in &resume.certifications {
            push_bullet(&mut lines, certification);
        }
    }

    if !resume.awards.is_empty() {
        push_section(&mut lines, "Awards");
        for award in &resume.awards {
            push_bullet(&mut lines, award);
        }
    }

    if !resume.languages.is_empty() {
        push_section(&mut lines, "Languages");
        for language in &resume.languages {
            let text = match &language.proficiency {
                Some(proficiency) => format!("{} ({proficiency})", language.language),
                None => language.language.clone(),
            };
            push_bullet(&mut lines, &text);
        }
    }

    if !resume.references.is_empty() {
        push_section(&mut lines, "References");
        for reference in &resume.references {
            push_bullet(&mut lines, reference);
        }
    }

    lines
}

fn push_section(lines: &mut Vec<Line>, title: &str) {
    lines.push(Line::gap());
    lines.push(Line {
        text: title.to_string(),
        style: Style::Section,
    });
}

fn push_entry_heading(lines: &mut Vec<Line>, title: &str, organization: Option<&str>) {
    let text = match organization {
        Some(org) => format!("{title} - {org}"),
        None => title.to_string(),
    };
    lines.push(Line {
        text,
        style: Style::Section,
    });
}

fn push_wrapped(lines: &mut Vec<Line>, text: &str) {
    for part in wrap_text(text, WRAP_COLUMNS) {
        lines.push(Line::body(part));
    }
}

fn push_bullet(lines: &mut Vec<Line>, text: &str) {
    // ASCII bullet: the base-14 fonts are written without an /Encoding
    // entry, so text must stay within StandardEncoding.
    for (i, part) in wrap_text(text, WRAP_COLUMNS - 2).into_iter().enumerate() {
        let prefix = if i == 0 { "- " } else { "  " };
        lines.push(Line::body(format!("{prefix}{part}")));
    }
}

fn date_span(start: &Option<String>, end: &Option<String>) -> Option<String> {
    match (start, end) {
        (Some(start), Some(end)) => Some(format!("{start} - {end}")),
        (Some(start), None) => Some(start.clone()),
        (None, Some(end)) => Some(end.clone()),
        (None, None) => None,
    }
}

/// Greedy word wrap by column count. Words never split mid-word, so a
/// single oversized word overflows its line rather than breaking.
fn wrap_text(text: &str, columns: usize) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return vec![" ".to_string()];
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in words {
        let needed = current.chars().count() + 1 + word.chars().count();
        if !current.is_empty() && needed > columns {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    lines.push(current);
    lines
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
