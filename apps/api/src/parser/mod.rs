//! Heuristic resume field parser.
//!
//! # Architecture
//! - `sections`: segments the text into labeled regions by scanning for
//!   header synonyms.
//! - `contact`: regex extraction of name, email, phone, links, address
//!   from the whole document.
//! - `entries`: line-classifying state machines for multi-entry sections
//!   (work, education, projects, volunteer).
//! - `simple`: flat sections where each line or fragment is one record.
//!
//! Parsing is total: any input produces a `ParsedResume`, with fields the
//! heuristics could not recover left empty. Unrecognized lines are
//! dropped, never propagated as errors.

mod contact;
mod entries;
pub mod ids;
mod sections;
mod simple;

use std::collections::HashMap;
use std::ops::Range;

use crate::models::resume::ParsedResume;
use ids::IdGenerator;
use sections::Section;

/// Parses extracted resume text into a structured (but untrusted) record.
pub fn parse(text: &str, ids: &dyn IdGenerator) -> ParsedResume {
    let lines = preprocess(text);
    let ranges = sections::segment_sections(&lines);

    let summary_lines = section_lines(&lines, &ranges, Section::Summary);
    let professional_summary =
        (!summary_lines.is_empty()).then(|| summary_lines.join(" "));

    ParsedResume {
        personal_info: contact::extract_personal_info(text, &lines),
        professional_summary,
        work_experience: entries::parse_work_entries(
            section_lines(&lines, &ranges, Section::Experience),
            ids,
        ),
        education: entries::parse_education_entries(
            section_lines(&lines, &ranges, Section::Education),
            ids,
        ),
        skills: simple::parse_skills(section_lines(&lines, &ranges, Section::Skills)),
        certifications: simple::parse_certifications(
            section_lines(&lines, &ranges, Section::Certifications),
            ids,
        ),
        projects: entries::parse_project_entries(
            section_lines(&lines, &ranges, Section::Projects),
            ids,
        ),
        volunteer_experience: entries::parse_volunteer_entries(
            section_lines(&lines, &ranges, Section::Volunteer),
            ids,
        ),
        awards: simple::parse_awards(section_lines(&lines, &ranges, Section::Awards), ids),
        languages: simple::parse_languages(
            section_lines(&lines, &ranges, Section::Languages),
            ids,
        ),
        references: simple::parse_references(
            section_lines(&lines, &ranges, Section::References),
            ids,
        ),
    }
}

/// Normalizes line endings, then keeps trimmed non-empty lines.
fn preprocess(text: &str) -> Vec<String> {
    crate::extract::normalize_line_endings(text)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

fn section_lines<'a>(
    lines: &'a [String],
    ranges: &HashMap<Section, Range<usize>>,
    section: Section,
) -> &'a [String] {
    ranges
        .get(&section)
        .map(|range| &lines[range.clone()])
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use ids::SequentialIds;

    #[test]
    fn extracts_contact_entries_and_education_from_a_plain_resume() {
        let text = "John Smith\njohn@x.com\n\nEXPERIENCE\nSoftware Engineer at Acme\nJan 2020 - Present\n• Built systems\n\nEDUCATION\nB.S. Computer Science, State University\n2016 - 2020\n";
        let ids = SequentialIds::default();
        let resume = parse(text, &ids);

        assert_eq!(resume.personal_info.full_name.as_deref(), Some("John Smith"));
        assert_eq!(resume.personal_info.email.as_deref(), Some("john@x.com"));

        assert_eq!(resume.work_experience.len(), 1);
        let work = &resume.work_experience[0];
        assert_eq!(work.job_title, "Software Engineer");
        assert_eq!(work.company.as_deref(), Some("Acme"));
        assert_eq!(work.start_date.as_deref(), Some("Jan 2020"));
        assert_eq!(work.end_date.as_deref(), Some("Present"));
        assert_eq!(work.achievements, vec!["Built systems"]);

        assert_eq!(resume.education.len(), 1);
        let education = &resume.education[0];
        assert!(education.degree.contains("B.S. Computer Science"));
        assert_eq!(education.start_date.as_deref(), Some("2016"));
        assert_eq!(education.end_date.as_deref(), Some("2020"));
    }

    #[test]
    fn aggregates_flat_sections_and_joins_multi_line_summaries() {
        let text = "Jane Roe\njane.roe@example.com | (555) 123-4567\nSUMMARY\nProduct-minded engineer.\nEight years building data tools.\nSKILLS\nRust; SQL\nAWARDS\n• Employee of the Year 2021\nLANGUAGES\nSpanish - fluent\nREFERENCES\nAvailable upon request\n";
        let ids = SequentialIds::default();
        let resume = parse(text, &ids);

        assert_eq!(resume.personal_info.full_name.as_deref(), Some("Jane Roe"));
        assert_eq!(resume.personal_info.phone.as_deref(), Some("(555) 123-4567"));
        assert_eq!(
            resume.professional_summary.as_deref(),
            Some("Product-minded engineer. Eight years building data tools.")
        );
        assert_eq!(resume.skills, vec!["Rust", "SQL"]);
        assert_eq!(resume.awards.len(), 1);
        assert_eq!(resume.awards[0].title, "Employee of the Year 2021");
        assert_eq!(resume.languages.len(), 1);
        assert_eq!(resume.languages[0].language, "Spanish");
        assert!(resume.references.is_empty());
        assert!(resume.work_experience.is_empty());
    }

    #[test]
    fn empty_input_yields_a_sparse_record_not_an_error() {
        let ids = SequentialIds::default();
        let resume = parse("", &ids);

        assert!(resume.personal_info.full_name.is_none());
        assert!(resume.personal_info.email.is_none());
        assert!(resume.professional_summary.is_none());
        assert!(resume.work_experience.is_empty());
        assert!(resume.education.is_empty());
        assert!(resume.skills.is_empty());
        assert!(resume.languages.is_empty());
    }

    #[test]
    fn pathological_input_never_panics() {
        let digits = "1234567890".repeat(9);
        let text = format!("\u{0}\u{7f}%%% ###\n\n\n|||||\n• \n- \nEXPERIENCE\n{digits}\n");
        let ids = SequentialIds::default();
        let resume = parse(&text, &ids);

        assert!(resume.personal_info.full_name.is_none());
        assert!(resume.work_experience.is_empty());
        assert!(resume.skills.is_empty());
    }

    #[test]
    fn headers_anywhere_in_a_line_bound_their_neighbors() {
        let text = "PROFESSIONAL EXPERIENCE\nData Analyst at Initech\nTechnical Skills:\nPython, dbt\n";
        let ids = SequentialIds::default();
        let resume = parse(text, &ids);

        assert_eq!(resume.work_experience.len(), 1);
        assert_eq!(resume.work_experience[0].job_title, "Data Analyst");
        assert_eq!(resume.skills, vec!["Python", "dbt"]);
    }
}
