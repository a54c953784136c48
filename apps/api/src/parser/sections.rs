//! Section segmentation by header-synonym containment.
//!
//! A line starts section S when its lowercased text contains any of S's
//! header synonyms; the section ends at the next line containing any
//! synonym of any section. Containment means body text mentioning a
//! section keyword truncates the current section — a known limitation of
//! the heuristic, deliberately preserved (see DESIGN.md) rather than
//! patched with smarter header detection.

use std::collections::HashMap;
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Summary,
    Experience,
    Education,
    Skills,
    Certifications,
    Projects,
    Volunteer,
    Awards,
    Languages,
    References,
}

/// Lowercased header synonyms per section. Plural forms are deliberate
/// where the singular is a common body word ("project manager",
/// "honors" inside an education entry).
const SECTION_SYNONYMS: &[(Section, &[&str])] = &[
    (
        Section::Summary,
        &["summary", "objective", "profile", "about me"],
    ),
    (
        Section::Experience,
        &[
            "experience",
            "work experience",
            "professional experience",
            "employment",
            "work history",
        ],
    ),
    (Section::Education, &["education", "academic"]),
    (
        Section::Skills,
        &["skills", "technologies", "competencies", "technical proficiencies"],
    ),
    (
        Section::Certifications,
        &["certification", "certificate", "license"],
    ),
    (Section::Projects, &["projects", "portfolio"]),
    (Section::Volunteer, &["volunteer", "community"]),
    (Section::Awards, &["awards", "achievements", "recognition"]),
    (Section::Languages, &["languages"]),
    (Section::References, &["references", "referees"]),
];

/// Maps each detected section to the line range of its body (the lines
/// strictly between its header line and the next header-like line).
pub fn segment_sections(lines: &[String]) -> HashMap<Section, Range<usize>> {
    let lowered: Vec<String> = lines.iter().map(|line| line.to_lowercase()).collect();

    let mut spans = HashMap::new();
    for (section, synonyms) in SECTION_SYNONYMS {
        let Some(start) = lowered
            .iter()
            .position(|line| synonyms.iter().any(|syn| line.contains(syn)))
        else {
            continue;
        };
        let end = lowered
            .iter()
            .enumerate()
            .skip(start + 1)
            .find(|(_, line)| mentions_any_section(line))
            .map(|(i, _)| i)
            .unwrap_or(lines.len());
        spans.insert(*section, start + 1..end);
    }
    spans
}

fn mentions_any_section(line_lower: &str) -> bool {
    SECTION_SYNONYMS
        .iter()
        .any(|(_, synonyms)| synonyms.iter().any(|syn| line_lower.contains(syn)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_lines(text: &str) -> Vec<String> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn section_body_spans_exactly_between_headers() {
        let lines = make_lines(
            "John Smith\n\
             EXPERIENCE\n\
             Software Engineer at Acme\n\
             • Built systems\n\
             EDUCATION\n\
             B.S. Computer Science",
        );
        let spans = segment_sections(&lines);

        let experience = spans.get(&Section::Experience).unwrap();
        assert_eq!(*experience, 2..4);
        let education = spans.get(&Section::Education).unwrap();
        assert_eq!(*education, 5..6);
    }

    #[test]
    fn body_text_containing_a_keyword_truncates_the_section() {
        // "education" inside a bullet ends the experience section early.
        // Known containment limitation, pinned on purpose.
        let lines = make_lines(
            "EXPERIENCE\n\
             Engineer at Acme\n\
             • Mentored through an education program\n\
             • Shipped the billing service",
        );
        let spans = segment_sections(&lines);

        let experience = spans.get(&Section::Experience).unwrap();
        assert_eq!(*experience, 1..2);
        // The bullet also becomes the education "header".
        let education = spans.get(&Section::Education).unwrap();
        assert_eq!(*education, 3..4);
    }

    #[test]
    fn undetected_sections_are_absent() {
        let lines = make_lines("Jane Doe\njane@example.com");
        let spans = segment_sections(&lines);
        assert!(spans.is_empty());
    }

    #[test]
    fn section_at_end_of_document_runs_to_the_last_line() {
        let lines = make_lines("SKILLS\nRust, Go\nPython");
        let spans = segment_sections(&lines);
        assert_eq!(*spans.get(&Section::Skills).unwrap(), 1..3);
    }

    #[test]
    fn headers_match_case_insensitively_and_by_containment() {
        let lines = make_lines("Professional Experience\nEngineer at Acme\nTechnical Skills\nRust");
        let spans = segment_sections(&lines);
        assert_eq!(*spans.get(&Section::Experience).unwrap(), 1..2);
        assert_eq!(*spans.get(&Section::Skills).unwrap(), 3..4);
    }
}
