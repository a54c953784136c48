//! Flat-section extraction: skills, certifications, awards, references,
//! and languages. These sections have no entry nesting; every qualifying
//! line (or fragment) becomes one record.

use crate::models::resume::{Award, Certification, LanguageSkill, Proficiency, Reference};
use crate::parser::entries::bullet_text;
use crate::parser::ids::IdGenerator;

const SKILL_SPLIT_CHARS: &[char] = &[',', ';', '|', '•', '-', '*'];
const LANGUAGE_SPLIT_CHARS: &[char] = &['-', ':', ','];

/// Lines at or below this length are layout noise, not records.
const RECORD_MIN_CHARS: usize = 2;

/// Every fragment longer than one character becomes a skill; no
/// deduplication, the client owns the list after this point.
pub fn parse_skills(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .flat_map(|line| line.split(SKILL_SPLIT_CHARS))
        .map(str::trim)
        .filter(|fragment| fragment.chars().count() > 1)
        .map(String::from)
        .collect()
}

pub fn parse_certifications(lines: &[String], ids: &dyn IdGenerator) -> Vec<Certification> {
    record_lines(lines)
        .map(|name| Certification {
            id: ids.next_id(),
            name,
        })
        .collect()
}

pub fn parse_awards(lines: &[String], ids: &dyn IdGenerator) -> Vec<Award> {
    record_lines(lines)
        .map(|title| Award {
            id: ids.next_id(),
            title,
        })
        .collect()
}

pub fn parse_references(lines: &[String], ids: &dyn IdGenerator) -> Vec<Reference> {
    record_lines(lines)
        .filter(|name| !name.to_lowercase().contains("available upon request"))
        .map(|name| Reference {
            id: ids.next_id(),
            name,
        })
        .collect()
}

pub fn parse_languages(lines: &[String], ids: &dyn IdGenerator) -> Vec<LanguageSkill> {
    lines
        .iter()
        .filter_map(|line| {
            let stripped = bullet_text(line).unwrap_or(line);
            let language = stripped.split(LANGUAGE_SPLIT_CHARS).next()?.trim();
            if language.chars().count() < 2 {
                return None;
            }
            Some(LanguageSkill {
                id: ids.next_id(),
                language: language.to_string(),
                proficiency: infer_proficiency(stripped),
            })
        })
        .collect()
}

/// Tier synonyms are checked in priority order; the first tier whose
/// marker appears anywhere in the line wins.
fn infer_proficiency(line: &str) -> Proficiency {
    let lower = line.to_lowercase();
    if lower.contains("native") || lower.contains("fluent") {
        Proficiency::Native
    } else if lower.contains("advanced") || lower.contains("proficient") {
        Proficiency::Advanced
    } else if lower.contains("intermediate") {
        Proficiency::Intermediate
    } else {
        Proficiency::Beginner
    }
}

fn record_lines(lines: &[String]) -> impl Iterator<Item = String> + '_ {
    lines.iter().filter_map(|line| {
        let text = bullet_text(line).unwrap_or(line).trim();
        (text.chars().count() > RECORD_MIN_CHARS).then(|| text.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ids::SequentialIds;

    fn make_lines(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn splits_skills_on_every_separator() {
        let skills = parse_skills(&make_lines(&["Python, React; Node | SQL"]));
        assert_eq!(skills, vec!["Python", "React", "Node", "SQL"]);
    }

    #[test]
    fn keeps_duplicates_and_drops_single_char_fragments() {
        let skills = parse_skills(&make_lines(&["Go, C, Go", "• Rust"]));
        assert_eq!(skills, vec!["Go", "Go", "Rust"]);
    }

    #[test]
    fn certification_lines_become_records_with_bullets_stripped() {
        let ids = SequentialIds::default();
        let certs = parse_certifications(
            &make_lines(&["• AWS Certified Solutions Architect", "ok", "CCNA"]),
            &ids,
        );
        let names: Vec<&str> = certs.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["AWS Certified Solutions Architect", "CCNA"]);
        assert_eq!(certs[0].id, "entry-1");
    }

    #[test]
    fn references_drop_the_upon_request_placeholder() {
        let ids = SequentialIds::default();
        let refs = parse_references(
            &make_lines(&["Dr. Ada Lovelace, Acme", "References available upon request"]),
            &ids,
        );
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].name, "Dr. Ada Lovelace, Acme");
    }

    #[test]
    fn languages_split_on_dash_colon_comma_and_infer_tiers() {
        let ids = SequentialIds::default();
        let languages = parse_languages(
            &make_lines(&[
                "Spanish - Native speaker",
                "French: proficient",
                "German, intermediate",
                "Japanese",
            ]),
            &ids,
        );

        let pairs: Vec<(&str, Proficiency)> = languages
            .iter()
            .map(|l| (l.language.as_str(), l.proficiency))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("Spanish", Proficiency::Native),
                ("French", Proficiency::Advanced),
                ("German", Proficiency::Intermediate),
                ("Japanese", Proficiency::Beginner),
            ]
        );
    }

    #[test]
    fn first_matching_tier_wins() {
        assert_eq!(
            infer_proficiency("fluent, though intermediate in writing"),
            Proficiency::Native
        );
    }

    #[test]
    fn bulleted_language_lines_are_not_split_on_the_bullet_dash() {
        let ids = SequentialIds::default();
        let languages = parse_languages(&make_lines(&["- Spanish: fluent"]), &ids);
        assert_eq!(languages.len(), 1);
        assert_eq!(languages[0].language, "Spanish");
    }
}
