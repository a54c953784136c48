//! Personal-info extraction. The name comes from a positional heuristic on
//! the first lines; every other field is an independent regex over the whole
//! document, so contact details are found even without a labeled section.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::resume::PersonalInfo;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap());

static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+?\d{1,3}[\s.-]*)?\(?\d{3}\)?[\s.-]?\d{3}[\s.-]?\d{4}").unwrap()
});

static LINKEDIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:https?://)?(?:www\.)?linkedin\.com/in/[A-Za-z0-9_%-]+").unwrap()
});

static GITHUB_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:https?://)?(?:www\.)?github\.com/[A-Za-z0-9-]{1,39}").unwrap()
});

static STREET_ADDRESS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b\d{1,5}\s+[A-Za-z .'-]{3,40}\b(?:street|st|avenue|ave|road|rd|boulevard|blvd|lane|ln|drive|dr|court|ct|place|pl|way)\b",
    )
    .unwrap()
});

static CITY_STATE_ZIP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z][A-Za-z .'-]+,\s*[A-Z]{2}\s+\d{5}(?:-\d{4})?\b").unwrap());

static STARTS_WITH_PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?\d").unwrap());

/// How far into the document the name can plausibly sit.
const NAME_SEARCH_LINES: usize = 5;

pub fn extract_personal_info(text: &str, lines: &[String]) -> PersonalInfo {
    PersonalInfo {
        full_name: guess_name(lines),
        email: EMAIL_RE.find(text).map(|m| m.as_str().to_lowercase()),
        phone: PHONE_RE.find(text).map(|m| m.as_str().trim().to_string()),
        linkedin: LINKEDIN_RE.find(text).map(|m| m.as_str().to_string()),
        github: GITHUB_RE.find(text).map(|m| m.as_str().to_string()),
        address: extract_address(text),
    }
}

/// First line within the opening lines that looks like a person's name:
/// two to four words, each capitalized, no email or URL content, not a
/// phone number. Misses lowercase particles ("van", "de") by design; the
/// sanitizer's fallback chain covers records where this finds nothing.
fn guess_name(lines: &[String]) -> Option<String> {
    for line in lines.iter().take(NAME_SEARCH_LINES) {
        let line = line.trim();
        if line.is_empty()
            || line.len() > 50
            || line.contains('@')
            || line.to_lowercase().contains("http")
            || STARTS_WITH_PHONE_RE.is_match(line)
        {
            continue;
        }

        let words: Vec<&str> = line.split_whitespace().collect();
        if !(2..=4).contains(&words.len()) {
            continue;
        }
        if words
            .iter()
            .all(|w| w.chars().next().map(|c| c.is_uppercase()).unwrap_or(false))
        {
            return Some(line.to_string());
        }
    }
    None
}

fn extract_address(text: &str) -> Option<String> {
    if let Some(m) = STREET_ADDRESS_RE.find(text) {
        return Some(m.as_str().trim().to_string());
    }
    CITY_STATE_ZIP_RE
        .find(text)
        .map(|m| m.as_str().trim().to_string())
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
    fn finds_name_on_the_first_line() {
        let lines = make_lines("John Smith\njohn@x.com");
        assert_eq!(guess_name(&lines), Some("John Smith".to_string()));
    }

    #[test]
    fn skips_contact_lines_when_guessing_the_name() {
        let lines = make_lines(
            "john.smith@example.com\n\
             https://github.com/jsmith\n\
             +1 555 123 4567\n\
             John Smith",
        );
        assert_eq!(guess_name(&lines), Some("John Smith".to_string()));
    }

    #[test]
    fn ignores_names_past_the_opening_lines() {
        let lines = make_lines("a\nb\nc\nd\ne\nJohn Smith");
        assert_eq!(guess_name(&lines), None);
    }

    #[test]
    fn rejects_lowercase_and_single_word_lines() {
        assert_eq!(guess_name(&make_lines("john smith")), None);
        assert_eq!(guess_name(&make_lines("Curriculum")), None);
        assert_eq!(guess_name(&make_lines("Very Long Name Five Words")), None);
    }

    #[test]
    fn allows_middle_names_and_initials() {
        let lines = make_lines("Mary Jane O'Brien");
        assert_eq!(guess_name(&lines), Some("Mary Jane O'Brien".to_string()));
    }

    #[test]
    fn extracts_contact_fields_from_anywhere_in_the_text() {
        let text = "Profile\nReach me at JANE.DOE@Example.COM or (555) 123-4567.\n\
                    linkedin.com/in/jane-doe · github.com/janedoe";
        let info = extract_personal_info(text, &make_lines(text));

        assert_eq!(info.email.as_deref(), Some("jane.doe@example.com"));
        assert_eq!(info.phone.as_deref(), Some("(555) 123-4567"));
        assert_eq!(info.linkedin.as_deref(), Some("linkedin.com/in/jane-doe"));
        assert_eq!(info.github.as_deref(), Some("github.com/janedoe"));
    }

    #[test]
    fn matches_common_phone_formats_but_not_year_ranges() {
        assert!(PHONE_RE.is_match("+1 555 123 4567"));
        assert!(PHONE_RE.is_match("555.123.4567"));
        assert!(PHONE_RE.is_match("5551234567"));
        assert!(!PHONE_RE.is_match("2016 - 2020"));
    }

    #[test]
    fn extracts_street_addresses_and_city_state_zip() {
        assert_eq!(
            extract_address("Lives at 123 Main Street, apartment 4."),
            Some("123 Main Street".to_string())
        );
        assert_eq!(
            extract_address("Springfield, IL 62704 — open to relocation"),
            Some("Springfield, IL 62704".to_string())
        );
        assert_eq!(extract_address("No location given"), None);
    }

    #[test]
    fn missing_fields_stay_none() {
        let text = "nothing useful here";
        let info = extract_personal_info(text, &make_lines(text));
        assert!(info.full_name.is_none());
        assert!(info.email.is_none());
        assert!(info.phone.is_none());
        assert!(info.address.is_none());
    }
}
