//! Entry/date/bullet state machines for the multi-entry sections.
//!
//! Each section's lines are folded left-to-right: a line either starts a new
//! entry, attaches a date range or bullet to the current entry, or is
//! dropped. Dropping unrecognized lines is a precision-over-recall choice:
//! a resume line that matches nothing is more often layout noise than data.
//!
//! Classification order is bullet, then date, then entry start, so a bullet
//! like "• Led engineering team" stays an achievement instead of spawning a
//! new entry from its title keyword.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::resume::{Education, Project, VolunteerExperience, WorkExperience};
use crate::parser::ids::IdGenerator;

const JOB_TITLE_KEYWORDS: &[&str] = &[
    "engineer",
    "developer",
    "programmer",
    "architect",
    "manager",
    "director",
    "analyst",
    "designer",
    "consultant",
    "specialist",
    "coordinator",
    "administrator",
    "supervisor",
    "technician",
    "scientist",
    "researcher",
    "intern",
    "lead",
    "officer",
    "founder",
    "president",
    "executive",
    "assistant",
    "associate",
    "teacher",
    "professor",
    "accountant",
];

const INDUSTRY_KEYWORDS: &[&str] = &[
    "marketing",
    "sales",
    "finance",
    "accounting",
    "operations",
    "logistics",
    "recruiting",
    "human resources",
    "customer service",
    "business development",
    "product management",
    "quality assurance",
];

const DEGREE_KEYWORDS: &[&str] = &[
    "bachelor",
    "master",
    "ph.d",
    "phd",
    "doctorate",
    "b.s.",
    "m.s.",
    "b.a.",
    "m.a.",
    "b.sc",
    "m.sc",
    "mba",
    "diploma",
    "university",
    "college",
    "institute",
    "academy",
    "school",
    "degree",
];

const HONORS_KEYWORDS: &[&str] = &[
    "honors",
    "honours",
    "cum laude",
    "dean's list",
    "valedictorian",
    "scholarship",
];

const WORK_SEPARATORS: &[&str] = &[" at ", " - ", " | "];
const EDUCATION_SEPARATORS: &[&str] = &[" at ", " - ", " | ", " from "];

static MONTH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|jun(?:e)?|jul(?:y)?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\b",
    )
    .unwrap()
});
static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").unwrap());
static PRESENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:present|current|now)\b").unwrap());
static NUMERIC_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{1,2}/\d{2,4}(?:/\d{2,4})?\b").unwrap());
static TITLE_AT_COMPANY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r" at [A-Z]").unwrap());
static GPA_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bgpa\b[:\s]*([0-9]+(?:\.[0-9]+)?(?:\s*/\s*[0-9]+(?:\.[0-9]+)?)?)").unwrap()
});
static DATE_RANGE_SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s+to\s+|\s*[-–—]\s*").unwrap());

// ────────────────────────────────────────────────────────────────────────────
// Line classifiers
// ────────────────────────────────────────────────────────────────────────────

/// Returns the text of a bullet line (`•`, `-`, `*` prefixes), or None.
pub fn bullet_text(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    for prefix in ['•', '-', '*'] {
        if let Some(rest) = trimmed.strip_prefix(prefix) {
            return Some(rest.trim());
        }
    }
    None
}

/// A line "is a date" when it carries any date-ish token: month name,
/// 4-digit year, present/current/now, or a slash date.
pub fn is_date_line(line: &str) -> bool {
    MONTH_RE.is_match(line)
        || YEAR_RE.is_match(line)
        || PRESENT_RE.is_match(line)
        || NUMERIC_DATE_RE.is_match(line)
}

fn is_work_entry_start(line: &str) -> bool {
    let lower = line.to_lowercase();
    JOB_TITLE_KEYWORDS.iter().any(|k| lower.contains(k))
        || TITLE_AT_COMPANY_RE.is_match(line)
        || INDUSTRY_KEYWORDS.iter().any(|k| lower.contains(k))
}

fn is_education_entry_start(line: &str) -> bool {
    let lower = line.to_lowercase();
    DEGREE_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Generic title test for sections without keyword lists (projects,
/// volunteer work): anything of plausible heading length with a letter in
/// it. Bullets and date lines are excluded by classification order.
fn looks_like_title(line: &str) -> bool {
    let trimmed = line.trim();
    (3..=80).contains(&trimmed.len()) && trimmed.chars().any(|c| c.is_alphabetic())
}

fn split_date_range(line: &str) -> (Option<String>, Option<String>) {
    let mut parts = DATE_RANGE_SPLIT_RE
        .splitn(line.trim(), 2)
        .map(str::trim)
        .filter(|part| !part.is_empty());
    let start = parts.next().map(String::from);
    let end = parts.next().map(String::from);
    (start, end)
}

/// Splits a heading on the first matching separator; the remainder becomes
/// the organization. Separator priority is fixed, first match wins.
fn split_title(line: &str, separators: &[&str]) -> (String, Option<String>) {
    for sep in separators {
        if let Some((left, right)) = line.split_once(sep) {
            let left = left.trim();
            let right = right.trim();
            if !left.is_empty() && !right.is_empty() {
                return (left.to_string(), Some(right.to_string()));
            }
        }
    }
    (line.trim().to_string(), None)
}

fn set_dates(start: &mut Option<String>, end: &mut Option<String>, line: &str) {
    // First date line wins; later ones are usually per-bullet context.
    if start.is_none() && end.is_none() {
        let (s, e) = split_date_range(line);
        *start = s;
        *end = e;
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Section state machines
// ────────────────────────────────────────────────────────────────────────────

pub fn parse_work_entries(lines: &[String], ids: &dyn IdGenerator) -> Vec<WorkExperience> {
    let mut entries = Vec::new();
    let mut current: Option<WorkExperience> = None;

    for line in lines {
        if let Some(text) = bullet_text(line) {
            if let Some(entry) = current.as_mut() {
                if !text.is_empty() {
                    entry.achievements.push(text.to_string());
                }
            }
            continue;
        }
        if is_date_line(line) {
            if let Some(entry) = current.as_mut() {
                set_dates(&mut entry.start_date, &mut entry.end_date, line);
            }
            continue;
        }
        if is_work_entry_start(line) {
            if let Some(done) = current.take() {
                entries.push(done);
            }
            let (job_title, company) = split_title(line, WORK_SEPARATORS);
            current = Some(WorkExperience {
                id: ids.next_id(),
                job_title,
                company,
                ..Default::default()
            });
        }
    }
    entries.extend(current);
    entries
}

pub fn parse_education_entries(lines: &[String], ids: &dyn IdGenerator) -> Vec<Education> {
    let mut entries = Vec::new();
    let mut current: Option<Education> = None;

    for line in lines {
        let bullet = bullet_text(line);
        let content = bullet.unwrap_or(line);

        if let Some(entry) = current.as_mut() {
            if apply_education_detail(entry, content) {
                continue;
            }
        }
        if bullet.is_some() {
            continue;
        }
        if is_date_line(line) {
            if let Some(entry) = current.as_mut() {
                set_dates(&mut entry.start_date, &mut entry.end_date, line);
            }
            continue;
        }
        if is_education_entry_start(line) {
            if let Some(done) = current.take() {
                entries.push(done);
            }
            let (degree, institution) = split_title(line, EDUCATION_SEPARATORS);
            current = Some(Education {
                id: ids.next_id(),
                degree,
                institution,
                ..Default::default()
            });
        }
    }
    entries.extend(current);
    entries
}

/// GPA, coursework, and honors lines enrich the current education entry.
/// Returns false when the line carries none of them.
fn apply_education_detail(entry: &mut Education, content: &str) -> bool {
    let lower = content.to_lowercase();

    if let Some(caps) = GPA_RE.captures(content) {
        if entry.gpa.is_none() {
            entry.gpa = Some(caps[1].trim().to_string());
        }
        return true;
    }
    if lower.contains("coursework") {
        if let Some((_, rest)) = content.split_once(':') {
            entry.coursework.extend(
                rest.split(',')
                    .map(str::trim)
                    .filter(|fragment| fragment.len() > 1)
                    .map(String::from),
            );
        }
        return true;
    }
    if HONORS_KEYWORDS.iter().any(|k| lower.contains(k)) {
        entry.honors.push(content.trim().to_string());
        return true;
    }
    false
}

pub fn parse_project_entries(lines: &[String], ids: &dyn IdGenerator) -> Vec<Project> {
    let mut entries = Vec::new();
    let mut current: Option<Project> = None;

    for line in lines {
        if let Some(text) = bullet_text(line) {
            if let Some(entry) = current.as_mut() {
                if !text.is_empty() {
                    entry.highlights.push(text.to_string());
                }
            }
            continue;
        }
        if is_date_line(line) {
            if let Some(entry) = current.as_mut() {
                set_dates(&mut entry.start_date, &mut entry.end_date, line);
            }
            continue;
        }
        if looks_like_title(line) {
            if let Some(done) = current.take() {
                entries.push(done);
            }
            current = Some(Project {
                id: ids.next_id(),
                name: line.trim().to_string(),
                ..Default::default()
            });
        }
    }
    entries.extend(current);
    entries
}

pub fn parse_volunteer_entries(lines: &[String], ids: &dyn IdGenerator) -> Vec<VolunteerExperience> {
    let mut entries = Vec::new();
    let mut current: Option<VolunteerExperience> = None;

    for line in lines {
        if let Some(text) = bullet_text(line) {
            if let Some(entry) = current.as_mut() {
                if !text.is_empty() {
                    entry.highlights.push(text.to_string());
                }
            }
            continue;
        }
        if is_date_line(line) {
            if let Some(entry) = current.as_mut() {
                set_dates(&mut entry.start_date, &mut entry.end_date, line);
            }
            continue;
        }
        if looks_like_title(line) {
            if let Some(done) = current.take() {
                entries.push(done);
            }
            let (role, organization) = split_title(line, WORK_SEPARATORS);
            current = Some(VolunteerExperience {
                id: ids.next_id(),
                role,
                organization,
                ..Default::default()
            });
        }
    }
    entries.extend(current);
    entries
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
