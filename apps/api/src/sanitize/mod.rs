//! Sanitize gate between client-supplied resume JSON and the renderer.
//!
//! # Architecture
//! - `coerce`: per-type coercion primitives (string, list, number) with
//!   field-specific bounds.
//! - `reduce`: the tiered reduction policy render retries draw from.
//!
//! A parsed record round-trips through a client editor before it comes
//! back for rendering, so the input here is arbitrary JSON regardless of
//! what the parser produced. Every field access goes through an explicit
//! coercion; nothing is assumed about shape. Only two conditions fail the
//! gate: a non-object payload, and a record carrying neither a name nor an
//! email key. Everything else degrades to absent fields.

pub mod coerce;
pub mod reduce;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::sanitized::{
    SanitizedEducation, SanitizedLanguage, SanitizedProject, SanitizedResume, SanitizedVolunteer,
    SanitizedWork,
};
use coerce::{
    coerce_string, coerce_string_list, MAX_ADDRESS_CHARS, MAX_BULLET_CHARS, MAX_DATE_CHARS,
    MAX_EMAIL_CHARS, MAX_GPA_CHARS, MAX_LINK_CHARS, MAX_NAME_CHARS, MAX_ORG_CHARS,
    MAX_PHONE_CHARS, MAX_PROFICIENCY_CHARS, MAX_SKILL_CHARS, MAX_SUMMARY_CHARS, MAX_TITLE_CHARS,
};

/// Heading text used when neither the name field nor the email local-part
/// yields anything printable. The document header always needs a title.
pub const DEFAULT_DISPLAY_NAME: &str = "Your Name";

/// Substituted for required text the record did not supply; the layout
/// engine rejects zero-length text nodes.
const PLACEHOLDER_SPACE: &str = " ";

const NAME_KEYS: &[&str] = &["fullName", "name"];

#[derive(Debug, Error)]
pub enum SanitizeError {
    #[error("resume payload must be a JSON object")]
    NotAnObject,
    #[error("resume payload carries no name or email field")]
    MissingIdentity,
}

/// Coerces an untrusted record into a render-safe projection.
///
/// Identity is a key-presence check: a record that carries a name or email
/// key passes even when the values are unusable, because the display name
/// can still resolve through the fallback chain.
pub fn sanitize(untrusted: &Value) -> Result<SanitizedResume, SanitizeError> {
    let record = untrusted.as_object().ok_or(SanitizeError::NotAnObject)?;
    let contact = record.get("personalInfo").and_then(Value::as_object);

    if !keys_present(record, contact, NAME_KEYS) && !keys_present(record, contact, &["email"]) {
        return Err(SanitizeError::MissingIdentity);
    }

    let email = scalar_field(record, contact, &["email"], MAX_EMAIL_CHARS);
    let explicit_name = scalar_field(record, contact, NAME_KEYS, MAX_NAME_CHARS);
    let name = resolve_display_name(explicit_name, email.as_deref());

    Ok(SanitizedResume {
        name,
        email,
        phone: scalar_field(record, contact, &["phone"], MAX_PHONE_CHARS),
        linkedin: scalar_field(record, contact, &["linkedin"], MAX_LINK_CHARS),
        github: scalar_field(record, contact, &["github"], MAX_LINK_CHARS),
        address: scalar_field(record, contact, &["address"], MAX_ADDRESS_CHARS),
        summary: scalar_field(
            record,
            contact,
            &["professionalSummary", "summary"],
            MAX_SUMMARY_CHARS,
        ),
        work_experience: sanitize_entries(record.get("workExperience"), sanitize_work),
        education: sanitize_entries(record.get("education"), sanitize_education),
        skills: coerce_string_list(record.get("skills"), MAX_SKILL_CHARS),
        certifications: named_list(
            record.get("certifications"),
            &["name", "title"],
            MAX_TITLE_CHARS,
        ),
        projects: sanitize_entries(record.get("projects"), sanitize_project),
        volunteer_experience: sanitize_entries(
            record.get("volunteerExperience"),
            sanitize_volunteer,
        ),
        awards: named_list(record.get("awards"), &["title", "name"], MAX_TITLE_CHARS),
        languages: sanitize_entries(record.get("languages"), sanitize_language),
        references: named_list(record.get("references"), &["name"], MAX_TITLE_CHARS),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Field lookup
// ────────────────────────────────────────────────────────────────────────────

/// Looks a scalar up under `personalInfo` first, then at the top level;
/// hand-edited records routinely flatten the contact block.
fn scalar_field(
    record: &Map<String, Value>,
    contact: Option<&Map<String, Value>>,
    keys: &[&str],
    max_chars: usize,
) -> Option<String> {
    keys.iter()
        .flat_map(|key| [contact.and_then(|c| c.get(*key)), record.get(*key)])
        .flatten()
        .find_map(|value| coerce_string(Some(value), max_chars))
}

fn keys_present(
    record: &Map<String, Value>,
    contact: Option<&Map<String, Value>>,
    keys: &[&str],
) -> bool {
    keys.iter().any(|key| {
        record.contains_key(*key) || contact.map_or(false, |c| c.contains_key(*key))
    })
}

fn resolve_display_name(explicit: Option<String>, email: Option<&str>) -> String {
    if let Some(name) = explicit {
        return name;
    }
    email
        .and_then(display_name_from_email)
        .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string())
}

fn display_name_from_email(email: &str) -> Option<String> {
    let local = email.split('@').next()?;
    let words: Vec<String> = local
        .split(['.', '_', '-'])
        .filter(|word| !word.is_empty())
        .map(title_case_word)
        .collect();
    if words.is_empty() {
        return None;
    }
    coerce::clean_text(&words.join(" "), MAX_NAME_CHARS)
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Sub-records
// ────────────────────────────────────────────────────────────────────────────

fn sanitize_entries<T>(
    value: Option<&Value>,
    sanitize_one: impl Fn(&Value) -> Option<T>,
) -> Vec<T> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(|item| sanitize_one(item)).collect())
        .unwrap_or_default()
}

fn sanitize_work(value: &Value) -> Option<SanitizedWork> {
    let entry = value.as_object()?;
    let job_title = coerce_string(entry.get("jobTitle"), MAX_TITLE_CHARS);
    let company = coerce_string(entry.get("company"), MAX_ORG_CHARS);
    let achievements = coerce_string_list(entry.get("achievements"), MAX_BULLET_CHARS);
    if job_title.is_none() && company.is_none() && achievements.is_empty() {
        return None;
    }
    Some(SanitizedWork {
        job_title: job_title.unwrap_or_else(placeholder),
        company,
        start_date: coerce_string(entry.get("startDate"), MAX_DATE_CHARS),
        end_date: coerce_string(entry.get("endDate"), MAX_DATE_CHARS),
        achievements,
    })
}

fn sanitize_education(value: &Value) -> Option<SanitizedEducation> {
    let entry = value.as_object()?;
    let degree = coerce_string(entry.get("degree"), MAX_TITLE_CHARS);
    let institution = coerce_string(entry.get("institution"), MAX_ORG_CHARS);
    let gpa = coerce_string(entry.get("gpa"), MAX_GPA_CHARS);
    let coursework = coerce_string_list(entry.get("coursework"), MAX_TITLE_CHARS);
    let honors = coerce_string_list(entry.get("honors"), MAX_TITLE_CHARS);
    if degree.is_none()
        && institution.is_none()
        && gpa.is_none()
        && coursework.is_empty()
        && honors.is_empty()
    {
        return None;
    }
    Some(SanitizedEducation {
        degree: degree.unwrap_or_else(placeholder),
        institution,
        start_date: coerce_string(entry.get("startDate"), MAX_DATE_CHARS),
        end_date: coerce_string(entry.get("endDate"), MAX_DATE_CHARS),
        gpa,
        coursework,
        honors,
    })
}

fn sanitize_project(value: &Value) -> Option<SanitizedProject> {
    let entry = value.as_object()?;
    let name = coerce_string(entry.get("name"), MAX_TITLE_CHARS);
    let highlights = coerce_string_list(entry.get("highlights"), MAX_BULLET_CHARS);
    if name.is_none() && highlights.is_empty() {
        return None;
    }
    Some(SanitizedProject {
        name: name.unwrap_or_else(placeholder),
        start_date: coerce_string(entry.get("startDate"), MAX_DATE_CHARS),
        end_date: coerce_string(entry.get("endDate"), MAX_DATE_CHARS),
        highlights,
    })
}

fn sanitize_volunteer(value: &Value) -> Option<SanitizedVolunteer> {
    let entry = value.as_object()?;
    let role = coerce_string(entry.get("role"), MAX_TITLE_CHARS);
    let organization = coerce_string(entry.get("organization"), MAX_ORG_CHARS);
    let highlights = coerce_string_list(entry.get("highlights"), MAX_BULLET_CHARS);
    if role.is_none() && organization.is_none() && highlights.is_empty() {
        return None;
    }
    Some(SanitizedVolunteer {
        role: role.unwrap_or_else(placeholder),
        organization,
        start_date: coerce_string(entry.get("startDate"), MAX_DATE_CHARS),
        end_date: coerce_string(entry.get("endDate"), MAX_DATE_CHARS),
        highlights,
    })
}

fn sanitize_language(value: &Value) -> Option<SanitizedLanguage> {
    if let Some(entry) = value.as_object() {
        let language = coerce_string(entry.get("language"), MAX_TITLE_CHARS)?;
        let proficiency = coerce_string(entry.get("proficiency"), MAX_PROFICIENCY_CHARS);
        return Some(SanitizedLanguage {
            language,
            proficiency,
        });
    }
    coerce_string(Some(value), MAX_TITLE_CHARS).map(|language| SanitizedLanguage {
        language,
        proficiency: None,
    })
}

/// Lists that arrive either as `[{name: ..}]` records or as plain strings.
fn named_list(value: Option<&Value>, name_keys: &[&str], max_chars: usize) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::Object(entry) => name_keys
                    .iter()
                    .find_map(|key| coerce_string(entry.get(*key), max_chars)),
                scalar => coerce_string(Some(scalar), max_chars),
            })
            .collect(),
        other => coerce_string_list(other, max_chars),
    }
}

fn placeholder() -> String {
    PLACEHOLDER_SPACE.to_string()
}
