use serde::Serialize;

/// Render-safe projection of an untrusted resume record.
///
/// Invariants held by construction (see `sanitize`):
/// - every `String` is trimmed, control-character-free, bounded, and never
///   empty (a lone placeholder space at worst);
/// - every `Option<String>` is `None` when the field was absent, never
///   `Some("")`;
/// - record identifiers are not carried over; they exist upstream for
///   client-side list editing only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitizedResume {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub address: Option<String>,
    pub summary: Option<String>,
    pub work_experience: Vec<SanitizedWork>,
    pub education: Vec<SanitizedEducation>,
    pub skills: Vec<String>,
    pub certifications: Vec<String>,
    pub projects: Vec<SanitizedProject>,
    pub volunteer_experience: Vec<SanitizedVolunteer>,
    pub awards: Vec<String>,
    pub languages: Vec<SanitizedLanguage>,
    pub references: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitizedWork {
    pub job_title: String,
    pub company: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitizedEducation {
    pub degree: String,
    pub institution: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub gpa: Option<String>,
    pub coursework: Vec<String>,
    pub honors: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitizedProject {
    pub name: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitizedVolunteer {
    pub role: String,
    pub organization: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitizedLanguage {
    pub language: String,
    pub proficiency: Option<String>,
}
