use serde::{Deserialize, Serialize};

/// Structured-but-untrusted record produced by the heuristic parser.
///
/// Every list field serializes as an empty list (never null) so clients can
/// iterate unconditionally. Once this record has round-tripped through the
/// client it must be treated as arbitrary JSON again; the sanitizer, not
/// this type, is the trust boundary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParsedResume {
    pub personal_info: PersonalInfo,
    pub professional_summary: Option<String>,
    pub work_experience: Vec<WorkExperience>,
    pub education: Vec<Education>,
    pub skills: Vec<String>,
    pub certifications: Vec<Certification>,
    pub projects: Vec<Project>,
    pub volunteer_experience: Vec<VolunteerExperience>,
    pub awards: Vec<Award>,
    pub languages: Vec<LanguageSkill>,
    pub references: Vec<Reference>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkExperience {
    pub id: String,
    pub job_title: String,
    pub company: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub id: String,
    pub degree: String,
    pub institution: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub gpa: Option<String>,
    pub coursework: Vec<String>,
    pub honors: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Certification {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VolunteerExperience {
    pub id: String,
    pub role: String,
    pub organization: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Award {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LanguageSkill {
    pub id: String,
    pub language: String,
    pub proficiency: Proficiency,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Reference {
    pub id: String,
    pub name: String,
}

/// Language proficiency tiers, coarsest useful granularity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Proficiency {
    Native,
    Advanced,
    Intermediate,
    #[default]
    Beginner,
}
