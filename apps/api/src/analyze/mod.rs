//! Resume feedback: an overall score plus concrete strengths and
//! improvements.
//!
//! When an LLM client is configured the review is delegated to it; on any
//! LLM failure (or when no client exists) a weighted heuristic over the
//! sanitized record produces the report instead. Analysis never fails.

pub mod prompts;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::llm_client::{LlmClient, LlmError};
use crate::models::sanitized::SanitizedResume;
use crate::sanitize::coerce::{clean_text, coerce_number, MAX_BULLET_CHARS};

use prompts::{ANALYZE_PROMPT, ANALYZE_SYSTEM};

/// Ceiling for heuristic scores. Only an LLM review can place a resume in
/// the top band, so a fallback report is visibly more conservative.
pub const HEURISTIC_SCORE_CAP: u8 = 85;

/// Summary length (in chars) below which the summary reads as a stub.
const SHORT_SUMMARY_CHARS: usize = 40;

const SECTION_WEIGHTS: &[(&str, f64)] = &[
    ("experience", 0.35),
    ("summary", 0.10),
    ("education", 0.15),
    ("skills", 0.15),
    ("projects", 0.10),
    ("certifications", 0.05),
    ("languages", 0.05),
    ("awards", 0.05),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisSource {
    Llm,
    Heuristic,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub score: u8,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub source: AnalysisSource,
    pub generated_at: DateTime<Utc>,
}

/// Shape the LLM is asked to return. The score arrives as arbitrary JSON
/// and goes through numeric coercion like any other untrusted field.
#[derive(Debug, Deserialize)]
struct LlmAnalysis {
    score: Value,
    #[serde(default)]
    strengths: Vec<String>,
    #[serde(default)]
    improvements: Vec<String>,
}

pub async fn analyze_resume(resume: &SanitizedResume, llm: Option<&LlmClient>) -> AnalysisReport {
    if let Some(llm) = llm {
        match llm_analysis(resume, llm).await {
            Ok(report) => return report,
            Err(error) => {
                warn!(%error, "LLM analysis failed, falling back to heuristics");
            }
        }
    }
    heuristic_analysis(resume)
}

async fn llm_analysis(
    resume: &SanitizedResume,
    llm: &LlmClient,
) -> Result<AnalysisReport, LlmError> {
    let resume_json = serde_json::to_string_pretty(resume)?;
    let prompt = ANALYZE_PROMPT.replace("{resume_json}", &resume_json);
    let analysis: LlmAnalysis = llm.call_json(&prompt, ANALYZE_SYSTEM).await?;

    // A review without a usable score is no review at all.
    let score = clamp_score(&analysis.score).ok_or(LlmError::EmptyContent)?;

    Ok(AnalysisReport {
        score,
        strengths: clean_feedback(&analysis.strengths),
        improvements: clean_feedback(&analysis.improvements),
        source: AnalysisSource::Llm,
        generated_at: Utc::now(),
    })
}

fn clamp_score(raw: &Value) -> Option<u8> {
    coerce_number(Some(raw)).map(|score| score.clamp(0.0, 100.0).round() as u8)
}

fn clean_feedback(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .filter_map(|line| clean_text(line, MAX_BULLET_CHARS))
        .collect()
}

// ── heuristic review ────────────────────────────────────────────────────────

fn heuristic_analysis(resume: &SanitizedResume) -> AnalysisReport {
    let mut weighted_score_sum = 0.0;
    for (section, weight) in SECTION_WEIGHTS {
        weighted_score_sum += section_score(resume, section) * weight;
    }

    let total_weight: f64 = SECTION_WEIGHTS.iter().map(|(_, weight)| weight).sum();
    let overall = (weighted_score_sum / total_weight).clamp(0.0, 1.0);
    let score = ((overall * 100.0).round() as u8).min(HEURISTIC_SCORE_CAP);

    AnalysisReport {
        score,
        strengths: heuristic_strengths(resume),
        improvements: heuristic_improvements(resume),
        source: AnalysisSource::Heuristic,
        generated_at: Utc::now(),
    }
}

fn section_score(resume: &SanitizedResume, section: &str) -> f64 {
    match section {
        "experience" => {
            if resume.work_experience.is_empty() {
                return 0.0;
            }
            let sum: f64 = resume
                .work_experience
                .iter()
                .map(|entry| {
                    let mut entry_score = 0.5;
                    if entry.achievements.len() >= 2 {
                        entry_score += 0.25;
                    }
                    if entry
                        .achievements
                        .iter()
                        .any(|text| has_quantified_outcome(text))
                    {
                        entry_score += 0.25;
                    }
                    entry_score
                })
                .sum();
            (sum / resume.work_experience.len() as f64).clamp(0.0, 1.0)
        }
        "summary" => match resume.summary.as_deref() {
            Some(text) if text.chars().count() >= SHORT_SUMMARY_CHARS => 1.0,
            Some(_) => 0.5,
            None => 0.0,
        },
        "education" => {
            if resume.education.is_empty() {
                return 0.0;
            }
            let sum: f64 = resume
                .education
                .iter()
                .map(|entry| {
                    let mut entry_score = 0.6;
                    if entry.institution.is_some() {
                        entry_score += 0.2;
                    }
                    if entry.start_date.is_some() || entry.end_date.is_some() {
                        entry_score += 0.2;
                    }
                    entry_score
                })
                .sum();
            (sum / resume.education.len() as f64).clamp(0.0, 1.0)
        }
        "skills" => match resume.skills.len() {
            0 => 0.0,
            1..=2 => 0.4,
            3..=7 => 0.7,
            _ => 1.0,
        },
        "projects" => {
            if resume.projects.is_empty() {
                return 0.0;
            }
            let sum: f64 = resume
                .projects
                .iter()
                .map(|entry| if entry.highlights.is_empty() { 0.6 } else { 1.0 })
                .sum();
            (sum / resume.projects.len() as f64).clamp(0.0, 1.0)
        }
        "certifications" => presence(!resume.certifications.is_empty()),
        "languages" => presence(!resume.languages.is_empty()),
        "awards" => presence(!resume.awards.is_empty()),
        _ => 0.0,
    }
}

fn presence(present: bool) -> f64 {
    if present {
        1.0
    } else {
        0.0
    }
}

fn heuristic_strengths(resume: &SanitizedResume) -> Vec<String> {
    let mut strengths = Vec::new();

    let quantified = resume
        .work_experience
        .iter()
        .flat_map(|entry| &entry.achievements)
        .filter(|text| has_quantified_outcome(text))
        .count();
    if quantified > 0 {
        strengths.push(format!(
            "{} achievements carry measurable outcomes",
            quantified
        ));
    }

    if resume.skills.len() >= 8 {
        strengths.push(format!(
            "Broad skills section with {} entries",
            resume.skills.len()
        ));
    }

    if resume.summary.is_some()
        && !resume.work_experience.is_empty()
        && !resume.education.is_empty()
    {
        strengths.push("All core sections are present".to_string());
    }

    strengths
}

fn heuristic_improvements(resume: &SanitizedResume) -> Vec<String> {
    let mut improvements = Vec::new();

    if resume.work_experience.is_empty() {
        improvements.push("Add at least one work experience entry".to_string());
    } else {
        let total_achievements: usize = resume
            .work_experience
            .iter()
            .map(|entry| entry.achievements.len())
            .sum();
        let quantified = resume
            .work_experience
            .iter()
            .flat_map(|entry| &entry.achievements)
            .filter(|text| has_quantified_outcome(text))
            .count();

        if total_achievements == 0 {
            improvements.push("List concrete achievements under each role".to_string());
        } else if quantified == 0 {
            improvements.push(
                "Achievements lack quantified metrics — add numbers, percentages, or dollar amounts"
                    .to_string(),
            );
        }
        if resume.work_experience.len() < 2 {
            improvements
                .push("Add more work experience entries to build a complete picture".to_string());
        }
    }

    match resume.summary.as_deref() {
        None => improvements.push("Add a professional summary near the top".to_string()),
        Some(text) if text.chars().count() < SHORT_SUMMARY_CHARS => {
            improvements.push("Expand the professional summary to a few sentences".to_string());
        }
        Some(_) => {}
    }

    if resume.education.is_empty() {
        improvements.push("Add an education entry".to_string());
    }

    if resume.skills.len() < 3 {
        improvements.push("List more skills — aim for at least eight".to_string());
    }

    improvements
}

fn has_quantified_outcome(text: &str) -> bool {
    let lower = text.to_lowercase();
    let bytes = lower.as_bytes();
    for i in 0..bytes.len() {
        if bytes[i].is_ascii_digit() {
            if let Some(&next) = bytes.get(i + 1) {
                if matches!(next, b'%' | b'x' | b'k' | b'm') {
                    return true;
                }
            }
            if i > 0 && bytes[i - 1] == b'$' {
                return true;
            }
        }
    }
    false
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sanitized::{
        SanitizedEducation, SanitizedLanguage, SanitizedProject, SanitizedWork,
    };
    use serde_json::json;

    fn make_rich_resume() -> SanitizedResume {
        SanitizedResume {
            name: "Grace Hopper".to_string(),
            email: Some("grace@example.com".to_string()),
            summary: Some(
                "Systems engineer with a decade of compiler and tooling work across teams."
                    .to_string(),
            ),
            work_experience: vec![
                SanitizedWork {
                    job_title: "Staff Engineer".to_string(),
                    company: Some("Eckert-Mauchly".to_string()),
                    start_date: Some("1949".to_string()),
                    end_date: Some("1952".to_string()),
                    achievements: vec![
                        "Cut compile times by 40% across the fleet".to_string(),
                        "Led a team of 12 engineers".to_string(),
                    ],
                },
                SanitizedWork {
                    job_title: "Engineer".to_string(),
                    company: Some("Remington Rand".to_string()),
                    start_date: Some("1952".to_string()),
                    end_date: Some("1966".to_string()),
                    achievements: vec![
                        "Shipped the first compiler".to_string(),
                        "Saved $2.5M in annual operating costs".to_string(),
                    ],
                },
            ],
            education: vec![SanitizedEducation {
                degree: "PhD Mathematics".to_string(),
                institution: Some("Yale".to_string()),
                end_date: Some("1934".to_string()),
                ..SanitizedEducation::default()
            }],
            skills: vec![
                "COBOL", "FORTRAN", "Compilers", "Linkers", "Debugging", "Teaching", "Standards",
                "UNIVAC",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            certifications: vec!["Navy Distinguished Service".to_string()],
            awards: vec!["National Medal of Technology".to_string()],
            languages: vec![SanitizedLanguage {
                language: "English".to_string(),
                proficiency: Some("native".to_string()),
            }],
            projects: vec![SanitizedProject {
                name: "FLOW-MATIC".to_string(),
                highlights: vec!["First English-like data processing language".to_string()],
                ..SanitizedProject::default()
            }],
            ..SanitizedResume::default()
        }
    }

    #[test]
    fn heuristic_scores_never_exceed_the_cap() {
        let report = heuristic_analysis(&make_rich_resume());
        assert_eq!(report.source, AnalysisSource::Heuristic);
        assert_eq!(report.score, HEURISTIC_SCORE_CAP);
    }

    #[test]
    fn sparse_resumes_score_low_and_collect_improvements() {
        let resume = SanitizedResume {
            name: "Your Name".to_string(),
            ..SanitizedResume::default()
        };
        let report = heuristic_analysis(&resume);
        assert!(report.score < 30);
        assert!(report
            .improvements
            .iter()
            .any(|line| line.contains("work experience")));
        assert!(report
            .improvements
            .iter()
            .any(|line| line.contains("professional summary")));
        assert!(report.strengths.is_empty());
    }

    #[test]
    fn quantified_achievements_earn_a_strength() {
        let report = heuristic_analysis(&make_rich_resume());
        assert!(report
            .strengths
            .iter()
            .any(|line| line.contains("measurable outcomes")));
        assert!(!report
            .improvements
            .iter()
            .any(|line| line.contains("quantified metrics")));
    }

    #[test]
    fn unquantified_achievements_prompt_a_metrics_improvement() {
        let resume = SanitizedResume {
            name: "Test".to_string(),
            work_experience: vec![SanitizedWork {
                job_title: "Engineer".to_string(),
                achievements: vec!["Improved performance significantly".to_string()],
                ..SanitizedWork::default()
            }],
            ..SanitizedResume::default()
        };
        let report = heuristic_analysis(&resume);
        assert!(report
            .improvements
            .iter()
            .any(|line| line.contains("quantified metrics")));
    }

    #[test]
    fn quantified_outcome_detection_needs_a_unit() {
        assert!(has_quantified_outcome("reduced latency by 40%"));
        assert!(has_quantified_outcome("made builds 3x faster"));
        assert!(has_quantified_outcome("saved $2.5M annually"));
        assert!(!has_quantified_outcome("improved performance significantly"));
        assert!(!has_quantified_outcome("worked on 3 teams"));
    }

    #[test]
    fn scores_from_the_llm_are_clamped_to_the_hundred_point_scale() {
        assert_eq!(clamp_score(&json!(250)), Some(100));
        assert_eq!(clamp_score(&json!(-5)), Some(0));
        assert_eq!(clamp_score(&json!(72)), Some(72));
        assert_eq!(clamp_score(&json!("88")), Some(88));
        assert_eq!(clamp_score(&json!(null)), None);
        assert_eq!(clamp_score(&json!(["nope"])), None);
    }

    #[tokio::test]
    async fn analysis_without_a_client_uses_the_heuristic_path() {
        let report = analyze_resume(&make_rich_resume(), None).await;
        assert_eq!(report.source, AnalysisSource::Heuristic);
        assert!(report.score > 0);
    }
}
