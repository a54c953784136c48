//! Tiered reduction of a sanitized record for render retries.

use crate::models::sanitized::{SanitizedResume, SanitizedWork};

pub const MINIMAL_MAX_WORK_ENTRIES: usize = 2;
pub const MINIMAL_MAX_ACHIEVEMENTS_PER_ENTRY: usize = 2;
pub const MINIMAL_MAX_SKILLS: usize = 5;
pub const MINIMAL_MAX_EDUCATION_ENTRIES: usize = 1;

/// Content tiers the renderer may be asked to lay out, richest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderTier {
    Full,
    Minimal,
}

impl RenderTier {
    pub fn as_str(self) -> &'static str {
        match self {
            RenderTier::Full => "full",
            RenderTier::Minimal => "minimal",
        }
    }
}

/// Ordered walk of content tiers for the render step.
///
/// Reduction is backpressure against renderer failures on oversized or
/// residually hostile content. It belongs to the render step only; other
/// failure paths must not reach for it.
#[derive(Debug, Clone)]
pub struct ReductionPolicy {
    tiers: &'static [RenderTier],
}

impl Default for ReductionPolicy {
    fn default() -> Self {
        Self {
            tiers: &[RenderTier::Full, RenderTier::Minimal],
        }
    }
}

impl ReductionPolicy {
    pub fn tiers(&self) -> impl Iterator<Item = RenderTier> + '_ {
        self.tiers.iter().copied()
    }

    pub fn apply(&self, tier: RenderTier, resume: &SanitizedResume) -> SanitizedResume {
        match tier {
            RenderTier::Full => resume.clone(),
            RenderTier::Minimal => minimal_record(resume),
        }
    }
}

/// Keeps the contact header, a capped slice of work history, and the
/// essentials; every other section is dropped.
fn minimal_record(resume: &SanitizedResume) -> SanitizedResume {
    SanitizedResume {
        name: resume.name.clone(),
        email: resume.email.clone(),
        phone: resume.phone.clone(),
        summary: resume.summary.clone(),
        work_experience: resume
            .work_experience
            .iter()
            .take(MINIMAL_MAX_WORK_ENTRIES)
            .map(|work| SanitizedWork {
                achievements: work
                    .achievements
                    .iter()
                    .take(MINIMAL_MAX_ACHIEVEMENTS_PER_ENTRY)
                    .cloned()
                    .collect(),
                ..work.clone()
            })
            .collect(),
        education: resume
            .education
            .iter()
            .take(MINIMAL_MAX_EDUCATION_ENTRIES)
            .cloned()
            .collect(),
        skills: resume
            .skills
            .iter()
            .take(MINIMAL_MAX_SKILLS)
            .cloned()
            .collect(),
        ..SanitizedResume::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sanitized::SanitizedEducation;

    fn make_resume() -> SanitizedResume {
        SanitizedResume {
            name: "Ada Lovelace".into(),
            email: Some("ada@example.com".into()),
            phone: Some("555".into()),
            linkedin: Some("linkedin.com/in/ada".into()),
            summary: Some("Analyst".into()),
            work_experience: (0..3)
                .map(|n| SanitizedWork {
                    job_title: format!("Role {n}"),
                    achievements: vec!["a".into(), "b".into(), "c".into()],
                    ..SanitizedWork::default()
                })
                .collect(),
            education: vec![SanitizedEducation::default(), SanitizedEducation::default()],
            skills: (0..7).map(|n| format!("skill-{n}")).collect(),
            certifications: vec!["CKA".into()],
            ..SanitizedResume::default()
        }
    }

    #[test]
    fn full_tier_is_the_identity() {
        let resume = make_resume();
        let policy = ReductionPolicy::default();
        assert_eq!(policy.apply(RenderTier::Full, &resume), resume);
    }

    #[test]
    fn minimal_tier_caps_work_skills_and_education() {
        let policy = ReductionPolicy::default();
        let reduced = policy.apply(RenderTier::Minimal, &make_resume());

        assert_eq!(reduced.name, "Ada Lovelace");
        assert_eq!(reduced.email.as_deref(), Some("ada@example.com"));
        assert_eq!(reduced.summary.as_deref(), Some("Analyst"));
        assert_eq!(reduced.work_experience.len(), MINIMAL_MAX_WORK_ENTRIES);
        assert!(reduced
            .work_experience
            .iter()
            .all(|w| w.achievements.len() <= MINIMAL_MAX_ACHIEVEMENTS_PER_ENTRY));
        assert_eq!(reduced.skills.len(), MINIMAL_MAX_SKILLS);
        assert_eq!(reduced.education.len(), MINIMAL_MAX_EDUCATION_ENTRIES);
        assert_eq!(reduced.linkedin, None);
        assert!(reduced.certifications.is_empty());
    }

    #[test]
    fn tiers_walk_richest_first() {
        let policy = ReductionPolicy::default();
        let tiers: Vec<RenderTier> = policy.tiers().collect();
        assert_eq!(tiers, vec![RenderTier::Full, RenderTier::Minimal]);
    }
}
