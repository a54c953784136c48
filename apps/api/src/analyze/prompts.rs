// Resume analysis LLM prompt templates.
// All prompts for the analyze module are defined here.

pub const ANALYZE_SYSTEM: &str = "\
You are a rigorous resume reviewer. \
Score resumes for clarity, impact, and completeness. \
You MUST respond with valid JSON only — no markdown fences, no explanations. \
Score conservatively: reserve 90+ for resumes with quantified impact in every role.";

pub const ANALYZE_PROMPT: &str = r#"Review the following resume record and score it.

RESUME (JSON):
{resume_json}

OUTPUT SCHEMA (return exactly this structure):
{
  "score": number,            // 0-100 overall quality
  "strengths": ["string"],    // 2-4 concrete strengths, each one sentence
  "improvements": ["string"]  // 2-4 actionable improvements, each one sentence
}

RULES:
1. Judge impact: quantified outcomes beat responsibility lists.
2. Judge completeness: a missing summary, missing dates, or a thin skills list lowers the score.
3. Keep every strength and improvement specific to THIS resume.
4. Return ONLY the JSON object — nothing else, no code fences."#;
