use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Candidate background supplied by the sourcer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateProfile {
    pub key_skills: Vec<String>,
    pub relevant_experience: String,
    pub stated_interests: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub online_profile_link: Option<String>,
}

/// Role being pitched to the candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDescription {
    pub key_responsibilities: String,
    pub unique_selling_points: String,
    pub company_culture_keywords: Vec<String>,
}

/// Why the e-mail is being sent and what the candidate should do next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailContextPurpose {
    pub email_type: String,
    #[serde(rename = "desiredCTA", alias = "desiredCta")]
    pub desired_cta: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandingGuidelines {
    #[serde(default)]
    pub highlight_match: bool,
}

/// Layout rules the draft has to respect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuralConstraints {
    #[serde(default)]
    pub needs_html_placeholders: bool,
    pub max_length: String,
    #[serde(default)]
    pub branding_guidelines: BrandingGuidelines,
}

/// Root input of a crafting run. Never mutated by the workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CraftRequest {
    pub candidate_profile: CandidateProfile,
    pub job_description: JobDescription,
    pub email_context_purpose: EmailContextPurpose,
    #[serde(alias = "structuralConstraintsGuidelines")]
    pub structural_constraints: StructuralConstraints,
    pub desired_tone_style: String,
}

/// Outcome of a categorical rubric check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    pub fn is_pass(self) -> bool {
        matches!(self, Verdict::Pass)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Pass => write!(f, "Pass"),
            Verdict::Fail => write!(f, "Fail"),
        }
    }
}

impl<'de> Deserialize<'de> for Verdict {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        match raw.trim().to_ascii_lowercase().as_str() {
            "pass" => Ok(Verdict::Pass),
            "fail" => Ok(Verdict::Fail),
            other => Err(serde::de::Error::custom(format!(
                "expected Pass or Fail, got '{other}'"
            ))),
        }
    }
}

/// Rubric scores for a single draft.
///
/// `overall_quality_score` is reported by the evaluator itself and is not derived from the five
/// numeric criteria; callers must not assume it is their mean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationScores {
    #[serde(deserialize_with = "deserialize_criterion")]
    pub personalization: u8,
    #[serde(deserialize_with = "deserialize_criterion")]
    pub relevance_to_role: u8,
    #[serde(deserialize_with = "deserialize_criterion")]
    pub tone_alignment: u8,
    #[serde(deserialize_with = "deserialize_criterion")]
    pub clarity_and_conciseness: u8,
    #[serde(deserialize_with = "deserialize_criterion")]
    pub cta_strength: u8,
    pub grammar_and_professionalism: Verdict,
    pub constraint_adherence: Verdict,
    pub overall_quality_score: f64,
}

pub const MIN_SCORE: f64 = 1.0;
pub const MAX_SCORE: f64 = 10.0;

impl EvaluationScores {
    /// Checks every numeric criterion and the overall score against the 1..=10 scale.
    pub fn validate(&self) -> Result<(), String> {
        let criteria = [
            ("personalization", self.personalization),
            ("relevanceToRole", self.relevance_to_role),
            ("toneAlignment", self.tone_alignment),
            ("clarityAndConciseness", self.clarity_and_conciseness),
            ("ctaStrength", self.cta_strength),
        ];

        for (name, value) in criteria {
            if !(MIN_SCORE..=MAX_SCORE).contains(&f64::from(value)) {
                return Err(format!("{name} score {value} is outside 1..=10"));
            }
        }

        let overall = self.overall_quality_score;
        if !overall.is_finite() || !(MIN_SCORE..=MAX_SCORE).contains(&overall) {
            return Err(format!("overallQualityScore {overall} is outside 1..=10"));
        }

        Ok(())
    }

    /// Both categorical checks passed.
    pub fn categorical_checks_pass(&self) -> bool {
        self.grammar_and_professionalism.is_pass() && self.constraint_adherence.is_pass()
    }
}

fn deserialize_criterion<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    let rounded = raw.round();
    if !(0.0..=f64::from(u8::MAX)).contains(&rounded) {
        return Err(serde::de::Error::custom(format!(
            "criterion score {raw} is not a small positive number"
        )));
    }
    Ok(rounded as u8)
}

/// Scores plus the evaluator's free-text feedback for one draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    pub scores: EvaluationScores,
    pub feedback: String,
}

/// Final, immutable output of a crafting run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CraftResult {
    /// Final draft, or an explanation of why none could be produced.
    pub draft: String,
    /// Scores of the evaluation that belongs to `draft`.
    pub scores: EvaluationScores,
    /// Refinements applied to the initial draft.
    pub iterations: u32,
    pub feedback: String,
}
