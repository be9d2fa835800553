use crate::workflows::outreach::domain::CraftRequest;

pub(crate) const ANALYST_PERSONA: &str = "You are an expert email quality analyst.";

pub(crate) fn evaluation_prompt(draft: &str, request: &CraftRequest) -> String {
    format!(
        r#"Evaluate the following recruitment email draft based on these criteria:

1. Personalization (1-10): How well does it connect with the candidate's specific background?
2. Relevance to Role (1-10): How clearly is the job's relevance articulated for this candidate?
3. Tone Alignment (1-10): Does it match the desired tone of "{tone}"?
4. Clarity & Conciseness (1-10): Is the message clear and to the point?
5. Call to Action (CTA) Strength (1-10): Is the CTA clear and compelling?
6. Grammar & Professionalism (Pass/Fail): Free of errors?
7. Constraint Adherence (Pass/Fail): Does it meet the structural constraints of "{max_length}"?

For each criterion, provide a score (if applicable) and specific, actionable feedback for improvement.
If grammar issues exist, list them.
If constraints are violated, specify how.

Email Draft:
{draft}

Your response must be in JSON format with the following structure:
{{
    "scores": {{
        "personalization": <score>,
        "relevanceToRole": <score>,
        "toneAlignment": <score>,
        "clarityAndConciseness": <score>,
        "ctaStrength": <score>,
        "grammarAndProfessionalism": "<Pass or Fail>",
        "constraintAdherence": "<Pass or Fail>",
        "overallQualityScore": <overall score from 1 to 10>
    }},
    "feedback": "<detailed feedback with specific suggestions for improvement>"
}}

IMPORTANT: Return ONLY the JSON object with no additional text, markdown formatting, or code blocks."#,
        tone = request.desired_tone_style,
        max_length = request.structural_constraints.max_length,
    )
}
