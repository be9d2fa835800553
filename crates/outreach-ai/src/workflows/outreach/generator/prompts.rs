use crate::workflows::outreach::domain::CraftRequest;

pub(crate) const WRITER_PERSONA: &str = "You are an expert recruitment email writer.";

const BODY_ONLY: &str = "IMPORTANT: Return ONLY the email text with no additional commentary, \
explanations, or markdown formatting.";

pub(crate) fn initial_draft_prompt(request: &CraftRequest) -> String {
    let candidate = &request.candidate_profile;
    let job = &request.job_description;
    let context = &request.email_context_purpose;
    let constraints = &request.structural_constraints;

    let mut prompt = String::from(
        "Your task is to craft a compelling initial outreach email based on the provided information.\n\n",
    );

    prompt.push_str("Candidate Profile:\n");
    prompt.push_str(&format!("- Key Skills: {}\n", candidate.key_skills.join(", ")));
    prompt.push_str(&format!(
        "- Relevant Experience: {}\n",
        candidate.relevant_experience
    ));
    prompt.push_str(&format!("- Stated Interests: {}\n", candidate.stated_interests));
    prompt.push_str(&format!(
        "- Online Profile: {}\n\n",
        candidate
            .online_profile_link
            .as_deref()
            .unwrap_or("not provided")
    ));

    prompt.push_str("Job Description:\n");
    prompt.push_str(&format!(
        "- Key Responsibilities: {}\n",
        job.key_responsibilities
    ));
    prompt.push_str(&format!(
        "- Unique Selling Points: {}\n",
        job.unique_selling_points
    ));
    prompt.push_str(&format!(
        "- Company Culture Keywords: {}\n\n",
        job.company_culture_keywords.join(", ")
    ));

    prompt.push_str("Email Context:\n");
    prompt.push_str(&format!("- Email Type: {}\n", context.email_type));
    prompt.push_str(&format!("- Desired Call to Action: {}\n\n", context.desired_cta));

    prompt.push_str("Structural Constraints:\n");
    prompt.push_str(&format!(
        "- Needs HTML Placeholders: {}\n",
        constraints.needs_html_placeholders
    ));
    prompt.push_str(&format!("- Maximum Length: {}\n", constraints.max_length));
    prompt.push_str(&format!(
        "- Highlight Candidate/Role Match: {}\n\n",
        constraints.branding_guidelines.highlight_match
    ));

    prompt.push_str(&format!(
        "Desired Tone and Style: {}\n\n",
        request.desired_tone_style
    ));
    prompt.push_str(
        "Based on this information, draft a personalized email that connects the candidate's \
background with the job opportunity.\nThe email should be professional, engaging, and include a \
clear call to action.\n\n",
    );
    prompt.push_str(BODY_ONLY);
    prompt
}

pub(crate) fn refinement_prompt(draft: &str, feedback: &str) -> String {
    format!(
        "Your task is to refine the following email draft based on the provided feedback.\n\n\
Original Draft:\n{draft}\n\n\
Feedback:\n{feedback}\n\n\
Please improve the email draft addressing all the feedback points. Keep the personalization \
established in the original draft and maintain a professional, engaging tone.\n\n{BODY_ONLY}"
    )
}
