// All LLM prompt templates for role analysis.

/// Role analysis prompt template. Replace `{role_name}` before sending.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = "Tell me everything about the role of a {role_name} in IT – \
    include required skills (technical & soft), tools used, experience level, \
    certifications (if any), career progression, and typical responsibilities.";

/// Role suggestion prompt template. Replace `{skills}` before sending.
/// The answer is expected on a single comma-separated line.
pub const SUGGESTION_PROMPT_TEMPLATE: &str = "Given the following IT skills: {skills}, \
    suggest 5 suitable IT roles. \
    List only the role names, separated by commas. Do not explain.";

pub fn build_prompt(role_name: &str) -> String {
    ANALYSIS_PROMPT_TEMPLATE.replace("{role_name}", role_name)
}

pub fn build_suggestion_prompt(skills: &str) -> String {
    SUGGESTION_PROMPT_TEMPLATE.replace("{skills}", skills)
}
