//! Instruction template sent to the text generator.

use domain_classifier::Domain;

const POLITICAL_CONTEXT: &str = "\
Domain: Political
Pay special attention to:
- Partisan language or framing
- Assumptions about policies or politicians
- Emotional appeals related to political positions
- Confirmation bias about political ideologies";

const SCIENCE_CONTEXT: &str = "\
Domain: Scientific
Pay special attention to:
- Unverified scientific claims presented as fact
- Misrepresentation of scientific consensus
- Cherry-picking of studies or data
- Presumptions about unproven phenomena";

const MEDICAL_CONTEXT: &str = "\
Domain: Medical
Pay special attention to:
- Unverified health claims
- Misleading information about treatments
- Anecdotal evidence presented as medical fact
- Bias against established medical practices";

const GENERAL_CONTEXT: &str = "\
Domain: General
Apply standard objectivity principles across all topics.";

const TASK: &str = "\
You are an AI assistant specialized in transforming biased, subjective prompts into objective, neutral inquiries.

Your task:
1. Analyze the given prompt for bias, loaded language, presumptions, and subjective framing
2. Identify specific biases (subjective language, confirmation bias, absolutist language, presumptive language, leading questions)
3. Rewrite the prompt to be completely objective and neutral
4. Provide a list of specific changes made";

const GUIDELINES: &str = "\
Guidelines:
- Remove emotional/loaded language (terrible -> problematic, amazing -> notable)
- Remove absolutist language (always -> often, never -> rarely)
- Remove presumptive phrasing (show why X exists -> what evidence exists for X)
- Convert leading questions to neutral queries
- Remove subjective qualifiers (obviously, clearly, everyone knows)
- Focus on factual inquiry rather than confirming beliefs";

const RESPONSE_SCHEMA: &str = r#"Return your analysis in this exact JSON format:
{
  "original_prompt": "the original prompt",
  "rewritten_prompt": "the objective version",
  "biases_found": [
    {"type": "subjective_language", "example": "obviously"},
    {"type": "loaded_terms", "example": "terrible"},
    {"type": "confirmation_bias", "example": "prove that"},
    {"type": "presumptive_language", "example": "show why X exists"},
    {"type": "leading_questions", "example": "isn't it true that"}
  ],
  "changes_made": [
    "Removed subjective qualifier 'obviously'",
    "Replaced loaded term 'terrible' with 'problematic'",
    "Converted leading question to neutral query"
  ],
  "bias_score": 0-100 (integer, higher = more biased),
  "explanation": "brief explanation of the main bias issues"
}"#;

/// Reviewer focus for `domain`.
pub fn domain_context(domain: Domain) -> &'static str {
    match domain {
        Domain::Political => POLITICAL_CONTEXT,
        Domain::Science => SCIENCE_CONTEXT,
        Domain::Medical => MEDICAL_CONTEXT,
        Domain::General => GENERAL_CONTEXT,
    }
}

/// Full instruction for rewriting `prompt` in `domain`.
pub fn build_instruction(prompt: &str, domain: Domain) -> String {
    format!(
        "{TASK}\n\n{context}\n\n{GUIDELINES}\n\n{RESPONSE_SCHEMA}\n\n\
         Prompt to analyze and rewrite:\n\"{prompt}\"",
        context = domain_context(domain),
    )
}
