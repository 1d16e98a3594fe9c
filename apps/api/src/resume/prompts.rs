// Resume LLM prompt templates.
// All prompts for the resume module are defined here.

pub const RESUME_PARSE_PROMPT: &str = r#"Extract a JSON object from the following resume text.

OUTPUT SCHEMA (return exactly this structure):
{
  "summary": "",
  "skills": ["skill1", "skill2"],
  "experience": [{"title": "", "company": "", "duration": "", "description": ""}],
  "education": [{"degree": "", "institution": "", "year": ""}]
}

{json_only}

RESUME TEXT:
{resume_text}"#;

pub const ENHANCE_RESUME_INSTRUCTION: &str =
    "Rewrite this resume text to be concise, professional, and achievement-focused.";

pub const ENHANCE_GENERIC_INSTRUCTION: &str =
    "Improve grammar, clarity, and professionalism of this text.";

pub const CAREER_ANALYSIS_PROMPT: &str = "Analyze this resume. \
Provide strengths, weaknesses, and career improvement advice:\n\n{resume_text}";

/// Picks the rewrite instruction for `/enhance`. Only the exact purpose
/// `"resume"` gets the resume-specific instruction.
pub fn enhance_prompt(purpose: &str, text: &str) -> String {
    let instruction = if purpose == "resume" {
        ENHANCE_RESUME_INSTRUCTION
    } else {
        ENHANCE_GENERIC_INSTRUCTION
    };
    format!("{instruction}\n\n{text}")
}
