// Prompt constants for resume extraction, section scoring and section optimization.
// Placeholders are filled with `.replace("{name}", value)`; free text goes in last.

use crate::models::scoring::SectionName;

// ────────────────────────────────────────────────────────────────────────────
// Extraction
// ────────────────────────────────────────────────────────────────────────────

pub const EXTRACTION_SYSTEM: &str = "You are a resume parsing assistant. \
Extract information from the resume and populate the JSON fields accurately.

Rules:
- If a field is not present in the resume, use null or an empty list as appropriate
- Preserve dates exactly as written in the resume
- For skills, extract the skill name and infer level if possible (beginner/intermediate/expert)
- Extract every job position, degree, certification and project mentioned
- Do not fabricate or infer information that is not explicitly stated";

/// Replace `{resume_text}` and `{json_only}` before sending.
pub const EXTRACTION_PROMPT_TEMPLATE: &str = r#"Extract structured information from the following resume:

{resume_text}

Return a JSON object with this exact structure:
{
  "contact_info": {"name": "string or null", "email": "string or null", "phone": "string or null", "location": "string or null"},
  "skills": [{"name": "string", "level": "beginner|intermediate|expert or null", "years_experience": "number or null"}],
  "experience": [{"job_title": "string or null", "company": "string or null", "start_date": "string or null", "end_date": "string or null", "is_current": "boolean or null", "responsibilities": ["string"]}],
  "education": [{"degree": "string or null", "field_of_study": "string or null", "institution": "string or null", "start_date": "string or null", "end_date": "string or null"}],
  "projects": [{"name": "string or null", "description": "string or null", "technologies": ["string"], "impact": "string or null"}],
  "meta": {"seniority_level": "junior|mid|senior or null", "domains": ["string"], "languages": ["string"]}
}

{json_only}"#;

// ────────────────────────────────────────────────────────────────────────────
// Scoring
// ────────────────────────────────────────────────────────────────────────────

/// Per-section wording for the scoring prompt.
pub struct ScoringBrief {
    /// Upper-case heading used in the prompt, e.g. "WORK EXPERIENCE".
    pub heading: &'static str,
    /// Lower-case subject, e.g. "work experience".
    pub subject: &'static str,
    pub rubric: &'static str,
    pub missing_hint: &'static str,
}

pub fn scoring_brief(section: SectionName) -> ScoringBrief {
    match section {
        SectionName::Skills => ScoringBrief {
            heading: "SKILLS",
            subject: "skills",
            rubric: "- 90-100: Strong match on most key requirements with appropriate experience levels.
- 60-89: Partial match. Some required skills, but important ones missing or shallow.
- 30-59: Weak match. Few required skills or significant gaps in critical areas.
- 0-29: Almost no alignment. Candidate lacks most required skills.",
            missing_hint: "skills or skill levels required by the job",
        },
        SectionName::Experience => ScoringBrief {
            heading: "WORK EXPERIENCE",
            subject: "work experience",
            rubric: "- 90-100: Strong match. Relevant roles, industries or technologies; duration and depth align well.
- 60-89: Partial match. Some relevant experience but gaps in industry, role level or key responsibilities.
- 30-59: Weak match. Limited relevant experience or experience in different domains.
- 0-29: Almost no alignment. Candidate lacks relevant work experience.",
            missing_hint: "experience requirements (roles, industries, years of experience)",
        },
        SectionName::Education => ScoringBrief {
            heading: "EDUCATION",
            subject: "education",
            rubric: "- 90-100: Strong match. Required degree, field of study or equivalent qualifications.
- 60-89: Partial match. Relevant education but missing a specific degree level or field.
- 30-59: Weak match. Significant gaps in required qualifications or field of study.
- 0-29: Almost no alignment. Candidate lacks required educational qualifications.
Note: for many technical roles relevant experience can compensate for education gaps.",
            missing_hint: "education requirements (degree, field of study, certifications)",
        },
        SectionName::Projects => ScoringBrief {
            heading: "PROJECTS",
            subject: "projects",
            rubric: "- 90-100: Strong match. Projects demonstrate relevant technologies, problem-solving and impact.
- 60-89: Partial match. Some relevant projects but missing technologies, scale or impact.
- 30-59: Weak match. Projects do not align well or lack depth.
- 0-29: Almost no alignment, or no projects listed.",
            missing_hint: "project requirements (technologies, project types, demonstrated impact)",
        },
        SectionName::Meta | SectionName::Summary => ScoringBrief {
            heading: "META INFORMATION",
            subject: "meta information (seniority level, domains, languages)",
            rubric: "- 90-100: Strong match. Seniority, domain experience and languages align well.
- 60-89: Partial match. Some alignment in seniority, domains or languages.
- 30-59: Weak match. Meta information does not align well with the job.
- 0-29: Almost no alignment.",
            missing_hint: "seniority, domain or language requirements",
        },
    }
}

/// Replace `{heading}`, `{rubric}`, `{section}` and `{missing_hint}` before sending.
pub const SCORING_SYSTEM_TEMPLATE: &str = "You are an expert technical recruiter. \
You score the candidate's {heading} section against the job description.

Scoring Rules (0-100):
{rubric}

Return a JSON object with:
- section_name: \"{section}\"
- score: numeric score 0-100
- reasons: specific reasons for the score (what matches, what's good)
- missing_requirements: {missing_hint} that the candidate does not show";

/// Replace `{subject}`, `{heading}`, `{section}`, `{json_only}`, `{data}` and `{jd}`.
pub const SCORING_PROMPT_TEMPLATE: &str = r#"Score the candidate's {subject} against this job description:

JOB DESCRIPTION:
{jd}

CANDIDATE {heading}:
{data}

Return a JSON object with this exact structure:
{
  "section_name": "{section}",
  "score": 0-100,
  "reasons": ["reason1", "reason2"],
  "missing_requirements": ["requirement1", "requirement2"]
}

{json_only}"#;

// ────────────────────────────────────────────────────────────────────────────
// Optimization
// ────────────────────────────────────────────────────────────────────────────

pub const OPTIMIZATION_SYSTEM: &str = "You are an expert resume writer specializing in \
ATS (Applicant Tracking System) optimization.";

pub const SUMMARY_GUIDELINES: &str = "Guidelines:
- Use strong action verbs (Led, Developed, Implemented, Optimized)
- Include relevant keywords from the job description naturally
- Keep it concise (2-4 sentences, 50-150 words)
- Match the seniority level mentioned in the job description
- Avoid generic phrases like \"hard-working\" or \"team player\"";

pub const SKILLS_GUIDELINES: &str = "Guidelines:
- Prioritize skills mentioned in the job description
- Group related skills together (languages, frameworks, tools, soft skills)
- Use industry-standard terminology
- Don't add skills the candidate doesn't have
- Format as a clean, scannable list";

pub const EXPERIENCE_GUIDELINES: &str = "Guidelines:
- Use strong action verbs and quantifiable metrics
- Incorporate relevant keywords from the job description naturally
- Match responsibilities to those mentioned in the job description
- Focus on impact and results, not just duties
- Keep each bullet concise (1-2 lines)";

pub const PROJECTS_GUIDELINES: &str = "Guidelines:
- Use strong action verbs (Built, Designed, Implemented)
- Highlight technologies that match the job description
- Include quantifiable impact and metrics
- Emphasize problem-solving and results";

pub const EDUCATION_GUIDELINES: &str = "Guidelines:
- Highlight relevant coursework, honors or achievements that match the job description
- Emphasize degree and field of study relevance
- Format consistently and professionally
- Don't fabricate information";

/// Replace `{section}` and `{json_only}`.
pub const OBJECT_SHAPE_TEMPLATE: &str = r#"Return a JSON object with this exact structure:
{
  "section_name": "{section}",
  "original_content": "original text",
  "optimized_content": "optimized text",
  "improvements": ["improvement1", "improvement2"],
  "keywords_added": ["keyword1", "keyword2"]
}

{json_only}"#;

/// Replace `{section}` and `{json_only}`.
pub const ARRAY_SHAPE_TEMPLATE: &str = r#"Return a JSON array with one object per entry, in the same order, each with this structure:
{
  "section_name": "{section}",
  "original_content": "original entry as text",
  "optimized_content": "optimized entry as text",
  "improvements": ["improvement1", "improvement2"],
  "keywords_added": ["keyword1", "keyword2"]
}

{json_only}"#;

/// Replace `{shape}`, `{summary}` and `{jd}`.
pub const SUMMARY_PROMPT_TEMPLATE: &str = r#"Optimize this resume summary for the following job:

CURRENT SUMMARY:
{summary}

JOB DESCRIPTION:
{jd}

Rewrite the summary to better match this job description while maintaining authenticity.

{shape}"#;

/// Replace `{shape}`, `{skills}` and `{jd}`.
pub const SKILLS_PROMPT_TEMPLATE: &str = r#"Optimize this skills section for the following job:

CURRENT SKILLS:
{skills}

JOB DESCRIPTION:
{jd}

Rewrite the skills section to better match the job description.

{shape}"#;

/// Replace `{subject}`, `{heading}`, `{shape}`, `{entries}` and `{jd}`.
pub const ENTRIES_PROMPT_TEMPLATE: &str = r#"Optimize these {subject} entries for the following job:

JOB DESCRIPTION:
{jd}

CANDIDATE {heading}:
{entries}

Rewrite each entry to better match the job description.

{shape}"#;

/// Guidelines, lower-case subject and upper-case heading for an entry section.
pub fn entry_brief(section: SectionName) -> (&'static str, &'static str, &'static str) {
    match section {
        SectionName::Projects => (PROJECTS_GUIDELINES, "project", "PROJECTS"),
        SectionName::Education => (EDUCATION_GUIDELINES, "education", "EDUCATION"),
        _ => (EXPERIENCE_GUIDELINES, "work experience", "EXPERIENCE"),
    }
}
