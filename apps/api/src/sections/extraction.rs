//! Resume extraction: raw resume text to `ResumeStructured`.

use tracing::info;

use crate::llm_client::prompts::{compose, JSON_OBJECT_ONLY};
use crate::models::resume::ResumeStructured;
use crate::sections::prompts::{EXTRACTION_PROMPT_TEMPLATE, EXTRACTION_SYSTEM};
use crate::sections::{TaskContext, TaskError};
use crate::text::clean_resume_text;

pub async fn extract_resume(
    ctx: &TaskContext,
    resume_text: &str,
) -> Result<ResumeStructured, TaskError> {
    let cleaned = clean_resume_text(resume_text);
    info!("Extracting structured resume ({} chars)", cleaned.chars().count());

    let user = EXTRACTION_PROMPT_TEMPLATE
        .replace("{json_only}", JSON_OBJECT_ONLY)
        .replace("{resume_text}", &cleaned);
    let prompt = compose(EXTRACTION_SYSTEM, &user);

    let resume: ResumeStructured = ctx
        .request("resume extraction", &prompt, ctx.profiles.extraction)
        .await?;

    info!(
        "Extracted resume: {} skills, {} experience, {} education, {} projects",
        resume.skills.len(),
        resume.experience.len(),
        resume.education.len(),
        resume.projects.len()
    );
    Ok(resume)
}
