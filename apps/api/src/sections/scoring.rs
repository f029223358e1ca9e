//! Section scoring: one model call per scored section.

use tracing::info;

use crate::llm_client::prompts::{compose, pretty_json, JSON_OBJECT_ONLY};
use crate::models::resume::ResumeStructured;
use crate::models::scoring::{SectionName, SectionScore, SectionScoreDraft};
use crate::sections::prompts::{scoring_brief, SCORING_PROMPT_TEMPLATE, SCORING_SYSTEM_TEMPLATE};
use crate::sections::{TaskContext, TaskError};
use crate::text::truncate_for_prompt;

/// Longest job description passed to scoring prompts.
pub const SCORING_JD_CHARS: usize = 8000;

/// The slice of the resume a section is judged on, as pretty JSON.
pub fn section_data(section: SectionName, resume: &ResumeStructured) -> String {
    match section {
        SectionName::Skills => pretty_json(&resume.skills),
        SectionName::Experience => pretty_json(&resume.experience),
        SectionName::Education => pretty_json(&resume.education),
        SectionName::Projects => pretty_json(&resume.projects),
        SectionName::Meta | SectionName::Summary => pretty_json(&resume.meta),
    }
}

pub fn scoring_prompt(section: SectionName, resume: &ResumeStructured, jd: &str) -> String {
    let brief = scoring_brief(section);

    let system = SCORING_SYSTEM_TEMPLATE
        .replace("{heading}", brief.heading)
        .replace("{rubric}", brief.rubric)
        .replace("{section}", section.as_str())
        .replace("{missing_hint}", brief.missing_hint);

    let user = SCORING_PROMPT_TEMPLATE
        .replace("{subject}", brief.subject)
        .replace("{heading}", brief.heading)
        .replace("{section}", section.as_str())
        .replace("{json_only}", JSON_OBJECT_ONLY)
        .replace("{data}", &section_data(section, resume))
        .replace("{jd}", &truncate_for_prompt(jd, SCORING_JD_CHARS));

    compose(&system, &user)
}

pub async fn score_section(
    ctx: &TaskContext,
    section: SectionName,
    resume: &ResumeStructured,
    jd: &str,
) -> Result<SectionScore, TaskError> {
    info!("Starting {section} section scoring");

    let prompt = scoring_prompt(section, resume, jd);
    let task = format!("{section} scoring");
    let draft: SectionScoreDraft = ctx.request(&task, &prompt, ctx.profiles.scoring).await?;

    let score = SectionScore::new(section, draft);
    info!("{section} scoring successful: {}/100", score.score);
    Ok(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::mock::ScriptedLlm;
    use crate::models::resume::Skill;
    use crate::sections::test_support::context;
    use std::sync::Arc;

    fn resume() -> ResumeStructured {
        ResumeStructured {
            skills: vec![Skill {
                name: "Kubernetes".into(),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_prompt_embeds_only_section_data() {
        let prompt = scoring_prompt(SectionName::Skills, &resume(), "Platform engineer");
        assert!(prompt.contains("Score the candidate's skills against"));
        assert!(prompt.contains("Kubernetes"));
        assert!(prompt.contains("\"section_name\": \"skills\""));
        assert!(!prompt.contains("{jd}"));

        let meta = scoring_prompt(SectionName::Meta, &resume(), "Platform engineer");
        assert!(!meta.contains("Kubernetes"));
    }

    #[test]
    fn test_prompt_truncates_long_jd() {
        let jd = "x".repeat(SCORING_JD_CHARS + 500);
        let prompt = scoring_prompt(SectionName::Education, &resume(), &jd);
        assert!(prompt.contains(&format!("{}...", "x".repeat(SCORING_JD_CHARS - 3))));
        assert!(!prompt.contains(&"x".repeat(SCORING_JD_CHARS)));
    }

    #[tokio::test]
    async fn test_model_section_claim_overridden() {
        let llm = Arc::new(ScriptedLlm::new().reply(
            "Score the candidate's projects against",
            r#"{"section_name": "experience", "score": 120, "reasons": "Shipped a CLI"}"#,
        ));
        let ctx = context(llm.clone());

        let score = score_section(&ctx, SectionName::Projects, &resume(), "jd")
            .await
            .unwrap();

        assert_eq!(score.section_name, SectionName::Projects);
        assert_eq!(score.score, 100.0);
        assert_eq!(score.reasons, vec!["Shipped a CLI"]);
        assert_eq!(llm.params()[0], ctx.profiles.scoring);
    }
}
