//! Section optimization: rewrites of the summary, skills and entry lists.

use serde_json::Value;
use tracing::{info, warn};

use crate::config::GenerationParams;
use crate::json_repair::repair_json;
use crate::llm_client::prompts::{compose, pretty_json, JSON_ARRAY_ONLY, JSON_OBJECT_ONLY};
use crate::models::optimization::{SectionOptimization, SectionOptimizationDraft};
use crate::models::resume::ResumeStructured;
use crate::models::scoring::SectionName;
use crate::schema::validate;
use crate::sections::output::OutputError;
use crate::sections::prompts::{
    entry_brief, ARRAY_SHAPE_TEMPLATE, ENTRIES_PROMPT_TEMPLATE, OBJECT_SHAPE_TEMPLATE,
    OPTIMIZATION_SYSTEM, SKILLS_GUIDELINES, SKILLS_PROMPT_TEMPLATE, SUMMARY_GUIDELINES,
    SUMMARY_PROMPT_TEMPLATE,
};
use crate::sections::{output_failure, TaskContext, TaskError};
use crate::text::{leading_paragraph, truncate_for_prompt};

/// Longest job description passed to optimization prompts.
pub const OPTIMIZATION_JD_CHARS: usize = 4000;

pub const DEFAULT_SUMMARY: &str = "Experienced professional seeking new opportunities.";
const NO_SKILLS: &str = "No skills listed";

const SUMMARY_MAX_TOKENS: u32 = 1024;
const SKILLS_MAX_TOKENS: u32 = 2048;

fn capped(params: GenerationParams, max_output_tokens: u32) -> GenerationParams {
    GenerationParams {
        max_output_tokens: params.max_output_tokens.min(max_output_tokens),
        ..params
    }
}

fn shape(template: &str, section: SectionName, json_only: &str) -> String {
    template
        .replace("{section}", section.as_str())
        .replace("{json_only}", json_only)
}

/// First paragraph of the raw resume, or a generic line when there is none.
pub fn current_summary(resume_text: Option<&str>) -> String {
    resume_text
        .and_then(leading_paragraph)
        .unwrap_or_else(|| DEFAULT_SUMMARY.to_string())
}

pub async fn optimize_summary(
    ctx: &TaskContext,
    resume_text: Option<&str>,
    jd: &str,
) -> Result<SectionOptimization, TaskError> {
    info!("Starting summary section optimization");

    let user = SUMMARY_PROMPT_TEMPLATE
        .replace(
            "{shape}",
            &shape(OBJECT_SHAPE_TEMPLATE, SectionName::Summary, JSON_OBJECT_ONLY),
        )
        .replace("{summary}", &current_summary(resume_text))
        .replace("{jd}", &truncate_for_prompt(jd, OPTIMIZATION_JD_CHARS));
    let prompt = compose(&format!("{OPTIMIZATION_SYSTEM}\n\n{SUMMARY_GUIDELINES}"), &user);

    let params = capped(ctx.profiles.optimization, SUMMARY_MAX_TOKENS);
    let draft: SectionOptimizationDraft = ctx
        .request("summary optimization", &prompt, params)
        .await?;

    info!("Summary optimization successful");
    Ok(SectionOptimization::new(SectionName::Summary, draft))
}

pub async fn optimize_skills(
    ctx: &TaskContext,
    resume: &ResumeStructured,
    jd: &str,
) -> Result<SectionOptimization, TaskError> {
    info!("Starting skills section optimization");

    let mut skills = resume.skill_names();
    if skills.is_empty() {
        skills = NO_SKILLS.to_string();
    }

    let user = SKILLS_PROMPT_TEMPLATE
        .replace(
            "{shape}",
            &shape(OBJECT_SHAPE_TEMPLATE, SectionName::Skills, JSON_OBJECT_ONLY),
        )
        .replace("{skills}", &skills)
        .replace("{jd}", &truncate_for_prompt(jd, OPTIMIZATION_JD_CHARS));
    let prompt = compose(&format!("{OPTIMIZATION_SYSTEM}\n\n{SKILLS_GUIDELINES}"), &user);

    let params = capped(ctx.profiles.optimization, SKILLS_MAX_TOKENS);
    let draft: SectionOptimizationDraft = ctx
        .request("skills optimization", &prompt, params)
        .await?;

    info!("Skills optimization successful");
    Ok(SectionOptimization::new(SectionName::Skills, draft))
}

/// Entry count and pretty JSON for a list-valued section.
fn entry_source(section: SectionName, resume: &ResumeStructured) -> Option<(usize, String)> {
    match section {
        SectionName::Experience => Some((resume.experience.len(), pretty_json(&resume.experience))),
        SectionName::Projects => Some((resume.projects.len(), pretty_json(&resume.projects))),
        SectionName::Education => Some((resume.education.len(), pretty_json(&resume.education))),
        _ => None,
    }
}

/// Rewrites every entry of `section` (experience, projects or education) in one call.
pub async fn optimize_entries(
    ctx: &TaskContext,
    section: SectionName,
    resume: &ResumeStructured,
    jd: &str,
) -> Result<Vec<SectionOptimization>, TaskError> {
    let Some((count, entries)) = entry_source(section, resume) else {
        warn!("{section} has no entry list to optimize");
        return Ok(vec![]);
    };
    if count == 0 {
        info!("No {section} entries found, skipping optimization");
        return Ok(vec![]);
    }

    info!("Starting {section} optimization for {count} entries");

    let (guidelines, subject, heading) = entry_brief(section);
    let user = ENTRIES_PROMPT_TEMPLATE
        .replace("{subject}", subject)
        .replace("{heading}", heading)
        .replace("{shape}", &shape(ARRAY_SHAPE_TEMPLATE, section, JSON_ARRAY_ONLY))
        .replace("{entries}", &entries)
        .replace("{jd}", &truncate_for_prompt(jd, OPTIMIZATION_JD_CHARS));
    let prompt = compose(&format!("{OPTIMIZATION_SYSTEM}\n\n{guidelines}"), &user);

    let task = format!("{section} optimization");
    let raw = ctx
        .generate(&task, &prompt, ctx.profiles.optimization)
        .await?;
    let repaired =
        repair_json(&raw).map_err(|e| output_failure(&task, OutputError::Repair(e)))?;

    let items = match repaired.value {
        Value::Array(items) => items,
        single => vec![single],
    };

    let mut optimized = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        if !item.is_object() {
            warn!("{task}: dropping non-object entry {index}");
            continue;
        }
        match validate::<SectionOptimizationDraft>(item.clone()) {
            Ok(draft) => optimized.push(SectionOptimization::new(section, draft)),
            Err(e) => {
                warn!("{task}: entry {index} failed validation ({e}), rebuilding from raw fields");
                optimized.push(rebuild_entry(section, &item));
            }
        }
    }

    info!("{section} optimization successful: {} entries", optimized.len());
    Ok(optimized)
}

/// Best-effort construction from an entry that did not validate.
fn rebuild_entry(section: SectionName, item: &Value) -> SectionOptimization {
    SectionOptimization {
        section_name: section,
        original_content: loose_text(item.get("original_content")),
        optimized_content: loose_text(item.get("optimized_content")),
        improvements: loose_list(item.get("improvements")),
        keywords_added: loose_list(item.get("keywords_added")),
    }
}

fn loose_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(" "),
        Some(other) => other.to_string(),
    }
}

fn loose_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        Some(Value::String(s)) => vec![s.clone()],
        _ => vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::mock::ScriptedLlm;
    use crate::models::resume::{ExperienceItem, Skill};
    use crate::sections::test_support::context;
    use serde_json::json;
    use std::sync::Arc;

    const SUMMARY: &str = "Optimize this resume summary";
    const SKILLS: &str = "Optimize this skills section";
    const EXPERIENCE: &str = "Optimize these work experience entries";

    fn resume_with_jobs(n: usize) -> ResumeStructured {
        ResumeStructured {
            experience: (0..n)
                .map(|i| ExperienceItem {
                    company: Some(format!("Company {i}")),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_current_summary_falls_back() {
        assert_eq!(current_summary(None), DEFAULT_SUMMARY);
        assert_eq!(current_summary(Some("\n\nEXPERIENCE")), DEFAULT_SUMMARY);
        assert_eq!(
            current_summary(Some("Rust engineer.\n\nEXPERIENCE")),
            "Rust engineer."
        );
    }

    #[tokio::test]
    async fn test_summary_uses_first_paragraph_and_caps_tokens() {
        let llm = Arc::new(ScriptedLlm::new().reply(
            SUMMARY,
            r#"{"section_name": "summary", "original_content": "Rust engineer.", "optimized_content": ["Senior Rust engineer.", "Ships fast."]}"#,
        ));
        let ctx = context(llm.clone());

        let opt = optimize_summary(&ctx, Some("Rust engineer.\n\nEXPERIENCE\nAcme"), "jd")
            .await
            .unwrap();

        assert_eq!(opt.section_name, SectionName::Summary);
        assert_eq!(opt.optimized_content, "Senior Rust engineer. Ships fast.");
        assert!(llm.calls()[0].contains("CURRENT SUMMARY:\nRust engineer.\n"));
        assert_eq!(llm.params()[0].max_output_tokens, 1024);
    }

    #[tokio::test]
    async fn test_skills_prompt_lists_names_or_placeholder() {
        let reply = r#"{"optimized_content": "Rust, Go"}"#;
        let llm = Arc::new(ScriptedLlm::new().reply(SKILLS, reply));
        let ctx = context(llm.clone());

        let resume = ResumeStructured {
            skills: vec![
                Skill {
                    name: "Rust".into(),
                    ..Default::default()
                },
                Skill {
                    name: "Go".into(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        optimize_skills(&ctx, &resume, "jd").await.unwrap();
        optimize_skills(&ctx, &ResumeStructured::default(), "jd")
            .await
            .unwrap();

        let calls = llm.calls();
        assert!(calls[0].contains("CURRENT SKILLS:\nRust, Go\n"));
        assert!(calls[1].contains("CURRENT SKILLS:\nNo skills listed\n"));
    }

    #[tokio::test]
    async fn test_empty_entries_skip_model_call() {
        let llm = Arc::new(ScriptedLlm::new());
        let ctx = context(llm.clone());

        let out = optimize_entries(&ctx, SectionName::Experience, &resume_with_jobs(0), "jd")
            .await
            .unwrap();

        assert!(out.is_empty());
        assert!(llm.calls().is_empty());
    }

    #[tokio::test]
    async fn test_single_object_treated_as_one_entry() {
        let llm = Arc::new(ScriptedLlm::new().reply(
            EXPERIENCE,
            r#"{"original_content": "Company 0", "optimized_content": "Led Company 0 platform"}"#,
        ));
        let ctx = context(llm);

        let out = optimize_entries(&ctx, SectionName::Experience, &resume_with_jobs(1), "jd")
            .await
            .unwrap();

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].section_name, SectionName::Experience);
    }

    #[tokio::test]
    async fn test_invalid_entries_rebuilt_or_dropped() {
        let reply = json!([
            {"original_content": "A", "optimized_content": "Better A", "keywords_added": ["Rust"]},
            {"original_content": ["B1", "B2"], "improvements": ["tighter", {"x": 1}]},
            "just a string",
            {"original_content": "C", "optimized_content": "Better C"}
        ])
        .to_string();
        let llm = Arc::new(ScriptedLlm::new().reply(EXPERIENCE, &reply));
        let ctx = context(llm);

        let out = optimize_entries(&ctx, SectionName::Experience, &resume_with_jobs(3), "jd")
            .await
            .unwrap();

        assert_eq!(out.len(), 3);
        assert_eq!(out[0].keywords_added, vec!["Rust"]);
        assert_eq!(out[1].original_content, "B1 B2");
        assert_eq!(out[1].optimized_content, "");
        assert_eq!(out[1].improvements, vec!["tighter"]);
        assert_eq!(out[2].optimized_content, "Better C");
    }

    #[tokio::test]
    async fn test_unrepairable_entries_fail_task() {
        let llm = Arc::new(ScriptedLlm::new().reply(EXPERIENCE, "Sorry, no."));
        let ctx = context(llm);

        let err = optimize_entries(&ctx, SectionName::Experience, &resume_with_jobs(2), "jd")
            .await
            .unwrap_err();
        assert!(matches!(err, TaskError::Malformed { .. }));
    }
}
