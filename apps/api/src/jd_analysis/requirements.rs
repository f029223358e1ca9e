//! Requirement extraction from a raw job description.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::jd_analysis::prompts::{REQUIREMENTS_PROMPT_TEMPLATE, REQUIREMENTS_SYSTEM};
use crate::llm_client::prompts::{compose, JSON_OBJECT_ONLY};
use crate::schema::{Field, FieldKind, Schema};
use crate::sections::scoring::SCORING_JD_CHARS;
use crate::sections::{TaskContext, TaskError};
use crate::text::truncate_for_prompt;

pub const UNKNOWN_ROLE: &str = "Unknown";
pub const DEFAULT_SENIORITY: &str = "mid";

/// Requirements as the model reports them (camelCase keys).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RequirementsDraft {
    pub job_key_skills: Vec<String>,
    pub job_key_responsibilities: Vec<String>,
    pub role: Option<String>,
    pub seniority: Option<String>,
    pub tech_stack: Vec<String>,
}

impl Schema for RequirementsDraft {
    const NAME: &'static str = "JobRequirements";
    const FIELDS: &'static [Field] = &[
        Field::optional("jobKeySkills", FieldKind::TextList),
        Field::optional("jobKeyResponsibilities", FieldKind::TextList),
        Field::optional("role", FieldKind::OptionalText),
        Field::optional("seniority", FieldKind::OptionalText),
        Field::optional("techStack", FieldKind::TextList),
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobRequirements {
    pub key_skills: Vec<String>,
    pub key_responsibilities: Vec<String>,
    pub role: String,
    pub seniority: String,
    pub tech_stack: Vec<String>,
}

fn or_default(value: Option<String>, default: &str) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

impl From<RequirementsDraft> for JobRequirements {
    fn from(draft: RequirementsDraft) -> Self {
        Self {
            key_skills: draft.job_key_skills,
            key_responsibilities: draft.job_key_responsibilities,
            role: or_default(draft.role, UNKNOWN_ROLE),
            seniority: or_default(draft.seniority, DEFAULT_SENIORITY).to_lowercase(),
            tech_stack: draft.tech_stack,
        }
    }
}

pub async fn extract_requirements(ctx: &TaskContext, jd: &str) -> Result<JobRequirements, TaskError> {
    info!("Starting job description requirement extraction");

    let system = REQUIREMENTS_SYSTEM.replace("{json_only}", JSON_OBJECT_ONLY);
    let user = REQUIREMENTS_PROMPT_TEMPLATE.replace("{jd}", &truncate_for_prompt(jd, SCORING_JD_CHARS));
    let prompt = compose(&system, &user);

    let draft: RequirementsDraft = ctx
        .request("requirement extraction", &prompt, ctx.profiles.scoring)
        .await?;
    let requirements = JobRequirements::from(draft);

    info!(
        "Requirement extraction successful: role={}, seniority={}",
        requirements.role, requirements.seniority
    );
    Ok(requirements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::mock::ScriptedLlm;
    use crate::schema::validate;
    use crate::sections::test_support::context;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_missing_fields_take_defaults() {
        let draft: RequirementsDraft = validate(json!({"jobKeySkills": "Rust"})).unwrap();
        let req = JobRequirements::from(draft);

        assert_eq!(req.key_skills, vec!["Rust"]);
        assert!(req.key_responsibilities.is_empty());
        assert_eq!(req.role, "Unknown");
        assert_eq!(req.seniority, "mid");
        assert!(req.tech_stack.is_empty());
    }

    #[tokio::test]
    async fn test_extracts_with_scoring_profile() {
        let llm = Arc::new(ScriptedLlm::new().reply(
            "Extract key requirements from this job description",
            r#"{"jobKeySkills": ["Rust", "SQL"], "jobKeyResponsibilities": ["Own billing"], "role": "Backend Engineer", "seniority": "Senior", "techStack": ["Postgres"]}"#,
        ));
        let ctx = context(llm.clone());

        let req = extract_requirements(&ctx, "We need a senior Rust engineer").await.unwrap();

        assert_eq!(req.role, "Backend Engineer");
        assert_eq!(req.seniority, "senior");
        assert_eq!(req.tech_stack, vec!["Postgres"]);
        assert_eq!(llm.params()[0], ctx.profiles.scoring);
        assert!(llm.calls()[0].contains("We need a senior Rust engineer"));
    }
}
