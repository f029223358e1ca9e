// Job description analysis: requirement extraction, then a section weight proposal.

pub mod handlers;
pub mod prompts;
pub mod requirements;
pub mod weights;

use serde::Serialize;
use tracing::info;

use crate::jd_analysis::requirements::{extract_requirements, JobRequirements};
use crate::jd_analysis::weights::{propose_weights, WeightStrategy};
use crate::sections::{TaskContext, TaskError};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JdAnalysis {
    pub requirements: JobRequirements,
    pub strategy: WeightStrategy,
}

/// Two sequential model calls; the weight prompt includes the extracted requirements.
pub async fn analyze_job_description(ctx: &TaskContext, jd: &str) -> Result<JdAnalysis, TaskError> {
    let requirements = extract_requirements(ctx, jd).await?;
    let strategy = propose_weights(ctx, jd, &requirements).await?;
    info!("Job description analysis complete for role {}", requirements.role);
    Ok(JdAnalysis {
        requirements,
        strategy,
    })
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::llm_client::mock::ScriptedLlm;

    pub const REQUIREMENTS: &str = "Extract key requirements from this job description";
    pub const WEIGHTS: &str = "Analyze this job description and assign section weights";

    pub fn jd_llm() -> ScriptedLlm {
        ScriptedLlm::new()
            .reply(
                REQUIREMENTS,
                r#"{"jobKeySkills": ["Rust", "Kafka"], "jobKeyResponsibilities": ["Own payments"], "role": "Payments Engineer", "seniority": "senior", "techStack": ["Rust"]}"#,
            )
            .reply(
                WEIGHTS,
                r#"```json
{"sectionWeights": {"summary": 0.1, "skills": 0.4, "experience": 0.4, "projects": 0.1}, "focusAreas": ["Rust depth"], "optimizationStrategy": "Lead with payments work"}
```"#,
            )
    }
}
