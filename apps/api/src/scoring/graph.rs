//! Scoring graph: start → extracting → scoring (5 branches) → aggregating → done.

use std::sync::Arc;

use tracing::info;

use crate::models::resume::ResumeStructured;
use crate::models::scoring::{FinalScore, SectionName};
use crate::pipeline::topology::Topology;
use crate::pipeline::{run_branches, PipelineError};
use crate::scoring::aggregate::aggregate_scores;
use crate::sections::extraction::extract_resume;
use crate::sections::scoring::score_section;
use crate::sections::TaskContext;

#[derive(Debug, Clone)]
pub struct ScoringRun {
    pub resume: ResumeStructured,
    pub final_score: FinalScore,
}

pub async fn run_scoring(
    ctx: &TaskContext,
    resume_text: &str,
    job_description: &str,
) -> Result<ScoringRun, PipelineError> {
    let topology = Topology::fan_out(&SectionName::SCORED);
    topology.validate()?;

    info!("Scoring graph: extracting");
    let resume = Arc::new(
        extract_resume(ctx, resume_text)
            .await
            .map_err(PipelineError::Prepare)?,
    );
    let jd: Arc<str> = Arc::from(job_description);

    info!("Scoring graph: scoring {} sections", topology.branches().len());
    let scores = run_branches(&topology, |section| {
        let ctx = ctx.clone();
        let resume = resume.clone();
        let jd = jd.clone();
        async move { score_section(&ctx, section, &resume, &jd).await }
    })
    .await?;

    info!("Scoring graph: aggregating");
    let final_score = aggregate_scores(scores);

    info!("Scoring graph: done ({}/100)", final_score.overall_score);
    Ok(ScoringRun {
        resume: Arc::try_unwrap(resume).unwrap_or_else(|shared| (*shared).clone()),
        final_score,
    })
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::llm_client::mock::ScriptedLlm;

    pub const EXTRACTION: &str = "Extract structured information from the following resume";

    pub const RESUME_JSON: &str = r#"```json
{
  "contact_info": {"name": "Ada Lovelace", "email": "ada@example.com"},
  "skills": [{"name": "Rust", "level": "expert"}, {"name": "PostgreSQL", "level": "intermediate"}],
  "experience": [{"job_title": "Backend Engineer", "company": "Acme", "responsibilities": ["Built billing APIs"]}],
  "education": [{"degree": "BSc", "field_of_study": "Computer Science"}],
  "projects": [{"name": "tinykv", "technologies": ["Rust"]}],
  "meta": {"seniority_level": "senior", "domains": ["fintech"]}
}
```"#;

    /// Backend answering extraction and all five scoring prompts.
    pub fn scoring_llm() -> ScriptedLlm {
        ScriptedLlm::new()
            .reply(EXTRACTION, RESUME_JSON)
            .reply(
                "Score the candidate's skills against",
                r#"{"section_name": "skills", "score": 90, "reasons": ["Rust expert", "SQL"], "missing_requirements": []}"#,
            )
            .reply(
                "Score the candidate's work experience against",
                r#"{"section_name": "experience", "score": 80, "reasons": ["Backend APIs"], "missing_requirements": ["Kafka"],}"#,
            )
            .reply(
                "Score the candidate's education against",
                r#"Here you go: {"section_name": "education", "score": "70", "reasons": ["CS degree"]}"#,
            )
            .reply(
                "Score the candidate's projects against",
                r#"{"section_name": "projects", "score": 40, "reasons": [], "missing_requirements": ["Distributed systems", "gRPC", "Kubernetes", "Helm"]}"#,
            )
            .reply(
                "Score the candidate's meta information",
                r#"{"section_name": "meta", "score": 60, "reasons": ["Senior"]}"#,
            )
    }
}
