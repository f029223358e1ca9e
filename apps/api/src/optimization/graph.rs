//! Optimization graph: start → preparing → optimizing (5 branches) → merging → done.

use std::sync::Arc;

use tracing::info;

use crate::models::optimization::OptimizationResult;
use crate::models::resume::ResumeStructured;
use crate::models::scoring::SectionName;
use crate::optimization::merge::{merge_optimizations, SectionOutput};
use crate::pipeline::topology::Topology;
use crate::pipeline::{run_branches, PipelineError};
use crate::sections::extraction::extract_resume;
use crate::sections::optimization::{optimize_entries, optimize_skills, optimize_summary};
use crate::sections::{TaskContext, TaskError};

/// Resume input for an optimization run.
#[derive(Debug, Clone)]
pub enum ResumeSource {
    /// Raw text only; extraction runs first.
    Text(String),
    /// Already structured; extraction is skipped. The raw text, if any, still
    /// supplies the current summary.
    Structured {
        resume: ResumeStructured,
        text: Option<String>,
    },
}

#[derive(Debug, Clone)]
pub struct OptimizationRun {
    pub resume: ResumeStructured,
    pub result: OptimizationResult,
}

async fn prepare(
    ctx: &TaskContext,
    source: ResumeSource,
) -> Result<(ResumeStructured, Option<String>), TaskError> {
    match source {
        ResumeSource::Structured { resume, text } => {
            info!("Using provided structured resume, skipping extraction");
            Ok((resume, text))
        }
        ResumeSource::Text(text) => {
            let resume = extract_resume(ctx, &text).await?;
            Ok((resume, Some(text)))
        }
    }
}

async fn optimize_branch(
    ctx: &TaskContext,
    section: SectionName,
    resume: &ResumeStructured,
    resume_text: Option<&str>,
    jd: &str,
) -> Result<SectionOutput, TaskError> {
    match section {
        SectionName::Summary => optimize_summary(ctx, resume_text, jd)
            .await
            .map(SectionOutput::Single),
        SectionName::Skills => optimize_skills(ctx, resume, jd)
            .await
            .map(SectionOutput::Single),
        _ => optimize_entries(ctx, section, resume, jd)
            .await
            .map(SectionOutput::Entries),
    }
}

pub async fn run_optimization(
    ctx: &TaskContext,
    source: ResumeSource,
    job_description: &str,
) -> Result<OptimizationRun, PipelineError> {
    let topology = Topology::fan_out(&SectionName::OPTIMIZED);
    topology.validate()?;

    info!("Optimization graph: preparing");
    let (resume, resume_text) = prepare(ctx, source)
        .await
        .map_err(PipelineError::Prepare)?;
    let resume = Arc::new(resume);
    let resume_text: Option<Arc<str>> = resume_text.map(Arc::from);
    let jd: Arc<str> = Arc::from(job_description);

    info!("Optimization graph: optimizing {} sections", topology.branches().len());
    let outputs = run_branches(&topology, |section| {
        let ctx = ctx.clone();
        let resume = resume.clone();
        let resume_text = resume_text.clone();
        let jd = jd.clone();
        async move { optimize_branch(&ctx, section, &resume, resume_text.as_deref(), &jd).await }
    })
    .await?;

    info!("Optimization graph: merging");
    let result = merge_optimizations(outputs);

    info!("Optimization graph: done");
    Ok(OptimizationRun {
        resume: Arc::try_unwrap(resume).unwrap_or_else(|shared| (*shared).clone()),
        result,
    })
}
