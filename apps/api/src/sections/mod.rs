// Section tasks: one model call each, turned into a validated entity.
// All model calls go through TaskContext so the retry policy applies uniformly.

pub mod extraction;
pub mod optimization;
pub mod output;
pub mod prompts;
pub mod scoring;

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error};

use crate::config::{GenerationParams, GenerationProfiles};
use crate::json_repair::RepairError;
use crate::llm_client::retry::RetryPolicy;
use crate::llm_client::{LlmBackend, LlmError};
use crate::schema::{Schema, ValidationError};
use crate::sections::output::{ModelOutput, OutputError};
use crate::text::preview;

/// Longest slice of raw or repaired text written to the error log.
const LOG_PREVIEW_CHARS: usize = 500;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("{task}: model call failed: {source}")]
    Llm {
        task: String,
        #[source]
        source: LlmError,
    },

    #[error("{task}: {source}")]
    Malformed {
        task: String,
        #[source]
        source: RepairError,
    },

    #[error("{task}: {source}")]
    Schema {
        task: String,
        #[source]
        source: ValidationError,
    },
}

/// Everything a section task needs besides its inputs.
#[derive(Clone)]
pub struct TaskContext {
    pub llm: Arc<dyn LlmBackend>,
    pub retry: RetryPolicy,
    pub profiles: GenerationProfiles,
}

impl TaskContext {
    /// One model call under the retry policy.
    pub async fn generate(
        &self,
        task: &str,
        prompt: &str,
        params: GenerationParams,
    ) -> Result<String, TaskError> {
        let raw = self
            .retry
            .run(task, || self.llm.generate(prompt, params))
            .await
            .map_err(|source| {
                error!("{task}: model call failed: {source}");
                TaskError::Llm {
                    task: task.to_string(),
                    source,
                }
            })?;

        debug!("{task}: raw response {}", preview(&raw, 200));
        Ok(raw)
    }

    /// One model call whose response is repaired and validated as `T`.
    pub async fn request<T: Schema>(
        &self,
        task: &str,
        prompt: &str,
        params: GenerationParams,
    ) -> Result<T, TaskError> {
        let raw = self.generate(task, prompt, params).await?;
        ModelOutput::<T>::RawText(raw)
            .into_validated()
            .map_err(|e| output_failure(task, e))
    }
}

/// Logs a terminal output failure with both texts, then wraps it.
pub(crate) fn output_failure(task: &str, err: OutputError) -> TaskError {
    match err {
        OutputError::Repair(source) => {
            let raw = match &source {
                RepairError::Exhausted { raw, .. } => raw.as_str(),
                RepairError::Empty => "",
            };
            error!(
                "{task}: could not repair model output: {source}; raw={:?} last_attempt={:?}",
                preview(raw, LOG_PREVIEW_CHARS),
                preview(source.last_attempt().unwrap_or(""), LOG_PREVIEW_CHARS)
            );
            TaskError::Malformed {
                task: task.to_string(),
                source,
            }
        }
        OutputError::Validation {
            error: source,
            raw,
            repaired,
        } => {
            error!(
                "{task}: {source}; raw={:?} repaired={:?}",
                preview(&raw, LOG_PREVIEW_CHARS),
                preview(&repaired, LOG_PREVIEW_CHARS)
            );
            TaskError::Schema {
                task: task.to_string(),
                source,
            }
        }
    }
}
