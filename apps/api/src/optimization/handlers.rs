//! Axum route handlers for resume optimization.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::optimization::OptimizationResult;
use crate::models::resume::ResumeStructured;
use crate::optimization::graph::{run_optimization, ResumeSource};
use crate::routes::{require_text, ApiResponse};
use crate::schema::validate;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct OptimizeRequest {
    #[serde(default)]
    pub job_description: String,
    #[serde(default)]
    pub resume_text: Option<String>,
    /// Validated like extraction output, so model-style deviations are accepted.
    #[serde(default)]
    pub resume_structured: Option<Value>,
}

impl OptimizeRequest {
    fn source(self) -> Result<ResumeSource, AppError> {
        let text = self.resume_text.filter(|t| !t.trim().is_empty());
        let structured = match self.resume_structured {
            None | Some(Value::Null) => None,
            Some(value) => Some(
                validate::<ResumeStructured>(value)
                    .map_err(|e| AppError::Validation(format!("resume_structured: {e}")))?,
            ),
        };
        match (structured, text) {
            (Some(resume), text) => Ok(ResumeSource::Structured { resume, text }),
            (None, Some(text)) => Ok(ResumeSource::Text(text)),
            (None, None) => Err(AppError::Validation(
                "Either resume_text or resume_structured is required".into(),
            )),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OptimizeResponse {
    pub optimization_id: Uuid,
    pub optimization_result: OptimizationResult,
    pub resume_structured: ResumeStructured,
    pub optimized_at: DateTime<Utc>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /optimize
///
/// Rewrites summary, skills, experience, projects and education in parallel.
pub async fn handle_optimize(
    State(state): State<AppState>,
    payload: Result<Json<OptimizeRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<OptimizeResponse>>, AppError> {
    let Json(request) = payload?;
    require_text("job_description", &request.job_description)?;
    let job_description = request.job_description.clone();
    let source = request.source()?;

    let optimization_id = Uuid::new_v4();
    info!("Optimization request {optimization_id}");

    let run = run_optimization(&state.tasks(), source, &job_description).await?;

    Ok(ApiResponse::ok(OptimizeResponse {
        optimization_id,
        optimization_result: run.result,
        resume_structured: run.resume,
        optimized_at: Utc::now(),
    }))
}
