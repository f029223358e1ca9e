//! Axum route handler for job description analysis.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::jd_analysis::{analyze_job_description, JdAnalysis};
use crate::routes::{require_text, ApiResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeJdRequest {
    #[serde(default)]
    pub job_description: String,
}

/// POST /analyze-jd
pub async fn handle_analyze_jd(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeJdRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<JdAnalysis>>, AppError> {
    let Json(request) = payload?;
    require_text("job_description", &request.job_description)?;

    info!("Job description analysis request");
    let analysis = analyze_job_description(&state.tasks(), &request.job_description).await?;

    Ok(ApiResponse::ok(analysis))
}
