//! Axum route handlers for resume scoring.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::ResumeStructured;
use crate::models::scoring::SectionScore;
use crate::routes::{require_text, ApiResponse};
use crate::scoring::graph::run_scoring;
use crate::scoring::insights::ScoreInsights;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub analysis_id: Uuid,
    pub overall_score: f64,
    pub section_scores: Vec<SectionScore>,
    pub comments: Vec<String>,
    pub insights: ScoreInsights,
    pub resume_structured: ResumeStructured,
    pub analyzed_at: DateTime<Utc>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST / and POST /score
///
/// Extracts the resume, scores five sections in parallel and aggregates.
pub async fn handle_score(
    State(state): State<AppState>,
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<ScoreResponse>>, AppError> {
    let Json(request) = payload?;
    require_text("resume_text", &request.resume_text)?;
    require_text("job_description", &request.job_description)?;

    let analysis_id = Uuid::new_v4();
    info!("Scoring request {analysis_id}");

    let run = run_scoring(
        &state.tasks(),
        &request.resume_text,
        &request.job_description,
    )
    .await?;

    let insights = ScoreInsights::from_final_score(&run.final_score);

    Ok(ApiResponse::ok(ScoreResponse {
        analysis_id,
        overall_score: run.final_score.overall_score,
        section_scores: run.final_score.section_scores,
        comments: run.final_score.comments,
        insights,
        resume_structured: run.resume,
        analyzed_at: Utc::now(),
    }))
}
