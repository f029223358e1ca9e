pub mod health;

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::jd_analysis::handlers::handle_analyze_jd;
use crate::optimization::handlers::handle_optimize;
use crate::scoring::handlers::handle_score;
use crate::state::AppState;

/// Success envelope shared by every POST endpoint.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

/// Rejects missing or whitespace-only request fields.
pub fn require_text(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/", post(handle_score))
        .route("/score", post(handle_score))
        .route("/optimize", post(handle_optimize))
        .route("/analyze-jd", post(handle_analyze_jd))
        .with_state(state)
}
