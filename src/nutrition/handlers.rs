use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::error::ApiError;
use crate::state::AppState;

use super::dto::{CreateNutritionLog, DailySummary};
use super::repo::NutritionLog;
use super::services;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/nutrition-logs", post(create_log))
        .route("/nutrition-logs/:date", get(daily_summary))
}

#[instrument(skip(state, payload))]
pub async fn create_log(
    State(state): State<AppState>,
    Json(payload): Json<CreateNutritionLog>,
) -> Result<Json<NutritionLog>, ApiError> {
    let log = services::log_meal(&state, payload).await?;
    Ok(Json(log))
}

#[instrument(skip(state))]
pub async fn daily_summary(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<DailySummary>, ApiError> {
    let summary = services::daily_summary(&state, date).await?;
    Ok(Json(summary))
}
