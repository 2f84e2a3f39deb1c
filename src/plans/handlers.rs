use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;

use crate::error::ApiError;
use crate::state::AppState;

use super::dto::{MealPlanView, UpsertMealPlan};
use super::services;

const PLAN_LIST_CAP: i64 = 50;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/meal-plans", get(list_plans).post(upsert_plan))
        .route("/meal-plans/:date", get(resolve_plan))
}

#[instrument(skip(state, payload))]
pub async fn upsert_plan(
    State(state): State<AppState>,
    Json(payload): Json<UpsertMealPlan>,
) -> Result<Json<MealPlanView>, ApiError> {
    let plan = services::upsert(&state, payload).await?;
    Ok(Json(plan))
}

#[instrument(skip(state))]
pub async fn list_plans(
    State(state): State<AppState>,
) -> Result<Json<Vec<MealPlanView>>, ApiError> {
    let plans = state.plans.list(PLAN_LIST_CAP).await?;
    Ok(Json(plans.into_iter().map(MealPlanView::from).collect()))
}

#[instrument(skip(state))]
pub async fn resolve_plan(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<MealPlanView>, ApiError> {
    let plan = services::resolve(&state, &date).await?;
    Ok(Json(plan))
}
