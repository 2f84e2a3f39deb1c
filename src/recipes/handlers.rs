use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

use super::dto::{CreateRecipe, RecipeFilter};
use super::repo::Recipe;

/// Unfiltered listings are bounded; clients wanting more should filter.
const RECIPE_LIST_CAP: i64 = 100;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/recipes", get(list_recipes).post(create_recipe))
        .route(
            "/recipes/:id",
            get(get_recipe).put(replace_recipe).delete(delete_recipe),
        )
}

#[instrument(skip(state, payload))]
pub async fn create_recipe(
    State(state): State<AppState>,
    Json(payload): Json<CreateRecipe>,
) -> Result<Json<Recipe>, ApiError> {
    payload.validate()?;
    let recipe = payload.into_recipe(Uuid::new_v4());
    state.recipes.insert(&recipe).await?;
    info!(recipe_id = %recipe.id, name = %recipe.name, "recipe created");
    Ok(Json(recipe))
}

#[instrument(skip(state))]
pub async fn list_recipes(
    State(state): State<AppState>,
    Query(filter): Query<RecipeFilter>,
) -> Result<Json<Vec<Recipe>>, ApiError> {
    let recipes = state.recipes.list(&filter, RECIPE_LIST_CAP).await?;
    Ok(Json(recipes))
}

#[instrument(skip(state))]
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Recipe>, ApiError> {
    let recipe = state
        .recipes
        .get(id)
        .await?
        .ok_or(ApiError::NotFound("recipe"))?;
    Ok(Json(recipe))
}

/// Full overwrite; the id from the path wins over whatever the payload says.
#[instrument(skip(state, payload))]
pub async fn replace_recipe(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateRecipe>,
) -> Result<Json<Recipe>, ApiError> {
    payload.validate()?;
    let recipe = payload.into_recipe(id);
    if !state.recipes.replace(&recipe).await? {
        warn!(recipe_id = %id, "replace target missing");
        return Err(ApiError::NotFound("recipe"));
    }
    Ok(Json(recipe))
}

/// No cascade: meal plans and nutrition logs keep their dangling ids.
#[instrument(skip(state))]
pub async fn delete_recipe(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    if !state.recipes.delete(id).await? {
        return Err(ApiError::NotFound("recipe"));
    }
    info!(recipe_id = %id, "recipe deleted");
    Ok(Json(json!({ "message": "Recipe deleted successfully" })))
}
