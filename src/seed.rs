use axum::{extract::State, routing::post, Json, Router};
use serde_json::{json, Value};
use time::OffsetDateTime;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::recipes::dto::RecipeFilter;
use crate::recipes::repo::{Difficulty, NutritionProfile, Recipe};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/init-sample-data", post(init_sample_data))
}

/// Idempotent: seeds only when the recipe collection is empty.
#[instrument(skip(state))]
pub async fn init_sample_data(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let existing = state.recipes.list(&RecipeFilter::default(), 1).await?;
    if !existing.is_empty() {
        return Ok(Json(json!({ "message": "Sample data already exists" })));
    }

    for recipe in sample_recipes() {
        state.recipes.insert(&recipe).await?;
    }
    info!("sample recipes seeded");
    Ok(Json(json!({ "message": "Sample data initialized successfully" })))
}

fn sample_recipes() -> Vec<Recipe> {
    let now = OffsetDateTime::now_utc();
    vec![
        Recipe {
            id: Uuid::new_v4(),
            name: "Classic Pancakes".into(),
            description: "Fluffy, delicious pancakes perfect for breakfast".into(),
            ingredients: vec![
                "2 cups all-purpose flour".into(),
                "2 tbsp sugar".into(),
                "2 tsp baking powder".into(),
                "1 tsp salt".into(),
                "2 eggs".into(),
                "1.5 cups milk".into(),
                "4 tbsp melted butter".into(),
            ],
            instructions: vec![
                "Mix dry ingredients in a bowl".into(),
                "Whisk eggs, milk, and melted butter in another bowl".into(),
                "Combine wet and dry ingredients until just mixed".into(),
                "Heat pan and cook pancakes until bubbles form".into(),
                "Flip and cook until golden brown".into(),
            ],
            prep_time: 10,
            cook_time: 15,
            servings: 4,
            difficulty: Difficulty::Easy,
            category: "Breakfast".into(),
            nutrition: NutritionProfile {
                calories: 320.0,
                protein: 12.0,
                carbs: 45.0,
                fats: 10.0,
            },
            image_url: Some("https://images.unsplash.com/photo-1630441508966-431c08536d1b".into()),
            created_at: now,
        },
        Recipe {
            id: Uuid::new_v4(),
            name: "Quinoa Power Bowl".into(),
            description: "Nutritious bowl packed with protein and vegetables".into(),
            ingredients: vec![
                "1 cup quinoa".into(),
                "2 cups vegetable broth".into(),
                "1 avocado, sliced".into(),
                "1 cup cherry tomatoes".into(),
                "1/2 cup chickpeas".into(),
                "2 tbsp olive oil".into(),
                "1 tbsp lemon juice".into(),
                "Salt and pepper to taste".into(),
            ],
            instructions: vec![
                "Cook quinoa in vegetable broth according to package directions".into(),
                "Let quinoa cool slightly".into(),
                "Arrange quinoa in bowl with toppings".into(),
                "Drizzle with olive oil and lemon juice".into(),
                "Season with salt and pepper".into(),
            ],
            prep_time: 15,
            cook_time: 20,
            servings: 2,
            difficulty: Difficulty::Easy,
            category: "Lunch".into(),
            nutrition: NutritionProfile {
                calories: 450.0,
                protein: 15.0,
                carbs: 55.0,
                fats: 18.0,
            },
            image_url: Some("https://images.unsplash.com/photo-1562923690-e274ba919781".into()),
            created_at: now,
        },
        Recipe {
            id: Uuid::new_v4(),
            name: "Herb-Crusted Chicken".into(),
            description: "Juicy chicken breast with aromatic herb crust".into(),
            ingredients: vec![
                "4 chicken breasts".into(),
                "2 tbsp olive oil".into(),
                "1 tbsp dried herbs".into(),
                "2 cloves garlic, minced".into(),
                "1 tsp paprika".into(),
                "Salt and pepper".into(),
                "1 lemon, juiced".into(),
            ],
            instructions: vec![
                "Preheat oven to 375F".into(),
                "Mix herbs, garlic, paprika, salt and pepper".into(),
                "Brush chicken with olive oil and lemon juice".into(),
                "Coat chicken with herb mixture".into(),
                "Bake for 25-30 minutes until cooked through".into(),
            ],
            prep_time: 15,
            cook_time: 30,
            servings: 4,
            difficulty: Difficulty::Medium,
            category: "Dinner".into(),
            nutrition: NutritionProfile {
                calories: 280.0,
                protein: 35.0,
                carbs: 5.0,
                fats: 12.0,
            },
            image_url: Some("https://images.unsplash.com/photo-1505253758473-96b7015fcd40".into()),
            created_at: now,
        },
    ]
}
