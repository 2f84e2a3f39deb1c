use serde::Deserialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::ApiError;
use crate::recipes::repo::{Difficulty, NutritionProfile, Recipe};

#[derive(Debug, Deserialize)]
pub struct CreateRecipe {
    pub name: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub prep_time: i32,
    pub cook_time: i32,
    pub servings: i32,
    pub difficulty: Difficulty,
    pub category: String,
    pub nutrition: NutritionProfile,
    pub image_url: Option<String>,
}

impl CreateRecipe {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::Validation("name must not be empty".into()));
        }
        if self.prep_time < 0 || self.cook_time < 0 {
            return Err(ApiError::Validation(
                "prep_time and cook_time must be non-negative".into(),
            ));
        }
        if self.servings < 1 {
            return Err(ApiError::Validation("servings must be positive".into()));
        }
        let n = &self.nutrition;
        for value in [n.calories, n.protein, n.carbs, n.fats] {
            if !value.is_finite() || value < 0.0 {
                return Err(ApiError::Validation(
                    "nutrition values must be non-negative numbers".into(),
                ));
            }
        }
        Ok(())
    }

    /// Materialize a recipe record; the store never sees the raw payload.
    pub fn into_recipe(self, id: Uuid) -> Recipe {
        Recipe {
            id,
            name: self.name,
            description: self.description,
            ingredients: self.ingredients,
            instructions: self.instructions,
            prep_time: self.prep_time,
            cook_time: self.cook_time,
            servings: self.servings,
            difficulty: self.difficulty,
            category: self.category,
            nutrition: self.nutrition,
            image_url: self.image_url,
            created_at: OffsetDateTime::now_utc(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RecipeFilter {
    pub category: Option<String>,
    pub difficulty: Option<Difficulty>,
}
