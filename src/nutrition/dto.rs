use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::nutrition::repo::{MealType, NutritionLog};

#[derive(Debug, Deserialize)]
pub struct CreateNutritionLog {
    pub date: String,
    pub meal_type: MealType,
    pub recipe_id: Uuid,
    pub servings: f64,
}

/// Per-day sums of the four nutrient fields, rounded to 2 decimal places
/// for display. Per-log values stay unrounded in storage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct NutritionTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

#[derive(Debug, Serialize)]
pub struct DailySummary {
    pub date: String,
    pub logs: Vec<NutritionLog>,
    pub totals: NutritionTotals,
}
