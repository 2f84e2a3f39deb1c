use axum::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::store::{MemoryStore, PgStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub fn as_str(self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown meal type: {0}")]
pub struct ParseMealTypeError(String);

impl TryFrom<String> for MealType {
    type Error = ParseMealTypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            "snack" => Ok(MealType::Snack),
            _ => Err(ParseMealTypeError(value)),
        }
    }
}

/// One "ate recipe R, servings S" event. The four nutrient values are a
/// snapshot computed at write time; editing the recipe afterwards does not
/// touch rows that already exist.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct NutritionLog {
    pub id: Uuid,
    pub date: String,
    #[sqlx(try_from = "String")]
    pub meal_type: MealType,
    pub recipe_id: Uuid,
    pub servings: f64,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub logged_at: OffsetDateTime,
}

#[async_trait]
pub trait NutritionLogStore: Send + Sync {
    async fn insert(&self, log: &NutritionLog) -> anyhow::Result<()>;
    /// Insertion order, bounded by `limit`.
    async fn list_by_date(&self, date: &str, limit: i64) -> anyhow::Result<Vec<NutritionLog>>;
}

#[async_trait]
impl NutritionLogStore for PgStore {
    async fn insert(&self, log: &NutritionLog) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO nutrition_logs
                (id, date, meal_type, recipe_id, servings, calories, protein, carbs, fats, logged_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(log.id)
        .bind(&log.date)
        .bind(log.meal_type.as_str())
        .bind(log.recipe_id)
        .bind(log.servings)
        .bind(log.calories)
        .bind(log.protein)
        .bind(log.carbs)
        .bind(log.fats)
        .bind(log.logged_at)
        .execute(&self.db)
        .await?;
        Ok(())
    }

    async fn list_by_date(&self, date: &str, limit: i64) -> anyhow::Result<Vec<NutritionLog>> {
        let rows = sqlx::query_as::<_, NutritionLog>(
            r#"
            SELECT id, date, meal_type, recipe_id, servings, calories, protein, carbs, fats, logged_at
            FROM nutrition_logs
            WHERE date = $1
            ORDER BY logged_at ASC
            LIMIT $2
            "#,
        )
        .bind(date)
        .bind(limit)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }
}

#[async_trait]
impl NutritionLogStore for MemoryStore {
    async fn insert(&self, log: &NutritionLog) -> anyhow::Result<()> {
        self.logs.lock().expect("lock").push(log.clone());
        Ok(())
    }

    async fn list_by_date(&self, date: &str, limit: i64) -> anyhow::Result<Vec<NutritionLog>> {
        let logs = self.logs.lock().expect("lock");
        Ok(logs
            .iter()
            .filter(|l| l.date == date)
            .take(limit as usize)
            .cloned()
            .collect())
    }
}
