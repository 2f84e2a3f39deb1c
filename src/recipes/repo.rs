use axum::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::recipes::dto::RecipeFilter;
use crate::store::{MemoryStore, PgStore};

/// The fixed four-key nutrient mapping, scoped to the recipe's stated
/// serving size. Making it a struct rather than a map is what keeps the
/// "keys always present" invariant out of the consumers' hands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutritionProfile {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown difficulty: {0}")]
pub struct ParseDifficultyError(String);

impl TryFrom<String> for Difficulty {
    type Error = ParseDifficultyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "Easy" => Ok(Difficulty::Easy),
            "Medium" => Ok(Difficulty::Medium),
            "Hard" => Ok(Difficulty::Hard),
            _ => Err(ParseDifficultyError(value)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Recipe {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub prep_time: i32,
    pub cook_time: i32,
    pub servings: i32,
    #[sqlx(try_from = "String")]
    pub difficulty: Difficulty,
    pub category: String,
    #[sqlx(json)]
    pub nutrition: NutritionProfile,
    pub image_url: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[async_trait]
pub trait RecipeStore: Send + Sync {
    async fn insert(&self, recipe: &Recipe) -> anyhow::Result<()>;
    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Recipe>>;
    /// Exact-match filters, insertion order, bounded by `limit`.
    async fn list(&self, filter: &RecipeFilter, limit: i64) -> anyhow::Result<Vec<Recipe>>;
    /// Full overwrite keyed by `recipe.id`; returns false when absent.
    async fn replace(&self, recipe: &Recipe) -> anyhow::Result<bool>;
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}

#[async_trait]
impl RecipeStore for PgStore {
    async fn insert(&self, recipe: &Recipe) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO recipes
                (id, name, description, ingredients, instructions, prep_time,
                 cook_time, servings, difficulty, category, nutrition, image_url, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(recipe.id)
        .bind(&recipe.name)
        .bind(&recipe.description)
        .bind(&recipe.ingredients)
        .bind(&recipe.instructions)
        .bind(recipe.prep_time)
        .bind(recipe.cook_time)
        .bind(recipe.servings)
        .bind(recipe.difficulty.as_str())
        .bind(&recipe.category)
        .bind(sqlx::types::Json(&recipe.nutrition))
        .bind(&recipe.image_url)
        .bind(recipe.created_at)
        .execute(&self.db)
        .await?;
        Ok(())
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Recipe>> {
        let recipe = sqlx::query_as::<_, Recipe>(
            r#"
            SELECT id, name, description, ingredients, instructions, prep_time,
                   cook_time, servings, difficulty, category, nutrition, image_url, created_at
            FROM recipes
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(recipe)
    }

    async fn list(&self, filter: &RecipeFilter, limit: i64) -> anyhow::Result<Vec<Recipe>> {
        let rows = sqlx::query_as::<_, Recipe>(
            r#"
            SELECT id, name, description, ingredients, instructions, prep_time,
                   cook_time, servings, difficulty, category, nutrition, image_url, created_at
            FROM recipes
            WHERE ($1::text IS NULL OR category = $1)
              AND ($2::text IS NULL OR difficulty = $2)
            ORDER BY created_at ASC
            LIMIT $3
            "#,
        )
        .bind(filter.category.as_deref())
        .bind(filter.difficulty.map(Difficulty::as_str))
        .bind(limit)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn replace(&self, recipe: &Recipe) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE recipes
            SET name = $2, description = $3, ingredients = $4, instructions = $5,
                prep_time = $6, cook_time = $7, servings = $8, difficulty = $9,
                category = $10, nutrition = $11, image_url = $12, created_at = $13
            WHERE id = $1
            "#,
        )
        .bind(recipe.id)
        .bind(&recipe.name)
        .bind(&recipe.description)
        .bind(&recipe.ingredients)
        .bind(&recipe.instructions)
        .bind(recipe.prep_time)
        .bind(recipe.cook_time)
        .bind(recipe.servings)
        .bind(recipe.difficulty.as_str())
        .bind(&recipe.category)
        .bind(sqlx::types::Json(&recipe.nutrition))
        .bind(&recipe.image_url)
        .bind(recipe.created_at)
        .execute(&self.db)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl RecipeStore for MemoryStore {
    async fn insert(&self, recipe: &Recipe) -> anyhow::Result<()> {
        self.recipes.lock().expect("lock").push(recipe.clone());
        Ok(())
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Recipe>> {
        let recipes = self.recipes.lock().expect("lock");
        Ok(recipes.iter().find(|r| r.id == id).cloned())
    }

    async fn list(&self, filter: &RecipeFilter, limit: i64) -> anyhow::Result<Vec<Recipe>> {
        let recipes = self.recipes.lock().expect("lock");
        Ok(recipes
            .iter()
            .filter(|r| {
                filter.category.as_deref().map_or(true, |c| r.category == c)
                    && filter.difficulty.map_or(true, |d| r.difficulty == d)
            })
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn replace(&self, recipe: &Recipe) -> anyhow::Result<bool> {
        let mut recipes = self.recipes.lock().expect("lock");
        match recipes.iter_mut().find(|r| r.id == recipe.id) {
            Some(slot) => {
                *slot = recipe.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut recipes = self.recipes.lock().expect("lock");
        let before = recipes.len();
        recipes.retain(|r| r.id != id);
        Ok(recipes.len() < before)
    }
}
