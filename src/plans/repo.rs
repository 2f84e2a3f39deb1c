use axum::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::store::{MemoryStore, PgStore};

/// One plan per calendar date. Slot values are plain recipe ids; nothing
/// checks that they still resolve to a stored recipe.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MealPlan {
    pub id: Uuid,
    pub date: String,
    pub breakfast: Option<Uuid>,
    pub lunch: Option<Uuid>,
    pub dinner: Option<Uuid>,
    pub snacks: Vec<Uuid>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[async_trait]
pub trait MealPlanStore: Send + Sync {
    /// Replaces any record with the same date in full. Last write wins on
    /// concurrent upserts for one date.
    async fn upsert(&self, plan: &MealPlan) -> anyhow::Result<()>;
    /// Ascending by date, bounded by `limit`.
    async fn list(&self, limit: i64) -> anyhow::Result<Vec<MealPlan>>;
    async fn find_by_date(&self, date: &str) -> anyhow::Result<Option<MealPlan>>;
}

#[async_trait]
impl MealPlanStore for PgStore {
    async fn upsert(&self, plan: &MealPlan) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO meal_plans (id, date, breakfast, lunch, dinner, snacks, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (date) DO UPDATE
            SET breakfast = EXCLUDED.breakfast,
                lunch = EXCLUDED.lunch,
                dinner = EXCLUDED.dinner,
                snacks = EXCLUDED.snacks
            "#,
        )
        .bind(plan.id)
        .bind(&plan.date)
        .bind(plan.breakfast)
        .bind(plan.lunch)
        .bind(plan.dinner)
        .bind(&plan.snacks)
        .bind(plan.created_at)
        .execute(&self.db)
        .await?;
        Ok(())
    }

    async fn list(&self, limit: i64) -> anyhow::Result<Vec<MealPlan>> {
        let rows = sqlx::query_as::<_, MealPlan>(
            r#"
            SELECT id, date, breakfast, lunch, dinner, snacks, created_at
            FROM meal_plans
            ORDER BY date ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn find_by_date(&self, date: &str) -> anyhow::Result<Option<MealPlan>> {
        let plan = sqlx::query_as::<_, MealPlan>(
            r#"
            SELECT id, date, breakfast, lunch, dinner, snacks, created_at
            FROM meal_plans
            WHERE date = $1
            "#,
        )
        .bind(date)
        .fetch_optional(&self.db)
        .await?;
        Ok(plan)
    }
}

#[async_trait]
impl MealPlanStore for MemoryStore {
    async fn upsert(&self, plan: &MealPlan) -> anyhow::Result<()> {
        let mut plans = self.plans.lock().expect("lock");
        match plans.iter_mut().find(|p| p.date == plan.date) {
            Some(slot) => {
                // Keep the stored identity, replace the day's content.
                slot.breakfast = plan.breakfast;
                slot.lunch = plan.lunch;
                slot.dinner = plan.dinner;
                slot.snacks = plan.snacks.clone();
            }
            None => plans.push(plan.clone()),
        }
        Ok(())
    }

    async fn list(&self, limit: i64) -> anyhow::Result<Vec<MealPlan>> {
        let plans = self.plans.lock().expect("lock");
        let mut rows: Vec<MealPlan> = plans.iter().cloned().collect();
        rows.sort_by(|a, b| a.date.cmp(&b.date));
        rows.truncate(limit as usize);
        Ok(rows)
    }

    async fn find_by_date(&self, date: &str) -> anyhow::Result<Option<MealPlan>> {
        let plans = self.plans.lock().expect("lock");
        Ok(plans.iter().find(|p| p.date == date).cloned())
    }
}
