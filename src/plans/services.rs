use time::OffsetDateTime;
use uuid::Uuid;

use crate::dates;
use crate::error::ApiError;
use crate::state::AppState;

use super::dto::{MealPlanView, UpsertMealPlan};
use super::repo::MealPlan;

/// Replaces the whole day: there is no partial-field merge.
pub async fn upsert(state: &AppState, req: UpsertMealPlan) -> Result<MealPlanView, ApiError> {
    dates::validate(&req.date)?;
    let plan = MealPlan {
        id: Uuid::new_v4(),
        date: req.date,
        breakfast: req.breakfast,
        lunch: req.lunch,
        dinner: req.dinner,
        snacks: req.snacks,
        created_at: OffsetDateTime::now_utc(),
    };
    state.plans.upsert(&plan).await?;
    Ok(plan.into())
}

/// Returns the stored plan, or synthesizes an empty one for the date.
/// Synthesis never writes; a later list call will not include the date.
pub async fn resolve(state: &AppState, date: &str) -> Result<MealPlanView, ApiError> {
    match state.plans.find_by_date(date).await? {
        Some(plan) => Ok(plan.into()),
        None => Ok(MealPlanView::empty(date)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan_for(date: &str, breakfast: Option<Uuid>, snacks: Vec<Uuid>) -> UpsertMealPlan {
        UpsertMealPlan {
            date: date.into(),
            breakfast,
            lunch: None,
            dinner: None,
            snacks,
        }
    }

    #[tokio::test]
    async fn resolve_synthesizes_without_persisting() {
        let state = AppState::fake();

        let first = resolve(&state, "2024-06-01").await.expect("resolve");
        let second = resolve(&state, "2024-06-01").await.expect("resolve");
        assert_eq!(first, second);
        assert_eq!(first, MealPlanView::empty("2024-06-01"));

        let stored = state.plans.list(50).await.expect("list");
        assert!(stored.is_empty());
    }

    #[tokio::test]
    async fn upsert_replaces_the_whole_day() {
        let state = AppState::fake();
        let breakfast = Uuid::new_v4();
        let dinner = Uuid::new_v4();

        upsert(&state, plan_for("2024-06-02", Some(breakfast), vec![]))
            .await
            .expect("upsert");
        let mut second = plan_for("2024-06-02", None, vec![]);
        second.dinner = Some(dinner);
        upsert(&state, second).await.expect("upsert");

        let resolved = resolve(&state, "2024-06-02").await.expect("resolve");
        // No merging: the first payload's breakfast is gone.
        assert_eq!(resolved.breakfast, None);
        assert_eq!(resolved.dinner, Some(dinner));

        let stored = state.plans.list(50).await.expect("list");
        assert_eq!(stored.len(), 1);
    }

    #[tokio::test]
    async fn list_is_sorted_by_date() {
        let state = AppState::fake();
        for date in ["2024-06-03", "2024-06-01", "2024-06-02"] {
            upsert(&state, plan_for(date, None, vec![]))
                .await
                .expect("upsert");
        }
        let stored = state.plans.list(50).await.expect("list");
        let dates: Vec<&str> = stored.iter().map(|p| p.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-06-01", "2024-06-02", "2024-06-03"]);
    }

    #[tokio::test]
    async fn snack_order_is_preserved() {
        let state = AppState::fake();
        let snacks = vec![Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];
        upsert(&state, plan_for("2024-06-04", None, snacks.clone()))
            .await
            .expect("upsert");
        let resolved = resolve(&state, "2024-06-04").await.expect("resolve");
        assert_eq!(resolved.snacks, snacks);
    }

    #[tokio::test]
    async fn upsert_rejects_malformed_dates() {
        let state = AppState::fake();
        let err = upsert(&state, plan_for("not-a-date", None, vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn dangling_recipe_ids_are_surfaced_raw() {
        let state = AppState::fake();
        // Never stored as a recipe; the plan keeps and returns the id as-is.
        let ghost = Uuid::new_v4();
        upsert(&state, plan_for("2024-06-05", Some(ghost), vec![]))
            .await
            .expect("upsert");
        let resolved = resolve(&state, "2024-06-05").await.expect("resolve");
        assert_eq!(resolved.breakfast, Some(ghost));
    }
}
