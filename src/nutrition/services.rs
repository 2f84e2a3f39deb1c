use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use crate::dates;
use crate::error::ApiError;
use crate::recipes::repo::NutritionProfile;
use crate::state::AppState;

use super::dto::{CreateNutritionLog, DailySummary, NutritionTotals};
use super::repo::NutritionLog;

/// Read cap per day. Aggregation recomputes from raw logs on every call, so
/// days with more rows than this are truncated at read time.
pub const DAILY_LOG_CAP: i64 = 50;

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Scales a per-serving profile by a serving count. No rounding here: the
/// stored per-log values stay exact, only display totals get rounded.
pub fn scale_profile(profile: &NutritionProfile, servings: f64) -> NutritionTotals {
    NutritionTotals {
        calories: profile.calories * servings,
        protein: profile.protein * servings,
        carbs: profile.carbs * servings,
        fats: profile.fats * servings,
    }
}

pub fn sum_logs(logs: &[NutritionLog]) -> NutritionTotals {
    let raw = logs.iter().fold(NutritionTotals::default(), |acc, log| {
        NutritionTotals {
            calories: acc.calories + log.calories,
            protein: acc.protein + log.protein,
            carbs: acc.carbs + log.carbs,
            fats: acc.fats + log.fats,
        }
    });
    NutritionTotals {
        calories: round2(raw.calories),
        protein: round2(raw.protein),
        carbs: round2(raw.carbs),
        fats: round2(raw.fats),
    }
}

/// Writes one nutrition log. The recipe's profile is read once and the
/// scaled values are frozen into the row; a concurrent recipe delete after
/// the read is tolerated because the snapshot already taken is what counts.
pub async fn log_meal(
    state: &AppState,
    req: CreateNutritionLog,
) -> Result<NutritionLog, ApiError> {
    if !req.servings.is_finite() || req.servings <= 0.0 {
        return Err(ApiError::Validation(
            "servings must be a positive number".into(),
        ));
    }
    dates::validate(&req.date)?;

    let recipe = state
        .recipes
        .get(req.recipe_id)
        .await?
        .ok_or(ApiError::NotFound("recipe"))?;

    let totals = scale_profile(&recipe.nutrition, req.servings);
    let log = NutritionLog {
        id: Uuid::new_v4(),
        date: req.date,
        meal_type: req.meal_type,
        recipe_id: req.recipe_id,
        servings: req.servings,
        calories: totals.calories,
        protein: totals.protein,
        carbs: totals.carbs,
        fats: totals.fats,
        logged_at: OffsetDateTime::now_utc(),
    };
    state.logs.insert(&log).await?;
    info!(log_id = %log.id, recipe_id = %log.recipe_id, date = %log.date, "meal logged");
    Ok(log)
}

/// Recomputes the day's totals from raw logs on every call. An empty day is
/// a valid result, not an error.
pub async fn daily_summary(state: &AppState, date: String) -> Result<DailySummary, ApiError> {
    let logs = state.logs.list_by_date(&date, DAILY_LOG_CAP).await?;
    let totals = sum_logs(&logs);
    Ok(DailySummary { date, logs, totals })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrition::repo::MealType;
    use crate::recipes::repo::{Difficulty, Recipe};

    fn recipe_with(nutrition: NutritionProfile) -> Recipe {
        Recipe {
            id: Uuid::new_v4(),
            name: "Quinoa Power Bowl".into(),
            description: "Bowl".into(),
            ingredients: vec!["quinoa".into()],
            instructions: vec!["cook".into()],
            prep_time: 15,
            cook_time: 20,
            servings: 2,
            difficulty: Difficulty::Easy,
            category: "Lunch".into(),
            nutrition,
            image_url: None,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    fn log_request(recipe_id: Uuid, date: &str, servings: f64) -> CreateNutritionLog {
        CreateNutritionLog {
            date: date.into(),
            meal_type: MealType::Lunch,
            recipe_id,
            servings,
        }
    }

    #[test]
    fn scaling_multiplies_each_key() {
        let profile = NutritionProfile {
            calories: 320.0,
            protein: 12.0,
            carbs: 45.0,
            fats: 10.0,
        };
        let totals = scale_profile(&profile, 2.0);
        assert_eq!(totals.calories, 640.0);
        assert_eq!(totals.protein, 24.0);
        assert_eq!(totals.carbs, 90.0);
        assert_eq!(totals.fats, 20.0);

        let half = scale_profile(&profile, 0.5);
        assert_eq!(half.calories, 160.0);
    }

    #[test]
    fn rounding_applies_to_two_decimals() {
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(1.236), 1.24);
        assert_eq!(round2(300.0), 300.0);
    }

    #[tokio::test]
    async fn logged_totals_are_a_frozen_snapshot() {
        let state = AppState::fake();
        let recipe = recipe_with(NutritionProfile {
            calories: 320.0,
            protein: 12.0,
            carbs: 45.0,
            fats: 10.0,
        });
        state.recipes.insert(&recipe).await.expect("insert");

        let log = log_meal(&state, log_request(recipe.id, "2024-01-01", 2.0))
            .await
            .expect("log");
        assert_eq!(log.calories, 640.0);
        assert_eq!(log.servings, 2.0);

        // Editing the recipe afterwards must not rewrite the row.
        let mut edited = recipe.clone();
        edited.nutrition.calories = 1000.0;
        state.recipes.replace(&edited).await.expect("replace");

        let summary = daily_summary(&state, "2024-01-01".into())
            .await
            .expect("summary");
        assert_eq!(summary.totals.calories, 640.0);
        assert_eq!(summary.totals.protein, 24.0);
        assert_eq!(summary.totals.carbs, 90.0);
        assert_eq!(summary.totals.fats, 20.0);
    }

    #[tokio::test]
    async fn missing_recipe_writes_nothing() {
        let state = AppState::fake();
        let err = log_meal(&state, log_request(Uuid::new_v4(), "2024-01-02", 1.0))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));

        let summary = daily_summary(&state, "2024-01-02".into())
            .await
            .expect("summary");
        assert!(summary.logs.is_empty());
    }

    #[tokio::test]
    async fn non_positive_servings_are_rejected_before_any_write() {
        let state = AppState::fake();
        let recipe = recipe_with(NutritionProfile {
            calories: 200.0,
            protein: 5.0,
            carbs: 20.0,
            fats: 8.0,
        });
        state.recipes.insert(&recipe).await.expect("insert");

        for servings in [0.0, -1.5, f64::NAN, f64::INFINITY] {
            let err = log_meal(&state, log_request(recipe.id, "2024-01-03", servings))
                .await
                .unwrap_err();
            assert!(matches!(err, ApiError::Validation(_)));
        }

        let summary = daily_summary(&state, "2024-01-03".into())
            .await
            .expect("summary");
        assert!(summary.logs.is_empty());
    }

    #[tokio::test]
    async fn malformed_dates_are_rejected() {
        let state = AppState::fake();
        let recipe = recipe_with(NutritionProfile {
            calories: 200.0,
            protein: 5.0,
            carbs: 20.0,
            fats: 8.0,
        });
        state.recipes.insert(&recipe).await.expect("insert");

        let err = log_meal(&state, log_request(recipe.id, "01/03/2024", 1.0))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn empty_day_totals_are_zero() {
        let state = AppState::fake();
        let summary = daily_summary(&state, "2024-01-04".into())
            .await
            .expect("summary");
        assert!(summary.logs.is_empty());
        assert_eq!(summary.totals, NutritionTotals::default());
    }

    #[tokio::test]
    async fn fractional_servings_sum_across_logs() {
        let state = AppState::fake();
        let recipe = recipe_with(NutritionProfile {
            calories: 200.0,
            protein: 5.0,
            carbs: 20.0,
            fats: 8.0,
        });
        state.recipes.insert(&recipe).await.expect("insert");

        log_meal(&state, log_request(recipe.id, "2024-01-05", 1.0))
            .await
            .expect("log");
        log_meal(&state, log_request(recipe.id, "2024-01-05", 0.5))
            .await
            .expect("log");

        let summary = daily_summary(&state, "2024-01-05".into())
            .await
            .expect("summary");
        assert_eq!(summary.logs.len(), 2);
        assert_eq!(summary.totals.calories, 300.0);
        assert_eq!(summary.totals.protein, 7.5);
    }

    #[tokio::test]
    async fn reads_are_capped_per_day() {
        let state = AppState::fake();
        let recipe = recipe_with(NutritionProfile {
            calories: 100.0,
            protein: 1.0,
            carbs: 1.0,
            fats: 1.0,
        });
        state.recipes.insert(&recipe).await.expect("insert");

        // One over the cap; summaries see exactly DAILY_LOG_CAP rows.
        for _ in 0..(DAILY_LOG_CAP + 1) {
            let totals = scale_profile(&recipe.nutrition, 1.0);
            let log = NutritionLog {
                id: Uuid::new_v4(),
                date: "2024-01-06".into(),
                meal_type: MealType::Snack,
                recipe_id: recipe.id,
                servings: 1.0,
                calories: totals.calories,
                protein: totals.protein,
                carbs: totals.carbs,
                fats: totals.fats,
                logged_at: OffsetDateTime::now_utc(),
            };
            state.logs.insert(&log).await.expect("insert");
        }

        let summary = daily_summary(&state, "2024-01-06".into())
            .await
            .expect("summary");
        assert_eq!(summary.logs.len(), DAILY_LOG_CAP as usize);
        assert_eq!(summary.totals.calories, 100.0 * DAILY_LOG_CAP as f64);
    }
}
