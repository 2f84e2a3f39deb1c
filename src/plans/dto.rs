use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::plans::repo::MealPlan;

#[derive(Debug, Deserialize)]
pub struct UpsertMealPlan {
    pub date: String,
    pub breakfast: Option<Uuid>,
    pub lunch: Option<Uuid>,
    pub dinner: Option<Uuid>,
    #[serde(default)]
    pub snacks: Vec<Uuid>,
}

/// What clients see when a plan is resolved or listed. Deliberately keyed by
/// date only: a synthesized plan carries no storage identity, so two
/// resolutions of the same empty date compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MealPlanView {
    pub date: String,
    pub breakfast: Option<Uuid>,
    pub lunch: Option<Uuid>,
    pub dinner: Option<Uuid>,
    pub snacks: Vec<Uuid>,
}

impl MealPlanView {
    pub fn empty(date: &str) -> Self {
        Self {
            date: date.to_string(),
            breakfast: None,
            lunch: None,
            dinner: None,
            snacks: Vec::new(),
        }
    }
}

impl From<MealPlan> for MealPlanView {
    fn from(plan: MealPlan) -> Self {
        Self {
            date: plan.date,
            breakfast: plan.breakfast,
            lunch: plan.lunch,
            dinner: plan.dinner,
            snacks: plan.snacks,
        }
    }
}
