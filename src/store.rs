use std::sync::Mutex;

use sqlx::PgPool;

use crate::assistant::repo::ChatMessage;
use crate::nutrition::repo::NutritionLog;
use crate::plans::repo::MealPlan;
use crate::recipes::repo::Recipe;

/// Postgres-backed document store. The store trait impls for each record
/// type live next to their models in the module `repo` files.
#[derive(Clone)]
pub struct PgStore {
    pub db: PgPool,
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

/// In-memory store backing `AppState::fake()`. Vec order doubles as the
/// insertion order the contracts promise.
#[derive(Default)]
pub struct MemoryStore {
    pub(crate) recipes: Mutex<Vec<Recipe>>,
    pub(crate) plans: Mutex<Vec<MealPlan>>,
    pub(crate) logs: Mutex<Vec<NutritionLog>>,
    pub(crate) chats: Mutex<Vec<ChatMessage>>,
}
