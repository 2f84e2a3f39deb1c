use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use time::OffsetDateTime;
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

use super::client::ChatTurn;
use super::repo::ChatMessage;

const COOKING_PROMPT: &str = "You are a helpful cooking assistant and nutritionist. \
    Help users with recipes, cooking techniques, nutrition advice, meal planning, \
    and dietary questions. Always provide practical, actionable advice.";

const ANALYSIS_PROMPT: &str = "You are a professional nutritionist AI. Provide detailed \
    nutrition analysis and actionable recommendations based on user data.";

// User-facing features fail soft; only data-integrity paths fail hard.
const CHAT_FALLBACK: &str = "I'm having trouble responding right now. Please try again later.";
const ANALYSIS_FALLBACK: &str =
    "Unable to analyze nutrition data at the moment. Please try again later.";

const HISTORY_CAP: i64 = 50;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/ai-chat", post(chat))
        .route("/ai-chat/:session_id", get(chat_history))
        .route("/ai-nutrition-analysis", post(nutrition_analysis))
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub session_id: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default)]
    pub nutrition_data: Value,
    #[serde(default)]
    pub goals: Value,
}

#[instrument(skip(state, payload))]
pub async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<Value>, ApiError> {
    match run_chat(&state, &payload).await {
        Ok(response) => Ok(Json(json!({ "response": response }))),
        Err(e) => {
            warn!(error = %e, session_id = %payload.session_id, "assistant chat failed, serving fallback");
            Ok(Json(json!({ "response": CHAT_FALLBACK })))
        }
    }
}

/// Replays the stored session transcript as context, then persists the new
/// exchange. Nothing is persisted when the upstream call fails.
async fn run_chat(state: &AppState, req: &ChatRequest) -> anyhow::Result<String> {
    let history = state.chats.history(&req.session_id, HISTORY_CAP).await?;

    let mut turns = Vec::with_capacity(history.len() * 2 + 2);
    turns.push(ChatTurn::system(COOKING_PROMPT));
    for past in &history {
        turns.push(ChatTurn::user(&past.message));
        turns.push(ChatTurn::assistant(&past.response));
    }
    turns.push(ChatTurn::user(&req.message));

    let response = state.assistant.complete(&turns).await?;

    let record = ChatMessage {
        id: Uuid::new_v4(),
        session_id: req.session_id.clone(),
        message: req.message.clone(),
        response: response.clone(),
        timestamp: OffsetDateTime::now_utc(),
    };
    state.chats.insert(&record).await?;
    Ok(response)
}

#[instrument(skip(state))]
pub async fn chat_history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Vec<ChatMessage>>, ApiError> {
    let history = state.chats.history(&session_id, HISTORY_CAP).await?;
    Ok(Json(history))
}

#[instrument(skip(state, payload))]
pub async fn nutrition_analysis(
    State(state): State<AppState>,
    Json(payload): Json<AnalysisRequest>,
) -> Result<Json<Value>, ApiError> {
    let prompt = format!(
        "Analyze the following nutrition data and provide insights and recommendations:\n\n\
         Daily Totals: {}\n\
         User Goals: {}\n\n\
         Please provide:\n\
         1. Assessment of current nutrition compared to goals\n\
         2. Specific recommendations for improvement\n\
         3. Suggested meal adjustments\n\
         4. Health insights\n\n\
         Keep the response practical and actionable.",
        payload.nutrition_data, payload.goals
    );

    let turns = [ChatTurn::system(ANALYSIS_PROMPT), ChatTurn::user(prompt)];
    match state.assistant.complete(&turns).await {
        Ok(analysis) => Ok(Json(json!({ "analysis": analysis }))),
        Err(e) => {
            warn!(error = %e, "nutrition analysis failed, serving fallback");
            Ok(Json(json!({ "analysis": ANALYSIS_FALLBACK })))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::client::AssistantClient;
    use axum::async_trait;
    use std::sync::Arc;

    struct FailingAssistant;

    #[async_trait]
    impl AssistantClient for FailingAssistant {
        async fn complete(&self, _turns: &[ChatTurn]) -> anyhow::Result<String> {
            anyhow::bail!("upstream unavailable")
        }
    }

    fn chat_request(session: &str, message: &str) -> ChatRequest {
        ChatRequest {
            session_id: session.into(),
            message: message.into(),
        }
    }

    #[tokio::test]
    async fn chat_persists_the_transcript() {
        let state = AppState::fake();
        let reply = chat(
            State(state.clone()),
            Json(chat_request("s-1", "How do I poach an egg?")),
        )
        .await
        .expect("chat")
        .0;
        assert!(reply["response"].as_str().is_some());

        let history = chat_history(State(state), Path("s-1".into()))
            .await
            .expect("history")
            .0;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].message, "How do I poach an egg?");
        assert_eq!(history[0].response, reply["response"].as_str().unwrap());
    }

    #[tokio::test]
    async fn chat_history_is_per_session_and_ordered() {
        let state = AppState::fake();
        for (session, message) in [("a", "first"), ("b", "other"), ("a", "second")] {
            chat(State(state.clone()), Json(chat_request(session, message)))
                .await
                .expect("chat");
        }
        let history = chat_history(State(state), Path("a".into()))
            .await
            .expect("history")
            .0;
        let messages: Vec<&str> = history.iter().map(|m| m.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn chat_fails_soft_and_persists_nothing() {
        let state = AppState::fake_with_assistant(Arc::new(FailingAssistant));
        let reply = chat(State(state.clone()), Json(chat_request("s-2", "hello?")))
            .await
            .expect("chat")
            .0;
        assert_eq!(reply["response"], CHAT_FALLBACK);

        let history = chat_history(State(state), Path("s-2".into()))
            .await
            .expect("history")
            .0;
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn analysis_fails_soft() {
        let state = AppState::fake_with_assistant(Arc::new(FailingAssistant));
        let reply = nutrition_analysis(
            State(state),
            Json(AnalysisRequest {
                nutrition_data: json!({"calories": 640.0}),
                goals: json!({"calories": 2000.0}),
            }),
        )
        .await
        .expect("analysis")
        .0;
        assert_eq!(reply["analysis"], ANALYSIS_FALLBACK);
    }
}
