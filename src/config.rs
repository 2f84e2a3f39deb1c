use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AssistantConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub assistant: AssistantConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let assistant = AssistantConfig {
            base_url: std::env::var("ASSISTANT_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".into()),
            api_key: std::env::var("ASSISTANT_API_KEY").unwrap_or_default(),
            model: std::env::var("ASSISTANT_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into()),
        };
        if assistant.api_key.is_empty() {
            tracing::warn!("ASSISTANT_API_KEY is not set; assistant requests will fail soft");
        }
        Ok(Self {
            database_url,
            assistant,
        })
    }
}
