use serde::{Deserialize, Deserializer};

/// Settings for one run. Built once at startup and only read afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    pub llm: LlmSettings,
    pub retry: RetrySettings,
    pub translation: TranslationSettings,
    pub delivery: DeliverySettings,
}

/// Connection settings for the chat-completion server.
///
/// `model` and `base_url` stay optional here: they are only required once an
/// LLM call is about to happen, see [`LlmSettings::server`].
#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub model: Option<String>,
    pub base_url: Option<String>,
    /// `None` when the key is absent; `Some("")` when present but blank.
    pub api_key: Option<String>,
    pub timeout_secs: f64,
    pub user_agent: String,
}

#[derive(Debug, Clone)]
pub struct RetrySettings {
    pub max_retries: u32,
    pub base_secs: f64,
}

#[derive(Debug, Clone)]
pub struct TranslationSettings {
    pub enabled: bool,
    pub language: String,
}

#[derive(Debug, Clone)]
pub struct DeliverySettings {
    pub webhook_url: Option<String>,
    pub tag: String,
}

/// Validated server coordinates, ready to hand to an HTTP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmServer {
    pub model: String,
    pub base_url: String,
    pub api_key: String,
}

// File configuration, flat keys as written in config.yaml
#[derive(Debug, Default, Deserialize)]
pub(super) struct FileConfig {
    pub model: Option<String>,
    pub base_url: Option<String>,
    #[serde(default, deserialize_with = "present_string")]
    pub api_key: Option<String>,
    pub tag: Option<String>,
    pub use_llm_for_translation: Option<bool>,
    pub translation_language: Option<String>,
    pub llm_timeout_seconds: Option<f64>,
    pub llm_max_retries: Option<u32>,
    pub llm_retry_base_seconds: Option<f64>,
    pub webhook_url: Option<String>,
}

// A key written as `api_key:` with no value still counts as present.
fn present_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|value| Some(value.unwrap_or_default()))
}
