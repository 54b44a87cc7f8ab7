use std::env;

use crate::error::ConfigError;

use super::builder::ConfigBuilder;

pub const ENV_CONFIG_PATH: &str = "PAPER_RELAY_CONFIG";

pub fn apply_env_overrides(mut builder: ConfigBuilder) -> Result<ConfigBuilder, ConfigError> {
    if let Some(model) = env_string("PAPER_RELAY_MODEL")? {
        builder = builder.with_llm(|llm| llm.model = Some(model));
    }

    if let Some(base_url) = env_string("PAPER_RELAY_BASE_URL")? {
        builder = builder.with_llm(|llm| llm.base_url = Some(base_url));
    }

    if let Some(api_key) = env_string("PAPER_RELAY_API_KEY")? {
        builder = builder.with_llm(|llm| llm.api_key = Some(api_key));
    }

    if let Some(webhook_url) = env_string("PAPER_RELAY_WEBHOOK_URL")? {
        builder = builder.with_delivery(|delivery| delivery.webhook_url = Some(webhook_url));
    }

    if let Some(tag) = env_string("PAPER_RELAY_TAG")? {
        builder = builder.with_delivery(|delivery| delivery.tag = tag);
    }

    Ok(builder)
}

pub fn env_string(key: &'static str) -> Result<Option<String>, ConfigError> {
    match env::var(key) {
        Ok(val) => Ok(Some(val)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode(key)),
    }
}
