use std::time::Duration;

use crate::error::ConfigError;

use super::constants::PLACEHOLDER_API_KEY;
use super::types::{LlmServer, LlmSettings, RetrySettings};

impl LlmSettings {
    /// Resolve the server coordinates needed for a completion call.
    ///
    /// `model` and `base_url` must be non-empty. `api_key` must be present;
    /// a blank key is replaced with [`PLACEHOLDER_API_KEY`].
    pub fn server(&self) -> Result<LlmServer, ConfigError> {
        let model = required(&self.model, "model")?;
        let base_url = required(&self.base_url, "base_url")?;
        let api_key = match self.api_key.as_deref() {
            None => return Err(ConfigError::MissingField("api_key")),
            Some(key) if key.trim().is_empty() => PLACEHOLDER_API_KEY.to_string(),
            Some(key) => key.to_string(),
        };

        Ok(LlmServer {
            model,
            base_url,
            api_key,
        })
    }

    /// Fields that are absent or blank, in declaration order. Stricter than
    /// [`LlmSettings::server`]: a blank `api_key` is reported too.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("model", &self.model),
            ("base_url", &self.base_url),
            ("api_key", &self.api_key),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().is_none_or(|v| v.trim().is_empty()))
        .map(|(name, _)| name)
        .collect()
    }

    pub fn timeout(&self) -> Result<Duration, ConfigError> {
        seconds(self.timeout_secs, "llm_timeout_seconds")
    }
}

impl RetrySettings {
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    pub fn base_delay(&self) -> Result<Duration, ConfigError> {
        seconds(self.base_secs, "llm_retry_base_seconds")
    }
}

fn required(value: &Option<String>, field: &'static str) -> Result<String, ConfigError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ConfigError::MissingField(field)),
    }
}

fn seconds(value: f64, field: &'static str) -> Result<Duration, ConfigError> {
    Duration::try_from_secs_f64(value).map_err(|err| ConfigError::InvalidValue {
        field,
        reason: format!("{value} is not a usable number of seconds ({err})"),
    })
}
