use super::constants::*;
use super::types::{DeliverySettings, LlmSettings, RetrySettings, TranslationSettings};

pub fn default_user_agent() -> String {
    format!("paper-relay/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            model: None,
            base_url: None,
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: default_user_agent(),
        }
    }
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_secs: DEFAULT_RETRY_BASE_SECS,
        }
    }
}

impl Default for TranslationSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            language: DEFAULT_TRANSLATION_LANGUAGE.to_string(),
        }
    }
}

impl Default for DeliverySettings {
    fn default() -> Self {
        Self {
            webhook_url: None,
            tag: DEFAULT_TAG.to_string(),
        }
    }
}
