use super::types::{Config, DeliverySettings, LlmSettings, RetrySettings, TranslationSettings};

#[derive(Debug)]
pub struct ConfigBuilder {
    pub(super) llm: LlmSettings,
    pub(super) retry: RetrySettings,
    pub(super) translation: TranslationSettings,
    pub(super) delivery: DeliverySettings,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            llm: LlmSettings::default(),
            retry: RetrySettings::default(),
            translation: TranslationSettings::default(),
            delivery: DeliverySettings::default(),
        }
    }

    pub fn with_llm<F>(mut self, update: F) -> Self
    where
        F: FnOnce(&mut LlmSettings),
    {
        update(&mut self.llm);
        self
    }

    pub fn with_retry<F>(mut self, update: F) -> Self
    where
        F: FnOnce(&mut RetrySettings),
    {
        update(&mut self.retry);
        self
    }

    pub fn with_translation<F>(mut self, update: F) -> Self
    where
        F: FnOnce(&mut TranslationSettings),
    {
        update(&mut self.translation);
        self
    }

    pub fn with_delivery<F>(mut self, update: F) -> Self
    where
        F: FnOnce(&mut DeliverySettings),
    {
        update(&mut self.delivery);
        self
    }

    pub fn build(self) -> Config {
        Config {
            llm: self.llm,
            retry: self.retry,
            translation: self.translation,
            delivery: self.delivery,
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
