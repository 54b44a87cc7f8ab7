//! Configuration for paper-relay.
//!
//! Settings come from a flat YAML file (`config.yaml`) and can be overridden
//! through `PAPER_RELAY_*` environment variables. Required LLM fields are
//! checked at the point of use rather than at load time, so a run with
//! translation disabled does not need a model configured.

mod builder;
mod constants;
mod defaults;
mod environment;
mod loader;
mod types;
mod validation;

pub use builder::ConfigBuilder;
pub use constants::PLACEHOLDER_API_KEY;
pub use types::{
    Config, DeliverySettings, LlmServer, LlmSettings, RetrySettings, TranslationSettings,
};
