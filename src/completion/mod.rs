//! Single-prompt completions with bounded retries.
//!
//! [`CompletionCaller`] wraps an [`LlmClient`] and retries failed attempts with
//! pure exponential backoff: attempt `k` (0-based) that fails is followed by a
//! sleep of `base * 2^k`. Once every attempt has failed the caller yields
//! `None` instead of an error, so a missing result has to be handled where it
//! is used.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{error, warn};

use crate::client::{AIClient, ChatCompletionRequest, ChatCompletionResponse, LlmClient};
use crate::config::{Config, RetrySettings};
use crate::error::ConfigError;

#[cfg(test)]
mod tests;

/// Where the backoff delay is spent. Tests swap in a recorder.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
}

impl RetryPolicy {
    /// `max_attempts` of zero is raised to one.
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    pub fn from_settings(settings: &RetrySettings) -> Result<Self, ConfigError> {
        Ok(Self::new(settings.max_attempts(), settings.base_delay()?))
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay after the failed attempt `attempt` (0-based): `base * 2^attempt`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        2u32.checked_pow(attempt).map_or(Duration::MAX, |factor| {
            self.base_delay.saturating_mul(factor)
        })
    }
}

pub struct CompletionCaller<C, S = TokioSleeper> {
    client: C,
    model: String,
    policy: RetryPolicy,
    sleeper: S,
}

impl CompletionCaller<AIClient, TokioSleeper> {
    /// Build a caller backed by the HTTP client.
    ///
    /// Fails with a [`ConfigError`] before any request is made when `model`,
    /// `base_url` or `api_key` is missing, or a duration is unusable.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let server = config.llm.server()?;
        let policy = RetryPolicy::from_settings(&config.retry)?;
        let client = AIClient::new(&server, config.llm.timeout()?, &config.llm.user_agent)?;
        Ok(Self::new(client, server.model, policy, TokioSleeper))
    }
}

impl<C, S> CompletionCaller<C, S>
where
    C: LlmClient,
    S: Sleeper,
{
    pub fn new(client: C, model: impl Into<String>, policy: RetryPolicy, sleeper: S) -> Self {
        Self {
            client,
            model: model.into(),
            policy,
            sleeper,
        }
    }

    /// Same validation as [`CompletionCaller::from_config`], with a caller
    /// supplied client and sleeper.
    pub fn with_client(config: &Config, client: C, sleeper: S) -> Result<Self, ConfigError> {
        let server = config.llm.server()?;
        let policy = RetryPolicy::from_settings(&config.retry)?;
        Ok(Self::new(client, server.model, policy, sleeper))
    }

    #[cfg(test)]
    pub(crate) fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Ask for one completion of `prompt`.
    ///
    /// Returns the trimmed reply, or `None` once every attempt has failed.
    pub async fn complete(&self, prompt: &str) -> Option<String> {
        let max_attempts = self.policy.max_attempts();

        for attempt in 0..max_attempts {
            let request = ChatCompletionRequest::user_prompt(self.model.clone(), prompt);
            let outcome = self
                .client
                .chat_completion(request)
                .await
                .and_then(ChatCompletionResponse::into_text);

            let err = match outcome {
                Ok(text) => return Some(text),
                Err(err) => err,
            };

            if attempt + 1 == max_attempts {
                error!(attempts = max_attempts, "LLM server error: {err}");
                return None;
            }

            let wait = self.policy.delay_for(attempt);
            warn!(
                attempt = attempt + 1,
                max_attempts,
                wait_secs = wait.as_secs_f64(),
                "LLM request failed (attempt {}/{}): {}. Retrying in {:.1}s...",
                attempt + 1,
                max_attempts,
                err,
                wait.as_secs_f64()
            );
            self.sleeper.sleep(wait).await;
        }

        None
    }
}

/// Validate `config`, then run one retried completion for `prompt`.
pub async fn get_completion(
    prompt: &str,
    config: &Config,
) -> Result<Option<String>, ConfigError> {
    let caller = CompletionCaller::from_config(config)?;
    Ok(caller.complete(prompt).await)
}
