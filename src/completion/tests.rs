use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use httpmock::prelude::*;
use serde_json::json;

use crate::client::{ChatCompletionRequest, ChatCompletionResponse, LlmClient};
use crate::config::{Config, PLACEHOLDER_API_KEY};
use crate::error::{CompletionError, ConfigError};

use super::{CompletionCaller, RetryPolicy, Sleeper, get_completion};

/// Replies from a script, then keeps failing once the script runs out.
#[derive(Clone, Default)]
struct ScriptedClient {
    replies: Arc<Mutex<VecDeque<Result<String, ()>>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedClient {
    fn always_failing() -> Self {
        Self::default()
    }

    fn failing_then(failures: usize, reply: &str) -> Self {
        let client = Self::default();
        {
            let mut replies = client.replies.lock().unwrap();
            replies.extend((0..failures).map(|_| Err(())));
            replies.push_back(Ok(reply.to_string()));
        }
        client
    }

    fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmClient for ScriptedClient {
    async fn chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, CompletionError> {
        self.prompts
            .lock()
            .unwrap()
            .push(request.messages[0].content.clone());

        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(content)) => Ok(serde_json::from_value(json!({
                "choices": [{"message": {"role": "assistant", "content": content}}]
            }))
            .unwrap()),
            _ => Err(CompletionError::Timeout),
        }
    }
}

#[derive(Clone, Default)]
struct RecordingSleeper {
    slept: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    fn slept(&self) -> Vec<Duration> {
        self.slept.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.slept.lock().unwrap().push(duration);
    }
}

fn config(max_retries: u32, base_secs: f64) -> Config {
    Config::builder()
        .with_llm(|llm| {
            llm.model = Some("gpt-x".to_string());
            llm.base_url = Some("http://x".to_string());
            llm.api_key = Some(String::new());
        })
        .with_retry(|retry| {
            retry.max_retries = max_retries;
            retry.base_secs = base_secs;
        })
        .build()
}

#[tokio::test]
async fn always_failing_client_uses_every_attempt_with_doubling_sleeps() {
    for max_attempts in 1..=6u32 {
        let client = ScriptedClient::always_failing();
        let sleeper = RecordingSleeper::default();
        let caller = CompletionCaller::new(
            client.clone(),
            "gpt-x",
            RetryPolicy::new(max_attempts, Duration::from_millis(250)),
            sleeper.clone(),
        );

        assert_eq!(caller.complete("prompt").await, None);
        assert_eq!(client.calls(), max_attempts as usize);

        let expected: Vec<Duration> = (0..max_attempts - 1)
            .map(|k| Duration::from_millis(250) * 2u32.pow(k))
            .collect();
        assert_eq!(sleeper.slept(), expected);
    }
}

#[tokio::test]
async fn success_on_third_attempt_stops_retrying() {
    let client = ScriptedClient::failing_then(2, "  translated text \n");
    let sleeper = RecordingSleeper::default();
    let caller = CompletionCaller::new(
        client.clone(),
        "gpt-x",
        RetryPolicy::new(4, Duration::from_secs(1)),
        sleeper.clone(),
    );

    assert_eq!(caller.complete("prompt").await.as_deref(), Some("translated text"));
    assert_eq!(client.calls(), 3);
    assert_eq!(
        sleeper.slept(),
        vec![Duration::from_secs(1), Duration::from_secs(2)]
    );
}

#[tokio::test]
async fn first_attempt_success_never_sleeps() {
    let client = ScriptedClient::failing_then(0, "API OK");
    let sleeper = RecordingSleeper::default();
    let caller = CompletionCaller::with_client(&config(3, 1.0), client.clone(), sleeper.clone())
        .unwrap();

    assert_eq!(caller.complete("Reply with exactly: API OK").await.as_deref(), Some("API OK"));
    assert_eq!(client.calls(), 1);
    assert!(sleeper.slept().is_empty());
}

#[tokio::test]
async fn two_retries_sleep_one_then_two_seconds_then_give_up() {
    let client = ScriptedClient::always_failing();
    let sleeper = RecordingSleeper::default();
    let caller = CompletionCaller::with_client(&config(2, 1.0), client.clone(), sleeper.clone())
        .unwrap();

    assert_eq!(caller.policy().max_attempts(), 3);
    assert_eq!(caller.complete("prompt").await, None);
    assert_eq!(client.calls(), 3);
    assert_eq!(
        sleeper.slept(),
        vec![Duration::from_secs(1), Duration::from_secs(2)]
    );
}

#[test]
fn missing_required_field_fails_before_any_call() {
    let setups: [fn(&mut crate::config::LlmSettings); 3] = [
        |llm| llm.model = None,
        |llm| llm.base_url = None,
        |llm| llm.api_key = None,
    ];

    for clear in setups {
        let client = ScriptedClient::always_failing();
        let mut config = config(3, 1.0);
        clear(&mut config.llm);

        let result =
            CompletionCaller::with_client(&config, client.clone(), RecordingSleeper::default());
        assert!(matches!(result, Err(ConfigError::MissingField(_))));
        assert_eq!(client.calls(), 0);
    }
}

#[test]
fn delay_for_doubles_from_base() {
    let policy = RetryPolicy::new(5, Duration::from_millis(1500));
    assert_eq!(policy.delay_for(0), Duration::from_millis(1500));
    assert_eq!(policy.delay_for(1), Duration::from_millis(3000));
    assert_eq!(policy.delay_for(3), Duration::from_millis(12000));
    assert_eq!(policy.delay_for(40), Duration::MAX);
}

#[test]
fn zero_attempts_is_raised_to_one() {
    assert_eq!(RetryPolicy::new(0, Duration::ZERO).max_attempts(), 1);
}

#[tokio::test]
async fn get_completion_sends_placeholder_key_when_api_key_is_blank() {
    let server = MockServer::start_async().await;
    let expected_auth = format!("Bearer {PLACEHOLDER_API_KEY}");

    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .header("Authorization", expected_auth.as_str());
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({
                    "choices": [{"message": {"role": "assistant", "content": " API OK "}}]
                }));
        })
        .await;

    let mut config = config(0, 0.0);
    config.llm.base_url = Some(server.base_url());

    let reply = get_completion("Reply with exactly: API OK", &config)
        .await
        .unwrap();
    assert_eq!(reply.as_deref(), Some("API OK"));

    mock.assert_async().await;
}

#[tokio::test]
async fn get_completion_retries_server_errors_then_returns_none() {
    let server = MockServer::start_async().await;

    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(500).body("boom");
        })
        .await;

    let mut config = config(2, 0.0);
    config.llm.base_url = Some(server.base_url());

    let reply = get_completion("prompt", &config).await.unwrap();
    assert_eq!(reply, None);

    mock.assert_hits_async(3).await;
}

#[tokio::test]
async fn get_completion_reports_missing_model() {
    let mut config = config(0, 0.0);
    config.llm.model = Some(String::new());

    let err = get_completion("prompt", &config).await.unwrap_err();
    assert_eq!(err.to_string(), "Missing field `model` in the configuration");
}

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl std::io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn each_failure_is_logged_with_attempt_error_and_wait() {
    let logs = LogBuffer::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let caller = CompletionCaller::new(
        ScriptedClient::always_failing(),
        "gpt-x",
        RetryPolicy::new(3, Duration::from_secs(1)),
        RecordingSleeper::default(),
    );
    assert_eq!(caller.complete("prompt").await, None);

    let output = logs.contents();
    assert!(output.contains("attempt 1/3"), "{output}");
    assert!(output.contains("attempt 2/3"), "{output}");
    assert!(!output.contains("attempt 3/3"), "{output}");
    assert!(output.contains("Retrying in 1.0s"), "{output}");
    assert!(output.contains("Retrying in 2.0s"), "{output}");
    assert!(output.contains("Request timed out"), "{output}");
    assert!(output.contains("LLM server error"), "{output}");
    assert_eq!(output.matches("WARN").count(), 2, "{output}");
    assert_eq!(output.matches("ERROR").count(), 1, "{output}");
}
