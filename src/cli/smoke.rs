use std::time::Instant;

use colored::Colorize;

use crate::client::{AIClient, ChatCompletionRequest, ChatCompletionResponse, LlmClient};
use crate::config::Config;
use crate::error::ConfigError;

const SMOKE_PROMPT: &str = "Reply with exactly: API OK";

/// Result of a smoke test, mapped onto the process exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SmokeOutcome {
    Passed { response: String },
    MissingConfig(Vec<&'static str>),
    CallFailed { error: String },
}

impl SmokeOutcome {
    pub const CONFIG_EXIT_CODE: u8 = 1;
    pub const CALL_EXIT_CODE: u8 = 2;

    pub fn exit_code(&self) -> u8 {
        match self {
            SmokeOutcome::Passed { .. } => 0,
            SmokeOutcome::MissingConfig(_) => Self::CONFIG_EXIT_CODE,
            SmokeOutcome::CallFailed { .. } => Self::CALL_EXIT_CODE,
        }
    }
}

/// Eight stars, then the last four characters of the key.
pub fn mask_api_key(api_key: &str) -> String {
    let chars: Vec<char> = api_key.chars().collect();
    let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
    format!("{}...{tail}", "*".repeat(8))
}

/// One completion call, no retries. Every field must be set, including a
/// non-blank `api_key`.
pub async fn run_smoke(config: &Config) -> Result<SmokeOutcome, ConfigError> {
    let missing = config.llm.missing_fields();
    if !missing.is_empty() {
        println!(
            "{} {}",
            "Missing required config fields:".red().bold(),
            missing.join(", ")
        );
        return Ok(SmokeOutcome::MissingConfig(missing));
    }

    let server = config.llm.server()?;
    let client = AIClient::new(&server, config.llm.timeout()?, &config.llm.user_agent)?;

    println!("{}", "Starting API smoke test...".bold());
    println!("model={}", server.model);
    println!("base_url={}", server.base_url);
    println!("api_key={}", mask_api_key(&server.api_key));

    let request = ChatCompletionRequest {
        temperature: Some(0.0),
        ..ChatCompletionRequest::user_prompt(server.model.clone(), SMOKE_PROMPT)
    };

    let started = Instant::now();
    // a null reply still counts as a working endpoint here
    let result = client
        .chat_completion(request)
        .await
        .and_then(ChatCompletionResponse::first_choice)
        .map(|choice| choice.message.content.unwrap_or_default().trim().to_string());
    let elapsed = started.elapsed().as_secs_f64();

    Ok(match result {
        Ok(response) => {
            println!("{}", format!("API test succeeded in {elapsed:.2}s").green());
            println!("Response: {response}");
            SmokeOutcome::Passed { response }
        }
        Err(err) => {
            println!("{}", format!("API test failed after {elapsed:.2}s").red());
            println!("Error: {err}");
            SmokeOutcome::CallFailed {
                error: err.to_string(),
            }
        }
    })
}
