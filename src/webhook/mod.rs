//! Delivery of paper digests to a Lark/Feishu custom bot webhook.
//!
//! One run produces one `post` (rich text) message. Failures are reported to
//! the caller and never retried here.

use std::time::Duration;

use reqwest::Client;
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{ConfigError, DeliveryError};
use crate::papers::Paper;

const WEBHOOK_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct WebhookPoster {
    http: Client,
    url: String,
    user_agent: String,
}

impl WebhookPoster {
    pub fn new(url: impl Into<String>, user_agent: &str) -> Result<Self, ConfigError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(WEBHOOK_TIMEOUT_SECS))
            .build()
            .map_err(ConfigError::HttpClient)?;

        Ok(Self {
            http,
            url: url.into(),
            user_agent: user_agent.to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let url = config
            .delivery
            .webhook_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::MissingField("webhook_url"))?;
        Self::new(url, &config.llm.user_agent)
    }

    /// Send one message summarising `papers` under `tag`.
    pub async fn post(&self, tag: &str, papers: &[Paper]) -> Result<(), DeliveryError> {
        let payload = build_post_payload(tag, papers);
        debug!(papers = papers.len(), "posting digest to webhook");

        let response = self
            .http
            .post(&self.url)
            .header("User-Agent", &self.user_agent)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DeliveryError::Rejected { status, body });
        }

        info!(tag, papers = papers.len(), "pushed digest to webhook");
        Ok(())
    }
}

/// Build the poster from `config` and send a single digest.
pub async fn post_to_webhook(
    tag: &str,
    papers: &[Paper],
    config: &Config,
) -> Result<(), DeliveryError> {
    WebhookPoster::from_config(config)?.post(tag, papers).await
}

/// Lark `post` message: a title plus one block of lines per paper.
pub fn build_post_payload(tag: &str, papers: &[Paper]) -> Value {
    let mut lines: Vec<Value> = Vec::new();

    if papers.is_empty() {
        lines.push(json!([text("No new papers today.")]));
    }

    for (idx, paper) in papers.iter().enumerate() {
        if idx > 0 {
            lines.push(json!([text("")]));
        }

        lines.push(json!([text(&format!("{}. {}", idx + 1, paper.title()))]));

        if let Some(authors) = &paper.authors {
            lines.push(json!([text(&format!("Authors: {}", authors.display()))]));
        }

        if let Some(link) = paper.link() {
            lines.push(json!([
                text("Link: "),
                { "tag": "a", "text": link, "href": link }
            ]));
        }

        lines.push(json!([text(paper.abstract_text.trim())]));
    }

    json!({
        "msg_type": "post",
        "content": {
            "post": {
                "zh_cn": {
                    "title": format!("[{tag}] {} new papers", papers.len()),
                    "content": lines,
                }
            }
        }
    })
}

fn text(content: &str) -> Value {
    json!({ "tag": "text", "text": content })
}
