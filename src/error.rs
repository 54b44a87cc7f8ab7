use std::path::PathBuf;

use thiserror::Error;

/// Problems with the settings themselves. Never retried.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing field `{0}` in the configuration")]
    MissingField(&'static str),

    #[error("Invalid value for `{field}`: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("Failed reading config at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed parsing YAML config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("{0} contains invalid UTF-8")]
    NotUnicode(&'static str),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// A single completion attempt failed. The retrying caller absorbs these.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("Request timed out")]
    Timeout,

    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("API error (status {status}): {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("Completion returned no content")]
    EmptyResponse,
}

impl From<reqwest::Error> for CompletionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CompletionError::Timeout
        } else if err.is_decode() {
            CompletionError::InvalidResponse(err.to_string())
        } else {
            CompletionError::Network(err)
        }
    }
}

/// The webhook push did not go through.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("Failed to send webhook request: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Webhook rejected the message (status {status}): {body}")]
    Rejected {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
