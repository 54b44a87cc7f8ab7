pub const DEFAULT_TIMEOUT_SECS: f64 = 30.0;
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_BASE_SECS: f64 = 1.0;
pub const DEFAULT_TRANSLATION_LANGUAGE: &str = "Chinese";
pub const DEFAULT_TAG: &str = "papers";

/// Stand-in key for servers that accept any bearer token (e.g. a local ollama).
pub const PLACEHOLDER_API_KEY: &str = "ollama";

pub const CONFIG_FILE_NAME: &str = "config.yaml";
pub const CONFIG_DIR_NAME: &str = "paper-relay";
