use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ConfigError;

use super::builder::ConfigBuilder;
use super::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};
use super::environment::{ENV_CONFIG_PATH, apply_env_overrides, env_string};
use super::types::FileConfig;
use super::Config;

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Pick the config file to read.
    ///
    /// An explicit path (flag, then `PAPER_RELAY_CONFIG`) is always returned,
    /// existing or not. Otherwise `./config.yaml` and then the per-user config
    /// directory are tried; `None` means no file was found.
    pub fn resolve_path(explicit: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
        if let Some(path) = explicit {
            return Ok(Some(path.to_path_buf()));
        }
        if let Some(path) = env_string(ENV_CONFIG_PATH)? {
            return Ok(Some(PathBuf::from(path)));
        }

        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.exists() {
            return Ok(Some(local));
        }

        Ok(dirs::config_dir()
            .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            .filter(|path| path.exists()))
    }

    /// File layer first, then environment overrides.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::new();

        match Self::resolve_path(explicit)? {
            Some(path) => {
                debug!(path = %path.display(), "loading configuration");
                builder = Self::apply_file(builder, &path)?;
            }
            None => debug!("no configuration file found, using environment only"),
        }

        let builder = apply_env_overrides(builder)?;
        Ok(builder.build())
    }

    #[cfg(test)]
    pub(crate) fn from_yaml_str(contents: &str) -> Result<Self, serde_yaml::Error> {
        let raw = parse_yaml(contents)?;
        Ok(raw.apply(ConfigBuilder::new()).build())
    }

    fn apply_file(builder: ConfigBuilder, path: &Path) -> Result<ConfigBuilder, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let raw = parse_yaml(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(raw.apply(builder))
    }
}

fn parse_yaml(contents: &str) -> Result<FileConfig, serde_yaml::Error> {
    if contents.trim().is_empty() {
        return Ok(FileConfig::default());
    }
    serde_yaml::from_str(contents)
}

impl FileConfig {
    pub fn apply(self, builder: ConfigBuilder) -> ConfigBuilder {
        builder
            .with_llm(|llm| {
                if self.model.is_some() {
                    llm.model = self.model;
                }
                if self.base_url.is_some() {
                    llm.base_url = self.base_url;
                }
                if self.api_key.is_some() {
                    llm.api_key = self.api_key;
                }
                if let Some(timeout) = self.llm_timeout_seconds {
                    llm.timeout_secs = timeout;
                }
            })
            .with_retry(|retry| {
                if let Some(max_retries) = self.llm_max_retries {
                    retry.max_retries = max_retries;
                }
                if let Some(base) = self.llm_retry_base_seconds {
                    retry.base_secs = base;
                }
            })
            .with_translation(|translation| {
                if let Some(enabled) = self.use_llm_for_translation {
                    translation.enabled = enabled;
                }
                if let Some(language) = self.translation_language {
                    translation.language = language;
                }
            })
            .with_delivery(|delivery| {
                if self.webhook_url.is_some() {
                    delivery.webhook_url = self.webhook_url;
                }
                if let Some(tag) = self.tag {
                    delivery.tag = tag;
                }
            })
    }
}
