//! Paper records as read from the input JSON file.

mod translate;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use translate::{build_translation_prompt, translate_abstracts, translate_with_config};

/// One paper. Fields other than the ones named here are carried through
/// untouched in `extra`, under their original keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paper {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<Authors>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Paper {
    pub fn title(&self) -> &str {
        self.title.as_deref().map(str::trim).unwrap_or_default()
    }

    /// `link`, falling back to a string `url` field.
    pub fn link(&self) -> Option<&str> {
        self.link
            .as_deref()
            .or_else(|| self.extra.get("url").and_then(Value::as_str))
            .filter(|link| !link.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Authors {
    List(Vec<String>),
    Joined(String),
}

impl Authors {
    pub fn display(&self) -> String {
        match self {
            Authors::List(names) => names.join(", "),
            Authors::Joined(names) => names.clone(),
        }
    }
}

pub fn load_papers(path: &Path) -> Result<Vec<Paper>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed reading papers from {}", path.display()))?;
    let papers: Vec<Paper> = serde_json::from_str(&contents)
        .with_context(|| format!("Failed parsing paper list JSON at {}", path.display()))?;
    Ok(papers)
}
