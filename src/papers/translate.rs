use tracing::{info, warn};

use crate::client::LlmClient;
use crate::completion::{CompletionCaller, Sleeper};
use crate::config::Config;
use crate::error::ConfigError;

use super::Paper;

pub fn build_translation_prompt(abstract_text: &str, language: &str) -> String {
    format!(
        "Translate the following academic paper abstract into {language}. \
Keep technical terms, model names and acronyms accurate. \
Reply with the translation only, without any preamble or notes.\n\n{}",
        abstract_text.trim()
    )
}

/// Replace each abstract with its translation, one paper at a time.
///
/// A paper whose translation comes back empty or not at all keeps its
/// original abstract; the rest of the batch is unaffected.
pub async fn translate_abstracts<C, S>(
    mut papers: Vec<Paper>,
    caller: &CompletionCaller<C, S>,
    language: &str,
) -> Vec<Paper>
where
    C: LlmClient,
    S: Sleeper,
{
    let total = papers.len();

    for (idx, paper) in papers.iter_mut().enumerate() {
        if paper.abstract_text.trim().is_empty() {
            continue;
        }

        let prompt = build_translation_prompt(&paper.abstract_text, language);
        // An empty reply is treated like no reply: the original text is kept.
        match caller.complete(&prompt).await {
            Some(translated) if !translated.is_empty() => {
                info!(paper = idx + 1, total, "translated abstract");
                paper.abstract_text = translated;
            }
            _ => warn!(
                paper = idx + 1,
                total,
                title = paper.title(),
                "translation unavailable, keeping original abstract"
            ),
        }
    }

    papers
}

/// [`translate_abstracts`] with an HTTP-backed caller built from `config`.
pub async fn translate_with_config(
    papers: Vec<Paper>,
    config: &Config,
) -> Result<Vec<Paper>, ConfigError> {
    let caller = CompletionCaller::from_config(config)?;
    Ok(translate_abstracts(papers, &caller, &config.translation.language).await)
}
