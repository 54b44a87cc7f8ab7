use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;
use crate::papers::{load_papers, translate_with_config};
use crate::webhook::post_to_webhook;

use super::args::PushArgs;

/// Load, optionally translate, then deliver. Translation failures are
/// per-paper and never abort the run; configuration and delivery errors do.
pub async fn run_push(args: &PushArgs, config: &Config) -> Result<()> {
    let papers = load_papers(&args.papers)?;
    info!("Loaded {} papers from {}", papers.len(), args.papers.display());

    let translate = args
        .translation_override()
        .unwrap_or(config.translation.enabled);

    let papers = if translate {
        let papers = translate_with_config(papers, config)
            .await
            .context("Cannot translate abstracts")?;
        info!("Translated abstracts into {}", config.translation.language);
        papers
    } else {
        info!("Translation disabled, skipping.");
        papers
    };

    let tag = args.tag.as_deref().unwrap_or(&config.delivery.tag);
    post_to_webhook(tag, &papers, config)
        .await
        .context("Failed to push papers to webhook")?;

    Ok(())
}
