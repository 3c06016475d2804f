//! Chat command handler.

use std::io::{IsTerminal, Read};
use std::sync::Arc;

use anyhow::{Context, Result};
use maxx_core::config::Config;
use maxx_core::history::MessageLog;
use maxx_core::providers::openai::{OpenAIChatClient, OpenAIChatConfig};

use super::ask;
use crate::modes;

pub async fn run(config: &Config) -> Result<()> {
    // If stdin is piped, answer it like `ask`
    if !std::io::stdin().is_terminal() {
        let mut prompt = String::new();
        std::io::stdin().lock().read_to_string(&mut prompt)?;
        if prompt.trim().is_empty() {
            anyhow::bail!("No input provided via pipe");
        }
        return ask::run(&prompt, config).await;
    }

    let provider = OpenAIChatConfig::from_config(config).context("configure provider")?;
    let backend = Arc::new(OpenAIChatClient::new(provider));
    let log = config.history.enabled.then(MessageLog::open_default);

    modes::run_interactive_chat(config, backend, log)
        .await
        .context("interactive chat failed")?;

    Ok(())
}
