//! Ask command handler.

use anyhow::{Context, Result};
use maxx_core::chat;
use maxx_core::config::Config;
use maxx_core::history::MessageLog;
use maxx_core::interrupt::{self, InterruptedError};
use maxx_core::providers::openai::{OpenAIChatClient, OpenAIChatConfig};

/// Sends `prompt` as-is and prints the response to stdout.
pub async fn run(prompt: &str, config: &Config) -> Result<()> {
    let prompt = prompt.trim_end_matches(['\r', '\n']);
    if prompt.is_empty() {
        anyhow::bail!("Prompt is empty");
    }

    let provider = OpenAIChatConfig::from_config(config).context("configure provider")?;
    let client = OpenAIChatClient::new(provider);
    let log = config.history.enabled.then(MessageLog::open_default);

    interrupt::reset();
    let response = tokio::select! {
        result = chat::submit(&client, log.as_ref(), prompt) => {
            result.context("ask failed")?
        }
        () = interrupt::wait_for_interrupt() => {
            eprintln!("Interrupted.");
            return Err(InterruptedError.into());
        }
    };

    println!("{response}");
    Ok(())
}
