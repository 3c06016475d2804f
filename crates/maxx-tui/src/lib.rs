//! Full-screen TUI for GPT_MAXX.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, Write, stderr};
use std::sync::Arc;

use anyhow::Result;
use maxx_core::config::Config;
use maxx_core::history::MessageLog;
use maxx_core::providers::ChatBackend;
pub use runtime::TuiRuntime;
use tracing::info;

use crate::state::Notice;

/// Runs the interactive chat screen until the user quits.
///
/// # Errors
/// Returns an error if stderr is not a terminal or the terminal fails.
pub async fn run_interactive_chat(
    config: &Config,
    backend: Arc<dyn ChatBackend>,
    log: Option<MessageLog>,
) -> Result<()> {
    // Chat mode requires a terminal to render the TUI
    if !stderr().is_terminal() {
        anyhow::bail!(
            "Chat mode requires a terminal.\n\
             Use `maxx ask --prompt '...'` for non-interactive use."
        );
    }

    let mut err = stderr();
    writeln!(err, "GPT_MAXX")?;
    writeln!(err, "Model: {}", backend.model())?;
    err.flush()?;

    info!(model = backend.model(), history = log.is_some(), "starting interactive chat");

    let mut runtime = TuiRuntime::new(config, backend, log)?;

    let config_path = maxx_core::config::paths::config_path();
    if config_path.exists() {
        runtime.state.notice = Some(Notice::info(
            "Config",
            format!("Loaded {}", config_path.display()),
        ));
    }

    runtime.run()?;

    writeln!(stderr(), "Goodbye!")?;
    Ok(())
}
