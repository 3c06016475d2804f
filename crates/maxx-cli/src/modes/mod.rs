//! Runtime execution modes.
//!
//! - `tui`: Full-screen interactive terminal UI (optional feature)

#[cfg(feature = "tui")]
pub use maxx_tui::run_interactive_chat;

#[cfg(not(feature = "tui"))]
pub async fn run_interactive_chat(
    _config: &maxx_core::config::Config,
    _backend: std::sync::Arc<dyn maxx_core::providers::ChatBackend>,
    _log: Option<maxx_core::history::MessageLog>,
) -> anyhow::Result<()> {
    anyhow::bail!("TUI support is disabled in this build (feature \"tui\").");
}
