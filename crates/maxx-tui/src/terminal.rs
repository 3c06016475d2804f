//! Raw-mode terminal setup and teardown.

use std::io::{self, Stdout};
use std::sync::Once;

use anyhow::{Context, Result};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

static PANIC_HOOK: Once = Once::new();

/// Switches to the alternate screen in raw mode with bracketed paste on.
///
/// With bracketed paste a pasted newline arrives inside one `Paste` event
/// rather than as an Enter key. A panic after this call leaves the alternate
/// screen before the panic message prints.
///
/// # Errors
/// Returns an error if the terminal cannot be switched over. Whatever was
/// already changed is undone first.
pub fn enter() -> Result<Tui> {
    PANIC_HOOK.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = leave();
            previous(info);
        }));
    });

    enable_raw_mode().context("Failed to enable raw mode")?;
    let entered = execute!(io::stdout(), EnterAlternateScreen, EnableBracketedPaste)
        .context("Failed to enter alternate screen")
        .and_then(|()| {
            Terminal::new(CrosstermBackend::new(io::stdout())).context("Failed to create terminal")
        });
    if entered.is_err() {
        let _ = leave();
    }
    entered
}

/// Undoes `enter`. Calling it twice is harmless.
///
/// # Errors
/// Returns an error if the screen or raw mode cannot be restored.
pub fn leave() -> Result<()> {
    // Paste mode goes off while still in raw mode.
    let screen = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen)
        .context("Failed to leave alternate screen");
    disable_raw_mode().context("Failed to disable raw mode")?;
    screen
}
