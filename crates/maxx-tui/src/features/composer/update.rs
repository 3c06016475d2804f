//! Composer key handling.
//!
//! Keys edit the display the user sees; the composer carries each edit onto
//! the raw prompt.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use maxx_core::composer::{CaretMove, Composer};
use tracing::trace;

use crate::common::sanitize_for_display;

/// Inserts pasted text at the caret.
pub fn handle_paste(composer: &mut Composer, text: &str) {
    let sanitized = sanitize_for_display(text);
    trace!(chars = sanitized.chars().count(), "paste");
    composer.insert_str(&sanitized);
}

/// Applies an editing key. Returns false if the key is not an editing key.
pub fn handle_edit_key(composer: &mut Composer, key: KeyEvent) -> bool {
    let mods = Modifiers::from(&key);

    handle_line_editing(composer, key.code, &mods)
        || handle_navigation(composer, key.code, &mods)
        || handle_deletion(composer, key.code, &mods)
        || handle_newline(composer, key.code, &mods)
        || handle_default_input(composer, key.code, &mods)
}

/// Parsed key modifiers for cleaner pattern matching.
struct Modifiers {
    ctrl: bool,
    shift: bool,
    alt: bool,
}

impl Modifiers {
    fn from(key: &KeyEvent) -> Self {
        Self {
            ctrl: key.modifiers.contains(KeyModifiers::CONTROL),
            shift: key.modifiers.contains(KeyModifiers::SHIFT),
            alt: key.modifiers.contains(KeyModifiers::ALT),
        }
    }

    fn none(&self) -> bool {
        !self.ctrl && !self.shift && !self.alt
    }

    fn only_ctrl(&self) -> bool {
        self.ctrl && !self.shift && !self.alt
    }
}

// Ctrl+A, Ctrl+E, Ctrl+U, Ctrl+K
fn handle_line_editing(composer: &mut Composer, code: KeyCode, mods: &Modifiers) -> bool {
    if !mods.only_ctrl() {
        return false;
    }
    match code {
        KeyCode::Char('a') => composer.move_caret(CaretMove::Head),
        KeyCode::Char('e') => composer.move_caret(CaretMove::End),
        KeyCode::Char('u') => composer.delete_to_head(),
        KeyCode::Char('k') => composer.delete_to_end(),
        _ => return false,
    }
    true
}

fn handle_navigation(composer: &mut Composer, code: KeyCode, mods: &Modifiers) -> bool {
    if mods.ctrl || mods.alt {
        return false;
    }
    match code {
        KeyCode::Left => composer.move_caret(CaretMove::Back),
        KeyCode::Right => composer.move_caret(CaretMove::Forward),
        KeyCode::Home | KeyCode::Up => composer.move_caret(CaretMove::Head),
        KeyCode::End | KeyCode::Down => composer.move_caret(CaretMove::End),
        _ => return false,
    }
    true
}

fn handle_deletion(composer: &mut Composer, code: KeyCode, mods: &Modifiers) -> bool {
    match code {
        KeyCode::Backspace if !mods.ctrl && !mods.alt => composer.delete_prev_char(),
        KeyCode::Char('h') if mods.only_ctrl() => composer.delete_prev_char(),
        KeyCode::Delete if !mods.ctrl && !mods.alt => composer.delete_next_char(),
        KeyCode::Char('d') if mods.only_ctrl() => composer.delete_next_char(),
        _ => return false,
    }
    true
}

// Ctrl+J, Shift+Enter, Alt+Enter
fn handle_newline(composer: &mut Composer, code: KeyCode, mods: &Modifiers) -> bool {
    let newline = match code {
        KeyCode::Char('j') => mods.only_ctrl(),
        KeyCode::Enter => mods.shift || mods.alt,
        _ => false,
    };
    if newline {
        composer.insert_char('\n');
    }
    newline
}

fn handle_default_input(composer: &mut Composer, code: KeyCode, mods: &Modifiers) -> bool {
    match code {
        KeyCode::Char(c) if mods.none() || (mods.shift && !mods.ctrl && !mods.alt) => {
            composer.insert_char(c);
            true
        }
        _ => false,
    }
}
