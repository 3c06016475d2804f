//! Composer view.
//!
//! Draws the masked display (never the raw prompt) with a wrapped,
//! unicode-width-aware cursor.

use maxx_core::composer::Composer;
use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthChar;

/// Minimum height of the composer (lines, including borders).
const COMPOSER_HEIGHT_MIN: u16 = 3;

/// Maximum height of the composer as a percentage of screen height.
const COMPOSER_HEIGHT_MAX_PERCENT: f32 = 0.4;

/// Wrapped text plus the visual cursor position.
#[derive(Debug, PartialEq, Eq)]
struct WrappedText {
    lines: Vec<String>,
    cursor_row: usize,
    cursor_col: usize,
}

/// Wraps `text` to `width` columns and locates the char offset `caret`.
fn wrap_with_cursor(text: &str, caret: usize, width: usize) -> WrappedText {
    let width = width.max(1);
    let mut lines = vec![String::new()];
    let mut col = 0usize;
    let mut cursor = None;

    for (idx, ch) in text.chars().enumerate() {
        if ch == '\n' {
            if idx == caret {
                cursor = Some((lines.len() - 1, col));
            }
            lines.push(String::new());
            col = 0;
            continue;
        }

        let ch_width = ch.width().unwrap_or(0);
        if col > 0 && col + ch_width > width {
            lines.push(String::new());
            col = 0;
        }
        if idx == caret {
            cursor = Some((lines.len() - 1, col));
        }
        if let Some(line) = lines.last_mut() {
            line.push(ch);
        }
        col += ch_width;
    }

    let (cursor_row, cursor_col) = cursor.unwrap_or_else(|| {
        if col >= width {
            lines.push(String::new());
            (lines.len() - 1, 0)
        } else {
            (lines.len() - 1, col)
        }
    });

    WrappedText {
        lines,
        cursor_row,
        cursor_col,
    }
}

/// Height the composer wants for `width` columns, bounded by the screen.
pub fn calculate_composer_height(composer: &Composer, width: u16, screen_height: u16) -> u16 {
    let inner_width = width.saturating_sub(2) as usize;
    let wrapped = wrap_with_cursor(composer.display(), composer.caret(), inner_width);
    let wanted = wrapped.lines.len() as u16 + 2;
    let max = ((f32::from(screen_height) * COMPOSER_HEIGHT_MAX_PERCENT) as u16)
        .max(COMPOSER_HEIGHT_MIN);
    wanted.clamp(COMPOSER_HEIGHT_MIN, max)
}

/// Renders the composer and places the terminal cursor.
pub fn render_composer(frame: &mut Frame, composer: &Composer, area: Rect, focused: bool) {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" Prompt ");
    if composer.is_masked() {
        block = block.title_bottom(Line::from(" secret hidden ").right_aligned());
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    if composer.is_empty() {
        let hint = format!("{}...", composer.style().cover_phrase());
        let placeholder = Paragraph::new(hint).style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        );
        frame.render_widget(placeholder, inner);
        if focused {
            frame.set_cursor_position(Position::new(inner.x, inner.y));
        }
        return;
    }

    let wrapped = wrap_with_cursor(composer.display(), composer.caret(), inner.width as usize);
    let visible = inner.height as usize;
    let scroll = (wrapped.cursor_row + 1).saturating_sub(visible);

    let lines: Vec<Line> = wrapped
        .lines
        .into_iter()
        .skip(scroll)
        .take(visible)
        .map(Line::from)
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);

    if focused {
        let x = inner.x + wrapped.cursor_col as u16;
        let y = inner.y + (wrapped.cursor_row - scroll) as u16;
        frame.set_cursor_position(Position::new(x.min(inner.right() - 1), y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_at_width() {
        let wrapped = wrap_with_cursor("abcdef", 6, 4);
        assert_eq!(wrapped.lines, vec!["abcd", "ef"]);
        assert_eq!((wrapped.cursor_row, wrapped.cursor_col), (1, 2));
    }

    #[test]
    fn cursor_on_wrapped_char_moves_to_next_row() {
        let wrapped = wrap_with_cursor("abcdef", 4, 4);
        assert_eq!((wrapped.cursor_row, wrapped.cursor_col), (1, 0));
    }

    #[test]
    fn cursor_after_full_line_opens_a_row() {
        let wrapped = wrap_with_cursor("abcd", 4, 4);
        assert_eq!(wrapped.lines, vec!["abcd", ""]);
        assert_eq!((wrapped.cursor_row, wrapped.cursor_col), (1, 0));
    }

    #[test]
    fn newlines_break_lines() {
        let wrapped = wrap_with_cursor("ab\ncd", 3, 10);
        assert_eq!(wrapped.lines, vec!["ab", "cd"]);
        assert_eq!((wrapped.cursor_row, wrapped.cursor_col), (1, 0));

        let before_newline = wrap_with_cursor("ab\ncd", 2, 10);
        assert_eq!((before_newline.cursor_row, before_newline.cursor_col), (0, 2));
    }

    #[test]
    fn wide_chars_use_display_width() {
        let wrapped = wrap_with_cursor("日本語", 3, 4);
        assert_eq!(wrapped.lines, vec!["日本", "語"]);
        assert_eq!((wrapped.cursor_row, wrapped.cursor_col), (1, 2));
    }

    #[test]
    fn height_is_bounded() {
        let mut composer = Composer::default();
        assert_eq!(calculate_composer_height(&composer, 20, 40), 3);
        composer.set_raw("x\n".repeat(50));
        assert_eq!(calculate_composer_height(&composer, 20, 40), 16);
    }
}
