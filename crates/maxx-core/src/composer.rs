//! Prompt composer.
//!
//! Holds the raw prompt as the only source of truth and keeps the masked
//! display string in step with it. Edits arrive against the display (that is
//! what the user sees and where the caret lives) and are carried onto the raw
//! text through the [`MaskedText`] origin map, after which the display is
//! recomputed wholesale and the caret restored.
//!
//! Two ways in:
//! - native edit operations (`insert_str`, `delete_prev_char`, ...), used by
//!   the TUI key handler
//! - [`Composer::apply_display_edit`], for hosts that only report the new
//!   control value and caret

use std::ops::Range;

use tracing::debug;

use crate::mask::{MaskStyle, MaskedText};

/// Caret movement commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaretMove {
    Forward,
    Back,
    Head,
    End,
}

/// Raw prompt, its masked display and the caret.
#[derive(Debug, Clone)]
pub struct Composer {
    style: MaskStyle,
    raw: String,
    masked: MaskedText,
    /// Char offset into the display string.
    caret: usize,
}

impl Default for Composer {
    fn default() -> Self {
        Self::new(MaskStyle::default())
    }
}

impl Composer {
    pub fn new(style: MaskStyle) -> Self {
        Self {
            style,
            raw: String::new(),
            masked: MaskedText::default(),
            caret: 0,
        }
    }

    /// The text that gets submitted.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The text that gets shown.
    pub fn display(&self) -> &str {
        self.masked.display()
    }

    pub fn style(&self) -> &MaskStyle {
        &self.style
    }

    /// Caret position as a char offset into the display.
    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn is_masked(&self) -> bool {
        self.masked.is_masked()
    }

    /// Returns true when there is something to send.
    pub fn can_submit(&self) -> bool {
        !self.raw.is_empty()
    }

    /// Returns a copy of the raw text for submission.
    ///
    /// The composer keeps its contents until the submission succeeds.
    pub fn take(&self) -> String {
        self.raw.clone()
    }

    /// Replaces the raw text and moves the caret to the end.
    pub fn set_raw(&mut self, raw: impl Into<String>) {
        self.raw = raw.into();
        self.refresh();
        self.caret = self.masked.len();
    }

    pub fn clear(&mut self) {
        self.raw.clear();
        self.refresh();
        self.caret = 0;
    }

    pub fn set_caret(&mut self, caret: usize) {
        self.caret = caret.min(self.masked.len());
    }

    pub fn move_caret(&mut self, movement: CaretMove) {
        let len = self.masked.len();
        self.caret = match movement {
            CaretMove::Forward => (self.caret + 1).min(len),
            CaretMove::Back => self.caret.saturating_sub(1),
            CaretMove::Head => 0,
            CaretMove::End => len,
        };
    }

    /// Inserts text at the caret, advancing the caret past it.
    pub fn insert_str(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let at = self.masked.raw_offset(self.caret);
        let byte_idx = char_to_byte_index(&self.raw, at);
        self.raw.insert_str(byte_idx, text);
        self.refresh();
        self.caret = self.masked.display_offset(at + text.chars().count());
        debug!(raw_offset = at, inserted = text.chars().count(), "composer insert");
    }

    pub fn insert_char(&mut self, ch: char) {
        let mut buf = [0u8; 4];
        self.insert_str(ch.encode_utf8(&mut buf));
    }

    /// Deletes the char before the caret (Backspace semantics).
    pub fn delete_prev_char(&mut self) {
        if self.caret == 0 {
            return;
        }
        self.delete_range(self.caret - 1..self.caret);
    }

    /// Deletes the char at the caret (Delete key semantics).
    pub fn delete_next_char(&mut self) {
        if self.caret >= self.masked.len() {
            return;
        }
        self.delete_range(self.caret..self.caret + 1);
    }

    /// Deletes from the start of the display to the caret.
    pub fn delete_to_head(&mut self) {
        self.delete_range(0..self.caret);
    }

    /// Deletes from the caret to the end of the display.
    pub fn delete_to_end(&mut self) {
        self.delete_range(self.caret..self.masked.len());
    }

    /// Deletes a display char range; the caret lands where it started.
    pub fn delete_range(&mut self, display: Range<usize>) {
        let raw = self.masked.raw_range(display);
        if raw.is_empty() {
            return;
        }
        self.splice_raw(raw.clone(), "");
        self.caret = self.masked.display_offset(raw.start);
        debug!(?raw, "composer delete");
    }

    /// Reconciles a new control value reported by the host.
    ///
    /// `caret_after` is where the host's caret sits once the edit is applied.
    /// The changed span is located by diffing the previous display against
    /// `new_display`, bounded by the caret so repeated chars do not shift the
    /// edit; the matching raw span is then replaced by the chars the user
    /// actually typed.
    pub fn apply_display_edit(&mut self, new_display: &str, caret_after: usize) {
        if new_display.is_empty() {
            self.clear();
            return;
        }

        if self.masked.is_masked() {
            let old: Vec<char> = self.masked.display().chars().collect();
            let new: Vec<char> = new_display.chars().collect();
            let caret = caret_after.min(new.len());

            let inserted_len = new.len().saturating_sub(old.len());
            let prefix_limit = caret.saturating_sub(inserted_len);
            let prefix = common_prefix(&old, &new).min(prefix_limit);
            let suffix_limit = old.len().min(new.len()) - prefix;
            let suffix = common_suffix(&old[prefix..], &new[prefix..]).min(suffix_limit);

            let removed = prefix..old.len() - suffix;
            let typed: String = new[prefix..new.len() - suffix].iter().collect();
            let raw = self.masked.raw_range(removed);
            debug!(?raw, typed = typed.chars().count(), "composer reconcile");
            self.splice_raw(raw, &typed);
        } else {
            self.raw = new_display.to_string();
            self.refresh();
        }

        self.caret = caret_after.min(self.masked.len());
    }

    fn splice_raw(&mut self, raw: Range<usize>, text: &str) {
        let start = char_to_byte_index(&self.raw, raw.start);
        let end = char_to_byte_index(&self.raw, raw.end);
        self.raw.replace_range(start..end, text);
        self.refresh();
    }

    fn refresh(&mut self) {
        self.masked = MaskedText::new(&self.raw, &self.style);
    }
}

fn common_prefix(a: &[char], b: &[char]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

fn common_suffix(a: &[char], b: &[char]) -> usize {
    a.iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count()
}

fn char_to_byte_index(text: &str, col: usize) -> usize {
    if col == 0 {
        return 0;
    }
    text.char_indices()
        .nth(col)
        .map_or(text.len(), |(i, _)| i)
}
