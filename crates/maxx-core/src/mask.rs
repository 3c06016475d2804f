//! Masking transform.
//!
//! Maps the raw prompt to the string shown in the composer. A raw prompt that
//! starts with a period hides everything up to the next period (the secret)
//! behind the cover phrase; characters from the closing period onwards are
//! shown verbatim.
//!
//! The transform is length-preserving in chars. Alongside the display string,
//! [`MaskedText`] records where every display char came from so edits made on
//! the display can be carried back onto the raw text.

use std::ops::Range;

/// Delimiter that opens and closes the secret segment.
pub const SECRET_DELIMITER: char = '.';

/// Default cover phrase overlaid on the secret segment.
pub const DEFAULT_COVER_PHRASE: &str =
    "Dearest Artificial General Intelligence, please solve my query";

/// Char shown when the raw text is exactly one period.
pub const DEFAULT_PLACEHOLDER: char = 'D';

/// Cover phrase and fixed chars used by the transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskStyle {
    cover: Vec<char>,
    lead: char,
    placeholder: char,
}

impl MaskStyle {
    /// Creates a style from a cover phrase.
    ///
    /// The lead char defaults to the cover phrase's first char.
    pub fn new(cover_phrase: &str) -> Self {
        let cover: Vec<char> = cover_phrase.chars().collect();
        let lead = cover.first().copied().unwrap_or(DEFAULT_PLACEHOLDER);
        Self {
            cover,
            lead,
            placeholder: DEFAULT_PLACEHOLDER,
        }
    }

    #[must_use]
    pub fn with_lead(mut self, lead: char) -> Self {
        self.lead = lead;
        self
    }

    #[must_use]
    pub fn with_placeholder(mut self, placeholder: char) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn cover_phrase(&self) -> String {
        self.cover.iter().collect()
    }

    pub fn placeholder(&self) -> char {
        self.placeholder
    }
}

impl Default for MaskStyle {
    fn default() -> Self {
        Self::new(DEFAULT_COVER_PHRASE)
    }
}

/// How a display char was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// The lead char (or the lone placeholder) standing in for the opening period.
    Lead,
    /// A cover phrase char hiding a secret char.
    Covered,
    /// The raw char itself.
    Verbatim,
}

/// Origin of one display char.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Origin {
    /// Char index in the raw text.
    pub raw: usize,
    pub kind: CellKind,
}

/// Display string plus its per-char mapping back onto the raw text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MaskedText {
    display: String,
    origins: Vec<Origin>,
    raw_len: usize,
    closing: Option<usize>,
    masked: bool,
}

impl MaskedText {
    /// Runs the transform over `raw`.
    pub fn new(raw: &str, style: &MaskStyle) -> Self {
        let chars: Vec<char> = raw.chars().collect();
        let raw_len = chars.len();

        if chars.first() != Some(&SECRET_DELIMITER) {
            return Self {
                display: raw.to_string(),
                origins: (0..raw_len)
                    .map(|raw| Origin {
                        raw,
                        kind: CellKind::Verbatim,
                    })
                    .collect(),
                raw_len,
                closing: None,
                masked: false,
            };
        }

        if raw_len == 1 {
            return Self {
                display: style.placeholder.to_string(),
                origins: vec![Origin {
                    raw: 0,
                    kind: CellKind::Lead,
                }],
                raw_len,
                closing: None,
                masked: true,
            };
        }

        let closing = chars
            .iter()
            .skip(1)
            .position(|&c| c == SECRET_DELIMITER)
            .map(|pos| pos + 1);

        let mut display = String::with_capacity(raw.len());
        let mut origins = Vec::with_capacity(raw_len);
        display.push(style.lead);
        origins.push(Origin {
            raw: 0,
            kind: CellKind::Lead,
        });

        for (i, &ch) in chars.iter().enumerate().skip(1) {
            let revealed = closing.is_some_and(|end| i >= end);
            let (out, kind) = match style.cover.get(i) {
                Some(&cover) if !revealed => (cover, CellKind::Covered),
                _ => (ch, CellKind::Verbatim),
            };
            display.push(out);
            origins.push(Origin { raw: i, kind });
        }

        Self {
            display,
            origins,
            raw_len,
            closing,
            masked: true,
        }
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn into_display(self) -> String {
        self.display
    }

    pub fn origins(&self) -> &[Origin] {
        &self.origins
    }

    /// Number of chars in the display string.
    pub fn len(&self) -> usize {
        self.origins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }

    /// Returns true when the raw text opened a secret segment.
    pub fn is_masked(&self) -> bool {
        self.masked
    }

    /// Raw char index of the closing period, if one has been typed.
    pub fn closing_index(&self) -> Option<usize> {
        self.closing
    }

    /// Raw char range of the secret segment (between the two periods).
    ///
    /// Open-ended while no closing period exists.
    pub fn secret_range(&self) -> Option<Range<usize>> {
        if !self.masked {
            return None;
        }
        let end = self.closing.unwrap_or(self.raw_len);
        Some(1.min(end)..end)
    }

    /// Raw char offset for an insertion point in the display.
    pub fn raw_offset(&self, display_offset: usize) -> usize {
        self.origins
            .get(display_offset)
            .map_or(self.raw_len, |origin| origin.raw)
    }

    /// Display char offset for an insertion point in the raw text.
    pub fn display_offset(&self, raw_offset: usize) -> usize {
        self.origins
            .iter()
            .position(|origin| origin.raw >= raw_offset)
            .unwrap_or(self.origins.len())
    }

    /// Raw char range covered by a display char range.
    pub fn raw_range(&self, display: Range<usize>) -> Range<usize> {
        let start = display.start.min(self.origins.len());
        let end = display.end.min(self.origins.len());
        if start >= end {
            let at = self.raw_offset(start);
            return at..at;
        }
        let first = self.origins[start].raw;
        let last = self.origins[end - 1].raw;
        first.min(last)..first.max(last) + 1
    }
}

/// Returns the display string for `raw`.
pub fn mask(raw: &str, style: &MaskStyle) -> String {
    MaskedText::new(raw, style).into_display()
}
