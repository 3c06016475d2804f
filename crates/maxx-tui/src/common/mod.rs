//! Shared helpers for the TUI.

mod text;

pub use text::{sanitize_for_display, truncate_with_ellipsis};
