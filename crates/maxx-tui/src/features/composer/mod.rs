//! Composer feature: key handling and rendering for the masked prompt box.

pub mod render;
pub mod update;

pub use render::{calculate_composer_height, render_composer};
pub use update::{handle_edit_key, handle_paste};
