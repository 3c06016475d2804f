//! Mask command handler.

use maxx_core::config::Config;
use maxx_core::mask::mask;

/// Prints the on-screen form of `text`.
pub fn run(text: &str, cover: Option<&str>, config: &Config) {
    let style = match cover {
        Some(phrase) => config.mask_style_with_cover(phrase),
        None => config.mask_style(),
    };
    println!("{}", mask(text, &style));
}
