//! History command handlers.

use anyhow::{Context, Result};
use maxx_core::history::MessageLog;

/// Longest prompt/response excerpt shown per line.
const EXCERPT_CHARS: usize = 60;

pub fn list(limit: usize) -> Result<()> {
    let log = MessageLog::open_default();
    let exchanges = log.recent(limit).context("read history")?;
    if exchanges.is_empty() {
        println!("No history found.");
        return Ok(());
    }

    for exchange in exchanges {
        let when = exchange.created_at.format("%Y-%m-%d %H:%M:%S");
        println!(
            "{}  {}  {}  →  {}",
            when,
            short_id(&exchange.id.to_string()),
            excerpt(&exchange.prompt),
            excerpt(&exchange.response)
        );
    }
    Ok(())
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

/// Collapses whitespace and cuts to `EXCERPT_CHARS`.
fn excerpt(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= EXCERPT_CHARS {
        return flat;
    }
    let mut cut: String = flat.chars().take(EXCERPT_CHARS - 1).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excerpt_flattens_and_truncates() {
        assert_eq!(excerpt("a\n  b\tc"), "a b c");
        let long = "x".repeat(100);
        let cut = excerpt(&long);
        assert_eq!(cut.chars().count(), EXCERPT_CHARS);
        assert!(cut.ends_with('…'));
    }

    #[test]
    fn short_id_takes_prefix() {
        assert_eq!(short_id("0123456789abcdef"), "01234567");
        assert_eq!(short_id("abc"), "abc");
    }
}
