//! Append-only log of answered prompts.
//!
//! One JSON object per line in `$MAXX_HOME/history.jsonl`.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

/// A prompt and the response it received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    pub id: Uuid,
    /// Raw prompt, unmasked.
    pub prompt: String,
    pub response: String,
    pub created_at: DateTime<Utc>,
}

impl Exchange {
    pub fn new(prompt: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            prompt: prompt.into(),
            response: response.into(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MessageLog {
    path: PathBuf,
}

impl MessageLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Log at the default location.
    pub fn open_default() -> Self {
        Self::new(crate::config::paths::history_path())
    }

    /// Appends one exchange, creating the file and its parent as needed.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or written.
    pub fn append(&self, exchange: &Exchange) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let mut line = serde_json::to_string(exchange).context("Failed to serialize exchange")?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;
        file.write_all(line.as_bytes())
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }

    /// Reads all exchanges, oldest first.
    ///
    /// A missing file is an empty log. Lines that do not parse are skipped.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read.
    pub fn load(&self) -> Result<Vec<Exchange>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;

        let mut exchanges = Vec::new();
        for (index, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Exchange>(line) {
                Ok(exchange) => exchanges.push(exchange),
                Err(e) => warn!(line = index + 1, error = %e, "skipping malformed history line"),
            }
        }
        Ok(exchanges)
    }

    /// Returns the last `limit` exchanges, newest last.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read.
    pub fn recent(&self, limit: usize) -> Result<Vec<Exchange>> {
        let mut exchanges = self.load()?;
        let skip = exchanges.len().saturating_sub(limit);
        exchanges.drain(..skip);
        Ok(exchanges)
    }
}
