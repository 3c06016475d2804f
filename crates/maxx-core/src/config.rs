//! Configuration management for GPT_MAXX.
//!
//! Loads configuration from ${MAXX_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::mask::{DEFAULT_COVER_PHRASE, DEFAULT_PLACEHOLDER, MaskStyle};

/// System prompt sent ahead of every user prompt.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a mindreading bot. The writer will write a fullstop, and then type the answer to their question. The user will then type another full stop and then type the question. You should use the answer they type to answer their question";

/// Returns the default config template with comments.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for configuration and data files.
    //!
    //! MAXX_HOME resolution order:
    //! 1. MAXX_HOME environment variable (if set)
    //! 2. ~/.config/maxx (default)

    use std::path::PathBuf;

    /// Returns the MAXX home directory.
    pub fn maxx_home() -> PathBuf {
        if let Ok(home) = std::env::var("MAXX_HOME")
            && !home.trim().is_empty()
        {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".maxx"),
            |h| h.join(".config").join("maxx"),
        )
    }

    pub fn config_path() -> PathBuf {
        maxx_home().join("config.toml")
    }

    /// Returns the path to the prompt/response log.
    pub fn history_path() -> PathBuf {
        maxx_home().join("history.jsonl")
    }

    pub fn logs_dir() -> PathBuf {
        maxx_home().join("logs")
    }
}

/// Masking configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MaskConfig {
    pub cover_phrase: String,
    /// Char replacing the opening period; the cover phrase's first char if unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead: Option<char>,
    pub placeholder: char,
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            cover_phrase: DEFAULT_COVER_PHRASE.to_string(),
            lead: None,
            placeholder: DEFAULT_PLACEHOLDER,
        }
    }
}

/// Per-provider settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub openai: ProviderConfig,
}

/// Prompt/response log settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub enabled: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Chat completions model
    pub model: String,

    /// Maximum tokens for responses (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Optional system prompt override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,

    pub mask: MaskConfig,

    pub providers: ProvidersConfig,

    pub history: HistoryConfig,
}

impl Config {
    pub const DEFAULT_MODEL: &'static str = "gpt-4o";

    /// Loads configuration from the default path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Writes the commented default config.
    ///
    /// # Errors
    /// Returns an error if the file already exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Generates a fresh config TOML from Rust defaults.
    ///
    /// Uses the embedded template for structure and comments and merges the
    /// values from `Config::default()` into it.
    ///
    /// # Errors
    /// Returns an error if serialization or template parsing fails.
    pub fn generate() -> Result<String> {
        use toml_edit::{DocumentMut, Item};

        fn merge(target: &mut toml_edit::Table, source: &toml_edit::Table) {
            for (key, value) in source.iter() {
                match value {
                    Item::Value(v) => {
                        target[key] = Item::Value(v.clone());
                    }
                    Item::Table(src_table) => {
                        if let Some(Item::Table(target_table)) = target.get_mut(key) {
                            merge(target_table, src_table);
                        } else {
                            target[key] = Item::Table(src_table.clone());
                        }
                    }
                    Item::ArrayOfTables(arr) => {
                        target[key] = Item::ArrayOfTables(arr.clone());
                    }
                    Item::None => {}
                }
            }
        }

        let generated_toml = toml::to_string(&Config::default())
            .context("Failed to serialize default config to TOML")?;

        let mut doc: DocumentMut = default_config_template()
            .parse()
            .context("Failed to parse default config template")?;
        let generated_doc: DocumentMut = generated_toml
            .parse()
            .context("Failed to parse generated config")?;

        merge(doc.as_table_mut(), generated_doc.as_table());

        Ok(doc.to_string())
    }

    /// Builds the masking style from the `[mask]` section.
    pub fn mask_style(&self) -> MaskStyle {
        self.mask_style_with_cover(&self.mask.cover_phrase)
    }

    /// Like `mask_style`, with `cover_phrase` in place of the configured one.
    pub fn mask_style_with_cover(&self, cover_phrase: &str) -> MaskStyle {
        let style = MaskStyle::new(cover_phrase).with_placeholder(self.mask.placeholder);
        match self.mask.lead {
            Some(lead) => style.with_lead(lead),
            None => style,
        }
    }

    /// Returns the configured system prompt, or the built-in one.
    pub fn effective_system_prompt(&self) -> &str {
        match self.system_prompt.as_deref() {
            Some(prompt) if !prompt.trim().is_empty() => prompt.trim(),
            _ => DEFAULT_SYSTEM_PROMPT,
        }
    }

    /// Writes config content to a file, creating parent directories as needed.
    /// Uses atomic write (temp file + rename) to prevent corruption.
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: Self::DEFAULT_MODEL.to_string(),
            max_tokens: None,
            system_prompt: None,
            mask: MaskConfig::default(),
            providers: ProvidersConfig::default(),
            history: HistoryConfig::default(),
        }
    }
}
