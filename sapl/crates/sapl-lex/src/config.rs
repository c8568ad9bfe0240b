//! Configuration module for the lexer and the grammar registry.
//!
//! Configuration is read from TOML:
//!
//! ```toml
//! [lexer]
//! merge_adjacent = true
//! trace = false
//!
//! [aliases]
//! policy = "sapl"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{LexError, Result};

/// Conventional configuration file name.
pub const CONFIG_FILE_NAME: &str = "sapl-lex.toml";

/// Complete configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Options for each lex call.
    #[serde(default)]
    pub lexer: LexerConfig,

    /// Extra registry aliases, alias to existing tag.
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

/// Options for a single lex call.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LexerConfig {
    /// Consolidate adjacent tokens of the same category in `tokenize`.
    #[serde(default = "default_true")]
    pub merge_adjacent: bool,

    /// Emit a `tracing` event per raw token.
    #[serde(default)]
    pub trace: bool,
}

fn default_true() -> bool {
    true
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self {
            merge_adjacent: true,
            trace: false,
        }
    }
}

impl Config {
    /// Parses configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| LexError::Config(format!("Failed to parse configuration: {}", e)))
    }

    /// Loads configuration from a specific path.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(LexError::Config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Saves configuration to a specific path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            LexError::Config(format!("Failed to serialize configuration: {}", e))
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }
}
