//! Application configuration
//!
//! Loaded from a JSON file; every field is optional and falls back to its
//! default.

use anyhow::Context;
use game_state::{CardTheme, GameMode};
use score_client::ScoreClientConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FlashbackConfig {
    /// Score service connection
    pub score_service: ScoreClientConfig,
    /// Card theme a new session starts with
    pub default_theme: CardTheme,
    /// Mode used for high score lookups
    pub game_mode: GameMode,
    /// Directory holding `assets/fonts/...`
    pub asset_root: PathBuf,
}

impl Default for FlashbackConfig {
    fn default() -> Self {
        Self {
            score_service: ScoreClientConfig::default(),
            default_theme: CardTheme::default(),
            game_mode: GameMode::default(),
            asset_root: PathBuf::from("."),
        }
    }
}

impl FlashbackConfig {
    /// Read and parse a config file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Parse config JSON
    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Load `path` if it exists, otherwise use defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            tracing::info!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }
}
