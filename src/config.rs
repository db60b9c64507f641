//! Configuration file handling
//!
//! Loads `config.toml` from the platform config directory. Every field has
//! a default and unknown values are normalized rather than rejected, so a
//! stale or hand-edited file never blocks startup.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub player: PlayerConfig,
    pub ui: UiConfig,
}

/// Playback behavior knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Volume applied when a session starts, in `[0, 1]`
    pub initial_volume: f64,
    /// Quiet period before controls hide during playback
    pub hide_delay_ms: u64,
    /// Host tick driving timers and the simulated element
    pub tick_ms: u64,
}

/// Presentation knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Theme name resolved by the UI; unknown names fall back to the default
    pub theme: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            player: PlayerConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            initial_volume: 1.0,
            hide_delay_ms: 3000,
            tick_ms: 250,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
        }
    }
}

impl Config {
    /// Load from the default location; a missing file yields the defaults.
    pub fn load() -> Result<Self> {
        let path = config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load and normalize a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let mut config: Config = toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config.normalize();
        Ok(config)
    }

    /// Clamp numeric fields into their sane ranges.
    ///
    /// Out-of-range values come from hand edits; they are pulled back to
    /// the nearest valid value instead of failing the load.
    fn normalize(&mut self) {
        if !self.player.initial_volume.is_finite() {
            warn!(
                value = self.player.initial_volume,
                "initial_volume is not a number, using default"
            );
            self.player.initial_volume = PlayerConfig::default().initial_volume;
        }
        self.player.initial_volume = self.player.initial_volume.clamp(0.0, 1.0);
        self.player.hide_delay_ms = self.player.hide_delay_ms.clamp(100, 60_000);
        self.player.tick_ms = self.player.tick_ms.clamp(50, 1_000);
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("failed to serialize config")
    }

    pub fn hide_delay(&self) -> Duration {
        Duration::from_millis(self.player.hide_delay_ms)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.player.tick_ms)
    }
}

/// Platform path of the config file.
pub fn config_path() -> Result<PathBuf> {
    let base = dirs::config_dir().context("could not determine config directory")?;
    Ok(base.join("playdeck").join("config.toml"))
}
