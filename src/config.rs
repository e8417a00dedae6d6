//! Game configuration
//!
//! Screen bounds, the rule choices that differ between game variants, and the
//! caps that bound per-tick work. Loaded from JSON or built from a preset.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::Color;

/// Errors raised while loading or validating a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Circle colors and the HUD legend naming them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub hazard: Color,
    pub boost: Color,
    pub hazard_label: String,
    pub boost_label: String,
}

impl Palette {
    /// Near-black hazards, teal boosts
    pub fn muted() -> Self {
        Self {
            hazard: Color::rgb(15, 15, 15),
            boost: Color::rgb(40, 150, 165),
            hazard_label: "Black".to_string(),
            boost_label: "Teal".to_string(),
        }
    }

    /// Blue hazards, green boosts
    pub fn vivid() -> Self {
        Self {
            hazard: Color::rgb(70, 110, 200),
            boost: Color::rgb(40, 180, 80),
            hazard_label: "Blue".to_string(),
            boost_label: "Green".to_string(),
        }
    }
}

/// Full game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub screen_width: f32,
    pub screen_height: f32,

    // === Variant rules ===
    /// Invincibility granted by a boost circle (seconds)
    pub boost_duration: f32,
    /// Hazard circles end the game even while invincible
    pub hazard_ignores_invincibility: bool,
    pub palette: Palette,

    // === Hardening ===
    /// Live entity cap; spawns past it are skipped
    pub max_entities: usize,
    /// Spawns processed in a single tick; surplus spawn time is dropped
    pub max_spawns_per_tick: u32,

    /// RNG seed (host picks one when absent)
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::compact()
    }
}

impl GameConfig {
    /// 800x600 window, short boosts, hazards always fatal
    pub fn compact() -> Self {
        Self {
            screen_width: 800.0,
            screen_height: 600.0,
            boost_duration: 2.5,
            hazard_ignores_invincibility: true,
            palette: Palette::muted(),
            max_entities: 256,
            max_spawns_per_tick: 8,
            seed: None,
        }
    }

    /// 1024x800 window, long boosts, invincibility also shields from hazards
    pub fn wide() -> Self {
        Self {
            screen_width: 1024.0,
            screen_height: 800.0,
            boost_duration: 5.0,
            hazard_ignores_invincibility: false,
            palette: Palette::vivid(),
            ..Self::compact()
        }
    }

    /// Look up a preset by name
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "compact" => Some(Self::compact()),
            "wide" => Some(Self::wide()),
            _ => None,
        }
    }

    /// Parse and validate a JSON config. Missing fields take `compact` values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        // Written as negated comparisons so NaN is rejected too
        if !(self.screen_width > 0.0) {
            return Err(ConfigError::Invalid {
                field: "screen_width",
                reason: "must be positive",
            });
        }
        if !(self.screen_height > 0.0) {
            return Err(ConfigError::Invalid {
                field: "screen_height",
                reason: "must be positive",
            });
        }
        if !(self.boost_duration > 0.0) {
            return Err(ConfigError::Invalid {
                field: "boost_duration",
                reason: "must be positive",
            });
        }
        if self.max_entities == 0 {
            return Err(ConfigError::Invalid {
                field: "max_entities",
                reason: "must be at least 1",
            });
        }
        if self.max_spawns_per_tick == 0 {
            return Err(ConfigError::Invalid {
                field: "max_spawns_per_tick",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}
