//! # Configuration Management Module
//!
//! Game rules, behaviour switches and logging settings, loaded from a TOML file.
//!
//! ## Configuration Structure
//!
//! - [`GameRules`] - base stats, loot ranges, dice thresholds and shop prices
//! - [`QuirksConfig`] - toggles for the classic game's odd menu and shop behaviour
//! - [`LoggingConfig`] - log level and optional log file
//!
//! Every section (and every field inside [`GameRules`]) falls back to its default when it is
//! missing, so a config file only needs the values it changes.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use orc_dungeon::config::Config;
//!
//! fn main() -> anyhow::Result<()> {
//!     // Falls back to defaults when the file does not exist
//!     let config = Config::load_or_default("orc-dungeon.toml")?;
//!     println!("Starting health: {}", config.rules.player_health);
//!
//!     // Write a starter file
//!     Config::create_default("orc-dungeon.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration File Format
//!
//! ```toml
//! [rules]
//! player_health = 10
//! magic_coin_cost = 100
//!
//! [quirks]
//! permissive_menus = true
//! honest_shop_labels = false
//!
//! [logging]
//! level = "warn"
//! file = "orc-dungeon.log"
//! ```

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub rules: GameRules,
    #[serde(default)]
    pub quirks: QuirksConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Numbers that drive the whole game. Defaults match the classic Orc Dungeon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameRules {
    pub player_health: i32,
    pub player_attack: i32,
    pub player_coins: i32,
    pub enemy_health: i32,
    pub enemy_attack: i32,
    /// Enemy stats grow by `rooms_cleared % difficulty_cycle`, resetting every cycle.
    pub difficulty_cycle: u32,
    pub room_coins_min: i32,
    pub room_coins_max: i32,
    pub room_potions_min: i32,
    pub room_potions_max: i32,
    /// Health restored per potion collected from a cleared room.
    pub potion_heal: i32,
    /// Fleeing rolls `1..=flee_sides` and succeeds below `flee_below`.
    pub flee_sides: i32,
    pub flee_below: i32,
    /// The enemy rolls `0..enemy_hit_sides` and lands a hit at `enemy_hit_at_least` or more.
    pub enemy_hit_sides: i32,
    pub enemy_hit_at_least: i32,
    /// Coins charged for either upgrade.
    pub upgrade_cost: i32,
    pub health_upgrade: i32,
    pub attack_upgrade: i32,
    pub magic_coin_cost: i32,
}

impl Default for GameRules {
    fn default() -> Self {
        GameRules {
            player_health: 10,
            player_attack: 2,
            player_coins: 0,
            enemy_health: 5,
            enemy_attack: 1,
            difficulty_cycle: 5,
            room_coins_min: 2,
            room_coins_max: 9,
            room_potions_min: 1,
            room_potions_max: 2,
            potion_heal: 2,
            flee_sides: 20,
            flee_below: 3,
            enemy_hit_sides: 10,
            enemy_hit_at_least: 5,
            upgrade_cost: 10,
            health_upgrade: 5,
            attack_upgrade: 5,
            magic_coin_cost: 100,
        }
    }
}

/// Behaviour of the classic game that looks unintended. Defaults keep it as it was.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuirksConfig {
    /// Accept any answer at the combat and shop menus on the first try; unknown answers fall
    /// through to the last option (Run Away / Magic Coin). When false, the menus re-prompt.
    #[serde(default = "default_permissive_menus")]
    pub permissive_menus: bool,
    /// Show the price and gain that are actually applied in the shop instead of the classic
    /// "(20 coins)" and "+1 Attack" labels.
    #[serde(default)]
    pub honest_shop_labels: bool,
}

fn default_permissive_menus() -> bool {
    true
}

impl Default for QuirksConfig {
    fn default() -> Self {
        QuirksConfig {
            permissive_menus: true,
            honest_shop_labels: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        Ok(config)
    }

    /// Load configuration from a file, or use the defaults if the file does not exist.
    /// A file that exists but cannot be parsed is still an error.
    pub fn load_or_default(path: &str) -> Result<Self> {
        if Path::new(path).exists() {
            Self::load(path)
        } else {
            Ok(Config::default())
        }
    }

    /// Create a default configuration file
    pub fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }
}
