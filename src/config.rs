//! Game balance and station layout
//!
//! Every tunable the simulation reads lives here. Overrides arrive as JSON
//! (partial documents are fine, missing fields keep their defaults).

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::upgrades::BaseStats;

/// Problems with a config override
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Simulation tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for enemy spawns
    pub seed: u64,

    // === Stations ===
    pub grill_pos: Vec3,
    pub register_pos: Vec3,
    pub upgrade_pos: Vec3,
    /// How close the player must stand to use a station
    pub interaction_radius: f32,

    // === Economy ===
    pub grill_capacity: u32,
    /// Seconds between single-steak sales while at the register
    pub sell_interval: f32,
    /// Cash per cooked steak
    pub sale_price: u64,
    pub base_stats: BaseStats,

    // === Enemies ===
    pub spawn_interval: f32,
    pub max_enemies: usize,
    pub spawn_min_radius: f32,
    pub spawn_max_radius: f32,
    pub enemy_hp: f32,
    /// Raw meat handed to the player per kill
    pub meat_per_kill: u32,

    // === Workers ===
    /// Seconds between hunter deliveries
    pub hunter_gather_rate: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 0,

            grill_pos: Vec3::new(-3.0, 0.5, -3.0),
            register_pos: Vec3::new(3.0, 0.5, 3.0),
            upgrade_pos: Vec3::new(0.0, 0.5, -6.0),
            interaction_radius: 2.0,

            grill_capacity: 3,
            sell_interval: 0.2,
            sale_price: 10,
            base_stats: BaseStats::default(),

            spawn_interval: 3.0,
            max_enemies: 5,
            spawn_min_radius: 10.0,
            spawn_max_radius: 15.0,
            enemy_hp: 100.0,
            meat_per_kill: 1,

            hunter_gather_rate: 5.0,
        }
    }
}

impl SimConfig {
    /// Defaults with a specific spawn seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        log::info!("Loaded sim config (seed {})", config.seed);
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("interaction_radius", self.interaction_radius),
            ("sell_interval", self.sell_interval),
            ("spawn_interval", self.spawn_interval),
            ("hunter_gather_rate", self.hunter_gather_rate),
            ("enemy_hp", self.enemy_hp),
            ("base_stats.cook_speed", self.base_stats.cook_speed),
        ];
        for (field, value) in positive {
            // Written as a negation so NaN is rejected too
            if !(value > 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be greater than zero",
                });
            }
        }
        if self.grill_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "grill_capacity",
                reason: "must be at least one",
            });
        }
        if !(self.spawn_min_radius >= 0.0 && self.spawn_min_radius <= self.spawn_max_radius) {
            return Err(ConfigError::Invalid {
                field: "spawn_min_radius",
                reason: "must be non-negative and not exceed spawn_max_radius",
            });
        }
        Ok(())
    }
}
