//! Bearly Making It - hunt bears, grill the meat, sell it, hire a crew
//!
//! Core modules:
//! - `sim`: Deterministic simulation (economy, cooking, combat, AI, world state)
//! - `config`: Data-driven game balance and station layout
//! - `controls`: Keyboard snapshot and player movement step

pub mod config;
pub mod controls;
pub mod sim;

pub use config::{ConfigError, SimConfig};
pub use controls::MovementKeys;

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Nominal frame time used by headless runs and the first browser frame
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Enemy AI
    pub const AGGRO_RADIUS: f32 = 8.0;
    pub const ATTACK_RADIUS: f32 = 1.5;
    pub const ENEMY_MOVE_SPEED: f32 = 2.5;

    /// Player auto-attack reach and damage per second
    pub const PLAYER_ATTACK_RANGE: f32 = 4.0;
    pub const PLAYER_DPS: f32 = 10.0;

    /// Backpack size before any CAPACITY upgrade
    pub const BASE_INVENTORY_CAP: u32 = 5;
    /// Cook time never drops below this, whatever the upgrade level
    pub const MIN_COOK_SECONDS: f32 = 0.1;
}

/// Point on the ground plane (y = 0)
#[inline]
pub fn ground(x: f32, z: f32) -> Vec3 {
    Vec3::new(x, 0.0, z)
}

/// Point on the ground plane at polar (r, theta) around the origin
#[inline]
pub fn ground_polar(r: f32, theta: f32) -> Vec3 {
    Vec3::new(r * theta.cos(), 0.0, r * theta.sin())
}
