//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Domain functions take plain data and return results, never mutate the world
//! - Only `Simulation` writes to `WorldState`, through its named operations
//! - Seeded RNG only
//! - Stable iteration order (enemies in spawn order)
//! - No rendering or platform dependencies

pub mod combat;
pub mod cooking;
pub mod geometry;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod upgrades;
pub mod workers;

pub use combat::{AiState, CombatResult, Enemy, Hit, resolve_combat, update_enemy_behavior};
pub use cooking::{
    Grill, GrillOp, GrillProgress, Inventory, calculate_cooking_tick, check_collect_interaction,
    check_deposit_interaction, check_sell_interaction,
};
pub use geometry::{distance_squared, is_within_range};
pub use state::{GameEvent, HudSnapshot, WorldState, Workers};
pub use tick::{Simulation, TickInput};
pub use upgrades::{
    BaseStats, Stats, UNAFFORDABLE, UpgradeLevels, UpgradeType, cost_for_key, derive_stats,
    get_upgrade_cost,
};
