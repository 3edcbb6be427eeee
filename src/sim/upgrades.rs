//! Upgrade cost curve and stat derivation
//!
//! Stats are always recomputed from the full level table, never nudged
//! incrementally, so repeated purchases cannot drift.

use serde::{Deserialize, Serialize};

use crate::consts::{BASE_INVENTORY_CAP, MIN_COOK_SECONDS};

/// Cost reported for anything that can never be bought
pub const UNAFFORDABLE: u64 = u64::MAX;

/// Purchasable upgrades
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeType {
    Speed,
    Damage,
    Capacity,
    CookSpeed,
    HireHunter,
    HireCook,
}

/// Immutable pricing for one upgrade line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpgradeConfig {
    pub base_cost: u64,
    pub growth: f64,
    pub name: &'static str,
}

impl UpgradeType {
    /// Every upgrade, in shop display order
    pub const ALL: [UpgradeType; 6] = [
        UpgradeType::Speed,
        UpgradeType::Damage,
        UpgradeType::Capacity,
        UpgradeType::CookSpeed,
        UpgradeType::HireHunter,
        UpgradeType::HireCook,
    ];

    pub fn config(&self) -> UpgradeConfig {
        let (base_cost, growth, name) = match self {
            UpgradeType::Speed => (50, 1.5, "Movement Speed"),
            UpgradeType::Damage => (100, 1.6, "Attack Damage"),
            UpgradeType::Capacity => (75, 1.4, "Backpack Size"),
            UpgradeType::CookSpeed => (150, 1.8, "Grill Speed"),
            UpgradeType::HireHunter => (500, 2.0, "Hire Hunter"),
            UpgradeType::HireCook => (300, 2.0, "Hire Cook"),
        };
        UpgradeConfig {
            base_cost,
            growth,
            name,
        }
    }

    pub fn display_name(&self) -> &'static str {
        self.config().name
    }

    /// Stable key used by the shop UI (`"SPEED"`, `"HIRE_COOK"`, ...)
    pub fn as_key(&self) -> &'static str {
        match self {
            UpgradeType::Speed => "SPEED",
            UpgradeType::Damage => "DAMAGE",
            UpgradeType::Capacity => "CAPACITY",
            UpgradeType::CookSpeed => "COOK_SPEED",
            UpgradeType::HireHunter => "HIRE_HUNTER",
            UpgradeType::HireCook => "HIRE_COOK",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_key() == key)
    }

    fn index(&self) -> usize {
        match self {
            UpgradeType::Speed => 0,
            UpgradeType::Damage => 1,
            UpgradeType::Capacity => 2,
            UpgradeType::CookSpeed => 3,
            UpgradeType::HireHunter => 4,
            UpgradeType::HireCook => 5,
        }
    }
}

/// `floor(base_cost * growth^level)`
pub fn get_upgrade_cost(kind: UpgradeType, current_level: u32) -> u64 {
    let cfg = kind.config();
    let cost = (cfg.base_cost as f64 * cfg.growth.powi(current_level as i32)).floor();
    // Float-to-int casts saturate, so runaway levels pin at u64::MAX
    cost as u64
}

/// Cost lookup by shop key; unknown keys are never affordable
pub fn cost_for_key(key: &str, current_level: u32) -> u64 {
    UpgradeType::from_key(key)
        .map(|kind| get_upgrade_cost(kind, current_level))
        .unwrap_or(UNAFFORDABLE)
}

/// Current level of every upgrade line (levels only ever go up)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeLevels([u32; 6]);

impl UpgradeLevels {
    pub fn get(&self, kind: UpgradeType) -> u32 {
        self.0[kind.index()]
    }

    pub(crate) fn increment(&mut self, kind: UpgradeType) {
        let level = &mut self.0[kind.index()];
        *level = level.saturating_add(1);
    }

    /// Levels paired with their upgrade, in display order
    pub fn iter(&self) -> impl Iterator<Item = (UpgradeType, u32)> + '_ {
        UpgradeType::ALL.into_iter().map(|t| (t, self.get(t)))
    }
}

/// Stats before any upgrade
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseStats {
    /// Player walk speed (units/s)
    pub speed: f32,
    pub damage: f32,
    /// Seconds to cook one steak
    pub cook_speed: f32,
}

impl Default for BaseStats {
    fn default() -> Self {
        Self {
            speed: 5.0,
            damage: 10.0,
            cook_speed: 1.0,
        }
    }
}

/// Gameplay stats derived from upgrade levels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub speed: f32,
    pub damage: f32,
    pub inventory_cap: u32,
    pub cook_speed: f32,
    pub hunter_count: u32,
    pub cook_count: u32,
}

/// Recompute all stats from scratch
pub fn derive_stats(base: &BaseStats, levels: &UpgradeLevels) -> Stats {
    let cook_level = levels.get(UpgradeType::CookSpeed) as i32;
    Stats {
        speed: base.speed + levels.get(UpgradeType::Speed) as f32 * 0.5,
        damage: base.damage + levels.get(UpgradeType::Damage) as f32 * 5.0,
        inventory_cap: BASE_INVENTORY_CAP
            .saturating_add(levels.get(UpgradeType::Capacity).saturating_mul(2)),
        // 10% faster per level
        cook_speed: (base.cook_speed * 0.9_f32.powi(cook_level)).max(MIN_COOK_SECONDS),
        hunter_count: levels.get(UpgradeType::HireHunter),
        cook_count: levels.get(UpgradeType::HireCook),
    }
}
