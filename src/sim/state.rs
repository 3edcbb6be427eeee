//! World state and its mutation surface
//!
//! Fields are private: the orchestrator changes the world only through the
//! named operations below, and everything else reads it through getters.
//! Every operation clamps its amount so the capacity invariants hold no
//! matter what the caller asks for.

use serde::{Deserialize, Serialize};

use super::combat::{Enemy, Hit};
use super::cooking::{Grill, GrillProgress, Inventory};
use super::upgrades::{BaseStats, Stats, UpgradeLevels, UpgradeType, derive_stats, get_upgrade_cost};

/// Hired help (mirrors the hire counts in `Stats`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workers {
    pub hunters: u32,
    pub cooks: u32,
}

/// Things the host may want to react to (sounds, popups, HUD flashes)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    EnemySpawned { id: u32 },
    EnemyKilled { id: u32 },
    MeatSold { amount: u32, cash: u64 },
    UpgradePurchased { kind: UpgradeType, level: u32, cost: u64 },
    /// Player stepped onto (or off) the upgrade desk
    ShoppingChanged { shopping: bool },
    HunterDelivery { amount: u32 },
}

/// Compact HUD view
#[derive(Debug, Clone, Serialize)]
pub struct HudSnapshot {
    pub cash: u64,
    pub gems: u64,
    pub raw_meat: u32,
    pub cooked_meat: u32,
    pub inventory_cap: u32,
    pub grill_raw: u32,
    pub grill_cooked: u32,
    /// Fraction of the current steak cooked (0-1)
    pub cook_progress: f32,
    pub hunters: u32,
    pub cooks: u32,
}

/// The whole mutable game world
#[derive(Debug, Clone, Serialize)]
pub struct WorldState {
    cash: u64,
    gems: u64,
    inventory: Inventory,
    inventory_cap: u32,
    grill: Grill,
    /// Live enemies in spawn order
    enemies: Vec<Enemy>,
    upgrade_levels: UpgradeLevels,
    base_stats: BaseStats,
    stats: Stats,
    workers: Workers,
    next_enemy_id: u32,
}

impl Default for WorldState {
    fn default() -> Self {
        Self::new(BaseStats::default(), 3)
    }
}

impl WorldState {
    pub fn new(base_stats: BaseStats, grill_capacity: u32) -> Self {
        let upgrade_levels = UpgradeLevels::default();
        let stats = derive_stats(&base_stats, &upgrade_levels);
        Self {
            cash: 0,
            gems: 0,
            inventory: Inventory::default(),
            inventory_cap: stats.inventory_cap,
            grill: Grill::new(grill_capacity),
            enemies: Vec::new(),
            upgrade_levels,
            base_stats,
            stats,
            workers: Workers::default(),
            next_enemy_id: 1,
        }
    }

    // === Reads ===

    pub fn cash(&self) -> u64 {
        self.cash
    }

    pub fn gems(&self) -> u64 {
        self.gems
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn inventory_cap(&self) -> u32 {
        self.inventory_cap
    }

    pub fn grill(&self) -> &Grill {
        &self.grill
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn upgrade_levels(&self) -> &UpgradeLevels {
        &self.upgrade_levels
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn workers(&self) -> &Workers {
        &self.workers
    }

    /// Free backpack slots
    pub fn inventory_space(&self) -> u32 {
        self.inventory_cap.saturating_sub(self.inventory.total())
    }

    pub fn hud(&self) -> HudSnapshot {
        let cook_progress = if self.grill.raw_meat > 0 {
            (self.grill.cooking_progress / self.stats.cook_speed).clamp(0.0, 1.0)
        } else {
            0.0
        };
        HudSnapshot {
            cash: self.cash,
            gems: self.gems,
            raw_meat: self.inventory.raw_meat,
            cooked_meat: self.inventory.cooked_meat,
            inventory_cap: self.inventory_cap,
            grill_raw: self.grill.raw_meat,
            grill_cooked: self.grill.cooked_meat,
            cook_progress,
            hunters: self.workers.hunters,
            cooks: self.workers.cooks,
        }
    }

    // === Economy ===

    pub fn add_cash(&mut self, amount: u64) {
        self.cash = self.cash.saturating_add(amount);
    }

    /// Put raw meat in the backpack; returns how much fit
    pub fn add_raw_meat(&mut self, amount: u32) -> u32 {
        let added = amount.min(self.inventory_space());
        self.inventory.raw_meat += added;
        added
    }

    /// Move raw meat from the backpack onto the grill; returns amount moved
    pub fn deposit_to_grill(&mut self, amount: u32) -> u32 {
        let moved = amount
            .min(self.inventory.raw_meat)
            .min(self.grill.free_slots());
        self.inventory.raw_meat -= moved;
        self.grill.raw_meat += moved;
        moved
    }

    /// Move cooked meat from the grill into the backpack; returns amount moved
    pub fn collect_from_grill(&mut self, amount: u32) -> u32 {
        let moved = amount
            .min(self.grill.cooked_meat)
            .min(self.inventory_space());
        self.grill.cooked_meat -= moved;
        self.inventory.cooked_meat += moved;
        moved
    }

    /// Commit a cooking step
    pub fn update_grill(&mut self, progress: GrillProgress) {
        self.grill.raw_meat = progress.raw_meat.min(self.grill.capacity);
        self.grill.cooked_meat = progress.cooked_meat;
        self.grill.cooking_progress = progress.cooking_progress;
    }

    /// Drop raw meat straight onto the grill; anything past capacity is lost
    pub fn add_raw_meat_to_grill(&mut self, amount: u32) -> u32 {
        let added = amount.min(self.grill.free_slots());
        self.grill.raw_meat += added;
        added
    }

    /// Turn cooked meat into cash; returns the cash earned
    pub fn sell_cooked_meat(&mut self, amount: u32, price: u64) -> u64 {
        let sold = amount.min(self.inventory.cooked_meat);
        self.inventory.cooked_meat -= sold;
        let earned = price.saturating_mul(sold as u64);
        self.add_cash(earned);
        earned
    }

    // === Enemies ===

    /// Allocate an enemy ID (never reused)
    pub fn next_enemy_id(&mut self) -> u32 {
        let id = self.next_enemy_id;
        self.next_enemy_id += 1;
        id
    }

    pub fn spawn_enemy(&mut self, enemy: Enemy) {
        self.enemies.push(enemy);
    }

    pub fn update_enemies(&mut self, enemies: Vec<Enemy>) {
        self.enemies = enemies;
    }

    pub fn remove_enemy(&mut self, id: u32) {
        self.enemies.retain(|e| e.id != id);
    }

    pub fn apply_damage(&mut self, hits: &[Hit]) {
        for hit in hits {
            if let Some(enemy) = self.enemies.iter_mut().find(|e| e.id == hit.enemy_id) {
                enemy.hp -= hit.damage;
            }
        }
    }

    // === Upgrades ===

    /// Buy one level if affordable; a refused purchase changes nothing
    ///
    /// Returns the cost paid.
    pub fn buy_upgrade(&mut self, kind: UpgradeType) -> Option<u64> {
        let level = self.upgrade_levels.get(kind);
        let cost = get_upgrade_cost(kind, level);
        if self.cash < cost {
            return None;
        }

        self.cash -= cost;
        self.upgrade_levels.increment(kind);
        self.stats = derive_stats(&self.base_stats, &self.upgrade_levels);
        self.inventory_cap = self.stats.inventory_cap;
        self.workers = Workers {
            hunters: self.stats.hunter_count,
            cooks: self.stats.cook_count,
        };

        log::info!(
            "Bought {} level {} for ${}",
            kind.display_name(),
            level + 1,
            cost
        );
        Some(cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ground;

    fn loaded_world() -> WorldState {
        let mut world = WorldState::default();
        world.add_raw_meat(4);
        world
    }

    #[test]
    fn test_initial_world() {
        let world = WorldState::default();
        assert_eq!(world.cash(), 0);
        assert_eq!(world.gems(), 0);
        assert_eq!(world.inventory_cap(), 5);
        assert_eq!(world.grill().capacity, 3);
        assert!(world.enemies().is_empty());
        assert_eq!(*world.workers(), Workers::default());
    }

    #[test]
    fn test_add_raw_meat_clamps_to_backpack() {
        let mut world = WorldState::default();
        assert_eq!(world.add_raw_meat(3), 3);
        assert_eq!(world.add_raw_meat(3), 2);
        assert_eq!(world.inventory().raw_meat, 5);
        assert_eq!(world.add_raw_meat(1), 0);
    }

    #[test]
    fn test_deposit_and_collect() {
        let mut world = loaded_world();
        assert_eq!(world.deposit_to_grill(10), 3);
        assert_eq!(world.inventory().raw_meat, 1);
        assert_eq!(world.grill().raw_meat, 3);

        world.update_grill(GrillProgress {
            raw_meat: 0,
            cooked_meat: 6,
            cooking_progress: 0.0,
        });
        assert_eq!(world.collect_from_grill(6), 4);
        assert_eq!(world.inventory().cooked_meat, 4);
        assert_eq!(world.grill().cooked_meat, 2);
    }

    #[test]
    fn test_grill_overflow_is_discarded() {
        let mut world = WorldState::default();
        assert_eq!(world.add_raw_meat_to_grill(2), 2);
        assert_eq!(world.add_raw_meat_to_grill(5), 1);
        assert_eq!(world.grill().raw_meat, 3);
    }

    #[test]
    fn test_sell_pays_per_unit() {
        let mut world = WorldState::default();
        world.update_grill(GrillProgress {
            raw_meat: 0,
            cooked_meat: 2,
            cooking_progress: 0.0,
        });
        world.collect_from_grill(2);
        assert_eq!(world.sell_cooked_meat(1, 10), 10);
        assert_eq!(world.sell_cooked_meat(5, 10), 10);
        assert_eq!(world.sell_cooked_meat(1, 10), 0);
        assert_eq!(world.cash(), 20);
    }

    #[test]
    fn test_enemy_lifecycle() {
        let mut world = WorldState::default();
        let a = world.next_enemy_id();
        let b = world.next_enemy_id();
        assert!(b > a);
        world.spawn_enemy(Enemy::new(a, ground(1.0, 0.0), 100.0));
        world.spawn_enemy(Enemy::new(b, ground(2.0, 0.0), 100.0));

        world.apply_damage(&[Hit {
            enemy_id: b,
            damage: 30.0,
        }]);
        assert_eq!(world.enemies()[0].hp, 100.0);
        assert_eq!(world.enemies()[1].hp, 70.0);

        world.remove_enemy(a);
        assert_eq!(world.enemies().len(), 1);
        assert_eq!(world.enemies()[0].id, b);

        // IDs keep climbing after removal
        assert!(world.next_enemy_id() > b);
    }

    #[test]
    fn test_buy_upgrade_charges_pre_increment_cost() {
        let mut world = WorldState::default();
        world.add_cash(130);

        assert_eq!(world.buy_upgrade(UpgradeType::Speed), Some(50));
        assert_eq!(world.cash(), 80);
        assert_eq!(world.upgrade_levels().get(UpgradeType::Speed), 1);
        assert_eq!(world.stats().speed, 5.5);

        assert_eq!(world.buy_upgrade(UpgradeType::Speed), Some(75));
        assert_eq!(world.cash(), 5);
    }

    #[test]
    fn test_refused_purchase_is_a_no_op() {
        let mut world = WorldState::default();
        world.add_cash(49);
        let before = world.clone();
        assert_eq!(world.buy_upgrade(UpgradeType::Speed), None);
        assert_eq!(world.cash(), before.cash());
        assert_eq!(world.upgrade_levels(), before.upgrade_levels());
        assert_eq!(world.stats(), before.stats());
    }

    #[test]
    fn test_capacity_and_hires_flow_into_world() {
        let mut world = WorldState::default();
        world.add_cash(75 + 500 + 300);
        world.buy_upgrade(UpgradeType::Capacity);
        world.buy_upgrade(UpgradeType::HireHunter);
        world.buy_upgrade(UpgradeType::HireCook);

        assert_eq!(world.inventory_cap(), 7);
        assert_eq!(world.workers().hunters, 1);
        assert_eq!(world.workers().cooks, 1);
        assert_eq!(world.stats().hunter_count, 1);
        assert_eq!(world.cash(), 0);
    }

    #[test]
    fn test_hud_progress_ratio() {
        let mut world = WorldState::default();
        world.update_grill(GrillProgress {
            raw_meat: 2,
            cooked_meat: 0,
            cooking_progress: 0.25,
        });
        let hud = world.hud();
        assert_eq!(hud.grill_raw, 2);
        assert_eq!(hud.cook_progress, 0.25);
    }
}
