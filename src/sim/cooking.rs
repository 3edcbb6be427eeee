//! Grill and register rules
//!
//! Each check describes the transfer it would make; the orchestrator decides
//! whether and when to commit it. Nothing here touches the world state.

use serde::{Deserialize, Serialize};

/// What the player is carrying
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub raw_meat: u32,
    pub cooked_meat: u32,
}

impl Inventory {
    pub fn total(&self) -> u32 {
        self.raw_meat + self.cooked_meat
    }
}

/// The base grill
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grill {
    pub raw_meat: u32,
    pub cooked_meat: u32,
    /// Seconds spent on the steak currently cooking
    pub cooking_progress: f32,
    /// Raw meat slots
    pub capacity: u32,
}

impl Grill {
    pub fn new(capacity: u32) -> Self {
        Self {
            raw_meat: 0,
            cooked_meat: 0,
            cooking_progress: 0.0,
            capacity,
        }
    }

    pub fn free_slots(&self) -> u32 {
        self.capacity.saturating_sub(self.raw_meat)
    }
}

/// Grill fields produced by one cooking step (capacity never changes)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrillProgress {
    pub raw_meat: u32,
    pub cooked_meat: u32,
    pub cooking_progress: f32,
}

/// Transfer a station interaction would perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrillOp {
    None,
    /// Player raw meat -> grill
    Deposit { amount: u32 },
    /// Grill cooked meat -> player
    Collect { amount: u32 },
    /// Player cooked meat -> cash
    Sell { amount: u32 },
}

/// Deposit as much raw meat as the grill can take
pub fn check_deposit_interaction(player: &Inventory, grill: &Grill) -> GrillOp {
    if player.raw_meat == 0 || grill.raw_meat >= grill.capacity {
        return GrillOp::None;
    }
    GrillOp::Deposit {
        amount: player.raw_meat.min(grill.free_slots()),
    }
}

/// Pick up as much cooked meat as the backpack can hold
pub fn check_collect_interaction(player: &Inventory, grill: &Grill, player_cap: u32) -> GrillOp {
    if grill.cooked_meat == 0 {
        return GrillOp::None;
    }
    let carried = player.total();
    if carried >= player_cap {
        return GrillOp::None;
    }
    GrillOp::Collect {
        amount: grill.cooked_meat.min(player_cap - carried),
    }
}

/// Sell one cooked steak; the caller's throttle sets the sell rate
pub fn check_sell_interaction(player: &Inventory) -> GrillOp {
    if player.cooked_meat == 0 {
        return GrillOp::None;
    }
    GrillOp::Sell { amount: 1 }
}

/// Advance the grill by `dt` seconds
///
/// Returns `None` when there is nothing to cook. At most one steak finishes
/// per call; leftover time past `cook_speed` is dropped with the progress reset.
pub fn calculate_cooking_tick(grill: &Grill, dt: f32, cook_speed: f32) -> Option<GrillProgress> {
    if grill.raw_meat == 0 {
        return None;
    }

    let progress = grill.cooking_progress + dt;
    if progress >= cook_speed {
        return Some(GrillProgress {
            raw_meat: grill.raw_meat - 1,
            cooked_meat: grill.cooked_meat + 1,
            cooking_progress: 0.0,
        });
    }

    Some(GrillProgress {
        raw_meat: grill.raw_meat,
        cooked_meat: grill.cooked_meat,
        cooking_progress: progress,
    })
}
