//! Bear AI and player auto-attack
//!
//! Behavior is re-evaluated from scratch every tick from the distance to the
//! player. `Dead` is terminal.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::geometry::distance_squared;
use crate::consts::{AGGRO_RADIUS, ATTACK_RADIUS, ENEMY_MOVE_SPEED, PLAYER_ATTACK_RANGE, PLAYER_DPS};
use crate::ground;

/// Enemy behavior state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AiState {
    #[default]
    Idle,
    Chase,
    Attack,
    Dead,
}

/// A bear
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub x: f32,
    pub z: f32,
    pub hp: f32,
    pub max_hp: f32,
    pub state: AiState,
    /// Attack cooldown (seconds)
    pub cd: f32,
}

impl Enemy {
    pub fn new(id: u32, pos: Vec3, hp: f32) -> Self {
        Self {
            id,
            x: pos.x,
            z: pos.z,
            hp,
            max_hp: hp,
            state: AiState::Idle,
            cd: 0.0,
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec3 {
        ground(self.x, self.z)
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0.0
    }

    /// Health bar fill (0-1)
    pub fn hp_fraction(&self) -> f32 {
        if self.max_hp <= 0.0 {
            0.0
        } else {
            (self.hp / self.max_hp).clamp(0.0, 1.0)
        }
    }
}

/// Next state and position of an enemy after `dt` seconds
pub fn update_enemy_behavior(enemy: &Enemy, player_pos: Vec3, dt: f32) -> Enemy {
    if !enemy.is_alive() || enemy.state == AiState::Dead {
        return Enemy {
            state: AiState::Dead,
            ..enemy.clone()
        };
    }

    let dist_sq = distance_squared(enemy.pos(), player_pos);
    let state = if dist_sq < ATTACK_RADIUS * ATTACK_RADIUS {
        AiState::Attack
    } else if dist_sq < AGGRO_RADIUS * AGGRO_RADIUS {
        AiState::Chase
    } else {
        AiState::Idle
    };

    let (mut x, mut z) = (enemy.x, enemy.z);
    if state == AiState::Chase {
        let dx = player_pos.x - x;
        let dz = player_pos.z - z;
        let len = (dx * dx + dz * dz).sqrt();
        if len > 0.0 {
            let step = ENEMY_MOVE_SPEED * dt;
            x += dx / len * step;
            z += dz / len * step;
        }
    }

    Enemy {
        x,
        z,
        state,
        ..enemy.clone()
    }
}

/// Damage dealt to one enemy this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub enemy_id: u32,
    pub damage: f32,
}

/// Outcome of one tick of player auto-attack
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CombatResult {
    pub hits: Vec<Hit>,
}

/// Continuous-DPS auto-attack against the closest living enemy in range
pub fn resolve_combat(player_pos: Vec3, enemies: &[Enemy], dt: f32) -> CombatResult {
    let range_sq = PLAYER_ATTACK_RANGE * PLAYER_ATTACK_RANGE;

    let target = enemies
        .iter()
        .filter(|e| e.is_alive())
        .map(|e| (e, distance_squared(player_pos, e.pos())))
        .filter(|(_, d)| *d < range_sq)
        // First in spawn order wins ties
        .fold(None::<(&Enemy, f32)>, |best, (e, d)| match best {
            Some((_, best_d)) if best_d <= d => best,
            _ => Some((e, d)),
        });

    let hits = target
        .map(|(e, _)| Hit {
            enemy_id: e.id,
            damage: PLAYER_DPS * dt,
        })
        .into_iter()
        .collect();

    CombatResult { hits }
}
