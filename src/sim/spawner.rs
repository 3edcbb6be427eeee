//! Timed bear spawns in a ring around the base

use std::f32::consts::TAU;

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::config::SimConfig;
use crate::ground_polar;

/// Spawn timer plus the seeded RNG that places new bears
#[derive(Debug, Clone)]
pub struct Spawner {
    interval: f32,
    max_enemies: usize,
    min_radius: f32,
    max_radius: f32,
    timer: f32,
    rng: Pcg32,
}

impl Spawner {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            interval: config.spawn_interval,
            max_enemies: config.max_enemies,
            min_radius: config.spawn_min_radius,
            max_radius: config.spawn_max_radius,
            timer: 0.0,
            rng: Pcg32::seed_from_u64(config.seed),
        }
    }

    /// Seconds accumulated toward the next spawn attempt
    pub fn timer(&self) -> f32 {
        self.timer
    }

    /// Advance the timer; returns a spawn point when a bear should appear
    ///
    /// The timer resets whenever the interval elapses, including when the
    /// live cap blocks the spawn. A blocked spawn waits a full interval.
    pub fn advance(&mut self, dt: f32, live_enemies: usize) -> Option<Vec3> {
        self.timer += dt;
        if self.timer < self.interval {
            return None;
        }
        self.timer = 0.0;

        if live_enemies >= self.max_enemies {
            log::debug!("Spawn skipped, {} bears already out", live_enemies);
            return None;
        }

        let angle = self.rng.random::<f32>() * TAU;
        let dist = self.min_radius + self.rng.random::<f32>() * (self.max_radius - self.min_radius);
        Some(ground_polar(dist, angle))
    }
}
