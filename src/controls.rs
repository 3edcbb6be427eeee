//! Keyboard snapshot and player movement
//!
//! Key events update `MovementKeys` whenever they arrive; the host reads the
//! snapshot once per frame and moves the player with `movement_step`.

use glam::Vec3;

use crate::sim::upgrades::UpgradeType;

/// Held movement keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementKeys {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl MovementKeys {
    /// Handle a key press (`KeyboardEvent.code`); returns false for unmapped keys
    pub fn key_down(&mut self, code: &str) -> bool {
        self.set(code, true)
    }

    /// Handle a key release (`KeyboardEvent.code`)
    pub fn key_up(&mut self, code: &str) -> bool {
        self.set(code, false)
    }

    fn set(&mut self, code: &str, held: bool) -> bool {
        let slot = match code {
            "KeyW" | "ArrowUp" => &mut self.forward,
            "KeyS" | "ArrowDown" => &mut self.backward,
            "KeyA" | "ArrowLeft" => &mut self.left,
            "KeyD" | "ArrowRight" => &mut self.right,
            _ => return false,
        };
        *slot = held;
        true
    }

    /// Unit-ish direction on the ground plane (forward is -Z), not normalized
    pub fn direction(&self) -> Vec3 {
        let mut dir = Vec3::ZERO;
        if self.forward {
            dir.z -= 1.0;
        }
        if self.backward {
            dir.z += 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        dir
    }
}

/// Player displacement for this frame: `speed * dt` along the held direction
///
/// Diagonals are normalized so they are not faster. Opposing keys cancel.
pub fn movement_step(keys: &MovementKeys, speed: f32, dt: f32) -> Vec3 {
    keys.direction().normalize_or_zero() * speed * dt
}

/// Yaw that faces along a movement step, `None` when standing still
pub fn facing(step: Vec3) -> Option<f32> {
    if step.length_squared() > 0.0 {
        Some(step.x.atan2(step.z))
    } else {
        None
    }
}

/// Digit keys 1-6 pick an upgrade card at the desk
pub fn upgrade_hotkey(code: &str) -> Option<UpgradeType> {
    let index = match code {
        "Digit1" | "Numpad1" => 0,
        "Digit2" | "Numpad2" => 1,
        "Digit3" | "Numpad3" => 2,
        "Digit4" | "Numpad4" => 3,
        "Digit5" | "Numpad5" => 4,
        "Digit6" | "Numpad6" => 5,
        _ => return None,
    };
    Some(UpgradeType::ALL[index])
}
