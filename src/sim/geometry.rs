//! Ground-plane distance checks
//!
//! Gameplay is top-down, so the Y axis is ignored everywhere. Range checks
//! compare squared distances to stay off the square root on the per-frame path.

use glam::Vec3;

/// Squared horizontal distance between two points (X/Z only)
#[inline]
pub fn distance_squared(p1: Vec3, p2: Vec3) -> f32 {
    let dx = p1.x - p2.x;
    let dz = p1.z - p2.z;
    dx * dx + dz * dz
}

/// True if both points exist and lie within `radius` of each other
#[inline]
pub fn is_within_range(p1: Option<Vec3>, p2: Option<Vec3>, radius: f32) -> bool {
    match (p1, p2) {
        (Some(a), Some(b)) => distance_squared(a, b) <= radius * radius,
        _ => false,
    }
}
