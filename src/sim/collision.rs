//! Soft ball-ball collision and floor response
//!
//! Overlaps are never resolved by moving bodies. Each overlapping neighbor
//! subtracts a spring-scaled offset (current position to a separation
//! target) from the velocity, and the new velocity only shows up in
//! position on the following tick.

use glam::DVec2;

use crate::consts::*;

/// Velocity correction from one neighbor, or `None` if there is no overlap.
///
/// - `next`: tentative position of the body being stepped
/// - `current`: its position at the start of its step
/// - `other`: the neighbor's position as currently stored in the world
///
/// The returned vector is subtracted from the body's velocity. The target
/// sits `2 * BALL_RADIUS` from `other` along the line from `other` to `next`,
/// but the correction is measured from `current`, so it is not equal and
/// opposite between a pair.
pub fn soft_collision(next: DVec2, current: DVec2, other: DVec2) -> Option<DVec2> {
    let delta = next - other;
    let distance = delta.length();
    let min_dist = BALL_RADIUS + BALL_RADIUS;

    if distance < min_dist {
        // atan2(0, 0) == 0, so coincident centers push along +x
        let angle = delta.y.atan2(delta.x);
        let target = other + DVec2::new(angle.cos(), angle.sin()) * min_dist;
        Some((target - current) * SPRING)
    } else {
        None
    }
}

/// Floor response for a tentative y.
///
/// Returns the clamped y and the reflected, damped vertical velocity when
/// the body would end up below the floor.
pub fn floor_clamp(next_y: f64, vy: f64) -> Option<(f64, f64)> {
    if next_y > FLOOR_Y {
        Some((FLOOR_Y, -vy * RESTITUTION))
    } else {
        None
    }
}
