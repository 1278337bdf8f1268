//! Fixed timestep simulation tick
//!
//! Core update that advances the world deterministically. The exact order
//! of operations below is load-bearing: peers replaying the same inputs
//! must land on bit-identical state.

use super::collision::{floor_clamp, soft_collision};
use super::state::World;
use crate::consts::*;

/// Advance every body by one fixed timestep, in world order.
///
/// Bodies are stepped in place one after another, so body `i` sees bodies
/// `0..i` at their new positions and bodies `i+1..` at their old ones.
pub fn tick(world: &mut World) {
    for index in 0..world.bodies.len() {
        step_body(world, index);
    }
    world.ticks += 1;
    log::trace!("tick {} ({} bodies)", world.ticks, world.bodies.len());
}

/// Advance the body at `index` by one fixed timestep.
///
/// 1. Integrate acceleration and gravity into velocity
/// 2. Tentative position from the new velocity
/// 3. Soft collision against every other body (velocity only)
/// 4. Floor clamp and bounce
/// 5. Commit the tentative position
///
/// Collision corrections land after the tentative position is computed, so
/// they move the body starting next tick.
pub fn step_body(world: &mut World, index: usize) {
    let mut body = world.bodies[index];

    body.vel.x += body.acc.x * DT;
    body.vel.y += (body.acc.y + GRAVITY) * DT;

    let mut next = body.pos + body.vel * DT;

    for (other_index, other) in world.bodies.iter().enumerate() {
        if other_index == index {
            continue;
        }
        if let Some(correction) = soft_collision(next, body.pos, other.pos) {
            body.vel -= correction;
        }
    }

    if let Some((y, vy)) = floor_clamp(next.y, body.vel.y) {
        next.y = y;
        body.vel.y = vy;
    }

    body.pos = next;
    world.bodies[index] = body;
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    /// Far above the floor: nothing but gravity acts for many ticks
    const HIGH: f64 = -100_000.0;

    #[test]
    fn test_free_fall_velocity() {
        let mut world = World::new();
        world.spawn(0.0, HIGH);

        for k in 1..=200u32 {
            tick(&mut world);
            let expected = k as f64 * GRAVITY * DT;
            let vy = world.bodies()[0].vel.y;
            assert!((vy - expected).abs() < 1e-9, "tick {k}: {vy} != {expected}");
            assert_eq!(world.bodies()[0].vel.x, 0.0);
            assert_eq!(world.bodies()[0].pos.x, 0.0);
        }
        assert_eq!(world.ticks(), 200);
    }

    #[test]
    fn test_position_uses_updated_velocity() {
        let mut world = World::new();
        world.spawn(0.0, 0.0);
        tick(&mut world);

        let vy = GRAVITY * DT;
        assert_eq!(world.bodies()[0].vel.y, vy);
        assert_eq!(world.bodies()[0].pos.y, 0.0 + vy * DT);
    }

    #[test]
    fn test_floor_clamp_and_bounce() {
        let mut world = World::new();
        world.spawn(0.0, FLOOR_Y);
        tick(&mut world);

        let body = world.bodies()[0];
        let vy_before_floor = (0.0 + GRAVITY) * DT;
        assert_eq!(body.pos.y, FLOOR_Y);
        assert_eq!(body.vel.y, -vy_before_floor * RESTITUTION);
    }

    #[test]
    fn test_body_never_ends_below_floor() {
        let mut world = World::new();
        world.spawn(0.0, FLOOR_Y - 50.0);
        for _ in 0..20_000 {
            tick(&mut world);
            assert!(world.bodies()[0].pos.y <= FLOOR_Y);
        }
    }

    #[test]
    fn test_overlap_softening() {
        let mut world = World::new();
        world.spawn(100.0, 100.0);
        world.spawn(100.0, 100.0);
        tick(&mut world);

        // Correction = what was subtracted from plain free-fall velocity
        let free_fall = DVec2::new(0.0, GRAVITY * DT);
        let a = free_fall - world.bodies()[0].vel;
        let b = free_fall - world.bodies()[1].vel;
        let full = 2.0 * BALL_RADIUS * SPRING;

        // Body 0 sees body 1 straight below its tentative spot: vertical push
        assert!(a.x.abs() < 1e-9);
        assert!((a.y - full).abs() < 1e-9);

        // Body 1 then sees body 0 exactly at its own tentative spot, and
        // atan2(0, 0) == 0 turns that into a push along x. The corrections
        // are orthogonal rather than opposite, because body 0 has already
        // moved when body 1 reads it.
        assert!((b.x - full).abs() < 1e-9);
        assert!(b.y > 0.0 && b.y < 1e-4);

        // Net effect still separates the pair: one heads up, one heads left
        assert!(world.bodies()[0].vel.y < 0.0 && world.bodies()[1].vel.y > 0.0);
        assert!(world.bodies()[1].vel.x < 0.0);
    }

    #[test]
    fn test_overlap_does_not_move_same_tick() {
        let mut world = World::new();
        world.spawn(100.0, 100.0);
        world.spawn(100.0, 100.0);
        tick(&mut world);

        // Positions only reflect gravity this tick
        let expected_y = 100.0 + (GRAVITY * DT) * DT;
        assert_eq!(world.bodies()[0].pos, DVec2::new(100.0, expected_y));
        assert_eq!(world.bodies()[1].pos, DVec2::new(100.0, expected_y));
    }

    #[test]
    fn test_multiple_overlaps_compound() {
        let mut single = World::new();
        single.spawn(0.0, 0.0);
        single.spawn(-30.0, 0.0);
        step_body(&mut single, 0);

        let mut double = World::new();
        double.spawn(0.0, 0.0);
        double.spawn(-30.0, 0.0);
        double.spawn(-30.0, 0.0);
        step_body(&mut double, 0);

        // Second identical neighbor doubles the push
        let single_push = single.bodies()[0].vel.x;
        let double_push = double.bodies()[0].vel.x;
        assert!(single_push < 0.0);
        assert!((double_push - 2.0 * single_push).abs() < 1e-12);
    }

    #[test]
    fn test_order_dependence() {
        // Overlapping pair; swapping insertion order changes the outcome
        let mut ab = World::new();
        ab.spawn(0.0, 100.0);
        ab.spawn(25.0, 100.0);

        let mut ba = World::new();
        ba.spawn(25.0, 100.0);
        ba.spawn(0.0, 100.0);

        for _ in 0..10 {
            tick(&mut ab);
            tick(&mut ba);
        }

        let ab_left = ab.bodies()[0];
        let ba_left = ba.bodies()[1];
        assert_ne!(ab_left.vel, ba_left.vel);
    }

    #[test]
    fn test_later_bodies_see_advanced_neighbors() {
        // Body 1 reads body 0 after body 0 has already moved this tick
        let mut world = World::new();
        world.spawn(0.0, 100.0);
        world.spawn(30.0, 100.0);

        let mut expected = world.clone();
        step_body(&mut expected, 0);
        step_body(&mut expected, 1);

        tick(&mut world);
        assert_eq!(world.bodies(), expected.bodies());
    }

    #[test]
    fn test_nan_propagates_silently() {
        let mut world = World::new();
        world.spawn(f64::NAN, 0.0);
        world.spawn(0.0, 0.0);
        tick(&mut world);
        assert!(world.bodies()[0].pos.x.is_nan());
        assert_eq!(world.len(), 2);
    }

    #[test]
    fn test_empty_world_ticks() {
        let mut world = World::new();
        tick(&mut world);
        assert_eq!(world.ticks(), 1);
        assert!(world.is_empty());
    }
}
