//! Simulation state: bodies and the world that owns them
//!
//! Everything a peer needs to reproduce a session lives here.

use bytemuck::{Pod, Zeroable};
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A ball
///
/// All bodies share `BALL_RADIUS`, so only kinematic state is stored.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Body {
    pub pos: DVec2,
    pub vel: DVec2,
    /// Always zero today; reserved for future forces
    pub acc: DVec2,
}

impl Body {
    /// A body at rest at (x, y)
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            pos: DVec2::new(x, y),
            vel: DVec2::ZERO,
            acc: DVec2::ZERO,
        }
    }
}

/// Ordered collection of every body in the simulation
///
/// Insertion order is iteration order, and iteration order is observable:
/// collision corrections depend on which neighbors were already advanced.
/// Bodies are never removed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub(crate) bodies: Vec<Body>,
    /// Completed ticks
    pub(crate) ticks: u64,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a world from previously captured state
    pub fn from_parts(bodies: Vec<Body>, ticks: u64) -> Self {
        Self { bodies, ticks }
    }

    /// Append a body at rest at (x, y). Returns its index.
    ///
    /// No validation: duplicate and non-finite positions are accepted.
    pub fn spawn(&mut self, x: f64, y: f64) -> usize {
        let index = self.bodies.len();
        self.bodies.push(Body::new(x, y));
        log::trace!("spawned body {} at ({}, {})", index, x, y);
        index
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Bit-level equality (distinguishes NaN payloads and signed zeros)
    pub fn bit_eq(&self, other: &World) -> bool {
        self.ticks == other.ticks
            && bytemuck::cast_slice::<Body, u8>(&self.bodies)
                == bytemuck::cast_slice::<Body, u8>(&other.bodies)
    }
}
