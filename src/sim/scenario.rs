//! Seeded spawn layouts
//!
//! Used for demos and soak tests. Same seed, same positions, on every peer.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::World;
use crate::consts::FLOOR_Y;

/// A reproducible batch of spawn positions inside a rectangle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub seed: u64,
    pub count: u32,
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Scenario {
    /// `count` balls scattered across a 640-wide area above the floor
    pub fn new(seed: u64, count: u32) -> Self {
        Self {
            seed,
            count,
            min_x: 0.0,
            max_x: 640.0,
            min_y: 0.0,
            max_y: FLOOR_Y,
        }
    }

    fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }

    /// Spawn positions in spawn order
    pub fn positions(&self) -> Vec<(f64, f64)> {
        let mut rng = self.to_rng();
        (0..self.count)
            .map(|_| {
                let x = lerp(self.min_x, self.max_x, rng.random::<f64>());
                let y = lerp(self.min_y, self.max_y, rng.random::<f64>());
                (x, y)
            })
            .collect()
    }

    /// Spawn every position into `world`
    pub fn spawn_into(&self, world: &mut World) {
        for (x, y) in self.positions() {
            world.spawn(x, y);
        }
        log::debug!("scenario seed {} spawned {} bodies", self.seed, self.count);
    }
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
