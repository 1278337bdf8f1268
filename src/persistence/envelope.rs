//! Versioned JSON save envelope
//!
//! Human-readable, digest-checked. JSON has no NaN or infinity, so worlds
//! with non-finite state must use the rollback encoding instead.

use serde::{Deserialize, Serialize};

use super::PersistError;
use super::rollback::state_digest;
use crate::sim::{Body, World};

/// Current envelope version
pub const SAVE_VERSION: u32 = 1;

/// On-disk save format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveEnvelope {
    pub version: u32,
    pub ticks: u64,
    pub bodies: Vec<Body>,
    /// Hex BLAKE3 digest of the rollback encoding
    pub digest: String,
}

impl SaveEnvelope {
    pub fn from_world(world: &World) -> Result<Self, PersistError> {
        let finite = world
            .bodies()
            .iter()
            .all(|b| b.pos.is_finite() && b.vel.is_finite() && b.acc.is_finite());
        if !finite {
            return Err(PersistError::NonFinite);
        }

        Ok(Self {
            version: SAVE_VERSION,
            ticks: world.ticks(),
            bodies: world.bodies().to_vec(),
            digest: state_digest(world).to_hex().to_string(),
        })
    }

    /// Rebuild the world, checking version and digest
    pub fn into_world(self) -> Result<World, PersistError> {
        if self.version != SAVE_VERSION {
            return Err(PersistError::UnsupportedVersion(self.version));
        }

        let world = World::from_parts(self.bodies, self.ticks);
        if state_digest(&world).to_hex().as_str() != self.digest {
            log::warn!("Save digest mismatch at tick {}", self.ticks);
            return Err(PersistError::DigestMismatch);
        }
        Ok(world)
    }
}

/// Serialize a world to a JSON save
pub fn save_json(world: &World) -> Result<String, PersistError> {
    let envelope = SaveEnvelope::from_world(world)?;
    Ok(serde_json::to_string(&envelope)?)
}

/// Load a world from a JSON save
pub fn load_json(json: &str) -> Result<World, PersistError> {
    let envelope: SaveEnvelope = serde_json::from_str(json)?;
    envelope.into_world()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Scenario, tick};

    fn sample_world() -> World {
        let mut world = World::new();
        Scenario::new(5, 6).spawn_into(&mut world);
        for _ in 0..40 {
            tick(&mut world);
        }
        world
    }

    #[test]
    fn test_save_load_is_bit_exact() {
        let world = sample_world();
        let json = save_json(&world).unwrap();
        let loaded = load_json(&json).unwrap();
        assert!(loaded.bit_eq(&world));
    }

    #[test]
    fn test_tampered_save_is_rejected() {
        let world = sample_world();
        let mut envelope = SaveEnvelope::from_world(&world).unwrap();
        envelope.bodies[0].pos.x += 1.0;
        assert!(matches!(envelope.into_world(), Err(PersistError::DigestMismatch)));
    }

    #[test]
    fn test_wrong_version_is_rejected() {
        let mut envelope = SaveEnvelope::from_world(&sample_world()).unwrap();
        envelope.version = 2;
        assert!(matches!(
            envelope.into_world(),
            Err(PersistError::UnsupportedVersion(2))
        ));
    }

    #[test]
    fn test_large_version_reported_as_is() {
        let mut envelope = SaveEnvelope::from_world(&sample_world()).unwrap();
        envelope.version = 70_000;
        let json = serde_json::to_string(&envelope).unwrap();
        assert!(matches!(
            load_json(&json),
            Err(PersistError::UnsupportedVersion(70_000))
        ));
    }

    #[test]
    fn test_non_finite_cannot_be_saved() {
        let mut world = World::new();
        world.spawn(f64::INFINITY, 0.0);
        assert!(matches!(save_json(&world), Err(PersistError::NonFinite)));
    }

    #[test]
    fn test_garbage_json() {
        assert!(matches!(load_json("{not json"), Err(PersistError::Json(_))));
    }
}
