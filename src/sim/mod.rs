//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (scenarios)
//! - Stable iteration order (insertion order of the world)
//! - No rendering or platform dependencies

pub mod collision;
pub mod replay;
pub mod scenario;
pub mod state;
pub mod tick;

pub use collision::{floor_clamp, soft_collision};
pub use replay::{Input, InputLog, replay};
pub use scenario::Scenario;
pub use state::{Body, World};
pub use tick::{step_body, tick};
