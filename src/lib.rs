//! Ball Pit - a deterministic falling-ball simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, soft collisions, floor, replay)
//! - `renderer`: Draw command generation for the host's 2D surface
//! - `platform`: Host event adapter, fixed-step driver and wasm bindings
//! - `persistence`: Rollback encoding, JSON saves and integrity digests
//! - `settings`: Host-side preferences (cadence, color, recording)

pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use platform::{Event, FixedStepper, Session};
pub use renderer::{Color, DrawCommand, Surface};
pub use settings::Settings;
pub use sim::{Body, World};

/// Simulation configuration constants
///
/// Compiled in. Every peer replaying the same inputs must agree on these,
/// so none of them is exposed through `Settings`.
pub mod consts {
    /// Radius shared by every body
    pub const BALL_RADIUS: f64 = 20.0;
    /// Body mass (no force reads it yet)
    pub const BALL_MASS: f64 = 1.0;
    /// Floor height; +y points down, so bodies rest at `y == FLOOR_Y`
    pub const FLOOR_Y: f64 = 400.0;
    /// Downward acceleration
    pub const GRAVITY: f64 = 0.5;
    /// Fixed simulation timestep (logical units, not seconds)
    pub const DT: f64 = 0.01;
    /// Fraction of vertical speed kept after a floor bounce
    pub const RESTITUTION: f64 = 0.8;
    /// Soft collision spring coefficient
    pub const SPRING: f64 = 0.1;

    /// Host tick cadence (ticks per wall-clock second)
    pub const FIXED_UPDATE_HZ: u32 = 60;
    /// Maximum ticks run for a single rendered frame
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Frame deltas above this (seconds) are clamped
    pub const MAX_FRAME_DT: f64 = 0.1;

    /// Default ball color (RGBA)
    pub const BALL_COLOR: [u8; 4] = [255, 255, 255, 255];
}
