//! Platform abstraction layer
//!
//! Turns host events into simulation calls:
//! - Event dispatch (pointer input, fixed update, draw)
//! - Fixed-rate stepping from wall-clock frame deltas
//! - Browser bindings (wasm32 only)

pub mod session;
pub mod stepper;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use session::Session;
pub use stepper::FixedStepper;

/// Events delivered by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// One fixed-rate tick
    FixedUpdate,
    /// Paint the current state. Host discards any side effects.
    Draw,
    PlayerJoined {
        player: u32,
    },
    PlayerLeft {
        player: u32,
    },
    PointerMove {
        player: u32,
        pointer_id: u32,
        x: f64,
        y: f64,
    },
    /// Spawns a ball at (x, y)
    PointerDown {
        player: u32,
        pointer_id: u32,
        x: f64,
        y: f64,
    },
    PointerUp {
        player: u32,
        pointer_id: u32,
        is_mouse: bool,
        x: f64,
        y: f64,
    },
}
