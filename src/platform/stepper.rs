//! Fixed timestep accumulator
//!
//! The host renders at whatever rate it likes; the simulation only ever
//! advances in whole fixed ticks.

use crate::settings::Settings;

/// Converts frame deltas into a number of fixed ticks to run
#[derive(Debug, Clone)]
pub struct FixedStepper {
    /// Wall-clock seconds per tick
    step: f64,
    max_substeps: u32,
    max_frame_dt: f64,
    accumulator: f64,
}

impl FixedStepper {
    pub fn new(settings: &Settings) -> Self {
        Self {
            step: settings.fixed_step(),
            max_substeps: settings.max_substeps,
            max_frame_dt: settings.max_frame_dt,
            accumulator: 0.0,
        }
    }

    /// Feed one frame's elapsed time and get the number of ticks to run.
    ///
    /// Frame deltas are clamped to `max_frame_dt`, and at most
    /// `max_substeps` ticks are returned per call to prevent a spiral of
    /// death. Time beyond the cap is dropped rather than carried over.
    pub fn advance(&mut self, frame_dt: f64) -> u32 {
        // min/max rather than clamp: a bad max_frame_dt must not panic
        let dt = if frame_dt.is_finite() {
            frame_dt.min(self.max_frame_dt).max(0.0)
        } else {
            0.0
        };
        self.accumulator += dt;

        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < self.max_substeps {
            self.accumulator -= self.step;
            ticks += 1;
        }

        if self.accumulator >= self.step {
            log::debug!(
                "Dropping {:.4}s of simulation time (substep cap {})",
                self.accumulator,
                self.max_substeps
            );
            self.accumulator = 0.0;
        }

        ticks
    }

    /// Unconsumed time, as a fraction of one tick
    pub fn alpha(&self) -> f64 {
        self.accumulator / self.step
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
