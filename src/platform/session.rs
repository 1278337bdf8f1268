//! Host-owned simulation session
//!
//! Bundles the world with everything a host adapter needs around it:
//! settings, a fixed-rate stepper and an optional input recording.
//! Spawn, tick and draw are only ever called from one logical thread.

use super::Event;
use super::stepper::FixedStepper;
use crate::persistence::{self, PersistError};
use crate::renderer::{self, DrawCommand, Surface};
use crate::settings::{Settings, SettingsError};
use crate::sim::{InputLog, World, tick};

#[derive(Debug, Clone)]
pub struct Session {
    world: World,
    settings: Settings,
    stepper: FixedStepper,
    /// World state when recording (re)started
    log_base: World,
    log: Option<InputLog>,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        let log = settings.record_inputs.then(InputLog::new);
        Self {
            world: World::new(),
            stepper: FixedStepper::new(&settings),
            settings,
            log_base: World::new(),
            log,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Swap in new host settings. The world is untouched.
    ///
    /// Turning recording on starts a fresh log from the current world;
    /// turning it off drops the log.
    pub fn set_settings(&mut self, settings: Settings) -> Result<(), SettingsError> {
        settings.validate()?;
        self.stepper = FixedStepper::new(&settings);
        match (settings.record_inputs, self.log.is_some()) {
            (true, false) => {
                self.log = Some(InputLog::new());
                self.log_base = self.world.clone();
            }
            (false, true) => {
                self.log = None;
                self.log_base = World::new();
            }
            _ => {}
        }
        self.settings = settings;
        Ok(())
    }

    /// Append a ball at (x, y)
    pub fn spawn(&mut self, x: f64, y: f64) {
        self.world.spawn(x, y);
        if let Some(log) = &mut self.log {
            log.record_spawn(x, y);
        }
    }

    /// Advance the simulation by exactly one fixed tick
    pub fn fixed_update(&mut self) {
        tick(&mut self.world);
        if let Some(log) = &mut self.log {
            log.record_tick();
        }
    }

    /// Feed a rendered frame's elapsed seconds; runs and returns whole ticks
    pub fn advance(&mut self, frame_dt: f64) -> u32 {
        let ticks = self.stepper.advance(frame_dt);
        for _ in 0..ticks {
            self.fixed_update();
        }
        ticks
    }

    pub fn draw_commands(&self) -> Vec<DrawCommand> {
        renderer::draw_with_color(&self.world, self.settings.color())
    }

    /// Paint the current state onto the host surface
    pub fn draw(&self, surface: &mut dyn Surface) {
        renderer::render(&self.draw_commands(), surface);
    }

    /// Dispatch one host event
    pub fn handle(&mut self, event: Event, surface: &mut dyn Surface) {
        match event {
            Event::FixedUpdate => self.fixed_update(),
            Event::Draw => self.draw(surface),
            Event::PointerDown { player, x, y, .. } => {
                log::trace!("player {} spawned a ball at ({}, {})", player, x, y);
                self.spawn(x, y);
            }
            Event::PlayerJoined { player } => log::info!("Player {} joined", player),
            Event::PlayerLeft { player } => log::info!("Player {} left", player),
            Event::PointerMove { .. } | Event::PointerUp { .. } => {
                log::trace!("Ignoring {:?}", event);
            }
        }
    }

    /// Bit-exact snapshot of the current world
    pub fn save_rollback(&self) -> Vec<u8> {
        persistence::encode_rollback(&self.world)
    }

    /// Replace the world with a snapshot.
    ///
    /// If recording, the log restarts from the restored state.
    pub fn load_rollback(&mut self, bytes: &[u8]) -> Result<(), PersistError> {
        let world = persistence::decode_rollback(bytes)?;
        log::debug!("Restored tick {} ({} bodies)", world.ticks(), world.len());
        self.world = world;
        self.stepper.reset();
        if let Some(log) = &mut self.log {
            *log = InputLog::new();
            self.log_base = self.world.clone();
        }
        Ok(())
    }

    pub fn input_log(&self) -> Option<&InputLog> {
        self.log.as_ref()
    }

    /// Rebuild the current world from the recording, if there is one
    pub fn replay_recorded(&self) -> Option<World> {
        self.log.as_ref().map(|log| {
            let mut world = self.log_base.clone();
            log.apply(&mut world);
            world
        })
    }

    /// Hex BLAKE3 digest of the current world
    pub fn checksum_hex(&self) -> String {
        persistence::state_digest(&self.world).to_hex().to_string()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
