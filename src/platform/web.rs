//! Browser bindings
//!
//! Exposes a [`Simulation`] handle to JavaScript. The page owns the
//! handle and calls `spawn`/`fixed_update`/`draw`; drawing goes back out
//! through `env.set_color` and `env.draw_circle`.
//!
//! `env` is looked up as a JS global, not as a wasm import module. The page
//! must define it before the first `draw`:
//!
//! ```js
//! globalThis.env = {
//!     set_color: (r, g, b, a) => { ctx.fillStyle = `rgba(${r},${g},${b},${a / 255})`; },
//!     draw_circle: (x, y, radius) => { ctx.beginPath(); ctx.arc(x, y, radius, 0, 2 * Math.PI); ctx.fill(); },
//! };
//! ```

use wasm_bindgen::prelude::*;

use super::Session;
use crate::renderer::{Color, Surface};
use crate::settings::Settings;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = env)]
    fn set_color(r: u8, g: u8, b: u8, a: u8);

    #[wasm_bindgen(js_namespace = env)]
    fn draw_circle(x: f64, y: f64, radius: f64);
}

/// Forwards draw calls to the host canvas
struct HostSurface;

impl Surface for HostSurface {
    fn set_color(&mut self, color: Color) {
        set_color(color.r, color.g, color.b, color.a);
    }

    fn draw_circle(&mut self, x: f64, y: f64, radius: f64) {
        draw_circle(x, y, radius);
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Ball pit starting...");
}

/// One independent simulation owned by the page
#[wasm_bindgen]
pub struct Simulation {
    session: Session,
}

#[wasm_bindgen]
impl Simulation {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Simulation {
        Simulation {
            session: Session::new(Settings::load()),
        }
    }

    pub fn spawn(&mut self, x: f64, y: f64) {
        self.session.spawn(x, y);
    }

    /// Pointer press from any player spawns a ball there
    pub fn pointer_down(&mut self, player: u32, pointer_id: u32, x: f64, y: f64) {
        self.session.handle(
            super::Event::PointerDown {
                player,
                pointer_id,
                x,
                y,
            },
            &mut HostSurface,
        );
    }

    pub fn fixed_update(&mut self) {
        self.session.fixed_update();
    }

    /// Run however many fixed ticks `frame_dt` seconds cover
    pub fn advance(&mut self, frame_dt: f64) -> u32 {
        self.session.advance(frame_dt)
    }

    pub fn draw(&self) {
        self.session.draw(&mut HostSurface);
    }

    pub fn body_count(&self) -> u32 {
        self.session.world().len() as u32
    }

    pub fn ticks(&self) -> u64 {
        self.session.world().ticks()
    }

    /// Bit-exact state for rollback
    pub fn snapshot(&self) -> Vec<u8> {
        self.session.save_rollback()
    }

    pub fn restore(&mut self, bytes: &[u8]) -> Result<(), JsError> {
        self.session.load_rollback(bytes)?;
        Ok(())
    }

    pub fn checksum(&self) -> String {
        self.session.checksum_hex()
    }

    /// Current host settings as JSON
    pub fn settings(&self) -> Result<String, JsError> {
        Ok(self.session.settings().to_json()?)
    }

    /// Apply and persist host settings given as JSON (missing fields take defaults)
    pub fn configure(&mut self, json: &str) -> Result<(), JsError> {
        let settings = Settings::from_json(json)?;
        self.session.set_settings(settings)?;
        self.session.settings().save();
        Ok(())
    }

    pub fn save_json(&self) -> Result<String, JsError> {
        Ok(crate::persistence::save_json(self.session.world())?)
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}
