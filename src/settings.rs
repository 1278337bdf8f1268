//! Host settings and preferences
//!
//! Only affects how the host drives and paints the simulation, never the
//! physics itself. Persisted in LocalStorage on the web, as a JSON file
//! natively.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{BALL_COLOR, FIXED_UPDATE_HZ, MAX_FRAME_DT, MAX_SUBSTEPS};
use crate::renderer::Color;

/// Errors loading or validating settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid settings: {0}")]
    Invalid(String),
}

/// Host settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed ticks per wall-clock second
    pub fixed_update_hz: u32,
    /// Cap on ticks run for a single frame
    pub max_substeps: u32,
    /// Longest frame delta (seconds) fed to the stepper
    pub max_frame_dt: f64,
    /// Ball color (RGBA)
    pub ball_color: [u8; 4],
    /// Keep an input log for replay/debugging. The log grows by one entry
    /// per tick and spawn, so leave this off for long-running hosts.
    pub record_inputs: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fixed_update_hz: FIXED_UPDATE_HZ,
            max_substeps: MAX_SUBSTEPS,
            max_frame_dt: MAX_FRAME_DT,
            ball_color: BALL_COLOR,
            record_inputs: false,
        }
    }
}

impl Settings {
    /// Parse and validate settings JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.fixed_update_hz == 0 {
            return Err(SettingsError::Invalid("fixed_update_hz must be > 0".into()));
        }
        if self.max_substeps == 0 {
            return Err(SettingsError::Invalid("max_substeps must be > 0".into()));
        }
        if !(self.max_frame_dt.is_finite() && self.max_frame_dt > 0.0) {
            return Err(SettingsError::Invalid(format!(
                "max_frame_dt must be positive, got {}",
                self.max_frame_dt
            )));
        }
        Ok(())
    }

    /// Wall-clock seconds per fixed tick
    pub fn fixed_step(&self) -> f64 {
        1.0 / self.fixed_update_hz as f64
    }

    pub fn color(&self) -> Color {
        Color::from_rgba(self.ball_color)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "ballpit_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Load settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Write settings to a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), SettingsError> {
        std::fs::write(path, self.to_json()?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
