//! Wheel configuration
//!
//! Everything tunable about the wheel lives here. Persisted in LocalStorage on
//! the web, read from a JSON file by the native runner.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Result, WheelError};
use crate::renderer::colors;

/// Wheel layout, look, physics and audio settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelConfig {
    // === Layout ===
    /// Number of slices around the wheel
    pub number_of_slices: usize,
    /// Wheel radius (world units)
    pub radius: f32,
    /// Arc subdivisions per slice
    pub segments: u32,

    // === Look ===
    /// Color of even slices
    pub slice_color_a: [f32; 4],
    /// Color of odd slices
    pub slice_color_b: [f32; 4],
    /// Color of the slice under the pin
    pub highlight_color: [f32; 4],

    // === Spin ===
    /// Torque of one spin
    pub spin_force: f32,
    /// Random variation of the spin force (fraction, 0 = none)
    pub spin_jitter: f32,
    /// Moment of inertia of the wheel
    pub inertia: f32,
    /// Fraction of angular velocity lost per second
    pub angular_damping: f32,
    /// Angular speed cap (rad/s)
    pub max_angular_velocity: f32,
    /// Angular speed (rad/s) at which the wheel comes to rest
    pub sleep_threshold: f32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            number_of_slices: NUMBER_OF_SLICES,
            radius: WHEEL_RADIUS,
            segments: SLICE_SEGMENTS,

            slice_color_a: colors::SLICE_A,
            slice_color_b: colors::SLICE_B,
            highlight_color: colors::SLICE_HIGHLIGHT,

            spin_force: SPIN_FORCE,
            spin_jitter: 0.2,
            inertia: WHEEL_INERTIA,
            angular_damping: ANGULAR_DAMPING,
            max_angular_velocity: MAX_ANGULAR_VELOCITY,
            sleep_threshold: SLEEP_THRESHOLD,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

fn invalid(field: &'static str, reason: &'static str) -> WheelError {
    WheelError::InvalidConfig { field, reason }
}

impl WheelConfig {
    /// Check every field is usable
    pub fn validate(&self) -> Result<()> {
        if self.number_of_slices == 0 || self.number_of_slices > MAX_SLICES {
            return Err(WheelError::InvalidSliceCount);
        }
        if self.segments == 0 || self.segments > MAX_SEGMENTS {
            return Err(WheelError::InvalidSegments);
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(WheelError::InvalidRadius(self.radius));
        }
        if !self.spin_force.is_finite() {
            return Err(invalid("spin_force", "must be finite"));
        }
        if !(0.0..1.0).contains(&self.spin_jitter) {
            return Err(invalid("spin_jitter", "must be in [0, 1)"));
        }
        if !self.inertia.is_finite() || self.inertia <= 0.0 {
            return Err(invalid("inertia", "must be positive"));
        }
        if !self.angular_damping.is_finite() || self.angular_damping < 0.0 {
            return Err(invalid("angular_damping", "must be zero or positive"));
        }
        if !self.max_angular_velocity.is_finite() || self.max_angular_velocity <= 0.0 {
            return Err(invalid("max_angular_velocity", "must be positive"));
        }
        if !self.sleep_threshold.is_finite() || self.sleep_threshold < 0.0 {
            return Err(invalid("sleep_threshold", "must be zero or positive"));
        }
        if !(0.0..=1.0).contains(&self.master_volume) {
            return Err(invalid("master_volume", "must be in [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.sfx_volume) {
            return Err(invalid("sfx_volume", "must be in [0, 1]"));
        }
        Ok(())
    }

    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Flip the mute flag, returning the new state
    pub fn toggle_muted(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Effective sound effect volume (respects mute)
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Read a config file (native runner)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded wheel config from {}", path.as_ref().display());
        Ok(config)
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "prize_wheel_config";

    /// Load config from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded wheel config from LocalStorage");
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring stored wheel config: {}", e),
                }
            }
        }

        log::info!("Using default wheel config");
        Self::default()
    }

    /// Save config to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Wheel config saved");
            }
        }
    }
}
