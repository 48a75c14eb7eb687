//! Prize Wheel - a spinning prize wheel mini-game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (slice meshes, pin resolution, wheel body, controller)
//! - `renderer`: WebGPU rendering pipeline
//! - `config`: Data-driven wheel parameters
//! - `history`: Recent spin results
//! - `audio`: Procedural Web Audio cues (wasm only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod config;
pub mod error;
pub mod history;
pub mod renderer;
pub mod sim;

pub use config::WheelConfig;
pub use error::{Result, WheelError};
pub use history::SpinHistory;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Wheel layout defaults
    pub const NUMBER_OF_SLICES: usize = 8;
    pub const WHEEL_RADIUS: f32 = 5.0;
    pub const SLICE_SEGMENTS: u32 = 10;
    /// Upper bounds on layout sizes accepted from config
    pub const MAX_SLICES: usize = 360;
    pub const MAX_SEGMENTS: u32 = 1024;

    /// Pin position (degrees, 90 = straight up)
    pub const PIN_ANGLE_DEG: f32 = 90.0;

    /// Spin defaults
    pub const SPIN_FORCE: f32 = 12.0;
    pub const WHEEL_INERTIA: f32 = 1.0;
    /// Angular damping per second (velocity scaled by 1 - dt * damping)
    pub const ANGULAR_DAMPING: f32 = 0.6;
    /// Angular speed cap (rad/s)
    pub const MAX_ANGULAR_VELOCITY: f32 = 25.0;
    /// Below this angular speed (rad/s) the wheel comes to rest
    pub const SLEEP_THRESHOLD: f32 = 0.05;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Convert polar (r, theta in degrees) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta_deg: f32) -> Vec2 {
    let theta = theta_deg.to_radians();
    Vec2::new(r * theta.cos(), r * theta.sin())
}
