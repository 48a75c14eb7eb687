//! Spin impulse

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::body::{ForceMode, WheelBody};
use crate::consts::SIM_DT;

/// Applies the one-shot torque that starts a spin
#[derive(Debug, Clone)]
pub struct Spinner {
    /// Torque magnitude of a spin
    pub spin_force: f32,
    /// Random variation of the force, as a fraction (0 = always the same spin)
    pub jitter: f32,
    rng: Pcg32,
}

impl Spinner {
    pub fn new(spin_force: f32, jitter: f32, seed: u64) -> Self {
        Self {
            spin_force,
            jitter,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Push the wheel clockwise. Returns the torque applied.
    pub fn spin(&mut self, body: &mut WheelBody) -> f32 {
        let variation = if self.jitter > 0.0 {
            self.rng.random_range(-self.jitter..=self.jitter)
        } else {
            0.0
        };
        // Torque points along -Z
        let torque = -self.spin_force * (1.0 + variation);
        body.add_torque(torque, ForceMode::Impulse, SIM_DT);
        log::debug!("Spin impulse: {:.3}", torque);
        torque
    }
}
