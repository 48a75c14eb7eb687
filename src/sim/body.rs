//! Single-axis rigid body for the wheel
//!
//! The wheel only ever rotates about Z, so the body tracks one angle and one
//! angular velocity. Positive angular velocity turns the wheel counter-clockwise.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::normalize_degrees;

/// How a torque is applied to the body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForceMode {
    /// Continuous torque over `dt`, scaled by inertia
    Force,
    /// Continuous torque over `dt`, ignoring inertia
    Acceleration,
    /// Instant torque, scaled by inertia
    Impulse,
    /// Instant change of angular velocity
    VelocityChange,
}

/// The wheel's rigid body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WheelBody {
    /// Rotation about Z (degrees, [0, 360))
    rotation_deg: f32,
    /// Angular velocity about Z (radians/sec)
    pub angular_velocity: f32,
    /// Moment of inertia about Z
    pub inertia: f32,
    /// Fraction of angular velocity lost per second
    pub angular_damping: f32,
    /// Angular speed cap (radians/sec)
    pub max_angular_velocity: f32,
    /// Angular speed (radians/sec) below which the body goes to sleep
    pub sleep_threshold: f32,
    sleeping: bool,
}

impl Default for WheelBody {
    fn default() -> Self {
        Self {
            rotation_deg: 0.0,
            angular_velocity: 0.0,
            inertia: WHEEL_INERTIA,
            angular_damping: ANGULAR_DAMPING,
            max_angular_velocity: MAX_ANGULAR_VELOCITY,
            sleep_threshold: SLEEP_THRESHOLD,
            sleeping: true,
        }
    }
}

impl WheelBody {
    pub fn new(
        inertia: f32,
        angular_damping: f32,
        max_angular_velocity: f32,
        sleep_threshold: f32,
    ) -> Self {
        Self {
            inertia,
            angular_damping,
            max_angular_velocity,
            sleep_threshold,
            ..Default::default()
        }
    }

    /// Rotation about Z in degrees, [0, 360)
    #[inline]
    pub fn euler_z(&self) -> f32 {
        self.rotation_deg
    }

    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation_deg = normalize_degrees(degrees);
    }

    pub fn is_sleeping(&self) -> bool {
        self.sleeping
    }

    /// Wake the body so the next step integrates it
    pub fn wake(&mut self) {
        self.sleeping = false;
    }

    /// Apply a torque about Z
    pub fn add_torque(&mut self, torque: f32, mode: ForceMode, dt: f32) {
        let delta = match mode {
            ForceMode::Force => torque * dt / self.inertia,
            ForceMode::Acceleration => torque * dt,
            ForceMode::Impulse => torque / self.inertia,
            ForceMode::VelocityChange => torque,
        };
        if delta == 0.0 {
            return;
        }
        self.angular_velocity += delta;
        self.wake();
    }

    /// Advance the body by one fixed timestep
    pub fn step(&mut self, dt: f32) {
        if self.sleeping {
            return;
        }

        self.angular_velocity *= (1.0 - dt * self.angular_damping).max(0.0);
        self.angular_velocity = self
            .angular_velocity
            .clamp(-self.max_angular_velocity, self.max_angular_velocity);

        self.rotation_deg =
            normalize_degrees(self.rotation_deg + self.angular_velocity.to_degrees() * dt);

        if self.angular_velocity.abs() < self.sleep_threshold {
            self.angular_velocity = 0.0;
            self.sleeping = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_asleep_and_stays_put() {
        let mut body = WheelBody::default();
        assert!(body.is_sleeping());
        body.step(SIM_DT);
        assert_eq!(body.euler_z(), 0.0);
    }

    #[test]
    fn test_force_modes() {
        let mut body = WheelBody::new(2.0, 0.0, 100.0, 0.0);
        body.add_torque(4.0, ForceMode::Impulse, SIM_DT);
        assert!((body.angular_velocity - 2.0).abs() < 1e-6);

        body.angular_velocity = 0.0;
        body.add_torque(4.0, ForceMode::VelocityChange, SIM_DT);
        assert!((body.angular_velocity - 4.0).abs() < 1e-6);

        body.angular_velocity = 0.0;
        body.add_torque(4.0, ForceMode::Force, 0.5);
        assert!((body.angular_velocity - 1.0).abs() < 1e-6);

        body.angular_velocity = 0.0;
        body.add_torque(4.0, ForceMode::Acceleration, 0.5);
        assert!((body.angular_velocity - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_torque_wakes_body() {
        let mut body = WheelBody::default();
        body.add_torque(0.0, ForceMode::Impulse, SIM_DT);
        assert!(body.is_sleeping());
        body.add_torque(-1.0, ForceMode::Impulse, SIM_DT);
        assert!(!body.is_sleeping());
    }

    #[test]
    fn test_negative_torque_turns_clockwise() {
        let mut body = WheelBody::new(1.0, 0.0, 100.0, 0.0);
        body.add_torque(-std::f32::consts::FRAC_PI_2, ForceMode::VelocityChange, SIM_DT);
        body.step(0.5);
        // Quarter turn per second clockwise: -45 degrees after half a second
        assert!((body.euler_z() - 315.0).abs() < 1e-3);
    }

    #[test]
    fn test_speed_is_capped() {
        let mut body = WheelBody::new(1.0, 0.0, 5.0, 0.01);
        body.add_torque(50.0, ForceMode::Impulse, SIM_DT);
        body.step(SIM_DT);
        assert!((body.angular_velocity - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_damping_brings_wheel_to_rest() {
        let mut body = WheelBody::default();
        body.add_torque(-SPIN_FORCE, ForceMode::Impulse, SIM_DT);

        let mut steps = 0;
        while !body.is_sleeping() && steps < 100_000 {
            body.step(SIM_DT);
            steps += 1;
        }
        assert!(body.is_sleeping());
        assert_eq!(body.angular_velocity, 0.0);
        assert!(body.euler_z() >= 0.0 && body.euler_z() < 360.0);
    }

    #[test]
    fn test_full_damping_stops_immediately() {
        let mut body = WheelBody::new(1.0, 1.0 / SIM_DT, 100.0, 0.01);
        body.add_torque(10.0, ForceMode::Impulse, SIM_DT);
        body.step(SIM_DT);
        assert!(body.is_sleeping());
        assert!(body.euler_z() < 1e-3);
    }
}
