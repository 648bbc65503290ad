//! Wrap Drift - arcade driving in a wrap-around open world
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (vehicle handling, world wrap, pickups, session)
//! - `settings`: Data-driven tuning, loaded from JSON
//! - `highscores`: Persisted best score
//! - `error`: Configuration and persistence errors

pub mod error;
pub mod highscores;
pub mod settings;
pub mod sim;

pub use error::{Result, SimError};
pub use highscores::{HighScoreStore, JsonFileHighScore, MemoryHighScore};
pub use settings::Settings;

use glam::{Quat, Vec3};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz; handling constants are tuned per step)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 5;

    /// Session timer interval (seconds)
    pub const TIMER_INTERVAL: f32 = 1.0;

    /// Velocity magnitude to km/h-style readout
    pub const SPEED_READOUT_FACTOR: f32 = 3.6;
    /// Minimum readout change before a speed event is emitted
    pub const SPEED_REPORT_THRESHOLD: f32 = 0.05;

    /// Downward acceleration fed to the rigid-body engine
    pub const GRAVITY: f32 = -9.81;

    /// Vehicle box half-extents at visual scale 1.0 (x = half width, z = half length)
    pub const VEHICLE_HALF_EXTENTS: [f32; 3] = [1.0, 0.5, 2.0];
}

/// Yaw-only orientation for a heading (rotation about +Y)
#[inline]
pub fn yaw_rotation(heading: f32) -> Quat {
    Quat::from_rotation_y(heading)
}

/// Planar direction a positive speed pushes along for a heading.
///
/// Speed is negative when driving forward, so the nose points along the
/// negation of this vector.
#[inline]
pub fn heading_forward(heading: f32) -> Vec3 {
    Vec3::new(heading.sin(), 0.0, heading.cos())
}

/// Horizontal (x, z) magnitude of a velocity
#[inline]
pub fn planar_speed(velocity: Vec3) -> f32 {
    (velocity.x * velocity.x + velocity.z * velocity.z).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_heading_forward_axes() {
        let f = heading_forward(0.0);
        assert!((f.z - 1.0).abs() < 1e-6);
        assert!(f.x.abs() < 1e-6);

        let f = heading_forward(FRAC_PI_2);
        assert!((f.x - 1.0).abs() < 1e-6);
        assert!(f.z.abs() < 1e-6);
    }

    #[test]
    fn test_planar_speed_ignores_vertical() {
        let v = Vec3::new(3.0, -50.0, 4.0);
        assert!((planar_speed(v) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_yaw_rotation_is_yaw_only() {
        let q = yaw_rotation(1.2);
        let up = q * Vec3::Y;
        assert!((up - Vec3::Y).length() < 1e-5);
    }
}
