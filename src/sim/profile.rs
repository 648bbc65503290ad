//! Vehicle profile registry
//!
//! An ordered, validated fleet of handling presets. The active vehicle is an
//! index into this list; switching cycles through it.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Handling and visual tuning for one selectable vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleProfile {
    /// Display name, also used in error messages
    pub name: String,
    /// Body color (0xRRGGBB) for the renderer
    pub color: u32,
    /// Uniform scale applied to the base vehicle box
    pub visual_scale: f32,
    /// Forward speed cap; reverse is capped at half of this
    pub max_speed: f32,
    /// Speed change per step while accelerating or braking
    pub acceleration: f32,
    /// Velocity blend factor toward the target, in (0, 1]
    pub grip: f32,
    /// Rigid body mass
    pub mass: f32,
}

impl VehicleProfile {
    /// Reverse speed cap (positive speed in this sign convention)
    #[inline]
    pub fn max_reverse(&self) -> f32 {
        self.max_speed / 2.0
    }

    /// Clamp a signed speed into this profile's [-max_speed, max_speed / 2] range
    #[inline]
    pub fn clamp_speed(&self, speed: f32) -> f32 {
        speed.clamp(-self.max_speed, self.max_reverse())
    }

    /// Check every tuning value is usable
    pub fn validate(&self) -> Result<()> {
        let fail = |reason: &str| {
            Err(SimError::InvalidProfile {
                name: self.name.clone(),
                reason: reason.to_string(),
            })
        };

        if !self.max_speed.is_finite() || self.max_speed <= 0.0 {
            return fail("max speed must be positive");
        }
        if !self.acceleration.is_finite() || self.acceleration <= 0.0 {
            return fail("acceleration must be positive");
        }
        if !self.grip.is_finite() || self.grip <= 0.0 || self.grip > 1.0 {
            return fail("grip must be in (0, 1]");
        }
        if !self.mass.is_finite() || self.mass <= 0.0 {
            return fail("mass must be positive");
        }
        if !self.visual_scale.is_finite() || self.visual_scale <= 0.0 {
            return fail("visual scale must be positive");
        }
        Ok(())
    }

    /// The stock fleet: nimble sports car, tail-happy muscle car, planted truck
    pub fn default_fleet() -> Vec<VehicleProfile> {
        vec![
            VehicleProfile {
                name: "Sport".to_string(),
                color: 0xE03C31,
                visual_scale: 1.0,
                max_speed: 30.0,
                acceleration: 0.2,
                grip: 0.8,
                mass: 150.0,
            },
            VehicleProfile {
                name: "Muscle".to_string(),
                color: 0x2F6FD6,
                visual_scale: 1.15,
                max_speed: 36.0,
                acceleration: 0.25,
                grip: 0.45,
                mass: 220.0,
            },
            VehicleProfile {
                name: "Truck".to_string(),
                color: 0xF2B134,
                visual_scale: 1.4,
                max_speed: 22.0,
                acceleration: 0.12,
                grip: 0.95,
                mass: 400.0,
            },
        ]
    }
}

/// Ordered, non-empty sequence of validated profiles
#[derive(Debug, Clone)]
pub struct ProfileRegistry {
    profiles: Vec<VehicleProfile>,
}

impl ProfileRegistry {
    /// Build a registry, rejecting any malformed profile up front
    pub fn new(profiles: Vec<VehicleProfile>) -> Result<Self> {
        if profiles.is_empty() {
            return Err(SimError::EmptyRegistry);
        }
        for profile in &profiles {
            profile.validate()?;
        }
        Ok(Self { profiles })
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Profile at `index`, wrapping so any index is valid
    pub fn get(&self, index: usize) -> &VehicleProfile {
        &self.profiles[index % self.profiles.len()]
    }

    /// Index following `index`, cycling back to 0 after the last profile
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.profiles.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VehicleProfile> {
        self.profiles.iter()
    }
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self {
            profiles: VehicleProfile::default_fleet(),
        }
    }
}
