//! Game tuning settings
//!
//! Every gameplay constant lives here so a host can ship a JSON override.
//! Settings are validated before a session is built; nothing downstream
//! re-checks them.

use std::fs;
use std::ops::Range;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::sim::profile::{ProfileRegistry, VehicleProfile};
use crate::sim::world::WorldBounds;

/// World layout and procedural generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    /// Wrap boundary half-size
    pub limit: f32,
    /// Landing distance from center after a wrap
    pub rewrap_offset: f32,

    // === Buildings ===
    /// Candidates sampled (realized count is lower after road exclusion)
    pub building_count: usize,
    /// Half-size of the square buildings are sampled in
    pub building_extent: f32,
    /// Candidates with |x| below this are dropped to keep the road clear
    pub road_half_width: f32,
    /// Footprint range for width and depth
    pub building_footprint: Range<f32>,
    pub building_height: Range<f32>,

    // === Collectibles ===
    pub collectible_count: usize,
    /// Half-size of the square collectibles are sampled in
    pub collectible_extent: f32,
    /// Candidates inside this half-width square at the origin are dropped
    pub collectible_exclusion: f32,
    /// Hover height of collectibles
    pub collectible_height: f32,

    /// Height the vehicle spawns and resets at
    pub spawn_height: f32,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            limit: 500.0,
            rewrap_offset: 490.0,

            building_count: 400,
            building_extent: 480.0,
            road_half_width: 12.0,
            building_footprint: 8.0..24.0,
            building_height: 10.0..60.0,

            collectible_count: 100,
            collectible_extent: 450.0,
            collectible_exclusion: 10.0,
            collectible_height: 1.5,

            spawn_height: 2.0,
        }
    }
}

/// Handling constants shared by every vehicle (per fixed step)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandlingSettings {
    /// Heading change per step while steering
    pub turn_rate: f32,
    /// Heading change per step while steering with the handbrake held
    pub drift_turn_rate: f32,
    /// Speed bled off per step with no pedal held
    pub friction_step: f32,
    /// Below this |speed| with no pedal held, snap to zero
    pub stop_epsilon: f32,
    /// Multiplicative speed decay per step once the session has ended
    pub coast_decay: f32,
    /// Velocity blend factor while drifting (overrides profile grip)
    pub drift_grip: f32,
}

impl Default for HandlingSettings {
    fn default() -> Self {
        Self {
            turn_rate: 0.03,
            drift_turn_rate: 0.06,
            friction_step: 0.1,
            stop_epsilon: 0.2,
            coast_decay: 0.95,
            drift_grip: 0.05,
        }
    }
}

/// Timer and scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Session length in whole seconds
    pub duration_secs: u32,
    /// Planar distance at which a collectible is picked up
    pub pickup_radius: f32,
    /// Score awarded per collectible
    pub pickup_reward: u32,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            duration_secs: 60,
            pickup_radius: 3.0,
            pickup_reward: 10,
        }
    }
}

/// Complete tuning set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub world: WorldSettings,
    pub handling: HandlingSettings,
    pub session: SessionSettings,
    /// Selectable vehicles, in switch order
    pub profiles: Vec<VehicleProfile>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            world: WorldSettings::default(),
            handling: HandlingSettings::default(),
            session: SessionSettings::default(),
            profiles: VehicleProfile::default_fleet(),
        }
    }
}

fn invalid(msg: &str) -> SimError {
    SimError::InvalidSettings(msg.to_string())
}

fn valid_range(r: &Range<f32>) -> bool {
    r.start.is_finite() && r.end.is_finite() && r.start > 0.0 && r.start < r.end
}

impl Settings {
    /// Reject any value that would make the simulation degenerate
    pub fn validate(&self) -> Result<()> {
        self.bounds()?;
        self.registry()?;

        let w = &self.world;
        if w.building_extent <= 0.0 || w.collectible_extent <= 0.0 {
            return Err(invalid("generation extents must be positive"));
        }
        if w.road_half_width < 0.0 || w.collectible_exclusion < 0.0 {
            return Err(invalid("exclusion zones cannot be negative"));
        }
        if w.exclusion_covers_area() {
            return Err(invalid("exclusion zone covers the whole generation area"));
        }
        if !valid_range(&w.building_footprint) || !valid_range(&w.building_height) {
            return Err(invalid("building size ranges must be positive and non-empty"));
        }

        let h = &self.handling;
        if !(h.turn_rate >= 0.0 && h.drift_turn_rate >= 0.0) {
            return Err(invalid("turn rates cannot be negative"));
        }
        if !(h.friction_step > 0.0 && h.stop_epsilon >= 0.0) {
            return Err(invalid("friction step must be positive"));
        }
        if !(h.coast_decay >= 0.0 && h.coast_decay < 1.0) {
            return Err(invalid("coast decay must be in [0, 1)"));
        }
        if !(h.drift_grip > 0.0 && h.drift_grip <= 1.0) {
            return Err(invalid("drift grip must be in (0, 1]"));
        }

        let s = &self.session;
        if s.duration_secs == 0 {
            return Err(invalid("session duration must be at least one second"));
        }
        if !(s.pickup_radius > 0.0) {
            return Err(invalid("pickup radius must be positive"));
        }
        Ok(())
    }

    /// Wrap bounds described by these settings
    pub fn bounds(&self) -> Result<WorldBounds> {
        WorldBounds::new(self.world.limit, self.world.rewrap_offset)
    }

    /// Validated vehicle registry described by these settings
    pub fn registry(&self) -> Result<ProfileRegistry> {
        ProfileRegistry::new(self.profiles.clone())
    }

    /// Parse and validate settings from JSON; omitted fields take defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

impl WorldSettings {
    fn exclusion_covers_area(&self) -> bool {
        self.road_half_width >= self.building_extent
            || self.collectible_exclusion >= self.collectible_extent
    }
}
