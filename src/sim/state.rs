//! Game state
//!
//! One `GameState` is one session: the generated world, the vehicle, the
//! score/timer machine and the pending UI events. It is passed explicitly into
//! every step; nothing lives in globals.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::events::{CameraMode, GameEvent};
use super::generator::{Building, Collectible, generate_world};
use super::physics::PhysicsWorld;
use super::profile::{ProfileRegistry, VehicleProfile};
use super::session::SessionState;
use super::vehicle::VehicleState;
use super::world::WorldBounds;
use crate::error::Result;
use crate::settings::Settings;

#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the world was generated from
    pub seed: u64,
    pub settings: Settings,
    pub registry: ProfileRegistry,
    pub bounds: WorldBounds,
    pub vehicle: VehicleState,
    pub buildings: Vec<Building>,
    /// Collectibles not yet picked up
    pub collectibles: Vec<Collectible>,
    pub session: SessionState,
    pub camera: CameraMode,
    /// Simulation step counter
    pub time_ticks: u64,
    /// Last speed readout reported to the UI
    pub(crate) reported_speed: f32,
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// Validate settings, generate the world into `physics`, and spawn the
    /// vehicle at the origin. Fails before any frame runs if the
    /// configuration is malformed or the engine rejects the vehicle body.
    pub fn new<P: PhysicsWorld>(
        seed: u64,
        settings: Settings,
        physics: &mut P,
        high_score: u32,
    ) -> Result<Self> {
        settings.validate()?;
        let registry = settings.registry()?;
        let bounds = settings.bounds()?;

        let mut rng = Pcg32::seed_from_u64(seed);
        let world = generate_world(&mut rng, &settings.world, physics);

        let spawn = Vec3::new(0.0, settings.world.spawn_height, 0.0);
        let vehicle = VehicleState::spawn(physics, 0, registry.get(0), spawn, 0.0)?;

        let session = SessionState::new(settings.session.duration_secs, high_score);
        log::info!(
            "Session started: seed {}, {}s, vehicle {}",
            seed,
            session.time_left,
            registry.get(0).name
        );

        Ok(Self {
            seed,
            settings,
            registry,
            bounds,
            vehicle,
            buildings: world.buildings,
            collectibles: world.collectibles,
            session,
            camera: CameraMode::default(),
            time_ticks: 0,
            reported_speed: 0.0,
            events: Vec::new(),
        })
    }

    /// Profile currently driven
    pub fn active_profile(&self) -> &VehicleProfile {
        self.registry.get(self.vehicle.profile_index)
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;
    use crate::sim::physics::RapierPhysics;
    use crate::sim::session::SessionPhase;

    #[test]
    fn test_new_session_defaults() {
        let mut physics = RapierPhysics::new();
        let state = GameState::new(12345, Settings::default(), &mut physics, 70).unwrap();

        assert_eq!(state.session.phase, SessionPhase::Active);
        assert_eq!(state.session.time_left, 60);
        assert_eq!(state.session.score, 0);
        assert_eq!(state.session.high_score, 70);
        assert_eq!(state.vehicle.profile_index, 0);
        assert_eq!(state.vehicle.speed, 0.0);
        assert!(!state.buildings.is_empty());
        assert!(state.collectibles.len() <= 100);
        assert_eq!(physics.static_count(), state.buildings.len());
        assert_eq!(physics.body_count(), 1);
    }

    #[test]
    fn test_malformed_settings_rejected_before_generation() {
        let mut settings = Settings::default();
        settings.profiles[0].grip = 1.5;
        let mut physics = RapierPhysics::new();
        let err = GameState::new(1, settings, &mut physics, 0).unwrap_err();
        assert!(matches!(err, SimError::InvalidProfile { .. }));
        assert_eq!(physics.static_count(), 0);
    }

    #[test]
    fn test_drain_events_empties_queue() {
        let mut physics = RapierPhysics::new();
        let mut state = GameState::new(5, Settings::default(), &mut physics, 0).unwrap();
        state.push_event(GameEvent::ScoreChanged(10));
        assert_eq!(state.drain_events().len(), 1);
        assert!(state.drain_events().is_empty());
    }
}
