//! Notifications for the UI/telemetry layer
//!
//! The simulation queues events on `GameState`; the host drains them after
//! each frame and forwards them to whatever displays the HUD.

use serde::{Deserialize, Serialize};

/// How the external renderer should frame the vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CameraMode {
    #[default]
    Chase,
    Overhead,
}

impl CameraMode {
    pub fn next(self) -> Self {
        match self {
            CameraMode::Chase => CameraMode::Overhead,
            CameraMode::Overhead => CameraMode::Chase,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ScoreChanged(u32),
    TimeChanged(u32),
    /// Horizontal speed readout (velocity magnitude * 3.6)
    SpeedChanged(f32),
    SessionEnded { final_score: u32, high_score: u32 },
    VehicleSwitched { index: usize, name: String },
    CameraChanged(CameraMode),
    VehicleReset,
}

/// Receiver for simulation events; every method defaults to a no-op
pub trait UiSink {
    fn score_changed(&mut self, _score: u32) {}
    fn time_changed(&mut self, _secs_left: u32) {}
    fn speed_changed(&mut self, _readout: f32) {}
    fn session_ended(&mut self, _final_score: u32, _high_score: u32) {}
    fn vehicle_switched(&mut self, _index: usize, _name: &str) {}
    fn camera_changed(&mut self, _mode: CameraMode) {}
    fn vehicle_reset(&mut self) {}
}

impl GameEvent {
    /// Route this event to the matching sink method
    pub fn dispatch(&self, sink: &mut dyn UiSink) {
        match self {
            GameEvent::ScoreChanged(score) => sink.score_changed(*score),
            GameEvent::TimeChanged(secs) => sink.time_changed(*secs),
            GameEvent::SpeedChanged(readout) => sink.speed_changed(*readout),
            GameEvent::SessionEnded {
                final_score,
                high_score,
            } => sink.session_ended(*final_score, *high_score),
            GameEvent::VehicleSwitched { index, name } => sink.vehicle_switched(*index, name),
            GameEvent::CameraChanged(mode) => sink.camera_changed(*mode),
            GameEvent::VehicleReset => sink.vehicle_reset(),
        }
    }
}
