//! Named input actions
//!
//! Hosts map whatever devices they have onto this fixed action set and hand
//! the tick a snapshot once per frame.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    SteerLeft,
    SteerRight,
    Accelerate,
    Brake,
    Drift,
    Reset,
    SwitchCamera,
    SwitchVehicle,
}

impl Action {
    pub const ALL: [Action; 8] = [
        Action::SteerLeft,
        Action::SteerRight,
        Action::Accelerate,
        Action::Brake,
        Action::Drift,
        Action::Reset,
        Action::SwitchCamera,
        Action::SwitchVehicle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::SteerLeft => "steer-left",
            Action::SteerRight => "steer-right",
            Action::Accelerate => "accelerate",
            Action::Brake => "brake",
            Action::Drift => "drift",
            Action::Reset => "reset",
            Action::SwitchCamera => "switch-camera",
            Action::SwitchVehicle => "switch-vehicle",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "steer-left" | "left" => Some(Action::SteerLeft),
            "steer-right" | "right" => Some(Action::SteerRight),
            "accelerate" | "throttle" => Some(Action::Accelerate),
            "brake" | "reverse" => Some(Action::Brake),
            "drift" | "handbrake" => Some(Action::Drift),
            "reset" => Some(Action::Reset),
            "switch-camera" => Some(Action::SwitchCamera),
            "switch-vehicle" => Some(Action::SwitchVehicle),
            _ => None,
        }
    }

    /// Fires once per press rather than acting while held
    pub fn is_one_shot(&self) -> bool {
        matches!(
            self,
            Action::Reset | Action::SwitchCamera | Action::SwitchVehicle
        )
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub steer_left: bool,
    pub steer_right: bool,
    pub accelerate: bool,
    pub brake: bool,
    /// Handbrake: faster turning, low grip
    pub drift: bool,
    /// Put the vehicle back on its wheels (one-shot)
    pub reset: bool,
    /// Cycle camera mode (one-shot)
    pub switch_camera: bool,
    /// Cycle to the next vehicle profile (one-shot)
    pub switch_vehicle: bool,
}

impl TickInput {
    pub fn set(&mut self, action: Action, held: bool) {
        *self.slot(action) = held;
    }

    /// Clear one-shot actions after a tick has consumed them
    pub fn clear_one_shots(&mut self) {
        for action in Action::ALL.into_iter().filter(Action::is_one_shot) {
            self.set(action, false);
        }
    }

    fn slot(&mut self, action: Action) -> &mut bool {
        match action {
            Action::SteerLeft => &mut self.steer_left,
            Action::SteerRight => &mut self.steer_right,
            Action::Accelerate => &mut self.accelerate,
            Action::Brake => &mut self.brake,
            Action::Drift => &mut self.drift,
            Action::Reset => &mut self.reset,
            Action::SwitchCamera => &mut self.switch_camera,
            Action::SwitchVehicle => &mut self.switch_vehicle,
        }
    }
}
