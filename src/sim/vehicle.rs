//! Vehicle dynamics controller
//!
//! Arcade handling layered over a rigid body. Heading and speed are kinematic
//! state owned here; each step they produce a planar target velocity that the
//! body's actual velocity is blended toward. The physics engine keeps
//! integrating position and resolving collisions, but never sees a force.
//!
//! Sign convention: negative speed drives forward.

use glam::{Quat, Vec3};

use super::input::TickInput;
use super::physics::{BodyDesc, BodyHandle, BodyState, PhysicsWorld};
use super::profile::{ProfileRegistry, VehicleProfile};
use crate::consts::VEHICLE_HALF_EXTENTS;
use crate::error::{Result, SimError};
use crate::settings::HandlingSettings;
use crate::{heading_forward, yaw_rotation};

/// Surface friction handed to the physics material
const BODY_FRICTION: f32 = 0.3;

/// Transform the renderer draws the vehicle at. Copied from the body after
/// each physics step, never written back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualTransform {
    pub position: Vec3,
    pub orientation: Quat,
}

#[derive(Debug, Clone)]
pub struct VehicleState {
    /// Yaw in radians, unbounded
    pub heading: f32,
    /// Signed speed, clamped to [-max_speed, max_speed / 2]
    pub speed: f32,
    pub profile_index: usize,
    pub body: BodyHandle,
    pub visual: VisualTransform,
}

/// Box body for a profile at a given pose
pub fn body_desc(profile: &VehicleProfile, position: Vec3, orientation: Quat) -> BodyDesc {
    BodyDesc {
        mass: profile.mass,
        half_extents: Vec3::from_array(VEHICLE_HALF_EXTENTS) * profile.visual_scale,
        position,
        orientation,
        friction: BODY_FRICTION,
    }
}

/// Move `speed` toward zero by `step` without crossing it; snap to zero
/// inside `epsilon`
pub fn apply_friction(speed: f32, step: f32, epsilon: f32) -> f32 {
    if speed.abs() < epsilon {
        0.0
    } else if speed > 0.0 {
        (speed - step).max(0.0)
    } else {
        (speed + step).min(0.0)
    }
}

/// Lerp the horizontal components of `current` toward `target` by `factor`.
/// The vertical component is returned untouched.
pub fn blend_velocity(current: Vec3, target: Vec3, factor: f32) -> Vec3 {
    Vec3::new(
        current.x + (target.x - current.x) * factor,
        current.y,
        current.z + (target.z - current.z) * factor,
    )
}

impl VehicleState {
    /// Create the vehicle body at rest and verify the engine accepted it
    pub fn spawn<P: PhysicsWorld>(
        physics: &mut P,
        profile_index: usize,
        profile: &VehicleProfile,
        position: Vec3,
        heading: f32,
    ) -> Result<Self> {
        let orientation = yaw_rotation(heading);
        let body = physics.create_body(&body_desc(profile, position, orientation));
        let state = physics.body(body).ok_or(SimError::MissingBody)?;

        Ok(Self {
            heading,
            speed: 0.0,
            profile_index,
            body,
            visual: VisualTransform {
                position: state.position,
                orientation: state.orientation,
            },
        })
    }

    /// Turn left/right; the handbrake roughly doubles the rate
    pub fn update_heading(&mut self, input: &TickInput, handling: &HandlingSettings) {
        let rate = if input.drift {
            handling.drift_turn_rate
        } else {
            handling.turn_rate
        };
        if input.steer_left {
            self.heading += rate;
        }
        if input.steer_right {
            self.heading -= rate;
        }
    }

    /// Throttle beats brake beats coasting
    pub fn update_speed(
        &mut self,
        input: &TickInput,
        profile: &VehicleProfile,
        handling: &HandlingSettings,
    ) {
        self.speed = if input.accelerate {
            (self.speed - profile.acceleration).max(-profile.max_speed)
        } else if input.brake {
            (self.speed + profile.acceleration).min(profile.max_reverse())
        } else {
            apply_friction(self.speed, handling.friction_step, handling.stop_epsilon)
        };
    }

    /// Post-session roll-out: geometric decay toward zero
    pub fn coast(&mut self, handling: &HandlingSettings) {
        self.speed *= handling.coast_decay;
    }

    /// Planar velocity the current heading and speed ask for
    pub fn target_velocity(&self) -> Vec3 {
        heading_forward(self.heading) * self.speed
    }

    /// One pre-physics step: update heading and speed (or coast when the
    /// session is over), then steer the body's planar velocity and yaw.
    pub fn drive<P: PhysicsWorld>(
        &mut self,
        physics: &mut P,
        input: &TickInput,
        profile: &VehicleProfile,
        handling: &HandlingSettings,
        active: bool,
    ) {
        let drifting = active && input.drift;
        if active {
            self.update_heading(input, handling);
            self.update_speed(input, profile, handling);
        } else {
            self.coast(handling);
        }

        let Some(mut body) = physics.body(self.body) else {
            return;
        };
        let grip = if drifting {
            handling.drift_grip
        } else {
            profile.grip
        };
        body.linear_velocity = blend_velocity(body.linear_velocity, self.target_velocity(), grip);
        body.orientation = yaw_rotation(self.heading);
        body.angular_velocity = Vec3::ZERO;
        physics.set_body(self.body, &body);
    }

    /// Swap to the next profile. The body is rebuilt with the new mass and
    /// shape at the exact same pose, at rest; speed is clamped to the new caps.
    /// If the engine rejects the new body the vehicle keeps its old one.
    pub fn switch_profile<P: PhysicsWorld>(
        &mut self,
        physics: &mut P,
        registry: &ProfileRegistry,
    ) -> Result<usize> {
        let (position, orientation) = physics
            .body(self.body)
            .map(|b| (b.position, b.orientation))
            .unwrap_or((self.visual.position, self.visual.orientation));

        let next = registry.next_index(self.profile_index);
        let profile = registry.get(next);

        let body = physics.create_body(&body_desc(profile, position, orientation));
        if physics.body(body).is_none() {
            physics.remove_body(body);
            return Err(SimError::MissingBody);
        }
        physics.remove_body(self.body);
        self.body = body;
        self.profile_index = next;
        self.speed = profile.clamp_speed(self.speed);

        log::info!("Switched vehicle to {} (#{})", profile.name, next);
        Ok(next)
    }

    /// Stand the vehicle upright at spawn height over its current spot.
    /// Heading is kept; all motion stops.
    pub fn reset<P: PhysicsWorld>(&mut self, physics: &mut P, spawn_height: f32) {
        let Some(body) = physics.body(self.body) else {
            return;
        };
        let position = Vec3::new(body.position.x, spawn_height, body.position.z);
        physics.set_body(
            self.body,
            &BodyState::at_rest(position, yaw_rotation(self.heading)),
        );
        self.speed = 0.0;
        log::debug!("Vehicle reset at ({:.1}, {:.1})", position.x, position.z);
    }

    /// Copy the body's pose into the visual transform
    pub fn sync_visual<P: PhysicsWorld>(&mut self, physics: &P) {
        if let Some(body) = physics.body(self.body) {
            self.visual = VisualTransform {
                position: body.position,
                orientation: body.orientation,
            };
        }
    }
}
