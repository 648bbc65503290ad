//! Physics engine boundary
//!
//! The core treats the rigid-body engine as a positional integrator plus
//! collision responder. It only ever reads and writes body transforms and
//! velocities; forces, contacts and constraints stay inside the engine.
//!
//! `RapierPhysics` is the shipped backend: dynamic boxes on a large fixed
//! ground slab, with buildings as parentless static cuboids.

use glam::{Quat, Vec3};
use rapier3d::na::{Isometry3, Quaternion, Translation3, UnitQuaternion};
use rapier3d::prelude::{
    CCDSolver, ColliderBuilder, ColliderSet, DefaultBroadPhase, ImpulseJointSet,
    IntegrationParameters, IslandManager, MultibodyJointSet, NarrowPhase, PhysicsPipeline, Real,
    RigidBodyBuilder, RigidBodyHandle, RigidBodySet, Vector, vector,
};

use crate::consts::GRAVITY;

/// Half-size of the ground slab on x and z; comfortably past any wrap limit
const GROUND_HALF_EXTENT: f32 = 2000.0;
const GROUND_HALF_THICKNESS: f32 = 1.0;
const GROUND_FRICTION: f32 = 0.5;

/// Opaque handle to a dynamic body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle(RigidBodyHandle);

/// Opaque handle to a static collider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColliderHandle(rapier3d::prelude::ColliderHandle);

/// Parameters for a new dynamic box body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDesc {
    pub mass: f32,
    pub half_extents: Vec3,
    pub position: Vec3,
    pub orientation: Quat,
    /// Surface friction handed to the engine's material
    pub friction: f32,
}

/// Kinematic snapshot of a body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    pub position: Vec3,
    pub orientation: Quat,
    pub linear_velocity: Vec3,
    pub angular_velocity: Vec3,
}

impl BodyState {
    pub fn at_rest(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
        }
    }
}

/// What the simulation needs from a rigid-body engine
pub trait PhysicsWorld {
    fn create_body(&mut self, desc: &BodyDesc) -> BodyHandle;

    /// Remove a body; unknown handles are ignored
    fn remove_body(&mut self, handle: BodyHandle);

    /// Add an immovable box centered at `center`
    fn create_static_box(&mut self, center: Vec3, half_extents: Vec3) -> ColliderHandle;

    /// Advance the world by one fixed step
    fn step(&mut self, dt: f32);

    /// Snapshot of a live body, `None` if the handle is stale
    fn body(&self, handle: BodyHandle) -> Option<BodyState>;

    /// Overwrite a live body's state; returns false if the handle is stale
    fn set_body(&mut self, handle: BodyHandle, state: &BodyState) -> bool;
}

fn to_vector(v: Vec3) -> Vector<Real> {
    vector![v.x, v.y, v.z]
}

fn from_vector(v: &Vector<Real>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

fn to_rotation(q: Quat) -> UnitQuaternion<Real> {
    UnitQuaternion::new_normalize(Quaternion::new(q.w, q.x, q.y, q.z))
}

fn from_rotation(r: &UnitQuaternion<Real>) -> Quat {
    Quat::from_xyzw(r.i, r.j, r.k, r.w)
}

/// Rapier world with a ground slab whose top face sits at y = 0
pub struct RapierPhysics {
    gravity: Vector<Real>,
    pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd: CCDSolver,
}

impl RapierPhysics {
    pub fn new() -> Self {
        let mut colliders = ColliderSet::new();
        colliders.insert(
            ColliderBuilder::cuboid(GROUND_HALF_EXTENT, GROUND_HALF_THICKNESS, GROUND_HALF_EXTENT)
                .translation(vector![0.0, -GROUND_HALF_THICKNESS, 0.0])
                .friction(GROUND_FRICTION)
                .restitution(0.0)
                .build(),
        );

        Self {
            gravity: vector![0.0, GRAVITY, 0.0],
            pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders,
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd: CCDSolver::new(),
        }
    }
}

impl Default for RapierPhysics {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld for RapierPhysics {
    fn create_body(&mut self, desc: &BodyDesc) -> BodyHandle {
        let pose = Isometry3::from_parts(
            Translation3::from(to_vector(desc.position)),
            to_rotation(desc.orientation),
        );
        let rb = RigidBodyBuilder::dynamic().position(pose).build();
        let handle = self.bodies.insert(rb);

        let he = desc.half_extents;
        let collider = ColliderBuilder::cuboid(he.x, he.y, he.z)
            .mass(desc.mass)
            .friction(desc.friction)
            .restitution(0.0)
            .build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        if let Some(body) = self.bodies.get_mut(handle) {
            body.recompute_mass_properties_from_colliders(&self.colliders);
        }
        BodyHandle(handle)
    }

    fn remove_body(&mut self, handle: BodyHandle) {
        self.bodies.remove(
            handle.0,
            &mut self.island_manager,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    fn create_static_box(&mut self, center: Vec3, half_extents: Vec3) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(to_vector(center))
            .build();
        ColliderHandle(self.colliders.insert(collider))
    }

    fn step(&mut self, dt: f32) {
        self.pipeline.step(
            &self.gravity,
            &IntegrationParameters {
                dt,
                ..IntegrationParameters::default()
            },
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd,
            None,
            &(),
            &(),
        );
    }

    fn body(&self, handle: BodyHandle) -> Option<BodyState> {
        self.bodies.get(handle.0).map(|rb| BodyState {
            position: from_vector(rb.translation()),
            orientation: from_rotation(rb.rotation()),
            linear_velocity: from_vector(rb.linvel()),
            angular_velocity: from_vector(rb.angvel()),
        })
    }

    fn set_body(&mut self, handle: BodyHandle, state: &BodyState) -> bool {
        let Some(rb) = self.bodies.get_mut(handle.0) else {
            return false;
        };
        rb.set_translation(to_vector(state.position), true);
        rb.set_rotation(to_rotation(state.orientation), true);
        rb.set_linvel(to_vector(state.linear_velocity), true);
        rb.set_angvel(to_vector(state.angular_velocity), true);
        true
    }
}

#[cfg(test)]
impl RapierPhysics {
    /// Number of live dynamic bodies
    pub(crate) fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Number of static colliders, ground excluded
    pub(crate) fn static_count(&self) -> usize {
        let parentless = self
            .colliders
            .iter()
            .filter(|(_, c)| c.parent().is_none())
            .count();
        parentless - 1
    }

    /// Center and half-extents of a static collider
    pub(crate) fn static_box(&self, handle: ColliderHandle) -> Option<(Vec3, Vec3)> {
        let collider = self.colliders.get(handle.0)?;
        let cuboid = collider.shape().as_cuboid()?;
        Some((
            from_vector(collider.translation()),
            from_vector(&cuboid.half_extents),
        ))
    }

    /// Mass the engine resolved for a body
    pub(crate) fn mass(&self, handle: BodyHandle) -> Option<f32> {
        self.bodies.get(handle.0).map(|rb| rb.mass())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yaw_rotation;
    use std::f32::consts::FRAC_PI_2;

    const DT: f32 = 1.0 / 60.0;

    fn car_desc(position: Vec3, orientation: Quat, mass: f32) -> BodyDesc {
        BodyDesc {
            mass,
            half_extents: Vec3::new(1.0, 0.5, 2.0),
            position,
            orientation,
            friction: 0.3,
        }
    }

    /// Push a body along +x every step, holding its yaw like the vehicle does
    fn drive_along_x(physics: &mut RapierPhysics, h: BodyHandle, yaw: f32, frames: u32) {
        for _ in 0..frames {
            let mut state = physics.body(h).unwrap();
            state.linear_velocity.x = 10.0;
            state.linear_velocity.z = 0.0;
            state.orientation = yaw_rotation(yaw);
            state.angular_velocity = Vec3::ZERO;
            physics.set_body(h, &state);
            physics.step(DT);
        }
    }

    #[test]
    fn test_body_falls_to_ground() {
        let mut physics = RapierPhysics::new();
        let h = physics.create_body(&car_desc(Vec3::new(0.0, 2.0, 0.0), Quat::IDENTITY, 150.0));
        for _ in 0..180 {
            physics.step(DT);
        }
        let body = physics.body(h).unwrap();
        assert!((body.position.y - 0.5).abs() < 0.02);
        assert!(body.linear_velocity.y.abs() < 0.05);
    }

    #[test]
    fn test_removed_body_is_stale() {
        let mut physics = RapierPhysics::new();
        let h = physics.create_body(&car_desc(Vec3::ZERO, Quat::IDENTITY, 150.0));
        physics.remove_body(h);
        assert!(physics.body(h).is_none());
        assert!(!physics.set_body(h, &BodyState::at_rest(Vec3::ZERO, Quat::IDENTITY)));
        assert_eq!(physics.body_count(), 0);
        // Removing twice is harmless
        physics.remove_body(h);
    }

    #[test]
    fn test_set_body_roundtrips_pose_and_velocity() {
        let mut physics = RapierPhysics::new();
        let h = physics.create_body(&car_desc(Vec3::ZERO, Quat::IDENTITY, 150.0));
        let wanted = BodyState {
            position: Vec3::new(-12.5, 3.0, 480.25),
            orientation: yaw_rotation(2.3),
            linear_velocity: Vec3::new(4.0, -1.0, -6.5),
            angular_velocity: Vec3::new(0.0, 0.25, 0.0),
        };
        assert!(physics.set_body(h, &wanted));

        let got = physics.body(h).unwrap();
        assert_eq!(got.position, wanted.position);
        assert_eq!(got.linear_velocity, wanted.linear_velocity);
        assert_eq!(got.angular_velocity, wanted.angular_velocity);
        assert!(got.orientation.angle_between(wanted.orientation) < 1e-5);
    }

    #[test]
    fn test_static_box_blocks_motion() {
        let mut physics = RapierPhysics::new();
        physics.create_static_box(Vec3::new(5.0, 5.0, 0.0), Vec3::new(1.0, 5.0, 10.0));
        let h = physics.create_body(&car_desc(Vec3::new(0.0, 0.5, 0.0), Quat::IDENTITY, 150.0));

        drive_along_x(&mut physics, h, 0.0, 90);
        let body = physics.body(h).unwrap();
        // Body half width 1 + wall half width 1: stopped near x = 3
        assert!(body.position.x > 2.5);
        assert!(body.position.x < 3.05);
    }

    #[test]
    fn test_yawed_body_collides_with_its_rotated_extent() {
        let mut physics = RapierPhysics::new();
        // Wall face at x = 4
        physics.create_static_box(Vec3::new(5.0, 5.0, 0.0), Vec3::new(1.0, 5.0, 10.0));
        let yaw = FRAC_PI_2;
        let h = physics.create_body(&car_desc(Vec3::new(0.0, 0.5, 0.0), yaw_rotation(yaw), 150.0));

        drive_along_x(&mut physics, h, yaw, 90);
        let body = physics.body(h).unwrap();
        // Yawed a quarter turn the long half-extent (2) points along x
        let nose = body.position.x + 2.0;
        assert!(nose < 4.05, "nose at x = {nose} is inside the wall");
        assert!(nose > 3.5);
    }

    #[test]
    fn test_body_mass_follows_desc() {
        let mut physics = RapierPhysics::new();
        let light = physics.create_body(&car_desc(Vec3::ZERO, Quat::IDENTITY, 150.0));
        let heavy =
            physics.create_body(&car_desc(Vec3::new(10.0, 0.0, 0.0), Quat::IDENTITY, 400.0));
        assert!((physics.mass(light).unwrap() - 150.0).abs() < 0.1);
        assert!((physics.mass(heavy).unwrap() - 400.0).abs() < 0.1);
    }

    #[test]
    fn test_static_boxes_are_counted_apart_from_ground() {
        let mut physics = RapierPhysics::new();
        assert_eq!(physics.static_count(), 0);
        let c = physics.create_static_box(Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 2.0, 6.0));
        physics.create_body(&car_desc(Vec3::ZERO, Quat::IDENTITY, 150.0));
        assert_eq!(physics.static_count(), 1);
        assert_eq!(
            physics.static_box(c),
            Some((Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 2.0, 6.0)))
        );
    }
}
