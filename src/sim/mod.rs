//! Simulation module
//!
//! All gameplay logic lives here. It runs single-threaded, one fixed step at
//! a time:
//! - Fixed timestep only (handling constants are per step)
//! - Seeded RNG only (world layout follows the session seed)
//! - No rendering or platform dependencies
//! - Physics is reached only through the `PhysicsWorld` trait

pub mod clock;
pub mod collectible;
pub mod events;
pub mod generator;
pub mod input;
pub mod physics;
pub mod profile;
pub mod session;
pub mod state;
pub mod tick;
pub mod vehicle;
pub mod world;

pub use clock::FixedStep;
pub use collectible::{collect_within, planar_distance};
pub use events::{CameraMode, GameEvent, UiSink};
pub use generator::{Building, Collectible, GeneratedWorld, generate_world};
pub use input::{Action, TickInput};
pub use physics::{BodyDesc, BodyHandle, BodyState, ColliderHandle, PhysicsWorld, RapierPhysics};
pub use profile::{ProfileRegistry, VehicleProfile};
pub use session::{SessionPhase, SessionState, SessionTimer};
pub use state::GameState;
pub use tick::{advance_timer, tick, timer_tick};
pub use vehicle::{VehicleState, VisualTransform};
pub use world::WorldBounds;
