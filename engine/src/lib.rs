//! Momentum Engine Library
//!
//! Movement simulation core for a first-person character controller:
//! stances and slides, coyote time and jump buffering, bunny-hops, wall
//! slides and wall jumps, air dashes, ramp boosts and knockback.
//!
//! The core computes velocity, rotation and locomotion state each tick. It
//! never moves the capsule itself; that is the job of a kinematic motor
//! implementing [`player::CharacterMotor`].
//!
//! # Modules
//!
//! - [`player`] - Controller, stance state machine, movement techniques, config
//! - [`physics`] - Box-and-plane reference world with a kinematic motor
//!
//! # Example
//!
//! ```ignore
//! use momentum_engine::{CharacterController, CharacterInput, MovementConfig};
//! use momentum_engine::physics::{BoxWorld, SimpleMotor};
//! use glam::{Quat, Vec2, Vec3};
//!
//! let motor = SimpleMotor::new(BoxWorld::flat(), Vec3::ZERO);
//! let mut controller = CharacterController::new(motor, MovementConfig::default())?;
//!
//! loop {
//!     controller.update_input(CharacterInput::moving(Quat::IDENTITY, Vec2::Y));
//!     controller.tick(1.0 / 60.0);
//!     println!("speed {:.2}", controller.velocity().length());
//! }
//! ```

pub mod physics;
pub mod player;

// Re-export the types most hosts need
pub use player::{
    CharacterController, CharacterInput, CharacterMotor, CharacterState, ConfigError, CrouchCommand,
    MovementConfig, Stance,
};
