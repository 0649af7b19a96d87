//! Player Module
//!
//! Movement simulation core for a first-person character.
//!
//! # Components
//!
//! - [`CharacterController`] - Public tick contract: input, rotation, velocity and hooks
//!   - Grounded movement with stance speeds, friction and slides
//!   - Air strafing, variable-height jumps, coyote time and jump buffering
//! - [`StanceController`] - Stand/Crouch capsule changes with overlap-checked stand-up
//! - [`WallSlide`] - Multi-ray wall probe and wall sliding
//! - [`AirDash`], [`RampBoost`], [`KnockbackSystem`] - Auxiliary movement techniques
//! - [`CharacterMotor`] - Interface to the kinematic motor that performs the moves
//! - [`MovementConfig`] - Every tunable, loadable from JSON

pub mod air_dash;
pub mod config;
pub mod crouch;
pub mod jump;
pub mod knockback;
pub mod motor;
pub mod movement_controller;
pub mod ramp_boost;
pub mod state;
pub mod wall;

pub use air_dash::AirDash;
pub use config::{CapsuleConfig, ConfigError, MomentumTuning, MovementConfig};
pub use crouch::{CapsuleHeightSmoother, StanceController, StandUp, TRANSITION_DURATION};
pub use jump::{JumpContext, JumpKind};
pub use knockback::{Knockback, KnockbackImpulse, KnockbackSystem};
pub use motor::{CapsuleDimensions, CharacterMotor, RaycastHit, ScriptedMotor, ScriptedWall};
pub use movement_controller::{CharacterController, air_strafe};
pub use ramp_boost::RampBoost;
pub use state::{CharacterInput, CharacterState, CrouchCommand, CrouchLatch, Stance};
pub use wall::{WallHit, WallSlide};
