//! Physics Module
//!
//! Just enough geometry to run the movement core outside a game engine.
//!
//! # Unit System
//!
//! **1 unit = 1 meter** (SI units throughout)
//!
//! - Distances in meters
//! - Velocities in m/s
//! - Accelerations in m/s²
//!
//! # Submodules
//!
//! - [`collision`] - Ray, plane and capsule queries against boxes and planes
//! - [`world`] - [`BoxWorld`] level geometry and the [`SimpleMotor`] kinematic motor

pub mod collision;
pub mod world;

pub use collision::{Aabb, Capsule, Penetration, Plane, aabb_surface_normal, ray_aabb_intersect};
pub use world::{BoxWorld, GROUND_SNAP_DISTANCE, SimpleMotor};
