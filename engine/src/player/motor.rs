//! Kinematic Motor Interface
//!
//! The movement core never moves the capsule itself. It talks to a motor
//! through [`CharacterMotor`]: the motor reports grounding, owns the capsule
//! shape, answers overlap and ray queries, and performs the swept move with
//! the velocity the core produces.
//!
//! [`ScriptedMotor`] is a motor whose every answer is a plain field, for
//! driving the core from tests without any geometry.

use glam::{Quat, Vec3};

/// Capsule shape as seen by the motor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapsuleDimensions {
    pub radius: f32,
    pub height: f32,
    /// Offset of the capsule center above the character origin (feet)
    pub y_offset: f32,
}

impl CapsuleDimensions {
    /// Capsule standing on the character origin.
    pub fn new(radius: f32, height: f32) -> Self {
        Self {
            radius,
            height,
            y_offset: height * 0.5,
        }
    }
}

/// Result of a motor ray query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    pub point: Vec3,
    /// Surface normal at the hit point (normalized)
    pub normal: Vec3,
    pub distance: f32,
}

/// Operations the movement core consumes from the kinematic motor.
pub trait CharacterMotor {
    /// Stable grounding as of the motor's last grounding probe.
    fn is_stable_on_ground(&self) -> bool;

    /// Normal of the ground under the character (meaningful when grounded).
    fn ground_normal(&self) -> Vec3;

    fn character_up(&self) -> Vec3;

    fn character_forward(&self) -> Vec3;

    /// Character origin (bottom of the capsule).
    fn position(&self) -> Vec3;

    fn capsule(&self) -> CapsuleDimensions;

    fn set_capsule_dimensions(&mut self, capsule: CapsuleDimensions);

    /// Number of colliders overlapping the capsule at its current size.
    fn character_overlap(&self) -> usize;

    /// Skip ground snapping on the next grounding probe.
    fn force_unground(&mut self);

    /// Cast a ray against the environment, ignoring the character itself.
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RaycastHit>;

    /// Sweep the capsule with `velocity` for `dt` and refresh grounding.
    ///
    /// Returns the velocity left after collision resolution.
    fn move_character(&mut self, velocity: Vec3, rotation: Quat, dt: f32) -> Vec3;

    /// Re-orient `direction` so it lies on the surface with `surface_normal`,
    /// keeping its heading relative to the character up axis.
    fn direction_tangent_to_surface(&self, direction: Vec3, surface_normal: Vec3) -> Vec3 {
        let right = direction.cross(self.character_up());
        surface_normal.cross(right).normalize_or_zero()
    }
}

/// Infinite plane that answers ray queries for a [`ScriptedMotor`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptedWall {
    pub point: Vec3,
    /// Normalized plane normal, facing the character side
    pub normal: Vec3,
}

/// Motor whose answers are all plain fields.
///
/// `move_character` integrates position without collision. Forced ungrounding
/// clears `grounded` and is counted in `force_unground_calls`.
#[derive(Debug, Clone)]
pub struct ScriptedMotor {
    pub grounded: bool,
    pub ground_normal: Vec3,
    pub up: Vec3,
    pub rotation: Quat,
    pub position: Vec3,
    pub capsule: CapsuleDimensions,
    /// Value returned by every overlap query
    pub overlap_count: usize,
    pub walls: Vec<ScriptedWall>,
    pub force_unground_calls: u32,
    /// Velocity passed to the last `move_character`
    pub last_move_velocity: Vec3,
}

impl Default for ScriptedMotor {
    fn default() -> Self {
        Self {
            grounded: true,
            ground_normal: Vec3::Y,
            up: Vec3::Y,
            rotation: Quat::IDENTITY,
            position: Vec3::ZERO,
            capsule: CapsuleDimensions::new(0.5, 2.0),
            overlap_count: 0,
            walls: Vec::new(),
            force_unground_calls: 0,
            last_move_velocity: Vec3::ZERO,
        }
    }
}

impl ScriptedMotor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Motor hanging in the air.
    pub fn airborne() -> Self {
        Self {
            grounded: false,
            ..Default::default()
        }
    }

    /// Motor standing on a slope tilted `angle_degrees` around the X axis.
    ///
    /// Downhill points toward -Z.
    pub fn on_slope(angle_degrees: f32) -> Self {
        let normal = Quat::from_rotation_x(-angle_degrees.to_radians()) * Vec3::Y;
        Self {
            ground_normal: normal,
            ..Default::default()
        }
    }

    /// Add a wall plane through `point` facing `normal`.
    pub fn with_wall(mut self, point: Vec3, normal: Vec3) -> Self {
        self.walls.push(ScriptedWall {
            point,
            normal: normal.normalize_or(Vec3::X),
        });
        self
    }
}

impl CharacterMotor for ScriptedMotor {
    fn is_stable_on_ground(&self) -> bool {
        self.grounded
    }

    fn ground_normal(&self) -> Vec3 {
        self.ground_normal
    }

    fn character_up(&self) -> Vec3 {
        self.up
    }

    fn character_forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn capsule(&self) -> CapsuleDimensions {
        self.capsule
    }

    fn set_capsule_dimensions(&mut self, capsule: CapsuleDimensions) {
        self.capsule = capsule;
    }

    fn character_overlap(&self) -> usize {
        self.overlap_count
    }

    fn force_unground(&mut self) {
        self.grounded = false;
        self.force_unground_calls += 1;
    }

    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RaycastHit> {
        let mut best: Option<RaycastHit> = None;
        for wall in &self.walls {
            let denom = direction.dot(wall.normal);
            // Only front faces, ray must travel into the wall
            if denom >= -1e-6 {
                continue;
            }
            let t = (wall.point - origin).dot(wall.normal) / denom;
            if t < 0.0 || t > max_distance {
                continue;
            }
            if best.is_none_or(|hit| t < hit.distance) {
                best = Some(RaycastHit {
                    point: origin + direction * t,
                    normal: wall.normal,
                    distance: t,
                });
            }
        }
        best
    }

    fn move_character(&mut self, velocity: Vec3, rotation: Quat, dt: f32) -> Vec3 {
        self.rotation = rotation;
        self.last_move_velocity = velocity;
        self.position += velocity * dt;
        velocity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.001;

    #[test]
    fn test_tangent_direction_on_flat_ground() {
        let motor = ScriptedMotor::new();
        let dir = motor.direction_tangent_to_surface(Vec3::NEG_Z, Vec3::Y);
        assert!((dir - Vec3::NEG_Z).length() < EPSILON);
    }

    #[test]
    fn test_tangent_direction_follows_slope() {
        let motor = ScriptedMotor::on_slope(30.0);
        let dir = motor.direction_tangent_to_surface(Vec3::NEG_Z, motor.ground_normal);
        assert!(dir.dot(motor.ground_normal).abs() < EPSILON);
        assert!((dir.length() - 1.0).abs() < EPSILON);
        // Downhill is -Z, so the tangent heads down
        assert!(dir.y < 0.0);
        assert!(dir.z < 0.0);
    }

    #[test]
    fn test_raycast_hits_nearest_wall() {
        let motor = ScriptedMotor::new()
            .with_wall(Vec3::new(0.0, 0.0, -3.0), Vec3::Z)
            .with_wall(Vec3::new(0.0, 0.0, -1.0), Vec3::Z);
        let hit = motor.raycast(Vec3::ZERO, Vec3::NEG_Z, 5.0).unwrap();
        assert!((hit.distance - 1.0).abs() < EPSILON);
        assert_eq!(hit.normal, Vec3::Z);
    }

    #[test]
    fn test_raycast_ignores_back_faces_and_range() {
        let motor = ScriptedMotor::new().with_wall(Vec3::new(0.0, 0.0, -1.0), Vec3::Z);
        assert!(motor.raycast(Vec3::ZERO, Vec3::Z, 5.0).is_none());
        assert!(motor.raycast(Vec3::ZERO, Vec3::NEG_Z, 0.5).is_none());
    }

    #[test]
    fn test_force_unground_is_counted() {
        let mut motor = ScriptedMotor::new();
        motor.force_unground();
        assert!(!motor.is_stable_on_ground());
        assert_eq!(motor.force_unground_calls, 1);
    }
}
