//! Reference World and Kinematic Motor
//!
//! [`BoxWorld`] is a minimal level: an optional (possibly sloped) ground
//! plane plus axis-aligned boxes for walls, ramps' side walls and ceilings.
//! [`SimpleMotor`] moves a capsule through it and implements
//! [`CharacterMotor`], so the movement core can run complete ticks without a
//! game engine.
//!
//! The motor is small:
//!
//! - Moves are split into sub-steps no longer than half the capsule radius
//! - After each sub-step the capsule is pushed out of every overlapping
//!   shape and the velocity loses its component into that surface
//! - Grounding snaps the capsule down onto stable surfaces within
//!   [`GROUND_SNAP_DISTANCE`], unless ungrounding was forced
//!
//! # Usage
//!
//! ```rust,ignore
//! use momentum_engine::physics::{BoxWorld, SimpleMotor};
//! use glam::Vec3;
//!
//! let world = BoxWorld::flat()
//!     .with_box(Vec3::new(-5.0, 0.0, -10.0), Vec3::new(5.0, 4.0, -9.0));
//! let motor = SimpleMotor::new(world, Vec3::ZERO);
//! ```

use glam::{Quat, Vec3};

use crate::player::motor::{CapsuleDimensions, CharacterMotor, RaycastHit};

use super::collision::{Aabb, Capsule, Plane};

/// How far below the feet ground is still snapped to
pub const GROUND_SNAP_DISTANCE: f32 = 0.2;

/// Upward speed above which the motor never snaps to ground
pub const SNAP_MAX_RISE_SPEED: f32 = 0.5;

/// Default steepest walkable slope in degrees
pub const DEFAULT_MAX_STABLE_ANGLE: f32 = 50.0;

/// Penetration resolution passes per sub-step
const RESOLVE_PASSES: usize = 3;

/// Sub-step cap, guarding against degenerate capsules
const MAX_SUBSTEPS: usize = 64;

/// Static level geometry.
#[derive(Debug, Clone, Default)]
pub struct BoxWorld {
    pub ground: Option<Plane>,
    pub boxes: Vec<Aabb>,
}

impl BoxWorld {
    /// Empty world with no ground at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Flat ground at y = 0.
    pub fn flat() -> Self {
        Self {
            ground: Some(Plane::new(Vec3::ZERO, Vec3::Y)),
            boxes: Vec::new(),
        }
    }

    /// Ground through the origin tilted `angle_degrees` around X.
    ///
    /// Downhill points toward -Z.
    pub fn slope(angle_degrees: f32) -> Self {
        let normal = Quat::from_rotation_x(-angle_degrees.to_radians()) * Vec3::Y;
        Self {
            ground: Some(Plane::new(Vec3::ZERO, normal)),
            boxes: Vec::new(),
        }
    }

    pub fn with_box(mut self, a: Vec3, b: Vec3) -> Self {
        self.boxes.push(Aabb::new(a, b));
        self
    }

    /// Nearest front-facing hit along the ray.
    pub fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RaycastHit> {
        let direction = direction.try_normalize()?;
        let mut best: Option<RaycastHit> = None;
        let mut consider = |distance: f32, normal: Vec3| {
            if best.is_none_or(|hit| distance < hit.distance) {
                best = Some(RaycastHit {
                    point: origin + direction * distance,
                    normal,
                    distance,
                });
            }
        };

        if let Some(ground) = &self.ground {
            if let Some(t) = ground.ray_cast(origin, direction, max_distance) {
                consider(t, ground.normal);
            }
        }
        for aabb in &self.boxes {
            if aabb.contains(origin) {
                continue;
            }
            if let Some((t, normal)) = aabb.ray_cast(origin, direction, max_distance) {
                consider(t, normal);
            }
        }
        best
    }

    /// Number of shapes the capsule overlaps.
    pub fn overlap_count(&self, capsule: &Capsule) -> usize {
        let ground = self
            .ground
            .iter()
            .filter(|plane| capsule.overlaps_plane(plane))
            .count();
        let boxes = self.boxes.iter().filter(|aabb| capsule.overlaps_aabb(aabb)).count();
        ground + boxes
    }
}

/// Kinematic capsule motor over a [`BoxWorld`].
#[derive(Debug, Clone)]
pub struct SimpleMotor {
    world: BoxWorld,
    position: Vec3,
    rotation: Quat,
    capsule: CapsuleDimensions,
    up: Vec3,
    grounded: bool,
    ground_normal: Vec3,
    /// Skip snapping on the next grounding probe
    skip_snap: bool,
    max_stable_angle: f32,
}

impl SimpleMotor {
    /// Motor with its feet at `position`. Grounding is probed immediately.
    pub fn new(world: BoxWorld, position: Vec3) -> Self {
        let mut motor = Self {
            world,
            position,
            rotation: Quat::IDENTITY,
            capsule: CapsuleDimensions::new(0.5, 2.0),
            up: Vec3::Y,
            grounded: false,
            ground_normal: Vec3::Y,
            skip_snap: false,
            max_stable_angle: DEFAULT_MAX_STABLE_ANGLE,
        };
        motor.probe_ground(Vec3::ZERO);
        motor
    }

    /// Steepest slope (degrees) that still counts as stable ground.
    pub fn with_max_stable_angle(mut self, degrees: f32) -> Self {
        self.max_stable_angle = degrees;
        self.probe_ground(Vec3::ZERO);
        self
    }

    pub fn world(&self) -> &BoxWorld {
        &self.world
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Move the feet to `position` without sweeping.
    pub fn teleport(&mut self, position: Vec3) {
        self.position = position;
        self.skip_snap = false;
        self.probe_ground(Vec3::ZERO);
    }

    fn world_capsule(&self) -> Capsule {
        Capsule::standing(self.position, self.up, self.capsule.radius, self.capsule.height)
    }

    fn is_stable_normal(&self, normal: Vec3) -> bool {
        normal.dot(self.up) >= self.max_stable_angle.to_radians().cos()
    }

    /// Push out of every overlapping shape, clipping `velocity`.
    fn resolve_penetrations(&mut self, velocity: &mut Vec3) {
        for _ in 0..RESOLVE_PASSES {
            let capsule = self.world_capsule();
            let mut pushed = false;

            let ground_hit = self.world.ground.and_then(|plane| capsule.penetration_plane(&plane));
            let box_hits = self
                .world
                .boxes
                .iter()
                .filter_map(|aabb| capsule.penetration_aabb(aabb));

            for pen in ground_hit.into_iter().chain(box_hits).collect::<Vec<_>>() {
                self.position += pen.normal * pen.depth;
                let into = velocity.dot(pen.normal);
                if into < 0.0 {
                    *velocity -= pen.normal * into;
                }
                pushed = true;
            }
            if !pushed {
                break;
            }
        }
    }

    /// Find stable ground below the feet and snap onto it.
    fn probe_ground(&mut self, velocity: Vec3) -> Vec3 {
        let mut velocity = velocity;
        if self.skip_snap {
            self.skip_snap = false;
            self.grounded = false;
            return velocity;
        }

        let capsule = self.world_capsule();
        let mut best: Option<(f32, Vec3, Vec3)> = None;

        // Plane: perpendicular gap of the bottom sphere
        if let Some(plane) = &self.world.ground {
            let gap = plane.signed_distance(capsule.a) - capsule.radius;
            best = Some((gap, plane.normal, -plane.normal));
        }
        // Boxes: vertical ray from the bottom sphere center
        let reach = capsule.radius + GROUND_SNAP_DISTANCE;
        for aabb in &self.world.boxes {
            if let Some((t, normal)) = aabb.ray_cast(capsule.a, -self.up, reach) {
                let gap = t - capsule.radius;
                if best.is_none_or(|(g, _, _)| gap < g) {
                    best = Some((gap, normal, -self.up));
                }
            }
        }

        let rising = velocity.dot(self.up) > SNAP_MAX_RISE_SPEED;
        match best {
            Some((gap, normal, snap_dir))
                if !rising && gap <= GROUND_SNAP_DISTANCE && self.is_stable_normal(normal) =>
            {
                if gap > 0.0 {
                    self.position += snap_dir * gap;
                }
                let into = velocity.dot(normal);
                if into < 0.0 {
                    velocity -= normal * into;
                }
                self.grounded = true;
                self.ground_normal = normal;
            }
            _ => {
                self.grounded = false;
                self.ground_normal = self.up;
            }
        }
        velocity
    }
}

impl CharacterMotor for SimpleMotor {
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
        self.world.overlap_count(&self.world_capsule())
    }

    fn force_unground(&mut self) {
        self.skip_snap = true;
        self.grounded = false;
    }

    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RaycastHit> {
        self.world.raycast(origin, direction, max_distance)
    }

    fn move_character(&mut self, velocity: Vec3, rotation: Quat, dt: f32) -> Vec3 {
        self.rotation = rotation;
        let mut velocity = velocity;

        let travel = velocity.length() * dt;
        let max_step = (self.capsule.radius * 0.5).max(0.01);
        let steps = ((travel / max_step).ceil() as usize).clamp(1, MAX_SUBSTEPS);
        let step_dt = dt / steps as f32;

        for _ in 0..steps {
            self.position += velocity * step_dt;
            self.resolve_penetrations(&mut velocity);
        }

        self.probe_ground(velocity)
    }
}
