//! Wall Detection and Wall Sliding
//!
//! Walls are found with a fan of rays around the character's heading:
//! forward, the two forward diagonals, left and right. The fan is cast from
//! the capsule center first and, only if that misses, from upper and lower
//! capsule heights. A hit counts as a wall when its normal is nearly
//! horizontal (`|normal . up| < wall_max_up_dot`).
//!
//! An airborne character moving into a wall starts wall sliding: horizontal
//! velocity is redirected along the wall and the fall speed is limited to
//! `wall_sliding_speed`.

use glam::Vec3;

use super::config::MovementConfig;
use super::motor::{CharacterMotor, RaycastHit};

/// Fraction of the capsule height above/below center for the second probe pass
const PROBE_HEIGHT_FRACTION: f32 = 0.35;

/// Input pointing further away from the wall than this ends a slide
const WALL_RELEASE_DOT: f32 = 0.5;

/// A detected wall surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallHit {
    /// Wall normal flattened onto the horizontal plane (normalized)
    pub normal: Vec3,
    pub point: Vec3,
    pub distance: f32,
}

/// Horizontal probe fan around `heading`: forward, forward-left, forward-right,
/// left, right.
pub fn probe_directions(heading: Vec3, up: Vec3) -> [Vec3; 5] {
    let forward = heading.normalize_or(Vec3::NEG_Z);
    let right = forward.cross(up).normalize_or(Vec3::X);
    [
        forward,
        (forward - right).normalize_or(forward),
        (forward + right).normalize_or(forward),
        -right,
        right,
    ]
}

/// Cast every direction from every origin of one pass and keep the nearest
/// hit that qualifies as a wall.
pub fn probe_pass<M: CharacterMotor + ?Sized>(
    motor: &M,
    origins: &[Vec3],
    directions: &[Vec3],
    reach: f32,
    up: Vec3,
    max_up_dot: f32,
) -> Option<WallHit> {
    let mut best: Option<WallHit> = None;
    for &origin in origins {
        for &direction in directions {
            let Some(hit) = motor.raycast(origin, direction, reach) else {
                continue;
            };
            if let Some(wall) = as_wall(hit, up, max_up_dot) {
                if best.is_none_or(|b| wall.distance < b.distance) {
                    best = Some(wall);
                }
            }
        }
    }
    best
}

/// Full probe: center pass, then upper/lower pass if the center missed.
pub fn probe_walls<M: CharacterMotor + ?Sized>(
    motor: &M,
    heading: Vec3,
    config: &MovementConfig,
) -> Option<WallHit> {
    let up = motor.character_up();
    let capsule = motor.capsule();
    let center = motor.position() + up * capsule.y_offset;
    let reach = capsule.radius + config.wall_probe_distance;
    let directions = probe_directions(heading, up);
    let max_up_dot = config.tuning.wall_max_up_dot;

    probe_pass(motor, &[center], &directions, reach, up, max_up_dot).or_else(|| {
        let offset = up * capsule.height * PROBE_HEIGHT_FRACTION;
        probe_pass(motor, &[center + offset, center - offset], &directions, reach, up, max_up_dot)
    })
}

fn as_wall(hit: RaycastHit, up: Vec3, max_up_dot: f32) -> Option<WallHit> {
    if hit.normal.dot(up).abs() >= max_up_dot {
        return None;
    }
    let flat = hit.normal - up * hit.normal.dot(up);
    let normal = flat.try_normalize()?;
    Some(WallHit {
        normal,
        point: hit.point,
        distance: hit.distance,
    })
}

/// Wall-slide state of an airborne character.
#[derive(Debug, Clone, Default)]
pub struct WallSlide {
    contact: Option<WallHit>,
}

impl WallSlide {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_sliding(&self) -> bool {
        self.contact.is_some()
    }

    /// Normal of the wall being slid on.
    pub fn wall_normal(&self) -> Option<Vec3> {
        self.contact.map(|c| c.normal)
    }

    /// Leave the wall (landing, jumping off).
    pub fn release(&mut self) {
        if self.contact.take().is_some() {
            log::debug!("wall slide: released");
        }
    }

    /// Detect walls and apply wall sliding to `velocity`.
    ///
    /// `wish` is the world-space move input (length <= 1).
    pub fn update<M: CharacterMotor + ?Sized>(
        &mut self,
        motor: &M,
        velocity: &mut Vec3,
        wish: Vec3,
        grounded: bool,
        dt: f32,
        config: &MovementConfig,
    ) -> bool {
        if grounded {
            self.release();
            return false;
        }

        let up = motor.character_up();
        let vertical_speed = velocity.dot(up);
        let horizontal = *velocity - up * vertical_speed;
        let heading = horizontal
            .try_normalize()
            .or_else(|| wish.try_normalize())
            .unwrap_or_else(|| motor.character_forward());

        let Some(hit) = probe_walls(motor, heading, config) else {
            self.release();
            return false;
        };

        let inward = -hit.normal;
        let into_wall = horizontal.dot(inward);
        let entering = !self.is_sliding() && into_wall > config.tuning.wall_entry_dot;
        let staying = self.is_sliding() && wish.dot(hit.normal) <= WALL_RELEASE_DOT;
        if !entering && !staying {
            self.release();
            return false;
        }
        if entering {
            log::debug!("wall slide: entered, normal={:?}", hit.normal);
        }

        // Redirect along the wall, dropping the into-wall part
        let tangent = if into_wall > 0.0 {
            horizontal - inward * into_wall
        } else {
            horizontal
        };
        let alignment = match (wish.try_normalize(), tangent.try_normalize()) {
            (Some(w), Some(t)) => w.dot(t).abs(),
            _ => 0.0,
        };
        let keep = (1.0 - (1.0 - alignment) * config.tuning.wall_slide_drag * dt).max(0.0);

        let fall_limit = -config.wall_sliding_speed;
        let vertical_speed = vertical_speed.max(fall_limit);

        *velocity = tangent * keep + up * vertical_speed;
        self.contact = Some(hit);
        true
    }
}
