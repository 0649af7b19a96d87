//! Collision Queries
//!
//! Ray, plane and capsule queries against axis-aligned boxes and planes, as
//! needed by the reference motor in [`super::world`].
//!
//! # Ray-AABB Intersection
//!
//! The slab method is used for ray-AABB intersection, which finds the
//! intersection points by computing entry and exit times for each axis.
//!
//! # Capsule Queries
//!
//! A capsule is a segment swept by a radius. Its distance to a box is found
//! by alternating closest-point projections between the segment and the box,
//! which converges for any pair of convex shapes.
//!
//! # Example
//!
//! ```ignore
//! use momentum_engine::physics::collision::{Aabb, Capsule};
//! use glam::Vec3;
//!
//! let crate_box = Aabb::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 2.0, 1.0));
//! if let Some((t, normal)) = crate_box.ray_cast(Vec3::new(0.0, 1.0, -5.0), Vec3::Z, 10.0) {
//!     println!("hit at {} facing {:?}", t, normal);
//! }
//!
//! let capsule = Capsule::standing(Vec3::new(0.0, 0.0, -1.2), Vec3::Y, 0.5, 2.0);
//! assert!(capsule.overlaps_aabb(&crate_box));
//! ```

use glam::Vec3;

/// Alternating projection rounds for segment/box distance
const CLOSEST_POINT_ITERATIONS: usize = 8;

/// Penetration smaller than this is treated as touching
pub const CONTACT_TOLERANCE: f32 = 1e-4;

/// Performs ray-AABB intersection using the slab method.
///
/// # Returns
///
/// * `Some(t)` - Distance along the ray to the entry point, or the exit point
///   when the ray starts inside the box
/// * `None` - No intersection or intersection is behind the ray origin
pub fn ray_aabb_intersect(
    ray_origin: Vec3,
    ray_dir: Vec3,
    aabb_min: Vec3,
    aabb_max: Vec3,
) -> Option<f32> {
    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;

    for axis in 0..3 {
        let origin = ray_origin[axis];
        let dir = ray_dir[axis];
        if dir.abs() < 1e-10 {
            // Parallel to this slab: must already be between its planes
            if origin < aabb_min[axis] || origin > aabb_max[axis] {
                return None;
            }
            continue;
        }
        let inv = 1.0 / dir;
        let t1 = (aabb_min[axis] - origin) * inv;
        let t2 = (aabb_max[axis] - origin) * inv;
        t_min = t_min.max(t1.min(t2));
        t_max = t_max.min(t1.max(t2));
    }

    if t_max >= t_min && t_max >= 0.0 {
        Some(if t_min >= 0.0 { t_min } else { t_max })
    } else {
        None
    }
}

/// Outward normal of the AABB face closest to `point`.
pub fn aabb_surface_normal(point: Vec3, aabb_min: Vec3, aabb_max: Vec3) -> Vec3 {
    let center = (aabb_min + aabb_max) * 0.5;
    let half_extents = ((aabb_max - aabb_min) * 0.5).max(Vec3::splat(1e-6));

    // Unit cube space: the dominant axis names the face
    let normalized = (point - center) / half_extents;
    let abs = normalized.abs();

    if abs.x >= abs.y && abs.x >= abs.z {
        Vec3::new(normalized.x.signum(), 0.0, 0.0)
    } else if abs.y >= abs.z {
        Vec3::new(0.0, normalized.y.signum(), 0.0)
    } else {
        Vec3::new(0.0, 0.0, normalized.z.signum())
    }
}

/// Closest point to `point` on the segment `a`-`b`.
pub fn closest_point_on_segment(point: Vec3, a: Vec3, b: Vec3) -> Vec3 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return a;
    }
    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

// =============================================================================
// Aabb
// =============================================================================

/// Axis-aligned box obstacle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Box spanning two corners in any order.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        point.clamp(self.min, self.max)
    }

    /// Ray query returning distance and face normal.
    pub fn ray_cast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
    ) -> Option<(f32, Vec3)> {
        let t = ray_aabb_intersect(origin, direction, self.min, self.max)?;
        if t > max_distance {
            return None;
        }
        let point = origin + direction * t;
        Some((t, aabb_surface_normal(point, self.min, self.max)))
    }
}

// =============================================================================
// Plane
// =============================================================================

/// Infinite plane, solid below its normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub point: Vec3,
    /// Normalized, pointing out of the solid side
    pub normal: Vec3,
}

impl Plane {
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        Self {
            point,
            normal: normal.normalize_or(Vec3::Y),
        }
    }

    pub fn signed_distance(&self, point: Vec3) -> f32 {
        (point - self.point).dot(self.normal)
    }

    /// Front-face ray query.
    pub fn ray_cast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<f32> {
        let denom = direction.dot(self.normal);
        if denom >= -1e-6 {
            return None;
        }
        let t = -self.signed_distance(origin) / denom;
        (t >= 0.0 && t <= max_distance).then_some(t)
    }
}

// =============================================================================
// Capsule
// =============================================================================

/// Capsule in world space: a segment plus radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capsule {
    /// Center of the bottom hemisphere
    pub a: Vec3,
    /// Center of the top hemisphere
    pub b: Vec3,
    pub radius: f32,
}

/// Push needed to separate a capsule from a shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Penetration {
    /// Direction to move the capsule (normalized)
    pub normal: Vec3,
    pub depth: f32,
}

impl Capsule {
    /// Upright capsule whose bottom touches `feet`.
    pub fn standing(feet: Vec3, up: Vec3, radius: f32, height: f32) -> Self {
        let height = height.max(radius * 2.0);
        Self {
            a: feet + up * radius,
            b: feet + up * (height - radius),
            radius,
        }
    }

    /// Closest points between the capsule segment and `aabb`, as
    /// (segment point, box point).
    pub fn closest_points(&self, aabb: &Aabb) -> (Vec3, Vec3) {
        let mut on_segment = (self.a + self.b) * 0.5;
        let mut on_box = aabb.closest_point(on_segment);
        for _ in 0..CLOSEST_POINT_ITERATIONS {
            on_segment = closest_point_on_segment(on_box, self.a, self.b);
            on_box = aabb.closest_point(on_segment);
        }
        (on_segment, on_box)
    }

    pub fn overlaps_aabb(&self, aabb: &Aabb) -> bool {
        let (on_segment, on_box) = self.closest_points(aabb);
        on_segment.distance(on_box) < self.radius - CONTACT_TOLERANCE
    }

    pub fn overlaps_plane(&self, plane: &Plane) -> bool {
        let lowest = plane.signed_distance(self.a).min(plane.signed_distance(self.b));
        lowest < self.radius - CONTACT_TOLERANCE
    }

    /// Separation from `aabb`, if the two overlap.
    pub fn penetration_aabb(&self, aabb: &Aabb) -> Option<Penetration> {
        let (on_segment, on_box) = self.closest_points(aabb);
        let offset = on_segment - on_box;
        let distance = offset.length();
        if distance >= self.radius - CONTACT_TOLERANCE {
            return None;
        }
        if distance > 1e-6 {
            return Some(Penetration {
                normal: offset / distance,
                depth: self.radius - distance,
            });
        }

        // Segment inside the box: leave through the nearest face
        let to_min = on_segment - aabb.min;
        let to_max = aabb.max - on_segment;
        let candidates = [
            (to_min.x, Vec3::NEG_X),
            (to_max.x, Vec3::X),
            (to_min.y, Vec3::NEG_Y),
            (to_max.y, Vec3::Y),
            (to_min.z, Vec3::NEG_Z),
            (to_max.z, Vec3::Z),
        ];
        let (gap, normal) = candidates
            .into_iter()
            .fold((f32::INFINITY, Vec3::Y), |best, c| if c.0 < best.0 { c } else { best });
        Some(Penetration {
            normal,
            depth: gap + self.radius,
        })
    }

    /// Separation from `plane`, if the capsule dips below it.
    pub fn penetration_plane(&self, plane: &Plane) -> Option<Penetration> {
        let lowest = plane.signed_distance(self.a).min(plane.signed_distance(self.b));
        let depth = self.radius - lowest;
        (depth > CONTACT_TOLERANCE).then_some(Penetration {
            normal: plane.normal,
            depth,
        })
    }
}
