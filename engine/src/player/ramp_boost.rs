//! Ramp Boost
//!
//! Crouching down a slope while heading downhill arms a short boost timer.
//! While the timer runs, bunny-hops get an extra multiplier. If the
//! character is not sliding yet, detection also asks for a forced slide.

use glam::Vec3;

use super::config::MovementConfig;
use super::state::Stance;

/// Slope angle in degrees between `normal` and `up`.
pub fn slope_angle_degrees(normal: Vec3, up: Vec3) -> f32 {
    normal.dot(up).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Downhill direction on a surface: gravity projected onto the plane.
pub fn downhill_direction(normal: Vec3, up: Vec3) -> Vec3 {
    let down = -up;
    (down - normal * down.dot(normal)).normalize_or_zero()
}

/// True when the slope is steep enough to slide on but still walkable.
pub fn is_slide_slope(normal: Vec3, up: Vec3, config: &MovementConfig) -> bool {
    let angle = slope_angle_degrees(normal, up);
    angle > config.min_slide_angle && angle < config.max_slope_angle
}

#[derive(Debug, Clone, Default)]
pub struct RampBoost {
    timer: f32,
}

impl RampBoost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.timer > 0.0
    }

    pub fn remaining(&self) -> f32 {
        self.timer
    }

    pub fn tick(&mut self, dt: f32) {
        self.timer = (self.timer - dt).max(0.0);
    }

    /// Check the ramp conditions and arm the timer when they hold.
    ///
    /// Returns the forced slide speed when a slide should start now.
    pub fn detect(
        &mut self,
        grounded: bool,
        ground_normal: Vec3,
        up: Vec3,
        stance: Stance,
        velocity: Vec3,
        config: &MovementConfig,
    ) -> Option<f32> {
        if !grounded || !stance.is_low() || !is_slide_slope(ground_normal, up, config) {
            return None;
        }
        let horizontal = velocity - up * velocity.dot(up);
        let heading = horizontal.try_normalize()?;
        let downhill = downhill_direction(ground_normal, up);
        let flat_downhill = (downhill - up * downhill.dot(up)).try_normalize()?;
        if heading.dot(flat_downhill) <= config.tuning.ramp_alignment {
            return None;
        }

        if !self.is_active() {
            log::debug!("ramp boost armed");
        }
        self.timer = config.tuning.ramp_boost_duration;

        if stance == Stance::Slide {
            return None;
        }
        let speed = horizontal.length() * config.tuning.ramp_slide_speed_multiplier;
        (speed >= config.slide_end_speed).then_some(speed)
    }

    pub fn reset(&mut self) {
        self.timer = 0.0;
    }
}
