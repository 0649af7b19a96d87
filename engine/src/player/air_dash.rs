//! Air Dash
//!
//! One horizontal burst per airtime. Landing re-arms it; a cooldown keeps
//! dashes apart even across quick landings.

use glam::Vec3;

use super::config::MovementConfig;

#[derive(Debug, Clone)]
pub struct AirDash {
    available: bool,
    cooldown: f32,
}

impl Default for AirDash {
    fn default() -> Self {
        Self {
            available: true,
            cooldown: 0.0,
        }
    }
}

impl AirDash {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn cooldown(&self) -> f32 {
        self.cooldown
    }

    pub fn tick(&mut self, dt: f32) {
        self.cooldown = (self.cooldown - dt).max(0.0);
    }

    /// Landing makes the dash available again.
    pub fn on_landed(&mut self) {
        self.available = true;
    }

    pub fn can_dash(&self, grounded: bool, config: &MovementConfig) -> bool {
        config.air_dash_enabled && !grounded && self.available && self.cooldown <= 0.0
    }

    /// Dash along `direction`, keeping the vertical part of `velocity`.
    ///
    /// Returns false when dashing is not allowed right now.
    pub fn try_dash(
        &mut self,
        velocity: &mut Vec3,
        direction: Vec3,
        up: Vec3,
        grounded: bool,
        config: &MovementConfig,
    ) -> bool {
        if !self.can_dash(grounded, config) {
            return false;
        }
        let flat = direction - up * direction.dot(up);
        let Some(dir) = flat.try_normalize() else {
            return false;
        };

        let vertical = up * velocity.dot(up);
        *velocity = dir * config.air_dash_force + vertical;
        self.available = false;
        self.cooldown = config.air_dash_cooldown;
        log::debug!("air dash: dir={:?} force={:.1}", dir, config.air_dash_force);
        true
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
