//! Knockback
//!
//! External impulses (damage, explosions) enter as a horizontal and a
//! vertical vector sharing one countdown. While the countdown runs both
//! vectors decay exponentially at `knockback_recovery_rate`; when it hits
//! zero they are zeroed together and only the knockback momentum lingers,
//! fading at `1 - knockback_momentum_retention` per second.
//!
//! Impulses never touch the integrator mid-tick. They are queued by the
//! injectors and merged at the start of the next tick.

use glam::Vec3;

use super::config::MovementConfig;

/// One queued knockback request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnockbackImpulse {
    pub horizontal: Vec3,
    pub vertical: Vec3,
}

impl KnockbackImpulse {
    /// Impulse of `force` along `direction`, split against `up`.
    pub fn from_direction(direction: Vec3, force: f32, up: Vec3) -> Self {
        let impulse = direction.normalize_or_zero() * force;
        let vertical = up * impulse.dot(up);
        Self {
            horizontal: impulse - vertical,
            vertical,
        }
    }

    /// Total impulse strength.
    pub fn magnitude(&self) -> f32 {
        (self.horizontal + self.vertical).length()
    }
}

/// Active knockback vectors and their shared countdown.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Knockback {
    pub horizontal: Vec3,
    pub vertical: Vec3,
    /// Seconds left before both vectors are zeroed
    pub remaining: f32,
}

impl Knockback {
    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    /// Start a new knockback, replacing any active one.
    pub fn start(&mut self, impulse: KnockbackImpulse, duration: f32) {
        self.horizontal = impulse.horizontal;
        self.vertical = impulse.vertical;
        self.remaining = duration;
    }

    /// Advance the countdown and decay. Returns true on the tick it expires.
    pub fn tick(&mut self, dt: f32, recovery_rate: f32) -> bool {
        if !self.is_active() {
            return false;
        }
        self.remaining = (self.remaining - dt).max(0.0);
        if self.remaining == 0.0 {
            self.horizontal = Vec3::ZERO;
            self.vertical = Vec3::ZERO;
            return true;
        }
        let falloff = (-recovery_rate * dt).exp();
        self.horizontal *= falloff;
        self.vertical *= falloff;
        false
    }
}

/// Knockback state of a character: active vectors plus pending impulses.
#[derive(Debug, Clone, Default)]
pub struct KnockbackSystem {
    active: Knockback,
    pending: Vec<KnockbackImpulse>,
    /// Velocity offset added at the end of the previous tick
    applied_offset: Vec3,
    /// Velocity handed to the motor, offset included
    sent_velocity: Vec3,
}

impl KnockbackSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an impulse for the next tick.
    pub fn enqueue(&mut self, impulse: KnockbackImpulse) {
        self.pending.push(impulse);
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn active(&self) -> &Knockback {
        &self.active
    }

    /// Merge queued impulses. The last impulse of a tick defines the vectors.
    ///
    /// Returns the strongest merged impulse magnitude, if anything was queued.
    pub fn merge_pending(&mut self, momentum: &mut f32, config: &MovementConfig) -> Option<f32> {
        let last = self.pending.last().copied()?;
        let strongest = self
            .pending
            .iter()
            .map(KnockbackImpulse::magnitude)
            .fold(0.0, f32::max);
        self.pending.clear();

        self.active.start(last, config.max_knockback_time);
        *momentum = 1.0;
        log::debug!(
            "knockback merged: horizontal={:?} vertical={:?} strongest={:.2}",
            last.horizontal,
            last.vertical,
            strongest
        );
        Some(strongest)
    }

    /// Advance the countdown, the vector decay and the lingering momentum.
    pub fn tick(&mut self, dt: f32, momentum: &mut f32, config: &MovementConfig) {
        if self.active.tick(dt, config.knockback_recovery_rate) {
            log::debug!("knockback expired");
        }
        if !self.active.is_active() {
            let rate = 1.0 - config.knockback_momentum_retention;
            *momentum = (*momentum - rate * dt).clamp(0.0, 1.0);
        }
    }

    /// Remove last tick's offset from `velocity`, leaving the base velocity.
    ///
    /// `velocity` is what the motor returned. Whatever the motor clipped
    /// against a surface is taken out of the offset first, so a knockback
    /// into a wall never turns into speed away from it.
    pub fn strip_offset(&mut self, velocity: &mut Vec3) {
        *velocity -= surviving_offset(self.applied_offset, self.sent_velocity, *velocity);
        self.applied_offset = Vec3::ZERO;
    }

    /// Add this tick's decayed knockback to `velocity` and remember it.
    pub fn apply_offset(
        &mut self,
        velocity: &mut Vec3,
        grounded: bool,
        momentum: f32,
        ground_factor: f32,
    ) {
        if !self.active.is_active() {
            return;
        }
        let horizontal_factor = if grounded { ground_factor } else { 1.0 };
        let mut offset = self.active.horizontal * horizontal_factor * momentum;
        if !grounded {
            offset += self.active.vertical * momentum;
        }
        *velocity += offset;
        self.applied_offset = offset;
        self.sent_velocity = *velocity;
    }

    /// Upward component of the active vertical knockback.
    pub fn upward(&self, up: Vec3) -> f32 {
        self.active.vertical.dot(up).max(0.0)
    }

    /// Drop everything, including queued impulses.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Part of `offset` still present after the motor turned `sent` into
/// `returned`. The speed the motor removed is charged to the offset first,
/// up to the offset's own component along the removed direction.
fn surviving_offset(offset: Vec3, sent: Vec3, returned: Vec3) -> Vec3 {
    let removed = sent - returned;
    let Some(clip_dir) = removed.try_normalize() else {
        return offset;
    };
    let along = offset.dot(clip_dir);
    if along <= 0.0 {
        return offset;
    }
    offset - clip_dir * along.min(removed.length())
}
