//! Stance and Capsule Controller
//!
//! Runs twice per tick around the motor update:
//!
//! - **Before** the move: a held crouch turns Stand into Crouch and shrinks
//!   the capsule.
//! - **After** the move: a released crouch tries to grow the capsule back to
//!   standing size. If the grown capsule overlaps anything the growth is
//!   undone and the character stays low. Then the grounded flag is refreshed
//!   from the motor.
//!
//! Capsule changes are instant for collision. [`CapsuleHeightSmoother`]
//! eases a separate visual height over 0.15 seconds for camera/body use.

use super::config::{CapsuleConfig, MovementConfig};
use super::motor::{CapsuleDimensions, CharacterMotor};
use super::state::{CharacterState, CrouchLatch, Stance};

/// Visual height transition duration in seconds
pub const TRANSITION_DURATION: f32 = 0.15;

/// Collision capsule for standing.
pub fn standing_capsule(capsule: &CapsuleConfig) -> CapsuleDimensions {
    CapsuleDimensions::new(capsule.radius, capsule.standing_height)
}

/// Collision capsule for crouching and sliding.
pub fn crouch_capsule(capsule: &CapsuleConfig) -> CapsuleDimensions {
    CapsuleDimensions::new(capsule.crouch_radius, capsule.crouch_height)
}

/// Outcome of the post-move stand-up attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandUp {
    /// Crouch is still held or the character already stands
    NotRequested,
    /// Something overlaps the standing capsule
    Blocked,
    /// Committed to Stand, leaving the given stance
    Stood { from: Stance },
}

/// Eases a visual height toward the committed capsule height.
#[derive(Debug, Clone)]
pub struct CapsuleHeightSmoother {
    /// Current visual height (may lag the capsule during transitions)
    current_height: f32,
    target_height: f32,
    /// Transition progress (0.0 to 1.0)
    transition_progress: f32,
    transition_start_height: f32,
}

impl CapsuleHeightSmoother {
    pub fn new(height: f32) -> Self {
        Self {
            current_height: height,
            target_height: height,
            transition_progress: 1.0,
            transition_start_height: height,
        }
    }

    pub fn current_height(&self) -> f32 {
        self.current_height
    }

    pub fn target_height(&self) -> f32 {
        self.target_height
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition_progress < 1.0
    }

    /// Advance toward `capsule_height`, restarting the transition when it changes.
    pub fn update(&mut self, dt: f32, capsule_height: f32) -> f32 {
        if (capsule_height - self.target_height).abs() > f32::EPSILON {
            self.target_height = capsule_height;
            self.transition_start_height = self.current_height;
            self.transition_progress = 0.0;
        }

        if self.transition_progress < 1.0 {
            self.transition_progress =
                (self.transition_progress + dt / TRANSITION_DURATION).min(1.0);
            let t = ease_in_out(self.transition_progress);
            self.current_height = lerp(self.transition_start_height, self.target_height, t);
        }

        self.current_height
    }

    /// Snap to `height` with no transition.
    pub fn reset(&mut self, height: f32) {
        *self = Self::new(height);
    }
}

/// Stand/Crouch capsule transitions around the motor update.
#[derive(Debug, Clone)]
pub struct StanceController {
    smoother: CapsuleHeightSmoother,
}

impl StanceController {
    pub fn new(config: &MovementConfig) -> Self {
        Self {
            smoother: CapsuleHeightSmoother::new(config.capsule.standing_height),
        }
    }

    pub fn visual_height(&self) -> f32 {
        self.smoother.current_height()
    }

    pub fn smoother(&self) -> &CapsuleHeightSmoother {
        &self.smoother
    }

    /// Pre-move phase. Returns true when the character crouched this tick.
    pub fn before_update<M: CharacterMotor>(
        &mut self,
        state: &mut CharacterState,
        crouch: CrouchLatch,
        motor: &mut M,
        config: &MovementConfig,
    ) -> bool {
        if crouch.is_held() && state.stance == Stance::Stand {
            state.stance = Stance::Crouch;
            motor.set_capsule_dimensions(crouch_capsule(&config.capsule));
            log::debug!("stance: Stand -> Crouch");
            return true;
        }
        false
    }

    /// Post-move phase: stand-up attempt, then grounding refresh.
    pub fn after_update<M: CharacterMotor>(
        &mut self,
        dt: f32,
        state: &mut CharacterState,
        crouch: CrouchLatch,
        motor: &mut M,
        config: &MovementConfig,
    ) -> StandUp {
        let mut result = StandUp::NotRequested;

        if !crouch.is_held() && state.stance != Stance::Stand {
            motor.set_capsule_dimensions(standing_capsule(&config.capsule));
            if motor.character_overlap() > 0 {
                // No room overhead, stay low
                motor.set_capsule_dimensions(crouch_capsule(&config.capsule));
                result = StandUp::Blocked;
            } else {
                let from = state.stance;
                state.stance = Stance::Stand;
                log::debug!("stance: {:?} -> Stand", from);
                result = StandUp::Stood { from };
            }
        }

        state.grounded = motor.is_stable_on_ground();
        self.smoother.update(dt, motor.capsule().height);
        result
    }

    /// Snap back to a standing capsule (respawn, teleport).
    pub fn reset<M: CharacterMotor>(
        &mut self,
        state: &mut CharacterState,
        motor: &mut M,
        config: &MovementConfig,
    ) {
        state.stance = Stance::Stand;
        motor.set_capsule_dimensions(standing_capsule(&config.capsule));
        self.smoother.reset(config.capsule.standing_height);
    }
}

/// Linear interpolation between two values.
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Smooth ease-in-out interpolation (cubic).
fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::motor::ScriptedMotor;

    const EPSILON: f32 = 0.001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_crouch_shrinks_capsule_before_update() {
        let config = MovementConfig::default();
        let mut stance = StanceController::new(&config);
        let mut state = CharacterState::default();
        let mut motor = ScriptedMotor::new();

        assert!(stance.before_update(&mut state, CrouchLatch::Held, &mut motor, &config));
        assert_eq!(state.stance, Stance::Crouch);
        assert!(approx_eq(motor.capsule.height, config.capsule.crouch_height));
    }

    #[test]
    fn test_released_crouch_does_nothing_before_update() {
        let config = MovementConfig::default();
        let mut stance = StanceController::new(&config);
        let mut state = CharacterState::default();
        let mut motor = ScriptedMotor::new();

        assert!(!stance.before_update(&mut state, CrouchLatch::Released, &mut motor, &config));
        assert_eq!(state.stance, Stance::Stand);
    }

    #[test]
    fn test_stand_up_when_clear() {
        let config = MovementConfig::default();
        let mut stance = StanceController::new(&config);
        let mut state = CharacterState { stance: Stance::Crouch, ..Default::default() };
        let mut motor = ScriptedMotor::new();
        motor.capsule = crouch_capsule(&config.capsule);

        let result =
            stance.after_update(0.016, &mut state, CrouchLatch::Released, &mut motor, &config);
        assert_eq!(result, StandUp::Stood { from: Stance::Crouch });
        assert_eq!(state.stance, Stance::Stand);
        assert!(approx_eq(motor.capsule.height, config.capsule.standing_height));
    }

    #[test]
    fn test_cannot_stand_with_obstacle() {
        let config = MovementConfig::default();
        let mut stance = StanceController::new(&config);
        let mut state = CharacterState { stance: Stance::Crouch, ..Default::default() };
        let mut motor = ScriptedMotor { overlap_count: 1, ..Default::default() };
        motor.capsule = crouch_capsule(&config.capsule);

        let result =
            stance.after_update(0.016, &mut state, CrouchLatch::Released, &mut motor, &config);
        assert_eq!(result, StandUp::Blocked);
        assert_eq!(state.stance, Stance::Crouch);
        assert!(approx_eq(motor.capsule.height, config.capsule.crouch_height));
    }

    #[test]
    fn test_after_update_refreshes_grounded() {
        let config = MovementConfig::default();
        let mut stance = StanceController::new(&config);
        let mut state = CharacterState::default();
        let mut motor = ScriptedMotor::new();

        stance.after_update(0.016, &mut state, CrouchLatch::Released, &mut motor, &config);
        assert!(state.grounded);
        motor.grounded = false;
        stance.after_update(0.016, &mut state, CrouchLatch::Released, &mut motor, &config);
        assert!(!state.grounded);
    }

    #[test]
    fn test_held_crouch_keeps_slide() {
        let config = MovementConfig::default();
        let mut stance = StanceController::new(&config);
        let mut state = CharacterState { stance: Stance::Slide, ..Default::default() };
        let mut motor = ScriptedMotor::new();

        let result = stance.after_update(0.016, &mut state, CrouchLatch::Held, &mut motor, &config);
        assert_eq!(result, StandUp::NotRequested);
        assert_eq!(state.stance, Stance::Slide);
    }

    #[test]
    fn test_smooth_transition() {
        let mut smoother = CapsuleHeightSmoother::new(2.0);

        smoother.update(0.001, 1.0);
        let height_during = smoother.current_height();
        assert!(height_during < 2.0);
        assert!(height_during > 1.0);
        assert!(smoother.is_transitioning());

        for _ in 0..20 {
            smoother.update(0.016, 1.0);
        }
        assert!(approx_eq(smoother.current_height(), 1.0));
        assert!(!smoother.is_transitioning());
    }

    #[test]
    fn test_transition_duration() {
        let mut smoother = CapsuleHeightSmoother::new(2.0);
        let mut elapsed = 0.0;
        smoother.update(0.05, 1.0);
        elapsed += 0.05;
        while smoother.is_transitioning() {
            smoother.update(0.05, 1.0);
            elapsed += 0.05;
        }
        // Within one extra frame of the nominal duration
        assert!(elapsed <= TRANSITION_DURATION + 0.1);
    }

    #[test]
    fn test_retarget_mid_transition_starts_from_current() {
        let mut smoother = CapsuleHeightSmoother::new(2.0);
        smoother.update(0.075, 1.0);
        let mid = smoother.current_height();
        smoother.update(0.0, 2.0);
        assert!(approx_eq(smoother.current_height(), mid));
        assert!(approx_eq(smoother.target_height(), 2.0));
    }

    #[test]
    fn test_reset_snaps_to_standing() {
        let config = MovementConfig::default();
        let mut stance = StanceController::new(&config);
        let mut state = CharacterState { stance: Stance::Slide, ..Default::default() };
        let mut motor = ScriptedMotor::new();
        motor.capsule = crouch_capsule(&config.capsule);

        stance.reset(&mut state, &mut motor, &config);
        assert_eq!(state.stance, Stance::Stand);
        assert!(approx_eq(stance.visual_height(), config.capsule.standing_height));
        assert!(approx_eq(motor.capsule.height, config.capsule.standing_height));
    }
}
