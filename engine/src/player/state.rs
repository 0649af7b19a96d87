//! Character State and Input Types
//!
//! Plain data carried between the input sampler, the stance controller and
//! the velocity integrator. Nothing in here has behavior beyond small
//! constructors and conversions.

use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Locomotion stance of the character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Stance {
    /// Upright at full capsule height
    #[default]
    Stand,
    /// Crouched capsule, reduced ground speed
    Crouch,
    /// Grounded slide with its own speed and direction
    Slide,
}

impl Stance {
    /// True for the two stances that use the crouched capsule.
    pub fn is_low(&self) -> bool {
        matches!(self, Stance::Crouch | Stance::Slide)
    }
}

/// Crouch request carried by a single input sample.
///
/// `None` means "no new crouch input this tick" and leaves the latched
/// value untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CrouchCommand {
    #[default]
    None,
    Hold,
    Release,
}

/// Latched crouch request, updated only by `Hold`/`Release` commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CrouchLatch {
    Held,
    #[default]
    Released,
}

impl CrouchLatch {
    /// Apply one input sample to the latch.
    pub fn apply(self, command: CrouchCommand) -> Self {
        match command {
            CrouchCommand::None => self,
            CrouchCommand::Hold => CrouchLatch::Held,
            CrouchCommand::Release => CrouchLatch::Released,
        }
    }

    pub fn is_held(&self) -> bool {
        *self == CrouchLatch::Held
    }
}

/// One tick of player input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CharacterInput {
    /// Intended facing (usually the camera rotation)
    pub rotation: Quat,
    /// Move axis: x = strafe right, y = forward. Clamped to unit length on use.
    pub move_axis: Vec2,
    /// Jump was pressed this sample (arms the jump buffer)
    pub jump_pressed: bool,
    /// Jump is currently held (variable jump height)
    pub jump_held: bool,
    /// Crouch request for this sample
    pub crouch: CrouchCommand,
    /// Air dash was pressed this sample
    pub dash_pressed: bool,
}

impl Default for CharacterInput {
    fn default() -> Self {
        Self {
            rotation: Quat::IDENTITY,
            move_axis: Vec2::ZERO,
            jump_pressed: false,
            jump_held: false,
            crouch: CrouchCommand::None,
            dash_pressed: false,
        }
    }
}

impl CharacterInput {
    /// Input facing `rotation` and pushing the move stick to `move_axis`.
    pub fn moving(rotation: Quat, move_axis: Vec2) -> Self {
        Self {
            rotation,
            move_axis,
            ..Default::default()
        }
    }

    /// Same input with a jump press (and hold).
    pub fn with_jump(mut self) -> Self {
        self.jump_pressed = true;
        self.jump_held = true;
        self
    }

    /// Same input with a crouch command.
    pub fn with_crouch(mut self, crouch: CrouchCommand) -> Self {
        self.crouch = crouch;
        self
    }

    /// Same input with an air dash press.
    pub fn with_dash(mut self) -> Self {
        self.dash_pressed = true;
        self
    }
}

/// Locomotion state owned by the movement core.
///
/// All timers count down in seconds and are kept inside `[0, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CharacterState {
    /// Mirrors the motor's last stable-grounding report
    pub grounded: bool,
    pub stance: Stance,
    /// Residual slide velocity fraction blended into Stand/Crouch movement
    pub slide_momentum: f32,
    /// Time left in which a jump is still allowed after leaving the ground
    pub coyote_time: f32,
    /// Time left in which a jump press is still honored
    pub jump_buffer: f32,
    /// Time left after landing in which a jump gets the bunny-hop boost
    pub bhop_window: f32,
    /// Horizontal velocity captured at landing, seed of the hop boost
    pub bhop_velocity: Vec3,
    /// How strongly active knockback blends into movement
    pub knockback_momentum: f32,
}

impl Default for CharacterState {
    fn default() -> Self {
        Self {
            grounded: false,
            stance: Stance::Stand,
            slide_momentum: 0.0,
            coyote_time: 0.0,
            jump_buffer: 0.0,
            bhop_window: 0.0,
            bhop_velocity: Vec3::ZERO,
            knockback_momentum: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crouch_latch_none_keeps_value() {
        let latch = CrouchLatch::Released.apply(CrouchCommand::Hold);
        assert!(latch.is_held());
        assert!(latch.apply(CrouchCommand::None).is_held());
        assert!(!latch.apply(CrouchCommand::Release).is_held());
        assert!(!CrouchLatch::Released.apply(CrouchCommand::None).is_held());
    }

    #[test]
    fn test_default_state_is_standing() {
        let state = CharacterState::default();
        assert_eq!(state.stance, Stance::Stand);
        assert_eq!(state.coyote_time, 0.0);
        assert_eq!(state.jump_buffer, 0.0);
        assert_eq!(state.bhop_window, 0.0);
    }

    #[test]
    fn test_input_builders() {
        let input = CharacterInput::moving(Quat::IDENTITY, Vec2::Y)
            .with_jump()
            .with_crouch(CrouchCommand::Hold)
            .with_dash();
        assert!(input.jump_pressed && input.jump_held && input.dash_pressed);
        assert_eq!(input.crouch, CrouchCommand::Hold);
        assert!(Stance::Slide.is_low());
        assert!(!Stance::Stand.is_low());
    }
}
