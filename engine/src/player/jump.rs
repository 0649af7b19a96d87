//! Jump Arbitration
//!
//! A buffered jump fires as soon as one of its conditions holds: grounded,
//! coyote time left, an open bunny-hop window, or a wall slide. The kind of
//! jump is picked in priority order:
//!
//! 1. **Wall jump** while wall sliding: pushed off along the wall normal.
//! 2. **Bunny-hop** while the landing window is open: the landing velocity is
//!    boosted and steered toward the input.
//! 3. **Standard jump**: vertical speed replaced by the jump speed.
//!
//! Every jump clears the buffer, coyote time and hop window and marks the
//! character airborne. The caller forces the motor to unground.

use glam::Vec3;

use super::config::MovementConfig;
use super::state::CharacterState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpKind {
    Wall,
    BunnyHop,
    Standard,
}

/// Per-tick facts the jump needs from the rest of the controller.
#[derive(Debug, Clone, Copy)]
pub struct JumpContext {
    pub grounded: bool,
    /// Normal of the wall being slid on
    pub wall_normal: Option<Vec3>,
    /// World-space move input (length <= 1)
    pub wish: Vec3,
    pub up: Vec3,
    /// Crouch held in the Crouch stance
    pub crouch_jump: bool,
    pub sliding: bool,
    pub ramp_boost: bool,
    /// Upward knockback already scaled by knockback momentum
    pub knockback_upward: f32,
}

/// True when a buffered jump may fire this tick.
pub fn can_jump(
    state: &CharacterState,
    grounded: bool,
    wall_sliding: bool,
    config: &MovementConfig,
) -> bool {
    if state.jump_buffer <= 0.0 {
        return false;
    }
    grounded
        || state.coyote_time > 0.0
        || (config.bunny_hop_enabled && state.bhop_window > 0.0)
        || (config.wall_jump_enabled && !grounded && wall_sliding)
}

/// Fire the buffered jump if allowed, rewriting `velocity`.
pub fn try_jump(
    state: &mut CharacterState,
    velocity: &mut Vec3,
    ctx: &JumpContext,
    config: &MovementConfig,
) -> Option<JumpKind> {
    let wall_normal = ctx.wall_normal.filter(|_| config.wall_jump_enabled && !ctx.grounded);
    if !can_jump(state, ctx.grounded, wall_normal.is_some(), config) {
        return None;
    }

    let hop_ready = config.bunny_hop_enabled
        && state.bhop_window > 0.0
        && state.bhop_velocity.length_squared() > 0.0;

    let kind = if let Some(normal) = wall_normal {
        *velocity = wall_jump_velocity(*velocity, normal, ctx, config);
        JumpKind::Wall
    } else if hop_ready {
        *velocity = bunny_hop_velocity(state, ctx, config);
        JumpKind::BunnyHop
    } else {
        *velocity = standard_jump_velocity(*velocity, ctx, config);
        JumpKind::Standard
    };

    state.jump_buffer = 0.0;
    state.coyote_time = 0.0;
    state.bhop_window = 0.0;
    state.grounded = false;
    log::debug!("jump: {:?} velocity={:?}", kind, velocity);
    Some(kind)
}

/// Push away from the wall, steered along it by the input.
pub fn wall_jump_velocity(
    velocity: Vec3,
    wall_normal: Vec3,
    ctx: &JumpContext,
    config: &MovementConfig,
) -> Vec3 {
    let up = ctx.up;
    let tuning = &config.tuning;
    let normal = (wall_normal - up * wall_normal.dot(up)).normalize_or(wall_normal);
    let along = up.cross(normal).normalize_or_zero();

    let input_alignment = ctx.wish.dot(along);
    let direction =
        (normal + along * input_alignment * tuning.wall_jump_along_weight).normalize_or(normal);

    let horizontal = velocity - up * velocity.dot(up);
    let preserved = horizontal - normal * horizontal.dot(normal);

    direction * config.wall_jump_force
        + up * config.wall_jump_upwards_force
        + preserved * tuning.wall_jump_carry
}

/// Boosted hop seeded by the landing velocity.
pub fn bunny_hop_velocity(
    state: &CharacterState,
    ctx: &JumpContext,
    config: &MovementConfig,
) -> Vec3 {
    let up = ctx.up;
    let tuning = &config.tuning;
    let seed = state.bhop_velocity - up * state.bhop_velocity.dot(up);
    let speed = seed.length();
    let seed_dir = seed.normalize_or(Vec3::ZERO);

    let multiplier = bhop_multiplier(speed, state.bhop_window, ctx, config);

    let walk = config.stable_move_speed;
    let direction = match (ctx.wish - up * ctx.wish.dot(up)).try_normalize() {
        Some(wish_dir) => {
            let blend = tuning.bhop_steer * walk / speed.max(walk);
            seed_dir.lerp(wish_dir, blend).normalize_or(seed_dir)
        }
        None => seed_dir,
    };

    let new_speed = (speed * multiplier).min(config.max_air_speed * tuning.bhop_max_speed_ratio);

    let soft_cap = walk * tuning.bhop_soft_cap_ratio;
    let jump_factor = if speed > soft_cap { tuning.bhop_fast_jump_factor } else { 1.0 };
    let vertical = config.jump_speed * jump_factor + ctx.knockback_upward;

    direction * new_speed + up * vertical
}

/// Hop multiplier with timing, crouch and ramp bonuses, damped above the
/// soft speed cap.
pub fn bhop_multiplier(speed: f32, window: f32, ctx: &JumpContext, config: &MovementConfig) -> f32 {
    let tuning = &config.tuning;
    let timing = if config.bhop_window_max > 0.0 {
        (window / config.bhop_window_max).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let mut multiplier = config.bhop_boost_multiplier * (1.0 + tuning.bhop_timing_bonus * timing);
    if ctx.crouch_jump {
        multiplier *= tuning.bhop_crouch_bonus;
    }
    if ctx.ramp_boost {
        multiplier *= tuning.bhop_ramp_bonus;
    }

    let soft_cap = config.stable_move_speed * tuning.bhop_soft_cap_ratio;
    if speed > soft_cap && multiplier > 1.0 {
        let overshoot = (speed - soft_cap) / soft_cap;
        multiplier = 1.0 + (multiplier - 1.0) / (1.0 + overshoot);
    }
    multiplier
}

/// Replace the vertical speed with the jump speed, adding the slide kick
/// when jumping out of a slide.
pub fn standard_jump_velocity(velocity: Vec3, ctx: &JumpContext, config: &MovementConfig) -> Vec3 {
    let up = ctx.up;
    let tuning = &config.tuning;
    let horizontal = velocity - up * velocity.dot(up);

    let multiplier = if ctx.crouch_jump { config.crouch_jump_multiplier } else { 1.0 };
    let mut result = horizontal + up * (config.jump_speed * multiplier);
    if ctx.sliding {
        result += horizontal * tuning.slide_jump_carry + up * tuning.slide_jump_kick;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn context() -> JumpContext {
        JumpContext {
            grounded: true,
            wall_normal: None,
            wish: Vec3::ZERO,
            up: Vec3::Y,
            crouch_jump: false,
            sliding: false,
            ramp_boost: false,
            knockback_upward: 0.0,
        }
    }

    fn buffered() -> CharacterState {
        CharacterState {
            grounded: true,
            jump_buffer: 0.1,
            ..Default::default()
        }
    }

    #[test]
    fn test_no_jump_without_buffer() {
        let config = MovementConfig::default();
        let mut state = CharacterState { grounded: true, ..Default::default() };
        let mut velocity = Vec3::ZERO;
        assert!(try_jump(&mut state, &mut velocity, &context(), &config).is_none());
        assert_eq!(velocity, Vec3::ZERO);
    }

    #[test]
    fn test_standard_jump_from_rest() {
        let config = MovementConfig::default();
        let mut state = buffered();
        let mut velocity = Vec3::ZERO;

        let kind = try_jump(&mut state, &mut velocity, &context(), &config);
        assert_eq!(kind, Some(JumpKind::Standard));
        assert!(approx_eq(velocity.y, config.jump_speed));
        assert_eq!(state.jump_buffer, 0.0);
        assert_eq!(state.coyote_time, 0.0);
        assert!(!state.grounded);
    }

    #[test]
    fn test_coyote_allows_airborne_jump() {
        let config = MovementConfig::default();
        let mut state = CharacterState {
            jump_buffer: 0.1,
            coyote_time: 0.05,
            ..Default::default()
        };
        let mut velocity = Vec3::new(3.0, -2.0, 0.0);
        let ctx = JumpContext { grounded: false, ..context() };
        assert_eq!(try_jump(&mut state, &mut velocity, &ctx, &config), Some(JumpKind::Standard));
        assert!(approx_eq(velocity.y, config.jump_speed));
        assert!(approx_eq(velocity.x, 3.0));
    }

    #[test]
    fn test_airborne_without_grace_cannot_jump() {
        let config = MovementConfig::default();
        let state = CharacterState { jump_buffer: 0.1, ..Default::default() };
        assert!(!can_jump(&state, false, false, &config));
    }

    #[test]
    fn test_crouch_jump_is_higher() {
        let config = MovementConfig::default();
        let ctx = JumpContext { crouch_jump: true, ..context() };
        let velocity = standard_jump_velocity(Vec3::ZERO, &ctx, &config);
        assert!(approx_eq(velocity.y, config.jump_speed * config.crouch_jump_multiplier));
    }

    #[test]
    fn test_slide_jump_carries_speed() {
        let config = MovementConfig::default();
        let ctx = JumpContext { sliding: true, ..context() };
        let velocity = standard_jump_velocity(Vec3::new(0.0, 0.0, -10.0), &ctx, &config);
        assert!(approx_eq(velocity.z, -10.0 * (1.0 + config.tuning.slide_jump_carry)));
        assert!(approx_eq(velocity.y, config.jump_speed + config.tuning.slide_jump_kick));
    }

    #[test]
    fn test_bunny_hop_boost_is_bounded() {
        let config = MovementConfig::default();
        for landing_speed in [2.0_f32, 8.0, 14.0, 20.0, 40.0] {
            let mut state = CharacterState {
                jump_buffer: 0.1,
                bhop_window: config.bhop_window_max,
                bhop_velocity: Vec3::new(landing_speed, 0.0, 0.0),
                ..buffered()
            };
            let mut velocity = Vec3::new(landing_speed, 0.0, 0.0);
            let kind = try_jump(&mut state, &mut velocity, &context(), &config);
            assert_eq!(kind, Some(JumpKind::BunnyHop));

            let horizontal = Vec3::new(velocity.x, 0.0, velocity.z).length();
            let bound = (landing_speed * config.bhop_boost_multiplier * 1.05)
                .min(config.max_air_speed * config.tuning.bhop_max_speed_ratio);
            assert!(horizontal <= bound + EPSILON, "speed {} exceeds {}", horizontal, bound);
            assert!(velocity.y > 0.0);
            assert_eq!(state.bhop_window, 0.0);
        }
    }

    #[test]
    fn test_bunny_hop_multiplier_damps_when_fast() {
        let config = MovementConfig::default();
        let ctx = context();
        let slow = bhop_multiplier(5.0, 0.0, &ctx, &config);
        let fast = bhop_multiplier(30.0, 0.0, &ctx, &config);
        assert!(approx_eq(slow, config.bhop_boost_multiplier));
        assert!(fast < slow);
        assert!(fast > 1.0);
    }

    #[test]
    fn test_bunny_hop_steers_toward_input() {
        let config = MovementConfig::default();
        let state = CharacterState {
            bhop_window: 0.1,
            bhop_velocity: Vec3::new(0.0, 0.0, -8.0),
            ..Default::default()
        };
        let ctx = JumpContext { wish: Vec3::X, ..context() };
        let velocity = bunny_hop_velocity(&state, &ctx, &config);
        assert!(velocity.x > 0.0);
        assert!(velocity.z < 0.0);
    }

    #[test]
    fn test_wall_jump_pushes_away() {
        let config = MovementConfig::default();
        let normal = Vec3::Z;
        for wish in [Vec3::ZERO, Vec3::X, Vec3::NEG_X, Vec3::NEG_Z, Vec3::Z] {
            for velocity in [Vec3::new(5.0, -3.0, -4.0), Vec3::new(-12.0, 0.0, 0.0), Vec3::ZERO] {
                let mut state = CharacterState { jump_buffer: 0.1, ..Default::default() };
                let mut v = velocity;
                let ctx = JumpContext {
                    grounded: false,
                    wall_normal: Some(normal),
                    wish,
                    ..context()
                };
                assert_eq!(try_jump(&mut state, &mut v, &ctx, &config), Some(JumpKind::Wall));
                assert!(v.dot(normal) > 0.0);
                assert!(approx_eq(v.y, config.wall_jump_upwards_force));
            }
        }
    }

    #[test]
    fn test_wall_jump_disabled_falls_through() {
        let config = MovementConfig::tactical();
        let mut state = CharacterState { jump_buffer: 0.1, ..Default::default() };
        let mut velocity = Vec3::ZERO;
        let ctx = JumpContext {
            grounded: false,
            wall_normal: Some(Vec3::Z),
            ..context()
        };
        assert!(try_jump(&mut state, &mut velocity, &ctx, &config).is_none());
    }
}
