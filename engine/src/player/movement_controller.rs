//! Character Movement Controller
//!
//! Turns per-tick input plus the motor's grounding reports into a velocity,
//! a rotation and a locomotion state. The controller never moves the capsule:
//! it hands the velocity to a [`CharacterMotor`] and reads the result back.
//!
//! # Tick Order
//!
//! 1. [`CharacterController::before_character_update`]: merge queued
//!    knockback, crouch the capsule if requested
//! 2. [`CharacterController::update_rotation`]: turn toward the look direction
//! 3. [`CharacterController::update_velocity`]: timers, landing, ground or air
//!    movement, gravity, jumps
//! 4. motor move
//! 5. [`CharacterController::after_character_update`]: stand-up attempt,
//!    grounding refresh
//!
//! [`CharacterController::tick`] runs all five in order. Hosts that drive the
//! motor themselves call the hooks directly instead.
//!
//! # Usage
//!
//! ```rust,ignore
//! use momentum_engine::player::{CharacterController, CharacterInput, MovementConfig};
//! use momentum_engine::physics::{BoxWorld, SimpleMotor};
//!
//! let motor = SimpleMotor::new(BoxWorld::flat(), Vec3::ZERO);
//! let mut controller = CharacterController::new(motor, MovementConfig::default())?;
//!
//! // Each fixed step:
//! controller.update_input(CharacterInput::moving(camera_rotation, move_axis));
//! controller.tick(1.0 / 60.0);
//! ```

use glam::{Mat3, Quat, Vec3};

use super::air_dash::AirDash;
use super::config::{ConfigError, MovementConfig};
use super::crouch::{StanceController, StandUp, crouch_capsule, standing_capsule};
use super::jump::{self, JumpContext, JumpKind};
use super::knockback::{Knockback, KnockbackImpulse, KnockbackSystem};
use super::motor::CharacterMotor;
use super::ramp_boost::{RampBoost, downhill_direction, is_slide_slope, slope_angle_degrees};
use super::state::{CharacterInput, CharacterState, CrouchLatch, Stance};
use super::wall::WallSlide;

/// Slide momentum lost per second after a slide ends
const SLIDE_MOMENTUM_DECAY: f32 = 1.0;

/// Movement core for one character, driving motor `M`.
pub struct CharacterController<M: CharacterMotor> {
    motor: M,
    config: MovementConfig,
    state: CharacterState,

    velocity: Vec3,
    rotation: Quat,

    // Latched input
    look_rotation: Quat,
    /// World-space move input, length <= 1
    move_input: Vec3,
    jump_held: bool,
    crouch: CrouchLatch,
    dash_requested: bool,

    stance: StanceController,
    knockback: KnockbackSystem,
    wall_slide: WallSlide,
    air_dash: AirDash,
    ramp_boost: RampBoost,

    /// Grounding used by the previous velocity pass
    integrator_grounded: bool,
    /// Set when knockback ungrounded the character this tick
    unground_requested: bool,
    previous_stance: Stance,

    slide_direction: Vec3,
    slide_speed: f32,
    /// Velocity at the end of the last slide, blended by slide momentum
    slide_exit_velocity: Vec3,
    /// Horizontal velocity held after leaving the ground mid-slide
    slide_carry: Option<Vec3>,
    air_time: f32,
}

impl<M: CharacterMotor> CharacterController<M> {
    /// Create a controller around `motor`. Fails if `config` is invalid.
    pub fn new(mut motor: M, config: MovementConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        motor.set_capsule_dimensions(standing_capsule(&config.capsule));
        let up = motor.character_up();
        let forward = planar(motor.character_forward(), up).unwrap_or_else(|| fallback_forward(up));
        let grounded = motor.is_stable_on_ground();
        let rotation = basis_rotation(forward, up);

        Ok(Self {
            stance: StanceController::new(&config),
            state: CharacterState {
                grounded,
                ..Default::default()
            },
            velocity: Vec3::ZERO,
            rotation,
            look_rotation: rotation,
            move_input: Vec3::ZERO,
            jump_held: false,
            crouch: CrouchLatch::Released,
            dash_requested: false,
            knockback: KnockbackSystem::new(),
            wall_slide: WallSlide::new(),
            air_dash: AirDash::new(),
            ramp_boost: RampBoost::new(),
            integrator_grounded: grounded,
            unground_requested: false,
            previous_stance: Stance::Stand,
            slide_direction: forward,
            slide_speed: 0.0,
            slide_exit_velocity: Vec3::ZERO,
            slide_carry: None,
            air_time: 0.0,
            motor,
            config,
        })
    }

    // ========================================
    // Accessors
    // ========================================

    pub fn is_grounded(&self) -> bool {
        self.state.grounded
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn stance(&self) -> Stance {
        self.state.stance
    }

    pub fn is_sliding(&self) -> bool {
        self.state.stance == Stance::Slide
    }

    pub fn is_wall_sliding(&self) -> bool {
        self.wall_slide.is_sliding()
    }

    /// Current slide speed (0 when not sliding).
    pub fn slide_speed(&self) -> f32 {
        if self.is_sliding() { self.slide_speed } else { 0.0 }
    }

    pub fn state(&self) -> &CharacterState {
        &self.state
    }

    pub fn knockback(&self) -> &Knockback {
        self.knockback.active()
    }

    pub fn air_dash_available(&self) -> bool {
        self.air_dash.is_available()
    }

    pub fn ramp_boost_active(&self) -> bool {
        self.ramp_boost.is_active()
    }

    /// Smoothed capsule height for camera and body placement.
    pub fn visual_height(&self) -> f32 {
        self.stance.visual_height()
    }

    pub fn crouch_latch(&self) -> CrouchLatch {
        self.crouch
    }

    /// World-space move input from the last input sample.
    pub fn move_input(&self) -> Vec3 {
        self.move_input
    }

    pub fn motor(&self) -> &M {
        &self.motor
    }

    pub fn motor_mut(&mut self) -> &mut M {
        &mut self.motor
    }

    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    /// Overwrite the velocity (teleports, scripted launches).
    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    // ========================================
    // Input and knockback injection
    // ========================================

    /// Latch one input sample.
    pub fn update_input(&mut self, input: CharacterInput) {
        let up = self.motor.character_up();
        let axis = input.move_axis.clamp_length_max(1.0);

        let forward = planar(input.rotation * Vec3::NEG_Z, up)
            .or_else(|| planar(input.rotation * Vec3::Y, up))
            .unwrap_or_else(|| fallback_forward(up));
        let right = forward.cross(up);

        self.look_rotation = input.rotation;
        self.move_input = right * axis.x + forward * axis.y;
        self.jump_held = input.jump_held;
        self.crouch = self.crouch.apply(input.crouch);

        if input.jump_pressed {
            self.state.jump_buffer = self.config.jump_buffer_max;
        }
        if input.dash_pressed {
            self.dash_requested = true;
        }
    }

    /// Queue a knockback of `force` along `direction` for the next tick.
    pub fn apply_knockback(&mut self, direction: Vec3, force: f32) {
        let up = self.motor.character_up();
        self.knockback.enqueue(KnockbackImpulse::from_direction(direction, force, up));
    }

    /// Queue a knockback given as separate horizontal and vertical vectors.
    pub fn apply_directional_knockback(&mut self, horizontal: Vec3, vertical: Vec3) {
        let up = self.motor.character_up();
        self.knockback.enqueue(KnockbackImpulse {
            horizontal: horizontal - up * horizontal.dot(up),
            vertical: up * vertical.dot(up),
        });
    }

    // ========================================
    // Tick hooks
    // ========================================

    /// Run one full tick: hooks around a motor move.
    pub fn tick(&mut self, dt: f32) {
        if !valid_dt(dt) {
            return;
        }
        self.before_character_update(dt);

        let mut rotation = self.rotation;
        self.update_rotation(&mut rotation, dt);

        let mut velocity = self.velocity;
        self.update_velocity(&mut velocity, dt);

        self.velocity = self.motor.move_character(velocity, rotation, dt);
        self.after_character_update(dt);
    }

    /// Pre-move hook: knockback merge and crouch.
    pub fn before_character_update(&mut self, dt: f32) {
        if !valid_dt(dt) {
            return;
        }
        self.previous_stance = self.state.stance;

        let merged = self
            .knockback
            .merge_pending(&mut self.state.knockback_momentum, &self.config);
        if let Some(strength) = merged {
            if self.state.grounded && strength > self.config.knockback_unground_threshold {
                self.motor.force_unground();
                self.state.grounded = false;
                self.unground_requested = true;
            }
        }

        self.stance
            .before_update(&mut self.state, self.crouch, &mut self.motor, &self.config);
    }

    /// Turn toward the planar look direction.
    pub fn update_rotation(&mut self, rotation: &mut Quat, dt: f32) {
        if !valid_dt(dt) {
            return;
        }
        let up = self.motor.character_up();
        let Some(target) = planar(self.look_rotation * Vec3::NEG_Z, up)
            .or_else(|| planar(self.look_rotation * Vec3::Y, up))
        else {
            return;
        };
        let current = planar(*rotation * Vec3::NEG_Z, up).unwrap_or(target);

        // Slerp between upright bases so a half turn still rotates.
        let t = 1.0 - (-self.config.orientation_sharpness * dt).exp();
        let blended = basis_rotation(current, up).slerp(basis_rotation(target, up), t);
        let forward = planar(blended * Vec3::NEG_Z, up).unwrap_or(target);
        *rotation = basis_rotation(forward, up);
        self.rotation = *rotation;
    }

    /// Compute this tick's velocity.
    pub fn update_velocity(&mut self, velocity: &mut Vec3, dt: f32) {
        if !valid_dt(dt) {
            return;
        }
        self.knockback.strip_offset(velocity);
        self.tick_timers(dt);

        let up = self.motor.character_up();
        let was_grounded = self.integrator_grounded;
        let grounded = self.motor.is_stable_on_ground() && !self.unground_requested;
        let incoming_horizontal = horizontal_part(*velocity, up);

        self.track_ground_transitions(was_grounded, grounded, incoming_horizontal);
        self.state.grounded = grounded;

        if grounded {
            self.grounded_movement(velocity, was_grounded, incoming_horizontal, dt);
        } else {
            self.airborne_movement(velocity, dt);
        }
        self.dash_requested = false;

        let jumped = self.handle_jump(velocity);
        let grounded = grounded && !jumped;
        self.integrator_grounded = grounded;

        // Inside the hop window knockback already feeds the ground target
        if !(grounded && self.state.bhop_window > 0.0) {
            self.knockback.apply_offset(
                velocity,
                grounded,
                self.state.knockback_momentum,
                self.config.tuning.knockback_ground_factor,
            );
        }
        self.velocity = *velocity;
    }

    /// Post-move hook: stand up if possible, refresh grounding.
    pub fn after_character_update(&mut self, dt: f32) {
        if !valid_dt(dt) {
            return;
        }
        let slide_velocity = self.slide_direction * self.slide_speed;
        match self
            .stance
            .after_update(dt, &mut self.state, self.crouch, &mut self.motor, &self.config)
        {
            StandUp::Stood { from: Stance::Slide } => {
                self.state.slide_momentum = self.config.slide_momentum_retention;
                self.slide_exit_velocity = slide_velocity;
                self.slide_speed = 0.0;
            }
            StandUp::Blocked => log::trace!("stand up blocked"),
            _ => {}
        }
        self.unground_requested = false;
    }

    /// Back to a standing, motionless state. Pending knockback is dropped.
    pub fn reset(&mut self) {
        self.stance.reset(&mut self.state, &mut self.motor, &self.config);
        let grounded = self.motor.is_stable_on_ground();
        self.state = CharacterState {
            grounded,
            ..Default::default()
        };
        self.velocity = Vec3::ZERO;
        self.knockback.clear();
        self.wall_slide.release();
        self.air_dash.reset();
        self.ramp_boost.reset();
        self.integrator_grounded = grounded;
        self.unground_requested = false;
        self.previous_stance = Stance::Stand;
        self.slide_speed = 0.0;
        self.slide_exit_velocity = Vec3::ZERO;
        self.slide_carry = None;
        self.air_time = 0.0;
        self.dash_requested = false;
    }

    // ========================================
    // Timers and ground transitions
    // ========================================

    fn tick_timers(&mut self, dt: f32) {
        let state = &mut self.state;
        state.coyote_time = (state.coyote_time - dt).max(0.0);
        state.jump_buffer = (state.jump_buffer - dt).max(0.0);
        state.bhop_window = (state.bhop_window - dt).max(0.0);
        state.slide_momentum = (state.slide_momentum - SLIDE_MOMENTUM_DECAY * dt).max(0.0);

        self.air_dash.tick(dt);
        self.ramp_boost.tick(dt);
        self.knockback
            .tick(dt, &mut self.state.knockback_momentum, &self.config);
    }

    fn track_ground_transitions(&mut self, was_grounded: bool, grounded: bool, horizontal: Vec3) {
        if !was_grounded && grounded {
            if self.config.bunny_hop_enabled {
                self.state.bhop_window = self.config.bhop_window_max;
                self.state.bhop_velocity = horizontal;
            }
            self.air_dash.on_landed();
            self.wall_slide.release();
            self.slide_carry = None;
            self.air_time = 0.0;
            log::debug!("landed: bhop velocity={:?}", horizontal);
        } else if was_grounded && !grounded {
            if !self.unground_requested {
                self.state.coyote_time = self.config.coyote_time_max;
            }
            self.air_time = 0.0;
            if self.state.stance == Stance::Slide {
                self.end_slide_airborne(horizontal);
            }
            log::debug!("left ground");
        }
    }

    // ========================================
    // Grounded movement
    // ========================================

    fn grounded_movement(
        &mut self,
        velocity: &mut Vec3,
        was_grounded: bool,
        incoming_horizontal: Vec3,
        dt: f32,
    ) {
        let up = self.motor.character_up();
        let normal = self.motor.ground_normal();

        let forced_slide = self.ramp_boost.detect(
            true,
            normal,
            up,
            self.state.stance,
            *velocity,
            &self.config,
        );
        let mut slide_started = false;
        if let Some(mut speed) = forced_slide {
            // Crouching from a stand on the ramp is still a slide from standing
            if self.previous_stance == Stance::Stand {
                speed = speed.max(self.config.slide_start_speed);
            }
            let heading = incoming_horizontal.normalize_or(self.slide_direction);
            self.start_slide(heading, speed.min(self.config.max_slide_speed), normal);
            slide_started = true;
        } else if self.crouch.is_held() && self.state.stance != Stance::Slide {
            slide_started = self.try_enter_slide(was_grounded, incoming_horizontal, normal);
        }

        if self.state.stance == Stance::Slide {
            self.slide_movement(velocity, normal, slide_started, dt);
        } else {
            self.stand_crouch_movement(velocity, normal, dt);
        }
    }

    fn try_enter_slide(
        &mut self,
        was_grounded: bool,
        incoming_horizontal: Vec3,
        normal: Vec3,
    ) -> bool {
        let previous_speed = incoming_horizontal.length();
        let from_standing = was_grounded && self.previous_stance == Stance::Stand;
        let from_air = !was_grounded && previous_speed > self.config.tuning.slide_entry_air_speed;
        if !from_standing && !from_air {
            return false;
        }

        let direction = if from_air {
            incoming_horizontal.normalize_or(self.motor.character_forward())
        } else {
            self.motor.character_forward()
        };
        let speed = self
            .config
            .slide_start_speed
            .max(previous_speed * self.config.slide_boost_multiplier)
            .min(self.config.max_slide_speed);
        self.start_slide(direction, speed, normal);
        true
    }

    fn start_slide(&mut self, direction: Vec3, speed: f32, normal: Vec3) {
        let tangent = self.motor.direction_tangent_to_surface(direction, normal);
        self.slide_direction = tangent.normalize_or(direction);
        self.slide_speed = speed;
        self.state.stance = Stance::Slide;
        self.state.slide_momentum = 1.0;
        self.motor.set_capsule_dimensions(crouch_capsule(&self.config.capsule));
        log::debug!("stance: slide started at {:.2} m/s", speed);
    }

    fn slide_movement(&mut self, velocity: &mut Vec3, normal: Vec3, entry_tick: bool, dt: f32) {
        let up = self.motor.character_up();
        let config = &self.config;

        if !entry_tick {
            // Collisions from the last move show up as lost speed
            let on_surface = *velocity - normal * velocity.dot(normal);
            self.slide_speed = self.slide_speed.min(on_surface.length());
        }

        let input_dir = self.motor.direction_tangent_to_surface(self.move_input, normal);
        if input_dir.length_squared() > 0.0 {
            let steer = 1.0 - (-config.slide_steer_response * dt).exp();
            self.slide_direction = self
                .slide_direction
                .lerp(input_dir, steer)
                .normalize_or(self.slide_direction);
        }
        self.slide_direction = self
            .motor
            .direction_tangent_to_surface(self.slide_direction, normal)
            .normalize_or(self.slide_direction);

        if !entry_tick {
            if is_slide_slope(normal, up, config) {
                let downhill = downhill_direction(normal, up);
                let alignment = downhill.dot(self.slide_direction);
                if alignment > 0.0 {
                    let steepness = slope_angle_degrees(normal, up).to_radians().sin();
                    self.slide_speed +=
                        config.slide_slope_acceleration * alignment * steepness * dt;
                } else {
                    self.slide_speed -= (config.up_slope_friction + config.slide_friction) * dt;
                }
            } else {
                self.slide_speed -= config.slide_friction * dt;
            }
        }
        self.slide_speed = self.slide_speed.clamp(0.0, config.max_slide_speed);

        *velocity = self.slide_direction * self.slide_speed;

        if self.slide_speed < config.slide_end_speed {
            self.state.stance = Stance::Crouch;
            self.state.slide_momentum = config.slide_momentum_retention;
            self.slide_exit_velocity = *velocity;
            self.slide_speed = 0.0;
            log::debug!("stance: slide ended -> Crouch");
        }
    }

    fn stand_crouch_movement(&mut self, velocity: &mut Vec3, normal: Vec3, dt: f32) {
        let up = self.motor.character_up();
        let config = &self.config;
        let crouched = self.state.stance == Stance::Crouch;

        // Keep the speed, follow the ground
        let horizontal = horizontal_part(*velocity, up);
        let speed = horizontal.length();
        let mut current = self.motor.direction_tangent_to_surface(horizontal, normal) * speed;

        let friction = if self.state.bhop_window > 0.0 {
            config.surf_slipperiness
        } else {
            config.ground_friction
        };
        if speed > 0.0 {
            // While moving, friction only bleeds speed above the stance target
            let floor = (config.stance_speed(crouched) * self.move_input.length()).min(speed);
            let drop = speed * friction * dt;
            current *= (speed - drop).max(floor) / speed;
        }

        let input_right = self.move_input.cross(up);
        let reoriented = normal.cross(input_right).normalize_or_zero() * self.move_input.length();
        let mut target = reoriented * config.stance_speed(crouched);
        target += self.slide_exit_velocity * self.state.slide_momentum;
        if self.state.bhop_window > 0.0 {
            target += self.knockback.active().horizontal
                * self.state.knockback_momentum
                * config.tuning.knockback_ground_factor;
        }

        let blend = 1.0 - (-config.stance_sharpness(crouched) * dt).exp();
        *velocity = current.lerp(target, blend);
    }

    // ========================================
    // Airborne movement
    // ========================================

    fn airborne_movement(&mut self, velocity: &mut Vec3, dt: f32) {
        let up = self.motor.character_up();
        self.air_time += dt;

        match self.slide_carry {
            Some(carry) if self.air_time < self.config.slide_air_time => {
                *velocity = carry + up * velocity.dot(up);
            }
            _ => {
                self.slide_carry = None;
                air_strafe(velocity, self.move_input, up, dt, &self.config);
            }
        }

        if self.dash_requested {
            let direction = if self.move_input.length_squared() > 0.0 {
                self.move_input
            } else {
                self.motor.character_forward()
            };
            if self.air_dash.try_dash(velocity, direction, up, false, &self.config) {
                self.slide_carry = None;
            }
        }

        self.apply_gravity(velocity, dt);
        self.wall_slide
            .update(&self.motor, velocity, self.move_input, false, dt, &self.config);
    }

    fn apply_gravity(&self, velocity: &mut Vec3, dt: f32) {
        let up = self.motor.character_up();
        let config = &self.config;
        let vertical_speed = velocity.dot(up);

        let mut gravity = if vertical_speed > config.jump_apex_threshold && self.jump_held {
            config.jump_up_gravity
        } else {
            config.jump_down_gravity
        };
        if !self.jump_held && vertical_speed > 0.0 {
            gravity *= config.jump_end_early_gravity_modifier;
        }
        if self.wall_slide.is_sliding() {
            gravity *= config.tuning.wall_slide_gravity_scale;
        }
        *velocity -= up * gravity * dt;
    }

    // ========================================
    // Jumping
    // ========================================

    fn handle_jump(&mut self, velocity: &mut Vec3) -> bool {
        let up = self.motor.character_up();
        let sliding = self.state.stance == Stance::Slide;
        let ctx = JumpContext {
            grounded: self.state.grounded,
            wall_normal: self.wall_slide.wall_normal(),
            wish: self.move_input,
            up,
            crouch_jump: self.crouch.is_held() && self.state.stance == Stance::Crouch,
            sliding,
            ramp_boost: self.ramp_boost.is_active(),
            knockback_upward: self.knockback.upward(up) * self.state.knockback_momentum,
        };

        let Some(kind) = jump::try_jump(&mut self.state, velocity, &ctx, &self.config) else {
            return false;
        };

        self.motor.force_unground();
        self.wall_slide.release();
        if sliding {
            self.end_slide_airborne(horizontal_part(*velocity, up));
        }
        if kind == JumpKind::Wall {
            self.slide_carry = None;
        }
        true
    }

    fn end_slide_airborne(&mut self, horizontal: Vec3) {
        self.state.stance = Stance::Crouch;
        self.slide_carry = Some(horizontal);
        self.slide_speed = 0.0;
        self.air_time = 0.0;
        log::debug!("stance: slide left the ground, carrying {:?}", horizontal);
    }
}

// ========================================
// Air strafing
// ========================================

/// Quake-style air control on the horizontal part of `velocity`.
///
/// Strafe input perpendicular to the current heading accelerates harder than
/// forward input, which tapers past `max_air_speed`. Strafing alone never
/// lifts the speed above `max(previous speed, max_air_speed * strafe_soft_cap_ratio)`.
pub fn air_strafe(velocity: &mut Vec3, wish: Vec3, up: Vec3, dt: f32, config: &MovementConfig) {
    let tuning = &config.tuning;
    let vertical = up * velocity.dot(up);
    let mut horizontal = *velocity - vertical;
    let old_speed = horizontal.length();

    let wish_flat = wish - up * wish.dot(up);
    let wish_amount = wish_flat.length().min(1.0);
    let Some(wish_dir) = wish_flat.try_normalize() else {
        return;
    };

    let forward = horizontal.try_normalize().unwrap_or(wish_dir);
    let side = up.cross(forward).normalize_or_zero();
    let forward_alignment = wish_dir.dot(forward);
    let strafe_alignment = wish_dir.dot(side);

    let mut acceleration = Vec3::ZERO;

    if strafe_alignment.abs() > tuning.strafe_deadzone {
        let mut strafe = config.air_acceleration * config.strafe_control;
        let bonus_range = 1.0 - tuning.strafe_bonus_alignment;
        if strafe_alignment.abs() > tuning.strafe_bonus_alignment
            && old_speed < config.max_air_speed * tuning.strafe_bonus_speed_ratio
            && bonus_range > 0.0
        {
            let t = ((strafe_alignment.abs() - tuning.strafe_bonus_alignment) / bonus_range)
                .clamp(0.0, 1.0);
            strafe *= 1.0 + tuning.strafe_bonus_max * t;
        }
        acceleration += side * strafe_alignment * strafe;
    }

    if forward_alignment > 0.0 {
        let taper = if old_speed > config.max_air_speed {
            config.max_air_speed / old_speed
        } else {
            1.0
        };
        acceleration += forward * forward_alignment * config.air_acceleration * taper;
    } else if forward_alignment < 0.0 {
        // Backward input brakes
        acceleration += forward * forward_alignment * config.air_acceleration;
    }

    if old_speed < config.air_speed * 0.5 {
        acceleration += wish_dir * config.air_acceleration * tuning.air_baseline_acceleration;
    }

    horizontal += acceleration * wish_amount * dt;

    let cap = old_speed.max(config.max_air_speed * tuning.strafe_soft_cap_ratio);
    horizontal = horizontal.clamp_length_max(cap);

    *velocity = horizontal + vertical;
}

// ========================================
// Helpers
// ========================================

fn valid_dt(dt: f32) -> bool {
    if dt.is_finite() && dt > 0.0 {
        true
    } else {
        log::warn!("ignoring tick with invalid dt {}", dt);
        false
    }
}

fn horizontal_part(v: Vec3, up: Vec3) -> Vec3 {
    v - up * v.dot(up)
}

/// Normalized projection of `v` onto the plane perpendicular to `up`.
fn planar(v: Vec3, up: Vec3) -> Option<Vec3> {
    horizontal_part(v, up).try_normalize()
}

fn fallback_forward(up: Vec3) -> Vec3 {
    planar(Vec3::NEG_Z, up)
        .or_else(|| planar(Vec3::X, up))
        .unwrap_or(Vec3::NEG_Z)
}

/// Rotation whose -Z axis is `forward` and whose Y axis is `up`.
fn basis_rotation(forward: Vec3, up: Vec3) -> Quat {
    let right = forward.cross(up).normalize_or(Vec3::X);
    let up = right.cross(forward).normalize_or(up);
    Quat::from_mat3(&Mat3::from_cols(right, up, -forward)).normalize()
}
