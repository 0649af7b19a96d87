//! Movement Configuration
//!
//! Every tunable of the movement core lives here, grouped the way the
//! integrator consumes them. Values are metric (meters, seconds) unless noted.
//!
//! Configs load from JSON with `#[serde(default)]`, so a file only needs the
//! fields it overrides:
//!
//! ```rust,ignore
//! use momentum_engine::player::MovementConfig;
//!
//! let config = MovementConfig::from_json_str(r#"{ "jump_speed": 9.0 }"#)?;
//! assert_eq!(config.jump_speed, 9.0);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

// ============================================================================
// ERROR TYPE
// ============================================================================

/// Errors raised while loading or validating a movement configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// Reading the config file failed.
    Io(std::io::Error),
    /// The config file is not valid JSON for `MovementConfig`.
    Json(serde_json::Error),
    /// Field must be strictly positive.
    NonPositive { field: &'static str, value: f32 },
    /// Field must be zero or positive.
    Negative { field: &'static str, value: f32 },
    /// Field must lie inside `[min, max]`.
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    /// Capsule dimensions are inconsistent.
    InvalidCapsule(&'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {e}"),
            ConfigError::Json(e) => write!(f, "JSON error: {e}"),
            ConfigError::NonPositive { field, value } => {
                write!(f, "{field} must be > 0 (got {value})")
            }
            ConfigError::Negative { field, value } => {
                write!(f, "{field} must be >= 0 (got {value})")
            }
            ConfigError::OutOfRange {
                field,
                value,
                min,
                max,
            } => write!(f, "{field} must be within [{min}, {max}] (got {value})"),
            ConfigError::InvalidCapsule(reason) => write!(f, "invalid capsule: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

// ============================================================================
// CAPSULE
// ============================================================================

/// Collision capsule sizes for the two capsule stances.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapsuleConfig {
    pub radius: f32,
    pub standing_height: f32,
    pub crouch_radius: f32,
    pub crouch_height: f32,
}

impl Default for CapsuleConfig {
    fn default() -> Self {
        Self {
            radius: 0.5,
            standing_height: 2.0,
            crouch_radius: 0.5,
            crouch_height: 1.0,
        }
    }
}

// ============================================================================
// TUNING CONSTANTS
// ============================================================================

/// Balance constants of the momentum techniques.
///
/// These have no documented design target. They are kept as data so they can
/// be tuned without touching the integrator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MomentumTuning {
    /// Strafe alignment below which strafe input is ignored
    pub strafe_deadzone: f32,
    /// Strafe alignment above which the strafe speed bonus kicks in
    pub strafe_bonus_alignment: f32,
    /// Maximum multiplicative strafe speed bonus (0.04 = +4%)
    pub strafe_bonus_max: f32,
    /// Strafe bonus only applies below `max_air_speed * this`
    pub strafe_bonus_speed_ratio: f32,
    /// Air strafing alone cannot push speed past `max_air_speed * this`
    pub strafe_soft_cap_ratio: f32,
    /// Baseline air acceleration as a fraction of `air_acceleration`
    pub air_baseline_acceleration: f32,

    /// Bonus for hopping at the very start of the bhop window (0.05 = +5%)
    pub bhop_timing_bonus: f32,
    /// Multiplier applied to the hop boost for a crouch-jump
    pub bhop_crouch_bonus: f32,
    /// Multiplier applied to the hop boost while a ramp boost is active
    pub bhop_ramp_bonus: f32,
    /// Above `stable_move_speed * this` the hop boost is damped toward 1.0
    pub bhop_soft_cap_ratio: f32,
    /// Hard cap of hop speed as a multiple of `max_air_speed`
    pub bhop_max_speed_ratio: f32,
    /// Vertical jump factor when hopping while already fast
    pub bhop_fast_jump_factor: f32,
    /// Steering weight toward input at walk speed, shrinks as speed rises
    pub bhop_steer: f32,

    /// Surfaces whose `|normal . up|` is below this count as walls
    pub wall_max_up_dot: f32,
    /// Velocity into the wall must exceed this to start a wall slide
    pub wall_entry_dot: f32,
    /// Gravity scale while wall sliding
    pub wall_slide_gravity_scale: f32,
    /// Per-second loss of along-wall speed when input is not aligned with the wall
    pub wall_slide_drag: f32,
    /// Weight of the along-wall direction in a wall jump
    pub wall_jump_along_weight: f32,
    /// Fraction of horizontal speed carried through a wall jump
    pub wall_jump_carry: f32,

    /// Fraction of slide velocity carried through a slide jump
    pub slide_jump_carry: f32,
    /// Extra upward kick of a slide jump (m/s)
    pub slide_jump_kick: f32,
    /// Minimum horizontal speed to enter a slide when landing (m/s)
    pub slide_entry_air_speed: f32,

    /// Downhill alignment needed to arm a ramp boost
    pub ramp_alignment: f32,
    /// Ramp boost duration (seconds)
    pub ramp_boost_duration: f32,
    /// Forced ramp slide starts at horizontal speed times this
    pub ramp_slide_speed_multiplier: f32,

    /// Fraction of knockback kept while grounded (0.3 = damped 70%)
    pub knockback_ground_factor: f32,
}

impl Default for MomentumTuning {
    fn default() -> Self {
        Self {
            strafe_deadzone: 0.2,
            strafe_bonus_alignment: 0.7,
            strafe_bonus_max: 0.04,
            strafe_bonus_speed_ratio: 1.5,
            strafe_soft_cap_ratio: 1.5,
            air_baseline_acceleration: 0.25,

            bhop_timing_bonus: 0.05,
            bhop_crouch_bonus: 1.05,
            bhop_ramp_bonus: 1.1,
            bhop_soft_cap_ratio: 1.5,
            bhop_max_speed_ratio: 2.3,
            bhop_fast_jump_factor: 0.95,
            bhop_steer: 0.5,

            wall_max_up_dot: 0.3,
            wall_entry_dot: 0.1,
            wall_slide_gravity_scale: 0.4,
            wall_slide_drag: 2.0,
            wall_jump_along_weight: 0.5,
            wall_jump_carry: 0.3,

            slide_jump_carry: 0.3,
            slide_jump_kick: 1.5,
            slide_entry_air_speed: 1.0,

            ramp_alignment: 0.7,
            ramp_boost_duration: 0.5,
            ramp_slide_speed_multiplier: 1.2,

            knockback_ground_factor: 0.3,
        }
    }
}

// ============================================================================
// MOVEMENT CONFIG
// ============================================================================

/// Configuration for the character movement core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    // ------------------------------------------------------------------------
    // Grounded movement
    // ------------------------------------------------------------------------
    /// Standing ground speed (m/s)
    pub stable_move_speed: f32,
    /// Crouched ground speed (m/s)
    pub crouch_speed: f32,
    /// Response rate toward target velocity while standing (1/s)
    pub stable_movement_sharpness: f32,
    /// Response rate toward target velocity while crouched (1/s)
    pub crouch_movement_sharpness: f32,
    /// Ground friction (fraction of speed lost per second)
    pub ground_friction: f32,
    /// Friction used instead of `ground_friction` inside the bhop window
    pub surf_slipperiness: f32,
    /// Facing response rate (1/s)
    pub orientation_sharpness: f32,

    // ------------------------------------------------------------------------
    // Air movement
    // ------------------------------------------------------------------------
    /// Soft horizontal speed cap for air control (m/s)
    pub max_air_speed: f32,
    /// Reference air speed for the baseline acceleration (m/s)
    pub air_speed: f32,
    /// Air acceleration (m/s^2)
    pub air_acceleration: f32,
    /// Strafe acceleration multiplier
    pub strafe_control: f32,

    // ------------------------------------------------------------------------
    // Jumping and gravity
    // ------------------------------------------------------------------------
    /// Vertical jump speed (m/s)
    pub jump_speed: f32,
    /// Gravity while ascending above the apex threshold (m/s^2)
    pub jump_up_gravity: f32,
    /// Gravity near the apex and while falling (m/s^2)
    pub jump_down_gravity: f32,
    /// Vertical speed splitting the up and down gravity zones (m/s)
    pub jump_apex_threshold: f32,
    /// Gravity multiplier when jump is released while still ascending
    pub jump_end_early_gravity_modifier: f32,
    /// Jump multiplier for a crouch-jump
    pub crouch_jump_multiplier: f32,
    /// Coyote time (seconds)
    pub coyote_time_max: f32,
    /// Jump buffer (seconds)
    pub jump_buffer_max: f32,

    // ------------------------------------------------------------------------
    // Bunny hopping
    // ------------------------------------------------------------------------
    pub bunny_hop_enabled: bool,
    /// Bhop window after landing (seconds)
    pub bhop_window_max: f32,
    /// Base hop speed multiplier
    pub bhop_boost_multiplier: f32,

    // ------------------------------------------------------------------------
    // Sliding
    // ------------------------------------------------------------------------
    /// Minimum slide entry speed (m/s)
    pub slide_start_speed: f32,
    /// Entry speed multiplier over the previous speed
    pub slide_boost_multiplier: f32,
    /// Slide ends below this speed (m/s)
    pub slide_end_speed: f32,
    /// Slide momentum left after a slide ends (0..1)
    pub slide_momentum_retention: f32,
    /// Steering response toward input while sliding (1/s)
    pub slide_steer_response: f32,
    /// Slide deceleration on flat ground (m/s^2)
    pub slide_friction: f32,
    /// Extra deceleration when sliding uphill (m/s^2)
    pub up_slope_friction: f32,
    /// Downhill acceleration at full alignment on a vertical slope (m/s^2)
    pub slide_slope_acceleration: f32,
    /// Slopes flatter than this (degrees) count as flat for sliding
    pub min_slide_angle: f32,
    /// Slopes steeper than this (degrees) are not slid on
    pub max_slope_angle: f32,
    /// Hard slide speed cap (m/s)
    pub max_slide_speed: f32,
    /// Slide velocity is carried verbatim for this long after leaving the ground (seconds)
    pub slide_air_time: f32,

    // ------------------------------------------------------------------------
    // Walls
    // ------------------------------------------------------------------------
    pub wall_jump_enabled: bool,
    /// Push-off speed away from the wall (m/s)
    pub wall_jump_force: f32,
    /// Upward speed of a wall jump (m/s)
    pub wall_jump_upwards_force: f32,
    /// Fall speed limit while wall sliding (m/s)
    pub wall_sliding_speed: f32,
    /// Probe reach beyond the capsule radius (m)
    pub wall_probe_distance: f32,

    // ------------------------------------------------------------------------
    // Air dash
    // ------------------------------------------------------------------------
    pub air_dash_enabled: bool,
    /// Horizontal dash speed (m/s)
    pub air_dash_force: f32,
    /// Cooldown between dashes (seconds)
    pub air_dash_cooldown: f32,

    // ------------------------------------------------------------------------
    // Knockback
    // ------------------------------------------------------------------------
    /// Knockback countdown (seconds)
    pub max_knockback_time: f32,
    /// Exponential decay rate of the knockback vectors (1/s)
    pub knockback_recovery_rate: f32,
    /// Knockback momentum decays at `1 - this` per second once the countdown ends
    pub knockback_momentum_retention: f32,
    /// Grounded characters are forced airborne by knockback stronger than this (m/s)
    pub knockback_unground_threshold: f32,

    pub capsule: CapsuleConfig,
    pub tuning: MomentumTuning,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            stable_move_speed: 10.0,
            crouch_speed: 5.0,
            stable_movement_sharpness: 15.0,
            crouch_movement_sharpness: 10.0,
            ground_friction: 6.0,
            surf_slipperiness: 0.5,
            orientation_sharpness: 10.0,

            max_air_speed: 12.0,
            air_speed: 10.0,
            air_acceleration: 30.0,
            strafe_control: 1.5,

            jump_speed: 8.0,
            jump_up_gravity: 25.0,
            jump_down_gravity: 40.0,
            jump_apex_threshold: 2.0,
            jump_end_early_gravity_modifier: 2.0,
            crouch_jump_multiplier: 1.15,
            coyote_time_max: 0.15,
            jump_buffer_max: 0.15,

            bunny_hop_enabled: true,
            bhop_window_max: 0.2,
            bhop_boost_multiplier: 1.1,

            slide_start_speed: 12.0,
            slide_boost_multiplier: 1.2,
            slide_end_speed: 4.0,
            slide_momentum_retention: 0.5,
            slide_steer_response: 3.0,
            slide_friction: 6.0,
            up_slope_friction: 10.0,
            slide_slope_acceleration: 20.0,
            min_slide_angle: 5.0,
            max_slope_angle: 50.0,
            max_slide_speed: 25.0,
            slide_air_time: 0.25,

            wall_jump_enabled: true,
            wall_jump_force: 10.0,
            wall_jump_upwards_force: 8.0,
            wall_sliding_speed: 3.0,
            wall_probe_distance: 0.6,

            air_dash_enabled: true,
            air_dash_force: 18.0,
            air_dash_cooldown: 1.0,

            max_knockback_time: 0.5,
            knockback_recovery_rate: 4.0,
            knockback_momentum_retention: 0.5,
            knockback_unground_threshold: 2.0,

            capsule: CapsuleConfig::default(),
            tuning: MomentumTuning::default(),
        }
    }
}

impl MovementConfig {
    /// Faster, looser movement with stronger hops.
    pub fn arcade() -> Self {
        Self {
            stable_move_speed: 12.0,
            max_air_speed: 15.0,
            air_acceleration: 40.0,
            strafe_control: 2.0,
            bhop_window_max: 0.3,
            bhop_boost_multiplier: 1.15,
            max_slide_speed: 30.0,
            ..Default::default()
        }
    }

    /// Grounded, deliberate movement: no hops, wall jumps or dashes.
    pub fn tactical() -> Self {
        Self {
            stable_move_speed: 6.0,
            crouch_speed: 3.0,
            max_air_speed: 7.0,
            air_speed: 6.0,
            air_acceleration: 10.0,
            strafe_control: 1.0,
            jump_speed: 6.0,
            bunny_hop_enabled: false,
            wall_jump_enabled: false,
            air_dash_enabled: false,
            slide_start_speed: 7.0,
            max_slide_speed: 12.0,
            ..Default::default()
        }
    }

    /// Parse a config from JSON. Missing fields take their default values.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: MovementConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    /// Serialize the config as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Target ground speed for a stance.
    pub fn stance_speed(&self, crouched: bool) -> f32 {
        if crouched {
            self.crouch_speed
        } else {
            self.stable_move_speed
        }
    }

    /// Ground response rate for a stance.
    pub fn stance_sharpness(&self, crouched: bool) -> f32 {
        if crouched {
            self.crouch_movement_sharpness
        } else {
            self.stable_movement_sharpness
        }
    }

    /// Check every field. Called once by `CharacterController::new`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("stable_move_speed", self.stable_move_speed),
            ("crouch_speed", self.crouch_speed),
            ("stable_movement_sharpness", self.stable_movement_sharpness),
            ("crouch_movement_sharpness", self.crouch_movement_sharpness),
            ("orientation_sharpness", self.orientation_sharpness),
            ("max_air_speed", self.max_air_speed),
            ("air_speed", self.air_speed),
            ("jump_speed", self.jump_speed),
            ("jump_up_gravity", self.jump_up_gravity),
            ("jump_down_gravity", self.jump_down_gravity),
            ("slide_start_speed", self.slide_start_speed),
            ("max_slide_speed", self.max_slide_speed),
            ("max_knockback_time", self.max_knockback_time),
            ("capsule.radius", self.capsule.radius),
            ("capsule.standing_height", self.capsule.standing_height),
            ("capsule.crouch_radius", self.capsule.crouch_radius),
            ("capsule.crouch_height", self.capsule.crouch_height),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        let non_negative = [
            ("ground_friction", self.ground_friction),
            ("surf_slipperiness", self.surf_slipperiness),
            ("air_acceleration", self.air_acceleration),
            ("strafe_control", self.strafe_control),
            ("jump_apex_threshold", self.jump_apex_threshold),
            ("jump_end_early_gravity_modifier", self.jump_end_early_gravity_modifier),
            ("crouch_jump_multiplier", self.crouch_jump_multiplier),
            ("coyote_time_max", self.coyote_time_max),
            ("jump_buffer_max", self.jump_buffer_max),
            ("bhop_window_max", self.bhop_window_max),
            ("bhop_boost_multiplier", self.bhop_boost_multiplier),
            ("slide_boost_multiplier", self.slide_boost_multiplier),
            ("slide_end_speed", self.slide_end_speed),
            ("slide_steer_response", self.slide_steer_response),
            ("slide_friction", self.slide_friction),
            ("up_slope_friction", self.up_slope_friction),
            ("slide_slope_acceleration", self.slide_slope_acceleration),
            ("slide_air_time", self.slide_air_time),
            ("wall_jump_force", self.wall_jump_force),
            ("wall_jump_upwards_force", self.wall_jump_upwards_force),
            ("wall_sliding_speed", self.wall_sliding_speed),
            ("wall_probe_distance", self.wall_probe_distance),
            ("air_dash_force", self.air_dash_force),
            ("air_dash_cooldown", self.air_dash_cooldown),
            ("knockback_recovery_rate", self.knockback_recovery_rate),
            ("knockback_unground_threshold", self.knockback_unground_threshold),
            ("tuning.ramp_boost_duration", self.tuning.ramp_boost_duration),
            ("tuning.wall_slide_drag", self.tuning.wall_slide_drag),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(ConfigError::Negative { field, value });
            }
        }

        let unit = [
            ("slide_momentum_retention", self.slide_momentum_retention),
            ("knockback_momentum_retention", self.knockback_momentum_retention),
            ("tuning.strafe_deadzone", self.tuning.strafe_deadzone),
            ("tuning.strafe_bonus_alignment", self.tuning.strafe_bonus_alignment),
            ("tuning.wall_max_up_dot", self.tuning.wall_max_up_dot),
            ("tuning.wall_slide_gravity_scale", self.tuning.wall_slide_gravity_scale),
            ("tuning.ramp_alignment", self.tuning.ramp_alignment),
            ("tuning.knockback_ground_factor", self.tuning.knockback_ground_factor),
        ];
        for (field, value) in unit {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfRange {
                    field,
                    value,
                    min: 0.0,
                    max: 1.0,
                });
            }
        }

        for (field, value) in [
            ("min_slide_angle", self.min_slide_angle),
            ("max_slope_angle", self.max_slope_angle),
        ] {
            if !(0.0..=90.0).contains(&value) {
                return Err(ConfigError::OutOfRange {
                    field,
                    value,
                    min: 0.0,
                    max: 90.0,
                });
            }
        }

        if self.slide_end_speed >= self.slide_start_speed {
            return Err(ConfigError::OutOfRange {
                field: "slide_end_speed",
                value: self.slide_end_speed,
                min: 0.0,
                max: self.slide_start_speed,
            });
        }
        if self.max_slide_speed < self.slide_start_speed {
            return Err(ConfigError::OutOfRange {
                field: "max_slide_speed",
                value: self.max_slide_speed,
                min: self.slide_start_speed,
                max: f32::MAX,
            });
        }
        // Wall jumps must push away from the wall
        if self.wall_jump_enabled && !(self.wall_jump_force > 0.0) {
            return Err(ConfigError::NonPositive {
                field: "wall_jump_force",
                value: self.wall_jump_force,
            });
        }

        let capsule = &self.capsule;
        if capsule.crouch_height > capsule.standing_height {
            return Err(ConfigError::InvalidCapsule(
                "crouch height exceeds standing height",
            ));
        }
        if capsule.standing_height < capsule.radius * 2.0
            || capsule.crouch_height < capsule.crouch_radius * 2.0
        {
            return Err(ConfigError::InvalidCapsule(
                "capsule height is smaller than its diameter",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(MovementConfig::default().validate().is_ok());
        assert!(MovementConfig::arcade().validate().is_ok());
        assert!(MovementConfig::tactical().validate().is_ok());
    }

    #[test]
    fn test_partial_json_overrides_only_given_fields() {
        let json = r#"{ "jump_speed": 9.5, "tuning": { "bhop_steer": 0.25 } }"#;
        let config = MovementConfig::from_json_str(json).unwrap();
        assert_eq!(config.jump_speed, 9.5);
        assert_eq!(config.tuning.bhop_steer, 0.25);
        assert_eq!(config.stable_move_speed, MovementConfig::default().stable_move_speed);
        assert_eq!(config.tuning.bhop_max_speed_ratio, 2.3);
    }

    #[test]
    fn test_json_round_trip() {
        let config = MovementConfig::arcade();
        let json = config.to_json_pretty().unwrap();
        assert_eq!(MovementConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_invalid_json_is_reported() {
        let err = MovementConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_negative_timer_rejected() {
        let config = MovementConfig {
            coyote_time_max: -0.1,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Negative { field: "coyote_time_max", .. }));
        assert!(err.to_string().contains("coyote_time_max"));
    }

    #[test]
    fn test_nan_speed_rejected() {
        let config = MovementConfig {
            stable_move_speed: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { field: "stable_move_speed", .. })
        ));
    }

    #[test]
    fn test_retention_out_of_range_rejected() {
        let config = MovementConfig {
            slide_momentum_retention: 1.5,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::OutOfRange { .. })));
    }

    #[test]
    fn test_inverted_capsule_rejected() {
        let mut config = MovementConfig::default();
        config.capsule.crouch_height = 3.0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidCapsule(_))));
    }

    #[test]
    fn test_stance_speed_and_sharpness() {
        let config = MovementConfig::default();
        assert_eq!(config.stance_speed(false), config.stable_move_speed);
        assert_eq!(config.stance_speed(true), config.crouch_speed);
        assert_eq!(config.stance_sharpness(true), config.crouch_movement_sharpness);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err =
            MovementConfig::from_json_file(Path::new("/nonexistent/movement.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_wall_jump_needs_a_push_when_enabled() {
        let config = MovementConfig {
            wall_jump_force: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { field: "wall_jump_force", .. })
        ));

        let disabled = MovementConfig {
            wall_jump_enabled: false,
            ..config
        };
        assert!(disabled.validate().is_ok());
    }
}
