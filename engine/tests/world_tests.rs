//! World Tests - Full Ticks Against Level Geometry
//!
//! Runs the controller on the reference `SimpleMotor` so grounding, ceilings
//! and walls come from real collision queries instead of scripted flags.

use glam::{Quat, Vec2, Vec3};
use momentum_engine::physics::{BoxWorld, SimpleMotor};
use momentum_engine::player::{
    CharacterController, CharacterInput, CharacterMotor, CrouchCommand, MovementConfig, Stance,
};

const DT: f32 = 1.0 / 60.0;

fn controller(world: BoxWorld, spawn: Vec3) -> CharacterController<SimpleMotor> {
    CharacterController::new(SimpleMotor::new(world, spawn), MovementConfig::default()).unwrap()
}

fn horizontal_speed(v: Vec3) -> f32 {
    Vec3::new(v.x, 0.0, v.z).length()
}

fn forward() -> CharacterInput {
    CharacterInput::moving(Quat::IDENTITY, Vec2::Y)
}

// ============================================================================
// Ground
// ============================================================================

#[test]
fn test_run_reaches_walk_speed() {
    let mut c = controller(BoxWorld::flat(), Vec3::ZERO);
    c.update_input(forward());
    for _ in 0..120 {
        c.tick(DT);
    }

    let speed = horizontal_speed(c.velocity());
    assert!(c.is_grounded());
    assert!(speed > 9.5 && speed <= 10.01, "speed {speed}");
    assert!(c.motor().position().z < -10.0);
    assert!(c.motor().position().y.abs() < 0.01);
}

#[test]
fn test_jump_leaves_and_lands() {
    let mut c = controller(BoxWorld::flat(), Vec3::ZERO);
    c.update_input(forward());
    c.tick(DT);

    c.update_input(forward().with_jump());
    c.tick(DT);
    assert!(!c.is_grounded());

    let held = CharacterInput {
        jump_held: true,
        ..forward()
    };
    let mut peak: f32 = 0.0;
    let mut landed_after = None;
    for tick in 0..120 {
        c.update_input(held);
        c.tick(DT);
        peak = peak.max(c.motor().position().y);
        if c.is_grounded() {
            landed_after = Some(tick);
            break;
        }
    }

    assert!(peak > 1.0, "peak {peak}");
    assert!(landed_after.is_some());
    // The landing is seen on the next velocity update
    c.tick(DT);
    assert!(c.state().bhop_window > 0.0);
}

#[test]
fn test_ceiling_blocks_standing_up() {
    // Low ceiling starting three meters ahead
    let world = BoxWorld::flat().with_box(Vec3::new(-50.0, 1.5, -50.0), Vec3::new(50.0, 2.5, -3.0));
    let mut c = controller(world, Vec3::ZERO);
    let still = CharacterInput::moving(Quat::IDENTITY, Vec2::ZERO);
    c.tick(DT);

    c.update_input(still.with_crouch(CrouchCommand::Hold));
    c.tick(DT);
    assert!(c.is_sliding());
    let mut ticks = 0;
    while c.is_sliding() && ticks < 600 {
        c.tick(DT);
        ticks += 1;
    }
    assert_eq!(c.stance(), Stance::Crouch);
    assert!(c.motor().position().z < -4.0);

    c.update_input(still.with_crouch(CrouchCommand::Release));
    for _ in 0..10 {
        c.tick(DT);
        assert_eq!(c.stance(), Stance::Crouch);
    }
    let capsule = c.motor().capsule();
    assert!((capsule.height - c.config().capsule.crouch_height).abs() < 0.001);
}

#[test]
fn test_stand_up_in_open_space() {
    let mut c = controller(BoxWorld::flat(), Vec3::ZERO);
    let still = CharacterInput::moving(Quat::IDENTITY, Vec2::ZERO);
    c.update_input(still.with_crouch(CrouchCommand::Hold));
    c.tick(DT);
    assert!(c.stance().is_low());

    c.update_input(still.with_crouch(CrouchCommand::Release));
    c.tick(DT);
    assert_eq!(c.stance(), Stance::Stand);
    assert!((c.motor().capsule().height - c.config().capsule.standing_height).abs() < 0.001);
}

// ============================================================================
// Slopes
// ============================================================================

#[test]
fn test_downhill_slide_gains_speed() {
    let mut c = controller(BoxWorld::slope(20.0), Vec3::ZERO);
    assert!(c.motor().is_stable_on_ground());

    c.update_input(forward().with_crouch(CrouchCommand::Hold));
    for _ in 0..30 {
        c.tick(DT);
    }

    assert!(c.is_sliding());
    assert!(c.is_grounded());
    assert!(c.ramp_boost_active());
    assert!(c.slide_speed() > c.config().slide_start_speed);
    assert!(c.slide_speed() <= c.config().max_slide_speed);
}

#[test]
fn test_too_steep_slope_is_not_ground() {
    let motor = SimpleMotor::new(BoxWorld::slope(60.0), Vec3::ZERO);
    assert!(!motor.is_stable_on_ground());
}

// ============================================================================
// Walls
// ============================================================================

#[test]
fn test_wall_slide_then_wall_jump() {
    let world = BoxWorld::flat().with_box(Vec3::new(-5.0, 0.0, -3.0), Vec3::new(5.0, 20.0, -2.0));
    let mut c = controller(world, Vec3::new(0.0, 10.0, 0.0));
    assert!(!c.is_grounded());
    c.set_velocity(Vec3::new(0.0, 0.0, -6.0));
    c.update_input(forward());

    let mut ticks = 0;
    while !c.is_wall_sliding() && ticks < 60 {
        c.tick(DT);
        ticks += 1;
    }
    assert!(c.is_wall_sliding());

    for _ in 0..20 {
        c.tick(DT);
        assert!(c.velocity().y >= -c.config().wall_sliding_speed - 0.001);
    }
    assert!(c.is_wall_sliding());

    c.update_input(forward().with_jump());
    c.tick(DT);
    assert!(!c.is_wall_sliding());
    assert!(c.velocity().z > 0.0);
    assert!(c.velocity().y > 0.0);
}

#[test]
fn test_running_into_wall_stops_at_face() {
    let world = BoxWorld::flat().with_box(Vec3::new(-5.0, 0.0, -3.0), Vec3::new(5.0, 4.0, -2.0));
    let mut c = controller(world, Vec3::ZERO);
    c.update_input(forward());
    for _ in 0..120 {
        c.tick(DT);
    }
    assert!(c.is_grounded());
    assert!(c.motor().position().z >= -1.51);
}

// ============================================================================
// Knockback
// ============================================================================

#[test]
fn test_strong_knockback_launches_and_lands() {
    let mut c = controller(BoxWorld::flat(), Vec3::ZERO);
    c.tick(DT);
    c.apply_knockback(Vec3::new(1.0, 1.0, 0.0), 20.0);
    c.tick(DT);
    assert!(!c.is_grounded());

    let mut peak: f32 = 0.0;
    let mut landed = false;
    for _ in 0..240 {
        c.tick(DT);
        peak = peak.max(c.motor().position().y);
        if c.is_grounded() {
            landed = true;
            break;
        }
    }
    assert!(peak > 1.0, "peak {peak}");
    assert!(c.motor().position().x > 1.0);
    assert!(landed);
}

#[test]
fn test_knockback_into_wall_leaves_no_rebound() {
    // Airborne, touching the face of a wall at z = -2
    let world =
        BoxWorld::empty().with_box(Vec3::new(-5.0, -50.0, -3.0), Vec3::new(5.0, 50.0, -2.0));
    let mut c = controller(world, Vec3::new(0.0, 0.0, -1.45));
    assert!(!c.is_grounded());

    c.apply_knockback(Vec3::NEG_Z, 12.0);
    for _ in 0..60 {
        c.tick(DT);
    }

    assert!(!c.knockback().is_active());
    assert!(c.velocity().z.abs() < 0.05, "vz {}", c.velocity().z);
    assert!(c.motor().position().z < -1.0);
}

#[test]
fn test_knockback_into_ceiling_keeps_fall_speed() {
    // No ground, a ceiling half a meter above the head
    let world = BoxWorld::empty().with_box(Vec3::new(-5.0, 2.5, -5.0), Vec3::new(5.0, 3.5, 5.0));
    let mut c = controller(world, Vec3::ZERO);
    c.apply_knockback(Vec3::Y, 20.0);
    c.tick(DT);
    let mut ticks = 0;
    while c.knockback().is_active() && ticks < 120 {
        c.tick(DT);
        ticks += 1;
    }
    assert!(!c.knockback().is_active());

    // Only gravity over the knockback time may remain, none of the clipped impulse
    let config = c.config();
    let max_fall = config.jump_down_gravity * config.max_knockback_time + 2.0;
    let vy = c.velocity().y;
    assert!(vy <= 0.0);
    assert!(vy > -max_fall, "vy {vy}");
}
