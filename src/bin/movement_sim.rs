//! Movement Sim - Headless Movement Playground
//!
//! Run with: `RUST_LOG=info cargo run --bin movement_sim [preset|config.json]`
//!
//! Drives the movement core through scripted scenarios on the reference
//! box-world motor and logs what happened in each one. Useful for checking a
//! tuning file before it goes into a game.
//!
//! Arguments:
//! - `default`, `arcade`, `tactical`: built-in presets
//! - any other argument: path to a JSON `MovementConfig`
//! - `--dump-config`: print the selected config as JSON and exit
//!
//! Set `RUST_LOG=debug` to also see the per-event logs from the controller.

use std::error::Error;
use std::path::Path;

use glam::{Quat, Vec2, Vec3};
use momentum_engine::physics::{BoxWorld, SimpleMotor};
use momentum_engine::player::{
    CharacterController, CharacterInput, CharacterMotor, CrouchCommand, MovementConfig,
};

const DT: f32 = 1.0 / 60.0;

type Controller = CharacterController<SimpleMotor>;

// ============================================================================
// CONFIG SELECTION
// ============================================================================

fn load_config(arg: Option<&str>) -> Result<MovementConfig, Box<dyn Error>> {
    let config = match arg {
        None | Some("default") => MovementConfig::default(),
        Some("arcade") => MovementConfig::arcade(),
        Some("tactical") => MovementConfig::tactical(),
        Some(path) => MovementConfig::from_json_file(Path::new(path))?,
    };
    Ok(config)
}

// ============================================================================
// HELPERS
// ============================================================================

fn forward() -> CharacterInput {
    CharacterInput::moving(Quat::IDENTITY, Vec2::Y)
}

fn horizontal_speed(v: Vec3) -> f32 {
    Vec3::new(v.x, 0.0, v.z).length()
}

fn spawn(
    world: BoxWorld,
    position: Vec3,
    config: &MovementConfig,
) -> Result<Controller, Box<dyn Error>> {
    let motor = SimpleMotor::new(world, position);
    Ok(CharacterController::new(motor, config.clone())?)
}

/// Tick with the current input until `done` or `max_ticks`. Returns ticks run.
fn run_until(
    c: &mut Controller,
    max_ticks: usize,
    mut done: impl FnMut(&Controller) -> bool,
) -> usize {
    for tick in 0..max_ticks {
        c.tick(DT);
        if done(c) {
            return tick + 1;
        }
    }
    max_ticks
}

// ============================================================================
// SCENARIOS
// ============================================================================

fn run_and_stop(config: &MovementConfig) -> Result<(), Box<dyn Error>> {
    let mut c = spawn(BoxWorld::flat(), Vec3::ZERO, config)?;
    c.update_input(forward());
    let ticks = run_until(&mut c, 300, |c| {
        horizontal_speed(c.velocity()) >= c.config().stable_move_speed * 0.99
    });
    log::info!(
        "run: reached {:.2} m/s in {:.2}s",
        horizontal_speed(c.velocity()),
        ticks as f32 * DT
    );

    c.update_input(CharacterInput::default());
    let ticks = run_until(&mut c, 300, |c| horizontal_speed(c.velocity()) < 0.05);
    log::info!("run: stopped in {:.2}s", ticks as f32 * DT);
    Ok(())
}

fn slide(config: &MovementConfig) -> Result<(), Box<dyn Error>> {
    let mut c = spawn(BoxWorld::flat(), Vec3::ZERO, config)?;
    c.update_input(forward());
    run_until(&mut c, 120, |_| false);

    let start = c.motor().position();
    c.update_input(forward().with_crouch(CrouchCommand::Hold));
    c.tick(DT);
    let entry_speed = c.slide_speed();
    let ticks = run_until(&mut c, 600, |c| !c.is_sliding());
    log::info!(
        "slide: entered at {:.2} m/s, lasted {:.2}s over {:.2} m, ended {:?}",
        entry_speed,
        ticks as f32 * DT,
        c.motor().position().distance(start),
        c.stance()
    );

    c.update_input(forward().with_crouch(CrouchCommand::Release));
    c.tick(DT);
    log::info!(
        "slide: released crouch, stance {:?}, momentum {:.2}",
        c.stance(),
        c.state().slide_momentum
    );
    Ok(())
}

fn bunny_hop_chain(config: &MovementConfig) -> Result<(), Box<dyn Error>> {
    let mut c = spawn(BoxWorld::flat(), Vec3::ZERO, config)?;
    c.update_input(forward());
    run_until(&mut c, 120, |_| false);

    for hop in 1..=6 {
        c.update_input(forward().with_jump());
        c.tick(DT);
        let takeoff = horizontal_speed(c.velocity());

        c.update_input(CharacterInput {
            jump_held: true,
            ..forward()
        });
        run_until(&mut c, 240, |c| c.is_grounded());
        log::info!(
            "bhop {}: takeoff {:.2} m/s, landed at {:.2} m/s, window {:.3}s",
            hop,
            takeoff,
            horizontal_speed(c.velocity()),
            c.state().bhop_window
        );
        // Let the landing register before the next press
        c.update_input(forward());
        c.tick(DT);
    }
    Ok(())
}

fn wall_jump(config: &MovementConfig) -> Result<(), Box<dyn Error>> {
    let world = BoxWorld::flat().with_box(Vec3::new(-5.0, 0.0, -3.0), Vec3::new(5.0, 20.0, -2.0));
    let mut c = spawn(world, Vec3::new(0.0, 10.0, 0.0), config)?;
    c.set_velocity(Vec3::new(0.0, 0.0, -6.0));
    c.update_input(forward());

    let ticks = run_until(&mut c, 120, |c| c.is_wall_sliding());
    if !c.is_wall_sliding() {
        log::warn!("wall jump: never reached the wall");
        return Ok(());
    }
    log::info!("wall jump: wall slide after {:.2}s", ticks as f32 * DT);

    run_until(&mut c, 30, |_| false);
    log::info!("wall jump: sliding down at {:.2} m/s", -c.velocity().y);

    c.update_input(forward().with_jump());
    c.tick(DT);
    log::info!("wall jump: launched with {:?}", c.velocity());
    Ok(())
}

fn air_dash(config: &MovementConfig) -> Result<(), Box<dyn Error>> {
    let mut c = spawn(BoxWorld::flat(), Vec3::ZERO, config)?;
    c.update_input(forward());
    run_until(&mut c, 60, |_| false);

    c.update_input(forward().with_jump());
    c.tick(DT);
    c.update_input(forward());
    run_until(&mut c, 10, |_| false);

    let before = horizontal_speed(c.velocity());
    c.update_input(forward().with_dash());
    c.tick(DT);
    log::info!(
        "air dash: {:.2} -> {:.2} m/s, available again: {}",
        before,
        horizontal_speed(c.velocity()),
        c.air_dash_available()
    );

    c.update_input(forward());
    let ticks = run_until(&mut c, 240, |c| c.is_grounded());
    log::info!(
        "air dash: landed after {:.2}s, available: {}",
        ticks as f32 * DT,
        c.air_dash_available()
    );
    Ok(())
}

fn ramp_slide(config: &MovementConfig) -> Result<(), Box<dyn Error>> {
    let mut c = spawn(BoxWorld::slope(20.0), Vec3::ZERO, config)?;
    c.update_input(forward().with_crouch(CrouchCommand::Hold));
    for second in 1..=3 {
        run_until(&mut c, 60, |_| false);
        log::info!(
            "ramp: t={}s sliding={} speed {:.2} m/s, boost {}",
            second,
            c.is_sliding(),
            c.slide_speed(),
            c.ramp_boost_active()
        );
    }
    Ok(())
}

fn knockback(config: &MovementConfig) -> Result<(), Box<dyn Error>> {
    let mut c = spawn(BoxWorld::flat(), Vec3::ZERO, config)?;
    c.tick(DT);
    c.apply_knockback(Vec3::new(1.0, 1.0, 0.0), 20.0);

    let start = c.motor().position();
    let mut peak = start.y;
    let ticks = run_until(&mut c, 600, |c| {
        peak = peak.max(c.motor().position().y);
        c.is_grounded()
    });
    log::info!(
        "knockback: airborne {:.2}s, peak {:.2} m, carried {:.2} m",
        ticks as f32 * DT,
        peak - start.y,
        c.motor().position().distance(start)
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let dump = args.iter().any(|a| a == "--dump-config");
    let source = args.iter().find(|a| !a.starts_with("--")).map(String::as_str);
    let config = load_config(source)?;

    if dump {
        println!("{}", config.to_json_pretty()?);
        return Ok(());
    }

    log::info!("movement_sim: config {}", source.unwrap_or("default"));
    run_and_stop(&config)?;
    slide(&config)?;
    bunny_hop_chain(&config)?;
    wall_jump(&config)?;
    air_dash(&config)?;
    ramp_slide(&config)?;
    knockback(&config)?;
    Ok(())
}
