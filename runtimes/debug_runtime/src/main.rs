// Debug Runtime - headless scripted driver for the locomotion stack
//
// Runs the full game loop without a display or tracked hardware, feeding a
// scripted input sequence (walk, snap turns, aim, teleport) so automation
// and humans alike can validate locomotion behavior from the command line.

use std::time::Duration;

use anyhow::bail;
use cgmath::{vec2, vec3, Deg, InnerSpace, Quaternion, Rotation3, Vector3};
use clap::Parser;
use tracing::info;

use archvr::{
    curve::{CurveKey, FloatCurve},
    input_context::InputContext,
    scenes::DemoLevelBuilder,
    time::Time,
    Game, GameOptions,
};

#[derive(Parser)]
#[command(name = "debug_runtime")]
#[command(about = "Headless scripted runtime for locomotion testing and automation")]
struct Args {
    /// Total simulated time, e.g. "6s" or "250ms"
    #[arg(short, long, default_value = "6s", value_parser = humantime::parse_duration)]
    duration: Duration,

    /// Fixed timestep in milliseconds
    #[arg(short, long, default_value = "16")]
    timestep_ms: u64,

    /// Tuning overrides (JSON GameOptions)
    #[arg(short, long)]
    options: Option<String>,

    /// Vignette radius-vs-speed curve asset (JSON)
    #[arg(short, long)]
    curve: Option<String>,

    /// Spawn position as "x,y,z"
    #[arg(short, long)]
    spawn: Option<String>,

    /// Interval between state log lines, e.g. "500ms"
    #[arg(long, default_value = "500ms", value_parser = humantime::parse_duration)]
    log_interval: Duration,
}

fn parse_spawn(spawn: &str) -> anyhow::Result<Vector3<f32>> {
    let parts: Vec<&str> = spawn.split(',').collect();
    if parts.len() != 3 {
        bail!("unable to parse spawn position: {}", spawn);
    }
    let x = parts[0].trim().parse::<f32>()?;
    let y = parts[1].trim().parse::<f32>()?;
    let z = parts[2].trim().parse::<f32>()?;
    Ok(vec3(x, y, z))
}

/// Fallback vignette curve when no asset is given: wide open at rest,
/// tightening toward full speed.
fn default_blinker_curve() -> FloatCurve {
    FloatCurve::new(vec![
        CurveKey {
            time: 0.0,
            value: 0.9,
        },
        CurveKey {
            time: 0.5,
            value: 0.7,
        },
        CurveKey {
            time: 2.5,
            value: 0.35,
        },
    ])
}

/// Scripted input for the demo scenario.
///
/// 0-2s   walk forward
/// 2-3s   two snap turns to the right
/// 3-4.5s aim the teleport arc
/// 4.5s   release, teleport fires after the fade
fn scripted_input(t: f32) -> InputContext {
    let mut input = InputContext::neutral();
    input.head.position = vec3(0.0, 1.6, 0.0);

    if t < 2.0 {
        input.left_hand.thumbstick = vec2(0.0, 1.0);
    } else if t < 3.0 {
        // Two stick pulses with a return to center between them.
        let phase = (t - 2.0) % 0.5;
        input.right_hand.thumbstick = vec2(if phase < 0.25 { 1.0 } else { 0.0 }, 0.0);
    } else if t < 4.5 {
        input.right_hand.position = vec3(0.2, 1.2, -0.1);
        input.right_hand.rotation = Quaternion::from_angle_x(Deg(-35.0));
        input.right_hand.trigger_value = 1.0;
    }

    input
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "debug_runtime=info,archvr=info".into()),
        )
        .init();
    engine::logging::init_logging("ARCHVR_LOG");

    let args = Args::parse();

    let mut options = match args.options.as_deref() {
        Some(path) => GameOptions::from_json_file(std::path::Path::new(path))
            .unwrap_or_else(GameOptions::default),
        None => GameOptions::default(),
    };
    if let Some(spawn) = args.spawn.as_deref() {
        options.spawn_position = parse_spawn(spawn)?;
    }
    if options.blinker_curve.is_none() {
        options.blinker_curve = match args.curve.as_deref() {
            Some(path) => FloatCurve::from_json_file(std::path::Path::new(path)),
            None => Some(default_blinker_curve()),
        };
    }

    info!(
        "starting scripted run: {:?} at {} ms per frame",
        args.duration, args.timestep_ms
    );

    let level = DemoLevelBuilder::new()
        .with_default_floor()
        .with_platform(vec3(0.0, 0.5, -6.0), 1.5, 1.5)
        .build();
    let mut game = Game::init(options, Box::new(level.physics), Box::new(level.navmesh));

    let dt = Duration::from_millis(args.timestep_ms.max(1));
    let mut total = Duration::ZERO;
    let mut next_log = Duration::ZERO;

    while total < args.duration {
        total += dt;
        let time = Time { elapsed: dt, total };
        let input = scripted_input(total.as_secs_f32());

        game.update(&time, &input);

        if total >= next_log {
            next_log += args.log_interval;
            let position = game.player_position();
            info!(
                "t={:.2}s position=({:.2}, {:.2}, {:.2}) fade={:.2} target_valid={} scene_objects={}",
                total.as_secs_f32(),
                position.x,
                position.y,
                position.z,
                game.fade_alpha(),
                game.teleport().has_valid_target(),
                game.render().len(),
            );
        }
    }

    let position = game.player_position();
    let distance = (position - vec3(0.0, position.y, 0.0)).magnitude();
    info!(
        "run complete: final position ({:.2}, {:.2}, {:.2}), {:.2} m from origin",
        position.x, position.y, position.z, distance
    );

    Ok(())
}
