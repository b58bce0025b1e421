//! Headless driver
//!
//! Usage: `particle-sim [mode | config.json] [frames] [seed]`
//!
//! Runs the simulation at a fixed 60 Hz with a scripted pointer and logs a
//! summary once per simulated second. Set `RUST_LOG=debug` for per-frame detail.

use particle_sim::platform::{Clock, FixedClock, InputSource, ScriptedPointer};
use particle_sim::renderer::build_batch;
use particle_sim::sim::{SimState, StepInput, step};
use particle_sim::{SimConfig, SimError, SimMode};

const DEFAULT_FRAMES: u64 = 600;
const DEFAULT_SEED: u64 = 0x5EED;
const FRAME_DT: f32 = 1.0 / 60.0;

fn load_config(arg: Option<&str>) -> Result<SimConfig, SimError> {
    match arg {
        None => Ok(SimConfig::default()),
        Some(name) => match SimMode::from_str(name) {
            Some(mode) => Ok(SimConfig::from_mode(mode)),
            None => SimConfig::load(name),
        },
    }
}

fn run() -> Result<(), SimError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut config = load_config(args.first().map(String::as_str))?;
    let frames = args
        .get(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_FRAMES);
    let seed = args
        .get(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SEED);

    let mut clock = FixedClock::new(FRAME_DT);
    let mut pointer = ScriptedPointer::new(0.6, 0.02, 16.0 / 9.0);
    config.spawn.aspect_ratio = pointer.viewport_aspect_ratio();
    config.auto_reseed = true;

    let mut state = SimState::new(config, seed)?;
    log::info!(
        "Running {} mode for {} frames with seed {}",
        state.config.mode.as_str(),
        frames,
        seed
    );

    let mut expired = 0;
    let mut collisions = 0;
    for _ in 0..frames {
        let input = StepInput {
            pointer: pointer.pointer_position(),
            ..Default::default()
        };
        let snapshot = step(&mut state, &input, clock.elapsed_seconds());
        pointer.advance();

        expired += snapshot.expired;
        collisions += snapshot.collisions;

        if snapshot.frame % 60 == 0 {
            let batch = build_batch(&snapshot);
            log::info!(
                "t={:.1}s alive={} expired={} collisions={} upload={}B",
                snapshot.time,
                snapshot.particles.len(),
                expired,
                collisions,
                batch.disk_bytes().len() + batch.line_bytes().len()
            );
        }
    }

    println!(
        "{} frames: {} alive, {} expired, {} collisions",
        state.frame,
        state.alive(),
        expired,
        collisions
    );
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Particle Sim (headless) starting...");

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
