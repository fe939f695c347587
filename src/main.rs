//! Void Runner headless runner
//!
//! Plays one scripted session and prints the final frame as JSON.
//!
//! Usage: `void-runner [tuning.json] [seed]`

use std::process::ExitCode;

use glam::Vec2;
use void_runner::Tuning;
use void_runner::consts::{MAX_SUBSTEPS, SIM_DT};
use void_runner::sim::{GameStatus, SimulationLoop, TickInput};

/// Stop after this much simulated time even if the ship survives
const MAX_FRAMES: u64 = 60 * 60 * 5;
/// Host frame time fed to the accumulator (a 50 Hz display)
const HOST_DT: f32 = 0.02;

fn main() -> ExitCode {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => match Tuning::load(&path) {
            Ok(t) => t,
            Err(e) => {
                log::error!("Failed to load tuning from {path}: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => Tuning::default(),
    };
    let seed = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            log::error!("Invalid seed: {e}");
            return ExitCode::FAILURE;
        }
        None => 0x5EED,
    };

    log::info!("Void Runner (headless) starting with seed {seed}");

    let mut sim = SimulationLoop::new(tuning, seed);
    sim.start_game();

    let mut accumulator = 0.0f32;
    let mut fired = 0u32;
    let mut hits = 0u32;

    while sim.state().status() == GameStatus::Playing && sim.frame() < MAX_FRAMES {
        accumulator += HOST_DT;

        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let t = sim.elapsed() as f32;
            let input = TickInput {
                pointer: Vec2::new((t * 0.7).sin(), (t * 1.3).sin() * 0.6),
                fire: true,
            };
            let report = sim.tick(&input, SIM_DT);
            fired += u32::from(report.fired);
            hits += report.hazards.destroyed;
            accumulator -= SIM_DT;
            substeps += 1;
        }

        for event in sim.drain_events() {
            log::trace!("{event:?}");
        }
    }

    // Survived the frame cap
    if sim.state().is_playing() {
        sim.end_game();
    }

    log::info!(
        "Finished after {} frames ({:.1}s): {fired} shots, {hits} hazards destroyed",
        sim.frame(),
        sim.elapsed()
    );

    match serde_json::to_string_pretty(&sim.snapshot()) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Failed to serialize snapshot: {e}");
            ExitCode::FAILURE
        }
    }
}
