//! Lava Run headless runner
//!
//! Plays every level of a plan set with the right arrow held at a fixed
//! frame rate and prints each outcome as JSON. Rendering and keyboard
//! capture are left to a front end.
//!
//! Usage: `lava-run [plans.json]`

use lava_run::ConfigError;
use lava_run::driver::{GemTally, LevelOutcome, fixed_rate_frames, play_level};
use lava_run::plan::{PlanSet, default_plans};
use lava_run::sim::TickInput;

/// Simulated display refresh rate
const FRAME_RATE: f64 = 60.0;
/// Give up on a level after a minute of simulated time
const MAX_FRAMES_PER_LEVEL: u64 = 60 * 60;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Lava Run (headless) starting...");

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), ConfigError> {
    let plans = match std::env::args().nth(1) {
        Some(path) => PlanSet::load(&path)?,
        None => {
            log::info!("No plan file given, using built-in levels");
            default_plans()
        }
    };

    for (ch, role) in plans.char_map.iter() {
        log::debug!("Legend {:?} => {}", ch, role.name());
    }

    let mut tally = GemTally::default();
    let mut outcomes: Vec<LevelOutcome> = Vec::with_capacity(plans.len());

    for index in 0..plans.len() {
        let mut input = TickInput {
            right: true,
            ..Default::default()
        };
        let frames = fixed_rate_frames(FRAME_RATE, MAX_FRAMES_PER_LEVEL);
        let (outcome, next) = play_level(&plans, index, tally, frames, &mut input)?;
        log::info!(
            "Level {}: {:?} ({} gems banked so far)",
            index + 1,
            outcome.status,
            next.gems
        );
        tally = next;
        outcomes.push(outcome);
    }

    println!("{}", serde_json::to_string_pretty(&outcomes)?);
    log::info!("Finished {} levels with {} gems", outcomes.len(), tally.gems);
    Ok(())
}
