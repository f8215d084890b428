//! Frame driver
//!
//! The pieces an outer loop needs to run a level: a clock that turns frame
//! timestamps into clamped steps, a source of key snapshots, and a loop
//! that animates a level until it reports finished. Nothing here owns
//! simulation state; results flow back to the caller.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_FRAME_STEP;
use crate::plan::PlanSet;
use crate::sim::{Level, LevelStatus, TickInput};
use crate::ConfigError;

/// Converts frame timestamps (milliseconds) into simulation steps (seconds)
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_time: Option<f64>,
    max_step: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_max_step(MAX_FRAME_STEP)
    }

    /// Clamp each step to `max_step` seconds (long stalls don't become huge jumps)
    pub fn with_max_step(max_step: f32) -> Self {
        Self {
            last_time: None,
            max_step,
        }
    }

    /// Record a frame at `time_ms`; the first frame only starts the clock
    pub fn advance(&mut self, time_ms: f64) -> Option<f32> {
        let step = self.last_time.map(|last| {
            let seconds = ((time_ms - last) / 1000.0) as f32;
            seconds.clamp(0.0, self.max_step)
        });
        self.last_time = Some(time_ms);
        step
    }

    /// Forget the last frame (e.g. when a new level starts)
    pub fn reset(&mut self) {
        self.last_time = None;
    }
}

/// Timestamps for `frames` frames at a fixed rate
pub fn fixed_rate_frames(hz: f64, frames: u64) -> impl Iterator<Item = f64> {
    let interval = 1000.0 / hz;
    (0..frames).map(move |i| i as f64 * interval)
}

/// Supplies the keys held for each frame
pub trait InputSource {
    fn poll(&mut self) -> TickInput;
}

/// The same keys every frame
impl InputSource for TickInput {
    fn poll(&mut self) -> TickInput {
        *self
    }
}

/// Replays a recorded per-frame key script, then holds nothing
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: Vec<TickInput>,
    cursor: usize,
}

impl ScriptedInput {
    pub fn new(frames: Vec<TickInput>) -> Self {
        Self { frames, cursor: 0 }
    }

    /// Hold `input` for `count` more frames
    pub fn hold(mut self, input: TickInput, count: usize) -> Self {
        self.frames.extend(std::iter::repeat_n(input, count));
        self
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> TickInput {
        let input = self.frames.get(self.cursor).copied().unwrap_or_default();
        self.cursor += 1;
        input
    }
}

/// How a level run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelOutcome {
    /// `None` if the frames ran out before the level finished
    pub status: Option<LevelStatus>,
    /// Gems picked up during the run
    pub gems: u32,
    /// Frames consumed
    pub frames: u64,
}

impl LevelOutcome {
    pub fn won(&self) -> bool {
        self.status == Some(LevelStatus::Won)
    }
}

/// Animate `level` once per frame until it finishes or `frames` runs out
///
/// Input is polled once per frame that produces a step.
pub fn run_level(
    level: &mut Level,
    frames: impl IntoIterator<Item = f64>,
    input: &mut impl InputSource,
) -> LevelOutcome {
    let mut clock = FrameClock::new();
    let mut count = 0;

    for time in frames {
        count += 1;
        let Some(step) = clock.advance(time) else {
            continue;
        };
        level.animate(step, &input.poll());
        if level.is_finished() {
            break;
        }
    }

    let outcome = LevelOutcome {
        status: level.is_finished().then(|| level.status()).flatten(),
        gems: level.gems_collected(),
        frames: count,
    };
    log::info!(
        "Level ended: {:?} after {} frames ({} gems)",
        outcome.status,
        outcome.frames,
        outcome.gems
    );
    outcome
}

/// Gems banked across levels
///
/// Passed into each level run and handed back updated, so no counter
/// outlives the loop that owns it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GemTally {
    pub gems: u32,
}

impl GemTally {
    /// Bank the outcome's gems; a lost or unfinished run banks nothing
    pub fn record(self, outcome: &LevelOutcome) -> Self {
        if outcome.won() {
            Self {
                gems: self.gems + outcome.gems,
            }
        } else {
            self
        }
    }
}

/// Build and run level `index` of `plans`, threading the gem tally through
pub fn play_level(
    plans: &PlanSet,
    index: usize,
    tally: GemTally,
    frames: impl IntoIterator<Item = f64>,
    input: &mut impl InputSource,
) -> Result<(LevelOutcome, GemTally), ConfigError> {
    let mut level = plans.build_level(index)?;
    log::debug!("Starting level {} of {}", index + 1, plans.len());
    let outcome = run_level(&mut level, frames, input);
    Ok((outcome, tally.record(&outcome)))
}
