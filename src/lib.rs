//! Lava Run - tile-based platformer simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tile grid, actors, collisions, level state)
//! - `plan`: Level plans and the character-to-role vocabulary
//! - `tuning`: Data-driven physics constants
//! - `driver`: Frame clock, input sources and the per-level run loop

pub mod driver;
pub mod error;
pub mod plan;
pub mod sim;
pub mod tuning;

pub use error::ConfigError;
pub use plan::{CharMap, PlanSet, Role};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Longest slice of time a single actor update may integrate
    pub const MAX_STEP: f32 = 0.05;
    /// Upper bound on a frame step handed to the simulation (seconds)
    pub const MAX_FRAME_STEP: f32 = 0.1;

    /// Player horizontal speed (tiles/s)
    pub const PLAYER_X_SPEED: f32 = 7.0;
    /// Downward acceleration (tiles/s²)
    pub const GRAVITY: f32 = 40.0;
    /// Upward velocity applied on jump
    pub const JUMP_SPEED: f32 = 28.0;
    /// Horizontal distance a portal tile throws the player
    pub const PORTAL_OFFSET: f32 = 15.0;

    /// Coin/gem bob speed (radians/s)
    pub const WOBBLE_SPEED: f32 = 8.0;
    /// Coin/gem bob amplitude (tiles)
    pub const WOBBLE_DIST: f32 = 0.07;

    /// Seconds the level keeps running after it is won or lost
    pub const FINISH_DELAY: f32 = 1.0;

    /// Lava speeds by motion pattern (tiles/s)
    pub const LAVA_HORIZONTAL_SPEED: f32 = 2.0;
    pub const LAVA_VERTICAL_SPEED: f32 = 2.0;
    pub const LAVA_DRIP_SPEED: f32 = 3.0;

    /// Seed used when a level is built without an explicit one
    pub const DEFAULT_SEED: u64 = 0x1A7A_2024;
}
