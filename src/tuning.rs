//! Data-driven physics tuning
//!
//! Every constant the simulation integrates with lives here so alternate
//! levels can ship their own feel. Defaults come from `crate::consts`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;
use crate::consts::*;

/// Physics and pacing constants used by a level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Longest sub-step an update may integrate (seconds)
    pub max_step: f32,

    // === Player ===
    /// Horizontal run speed
    pub player_speed: f32,
    /// Downward acceleration
    pub gravity: f32,
    /// Upward velocity on jump
    pub jump_speed: f32,
    /// Horizontal jump applied when landing on a portal tile
    pub portal_offset: f32,

    // === Pickups ===
    /// Bob speed (radians/s)
    pub wobble_speed: f32,
    /// Bob amplitude (tiles)
    pub wobble_dist: f32,

    // === Lava ===
    pub lava_horizontal_speed: f32,
    pub lava_vertical_speed: f32,
    pub lava_drip_speed: f32,

    /// Seconds between the win/loss and the level reporting finished
    pub finish_delay: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_step: MAX_STEP,

            player_speed: PLAYER_X_SPEED,
            gravity: GRAVITY,
            jump_speed: JUMP_SPEED,
            portal_offset: PORTAL_OFFSET,

            wobble_speed: WOBBLE_SPEED,
            wobble_dist: WOBBLE_DIST,

            lava_horizontal_speed: LAVA_HORIZONTAL_SPEED,
            lava_vertical_speed: LAVA_VERTICAL_SPEED,
            lava_drip_speed: LAVA_DRIP_SPEED,

            finish_delay: FINISH_DELAY,
        }
    }
}

impl Tuning {
    /// Reject values the simulation cannot integrate with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.max_step.is_finite() && self.max_step > 0.0) {
            return Err(ConfigError::tuning(format!(
                "max_step must be positive, got {}",
                self.max_step
            )));
        }

        let non_negative = [
            ("player_speed", self.player_speed),
            ("gravity", self.gravity),
            ("jump_speed", self.jump_speed),
            ("wobble_speed", self.wobble_speed),
            ("wobble_dist", self.wobble_dist),
            ("lava_horizontal_speed", self.lava_horizontal_speed),
            ("lava_vertical_speed", self.lava_vertical_speed),
            ("lava_drip_speed", self.lava_drip_speed),
            ("finish_delay", self.finish_delay),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::tuning(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }

        // Portals may throw the player either way
        if !self.portal_offset.is_finite() {
            return Err(ConfigError::tuning("portal_offset must be finite"));
        }

        Ok(())
    }

    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }
}
