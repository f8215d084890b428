//! Dynamic entities
//!
//! Every actor shares a bounding box (`pos` is the top-left corner) and a
//! variant-specific `Body`. Per-tick behaviour lives in `tick.rs`.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::boxes_overlap;
use crate::Tuning;

/// Stable actor handle, assigned in spawn order
pub type ActorId = u32;

/// Player box extents (taller than one tile)
pub const PLAYER_SIZE: Vec2 = Vec2::new(0.8, 1.5);
/// Player spawns raised so its feet sit on the cell floor
pub const PLAYER_OFFSET: Vec2 = Vec2::new(0.0, -0.5);
/// Coin/gem box extents
pub const PICKUP_SIZE: Vec2 = Vec2::new(0.6, 0.6);
/// Coin/gem spawn offset (roughly centered in the cell)
pub const PICKUP_OFFSET: Vec2 = Vec2::new(0.2, 0.1);
/// Moving lava fills a whole cell
pub const LAVA_SIZE: Vec2 = Vec2::new(1.0, 1.0);

/// Variant tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorKind {
    Player,
    Coin,
    Gem,
    Lava,
}

impl ActorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActorKind::Player => "player",
            ActorKind::Coin => "coin",
            ActorKind::Gem => "gem",
            ActorKind::Lava => "lava",
        }
    }
}

/// How a lava actor moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LavaMotion {
    /// Bounces left and right
    Horizontal,
    /// Bounces up and down
    Vertical,
    /// Falls and restarts from its spawn cell when blocked
    Drip,
}

/// What a plan character spawns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Spawn {
    Player,
    Coin,
    Gem,
    Lava(LavaMotion),
}

impl Spawn {
    /// Kind of actor this spawns
    pub fn kind(self) -> ActorKind {
        match self {
            Spawn::Player => ActorKind::Player,
            Spawn::Coin => ActorKind::Coin,
            Spawn::Gem => ActorKind::Gem,
            Spawn::Lava(_) => ActorKind::Lava,
        }
    }
}

/// Bobbing state shared by coins and gems
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wobble {
    /// Anchor the bob oscillates around (never changes)
    pub base_pos: Vec2,
    /// Oscillation phase (radians)
    pub phase: f32,
}

/// Variant-specific state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Body {
    Player {
        vel: Vec2,
    },
    Coin(Wobble),
    Gem(Wobble),
    Lava {
        vel: Vec2,
        /// Drip lava only: where to restart after hitting something
        repeat_pos: Option<Vec2>,
    },
}

/// A dynamic entity in the level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub pos: Vec2,
    pub size: Vec2,
    pub body: Body,
}

impl Actor {
    /// Player standing in the cell at `tile`
    pub fn player(id: ActorId, tile: Vec2) -> Self {
        Self {
            id,
            pos: tile + PLAYER_OFFSET,
            size: PLAYER_SIZE,
            body: Body::Player { vel: Vec2::ZERO },
        }
    }

    /// Coin in the cell at `tile` with the given bob phase
    pub fn coin(id: ActorId, tile: Vec2, phase: f32) -> Self {
        let base_pos = tile + PICKUP_OFFSET;
        Self {
            id,
            pos: base_pos,
            size: PICKUP_SIZE,
            body: Body::Coin(Wobble { base_pos, phase }),
        }
    }

    /// Gem in the cell at `tile` with the given bob phase
    pub fn gem(id: ActorId, tile: Vec2, phase: f32) -> Self {
        let base_pos = tile + PICKUP_OFFSET;
        Self {
            id,
            pos: base_pos,
            size: PICKUP_SIZE,
            body: Body::Gem(Wobble { base_pos, phase }),
        }
    }

    /// Moving lava in the cell at `tile`
    pub fn lava(id: ActorId, tile: Vec2, motion: LavaMotion, tuning: &Tuning) -> Self {
        let (vel, repeat_pos) = match motion {
            LavaMotion::Horizontal => (Vec2::new(tuning.lava_horizontal_speed, 0.0), None),
            LavaMotion::Vertical => (Vec2::new(0.0, tuning.lava_vertical_speed), None),
            LavaMotion::Drip => (Vec2::new(0.0, tuning.lava_drip_speed), Some(tile)),
        };
        Self {
            id,
            pos: tile,
            size: LAVA_SIZE,
            body: Body::Lava { vel, repeat_pos },
        }
    }

    /// Spawn whatever `spawn` describes; pickups draw their phase from `rng`
    pub fn spawn(spawn: Spawn, id: ActorId, tile: Vec2, tuning: &Tuning, rng: &mut impl Rng) -> Self {
        match spawn {
            Spawn::Player => Self::player(id, tile),
            Spawn::Coin => Self::coin(id, tile, random_phase(rng)),
            Spawn::Gem => Self::gem(id, tile, random_phase(rng)),
            Spawn::Lava(motion) => Self::lava(id, tile, motion, tuning),
        }
    }

    pub fn kind(&self) -> ActorKind {
        match self.body {
            Body::Player { .. } => ActorKind::Player,
            Body::Coin(_) => ActorKind::Coin,
            Body::Gem(_) => ActorKind::Gem,
            Body::Lava { .. } => ActorKind::Lava,
        }
    }

    /// Current velocity (zero for pickups)
    pub fn velocity(&self) -> Vec2 {
        match self.body {
            Body::Player { vel } | Body::Lava { vel, .. } => vel,
            Body::Coin(_) | Body::Gem(_) => Vec2::ZERO,
        }
    }

    /// Strict box overlap; shared edges don't count
    pub fn overlaps(&self, other: &Actor) -> bool {
        boxes_overlap(self.pos, self.size, other.pos, other.size)
    }
}

/// Pickups start at different phases so they don't bob in lockstep
fn random_phase(rng: &mut impl Rng) -> f32 {
    rng.random_range(0.0..std::f32::consts::TAU)
}
