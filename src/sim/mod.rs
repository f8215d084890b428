//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time is integrated in bounded sub-steps only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, input or scheduling dependencies

pub mod actor;
pub mod collision;
pub mod state;
pub mod tick;
pub mod tile;

pub use actor::{Actor, ActorId, ActorKind, Body, LavaMotion, Spawn, Wobble};
pub use collision::{boxes_overlap, obstacle_at};
pub use state::{Level, LevelBuilder, LevelStatus, Touch};
pub use tick::{TickInput, TileContacts, sub_steps};
pub use tile::{TileGrid, TileKind};
