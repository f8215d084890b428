//! Per-frame simulation tick
//!
//! `Level::animate` slices a frame's elapsed time into sub-steps no longer
//! than `Tuning::max_step` and updates every actor once per sub-step, so
//! nothing moves far enough in one update to skip over a tile.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorKind, Body, Wobble};
use super::collision::obstacle_at;
use super::state::{Level, LevelStatus, Touch};
use super::tile::{TileGrid, TileKind};
use crate::Tuning;

/// Keys held during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
}

/// Tiles the player bumped into during one update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TileContacts {
    /// Whatever blocked horizontal movement
    pub horizontal: Option<TileKind>,
    /// Lava met while moving vertically (other tiles are handled in place)
    pub vertical: Option<TileKind>,
}

impl TileContacts {
    pub fn iter(&self) -> impl Iterator<Item = TileKind> {
        self.horizontal.into_iter().chain(self.vertical)
    }
}

/// Split `step` into consecutive slices of at most `max_step`
///
/// `sub_steps(0.12, 0.05)` yields 0.05, 0.05, then the 0.02 remainder.
/// Zero, negative and NaN steps yield nothing.
pub fn sub_steps(step: f32, max_step: f32) -> impl Iterator<Item = f32> {
    let mut remaining = if step > 0.0 { step } else { 0.0 };
    std::iter::from_fn(move || {
        if remaining > 0.0 {
            let slice = remaining.min(max_step);
            remaining -= slice;
            Some(slice)
        } else {
            None
        }
    })
}

impl Level {
    /// Advance the level by `step` seconds with the given keys held
    pub fn animate(&mut self, step: f32, input: &TickInput) {
        let step = if step > 0.0 { step } else { 0.0 };

        // Keep running for a moment after the outcome is decided
        if self.status.is_some() {
            self.finish_delay -= step;
        }

        for slice in sub_steps(step, self.tuning.max_step) {
            self.sub_step(slice, input);
        }
    }

    /// Update every actor once
    ///
    /// Pickups collected here stay in `actors` (but are ignored by queries)
    /// until every actor has had its turn.
    fn sub_step(&mut self, step: f32, input: &TickInput) {
        for index in 0..self.actors.len() {
            let mut actor = self.actors[index].clone();
            let contacts = actor.update(step, &self.grid, input, &self.tuning);

            if actor.kind() == ActorKind::Player {
                for tile in contacts.iter() {
                    self.resolve_touch(Touch::Tile(tile));
                }
                let touched = self.actor_at(&actor).map(|other| Touch::Actor(other.id));
                if let Some(touch) = touched {
                    self.resolve_touch(touch);
                }
                if self.status == Some(LevelStatus::Lost) {
                    sink(&mut actor, step);
                }
            }

            self.actors[index] = actor;
        }
        self.apply_removals();
    }
}

impl Actor {
    /// Move this actor through one sub-step
    ///
    /// Only the player reports contacts; the level decides what they mean.
    pub fn update(
        &mut self,
        step: f32,
        grid: &TileGrid,
        input: &TickInput,
        tuning: &Tuning,
    ) -> TileContacts {
        match &mut self.body {
            Body::Lava { vel, repeat_pos } => {
                let target = self.pos + *vel * step;
                if obstacle_at(grid, target, self.size).is_none() {
                    self.pos = target;
                } else if let Some(origin) = repeat_pos {
                    self.pos = *origin;
                } else {
                    *vel = -*vel;
                }
                TileContacts::default()
            }
            Body::Coin(wobble) | Body::Gem(wobble) => {
                self.pos = bob(wobble, step, tuning);
                TileContacts::default()
            }
            Body::Player { vel } => {
                let mut contacts = TileContacts::default();

                // Horizontal: speed comes straight from the keys
                vel.x = 0.0;
                if input.left {
                    vel.x -= tuning.player_speed;
                }
                if input.right {
                    vel.x += tuning.player_speed;
                }
                let target = self.pos + Vec2::new(vel.x * step, 0.0);
                match obstacle_at(grid, target, self.size) {
                    Some(tile) => contacts.horizontal = Some(tile),
                    None => self.pos = target,
                }

                // Vertical: gravity always accumulates
                vel.y += step * tuning.gravity;
                let target = self.pos + Vec2::new(0.0, vel.y * step);
                match obstacle_at(grid, target, self.size) {
                    Some(TileKind::Lava) => contacts.vertical = Some(TileKind::Lava),
                    Some(TileKind::PortalIn) => self.pos += Vec2::new(tuning.portal_offset, 0.0),
                    Some(_) if input.up && vel.y > 0.0 => vel.y = -tuning.jump_speed,
                    Some(_) => vel.y = 0.0,
                    None => self.pos = target,
                }

                contacts
            }
        }
    }
}

/// Advance a pickup's bob and return its new position
fn bob(wobble: &mut Wobble, step: f32, tuning: &Tuning) -> Vec2 {
    wobble.phase += step * tuning.wobble_speed;
    wobble.base_pos + Vec2::new(0.0, wobble.phase.sin() * tuning.wobble_dist)
}

/// Death animation: the player melts into whatever killed it
fn sink(player: &mut Actor, step: f32) {
    player.pos.y += step;
    player.size.y = (player.size.y - step).max(0.0);
}
