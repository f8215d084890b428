//! Level state and construction
//!
//! A `Level` owns the tile grid, the live actors and the win/lose state.
//! It is built once from a plan and mutated only by `animate` and
//! `player_touched`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorId, ActorKind};
use super::collision::obstacle_at;
use super::tile::{TileGrid, TileKind};
use crate::consts::DEFAULT_SEED;
use crate::plan::{CharMap, Role};
use crate::{ConfigError, Tuning};

/// Terminal outcome of a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelStatus {
    Won,
    Lost,
}

/// Something the player ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Touch {
    Tile(TileKind),
    /// A live actor; its own kind decides the effect
    Actor(ActorId),
}

/// Builds a level with non-default tuning or seed
#[derive(Debug, Clone)]
pub struct LevelBuilder {
    tuning: Tuning,
    seed: u64,
}

impl Default for LevelBuilder {
    fn default() -> Self {
        Self {
            tuning: Tuning::default(),
            seed: DEFAULT_SEED,
        }
    }
}

impl LevelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tuning(mut self, tuning: Tuning) -> Self {
        self.tuning = tuning;
        self
    }

    /// Seed for the pickups' starting phases
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Parse `plan` with `char_map` into a level
    ///
    /// Every row must have the same number of characters, every character
    /// must have a role, and exactly one character must spawn a player.
    pub fn build<S: AsRef<str>>(self, plan: &[S], char_map: &CharMap) -> Result<Level, ConfigError> {
        self.tuning.validate()?;

        let width = plan.first().map(|row| row.as_ref().chars().count()).unwrap_or(0);
        if width == 0 {
            return Err(ConfigError::EmptyPlan);
        }
        let height = plan.len();

        let mut rng = Pcg32::seed_from_u64(self.seed);
        let mut tiles = Vec::with_capacity(width * height);
        let mut actors = Vec::new();
        let mut next_id: ActorId = 1;

        for (y, row) in plan.iter().enumerate() {
            let row = row.as_ref();
            let found = row.chars().count();
            if found != width {
                return Err(ConfigError::RaggedRow {
                    row: y,
                    expected: width,
                    found,
                });
            }

            for (x, ch) in row.chars().enumerate() {
                match char_map.role(ch) {
                    Some(Role::Spawn(spawn)) => {
                        let tile = Vec2::new(x as f32, y as f32);
                        actors.push(Actor::spawn(spawn, next_id, tile, &self.tuning, &mut rng));
                        next_id += 1;
                        tiles.push(TileKind::Empty);
                    }
                    Some(Role::Tile(kind)) => tiles.push(kind),
                    None => {
                        return Err(ConfigError::UnmappedChar {
                            ch,
                            row: y,
                            column: x,
                        });
                    }
                }
            }
        }

        let mut players = actors.iter().filter(|a| a.kind() == ActorKind::Player);
        let player_id = match (players.next(), players.count()) {
            (Some(player), 0) => player.id,
            (None, _) => return Err(ConfigError::MissingPlayer),
            (Some(_), extra) => {
                return Err(ConfigError::MultiplePlayers { count: extra + 1 });
            }
        };

        log::debug!(
            "Built {}x{} level with {} actors (seed {})",
            width,
            height,
            actors.len(),
            self.seed
        );

        let mut level = Level {
            grid: TileGrid::new(width, height, tiles),
            actors,
            player_index: 0,
            player_id,
            status: None,
            finish_delay: 0.0,
            gems_collected: 0,
            tuning: self.tuning,
            pending_removals: Vec::new(),
        };
        level.locate_player();
        Ok(level)
    }
}

/// A single playable level
#[derive(Debug, Clone)]
pub struct Level {
    pub(super) grid: TileGrid,
    /// Live actors in spawn order
    pub(super) actors: Vec<Actor>,
    /// Index of the player in `actors` (refreshed whenever actors are removed)
    player_index: usize,
    player_id: ActorId,
    pub(super) status: Option<LevelStatus>,
    pub(super) finish_delay: f32,
    gems_collected: u32,
    pub(super) tuning: Tuning,
    /// Actors picked up during the current sub-step; dropped when it ends
    pending_removals: Vec<ActorId>,
}

impl Level {
    /// Build a level with default tuning and seed
    pub fn new<S: AsRef<str>>(plan: &[S], char_map: &CharMap) -> Result<Self, ConfigError> {
        LevelBuilder::new().build(plan, char_map)
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Live actors in spawn order
    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    /// The level's one player
    pub fn player(&self) -> &Actor {
        &self.actors[self.player_index]
    }

    pub fn status(&self) -> Option<LevelStatus> {
        self.status
    }

    /// Seconds left before the level counts as finished (only meaningful once status is set)
    pub fn finish_delay(&self) -> f32 {
        self.finish_delay
    }

    /// Won or lost, and the post-game delay has run out
    pub fn is_finished(&self) -> bool {
        self.status.is_some() && self.finish_delay < 0.0
    }

    /// Gems the player picked up in this level
    pub fn gems_collected(&self) -> u32 {
        self.gems_collected
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Coins still waiting to be collected
    pub fn coins_remaining(&self) -> usize {
        self.live_actors().filter(|a| a.kind() == ActorKind::Coin).count()
    }

    /// First obstacle overlapped by a box at `pos` with extents `size`
    pub fn obstacle_at(&self, pos: Vec2, size: Vec2) -> Option<TileKind> {
        obstacle_at(&self.grid, pos, size)
    }

    /// First live actor (in spawn order) overlapping `actor`, other than itself
    pub fn actor_at(&self, actor: &Actor) -> Option<&Actor> {
        self.live_actors()
            .find(|other| other.id != actor.id && actor.overlaps(other))
    }

    /// Resolve the player running into something
    ///
    /// Lava (tile or actor) loses the level; coins and gems are picked up.
    /// Touching a coin or gem removes it right away. Ids that are not live
    /// and the player's own id are ignored.
    pub fn player_touched(&mut self, touch: Touch) {
        self.resolve_touch(touch);
        self.apply_removals();
    }

    /// `player_touched` without flushing removals, for use mid-pass
    pub(super) fn resolve_touch(&mut self, touch: Touch) {
        match touch {
            Touch::Tile(TileKind::Lava) => self.finish(LevelStatus::Lost),
            Touch::Tile(_) => {}
            Touch::Actor(id) => self.touch_actor(id),
        }
    }

    fn touch_actor(&mut self, id: ActorId) {
        let Some(kind) = self.live_actors().find(|a| a.id == id).map(Actor::kind) else {
            return;
        };
        match kind {
            ActorKind::Lava => self.finish(LevelStatus::Lost),
            ActorKind::Coin => {
                self.pending_removals.push(id);
                if self.coins_remaining() == 0 {
                    self.finish(LevelStatus::Won);
                }
            }
            ActorKind::Gem => {
                self.pending_removals.push(id);
                self.gems_collected += 1;
                log::debug!("Gem {} collected ({} this level)", id, self.gems_collected);
            }
            ActorKind::Player => {}
        }
    }

    /// Drop actors picked up since the last flush
    pub(super) fn apply_removals(&mut self) {
        if self.pending_removals.is_empty() {
            return;
        }
        let pending = std::mem::take(&mut self.pending_removals);
        self.actors.retain(|a| !pending.contains(&a.id));
        self.locate_player();
    }

    /// Set the terminal status once; later calls are ignored
    fn finish(&mut self, status: LevelStatus) {
        if self.status.is_none() {
            log::info!("Level {:?}", status);
            self.status = Some(status);
            self.finish_delay = self.tuning.finish_delay;
        }
    }

    fn live_actors(&self) -> impl Iterator<Item = &Actor> {
        self.actors
            .iter()
            .filter(|a| !self.pending_removals.contains(&a.id))
    }

    /// Only coins and gems are ever removed, so the player is always found
    fn locate_player(&mut self) {
        let player_id = self.player_id;
        if let Some(index) = self.actors.iter().position(|a| a.id == player_id) {
            self.player_index = index;
        }
    }
}
