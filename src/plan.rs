//! Level plans and the character vocabulary used to read them
//!
//! A plan is a list of equal-length rows. Each character is looked up in a
//! `CharMap` to decide whether it spawns an actor or places a tile.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_SEED;
use crate::sim::{LavaMotion, Level, LevelBuilder, Spawn, TileKind};
use crate::{ConfigError, Tuning};

/// What a plan character stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// A static tile (`Empty` reserves the character as blank space)
    Tile(TileKind),
    /// An actor spawned in that cell over an empty tile
    Spawn(Spawn),
}

impl Role {
    /// Short name for legends and logs
    pub fn name(&self) -> &'static str {
        match self {
            Role::Tile(kind) => kind.as_str(),
            Role::Spawn(spawn) => spawn.kind().as_str(),
        }
    }
}

/// Character-to-role table
///
/// Serialized as a JSON object keyed by single characters, e.g.
/// `{ "#": { "tile": "wall" }, "v": { "spawn": { "lava": "drip" } } }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharMap {
    roles: BTreeMap<char, Role>,
}

impl Default for CharMap {
    fn default() -> Self {
        Self::empty()
            .with(' ', Role::Tile(TileKind::Empty))
            .with('.', Role::Tile(TileKind::Empty))
            .with('x', Role::Tile(TileKind::Wall))
            .with('!', Role::Tile(TileKind::Lava))
            .with('a', Role::Tile(TileKind::PortalIn))
            .with('@', Role::Spawn(Spawn::Player))
            .with('o', Role::Spawn(Spawn::Coin))
            .with('g', Role::Spawn(Spawn::Gem))
            .with('=', Role::Spawn(Spawn::Lava(LavaMotion::Horizontal)))
            .with('|', Role::Spawn(Spawn::Lava(LavaMotion::Vertical)))
            .with('v', Role::Spawn(Spawn::Lava(LavaMotion::Drip)))
    }
}

impl CharMap {
    /// A map with no characters at all
    pub fn empty() -> Self {
        Self {
            roles: BTreeMap::new(),
        }
    }

    /// Builder-style `insert`
    pub fn with(mut self, ch: char, role: Role) -> Self {
        self.insert(ch, role);
        self
    }

    /// Assign `role` to `ch`, returning the role it replaces
    pub fn insert(&mut self, ch: char, role: Role) -> Option<Role> {
        self.roles.insert(ch, role)
    }

    #[inline]
    pub fn role(&self, ch: char) -> Option<Role> {
        self.roles.get(&ch).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, Role)> + '_ {
        self.roles.iter().map(|(&ch, &role)| (ch, role))
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A sequence of level plans sharing one vocabulary and tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSet {
    pub levels: Vec<Vec<String>>,
    #[serde(default)]
    pub char_map: CharMap,
    #[serde(default)]
    pub tuning: Tuning,
}

impl PlanSet {
    pub fn new(levels: Vec<Vec<String>>) -> Self {
        Self {
            levels,
            char_map: CharMap::default(),
            tuning: Tuning::default(),
        }
    }

    /// Parse a plan set and check that every level builds
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let plans: Self = serde_json::from_str(json)?;
        plans.validate()?;
        Ok(plans)
    }

    /// Load a plan set from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let plans = Self::from_json(&json)?;
        log::info!(
            "Loaded {} level plans from {}",
            plans.len(),
            path.as_ref().display()
        );
        Ok(plans)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Build level `index` (0-based) with its own pickup seed
    pub fn build_level(&self, index: usize) -> Result<Level, ConfigError> {
        let plan = self.levels.get(index).ok_or(ConfigError::MissingLevel {
            index,
            count: self.levels.len(),
        })?;
        LevelBuilder::new()
            .tuning(self.tuning)
            .seed(DEFAULT_SEED.wrapping_add(index as u64))
            .build(plan.as_slice(), &self.char_map)
    }

    /// Build every level once so malformed plans are caught before play
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.levels.is_empty() {
            return Err(ConfigError::EmptyPlan);
        }
        self.tuning.validate()?;
        for index in 0..self.levels.len() {
            self.build_level(index)?;
        }
        Ok(())
    }
}

/// Built-in levels used when no plan file is given
pub fn default_plans() -> PlanSet {
    let levels: [&[&str]; 3] = [
        &[
            "xxxxxxxxxxxx",
            "x          x",
            "x @   o  o x",
            "xxxxxxxxxxxx",
        ],
        &[
            "x            x",
            "x   g        x",
            "x @     o  o x",
            "xxxxxx!!xxxxxx",
        ],
        &[
            "xxxxxxxxxxxxxxxxxxxxxxxxxx",
            "x                        x",
            "x          |             x",
            "x                        x",
            "x @                 go   x",
            "xxxxaxxxxxxxxxxxxxxxxxxxxx",
        ],
    ];
    PlanSet::new(
        levels
            .iter()
            .map(|rows| rows.iter().map(|row| row.to_string()).collect::<Vec<_>>())
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{ActorKind, LevelStatus, TickInput};

    #[test]
    fn test_default_map_vocabulary() {
        let map = CharMap::default();
        assert_eq!(map.role('x'), Some(Role::Tile(TileKind::Wall)));
        assert_eq!(map.role('!'), Some(Role::Tile(TileKind::Lava)));
        assert_eq!(map.role('a'), Some(Role::Tile(TileKind::PortalIn)));
        assert_eq!(map.role(' '), Some(Role::Tile(TileKind::Empty)));
        assert_eq!(map.role('@'), Some(Role::Spawn(Spawn::Player)));
        assert_eq!(
            map.role('v'),
            Some(Role::Spawn(Spawn::Lava(LavaMotion::Drip)))
        );
        assert_eq!(map.role('#'), None);
    }

    #[test]
    fn test_swapped_vocabulary() {
        let map = CharMap::empty()
            .with('#', Role::Tile(TileKind::Wall))
            .with('-', Role::Tile(TileKind::Empty))
            .with('P', Role::Spawn(Spawn::Player))
            .with('$', Role::Spawn(Spawn::Coin));
        let level = Level::new(&["#####", "#P-$#", "#####"], &map).unwrap();
        assert_eq!(level.grid().get(0, 0), Some(TileKind::Wall));
        assert_eq!(level.actors().len(), 2);

        // Default vocabulary is no longer understood
        let err = Level::new(&["x@ox"], &map).unwrap_err();
        assert!(matches!(err, ConfigError::UnmappedChar { ch: 'x', .. }));

        let mut map = map;
        assert_eq!(map.insert('$', Role::Spawn(Spawn::Gem)), Some(Role::Spawn(Spawn::Coin)));
        assert_eq!(map.insert('-', Role::Tile(TileKind::Lava)), Some(Role::Tile(TileKind::Empty)));
        let level = Level::new(&["#P-$"], &map).unwrap();
        assert_eq!(level.grid().get(2, 0), Some(TileKind::Lava));
        assert_eq!(level.actors()[1].kind(), ActorKind::Gem);

        let legend: Vec<_> = map.iter().map(|(ch, role)| (ch, role.name())).collect();
        assert_eq!(legend, vec![('#', "wall"), ('$', "gem"), ('-', "lava"), ('P', "player")]);
    }

    #[test]
    fn test_char_map_json() {
        let json = r##"{
            "#": { "tile": "wall" },
            " ": { "tile": "empty" },
            "~": { "tile": "lava" },
            "P": { "spawn": "player" },
            "d": { "spawn": { "lava": "drip" } }
        }"##;
        let map = CharMap::from_json(json).unwrap();
        assert_eq!(map.role('~'), Some(Role::Tile(TileKind::Lava)));
        assert_eq!(
            map.role('d'),
            Some(Role::Spawn(Spawn::Lava(LavaMotion::Drip)))
        );
        assert_eq!(map.iter().count(), 5);

        let back = serde_json::to_string(&map).unwrap();
        assert_eq!(CharMap::from_json(&back).unwrap(), map);
    }

    #[test]
    fn test_plan_set_json() {
        let json = r#"{
            "levels": [["x@ox", "xxxx"]],
            "tuning": { "gravity": 30.0 }
        }"#;
        let plans = PlanSet::from_json(json).unwrap();
        assert_eq!(plans.len(), 1);
        assert_eq!(plans.tuning.gravity, 30.0);
        assert_eq!(plans.char_map, CharMap::default());

        let level = plans.build_level(0).unwrap();
        assert_eq!(level.tuning().gravity, 30.0);
        assert!(matches!(
            plans.build_level(1),
            Err(ConfigError::MissingLevel { index: 1, count: 1 })
        ));
    }

    #[test]
    fn test_plan_set_rejects_bad_level() {
        let json = r#"{ "levels": [["x@ox"], ["x@o", "xxxx"]] }"#;
        let err = PlanSet::from_json(json).unwrap_err();
        assert!(matches!(err, ConfigError::RaggedRow { row: 1, .. }));

        let err = PlanSet::from_json(r#"{ "levels": [] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyPlan));
    }

    #[test]
    fn test_default_plans_build() {
        let plans = default_plans();
        assert_eq!(plans.len(), 3);
        plans.validate().unwrap();
        for index in 0..plans.len() {
            let level = plans.build_level(index).unwrap();
            assert_eq!(level.player().kind(), ActorKind::Player);
            assert!(level.coins_remaining() > 0);
        }
    }

    #[test]
    fn test_first_default_level_won_by_walking_right() {
        let mut level = default_plans().build_level(0).unwrap();
        let input = TickInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..200 {
            level.animate(0.05, &input);
            if level.is_finished() {
                break;
            }
        }
        assert_eq!(level.status(), Some(LevelStatus::Won));
        assert!(level.is_finished());
    }
}
