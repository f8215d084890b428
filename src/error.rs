//! Errors raised while building levels from plans and configuration.

use thiserror::Error;

/// A plan, character map or tuning file that cannot produce a valid level.
///
/// These only surface at construction/load time. A level that was built
/// successfully never fails while it is being simulated.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The plan has no rows, or its rows are empty
    #[error("Plan is empty")]
    EmptyPlan,

    /// A row differs in length from the first row
    #[error("Row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A character with no role in the active character map
    #[error("Unmapped character {ch:?} at row {row}, column {column}")]
    UnmappedChar { ch: char, row: usize, column: usize },

    /// The plan spawns no player
    #[error("Plan has no player")]
    MissingPlayer,

    /// The plan spawns more than one player
    #[error("Plan has {count} players, expected exactly one")]
    MultiplePlayers { count: usize },

    /// A plan set was asked for a level it doesn't have
    #[error("Level {index} requested but only {count} levels exist")]
    MissingLevel { index: usize, count: usize },

    /// A tuning value outside its valid range
    #[error("Invalid tuning: {0}")]
    InvalidTuning(String),

    /// Plan set file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Plan set, character map or tuning JSON is malformed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfigError {
    /// Creates an invalid tuning error.
    pub fn tuning(msg: impl Into<String>) -> Self {
        Self::InvalidTuning(msg.into())
    }
}
