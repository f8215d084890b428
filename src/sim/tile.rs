//! Static level geometry
//!
//! The tile grid is built once from a plan and never changes afterwards.

use serde::{Deserialize, Serialize};

/// What occupies one cell of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileKind {
    #[default]
    Empty,
    Wall,
    Lava,
    /// Landing on it throws the player sideways
    PortalIn,
}

impl TileKind {
    /// Any non-empty tile blocks movement
    #[inline]
    pub fn is_obstacle(self) -> bool {
        self != TileKind::Empty
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TileKind::Empty => "empty",
            TileKind::Wall => "wall",
            TileKind::Lava => "lava",
            TileKind::PortalIn => "portal_in",
        }
    }
}

/// Dense row-major grid of tiles
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TileGrid {
    width: usize,
    height: usize,
    tiles: Vec<TileKind>,
}

impl TileGrid {
    /// Build a grid from row-major tiles
    ///
    /// Only the level builder makes grids, after checking every row has
    /// `width` tiles.
    pub(crate) fn new(width: usize, height: usize, tiles: Vec<TileKind>) -> Self {
        debug_assert_eq!(tiles.len(), width * height);
        Self {
            width,
            height,
            tiles,
        }
    }

    /// A grid where every cell has the same kind
    #[cfg(test)]
    pub(crate) fn filled(width: usize, height: usize, kind: TileKind) -> Self {
        Self::new(width, height, vec![kind; width * height])
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Tile at column `x`, row `y`, or `None` outside the grid
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<TileKind> {
        if x < self.width && y < self.height {
            Some(self.tiles[y * self.width + x])
        } else {
            None
        }
    }

    /// Rows from top to bottom (for renderers)
    pub fn rows(&self) -> impl Iterator<Item = &[TileKind]> {
        self.tiles.chunks(self.width.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_in_and_out_of_bounds() {
        let grid = TileGrid::new(
            2,
            2,
            vec![TileKind::Wall, TileKind::Empty, TileKind::Lava, TileKind::PortalIn],
        );
        assert_eq!(grid.get(0, 0), Some(TileKind::Wall));
        assert_eq!(grid.get(1, 0), Some(TileKind::Empty));
        assert_eq!(grid.get(0, 1), Some(TileKind::Lava));
        assert_eq!(grid.get(1, 1), Some(TileKind::PortalIn));
        assert_eq!(grid.get(2, 0), None);
        assert_eq!(grid.get(0, 2), None);
    }

    #[test]
    fn test_rows() {
        let grid = TileGrid::filled(3, 2, TileKind::Wall);
        let rows: Vec<_> = grid.rows().collect();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.len() == 3));
    }

    #[test]
    fn test_obstacle_kinds() {
        assert!(!TileKind::Empty.is_obstacle());
        assert!(TileKind::Wall.is_obstacle());
        assert!(TileKind::Lava.is_obstacle());
        assert!(TileKind::PortalIn.is_obstacle());
        assert_eq!(TileKind::PortalIn.as_str(), "portal_in");
    }
}
