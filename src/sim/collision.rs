//! Collision queries against tiles and other actors
//!
//! Everything here is a pure read: movement code asks "what would I hit
//! if I were here?" and decides what to do with the answer.

use glam::Vec2;

use super::tile::{TileGrid, TileKind};

/// First obstacle overlapped by the box at `pos` with extents `size`
///
/// The box covers tiles `floor(pos)` up to (but excluding) `ceil(pos + size)`.
/// Leaving the grid through the left, right or top counts as hitting a wall;
/// dropping out of the bottom counts as lava. Inside the grid, tiles are
/// scanned row by row and the first non-empty one wins.
pub fn obstacle_at(grid: &TileGrid, pos: Vec2, size: Vec2) -> Option<TileKind> {
    let x_start = pos.x.floor() as i64;
    let x_end = (pos.x + size.x).ceil() as i64;
    let y_start = pos.y.floor() as i64;
    let y_end = (pos.y + size.y).ceil() as i64;

    if x_start < 0 || x_end > grid.width() as i64 || y_start < 0 {
        return Some(TileKind::Wall);
    }
    if y_end > grid.height() as i64 {
        return Some(TileKind::Lava);
    }

    for y in y_start..y_end {
        for x in x_start..x_end {
            match grid.get(x as usize, y as usize) {
                Some(tile) if tile.is_obstacle() => return Some(tile),
                _ => {}
            }
        }
    }
    None
}

/// Whether two boxes overlap with positive area
#[inline]
pub fn boxes_overlap(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> bool {
    a_pos.x + a_size.x > b_pos.x
        && a_pos.x < b_pos.x + b_size.x
        && a_pos.y + a_size.y > b_pos.y
        && a_pos.y < b_pos.y + b_size.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// 5x4 grid: wall at (2, 1), lava at (3, 2), portal at (1, 3)
    fn test_grid() -> TileGrid {
        let mut tiles = vec![TileKind::Empty; 20];
        tiles[5 + 2] = TileKind::Wall;
        tiles[2 * 5 + 3] = TileKind::Lava;
        tiles[3 * 5 + 1] = TileKind::PortalIn;
        TileGrid::new(5, 4, tiles)
    }

    #[test]
    fn test_open_space() {
        let grid = test_grid();
        assert_eq!(obstacle_at(&grid, Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0)), None);
        assert_eq!(obstacle_at(&grid, Vec2::new(0.2, 0.1), Vec2::new(0.6, 0.6)), None);
    }

    #[test]
    fn test_hits_tiles() {
        let grid = test_grid();
        assert_eq!(
            obstacle_at(&grid, Vec2::new(1.5, 0.5), Vec2::new(0.8, 0.8)),
            Some(TileKind::Wall)
        );
        assert_eq!(
            obstacle_at(&grid, Vec2::new(3.1, 2.1), Vec2::new(0.5, 0.5)),
            Some(TileKind::Lava)
        );
        assert_eq!(
            obstacle_at(&grid, Vec2::new(1.0, 3.0), Vec2::new(1.0, 1.0)),
            Some(TileKind::PortalIn)
        );
    }

    #[test]
    fn test_row_major_order() {
        let grid = test_grid();
        // Covers the wall (row 1) and the lava (row 2); the upper row wins
        assert_eq!(
            obstacle_at(&grid, Vec2::new(2.5, 1.5), Vec2::new(1.0, 1.0)),
            Some(TileKind::Wall)
        );
    }

    #[test]
    fn test_edge_aligned_box_stays_in_its_cells() {
        let grid = test_grid();
        // Box ending exactly on the wall's left edge doesn't reach it
        assert_eq!(obstacle_at(&grid, Vec2::new(1.0, 1.0), Vec2::new(1.0, 1.0)), None);
    }

    #[test]
    fn test_out_of_bounds() {
        let grid = test_grid();
        let size = Vec2::new(1.0, 1.0);
        assert_eq!(obstacle_at(&grid, Vec2::new(-0.1, 0.0), size), Some(TileKind::Wall));
        assert_eq!(obstacle_at(&grid, Vec2::new(4.1, 0.0), size), Some(TileKind::Wall));
        assert_eq!(obstacle_at(&grid, Vec2::new(0.0, -0.1), size), Some(TileKind::Wall));
        assert_eq!(obstacle_at(&grid, Vec2::new(0.0, 3.1), size), Some(TileKind::Lava));
        // Sides win over the floor
        assert_eq!(obstacle_at(&grid, Vec2::new(-0.5, 3.5), size), Some(TileKind::Wall));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let size = Vec2::new(1.0, 1.0);
        let a = Vec2::new(0.0, 0.0);
        assert!(!boxes_overlap(a, size, Vec2::new(1.0, 0.0), size));
        assert!(!boxes_overlap(a, size, Vec2::new(0.0, 1.0), size));
        assert!(!boxes_overlap(a, size, Vec2::new(1.0, 1.0), size));
        assert!(boxes_overlap(a, size, Vec2::new(0.99, 0.5), size));
    }

    proptest! {
        #[test]
        fn prop_left_or_top_outside_is_wall(
            x in -20.0f32..-0.01,
            y in -5.0f32..10.0,
            w in 0.1f32..3.0,
            h in 0.1f32..3.0,
        ) {
            let grid = test_grid();
            prop_assert_eq!(obstacle_at(&grid, Vec2::new(x, y), Vec2::new(w, h)), Some(TileKind::Wall));
            prop_assert_eq!(obstacle_at(&grid, Vec2::new(y.abs().min(3.0), x), Vec2::new(w, h)), Some(TileKind::Wall));
        }

        #[test]
        fn prop_past_right_edge_is_wall(
            x in 0.0f32..4.0,
            y in 0.0f32..2.0,
            overshoot in 0.01f32..5.0,
        ) {
            let grid = test_grid();
            // Right edge lands beyond width 5
            let w = 5.0 - x + overshoot;
            prop_assert_eq!(obstacle_at(&grid, Vec2::new(x, y), Vec2::new(w, 1.0)), Some(TileKind::Wall));
        }

        #[test]
        fn prop_only_bottom_outside_is_lava(
            x in 0.0f32..3.9,
            y in 0.0f32..3.0,
            overshoot in 0.01f32..5.0,
        ) {
            let grid = test_grid();
            // Bottom edge lands beyond height 4, sides stay inside
            let h = 4.0 - y + overshoot;
            prop_assert_eq!(obstacle_at(&grid, Vec2::new(x, y), Vec2::new(1.0, h)), Some(TileKind::Lava));
        }

        #[test]
        fn prop_overlap_is_symmetric(
            ax in -5.0f32..5.0, ay in -5.0f32..5.0,
            bx in -5.0f32..5.0, by in -5.0f32..5.0,
            w in 0.1f32..3.0, h in 0.1f32..3.0,
        ) {
            let size = Vec2::new(w, h);
            let a = Vec2::new(ax, ay);
            let b = Vec2::new(bx, by);
            prop_assert_eq!(boxes_overlap(a, size, b, size), boxes_overlap(b, size, a, size));
        }

        #[test]
        fn prop_shared_edge_never_overlaps(
            x in -5.0f32..5.0, y in -5.0f32..5.0,
            w in 0.1f32..3.0, h in 0.1f32..3.0,
        ) {
            let a = Vec2::new(x, y);
            let size = Vec2::new(w, h);
            let right = Vec2::new(a.x + w, y);
            prop_assert!(!boxes_overlap(a, size, right, size));
        }
    }
}
