//! Scoring engine: reduce a finished board to victory points.
//!
//! Pure functions over [`Board`]; no game state is touched. Traversal is
//! row-major where order matters (cottage feeding).

use crate::board::{Board, BuildingKind, Cell, Coord};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Points per fed cottage
const COTTAGE_POINTS: i32 = 3;

/// Cottages fed by each farm
const COTTAGES_PER_FARM: usize = 4;

/// Per-rule point tallies. The rule contributions sum to the final score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub cottages: i32,
    pub wells: i32,
    pub cathedrals: i32,
    pub chapels: i32,
    pub taverns: i32,
    pub theaters: i32,
    /// Empty/resource penalty; zero or negative, waived by any cathedral
    pub penalty: i32,
}

impl ScoreBreakdown {
    /// The final score. May be negative; never rounded or clamped.
    pub fn total(&self) -> i32 {
        self.cottages
            + self.wells
            + self.cathedrals
            + self.chapels
            + self.taverns
            + self.theaters
            + self.penalty
    }
}

/// Score a finished board.
pub fn score(board: &Board) -> i32 {
    score_breakdown(board).total()
}

/// Score a finished board, keeping the per-rule tallies.
pub fn score_breakdown(board: &Board) -> ScoreBreakdown {
    let farms = board.count_buildings(BuildingKind::Farm);
    let cottages = board.count_buildings(BuildingKind::Cottage);
    let has_cathedral = board.count_buildings(BuildingKind::Cathedral) > 0;

    // Feed capacity is frozen before the pass: chapels read this value,
    // cottages consume from a copy of it one at a time in row-major order.
    let fed = cottages.min(farms * COTTAGES_PER_FARM);
    let mut feed_pool = fed;

    let mut breakdown = ScoreBreakdown::default();
    let mut tavern_count = 0usize;
    let mut penalty_cells = 0i32;

    for (coord, cell) in board.iter() {
        match cell {
            Cell::Building(BuildingKind::Cottage) => {
                if feed_pool > 0 {
                    breakdown.cottages += COTTAGE_POINTS;
                    feed_pool -= 1;
                }
            }
            Cell::Building(BuildingKind::Well) => {
                breakdown.wells += adjacent_cottages(board, coord);
            }
            Cell::Building(BuildingKind::Cathedral) => {
                breakdown.cathedrals += 2;
            }
            Cell::Building(BuildingKind::Chapel) => {
                breakdown.chapels += fed as i32;
            }
            Cell::Building(BuildingKind::Tavern) => {
                tavern_count += 1;
            }
            Cell::Building(BuildingKind::Theater) => {
                breakdown.theaters += theater_points(board, coord);
            }
            Cell::Building(BuildingKind::Farm) | Cell::Building(BuildingKind::Factory) => {}
            Cell::Empty | Cell::Resource(_) => penalty_cells += 1,
        }
    }

    breakdown.taverns = tavern_table(tavern_count);
    // Factory-stored resources never count toward the penalty; only the
    // cell's own top-level content does.
    breakdown.penalty = if has_cathedral { 0 } else { -penalty_cells };

    breakdown
}

/// Orthogonally adjacent cottages, 0..=4
fn adjacent_cottages(board: &Board, coord: Coord) -> i32 {
    coord
        .orthogonal_neighbors()
        .into_iter()
        .filter(|&n| board.get(n).building() == Some(BuildingKind::Cottage))
        .count() as i32
}

/// Distinct building kinds elsewhere in the theater's row or column.
/// Other theaters never count; a kind appearing in both the row and the
/// column counts once.
fn theater_points(board: &Board, coord: Coord) -> i32 {
    let mut kinds: HashSet<BuildingKind> = HashSet::new();
    for i in 0..crate::board::BOARD_SIZE as u8 {
        for other in [Coord::new(coord.row, i), Coord::new(i, coord.col)] {
            if other == coord {
                continue;
            }
            if let Some(kind) = board.get(other).building() {
                if kind != BuildingKind::Theater {
                    kinds.insert(kind);
                }
            }
        }
    }
    kinds.len() as i32
}

/// Fixed non-linear tavern payout, applied once to the global count
fn tavern_table(count: usize) -> i32 {
    match count {
        0 => 0,
        1 => 2,
        2 => 5,
        3 => 9,
        4 => 14,
        _ => 20,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Resource;
    use pretty_assertions::assert_eq;

    fn place(board: &mut Board, row: u8, col: u8, kind: BuildingKind) {
        board.set(Coord::new(row, col), Cell::Building(kind));
    }

    #[test]
    fn test_empty_board_scores_minus_16() {
        assert_eq!(score(&Board::new()), -16);
    }

    #[test]
    fn test_all_resources_score_minus_16() {
        let mut board = Board::new();
        for (coord, _) in Board::new().iter() {
            board.set(coord, Cell::Resource(Resource::Wheat));
        }
        assert_eq!(score(&board), -16);
    }

    #[test]
    fn test_fed_cottage_scores_three() {
        let mut board = Board::new();
        place(&mut board, 0, 0, BuildingKind::Cottage);
        place(&mut board, 1, 1, BuildingKind::Farm);
        // 3 for the cottage, -14 for the empty cells.
        assert_eq!(score(&board), 3 - 14);
    }

    #[test]
    fn test_unfed_cottage_scores_zero() {
        let mut board = Board::new();
        place(&mut board, 2, 2, BuildingKind::Cottage);
        assert_eq!(score(&board), -15);
    }

    #[test]
    fn test_cottage_feeding_is_row_major() {
        // One farm feeds four of five cottages: exactly the first four in
        // row-major order score, the fifth does not.
        let mut board = Board::new();
        place(&mut board, 0, 0, BuildingKind::Farm);
        for (row, col) in [(0, 1), (0, 2), (1, 0), (1, 3), (3, 3)] {
            place(&mut board, row, col, BuildingKind::Cottage);
        }
        let breakdown = score_breakdown(&board);
        assert_eq!(breakdown.cottages, 12);
        assert_eq!(breakdown.penalty, -10);
        assert_eq!(breakdown.total(), 2);
    }

    #[test]
    fn test_well_counts_adjacent_cottages() {
        let mut board = Board::new();
        place(&mut board, 1, 1, BuildingKind::Well);
        place(&mut board, 0, 1, BuildingKind::Cottage);
        place(&mut board, 1, 2, BuildingKind::Cottage);
        // Diagonal neighbor does not count.
        place(&mut board, 2, 2, BuildingKind::Cottage);
        let breakdown = score_breakdown(&board);
        assert_eq!(breakdown.wells, 2);
    }

    #[test]
    fn test_lonely_well_scores_zero() {
        let mut board = Board::new();
        place(&mut board, 0, 0, BuildingKind::Well);
        assert_eq!(score_breakdown(&board).wells, 0);
        assert_eq!(score(&board), -15);
    }

    #[test]
    fn test_cathedral_waives_penalty_for_whole_grid() {
        let mut board = Board::new();
        for (coord, _) in Board::new().iter() {
            board.set(coord, Cell::Resource(Resource::Stone));
        }
        place(&mut board, 0, 0, BuildingKind::Cathedral);
        // 2 for the cathedral, zero penalty for the 15 resource cells.
        assert_eq!(score(&board), 2);
    }

    #[test]
    fn test_chapel_reads_frozen_feed_count() {
        let mut board = Board::new();
        place(&mut board, 0, 0, BuildingKind::Chapel);
        place(&mut board, 1, 1, BuildingKind::Cottage);
        place(&mut board, 2, 2, BuildingKind::Cottage);
        place(&mut board, 3, 3, BuildingKind::Farm);
        let breakdown = score_breakdown(&board);
        // fed = min(2, 4) = 2: chapel scores 2, cottages 3 each.
        assert_eq!(breakdown.chapels, 2);
        assert_eq!(breakdown.cottages, 6);
        assert_eq!(breakdown.total(), 8 - 12);
    }

    #[test]
    fn test_two_chapels_each_read_full_feed_count() {
        let mut board = Board::new();
        place(&mut board, 0, 0, BuildingKind::Chapel);
        place(&mut board, 0, 1, BuildingKind::Chapel);
        place(&mut board, 1, 0, BuildingKind::Cottage);
        place(&mut board, 1, 1, BuildingKind::Cottage);
        place(&mut board, 2, 0, BuildingKind::Farm);
        // Both chapels score the same frozen value, not a shared pool.
        assert_eq!(score_breakdown(&board).chapels, 4);
    }

    #[test]
    fn test_chapel_without_fed_cottages_scores_zero() {
        let mut board = Board::new();
        place(&mut board, 0, 0, BuildingKind::Chapel);
        place(&mut board, 1, 1, BuildingKind::Cottage);
        assert_eq!(score_breakdown(&board).chapels, 0);
        assert_eq!(score(&board), -14);
    }

    #[test]
    fn test_tavern_table() {
        let counts = [(0, 0), (1, 2), (2, 5), (3, 9), (4, 14), (5, 20), (6, 20)];
        for (count, expected) in counts {
            let mut board = Board::new();
            for i in 0..count {
                place(&mut board, (i / 4) as u8, (i % 4) as u8, BuildingKind::Tavern);
            }
            let breakdown = score_breakdown(&board);
            assert_eq!(
                breakdown.taverns, expected,
                "{} taverns should pay {}",
                count, expected
            );
        }
    }

    #[test]
    fn test_three_taverns_score_nine_total() {
        let mut board = Board::new();
        place(&mut board, 0, 0, BuildingKind::Tavern);
        place(&mut board, 0, 1, BuildingKind::Tavern);
        place(&mut board, 0, 2, BuildingKind::Tavern);
        assert_eq!(score(&board), 9 - 13);
    }

    #[test]
    fn test_theater_counts_distinct_kinds_in_row_and_column() {
        let mut board = Board::new();
        place(&mut board, 1, 1, BuildingKind::Theater);
        // Row: well, well (duplicate kind counts once).
        place(&mut board, 1, 0, BuildingKind::Well);
        place(&mut board, 1, 3, BuildingKind::Well);
        // Column: farm, plus a well again (already counted).
        place(&mut board, 0, 1, BuildingKind::Farm);
        place(&mut board, 3, 1, BuildingKind::Well);
        // Another theater in the column does not count.
        place(&mut board, 2, 1, BuildingKind::Theater);
        let breakdown = score_breakdown(&board);
        // Each theater sees {well, farm} = 2.
        assert_eq!(breakdown.theaters, 4);
    }

    #[test]
    fn test_theater_ignores_resources_and_empties() {
        let mut board = Board::new();
        place(&mut board, 0, 0, BuildingKind::Theater);
        board.set(Coord::new(0, 1), Cell::Resource(Resource::Glass));
        assert_eq!(score_breakdown(&board).theaters, 0);
    }

    #[test]
    fn test_factory_store_does_not_count_toward_penalty() {
        let mut board = Board::new();
        place(&mut board, 0, 0, BuildingKind::Factory);
        board.set_factory_store(Coord::new(0, 0), Resource::Wood);
        // 15 empty cells penalized; the factory cell and its store are not.
        assert_eq!(score(&board), -15);
    }

    #[test]
    fn test_breakdown_total_matches_score() {
        let mut board = Board::new();
        place(&mut board, 0, 0, BuildingKind::Farm);
        place(&mut board, 0, 1, BuildingKind::Cottage);
        place(&mut board, 0, 2, BuildingKind::Well);
        place(&mut board, 1, 1, BuildingKind::Chapel);
        place(&mut board, 2, 2, BuildingKind::Tavern);
        place(&mut board, 3, 3, BuildingKind::Theater);
        board.set(Coord::new(3, 0), Cell::Resource(Resource::Brick));
        assert_eq!(score_breakdown(&board).total(), score(&board));
    }
}
