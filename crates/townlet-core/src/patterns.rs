//! Footprint templates and the building pattern matcher.
//!
//! Every building kind accepts a fixed set of footprint variants: small
//! rectangular matrices whose cells either require a specific resource or
//! must be left uncovered by the selection. The library is static data so
//! the matcher stays building-agnostic and can be exercised against any
//! variant list in tests.

use crate::board::{Board, BuildingKind, Cell, Coord, Resource, BOARD_SIZE};
use std::collections::{BTreeMap, BTreeSet};

/// One footprint variant: rows of cells, `Some` = required resource,
/// `None` = must stay uncovered. All rows of a variant have equal length.
pub type Footprint = &'static [&'static [Option<Resource>]];

const NO: Option<Resource> = None;
const WH: Option<Resource> = Some(Resource::Wheat);
const ST: Option<Resource> = Some(Resource::Stone);
const WO: Option<Resource> = Some(Resource::Wood);
const BR: Option<Resource> = Some(Resource::Brick);
const GL: Option<Resource> = Some(Resource::Glass);

const COTTAGE: [Footprint; 8] = [
    &[&[NO, WH], &[BR, GL]],
    &[&[GL, WH], &[BR, NO]],
    &[&[WH, NO], &[GL, BR]],
    &[&[BR, NO], &[GL, WH]],
    &[&[GL, BR], &[NO, WH]],
    &[&[WH, GL], &[NO, BR]],
    &[&[NO, BR], &[WH, GL]],
    &[&[BR, GL], &[NO, WH]],
];

const WELL: [Footprint; 4] = [
    &[&[WO, ST]],
    &[&[ST, WO]],
    &[&[WO], &[ST]],
    &[&[ST], &[WO]],
];

const CATHEDRAL: [Footprint; 8] = [
    &[&[NO, WH], &[ST, GL]],
    &[&[WH, NO], &[GL, ST]],
    &[&[ST, GL], &[NO, WH]],
    &[&[GL, ST], &[WH, NO]],
    &[&[GL, WH], &[NO, ST]],
    &[&[WH, GL], &[NO, ST]],
    &[&[ST, NO], &[GL, WH]],
    &[&[NO, ST], &[WH, GL]],
];

const FARM: [Footprint; 4] = [
    &[&[WH, WH], &[WO, WO]],
    &[&[WO, WH], &[WO, WH]],
    &[&[WO, WO], &[WH, WH]],
    &[&[WH, WO], &[WH, WO]],
];

const CHAPEL: [Footprint; 8] = [
    &[&[NO, NO, GL], &[ST, GL, ST]],
    &[&[ST, NO], &[GL, NO], &[ST, GL]],
    &[&[ST, GL, ST], &[GL, NO, NO]],
    &[&[ST, GL], &[GL, NO], &[ST, NO]],
    &[&[GL, NO, NO], &[ST, GL, ST]],
    &[&[GL, ST], &[NO, GL], &[NO, ST]],
    &[&[ST, GL, ST], &[NO, NO, GL]],
    &[&[NO, ST], &[NO, GL], &[GL, ST]],
];

const TAVERN: [Footprint; 4] = [
    &[&[BR, BR, GL]],
    &[&[GL, BR, BR]],
    &[&[BR], &[BR], &[GL]],
    &[&[GL], &[BR], &[BR]],
];

const THEATER: [Footprint; 4] = [
    &[&[NO, ST, NO], &[WO, GL, WO]],
    &[&[NO, WO], &[ST, GL], &[NO, WO]],
    &[&[WO, GL, WO], &[NO, ST, NO]],
    &[&[WO, NO], &[GL, ST], &[WO, NO]],
];

const FACTORY: [Footprint; 8] = [
    &[&[WO, NO, NO, NO], &[BR, ST, ST, BR]],
    &[&[NO, BR], &[NO, ST], &[NO, ST], &[WO, BR]],
    &[&[BR, ST, ST, BR], &[NO, NO, NO, WO]],
    &[&[BR, WO], &[ST, NO], &[ST, NO], &[BR, NO]],
    &[&[NO, NO, NO, WO], &[BR, ST, ST, BR]],
    &[&[BR, NO], &[ST, NO], &[ST, NO], &[BR, WO]],
    &[&[BR, ST, ST, BR], &[WO, NO, NO, NO]],
    &[&[WO, BR], &[NO, ST], &[NO, ST], &[NO, BR]],
];

/// All accepted footprint variants for a building kind
pub fn variants(kind: BuildingKind) -> &'static [Footprint] {
    match kind {
        BuildingKind::Cottage => &COTTAGE,
        BuildingKind::Well => &WELL,
        BuildingKind::Cathedral => &CATHEDRAL,
        BuildingKind::Farm => &FARM,
        BuildingKind::Chapel => &CHAPEL,
        BuildingKind::Tavern => &TAVERN,
        BuildingKind::Theater => &THEATER,
        BuildingKind::Factory => &FACTORY,
    }
}

/// The canonical variant shown on a building's card
pub fn display_variant(kind: BuildingKind) -> Footprint {
    variants(kind)[0]
}

/// Decide whether `selection` forms a valid footprint for `kind`.
///
/// True iff the selection has exactly `kind.cardinality()` cells, every
/// selected cell holds a resource, and some variant can be translated so
/// that each selected cell lands on a required cell of its own resource,
/// with every required cell covered and no selected cell on an uncovered
/// one. Selections may be disconnected; only the alignment matters.
///
/// Read-only and total: any non-matching selection (wrong size, occupied by
/// buildings, empty cells, off-shape) yields `false`.
pub fn matches(board: &Board, selection: &BTreeSet<Coord>, kind: BuildingKind) -> bool {
    if selection.len() != kind.cardinality() {
        return false;
    }

    let mut picked = Vec::with_capacity(selection.len());
    for &coord in selection {
        match board.get(coord) {
            Cell::Resource(resource) => picked.push((coord, resource)),
            _ => return false,
        }
    }

    let (Some(min_row), Some(min_col)) = (
        picked.iter().map(|(c, _)| c.row as i16).min(),
        picked.iter().map(|(c, _)| c.col as i16).min(),
    ) else {
        return false;
    };

    // Trial offsets place the variant's origin at most one row and one
    // column above/left of the selection's bounding box. That window covers
    // every variant in the fixed library; a future variant whose bounding
    // box exceeds the selection's by 2+ in either axis would need a wider
    // search.
    variants(kind).iter().any(|variant| {
        [min_row - 1, min_row].iter().any(|&origin_row| {
            [min_col - 1, min_col]
                .iter()
                .any(|&origin_col| aligns(variant, &picked, origin_row, origin_col))
        })
    })
}

/// Test one variant at one translation.
fn aligns(variant: &Footprint, picked: &[(Coord, Resource)], origin_row: i16, origin_col: i16) -> bool {
    let rows = variant.len();
    let cols = variant[0].len();
    // Selected coordinates are unique and translation is injective, so no
    // two cells can land on the same variant cell; covering every required
    // cell is then a bijection.
    let mut covered = [[false; BOARD_SIZE]; BOARD_SIZE];

    for &(coord, resource) in picked {
        let r = coord.row as i16 - origin_row;
        let c = coord.col as i16 - origin_col;
        if r < 0 || c < 0 || r as usize >= rows || c as usize >= cols {
            return false;
        }
        match variant[r as usize][c as usize] {
            Some(required) if required == resource => covered[r as usize][c as usize] = true,
            _ => return false,
        }
    }

    variant.iter().enumerate().all(|(r, row)| {
        row.iter()
            .enumerate()
            .all(|(c, cell)| cell.is_none() || covered[r][c])
    })
}

/// Match the selection against every building kind at once. The UI asks
/// this on each selection change to light up committable building cards.
pub fn valid_buildings(board: &Board, selection: &BTreeSet<Coord>) -> BTreeMap<BuildingKind, bool> {
    BuildingKind::ALL
        .iter()
        .map(|&kind| (kind, matches(board, selection, kind)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn board_with(cells: &[(Coord, Resource)]) -> Board {
        let mut board = Board::new();
        for &(coord, resource) in cells {
            board.set(coord, Cell::Resource(resource));
        }
        board
    }

    fn selection(coords: &[(u8, u8)]) -> BTreeSet<Coord> {
        coords.iter().map(|&(r, c)| Coord::new(r, c)).collect()
    }

    #[test]
    fn test_every_variant_has_its_kinds_cardinality() {
        for kind in BuildingKind::ALL {
            for (i, variant) in variants(kind).iter().enumerate() {
                let required: usize = variant
                    .iter()
                    .map(|row| row.iter().filter(|c| c.is_some()).count())
                    .sum();
                assert_eq!(
                    required,
                    kind.cardinality(),
                    "{:?} variant {} has wrong required-cell count",
                    kind,
                    i
                );
                let width = variant[0].len();
                assert!(variant.iter().all(|row| row.len() == width));
                assert!(variant.len() <= BOARD_SIZE && width <= BOARD_SIZE);
            }
        }
    }

    #[test]
    fn test_display_variant_is_first() {
        for kind in BuildingKind::ALL {
            assert_eq!(display_variant(kind), variants(kind)[0]);
        }
    }

    #[test]
    fn test_cottage_matches() {
        let board = board_with(&[
            (Coord::new(0, 1), Resource::Wheat),
            (Coord::new(1, 0), Resource::Brick),
            (Coord::new(1, 1), Resource::Glass),
        ]);
        let sel = selection(&[(0, 1), (1, 0), (1, 1)]);
        assert!(matches(&board, &sel, BuildingKind::Cottage));
    }

    #[test]
    fn test_cottage_wrong_resource_fails() {
        let board = board_with(&[
            (Coord::new(0, 0), Resource::Wheat),
            (Coord::new(1, 0), Resource::Stone),
            (Coord::new(1, 1), Resource::Glass),
        ]);
        let sel = selection(&[(0, 0), (1, 0), (1, 1)]);
        assert!(!matches(&board, &sel, BuildingKind::Cottage));
    }

    #[test]
    fn test_cottage_matches_translated() {
        // Same L shape shifted to the lower-right corner of the board.
        let board = board_with(&[
            (Coord::new(2, 3), Resource::Wheat),
            (Coord::new(3, 2), Resource::Brick),
            (Coord::new(3, 3), Resource::Glass),
        ]);
        let sel = selection(&[(2, 3), (3, 2), (3, 3)]);
        assert!(matches(&board, &sel, BuildingKind::Cottage));
    }

    #[test]
    fn test_well_both_orientations() {
        let horizontal = board_with(&[
            (Coord::new(0, 0), Resource::Wood),
            (Coord::new(0, 1), Resource::Stone),
        ]);
        assert!(matches(
            &horizontal,
            &selection(&[(0, 0), (0, 1)]),
            BuildingKind::Well
        ));

        let vertical = board_with(&[
            (Coord::new(2, 3), Resource::Stone),
            (Coord::new(3, 3), Resource::Wood),
        ]);
        assert!(matches(
            &vertical,
            &selection(&[(2, 3), (3, 3)]),
            BuildingKind::Well
        ));
    }

    #[test]
    fn test_well_wrong_resource_fails() {
        let board = board_with(&[
            (Coord::new(0, 0), Resource::Wood),
            (Coord::new(0, 1), Resource::Wheat),
        ]);
        assert!(!matches(
            &board,
            &selection(&[(0, 0), (0, 1)]),
            BuildingKind::Well
        ));
    }

    #[test]
    fn test_cardinality_mismatch_is_false() {
        let board = board_with(&[
            (Coord::new(0, 0), Resource::Wood),
            (Coord::new(0, 1), Resource::Stone),
            (Coord::new(0, 2), Resource::Wood),
        ]);
        // Three cells can never be a two-cell well.
        assert!(!matches(
            &board,
            &selection(&[(0, 0), (0, 1), (0, 2)]),
            BuildingKind::Well
        ));
        // One cell is never anything.
        for kind in BuildingKind::ALL {
            assert!(!matches(&board, &selection(&[(0, 0)]), kind));
        }
    }

    #[test]
    fn test_selection_over_non_resource_cells_is_false() {
        let mut board = board_with(&[(Coord::new(0, 0), Resource::Wood)]);
        board.set(Coord::new(0, 1), Cell::Building(BuildingKind::Well));
        assert!(!matches(
            &board,
            &selection(&[(0, 0), (0, 1)]),
            BuildingKind::Well
        ));

        let empty = Board::new();
        assert!(!matches(
            &empty,
            &selection(&[(0, 0), (0, 1)]),
            BuildingKind::Well
        ));
    }

    #[test]
    fn test_scattered_selection_fails() {
        // Correct resources for a well, but not adjacent in any variant shape.
        let board = board_with(&[
            (Coord::new(0, 0), Resource::Wood),
            (Coord::new(3, 3), Resource::Stone),
        ]);
        assert!(!matches(
            &board,
            &selection(&[(0, 0), (3, 3)]),
            BuildingKind::Well
        ));
    }

    #[test]
    fn test_farm_shape_must_be_a_square_block() {
        let board = board_with(&[
            (Coord::new(0, 0), Resource::Wheat),
            (Coord::new(0, 1), Resource::Wheat),
            (Coord::new(1, 0), Resource::Wood),
            (Coord::new(1, 1), Resource::Wood),
        ]);
        assert!(matches(
            &board,
            &selection(&[(0, 0), (0, 1), (1, 0), (1, 1)]),
            BuildingKind::Farm
        ));

        // Same resources arranged in a line match no farm variant.
        let line = board_with(&[
            (Coord::new(2, 0), Resource::Wheat),
            (Coord::new(2, 1), Resource::Wheat),
            (Coord::new(2, 2), Resource::Wood),
            (Coord::new(2, 3), Resource::Wood),
        ]);
        assert!(!matches(
            &line,
            &selection(&[(2, 0), (2, 1), (2, 2), (2, 3)]),
            BuildingKind::Farm
        ));
    }

    #[test]
    fn test_cathedral_matches() {
        let board = board_with(&[
            (Coord::new(0, 1), Resource::Wheat),
            (Coord::new(1, 0), Resource::Stone),
            (Coord::new(1, 1), Resource::Glass),
        ]);
        let sel = selection(&[(0, 1), (1, 0), (1, 1)]);
        assert!(matches(&board, &sel, BuildingKind::Cathedral));
        // The same cells are not a cottage (stone vs brick).
        assert!(!matches(&board, &sel, BuildingKind::Cottage));
    }

    #[test]
    fn test_chapel_matches() {
        // Variant [[NO, NO, GL], [ST, GL, ST]] anchored at (1, 1).
        let board = board_with(&[
            (Coord::new(1, 3), Resource::Glass),
            (Coord::new(2, 1), Resource::Stone),
            (Coord::new(2, 2), Resource::Glass),
            (Coord::new(2, 3), Resource::Stone),
        ]);
        let sel = selection(&[(1, 3), (2, 1), (2, 2), (2, 3)]);
        assert!(matches(&board, &sel, BuildingKind::Chapel));
    }

    #[test]
    fn test_tavern_matches_vertical() {
        let board = board_with(&[
            (Coord::new(0, 2), Resource::Glass),
            (Coord::new(1, 2), Resource::Brick),
            (Coord::new(2, 2), Resource::Brick),
        ]);
        let sel = selection(&[(0, 2), (1, 2), (2, 2)]);
        assert!(matches(&board, &sel, BuildingKind::Tavern));
    }

    #[test]
    fn test_theater_matches() {
        // Variant [[NO, ST, NO], [WO, GL, WO]] anchored at (0, 0).
        let board = board_with(&[
            (Coord::new(0, 1), Resource::Stone),
            (Coord::new(1, 0), Resource::Wood),
            (Coord::new(1, 1), Resource::Glass),
            (Coord::new(1, 2), Resource::Wood),
        ]);
        let sel = selection(&[(0, 1), (1, 0), (1, 1), (1, 2)]);
        assert!(matches(&board, &sel, BuildingKind::Theater));
    }

    #[test]
    fn test_factory_matches() {
        // Variant [[WO, NO, NO, NO], [BR, ST, ST, BR]] anchored at (2, 0).
        let board = board_with(&[
            (Coord::new(2, 0), Resource::Wood),
            (Coord::new(3, 0), Resource::Brick),
            (Coord::new(3, 1), Resource::Stone),
            (Coord::new(3, 2), Resource::Stone),
            (Coord::new(3, 3), Resource::Brick),
        ]);
        let sel = selection(&[(2, 0), (3, 0), (3, 1), (3, 2), (3, 3)]);
        assert!(matches(&board, &sel, BuildingKind::Factory));
    }

    #[test]
    fn test_valid_buildings_reports_all_kinds() {
        let board = board_with(&[
            (Coord::new(0, 0), Resource::Wood),
            (Coord::new(0, 1), Resource::Stone),
        ]);
        let validity = valid_buildings(&board, &selection(&[(0, 0), (0, 1)]));
        assert_eq!(validity.len(), BuildingKind::ALL.len());
        assert_eq!(validity[&BuildingKind::Well], true);
        assert_eq!(validity[&BuildingKind::Cottage], false);
        assert_eq!(validity[&BuildingKind::Factory], false);
    }
}
