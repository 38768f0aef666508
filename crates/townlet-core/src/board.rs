//! Board state: resources, buildings, cells, and the 4x4 grid.
//!
//! This module contains:
//! - Resource and building enumerations
//! - Cell contents and grid coordinates
//! - The `Board` with factory stores
//! - The one-character-per-cell encoding used by game snapshots

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Board side length. The town is always a 4x4 grid.
pub const BOARD_SIZE: usize = 4;

/// Resource token types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    Wheat,
    Stone,
    Wood,
    Brick,
    Glass,
}

impl Resource {
    /// All resource types
    pub const ALL: [Resource; 5] = [
        Resource::Wheat,
        Resource::Stone,
        Resource::Wood,
        Resource::Brick,
        Resource::Glass,
    ];

    /// Snapshot-alphabet digit for this resource
    pub fn encode(&self) -> char {
        match self {
            Resource::Wood => '1',
            Resource::Brick => '2',
            Resource::Wheat => '3',
            Resource::Glass => '4',
            Resource::Stone => '5',
        }
    }

    /// Inverse of [`Resource::encode`]
    pub fn decode(ch: char) -> Option<Resource> {
        match ch {
            '1' => Some(Resource::Wood),
            '2' => Some(Resource::Brick),
            '3' => Some(Resource::Wheat),
            '4' => Some(Resource::Glass),
            '5' => Some(Resource::Stone),
            _ => None,
        }
    }
}

/// Building types that can be committed onto the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BuildingKind {
    Cottage,
    Well,
    Cathedral,
    Farm,
    Chapel,
    Tavern,
    Theater,
    Factory,
}

impl BuildingKind {
    /// All building kinds
    pub const ALL: [BuildingKind; 8] = [
        BuildingKind::Cottage,
        BuildingKind::Well,
        BuildingKind::Cathedral,
        BuildingKind::Farm,
        BuildingKind::Chapel,
        BuildingKind::Tavern,
        BuildingKind::Theater,
        BuildingKind::Factory,
    ];

    /// Number of resource cells every footprint variant of this kind requires.
    pub fn cardinality(&self) -> usize {
        match self {
            BuildingKind::Cottage => 3,
            BuildingKind::Well => 2,
            BuildingKind::Cathedral => 3,
            BuildingKind::Farm => 4,
            BuildingKind::Chapel => 4,
            BuildingKind::Tavern => 3,
            BuildingKind::Theater => 4,
            BuildingKind::Factory => 5,
        }
    }

    /// Snapshot-alphabet letter for this building
    pub fn encode(&self) -> char {
        match self {
            BuildingKind::Cottage => 'c',
            BuildingKind::Well => 'W',
            BuildingKind::Cathedral => 'C',
            BuildingKind::Farm => 'f',
            BuildingKind::Chapel => 'p',
            BuildingKind::Tavern => 't',
            BuildingKind::Theater => 'T',
            BuildingKind::Factory => 'F',
        }
    }

    /// Inverse of [`BuildingKind::encode`]
    pub fn decode(ch: char) -> Option<BuildingKind> {
        match ch {
            'c' => Some(BuildingKind::Cottage),
            'W' => Some(BuildingKind::Well),
            'C' => Some(BuildingKind::Cathedral),
            'f' => Some(BuildingKind::Farm),
            'p' => Some(BuildingKind::Chapel),
            't' => Some(BuildingKind::Tavern),
            'T' => Some(BuildingKind::Theater),
            'F' => Some(BuildingKind::Factory),
            _ => None,
        }
    }
}

/// What a grid cell currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Cell {
    /// Nothing placed
    #[default]
    Empty,
    /// A raw resource token
    Resource(Resource),
    /// A committed building
    Building(BuildingKind),
}

impl Cell {
    /// The resource in this cell, if any
    pub fn resource(&self) -> Option<Resource> {
        match self {
            Cell::Resource(r) => Some(*r),
            _ => None,
        }
    }

    /// The building in this cell, if any
    pub fn building(&self) -> Option<BuildingKind> {
        match self {
            Cell::Building(b) => Some(*b),
            _ => None,
        }
    }

    /// Whether the cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Snapshot-alphabet character for this cell
    pub fn encode(&self) -> char {
        match self {
            Cell::Empty => '0',
            Cell::Resource(r) => r.encode(),
            Cell::Building(b) => b.encode(),
        }
    }

    /// Inverse of [`Cell::encode`]
    pub fn decode(ch: char) -> Option<Cell> {
        if ch == '0' {
            return Some(Cell::Empty);
        }
        Resource::decode(ch)
            .map(Cell::Resource)
            .or_else(|| BuildingKind::decode(ch).map(Cell::Building))
    }
}

/// A grid coordinate. Row-major ordering, `(0, 0)` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: u8,
    pub col: u8,
}

impl Coord {
    /// Create a coordinate. Callers are expected to stay within the board.
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Whether the coordinate addresses a board cell
    pub fn in_bounds(&self) -> bool {
        (self.row as usize) < BOARD_SIZE && (self.col as usize) < BOARD_SIZE
    }

    /// Orthogonal neighbors that lie on the board (up/down/left/right, no diagonals)
    pub fn orthogonal_neighbors(&self) -> Vec<Coord> {
        let (row, col) = (self.row as i8, self.col as i8);
        [(row - 1, col), (row + 1, col), (row, col - 1), (row, col + 1)]
            .into_iter()
            .filter(|&(r, c)| {
                r >= 0 && c >= 0 && (r as usize) < BOARD_SIZE && (c as usize) < BOARD_SIZE
            })
            .map(|(r, c)| Coord::new(r as u8, c as u8))
            .collect()
    }
}

/// Errors decoding a snapshot board string.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
pub enum BoardDecodeError {
    #[error("board string must be {expected} characters, got {got}")]
    WrongLength { expected: usize, got: usize },

    #[error("unknown cell character {0:?}")]
    UnknownCell(char),
}

/// The 4x4 town grid.
///
/// Every cell holds exactly one [`Cell`] at all times. A factory's stored
/// resource is an auxiliary attribute kept alongside the grid; it is only
/// ever set on cells holding `Building(Factory)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
    factory_stores: [[Option<Resource>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Query Methods ====================

    /// Get the content of a cell
    pub fn get(&self, coord: Coord) -> Cell {
        self.cells[coord.row as usize][coord.col as usize]
    }

    /// The resource stored in a factory cell, if any
    pub fn factory_store(&self, coord: Coord) -> Option<Resource> {
        self.factory_stores[coord.row as usize][coord.col as usize]
    }

    /// Iterate all cells in row-major order. Row-major order is significant
    /// for scoring (cottage feeding).
    pub fn iter(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        (0..BOARD_SIZE).flat_map(move |row| {
            (0..BOARD_SIZE).map(move |col| {
                let coord = Coord::new(row as u8, col as u8);
                (coord, self.get(coord))
            })
        })
    }

    /// Count cells holding a specific building kind
    pub fn count_buildings(&self, kind: BuildingKind) -> usize {
        self.iter()
            .filter(|(_, cell)| cell.building() == Some(kind))
            .count()
    }

    /// Count cells holding raw resources
    pub fn count_resources(&self) -> usize {
        self.iter().filter(|(_, cell)| cell.resource().is_some()).count()
    }

    /// Count resources stored inside factories
    pub fn count_factory_stores(&self) -> usize {
        self.factory_stores
            .iter()
            .flatten()
            .filter(|s| s.is_some())
            .count()
    }

    /// Count empty cells
    pub fn count_empty(&self) -> usize {
        self.iter().filter(|(_, cell)| cell.is_empty()).count()
    }

    // ==================== Mutation Methods ====================

    /// Set the content of a cell
    pub fn set(&mut self, coord: Coord, cell: Cell) {
        self.cells[coord.row as usize][coord.col as usize] = cell;
    }

    /// Attach a stored resource to a factory cell
    pub fn set_factory_store(&mut self, coord: Coord, resource: Resource) {
        self.factory_stores[coord.row as usize][coord.col as usize] = Some(resource);
    }

    /// Clear the stored resource of a factory cell
    pub fn clear_factory_store(&mut self, coord: Coord) {
        self.factory_stores[coord.row as usize][coord.col as usize] = None;
    }

    // ==================== Snapshot Encoding ====================

    /// Encode the grid as 16 characters in row-major order, one per cell.
    ///
    /// Factory stores are not part of the encoding; only the top-level cell
    /// content is captured.
    pub fn encode(&self) -> String {
        self.iter().map(|(_, cell)| cell.encode()).collect()
    }

    /// Decode a 16-character board string produced by [`Board::encode`]
    pub fn decode(s: &str) -> Result<Board, BoardDecodeError> {
        let expected = BOARD_SIZE * BOARD_SIZE;
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != expected {
            return Err(BoardDecodeError::WrongLength {
                expected,
                got: chars.len(),
            });
        }

        let mut board = Board::new();
        for (i, &ch) in chars.iter().enumerate() {
            let cell = Cell::decode(ch).ok_or(BoardDecodeError::UnknownCell(ch))?;
            let coord = Coord::new((i / BOARD_SIZE) as u8, (i % BOARD_SIZE) as u8);
            board.set(coord, cell);
        }
        Ok(board)
    }
}
