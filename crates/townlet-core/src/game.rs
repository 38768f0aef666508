//! Game state and the mutating operations with their undo log.
//!
//! A [`Game`] composes the board, the resource supply, and the history of
//! invertible placement records. All mutation goes through the operations
//! here; each validates first, mutates both stores together, and records
//! its inverse only after succeeding.

use crate::board::{Board, BuildingKind, Cell, Coord};
use crate::history::{PlacementRecord, ReopenedSelection, UndoOutcome};
use crate::patterns;
use crate::score::{self, ScoreBreakdown};
use crate::snapshot::{self, GameSnapshot};
use crate::supply::ResourceSupply;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// Errors from the mutating operations.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("offer slot out of range")]
    InvalidSlot,

    #[error("target cell cannot take this placement")]
    CellOccupied,

    #[error("factory already holds a stored resource")]
    FactoryAlreadyStocked,

    #[error("factory has no stored resource to produce")]
    FactoryEmpty,

    #[error("selection does not match any footprint of this building")]
    PatternMismatch,
}

/// A single-player game in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    /// The town grid
    pub board: Board,
    /// The draw deck and offer
    pub supply: ResourceSupply,
    /// Undo log, oldest first
    history: Vec<PlacementRecord>,
}

impl Game {
    /// Start a new game with a freshly shuffled supply
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            supply: ResourceSupply::new(),
            history: Vec::new(),
        }
    }

    /// Start a new game with a provided RNG, for deterministic tests
    pub fn new_with_rng<R: Rng>(rng: &mut R) -> Self {
        Self {
            board: Board::new(),
            supply: ResourceSupply::new_with_rng(rng),
            history: Vec::new(),
        }
    }

    /// Discard all progress and start over with a reshuffled supply
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Number of undoable actions
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    // ==================== Queries ====================

    /// Whether `selection` currently forms a valid footprint for `kind`
    pub fn matches(&self, selection: &BTreeSet<Coord>, kind: BuildingKind) -> bool {
        patterns::matches(&self.board, selection, kind)
    }

    /// Match the current selection against every building kind
    pub fn valid_buildings(&self, selection: &BTreeSet<Coord>) -> BTreeMap<BuildingKind, bool> {
        patterns::valid_buildings(&self.board, selection)
    }

    /// Current score of the board
    pub fn score(&self) -> i32 {
        score::score(&self.board)
    }

    /// Current score with per-rule tallies
    pub fn score_breakdown(&self) -> ScoreBreakdown {
        score::score_breakdown(&self.board)
    }

    /// Build the finished-game summary for the persistence collaborator.
    /// Timestamps are opaque to the core; the caller supplies them.
    pub fn snapshot(&self, player: &str, started_at: &str, finished_at: &str) -> GameSnapshot {
        GameSnapshot {
            player: player.to_string(),
            board: self.board.encode(),
            score: self.score(),
            achievements: snapshot::achievements(&self.board),
            started_at: started_at.to_string(),
            finished_at: finished_at.to_string(),
        }
    }

    // ==================== Mutating Operations ====================

    /// Draw the token at offer `slot` and place it on the empty cell at
    /// `coord`.
    pub fn place_resource(&mut self, coord: Coord, slot: usize) -> Result<(), GameError> {
        if !self.board.get(coord).is_empty() {
            return Err(GameError::CellOccupied);
        }
        // Validate the slot before touching the board so a failure leaves
        // both stores untouched.
        let token = self.supply.take(slot).ok_or(GameError::InvalidSlot)?;

        self.board.set(coord, Cell::Resource(token.resource));
        self.history
            .push(PlacementRecord::ResourcePlaced { coord, slot, token });
        Ok(())
    }

    /// Draw the token at offer `slot` and store it inside the factory at
    /// `coord`. The factory must not already hold a store.
    pub fn store_in_factory(&mut self, coord: Coord, slot: usize) -> Result<(), GameError> {
        // A non-factory target cannot host a store, whatever it holds.
        if self.board.get(coord).building() != Some(BuildingKind::Factory) {
            return Err(GameError::CellOccupied);
        }
        if self.board.factory_store(coord).is_some() {
            return Err(GameError::FactoryAlreadyStocked);
        }
        let token = self.supply.take(slot).ok_or(GameError::InvalidSlot)?;

        self.board.set_factory_store(coord, token.resource);
        self.history
            .push(PlacementRecord::FactoryStocked { coord, slot, token });
        Ok(())
    }

    /// Copy the resource stored in the factory at `factory` onto the empty
    /// cell at `target`. The store is not consumed; a stocked factory is a
    /// durable source.
    pub fn produce_from_factory(&mut self, target: Coord, factory: Coord) -> Result<(), GameError> {
        if self.board.get(factory).building() != Some(BuildingKind::Factory) {
            return Err(GameError::FactoryEmpty);
        }
        let resource = self
            .board
            .factory_store(factory)
            .ok_or(GameError::FactoryEmpty)?;
        if !self.board.get(target).is_empty() {
            return Err(GameError::CellOccupied);
        }

        self.board.set(target, Cell::Resource(resource));
        self.history.push(PlacementRecord::FactoryProduced {
            target,
            factory,
            resource,
        });
        Ok(())
    }

    /// Commit the selected resource cells into a building. The building
    /// marker lands on `anchor`; every other selected cell becomes empty
    /// and its resource leaves circulation for good.
    pub fn commit_building(
        &mut self,
        kind: BuildingKind,
        selection: &BTreeSet<Coord>,
        anchor: Coord,
    ) -> Result<(), GameError> {
        if !selection.contains(&anchor) || !self.matches(selection, kind) {
            return Err(GameError::PatternMismatch);
        }

        for &coord in selection {
            self.board.set(coord, Cell::Empty);
        }
        self.board.set(anchor, Cell::Building(kind));
        self.history.push(PlacementRecord::BuildingCommitted {
            kind,
            anchor,
            selection: selection.clone(),
        });
        Ok(())
    }

    // ==================== Undo ====================

    /// Revert the most recent action.
    ///
    /// One asymmetry is deliberate: undoing a building commit clears the
    /// marker and reopens the prior selection, but the resources that were
    /// consumed into the building are gone and stay gone. Everything else
    /// round-trips exactly.
    pub fn undo(&mut self) -> UndoOutcome {
        let Some(record) = self.history.pop() else {
            return UndoOutcome::NothingToUndo;
        };

        match record {
            PlacementRecord::ResourcePlaced { coord, slot, token } => {
                self.board.set(coord, Cell::Empty);
                self.supply.undo_take(slot, token);
                UndoOutcome::Undone { reopened: None }
            }
            PlacementRecord::FactoryStocked { coord, slot, token } => {
                self.board.clear_factory_store(coord);
                self.supply.undo_take(slot, token);
                UndoOutcome::Undone { reopened: None }
            }
            PlacementRecord::FactoryProduced { target, .. } => {
                // Production never consumed the store, so only the copy on
                // the grid is removed.
                self.board.set(target, Cell::Empty);
                UndoOutcome::Undone { reopened: None }
            }
            PlacementRecord::BuildingCommitted {
                kind,
                anchor,
                selection,
            } => {
                self.board.set(anchor, Cell::Empty);
                UndoOutcome::Undone {
                    reopened: Some(ReopenedSelection {
                        kind,
                        cells: selection,
                    }),
                }
            }
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
