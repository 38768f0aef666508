//! Invertible placement records for the undo log.
//!
//! Every mutating game operation appends one record carrying exactly the
//! data its inverse needs. Records are owned by the game's history log and
//! popped (then discarded) on undo.

use crate::board::{BuildingKind, Coord, Resource};
use crate::supply::TakenToken;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One recorded mutating action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementRecord {
    /// A resource was drawn from the offer and placed on an empty cell
    ResourcePlaced {
        coord: Coord,
        slot: usize,
        token: TakenToken,
    },

    /// A resource was drawn from the offer and stored inside a factory
    FactoryStocked {
        coord: Coord,
        slot: usize,
        token: TakenToken,
    },

    /// A factory's stored resource was copied onto an empty cell
    FactoryProduced {
        target: Coord,
        factory: Coord,
        resource: Resource,
    },

    /// A selection of resource cells was committed into a building
    BuildingCommitted {
        kind: BuildingKind,
        anchor: Coord,
        /// The full selection, anchor included, so undo can reopen it
        selection: BTreeSet<Coord>,
    },
}

/// Result of an undo request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UndoOutcome {
    /// The most recent action was reverted
    Undone {
        /// Present when a building commit was undone: the selection to
        /// re-establish in the UI. The consumed resources are not restored.
        reopened: Option<ReopenedSelection>,
    },
    /// The history was empty; nothing changed
    NothingToUndo,
}

/// A selection re-established by undoing a building commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReopenedSelection {
    pub kind: BuildingKind,
    pub cells: BTreeSet<Coord>,
}
