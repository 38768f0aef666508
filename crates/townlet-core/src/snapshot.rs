//! Finished-game snapshots and achievements.
//!
//! A snapshot is the serializable summary handed to the persistence
//! collaborator: the encoded board, the computed score, earned
//! achievements, and the game's wall-clock bounds. The core builds it and
//! hands it upward; it never talks to storage itself.

use crate::board::{Board, BuildingKind};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Achievements earned by a finished town.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Achievement {
    /// No empty cell remains
    PerfectTown,
    /// At least 5 distinct building kinds
    MasterBuilder,
    /// At least 2 factories
    FactoryMagnate,
    /// At least 3 chapels
    SpiritualHaven,
    /// At least 4 taverns
    SocialHub,
}

impl Achievement {
    /// Display title
    pub fn title(&self) -> &'static str {
        match self {
            Achievement::PerfectTown => "Perfect Town",
            Achievement::MasterBuilder => "Master Builder",
            Achievement::FactoryMagnate => "Factory Magnate",
            Achievement::SpiritualHaven => "Spiritual Haven",
            Achievement::SocialHub => "Social Hub",
        }
    }
}

/// Compute the achievements earned by a board.
pub fn achievements(board: &Board) -> Vec<Achievement> {
    let mut earned = Vec::new();

    if board.count_empty() == 0 {
        earned.push(Achievement::PerfectTown);
    }

    let distinct_kinds: HashSet<BuildingKind> = board
        .iter()
        .filter_map(|(_, cell)| cell.building())
        .collect();
    if distinct_kinds.len() >= 5 {
        earned.push(Achievement::MasterBuilder);
    }

    if board.count_buildings(BuildingKind::Factory) >= 2 {
        earned.push(Achievement::FactoryMagnate);
    }
    if board.count_buildings(BuildingKind::Chapel) >= 3 {
        earned.push(Achievement::SpiritualHaven);
    }
    if board.count_buildings(BuildingKind::Tavern) >= 4 {
        earned.push(Achievement::SocialHub);
    }

    earned
}

/// Serializable summary of a finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Player identifier as the front end knows it
    pub player: String,
    /// Board encoded one character per cell, row-major (see [`Board::encode`])
    pub board: String,
    /// Final score
    pub score: i32,
    /// Achievements earned
    pub achievements: Vec<Achievement>,
    /// When the game started, as an opaque caller-supplied timestamp
    pub started_at: String,
    /// When the game finished
    pub finished_at: String,
}
