//! In-memory archive of finished games.

use dashmap::DashMap;
use thiserror::Error;
use townlet_core::{score, Board, GameSnapshot};
use uuid::Uuid;

use crate::protocol::GameEntry;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("invalid board string: {0}")]
    InvalidBoard(#[from] townlet_core::BoardDecodeError),

    #[error("claimed score {claimed} does not match computed score {computed}")]
    ScoreMismatch { claimed: i32, computed: i32 },

    #[error("no archived game with that id")]
    NotFound,
}

/// One archived finished game.
#[derive(Debug, Clone)]
pub struct ArchivedGame {
    pub id: Uuid,
    /// Client connection that submitted it
    pub submitted_by: Uuid,
    pub snapshot: GameSnapshot,
}

impl ArchivedGame {
    pub fn to_entry(&self) -> GameEntry {
        GameEntry {
            id: self.id,
            player: self.snapshot.player.clone(),
            score: self.snapshot.score,
            achievements: self.snapshot.achievements.clone(),
            finished_at: self.snapshot.finished_at.clone(),
        }
    }
}

/// The archive store. Validates snapshots before accepting them: the board
/// string must decode and the claimed score must match a recomputation.
/// Achievements are stored as submitted.
#[derive(Default)]
pub struct GameArchive {
    games: DashMap<Uuid, ArchivedGame>,
}

impl GameArchive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Validate and store a finished game, returning its archive id.
    pub fn submit(
        &self,
        submitted_by: Uuid,
        snapshot: GameSnapshot,
    ) -> Result<Uuid, ArchiveError> {
        let board = Board::decode(&snapshot.board)?;
        let computed = score(&board);
        if computed != snapshot.score {
            return Err(ArchiveError::ScoreMismatch {
                claimed: snapshot.score,
                computed,
            });
        }

        let id = Uuid::new_v4();
        self.games.insert(
            id,
            ArchivedGame {
                id,
                submitted_by,
                snapshot,
            },
        );
        Ok(id)
    }

    /// All archived games, best scores first; ties by finish time.
    pub fn list(&self) -> Vec<GameEntry> {
        let mut entries: Vec<GameEntry> = self.games.iter().map(|g| g.to_entry()).collect();
        entries.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.finished_at.cmp(&b.finished_at))
        });
        entries
    }

    /// Fetch one archived game.
    pub fn get(&self, id: Uuid) -> Result<(GameEntry, String), ArchiveError> {
        let game = self.games.get(&id).ok_or(ArchiveError::NotFound)?;
        Ok((game.to_entry(), game.snapshot.board.clone()))
    }
}
