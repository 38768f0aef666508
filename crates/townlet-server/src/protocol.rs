//! WebSocket protocol messages for the Townlet game archive.

use serde::{Deserialize, Serialize};
use townlet_core::{Achievement, GameSnapshot};
use uuid::Uuid;

/// Messages sent from client to server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ClientMessage {
    /// Submit a finished game for archival
    SubmitGame { snapshot: GameSnapshot },

    /// Request the archived game list (best scores first)
    ListGames,

    /// Request a single archived game
    GetGame { game_id: Uuid },

    /// Ping for keepalive
    Ping,
}

/// Messages sent from server to client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ServerMessage {
    /// Welcome message with assigned client ID
    Welcome { client_id: Uuid },

    /// Game archived successfully
    GameArchived { game_id: Uuid, score: i32 },

    /// List of archived games
    GameList { games: Vec<GameEntry> },

    /// A single archived game
    Game { entry: GameEntry, board: String },

    /// Error occurred
    Error { message: String },

    /// Pong response
    Pong,
}

/// Archived game summary for clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameEntry {
    pub id: Uuid,
    pub player: String,
    pub score: i32,
    pub achievements: Vec<Achievement>,
    pub finished_at: String,
}
