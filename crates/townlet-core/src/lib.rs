//! Townlet - rules engine for a 4x4 tile-placement town-building puzzle
//!
//! This crate provides the core game logic for Townlet, including:
//! - The town grid and cell contents
//! - The footprint template library and pattern matcher
//! - The closed-loop resource supply (deck + offer)
//! - Mutating operations with a fully reversible action log
//! - The scoring engine and finished-game snapshots
//!
//! # Architecture
//!
//! The engine is platform-agnostic. It can be compiled to:
//! - Native Rust, embedded by the archive server and tests
//! - WebAssembly for the browser front end (feature `wasm`)
//!
//! # Modules
//!
//! - [`board`]: resources, buildings, cells, and the 4x4 grid
//! - [`patterns`]: footprint templates and the pattern matcher
//! - [`supply`]: the shuffled draw deck and visible offer
//! - [`history`]: invertible placement records
//! - [`game`]: game state, mutating operations, and undo
//! - [`score`]: the scoring engine
//! - [`snapshot`]: finished-game summaries and achievements

pub mod board;
pub mod game;
pub mod history;
pub mod patterns;
pub mod score;
pub mod snapshot;
pub mod supply;
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use board::{Board, BoardDecodeError, BuildingKind, Cell, Coord, Resource, BOARD_SIZE};
pub use game::{Game, GameError};
pub use history::{PlacementRecord, ReopenedSelection, UndoOutcome};
pub use patterns::{display_variant, matches, valid_buildings, variants, Footprint};
pub use score::{score, score_breakdown, ScoreBreakdown};
pub use snapshot::{achievements, Achievement, GameSnapshot};
pub use supply::{ResourceSupply, TakenToken, COPIES_PER_RESOURCE, OFFER_SIZE};
