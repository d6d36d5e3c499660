//! Player actions and the game log.
//!
//! Actions arrive as JSON objects tagged by `type`:
//!
//! ```
//! use kingdoms_engine::core::{Action, CastleRank};
//!
//! let action = Action::from_json(r#"{"type":"PLACE_CASTLE","castleRank":2,"row":1,"col":4}"#).unwrap();
//! assert_eq!(action, Action::PlaceCastle { castle_rank: CastleRank::Two, row: 1, col: 4 });
//!
//! assert!(Action::from_json(r#"{"type":"PLACE_CASTLE","castleRank":9,"row":1,"col":4}"#).is_err());
//! ```
//!
//! The two-step draw flow (`DRAW_TILE` then `PLACE_DRAWN_TILE`) is the
//! primary way to play a deck tile. `DRAW_AND_PLACE_TILE` is kept for older
//! clients: same net board effect, no intermediate lock.

use serde::{Deserialize, Serialize};

use super::board::{CastleRank, Position};
use super::player::PlayerColor;
use super::tile::Tile;
use crate::error::PayloadError;

/// A move submitted by the player on turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Put a castle from the player's supply on an empty cell.
    #[serde(rename_all = "camelCase")]
    PlaceCastle {
        /// Rank to place
        castle_rank: CastleRank,
        /// Target row
        row: usize,
        /// Target column
        col: usize,
    },
    /// Take the top deck tile into hand. Does not end the turn.
    DrawTile,
    /// Place the tile taken with `DrawTile`.
    PlaceDrawnTile {
        /// Target row
        row: usize,
        /// Target column
        col: usize,
    },
    /// Draw and place in one step.
    DrawAndPlaceTile {
        /// Target row
        row: usize,
        /// Target column
        col: usize,
    },
    /// Place the player's secret tile.
    PlaySecretTile {
        /// Target row
        row: usize,
        /// Target column
        col: usize,
    },
}

impl Action {
    /// Parse an inbound payload, rejecting anything outside the action domain.
    pub fn from_json(payload: &str) -> Result<Self, PayloadError> {
        Ok(serde_json::from_str(payload)?)
    }

    /// Target cell, for actions that place something.
    #[must_use]
    pub const fn position(&self) -> Option<Position> {
        match *self {
            Action::DrawTile => None,
            Action::PlaceCastle { row, col, .. }
            | Action::PlaceDrawnTile { row, col }
            | Action::DrawAndPlaceTile { row, col }
            | Action::PlaySecretTile { row, col } => Some(Position::new(row, col)),
        }
    }

    /// Whether the turn passes after this action.
    #[must_use]
    pub const fn ends_turn(&self) -> bool {
        !matches!(self, Action::DrawTile)
    }

    /// Wire name of the action type.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Action::PlaceCastle { .. } => "PLACE_CASTLE",
            Action::DrawTile => "DRAW_TILE",
            Action::PlaceDrawnTile { .. } => "PLACE_DRAWN_TILE",
            Action::DrawAndPlaceTile { .. } => "DRAW_AND_PLACE_TILE",
            Action::PlaySecretTile { .. } => "PLAY_SECRET_TILE",
        }
    }
}

/// Kind of a log entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogAction {
    /// Castle placed
    PlaceCastle,
    /// Tile drawn into hand
    DrawTile,
    /// Deck tile placed, via either draw flow
    PlaceTile,
    /// Secret tile placed
    PlaySecretTile,
    /// Epoch scored
    EpochScore,
}

/// Gold held by one player after an epoch was scored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoldSummary {
    /// Player name
    pub player_name: String,
    /// Player color
    pub player_color: PlayerColor,
    /// Gold after scoring
    pub gold: i64,
}

/// Castle placed by a logged action, on the wire as `{"rank": n}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogCastle {
    /// Rank placed
    pub rank: CastleRank,
}

/// Immutable record of one action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// Unique id
    pub id: String,
    /// Milliseconds
    pub timestamp: i64,
    /// Epoch the action happened in
    pub epoch: u8,
    /// Acting player's name, or `System`
    pub player_name: String,
    /// Acting player's color; `None` for system entries.
    pub player_color: Option<PlayerColor>,
    /// What happened
    pub action: LogAction,
    /// Human-readable description
    pub details: String,
    /// Target cell
    pub position: Option<Position>,
    /// Tile placed
    pub tile: Option<Tile>,
    /// Castle placed
    pub castle: Option<LogCastle>,
    /// Gold per player, for epoch summaries
    pub scores: Option<Vec<GoldSummary>>,
}
