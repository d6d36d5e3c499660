//! The authoritative game state.
//!
//! `GameState` is the only unit of truth. The room store owns it; the
//! engine reads a borrowed snapshot and hands back a new owned value, so a
//! stored state is never aliased by an in-flight mutation.
//!
//! The log is an `im::Vector`, which makes the per-action snapshot cheap
//! even late in a game.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::LogEntry;
use super::board::{create_empty_board, Board};
use super::player::{Player, PlayerId};
use super::tile::Tile;

/// First epoch.
pub const FIRST_EPOCH: u8 = 1;

/// Phase state machine: `lobby → playing ⇄ scoring → playing | finished`.
///
/// `Finished` is absorbing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    /// Waiting for players
    Lobby,
    /// Turns in progress
    Playing,
    /// Board full, waiting for the epoch to be scored
    Scoring,
    /// Game over
    Finished,
}

/// Full state of one room.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Game id
    pub id: String,
    /// Room code
    pub room_code: String,
    /// Current phase
    pub phase: GamePhase,
    /// 1, 2 or 3
    pub epoch: u8,
    /// Index into `players` of the player on turn.
    pub current_player_index: usize,
    /// Seated players in turn order.
    pub players: Vec<Player>,
    /// The board
    pub board: Board,
    /// Remaining deck; the last element is the top.
    pub tile_deck: Vec<Tile>,
    /// Append-only action log
    pub game_log: Vector<LogEntry>,
    /// Most recently placed tile
    pub last_played_tile: Option<Tile>,
    /// Creation time in milliseconds
    pub created_at: i64,
}

impl GameState {
    /// An empty lobby-phase state.
    pub fn lobby(id: impl Into<String>, room_code: impl Into<String>, created_at: i64) -> Self {
        Self {
            id: id.into(),
            room_code: room_code.into(),
            phase: GamePhase::Lobby,
            epoch: FIRST_EPOCH,
            current_player_index: 0,
            players: Vec::new(),
            board: create_empty_board(),
            tile_deck: Vec::new(),
            game_log: Vector::new(),
            last_played_tile: None,
            created_at,
        }
    }

    /// Player count.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// The player on turn.
    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_player_index)
    }

    /// Look up a player by id.
    #[must_use]
    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    /// Mutable lookup by id.
    pub fn player_mut(&mut self, id: &PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| &p.id == id)
    }

    /// The host (`players[0]`).
    #[must_use]
    pub fn host(&self) -> Option<&Player> {
        self.players.first()
    }

    /// Tiles in circulation this epoch: deck, board and hands.
    #[must_use]
    pub fn tiles_in_play(&self) -> usize {
        let on_board = self.board.cells().filter(|c| c.tile.is_some()).count();
        let held: usize = self
            .players
            .iter()
            .map(|p| usize::from(p.secret_tile.is_some()) + usize::from(p.drawn_tile.is_some()))
            .sum();
        self.tile_deck.len() + on_board + held
    }

    /// Append a log entry.
    pub fn record(&mut self, entry: LogEntry) {
        self.game_log.push_back(entry);
    }
}
