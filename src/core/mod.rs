//! Core types: board, tiles, players, actions, state, RNG, configuration.
//!
//! Everything here is plain data plus the factories that build a fresh
//! deck and board. Rule logic lives in `rules`.

pub mod action;
pub mod board;
pub mod clock;
pub mod config;
pub mod ids;
pub mod player;
pub mod rng;
pub mod state;
pub mod tile;

pub use action::{Action, GoldSummary, LogAction, LogCastle, LogEntry};
pub use board::{create_empty_board, Board, BoardCell, Castle, CastleRank, Line, Position, BOARD_COLS, BOARD_ROWS};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::GameConfig;
pub use ids::{IdSource, SequentialIds, UuidIds};
pub use player::{initial_castles, rank1_allotment, CastleSupply, Player, PlayerColor, PlayerId};
pub use rng::{GameRng, GameRngState};
pub use state::{GamePhase, GameState, FIRST_EPOCH};
pub use tile::{create_tile_deck, deck_composition, Tile, TileKind, DECK_SIZE};
