//! # kingdoms-engine
//!
//! Authoritative rule engine for Kingdoms, a 2–4 player tile-and-castle
//! board game played over three epochs on a 5×6 board.
//!
//! ## Design Principles
//!
//! 1. **State In, State Out**: Every rule takes a borrowed `GameState` and
//!    returns a new one. A rejected action never leaves a half-applied
//!    state behind.
//!
//! 2. **Validate Before Mutate**: `is_valid_move` is pure and is re-run by
//!    `execute_action` before anything is copied.
//!
//! 3. **Injected Side Effects**: Deck shuffling, ids and timestamps come
//!    from the seeded `GameRng`, an `IdSource` and a `Clock` held by the
//!    `Kingdoms` engine, so a seeded engine replays exactly.
//!
//! ## Modules
//!
//! - `core`: Board, tiles, players, actions, state, RNG, configuration
//! - `rules`: Validator, executor, epoch transition, `RulesEngine` trait
//! - `scoring`: Row and column scoring for an epoch
//! - `view`: Per-player redaction of hidden tiles
//! - `lobby`: Room codes, seating, readiness, start and abandon
//! - `store`: Room storage
//! - `service`: Per-room sequencing of engine calls over a store
//! - `simulation`: Random self-play
//!
//! ## Example
//!
//! ```
//! use kingdoms_engine::{Action, CastleRank, KingdomsBuilder, RulesEngine};
//! use kingdoms_engine::lobby::toggle_ready;
//!
//! let mut engine = KingdomsBuilder::new().seed(7).build().unwrap();
//! let (lobby, host) = engine.create_lobby("Ada");
//! let (lobby, guest) = engine.join_lobby(&lobby, "Bo").unwrap();
//! let lobby = toggle_ready(&lobby, &host).unwrap();
//! let lobby = toggle_ready(&lobby, &guest).unwrap();
//!
//! let state = engine.start_game(&lobby).unwrap();
//! let action = Action::PlaceCastle { castle_rank: CastleRank::Two, row: 0, col: 0 };
//! let state = engine.apply(&state, &host, action).unwrap();
//! assert_eq!(state.current_player_index, 1);
//! ```

pub mod core;
pub mod error;
pub mod lobby;
pub mod rules;
pub mod scoring;
pub mod service;
pub mod simulation;
pub mod store;
pub mod view;

// Re-export commonly used types
pub use crate::core::{
    Action, Board, BoardCell, Castle, CastleRank, GameConfig, GamePhase, GameRng, GameRngState, GameState,
    LogAction, LogEntry, Player, PlayerColor, PlayerId, Position, Tile, TileKind,
};

pub use crate::error::{LobbyError, MoveError, MoveErrorCategory, PayloadError, ServiceError, StoreError};

pub use crate::rules::{final_standings, is_valid_move, GameResult, Kingdoms, KingdomsBuilder, RulesEngine, Standing};

pub use crate::scoring::{calculate_epoch_scores, PlayerScore};

pub use crate::view::create_player_view;

pub use crate::store::{MemoryRoomStore, RoomStore};

pub use crate::service::{EpochOutcome, RoomService, RoomTicket};

pub use crate::simulation::{play_random_game, Playout, SimulationConfig};
