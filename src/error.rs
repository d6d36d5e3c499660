//! Error types.
//!
//! Every rejection is recoverable and carries a stable `code()` the host
//! relays to the offending client verbatim.

use thiserror::Error;

/// Why a move was rejected by the validator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum MoveError {
    /// The game is in the lobby, being scored, or over.
    #[error("game is not in progress")]
    GameNotInProgress,
    /// Someone other than the player on turn acted.
    #[error("not your turn")]
    NotYourTurn,
    /// The player holds a drawn tile and tried anything but placing it.
    #[error("you must place your drawn tile first")]
    MustPlaceDrawnTileFirst,
    /// The deck has no tiles left.
    #[error("no tiles left in deck")]
    DeckEmpty,
    /// A second draw while already holding a drawn tile.
    #[error("already holding a drawn tile")]
    AlreadyHoldingTile,
    /// Coordinates outside the 5×6 board.
    #[error("invalid position")]
    InvalidPosition,
    /// Target cell already holds a tile or castle.
    #[error("cell already occupied")]
    CellOccupied,
    /// No castles of the requested rank remain.
    #[error("no castles of this rank available")]
    NoCastlesOfRank,
    /// Placing a drawn tile without holding one.
    #[error("no drawn tile to place")]
    NoDrawnTile,
    /// Playing a secret tile that was already used.
    #[error("no secret tile available")]
    NoSecretTile,
}

/// Broad class of a move rejection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveErrorCategory {
    /// Acting out of turn or out of sequence.
    TurnViolation,
    /// Nothing left to draw or place.
    ResourceExhausted,
    /// Bad or taken target cell.
    PlacementConflict,
    /// Placing something the player does not hold.
    MissingResource,
}

impl MoveError {
    /// Stable machine-readable code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            MoveError::GameNotInProgress => "GAME_NOT_IN_PROGRESS",
            MoveError::NotYourTurn => "NOT_YOUR_TURN",
            MoveError::MustPlaceDrawnTileFirst => "MUST_PLACE_DRAWN_TILE_FIRST",
            MoveError::DeckEmpty => "DECK_EMPTY",
            MoveError::AlreadyHoldingTile => "ALREADY_HOLDING_TILE",
            MoveError::InvalidPosition => "INVALID_POSITION",
            MoveError::CellOccupied => "CELL_OCCUPIED",
            MoveError::NoCastlesOfRank => "NO_CASTLES_OF_RANK",
            MoveError::NoDrawnTile => "NO_DRAWN_TILE",
            MoveError::NoSecretTile => "NO_SECRET_TILE",
        }
    }

    /// Which class of rejection this is.
    #[must_use]
    pub const fn category(self) -> MoveErrorCategory {
        match self {
            MoveError::GameNotInProgress
            | MoveError::NotYourTurn
            | MoveError::MustPlaceDrawnTileFirst
            | MoveError::AlreadyHoldingTile => MoveErrorCategory::TurnViolation,
            MoveError::DeckEmpty | MoveError::NoCastlesOfRank => MoveErrorCategory::ResourceExhausted,
            MoveError::InvalidPosition | MoveError::CellOccupied => MoveErrorCategory::PlacementConflict,
            MoveError::NoDrawnTile | MoveError::NoSecretTile => MoveErrorCategory::MissingResource,
        }
    }
}

/// Input that never reaches the validator.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// Unknown action type, missing fields or out-of-domain values.
    #[error("malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),
    /// Configuration that cannot produce a playable game.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl PayloadError {
    /// Stable machine-readable code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            PayloadError::Malformed(_) => "MALFORMED_PAYLOAD",
            PayloadError::Config(_) => "INVALID_CONFIG",
        }
    }
}

/// Room-lifecycle rejections.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum LobbyError {
    /// All seats are taken.
    #[error("room is full")]
    RoomFull,
    /// Joining or starting after the game began.
    #[error("room is not accepting players")]
    NotInLobby,
    /// The player is not seated in this room.
    #[error("player not found in room")]
    PlayerNotFound,
    /// Too few players to start.
    #[error("need at least {0} players")]
    NotEnoughPlayers(usize),
    /// Someone has not toggled ready.
    #[error("not all players are ready")]
    PlayersNotReady,
}

impl LobbyError {
    /// Stable machine-readable code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            LobbyError::RoomFull => "ROOM_FULL",
            LobbyError::NotInLobby => "NOT_IN_LOBBY",
            LobbyError::PlayerNotFound => "PLAYER_NOT_FOUND",
            LobbyError::NotEnoughPlayers(_) => "NOT_ENOUGH_PLAYERS",
            LobbyError::PlayersNotReady => "PLAYERS_NOT_READY",
        }
    }
}

/// Room store failures.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The state could not be encoded or decoded.
    #[error("state encoding failed: {0}")]
    Encoding(#[from] bincode::Error),
}

/// Anything a room service call can fail with.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No room with this code.
    #[error("room {0} not found")]
    RoomNotFound(String),
    /// Epoch scoring requested while the board is not full.
    #[error("epoch cannot be scored before the board is full")]
    NotScoring,
    /// Every room code drawn collided with a live room.
    #[error("no free room code after {0} attempts")]
    RoomCodesExhausted(usize),
    /// Rejected move.
    #[error(transparent)]
    Move(#[from] MoveError),
    /// Rejected lobby operation.
    #[error(transparent)]
    Lobby(#[from] LobbyError),
    /// Malformed input.
    #[error(transparent)]
    Payload(#[from] PayloadError),
    /// Storage failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    /// Stable machine-readable code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::RoomNotFound(_) => "ROOM_NOT_FOUND",
            ServiceError::NotScoring => "NOT_SCORING",
            ServiceError::RoomCodesExhausted(_) => "ROOM_CODES_EXHAUSTED",
            ServiceError::Move(e) => e.code(),
            ServiceError::Lobby(e) => e.code(),
            ServiceError::Payload(e) => e.code(),
            ServiceError::Store(_) => "STORE_ERROR",
        }
    }
}
