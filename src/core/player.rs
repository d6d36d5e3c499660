//! Players, their colors and their castle supply.
//!
//! Player order is fixed when the game starts: it drives turn rotation and
//! `players[0]` is the host.

use serde::{Deserialize, Serialize};

use super::board::CastleRank;
use super::tile::Tile;

/// Stable player identifier handed out by the identity source.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    /// Wrap an id string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// One of the four player colors, unique within a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerColor {
    /// Always the host.
    Red,
    /// Second to join
    Yellow,
    /// Third to join
    Blue,
    /// Fourth to join
    Green,
}

impl PlayerColor {
    /// Colors in the order they are handed out.
    pub const ALL: [PlayerColor; 4] = [
        PlayerColor::Red,
        PlayerColor::Yellow,
        PlayerColor::Blue,
        PlayerColor::Green,
    ];
}

impl std::fmt::Display for PlayerColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PlayerColor::Red => "red",
            PlayerColor::Yellow => "yellow",
            PlayerColor::Blue => "blue",
            PlayerColor::Green => "green",
        };
        f.write_str(name)
    }
}

/// Castles a player still has in hand, per rank.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastleSupply {
    /// Rank-1 castles; replenished every epoch.
    pub rank1: u8,
    /// Rank-2 castles
    pub rank2: u8,
    /// Rank-3 castles
    pub rank3: u8,
    /// Rank-4 castles
    pub rank4: u8,
}

impl CastleSupply {
    /// Remaining castles of `rank`.
    #[must_use]
    pub fn count(&self, rank: CastleRank) -> u8 {
        match rank {
            CastleRank::One => self.rank1,
            CastleRank::Two => self.rank2,
            CastleRank::Three => self.rank3,
            CastleRank::Four => self.rank4,
        }
    }

    /// Mutable counter for `rank`.
    pub fn count_mut(&mut self, rank: CastleRank) -> &mut u8 {
        match rank {
            CastleRank::One => &mut self.rank1,
            CastleRank::Two => &mut self.rank2,
            CastleRank::Three => &mut self.rank3,
            CastleRank::Four => &mut self.rank4,
        }
    }

    /// Castles left across all ranks.
    #[must_use]
    pub fn total(&self) -> u32 {
        CastleRank::ALL.iter().map(|&r| u32::from(self.count(r))).sum()
    }
}

/// Starting castles for a game with `player_count` players.
///
/// Fewer rank-1 castles are handed out as more players compete:
/// 2 players get 4, 3 get 3, 4 get 2. Higher ranks are always 3/2/1.
#[must_use]
pub fn initial_castles(player_count: usize) -> CastleSupply {
    CastleSupply {
        rank1: rank1_allotment(player_count),
        rank2: 3,
        rank3: 2,
        rank4: 1,
    }
}

/// Rank-1 castles handed out at each epoch start.
#[must_use]
pub const fn rank1_allotment(player_count: usize) -> u8 {
    match player_count {
        0..=2 => 4,
        3 => 3,
        _ => 2,
    }
}

/// A seated player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Stable id
    pub id: PlayerId,
    /// Display name
    pub name: String,
    /// Unique color
    pub color: PlayerColor,
    /// Accumulated gold; only changes at epoch boundaries and may go negative.
    pub gold: i64,
    /// Castles left to place
    pub castles: CastleSupply,
    /// Privately dealt tile, playable once.
    pub secret_tile: Option<Tile>,
    /// Tile drawn but not yet placed. Locks the player out of other actions.
    pub drawn_tile: Option<Tile>,
    /// Lobby readiness
    pub is_ready: bool,
}

impl Player {
    /// A fresh lobby player.
    pub fn new(id: PlayerId, name: impl Into<String>, color: PlayerColor, starting_gold: i64) -> Self {
        Self {
            id,
            name: name.into(),
            color,
            gold: starting_gold,
            castles: initial_castles(2),
            secret_tile: None,
            drawn_tile: None,
            is_ready: false,
        }
    }
}
