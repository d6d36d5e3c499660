//! Tiles and the per-epoch tile deck.
//!
//! ## Deck composition
//!
//! Every epoch starts from the same 23 tiles:
//! - 12 resource tiles, two each of +1 through +6
//! - 6 hazard tiles, one each of -1 through -6
//! - 2 mountains, 1 dragon, 1 gold mine, 1 wizard
//!
//! Special tiles carry value 0 and only act as scoring modifiers.

use serde::{Deserialize, Serialize};

use super::ids::IdSource;
use super::rng::GameRng;

/// Number of tiles in a fresh deck.
pub const DECK_SIZE: usize = 23;

/// Tile category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileKind {
    /// Positive value, cancelled by a dragon in the same segment.
    Resource,
    /// Negative value, always counted.
    Hazard,
    /// Splits a row or column into two independently scored segments.
    Mountain,
    /// Nullifies resources in its segment.
    Dragon,
    /// Doubles its segment's tile value.
    #[serde(rename = "goldmine")]
    GoldMine,
    /// Raises the rank of orthogonally adjacent castles by one.
    Wizard,
}

impl TileKind {
    /// Whether this kind only modifies scoring and carries no value.
    #[must_use]
    pub const fn is_special(self) -> bool {
        !matches!(self, TileKind::Resource | TileKind::Hazard)
    }
}

impl std::fmt::Display for TileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TileKind::Resource => "resource",
            TileKind::Hazard => "hazard",
            TileKind::Mountain => "mountain",
            TileKind::Dragon => "dragon",
            TileKind::GoldMine => "goldmine",
            TileKind::Wizard => "wizard",
        };
        f.write_str(name)
    }
}

/// A single tile (`TileConfig` on the wire).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Unique within a game.
    pub id: String,
    /// Category.
    #[serde(rename = "type")]
    pub kind: TileKind,
    /// Signed value; 0 for special tiles.
    pub value: i32,
    /// Presentation asset, never read by the engine.
    pub image: String,
}

impl Tile {
    /// Create a tile with an empty image.
    pub fn new(id: impl Into<String>, kind: TileKind, value: i32) -> Self {
        Self {
            id: id.into(),
            kind,
            value,
            image: String::new(),
        }
    }

    /// Opaque stand-in used when a tile must be shown as present but unknown.
    #[must_use]
    pub fn hidden() -> Self {
        Self::new("hidden", TileKind::Resource, 0)
    }

    /// Whether this is the opaque placeholder.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.id == "hidden"
    }

    /// Human-readable label such as `resource (+3)`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} ({:+})", self.kind, self.value)
    }
}

/// The kinds and values of a full deck, before ids are assigned.
#[must_use]
pub fn deck_composition() -> Vec<(TileKind, i32)> {
    let mut tiles = Vec::with_capacity(DECK_SIZE);

    for value in 1..=6 {
        tiles.push((TileKind::Resource, value));
        tiles.push((TileKind::Resource, value));
    }
    for value in 1..=6 {
        tiles.push((TileKind::Hazard, -value));
    }
    tiles.push((TileKind::Mountain, 0));
    tiles.push((TileKind::Mountain, 0));
    tiles.push((TileKind::Dragon, 0));
    tiles.push((TileKind::GoldMine, 0));
    tiles.push((TileKind::Wizard, 0));

    tiles
}

/// Build a full deck with fresh ids and shuffle it.
///
/// The deck is a stack: tiles are drawn from the end.
pub fn create_tile_deck(rng: &mut GameRng, ids: &mut dyn IdSource) -> Vec<Tile> {
    let mut deck: Vec<Tile> = deck_composition()
        .into_iter()
        .map(|(kind, value)| Tile::new(ids.next_id(), kind, value))
        .collect();
    rng.shuffle(&mut deck);
    deck
}
