//! Per-player views.
//!
//! The board, the log and every public counter pass through untouched.
//! Another player's secret or drawn tile becomes a `Tile::hidden()`
//! placeholder, so the viewer still sees that the tile exists. The deck
//! keeps its length and nothing else.

use crate::core::{GameState, PlayerId, Tile};

/// Copy of `state` as `viewer` may see it. The input is never modified.
///
/// An unknown `viewer` gets the fully redacted spectator view.
#[must_use]
pub fn create_player_view(state: &GameState, viewer: &PlayerId) -> GameState {
    let mut view = state.clone();

    for player in view.players.iter_mut().filter(|p| &p.id != viewer) {
        redact(&mut player.secret_tile);
        redact(&mut player.drawn_tile);
    }

    let remaining = view.tile_deck.len();
    view.tile_deck = vec![Tile::hidden(); remaining];

    view
}

fn redact(slot: &mut Option<Tile>) {
    if let Some(tile) = slot.as_mut() {
        *tile = Tile::hidden();
    }
}
