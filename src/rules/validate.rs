//! Move validation.
//!
//! Checks run in a fixed order and the first failure wins:
//!
//! 0. The game must be in the `playing` phase.
//! 1. Only the player on turn may act.
//! 2. A player holding a drawn tile may only place it.
//! 3. `DRAW_TILE` needs a non-empty deck and an empty hand.
//! 4. Every other action needs an on-board, unoccupied target.
//! 5. Action-specific supply checks (castle rank, drawn tile, secret
//!    tile, deck for the combined draw).

use crate::core::{Action, GamePhase, GameState, PlayerId};
use crate::error::MoveError;

/// Decide whether `player_id` may take `action` on `state`. Never mutates.
pub fn is_valid_move(state: &GameState, player_id: &PlayerId, action: &Action) -> Result<(), MoveError> {
    if state.phase != GamePhase::Playing {
        return Err(MoveError::GameNotInProgress);
    }

    let player = state
        .current_player()
        .filter(|p| &p.id == player_id)
        .ok_or(MoveError::NotYourTurn)?;

    if player.drawn_tile.is_some() && !matches!(action, Action::PlaceDrawnTile { .. }) {
        return Err(MoveError::MustPlaceDrawnTileFirst);
    }

    let Some(pos) = action.position() else {
        // DRAW_TILE
        if state.tile_deck.is_empty() {
            return Err(MoveError::DeckEmpty);
        }
        if player.drawn_tile.is_some() {
            return Err(MoveError::AlreadyHoldingTile);
        }
        return Ok(());
    };

    let cell = state.board.get(pos).ok_or(MoveError::InvalidPosition)?;
    if cell.is_occupied() {
        return Err(MoveError::CellOccupied);
    }

    match *action {
        Action::PlaceCastle { castle_rank, .. } if player.castles.count(castle_rank) == 0 => {
            Err(MoveError::NoCastlesOfRank)
        }
        Action::PlaceDrawnTile { .. } if player.drawn_tile.is_none() => Err(MoveError::NoDrawnTile),
        Action::PlaySecretTile { .. } if player.secret_tile.is_none() => Err(MoveError::NoSecretTile),
        Action::DrawAndPlaceTile { .. } if state.tile_deck.is_empty() => Err(MoveError::DeckEmpty),
        _ => Ok(()),
    }
}
