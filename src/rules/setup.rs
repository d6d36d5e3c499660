//! Game start: fresh deck, empty board, secret tiles and castle supplies.

use im::Vector;
use tracing::info;

use super::engine::Kingdoms;
use crate::core::{create_empty_board, initial_castles, GamePhase, GameState, Player, FIRST_EPOCH};

const LOG_TARGET: &str = "kingdoms_engine::rules::setup";

impl Kingdoms {
    /// Start a game for `players` in their given order.
    ///
    /// Each player gets the starting gold, the castle supply for this
    /// player count and one secret tile popped from the new deck, dealt in
    /// seating order. Player 0 takes the first turn.
    pub fn initialize_game(&mut self, room_code: &str, players: Vec<Player>) -> GameState {
        let mut tile_deck = self.create_tile_deck();
        let player_count = players.len();
        let starting_gold = self.config().starting_gold;

        let players = players
            .into_iter()
            .map(|player| Player {
                gold: starting_gold,
                castles: initial_castles(player_count),
                secret_tile: tile_deck.pop(),
                drawn_tile: None,
                ..player
            })
            .collect();

        let state = GameState {
            id: self.next_id(),
            room_code: room_code.to_string(),
            phase: GamePhase::Playing,
            epoch: FIRST_EPOCH,
            current_player_index: 0,
            players,
            board: create_empty_board(),
            tile_deck,
            game_log: Vector::new(),
            last_played_tile: None,
            created_at: self.now(),
        };

        info!(
            target: LOG_TARGET,
            room = %state.room_code,
            players = player_count,
            deck = state.tile_deck.len(),
            "game initialized"
        );

        state
    }
}
