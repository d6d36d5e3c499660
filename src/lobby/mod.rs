//! Room lifecycle before and around play: codes, seating, readiness,
//! start and abandon.
//!
//! Like the rules, every call takes a borrowed state and returns a new one.

use tracing::info;

use crate::core::{GamePhase, GameState, Player, PlayerColor, PlayerId};
use crate::error::LobbyError;
use crate::rules::Kingdoms;

const LOG_TARGET: &str = "kingdoms_engine::lobby";

/// Room code alphabet. `I`, `O`, `0` and `1` are left out.
pub const ROOM_CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

impl Kingdoms {
    /// A random room code of `config.room_code_len` characters.
    pub fn generate_room_code(&mut self) -> String {
        let len = self.config().room_code_len;
        let rng = self.code_rng_mut();
        (0..len)
            .map(|_| char::from(ROOM_CODE_ALPHABET[rng.gen_range_usize(0..ROOM_CODE_ALPHABET.len())]))
            .collect()
    }

    /// Open a new room with `host_name` seated first as red.
    pub fn create_lobby(&mut self, host_name: &str) -> (GameState, PlayerId) {
        let room_code = self.generate_room_code();
        let mut state = GameState::lobby(self.next_id(), room_code, self.now());

        let host_id = PlayerId::new(self.next_id());
        let host = Player::new(host_id.clone(), host_name, PlayerColor::Red, self.config().starting_gold);
        state.players.push(host);

        info!(target: LOG_TARGET, room = %state.room_code, host = %host_id, "room created");
        (state, host_id)
    }

    /// Seat `name` with the first color nobody holds yet.
    pub fn join_lobby(&mut self, state: &GameState, name: &str) -> Result<(GameState, PlayerId), LobbyError> {
        if state.phase != GamePhase::Lobby {
            return Err(LobbyError::NotInLobby);
        }
        if state.players.len() >= self.config().max_players {
            return Err(LobbyError::RoomFull);
        }
        let color = PlayerColor::ALL
            .into_iter()
            .find(|c| state.players.iter().all(|p| p.color != *c))
            .ok_or(LobbyError::RoomFull)?;

        let mut next = state.clone();
        let player_id = PlayerId::new(self.next_id());
        next.players
            .push(Player::new(player_id.clone(), name, color, self.config().starting_gold));

        info!(
            target: LOG_TARGET,
            room = %next.room_code,
            player = %player_id,
            %color,
            seated = next.players.len(),
            "player joined"
        );
        Ok((next, player_id))
    }

    /// Start the game once enough players are seated and all are ready.
    pub fn start_game(&mut self, state: &GameState) -> Result<GameState, LobbyError> {
        if state.phase != GamePhase::Lobby {
            return Err(LobbyError::NotInLobby);
        }
        let min = self.config().min_players;
        if state.players.len() < min {
            return Err(LobbyError::NotEnoughPlayers(min));
        }
        if !state.players.iter().all(|p| p.is_ready) {
            return Err(LobbyError::PlayersNotReady);
        }

        let mut started = self.initialize_game(&state.room_code, state.players.clone());
        started.id.clone_from(&state.id);
        started.created_at = state.created_at;
        Ok(started)
    }
}

/// Flip `player_id`'s ready flag.
pub fn toggle_ready(state: &GameState, player_id: &PlayerId) -> Result<GameState, LobbyError> {
    if state.phase != GamePhase::Lobby {
        return Err(LobbyError::NotInLobby);
    }
    let mut next = state.clone();
    let player = next.player_mut(player_id).ok_or(LobbyError::PlayerNotFound)?;
    player.is_ready = !player.is_ready;
    Ok(next)
}

/// End the game immediately from any phase, skipping scoring.
#[must_use]
pub fn abandon(state: &GameState) -> GameState {
    let mut next = state.clone();
    next.phase = GamePhase::Finished;
    info!(target: LOG_TARGET, room = %next.room_code, epoch = next.epoch, "game abandoned");
    next
}
