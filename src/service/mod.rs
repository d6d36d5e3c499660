//! Room service: sequences every call for a room through one engine and
//! one store.
//!
//! Each mutating call loads the room, runs the rule, and writes the new
//! state back only on success. All of them take `&mut self`, so a service
//! processes one mutation at a time; a host sharing it between tasks wraps
//! it in a mutex.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::{Action, GamePhase, GameState, PlayerColor, PlayerId};
use crate::error::{LobbyError, ServiceError};
use crate::lobby::{abandon, toggle_ready};
use crate::rules::Kingdoms;
use crate::scoring::{calculate_epoch_scores, PlayerScore};
use crate::store::RoomStore;
use crate::view::create_player_view;

const LOG_TARGET: &str = "kingdoms_engine::service";

/// Room codes drawn before `create_room` gives up on a crowded store.
pub const MAX_ROOM_CODE_ATTEMPTS: usize = 32;

/// Returned to a player who created or joined a room.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomTicket {
    /// Room code
    pub room_code: String,
    /// The new player's id
    pub player_id: PlayerId,
    /// The new player's color
    pub player_color: PlayerColor,
    /// The room as this player sees it
    pub state: GameState,
}

/// Result of scoring an epoch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpochOutcome {
    /// Per-player scores for the finished epoch.
    pub scores: Vec<PlayerScore>,
    /// Unredacted state after the payout.
    pub state: GameState,
}

/// Per-room sequencing over a `RoomStore`.
#[derive(Debug)]
pub struct RoomService<S: RoomStore> {
    engine: Kingdoms,
    store: S,
}

impl<S: RoomStore> RoomService<S> {
    /// Service over `store` driven by `engine`.
    pub fn new(engine: Kingdoms, store: S) -> Self {
        Self { engine, store }
    }

    /// The engine.
    pub fn engine(&self) -> &Kingdoms {
        &self.engine
    }

    /// The store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Open a room with a code no live room uses.
    pub fn create_room(&mut self, host_name: &str) -> Result<RoomTicket, ServiceError> {
        let (mut state, host) = self.engine.create_lobby(host_name);
        let mut attempts = 1;
        while self.store.contains(&state.room_code) {
            if attempts == MAX_ROOM_CODE_ATTEMPTS {
                warn!(target: LOG_TARGET, attempts, "room codes exhausted");
                return Err(ServiceError::RoomCodesExhausted(attempts));
            }
            state.room_code = self.engine.generate_room_code();
            attempts += 1;
        }
        self.store.put(&state.room_code, &state)?;
        ticket(&state, host)
    }

    /// Ticket for a player already seated in `room_code`, e.g. after a
    /// reconnect.
    pub fn rejoin(&self, room_code: &str, player_id: &PlayerId) -> Result<RoomTicket, ServiceError> {
        let state = self.load(room_code)?;
        ticket(&state, player_id.clone())
    }

    /// Seat `name` in `room_code`.
    pub fn join_room(&mut self, room_code: &str, name: &str) -> Result<RoomTicket, ServiceError> {
        let state = self.load(room_code)?;
        let (next, player_id) = self.engine.join_lobby(&state, name)?;
        self.store.put(room_code, &next)?;
        ticket(&next, player_id)
    }

    /// Flip a player's ready flag.
    pub fn toggle_ready(&mut self, room_code: &str, player_id: &PlayerId) -> Result<GameState, ServiceError> {
        let state = self.load(room_code)?;
        let next = toggle_ready(&state, player_id)?;
        self.store.put(room_code, &next)?;
        Ok(next)
    }

    /// Deal the game once everyone is ready.
    pub fn start_game(&mut self, room_code: &str) -> Result<GameState, ServiceError> {
        let state = self.load(room_code)?;
        let next = self.engine.start_game(&state)?;
        self.store.put(room_code, &next)?;
        Ok(next)
    }

    /// Validate and apply one action.
    ///
    /// A rejected action leaves the stored state as it was and comes back
    /// with its specific error.
    pub fn submit_action(
        &mut self,
        room_code: &str,
        player_id: &PlayerId,
        action: Action,
    ) -> Result<GameState, ServiceError> {
        let state = self.load(room_code)?;
        let next = match self.engine.execute_action(&state, player_id, action) {
            Ok(next) => next,
            Err(err) => {
                warn!(
                    target: LOG_TARGET,
                    room = room_code,
                    player = %player_id,
                    action = action.name(),
                    code = err.code(),
                    "action rejected"
                );
                return Err(err.into());
            }
        };
        self.store.put(room_code, &next)?;
        Ok(next)
    }

    /// Parse a JSON action payload, then submit it.
    pub fn submit_json(&mut self, room_code: &str, player_id: &PlayerId, payload: &str) -> Result<GameState, ServiceError> {
        let action = Action::from_json(payload).map_err(|err| {
            warn!(target: LOG_TARGET, room = room_code, player = %player_id, error = %err, "malformed action");
            err
        })?;
        self.submit_action(room_code, player_id, action)
    }

    /// Score the full board and move to the next epoch or finish.
    pub fn finish_epoch(&mut self, room_code: &str) -> Result<EpochOutcome, ServiceError> {
        let state = self.load(room_code)?;
        if state.phase != GamePhase::Scoring {
            return Err(ServiceError::NotScoring);
        }

        let scores = calculate_epoch_scores(&state);
        let next = self.engine.apply_epoch_scores(&state, &scores);
        self.store.put(room_code, &next)?;

        info!(target: LOG_TARGET, room = room_code, phase = ?next.phase, epoch = next.epoch, "epoch closed");
        Ok(EpochOutcome { scores, state: next })
    }

    /// End the game at once.
    pub fn abandon(&mut self, room_code: &str) -> Result<GameState, ServiceError> {
        let state = self.load(room_code)?;
        let next = abandon(&state);
        self.store.put(room_code, &next)?;
        Ok(next)
    }

    /// Drop a room from the store.
    pub fn close_room(&mut self, room_code: &str) -> bool {
        let removed = self.store.remove(room_code);
        if removed {
            info!(target: LOG_TARGET, room = room_code, "room closed");
        }
        removed
    }

    /// Unredacted state of a room.
    pub fn state(&self, room_code: &str) -> Result<GameState, ServiceError> {
        self.load(room_code)
    }

    /// The room as `viewer` may see it. Only seated players get a view.
    pub fn view(&self, room_code: &str, viewer: &PlayerId) -> Result<GameState, ServiceError> {
        let state = self.load(room_code)?;
        if state.player(viewer).is_none() {
            return Err(LobbyError::PlayerNotFound.into());
        }
        Ok(create_player_view(&state, viewer))
    }

    /// One view per seated player, ready to push after a mutation.
    pub fn views(&self, room_code: &str) -> Result<Vec<(PlayerId, GameState)>, ServiceError> {
        let state = self.load(room_code)?;
        Ok(state
            .players
            .iter()
            .map(|p| (p.id.clone(), create_player_view(&state, &p.id)))
            .collect())
    }

    fn load(&self, room_code: &str) -> Result<GameState, ServiceError> {
        self.store
            .get(room_code)?
            .ok_or_else(|| ServiceError::RoomNotFound(room_code.to_string()))
    }
}

fn ticket(state: &GameState, player_id: PlayerId) -> Result<RoomTicket, ServiceError> {
    let player_color = state
        .player(&player_id)
        .map(|p| p.color)
        .ok_or(LobbyError::PlayerNotFound)?;

    Ok(RoomTicket {
        room_code: state.room_code.clone(),
        state: create_player_view(state, &player_id),
        player_id,
        player_color,
    })
}
