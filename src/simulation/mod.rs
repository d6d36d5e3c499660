//! Random self-play.
//!
//! Plays whole games by picking uniformly among the legal actions of the
//! player on turn and scoring each epoch as soon as the board fills. Used
//! by the property tests and the benchmarks to drive the engine through
//! states no hand-written scenario reaches.

use tracing::{debug, warn};

use crate::core::{Action, FixedClock, GameConfig, GamePhase, GameRng, GameState, PlayerId, SequentialIds};
use crate::error::{LobbyError, ServiceError};
use crate::lobby::toggle_ready;
use crate::rules::{GameResult, Kingdoms, KingdomsBuilder, RulesEngine};
use crate::scoring::{calculate_epoch_scores, PlayerScore};

const LOG_TARGET: &str = "kingdoms_engine::simulation";

/// Configuration for a random playout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Rules configuration for the simulated game.
    pub game: GameConfig,

    /// Cap on actions taken, as a guard against runaway loops.
    pub max_actions: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            max_actions: 1_000,
        }
    }
}

impl SimulationConfig {
    /// Create a new simulation config.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rules configuration.
    #[must_use]
    pub fn with_game(mut self, game: GameConfig) -> Self {
        self.game = game;
        self
    }

    /// Set the action cap.
    #[must_use]
    pub fn with_max_actions(mut self, max: usize) -> Self {
        self.max_actions = max;
        self
    }
}

/// Record of one simulated game.
#[derive(Clone, Debug)]
pub struct Playout {
    /// Seed the game and the policy were derived from.
    pub seed: u64,
    /// State when the playout stopped.
    pub final_state: GameState,
    /// Every accepted action in order, with the player who took it.
    pub actions: Vec<(PlayerId, Action)>,
    /// Scores of each closed epoch.
    pub epoch_scores: Vec<Vec<PlayerScore>>,
    /// The player on turn had no legal action.
    pub stalled: bool,
}

impl Playout {
    /// Whether the game reached `finished`.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.final_state.phase == GamePhase::Finished
    }
}

/// Seat `player_count` players, start the game and play it out at random.
///
/// The same seed always produces the same playout.
pub fn play_random_game(
    seed: u64,
    player_count: usize,
    config: &SimulationConfig,
) -> Result<Playout, ServiceError> {
    let mut engine = KingdomsBuilder::new()
        .config(config.game.clone())
        .seed(seed)
        .ids(SequentialIds::new("sim"))
        .clock(FixedClock(0))
        .build()?;
    let state = seat_players(&mut engine, player_count)?;
    Ok(play_out(&mut engine, state, seed, config))
}

/// Play `state` to the end with a uniform random policy.
pub fn play_out(engine: &mut Kingdoms, mut state: GameState, seed: u64, config: &SimulationConfig) -> Playout {
    let mut policy = GameRng::new(seed).for_context("policy");
    let mut actions = Vec::new();
    let mut epoch_scores = Vec::new();
    let mut stalled = false;

    while actions.len() < config.max_actions {
        if engine.is_terminal(&state).is_some() {
            break;
        }

        if state.phase == GamePhase::Scoring {
            let scores = calculate_epoch_scores(&state);
            state = engine.apply_epoch_scores(&state, &scores);
            epoch_scores.push(scores);
            continue;
        }

        let Some(player) = state.current_player().map(|p| p.id.clone()) else {
            stalled = true;
            break;
        };
        let legal = engine.legal_actions(&state, &player);
        let Some(&action) = policy.choose(&legal) else {
            debug!(target: LOG_TARGET, seed, epoch = state.epoch, player = %player, "no legal action");
            stalled = true;
            break;
        };

        match engine.apply(&state, &player, action) {
            Ok(next) => {
                state = next;
                actions.push((player, action));
            }
            Err(err) => {
                warn!(target: LOG_TARGET, seed, code = err.code(), "legal action rejected");
                stalled = true;
                break;
            }
        }
    }

    Playout {
        seed,
        final_state: state,
        actions,
        epoch_scores,
        stalled,
    }
}

/// Winner of a finished playout, if any.
#[must_use]
pub fn playout_result(engine: &Kingdoms, playout: &Playout) -> Option<GameResult> {
    engine.is_terminal(&playout.final_state)
}

fn seat_players(engine: &mut Kingdoms, player_count: usize) -> Result<GameState, LobbyError> {
    if player_count == 0 {
        return Err(LobbyError::NotEnoughPlayers(engine.config().min_players));
    }

    let (mut lobby, _) = engine.create_lobby("Player 1");
    for i in 1..player_count {
        lobby = engine.join_lobby(&lobby, &format!("Player {}", i + 1))?.0;
    }
    let ids: Vec<PlayerId> = lobby.players.iter().map(|p| p.id.clone()).collect();
    for id in &ids {
        lobby = toggle_ready(&lobby, id)?;
    }
    engine.start_game(&lobby)
}
