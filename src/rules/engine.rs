//! The Kingdoms engine object and the `RulesEngine` seam.
//!
//! `Kingdoms` owns every side-effecting collaborator the rules need: the
//! seeded RNG for decks, the identity source and the clock. The state
//! itself is never held here; each call takes a borrowed snapshot and
//! returns a new owned `GameState`.

use serde::{Deserialize, Serialize};

use super::validate::is_valid_move;
use crate::core::tile::{self, Tile};
use crate::core::{
    Action, CastleRank, Clock, GameConfig, GamePhase, GameRng, GameRngState, GameState, IdSource,
    PlayerColor, PlayerId, SystemClock, UuidIds,
};
use crate::error::{MoveError, PayloadError};

/// Outcome of a finished game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// One player holds the most gold.
    Winner(PlayerId),
    /// Several players share the most gold.
    Winners(Vec<PlayerId>),
}

impl GameResult {
    /// Check if a player won or shared the win.
    #[must_use]
    pub fn is_winner(&self, player: &PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => p == player,
            GameResult::Winners(ps) => ps.contains(player),
        }
    }
}

/// One row of the final ranking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Standing {
    /// 1 for the richest; tied players share a place.
    pub place: usize,
    /// Player id
    pub player_id: PlayerId,
    /// Player name
    pub name: String,
    /// Player color
    pub color: PlayerColor,
    /// Final gold
    pub gold: i64,
}

/// Players ranked by gold, richest first. Ties keep seating order.
#[must_use]
pub fn final_standings(state: &GameState) -> Vec<Standing> {
    let mut ranked: Vec<_> = state.players.iter().collect();
    ranked.sort_by(|a, b| b.gold.cmp(&a.gold));

    ranked
        .iter()
        .map(|p| Standing {
            place: 1 + ranked.iter().filter(|other| other.gold > p.gold).count(),
            player_id: p.id.clone(),
            name: p.name.clone(),
            color: p.color,
            gold: p.gold,
        })
        .collect()
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `validate` never mutates.
/// - `apply` re-validates and fails without touching the input state.
/// - `candidate_actions` may over-approximate; `legal_actions` filters it
///   through `validate`.
pub trait RulesEngine {
    /// Decide whether `player` may take `action` now.
    fn validate(&self, state: &GameState, player: &PlayerId, action: &Action) -> Result<(), MoveError>;

    /// Produce the state after `action`.
    fn apply(&mut self, state: &GameState, player: &PlayerId, action: Action) -> Result<GameState, MoveError>;

    /// `Some` once the game is over.
    fn is_terminal(&self, state: &GameState) -> Option<GameResult>;

    /// Every action shape worth checking for `player`.
    fn candidate_actions(&self, state: &GameState, player: &PlayerId) -> Vec<Action>;

    /// Every action the validator accepts for `player`.
    fn legal_actions(&self, state: &GameState, player: &PlayerId) -> Vec<Action> {
        self.candidate_actions(state, player)
            .into_iter()
            .filter(|action| self.validate(state, player, action).is_ok())
            .collect()
    }
}

/// The Kingdoms rules engine.
pub struct Kingdoms {
    config: GameConfig,
    rng: GameRng,
    code_rng: GameRng,
    ids: Box<dyn IdSource + Send>,
    clock: Box<dyn Clock + Send>,
}

impl std::fmt::Debug for Kingdoms {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Kingdoms")
            .field("config", &self.config)
            .field("rng", &self.rng.state())
            .finish_non_exhaustive()
    }
}

impl Kingdoms {
    /// Engine with default configuration, UUID ids and the system clock.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        KingdomsBuilder::new().seed(seed).assemble()
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Deck RNG position, for replay checkpoints.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    /// A freshly shuffled 23-tile deck with new tile ids.
    pub fn create_tile_deck(&mut self) -> Vec<Tile> {
        tile::create_tile_deck(&mut self.rng, &mut *self.ids)
    }

    pub(crate) fn code_rng_mut(&mut self) -> &mut GameRng {
        &mut self.code_rng
    }

    pub(crate) fn next_id(&mut self) -> String {
        self.ids.next_id()
    }

    pub(crate) fn now(&self) -> i64 {
        self.clock.now_millis()
    }
}

impl RulesEngine for Kingdoms {
    fn validate(&self, state: &GameState, player: &PlayerId, action: &Action) -> Result<(), MoveError> {
        is_valid_move(state, player, action)
    }

    fn apply(&mut self, state: &GameState, player: &PlayerId, action: Action) -> Result<GameState, MoveError> {
        self.execute_action(state, player, action)
    }

    fn is_terminal(&self, state: &GameState) -> Option<GameResult> {
        if state.phase != GamePhase::Finished {
            return None;
        }

        let standings = final_standings(state);
        let mut winners: Vec<PlayerId> = standings
            .into_iter()
            .filter(|s| s.place == 1)
            .map(|s| s.player_id)
            .collect();

        match winners.len() {
            0 => None,
            1 => winners.pop().map(GameResult::Winner),
            _ => Some(GameResult::Winners(winners)),
        }
    }

    fn candidate_actions(&self, state: &GameState, _player: &PlayerId) -> Vec<Action> {
        let mut actions = vec![Action::DrawTile];

        for pos in state.board.empty_positions() {
            let (row, col) = (pos.row, pos.col);
            actions.push(Action::PlaceDrawnTile { row, col });
            actions.push(Action::PlaySecretTile { row, col });
            actions.push(Action::DrawAndPlaceTile { row, col });
            actions.extend(
                CastleRank::ALL
                    .iter()
                    .map(|&castle_rank| Action::PlaceCastle { castle_rank, row, col }),
            );
        }

        actions
    }
}

/// Builder for a `Kingdoms` engine.
pub struct KingdomsBuilder {
    config: GameConfig,
    seed: Option<u64>,
    ids: Box<dyn IdSource + Send>,
    clock: Box<dyn Clock + Send>,
}

impl Default for KingdomsBuilder {
    fn default() -> Self {
        Self {
            config: GameConfig::default(),
            seed: None,
            ids: Box::new(UuidIds),
            clock: Box::new(SystemClock),
        }
    }
}

impl KingdomsBuilder {
    /// Start from defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use this configuration.
    #[must_use]
    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Seed the deck RNG. Without a seed, entropy is used.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Use this identity source.
    #[must_use]
    pub fn ids(mut self, ids: impl IdSource + Send + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// Use this clock.
    #[must_use]
    pub fn clock(mut self, clock: impl Clock + Send + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Build the engine, rejecting a configuration that cannot be played.
    pub fn build(self) -> Result<Kingdoms, PayloadError> {
        self.config.validate()?;
        Ok(self.assemble())
    }

    fn assemble(self) -> Kingdoms {
        let rng = self.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        let code_rng = rng.for_context("room-code");

        Kingdoms {
            config: self.config,
            rng,
            code_rng,
            ids: self.ids,
            clock: self.clock,
        }
    }
}
