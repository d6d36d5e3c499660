//! Epoch transition: pay out scores, then reset for the next epoch or end
//! the game.

use tracing::{debug, info};

use super::engine::Kingdoms;
use crate::core::{create_empty_board, rank1_allotment, GamePhase, GameState, GoldSummary, LogAction, LogEntry};
use crate::scoring::{calculate_epoch_scores, PlayerScore};

const LOG_TARGET: &str = "kingdoms_engine::rules::epoch";

/// Name used on log entries written by the engine itself.
pub const SYSTEM_PLAYER_NAME: &str = "System";

impl Kingdoms {
    /// Score the board, add each total to its player's gold and advance.
    ///
    /// After the final epoch the phase becomes `finished` and nothing else
    /// changes. Otherwise the board and deck are replaced, rank-1 castles
    /// are replenished, a new secret tile is dealt to each player in seating
    /// order, stale drawn tiles are dropped, and the richest player (first
    /// in seating order on ties) opens the next epoch.
    pub fn apply_scores_and_next_epoch(&mut self, state: &GameState) -> GameState {
        let scores = calculate_epoch_scores(state);
        self.apply_epoch_scores(state, &scores)
    }

    /// Same as `apply_scores_and_next_epoch` with scores already computed.
    ///
    /// Outside the `scoring` phase the state comes back unchanged.
    pub fn apply_epoch_scores(&mut self, state: &GameState, scores: &[PlayerScore]) -> GameState {
        if state.phase != GamePhase::Scoring {
            debug!(target: LOG_TARGET, room = %state.room_code, phase = ?state.phase, "epoch scoring skipped");
            return state.clone();
        }

        let mut next = state.clone();

        for score in scores {
            if let Some(player) = next.player_mut(&score.player_id) {
                player.gold += score.total_score;
            }
        }

        let summary = next
            .players
            .iter()
            .map(|p| GoldSummary {
                player_name: p.name.clone(),
                player_color: p.color,
                gold: p.gold,
            })
            .collect();

        let entry = LogEntry {
            id: self.next_id(),
            timestamp: self.now(),
            epoch: next.epoch,
            player_name: SYSTEM_PLAYER_NAME.to_string(),
            player_color: None,
            action: LogAction::EpochScore,
            details: format!("epoch {} finished", next.epoch),
            position: None,
            tile: None,
            castle: None,
            scores: Some(summary),
        };
        next.record(entry);

        if next.epoch >= self.config().final_epoch {
            next.phase = GamePhase::Finished;
            info!(target: LOG_TARGET, room = %next.room_code, epoch = next.epoch, "game finished");
            return next;
        }

        next.epoch += 1;
        next.phase = GamePhase::Playing;
        next.board = create_empty_board();
        next.tile_deck = self.create_tile_deck();

        let rank1 = rank1_allotment(next.players.len());
        for player in &mut next.players {
            player.castles.rank1 = rank1;
            player.secret_tile = next.tile_deck.pop();
            player.drawn_tile = None;
        }

        next.current_player_index = richest_player(&next);

        info!(
            target: LOG_TARGET,
            room = %next.room_code,
            epoch = next.epoch,
            first_player = next.current_player_index,
            "epoch started"
        );

        next
    }
}

/// Index of the player with the most gold; the earliest seat wins ties.
fn richest_player(state: &GameState) -> usize {
    let mut best = 0;
    for (i, player) in state.players.iter().enumerate() {
        if player.gold > state.players[best].gold {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        Castle, CastleRank, FixedClock, Player, PlayerColor, PlayerId, Position, SequentialIds, Tile, TileKind,
        DECK_SIZE,
    };
    use crate::rules::KingdomsBuilder;

    fn setup(n: usize) -> (Kingdoms, GameState) {
        let mut engine = KingdomsBuilder::new()
            .seed(3)
            .ids(SequentialIds::new("id"))
            .clock(FixedClock(5))
            .build()
            .unwrap();
        let players = (0..n)
            .map(|i| Player::new(PlayerId::new(format!("p{i}")), format!("P{i}"), PlayerColor::ALL[i], 0))
            .collect();
        let state = engine.initialize_game("ROOM", players);
        (engine, state)
    }

    fn place(state: &mut GameState, row: usize, col: usize, kind: TileKind, value: i32) {
        state.board.get_mut(Position::new(row, col)).unwrap().tile = Some(Tile::new("t", kind, value));
    }

    fn castle(state: &mut GameState, row: usize, col: usize, rank: CastleRank, color: PlayerColor) {
        state.board.get_mut(Position::new(row, col)).unwrap().castle = Some(Castle { rank, color });
    }

    #[test]
    fn test_scores_added_and_next_epoch_prepared() {
        let (mut engine, mut state) = setup(2);
        place(&mut state, 0, 0, TileKind::Resource, 5);
        castle(&mut state, 0, 1, CastleRank::Two, PlayerColor::Yellow);
        state.players[0].castles.rank1 = 0;
        state.players[1].castles.rank4 = 0;
        state.players[1].drawn_tile = Some(Tile::new("stale", TileKind::Resource, 1));
        state.phase = GamePhase::Scoring;

        let next = engine.apply_scores_and_next_epoch(&state);

        assert_eq!(next.players[0].gold, 50);
        assert_eq!(next.players[1].gold, 60);
        assert_eq!(next.epoch, 2);
        assert_eq!(next.phase, GamePhase::Playing);
        assert_eq!(next.board.empty_positions().count(), 30);
        assert_eq!(next.tile_deck.len(), DECK_SIZE - 2);
        assert_eq!(next.tiles_in_play(), DECK_SIZE);

        assert_eq!(next.players[0].castles.rank1, 4);
        assert_eq!(next.players[1].castles.rank4, 0);
        assert!(next.players.iter().all(|p| p.secret_tile.is_some() && p.drawn_tile.is_none()));

        // Yellow is richer and opens epoch 2.
        assert_eq!(next.current_player_index, 1);

        let entry = next.game_log.back().unwrap();
        assert_eq!(entry.action, LogAction::EpochScore);
        assert_eq!(entry.player_name, SYSTEM_PLAYER_NAME);
        assert_eq!(entry.player_color, None);
        assert_eq!(entry.epoch, 1);
        let golds: Vec<_> = entry.scores.as_ref().unwrap().iter().map(|s| s.gold).collect();
        assert_eq!(golds, vec![50, 60]);
    }

    #[test]
    fn test_tie_goes_to_earliest_seat() {
        let (mut engine, mut state) = setup(3);
        state.players[1].gold = 80;
        state.players[2].gold = 80;
        state.phase = GamePhase::Scoring;

        let next = engine.apply_scores_and_next_epoch(&state);
        assert_eq!(next.current_player_index, 1);
    }

    #[test]
    fn test_final_epoch_finishes_without_reset() {
        let (mut engine, mut state) = setup(2);
        state.epoch = 3;
        state.phase = GamePhase::Scoring;
        place(&mut state, 2, 2, TileKind::Hazard, -6);
        castle(&mut state, 2, 3, CastleRank::Four, PlayerColor::Red);
        let board_before = state.board.clone();
        let deck_before = state.tile_deck.clone();

        let next = engine.apply_scores_and_next_epoch(&state);

        assert_eq!(next.phase, GamePhase::Finished);
        assert_eq!(next.epoch, 3);
        assert_eq!(next.board, board_before);
        assert_eq!(next.tile_deck, deck_before);
        assert_eq!(next.players[0].gold, 50 - 24);
    }

    #[test]
    fn test_gold_can_go_negative() {
        let (mut engine, mut state) = setup(2);
        state.players[0].gold = 3;
        place(&mut state, 0, 0, TileKind::Hazard, -6);
        castle(&mut state, 0, 1, CastleRank::Four, PlayerColor::Red);
        state.phase = GamePhase::Scoring;

        let next = engine.apply_scores_and_next_epoch(&state);
        assert_eq!(next.players[0].gold, 3 - 24);
    }

    #[test]
    fn test_scoring_only_in_scoring_phase() {
        let (mut engine, mut state) = setup(2);
        place(&mut state, 0, 0, TileKind::Resource, 6);
        castle(&mut state, 0, 1, CastleRank::Four, PlayerColor::Red);

        for phase in [GamePhase::Lobby, GamePhase::Playing, GamePhase::Finished] {
            state.phase = phase;
            assert_eq!(engine.apply_scores_and_next_epoch(&state), state);
        }

        state.phase = GamePhase::Finished;
        let scores = calculate_epoch_scores(&state);
        assert_eq!(engine.apply_epoch_scores(&state, &scores), state);
    }

    #[test]
    fn test_last_played_tile_survives_epoch_reset() {
        let (mut engine, mut state) = setup(2);
        let tile = Tile::new("last", TileKind::Dragon, 0);
        state.last_played_tile = Some(tile.clone());
        state.phase = GamePhase::Scoring;

        let next = engine.apply_scores_and_next_epoch(&state);
        assert_eq!(next.epoch, 2);
        assert_eq!(next.last_played_tile, Some(tile));
    }
}
