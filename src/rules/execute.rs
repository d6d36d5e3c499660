//! Action execution.
//!
//! `execute_action` re-validates, copies the state, applies the action to
//! the copy, logs it and advances the turn. The caller's state is never
//! touched, so a rejected action leaves nothing half-applied.

use tracing::{debug, info};

use super::engine::Kingdoms;
use super::validate::is_valid_move;
use crate::core::{
    Action, Board, Castle, GamePhase, GameState, LogAction, LogCastle, LogEntry, Player, PlayerId, Position,
    Tile,
};
use crate::error::MoveError;

const LOG_TARGET: &str = "kingdoms_engine::rules::execute";

impl Kingdoms {
    /// Apply `action` for `player_id`, returning the next state.
    ///
    /// Every action except `DRAW_TILE` passes the turn. When the last free
    /// cell is filled the phase moves to `scoring` on that same call.
    pub fn execute_action(
        &mut self,
        state: &GameState,
        player_id: &PlayerId,
        action: Action,
    ) -> Result<GameState, MoveError> {
        is_valid_move(state, player_id, &action)?;

        let mut next = state.clone();
        let current = next.current_player_index;
        let epoch = next.epoch;

        let GameState {
            players,
            board,
            tile_deck,
            game_log,
            last_played_tile,
            ..
        } = &mut next;
        let player = &mut players[current];

        let entry = match action {
            Action::DrawTile => {
                let tile = tile_deck.pop().ok_or(MoveError::DeckEmpty)?;
                player.drawn_tile = Some(tile);
                // The drawn tile stays out of the public log.
                self.log_entry(epoch, player, LogAction::DrawTile, "drew a tile from the deck".into())
            }
            Action::PlaceCastle { castle_rank, row, col } => {
                let pos = Position::new(row, col);
                let cell = board.get_mut(pos).ok_or(MoveError::InvalidPosition)?;
                cell.castle = Some(Castle {
                    rank: castle_rank,
                    color: player.color,
                });
                *player.castles.count_mut(castle_rank) -= 1;

                let mut entry = self.log_entry(
                    epoch,
                    player,
                    LogAction::PlaceCastle,
                    format!("placed a rank {castle_rank} castle at {pos}"),
                );
                entry.position = Some(pos);
                entry.castle = Some(LogCastle { rank: castle_rank });
                entry
            }
            Action::PlaceDrawnTile { row, col } => {
                let tile = player.drawn_tile.take().ok_or(MoveError::NoDrawnTile)?;
                let pos = Position::new(row, col);
                place_tile(board, last_played_tile, pos, tile.clone())?;
                self.tile_entry(epoch, player, LogAction::PlaceTile, "placed a", pos, tile)
            }
            Action::DrawAndPlaceTile { row, col } => {
                let tile = tile_deck.pop().ok_or(MoveError::DeckEmpty)?;
                let pos = Position::new(row, col);
                place_tile(board, last_played_tile, pos, tile.clone())?;
                self.tile_entry(epoch, player, LogAction::PlaceTile, "placed a", pos, tile)
            }
            Action::PlaySecretTile { row, col } => {
                let tile = player.secret_tile.take().ok_or(MoveError::NoSecretTile)?;
                let pos = Position::new(row, col);
                place_tile(board, last_played_tile, pos, tile.clone())?;
                self.tile_entry(epoch, player, LogAction::PlaySecretTile, "played their secret", pos, tile)
            }
        };
        game_log.push_back(entry);

        if action.ends_turn() {
            next.current_player_index = (current + 1) % next.players.len();

            if next.board.is_full() {
                next.phase = GamePhase::Scoring;
                info!(target: LOG_TARGET, room = %next.room_code, epoch, "board full, epoch ready for scoring");
            }
        }

        debug!(
            target: LOG_TARGET,
            room = %next.room_code,
            player = %player_id,
            action = action.name(),
            next_player = next.current_player_index,
            "action applied"
        );

        Ok(next)
    }

    fn log_entry(&mut self, epoch: u8, player: &Player, action: LogAction, details: String) -> LogEntry {
        LogEntry {
            id: self.next_id(),
            timestamp: self.now(),
            epoch,
            player_name: player.name.clone(),
            player_color: Some(player.color),
            action,
            details,
            position: None,
            tile: None,
            castle: None,
            scores: None,
        }
    }

    fn tile_entry(
        &mut self,
        epoch: u8,
        player: &Player,
        action: LogAction,
        verb: &str,
        pos: Position,
        tile: Tile,
    ) -> LogEntry {
        let details = format!("{verb} {} tile at {pos}", tile.label());
        let mut entry = self.log_entry(epoch, player, action, details);
        entry.position = Some(pos);
        entry.tile = Some(tile);
        entry
    }
}

fn place_tile(
    board: &mut Board,
    last_played: &mut Option<Tile>,
    pos: Position,
    tile: Tile,
) -> Result<(), MoveError> {
    let cell = board.get_mut(pos).ok_or(MoveError::InvalidPosition)?;
    cell.tile = Some(tile.clone());
    *last_played = Some(tile);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CastleRank, FixedClock, PlayerColor, SequentialIds, TileKind, DECK_SIZE};
    use crate::rules::KingdomsBuilder;

    fn setup(n: usize) -> (Kingdoms, GameState) {
        let mut engine = KingdomsBuilder::new()
            .seed(7)
            .ids(SequentialIds::new("id"))
            .clock(FixedClock(99))
            .build()
            .unwrap();
        let players = (0..n)
            .map(|i| Player::new(PlayerId::new(format!("p{i}")), format!("P{i}"), PlayerColor::ALL[i], 0))
            .collect();
        let state = engine.initialize_game("ROOM", players);
        (engine, state)
    }

    fn pid(i: usize) -> PlayerId {
        PlayerId::new(format!("p{i}"))
    }

    #[test]
    fn test_draw_keeps_turn() {
        let (mut engine, state) = setup(2);
        let top = state.tile_deck.last().cloned();

        let next = engine.execute_action(&state, &pid(0), Action::DrawTile).unwrap();

        assert_eq!(next.current_player_index, 0);
        assert_eq!(next.players[0].drawn_tile, top);
        assert_eq!(next.tile_deck.len(), state.tile_deck.len() - 1);

        let entry = next.game_log.back().unwrap();
        assert_eq!(entry.action, LogAction::DrawTile);
        assert!(entry.tile.is_none());
        assert_eq!(entry.timestamp, 99);
        assert_eq!(entry.player_color, Some(PlayerColor::Red));
    }

    #[test]
    fn test_draw_then_place() {
        let (mut engine, state) = setup(2);
        let drawn = engine.execute_action(&state, &pid(0), Action::DrawTile).unwrap();
        let tile = drawn.players[0].drawn_tile.clone().unwrap();

        let placed = engine
            .execute_action(&drawn, &pid(0), Action::PlaceDrawnTile { row: 2, col: 3 })
            .unwrap();

        assert!(placed.players[0].drawn_tile.is_none());
        assert_eq!(placed.board.get(Position::new(2, 3)).unwrap().tile.as_ref(), Some(&tile));
        assert_eq!(placed.last_played_tile.as_ref(), Some(&tile));
        assert_eq!(placed.current_player_index, 1);
        assert_eq!(placed.game_log.len(), 2);
        assert_eq!(placed.tiles_in_play(), DECK_SIZE);
    }

    #[test]
    fn test_place_castle() {
        let (mut engine, state) = setup(3);
        let next = engine
            .execute_action(&state, &pid(0), Action::PlaceCastle { castle_rank: CastleRank::Two, row: 0, col: 0 })
            .unwrap();

        let cell = next.board.get(Position::new(0, 0)).unwrap();
        assert_eq!(cell.castle, Some(Castle { rank: CastleRank::Two, color: PlayerColor::Red }));
        assert!(cell.tile.is_none());
        assert_eq!(next.players[0].castles.rank2, 2);
        assert_eq!(next.current_player_index, 1);

        let entry = next.game_log.back().unwrap();
        assert_eq!(entry.position, Some(Position::new(0, 0)));
        assert_eq!(entry.castle, Some(LogCastle { rank: CastleRank::Two }));
    }

    #[test]
    fn test_secret_tile_consumed() {
        let (mut engine, state) = setup(2);
        let secret = state.players[0].secret_tile.clone().unwrap();

        let next = engine
            .execute_action(&state, &pid(0), Action::PlaySecretTile { row: 4, col: 5 })
            .unwrap();

        assert!(next.players[0].secret_tile.is_none());
        assert_eq!(next.board.get(Position::new(4, 5)).unwrap().tile.as_ref(), Some(&secret));
        assert_eq!(next.game_log.back().unwrap().action, LogAction::PlaySecretTile);

        let again = engine
            .execute_action(&next, &pid(1), Action::PlaceCastle { castle_rank: CastleRank::One, row: 0, col: 0 })
            .unwrap();
        assert_eq!(
            engine.execute_action(&again, &pid(0), Action::PlaySecretTile { row: 1, col: 1 }),
            Err(MoveError::NoSecretTile)
        );
    }

    #[test]
    fn test_legacy_draw_and_place() {
        let (mut engine, state) = setup(2);
        let top = state.tile_deck.last().cloned().unwrap();

        let next = engine
            .execute_action(&state, &pid(0), Action::DrawAndPlaceTile { row: 1, col: 1 })
            .unwrap();

        assert_eq!(next.board.get(Position::new(1, 1)).unwrap().tile.as_ref(), Some(&top));
        assert!(next.players[0].drawn_tile.is_none());
        assert_eq!(next.current_player_index, 1);
        assert_eq!(next.game_log.back().unwrap().action, LogAction::PlaceTile);
    }

    #[test]
    fn test_rejection_leaves_input_untouched() {
        let (mut engine, state) = setup(2);
        let before = state.clone();

        let result = engine.execute_action(&state, &pid(1), Action::DrawTile);

        assert_eq!(result, Err(MoveError::NotYourTurn));
        assert_eq!(state, before);
    }

    #[test]
    fn test_input_not_aliased() {
        let (mut engine, state) = setup(2);
        let before = state.clone();
        let _ = engine.execute_action(&state, &pid(0), Action::DrawAndPlaceTile { row: 0, col: 0 }).unwrap();
        assert_eq!(state, before);
    }

    #[test]
    fn test_last_cell_triggers_scoring() {
        let (mut engine, mut state) = setup(2);
        for cell in 0..29 {
            let pos = Position::new(cell / 6, cell % 6);
            state.board.get_mut(pos).unwrap().tile = Some(Tile::new(format!("f{cell}"), TileKind::Resource, 1));
        }

        assert_eq!(state.phase, GamePhase::Playing);
        let next = engine
            .execute_action(&state, &pid(0), Action::PlaceCastle { castle_rank: CastleRank::One, row: 4, col: 5 })
            .unwrap();

        assert!(next.board.is_full());
        assert_eq!(next.phase, GamePhase::Scoring);
        assert_eq!(next.current_player_index, 1);
    }

    #[test]
    fn test_turn_rotation_wraps() {
        let (mut engine, state) = setup(3);
        let mut current = state;
        for i in 0..3 {
            current = engine
                .execute_action(&current, &pid(i), Action::PlaceCastle { castle_rank: CastleRank::One, row: 0, col: i })
                .unwrap();
        }
        assert_eq!(current.current_player_index, 0);
    }
}
