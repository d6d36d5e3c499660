//! End-to-end game flow tests.
//!
//! These tests drive whole rooms through the public API:
//! - Lobby to first turn
//! - Filling the board and scoring an epoch
//! - The final epoch and abandon
//! - Redacted views pushed to each player

use kingdoms_engine::core::{FixedClock, SequentialIds, DECK_SIZE};
use kingdoms_engine::{
    final_standings, Action, CastleRank, GamePhase, GameState, Kingdoms, KingdomsBuilder, LogAction,
    MemoryRoomStore, MoveError, PlayerId, RoomService, RulesEngine, ServiceError,
};

fn engine(seed: u64) -> Kingdoms {
    KingdomsBuilder::new()
        .seed(seed)
        .ids(SequentialIds::new("id"))
        .clock(FixedClock(1_700_000_000_000))
        .build()
        .unwrap()
}

/// Seat `names`, ready everyone and start. Returns the room code and ids.
fn started_room(service: &mut RoomService<MemoryRoomStore>, names: &[&str]) -> (String, Vec<PlayerId>) {
    let host = service.create_room(names[0]).unwrap();
    let mut ids = vec![host.player_id];
    for name in &names[1..] {
        ids.push(service.join_room(&host.room_code, name).unwrap().player_id);
    }
    for id in &ids {
        service.toggle_ready(&host.room_code, id).unwrap();
    }
    service.start_game(&host.room_code).unwrap();
    (host.room_code, ids)
}

/// Play the first legal action for whoever is on turn until the phase
/// leaves `playing`.
fn fill_board(service: &mut RoomService<MemoryRoomStore>, code: &str) -> GameState {
    let mut state = service.state(code).unwrap();
    while state.phase == GamePhase::Playing {
        let player = state.current_player().unwrap().id.clone();
        let action = service.engine().legal_actions(&state, &player)[0];
        state = service.submit_action(code, &player, action).unwrap();
    }
    state
}

/// Test a fresh two-player game.
#[test]
fn test_two_player_start() {
    let mut service = RoomService::new(engine(1), MemoryRoomStore::new());
    let (code, ids) = started_room(&mut service, &["Ada", "Bo"]);
    let state = service.state(&code).unwrap();

    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.epoch, 1);
    assert_eq!(state.tile_deck.len(), DECK_SIZE - 2);
    assert_eq!(state.current_player().map(|p| &p.id), Some(&ids[0]));
    for player in &state.players {
        assert_eq!(player.gold, 50);
        assert_eq!(player.castles.rank1, 4);
        assert!(player.secret_tile.is_some());
    }
}

/// Test the two-step draw flow through the service.
#[test]
fn test_draw_hold_place() {
    let mut service = RoomService::new(engine(2), MemoryRoomStore::new());
    let (code, ids) = started_room(&mut service, &["Ada", "Bo", "Cy"]);

    let held = service.submit_action(&code, &ids[0], Action::DrawTile).unwrap();
    assert!(held.players[0].drawn_tile.is_some());
    assert_eq!(held.current_player_index, 0);

    // Only the drawn tile may be played now.
    let err = service
        .submit_action(&code, &ids[0], Action::PlaceCastle { castle_rank: CastleRank::One, row: 0, col: 0 })
        .unwrap_err();
    assert!(matches!(err, ServiceError::Move(MoveError::MustPlaceDrawnTileFirst)));

    // Others see that a tile is held but not which.
    let bo_view = service.view(&code, &ids[1]).unwrap();
    assert!(bo_view.players[0].drawn_tile.as_ref().is_some_and(|t| t.is_hidden()));
    let draw_entry = bo_view.game_log.back().unwrap();
    assert_eq!(draw_entry.action, LogAction::DrawTile);
    assert!(draw_entry.tile.is_none());

    let placed = service
        .submit_action(&code, &ids[0], Action::PlaceDrawnTile { row: 3, col: 3 })
        .unwrap();
    assert!(placed.players[0].drawn_tile.is_none());
    assert_eq!(placed.current_player_index, 1);
}

/// Test that the board fills, scores and rolls into the second epoch.
#[test]
fn test_epoch_one_to_two() {
    let mut service = RoomService::new(engine(3), MemoryRoomStore::new());
    let (code, _) = started_room(&mut service, &["Ada", "Bo"]);

    let full = fill_board(&mut service, &code);
    assert_eq!(full.phase, GamePhase::Scoring);
    assert!(full.board.is_full());
    assert!(full.board.cells().all(|c| !(c.tile.is_some() && c.castle.is_some())));

    // No more moves until the epoch is scored.
    let player = full.current_player().unwrap().id.clone();
    let err = service.submit_action(&code, &player, Action::DrawTile).unwrap_err();
    assert_eq!(err.code(), "GAME_NOT_IN_PROGRESS");

    let outcome = service.finish_epoch(&code).unwrap();
    let next = outcome.state;
    assert_eq!(next.epoch, 2);
    assert_eq!(next.phase, GamePhase::Playing);
    assert_eq!(next.board.empty_positions().count(), 30);
    assert_eq!(next.tiles_in_play(), DECK_SIZE);

    for (player, score) in next.players.iter().zip(&outcome.scores) {
        assert_eq!(player.id, score.player_id);
        assert_eq!(player.gold, 50 + score.total_score);
        assert_eq!(score.total_score, score.row_scores.iter().sum::<i64>() + score.col_scores.iter().sum::<i64>());
    }

    let richest = next.players.iter().map(|p| p.gold).max().unwrap();
    let first = next.players.iter().position(|p| p.gold == richest).unwrap();
    assert_eq!(next.current_player_index, first);

    assert_eq!(next.game_log.back().unwrap().action, LogAction::EpochScore);
    assert_eq!(service.state(&code).unwrap(), next);
}

/// Test a one-epoch game through to the final standings.
#[test]
fn test_single_epoch_game_finishes() {
    let engine = KingdomsBuilder::new()
        .seed(4)
        .config(kingdoms_engine::GameConfig::new().with_final_epoch(1))
        .build()
        .unwrap();
    let mut service = RoomService::new(engine, MemoryRoomStore::new());
    let (code, _) = started_room(&mut service, &["Ada", "Bo", "Cy", "Di"]);

    fill_board(&mut service, &code);
    let outcome = service.finish_epoch(&code).unwrap();
    assert_eq!(outcome.state.phase, GamePhase::Finished);
    assert!(outcome.state.board.is_full());

    let result = service.engine().is_terminal(&outcome.state).unwrap();
    let standings = final_standings(&outcome.state);
    assert_eq!(standings.len(), 4);
    assert!(result.is_winner(&standings[0].player_id));
    assert!(standings.windows(2).all(|w| w[0].gold >= w[1].gold));

    assert!(matches!(service.finish_epoch(&code), Err(ServiceError::NotScoring)));
}

/// Test that abandoning ends the game without scoring.
#[test]
fn test_abandon_mid_epoch() {
    let mut service = RoomService::new(engine(5), MemoryRoomStore::new());
    let (code, ids) = started_room(&mut service, &["Ada", "Bo"]);
    service
        .submit_action(&code, &ids[0], Action::PlaySecretTile { row: 0, col: 0 })
        .unwrap();

    let abandoned = service.abandon(&code).unwrap();
    assert_eq!(abandoned.phase, GamePhase::Finished);
    assert!(abandoned.players.iter().all(|p| p.gold == 50));

    let err = service
        .submit_action(&code, &ids[1], Action::PlaySecretTile { row: 0, col: 1 })
        .unwrap_err();
    assert!(matches!(err, ServiceError::Move(MoveError::GameNotInProgress)));
}

/// Test that every player receives a view hiding the others' tiles.
#[test]
fn test_views_for_each_player() {
    let mut service = RoomService::new(engine(6), MemoryRoomStore::new());
    let (code, ids) = started_room(&mut service, &["Ada", "Bo", "Cy"]);

    for (viewer, view) in service.views(&code).unwrap() {
        assert!(ids.contains(&viewer));
        assert!(view.tile_deck.iter().all(|t| t.is_hidden()));
        for player in &view.players {
            let secret = player.secret_tile.as_ref().unwrap();
            assert_eq!(secret.is_hidden(), player.id != viewer);
        }
    }
}

/// Test that two rooms progress independently.
#[test]
fn test_rooms_are_independent() {
    let mut service = RoomService::new(engine(7), MemoryRoomStore::new());
    let (first, first_ids) = started_room(&mut service, &["Ada", "Bo"]);
    let (second, _) = started_room(&mut service, &["Cy", "Di"]);
    assert_ne!(first, second);

    service
        .submit_action(&first, &first_ids[0], Action::PlaceCastle { castle_rank: CastleRank::Four, row: 2, col: 2 })
        .unwrap();

    assert_eq!(service.state(&first).unwrap().current_player_index, 1);
    assert_eq!(service.state(&second).unwrap().current_player_index, 0);
    assert_eq!(service.store().len(), 2);
}
