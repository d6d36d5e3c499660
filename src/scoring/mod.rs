//! Epoch scoring.
//!
//! Each player scores every row and every column of the board
//! independently. A line is scored as follows:
//!
//! 1. A mountain splits the line into the cells before and after it; each
//!    side is a separate segment and the mountain itself scores nothing.
//! 2. A segment without any of the player's castles scores 0, hazards
//!    included.
//! 3. Castle strength is the sum of the player's castle ranks in the
//!    segment, each raised by one (max 4) when orthogonally next to a
//!    wizard anywhere on the board.
//! 4. Tile value is the sum of resources and hazards. A dragon in the
//!    segment zeroes the resources; hazards still count.
//! 5. A gold mine in the segment doubles the tile value.
//! 6. Segment score = tile value × castle strength.
//!
//! Only the first mountain of a line splits it. A second mountain in the
//! same line lands inside a segment, where it is inert.

use serde::{Deserialize, Serialize};

use crate::core::{Board, BoardCell, GameState, PlayerColor, PlayerId, TileKind, BOARD_COLS, BOARD_ROWS};

/// One player's breakdown for an epoch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerScore {
    /// Whose score
    pub player_id: PlayerId,
    /// Per-row totals, top to bottom
    pub row_scores: [i64; BOARD_ROWS],
    /// Per-column totals, left to right
    pub col_scores: [i64; BOARD_COLS],
    /// Sum of all rows and columns
    pub total_score: i64,
}

/// Score every player for the current board. Read-only.
#[must_use]
pub fn calculate_epoch_scores(state: &GameState) -> Vec<PlayerScore> {
    state
        .players
        .iter()
        .map(|player| score_player(&state.board, &player.id, player.color))
        .collect()
}

fn score_player(board: &Board, player_id: &PlayerId, color: PlayerColor) -> PlayerScore {
    let mut row_scores = [0; BOARD_ROWS];
    for (row, score) in row_scores.iter_mut().enumerate() {
        *score = line_score(&board.row(row), color, board);
    }

    let mut col_scores = [0; BOARD_COLS];
    for (col, score) in col_scores.iter_mut().enumerate() {
        *score = line_score(&board.col(col), color, board);
    }

    let total_score = row_scores.iter().chain(col_scores.iter()).sum();

    PlayerScore {
        player_id: player_id.clone(),
        row_scores,
        col_scores,
        total_score,
    }
}

/// Score one row or column for `color`.
///
/// `board` is the whole board, needed for wizard adjacency across lines.
#[must_use]
pub fn line_score(line: &[&BoardCell], color: PlayerColor, board: &Board) -> i64 {
    match line.iter().position(|cell| cell.tile_kind() == Some(TileKind::Mountain)) {
        Some(mountain) => {
            segment_score(&line[..mountain], color, board)
                + segment_score(&line[mountain + 1..], color, board)
        }
        None => segment_score(line, color, board),
    }
}

fn segment_score(segment: &[&BoardCell], color: PlayerColor, board: &Board) -> i64 {
    let strength = castle_strength(segment, color, board);
    if strength == 0 {
        return 0;
    }

    let has = |kind: TileKind| segment.iter().any(|cell| cell.tile_kind() == Some(kind));
    let dragon = has(TileKind::Dragon);

    let mut value: i64 = segment
        .iter()
        .filter_map(|cell| cell.tile.as_ref())
        .map(|tile| match tile.kind {
            TileKind::Resource if dragon => 0,
            TileKind::Resource | TileKind::Hazard => i64::from(tile.value),
            _ => 0,
        })
        .sum();

    if has(TileKind::GoldMine) {
        value *= 2;
    }

    value * strength
}

fn castle_strength(segment: &[&BoardCell], color: PlayerColor, board: &Board) -> i64 {
    segment
        .iter()
        .filter_map(|cell| {
            let castle = cell.castle.filter(|c| c.color == color)?;
            let rank = if board.is_adjacent_to_wizard(cell.position()) {
                castle.rank.boosted()
            } else {
                castle.rank
            };
            Some(i64::from(rank.value()))
        })
        .sum()
}
