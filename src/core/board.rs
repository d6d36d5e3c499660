//! The 5×6 board, its cells and the castles placed on it.
//!
//! Cells are stored row-major and never move. A cell holds at most one of
//! a tile or a castle, and once occupied stays occupied until the board is
//! replaced at the start of the next epoch.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::PlayerColor;
use super::tile::{Tile, TileKind};

/// Board height.
pub const BOARD_ROWS: usize = 5;

/// Board width.
pub const BOARD_COLS: usize = 6;

/// Cells in one row or column, borrowed from the board.
pub type Line<'a> = SmallVec<[&'a BoardCell; BOARD_COLS]>;

/// A board coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Row (0-based)
    pub row: usize,
    /// Column (0-based)
    pub col: usize,
}

impl Position {
    /// Create a position. Range is not checked here.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Whether the position lies on the board.
    #[must_use]
    pub const fn in_bounds(self) -> bool {
        self.row < BOARD_ROWS && self.col < BOARD_COLS
    }

    /// Orthogonal neighbours that lie on the board.
    pub fn neighbours(self) -> impl Iterator<Item = Position> {
        let Position { row, col } = self;
        [
            row.checked_sub(1).map(|r| Position::new(r, col)),
            Some(Position::new(row + 1, col)),
            col.checked_sub(1).map(|c| Position::new(row, c)),
            Some(Position::new(row, col + 1)),
        ]
        .into_iter()
        .flatten()
        .filter(|p| p.in_bounds())
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Castle rank, 1 through 4. Serialized as a bare integer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum CastleRank {
    /// Rank 1
    One = 1,
    /// Rank 2
    Two = 2,
    /// Rank 3
    Three = 3,
    /// Rank 4
    Four = 4,
}

impl CastleRank {
    /// All ranks, lowest first.
    pub const ALL: [CastleRank; 4] = [
        CastleRank::One,
        CastleRank::Two,
        CastleRank::Three,
        CastleRank::Four,
    ];

    /// Numeric rank.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Rank plus one, capped at 4.
    #[must_use]
    pub const fn boosted(self) -> Self {
        match self {
            CastleRank::One => CastleRank::Two,
            CastleRank::Two => CastleRank::Three,
            CastleRank::Three | CastleRank::Four => CastleRank::Four,
        }
    }
}

impl TryFrom<u8> for CastleRank {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(CastleRank::One),
            2 => Ok(CastleRank::Two),
            3 => Ok(CastleRank::Three),
            4 => Ok(CastleRank::Four),
            other => Err(format!("castle rank must be 1-4, got {other}")),
        }
    }
}

impl From<CastleRank> for u8 {
    fn from(rank: CastleRank) -> Self {
        rank.value()
    }
}

impl std::fmt::Display for CastleRank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// A castle standing on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Castle {
    /// Placed rank
    pub rank: CastleRank,
    /// Owner's color
    pub color: PlayerColor,
}

/// One board cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardCell {
    /// Row, fixed at creation.
    pub row: usize,
    /// Column, fixed at creation.
    pub col: usize,
    /// Placed tile, if any.
    pub tile: Option<Tile>,
    /// Placed castle, if any.
    pub castle: Option<Castle>,
}

impl BoardCell {
    /// An empty cell at the given coordinate.
    #[must_use]
    pub const fn empty(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            tile: None,
            castle: None,
        }
    }

    /// This cell's coordinate.
    #[must_use]
    pub const fn position(&self) -> Position {
        Position::new(self.row, self.col)
    }

    /// Whether a tile or castle sits here.
    #[must_use]
    pub const fn is_occupied(&self) -> bool {
        self.tile.is_some() || self.castle.is_some()
    }

    /// Kind of the tile here, if any.
    #[must_use]
    pub fn tile_kind(&self) -> Option<TileKind> {
        self.tile.as_ref().map(|t| t.kind)
    }
}

/// Fixed-size board, row-major.
///
/// On the wire the board is a 5×6 grid of rows. Anything else, or a cell
/// whose coordinates disagree with its slot, is rejected on the way in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<BoardCell>>", into = "Vec<Vec<BoardCell>>")]
pub struct Board {
    cells: Vec<BoardCell>,
}

impl TryFrom<Vec<Vec<BoardCell>>> for Board {
    type Error = String;

    fn try_from(grid: Vec<Vec<BoardCell>>) -> Result<Self, Self::Error> {
        if grid.len() != BOARD_ROWS {
            return Err(format!("board must have {BOARD_ROWS} rows, got {}", grid.len()));
        }

        let mut cells = Vec::with_capacity(BOARD_ROWS * BOARD_COLS);
        for (row, line) in grid.into_iter().enumerate() {
            if line.len() != BOARD_COLS {
                return Err(format!("row {row} must have {BOARD_COLS} cells, got {}", line.len()));
            }
            for (col, cell) in line.into_iter().enumerate() {
                if (cell.row, cell.col) != (row, col) {
                    return Err(format!(
                        "cell at ({row}, {col}) claims position ({}, {})",
                        cell.row, cell.col
                    ));
                }
                if cell.tile.is_some() && cell.castle.is_some() {
                    return Err(format!("cell ({row}, {col}) holds both a tile and a castle"));
                }
                cells.push(cell);
            }
        }
        Ok(Self { cells })
    }
}

impl From<Board> for Vec<Vec<BoardCell>> {
    fn from(board: Board) -> Self {
        let mut cells = board.cells.into_iter();
        (0..BOARD_ROWS)
            .map(|_| cells.by_ref().take(BOARD_COLS).collect())
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        create_empty_board()
    }
}

impl Board {
    /// Cell at `pos`, or `None` when out of range.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<&BoardCell> {
        pos.in_bounds().then(|| &self.cells[pos.row * BOARD_COLS + pos.col])
    }

    /// Mutable cell at `pos`, or `None` when out of range.
    pub fn get_mut(&mut self, pos: Position) -> Option<&mut BoardCell> {
        if pos.in_bounds() {
            Some(&mut self.cells[pos.row * BOARD_COLS + pos.col])
        } else {
            None
        }
    }

    /// All cells, row-major.
    pub fn cells(&self) -> impl Iterator<Item = &BoardCell> {
        self.cells.iter()
    }

    /// Cells of row `row`, left to right.
    #[must_use]
    pub fn row(&self, row: usize) -> Line<'_> {
        self.cells[row * BOARD_COLS..(row + 1) * BOARD_COLS].iter().collect()
    }

    /// Cells of column `col`, top to bottom.
    #[must_use]
    pub fn col(&self, col: usize) -> Line<'_> {
        self.cells.iter().skip(col).step_by(BOARD_COLS).collect()
    }

    /// Whether every cell is occupied.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(BoardCell::is_occupied)
    }

    /// Positions still free.
    pub fn empty_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .iter()
            .filter(|c| !c.is_occupied())
            .map(BoardCell::position)
    }

    /// Whether any orthogonal neighbour of `pos` holds a wizard.
    #[must_use]
    pub fn is_adjacent_to_wizard(&self, pos: Position) -> bool {
        pos.neighbours()
            .filter_map(|p| self.get(p))
            .any(|cell| cell.tile_kind() == Some(TileKind::Wizard))
    }
}

/// A 5×6 board with every cell empty.
#[must_use]
pub fn create_empty_board() -> Board {
    let cells = (0..BOARD_ROWS)
        .flat_map(|row| (0..BOARD_COLS).map(move |col| BoardCell::empty(row, col)))
        .collect();
    Board { cells }
}
