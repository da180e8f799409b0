use crate::error::{CheckersError, CheckersResult};
use crate::moves::Move;
use std::fmt;
use std::str::FromStr;

/// A source of the current position.
///
/// The search engine only reads positions through this trait, so it can be
/// handed a bare [`Snapshot`] or a live game board.
pub trait Board {
    /// Returns a copy of the current position.
    fn get_board(&self) -> Snapshot;
}

/// Width and height of the board.
pub const BOARD_SIZE: i8 = 8;

/// The two sides of a game. White moves first and advances towards row 0.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Side {
    White,
    Black,
}

impl Side {
    /// Returns the other side.
    pub const fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Row delta of a forward step for this side's men.
    pub const fn forward(self) -> i8 {
        match self {
            Side::White => -1,
            Side::Black => 1,
        }
    }

    /// The row on which this side's men are promoted.
    pub const fn promotion_row(self) -> i8 {
        match self {
            Side::White => 0,
            Side::Black => BOARD_SIZE - 1,
        }
    }

    /// Side to move on the given zero-based turn number.
    pub const fn from_turn(turn: usize) -> Side {
        if turn % 2 == 0 { Side::White } else { Side::Black }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => write!(f, "white"),
            Side::Black => write!(f, "black"),
        }
    }
}

/// Content of a single square.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    /// An unpromoted piece.
    Man(Side),
    /// A promoted piece.
    King(Side),
}

impl Cell {
    /// Returns the owner of the piece, `None` for an empty square.
    pub const fn side(self) -> Option<Side> {
        match self {
            Cell::Empty => None,
            Cell::Man(side) | Cell::King(side) => Some(side),
        }
    }

    /// Returns true for a promoted piece of either side.
    pub const fn is_king(self) -> bool {
        matches!(self, Cell::King(_))
    }

    /// Returns true if no piece stands on the square.
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Returns true if the square holds a piece of `side`.
    pub fn belongs_to(self, side: Side) -> bool {
        self.side() == Some(side)
    }

    /// Returns true if the square holds a piece of the opponent of `side`.
    pub fn is_opponent_of(self, side: Side) -> bool {
        self.side() == Some(side.opponent())
    }

    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Man(Side::White) => 'w',
            Cell::Man(Side::Black) => 'b',
            Cell::King(Side::White) => 'W',
            Cell::King(Side::Black) => 'B',
        }
    }

    fn from_symbol(symbol: char) -> Option<Cell> {
        match symbol {
            '.' | '_' => Some(Cell::Empty),
            'w' => Some(Cell::Man(Side::White)),
            'b' => Some(Cell::Man(Side::Black)),
            'W' => Some(Cell::King(Side::White)),
            'B' => Some(Cell::King(Side::Black)),
            _ => None,
        }
    }
}

/// A square on the board addressed by row and column, both zero-based.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub struct Square {
    pub row: i8,
    pub col: i8,
}

impl Square {
    /// Creates a square. It may lie off the board; see [`Square::is_on_board`].
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    /// Returns true if both coordinates are within `0..BOARD_SIZE`.
    pub const fn is_on_board(self) -> bool {
        self.row >= 0 && self.row < BOARD_SIZE && self.col >= 0 && self.col < BOARD_SIZE
    }

    /// Returns the square shifted by the given deltas, or `None` if it falls off the board.
    pub const fn offset(self, d_row: i8, d_col: i8) -> Option<Square> {
        let square = Square::new(self.row + d_row, self.col + d_col);
        if square.is_on_board() { Some(square) } else { None }
    }

    /// Playable squares are the dark ones, where `row + col` is odd.
    pub const fn is_dark(self) -> bool {
        (self.row + self.col) % 2 == 1
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Number of men and kings a side has on the board.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub struct Material {
    pub men: u32,
    pub kings: u32,
}

impl Material {
    pub const fn total(self) -> u32 {
        self.men + self.kings
    }
}

/// An 8x8 board position.
///
/// Snapshots are plain values: applying a move returns a new snapshot and leaves
/// the original untouched, so search branches never observe each other's changes.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash, Default)]
pub struct Snapshot {
    cells: [[Cell; BOARD_SIZE as usize]; BOARD_SIZE as usize],
}

impl Snapshot {
    /// Creates a board without any pieces.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates the starting position: black men on the dark squares of rows 0-2,
    /// white men on the dark squares of rows 5-7.
    pub fn initial() -> Self {
        let mut snapshot = Self::empty();
        for square in Self::squares().filter(|sq| sq.is_dark()) {
            if square.row < 3 {
                snapshot.set(square, Cell::Man(Side::Black));
            } else if square.row > 4 {
                snapshot.set(square, Cell::Man(Side::White));
            }
        }
        snapshot
    }

    /// Iterates over every square in row-major order.
    pub fn squares() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Square::new(row, col)))
    }

    /// Returns the content of an on-board square.
    pub fn get(&self, square: Square) -> Cell {
        self.cells[square.row as usize][square.col as usize]
    }

    /// Places `cell` on an on-board square.
    pub fn set(&mut self, square: Square, cell: Cell) {
        self.cells[square.row as usize][square.col as usize] = cell;
    }

    /// Iterates over the pieces of `side` in row-major order.
    pub fn pieces(&self, side: Side) -> impl Iterator<Item = (Square, Cell)> + '_ {
        Self::squares()
            .map(|sq| (sq, self.get(sq)))
            .filter(move |(_, cell)| cell.belongs_to(side))
    }

    /// Counts the men and kings of `side`.
    pub fn material(&self, side: Side) -> Material {
        self.pieces(side).fold(Material::default(), |mut acc, (_, cell)| {
            if cell.is_king() {
                acc.kings += 1;
            } else {
                acc.men += 1;
            }
            acc
        })
    }

    /// Returns the position after `mv` without validating it.
    ///
    /// The captured piece, if any, is removed and a man reaching its promotion
    /// row becomes a king. Callers must only pass moves produced by the move
    /// generator for this snapshot; use [`Snapshot::apply`] otherwise.
    pub fn with_move(&self, mv: &Move) -> Snapshot {
        let mut next = *self;
        if let Some(captured) = mv.captured {
            next.set(captured, Cell::Empty);
        }
        let mut piece = next.get(mv.from);
        if let Cell::Man(side) = piece {
            if mv.to.row == side.promotion_row() {
                piece = Cell::King(side);
            }
        }
        next.set(mv.to, piece);
        next.set(mv.from, Cell::Empty);
        next
    }

    /// Returns the position after `mv`, failing if the move does not fit the board.
    pub fn apply(&self, mv: &Move) -> CheckersResult<Snapshot> {
        for square in [Some(mv.from), Some(mv.to), mv.captured].into_iter().flatten() {
            if !square.is_on_board() {
                return Err(CheckersError::OffBoard { square });
            }
        }
        if !self.get(mv.to).is_empty() {
            return Err(CheckersError::OccupiedDestination { square: mv.to });
        }
        if self.get(mv.from).is_empty() {
            return Err(CheckersError::EmptySource { square: mv.from });
        }
        Ok(self.with_move(mv))
    }

    /// Applies a whole turn, move by move.
    pub fn apply_all(&self, moves: &[Move]) -> CheckersResult<Snapshot> {
        moves
            .iter()
            .try_fold(*self, |snapshot, mv| snapshot.apply(mv))
    }
}

impl Board for Snapshot {
    fn get_board(&self) -> Snapshot {
        *self
    }
}

impl FromStr for Snapshot {
    type Err = CheckersError;

    /// Parses eight lines of eight symbols: `.` empty, `w`/`b` men, `W`/`B` kings.
    /// Whitespace inside a line and blank lines are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<Vec<char>> = s
            .lines()
            .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|row| !row.is_empty())
            .collect();
        if rows.len() != BOARD_SIZE as usize {
            return Err(CheckersError::InvalidBoard {
                message: format!("expected {} rows, got {}", BOARD_SIZE, rows.len()),
            });
        }

        let mut snapshot = Snapshot::empty();
        for (row, symbols) in rows.iter().enumerate() {
            if symbols.len() != BOARD_SIZE as usize {
                return Err(CheckersError::InvalidBoard {
                    message: format!("row {} has {} squares", row, symbols.len()),
                });
            }
            for (col, &symbol) in symbols.iter().enumerate() {
                let cell = Cell::from_symbol(symbol).ok_or_else(|| CheckersError::InvalidBoard {
                    message: format!("unknown symbol '{}' at ({}, {})", symbol, row, col),
                })?;
                snapshot.set(Square::new(row as i8, col as i8), cell);
            }
        }
        Ok(snapshot)
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let line: String = row.iter().map(|cell| cell.symbol()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
