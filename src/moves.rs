use crate::board::Square;
use std::fmt;

/// A single step of a turn: a piece moves from one square to another,
/// optionally capturing the piece on `captured`.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    /// The square of the captured piece. `None` for a simple move.
    pub captured: Option<Square>,
}

impl Move {
    /// Creates a simple (non-capturing) move.
    pub const fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            captured: None,
        }
    }

    /// Creates a capturing move.
    pub const fn capture(from: Square, to: Square, captured: Square) -> Self {
        Self {
            from,
            to,
            captured: Some(captured),
        }
    }

    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)?;
        if let Some(captured) = self.captured {
            write!(f, " x {}", captured)?;
        }
        Ok(())
    }
}

/// Legal moves for a side or a single piece.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveSet {
    pub moves: Vec<Move>,
    /// True if the moves are captures. Captures are mandatory, so a set never
    /// mixes capturing and simple moves.
    pub has_captures: bool,
}

impl MoveSet {
    /// Returns true if there is nothing to play.
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Number of moves in the set.
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Iterates over the moves in generation order.
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.moves.iter()
    }

    /// Returns true if `mv` is one of the legal moves.
    pub fn contains(&self, mv: &Move) -> bool {
        self.moves.contains(mv)
    }

    /// Moves of the piece standing on `square`.
    pub fn from_square(&self, square: Square) -> impl Iterator<Item = &Move> + '_ {
        self.moves.iter().filter(move |mv| mv.from == square)
    }

    /// Squares holding a piece that can move, without duplicates.
    pub fn movable_squares(&self) -> Vec<Square> {
        let mut squares: Vec<Square> = Vec::with_capacity(self.moves.len());
        for mv in &self.moves {
            if !squares.contains(&mv.from) {
                squares.push(mv.from);
            }
        }
        squares
    }
}

impl IntoIterator for MoveSet {
    type Item = Move;
    type IntoIter = std::vec::IntoIter<Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.into_iter()
    }
}

impl<'a> IntoIterator for &'a MoveSet {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}
