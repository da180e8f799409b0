//! Legal move generation.
//!
//! Men step one square diagonally forward and capture by jumping over an
//! adjacent opposing piece in any of the four diagonal directions. Kings slide
//! along diagonals and capture the first opposing piece on a ray when the
//! square behind it is empty. Captures are mandatory: simple moves are only
//! produced when no capture exists.

use crate::board::{Cell, Side, Snapshot, Square};
use crate::moves::{Move, MoveSet};
use serde::{Deserialize, Serialize};

const DIAGONALS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Where a capturing king may land.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KingLanding {
    /// Only the square right behind the captured piece.
    #[default]
    Immediate,
    /// Any empty square behind the captured piece up to the next occupied one.
    Extended,
}

/// Generates the moves of the piece standing on `square`.
///
/// Returns an empty set for an empty or off-board square. When the piece can capture, only
/// captures are returned and `has_captures` is set.
pub fn piece_moves(snapshot: &Snapshot, square: Square, landing: KingLanding) -> MoveSet {
    if !square.is_on_board() {
        return MoveSet::default();
    }
    let cell = snapshot.get(square);
    let captures = match cell {
        Cell::Empty => return MoveSet::default(),
        Cell::Man(side) => man_captures(snapshot, square, side),
        Cell::King(side) => king_captures(snapshot, square, side, landing),
    };
    if !captures.is_empty() {
        return MoveSet {
            moves: captures,
            has_captures: true,
        };
    }

    let moves = match cell {
        Cell::Man(side) => man_steps(snapshot, square, side),
        _ => king_slides(snapshot, square),
    };
    MoveSet {
        moves,
        has_captures: false,
    }
}

/// Generates the moves of every piece of `side`, in row-major order.
///
/// If any piece can capture, the result holds only captures, drawn from the
/// pieces that have them.
pub fn side_moves(snapshot: &Snapshot, side: Side, landing: KingLanding) -> MoveSet {
    let mut result = MoveSet::default();
    for (square, _) in snapshot.pieces(side) {
        let piece = piece_moves(snapshot, square, landing);
        if piece.has_captures && !result.has_captures {
            result.has_captures = true;
            result.moves.clear();
        }
        if piece.has_captures || !result.has_captures {
            result.moves.extend(piece.moves);
        }
    }
    result
}

fn man_captures(snapshot: &Snapshot, from: Square, side: Side) -> Vec<Move> {
    let mut moves = Vec::new();
    for (d_row, d_col) in DIAGONALS {
        let Some(over) = from.offset(d_row, d_col) else {
            continue;
        };
        let Some(to) = from.offset(2 * d_row, 2 * d_col) else {
            continue;
        };
        if snapshot.get(to).is_empty() && snapshot.get(over).is_opponent_of(side) {
            moves.push(Move::capture(from, to, over));
        }
    }
    moves
}

fn man_steps(snapshot: &Snapshot, from: Square, side: Side) -> Vec<Move> {
    [-1, 1]
        .into_iter()
        .filter_map(|d_col| from.offset(side.forward(), d_col))
        .filter(|to| snapshot.get(*to).is_empty())
        .map(|to| Move::new(from, to))
        .collect()
}

fn king_captures(snapshot: &Snapshot, from: Square, side: Side, landing: KingLanding) -> Vec<Move> {
    let mut moves = Vec::new();
    for (d_row, d_col) in DIAGONALS {
        let mut captured: Option<Square> = None;
        let mut current = from;
        while let Some(next) = current.offset(d_row, d_col) {
            current = next;
            let cell = snapshot.get(current);
            if !cell.is_empty() {
                // own piece, or a second piece after an opponent
                if cell.belongs_to(side) || captured.is_some() {
                    break;
                }
                captured = Some(current);
                continue;
            }
            if let Some(over) = captured {
                moves.push(Move::capture(from, current, over));
                if landing == KingLanding::Immediate {
                    break;
                }
            }
        }
    }
    moves
}

fn king_slides(snapshot: &Snapshot, from: Square) -> Vec<Move> {
    let mut moves = Vec::new();
    for (d_row, d_col) in DIAGONALS {
        let mut current = from;
        while let Some(next) = current.offset(d_row, d_col) {
            if !snapshot.get(next).is_empty() {
                break;
            }
            moves.push(Move::new(from, next));
            current = next;
        }
    }
    moves
}
