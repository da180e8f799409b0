//! Static evaluation of leaf positions.

use crate::board::{Cell, Side, Snapshot};
use serde::{Deserialize, Serialize};

/// Score of a position where the side being scored against has no pieces left.
pub const WIN_SCORE: f64 = 1e9;

/// Bonus per row a man has advanced from its own back rank.
const ADVANCEMENT_BONUS: f64 = 0.05;

/// How positions are scored.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Default, Serialize, Deserialize)]
pub enum ScoringMode {
    /// Men count 1, kings count 4.
    PieceCount,
    /// Men count 1 plus a bonus for advancement, kings count 5.
    #[default]
    NumberAndPotential,
}

impl ScoringMode {
    pub const fn king_weight(self) -> f64 {
        match self {
            ScoringMode::PieceCount => 4.0,
            ScoringMode::NumberAndPotential => 5.0,
        }
    }

    fn man_weight(self, side: Side, row: i8) -> f64 {
        match self {
            ScoringMode::PieceCount => 1.0,
            ScoringMode::NumberAndPotential => {
                let advanced = match side {
                    Side::White => 7 - row,
                    Side::Black => row,
                };
                1.0 + ADVANCEMENT_BONUS * f64::from(advanced)
            }
        }
    }
}

#[derive(Default)]
struct Tally {
    men: f64,
    kings: f64,
}

impl Tally {
    fn is_empty(&self) -> bool {
        self.men == 0.0 && self.kings == 0.0
    }

    fn weighted(&self, king_weight: f64) -> f64 {
        self.men + self.kings * king_weight
    }
}

/// Scores `snapshot` as the ratio of the opponent's weighted material to the
/// weighted material of `first`.
///
/// Higher values favor the opponent of `first`. Returns [`WIN_SCORE`] when
/// `first` has no pieces and `0.0` when its opponent has none. The search
/// passes the opponent of the searching side as `first`, so the searcher
/// maximizes this value.
pub fn evaluate(snapshot: &Snapshot, first: Side, mode: ScoringMode) -> f64 {
    let mut own = Tally::default();
    let mut other = Tally::default();
    for square in Snapshot::squares() {
        let (side, tally_king) = match snapshot.get(square) {
            Cell::Empty => continue,
            Cell::Man(side) => (side, false),
            Cell::King(side) => (side, true),
        };
        let tally = if side == first { &mut own } else { &mut other };
        if tally_king {
            tally.kings += 1.0;
        } else {
            tally.men += mode.man_weight(side, square.row);
        }
    }

    if own.is_empty() {
        return WIN_SCORE;
    }
    if other.is_empty() {
        return 0.0;
    }
    let king_weight = mode.king_weight();
    other.weighted(king_weight) / own.weighted(king_weight)
}
