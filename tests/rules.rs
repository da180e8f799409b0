//! Move generation rules checked through the public API.
//!
//! Men step forward one square and capture in every diagonal direction, kings
//! slide along free diagonals, and a capture always takes precedence over a
//! simple move.

use checkers_core::board::{Cell, Side, Snapshot, Square};
use checkers_core::movegen::{KingLanding, piece_moves, side_moves};
use checkers_core::moves::Move;

fn layout(text: &str) -> Snapshot {
    text.parse().expect("valid layout")
}

// =============================================================================
// Men
// =============================================================================

#[test]
fn opening_offers_seven_moves_to_each_side() {
    let snapshot = Snapshot::initial();

    let white = side_moves(&snapshot, Side::White, KingLanding::Immediate);
    let black = side_moves(&snapshot, Side::Black, KingLanding::Immediate);

    assert_eq!(white.len(), 7);
    assert_eq!(black.len(), 7);
    assert!(white.iter().all(|mv| mv.to.row == 4));
    assert!(black.iter().all(|mv| mv.to.row == 3));
}

#[test]
fn captures_are_mandatory() {
    let snapshot = layout(
        "
        ........
        ........
        ........
        ....b...
        ...w....
        ........
        .......w
        ........",
    );

    let moves = side_moves(&snapshot, Side::White, KingLanding::Immediate);

    assert!(moves.has_captures);
    assert_eq!(
        moves.moves,
        vec![Move::capture(Square::new(4, 3), Square::new(2, 5), Square::new(3, 4))]
    );
}

#[test]
fn men_capture_backwards() {
    let snapshot = layout(
        "
        ........
        ........
        ........
        ..w.....
        ...b....
        ........
        ........
        ........",
    );

    let moves = piece_moves(&snapshot, Square::new(3, 2), KingLanding::Immediate);

    assert!(moves.has_captures);
    assert_eq!(
        moves.moves,
        vec![Move::capture(Square::new(3, 2), Square::new(5, 4), Square::new(4, 3))]
    );
}

#[test]
fn reaching_the_far_row_promotes() {
    let snapshot = layout(
        "
        ........
        ..w.....
        ........
        ........
        ........
        ........
        ........
        ........",
    );

    let after = snapshot
        .apply(&Move::new(Square::new(1, 2), Square::new(0, 1)))
        .expect("legal step");

    assert_eq!(after.get(Square::new(0, 1)), Cell::King(Side::White));
    assert_eq!(after.get(Square::new(1, 2)), Cell::Empty);
}

// =============================================================================
// Kings
// =============================================================================

#[test]
fn king_slides_along_the_long_diagonal() {
    let mut snapshot = Snapshot::empty();
    snapshot.set(Square::new(7, 0), Cell::King(Side::White));

    let moves = piece_moves(&snapshot, Square::new(7, 0), KingLanding::Immediate);

    assert!(!moves.has_captures);
    assert_eq!(moves.len(), 7);
    assert!(moves.iter().all(|mv| mv.to.row + mv.to.col == 7));
}

#[test]
fn king_cannot_jump_two_pieces_in_a_row() {
    let snapshot = layout(
        "
        ........
        ........
        ........
        ........
        ...b....
        ..b.....
        ........
        W.......",
    );

    let moves = piece_moves(&snapshot, Square::new(7, 0), KingLanding::Immediate);

    assert!(!moves.has_captures);
    assert_eq!(moves.moves, vec![Move::new(Square::new(7, 0), Square::new(6, 1))]);
}

// =============================================================================
// Capture series
// =============================================================================

#[test]
fn landing_square_can_continue_the_series() {
    let snapshot = layout(
        "
        .b......
        ........
        ........
        ....b...
        ........
        ..b.....
        .w......
        ........",
    );
    let first = Move::capture(Square::new(6, 1), Square::new(4, 3), Square::new(5, 2));

    let after = snapshot.apply(&first).expect("legal capture");
    let next = piece_moves(&after, first.to, KingLanding::Immediate);

    assert!(next.has_captures);
    assert_eq!(
        next.moves,
        vec![Move::capture(Square::new(4, 3), Square::new(2, 5), Square::new(3, 4))]
    );
}
