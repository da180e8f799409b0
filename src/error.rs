//! Error types for the checkers core.
//!
//! Move generation and search never fail. Errors come from applying a move
//! that does not fit the board, from the turn controller, and from loading
//! settings.

use crate::board::Square;
use crate::moves::Move;
use thiserror::Error;

/// Errors that can occur while driving a game.
#[derive(Error, Debug)]
pub enum CheckersError {
    /// The landing square of a move is already occupied.
    #[error("final position {square} is not empty, can't move")]
    OccupiedDestination { square: Square },

    /// There is no piece on the square a move starts from.
    #[error("begin position {square} is empty, can't move")]
    EmptySource { square: Square },

    /// A move references a square outside the 8x8 grid.
    #[error("square {square} is off the board")]
    OffBoard { square: Square },

    /// The move is not in the legal set for the current position.
    #[error("illegal move {mv}")]
    IllegalMove { mv: Move },

    /// A piece can't be promoted on this square.
    #[error("can't turn into king at {square}")]
    CannotPromote { square: Square },

    /// A text board layout could not be parsed.
    #[error("invalid board layout: {message}")]
    InvalidBoard { message: String },

    /// The piece on `square` has to finish its capture series first.
    #[error("capture series from {square} is not finished")]
    ChainInProgress { square: Square },

    /// The game has already finished.
    #[error("the game is over")]
    GameOver,

    /// Settings file could not be read.
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file is not valid JSON for `Config`.
    #[error("failed to parse settings: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type alias for checkers operations
pub type CheckersResult<T> = Result<T, CheckersError>;
