//! Move generation and game-tree search for checkers.
//!
//! This library enumerates legal moves for an 8x8 checkers position, including
//! mandatory captures, multi-capture series and sliding kings, and searches the
//! game tree with minimax and alpha-beta pruning to pick a full turn for an
//! automated player. A turn is a list of moves: one simple move, or every
//! capture the piece makes in a row.
//!
//! # Example
//!
//! ```rust
//! use checkers_core::board::{Side, Snapshot};
//! use checkers_core::random::CustomNumberGenerator;
//! use checkers_core::search::{Optimization, SearchEngine};
//!
//! // Start from the opening position
//! let board = Snapshot::initial();
//!
//! // Create and configure a search engine using the builder
//! let mut engine = SearchEngine::builder()
//!     .with_random_generator(CustomNumberGenerator::new(0))
//!     .with_optimization(Optimization::AlphaBeta)
//!     .with_depth(Side::White, 3)
//!     .build();
//!
//! // Legal moves for highlighting or validating human input
//! let legal = engine.find_turns(&board, Side::White);
//! assert!(!legal.has_captures);
//!
//! // The bot's choice for the whole turn
//! let turn = engine.find_best_turns(&board, Side::White);
//! assert_eq!(turn.len(), 1);
//! println!("The best move is: {}", turn[0]);
//! ```

/// Board squares, pieces and position snapshots.
pub mod board;
/// Settings loaded from JSON.
pub mod config;
/// Error types.
pub mod error;
/// Static evaluation of positions.
pub mod eval;
/// The live game board and the turn controller.
pub mod game;
/// Legal move generation.
pub mod movegen;
/// Moves and move sets.
pub mod moves;
/// Traits and implementations for random number generation.
pub mod random;
/// The best-turn search.
pub mod search;
/// Records used to rebuild the best turn after a search.
pub mod search_node;
