use crate::board::{Board, Side, Snapshot, Square};
use crate::config::Config;
use crate::eval::{self, ScoringMode, WIN_SCORE};
use crate::movegen::{self, KingLanding};
use crate::moves::{Move, MoveSet};
use crate::random::{CustomNumberGenerator, RandomGenerator};
use crate::search_node::TurnTable;
use ego_tree::NodeId;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Lower bound every score starts from.
const ALPHA_INIT: f64 = -1.0;
/// Upper bound every score starts from.
const BETA_INIT: f64 = WIN_SCORE + 1.0;

/// Default search depth for both sides.
pub const DEFAULT_DEPTH: usize = 3;

/// How aggressively the minimax recursion prunes.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Default, Serialize, Deserialize)]
pub enum Optimization {
    /// Plain minimax, every node is visited.
    #[serde(rename = "none")]
    NoPruning,
    /// Cut off once `alpha > beta`.
    #[default]
    #[serde(rename = "alpha-beta")]
    AlphaBeta,
    /// Like `AlphaBeta`, and return as soon as `alpha == beta`, nudging the
    /// score by one in favor of the side to move. Faster, but the returned
    /// scores are approximate.
    #[serde(rename = "alpha-beta-plus")]
    AlphaBetaPlus,
}

/// The result of a best-turn search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// The chosen turn. Empty if the side to move has no legal moves.
    pub turns: Vec<Move>,
    /// Score of the chosen turn from the searching side's point of view.
    pub score: f64,
    /// Number of minimax nodes visited.
    pub nodes: u64,
}

/// Move generation and best-turn search for checkers.
///
/// The engine owns the random generator used to shuffle generated moves, so
/// equally good turns are picked at random. Use a [`CustomNumberGenerator`]
/// with a fixed seed for reproducible play.
pub struct SearchEngine<K: RandomGenerator = CustomNumberGenerator> {
    random: K,
    scoring_mode: ScoringMode,
    optimization: Optimization,
    king_landing: KingLanding,
    white_depth: usize,
    black_depth: usize,
    max_depth: usize,
    nodes: u64,
}

impl<K: RandomGenerator> Default for SearchEngine<K> {
    fn default() -> Self {
        SearchEngineBuilder::new().build()
    }
}

/// A builder for creating instances of `SearchEngine`.
pub struct SearchEngineBuilder<K: RandomGenerator> {
    random_generator: K,
    scoring_mode: ScoringMode,
    optimization: Optimization,
    king_landing: KingLanding,
    white_depth: usize,
    black_depth: usize,
}

impl<K: RandomGenerator> Default for SearchEngineBuilder<K> {
    fn default() -> Self {
        SearchEngineBuilder::new()
    }
}

impl<K: RandomGenerator> SearchEngineBuilder<K> {
    /// Creates a builder with the default settings.
    pub fn new() -> Self {
        Self {
            random_generator: K::default(),
            scoring_mode: ScoringMode::default(),
            optimization: Optimization::default(),
            king_landing: KingLanding::default(),
            white_depth: DEFAULT_DEPTH,
            black_depth: DEFAULT_DEPTH,
        }
    }

    /// Sets the random number generator used to shuffle moves.
    pub fn with_random_generator(mut self, rg: K) -> Self {
        self.random_generator = rg;
        self
    }

    /// Sets how leaf positions are scored.
    pub fn with_scoring_mode(mut self, mode: ScoringMode) -> Self {
        self.scoring_mode = mode;
        self
    }

    /// Sets the pruning level of the search.
    pub fn with_optimization(mut self, optimization: Optimization) -> Self {
        self.optimization = optimization;
        self
    }

    /// Sets where a capturing king may land.
    pub fn with_king_landing(mut self, landing: KingLanding) -> Self {
        self.king_landing = landing;
        self
    }

    /// Sets the search depth used when `side` is to move.
    pub fn with_depth(mut self, side: Side, depth: usize) -> Self {
        match side {
            Side::White => self.white_depth = depth,
            Side::Black => self.black_depth = depth,
        }
        self
    }

    /// Builds the `SearchEngine` with the configured settings.
    pub fn build(self) -> SearchEngine<K> {
        SearchEngine {
            random: self.random_generator,
            scoring_mode: self.scoring_mode,
            optimization: self.optimization,
            king_landing: self.king_landing,
            white_depth: self.white_depth,
            black_depth: self.black_depth,
            max_depth: 0,
            nodes: 0,
        }
    }
}

impl SearchEngine<CustomNumberGenerator> {
    /// Builds an engine from the `Bot` section of the settings.
    pub fn from_config(config: &Config) -> Self {
        SearchEngineBuilder::new()
            .with_random_generator(CustomNumberGenerator::for_settings(config.bot.no_random))
            .with_scoring_mode(config.bot.scoring_mode)
            .with_optimization(config.bot.optimization)
            .with_king_landing(config.bot.king_capture_landing)
            .with_depth(Side::White, config.bot.white_bot_level)
            .with_depth(Side::Black, config.bot.black_bot_level)
            .build()
    }
}

impl<K: RandomGenerator> SearchEngine<K> {
    /// Returns a new builder for `SearchEngine`.
    pub fn builder() -> SearchEngineBuilder<K> {
        SearchEngineBuilder::new()
    }

    /// Search depth used when `side` is to move.
    pub fn depth(&self, side: Side) -> usize {
        match side {
            Side::White => self.white_depth,
            Side::Black => self.black_depth,
        }
    }

    /// Changes the search depth used when `side` is to move.
    pub fn set_depth(&mut self, side: Side, depth: usize) {
        match side {
            Side::White => self.white_depth = depth,
            Side::Black => self.black_depth = depth,
        }
    }

    /// The king landing rule used by move generation.
    pub fn king_landing(&self) -> KingLanding {
        self.king_landing
    }

    /// Legal moves of `side`, captures only if any piece can capture, in shuffled order.
    pub fn find_turns(&mut self, board: &impl Board, side: Side) -> MoveSet {
        self.side_turns(&board.get_board(), side)
    }

    /// Legal moves of the piece on `square`, unshuffled.
    pub fn find_piece_turns(&self, board: &impl Board, square: Square) -> MoveSet {
        movegen::piece_moves(&board.get_board(), square, self.king_landing)
    }

    /// Finds the best full turn for `side`: a single move, or every capture of a
    /// capture series in order. An empty result means `side` has no legal moves.
    pub fn find_best_turns(&mut self, board: &impl Board, side: Side) -> Vec<Move> {
        self.search(board, side).turns
    }

    /// Like [`SearchEngine::find_best_turns`], also reporting the score and node count.
    pub fn search(&mut self, board: &impl Board, side: Side) -> SearchOutcome {
        let snapshot = board.get_board();
        self.max_depth = self.depth(side);
        self.nodes = 0;

        let mut table = TurnTable::new();
        let root = table.root();
        let score = self.find_first_best_turn(&mut table, root, snapshot, side, None, ALPHA_INIT);
        let turns = table.best_turn();

        debug!(
            %side,
            depth = self.max_depth,
            nodes = self.nodes,
            chain_nodes = table.len(),
            score,
            moves = turns.len(),
            "best turn found"
        );
        SearchOutcome {
            turns,
            score,
            nodes: self.nodes,
        }
    }

    fn side_turns(&mut self, snapshot: &Snapshot, side: Side) -> MoveSet {
        let mut turns = movegen::side_moves(snapshot, side, self.king_landing);
        self.random.shuffle(&mut turns.moves);
        turns
    }

    /// Explores the searching side's own turn. A capture keeps the turn going
    /// with the same piece; the opponent's reply starts once no capture is left.
    /// Every explored landing square gets a node in `table`.
    fn find_first_best_turn(
        &mut self,
        table: &mut TurnTable,
        node: NodeId,
        snapshot: Snapshot,
        side: Side,
        from: Option<Square>,
        alpha: f64,
    ) -> f64 {
        let turns = match from {
            Some(square) => movegen::piece_moves(&snapshot, square, self.king_landing),
            None => self.side_turns(&snapshot, side),
        };

        if from.is_some() && !turns.has_captures {
            return self.find_best_turns_rec(snapshot, side.opponent(), 0, alpha, BETA_INIT, None);
        }

        let mut best_score = ALPHA_INIT;
        let mut chosen = false;
        for turn in &turns.moves {
            let next_snapshot = snapshot.with_move(turn);
            let (score, next) = if turns.has_captures {
                let next = table.add_continuation(node);
                let score = self.find_first_best_turn(
                    table,
                    next,
                    next_snapshot,
                    side,
                    Some(turn.to),
                    best_score,
                );
                (score, Some(next))
            } else {
                let score = self.find_best_turns_rec(
                    next_snapshot,
                    side.opponent(),
                    0,
                    best_score,
                    BETA_INIT,
                    None,
                );
                (score, None)
            };

            // approximate pruning can push a score below the initial bound
            if score > best_score || !chosen {
                best_score = score;
                chosen = true;
                table.set_best(node, *turn, next);
            }
        }

        best_score
    }

    /// Depth-limited minimax. Odd depths belong to the searching side and
    /// maximize, even depths to its opponent and minimize. Continuing a capture
    /// series (`from` is set) stays on the same depth.
    fn find_best_turns_rec(
        &mut self,
        snapshot: Snapshot,
        side: Side,
        depth: usize,
        mut alpha: f64,
        mut beta: f64,
        from: Option<Square>,
    ) -> f64 {
        self.nodes += 1;
        let maximizing = depth % 2 == 1;

        if depth == self.max_depth {
            let searcher = if maximizing { side } else { side.opponent() };
            return eval::evaluate(&snapshot, searcher.opponent(), self.scoring_mode);
        }

        let turns = match from {
            Some(square) => movegen::piece_moves(&snapshot, square, self.king_landing),
            None => self.side_turns(&snapshot, side),
        };

        if from.is_some() && !turns.has_captures {
            return self.find_best_turns_rec(snapshot, side.opponent(), depth + 1, alpha, beta, None);
        }

        // the side to move is stuck and loses
        if turns.is_empty() {
            return if maximizing { 0.0 } else { WIN_SCORE };
        }

        let mut min_score = BETA_INIT;
        let mut max_score = ALPHA_INIT;
        for turn in &turns.moves {
            let next_snapshot = snapshot.with_move(turn);
            let score = if turns.has_captures {
                self.find_best_turns_rec(next_snapshot, side, depth, alpha, beta, Some(turn.to))
            } else {
                self.find_best_turns_rec(next_snapshot, side.opponent(), depth + 1, alpha, beta, None)
            };

            min_score = min_score.min(score);
            max_score = max_score.max(score);
            if maximizing {
                alpha = alpha.max(max_score);
            } else {
                beta = beta.min(min_score);
            }

            if self.optimization != Optimization::NoPruning && alpha > beta {
                trace!(depth, alpha, beta, "cut-off");
                break;
            }
            if self.optimization == Optimization::AlphaBetaPlus && alpha == beta {
                trace!(depth, alpha, "bounds met, returning early");
                return if maximizing { max_score + 1.0 } else { min_score - 1.0 };
            }
        }

        if maximizing { max_score } else { min_score }
    }
}
