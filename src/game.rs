//! The live board and the turn controller that drives a game.
//!
//! The search engine works on snapshots; [`Game`] owns the real board, asks the
//! engine for bot turns or validates human moves against the legal set, applies
//! them and advances the turn counter.

use crate::board::{Board, Cell, Side, Snapshot, Square};
use crate::config::Config;
use crate::error::{CheckersError, CheckersResult};
use crate::movegen;
use crate::moves::{Move, MoveSet};
use crate::random::{CustomNumberGenerator, RandomGenerator};
use crate::search::SearchEngine;
use std::time::Instant;
use tracing::{info, warn};

/// How a finished game ended.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum GameResult {
    WhiteWins,
    BlackWins,
    /// The turn limit was reached.
    Draw,
}

impl GameResult {
    fn win_for(side: Side) -> Self {
        match side {
            Side::White => GameResult::WhiteWins,
            Side::Black => GameResult::BlackWins,
        }
    }
}

/// The board a game is played on, with the history needed to take moves back.
///
/// Every applied move is recorded together with the length of the capture
/// series it belongs to, so [`GameBoard::rollback`] can undo a whole series.
#[derive(Debug, Clone)]
pub struct GameBoard {
    current: Snapshot,
    history: Vec<(Snapshot, usize)>,
}

impl Default for GameBoard {
    fn default() -> Self {
        GameBoard::from_snapshot(Snapshot::initial())
    }
}

impl GameBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            current: snapshot,
            history: vec![(snapshot, 0)],
        }
    }

    /// Restores the starting position and clears the history.
    pub fn reset(&mut self) {
        *self = GameBoard::new();
    }

    pub fn current(&self) -> &Snapshot {
        &self.current
    }

    /// Number of recorded positions, including the starting one.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Applies `mv`, recording it as the `beat_series`-th capture of a series
    /// (0 for a simple move).
    pub fn move_piece(&mut self, mv: &Move, beat_series: usize) -> CheckersResult<()> {
        self.current = self.current.apply(mv)?;
        self.history.push((self.current, beat_series));
        Ok(())
    }

    /// Promotes the man on `square`.
    pub fn turn_into_king(&mut self, square: Square) -> CheckersResult<()> {
        if !square.is_on_board() {
            return Err(CheckersError::OffBoard { square });
        }
        match self.current.get(square) {
            Cell::Man(side) => {
                self.current.set(square, Cell::King(side));
                Ok(())
            }
            _ => Err(CheckersError::CannotPromote { square }),
        }
    }

    /// Takes back the last move, or the whole capture series it ended.
    pub fn rollback(&mut self) {
        let mut series = self.history.last().map_or(1, |(_, series)| (*series).max(1));
        while series > 0 && self.history.len() > 1 {
            self.history.pop();
            series -= 1;
        }
        if let Some((snapshot, _)) = self.history.last() {
            self.current = *snapshot;
        }
    }
}

impl Board for GameBoard {
    fn get_board(&self) -> Snapshot {
        self.current
    }
}

/// Drives a game: whose turn it is, legality of human moves, bot turns, undo
/// and the end of the game.
///
/// White moves on even turns. A side with no legal moves loses; reaching the
/// turn limit is a draw.
pub struct Game<K: RandomGenerator = CustomNumberGenerator> {
    board: GameBoard,
    engine: SearchEngine<K>,
    turn: usize,
    max_turns: usize,
    beat_series: usize,
    pending: Option<Square>,
    result: Option<GameResult>,
    white_bot: bool,
    black_bot: bool,
}

impl Game<CustomNumberGenerator> {
    /// Creates a game from the opening position with an engine built from `config`.
    pub fn from_config(config: &Config) -> Self {
        Game::new(SearchEngine::from_config(config), config.game.max_num_turns)
            .with_bots(config.bot.is_white_bot, config.bot.is_black_bot)
    }
}

impl<K: RandomGenerator> Game<K> {
    /// Creates a game from the opening position. Both sides start as human
    /// players; see [`Game::with_bots`].
    pub fn new(engine: SearchEngine<K>, max_turns: usize) -> Self {
        let mut game = Self {
            board: GameBoard::new(),
            engine,
            turn: 0,
            max_turns,
            beat_series: 0,
            pending: None,
            result: None,
            white_bot: false,
            black_bot: false,
        };
        game.update_result();
        game
    }

    /// Restarts the game from `snapshot` with `side` to move.
    pub fn with_position(mut self, snapshot: Snapshot, side: Side) -> Self {
        self.board = GameBoard::from_snapshot(snapshot);
        self.turn = match side {
            Side::White => 0,
            Side::Black => 1,
        };
        self.beat_series = 0;
        self.pending = None;
        self.result = None;
        self.update_result();
        self
    }

    /// Sets which sides the engine plays.
    pub fn with_bots(mut self, white: bool, black: bool) -> Self {
        self.white_bot = white;
        self.black_bot = black;
        self
    }

    /// Whether the engine plays `side`.
    pub fn is_bot(&self, side: Side) -> bool {
        match side {
            Side::White => self.white_bot,
            Side::Black => self.black_bot,
        }
    }

    /// The live board.
    pub fn board(&self) -> &GameBoard {
        &self.board
    }

    /// The search engine used for bot turns.
    pub fn engine(&self) -> &SearchEngine<K> {
        &self.engine
    }

    /// Mutable access to the engine, e.g. to change the search depth mid-game.
    pub fn engine_mut(&mut self) -> &mut SearchEngine<K> {
        &mut self.engine
    }

    /// Zero-based turn number.
    pub fn turn(&self) -> usize {
        self.turn
    }

    /// The side whose turn it is.
    pub fn side_to_move(&self) -> Side {
        Side::from_turn(self.turn)
    }

    /// How the game ended, or `None` while it is still going.
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    /// The piece that has to keep capturing before the turn ends, if any.
    pub fn pending_capture(&self) -> Option<Square> {
        self.pending
    }

    /// Moves the side to move may play now. In the middle of a capture series
    /// only the capturing piece's next captures are legal.
    pub fn legal_moves(&mut self) -> MoveSet {
        match self.pending {
            Some(square) => self.engine.find_piece_turns(&self.board, square),
            None => {
                let side = self.side_to_move();
                self.engine.find_turns(&self.board, side)
            }
        }
    }

    /// Plays a single move for a human player.
    ///
    /// A capture that can be followed by another capture keeps the turn open
    /// (see [`Game::pending_capture`]); otherwise the turn passes.
    pub fn play_move(&mut self, mv: Move) -> CheckersResult<()> {
        self.ensure_in_progress()?;
        if !self.legal_moves().contains(&mv) {
            warn!(%mv, side = %self.side_to_move(), "rejected illegal move");
            return Err(CheckersError::IllegalMove { mv });
        }

        if mv.is_capture() {
            self.beat_series += 1;
        }
        self.board.move_piece(&mv, self.beat_series)?;

        if mv.is_capture() && self.engine.find_piece_turns(&self.board, mv.to).has_captures {
            self.pending = Some(mv.to);
        } else {
            self.end_turn();
        }
        Ok(())
    }

    /// Lets the engine play the whole turn for the side to move and returns the
    /// moves it made.
    pub fn play_bot_turn(&mut self) -> CheckersResult<Vec<Move>> {
        self.ensure_in_progress()?;
        if let Some(square) = self.pending {
            return Err(CheckersError::ChainInProgress { square });
        }

        let start = Instant::now();
        let side = self.side_to_move();
        let turns = self.engine.find_best_turns(&self.board, side);
        if turns.is_empty() {
            self.result = Some(GameResult::win_for(side.opponent()));
            return Ok(turns);
        }

        for mv in &turns {
            if mv.is_capture() {
                self.beat_series += 1;
            }
            self.board.move_piece(mv, self.beat_series)?;
        }
        info!(
            %side,
            turn = self.turn,
            moves = turns.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "bot turn"
        );
        self.end_turn();
        Ok(turns)
    }

    /// Takes back the last turn. In the middle of a capture series only the
    /// captures made so far are taken back and the same side keeps the move.
    ///
    /// Against a bot the bot's reply is taken back too, so the same player is
    /// to move again.
    pub fn undo_turn(&mut self) {
        if self.board.history_len() <= 1 {
            return;
        }
        let mid_series = self.pending.take().is_some();
        let bot_replied = self.is_bot(self.side_to_move().opponent());
        if !mid_series && bot_replied && self.board.history_len() > 2 {
            self.board.rollback();
            self.turn = self.turn.saturating_sub(1);
        }
        self.board.rollback();
        if !mid_series {
            self.turn = self.turn.saturating_sub(1);
        }
        self.beat_series = 0;
        self.result = None;
        self.update_result();
    }

    /// Lets the engine play both sides until the game ends.
    pub fn run(&mut self) -> CheckersResult<GameResult> {
        let start = Instant::now();
        loop {
            if let Some(result) = self.result {
                info!(
                    ?result,
                    turns = self.turn,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "game over"
                );
                return Ok(result);
            }
            self.play_bot_turn()?;
        }
    }

    fn ensure_in_progress(&self) -> CheckersResult<()> {
        match self.result {
            Some(_) => Err(CheckersError::GameOver),
            None => Ok(()),
        }
    }

    fn end_turn(&mut self) {
        self.pending = None;
        self.beat_series = 0;
        self.turn += 1;
        self.update_result();
    }

    fn update_result(&mut self) {
        if self.turn >= self.max_turns {
            self.result = Some(GameResult::Draw);
            return;
        }
        let side = self.side_to_move();
        let landing = self.engine.king_landing();
        if movegen::side_moves(self.board.current(), side, landing).is_empty() {
            self.result = Some(GameResult::win_for(side.opponent()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rollback_undoes_capture_series() {
        // arrange
        let snapshot: Snapshot = "
            .b......
            ........
            ........
            ....b...
            ........
            ..b.....
            .w......
            ........"
            .parse()
            .unwrap();
        let mut board = GameBoard::from_snapshot(snapshot);
        let first = Move::capture(Square::new(6, 1), Square::new(4, 3), Square::new(5, 2));
        let second = Move::capture(Square::new(4, 3), Square::new(2, 5), Square::new(3, 4));

        // act
        board.move_piece(&first, 1).unwrap();
        board.move_piece(&second, 2).unwrap();
        board.rollback();

        // assert
        assert_eq!(board.current(), &snapshot);
        assert_eq!(board.history_len(), 1);
    }

    #[test]
    fn rollback_keeps_the_starting_position() {
        let mut board = GameBoard::new();
        board.rollback();
        assert_eq!(board.current(), &Snapshot::initial());
        assert_eq!(board.history_len(), 1);
    }

    #[test]
    fn reset_restores_the_opening() {
        let mut board = GameBoard::new();
        board.move_piece(&Move::new(Square::new(5, 0), Square::new(4, 1)), 0).unwrap();
        board.reset();
        assert_eq!(board.get_board(), Snapshot::initial());
        assert_eq!(board.history_len(), 1);
    }

    #[test]
    fn move_piece_reports_broken_preconditions() {
        let mut board = GameBoard::new();
        let onto_piece = Move::new(Square::new(7, 0), Square::new(6, 1));

        let result = board.move_piece(&onto_piece, 0);

        assert!(matches!(result, Err(CheckersError::OccupiedDestination { .. })));
        assert_eq!(board.history_len(), 1);
    }

    #[test]
    fn turn_into_king_needs_a_man() {
        let mut board = GameBoard::new();
        board.turn_into_king(Square::new(5, 0)).unwrap();
        assert_eq!(board.current().get(Square::new(5, 0)), Cell::King(Side::White));
        assert!(matches!(
            board.turn_into_king(Square::new(5, 0)),
            Err(CheckersError::CannotPromote { .. })
        ));
        assert!(matches!(
            board.turn_into_king(Square::new(4, 1)),
            Err(CheckersError::CannotPromote { .. })
        ));
    }

    fn chain_position() -> Snapshot {
        "
            .b......
            ........
            ........
            ....b...
            ........
            ..b.....
            .w......
            ........"
            .parse()
            .unwrap()
    }

    fn seeded_game(depth: usize, max_turns: usize) -> Game {
        let config = Config::from_json(&format!(
            r#"{{ "Bot": {{ "WhiteBotLevel": {depth}, "BlackBotLevel": {depth}, "NoRandom": true }},
                 "Game": {{ "MaxNumTurns": {max_turns} }} }}"#
        ))
        .unwrap();
        Game::from_config(&config)
    }

    #[test]
    fn human_capture_series_keeps_the_turn() {
        // arrange
        let mut game = seeded_game(2, 100).with_position(chain_position(), Side::White);
        let first = Move::capture(Square::new(6, 1), Square::new(4, 3), Square::new(5, 2));
        let second = Move::capture(Square::new(4, 3), Square::new(2, 5), Square::new(3, 4));

        // act + assert
        assert!(game.legal_moves().has_captures);
        game.play_move(first).unwrap();
        assert_eq!(game.pending_capture(), Some(Square::new(4, 3)));
        assert_eq!(game.side_to_move(), Side::White);

        let sidestep = Move::new(Square::new(4, 3), Square::new(3, 2));
        assert!(matches!(
            game.play_move(sidestep),
            Err(CheckersError::IllegalMove { .. })
        ));
        assert!(matches!(
            game.play_bot_turn(),
            Err(CheckersError::ChainInProgress { .. })
        ));

        game.play_move(second).unwrap();
        assert_eq!(game.pending_capture(), None);
        assert_eq!(game.side_to_move(), Side::Black);
        assert_eq!(game.board().current().material(Side::Black).total(), 1);
    }

    #[test]
    fn undo_inside_a_series_keeps_the_side() {
        let mut game = seeded_game(2, 100).with_position(chain_position(), Side::White);
        let first = Move::capture(Square::new(6, 1), Square::new(4, 3), Square::new(5, 2));

        game.play_move(first).unwrap();
        game.undo_turn();

        assert_eq!(game.board().current(), &chain_position());
        assert_eq!(game.pending_capture(), None);
        assert_eq!(game.turn(), 0);
    }

    #[test]
    fn bot_turn_plays_the_whole_series() {
        let mut game = seeded_game(2, 100).with_position(chain_position(), Side::White);

        let turns = game.play_bot_turn().unwrap();

        assert_eq!(turns.len(), 2);
        assert_eq!(game.turn(), 1);
        assert_eq!(game.board().history_len(), 3);

        game.undo_turn();
        assert_eq!(game.turn(), 0);
        assert_eq!(game.board().current(), &chain_position());
    }

    #[test]
    fn undo_against_a_bot_takes_back_its_reply() {
        // arrange
        let config = Config::from_json(
            r#"{ "Bot": { "IsWhiteBot": false, "IsBlackBot": true, "BlackBotLevel": 2, "NoRandom": true } }"#,
        )
        .unwrap();
        let mut game = Game::from_config(&config);
        game.play_move(Move::new(Square::new(5, 0), Square::new(4, 1))).unwrap();
        game.play_bot_turn().unwrap();
        assert_eq!(game.side_to_move(), Side::White);

        // act
        game.undo_turn();

        // assert
        assert_eq!(game.turn(), 0);
        assert_eq!(game.side_to_move(), Side::White);
        assert_eq!(game.board().current(), &Snapshot::initial());
        assert_eq!(game.board().history_len(), 1);
    }

    #[test]
    fn undo_right_after_the_bot_opens_takes_back_one_turn() {
        let config = Config::from_json(
            r#"{ "Bot": { "IsWhiteBot": true, "IsBlackBot": false, "WhiteBotLevel": 1, "NoRandom": true } }"#,
        )
        .unwrap();
        let mut game = Game::from_config(&config);
        game.play_bot_turn().unwrap();

        game.undo_turn();

        assert_eq!(game.turn(), 0);
        assert_eq!(game.board().current(), &Snapshot::initial());
    }

    #[test]
    fn side_without_moves_loses() {
        let only_white: Snapshot = "
            ........
            ........
            ........
            ........
            ........
            ........
            ........
            w......."
            .parse()
            .unwrap();

        let mut game = seeded_game(2, 100).with_position(only_white, Side::Black);

        assert_eq!(game.result(), Some(GameResult::WhiteWins));
        assert!(matches!(game.play_bot_turn(), Err(CheckersError::GameOver)));
    }

    #[test]
    fn turn_limit_is_a_draw() {
        let mut game = seeded_game(1, 0);
        assert_eq!(game.run().unwrap(), GameResult::Draw);
    }

    #[test]
    fn self_play_reaches_a_result() {
        let mut game = seeded_game(2, 60);

        let result = game.run().unwrap();

        assert_eq!(game.result(), Some(result));
        let side = game.side_to_move();
        let stuck = movegen::side_moves(game.board().current(), side, game.engine().king_landing())
            .is_empty();
        match result {
            GameResult::Draw => assert_eq!(game.turn(), 60),
            GameResult::WhiteWins => assert!(side == Side::Black && stuck),
            GameResult::BlackWins => assert!(side == Side::White && stuck),
        }
    }
}
