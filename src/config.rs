//! Game and bot settings.
//!
//! Settings are read from a JSON document with a `Bot` and a `Game` section.
//! Every key is optional; sections the core does not use (window size and the
//! like) are ignored.

use crate::board::Side;
use crate::error::CheckersResult;
use crate::eval::ScoringMode;
use crate::movegen::KingLanding;
use crate::search::{DEFAULT_DEPTH, Optimization};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default turn limit after which the game is a draw.
pub const DEFAULT_MAX_TURNS: usize = 120;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Config {
    pub bot: BotConfig,
    pub game: GameConfig,
}

/// The `Bot` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct BotConfig {
    /// The engine plays white.
    pub is_white_bot: bool,
    /// The engine plays black.
    pub is_black_bot: bool,
    /// Search depth when white is to move.
    pub white_bot_level: usize,
    /// Search depth when black is to move.
    pub black_bot_level: usize,
    #[serde(rename = "BotScoringType")]
    pub scoring_mode: ScoringMode,
    pub optimization: Optimization,
    /// Seed the move shuffling with 0 instead of the clock.
    pub no_random: bool,
    pub king_capture_landing: KingLanding,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            is_white_bot: false,
            is_black_bot: true,
            white_bot_level: DEFAULT_DEPTH,
            black_bot_level: DEFAULT_DEPTH,
            scoring_mode: ScoringMode::default(),
            optimization: Optimization::default(),
            no_random: false,
            king_capture_landing: KingLanding::default(),
        }
    }
}

/// The `Game` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GameConfig {
    pub max_num_turns: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_num_turns: DEFAULT_MAX_TURNS,
        }
    }
}

impl Config {
    /// Parses settings from a JSON string.
    pub fn from_json(json: &str) -> CheckersResult<Config> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> CheckersResult<Config> {
        let json = fs::read_to_string(path)?;
        Config::from_json(&json)
    }

    /// Search depth for `side`.
    pub fn depth_for(&self, side: Side) -> usize {
        match side {
            Side::White => self.bot.white_bot_level,
            Side::Black => self.bot.black_bot_level,
        }
    }

    /// Whether the engine plays `side`.
    pub fn is_bot(&self, side: Side) -> bool {
        match side {
            Side::White => self.bot.is_white_bot,
            Side::Black => self.bot.is_black_bot,
        }
    }
}
