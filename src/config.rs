use log::warn;
use serde::{Deserialize, Serialize};

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::{
    board::Piece, error::ConfigError, lines::catalog, search::WIN_SCORE, HEIGHT, MAX_PLIES, WIDTH,
};

/// Which tree search the engine runs
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Minimax,
    #[serde(alias = "alpha_beta", alias = "alpha-beta")]
    AlphaBeta,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Minimax => f.pad("minimax"),
            Strategy::AlphaBeta => f.pad("alphabeta"),
        }
    }
}

impl FromStr for Strategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "minimax" => Ok(Strategy::Minimax),
            "alphabeta" | "alpha_beta" | "alpha-beta" => Ok(Strategy::AlphaBeta),
            other => Err(ConfigError::Validation(format!(
                "unknown strategy '{}', expected 'minimax' or 'alphabeta'",
                other
            ))),
        }
    }
}

/// Points awarded for the contents of a single four-cell line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineValues {
    pub four: i32,
    pub three: i32,
    pub adjacent_pair: i32,
    pub split_pair: i32,
    pub single: i32,
    pub opponent_three: i32,
    pub opponent_adjacent_pair: i32,
    pub opponent_split_pair: i32,
}

impl Default for LineValues {
    fn default() -> Self {
        LineValues {
            four: 1000,
            three: 50,
            adjacent_pair: 10,
            split_pair: 5,
            single: 1,
            opponent_three: -80,
            opponent_adjacent_pair: -8,
            opponent_split_pair: -4,
        }
    }
}

/// Tuning constants of the positional heuristic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    /// Per piece in the middle column
    pub center: i32,
    /// Per piece in either column next to the middle
    pub near_center: i32,
    /// Indexed from the top row down, halved (rounding down) per piece
    pub row_weights: [i32; HEIGHT],
    pub lines: LineValues,
}

impl Default for Weights {
    fn default() -> Self {
        Weights {
            center: 4,
            near_center: 2,
            row_weights: [1, 2, 3, 5, 7, 8],
            lines: LineValues::default(),
        }
    }
}

impl LineValues {
    fn largest(&self) -> i64 {
        [
            self.four,
            self.three,
            self.adjacent_pair,
            self.split_pair,
            self.single,
            self.opponent_three,
            self.opponent_adjacent_pair,
            self.opponent_split_pair,
        ]
        .iter()
        .map(|&value| (value as i64).abs())
        .max()
        .unwrap_or(0)
    }
}

impl Weights {
    /// Upper bound on the magnitude of any heuristic score these weights can produce
    pub fn score_bound(&self) -> i64 {
        let center = HEIGHT as i64 * (self.center as i64).abs();
        let near_center = 2 * HEIGHT as i64 * (self.near_center as i64).abs();
        let rows: i64 = self
            .row_weights
            .iter()
            .map(|&weight| WIDTH as i64 * (weight as i64 / 2).abs())
            .sum();
        let lines = catalog().len() as i64 * self.lines.largest();
        center + near_center + rows + lines
    }

    /// Heuristic scores must stay strictly inside the fixed win and loss scores
    pub fn validate(&self) -> Result<(), ConfigError> {
        let bound = self.score_bound();
        if bound >= WIN_SCORE as i64 {
            return Err(ConfigError::Validation(format!(
                "weights allow heuristic scores up to {}, which must stay below {}",
                bound, WIN_SCORE
            )));
        }
        Ok(())
    }
}

/// Everything one engine needs to pick a move
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub strategy: Strategy,
    /// Plies searched ahead
    ///
    /// 0 is treated as a single ply: every legal move is tried, and a move
    /// that ends the game is scored as a win, loss or draw, not heuristically.
    pub depth: u32,
    pub engine_side: Piece,
    pub opponent_side: Piece,
    pub weights: Weights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            strategy: Strategy::AlphaBeta,
            depth: 4,
            engine_side: Piece::PlayerOne,
            opponent_side: Piece::PlayerTwo,
            weights: Weights::default(),
        }
    }
}

impl EngineConfig {
    /// An engine configuration playing `side` against the other piece
    pub fn for_side(side: Piece) -> Self {
        EngineConfig {
            engine_side: side,
            opponent_side: side.opponent(),
            ..Self::default()
        }
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engine_side == self.opponent_side {
            return Err(ConfigError::Validation(
                "engine_side and opponent_side must differ".into(),
            ));
        }
        if self.depth as usize > MAX_PLIES {
            return Err(ConfigError::Validation(format!(
                "depth must be at most {}",
                MAX_PLIES
            )));
        }
        self.weights.validate()
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub strategy: Strategy,
    pub depth: u32,
    /// Seed for the random player
    pub seed: u64,
    /// Use the colour-vision-deficiency palette when drawing the board
    pub cvd_mode: bool,
    pub weights: Weights,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            strategy: Strategy::AlphaBeta,
            depth: 4,
            seed: 0,
            cvd_mode: false,
            weights: Weights::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depth == 0 {
            return Err(ConfigError::Validation("depth must be > 0".into()));
        }
        self.engine_config(Piece::PlayerOne).validate()
    }

    /// The engine configuration for a player seated as `side`
    pub fn engine_config(&self, side: Piece) -> EngineConfig {
        EngineConfig {
            strategy: self.strategy,
            depth: self.depth,
            engine_side: side,
            opponent_side: side.opponent(),
            weights: self.weights.clone(),
        }
    }
}
