//! The move-choosing entry point used by players and drivers

use log::debug;

use crate::{
    board::Board,
    config::{EngineConfig, Strategy},
    error::{ConfigError, SearchError},
    search::Searcher,
    CENTER_COLUMN,
};

/// The outcome of one root search
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct SearchReport {
    pub column: usize,
    /// Backed-up score of `column`, absent when no search was needed
    pub score: Option<i32>,
    /// Nodes visited, including the root
    pub nodes: usize,
}

/// A configured search agent for one side
#[derive(Clone, Debug)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Picks a legal column for the engine's side
    pub fn choose_move(&self, board: &Board) -> Result<usize, SearchError> {
        Ok(self.search(board)?.column)
    }

    /// Searches `board` with the configured strategy and depth
    ///
    /// An empty board is answered with the centre column without searching. A
    /// depth of 0 still looks one ply ahead so there is a move to return.
    pub fn search(&self, board: &Board) -> Result<SearchReport, SearchError> {
        let legal = board.legal_columns();
        let first = *legal.first().ok_or(SearchError::GameOver)?;

        if board.is_empty() {
            return Ok(SearchReport {
                column: CENTER_COLUMN,
                score: None,
                nodes: 0,
            });
        }

        let depth = self.config.depth.max(1);
        let mut searcher = Searcher::new(
            self.config.engine_side,
            self.config.opponent_side,
            &self.config.weights,
        );
        let (column, score) = match self.config.strategy {
            Strategy::Minimax => searcher.minimax(board, depth, true)?,
            Strategy::AlphaBeta => searcher.alpha_beta(board, depth, i32::MIN, i32::MAX, true)?,
        };

        // a finished game is a leaf, any legal column will do
        let column = column.unwrap_or(first);
        debug!(
            "{} depth {} for player {}: column {} score {} ({} nodes)",
            self.config.strategy,
            depth,
            self.config.engine_side.number(),
            column,
            score,
            searcher.node_count
        );

        Ok(SearchReport {
            column,
            score: Some(score),
            nodes: searcher.node_count,
        })
    }
}

/// Chooses a column for `config.engine_side` to play on `board`
pub fn choose_move(board: &Board, config: &EngineConfig) -> Result<usize, SearchError> {
    config
        .validate()
        .map_err(|err| SearchError::InvalidConfig(err.to_string()))?;
    let engine = Engine {
        config: config.clone(),
    };
    engine.choose_move(board)
}
