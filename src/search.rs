//! Depth-limited game tree search

use crate::{
    board::{Board, Piece},
    config::Weights,
    error::SearchError,
    heuristic,
    lines::{is_terminal, is_winning_for},
};

/// Score of a position the engine has won
pub const WIN_SCORE: i32 = 100_000;
/// Score of a position the opponent has won
pub const LOSS_SCORE: i32 = -100_000;
/// Score of a full board with no winner
pub const DRAW_SCORE: i32 = 0;

/// A column (absent at leaves) and its backed-up score
pub type Scored = (Option<usize>, i32);

/// Runs minimax and alpha-beta searches on behalf of one side
///
/// # Notes
/// The engine's side is always the maximizing player and every leaf is scored
/// from its point of view, including those reached on the opponent's move.
/// Columns are tried in ascending order and a later column only replaces the
/// best so far when it is strictly better, so both searches break ties towards
/// the lowest column and agree on the move they return.
#[derive(Clone, Debug)]
pub struct Searcher<'a> {
    engine: Piece,
    opponent: Piece,
    weights: &'a Weights,

    /// The number of nodes visited by this `Searcher` so far (for diagnostics only)
    pub node_count: usize,
}

impl<'a> Searcher<'a> {
    pub fn new(engine: Piece, opponent: Piece, weights: &'a Weights) -> Self {
        Self {
            engine,
            opponent,
            weights,
            node_count: 0,
        }
    }

    /// Fixed score of a finished game, or the heuristic at the search horizon
    fn leaf_score(&self, board: &Board, depth: u32) -> Option<i32> {
        if is_terminal(board) {
            Some(if is_winning_for(board, self.engine) {
                WIN_SCORE
            } else if is_winning_for(board, self.opponent) {
                LOSS_SCORE
            } else {
                DRAW_SCORE
            })
        } else if depth == 0 {
            Some(heuristic::score(board, self.engine, self.weights))
        } else {
            None
        }
    }

    fn candidates(board: &Board) -> Result<Vec<usize>, SearchError> {
        let columns = board.legal_columns();
        if columns.is_empty() {
            return Err(SearchError::InvariantViolation(format!(
                "position is not terminal but has no legal columns:\n{}",
                board
            )));
        }
        Ok(columns)
    }

    fn mover(&self, maximizing: bool) -> Piece {
        if maximizing {
            self.engine
        } else {
            self.opponent
        }
    }

    /// Plain minimax to `depth` plies
    ///
    /// Returns the best column for the side to move (none at a leaf) and the backed-up score
    pub fn minimax(
        &mut self,
        board: &Board,
        depth: u32,
        maximizing: bool,
    ) -> Result<Scored, SearchError> {
        self.node_count += 1;

        if let Some(score) = self.leaf_score(board, depth) {
            return Ok((None, score));
        }

        let columns = Self::candidates(board)?;
        let piece = self.mover(maximizing);
        let mut best_column = columns[0];
        let mut value = if maximizing { i32::MIN } else { i32::MAX };

        for column in columns {
            let next = board.apply_move(column, piece)?;
            let (_, score) = self.minimax(&next, depth - 1, !maximizing)?;
            let improves = if maximizing {
                score > value
            } else {
                score < value
            };
            if improves {
                value = score;
                best_column = column;
            }
        }

        Ok((Some(best_column), value))
    }

    /// Minimax with alpha-beta pruning to `depth` plies
    ///
    /// `alpha` is the score the maximizer is already guaranteed elsewhere in the
    /// tree and `beta` the score the minimizer is; once they cross, the remaining
    /// siblings cannot change the result and are skipped.
    pub fn alpha_beta(
        &mut self,
        board: &Board,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> Result<Scored, SearchError> {
        self.node_count += 1;

        if let Some(score) = self.leaf_score(board, depth) {
            return Ok((None, score));
        }

        let columns = Self::candidates(board)?;
        let piece = self.mover(maximizing);
        let mut best_column = columns[0];

        if maximizing {
            let mut value = i32::MIN;
            for column in columns {
                let next = board.apply_move(column, piece)?;
                let (_, score) = self.alpha_beta(&next, depth - 1, alpha, beta, false)?;
                if score > value {
                    value = score;
                    best_column = column;
                }
                alpha = alpha.max(value);
                // the minimizer will never let play reach this node
                if alpha >= beta {
                    break;
                }
            }
            Ok((Some(best_column), value))
        } else {
            let mut value = i32::MAX;
            for column in columns {
                let next = board.apply_move(column, piece)?;
                let (_, score) = self.alpha_beta(&next, depth - 1, alpha, beta, true)?;
                if score < value {
                    value = score;
                    best_column = column;
                }
                beta = beta.min(value);
                if alpha >= beta {
                    break;
                }
            }
            Ok((Some(best_column), value))
        }
    }
}
