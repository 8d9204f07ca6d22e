//! A depth-limited search agent for playing the board game 'Connect 4'
//!
//! The agent looks a fixed number of plies ahead with either plain minimax
//! or alpha-beta pruned minimax, and scores the positions at the search
//! horizon with a hand-tuned positional heuristic.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_search::{board::Board, config::EngineConfig, engine::Engine};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let board = Board::from_moves("4455")?;
//! let engine = Engine::new(EngineConfig::default())?;
//! let column = engine.choose_move(&board)?;
//!
//! assert!(board.legal_columns().contains(&column));
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod error;

pub mod board;

pub mod lines;

pub mod heuristic;

pub mod config;

pub mod search;

pub mod engine;

pub mod players;

pub mod game;

mod test;

pub use board::{Board, Cell, Piece};
pub use config::{AppConfig, EngineConfig, Strategy, Weights};
pub use engine::{choose_move, Engine, SearchReport};
pub use error::{ConfigError, IllegalMoveError, SearchError};

/// The width of the game board in tiles
pub const WIDTH: usize = 7;

/// The height of the game board in tiles
pub const HEIGHT: usize = 6;

/// The column the engine opens with on an empty board
pub const CENTER_COLUMN: usize = WIDTH / 2;

/// The most plies a game can last
pub const MAX_PLIES: usize = WIDTH * HEIGHT;

// a line is four cells, so the grid must fit one in both directions
const_assert!(WIDTH >= 4 && HEIGHT >= 4);
// fill pointers are stored as i8
const_assert!(HEIGHT < 127);
