//! Move pickers that can take a seat in a [`Game`](crate::game::Game)

use anyhow::{anyhow, Context, Result};
use rand::{rngs::StdRng, Rng, SeedableRng};

use std::io::{BufRead, BufReader, Stdin, Stdout, Write};

use crate::{
    board::{Board, Piece},
    config::EngineConfig,
    engine::Engine,
};

/// Anything that can choose a column for one side of a game
pub trait Player: Send {
    /// Short display name
    fn name(&self) -> String;

    /// Chooses a column to play on `board`
    fn play(&mut self, board: &Board) -> Result<usize>;
}

/// Plays the column chosen by a search [`Engine`]
pub struct EnginePlayer {
    engine: Engine,
}

impl EnginePlayer {
    pub fn new(config: EngineConfig) -> Result<Self> {
        Ok(Self {
            engine: Engine::new(config)?,
        })
    }
}

impl Player for EnginePlayer {
    fn name(&self) -> String {
        let config = self.engine.config();
        format!("{} (depth {})", config.strategy, config.depth)
    }

    fn play(&mut self, board: &Board) -> Result<usize> {
        Ok(self.engine.choose_move(board)?)
    }
}

/// Plays a uniformly random legal column
pub struct RandomPlayer {
    rng: StdRng,
}

impl RandomPlayer {
    /// A random player whose choices are reproducible from `seed`
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Player for RandomPlayer {
    fn name(&self) -> String {
        "random".to_string()
    }

    fn play(&mut self, board: &Board) -> Result<usize> {
        let columns = board.legal_columns();
        if columns.is_empty() {
            return Err(anyhow!("no legal columns to choose from"));
        }
        Ok(columns[self.rng.random_range(0..columns.len())])
    }
}

/// Always plays the first available column from a fixed priority list
pub struct FixedOrderPlayer;

impl FixedOrderPlayer {
    pub const PRIORITY: [usize; 7] = [3, 2, 1, 5, 6, 0, 4];
}

impl Player for FixedOrderPlayer {
    fn name(&self) -> String {
        "fixed order".to_string()
    }

    fn play(&mut self, board: &Board) -> Result<usize> {
        Self::PRIORITY
            .iter()
            .copied()
            .find(|&column| board.is_playable(column))
            .ok_or_else(|| anyhow!("no legal columns to choose from"))
    }
}

/// Reads moves from a human at the console, asking again until a playable column is given
pub struct ConsolePlayer<R, W> {
    side: Piece,
    input: R,
    output: W,
}

impl ConsolePlayer<BufReader<Stdin>, Stdout> {
    pub fn stdin(side: Piece) -> Self {
        Self::new(side, BufReader::new(std::io::stdin()), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsolePlayer<R, W> {
    pub fn new(side: Piece, input: R, output: W) -> Self {
        Self {
            side,
            input,
            output,
        }
    }
}

impl<R: BufRead + Send, W: Write + Send> Player for ConsolePlayer<R, W> {
    fn name(&self) -> String {
        format!("human (player {})", self.side.number())
    }

    fn play(&mut self, board: &Board) -> Result<usize> {
        write!(self.output, "Select next move: ")?;
        loop {
            self.output.flush().context("failed to flush prompt")?;

            let mut buffer = String::new();
            if self.input.read_line(&mut buffer)? == 0 {
                return Err(anyhow!("input closed before a move was entered"));
            }
            match buffer.trim().parse::<usize>() {
                Ok(column) if board.is_playable(column) => return Ok(column),
                _ => write!(self.output, "Index invalid. Select next move: ")?,
            }
        }
    }
}
