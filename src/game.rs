//! Turn-taking between two players until the game ends

use anyhow::{anyhow, Context, Result};
use log::{debug, info};

use crate::{
    board::{Board, Piece},
    lines::{is_terminal, winner},
    players::Player,
};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameState {
    Playing,
    PlayerOneWin,
    PlayerTwoWin,
    Draw,
}

impl GameState {
    pub fn is_over(&self) -> bool {
        !matches!(self, GameState::Playing)
    }

    fn of(board: &Board) -> Self {
        match winner(board) {
            Some(Piece::PlayerOne) => GameState::PlayerOneWin,
            Some(Piece::PlayerTwo) => GameState::PlayerTwoWin,
            None if is_terminal(board) => GameState::Draw,
            None => GameState::Playing,
        }
    }
}

/// The authoritative state of one game: the board, whose turn it is and the moves so far
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    pub to_move: Piece,
    /// Moves played so far as 1-indexed column digits
    pub moves: String,
    pub state: GameState,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            to_move: Piece::PlayerOne,
            moves: String::new(),
            state: GameState::Playing,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Plays `column` (0-indexed) for the side to move
    pub fn play_checked(&mut self, column: usize) -> Result<GameState> {
        if self.state.is_over() {
            return Err(anyhow!("Invalid move, the game is already over"));
        }

        self.board = self.board.apply_move(column, self.to_move)?;
        self.moves.push_str(&(column + 1).to_string());
        self.to_move = self.to_move.opponent();
        self.state = GameState::of(&self.board);

        Ok(self.state)
    }

    /// Alternates `player_one` and `player_two` until the game ends, calling
    /// `observer` after every move
    pub fn run<F: FnMut(&Game)>(
        &mut self,
        player_one: &mut dyn Player,
        player_two: &mut dyn Player,
        mut observer: F,
    ) -> Result<GameState> {
        info!(
            "starting game: {} vs {}",
            player_one.name(),
            player_two.name()
        );

        while !self.state.is_over() {
            let player: &mut dyn Player = match self.to_move {
                Piece::PlayerOne => &mut *player_one,
                Piece::PlayerTwo => &mut *player_two,
            };
            let column = player.play(&self.board)?;
            debug!(
                "player {} ({}) plays column {}",
                self.to_move.number(),
                player.name(),
                column
            );
            self.play_checked(column)
                .with_context(|| format!("{} chose an illegal move", player.name()))?;
            observer(self);
        }

        info!("game over after '{}': {:?}", self.moves, self.state);
        Ok(self.state)
    }
}
