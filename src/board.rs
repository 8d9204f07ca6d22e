use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use std::fmt;

use crate::{error::IllegalMoveError, HEIGHT, WIDTH};

/// One of the two sides of the game
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Piece {
    PlayerOne,
    PlayerTwo,
}

impl Piece {
    pub fn opponent(self) -> Piece {
        match self {
            Piece::PlayerOne => Piece::PlayerTwo,
            Piece::PlayerTwo => Piece::PlayerOne,
        }
    }

    pub fn cell(self) -> Cell {
        match self {
            Piece::PlayerOne => Cell::PlayerOne,
            Piece::PlayerTwo => Cell::PlayerTwo,
        }
    }

    /// 1 for the first player, 2 for the second
    pub fn number(self) -> usize {
        match self {
            Piece::PlayerOne => 1,
            Piece::PlayerTwo => 2,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Cell {
    PlayerOne,
    PlayerTwo,
    Empty,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    fn symbol(&self) -> char {
        match self {
            Cell::PlayerOne => 'X',
            Cell::PlayerTwo => 'O',
            Cell::Empty => '.',
        }
    }
}

/// A Connect 4 position: the grid plus the row each column will fill next
///
/// Row 0 is the top of the board, row `HEIGHT - 1` the bottom. Boards are
/// plain values; [`Board::apply_move`] returns a successor and leaves the
/// receiver untouched, so a search can hand copies to sibling branches freely.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Board {
    cells: [[Cell; WIDTH]; HEIGHT],
    // row index the next piece in each column lands on, negative once full
    fill: [i8; WIDTH],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; WIDTH]; HEIGHT],
            fill: [(HEIGHT - 1) as i8; WIDTH],
        }
    }

    /// Builds a board by replaying a game from a string of 1-indexed column digits,
    /// starting with player one
    pub fn from_moves<S: AsRef<str>>(moves: S) -> Result<Self> {
        let mut board = Self::new();

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10).map(|c| c as usize) {
                Some(column @ 1..=WIDTH) => {
                    if crate::lines::is_terminal(&board) {
                        return Err(anyhow!("Invalid position, game is over"));
                    }
                    board = board.apply_move(column - 1, board.side_to_move())?;
                }
                _ => return Err(anyhow!("could not parse '{}' as a valid move", column_char)),
            }
        }
        Ok(board)
    }

    /// Builds a board from a textual grid, top row first, using `X` for player one,
    /// `O` for player two and `.` for empty cells
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        if rows.len() != HEIGHT {
            return Err(anyhow!("expected {} rows, found {}", HEIGHT, rows.len()));
        }

        let mut board = Self::new();
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            if line.chars().count() != WIDTH {
                return Err(anyhow!("row {} must have {} cells: '{}'", row, WIDTH, line));
            }
            for (column, symbol) in line.chars().enumerate() {
                board.cells[row][column] = match symbol {
                    'X' | 'x' | '1' => Cell::PlayerOne,
                    'O' | 'o' | '2' => Cell::PlayerTwo,
                    '.' | '_' | '0' => Cell::Empty,
                    _ => return Err(anyhow!("could not parse '{}' as a cell", symbol)),
                };
            }
        }

        for column in 0..WIDTH {
            let filled = (0..HEIGHT)
                .filter(|&row| !board.cells[row][column].is_empty())
                .count();
            // every occupied cell must sit on a full stack
            let floating = (HEIGHT - filled..HEIGHT).any(|row| board.cells[row][column].is_empty());
            if floating {
                return Err(anyhow!("column {} has a piece with an empty cell below it", column));
            }
            board.fill[column] = (HEIGHT - 1) as i8 - filled as i8;
        }

        // player one moves first, so it is never behind and never more than one ahead
        let count = |cell: Cell| board.cells.iter().flatten().filter(|&&c| c == cell).count();
        let (ones, twos) = (count(Cell::PlayerOne), count(Cell::PlayerTwo));
        if ones != twos && ones != twos + 1 {
            return Err(anyhow!(
                "player one has {} pieces and player two {}, which no game can reach",
                ones,
                twos
            ));
        }
        Ok(board)
    }

    pub fn cell(&self, row: usize, column: usize) -> Cell {
        self.cells[row][column]
    }

    /// The row the next piece dropped into `column` lands on, negative once the column is full
    pub fn fill_pointer(&self, column: usize) -> i8 {
        self.fill[column]
    }

    pub fn fill_pointers(&self) -> [i8; WIDTH] {
        self.fill
    }

    pub fn is_playable(&self, column: usize) -> bool {
        column < WIDTH && self.fill[column] >= 0
    }

    /// Playable columns in ascending order
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..WIDTH).filter(|&column| self.fill[column] >= 0).collect()
    }

    /// Returns a copy of this board with `piece` dropped into `column`
    pub fn apply_move(&self, column: usize, piece: Piece) -> Result<Self, IllegalMoveError> {
        if column >= WIDTH {
            return Err(IllegalMoveError::OutOfRange { column });
        }
        let row = self.fill[column];
        if row < 0 {
            return Err(IllegalMoveError::ColumnFull { column });
        }

        let mut next = *self;
        next.cells[row as usize][column] = piece.cell();
        next.fill[column] = row - 1;
        Ok(next)
    }

    pub fn num_pieces(&self) -> usize {
        self.fill
            .iter()
            .map(|&top| (HEIGHT as i8 - 1 - top) as usize)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.num_pieces() == 0
    }

    /// Player one always moves first, so the side to move follows from the piece count
    pub fn side_to_move(&self) -> Piece {
        if self.num_pieces() % 2 == 0 {
            Piece::PlayerOne
        } else {
            Piece::PlayerTwo
        }
    }

    /// Number of `piece` tiles in `column`
    pub fn count_in_column(&self, column: usize, piece: Piece) -> usize {
        let cell = piece.cell();
        (0..HEIGHT)
            .filter(|&row| self.cells[row][column] == cell)
            .count()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell; WIDTH]> {
        self.cells.iter()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.iter() {
            let line: String = row.iter().map(Cell::symbol).collect();
            writeln!(f, "{}", line)?;
        }
        let labels: String = (0..WIDTH).map(|x| x.to_string()).collect();
        write!(f, "{}", labels)
    }
}
