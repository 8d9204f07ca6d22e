//! The catalog of every four-in-a-row on the board, and the win and
//! game-over checks built on it

use once_cell::sync::Lazy;

use crate::{board::Board, Piece, HEIGHT, WIDTH};

/// Four (row, column) coordinates forming one possible alignment
pub type Line = [(usize, usize); 4];

/// Every alignment on the board, computed on first use
static LINES: Lazy<Vec<Line>> = Lazy::new(winning_lines);

/// Enumerates every horizontal, vertical and diagonal run of four cells
pub fn winning_lines() -> Vec<Line> {
    let mut lines = Vec::new();

    // horizontal
    for row in 0..HEIGHT {
        for column in 0..WIDTH - 3 {
            lines.push([0, 1, 2, 3].map(|i| (row, column + i)));
        }
    }

    // vertical
    for column in 0..WIDTH {
        for row in 0..HEIGHT - 3 {
            lines.push([0, 1, 2, 3].map(|i| (row + i, column)));
        }
    }

    // diagonal \ (down and to the right)
    for row in 0..HEIGHT - 3 {
        for column in 0..WIDTH - 3 {
            lines.push([0, 1, 2, 3].map(|i| (row + i, column + i)));
        }
    }

    // diagonal / (up and to the right)
    for row in 3..HEIGHT {
        for column in 0..WIDTH - 3 {
            lines.push([0, 1, 2, 3].map(|i| (row - i, column + i)));
        }
    }

    lines
}

/// The shared line catalog
pub fn catalog() -> &'static [Line] {
    &LINES
}

/// Whether `piece` fully occupies some line
pub fn is_winning_for(board: &Board, piece: Piece) -> bool {
    let cell = piece.cell();
    catalog()
        .iter()
        .any(|line| line.iter().all(|&(row, column)| board.cell(row, column) == cell))
}

/// A position is over once either side has four in a row or no column can be played
pub fn is_terminal(board: &Board) -> bool {
    is_winning_for(board, Piece::PlayerOne)
        || is_winning_for(board, Piece::PlayerTwo)
        || board.legal_columns().is_empty()
}

/// The winner of a position, if any
pub fn winner(board: &Board) -> Option<Piece> {
    [Piece::PlayerOne, Piece::PlayerTwo]
        .iter()
        .copied()
        .find(|&piece| is_winning_for(board, piece))
}
