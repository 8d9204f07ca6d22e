//! Static evaluation of positions at the search horizon

use crate::{
    board::{Board, Cell, Piece},
    config::{LineValues, Weights},
    lines::catalog,
    CENTER_COLUMN, HEIGHT, WIDTH,
};

/// Scores how favourable `board` looks for `piece`, higher is better
///
/// This is not zero-sum: the score for one side is not the negation of the
/// score for the other, so a search must always evaluate from one fixed side.
pub fn score(board: &Board, piece: Piece, weights: &Weights) -> i32 {
    let mut score = 0;

    score += board.count_in_column(CENTER_COLUMN, piece) as i32 * weights.center;

    let near_center = [CENTER_COLUMN.checked_sub(1), Some(CENTER_COLUMN + 1)];
    for column in near_center.iter().flatten().filter(|&&c| c < WIDTH) {
        score += board.count_in_column(*column, piece) as i32 * weights.near_center;
    }

    // row weights grow towards the bottom of the board
    let cell = piece.cell();
    for (row, cells) in board.rows().enumerate().take(HEIGHT) {
        let count = cells.iter().filter(|&&c| c == cell).count() as i32;
        score += count * (weights.row_weights[row] / 2);
    }

    for line in catalog() {
        let cells = line.map(|(row, column)| board.cell(row, column));
        score += evaluate_line(&cells, piece, &weights.lines);
    }

    score
}

/// Scores the contents of one four-cell line for `piece`
pub fn evaluate_line(line: &[Cell; 4], piece: Piece, values: &LineValues) -> i32 {
    let own = piece.cell();
    let opponent = piece.opponent().cell();

    let own_count = line.iter().filter(|&&c| c == own).count();
    let opponent_count = line.iter().filter(|&&c| c == opponent).count();
    let empty_count = line.iter().filter(|c| c.is_empty()).count();

    match (own_count, opponent_count, empty_count) {
        // nobody can complete a mixed line
        (o, p, _) if o > 0 && p > 0 => 0,
        (4, 0, 0) => values.four,
        (3, 0, 1) => values.three,
        (2, 0, 2) if is_adjacent_pair(line, own) => values.adjacent_pair,
        (2, 0, 2) => values.split_pair,
        (1, 0, 3) => values.single,
        (0, 3, 1) => values.opponent_three,
        (0, 2, 2) if is_adjacent_pair(line, opponent) => values.opponent_adjacent_pair,
        (0, 2, 2) => values.opponent_split_pair,
        _ => 0,
    }
}

fn is_adjacent_pair(line: &[Cell; 4], cell: Cell) -> bool {
    line.windows(2).any(|pair| pair[0] == cell && pair[1] == cell)
}
