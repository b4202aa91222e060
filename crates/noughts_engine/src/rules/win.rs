//! Win detection logic for tic-tac-toe.

use super::super::{Board, Cell, Mark};

/// Winning triples in scan order: rows, columns, diagonals.
pub const LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Returns the first completed line in scan order and its mark.
///
/// Used for highlighting; legal play never produces two lines at once.
pub fn winning_line(board: &Board) -> Option<(Mark, [usize; 3])> {
    LINES.iter().find_map(|&[a, b, c]| {
        let cells = board.cells();
        match cells[a] {
            Cell::Occupied(mark) if cells[a] == cells[b] && cells[a] == cells[c] => {
                Some((mark, [a, b, c]))
            }
            _ => None,
        }
    })
}

/// Checks if there is a winner on the board.
///
/// Returns `Some(mark)` if the mark has three in a row,
/// `None` otherwise.
pub fn check_winner(board: &Board) -> Option<Mark> {
    winning_line(board).map(|(mark, _)| mark)
}
