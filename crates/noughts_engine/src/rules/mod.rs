//! Rule engine for tic-tac-toe.
//!
//! Pure functions over [`Board`] values: move legality, placement and
//! terminal-state evaluation. Evaluation never consults whose turn it is.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{LINES, check_winner, winning_line};

use super::{Board, Cell, IllegalReason, Mark, MoveError, Status};
use tracing::instrument;

/// Returns a board with nine empty cells.
pub fn create_empty() -> Board {
    Board::new()
}

/// Checks that `index` is on the board and empty.
pub fn check_legal(board: &Board, index: usize) -> Result<(), MoveError> {
    match board.get(index) {
        None => Err(MoveError::IllegalMove {
            index,
            reason: IllegalReason::OutOfBounds,
        }),
        Some(Cell::Occupied(_)) => Err(MoveError::IllegalMove {
            index,
            reason: IllegalReason::Occupied,
        }),
        Some(Cell::Empty) => Ok(()),
    }
}

/// Places `mark` at `index`, returning a new board.
///
/// The input board is never modified.
///
/// # Errors
///
/// Returns [`MoveError::IllegalMove`] if `index` is outside `0..9` or the
/// cell is occupied.
#[instrument(skip(board), fields(board = %board))]
pub fn apply_move(board: &Board, index: usize, mark: Mark) -> Result<Board, MoveError> {
    check_legal(board, index)?;
    let mut next = *board;
    next.place(index, mark);
    Ok(next)
}

/// Evaluates a board: a completed line wins, a full board draws.
pub fn evaluate(board: &Board) -> Status {
    if let Some(mark) = check_winner(board) {
        Status::Win(mark)
    } else if is_full(board) {
        Status::Draw
    } else {
        Status::Ongoing
    }
}

/// All empty indices in ascending order.
pub fn available_moves(board: &Board) -> Vec<usize> {
    board
        .cells()
        .iter()
        .enumerate()
        .filter(|(_, cell)| **cell == Cell::Empty)
        .map(|(index, _)| index)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_empty() {
        let board = create_empty();
        assert_eq!(available_moves(&board), (0..9).collect::<Vec<_>>());
        assert_eq!(evaluate(&board), Status::Ongoing);
    }

    #[test]
    fn test_apply_move_does_not_mutate_input() {
        let board = create_empty();
        let next = apply_move(&board, 4, Mark::X).expect("legal move");
        assert!(board.is_empty(4));
        assert_eq!(next.get(4), Some(Cell::Occupied(Mark::X)));
    }

    #[test]
    fn test_apply_move_rejects_out_of_bounds() {
        let board = create_empty();
        assert_eq!(
            apply_move(&board, 9, Mark::X),
            Err(MoveError::IllegalMove {
                index: 9,
                reason: IllegalReason::OutOfBounds
            })
        );
    }

    #[test]
    fn test_apply_move_twice_fails_second_time() {
        let board = apply_move(&create_empty(), 0, Mark::X).expect("legal move");
        for mark in [Mark::X, Mark::O] {
            let err = apply_move(&board, 0, mark).expect_err("occupied");
            assert!(err.is_illegal_move());
        }
    }

    #[test]
    fn test_available_moves_ascending() {
        let board: Board = "X---O---X".parse().expect("valid board");
        assert_eq!(available_moves(&board), vec![1, 2, 3, 5, 6, 7]);
    }

    #[test]
    fn test_full_board_draw() {
        let board: Board = "XOXOXOOXO".parse().expect("valid board");
        assert_eq!(evaluate(&board), Status::Draw);
    }

    #[test]
    fn test_win_on_full_board_is_win() {
        let board: Board = "XXXOOXOXO".parse().expect("valid board");
        assert_eq!(evaluate(&board), Status::Win(Mark::X));
    }
}
