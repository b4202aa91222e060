//! Perfect play by exhaustive minimax search.
//!
//! The game tree is small enough to enumerate on every call, so there is no
//! pruning and no memoization. Scores are depth-sensitive: a win for the
//! searching mark scores `10 - depth`, a loss `depth - 10`, a draw `0`, so
//! faster wins and slower losses are preferred.

use super::super::rules::{available_moves, evaluate};
use super::super::{Board, Mark, Status, StrategyError};
use super::with_mark;
use tracing::{debug, instrument};

/// Score of a winning line for the searching mark at depth zero.
const WIN_SCORE: i32 = 10;

/// Chooses the move with the best minimax score for `mark`.
///
/// Ties go to the lowest index.
#[instrument(skip(board), fields(board = %board))]
pub fn select_move(board: &Board, mark: Mark) -> Result<usize, StrategyError> {
    let mut best: Option<(i32, usize)> = None;

    for (index, score) in score_moves(board, mark) {
        if best.is_none_or(|(best_score, _)| score > best_score) {
            best = Some((score, index));
        }
    }

    let (score, index) = best.ok_or(StrategyError::NoMovesAvailable(mark))?;
    debug!(index, score, "Minimax selected move");
    Ok(index)
}

/// Scores every available move for `mark`, in ascending index order.
pub fn score_moves(board: &Board, mark: Mark) -> Vec<(usize, i32)> {
    available_moves(board)
        .into_iter()
        .map(|index| {
            let next = with_mark(board, index, mark);
            (index, minimax(&next, mark, 0, false))
        })
        .collect()
}

/// Scores `board` from the point of view of `me`.
///
/// `maximizing` is true when it is `me` to move.
fn minimax(board: &Board, me: Mark, depth: i32, maximizing: bool) -> i32 {
    match evaluate(board) {
        Status::Win(mark) if mark == me => return WIN_SCORE - depth,
        Status::Win(_) => return depth - WIN_SCORE,
        Status::Draw => return 0,
        Status::Ongoing => {}
    }

    let mover = if maximizing { me } else { me.opponent() };
    let scores = available_moves(board)
        .into_iter()
        .map(|index| minimax(&with_mark(board, index, mover), me, depth + 1, !maximizing));

    if maximizing {
        scores.max().unwrap_or(0)
    } else {
        scores.min().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pick(board: &str, mark: Mark) -> usize {
        let board: Board = board.parse().expect("valid board");
        select_move(&board, mark).expect("moves available")
    }

    #[test]
    fn test_takes_immediate_win() {
        assert_eq!(pick("XX-OO----", Mark::X), 2);
    }

    #[test]
    fn test_blocks_immediate_loss() {
        assert_eq!(pick("X--OO---X", Mark::X), 5);
    }

    #[test]
    fn test_prefers_faster_win() {
        // 2 wins now; nothing else can score higher.
        let board: Board = "XX-O-----".parse().expect("valid board");
        let scores = score_moves(&board, Mark::X);
        let (_, now) = scores.iter().find(|(i, _)| *i == 2).copied().expect("open");
        assert_eq!(now, WIN_SCORE);
        assert!(scores.iter().all(|(_, s)| *s <= now));
    }

    #[test]
    fn test_empty_board_is_a_draw_with_tie_on_first_index() {
        let scores = score_moves(&Board::new(), Mark::X);
        assert!(scores.iter().all(|(_, s)| *s == 0));
        assert_eq!(select_move(&Board::new(), Mark::X), Ok(0));
    }

    #[test]
    fn test_responds_to_corner_with_center() {
        assert_eq!(pick("X--------", Mark::O), 4);
    }
}
