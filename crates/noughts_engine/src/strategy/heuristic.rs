//! Rule-of-thumb play: win, block, center, corner, anything.

use super::super::rules::{available_moves, check_winner};
use super::super::{Board, Mark, Position, StrategyError};
use super::with_mark;
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

/// Picks a move by strict priority, returning on the first match:
///
/// 1. a move that wins immediately for `mark`
/// 2. a move that blocks an immediate win for the opponent
/// 3. the center
/// 4. a random open corner
/// 5. a random open cell
pub fn select_move<R: Rng + ?Sized>(
    board: &Board,
    mark: Mark,
    rng: &mut R,
) -> Result<usize, StrategyError> {
    let moves = available_moves(board);
    if moves.is_empty() {
        return Err(StrategyError::NoMovesAvailable(mark));
    }

    if let Some(index) = completing_move(board, &moves, mark) {
        debug!(index, "Taking winning move");
        return Ok(index);
    }

    if let Some(index) = completing_move(board, &moves, mark.opponent()) {
        debug!(index, "Blocking opponent");
        return Ok(index);
    }

    let center = Position::Center.index();
    if moves.contains(&center) {
        return Ok(center);
    }

    let corners: Vec<usize> = Position::CORNERS
        .iter()
        .map(|pos| pos.index())
        .filter(|index| moves.contains(index))
        .collect();
    if let Some(index) = corners.choose(rng) {
        return Ok(*index);
    }

    moves
        .choose(rng)
        .copied()
        .ok_or(StrategyError::NoMovesAvailable(mark))
}

/// First move (ascending) that would complete a line for `mark`.
fn completing_move(board: &Board, moves: &[usize], mark: Mark) -> Option<usize> {
    moves
        .iter()
        .copied()
        .find(|&index| check_winner(&with_mark(board, index, mark)) == Some(mark))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn pick(board: &str, mark: Mark) -> usize {
        let board: Board = board.parse().expect("valid board");
        let mut rng = StdRng::seed_from_u64(42);
        select_move(&board, mark, &mut rng).expect("moves available")
    }

    #[test]
    fn test_prefers_win_over_block() {
        assert_eq!(pick("XX-OO----", Mark::X), 2);
    }

    #[test]
    fn test_blocks_opponent() {
        assert_eq!(pick("---OO----", Mark::X), 5);
    }

    #[test]
    fn test_takes_center() {
        assert_eq!(pick("X--------", Mark::O), 4);
    }

    #[test]
    fn test_takes_a_corner() {
        let index = pick("----X----", Mark::O);
        assert!([0, 2, 6, 8].contains(&index));
    }

    #[test]
    fn test_falls_back_to_open_edge() {
        // Corners and center taken, no line can be completed.
        let index = pick("XOX-O-OXO", Mark::X);
        assert!([3, 5].contains(&index));
    }
}
