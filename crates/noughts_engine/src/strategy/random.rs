//! Uniformly random play.

use super::super::rules::available_moves;
use super::super::{Board, Mark, StrategyError};
use rand::Rng;
use rand::seq::SliceRandom;

/// Samples one of the available moves uniformly.
pub fn select_move<R: Rng + ?Sized>(
    board: &Board,
    mark: Mark,
    rng: &mut R,
) -> Result<usize, StrategyError> {
    available_moves(board)
        .choose(rng)
        .copied()
        .ok_or(StrategyError::NoMovesAvailable(mark))
}
