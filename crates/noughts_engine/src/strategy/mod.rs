//! Computer opponent strategies.
//!
//! Three interchangeable move-selection policies, chosen once per match from
//! a named [`Difficulty`]. No state is kept between calls; randomness comes
//! from the caller's RNG.

pub mod heuristic;
pub mod minimax;
pub mod random;

use super::{Board, Mark, StrategyError};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Named difficulty tier offered to players.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Uniformly random moves.
    Easy,
    /// Win, block, center, corner, then random.
    Medium,
    /// Perfect play by exhaustive search.
    Hard,
}

impl Difficulty {
    /// Resolves the strategy that plays at this difficulty.
    pub fn strategy(self) -> Strategy {
        match self {
            Difficulty::Easy => Strategy::Random,
            Difficulty::Medium => Strategy::Heuristic,
            Difficulty::Hard => Strategy::ExhaustiveSearch,
        }
    }
}

/// Move-selection policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// See [`random::select_move`].
    Random,
    /// See [`heuristic::select_move`].
    Heuristic,
    /// See [`minimax::select_move`].
    ExhaustiveSearch,
}

impl Strategy {
    /// Chooses a move for `mark`.
    ///
    /// # Errors
    ///
    /// Returns [`StrategyError::NoMovesAvailable`] on a full board.
    #[instrument(skip(self, board, rng), fields(strategy = ?self, board = %board))]
    pub fn select_move<R: Rng + ?Sized>(
        &self,
        board: &Board,
        mark: Mark,
        rng: &mut R,
    ) -> Result<usize, StrategyError> {
        let index = match self {
            Strategy::Random => random::select_move(board, mark, rng)?,
            Strategy::Heuristic => heuristic::select_move(board, mark, rng)?,
            Strategy::ExhaustiveSearch => minimax::select_move(board, mark)?,
        };
        debug!(index, "Strategy selected move");
        Ok(index)
    }
}

impl From<Difficulty> for Strategy {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.strategy()
    }
}

/// Returns a copy of `board` with `mark` at the (known empty) `index`.
fn with_mark(board: &Board, index: usize, mark: Mark) -> Board {
    let mut next = *board;
    next.place(index, mark);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::str::FromStr;

    #[test]
    fn test_difficulty_mapping() {
        assert_eq!(Difficulty::Easy.strategy(), Strategy::Random);
        assert_eq!(Difficulty::Medium.strategy(), Strategy::Heuristic);
        assert_eq!(Difficulty::Hard.strategy(), Strategy::ExhaustiveSearch);
    }

    #[test]
    fn test_difficulty_parse_and_display() {
        assert_eq!(Difficulty::from_str("HARD"), Ok(Difficulty::Hard));
        assert_eq!(Difficulty::Medium.to_string(), "medium");
        assert!(Difficulty::from_str("impossible").is_err());
    }

    #[test]
    fn test_difficulty_serializes_lowercase() {
        let json = serde_json::to_string(&Difficulty::Medium).expect("serializable");
        assert_eq!(json, "\"medium\"");
        let parsed: Difficulty = serde_json::from_str("\"easy\"").expect("deserializable");
        assert_eq!(parsed, Difficulty::Easy);
    }

    #[test]
    fn test_full_board_has_no_moves() {
        let board: Board = "XOXOXOOXO".parse().expect("valid board");
        let mut rng = StdRng::seed_from_u64(7);
        for strategy in [
            Strategy::Random,
            Strategy::Heuristic,
            Strategy::ExhaustiveSearch,
        ] {
            assert_eq!(
                strategy.select_move(&board, Mark::X, &mut rng),
                Err(StrategyError::NoMovesAvailable(Mark::X))
            );
        }
    }
}
