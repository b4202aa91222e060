//! Errors raised by the rule engine and opponent strategies.

use super::Mark;

/// Why a move was rejected as illegal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum IllegalReason {
    /// Index outside `0..9`.
    #[display("out of bounds")]
    OutOfBounds,
    /// Target cell already holds a mark.
    #[display("cell is occupied")]
    Occupied,
}

/// Error that can occur when validating or applying a move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The index is out of range or the cell is taken.
    #[display("Illegal move at {}: {}", index, reason)]
    IllegalMove {
        /// Requested index.
        index: usize,
        /// Reason for rejection.
        reason: IllegalReason,
    },

    /// The mark does not own the current turn.
    #[display("It's not {}'s turn", _0)]
    NotYourTurn(super::Mark),

    /// The match already reached a terminal state.
    #[display("Game is already over")]
    GameOver,

    /// A stored board cannot arise from alternating play.
    #[display("Board is not reachable: {}", _0)]
    Unreachable(String),
}

impl std::error::Error for MoveError {}

impl MoveError {
    /// Returns true for out-of-range or occupied targets.
    pub fn is_illegal_move(&self) -> bool {
        matches!(self, MoveError::IllegalMove { .. })
    }
}

/// Error returned by an opponent strategy.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum StrategyError {
    /// The strategy was asked to move on a full board.
    #[display("No moves available for {}", _0)]
    NoMovesAvailable(Mark),
}

impl std::error::Error for StrategyError {}
