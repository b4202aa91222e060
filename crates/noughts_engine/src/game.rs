//! A single match: board, turn ownership and terminal tracking.

use super::rules::{apply_move, available_moves, evaluate};
use super::{Board, Mark, MoveError, Status};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// One playthrough of tic-tac-toe.
///
/// Created empty, mutated by exactly one move per turn, immutable once
/// terminal. The mark counts on the board always satisfy the alternating
/// play invariant relative to `first`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    board: Board,
    first: Mark,
    to_move: Mark,
    status: Status,
    history: Vec<usize>,
}

impl Match {
    /// Starts an empty match where `first` moves first.
    #[instrument]
    pub fn new(first: Mark) -> Self {
        Self {
            board: Board::new(),
            first,
            to_move: first,
            status: Status::Ongoing,
            history: Vec::new(),
        }
    }

    /// Rebuilds a match from a stored board.
    ///
    /// The mark to move is derived from the counts, so a stale or forged
    /// turn marker cannot be smuggled in. History is not recoverable and
    /// starts empty.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::Unreachable`] if the counts cannot arise from
    /// alternating play with `first` moving first.
    #[instrument(skip(board), fields(board = %board))]
    pub fn resume(board: Board, first: Mark) -> Result<Self, MoveError> {
        let next = next_mark(&board, first)?;
        let status = evaluate(&board);
        let to_move = if status.is_terminal() {
            next.opponent()
        } else {
            next
        };
        Ok(Self {
            board,
            first,
            to_move,
            status,
            history: Vec::new(),
        })
    }

    /// Places `mark` at `index` and returns the resulting status.
    ///
    /// # Errors
    ///
    /// - [`MoveError::GameOver`] if the match is terminal
    /// - [`MoveError::NotYourTurn`] if `mark` does not own the turn
    /// - [`MoveError::IllegalMove`] if the index is out of range or taken
    #[instrument(skip(self), fields(to_move = %self.to_move))]
    pub fn play(&mut self, index: usize, mark: Mark) -> Result<Status, MoveError> {
        if self.status.is_terminal() {
            warn!("Move attempted on finished match");
            return Err(MoveError::GameOver);
        }
        if mark != self.to_move {
            warn!(%mark, "Move attempted out of turn");
            return Err(MoveError::NotYourTurn(mark));
        }

        self.board = apply_move(&self.board, index, mark)?;
        self.history.push(index);
        self.status = evaluate(&self.board);
        if !self.status.is_terminal() {
            self.to_move = mark.opponent();
        }

        debug_assert!(next_mark(&self.board, self.first).is_ok());
        debug!(status = %self.status, "Move applied");
        Ok(self.status)
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the mark that moved first.
    pub fn first(&self) -> Mark {
        self.first
    }

    /// Returns the mark to move. After a terminal move this is the mark
    /// that made it.
    pub fn to_move(&self) -> Mark {
        self.to_move
    }

    /// Returns the match status.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Returns indices played in this match, in order.
    pub fn history(&self) -> &[usize] {
        &self.history
    }

    /// Returns empty indices in ascending order.
    pub fn valid_moves(&self) -> Vec<usize> {
        if self.status.is_terminal() {
            Vec::new()
        } else {
            available_moves(&self.board)
        }
    }
}

/// Derives whose turn it is from the mark counts.
///
/// The first mark has either as many marks as the second (first to move)
/// or exactly one more (second to move).
pub fn next_mark(board: &Board, first: Mark) -> Result<Mark, MoveError> {
    let firsts = board.count(first);
    let seconds = board.count(first.opponent());

    if firsts == seconds {
        Ok(first)
    } else if firsts == seconds + 1 {
        Ok(first.opponent())
    } else {
        debug!(firsts, seconds, "Mark counts violate alternation");
        Err(MoveError::Unreachable(format!(
            "{} has {} marks, {} has {}",
            first,
            firsts,
            first.opponent(),
            seconds
        )))
    }
}
