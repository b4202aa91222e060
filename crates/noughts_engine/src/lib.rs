//! Tic-tac-toe rule engine and computer opponents.
//!
//! # Architecture
//!
//! - **Board**: passive 3x3 container with a text codec
//! - **Rules**: move legality, placement and win/draw evaluation
//! - **Match**: turn ownership and terminal tracking for one game
//! - **Strategies**: random, heuristic and exhaustive-search opponents
//! - **Session**: seating fairness and tallies across games
//!
//! Everything here is synchronous and free of I/O.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod game;
mod position;
pub mod rules;
mod session;
pub mod strategy;
mod types;

pub use error::{IllegalReason, MoveError, StrategyError};
pub use game::{Match, next_mark};
pub use position::Position;
pub use rules::{apply_move, available_moves, create_empty, evaluate, winning_line};
pub use session::{DEFAULT_WARMUP_GAMES, Outcome, Seating, SeatingPolicy, SessionTally};
pub use strategy::{Difficulty, Strategy};
pub use types::{Board, BoardParseError, Cell, Mark, Status};
