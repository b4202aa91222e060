//! A human playing a series of games against a computer strategy.

use crate::{ArenaConfig, GameMode, GameRecord, PartyId, ResultRecorder};
use noughts_engine::{
    Difficulty, Mark, Match, MoveError, Outcome, Seating, SeatingPolicy, SessionTally, Status,
    StrategyError,
};
use rand::Rng;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// Failure of a move in a computer session.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum PlayError {
    /// The move was rejected by the rules.
    #[display("{}", _0)]
    Move(MoveError),
    /// The strategy could not produce a move.
    #[display("{}", _0)]
    Strategy(StrategyError),
}

impl std::error::Error for PlayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlayError::Move(err) => Some(err),
            PlayError::Strategy(err) => Some(err),
        }
    }
}

/// Session state for one human against the computer.
///
/// Seating is decided when each game starts and holds until it ends. The
/// tally counts finished games only; abandoning a game with
/// [`ComputerSession::next_game`] leaves it uncounted.
#[derive(Debug)]
pub struct ComputerSession {
    party_id: PartyId,
    difficulty: Difficulty,
    policy: SeatingPolicy,
    seating: Seating,
    game: Match,
    tally: SessionTally,
    recorder: Arc<dyn ResultRecorder>,
    record_results: bool,
}

impl ComputerSession {
    /// Starts a session and seats its first game.
    #[instrument(skip(config, recorder, rng))]
    pub fn new<R: Rng + ?Sized>(
        party_id: PartyId,
        difficulty: Difficulty,
        config: &ArenaConfig,
        recorder: Arc<dyn ResultRecorder>,
        rng: &mut R,
    ) -> Self {
        let mut policy = SeatingPolicy::new(*config.warmup_games());
        let seating = policy.next_seating(rng);
        let record_results = config.records_difficulty(difficulty);
        info!(%difficulty, record_results, human = %seating.human, "Computer session started");

        Self {
            party_id,
            difficulty,
            policy,
            seating,
            game: Match::new(Mark::X),
            tally: SessionTally::default(),
            recorder,
            record_results,
        }
    }

    /// Starts a fresh game with newly decided seating.
    #[instrument(skip(self, rng), fields(games_started = self.policy.games_started()))]
    pub fn next_game<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Seating {
        if !self.game.status().is_terminal() && !self.game.history().is_empty() {
            debug!("Abandoning unfinished game");
        }
        self.seating = self.policy.next_seating(rng);
        self.game = Match::new(Mark::X);
        self.seating
    }

    /// Plays the human's mark at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`PlayError::Move`] if it is not the human's turn, the game
    /// is over, or the cell is unavailable.
    #[instrument(skip(self))]
    pub fn human_move(&mut self, index: usize) -> Result<Status, PlayError> {
        let status = self.game.play(index, self.seating.human)?;
        if status.is_terminal() {
            self.finish(status);
        }
        Ok(status)
    }

    /// Lets the computer move if it owns the turn.
    ///
    /// Returns the chosen index, or `None` if the game is already over.
    ///
    /// # Errors
    ///
    /// Returns [`PlayError::Move`] if it is the human's turn.
    #[instrument(skip(self, rng), fields(difficulty = %self.difficulty))]
    pub fn computer_move<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<Option<usize>, PlayError> {
        if self.game.status().is_terminal() {
            return Ok(None);
        }
        let mark = self.seating.computer;
        if self.game.to_move() != mark {
            return Err(MoveError::NotYourTurn(mark).into());
        }

        let index = self
            .difficulty
            .strategy()
            .select_move(self.game.board(), mark, rng)?;
        let status = self.game.play(index, mark)?;
        if status.is_terminal() {
            self.finish(status);
        }
        Ok(Some(index))
    }

    /// Returns true if the computer owns the current turn.
    pub fn computer_to_move(&self) -> bool {
        !self.game.status().is_terminal() && self.game.to_move() == self.seating.computer
    }

    /// The human's party identifier.
    pub fn party_id(&self) -> &PartyId {
        &self.party_id
    }

    /// The computer's difficulty.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Seating of the current game.
    pub fn seating(&self) -> Seating {
        self.seating
    }

    /// The current game.
    pub fn game(&self) -> &Match {
        &self.game
    }

    /// Finished-game counts for this session.
    pub fn tally(&self) -> &SessionTally {
        &self.tally
    }

    fn finish(&mut self, status: Status) {
        let Some(outcome) = Outcome::for_mark(status, self.seating.human) else {
            return;
        };
        self.tally.record(outcome);
        info!(%outcome, streak = self.tally.current_streak(), "Computer game finished");

        if !self.record_results {
            debug!(difficulty = %self.difficulty, "Difficulty not recorded");
            return;
        }
        let winner_id = (outcome == Outcome::Win).then(|| self.party_id.clone());
        let record = GameRecord::new(
            self.party_id.clone(),
            None,
            GameMode::Computer(self.difficulty),
            *self.game.board(),
            outcome,
            winner_id,
        );
        if let Err(err) = self.recorder.record(&record) {
            error!(error = %err, "Failed to record computer game");
        }
    }
}
