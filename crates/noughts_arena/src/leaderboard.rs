//! Player rankings aggregated from game records.

use crate::{GameRecord, PartyId};
use derive_getters::Getters;
use noughts_engine::Outcome;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Aggregated results for one party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Standing {
    party_id: PartyId,
    wins: u32,
    draws: u32,
    losses: u32,
    total_score: i32,
}

impl Standing {
    fn empty(party_id: PartyId) -> Self {
        Self {
            party_id,
            wins: 0,
            draws: 0,
            losses: 0,
            total_score: 0,
        }
    }

    fn add(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::Loss => self.losses += 1,
        }
        self.total_score += outcome.points();
    }

    /// Games counted in this standing.
    pub fn total_games(&self) -> u32 {
        self.wins + self.draws + self.losses
    }

    /// Win rate as a percentage (0.0-100.0).
    pub fn win_rate(&self) -> f64 {
        if self.total_games() == 0 {
            0.0
        } else {
            (self.wins as f64 / self.total_games() as f64) * 100.0
        }
    }
}

/// Ranks parties by total score, then wins, both descending. Remaining
/// ties keep first-seen order.
#[instrument(skip(records), fields(records = records.len()))]
pub fn rank(records: &[GameRecord]) -> Vec<Standing> {
    let mut order: Vec<PartyId> = Vec::new();
    let mut standings: HashMap<PartyId, Standing> = HashMap::new();

    for record in records {
        for (party, outcome) in record.participants() {
            standings
                .entry(party.clone())
                .or_insert_with(|| {
                    order.push(party.clone());
                    Standing::empty(party.clone())
                })
                .add(outcome);
        }
    }

    let mut ranked: Vec<Standing> = order
        .into_iter()
        .filter_map(|party| standings.remove(&party))
        .collect();
    ranked.sort_by(|a, b| {
        b.total_score
            .cmp(&a.total_score)
            .then_with(|| b.wins.cmp(&a.wins))
    });

    debug!(parties = ranked.len(), "Leaderboard ranked");
    ranked
}
