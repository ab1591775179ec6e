//! Standings snapshot and the errors an analysis run can report.

use crate::models::game::{MatchProblem, MatchRecord};
use crate::models::player::{PlayerId, PlayerStanding, StandingRow};
use serde::{Deserialize, Serialize};

/// Identifier of a tournament on the upstream site.
pub type TournamentId = String;

/// Errors that can occur while computing standings.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StandingsError {
    /// A match record could not be used.
    InvalidMatch {
        /// 1-based round number.
        round: usize,
        /// Position of the record within its round.
        index: usize,
        record: MatchRecord,
        problem: MatchProblem,
    },
}

impl std::fmt::Display for StandingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StandingsError::InvalidMatch {
                round,
                index,
                record,
                problem,
            } => write!(
                f,
                "Round {}, match {}: {} ({} vs {}, winner {})",
                round,
                index + 1,
                problem,
                record.player_a.as_deref().unwrap_or("-"),
                record.player_b.as_deref().unwrap_or("-"),
                record.winner.as_deref().unwrap_or("-"),
            ),
        }
    }
}

impl std::error::Error for StandingsError {}

/// Final standings, ordered by descending minimum score.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Standings {
    pub players: Vec<PlayerStanding>,
}

impl Standings {
    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn get(&self, id: &PlayerId) -> Option<&PlayerStanding> {
        self.players.iter().find(|p| p.id() == id)
    }

    /// Display rows in standings order.
    pub fn rows(&self) -> Vec<StandingRow> {
        self.players.iter().map(PlayerStanding::row).collect()
    }
}
