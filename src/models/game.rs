//! Match records as delivered per round, and the validated Match shape.

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};

/// Participant id the upstream pairings use for "no opponent this round".
pub const NO_OPPONENT: &str = "nobody";

/// Winner code for a tie.
pub const TIE_CODE: &str = "0";

/// Winner code for a double loss.
pub const DOUBLE_LOSS_CODE: &str = "-1";

/// One round of pairings, in the order they were listed.
pub type Round = Vec<MatchRecord>;

/// A pairing row as a round fetcher hands it over.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    #[serde(default)]
    pub player_a: Option<String>,
    /// None or [`NO_OPPONENT`] for a bye.
    #[serde(default)]
    pub player_b: Option<String>,
    /// "0" tie, "-1" double loss, or the id of the participant who won.
    #[serde(default)]
    pub winner: Option<String>,
    /// False while the pairing is still outstanding.
    pub completed: bool,
}

impl MatchRecord {
    /// A completed pairing between two players.
    pub fn played(a: &str, b: &str, winner: &str) -> Self {
        Self {
            player_a: Some(a.to_string()),
            player_b: Some(b.to_string()),
            winner: Some(winner.to_string()),
            completed: true,
        }
    }

    /// A pairing that has not been reported yet.
    pub fn unplayed(a: &str, b: &str) -> Self {
        Self {
            player_a: Some(a.to_string()),
            player_b: Some(b.to_string()),
            winner: None,
            completed: false,
        }
    }

    /// Single-participant row, as upstream lists a bye.
    pub fn bye(player: &str) -> Self {
        Self {
            player_a: Some(player.to_string()),
            player_b: Some(NO_OPPONENT.to_string()),
            winner: Some(TIE_CODE.to_string()),
            completed: true,
        }
    }

    /// Validate the row into a [`Match`].
    pub fn resolve(&self) -> Result<Match, MatchProblem> {
        let a = participant(self.player_a.as_deref());
        let b = participant(self.player_b.as_deref());
        let code = self.winner.as_deref().map(str::trim).filter(|c| !c.is_empty());

        let (a, b) = match (a, b) {
            (None, None) => return Err(MatchProblem::MissingPlayers),
            (Some(p), None) | (None, Some(p)) => {
                return match code {
                    None | Some(TIE_CODE) => Ok(Match::Bye(PlayerId::new(p))),
                    Some(c) if c == p => Ok(Match::Bye(PlayerId::new(p))),
                    Some(c) => Err(MatchProblem::UnknownOutcome(c.to_string())),
                };
            }
            (Some(a), Some(b)) => (a, b),
        };
        if a == b {
            return Err(MatchProblem::SelfPairing);
        }

        let outcome = match code {
            None => Outcome::None,
            Some(TIE_CODE) => Outcome::Tie,
            Some(DOUBLE_LOSS_CODE) => Outcome::DoubleLoss,
            Some(c) if c == a => Outcome::PlayerAWins,
            Some(c) if c == b => Outcome::PlayerBWins,
            Some(c) => return Err(MatchProblem::UnknownOutcome(c.to_string())),
        };
        let status = if self.completed {
            MatchStatus::Completed
        } else {
            MatchStatus::Unplayed
        };
        if status == MatchStatus::Completed && outcome == Outcome::None {
            return Err(MatchProblem::MissingOutcome);
        }

        Ok(Match::Pairing {
            player_a: PlayerId::new(a),
            player_b: PlayerId::new(b),
            status,
            outcome,
        })
    }
}

/// Trimmed id of a real participant; empty ids and the sentinel count as absent.
fn participant(id: Option<&str>) -> Option<&str> {
    id.map(str::trim)
        .filter(|id| !id.is_empty() && *id != NO_OPPONENT)
}

/// Whether a pairing has been played.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Completed,
    Unplayed,
}

/// Reported result of a pairing.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    PlayerAWins,
    PlayerBWins,
    Tie,
    DoubleLoss,
    None,
}

/// A validated match: either a real pairing or a round without opponent.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Match {
    Bye(PlayerId),
    Pairing {
        player_a: PlayerId,
        player_b: PlayerId,
        status: MatchStatus,
        outcome: Outcome,
    },
}

/// Why a [`MatchRecord`] could not be used.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MatchProblem {
    /// Neither side names a real participant.
    MissingPlayers,
    /// Both sides name the same participant.
    SelfPairing,
    /// Marked completed but no winner code given.
    MissingOutcome,
    /// Winner code is not a tie, a double loss, or one of the participants.
    UnknownOutcome(String),
}

impl std::fmt::Display for MatchProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchProblem::MissingPlayers => write!(f, "match has no participants"),
            MatchProblem::SelfPairing => write!(f, "player is paired against themselves"),
            MatchProblem::MissingOutcome => write!(f, "completed match has no outcome"),
            MatchProblem::UnknownOutcome(code) => write!(f, "unknown outcome code {:?}", code),
        }
    }
}
