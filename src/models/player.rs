//! PlayerId, PlayerRecord and the per-player standing views.

use serde::{Deserialize, Serialize};

/// Stable identifier for a participant, as assigned upstream.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Running totals for one player, built while scanning rounds.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: PlayerId,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    /// Pairings not reported yet.
    pub unplayed: u32,
    pub games_played: u32,
    /// Rounds without an opponent. Not part of `games_played`.
    pub byes: u32,
    /// One entry per resolved match, rematches included.
    pub opponents: Vec<PlayerId>,
}

impl PlayerRecord {
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Played a resolved match against `opponent`.
    pub fn record_game(&mut self, opponent: &PlayerId) {
        self.games_played += 1;
        self.opponents.push(opponent.clone());
    }

    pub fn add_win(&mut self) {
        self.wins += 1;
    }

    pub fn add_loss(&mut self) {
        self.losses += 1;
    }

    pub fn add_tie(&mut self) {
        self.ties += 1;
    }

    pub fn add_unplayed(&mut self) {
        self.unplayed += 1;
    }

    pub fn add_bye(&mut self) {
        self.byes += 1;
    }

    /// Resolved plus outstanding games.
    pub fn scheduled(&self) -> u32 {
        self.games_played + self.unplayed
    }
}

/// A player's record together with every derived stat.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerStanding {
    #[serde(flatten)]
    pub record: PlayerRecord,
    pub winrate: f64,
    pub min_opp_winrate: f64,
    pub max_opp_winrate: f64,
    pub min_score: f64,
    pub max_score: f64,
    pub best_rank: u32,
    pub worst_rank: u32,
}

impl PlayerStanding {
    pub fn id(&self) -> &PlayerId {
        &self.record.id
    }

    /// Display view with rates and scores fixed to three decimals.
    pub fn row(&self) -> StandingRow {
        StandingRow::from_standing(self)
    }
}

/// Table row of a standing (for API / display).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StandingRow {
    pub player: String,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub games_played: u32,
    pub unplayed: u32,
    pub winrate: String,
    pub min_opp_winrate: String,
    pub max_opp_winrate: String,
    pub min_score: String,
    pub max_score: String,
    pub best_rank: u32,
    pub worst_rank: u32,
}

impl StandingRow {
    pub fn from_standing(s: &PlayerStanding) -> Self {
        Self {
            player: s.record.id.to_string(),
            wins: s.record.wins,
            losses: s.record.losses,
            ties: s.record.ties,
            games_played: s.record.games_played,
            unplayed: s.record.unplayed,
            winrate: format!("{:.3}", s.winrate),
            min_opp_winrate: format!("{:.3}", s.min_opp_winrate),
            max_opp_winrate: format!("{:.3}", s.max_opp_winrate),
            min_score: format!("{:.3}", s.min_score),
            max_score: format!("{:.3}", s.max_score),
            best_rank: s.best_rank,
            worst_rank: s.worst_rank,
        }
    }
}
