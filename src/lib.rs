//! Swiss tournament standings: library with models, the standings engine, and service plumbing.

pub mod api;
pub mod cache;
pub mod config;
pub mod logic;
pub mod models;
pub mod source;

pub use cache::{format_age, CachedStandings, FlightGuard, StandingsCache};
pub use config::{ServiceConfig, StandingsConfig, WINRATE_FLOOR};
pub use logic::{
    aggregate_rounds, apply_match, compute_standings, opponent_winrate_bounds, rank_bounds,
    sort_standings, standings_from_table, winrate, winrate_range, Contender, RankBounds,
    ScoreBounds,
};
pub use models::{
    Match, MatchProblem, MatchRecord, MatchStatus, Outcome, PlayerId, PlayerRecord,
    PlayerStanding, PlayerTable, Round, StandingRow, Standings, StandingsError, TournamentId,
    DOUBLE_LOSS_CODE, NO_OPPONENT, TIE_CODE,
};
pub use source::{collect_rounds, RoundFetcher, RoundStore};
