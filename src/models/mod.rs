//! Data structures for standings: match records, player records, the standings snapshot.

mod game;
mod player;
mod standings;
mod table;

pub use game::{
    Match, MatchProblem, MatchRecord, MatchStatus, Outcome, Round, DOUBLE_LOSS_CODE, NO_OPPONENT,
    TIE_CODE,
};
pub use player::{PlayerId, PlayerRecord, PlayerStanding, StandingRow};
pub use standings::{Standings, StandingsError, TournamentId};
pub use table::PlayerTable;
