//! Standings engine: aggregation, win-rate and score bounds, rank bounds, sorting.

mod aggregate;
mod bounds;
mod ranks;
mod standings;

pub use aggregate::{aggregate_rounds, apply_match};
pub use bounds::{opponent_winrate_bounds, winrate, winrate_range, ScoreBounds};
pub use ranks::{rank_bounds, Contender, RankBounds};
pub use standings::{compute_standings, sort_standings, standings_from_table};
