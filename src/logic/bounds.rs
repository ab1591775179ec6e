//! Win-rate and score bounds per player.

use crate::config::StandingsConfig;
use crate::models::{PlayerRecord, PlayerTable};

/// A player's own win rate over resolved games, floored.
pub fn winrate(record: &PlayerRecord, config: &StandingsConfig) -> f64 {
    if record.games_played > 0 {
        config.floor(record.wins as f64 / record.games_played as f64)
    } else {
        config.winrate_floor
    }
}

/// Lowest and highest final win rate a player can still reach: losing every
/// outstanding game, or winning every one. None when nothing is scheduled.
pub fn winrate_range(record: &PlayerRecord, config: &StandingsConfig) -> Option<(f64, f64)> {
    let scheduled = record.scheduled();
    if scheduled == 0 {
        return None;
    }
    let scheduled = scheduled as f64;
    let min = config.floor(record.wins as f64 / scheduled);
    let max = config.floor((record.wins + record.unplayed) as f64 / scheduled);
    Some((min, max))
}

/// Mean of the opponents' win-rate ranges, one term per resolved match.
///
/// Opponents with nothing scheduled are left out of both means. With no
/// eligible opponent the divisor is 1, so both bounds come out as 0.
pub fn opponent_winrate_bounds(
    record: &PlayerRecord,
    table: &PlayerTable,
    config: &StandingsConfig,
) -> (f64, f64) {
    let mut count = 0usize;
    let (mut min_sum, mut max_sum) = (0.0, 0.0);
    for (min, max) in record
        .opponents
        .iter()
        .filter_map(|opp| table.get(opp))
        .filter_map(|opp| winrate_range(opp, config))
    {
        min_sum += min;
        max_sum += max;
        count += 1;
    }
    let divisor = count.max(1) as f64;
    (min_sum / divisor, max_sum / divisor)
}

/// Range of a player's strength-of-schedule adjusted score.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoreBounds {
    pub min: f64,
    pub max: f64,
}

impl ScoreBounds {
    /// `min` credits current wins and the weakest opponent strength; `max`
    /// adds the strongest opponent strength and one point per unplayed game.
    pub fn new(wins: u32, unplayed: u32, min_opp_winrate: f64, max_opp_winrate: f64) -> Self {
        Self {
            min: wins as f64 + min_opp_winrate,
            max: wins as f64 + max_opp_winrate + unplayed as f64,
        }
    }
}
