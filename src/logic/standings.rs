//! Full standings pass: aggregate, bound, rank, sort.

use crate::config::StandingsConfig;
use crate::logic::aggregate::aggregate_rounds;
use crate::logic::bounds::{opponent_winrate_bounds, winrate, ScoreBounds};
use crate::logic::ranks::{rank_bounds, Contender};
use crate::models::{PlayerStanding, PlayerTable, Round, Standings, StandingsError};
use log::info;

/// Compute standings from every round played so far.
///
/// Zero rounds is not an error and yields empty standings.
pub fn compute_standings(
    rounds: &[Round],
    config: &StandingsConfig,
) -> Result<Standings, StandingsError> {
    let table = aggregate_rounds(rounds)?;
    let standings = standings_from_table(table, config);
    info!(
        "Computed standings for {} players over {} rounds",
        standings.len(),
        rounds.len()
    );
    Ok(standings)
}

/// Derive every stat from an aggregated table and sort the result.
pub fn standings_from_table(table: PlayerTable, config: &StandingsConfig) -> Standings {
    let derived: Vec<_> = table
        .records()
        .iter()
        .map(|record| {
            let (min_opp, max_opp) = opponent_winrate_bounds(record, &table, config);
            let scores = ScoreBounds::new(record.wins, record.unplayed, min_opp, max_opp);
            (winrate(record, config), min_opp, max_opp, scores)
        })
        .collect();

    let field: Vec<Contender> = table
        .records()
        .iter()
        .zip(&derived)
        .map(|(record, (_, _, _, scores))| Contender {
            min_score: scores.min,
            max_score: scores.max,
            unplayed: record.unplayed,
        })
        .collect();
    let ranks = rank_bounds(&field);

    let mut players: Vec<PlayerStanding> = table
        .into_records()
        .into_iter()
        .zip(derived)
        .zip(ranks)
        .map(
            |((record, (own_rate, min_opp, max_opp, scores)), ranks)| PlayerStanding {
                record,
                winrate: own_rate,
                min_opp_winrate: min_opp,
                max_opp_winrate: max_opp,
                min_score: scores.min,
                max_score: scores.max,
                best_rank: ranks.best,
                worst_rank: ranks.worst,
            },
        )
        .collect();

    sort_standings(&mut players);
    Standings { players }
}

/// Order by descending minimum score. Stable, so exact ties keep first-seen order.
pub fn sort_standings(players: &mut [PlayerStanding]) {
    players.sort_by(|a, b| b.min_score.total_cmp(&a.min_score));
}
