//! Aggregation pass: rounds of match records into per-player totals.

use crate::models::{
    Match, MatchStatus, Outcome, PlayerId, PlayerTable, Round, StandingsError,
};
use log::debug;

/// Build one record per participant from all rounds, in round order.
///
/// Every record is validated first; the first unusable one aborts the pass
/// with its round number, position and contents. Byes register the player
/// but never touch games played, ties or the opponents list.
pub fn aggregate_rounds(rounds: &[Round]) -> Result<PlayerTable, StandingsError> {
    let mut table = PlayerTable::new();

    for (i, round) in rounds.iter().enumerate() {
        let round_number = i + 1;
        for (index, record) in round.iter().enumerate() {
            let m = record
                .resolve()
                .map_err(|problem| StandingsError::InvalidMatch {
                    round: round_number,
                    index,
                    record: record.clone(),
                    problem,
                })?;
            apply_match(&mut table, &m);
        }
        debug!(
            "Aggregated round {} ({} matches, {} players so far)",
            round_number,
            round.len(),
            table.len()
        );
    }

    Ok(table)
}

/// Apply a single validated match to the table.
pub fn apply_match(table: &mut PlayerTable, m: &Match) {
    match m {
        Match::Bye(player) => table.entry(player).add_bye(),
        Match::Pairing {
            player_a,
            player_b,
            status: MatchStatus::Unplayed,
            ..
        } => {
            table.entry(player_a).add_unplayed();
            table.entry(player_b).add_unplayed();
        }
        Match::Pairing {
            player_a,
            player_b,
            status: MatchStatus::Completed,
            outcome,
        } => apply_result(table, player_a, player_b, *outcome),
    }
}

fn apply_result(table: &mut PlayerTable, a: &PlayerId, b: &PlayerId, outcome: Outcome) {
    let player_a = table.entry(a);
    player_a.record_game(b);
    match outcome {
        Outcome::PlayerAWins => player_a.add_win(),
        Outcome::PlayerBWins | Outcome::DoubleLoss => player_a.add_loss(),
        Outcome::Tie => player_a.add_tie(),
        Outcome::None => {}
    }

    let player_b = table.entry(b);
    player_b.record_game(a);
    match outcome {
        Outcome::PlayerBWins => player_b.add_win(),
        Outcome::PlayerAWins | Outcome::DoubleLoss => player_b.add_loss(),
        Outcome::Tie => player_b.add_tie(),
        Outcome::None => {}
    }
}
