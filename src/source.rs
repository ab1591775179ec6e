//! Where round data comes from: the fetcher contract and the in-memory round store.

use crate::models::{MatchRecord, Round, TournamentId};
use log::{debug, warn};
use std::collections::{BTreeMap, HashMap};
use std::convert::Infallible;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

/// Supplies the pairings of one round of a tournament.
///
/// An empty round means no such round exists yet.
pub trait RoundFetcher {
    type Error;

    fn fetch_round(&self, tournament: &str, round: NonZeroUsize) -> Result<Round, Self::Error>;
}

/// Request rounds 1, 2, ... until the fetcher returns an empty one or
/// `max_rounds` have been collected.
pub fn collect_rounds<F: RoundFetcher>(
    fetcher: &F,
    tournament: &str,
    max_rounds: usize,
) -> Result<Vec<Round>, F::Error> {
    let mut rounds = Vec::new();
    for round in (1..=max_rounds).filter_map(NonZeroUsize::new) {
        let data = fetcher.fetch_round(tournament, round)?;
        if data.is_empty() {
            debug!("Tournament {}: no round {}, stopping", tournament, round);
            return Ok(rounds);
        }
        rounds.push(data);
    }
    warn!(
        "Tournament {}: stopped after {} rounds (limit reached)",
        tournament, max_rounds
    );
    Ok(rounds)
}

/// Rounds submitted for one tournament, plus last activity time (for auto-cleanup).
#[derive(Clone, Debug)]
struct TournamentRounds {
    rounds: BTreeMap<NonZeroUsize, Round>,
    last_activity: Instant,
}

/// Round data submitted to the service, by tournament id and round number.
#[derive(Clone, Debug, Default)]
pub struct RoundStore {
    tournaments: HashMap<TournamentId, TournamentRounds>,
}

impl RoundStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store (or replace) one round. Returns how many rounds the tournament now has.
    pub fn put_round(
        &mut self,
        tournament: &str,
        round: NonZeroUsize,
        matches: Vec<MatchRecord>,
    ) -> usize {
        let entry = self
            .tournaments
            .entry(tournament.to_string())
            .or_insert_with(|| TournamentRounds {
                rounds: BTreeMap::new(),
                last_activity: Instant::now(),
            });
        entry.last_activity = Instant::now();
        entry.rounds.insert(round, matches);
        let stored = entry.rounds.len();
        let leading = contiguous(&entry.rounds);
        if leading < stored {
            warn!(
                "Tournament {}: round {} is missing, rounds after it are ignored until it arrives",
                tournament,
                leading + 1
            );
        }
        stored
    }

    /// Rounds 1..=n that are all present; later rounds past a gap are not collected.
    pub fn contiguous_rounds(&self, tournament: &str) -> usize {
        self.tournaments
            .get(tournament)
            .map_or(0, |entry| contiguous(&entry.rounds))
    }

    /// Refresh a tournament's last activity. Returns false if unknown.
    pub fn touch(&mut self, tournament: &str) -> bool {
        match self.tournaments.get_mut(tournament) {
            Some(entry) => {
                entry.last_activity = Instant::now();
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, tournament: &str) -> bool {
        self.tournaments.contains_key(tournament)
    }

    pub fn round_count(&self, tournament: &str) -> usize {
        self.tournaments
            .get(tournament)
            .map_or(0, |entry| entry.rounds.len())
    }

    pub fn remove(&mut self, tournament: &str) -> bool {
        self.tournaments.remove(tournament).is_some()
    }

    /// Drop tournaments idle for at least `timeout`. Returns how many were removed.
    pub fn evict_inactive(&mut self, timeout: Duration) -> usize {
        let before = self.tournaments.len();
        self.tournaments
            .retain(|_, entry| entry.last_activity.elapsed() < timeout);
        before - self.tournaments.len()
    }
}

fn contiguous(rounds: &BTreeMap<NonZeroUsize, Round>) -> usize {
    rounds
        .keys()
        .zip(1..)
        .take_while(|(round, expected)| round.get() == *expected)
        .count()
}

impl RoundFetcher for RoundStore {
    type Error = Infallible;

    fn fetch_round(&self, tournament: &str, round: NonZeroUsize) -> Result<Round, Infallible> {
        Ok(self
            .tournaments
            .get(tournament)
            .and_then(|entry| entry.rounds.get(&round))
            .cloned()
            .unwrap_or_default())
    }
}
