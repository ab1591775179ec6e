//! Computed standings per tournament: freshness window and single-flight guard.

use crate::models::{Standings, TournamentId};
use chrono::{DateTime, Utc};
use log::debug;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError, RwLock};
use std::time::{Duration, Instant};

/// A standings snapshot with the time it was computed.
#[derive(Clone, Debug, PartialEq)]
pub struct CachedStandings {
    pub standings: Standings,
    pub computed_at: DateTime<Utc>,
    stored: Instant,
}

impl CachedStandings {
    pub fn age(&self) -> Duration {
        self.stored.elapsed()
    }
}

/// Last-write-wins standings per tournament.
///
/// Entries older than the ttl are never served. Safe to share between
/// request handlers.
#[derive(Debug)]
pub struct StandingsCache {
    ttl: Duration,
    entries: RwLock<HashMap<TournamentId, CachedStandings>>,
    /// Tournaments being computed, flagged true once invalidated mid-flight.
    in_flight: Mutex<HashMap<TournamentId, bool>>,
}

impl StandingsCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// Cached standings if still inside the freshness window.
    pub fn fresh(&self, tournament: &str) -> Option<CachedStandings> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(tournament)
            .filter(|entry| entry.age() < self.ttl)
            .cloned()
    }

    /// Replace whatever is cached for the tournament.
    pub fn store(&self, tournament: &str, standings: Standings) -> CachedStandings {
        let entry = snapshot(standings);
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(tournament.to_string(), entry.clone());
        debug!("Cached standings for tournament {}", tournament);
        entry
    }

    /// Forget cached standings, e.g. after a round changed. A computation
    /// running for the tournament will not cache its result.
    pub fn invalidate(&self, tournament: &str) -> bool {
        if let Some(stale) = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get_mut(tournament)
        {
            *stale = true;
        }
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(tournament)
            .is_some()
    }

    /// Remove entries past the freshness window. Returns how many were removed.
    pub fn evict_stale(&self) -> usize {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|_, entry| entry.age() < self.ttl);
        before - entries.len()
    }

    /// Claim the right to compute standings for a tournament.
    ///
    /// None while another computation for the same id is running. The claim
    /// is released when the guard drops.
    pub fn begin(&self, tournament: &str) -> Option<FlightGuard<'_>> {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if in_flight.contains_key(tournament) {
            return None;
        }
        in_flight.insert(tournament.to_string(), false);
        Some(FlightGuard {
            cache: self,
            tournament: tournament.to_string(),
        })
    }
}

/// Held while standings for one tournament are being computed.
#[derive(Debug)]
pub struct FlightGuard<'a> {
    cache: &'a StandingsCache,
    tournament: TournamentId,
}

impl FlightGuard<'_> {
    pub fn tournament(&self) -> &str {
        &self.tournament
    }

    /// Finish the computation. The result is cached unless the tournament
    /// was invalidated while it ran; it is returned either way.
    pub fn complete(self, standings: Standings) -> CachedStandings {
        // Held across the insert so an invalidate cannot slip in between.
        let in_flight = self
            .cache
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let entry = snapshot(standings);
        if in_flight.get(&self.tournament).copied().unwrap_or(false) {
            debug!(
                "Tournament {} changed during computation, not caching",
                self.tournament
            );
        } else {
            self.cache
                .entries
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(self.tournament.clone(), entry.clone());
            debug!("Cached standings for tournament {}", self.tournament);
        }
        drop(in_flight);
        entry
    }
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.cache
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.tournament);
    }
}

fn snapshot(standings: Standings) -> CachedStandings {
    CachedStandings {
        standings,
        computed_at: Utc::now(),
        stored: Instant::now(),
    }
}

/// Human-readable age, e.g. "just now" or "3 minutes ago".
pub fn format_age(age: Duration) -> String {
    let secs = age.as_secs();
    let (count, unit) = match secs {
        0..=59 => return "just now".to_string(),
        60..=3599 => (secs / 60, "minute"),
        3600..=86399 => (secs / 3600, "hour"),
        _ => (secs / 86400, "day"),
    };
    format!("{} {}{} ago", count, unit, if count == 1 { "" } else { "s" })
}
