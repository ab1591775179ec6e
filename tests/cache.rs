//! Integration tests for the standings cache: freshness, invalidation, single flight.

use std::sync::Barrier;
use std::thread;
use std::time::Duration;
use swiss_standings::{
    compute_standings, format_age, MatchRecord, Standings, StandingsCache, StandingsConfig,
};

const HOUR: Duration = Duration::from_secs(3600);

fn sample() -> Standings {
    compute_standings(
        &[vec![MatchRecord::played("alice", "bob", "alice")]],
        &StandingsConfig::default(),
    )
    .unwrap()
}

#[test]
fn stored_standings_are_served_while_fresh() {
    let cache = StandingsCache::new(HOUR);
    assert!(cache.fresh("t1").is_none());
    cache.store("t1", sample());
    let cached = cache.fresh("t1").unwrap();
    assert_eq!(cached.standings, sample());
    assert!(cached.age() < HOUR);
    assert!(cache.fresh("t2").is_none());
}

#[test]
fn stale_standings_are_not_served() {
    let cache = StandingsCache::new(Duration::ZERO);
    cache.store("t1", sample());
    assert!(cache.fresh("t1").is_none());
    assert_eq!(cache.evict_stale(), 1);
}

#[test]
fn invalidate_drops_entry() {
    let cache = StandingsCache::new(HOUR);
    cache.store("t1", sample());
    assert!(cache.invalidate("t1"));
    assert!(cache.fresh("t1").is_none());
    assert!(!cache.invalidate("t1"));
}

#[test]
fn one_computation_per_tournament() {
    let cache = StandingsCache::new(HOUR);
    let first = cache.begin("t1").unwrap();
    assert_eq!(first.tournament(), "t1");
    assert!(cache.begin("t1").is_none());
    assert!(cache.begin("t2").is_some());
    drop(first);
    assert!(cache.begin("t1").is_some());
}

#[test]
fn completed_flight_is_cached_and_released() {
    let cache = StandingsCache::new(HOUR);
    let flight = cache.begin("t1").unwrap();
    flight.complete(sample());
    assert!(cache.fresh("t1").is_some());
    assert!(cache.begin("t1").is_some());
}

#[test]
fn flight_invalidated_midway_is_not_cached() {
    let cache = StandingsCache::new(HOUR);
    let flight = cache.begin("t1").unwrap();
    cache.invalidate("t1");
    let result = flight.complete(sample());
    assert_eq!(result.standings, sample());
    assert!(cache.fresh("t1").is_none());
}

#[test]
fn ages_read_naturally() {
    let secs = Duration::from_secs;
    assert_eq!(format_age(secs(0)), "just now");
    assert_eq!(format_age(secs(59)), "just now");
    assert_eq!(format_age(secs(60)), "1 minute ago");
    assert_eq!(format_age(secs(150)), "2 minutes ago");
    assert_eq!(format_age(secs(3600)), "1 hour ago");
    assert_eq!(format_age(secs(7300)), "2 hours ago");
    assert_eq!(format_age(secs(86400)), "1 day ago");
    assert_eq!(format_age(secs(3 * 86400 + 5)), "3 days ago");
}

#[test]
fn invalidate_racing_completion_never_leaves_stale_entry() {
    let standings = sample();
    for _ in 0..2_000 {
        let cache = StandingsCache::new(HOUR);
        let flight = cache.begin("t1").unwrap();
        let start = Barrier::new(2);
        thread::scope(|s| {
            s.spawn(|| {
                start.wait();
                cache.invalidate("t1");
            });
            start.wait();
            flight.complete(standings.clone());
        });
        assert!(cache.fresh("t1").is_none());
    }
}
