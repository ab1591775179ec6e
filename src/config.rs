//! Engine constants and service settings read from the environment.

use log::warn;
use std::time::Duration;

/// Lowest win rate any record is credited with. An unestablished or weak
/// record is never assumed worse than 25%.
pub const WINRATE_FLOOR: f64 = 0.25;

/// Settings for one standings computation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StandingsConfig {
    pub winrate_floor: f64,
}

impl Default for StandingsConfig {
    fn default() -> Self {
        Self {
            winrate_floor: WINRATE_FLOOR,
        }
    }
}

impl StandingsConfig {
    /// Clamp `rate` to the configured floor.
    pub fn floor(&self, rate: f64) -> f64 {
        rate.max(self.winrate_floor)
    }
}

/// Web service settings. Each field can be overridden by an env variable:
/// HOST, PORT, CACHE_TTL_SECS, INACTIVITY_TIMEOUT_SECS, MAX_ROUNDS.
#[derive(Clone, Debug, PartialEq)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    /// How long computed standings are served before recomputing.
    pub cache_ttl: Duration,
    /// Tournaments without activity for this long are dropped.
    pub inactivity_timeout: Duration,
    /// Upper bound on rounds requested from a fetcher.
    pub max_rounds: usize,
    pub standings: StandingsConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cache_ttl: Duration::from_secs(3600),
            inactivity_timeout: Duration::from_secs(12 * 3600),
            max_rounds: 64,
            standings: StandingsConfig::default(),
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; missing or unparseable values keep the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup("HOST")
                .map(|h| h.trim().to_string())
                .filter(|h| !h.is_empty())
                .unwrap_or(defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port),
            cache_ttl: Duration::from_secs(parse_or(
                &lookup,
                "CACHE_TTL_SECS",
                defaults.cache_ttl.as_secs(),
            )),
            inactivity_timeout: Duration::from_secs(parse_or(
                &lookup,
                "INACTIVITY_TIMEOUT_SECS",
                defaults.inactivity_timeout.as_secs(),
            )),
            max_rounds: parse_or(&lookup, "MAX_ROUNDS", defaults.max_rounds),
            standings: defaults.standings,
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                warn!("Ignoring {}={:?}: not a valid value, using {}", key, raw, default);
                default
            }
        },
    }
}
