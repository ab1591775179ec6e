//! Single binary web server: submit round pairings, read computed standings as JSON.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, CACHE_TTL_SECS, INACTIVITY_TIMEOUT_SECS, MAX_ROUNDS.

use actix_web::{web::Data, App, HttpServer};
use std::sync::RwLock;
use std::time::Duration;
use swiss_standings::api::{self, CacheState, ConfigState, RoundState};
use swiss_standings::{RoundStore, ServiceConfig, StandingsCache};

/// How often the cleanup task runs.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(30 * 60);

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServiceConfig::from_env();
    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let rounds: RoundState = Data::new(RwLock::new(RoundStore::new()));
    let cache: CacheState = Data::new(StandingsCache::new(config.cache_ttl));
    let inactivity_timeout = config.inactivity_timeout;
    let config: ConfigState = Data::new(config);

    // Background task: drop idle tournaments and standings past the freshness window
    let rounds_cleanup = rounds.clone();
    let cache_cleanup = cache.clone();
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(CLEANUP_INTERVAL);
        loop {
            interval.tick().await;
            let removed = match rounds_cleanup.write() {
                Ok(mut g) => g.evict_inactive(inactivity_timeout),
                Err(_) => continue,
            };
            if removed > 0 {
                log::info!("Cleaned up {} inactive tournament(s)", removed);
            }
            let stale = cache_cleanup.evict_stale();
            if stale > 0 {
                log::debug!("Evicted {} stale standings snapshot(s)", stale);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(rounds.clone())
            .app_data(cache.clone())
            .app_data(config.clone())
            .configure(api::configure)
    })
    .bind(bind)?
    .run()
    .await
}
