//! REST API: submit round pairings, read computed standings as JSON.

use crate::cache::{format_age, CachedStandings, StandingsCache};
use crate::config::ServiceConfig;
use crate::logic::compute_standings;
use crate::models::{MatchRecord, StandingRow, TournamentId};
use crate::source::{collect_rounds, RoundStore};
use actix_web::{
    delete, get, put,
    web::{self, Data, Json, Path},
    HttpResponse, Responder,
};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::sync::RwLock;

/// Submitted rounds for every tournament.
pub type RoundState = Data<RwLock<RoundStore>>;
pub type CacheState = Data<StandingsCache>;
pub type ConfigState = Data<ServiceConfig>;

/// Largest accepted round body; large events list several hundred pairings per round.
pub const ROUND_BODY_LIMIT: usize = 4 * 1024 * 1024;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Serialize)]
struct RoundStoredResponse {
    tournament_id: TournamentId,
    round: usize,
    rounds: usize,
    /// Rounds from 1 without a gap; only these are used for standings.
    contiguous_rounds: usize,
}

#[derive(Serialize)]
struct StandingsResponse {
    tournament_id: TournamentId,
    computed_at: chrono::DateTime<chrono::Utc>,
    /// How long ago the standings were computed, e.g. "5 minutes ago".
    retrieved: String,
    players: Vec<StandingRow>,
}

impl StandingsResponse {
    fn new(tournament_id: &str, cached: &CachedStandings) -> Self {
        Self {
            tournament_id: tournament_id.to_string(),
            computed_at: cached.computed_at,
            retrieved: format_age(cached.age()),
            players: cached.standings.rows(),
        }
    }
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and 1-based round number
#[derive(Deserialize)]
struct TournamentRoundPath {
    id: TournamentId,
    round: NonZeroUsize,
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "swiss-standings",
    })
}

/// Store one round's pairings (replaces earlier data for that round) and drop cached standings.
#[put("/api/tournaments/{id}/rounds/{round}")]
async fn api_put_round(
    rounds: RoundState,
    cache: CacheState,
    path: Path<TournamentRoundPath>,
    body: Json<Vec<MatchRecord>>,
) -> HttpResponse {
    let mut g = match rounds.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let count = g.put_round(&path.id, path.round, body.into_inner());
    let contiguous_rounds = g.contiguous_rounds(&path.id);
    cache.invalidate(&path.id);
    log::info!("Tournament {}: stored round {}", path.id, path.round);
    HttpResponse::Ok().json(RoundStoredResponse {
        tournament_id: path.id.clone(),
        round: path.round.get(),
        rounds: count,
        contiguous_rounds,
    })
}

/// Standings for a tournament: served from cache while fresh, otherwise recomputed.
#[get("/api/tournaments/{id}/standings")]
async fn api_get_standings(
    rounds: RoundState,
    cache: CacheState,
    config: ConfigState,
    path: Path<TournamentPath>,
) -> HttpResponse {
    if let Some(cached) = cache.fresh(&path.id) {
        return HttpResponse::Ok().json(StandingsResponse::new(&path.id, &cached));
    }
    let flight = match cache.begin(&path.id) {
        Some(flight) => flight,
        None => {
            return HttpResponse::Conflict()
                .json(serde_json::json!({ "error": "Standings are already being computed" }))
        }
    };
    // Another request may have finished between the cache check and the claim.
    if let Some(cached) = cache.fresh(&path.id) {
        return HttpResponse::Ok().json(StandingsResponse::new(&path.id, &cached));
    }

    let fetched = {
        let mut g = match rounds.write() {
            Ok(guard) => guard,
            Err(_) => return HttpResponse::InternalServerError().body("lock error"),
        };
        if !g.touch(&path.id) {
            return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }));
        }
        collect_rounds(&*g, &path.id, config.max_rounds).unwrap_or_else(|never| match never {})
    };

    let standings_config = config.standings;
    let computed = web::block(move || compute_standings(&fetched, &standings_config)).await;
    match computed {
        Ok(Ok(standings)) => {
            let cached = flight.complete(standings);
            HttpResponse::Ok().json(StandingsResponse::new(&path.id, &cached))
        }
        Ok(Err(e)) => {
            log::warn!("Tournament {}: {}", path.id, e);
            HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
        }
        Err(e) => {
            log::error!("Tournament {}: standings computation failed: {}", path.id, e);
            HttpResponse::InternalServerError().body("computation error")
        }
    }
}

/// Forget a tournament's rounds and cached standings.
#[delete("/api/tournaments/{id}")]
async fn api_delete_tournament(
    rounds: RoundState,
    cache: CacheState,
    path: Path<TournamentPath>,
) -> HttpResponse {
    let mut g = match rounds.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let removed = g.remove(&path.id);
    cache.invalidate(&path.id);
    if removed {
        HttpResponse::NoContent().finish()
    } else {
        HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
    }
}

/// Register every route and the JSON body limit. Shared state is added by the caller.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().limit(ROUND_BODY_LIMIT))
        .service(api_health)
        .service(api_put_round)
        .service(api_get_standings)
        .service(api_delete_tournament);
}
