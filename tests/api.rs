//! Integration tests for the REST API: round submission, standings, errors, invalidation.

use actix_web::{
    http::StatusCode,
    test::{call_service, init_service, read_body_json, TestRequest},
    web::Data,
    App,
};
use serde_json::Value;
use std::sync::RwLock;
use std::time::Duration;
use swiss_standings::api::{self, CacheState, ConfigState, RoundState};
use swiss_standings::{MatchRecord, RoundStore, ServiceConfig, StandingsCache};

fn state() -> (RoundState, CacheState, ConfigState) {
    (
        Data::new(RwLock::new(RoundStore::new())),
        Data::new(StandingsCache::new(Duration::from_secs(3600))),
        Data::new(ServiceConfig::default()),
    )
}

macro_rules! app {
    ($rounds:expr, $cache:expr, $config:expr) => {
        init_service(
            App::new()
                .app_data($rounds.clone())
                .app_data($cache.clone())
                .app_data($config.clone())
                .configure(api::configure),
        )
        .await
    };
}

fn put_round(id: &str, round: usize, matches: Vec<MatchRecord>) -> TestRequest {
    TestRequest::put()
        .uri(&format!("/api/tournaments/{id}/rounds/{round}"))
        .set_json(matches)
}

fn get_standings(id: &str) -> TestRequest {
    TestRequest::get().uri(&format!("/api/tournaments/{id}/standings"))
}

#[actix_web::test]
async fn health_reports_ok() {
    let (rounds, cache, config) = state();
    let app = app!(rounds, cache, config);
    let resp = call_service(&app, TestRequest::get().uri("/api/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = read_body_json(resp).await;
    assert_eq!(body["ok"], true);
}

#[actix_web::test]
async fn submitted_round_produces_standings() {
    let (rounds, cache, config) = state();
    let app = app!(rounds, cache, config);

    let resp = call_service(
        &app,
        put_round("t1", 1, vec![MatchRecord::played("alice", "bob", "alice")]).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = read_body_json(resp).await;
    assert_eq!(body["rounds"], 1);
    assert_eq!(body["contiguous_rounds"], 1);

    let resp = call_service(&app, get_standings("t1").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = read_body_json(resp).await;
    assert_eq!(body["tournament_id"], "t1");
    assert_eq!(body["retrieved"], "just now");
    assert_eq!(body["players"][0]["player"], "alice");
    assert_eq!(body["players"][0]["min_score"], "1.250");
    assert_eq!(body["players"][1]["worst_rank"], 2);
}

#[actix_web::test]
async fn unknown_tournament_is_not_found() {
    let (rounds, cache, config) = state();
    let app = app!(rounds, cache, config);
    let resp = call_service(&app, get_standings("missing").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn bad_match_data_is_a_bad_request_with_message() {
    let (rounds, cache, config) = state();
    let app = app!(rounds, cache, config);
    call_service(
        &app,
        put_round("t1", 1, vec![MatchRecord::played("alice", "bob", "zed")]).to_request(),
    )
    .await;

    let resp = call_service(&app, get_standings("t1").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = read_body_json(resp).await;
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("Round 1, match 1"), "{}", message);
    assert!(message.contains("unknown outcome code"), "{}", message);
    assert!(cache.fresh("t1").is_none());
}

#[actix_web::test]
async fn running_computation_gives_conflict() {
    let (rounds, cache, config) = state();
    let app = app!(rounds, cache, config);
    call_service(
        &app,
        put_round("t1", 1, vec![MatchRecord::played("alice", "bob", "alice")]).to_request(),
    )
    .await;

    let flight = cache.begin("t1").unwrap();
    let resp = call_service(&app, get_standings("t1").to_request()).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    drop(flight);

    let resp = call_service(&app, get_standings("t1").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn resubmitted_round_invalidates_cached_standings() {
    let (rounds, cache, config) = state();
    let app = app!(rounds, cache, config);
    call_service(
        &app,
        put_round("t1", 1, vec![MatchRecord::played("alice", "bob", "alice")]).to_request(),
    )
    .await;
    let resp = call_service(&app, get_standings("t1").to_request()).await;
    let body: Value = read_body_json(resp).await;
    assert_eq!(body["players"][0]["player"], "alice");
    assert!(cache.fresh("t1").is_some());

    call_service(
        &app,
        put_round("t1", 1, vec![MatchRecord::played("alice", "bob", "bob")]).to_request(),
    )
    .await;
    assert!(cache.fresh("t1").is_none());
    let resp = call_service(&app, get_standings("t1").to_request()).await;
    let body: Value = read_body_json(resp).await;
    assert_eq!(body["players"][0]["player"], "bob");
}

#[actix_web::test]
async fn round_after_a_gap_is_reported_and_left_out() {
    let (rounds, cache, config) = state();
    let app = app!(rounds, cache, config);
    call_service(
        &app,
        put_round("t1", 1, vec![MatchRecord::played("alice", "bob", "alice")]).to_request(),
    )
    .await;
    let resp = call_service(
        &app,
        put_round("t1", 3, vec![MatchRecord::played("alice", "bob", "bob")]).to_request(),
    )
    .await;
    let body: Value = read_body_json(resp).await;
    assert_eq!(body["rounds"], 2);
    assert_eq!(body["contiguous_rounds"], 1);

    let resp = call_service(&app, get_standings("t1").to_request()).await;
    let body: Value = read_body_json(resp).await;
    assert_eq!(body["players"][0]["wins"], 1);
    assert_eq!(body["players"][0]["games_played"], 1);
}

#[actix_web::test]
async fn delete_drops_rounds_and_cache() {
    let (rounds, cache, config) = state();
    let app = app!(rounds, cache, config);
    call_service(
        &app,
        put_round("t1", 1, vec![MatchRecord::played("alice", "bob", "alice")]).to_request(),
    )
    .await;
    call_service(&app, get_standings("t1").to_request()).await;
    assert!(cache.fresh("t1").is_some());

    let delete = || TestRequest::delete().uri("/api/tournaments/t1").to_request();
    let resp = call_service(&app, delete()).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(cache.fresh("t1").is_none());

    let resp = call_service(&app, get_standings("t1").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let resp = call_service(&app, delete()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn round_zero_is_rejected() {
    let (rounds, cache, config) = state();
    let app = app!(rounds, cache, config);
    let resp = call_service(&app, put_round("t1", 0, vec![MatchRecord::bye("a")]).to_request()).await;
    assert!(resp.status().is_client_error());
    assert_eq!(rounds.read().unwrap().round_count("t1"), 0);
}
