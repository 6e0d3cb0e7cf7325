// Integration tests for the Travner HTTP API

use std::sync::Arc;

use actix_web::{http::StatusCode, test, web, App};
use serde_json::{json, Value};

use travner::config::MatchingSettings;
use travner::core::Matcher;
use travner::models::{FindMatchesResponse, Profile};
use travner::routes::{self, AppState};
use travner::services::{CacheError, CacheKey, CacheManager, InMemoryStore, ProfileStore};

fn traveler(id: &str, interests: &[&str], visited: &[&str], location: Option<&str>) -> Profile {
    Profile {
        id: id.to_string(),
        name: format!("Traveler {}", id),
        username: None,
        bio: None,
        profile_image: None,
        current_location: location.map(str::to_string),
        interests: interests.iter().map(|s| s.to_string()).collect(),
        visited_countries: visited.iter().map(|s| s.to_string()).collect(),
        is_verified: false,
        created_at: None,
    }
}

fn state_with(profiles: Vec<Profile>) -> AppState {
    state_from(Arc::new(InMemoryStore::with_profiles(profiles)), Arc::new(CacheManager::in_memory(100, 60)))
}

fn state_from(store: Arc<InMemoryStore>, cache: Arc<CacheManager>) -> AppState {
    AppState {
        store,
        cache,
        matcher: Matcher::with_default_weights(),
        matching: MatchingSettings::default(),
    }
}

fn find_request(user_id: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/matches/find")
        .set_json(json!({ "userId": user_id }))
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .configure(routes::configure_extractors)
                .configure(routes::configure_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn test_health() {
    let app = app!(state_with(vec![]));

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "healthy");
}

#[actix_web::test]
async fn test_scored_matches_end_to_end() {
    let app = app!(state_with(vec![
        traveler("viewer", &["Hiking", "Food"], &["Italy", "Spain"], Some("Paris, France")),
        traveler("paris", &["Hiking", "Food", "Art"], &["Italy"], Some("Paris, France")),
        traveler("hiker", &["Hiking"], &[], Some("Tokyo, Japan")),
        traveler("opera", &["Opera"], &[], Some("Paris, France")),
    ]));

    let plan = json!({
        "userId": "paris",
        "destination": "Porto, Portugal",
        "startDate": "2026-07-01",
        "endDate": "2026-07-08"
    });
    let req = test::TestRequest::post().uri("/api/v1/plans").set_json(&plan).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/api/v1/matches/find")
        .set_json(json!({ "userId": "viewer" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["mode"], "scored");
    // "opera" shares no interest and is filtered out by the store
    assert_eq!(body["totalCandidates"], 2);

    let matches = body["matches"].as_array().unwrap();
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0]["id"], "paris");
    assert_eq!(matches[0]["matchPercentage"], 44);
    assert_eq!(matches[0]["sharedInterests"], json!(["Hiking", "Food"]));
    assert_eq!(matches[0]["tripCount"], 1);
    assert_eq!(matches[1]["id"], "hiker");
    assert_eq!(matches[1]["matchPercentage"], 9);
    assert_eq!(matches[1]["tripCount"], 0);
}

#[actix_web::test]
async fn test_random_fallback_without_interests() {
    let mut profiles = vec![traveler("viewer", &[], &[], None)];
    profiles.extend((0..25).map(|i| traveler(&format!("t{}", i), &["Food"], &[], None)));
    let app = app!(state_with(profiles));

    let req = test::TestRequest::post()
        .uri("/api/v1/matches/find")
        .set_json(json!({ "userId": "viewer", "limit": 50 }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["mode"], "random");
    assert_eq!(body["totalCandidates"], 25);

    let matches = body["matches"].as_array().unwrap();
    assert_eq!(matches.len(), 10);
    assert!(matches.iter().all(|m| m.get("matchPercentage").is_none()));
    assert!(matches.iter().all(|m| m["id"] != "viewer"));
}

#[actix_web::test]
async fn test_unknown_viewer_is_not_found() {
    let app = app!(state_with(vec![]));

    let req = test::TestRequest::post()
        .uri("/api/v1/matches/find")
        .set_json(json!({ "userId": "nobody" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_invalid_json_is_bad_request() {
    let app = app!(state_with(vec![]));

    let req = test::TestRequest::post()
        .uri("/api/v1/matches/find")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_json");
}

#[actix_web::test]
async fn test_profile_update_refreshes_cached_matches() {
    let app = app!(state_with(vec![
        traveler("viewer", &["Food"], &[], None),
        traveler("other", &["Food"], &[], None),
    ]));

    let find = || {
        test::TestRequest::post()
            .uri("/api/v1/matches/find")
            .set_json(json!({ "userId": "viewer" }))
            .to_request()
    };

    let body: Value = test::call_and_read_body_json(&app, find()).await;
    assert_eq!(body["matches"][0]["matchPercentage"], 9);

    let update = json!({
        "name": "Other",
        "interests": ["Food"],
        "visitedCountries": [],
        "currentLocation": "Rome, Italy"
    });
    let req = test::TestRequest::put().uri("/api/v1/profiles/other").set_json(&update).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let update = json!({ "name": "Viewer", "interests": ["Food"], "currentLocation": "Milan, ITALY" });
    let req = test::TestRequest::put().uri("/api/v1/profiles/viewer").set_json(&update).to_request();
    let saved: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(saved["currentLocation"], "Milan, ITALY");

    let body: Value = test::call_and_read_body_json(&app, find()).await;
    assert_eq!(body["matches"][0]["matchPercentage"], 29);
}

#[actix_web::test]
async fn test_plan_validation() {
    let app = app!(state_with(vec![traveler("a", &[], &[], None)]));

    let backwards = json!({
        "userId": "a",
        "destination": "Hanoi, Vietnam",
        "startDate": "2026-09-10",
        "endDate": "2026-09-01"
    });
    let req = test::TestRequest::post().uri("/api/v1/plans").set_json(&backwards).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let orphan = json!({
        "userId": "ghost",
        "destination": "Hanoi, Vietnam",
        "startDate": "2026-09-01",
        "endDate": "2026-09-10"
    });
    let req = test::TestRequest::post().uri("/api/v1/plans").set_json(&orphan).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get().uri("/api/v1/users/a/plans").to_request();
    let plans: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(plans, json!([]));
}

#[actix_web::test]
async fn test_scored_matches_served_from_cache() {
    let store = Arc::new(InMemoryStore::with_profiles(vec![
        traveler("viewer", &["Food"], &[], None),
        traveler("other", &["Food"], &[], None),
    ]));
    let cache = Arc::new(CacheManager::in_memory(100, 60));
    let app = app!(state_from(store.clone(), cache.clone()));

    let first: Value = test::call_and_read_body_json(&app, find_request("viewer").to_request()).await;
    assert_eq!(first["matches"][0]["matchPercentage"], 9);

    let cached = cache.get::<FindMatchesResponse>(&CacheKey::matches("viewer", 10)).await;
    assert!(matches!(cached, Ok(FindMatchesResponse::Scored { .. })));

    // A write that skips the HTTP layer leaves the cached list in place
    store
        .upsert_profile(&traveler("other", &["Food"], &["Peru"], Some("Lima, Peru")))
        .await
        .unwrap();

    let second: Value = test::call_and_read_body_json(&app, find_request("viewer").to_request()).await;
    assert_eq!(second, first);
}

#[actix_web::test]
async fn test_random_fallback_is_not_cached() {
    let store = Arc::new(InMemoryStore::with_profiles(vec![
        traveler("viewer", &[], &[], None),
        traveler("other", &["Food"], &[], None),
    ]));
    let cache = Arc::new(CacheManager::in_memory(100, 60));
    let app = app!(state_from(store, cache.clone()));

    let body: Value = test::call_and_read_body_json(&app, find_request("viewer").to_request()).await;
    assert_eq!(body["mode"], "random");
    assert_eq!(body["totalCandidates"], 1);

    let cached = cache.get::<FindMatchesResponse>(&CacheKey::matches("viewer", 10)).await;
    assert!(matches!(cached, Err(CacheError::CacheMiss(_))));
}

#[actix_web::test]
async fn test_duplicate_username_is_conflict() {
    let mut alex = traveler("a", &[], &[], None);
    alex.username = Some("alex".to_string());
    let app = app!(state_with(vec![alex, traveler("b", &[], &[], None)]));

    let update = json!({ "name": "B", "username": "alex" });
    let req = test::TestRequest::put().uri("/api/v1/profiles/b").set_json(&update).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["statusCode"], 409);

    let req = test::TestRequest::get().uri("/api/v1/profiles/b").to_request();
    let saved: Value = test::call_and_read_body_json(&app, req).await;
    assert!(saved["username"].is_null());
}
