use std::collections::HashMap;
use std::sync::Arc;

use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::config::MatchingSettings;
use crate::core::Matcher;
use crate::models::{FindMatchesRequest, FindMatchesResponse, HealthResponse};
use crate::routes::{store_error_response, validation_error_response};
use crate::services::{CacheKey, CacheManager, ProfileStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProfileStore>,
    pub cache: Arc<CacheManager>,
    pub matcher: Matcher,
    pub matching: MatchingSettings,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/find", web::post().to(find_matches));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store_healthy = state.store.health_check().await.unwrap_or(false);

    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Find travel companions
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "limit": 10
/// }
/// ```
///
/// Viewers with interests receive a ranked list (`"mode": "scored"`); viewers
/// without interests receive a random sample (`"mode": "random"`).
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<FindMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_matches request: {:?}", errors);
        return validation_error_response(errors);
    }

    let user_id = &req.user_id;
    let limit = state.matching.effective_limit(req.limit);

    tracing::info!("Finding matches for user: {}, limit: {}", user_id, limit);

    let viewer = match state.store.get_profile(user_id).await {
        Ok(profile) => profile,
        Err(e) => return store_error_response("Failed to fetch user profile", e),
    };

    let response = if viewer.has_interests() {
        let cache_key = CacheKey::matches(user_id, limit);
        if let Ok(cached) = state.cache.get::<FindMatchesResponse>(&cache_key).await {
            tracing::debug!("Serving cached matches for {}", user_id);
            return HttpResponse::Ok().json(cached);
        }

        // Read before the store so a concurrent write invalidates this result
        let generation = state.cache.generation();

        let candidates = match state
            .store
            .query_candidates(user_id, &viewer.interests, state.matching.pool_size(true))
            .await
        {
            Ok(candidates) => candidates,
            Err(e) => return store_error_response("Failed to query candidates", e),
        };

        tracing::debug!("Found {} candidates for {}", candidates.len(), user_id);

        let mut result = state.matcher.find_matches(&viewer, candidates, limit);

        let ids: Vec<String> = result.matches.iter().map(|m| m.profile.id.clone()).collect();
        let trips = trip_counts(&state, &ids).await;
        for m in &mut result.matches {
            m.trip_count = trips.get(&m.profile.id).copied().unwrap_or(0);
        }

        let response = FindMatchesResponse::Scored {
            total_candidates: result.total_candidates,
            matches: result.matches,
        };

        if let Err(e) = state.cache.set_if_current(&cache_key, &response, generation).await {
            tracing::warn!("Failed to cache matches for {}: {}", user_id, e);
        }

        response
    } else {
        let candidates = match state
            .store
            .query_candidates(user_id, &[], state.matching.pool_size(false))
            .await
        {
            Ok(candidates) => candidates,
            Err(e) => return store_error_response("Failed to query candidates", e),
        };

        let total_candidates = candidates.iter().filter(|c| c.id != *user_id).count();
        let mut suggestions = {
            let mut rng = rand::rng();
            state.matcher.sample_random(user_id, candidates, limit, &mut rng)
        };

        let ids: Vec<String> = suggestions.iter().map(|s| s.profile.id.clone()).collect();
        let trips = trip_counts(&state, &ids).await;
        for s in &mut suggestions {
            s.trip_count = trips.get(&s.profile.id).copied().unwrap_or(0);
        }

        FindMatchesResponse::Random {
            matches: suggestions,
            total_candidates,
        }
    };

    HttpResponse::Ok().json(response)
}

/// Trip counts are decoration; a failed lookup reports zero trips instead of failing the request
async fn trip_counts(state: &AppState, user_ids: &[String]) -> HashMap<String, u32> {
    if user_ids.is_empty() {
        return HashMap::new();
    }

    match state.store.count_trips(user_ids).await {
        Ok(counts) => counts,
        Err(e) => {
            tracing::warn!("Failed to count trips, reporting zero: {}", e);
            HashMap::new()
        }
    }
}

