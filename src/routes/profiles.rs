use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{CreatePlanRequest, Profile, TravelPlan, UpsertProfileRequest};
use crate::routes::{store_error_response, validation_error_response, AppState};
use crate::services::CacheKey;

/// Configure profile and travel plan routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/profiles/{id}", web::get().to(get_profile))
        .route("/profiles/{id}", web::put().to(upsert_profile))
        .route("/plans", web::post().to(create_plan))
        .route("/users/{id}/plans", web::get().to(list_plans));
}

/// GET /api/v1/profiles/{id}
async fn get_profile(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    match state.store.get_profile(&path).await {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(e) => store_error_response("Failed to fetch profile", e),
    }
}

/// Create or replace a profile
///
/// PUT /api/v1/profiles/{id}
///
/// Verification status is not writable here; it is granted by the billing integration.
async fn upsert_profile(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<UpsertProfileRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error_response(errors);
    }

    let req = req.into_inner();
    let profile = Profile {
        id: path.into_inner(),
        name: req.name,
        username: req.username,
        bio: req.bio,
        profile_image: req.profile_image,
        current_location: req.current_location,
        interests: req.interests,
        visited_countries: req.visited_countries,
        is_verified: false,
        created_at: None,
    };

    if let Err(e) = state.store.upsert_profile(&profile).await {
        return store_error_response("Failed to save profile", e);
    }

    // Any profile change can move this traveler in everyone's rankings
    invalidate_matches(&state).await;

    match state.store.get_profile(&profile.id).await {
        Ok(saved) => HttpResponse::Ok().json(saved),
        Err(e) => store_error_response("Failed to fetch profile", e),
    }
}

/// Create a travel plan
///
/// POST /api/v1/plans
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "destination": "Lisbon, Portugal",
///   "startDate": "2026-05-01",
///   "endDate": "2026-05-10",
///   "description": "string"
/// }
/// ```
async fn create_plan(
    state: web::Data<AppState>,
    req: web::Json<CreatePlanRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error_response(errors);
    }

    let req = req.into_inner();
    let plan = TravelPlan {
        id: uuid::Uuid::new_v4(),
        user_id: req.user_id,
        destination: req.destination,
        start_date: req.start_date,
        end_date: req.end_date,
        description: req.description,
        created_at: chrono::Utc::now(),
    };

    if let Err(e) = state.store.create_plan(&plan).await {
        return store_error_response("Failed to create plan", e);
    }

    tracing::info!("Created plan {} for {}", plan.id, plan.user_id);

    // Trip counts in cached match lists are now stale
    invalidate_matches(&state).await;

    HttpResponse::Created().json(plan)
}

/// GET /api/v1/users/{id}/plans
async fn list_plans(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    match state.store.list_plans(&path).await {
        Ok(plans) => HttpResponse::Ok().json(plans),
        Err(e) => store_error_response("Failed to list plans", e),
    }
}

async fn invalidate_matches(state: &AppState) {
    if let Err(e) = state.cache.invalidate_pattern(CacheKey::all_matches()).await {
        tracing::warn!("Failed to invalidate cached matches: {}", e);
    }
}
