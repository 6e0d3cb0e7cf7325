// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Profile, MatchResult, Suggestion, TravelPlan, ScoringWeights};
pub use requests::{FindMatchesRequest, UpsertProfileRequest, CreatePlanRequest};
pub use responses::{FindMatchesResponse, HealthResponse, ErrorResponse};
