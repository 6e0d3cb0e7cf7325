//! Travner - travel companion matching service
//!
//! This library provides the companion matching core used by Travner together with
//! the HTTP routes, profile store and cache that serve it.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Matcher, MatchOutcome, calculate_match_score, country_token};
pub use crate::models::{Profile, MatchResult, Suggestion, ScoringWeights, FindMatchesRequest, FindMatchesResponse};
