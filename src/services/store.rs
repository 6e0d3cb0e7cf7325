use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Profile, TravelPlan};

/// Errors that can occur when reading or writing traveler data
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Persistent source of profiles, travel plans and trip counts
///
/// The matcher never talks to the store directly; route handlers fetch through
/// this trait and hand plain data to the core.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetch a single profile by id
    async fn get_profile(&self, user_id: &str) -> Result<Profile, StoreError>;

    /// Create the profile or replace an existing one with the same id
    ///
    /// A username already held by another profile fails with `StoreError::Conflict`.
    async fn upsert_profile(&self, profile: &Profile) -> Result<(), StoreError>;

    /// Fetch up to `limit` candidates other than `user_id`, newest first
    ///
    /// A non-empty `interests` slice restricts the pool to travelers sharing at
    /// least one of them.
    async fn query_candidates(
        &self,
        user_id: &str,
        interests: &[String],
        limit: usize,
    ) -> Result<Vec<Profile>, StoreError>;

    /// Number of travel plans per user; users without plans map to 0
    async fn count_trips(&self, user_ids: &[String]) -> Result<HashMap<String, u32>, StoreError>;

    /// Store a new travel plan. The owner must exist.
    async fn create_plan(&self, plan: &TravelPlan) -> Result<(), StoreError>;

    /// Plans of a user, latest start date first
    async fn list_plans(&self, user_id: &str) -> Result<Vec<TravelPlan>, StoreError>;

    async fn health_check(&self) -> Result<bool, StoreError>;
}
