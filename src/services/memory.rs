use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::models::{Profile, TravelPlan};
use crate::services::store::{ProfileStore, StoreError};

#[derive(Default)]
struct Tables {
    // Insertion order stands in for created_at ordering
    profiles: Vec<Profile>,
    plans: Vec<TravelPlan>,
}

/// Process-local profile store for tests and database-less runs
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with profiles
    pub fn with_profiles(profiles: Vec<Profile>) -> Self {
        Self {
            tables: RwLock::new(Tables {
                profiles,
                plans: vec![],
            }),
        }
    }
}

#[async_trait]
impl ProfileStore for InMemoryStore {
    async fn get_profile(&self, user_id: &str) -> Result<Profile, StoreError> {
        self.tables
            .read()
            .profiles
            .iter()
            .find(|p| p.id == user_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("Profile not found for user {}", user_id)))
    }

    async fn upsert_profile(&self, profile: &Profile) -> Result<(), StoreError> {
        let mut tables = self.tables.write();

        if let Some(username) = &profile.username {
            let taken = tables
                .profiles
                .iter()
                .any(|p| p.id != profile.id && p.username.as_ref() == Some(username));
            if taken {
                return Err(StoreError::Conflict(format!("Username {} is already taken", username)));
            }
        }

        match tables.profiles.iter_mut().find(|p| p.id == profile.id) {
            Some(existing) => {
                *existing = Profile {
                    is_verified: existing.is_verified,
                    created_at: existing.created_at,
                    ..profile.clone()
                };
            }
            None => {
                tables.profiles.push(Profile {
                    created_at: Some(chrono::Utc::now()),
                    ..profile.clone()
                });
            }
        }
        Ok(())
    }

    async fn query_candidates(
        &self,
        user_id: &str,
        interests: &[String],
        limit: usize,
    ) -> Result<Vec<Profile>, StoreError> {
        let tables = self.tables.read();

        Ok(tables
            .profiles
            .iter()
            .rev()
            .filter(|p| p.id != user_id)
            .filter(|p| interests.is_empty() || p.interests.iter().any(|i| interests.contains(i)))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count_trips(&self, user_ids: &[String]) -> Result<HashMap<String, u32>, StoreError> {
        let tables = self.tables.read();

        Ok(user_ids
            .iter()
            .map(|id| {
                let count = tables.plans.iter().filter(|plan| &plan.user_id == id).count();
                (id.clone(), u32::try_from(count).unwrap_or(u32::MAX))
            })
            .collect())
    }

    async fn create_plan(&self, plan: &TravelPlan) -> Result<(), StoreError> {
        let mut tables = self.tables.write();

        if !tables.profiles.iter().any(|p| p.id == plan.user_id) {
            return Err(StoreError::NotFound(format!("Profile not found for user {}", plan.user_id)));
        }
        if plan.end_date < plan.start_date {
            return Err(StoreError::InvalidInput("endDate is before startDate".to_string()));
        }

        tables.plans.push(plan.clone());
        Ok(())
    }

    async fn list_plans(&self, user_id: &str) -> Result<Vec<TravelPlan>, StoreError> {
        let tables = self.tables.read();

        let mut plans: Vec<TravelPlan> = tables
            .plans
            .iter()
            .filter(|plan| plan.user_id == user_id)
            .cloned()
            .collect();
        plans.sort_by(|a, b| b.start_date.cmp(&a.start_date));

        Ok(plans)
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}
