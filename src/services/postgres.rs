use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;

use crate::models::{Profile, TravelPlan};
use crate::services::store::{ProfileStore, StoreError};

/// PostgreSQL-backed profile store
///
/// Owns the `users` and `travel_plans` tables. Migrations run on connect.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new PostgreSQL store from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL store from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }
}

const PROFILE_COLUMNS: &str = r#"
    id, name, username, bio, profile_image, current_location,
    interests, visited_countries, is_verified, created_at
"#;

fn profile_from_row(row: &PgRow) -> Profile {
    Profile {
        id: row.get("id"),
        name: row.get("name"),
        username: row.get("username"),
        bio: row.get("bio"),
        profile_image: row.get("profile_image"),
        current_location: row.get("current_location"),
        interests: row.get("interests"),
        visited_countries: row.get("visited_countries"),
        is_verified: row.get("is_verified"),
        created_at: row.get("created_at"),
    }
}

/// COUNT(*) is a BIGINT; saturate instead of wrapping
fn trip_count_from(count: i64) -> u32 {
    u32::try_from(count.max(0)).unwrap_or(u32::MAX)
}

fn plan_from_row(row: &PgRow) -> TravelPlan {
    TravelPlan {
        id: row.get("id"),
        user_id: row.get("user_id"),
        destination: row.get("destination"),
        start_date: row.get("start_date"),
        end_date: row.get("end_date"),
        description: row.get("description"),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl ProfileStore for PostgresStore {
    async fn get_profile(&self, user_id: &str) -> Result<Profile, StoreError> {
        let query = format!("SELECT {} FROM users WHERE id = $1", PROFILE_COLUMNS);

        let row = sqlx::query(&query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("Profile not found for user {}", user_id)))?;

        Ok(profile_from_row(&row))
    }

    /// Uses INSERT ... ON CONFLICT so repeated saves overwrite the public fields.
    /// Verification status is owned by billing and never changed here.
    async fn upsert_profile(&self, profile: &Profile) -> Result<(), StoreError> {
        let query = r#"
            INSERT INTO users (
                id, name, username, bio, profile_image, current_location,
                interests, visited_countries, is_verified, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, NOW())
            ON CONFLICT (id)
            DO UPDATE SET
                name = EXCLUDED.name,
                username = EXCLUDED.username,
                bio = EXCLUDED.bio,
                profile_image = EXCLUDED.profile_image,
                current_location = EXCLUDED.current_location,
                interests = EXCLUDED.interests,
                visited_countries = EXCLUDED.visited_countries
        "#;

        sqlx::query(query)
            .bind(&profile.id)
            .bind(&profile.name)
            .bind(&profile.username)
            .bind(&profile.bio)
            .bind(&profile.profile_image)
            .bind(&profile.current_location)
            .bind(&profile.interests)
            .bind(&profile.visited_countries)
            .bind(profile.is_verified)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Conflict(
                    format!("Username {} is already taken", profile.username.as_deref().unwrap_or_default()),
                ),
                other => StoreError::Database(other),
            })?;

        tracing::debug!("Upserted profile {}", profile.id);

        Ok(())
    }

    async fn query_candidates(
        &self,
        user_id: &str,
        interests: &[String],
        limit: usize,
    ) -> Result<Vec<Profile>, StoreError> {
        let rows = if interests.is_empty() {
            let query = format!(
                "SELECT {} FROM users WHERE id <> $1 ORDER BY created_at DESC LIMIT $2",
                PROFILE_COLUMNS
            );
            sqlx::query(&query)
                .bind(user_id)
                .bind(limit as i64)
                .fetch_all(&self.pool)
                .await?
        } else {
            // && is the array overlap operator
            let query = format!(
                "SELECT {} FROM users WHERE id <> $1 AND interests && $2 ORDER BY created_at DESC LIMIT $3",
                PROFILE_COLUMNS
            );
            sqlx::query(&query)
                .bind(user_id)
                .bind(interests)
                .bind(limit as i64)
                .fetch_all(&self.pool)
                .await?
        };

        let profiles: Vec<Profile> = rows.iter().map(profile_from_row).collect();

        tracing::debug!("Queried {} candidates for {}", profiles.len(), user_id);

        Ok(profiles)
    }

    async fn count_trips(&self, user_ids: &[String]) -> Result<HashMap<String, u32>, StoreError> {
        let query = r#"
            SELECT user_id, COUNT(*) AS trip_count
            FROM travel_plans
            WHERE user_id = ANY($1)
            GROUP BY user_id
        "#;

        let rows = sqlx::query(query).bind(user_ids).fetch_all(&self.pool).await?;

        let mut counts: HashMap<String, u32> =
            user_ids.iter().map(|id| (id.clone(), 0)).collect();

        for row in &rows {
            let count: i64 = row.get("trip_count");
            counts.insert(row.get("user_id"), trip_count_from(count));
        }

        Ok(counts)
    }

    async fn create_plan(&self, plan: &TravelPlan) -> Result<(), StoreError> {
        let query = r#"
            INSERT INTO travel_plans (id, user_id, destination, start_date, end_date, description, created_at)
            SELECT $1, $2, $3, $4, $5, $6, $7
            WHERE EXISTS (SELECT 1 FROM users WHERE id = $2)
        "#;

        let result = sqlx::query(query)
            .bind(plan.id)
            .bind(&plan.user_id)
            .bind(&plan.destination)
            .bind(plan.start_date)
            .bind(plan.end_date)
            .bind(&plan.description)
            .bind(plan.created_at)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("Profile not found for user {}", plan.user_id)));
        }

        tracing::debug!("Created plan {} for {}", plan.id, plan.user_id);

        Ok(())
    }

    async fn list_plans(&self, user_id: &str) -> Result<Vec<TravelPlan>, StoreError> {
        let query = r#"
            SELECT id, user_id, destination, start_date, end_date, description, created_at
            FROM travel_plans
            WHERE user_id = $1
            ORDER BY start_date DESC
        "#;

        let rows = sqlx::query(query).bind(user_id).fetch_all(&self.pool).await?;

        Ok(rows.iter().map(plan_from_row).collect())
    }

    /// Health check for the database connection
    async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
