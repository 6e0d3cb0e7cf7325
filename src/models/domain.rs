use serde::{Deserialize, Serialize};

/// Traveler profile with the public fields used for companion matching
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(rename = "profileImage", default)]
    pub profile_image: Option<String>,
    #[serde(rename = "currentLocation", default)]
    pub current_location: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(rename = "visitedCountries", default)]
    pub visited_countries: Vec<String>,
    #[serde(rename = "isVerified", default)]
    pub is_verified: bool,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Profile {
    /// Profiles without interests are served by the random fallback instead of the scorer
    pub fn has_interests(&self) -> bool {
        !self.interests.is_empty()
    }
}

/// Scored candidate returned by the matcher
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(flatten)]
    pub profile: Profile,
    #[serde(rename = "matchPercentage")]
    pub match_percentage: u8,
    #[serde(rename = "sharedInterests")]
    pub shared_interests: Vec<String>,
    #[serde(rename = "tripCount")]
    pub trip_count: u32,
}

/// Randomly sampled candidate, used when the viewer has no interests to score against
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(flatten)]
    pub profile: Profile,
    #[serde(rename = "tripCount")]
    pub trip_count: u32,
}

/// A trip a traveler is planning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelPlan {
    pub id: uuid::Uuid,
    #[serde(rename = "userId")]
    pub user_id: String,
    pub destination: String,
    #[serde(rename = "startDate")]
    pub start_date: chrono::NaiveDate,
    #[serde(rename = "endDate")]
    pub end_date: chrono::NaiveDate,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Scoring weights and overlap caps
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub interests: f64,
    pub location: f64,
    pub visited: f64,
    pub max_shared_interests: usize,
    pub max_shared_visited: usize,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            interests: 60.0,
            location: 20.0,
            visited: 20.0,
            max_shared_interests: 7,
            max_shared_visited: 3,
        }
    }
}
