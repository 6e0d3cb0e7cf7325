use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Request to find travel companions
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMatchesRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Request body for creating or replacing a profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpsertProfileRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 50))]
    #[serde(default)]
    pub username: Option<String>,
    #[validate(length(max = 1000))]
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(alias = "profile_image", rename = "profileImage", default)]
    pub profile_image: Option<String>,
    #[serde(alias = "current_location", rename = "currentLocation", default)]
    pub current_location: Option<String>,
    #[validate(length(max = 50))]
    #[serde(default)]
    pub interests: Vec<String>,
    #[validate(length(max = 250))]
    #[serde(alias = "visited_countries", rename = "visitedCountries", default)]
    pub visited_countries: Vec<String>,
}

/// Request to create a travel plan
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_plan_dates"))]
pub struct CreatePlanRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[validate(length(min = 1, max = 200))]
    pub destination: String,
    #[serde(alias = "start_date", rename = "startDate")]
    pub start_date: chrono::NaiveDate,
    #[serde(alias = "end_date", rename = "endDate")]
    pub end_date: chrono::NaiveDate,
    #[validate(length(max = 2000))]
    #[serde(default)]
    pub description: Option<String>,
}

fn validate_plan_dates(req: &CreatePlanRequest) -> Result<(), ValidationError> {
    if req.end_date < req.start_date {
        return Err(ValidationError::new("end_before_start"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_request_defaults() {
        let req: FindMatchesRequest = serde_json::from_str(r#"{"userId": "u1"}"#).unwrap();
        assert_eq!(req.limit, None);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_find_request_rejects_empty_user() {
        let req: FindMatchesRequest = serde_json::from_str(r#"{"userId": ""}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_plan_dates_must_be_ordered() {
        let req: CreatePlanRequest = serde_json::from_str(
            r#"{"userId": "u1", "destination": "Lisbon", "startDate": "2026-05-10", "endDate": "2026-05-01"}"#,
        )
        .unwrap();
        assert!(req.validate().is_err());

        let ok = CreatePlanRequest {
            end_date: chrono::NaiveDate::from_ymd_opt(2026, 5, 12).unwrap(),
            ..req
        };
        assert!(ok.validate().is_ok());
    }
}
