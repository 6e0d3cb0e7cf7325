// Core algorithm exports
pub mod filters;
pub mod location;
pub mod matcher;
pub mod scoring;

pub use filters::{shared_interests, shared_visited_count};
pub use location::{country_token, same_country};
pub use matcher::{Matcher, MatchOutcome};
pub use scoring::calculate_match_score;
