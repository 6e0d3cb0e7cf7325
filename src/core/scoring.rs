use crate::models::{Profile, ScoringWeights};
use crate::core::{
    filters::{shared_interests, shared_visited_count},
    location::same_country,
};

/// Calculate a match percentage (0-100) between a candidate and the viewer
///
/// Scoring formula with default weights:
/// score = round(
///     min(shared_interests, 7) / 7 * 60 +   # Common interests
///     same_country * 20 +                   # Same country token in current location
///     min(shared_visited, 3) / 3 * 20       # Countries both have visited
/// )
///
/// Returns the percentage and the candidate's interests shared with the viewer.
pub fn calculate_match_score(
    candidate: &Profile,
    viewer: &Profile,
    weights: &ScoringWeights,
) -> (u8, Vec<String>) {
    let shared = shared_interests(candidate, viewer);

    let interest_score = capped_ratio(shared.len(), weights.max_shared_interests) * weights.interests;

    let location_score = if same_country(
        candidate.current_location.as_deref(),
        viewer.current_location.as_deref(),
    ) {
        weights.location
    } else {
        0.0
    };

    let visited_score = capped_ratio(
        shared_visited_count(candidate, viewer),
        weights.max_shared_visited,
    ) * weights.visited;

    // f64::round rounds half away from zero
    let total = (interest_score + location_score + visited_score).round();

    (total.clamp(0.0, 100.0) as u8, shared)
}

/// Overlap count divided by its cap, saturating at 1.0
#[inline]
fn capped_ratio(count: usize, cap: usize) -> f64 {
    if cap == 0 {
        return 0.0;
    }
    count.min(cap) as f64 / cap as f64
}
