use std::collections::HashSet;

use crate::models::Profile;

/// Interests of the candidate that the viewer also lists
///
/// Keeps the candidate's ordering. Repeated tags in the candidate list are reported once.
pub fn shared_interests(candidate: &Profile, viewer: &Profile) -> Vec<String> {
    let wanted: HashSet<&str> = viewer.interests.iter().map(String::as_str).collect();
    let mut seen = HashSet::new();

    candidate
        .interests
        .iter()
        .map(String::as_str)
        .filter(|interest| wanted.contains(interest) && seen.insert(*interest))
        .map(str::to_string)
        .collect()
}

/// Number of distinct countries both travelers have visited
#[inline]
pub fn shared_visited_count(candidate: &Profile, viewer: &Profile) -> usize {
    let visited: HashSet<&str> = viewer.visited_countries.iter().map(String::as_str).collect();

    candidate
        .visited_countries
        .iter()
        .map(String::as_str)
        .filter(|country| visited.contains(country))
        .collect::<HashSet<_>>()
        .len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(id: &str, interests: &[&str], visited: &[&str]) -> Profile {
        Profile {
            id: id.to_string(),
            name: format!("Traveler {}", id),
            username: None,
            bio: None,
            profile_image: None,
            current_location: None,
            interests: interests.iter().map(|s| s.to_string()).collect(),
            visited_countries: visited.iter().map(|s| s.to_string()).collect(),
            is_verified: false,
            created_at: None,
        }
    }

    #[test]
    fn test_shared_interests_keep_candidate_order() {
        let viewer = profile("v", &["Food", "Hiking", "Museums"], &[]);
        let candidate = profile("c", &["Museums", "Art", "Hiking"], &[]);

        assert_eq!(shared_interests(&candidate, &viewer), vec!["Museums", "Hiking"]);
    }

    #[test]
    fn test_shared_interests_are_exact_matches() {
        let viewer = profile("v", &["hiking"], &[]);
        let candidate = profile("c", &["Hiking"], &[]);

        assert!(shared_interests(&candidate, &viewer).is_empty());
    }

    #[test]
    fn test_duplicate_tags_counted_once() {
        let viewer = profile("v", &["Food"], &["Peru"]);
        let candidate = profile("c", &["Food", "Food"], &["Peru", "Peru"]);

        assert_eq!(shared_interests(&candidate, &viewer), vec!["Food"]);
        assert_eq!(shared_visited_count(&candidate, &viewer), 1);
    }

    #[test]
    fn test_shared_visited_count() {
        let viewer = profile("v", &[], &["Japan", "Peru", "Kenya"]);
        let candidate = profile("c", &[], &["Kenya", "Chile", "Japan"]);

        assert_eq!(shared_visited_count(&candidate, &viewer), 2);
    }
}
