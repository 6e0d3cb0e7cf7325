use rand::{seq::SliceRandom, Rng};

use crate::models::{Profile, MatchResult, Suggestion, ScoringWeights};
use crate::core::scoring::calculate_match_score;

/// Result of the matching process
#[derive(Debug)]
pub struct MatchOutcome {
    pub matches: Vec<MatchResult>,
    pub total_candidates: usize,
}

/// Ranks candidate travel companions for a viewer
///
/// The matcher is stateless apart from its weights; every call is a pure function
/// of its inputs and can run concurrently from any number of request handlers.
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    /// Score and rank every candidate against the viewer
    ///
    /// Candidates sharing the viewer's id are dropped. The sort is stable, so
    /// candidates with equal percentages keep their input order. `trip_count` is
    /// left at zero for the caller to fill in.
    pub fn rank(&self, viewer: &Profile, candidates: Vec<Profile>) -> Vec<MatchResult> {
        let mut results: Vec<MatchResult> = candidates
            .into_iter()
            .filter(|candidate| candidate.id != viewer.id)
            .map(|candidate| {
                let (match_percentage, shared_interests) =
                    calculate_match_score(&candidate, viewer, &self.weights);

                MatchResult {
                    profile: candidate,
                    match_percentage,
                    shared_interests,
                    trip_count: 0,
                }
            })
            .collect();

        results.sort_by(|a, b| b.match_percentage.cmp(&a.match_percentage));
        results
    }

    /// Rank candidates and keep the best `limit`
    ///
    /// `total_candidates` counts the scored pool, after the viewer is dropped.
    pub fn find_matches(
        &self,
        viewer: &Profile,
        candidates: Vec<Profile>,
        limit: usize,
    ) -> MatchOutcome {
        let mut matches = self.rank(viewer, candidates);
        let total_candidates = matches.len();
        matches.truncate(limit);

        MatchOutcome {
            matches,
            total_candidates,
        }
    }

    /// Pick up to `n` candidates uniformly at random, without scoring
    ///
    /// Used for viewers who have not listed any interests. The randomness source is
    /// injected so callers can seed it.
    pub fn sample_random<R: Rng + ?Sized>(
        &self,
        viewer_id: &str,
        candidates: Vec<Profile>,
        n: usize,
        rng: &mut R,
    ) -> Vec<Suggestion> {
        let mut pool: Vec<Profile> = candidates
            .into_iter()
            .filter(|candidate| candidate.id != viewer_id)
            .collect();

        pool.shuffle(rng);
        pool.truncate(n);

        pool.into_iter()
            .map(|profile| Suggestion {
                profile,
                trip_count: 0,
            })
            .collect()
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
