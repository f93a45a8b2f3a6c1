//! PetMatch - pet compatibility ranking
//!
//! This library scores a catalog of pets against one person's profile, ranks
//! them with a deterministic tie-break cascade, and exports the ranking as a
//! flat snapshot file that the best-match, threshold and search queries read
//! back.

pub mod config;
pub mod core;
pub mod models;
pub mod queries;
pub mod routes;
pub mod services;
pub mod snapshot;

// Re-export commonly used types
pub use crate::core::{calculate_compatibility, CompatibilityScorer, Ranker, WeightedScorer};
pub use models::{Candidate, Profile, ScoredCandidate, ScoringWeights, TraitCode};
pub use queries::{above_threshold, best_match, evaluate_best_match, search, BestMatch};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let ranker: Ranker = Ranker::default();
        assert_eq!(*ranker.scorer().weights(), ScoringWeights::default());
    }
}
