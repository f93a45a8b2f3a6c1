// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Candidate, Profile, ScoredCandidate, ScoringWeights, TraitCode, ANY_GENDER, TRAIT_AXES};
pub use requests::{RankRequest, RecommendedQuery, SearchQuery, TraitAnswers};
pub use responses::{BestMatchResponse, ErrorResponse, HealthResponse, MatchListResponse, RankResponse};
