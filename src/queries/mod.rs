// Snapshot query exports
pub mod best_match;
pub mod filter;
pub mod search;

pub use best_match::{best_match, evaluate_best_match, BestMatch, DEFAULT_BEST_MATCH_THRESHOLD};
pub use filter::{above_threshold, above_threshold_scored, all_scored, DEFAULT_RECOMMEND_THRESHOLD};
pub use search::{matches_type_and_breed, search};
