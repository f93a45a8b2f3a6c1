// Core algorithm exports
pub mod ranker;
pub mod scoring;

pub use ranker::{compare_ranked, ExportSummary, Ranker};
pub use scoring::{calculate_compatibility, sanitise_score, CompatibilityScorer, WeightedScorer};
