use std::path::Path;

use crate::models::{Candidate, ScoredCandidate};
use crate::snapshot::read_first_row;

/// Minimum score for a best match to be recommended
pub const DEFAULT_BEST_MATCH_THRESHOLD: f64 = 0.80;

/// Outcome of a best-match lookup
#[derive(Debug, Clone, PartialEq)]
pub enum BestMatch {
    /// Top candidate clears the threshold
    Match(ScoredCandidate),
    /// Top candidate exists but scores below the threshold
    BelowThreshold(ScoredCandidate),
    /// No readable first row, or its key is not in the catalog
    NoData,
}

impl BestMatch {
    /// Collapse to the candidate only when it meets the threshold
    pub fn into_candidate(self) -> Option<Candidate> {
        match self {
            BestMatch::Match(scored) => Some(scored.candidate),
            _ => None,
        }
    }

    /// Top scored candidate regardless of the threshold
    pub fn top(&self) -> Option<&ScoredCandidate> {
        match self {
            BestMatch::Match(scored) | BestMatch::BelowThreshold(scored) => Some(scored),
            BestMatch::NoData => None,
        }
    }

    pub fn meets_threshold(&self) -> bool {
        matches!(self, BestMatch::Match(_))
    }

    /// Short status label used in responses
    pub fn status(&self) -> &'static str {
        match self {
            BestMatch::Match(_) => "match",
            BestMatch::BelowThreshold(_) => "below_threshold",
            BestMatch::NoData => "none",
        }
    }
}

/// Inspect the first snapshot row against `threshold`
///
/// The snapshot is already ranked; only its first data row is read.
pub fn evaluate_best_match(snapshot: &Path, catalog: &[Candidate], threshold: f64) -> BestMatch {
    let Some(row) = read_first_row(snapshot) else {
        return BestMatch::NoData;
    };

    let Some(candidate) = row.resolve(catalog) else {
        return BestMatch::NoData;
    };

    let scored = ScoredCandidate::new(candidate.clone(), row.score());
    if scored.score >= threshold {
        BestMatch::Match(scored)
    } else {
        tracing::info!(
            "Best match {} scores {}%, below the {:.0}% threshold",
            row.name,
            row.percent,
            threshold * 100.0
        );
        BestMatch::BelowThreshold(scored)
    }
}

/// The top candidate when it scores at least 0.80, otherwise `None`
pub fn best_match(snapshot: &Path, catalog: &[Candidate]) -> Option<Candidate> {
    evaluate_best_match(snapshot, catalog, DEFAULT_BEST_MATCH_THRESHOLD).into_candidate()
}
