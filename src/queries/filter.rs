use std::path::Path;

use crate::models::{Candidate, ScoredCandidate};
use crate::snapshot::{read_rows, SnapshotRow};

/// Default cut-off for recommended candidates (exclusive)
pub const DEFAULT_RECOMMEND_THRESHOLD: f64 = 0.80;

/// Candidates scoring strictly above `threshold`, in snapshot order
pub fn above_threshold(snapshot: &Path, catalog: &[Candidate], threshold: f64) -> Vec<Candidate> {
    above_threshold_scored(snapshot, catalog, threshold)
        .into_iter()
        .map(|scored| scored.candidate)
        .collect()
}

/// Same as [`above_threshold`], keeping each snapshot score
pub fn above_threshold_scored(
    snapshot: &Path,
    catalog: &[Candidate],
    threshold: f64,
) -> Vec<ScoredCandidate> {
    resolve_rows(
        read_rows(snapshot).iter().filter(|row| row.score() > threshold),
        catalog,
    )
}

/// Every resolvable snapshot row with its score, in snapshot order
pub fn all_scored(snapshot: &Path, catalog: &[Candidate]) -> Vec<ScoredCandidate> {
    resolve_rows(read_rows(snapshot).iter(), catalog)
}

/// Resolve rows to catalog candidates, dropping rows whose key is unknown
pub(crate) fn resolve_rows<'a, I>(rows: I, catalog: &[Candidate]) -> Vec<ScoredCandidate>
where
    I: IntoIterator<Item = &'a SnapshotRow>,
{
    rows.into_iter()
        .filter_map(|row| {
            row.resolve(catalog)
                .map(|candidate| ScoredCandidate::new(candidate.clone(), row.score()))
        })
        .collect()
}
