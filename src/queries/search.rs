use std::path::Path;

use crate::core::scoring::eq_ignore_case;
use crate::models::{Candidate, ScoredCandidate};
use crate::snapshot::{read_rows, SnapshotRow};
use super::filter::resolve_rows;

/// Check a snapshot row against the type and optional breed
///
/// Both comparisons are exact but case-insensitive. An empty or absent breed
/// matches every breed of the type.
#[inline]
pub fn matches_type_and_breed(row: &SnapshotRow, pet_type: &str, breed: Option<&str>) -> bool {
    if !eq_ignore_case(&row.pet_type, pet_type) {
        return false;
    }

    match breed.filter(|b| !b.is_empty()) {
        Some(breed) => eq_ignore_case(&row.breed, breed),
        None => true,
    }
}

/// Candidates of `pet_type` (and `breed`, when given) with their scores, in snapshot order
pub fn search(
    pet_type: &str,
    breed: Option<&str>,
    snapshot: &Path,
    catalog: &[Candidate],
) -> Vec<ScoredCandidate> {
    let rows = read_rows(snapshot);
    let results = resolve_rows(
        rows.iter()
            .filter(|row| matches_type_and_breed(row, pet_type, breed)),
        catalog,
    );

    tracing::debug!(
        "Search type={:?} breed={:?} matched {} of {} rows",
        pet_type,
        breed,
        results.len(),
        rows.len()
    );
    results
}
