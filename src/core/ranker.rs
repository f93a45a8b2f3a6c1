use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use crate::core::scoring::{
    capped_ratio, energy_difference, gender_priority, sanitise_score, trait_match_count,
    yard_compatible, CompatibilityScorer, WeightedScorer,
};
use crate::models::{Candidate, Profile, ScoredCandidate, ScoringWeights};
use crate::snapshot::{write_snapshot, SnapshotError};

/// Result of a ranking export
#[derive(Debug)]
pub struct ExportSummary {
    pub rows: usize,
    pub path: PathBuf,
    /// Leading candidates of the run, best first
    pub top: Vec<ScoredCandidate>,
}

/// Ranking orchestrator: score, order, export
///
/// # Pipeline Stages
/// 1. Score every candidate (nothing is filtered out)
/// 2. Order by score, then the tie-break cascade
/// 3. Overwrite the snapshot file with the ordered rows
#[derive(Debug, Clone)]
pub struct Ranker<S = WeightedScorer> {
    scorer: S,
}

impl Ranker<WeightedScorer> {
    pub fn with_weights(weights: ScoringWeights) -> Self {
        Self::new(WeightedScorer::new(weights))
    }

    pub fn with_default_weights() -> Self {
        Self::new(WeightedScorer::default())
    }
}

impl<S: CompatibilityScorer> Ranker<S> {
    pub fn new(scorer: S) -> Self {
        Self { scorer }
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    /// Score and order every candidate against the profile
    ///
    /// The sort is stable, so fully tied candidates keep their input order.
    pub fn rank(&self, profile: &Profile, candidates: &[Candidate]) -> Vec<ScoredCandidate> {
        let mut scored: Vec<ScoredCandidate> = candidates
            .iter()
            .map(|candidate| {
                let score = sanitise_score(self.scorer.score(profile, candidate));
                ScoredCandidate::new(candidate.clone(), score)
            })
            .collect();

        scored.sort_by(|a, b| compare_ranked(profile, a, b));
        scored
    }

    /// Rank the candidates and overwrite the snapshot at `path`
    ///
    /// A write failure is returned to the caller; the file must then be
    /// considered stale.
    pub fn export(
        &self,
        profile: &Profile,
        candidates: &[Candidate],
        path: &Path,
    ) -> Result<ExportSummary, SnapshotError> {
        let ranked = self.rank(profile, candidates);
        let rows = write_snapshot(path, &ranked)?;

        tracing::info!(
            "Exported {} ranked candidates to {} (top score: {:?})",
            rows,
            path.display(),
            ranked.first().map(|s| s.score)
        );

        let top = ranked.into_iter().take(5).collect();
        Ok(ExportSummary {
            rows,
            path: path.to_path_buf(),
            top,
        })
    }
}

impl Default for Ranker<WeightedScorer> {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

/// Order two scored candidates, best first
///
/// Score descending, then gender preference (exact match, `Any`, mismatch),
/// trait positions matched, space ratio, energy difference, time ratio,
/// budget ratio, and finally yard compatibility.
pub fn compare_ranked(profile: &Profile, a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
    let (ca, cb) = (&a.candidate, &b.candidate);

    b.score
        .total_cmp(&a.score)
        .then_with(|| gender_priority(profile, ca).cmp(&gender_priority(profile, cb)))
        .then_with(|| trait_match_count(profile, cb).cmp(&trait_match_count(profile, ca)))
        .then_with(|| {
            capped_ratio(profile.space, cb.required_space)
                .total_cmp(&capped_ratio(profile.space, ca.required_space))
        })
        .then_with(|| energy_difference(profile, ca).cmp(&energy_difference(profile, cb)))
        .then_with(|| {
            capped_ratio(profile.time_per_day, cb.time_per_day)
                .total_cmp(&capped_ratio(profile.time_per_day, ca.time_per_day))
        })
        .then_with(|| {
            capped_ratio(profile.budget, cb.monthly_cost)
                .total_cmp(&capped_ratio(profile.budget, ca.monthly_cost))
        })
        .then_with(|| yard_compatible(profile, cb).cmp(&yard_compatible(profile, ca)))
}
