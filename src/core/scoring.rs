use crate::models::{Candidate, Profile, ScoringWeights, ANY_GENDER};

/// Strategy that scores one candidate against a profile
///
/// Implementations return a value in `[0, 1]`. Any
/// `Fn(&Profile, &Candidate) -> f64` closure is also a scorer, which keeps
/// alternative formulas cheap to plug into a [`Ranker`](crate::core::Ranker).
pub trait CompatibilityScorer: Send + Sync {
    fn score(&self, profile: &Profile, candidate: &Candidate) -> f64;
}

impl<F> CompatibilityScorer for F
where
    F: Fn(&Profile, &Candidate) -> f64 + Send + Sync,
{
    fn score(&self, profile: &Profile, candidate: &Candidate) -> f64 {
        sanitise_score(self(profile, candidate))
    }
}

/// The weighted seven-factor scorer
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedScorer {
    weights: ScoringWeights,
}

impl WeightedScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }
}

impl CompatibilityScorer for WeightedScorer {
    fn score(&self, profile: &Profile, candidate: &Candidate) -> f64 {
        calculate_compatibility(profile, candidate, &self.weights)
    }
}

/// Calculate a compatibility score (0-1) for a candidate
///
/// Scoring formula:
/// score = (
///     space_score * 0.15 +     # available / required, capped at 1
///     time_score * 0.15 +      # available / required, capped at 1
///     budget_score * 0.15 +    # budget / monthly cost, capped at 1
///     yard_score * 0.10 +      # 1 unless a yard is needed and missing
///     energy_score * 0.15 +    # 1 - |difference| / 10
///     trait_score * 0.25 +     # matching trait code positions
///     gender_score * 0.05      # preference is Any or matches
/// )
///
/// An allergic profile paired with an allergenic candidate always scores 0.
pub fn calculate_compatibility(
    profile: &Profile,
    candidate: &Candidate,
    weights: &ScoringWeights,
) -> f64 {
    if profile.allergic && candidate.allergenic {
        return 0.0;
    }

    let space = capped_ratio(profile.space, candidate.required_space);
    let time = capped_ratio(profile.time_per_day, candidate.time_per_day);
    let budget = capped_ratio(profile.budget, candidate.monthly_cost);
    let yard = if yard_compatible(profile, candidate) { 1.0 } else { 0.0 };
    let energy = 1.0 - f64::from(energy_difference(profile, candidate)) / 10.0;
    let traits = trait_score(profile, candidate);
    let gender = if gender_priority(profile, candidate) <= 0 { 1.0 } else { 0.0 };

    // Each term is clamped before summing so a bad input cannot push the total out of range
    let total = weighted(space, weights.space)
        + weighted(time, weights.time)
        + weighted(budget, weights.budget)
        + weighted(yard, weights.yard)
        + weighted(energy, weights.energy)
        + weighted(traits, weights.traits)
        + weighted(gender, weights.gender);

    sanitise_score(total)
}

/// Clamp a raw score into `[0, 1]`, mapping non-finite values to 0
#[inline]
pub fn sanitise_score(score: f64) -> f64 {
    if !score.is_finite() {
        return 0.0;
    }
    score.clamp(0.0, 1.0)
}

#[inline]
fn weighted(sub_score: f64, weight: f64) -> f64 {
    sanitise_score(sub_score) * weight
}

/// `available / required`, capped at 1.0
///
/// A non-positive requirement is trivially satisfied and yields 1.0.
#[inline]
pub fn capped_ratio(available: f64, required: f64) -> f64 {
    if required <= 0.0 || available >= required {
        return 1.0;
    }
    available / required
}

/// Absolute energy level difference between profile and candidate
#[inline]
pub fn energy_difference(profile: &Profile, candidate: &Candidate) -> u8 {
    profile.energy_level.abs_diff(candidate.energy_level)
}

/// The candidate either needs no yard or the profile has one
#[inline]
pub fn yard_compatible(profile: &Profile, candidate: &Candidate) -> bool {
    !candidate.requires_yard || profile.has_yard
}

/// Trait code positions shared by profile and candidate (0-4)
#[inline]
pub fn trait_match_count(profile: &Profile, candidate: &Candidate) -> usize {
    profile.trait_code.matching_positions(&candidate.trait_code)
}

/// Trait sub-score: 1.0 for identical codes, otherwise a quarter per shared position
fn trait_score(profile: &Profile, candidate: &Candidate) -> f64 {
    if profile.trait_code.eq_ignore_case(&candidate.trait_code) {
        return 1.0;
    }

    match trait_match_count(profile, candidate) {
        4 => 1.0,
        3 => 0.75,
        2 => 0.5,
        1 => 0.25,
        _ => 0.0,
    }
}

/// Gender preference priority: -1 exact match, 0 for `Any`, 1 mismatch
#[inline]
pub fn gender_priority(profile: &Profile, candidate: &Candidate) -> i8 {
    if profile.preferred_gender.eq_ignore_ascii_case(ANY_GENDER) {
        0
    } else if eq_ignore_case(&profile.preferred_gender, &candidate.gender) {
        -1
    } else {
        1
    }
}

/// Case-insensitive string equality
#[inline]
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b) || a.to_lowercase() == b.to_lowercase()
}
