use serde::{Deserialize, Serialize};
use std::fmt;
use validator::{Validate, ValidationError};

/// Preference value that accepts a candidate of either gender
pub const ANY_GENDER: &str = "Any";

/// The four binary axes of a trait code, first letter of each pair is the "yes" answer
pub const TRAIT_AXES: [(char, char); 4] = [('I', 'E'), ('S', 'N'), ('T', 'F'), ('J', 'P')];

/// Four-letter personality code (e.g. `ENFP`) shared by profiles and candidates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraitCode(String);

impl TraitCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Build a code from the four yes/no axis answers
    pub fn from_answers(introverted: bool, sensing: bool, thinking: bool, judging: bool) -> Self {
        let code = [introverted, sensing, thinking, judging]
            .iter()
            .zip(TRAIT_AXES.iter())
            .map(|(&yes, &(first, second))| if yes { first } else { second })
            .collect();
        Self(code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whole-code equality, ignoring case
    pub fn eq_ignore_case(&self, other: &TraitCode) -> bool {
        self.0.to_uppercase() == other.0.to_uppercase()
    }

    /// Number of the first four positions holding the same letter (case-insensitive)
    pub fn matching_positions(&self, other: &TraitCode) -> usize {
        self.0
            .chars()
            .zip(other.0.chars())
            .take(TRAIT_AXES.len())
            .filter(|(a, b)| a.to_ascii_uppercase() == b.to_ascii_uppercase())
            .count()
    }

    /// True when the code is exactly four letters, one from each axis
    pub fn is_well_formed(&self) -> bool {
        self.0.chars().count() == TRAIT_AXES.len()
            && self
                .0
                .chars()
                .zip(TRAIT_AXES.iter())
                .all(|(c, &(first, second))| {
                    let c = c.to_ascii_uppercase();
                    c == first || c == second
                })
    }
}

impl From<&str> for TraitCode {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for TraitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The query side of a ranking run: the person looking for a pet
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub gender: String,
    /// `Male`, `Female` or `Any`
    pub preferred_gender: String,
    pub trait_code: TraitCode,
    /// 1 to 10
    pub energy_level: u8,
    /// Living space in square feet
    pub space: f64,
    /// Monthly budget in USD
    pub budget: f64,
    pub allergic: bool,
    pub has_yard: bool,
    /// Hours per day available for the pet
    pub time_per_day: f64,
}

/// A catalog record: one adoptable pet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[validate(length(min = 1), custom(function = "snapshot_safe"))]
    pub name: String,
    #[serde(rename = "type")]
    #[validate(length(min = 1), custom(function = "snapshot_safe"))]
    pub pet_type: String,
    #[validate(length(min = 1), custom(function = "snapshot_safe"))]
    pub breed: String,
    pub gender: String,
    pub trait_code: TraitCode,
    #[validate(range(min = 1, max = 10))]
    pub energy_level: u8,
    /// Square feet the pet needs
    pub required_space: f64,
    /// Estimated monthly cost in USD
    pub monthly_cost: f64,
    /// Likely to trigger allergies
    pub allergenic: bool,
    /// Needs a yard or other outdoor space
    pub requires_yard: bool,
    /// Hours of care per day
    pub time_per_day: f64,
    /// Opaque image reference, passed through untouched
    #[validate(custom(function = "snapshot_safe"))]
    pub image_path: String,
}

/// Snapshot rows are bare comma-separated lines, so these fields cannot carry separators
pub(crate) fn snapshot_safe(value: &str) -> Result<(), ValidationError> {
    if value.contains([',', '\n', '\r']) {
        return Err(ValidationError::new("snapshot_separator"));
    }
    Ok(())
}

/// A candidate paired with its compatibility score in `[0, 1]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    #[serde(flatten)]
    pub candidate: Candidate,
    pub score: f64,
}

impl ScoredCandidate {
    pub fn new(candidate: Candidate, score: f64) -> Self {
        Self { candidate, score }
    }
}

/// Scoring weights
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub space: f64,
    pub time: f64,
    pub budget: f64,
    pub yard: f64,
    pub energy: f64,
    pub traits: f64,
    pub gender: f64,
}

impl ScoringWeights {
    pub fn sum(&self) -> f64 {
        self.space + self.time + self.budget + self.yard + self.energy + self.traits + self.gender
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            space: 0.15,
            time: 0.15,
            budget: 0.15,
            yard: 0.10,
            energy: 0.15,
            traits: 0.25,
            gender: 0.05,
        }
    }
}
