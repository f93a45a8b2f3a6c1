use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use crate::models::domain::{Profile, TraitCode, ANY_GENDER};

/// Yes/no answers to the four trait questions
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraitAnswers {
    /// Recharges alone rather than with friends
    pub introverted: bool,
    /// Focuses on facts and details over big-picture ideas
    pub sensing: bool,
    /// Offers practical solutions before emotional support
    pub thinking: bool,
    /// Prefers a clear plan over going with the flow
    pub judging: bool,
}

/// Request to rank the catalog against a profile
///
/// The trait code may be given directly or derived from the four answers;
/// an explicit code wins when both are present.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_trait_source"))]
pub struct RankRequest {
    #[serde(default)]
    pub gender: String,
    #[validate(custom(function = "validate_preferred_gender"))]
    #[serde(alias = "preferred_gender", rename = "preferredGender")]
    pub preferred_gender: String,
    #[serde(alias = "trait_code", rename = "traitCode", default)]
    pub trait_code: Option<String>,
    #[serde(default)]
    pub answers: Option<TraitAnswers>,
    #[validate(range(min = 1, max = 10))]
    #[serde(alias = "energy_level", rename = "energyLevel")]
    pub energy_level: u8,
    #[validate(range(exclusive_min = 0.0))]
    pub space: f64,
    #[validate(range(exclusive_min = 0.0))]
    pub budget: f64,
    #[serde(default)]
    pub allergic: bool,
    #[serde(alias = "has_yard", rename = "hasYard", default)]
    pub has_yard: bool,
    #[validate(range(exclusive_min = 0.0))]
    #[serde(alias = "time_per_day", rename = "timePerDay")]
    pub time_per_day: f64,
}

fn validate_preferred_gender(value: &str) -> Result<(), ValidationError> {
    let accepted = ["Male", "Female", ANY_GENDER];
    if accepted.iter().any(|g| g.eq_ignore_ascii_case(value)) {
        Ok(())
    } else {
        Err(ValidationError::new("preferred_gender"))
    }
}

fn validate_trait_source(request: &RankRequest) -> Result<(), ValidationError> {
    match (&request.trait_code, &request.answers) {
        (Some(code), _) if TraitCode::new(code.as_str()).is_well_formed() => Ok(()),
        (Some(_), _) => Err(ValidationError::new("trait_code")),
        (None, Some(_)) => Ok(()),
        (None, None) => Err(ValidationError::new("trait_code_missing")),
    }
}

impl RankRequest {
    /// Convert a validated request into an immutable profile
    pub fn into_profile(self) -> Profile {
        let trait_code = match (self.trait_code, self.answers) {
            (Some(code), _) => TraitCode::new(code.to_uppercase()),
            (None, Some(a)) => TraitCode::from_answers(a.introverted, a.sensing, a.thinking, a.judging),
            (None, None) => TraitCode::new(String::new()),
        };

        Profile {
            gender: self.gender,
            preferred_gender: self.preferred_gender,
            trait_code,
            energy_level: self.energy_level,
            space: self.space,
            budget: self.budget,
            allergic: self.allergic,
            has_yard: self.has_yard,
            time_per_day: self.time_per_day,
        }
    }
}

/// Query parameters for the recommended list
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendedQuery {
    #[validate(range(min = 0.0, max = 1.0))]
    pub threshold: Option<f64>,
}

/// Query parameters for type/breed search
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchQuery {
    #[validate(length(min = 1))]
    #[serde(rename = "type")]
    pub pet_type: String,
    #[serde(default)]
    pub breed: Option<String>,
}
