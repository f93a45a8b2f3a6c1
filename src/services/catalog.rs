use std::collections::HashSet;
use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Deserialize;
use thiserror::Error;
use validator::Validate;

use crate::models::{Candidate, TraitCode};

/// Errors that can occur while loading the candidate catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid catalog file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid candidate {name}: {source}")]
    Invalid {
        name: String,
        #[source]
        source: validator::ValidationErrors,
    },

    #[error("Catalog is empty")]
    Empty,
}

/// Provider of the candidate catalog
///
/// Called once per session by the orchestrating caller; the returned list is
/// then passed down as read-only data.
pub trait CandidateSource {
    fn load_all_candidates(&self) -> Result<Vec<Candidate>, CatalogError>;
}

/// The built-in catalog of 50 pets, returned in shuffled order
#[derive(Debug, Clone, Default)]
pub struct SeedCatalog {
    shuffle_seed: Option<u64>,
}

impl SeedCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the shuffle so repeated loads return the same order
    pub fn with_seed(seed: u64) -> Self {
        Self {
            shuffle_seed: Some(seed),
        }
    }
}

impl CandidateSource for SeedCatalog {
    fn load_all_candidates(&self) -> Result<Vec<Candidate>, CatalogError> {
        let mut candidates = validate_catalog(seed_candidates())?;
        shuffle(&mut candidates, self.shuffle_seed);
        Ok(candidates)
    }
}

/// A catalog read from a TOML file of `[[candidates]]` tables
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
    shuffle_seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    candidates: Vec<Candidate>,
}

impl FileCatalog {
    pub fn new(path: impl Into<PathBuf>, shuffle_seed: Option<u64>) -> Self {
        Self {
            path: path.into(),
            shuffle_seed,
        }
    }
}

impl CandidateSource for FileCatalog {
    fn load_all_candidates(&self) -> Result<Vec<Candidate>, CatalogError> {
        let path = self.path.display().to_string();
        let raw = std::fs::read_to_string(&self.path).map_err(|source| CatalogError::Io {
            path: path.clone(),
            source,
        })?;

        let file: CatalogFile =
            toml::from_str(&raw).map_err(|source| CatalogError::Parse { path, source })?;

        let mut candidates = validate_catalog(file.candidates)?;
        shuffle(&mut candidates, self.shuffle_seed);
        Ok(candidates)
    }
}

/// Reject candidates the scorer and snapshot cannot handle
///
/// Duplicate (name, breed) keys are allowed but logged: snapshot rows resolve
/// to the first one in catalog order.
pub fn validate_catalog(candidates: Vec<Candidate>) -> Result<Vec<Candidate>, CatalogError> {
    if candidates.is_empty() {
        return Err(CatalogError::Empty);
    }

    let mut keys = HashSet::with_capacity(candidates.len());
    for candidate in &candidates {
        candidate.validate().map_err(|source| CatalogError::Invalid {
            name: candidate.name.clone(),
            source,
        })?;

        if !candidate.trait_code.is_well_formed() {
            tracing::warn!(
                "Candidate {} has unusual trait code {:?}",
                candidate.name,
                candidate.trait_code.as_str()
            );
        }

        if !keys.insert((candidate.name.as_str(), candidate.breed.as_str())) {
            tracing::warn!(
                "Duplicate catalog key {}/{}; snapshot rows resolve to the first",
                candidate.name,
                candidate.breed
            );
        }
    }

    Ok(candidates)
}

fn shuffle(candidates: &mut [Candidate], seed: Option<u64>) {
    match seed {
        Some(seed) => candidates.shuffle(&mut StdRng::seed_from_u64(seed)),
        None => candidates.shuffle(&mut rand::rng()),
    }
}

#[allow(clippy::too_many_arguments)]
fn pet(
    name: &str,
    pet_type: &str,
    breed: &str,
    gender: &str,
    traits: &str,
    energy_level: u8,
    required_space: f64,
    monthly_cost: f64,
    allergenic: bool,
    requires_yard: bool,
    time_per_day: f64,
    image_path: &str,
) -> Candidate {
    Candidate {
        name: name.to_string(),
        pet_type: pet_type.to_string(),
        breed: breed.to_string(),
        gender: gender.to_string(),
        trait_code: TraitCode::from(traits),
        energy_level,
        required_space,
        monthly_cost,
        allergenic,
        requires_yard,
        time_per_day,
        image_path: image_path.to_string(),
    }
}

/// Seed records in declaration order (space in sq ft, cost in USD/month, time in hours/day)
pub fn seed_candidates() -> Vec<Candidate> {
    vec![
        pet("Bella", "Dog", "Beagle", "Female", "ISFJ", 7, 50.0, 30.0, false, true, 2.0, "images/bella.jpg"),
        pet("Charlie", "Dog", "Golden Retriever", "Male", "ENTJ", 9, 75.0, 50.0, false, true, 2.5, "images/charlie.jpg"),
        pet("Milo", "Cat", "Siamese", "Male", "INFP", 5, 25.0, 20.0, false, false, 1.5, "images/milo.jpg"),
        pet("Gizmo", "Guinea Pig", "Abyssinian", "Male", "ENTP", 5, 5.5, 6.0, true, false, 0.6, "images/gizmo.jpg"),
        pet("Zoe", "Hamster", "Syrian Hamster", "Female", "ENFP", 3, 5.0, 10.0, true, false, 0.5, "images/zoe.jpg"),
        pet("Shelly", "Turtle", "Red-eared Slider", "Female", "ISTP", 2, 2.0, 5.0, false, false, 0.1, "images/shelly.jpg"),
        pet("Whiskers", "Rat", "Fancy Rat", "Male", "INTP", 6, 1.0, 3.0, true, false, 0.2, "images/whiskers.jpg"),
        pet("Kiki", "Parrot", "African Grey", "Male", "INTP", 5, 40.0, 15.0, false, false, 1.0, "images/kiki.jpg"),
        pet("Misty", "Cat", "Bengal", "Female", "INFJ", 6, 35.0, 30.0, false, false, 1.6, "images/misty.jpg"),
        pet("Rocky", "Hamster", "Roborovski Hamster", "Male", "INFJ", 3, 5.0, 8.0, true, false, 0.4, "images/rocky.jpg"),
        pet("Bubbles", "Fish", "Goldfish", "Male", "INFP", 2, 1.0, 5.0, false, false, 0.2, "images/bubbles.jpg"),
        pet("Sunny", "Parrot", "Macaw", "Female", "ENFJ", 7, 15.0, 20.0, false, false, 2.0, "images/sunny.jpg"),
        pet("Max", "Dog", "Rottweiler", "Male", "ESTJ", 8, 80.0, 60.0, true, true, 3.0, "images/max.jpg"),
        pet("Slither", "Snake", "Ball Python", "Male", "INTJ", 8, 5.0, 8.0, false, false, 1.0, "images/slither.jpg"),
        pet("Cooper", "Dog", "Beagle", "Male", "ENFP", 7, 50.0, 35.0, false, true, 2.5, "images/cooper.jpg"),
        pet("Shelly", "Guinea Pig", "American", "Male", "ISFJ", 4, 5.0, 5.0, true, false, 0.5, "images/shelly.jpg"),
        pet("Squeaky", "Rat", "Dumbo Rat", "Female", "INFJ", 5, 1.2, 3.5, true, false, 0.3, "images/squeaky.jpg"),
        pet("Pumpkin", "Hamster", "Winter White Hamster", "Female", "ENFP", 2, 4.5, 7.0, true, false, 0.4, "images/pumpkin.jpg"),
        pet("Daisy", "Dog", "Bulldog", "Female", "ESTP", 6, 50.0, 35.0, true, true, 2.5, "images/daisy.jpg"),
        pet("Tiny", "Hamster", "Campbell's Hamster", "Male", "INTP", 4, 5.0, 9.0, false, false, 0.4, "images/tiny.jpg"),
        pet("Ziw", "Cat", "Maine Coon", "Female", "ISFP", 7, 50.0, 35.0, false, false, 2.0, "images/ziw.jpg"),
        pet("Tiger", "Cat", "British Shorthair", "Female", "INTJ", 8, 45.0, 25.0, false, false, 2.0, "images/tiger.jpg"),
        pet("Giz", "Guinea Pig", "Peruvian", "Female", "INFP", 3, 6.0, 7.0, true, false, 0.4, "images/giz.jpg"),
        pet("Tommy", "Turtle", "Box Turtle", "Male", "INTJ", 3, 3.5, 4.0, false, false, 0.2, "images/tommy.jpg"),
        pet("Slit", "Snake", "Ball Python", "Male", "INTJ", 8, 5.0, 8.0, false, false, 1.0, "images/slit.jpg"),
        pet("Sadie", "Dog", "Poodle", "Female", "INFP", 8, 55.0, 45.0, false, true, 2.0, "images/sadie.jpg"),
        pet("Spike", "Lizard", "Bearded Dragon", "Female", "ISFJ", 6, 10.0, 15.0, false, false, 2.0, "images/spike.jpg"),
        pet("Coop", "Dog", "Chihuahua", "Male", "ENFP", 5, 25.0, 20.0, false, true, 2.5, "images/coop.jpg"),
        pet("Maggie", "Parrot", "Cockatoo", "Female", "ENFJ", 7, 12.0, 18.0, false, false, 2.0, "images/maggie.jpg"),
        pet("Rock", "Hamster", "Roborovski Hamster", "Male", "ENFP", 3, 5.0, 8.0, true, false, 0.4, "images/rock.jpg"),
        pet("Windy", "Parrot", "Macaw", "Female", "ENFJ", 7, 15.0, 20.0, false, false, 2.0, "images/windy.jpg"),
        pet("Penny", "Guinea Pig", "Peruvian", "Female", "INFP", 3, 5.5, 6.5, true, false, 0.5, "images/penny.jpg"),
        pet("Nemo", "Fish", "Betta", "Male", "ISTJ", 2, 1.0, 3.0, false, false, 0.2, "images/nemo.jpg"),
        pet("Luna", "Cat", "Ragdoll", "Female", "INFJ", 5, 30.0, 28.0, false, false, 1.8, "images/luna.jpg"),
        pet("Buddy", "Dog", "Labrador", "Male", "ENFP", 8, 70.0, 55.0, false, true, 2.5, "images/buddy.jpg"),
        pet("Peanut", "Hamster", "Chinese Hamster", "Male", "ISFP", 3, 4.0, 7.0, true, false, 0.4, "images/peanut.jpg"),
        pet("Coco", "Parrot", "Conure", "Female", "ESFJ", 6, 10.0, 14.0, false, false, 1.5, "images/coco.jpg"),
        pet("Shadow", "Cat", "Sphynx", "Male", "INTP", 4, 28.0, 22.0, false, false, 1.4, "images/shadow.jpg"),
        pet("Spiky", "Dog", "Doberman", "Male", "ENTJ", 9, 80.0, 65.0, true, true, 3.0, "images/spiky.jpg"),
        pet("Snowy", "Rabbit", "Netherland Dwarf", "Female", "ISFJ", 4, 8.0, 10.0, false, false, 1.0, "images/snowy.jpg"),
        pet("Blue", "Fish", "Guppy", "Male", "INFP", 2, 1.0, 3.0, false, false, 0.2, "images/blue.jpg"),
        pet("Peaches", "Guinea Pig", "Silkie", "Female", "ENFP", 3, 6.0, 7.0, true, false, 0.5, "images/peaches.jpg"),
        pet("Loki", "Cat", "Oriental Shorthair", "Male", "ENTP", 6, 33.0, 27.0, false, false, 1.7, "images/loki.jpg"),
        pet("Benny", "Dog", "Basset Hound", "Male", "ISFP", 5, 55.0, 38.0, false, true, 2.0, "images/benny.jpg"),
        pet("Ruby", "Parrot", "Lovebird", "Female", "ENFJ", 5, 8.0, 12.0, false, false, 1.2, "images/ruby.jpg"),
        pet("Dusty", "Rabbit", "Lop", "Male", "ESFP", 4, 10.0, 11.0, false, false, 1.1, "images/dusty.jpg"),
        pet("Flame", "Lizard", "Leopard Gecko", "Female", "INTJ", 4, 7.0, 10.0, false, false, 1.0, "images/flame.jpg"),
        pet("Basil", "Snake", "Corn Snake", "Male", "ISTP", 5, 4.5, 7.0, false, false, 0.9, "images/basil.jpg"),
        pet("Tango", "Parrot", "Parakeet", "Male", "ENFP", 4, 6.0, 10.0, false, false, 1.3, "images/tango.jpg"),
        pet("Ginger", "Dog", "Shiba Inu", "Female", "INFJ", 6, 45.0, 40.0, false, true, 2.3, "images/ginger.jpg"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_seed_catalog_is_complete_and_valid() {
        let candidates = SeedCatalog::new().load_all_candidates().unwrap();
        assert_eq!(candidates.len(), 50);
        assert!(candidates.iter().all(|c| c.trait_code.is_well_formed()));
    }

    #[test]
    fn test_seeded_shuffle_is_reproducible() {
        let first = SeedCatalog::with_seed(7).load_all_candidates().unwrap();
        let second = SeedCatalog::with_seed(7).load_all_candidates().unwrap();
        assert_eq!(first, second);

        let mut names: Vec<String> = first.into_iter().map(|c| c.name).collect();
        let mut expected: Vec<String> = seed_candidates().into_iter().map(|c| c.name).collect();
        names.sort();
        expected.sort();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_comma_in_breed_rejected() {
        let mut bad = seed_candidates();
        bad[0].breed = "Beagle, Lemon".to_string();
        assert!(matches!(validate_catalog(bad), Err(CatalogError::Invalid { .. })));
    }

    #[test]
    fn test_energy_out_of_scale_rejected() {
        let mut bad = seed_candidates();
        bad[3].energy_level = 0;
        assert!(matches!(validate_catalog(bad), Err(CatalogError::Invalid { .. })));
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert!(matches!(validate_catalog(Vec::new()), Err(CatalogError::Empty)));
    }

    #[test]
    fn test_file_catalog() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[[candidates]]
name = "Pip"
type = "Hedgehog"
breed = "African Pygmy"
gender = "Male"
traitCode = "ISTP"
energyLevel = 4
requiredSpace = 6.0
monthlyCost = 15.0
allergenic = false
requiresYard = false
timePerDay = 0.5
imagePath = "images/pip.jpg"
"#
        )
        .unwrap();

        let candidates = FileCatalog::new(file.path(), None).load_all_candidates().unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].pet_type, "Hedgehog");
        assert_eq!(candidates[0].trait_code.as_str(), "ISTP");
    }

    #[test]
    fn test_missing_catalog_file() {
        let result = FileCatalog::new("/nonexistent/catalog.toml", None).load_all_candidates();
        assert!(matches!(result, Err(CatalogError::Io { .. })));
    }
}
