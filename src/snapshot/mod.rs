//! The ranked snapshot file
//!
//! One export writes a header and one bare comma-separated row per ranked
//! candidate:
//!
//! ```text
//! Name,Breed,Type,Score,ImagePath
//! Bella,Beagle,Dog,87%,images/bella.jpg
//! ```
//!
//! Rows carry no quoting, so catalog fields must not contain commas (enforced
//! when the catalog is loaded). Readers skip the header, skip malformed rows,
//! and treat a missing or unreadable file as empty.

pub mod reader;
pub mod writer;

use crate::models::Candidate;
use thiserror::Error;

pub use reader::{parse_row, read_first_row, read_rows};
pub use writer::{format_percentage, write_snapshot};

/// Fixed first line of every snapshot
pub const SNAPSHOT_HEADER: &str = "Name,Breed,Type,Score,ImagePath";

/// Number of fields in a data row
pub const SNAPSHOT_FIELDS: usize = 5;

/// Errors raised while exporting a snapshot
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Failed to create snapshot directory {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write snapshot {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// One parsed data row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotRow {
    pub name: String,
    pub breed: String,
    pub pet_type: String,
    /// Whole percentage, 0-100
    pub percent: u8,
    pub image_path: String,
}

impl SnapshotRow {
    /// Score as a fraction in `[0, 1]`
    pub fn score(&self) -> f64 {
        f64::from(self.percent) / 100.0
    }

    /// Find the catalog candidate for this row by its (name, breed) key
    ///
    /// The first match in catalog order wins when keys are duplicated.
    pub fn resolve<'a>(&self, catalog: &'a [Candidate]) -> Option<&'a Candidate> {
        let found = catalog
            .iter()
            .find(|c| c.name == self.name && c.breed == self.breed);

        if found.is_none() {
            tracing::debug!("Snapshot row {}/{} has no catalog candidate", self.name, self.breed);
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TraitCode;

    fn candidate(name: &str, breed: &str, image: &str) -> Candidate {
        Candidate {
            name: name.to_string(),
            pet_type: "Guinea Pig".to_string(),
            breed: breed.to_string(),
            gender: "Male".to_string(),
            trait_code: TraitCode::from("ISFJ"),
            energy_level: 4,
            required_space: 5.0,
            monthly_cost: 5.0,
            allergenic: true,
            requires_yard: false,
            time_per_day: 0.5,
            image_path: image.to_string(),
        }
    }

    #[test]
    fn test_resolve_first_catalog_match() {
        let catalog = vec![
            candidate("Shelly", "American", "first.jpg"),
            candidate("Shelly", "American", "second.jpg"),
            candidate("Shelly", "Peruvian", "third.jpg"),
        ];
        let row = parse_row("Shelly,American,Guinea Pig,40%,second.jpg").unwrap();

        let resolved = row.resolve(&catalog).unwrap();
        assert_eq!(resolved.image_path, "first.jpg");
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        let catalog = vec![candidate("Shelly", "American", "a.jpg")];
        let row = parse_row("shelly,American,Guinea Pig,40%,a.jpg").unwrap();
        assert!(row.resolve(&catalog).is_none());
    }

    #[test]
    fn test_row_score() {
        let row = parse_row("Shelly,American,Guinea Pig,80%,a.jpg").unwrap();
        assert_eq!(row.score(), 0.80);
    }
}
