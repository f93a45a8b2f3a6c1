// Service exports
pub mod catalog;

pub use catalog::{seed_candidates, validate_catalog, CandidateSource, CatalogError, FileCatalog, SeedCatalog};
