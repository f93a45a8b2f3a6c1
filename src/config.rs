use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub snapshot: SnapshotSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotSettings {
    #[serde(default = "default_snapshot_path")]
    pub path: PathBuf,
}

impl Default for SnapshotSettings {
    fn default() -> Self {
        Self {
            path: default_snapshot_path(),
        }
    }
}

fn default_snapshot_path() -> PathBuf { PathBuf::from("output/pet_compatibility.csv") }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogSettings {
    /// TOML catalog file; the built-in seed catalog is used when unset
    pub path: Option<PathBuf>,
    /// Fixed shuffle seed for reproducible catalog order
    pub shuffle_seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_threshold")]
    pub best_match_threshold: f64,
    #[serde(default = "default_threshold")]
    pub recommend_threshold: f64,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            best_match_threshold: default_threshold(),
            recommend_threshold: default_threshold(),
        }
    }
}

fn default_threshold() -> f64 { 0.80 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_space_weight")]
    pub space: f64,
    #[serde(default = "default_time_weight")]
    pub time: f64,
    #[serde(default = "default_budget_weight")]
    pub budget: f64,
    #[serde(default = "default_yard_weight")]
    pub yard: f64,
    #[serde(default = "default_energy_weight")]
    pub energy: f64,
    #[serde(default = "default_traits_weight")]
    pub traits: f64,
    #[serde(default = "default_gender_weight")]
    pub gender: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            space: default_space_weight(),
            time: default_time_weight(),
            budget: default_budget_weight(),
            yard: default_yard_weight(),
            energy: default_energy_weight(),
            traits: default_traits_weight(),
            gender: default_gender_weight(),
        }
    }
}

fn default_space_weight() -> f64 { 0.15 }
fn default_time_weight() -> f64 { 0.15 }
fn default_budget_weight() -> f64 { 0.15 }
fn default_yard_weight() -> f64 { 0.10 }
fn default_energy_weight() -> f64 { 0.15 }
fn default_traits_weight() -> f64 { 0.25 }
fn default_gender_weight() -> f64 { 0.05 }

impl From<&WeightsConfig> for ScoringWeights {
    fn from(w: &WeightsConfig) -> Self {
        Self {
            space: w.space,
            time: w.time,
            budget: w.budget,
            yard: w.yard,
            energy: w.energy,
            traits: w.traits,
            gender: w.gender,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with PETMATCH_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., PETMATCH__SNAPSHOT__PATH -> snapshot.path
            .add_source(environment())
            .build()?;

        let settings: Settings = settings.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        let settings: Settings = settings.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject weights that do not sum to 1 and thresholds outside `[0, 1]`
    pub fn validate(&self) -> Result<(), ConfigError> {
        let weights = ScoringWeights::from(&self.scoring.weights);
        let all = [
            weights.space,
            weights.time,
            weights.budget,
            weights.yard,
            weights.energy,
            weights.traits,
            weights.gender,
        ];

        if all.iter().any(|w| !(0.0..=1.0).contains(w)) {
            return Err(ConfigError::Message(
                "scoring weights must each be within [0, 1]".to_string(),
            ));
        }

        if (weights.sum() - 1.0).abs() > 1e-6 {
            return Err(ConfigError::Message(format!(
                "scoring weights must sum to 1.0, got {}",
                weights.sum()
            )));
        }

        for (name, value) in [
            ("best_match_threshold", self.matching.best_match_threshold),
            ("recommend_threshold", self.matching.recommend_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Message(format!(
                    "matching.{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}

fn environment() -> Environment {
    Environment::with_prefix("PETMATCH")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
