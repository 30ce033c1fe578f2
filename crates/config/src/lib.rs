//! Scenario models and loaders for Sims-Flanagan legs.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// A leg scenario: two boundary states, a spacecraft and a throttle history.
///
/// Lengths are in km and the gravitational parameter in km³/s²; consumers convert to SI.
#[derive(Debug, Deserialize, Clone)]
pub struct LegScenarioConfig {
    pub name: String,
    pub mu_km3_s2: f64,
    pub departure: BoundaryConfig,
    pub arrival: BoundaryConfig,
    pub spacecraft: SpacecraftConfig,
    /// Number of equal-duration throttle segments spanning the leg.
    pub segments: usize,
    /// Throttle vectors, one per segment. Missing entries are zero.
    #[serde(default)]
    pub throttles: Vec<[f64; 3]>,
}

/// Spacecraft state at one end of the leg.
#[derive(Debug, Deserialize, Clone)]
pub struct BoundaryConfig {
    pub epoch_mjd2000: f64,
    pub position_km: [f64; 3],
    pub velocity_km_s: [f64; 3],
    pub mass_kg: f64,
}

/// Propulsion properties of the spacecraft flying the leg.
#[derive(Debug, Deserialize, Clone)]
pub struct SpacecraftConfig {
    #[serde(default)]
    pub name: Option<String>,
    pub mass_kg: f64,
    pub max_thrust_newtons: f64,
    pub isp_seconds: f64,
}

/// Errors that can occur while loading scenario files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("scenario '{0}' not found")]
    NotFound(String),
}

/// Load leg scenarios from a YAML list, a single TOML file or a directory of TOML files.
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<LegScenarioConfig>, ConfigError> {
    load_records(path)
}

/// Pick a scenario by case-insensitive name, or the first one when no name is given.
pub fn select_scenario<'a>(
    scenarios: &'a [LegScenarioConfig],
    requested: Option<&str>,
) -> Result<&'a LegScenarioConfig, ConfigError> {
    match requested {
        Some(name) => {
            let upper = name.to_uppercase();
            scenarios
                .iter()
                .find(|cfg| cfg.name.to_uppercase() == upper)
                .ok_or_else(|| ConfigError::NotFound(name.to_string()))
        }
        None => scenarios
            .first()
            .ok_or_else(|| ConfigError::NotFound("<first>".to_string())),
    }
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map(|ext| ext == "toml").unwrap_or(false))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}
