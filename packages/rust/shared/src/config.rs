//! Application configuration for the Curry dashboard.
//!
//! User config lives at `~/.curry/curry.toml`.
//! CLI flags override config file values, which override defaults.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "curry.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".curry";

/// Format of the `cutoff` key.
const CUTOFF_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// Config structs (matching curry.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Dataset location.
    #[serde(default)]
    pub dataset: DatasetConfig,

    /// Default row filters.
    #[serde(default)]
    pub filters: FilterConfig,

    /// Report tuning.
    #[serde(default)]
    pub reports: ReportsConfig,
}

/// `[dataset]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Path to the orders CSV, relative to the working directory.
    #[serde(default = "default_dataset_path")]
    pub path: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
        }
    }
}

fn default_dataset_path() -> String {
    "dataset/train.csv".into()
}

/// `[filters]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Keep orders strictly before this date (`YYYY-MM-DD`).
    #[serde(default = "default_cutoff")]
    pub cutoff: String,

    /// Allowed road traffic densities.
    #[serde(default = "default_traffic")]
    pub traffic: Vec<String>,

    /// Allowed weather conditions.
    #[serde(default = "default_weather")]
    pub weather: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            cutoff: default_cutoff(),
            traffic: default_traffic(),
            weather: default_weather(),
        }
    }
}

impl FilterConfig {
    /// Parse the configured cutoff date.
    pub fn cutoff_date(&self) -> Result<NaiveDate> {
        parse_cutoff(&self.cutoff)
    }
}

fn default_cutoff() -> String {
    "2022-04-13".into()
}
fn default_traffic() -> Vec<String> {
    ["Low", "Medium", "High", "Jam"]
        .into_iter()
        .map(String::from)
        .collect()
}
fn default_weather() -> Vec<String> {
    [
        "conditions Cloudy",
        "conditions Fog",
        "conditions Sandstorms",
        "conditions Stormy",
        "conditions Sunny",
        "conditions Windy",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// `[reports]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportsConfig {
    /// Rows per city in the fastest/slowest courier tables.
    #[serde(default = "default_top_couriers")]
    pub top_couriers: usize,

    /// Cities listed in the courier ranking, in display order.
    #[serde(default = "default_cities")]
    pub cities: Vec<String>,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            top_couriers: default_top_couriers(),
            cities: default_cities(),
        }
    }
}

fn default_top_couriers() -> usize {
    10
}
fn default_cities() -> Vec<String> {
    ["Metropolitian", "Urban", "Semi-Urban"]
        .into_iter()
        .map(String::from)
        .collect()
}

// ---------------------------------------------------------------------------
// View config (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime configuration for one view invocation.
#[derive(Debug, Clone)]
pub struct ViewConfig {
    /// CSV to read.
    pub dataset_path: PathBuf,
    /// Keep orders strictly before this date.
    pub cutoff: Option<NaiveDate>,
    /// Allowed traffic densities; `None` disables the filter.
    pub traffic: Option<BTreeSet<String>>,
    /// Allowed weather conditions; `None` disables the filter.
    pub weather: Option<BTreeSet<String>>,
    /// Rows per city in courier rankings.
    pub top_couriers: usize,
    /// Cities listed in courier rankings.
    pub cities: Vec<String>,
}

impl TryFrom<&AppConfig> for ViewConfig {
    type Error = DashboardError;

    fn try_from(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            dataset_path: PathBuf::from(&config.dataset.path),
            cutoff: Some(config.filters.cutoff_date()?),
            traffic: Some(config.filters.traffic.iter().cloned().collect()),
            weather: Some(config.filters.weather.iter().cloned().collect()),
            top_couriers: config.reports.top_couriers,
            cities: config.reports.cities.clone(),
        })
    }
}

/// Parse a `YYYY-MM-DD` cutoff date.
pub fn parse_cutoff(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), CUTOFF_FORMAT).map_err(|e| {
        DashboardError::config(format!("cutoff '{value}' is not a YYYY-MM-DD date: {e}"))
    })
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.curry/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| DashboardError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.curry/curry.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| DashboardError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| {
        DashboardError::config(format!("failed to parse {}: {e}", path.display()))
    })?;
    config.filters.cutoff_date()?;

    Ok(config)
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| DashboardError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| DashboardError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| DashboardError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("dataset/train.csv"));
        assert!(toml_str.contains("conditions Sandstorms"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.filters.cutoff, "2022-04-13");
        assert_eq!(parsed.filters.traffic, vec!["Low", "Medium", "High", "Jam"]);
        assert_eq!(parsed.reports.top_couriers, 10);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[filters]
cutoff = "2022-03-01"
traffic = ["Jam"]
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.dataset.path, "dataset/train.csv");
        assert_eq!(config.filters.traffic, vec!["Jam"]);
        assert_eq!(config.filters.weather.len(), 6);
        assert_eq!(
            config.filters.cutoff_date().unwrap(),
            NaiveDate::from_ymd_opt(2022, 3, 1).unwrap()
        );
    }

    #[test]
    fn view_config_from_app_config() {
        let app = AppConfig::default();
        let view = ViewConfig::try_from(&app).expect("defaults are valid");
        assert_eq!(view.dataset_path, PathBuf::from("dataset/train.csv"));
        assert_eq!(view.cutoff, NaiveDate::from_ymd_opt(2022, 4, 13));
        assert!(view.traffic.as_ref().unwrap().contains("Jam"));
        assert_eq!(view.cities[0], "Metropolitian");
    }

    #[test]
    fn bad_cutoff_is_config_error() {
        let mut app = AppConfig::default();
        app.filters.cutoff = "13-04-2022".into();
        let err = ViewConfig::try_from(&app).unwrap_err();
        assert!(err.to_string().contains("not a YYYY-MM-DD date"));
    }

    #[test]
    fn load_config_from_file_rejects_bad_cutoff() {
        let tmp = std::env::temp_dir().join(format!("curry-cfg-{}.toml", uuid::Uuid::now_v7()));
        std::fs::write(&tmp, "[filters]\ncutoff = \"yesterday\"\n").unwrap();
        let result = load_config_from(&tmp);
        let _ = std::fs::remove_file(&tmp);
        assert!(result.is_err());
    }
}
