// src/config.rs

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::info;

/// Archived snapshot of the nominal GDP list the pipeline scrapes.
pub const DEFAULT_URL: &str = "https://web.archive.org/web/20230902185326/https://en.wikipedia.org/wiki/List_of_countries_by_GDP_%28nominal%29";

/// Optional overrides file, looked up in the working directory.
pub const CONFIG_FILE: &str = "etl_config.yaml";

/// Where everything lives for one run. Table and column positions are
/// fixed by the page layout and are not configurable.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EtlConfig {
    pub url: String,
    pub csv_path: PathBuf,
    pub db_path: PathBuf,
    pub table_name: String,
    pub log_path: PathBuf,
    /// Lower bound (USD billions) for the final query.
    pub min_gdp_billions: f64,
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            csv_path: PathBuf::from("./Countries_by_GDP.csv"),
            db_path: PathBuf::from("World_Economies.db"),
            table_name: "Countries_by_GDP".to_string(),
            log_path: PathBuf::from("etl_project_log.txt"),
            min_gdp_billions: 100.0,
        }
    }
}

impl EtlConfig {
    /// Parse a YAML document; fields it leaves out keep their defaults.
    pub fn from_yaml(contents: &str) -> Result<Self> {
        serde_yaml::from_str(contents).context("parsing ETL config YAML")
    }

    /// Load `path` if it exists, otherwise fall back to the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let cfg = Self::from_yaml(&contents)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        info!(path = %path.display(), "loaded config overrides");
        Ok(cfg)
    }
}
