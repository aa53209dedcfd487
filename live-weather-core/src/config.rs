use anyhow::{Context, Result, anyhow, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fs, path::PathBuf, time::Duration};

use crate::{City, provider::ProviderId, provider::openmeteo::DEFAULT_BASE_URL};

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// default_city = "Toronto"
/// refresh_interval_secs = 60
///
/// [[cities]]
/// name = "Toronto"
/// latitude = 43.65
/// longitude = -79.38
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Weather source id, e.g. "open-meteo".
    pub provider: String,
    pub base_url: String,
    pub refresh_interval_secs: u64,
    pub request_timeout_secs: u64,
    /// City featured until the user picks another.
    pub default_city: String,
    pub cities: Vec<City>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderId::OpenMeteo.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            refresh_interval_secs: 60,
            request_timeout_secs: 10,
            default_city: "Toronto".to_string(),
            cities: vec![
                City::new("Toronto", 43.65, -79.38),
                City::new("New York", 40.71, -74.01),
                City::new("Los Angeles", 34.05, -118.24),
                City::new("Chicago", 41.88, -87.63),
                City::new("Phoenix", 33.45, -112.07),
            ],
        }
    }
}

impl Config {
    pub fn provider_id(&self) -> Result<ProviderId> {
        ProviderId::try_from(self.provider.as_str())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    /// Reject configurations the dashboard cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.cities.is_empty() {
            bail!("No cities configured.\nHint: add at least one [[cities]] entry to the config file.");
        }

        let mut seen = HashSet::new();
        for city in &self.cities {
            if !seen.insert(city.name.as_str()) {
                bail!("City '{}' is configured more than once.", city.name);
            }
        }

        if self.refresh_interval_secs == 0 {
            bail!("refresh_interval_secs must be greater than zero.");
        }

        self.provider_id()?;
        Ok(())
    }

    /// Case-insensitive lookup of a configured city.
    pub fn find_city(&self, name: &str) -> Option<&City> {
        self.cities.iter().find(|c| c.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Load config from disk, or return the defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, use the built-in cities.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "live-weather", "live-weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
