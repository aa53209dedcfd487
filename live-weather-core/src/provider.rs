use crate::{City, Config, FetchError, WeatherSnapshot, provider::openmeteo::OpenMeteoProvider};
use async_trait::async_trait;
use std::{convert::TryFrom, fmt::Debug, sync::Arc, time::Duration};

pub mod openmeteo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    OpenMeteo,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenMeteo => "open-meteo",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::OpenMeteo]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "open-meteo" | "openmeteo" => Ok(ProviderId::OpenMeteo),
            _ => Err(anyhow::anyhow!("Unknown provider '{value}'. Supported providers: open-meteo.")),
        }
    }
}

/// A source of current conditions for a single city.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, city: &City) -> Result<WeatherSnapshot, FetchError>;
}

/// Construct the configured provider.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let id = config.provider_id()?;
    let timeout = Duration::from_secs(config.request_timeout_secs);

    let provider: Arc<dyn WeatherProvider> = match id {
        ProviderId::OpenMeteo => Arc::new(OpenMeteoProvider::new(&config.base_url, timeout)?),
    };

    Ok(provider)
}
