use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::{FetchError, truncate_body},
    model::{City, WeatherSnapshot},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com";

const CURRENT_FIELDS: &str =
    "temperature_2m,wind_speed_10m,relative_humidity_2m,weather_code,snowfall,rain,precipitation";

/// Open-Meteo forecast endpoint, `current` block only. No API key needed.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    endpoint: String,
    http: Client,
}

impl OpenMeteoProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for Open-Meteo")?;

        Ok(Self {
            endpoint: format!("{}/v1/forecast", base_url.trim_end_matches('/')),
            http,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OmCurrent {
    time: String,
    temperature_2m: f64,
    wind_speed_10m: f64,
    relative_humidity_2m: f64,
    weather_code: u32,
    snowfall: f64,
    rain: f64,
    precipitation: f64,
}

#[derive(Debug, Deserialize)]
struct OmResponse {
    current: OmCurrent,
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    async fn current(&self, city: &City) -> Result<WeatherSnapshot, FetchError> {
        tracing::debug!(city = %city.name, "requesting current conditions");

        let res = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("latitude", city.latitude.to_string()),
                ("longitude", city.longitude.to_string()),
                ("current", CURRENT_FIELDS.to_string()),
            ])
            .send()
            .await
            .map_err(|e| FetchError::network(&city.name, e))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| FetchError::network(&city.name, e))?;
        let last_fetched = Utc::now();

        if !status.is_success() {
            return Err(FetchError::Status {
                city: city.name.clone(),
                status,
                body: truncate_body(&body),
            });
        }

        let parsed: OmResponse = serde_json::from_str(&body)
            .map_err(|source| FetchError::Parse { city: city.name.clone(), source })?;

        tracing::debug!(city = %city.name, observed_at = %parsed.current.time, "received current conditions");

        let current = parsed.current;
        Ok(WeatherSnapshot {
            city: city.name.clone(),
            temperature_c: current.temperature_2m,
            wind_speed_kmh: current.wind_speed_10m,
            humidity_pct: current.relative_humidity_2m,
            weather_code: current.weather_code,
            snowfall_mm: current.snowfall,
            rain_mm: current.rain,
            precipitation_mm: current.precipitation,
            observed_at: current.time,
            last_fetched,
            latitude: city.latitude,
            longitude: city.longitude,
        })
    }
}
