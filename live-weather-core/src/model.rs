use std::{ops::Deref, sync::Arc};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A configured city. Names are unique within a configured list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl City {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self { name: name.into(), latitude, longitude }
    }
}

/// Latest reading for one city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub city: String,
    pub temperature_c: f64,
    pub wind_speed_kmh: f64,
    pub humidity_pct: f64,
    pub weather_code: u32,
    pub snowfall_mm: f64,
    pub rain_mm: f64,
    pub precipitation_mm: f64,
    /// Observation time exactly as reported upstream.
    pub observed_at: String,
    /// When this process received the reading.
    pub last_fetched: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
}

impl WeatherSnapshot {
    pub fn last_fetched_millis(&self) -> i64 {
        self.last_fetched.timestamp_millis()
    }
}

/// The full set of snapshots produced by one successful cycle, in city
/// configuration order. Never mutated; a refresh builds a new one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Batch(Arc<[WeatherSnapshot]>);

impl Batch {
    pub fn new(snapshots: Vec<WeatherSnapshot>) -> Self {
        Self(snapshots.into())
    }

    pub fn for_city(&self, city: &str) -> Option<&WeatherSnapshot> {
        self.0.iter().find(|s| s.city == city)
    }

    pub fn cities(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|s| s.city.as_str())
    }
}

impl Deref for Batch {
    type Target = [WeatherSnapshot];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
pub(crate) fn snapshot(city: &str, temperature_c: f64, weather_code: u32) -> WeatherSnapshot {
    WeatherSnapshot {
        city: city.to_string(),
        temperature_c,
        wind_speed_kmh: 12.0,
        humidity_pct: 60.0,
        weather_code,
        snowfall_mm: 0.0,
        rain_mm: 0.0,
        precipitation_mm: 0.0,
        observed_at: "2026-10-18T12:00".to_string(),
        last_fetched: Utc::now(),
        latitude: 0.0,
        longitude: 0.0,
    }
}
