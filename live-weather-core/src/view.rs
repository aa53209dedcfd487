//! Pure view model: what the dashboard shows for a given `ViewState`.

use chrono::{DateTime, Utc};

use crate::{
    ViewState, WeatherSnapshot,
    display::{Background, Icon, background_for, feels_like, icon_for, round_temp},
};

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Loading,
    Error(String),
    Dashboard { featured: FeaturedPanel, roster: Vec<RosterEntry> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeaturedPanel {
    pub city: String,
    pub temperature: i64,
    pub feels_like: i64,
    pub icon: Icon,
    pub background: Background,
    pub last_fetched: DateTime<Utc>,
    pub stats: Vec<StatCard>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatKind {
    Wind,
    Humidity,
    Precipitation,
    Rain,
    Snowfall,
}

impl StatKind {
    pub fn title(&self) -> &'static str {
        match self {
            StatKind::Wind => "💨 Wind",
            StatKind::Humidity => "💧 Humidity",
            StatKind::Precipitation => "🌧️ Precipitation",
            StatKind::Rain => "☔ Rain",
            StatKind::Snowfall => "❄️ Snowfall",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            StatKind::Wind => "km/h",
            StatKind::Humidity => "%",
            StatKind::Precipitation | StatKind::Rain | StatKind::Snowfall => "mm",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatCard {
    pub kind: StatKind,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RosterEntry {
    pub city: String,
    pub icon: Icon,
    pub temperature: i64,
    pub humidity_pct: f64,
    pub is_selected: bool,
}

pub fn render(state: &ViewState) -> Screen {
    let Some(featured) = state.featured() else {
        return match state.error() {
            Some(msg) => Screen::Error(msg.to_string()),
            None => Screen::Loading,
        };
    };

    let roster = state
        .batch()
        .iter()
        .map(|s| RosterEntry {
            city: s.city.clone(),
            icon: icon_for(s.temperature_c, s.weather_code),
            temperature: round_temp(s.temperature_c),
            humidity_pct: s.humidity_pct,
            is_selected: s.city == state.selected(),
        })
        .collect();

    Screen::Dashboard { featured: featured_panel(featured), roster }
}

fn featured_panel(s: &WeatherSnapshot) -> FeaturedPanel {
    let mut stats = vec![
        StatCard { kind: StatKind::Wind, value: s.wind_speed_kmh },
        StatCard { kind: StatKind::Humidity, value: s.humidity_pct },
    ];
    let optional = [
        (StatKind::Precipitation, s.precipitation_mm),
        (StatKind::Rain, s.rain_mm),
        (StatKind::Snowfall, s.snowfall_mm),
    ];
    stats.extend(
        optional
            .into_iter()
            .filter(|(_, value)| *value > 0.0)
            .map(|(kind, value)| StatCard { kind, value }),
    );

    FeaturedPanel {
        city: s.city.clone(),
        temperature: round_temp(s.temperature_c),
        feels_like: feels_like(s.temperature_c),
        icon: icon_for(s.temperature_c, s.weather_code),
        background: background_for(s.weather_code, s.temperature_c, s.rain_mm, s.snowfall_mm),
        last_fetched: s.last_fetched,
        stats,
    }
}
