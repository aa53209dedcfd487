//! Core library for the `live-weather` dashboard.
//!
//! This crate defines:
//! - Configuration of the watched cities
//! - Abstraction over weather providers, with an Open-Meteo implementation
//! - The fetch cycle and the background poller that repeats it
//! - View state, display mapping and the view model the terminal renders
//!
//! It is used by `live-weather-cli`, but has no terminal code of its own.

pub mod config;
pub mod cycle;
pub mod display;
pub mod error;
pub mod model;
pub mod poller;
pub mod provider;
pub mod state;
pub mod view;

pub use config::Config;
pub use cycle::run_cycle;
pub use display::{Background, Icon, background_for, icon_for};
pub use error::FetchError;
pub use model::{Batch, City, WeatherSnapshot};
pub use poller::Poller;
pub use provider::{ProviderId, WeatherProvider, provider_from_config};
pub use state::{Applied, CycleOutcome, ViewState};
pub use view::{Screen, render};
