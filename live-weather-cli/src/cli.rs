use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{CustomType, Select};
use live_weather_core::{Config, CycleOutcome, Screen, ViewState, provider_from_config, render, run_cycle};

use crate::{render::render_screen, watch};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "live-weather", version, about = "Live weather for a fixed set of cities")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Pick the default city and refresh interval.
    Configure,

    /// Fetch once and print the dashboard.
    Show {
        /// City to feature; defaults to the configured default city.
        #[arg(long)]
        city: Option<String>,
    },

    /// Keep the dashboard up to date. Type a city name or number to feature it, `q` to quit.
    Watch {
        /// City to feature first; defaults to the configured default city.
        #[arg(long)]
        city: Option<String>,

        /// Seconds between refreshes; overrides the config file.
        #[arg(long)]
        interval: Option<u64>,
    },

    /// List the configured cities.
    Cities,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load()?;

        match self.command {
            Command::Configure => configure(&mut config)?,
            Command::Show { city } => {
                config.validate()?;
                show(&config, city).await?;
            }
            Command::Watch { city, interval } => {
                if let Some(secs) = interval {
                    config.refresh_interval_secs = secs;
                }
                config.validate()?;
                let selected = initial_city(&config, city);
                watch::run(&config, selected).await?;
            }
            Command::Cities => {
                for (i, city) in config.cities.iter().enumerate() {
                    let marker = if city.name == config.default_city { "*" } else { " " };
                    println!(
                        "{marker} {:>2}. {:<16} {:>8.2} {:>9.2}",
                        i + 1,
                        city.name,
                        city.latitude,
                        city.longitude
                    );
                }
            }
        }

        Ok(())
    }
}

/// Resolve a `--city` argument to the configured spelling when it matches one.
fn initial_city(config: &Config, requested: Option<String>) -> String {
    match requested {
        Some(name) => config.find_city(&name).map(|c| c.name.clone()).unwrap_or(name),
        None => config.default_city.clone(),
    }
}

async fn show(config: &Config, city: Option<String>) -> anyhow::Result<()> {
    let provider = provider_from_config(config)?;
    let mut state = ViewState::new(initial_city(config, city));

    let result = run_cycle(provider, &config.cities).await;
    state.apply(CycleOutcome { seq: 1, result });

    print!("{}", show_text(&render(&state), chrono::Local::now())?);
    Ok(())
}

/// The text `show` prints. A failed fetch becomes the command's error
/// instead, so the message is reported once.
fn show_text(screen: &Screen, now: chrono::DateTime<chrono::Local>) -> anyhow::Result<String> {
    match screen {
        Screen::Error(msg) => bail!("{msg}"),
        other => Ok(render_screen(other, now)),
    }
}

fn configure(config: &mut Config) -> anyhow::Result<()> {
    config.validate()?;

    let names: Vec<String> = config.cities.iter().map(|c| c.name.clone()).collect();
    let start = names.iter().position(|n| *n == config.default_city).unwrap_or(0);

    let default_city = Select::new("Default city:", names)
        .with_starting_cursor(start)
        .prompt()
        .context("Failed to read default city")?;

    let refresh_interval_secs = CustomType::<u64>::new("Refresh interval (seconds):")
        .with_default(config.refresh_interval_secs)
        .with_error_message("Please enter a whole number of seconds")
        .prompt()
        .context("Failed to read refresh interval")?;

    if refresh_interval_secs == 0 {
        bail!("Refresh interval must be greater than zero.");
    }

    config.default_city = default_city;
    config.refresh_interval_secs = refresh_interval_secs;
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}
