use std::fmt;

use chrono::{DateTime, Local};
use live_weather_core::{
    Screen,
    view::{FeaturedPanel, RosterEntry, StatCard},
};

/// Text form of a [`Screen`] as of `now`.
pub struct ScreenText<'a> {
    pub screen: &'a Screen,
    pub now: DateTime<Local>,
}

/// Turn the view model into the text printed on each refresh.
pub fn render_screen(screen: &Screen, now: DateTime<Local>) -> String {
    ScreenText { screen, now }.to_string()
}

impl fmt::Display for ScreenText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.screen {
            Screen::Loading => writeln!(f, "Loading weather data..."),
            Screen::Error(msg) => writeln!(f, "{msg}"),
            Screen::Dashboard { featured, roster } => {
                writeln!(f, "Live Weather{:>40}", long_date(self.now))?;
                writeln!(f)?;
                write_featured(f, featured, self.now)?;
                writeln!(f)?;
                write_roster(f, roster)
            }
        }
    }
}

fn long_date(now: DateTime<Local>) -> String {
    now.format("%A, %B %-d").to_string()
}

fn write_featured(f: &mut fmt::Formatter<'_>, panel: &FeaturedPanel, now: DateTime<Local>) -> fmt::Result {
    let updated = panel.last_fetched.with_timezone(&Local).format("%H:%M");

    writeln!(f, "  {}", long_date(now))?;
    writeln!(f, "  {}  [{}]", panel.city, panel.background.asset_path())?;
    writeln!(f, "  Last updated: {updated}")?;
    writeln!(f)?;
    writeln!(f, "  {}°  {}  {}", panel.temperature, panel.icon.glyph(), panel.icon.label())?;
    writeln!(f, "  Feels like {}°", panel.feels_like)?;
    writeln!(f)?;

    let cards: Vec<String> = panel.stats.iter().map(stat_card).collect();
    writeln!(f, "  {}", cards.join("   "))
}

fn stat_card(card: &StatCard) -> String {
    format!("{}: {} {}", card.kind.title(), card.value, card.kind.unit())
}

fn write_roster(f: &mut fmt::Formatter<'_>, roster: &[RosterEntry]) -> fmt::Result {
    for (i, entry) in roster.iter().enumerate() {
        let marker = if entry.is_selected { ">" } else { " " };
        writeln!(
            f,
            "{marker} {:>2}. {:<16} {}  {:>4}°  {}% humidity",
            i + 1,
            entry.city,
            entry.icon.glyph(),
            entry.temperature,
            entry.humidity_pct,
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use live_weather_core::{
        Background, Icon,
        view::StatKind,
    };

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).earliest().unwrap()
    }

    fn dashboard(stats: Vec<StatCard>) -> Screen {
        Screen::Dashboard {
            featured: FeaturedPanel {
                city: "Toronto".into(),
                temperature: 11,
                feels_like: 9,
                icon: Icon::Cloudy,
                background: Background::Rain,
                last_fetched: Utc::now(),
                stats,
            },
            roster: vec![
                RosterEntry {
                    city: "Toronto".into(),
                    icon: Icon::Cloudy,
                    temperature: 11,
                    humidity_pct: 71.0,
                    is_selected: true,
                },
                RosterEntry {
                    city: "Phoenix".into(),
                    icon: Icon::SunnyHot,
                    temperature: 31,
                    humidity_pct: 12.0,
                    is_selected: false,
                },
            ],
        }
    }

    #[test]
    fn loading_and_error_screens() {
        assert_eq!(render_screen(&Screen::Loading, now()), "Loading weather data...\n");
        assert_eq!(
            render_screen(&Screen::Error("Failed to fetch weather data".into()), now()),
            "Failed to fetch weather data\n"
        );
    }

    #[test]
    fn dashboard_shows_header_panel_and_roster() {
        let text = render_screen(
            &dashboard(vec![
                StatCard { kind: StatKind::Wind, value: 14.8 },
                StatCard { kind: StatKind::Humidity, value: 71.0 },
            ]),
            now(),
        );

        assert!(text.starts_with("Live Weather"));
        assert!(text.contains("Monday, October 19"));
        assert!(text.contains("Toronto  [/rain.jpg]"));
        assert!(text.contains("Feels like 9°"));
        assert!(text.contains("💨 Wind: 14.8 km/h"));
        assert!(text.contains("💧 Humidity: 71 %"));
        assert!(!text.contains("Rain:"));
        assert!(text.contains(">  1. Toronto"));
        assert!(text.contains("   2. Phoenix"));
        assert!(text.contains("12% humidity"));
    }

    #[test]
    fn optional_cards_are_printed_when_present() {
        let text = render_screen(
            &dashboard(vec![
                StatCard { kind: StatKind::Wind, value: 3.0 },
                StatCard { kind: StatKind::Humidity, value: 90.0 },
                StatCard { kind: StatKind::Snowfall, value: 0.7 },
            ]),
            now(),
        );

        assert!(text.contains("❄️ Snowfall: 0.7 mm"));
    }

    #[test]
    fn display_matches_render_screen() {
        let screen = dashboard(vec![StatCard { kind: StatKind::Wind, value: 3.0 }]);
        let shown = format!("{}", ScreenText { screen: &screen, now: now() });

        assert_eq!(shown, render_screen(&screen, now()));
        assert!(shown.ends_with("12% humidity\n"));
    }
}
