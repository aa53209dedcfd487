//! Mapping from raw measurements to display choices.
//!
//! Condition codes are WMO codes as reported by Open-Meteo. The thresholds
//! below are coarse on purpose: higher codes mean heavier precipitation.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    HeavyRain,
    Snow,
    LightRain,
    DrizzleFog,
    Cloudy,
    SunnyHot,
    ClearMild,
}

impl Icon {
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::HeavyRain => "🌧️",
            Icon::Snow => "🌨️",
            Icon::LightRain => "🌦️",
            Icon::DrizzleFog => "🌫️",
            Icon::Cloudy => "☁️",
            Icon::SunnyHot => "☀️",
            Icon::ClearMild => "🌤️",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Icon::HeavyRain => "rain",
            Icon::Snow => "snow",
            Icon::LightRain => "light rain",
            Icon::DrizzleFog => "drizzle/fog",
            Icon::Cloudy => "cloudy",
            Icon::SunnyHot => "sunny",
            Icon::ClearMild => "clear",
        }
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph())
    }
}

/// Backdrop image for the featured panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Background {
    Snow,
    Rain,
    Sunny,
}

impl Background {
    pub fn asset_path(&self) -> &'static str {
        match self {
            Background::Snow => "/snow.jpg",
            Background::Rain => "/rain.jpg",
            Background::Sunny => "/sunny.jpg",
        }
    }
}

/// First matching rule wins; codes are checked before temperature.
pub fn icon_for(temperature: f64, code: u32) -> Icon {
    match code {
        80.. => Icon::HeavyRain,
        71.. => Icon::Snow,
        61.. => Icon::LightRain,
        51.. => Icon::DrizzleFog,
        3.. => Icon::Cloudy,
        _ if temperature > 25.0 => Icon::SunnyHot,
        _ => Icon::ClearMild,
    }
}

/// Snow beats rain, and cloudy or foggy skies reuse the rain backdrop.
///
/// `temperature` takes no part in the choice today.
pub fn background_for(code: u32, _temperature: f64, rain_mm: f64, snow_mm: f64) -> Background {
    if snow_mm > 0.0 || code >= 71 {
        Background::Snow
    } else if rain_mm > 0.0 || code >= 3 {
        // 61.. is rain; 3..61 is cloud or fog, shown with the same image.
        Background::Rain
    } else {
        Background::Sunny
    }
}

/// Rounds half toward positive infinity, so `-2.5` becomes `-2`.
pub fn round_temp(value: f64) -> i64 {
    // f64::round sends halves away from zero; pull negative halves back up.
    let r = value.round();
    if value - r == 0.5 { (r + 1.0) as i64 } else { r as i64 }
}

/// Fixed two-degree offset below the measured temperature, rounded.
pub fn feels_like(temperature: f64) -> i64 {
    round_temp(temperature - 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heavy_rain_for_high_codes_regardless_of_temperature() {
        for code in [80, 81, 95, 99, 1000, u32::MAX] {
            for temp in [-30.0, 0.0, 26.0, 45.0] {
                assert_eq!(icon_for(temp, code), Icon::HeavyRain, "code {code} temp {temp}");
            }
        }
    }

    #[test]
    fn icon_thresholds() {
        assert_eq!(icon_for(30.0, 0), Icon::SunnyHot);
        assert_eq!(icon_for(10.0, 0), Icon::ClearMild);
        assert_eq!(icon_for(20.0, 55), Icon::DrizzleFog);
        assert_eq!(icon_for(20.0, 71), Icon::Snow);
        assert_eq!(icon_for(20.0, 79), Icon::Snow);
        assert_eq!(icon_for(20.0, 61), Icon::LightRain);
        assert_eq!(icon_for(20.0, 51), Icon::DrizzleFog);
        assert_eq!(icon_for(30.0, 3), Icon::Cloudy);
        assert_eq!(icon_for(30.0, 2), Icon::SunnyHot);
    }

    #[test]
    fn sunny_hot_needs_strictly_more_than_25() {
        assert_eq!(icon_for(25.0, 0), Icon::ClearMild);
        assert_eq!(icon_for(25.1, 1), Icon::SunnyHot);
    }

    #[test]
    fn nan_temperature_falls_through_to_clear() {
        assert_eq!(icon_for(f64::NAN, 0), Icon::ClearMild);
    }

    #[test]
    fn background_rules() {
        assert_eq!(background_for(0, 30.0, 0.0, 0.0), Background::Sunny);
        assert_eq!(background_for(65, 10.0, 0.0, 0.0), Background::Rain);
        assert_eq!(background_for(75, 10.0, 0.0, 0.0), Background::Snow);
        assert_eq!(background_for(5, 10.0, 0.0, 0.0), Background::Rain);
    }

    #[test]
    fn measured_amounts_override_clear_code() {
        assert_eq!(background_for(0, 20.0, 0.4, 0.0), Background::Rain);
        assert_eq!(background_for(0, -5.0, 0.0, 0.2), Background::Snow);
        assert_eq!(background_for(61, -5.0, 1.0, 0.2), Background::Snow);
    }

    #[test]
    fn background_ignores_temperature() {
        for temp in [-40.0, 0.0, 25.0, 40.0] {
            assert_eq!(background_for(0, temp, 0.0, 0.0), Background::Sunny);
        }
    }

    #[test]
    fn mapping_is_deterministic() {
        for code in [0, 2, 3, 51, 61, 71, 80] {
            assert_eq!(icon_for(18.5, code), icon_for(18.5, code));
            assert_eq!(
                background_for(code, 18.5, 0.1, 0.0),
                background_for(code, 18.5, 0.1, 0.0)
            );
        }
    }

    #[test]
    fn rounding_matches_half_up() {
        assert_eq!(round_temp(2.5), 3);
        assert_eq!(round_temp(2.4), 2);
        assert_eq!(round_temp(-2.5), -2);
        assert_eq!(round_temp(-2.6), -3);
        assert_eq!(round_temp(-0.5), 0);
    }

    #[test]
    fn rounding_just_below_half_goes_down() {
        assert_eq!(round_temp(0.499_999_999_999_999_94), 0);
        assert_eq!(round_temp(-0.499_999_999_999_999_94), 0);
        assert_eq!(round_temp(1.499_999_999_999_999_8), 1);
    }

    #[test]
    fn feels_like_is_two_below() {
        assert_eq!(feels_like(20.0), 18);
        assert_eq!(feels_like(0.4), -2);
        assert_eq!(feels_like(4.5), 3);
    }

    #[test]
    fn background_asset_paths() {
        assert_eq!(Background::Snow.asset_path(), "/snow.jpg");
        assert_eq!(Background::Rain.asset_path(), "/rain.jpg");
        assert_eq!(Background::Sunny.asset_path(), "/sunny.jpg");
    }
}
