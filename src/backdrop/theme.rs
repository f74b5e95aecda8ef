use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Clear,
    Cloudy,
    Rain,
    Storm,
}

/// Field configuration applied whenever a theme becomes active.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeProfile {
    pub clouds: usize,
    pub rain_intensity: f32,
    pub wind: f32,
}

impl Theme {
    pub const ALL: [Self; 4] = [Self::Clear, Self::Cloudy, Self::Rain, Self::Storm];

    #[must_use]
    pub const fn profile(self) -> ThemeProfile {
        match self {
            Self::Clear => ThemeProfile {
                clouds: 2,
                rain_intensity: 0.0,
                wind: 0.0,
            },
            Self::Cloudy => ThemeProfile {
                clouds: 8,
                rain_intensity: 0.0,
                wind: 0.0,
            },
            Self::Rain => ThemeProfile {
                clouds: 0,
                rain_intensity: 0.9,
                wind: -2.5,
            },
            Self::Storm => ThemeProfile {
                clouds: 0,
                rain_intensity: 1.4,
                wind: -4.5,
            },
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Cloudy => "cloudy",
            Self::Rain => "rain",
            Self::Storm => "storm",
        }
    }

    #[must_use]
    pub const fn is_wet(self) -> bool {
        matches!(self, Self::Rain | Self::Storm)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown backdrop theme `{0}` (expected clear, cloudy, rain or storm)")]
pub struct ThemeParseError(pub String);

impl FromStr for Theme {
    type Err = ThemeParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "clear" => Ok(Self::Clear),
            "cloudy" => Ok(Self::Cloudy),
            "rain" | "rainy" => Ok(Self::Rain),
            "storm" => Ok(Self::Storm),
            _ => Err(ThemeParseError(value.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_match_reset_table() {
        assert_eq!(Theme::Clear.profile().clouds, 2);
        assert_eq!(Theme::Cloudy.profile().clouds, 8);
        assert_eq!(Theme::Rain.profile().clouds, 0);
        assert_eq!(Theme::Storm.profile().clouds, 0);
        assert!((Theme::Rain.profile().rain_intensity - 0.9).abs() < f32::EPSILON);
        assert!((Theme::Rain.profile().wind + 2.5).abs() < f32::EPSILON);
        assert!((Theme::Storm.profile().rain_intensity - 1.4).abs() < f32::EPSILON);
        assert!((Theme::Storm.profile().wind + 4.5).abs() < f32::EPSILON);
        assert!(Theme::Clear.profile().rain_intensity.abs() < f32::EPSILON);
    }

    #[test]
    fn parses_theme_strings_including_rainy_alias() {
        assert_eq!("clear".parse::<Theme>(), Ok(Theme::Clear));
        assert_eq!(" Cloudy ".parse::<Theme>(), Ok(Theme::Cloudy));
        assert_eq!("rainy".parse::<Theme>(), Ok(Theme::Rain));
        assert_eq!("RAIN".parse::<Theme>(), Ok(Theme::Rain));
        assert_eq!("storm".parse::<Theme>(), Ok(Theme::Storm));
    }

    #[test]
    fn rejects_unknown_theme_string() {
        let err = "snow".parse::<Theme>().expect_err("snow is not a theme");
        assert!(err.to_string().contains("snow"));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for theme in Theme::ALL {
            assert_eq!(theme.to_string().parse::<Theme>(), Ok(theme));
        }
    }
}
