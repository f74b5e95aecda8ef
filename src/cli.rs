#![allow(clippy::missing_errors_doc)]

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::backdrop::Theme;

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ThemeArg {
    Clear,
    Cloudy,
    #[value(alias = "rainy")]
    Rain,
    Storm,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Clear => Self::Clear,
            ThemeArg::Cloudy => Self::Cloudy,
            ThemeArg::Rain => Self::Rain,
            ThemeArg::Storm => Self::Storm,
        }
    }
}

#[derive(Debug, Parser, Clone)]
#[command(
    name = "weather-backdrop",
    version,
    about = "Animated weather backdrop for the terminal"
)]
pub struct Cli {
    /// City whose current weather picks the backdrop
    pub city: Option<String>,

    /// Direct latitude (requires --lon)
    #[arg(long, allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Direct longitude (requires --lat)
    #[arg(long, allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Force a backdrop theme instead of looking up the weather
    #[arg(long, value_enum, conflicts_with = "weather_code")]
    pub theme: Option<ThemeArg>,

    /// Derive the theme from a WMO weather code instead of looking it up
    #[arg(long)]
    pub weather_code: Option<u8>,

    /// Target FPS (15..60)
    #[arg(long, value_parser = clap::value_parser!(u8).range(15..=60))]
    pub fps: Option<u8>,

    /// Logical pixels per half-block terminal pixel
    #[arg(long)]
    pub cell_size: Option<f32>,

    /// Upper bound on live raindrops
    #[arg(long)]
    pub particle_cap: Option<usize>,

    /// Seed for reproducible animation
    #[arg(long)]
    pub seed: Option<u64>,

    /// Weather refresh interval in seconds
    #[arg(long)]
    pub refresh_interval: Option<u64>,

    /// Hide the status line
    #[arg(long)]
    pub no_status: bool,

    /// Override the geocoding endpoint
    #[arg(long)]
    pub geocode_url: Option<String>,

    /// Override the forecast endpoint
    #[arg(long)]
    pub forecast_url: Option<String>,

    /// Write logs to this file (honours RUST_LOG)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Persist the effective settings as the new defaults
    #[arg(long)]
    pub save_settings: bool,
}

impl Cli {
    pub fn validate(&self) -> anyhow::Result<()> {
        match (self.lat, self.lon) {
            (Some(_), None) | (None, Some(_)) => {
                anyhow::bail!("--lat and --lon must be provided together")
            }
            _ => {}
        }
        if let Some(size) = self.cell_size
            && !(size.is_finite() && size >= 1.0)
        {
            anyhow::bail!("--cell-size must be at least 1");
        }
        if self.particle_cap == Some(0) {
            anyhow::bail!("--particle-cap must be positive");
        }
        Ok(())
    }

    /// Theme fixed on the command line, either directly or through a weather code.
    #[must_use]
    pub fn fixed_theme(&self) -> Option<Theme> {
        self.theme.map(Theme::from).or_else(|| {
            self.weather_code
                .map(crate::domain::weather::weather_code_to_theme)
        })
    }

    /// Whether the live weather should be looked up at all.
    #[must_use]
    pub fn wants_lookup(&self) -> bool {
        self.fixed_theme().is_none()
    }

    #[must_use]
    pub fn default_city(&self) -> String {
        self.city.clone().unwrap_or_else(|| "Stockholm".to_string())
    }
}
