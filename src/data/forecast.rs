use anyhow::{Context, Result};
use log::debug;
use reqwest::Client;
use serde::Deserialize;

use crate::domain::weather::{CurrentConditions, Location};

pub const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

const CURRENT_FIELDS: &str =
    "temperature_2m,relative_humidity_2m,precipitation,wind_speed_10m,pressure_msl,weather_code";

#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: Client,
    base_url: String,
}

impl Default for ForecastClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ForecastClient {
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(FORECAST_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .unwrap_or_default(),
            base_url: base_url.into(),
        }
    }

    pub async fn fetch_current(&self, location: &Location) -> Result<CurrentConditions> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", location.latitude.to_string()),
                ("longitude", location.longitude.to_string()),
                ("current", CURRENT_FIELDS.to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await
            .context("forecast request failed")?
            .error_for_status()
            .context("forecast request returned non-success status")?;

        let payload: ForecastResponse = response
            .json()
            .await
            .context("failed to parse forecast payload")?;
        debug!(
            "current weather code {} for {}",
            payload.current.weather_code, location.name
        );
        Ok(payload.current.into())
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: CurrentBlock,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    temperature_2m: f32,
    relative_humidity_2m: f32,
    #[serde(default)]
    precipitation: f32,
    wind_speed_10m: f32,
    pressure_msl: f32,
    weather_code: u8,
}

impl From<CurrentBlock> for CurrentConditions {
    fn from(block: CurrentBlock) -> Self {
        Self {
            temperature_2m_c: block.temperature_2m,
            relative_humidity_2m: block.relative_humidity_2m,
            precipitation_mm: block.precipitation,
            wind_speed_10m: block.wind_speed_10m,
            pressure_msl_hpa: block.pressure_msl,
            weather_code: block.weather_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_block_maps_into_conditions() {
        let payload: ForecastResponse = serde_json::from_str(
            r#"{"current":{"time":"2026-02-12T10:00","temperature_2m":4.6,
                "relative_humidity_2m":88,"precipitation":1.2,"wind_speed_10m":21.3,
                "pressure_msl":1002.4,"weather_code":63}}"#,
        )
        .expect("decode");
        let current = CurrentConditions::from(payload.current);
        assert_eq!(current.weather_code, 63);
        assert_eq!(current.rounded_temp(), 5);
        assert!((current.precipitation_mm - 1.2).abs() < f32::EPSILON);
    }

    #[test]
    fn missing_precipitation_defaults_to_zero() {
        let payload: ForecastResponse = serde_json::from_str(
            r#"{"current":{"temperature_2m":1.0,"relative_humidity_2m":50,
                "wind_speed_10m":3.0,"pressure_msl":1015.0,"weather_code":0}}"#,
        )
        .expect("decode");
        assert!(payload.current.precipitation.abs() < f32::EPSILON);
    }
}
