use anyhow::{Context, Result};
use log::debug;
use reqwest::Client;
use serde::Deserialize;

use crate::domain::weather::Location;

pub const GEOCODE_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";

#[derive(Debug, Clone)]
pub struct GeocodeClient {
    client: Client,
    base_url: String,
}

impl Default for GeocodeClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GeocodeClient {
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(GEOCODE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(8))
                .build()
                .unwrap_or_default(),
            base_url: base_url.into(),
        }
    }

    /// Looks up a city and returns the best match, if any.
    pub async fn resolve(&self, city: &str) -> Result<Option<Location>> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("name", city),
                ("count", "1"),
                ("language", "en"),
                ("format", "json"),
            ])
            .send()
            .await
            .context("geocoding request failed")?
            .error_for_status()
            .context("geocoding request returned non-success status")?;

        let payload: GeocodeResponse = response
            .json()
            .await
            .context("failed to decode geocoding response")?;

        let location = payload
            .results
            .unwrap_or_default()
            .into_iter()
            .next()
            .map(GeocodeResult::into_location);
        debug!("geocoded {city:?} -> {location:?}");
        Ok(location)
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    results: Option<Vec<GeocodeResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    name: String,
    latitude: f64,
    longitude: f64,
    country: Option<String>,
    admin1: Option<String>,
}

impl GeocodeResult {
    fn into_location(self) -> Location {
        Location {
            name: self.name,
            latitude: self.latitude,
            longitude: self.longitude,
            country: self.country,
            admin1: self.admin1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_results_field_decodes_as_none() {
        let payload: GeocodeResponse =
            serde_json::from_str(r#"{"generationtime_ms":0.5}"#).expect("decode");
        assert!(payload.results.is_none());
    }

    #[test]
    fn first_result_keeps_region_fields() {
        let payload: GeocodeResponse = serde_json::from_str(
            r#"{"results":[{"name":"Lisbon","latitude":38.72,"longitude":-9.14,
                "country":"Portugal","admin1":"Lisbon","population":517802}]}"#,
        )
        .expect("decode");
        let location = payload
            .results
            .expect("results")
            .remove(0)
            .into_location();
        assert_eq!(location.display_name(), "Lisbon, Lisbon, Portugal");
    }
}
