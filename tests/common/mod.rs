#![allow(dead_code)]

use weather_backdrop::{
    app::{settings::RuntimeSettings, state::AppState},
    cli::Cli,
    domain::weather::{ConditionsReport, CurrentConditions, Location},
};

pub fn offline_cli() -> Cli {
    Cli {
        city: Some("Stockholm".to_string()),
        lat: None,
        lon: None,
        theme: None,
        weather_code: None,
        fps: None,
        cell_size: None,
        particle_cap: None,
        seed: Some(11),
        refresh_interval: None,
        no_status: false,
        geocode_url: None,
        forecast_url: None,
        log_file: None,
        save_settings: false,
    }
}

pub fn state_for(cli: &Cli) -> AppState {
    let settings = RuntimeSettings::default().with_cli_overrides(cli);
    AppState::with_settings(cli, settings, None)
}

pub fn stockholm_location() -> Location {
    Location {
        name: "Stockholm".to_string(),
        latitude: 59.3293,
        longitude: 18.0686,
        country: Some("Sweden".to_string()),
        admin1: Some("Stockholm".to_string()),
    }
}

pub fn report(weather_code: u8) -> ConditionsReport {
    ConditionsReport {
        location: stockholm_location(),
        current: CurrentConditions {
            temperature_2m_c: 4.6,
            relative_humidity_2m: 88.0,
            precipitation_mm: 1.2,
            wind_speed_10m: 21.3,
            pressure_msl_hpa: 1002.4,
            weather_code,
        },
    }
}

pub fn geocode_body() -> &'static str {
    r#"
    {
      "results": [
        {
          "name": "Stockholm",
          "latitude": 59.3293,
          "longitude": 18.0686,
          "country": "Sweden",
          "admin1": "Stockholm"
        }
      ]
    }
    "#
}

pub fn forecast_body(weather_code: u8) -> String {
    format!(
        r#"{{"current":{{"time":"2026-02-12T10:00","temperature_2m":4.6,
            "relative_humidity_2m":88,"precipitation":1.2,"wind_speed_10m":21.3,
            "pressure_msl":1002.4,"weather_code":{weather_code}}}}}"#
    )
}
