mod conditions;

pub use conditions::{weather_code_to_theme, weather_label};

#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub country: Option<String>,
    pub admin1: Option<String>,
}

impl Location {
    #[must_use]
    pub fn from_coords(lat: f64, lon: f64) -> Self {
        Self {
            name: format!("{lat:.4}, {lon:.4}"),
            latitude: lat,
            longitude: lon,
            country: None,
            admin1: None,
        }
    }

    #[must_use]
    pub fn display_name(&self) -> String {
        match (&self.admin1, &self.country) {
            (Some(admin), Some(country)) => format!("{}, {}, {}", self.name, admin, country),
            (None, Some(country)) => format!("{}, {}", self.name, country),
            _ => self.name.clone(),
        }
    }
}

/// Current-hour observation; `weather_code` picks the backdrop theme.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub temperature_2m_c: f32,
    pub relative_humidity_2m: f32,
    pub precipitation_mm: f32,
    pub wind_speed_10m: f32,
    pub pressure_msl_hpa: f32,
    pub weather_code: u8,
}

impl CurrentConditions {
    #[must_use]
    pub fn label(&self) -> &'static str {
        weather_label(self.weather_code)
    }

    #[must_use]
    pub fn rounded_temp(&self) -> i32 {
        self.temperature_2m_c.round() as i32
    }

    /// Humidity, wind, precipitation and pressure, e.g. `72% · 10 km/h · 0.4 mm · 1008 hPa`.
    #[must_use]
    pub fn readings(&self) -> String {
        format!(
            "{:.0}% · {:.0} km/h · {:.1} mm · {:.0} hPa",
            self.relative_humidity_2m,
            self.wind_speed_10m,
            self.precipitation_mm,
            self.pressure_msl_hpa
        )
    }
}

/// A resolved location together with its latest conditions.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionsReport {
    pub location: Location,
    pub current: CurrentConditions,
}
