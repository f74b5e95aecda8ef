use crate::backdrop::Theme;

/// Maps a WMO weather code to a backdrop theme; unknown codes look cloudy.
#[must_use]
pub fn weather_code_to_theme(code: u8) -> Theme {
    match code {
        0 => Theme::Clear,
        1..=3 | 45 | 48 => Theme::Cloudy,
        51 | 53 | 55..=57 | 61 | 63 | 65..=67 | 80..=82 => Theme::Rain,
        95 | 96 | 99 => Theme::Storm,
        _ => Theme::Cloudy,
    }
}

const WEATHER_LABELS: &[(u8, &str)] = &[
    (0, "Clear sky"),
    (1, "Mainly clear"),
    (2, "Partly cloudy"),
    (3, "Overcast"),
    (45, "Fog"),
    (48, "Depositing rime fog"),
    (51, "Light drizzle"),
    (53, "Moderate drizzle"),
    (55, "Dense drizzle"),
    (56, "Light freezing drizzle"),
    (57, "Dense freezing drizzle"),
    (61, "Slight rain"),
    (63, "Moderate rain"),
    (65, "Heavy rain"),
    (66, "Light freezing rain"),
    (67, "Heavy freezing rain"),
    (71, "Slight snowfall"),
    (73, "Moderate snowfall"),
    (75, "Heavy snowfall"),
    (77, "Snow grains"),
    (80, "Slight rain showers"),
    (81, "Moderate rain showers"),
    (82, "Violent rain showers"),
    (85, "Slight snow showers"),
    (86, "Heavy snow showers"),
    (95, "Thunderstorm"),
    (96, "Thunderstorm + light hail"),
    (99, "Thunderstorm + heavy hail"),
];

#[must_use]
pub fn weather_label(code: u8) -> &'static str {
    WEATHER_LABELS
        .iter()
        .find_map(|(candidate, label)| (*candidate == code).then_some(*label))
        .unwrap_or("Unknown")
}
