//! `OpenWeatherMap` response types and the reshaped report served to clients.

use serde::{Deserialize, Serialize};

/// Subset of the `/weather` (current conditions) response that we read.
#[derive(Debug, Deserialize)]
pub struct CurrentWeatherResponse {
    pub main: MainReadings,
    #[serde(default)]
    pub weather: Vec<Condition>,
    pub wind: Wind,
}

#[derive(Debug, Deserialize)]
pub struct MainReadings {
    /// Degrees Celsius (we always request `units=metric`).
    pub temp: f64,
    /// Relative humidity, percent.
    pub humidity: f64,
}

#[derive(Debug, Deserialize)]
pub struct Condition {
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct Wind {
    /// Metres per second.
    pub speed: f64,
}

/// Current conditions at a coordinate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    pub temperature: f64,
    pub weather: String,
    pub humidity: f64,
    pub wind_speed: f64,
}
