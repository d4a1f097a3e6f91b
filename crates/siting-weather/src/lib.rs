//! Current-weather lookups against the `OpenWeatherMap` API.

pub mod client;
pub mod error;
pub mod types;

pub use client::WeatherClient;
pub use error::WeatherError;
pub use types::WeatherReport;
