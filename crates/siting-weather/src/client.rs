//! HTTP client for the `OpenWeatherMap` current-weather endpoint.
//!
//! Wraps `reqwest` with API key management and reshapes the provider payload
//! into a [`WeatherReport`]. Failures are never retried.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::WeatherError;
use crate::types::{CurrentWeatherResponse, WeatherReport};

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/";

/// Client for the `OpenWeatherMap` REST API.
///
/// Use [`WeatherClient::new`] for production or [`WeatherClient::with_base_url`]
/// to point at a mock server in tests.
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl std::fmt::Debug for WeatherClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherClient")
            .field("api_key", &"[redacted]")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl WeatherClient {
    /// Creates a new client pointed at the production `OpenWeatherMap` API.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, WeatherError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`WeatherError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .user_agent("siting/0.1 (weather-lookup)")
            .build()?;

        // Exactly one trailing slash so `join("weather")` appends a segment
        // instead of replacing the last one.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| WeatherError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Fetches current conditions at `lat`/`lon` in metric units.
    ///
    /// # Errors
    ///
    /// - [`WeatherError::Http`] on network failure.
    /// - [`WeatherError::Provider`] on a non-2xx status.
    /// - [`WeatherError::Deserialize`] if the body does not match the expected shape.
    /// - [`WeatherError::MissingField`] if no condition description is present.
    pub async fn current(&self, lat: f64, lon: f64) -> Result<WeatherReport, WeatherError> {
        let url = self.build_url(lat, lon)?;
        tracing::debug!(lat, lon, "requesting current weather");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = provider_message(&body).unwrap_or_else(|| "unknown error".to_string());
            tracing::warn!(status = status.as_u16(), %message, "weather provider error");
            return Err(WeatherError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let payload: CurrentWeatherResponse =
            serde_json::from_str(&body).map_err(|e| WeatherError::Deserialize {
                context: format!("weather(lat={lat}, lon={lon})"),
                source: e,
            })?;

        reshape(payload)
    }

    /// Builds the request URL with properly percent-encoded query parameters.
    fn build_url(&self, lat: f64, lon: f64) -> Result<Url, WeatherError> {
        let mut url = self
            .base_url
            .join("weather")
            .map_err(|e| WeatherError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut()
            .append_pair("lat", &lat.to_string())
            .append_pair("lon", &lon.to_string())
            .append_pair("units", "metric")
            .append_pair("appid", &self.api_key);
        Ok(url)
    }
}

fn reshape(payload: CurrentWeatherResponse) -> Result<WeatherReport, WeatherError> {
    let description = payload
        .weather
        .into_iter()
        .next()
        .map(|c| c.description)
        .ok_or(WeatherError::MissingField("weather[0].description"))?;

    Ok(WeatherReport {
        temperature: payload.main.temp,
        weather: description,
        humidity: payload.main.humidity,
        wind_speed: payload.wind.speed,
    })
}

/// Extracts the `"message"` field `OpenWeatherMap` puts on error bodies.
fn provider_message(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("message")
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
