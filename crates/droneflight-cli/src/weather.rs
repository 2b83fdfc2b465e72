//! HTTP client for the OpenWeather API.

use anyhow::{Context, Result};
use droneflight_core::{CurrentWeather, Forecast, WeatherError, WeatherProvider};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Blocking OpenWeather client.
///
/// Without an API key every request fails with [`WeatherError::NotConfigured`]
/// and no network call is made.
pub struct OpenWeatherClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl OpenWeatherClient {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `base_url` - API root (e.g., "https://api.openweathermap.org/data/2.5")
    /// * `api_key` - OpenWeather `appid`, if configured
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key,
        })
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, WeatherError> {
        let api_key = self.api_key.as_deref().ok_or(WeatherError::NotConfigured)?;
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint);
        debug!(%url, "requesting weather");

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("appid", api_key), ("units", "metric")])
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| WeatherError::Request(e.to_string()))?;

        response
            .json::<T>()
            .map_err(|e| WeatherError::Decode(e.to_string()))
    }
}

impl WeatherProvider for OpenWeatherClient {
    fn get_forecast(&self, lat: f64, lon: f64, hours: u32) -> Result<Forecast, WeatherError> {
        self.get_json(
            "forecast",
            &[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("cnt", hours.to_string()),
            ],
        )
    }

    fn get_current_weather(&self, lat: f64, lon: f64) -> Result<CurrentWeather, WeatherError> {
        self.get_json(
            "weather",
            &[("lat", lat.to_string()), ("lon", lon.to_string())],
        )
    }
}
