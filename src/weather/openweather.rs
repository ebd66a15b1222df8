// Copyright (c) 2026 hazwatch contributors
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/hazwatch/hazwatch

//! OpenWeatherMap current-conditions client

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};

use super::{WeatherProvider, WeatherReading};
use crate::config::{Location, WeatherConfig};
use crate::error::FetchError;

/// Client for the OpenWeatherMap `/weather` endpoint.
///
/// One instance is shared across all refreshes; the underlying HTTP pool
/// carries the configured per-request timeout.
pub struct OpenWeatherMap {
    http: Client,
    api_key: SecretString,
    base_url: String,
}

impl OpenWeatherMap {
    /// Build a client from the weather section of the configuration.
    pub fn new(config: &WeatherConfig) -> anyhow::Result<Self> {
        let http = Client::builder().timeout(config.request_timeout()).build()?;
        Ok(Self {
            http,
            api_key: SecretString::new(config.api_key.clone()),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn request_url(&self, location: &Location) -> String {
        format!(
            "{}/weather?lat={}&lon={}&units=metric&appid={}",
            self.base_url,
            location.latitude,
            location.longitude,
            self.api_key.expose_secret()
        )
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherMap {
    async fn fetch_current(&self, location: &Location) -> Result<WeatherReading, FetchError> {
        let response = self.http.get(self.request_url(location)).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Provider { status: status.as_u16() });
        }
        let body = response.text().await?;
        parse_current(&body)
    }
}

/// Subset of the provider response this engine consumes.
#[derive(Debug, serde::Deserialize)]
struct OwmCurrentResponse {
    main: OwmMain,
    weather: Vec<OwmCondition>,
    rain: Option<OwmRain>,
}

#[derive(Debug, serde::Deserialize)]
struct OwmMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, serde::Deserialize)]
struct OwmCondition {
    description: String,
}

#[derive(Debug, serde::Deserialize)]
struct OwmRain {
    #[serde(rename = "1h")]
    one_hour: Option<f64>,
}

/// Parse a provider body into a reading.
///
/// Split out from the transport so malformed payloads can be exercised
/// without a live endpoint. Absent rain data means zero rainfall.
pub(crate) fn parse_current(body: &str) -> Result<WeatherReading, FetchError> {
    let data: OwmCurrentResponse = serde_json::from_str(body)?;
    let condition = data
        .weather
        .first()
        .map(|w| capitalize(&w.description))
        .unwrap_or_default();
    let rainfall_1h_mm = data.rain.and_then(|r| r.one_hour).unwrap_or(0.0);
    Ok(WeatherReading {
        temperature_c: data.main.temp,
        humidity_pct: data.main.humidity,
        condition,
        rainfall_1h_mm,
        fetched_at: Utc::now(),
    })
}

/// Uppercase the first letter, lowercase the rest, as display copy.
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}
