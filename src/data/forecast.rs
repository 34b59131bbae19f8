//! WeatherAPI forecast client
//!
//! This module provides functionality to fetch a seven-day hourly forecast
//! from the WeatherAPI endpoint and decode it into the [`Forecast`] model,
//! classifying every failure into a retriable error kind.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use super::{Current, DayForecast, Forecast, HourReading, Location};
use crate::location::{Coordinates, FALLBACK_COORDINATES};

/// Base URL for the WeatherAPI forecast endpoint
const WEATHER_API_BASE_URL: &str = "https://api.weatherapi.com/v1/forecast.json";

/// Number of forecast days requested from the API
const FORECAST_DAYS: u8 = 7;

/// Deadline for a single forecast request
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Errors that can occur when fetching or decoding a forecast
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request could not be constructed
    #[error("Invalid request")]
    InvalidRequest,

    /// Transport succeeded but the response is not a well-formed HTTP response
    #[error("Invalid server response")]
    InvalidResponse,

    /// HTTP status outside 200-299
    #[error("Server error (status {0})")]
    ServerError(u16),

    /// Transport-level failure: DNS, timeout, offline
    #[error("No internet connection")]
    NoConnection,

    /// Response body does not match the expected document shape
    #[error("Failed to decode forecast payload")]
    DecodingFailed,

    /// Any other failure, with the underlying detail preserved
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Self::InvalidRequest
        } else if err.is_timeout() || err.is_connect() {
            Self::NoConnection
        } else if err.is_decode() {
            Self::DecodingFailed
        } else if err.is_body() {
            Self::InvalidResponse
        } else {
            Self::Unknown(err.to_string())
        }
    }
}

/// Configuration for the forecast client
#[derive(Debug, Clone)]
pub struct ForecastConfig {
    /// WeatherAPI key sent with every request
    pub api_key: String,
    /// Base URL of the forecast endpoint (override for testing)
    pub base_url: String,
    /// Number of days to request
    pub forecast_days: u8,
    /// Per-request deadline; exceeding it is classified as `NoConnection`
    pub timeout: Duration,
}

impl ForecastConfig {
    /// Creates a configuration with the documented endpoint and limits.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: WEATHER_API_BASE_URL.to_string(),
            forecast_days: FORECAST_DAYS,
            timeout: REQUEST_TIMEOUT,
        }
    }
}

/// Asynchronous source of decoded forecast documents
///
/// Omitted coordinates imply the documented fallback location. Implemented
/// by [`ForecastClient`] in production and by mocks in tests.
#[async_trait]
pub trait ForecastFetcher: Send + Sync {
    /// Fetches and decodes a forecast for the given coordinates.
    async fn fetch_forecast(&self, coordinates: Option<Coordinates>)
        -> Result<Forecast, FetchError>;
}

/// Client for fetching forecasts from WeatherAPI
#[derive(Debug, Clone)]
pub struct ForecastClient {
    http_client: Client,
    config: ForecastConfig,
}

impl ForecastClient {
    /// Creates a client for the documented endpoint.
    pub fn new(api_key: impl Into<String>) -> Result<Self, FetchError> {
        Self::from_config(ForecastConfig::new(api_key))
    }

    /// Creates a client from an explicit configuration.
    pub fn from_config(config: ForecastConfig) -> Result<Self, FetchError> {
        let http_client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http_client,
            config,
        })
    }
}

#[async_trait]
impl ForecastFetcher for ForecastClient {
    async fn fetch_forecast(
        &self,
        coordinates: Option<Coordinates>,
    ) -> Result<Forecast, FetchError> {
        let Coordinates {
            latitude,
            longitude,
        } = coordinates.unwrap_or(FALLBACK_COORDINATES);

        debug!(latitude, longitude, "requesting forecast");

        let response = self
            .http_client
            .get(&self.config.base_url)
            .query(&[
                ("key", self.config.api_key.as_str()),
                ("q", &format!("{latitude},{longitude}")),
                ("days", &self.config.forecast_days.to_string()),
            ])
            .send()
            .await
            .map_err(|err| {
                warn!(error = %err, "forecast request failed");
                FetchError::from(err)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "forecast request rejected");
            return Err(FetchError::ServerError(status.as_u16()));
        }

        let payload: ApiResponse = response.json().await.map_err(|err| {
            warn!(error = %err, "forecast payload could not be decoded");
            FetchError::from(err)
        })?;

        debug!(days = payload.forecast.forecastday.len(), "forecast decoded");
        Ok(payload.into())
    }
}

/// WeatherAPI response structure
#[derive(Debug, Deserialize)]
struct ApiResponse {
    location: ApiLocation,
    current: ApiCurrent,
    forecast: ApiForecast,
}

#[derive(Debug, Deserialize)]
struct ApiLocation {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ApiCurrent {
    temp_c: f64,
    condition: ApiCondition,
}

#[derive(Debug, Deserialize)]
struct ApiCondition {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ApiForecast {
    forecastday: Vec<ApiForecastDay>,
}

#[derive(Debug, Deserialize)]
struct ApiForecastDay {
    date: NaiveDate,
    day: ApiDay,
    hour: Vec<ApiHour>,
}

#[derive(Debug, Deserialize)]
struct ApiDay {
    maxtemp_c: f64,
    mintemp_c: f64,
}

#[derive(Debug, Deserialize)]
struct ApiHour {
    time: String,
    temp_c: f64,
    condition: ApiCondition,
}

impl From<ApiResponse> for Forecast {
    fn from(response: ApiResponse) -> Self {
        Self {
            location: Location {
                name: response.location.name,
            },
            current: Current {
                temperature: response.current.temp_c,
                condition: response.current.condition.text,
            },
            days: response
                .forecast
                .forecastday
                .into_iter()
                .map(|day| DayForecast {
                    date: day.date,
                    min_temp: day.day.mintemp_c,
                    max_temp: day.day.maxtemp_c,
                    hours: day
                        .hour
                        .into_iter()
                        .map(|hour| HourReading {
                            time: hour.time,
                            temperature: hour.temp_c,
                            condition: hour.condition.text,
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}
