//! Core data models for the hourcast forecast library
//!
//! This module contains the typed representation of a decoded forecast
//! document: the location it was fetched for, current conditions, and the
//! ordered list of daily forecasts with their hourly readings.

pub mod forecast;

pub use forecast::{FetchError, ForecastClient, ForecastConfig, ForecastFetcher};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::window::{build_window, WindowEntry, WindowError};

/// A decoded forecast document
///
/// Days are kept in API order: day 0 is today, day 1 is tomorrow, and so on.
/// The API returns seven days; the rolling-window algorithm only requires
/// the first two. The document is immutable once decoded and is replaced
/// wholesale on every successful fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// Location the forecast was resolved for
    pub location: Location,
    /// Current conditions at the location
    pub current: Current,
    /// Ordered daily forecasts (day 0 = today)
    pub days: Vec<DayForecast>,
}

impl Forecast {
    /// Builds the rolling 24-hour outlook strip anchored at `current_hour`.
    ///
    /// Stitches the remaining hours of today (`days[0]`) and the early hours
    /// of tomorrow (`days[1]`) into one chronological sequence. Fails with
    /// [`WindowError::WindowUnavailable`] when fewer than two days are
    /// present or today's data does not cover the current hour; callers
    /// should degrade to the non-windowed summary rather than fail.
    pub fn rolling_window(&self, current_hour: u8) -> Result<Vec<WindowEntry>, WindowError> {
        let (Some(today), Some(tomorrow)) = (self.days.first(), self.days.get(1)) else {
            return Err(WindowError::WindowUnavailable);
        };
        build_window(today, tomorrow, current_hour)
    }
}

/// Location metadata from the forecast API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Human-readable location name
    pub name: String,
}

/// Current weather conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Current {
    /// Current temperature in Celsius
    pub temperature: f64,
    /// Short condition text (e.g. "Partly cloudy")
    pub condition: String,
}

/// Forecast for a single calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayForecast {
    /// Calendar date of this forecast day
    pub date: NaiveDate,
    /// Minimum temperature in Celsius
    pub min_temp: f64,
    /// Maximum temperature in Celsius
    pub max_temp: f64,
    /// Hourly readings, nominally 24 but not guaranteed unique or contiguous
    pub hours: Vec<HourReading>,
}

impl DayForecast {
    /// Returns the display label for this day: the literal "Today" when the
    /// date matches `today`, otherwise the short weekday name.
    pub fn day_label(&self, today: NaiveDate) -> String {
        if self.date == today {
            "Today".to_string()
        } else {
            self.date.format("%a").to_string()
        }
    }
}

/// A single hourly forecast reading
///
/// The timestamp is kept as the raw "YYYY-MM-DD HH:MM" wire string because
/// hour-of-day extraction is deliberately lossy (see [`crate::window`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourReading {
    /// Raw timestamp in "YYYY-MM-DD HH:MM" format
    pub time: String,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Short condition text
    pub condition: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(date: &str, hours: Vec<HourReading>) -> DayForecast {
        DayForecast {
            date: date.parse().unwrap(),
            min_temp: 1.0,
            max_temp: 9.0,
            hours,
        }
    }

    #[test]
    fn test_forecast_serialization_roundtrip() {
        let forecast = Forecast {
            location: Location {
                name: "Moscow".to_string(),
            },
            current: Current {
                temperature: 5.9,
                condition: "Overcast".to_string(),
            },
            days: vec![day(
                "2024-01-01",
                vec![HourReading {
                    time: "2024-01-01 14:00".to_string(),
                    temperature: 5.9,
                    condition: "Overcast".to_string(),
                }],
            )],
        };

        let json = serde_json::to_string(&forecast).expect("Failed to serialize Forecast");
        let deserialized: Forecast =
            serde_json::from_str(&json).expect("Failed to deserialize Forecast");

        assert_eq!(deserialized, forecast);
    }

    #[test]
    fn test_day_label_is_today_for_matching_date() {
        let d = day("2024-01-01", vec![]);
        assert_eq!(d.day_label("2024-01-01".parse().unwrap()), "Today");
    }

    #[test]
    fn test_day_label_is_short_weekday_for_other_dates() {
        // 2024-01-02 was a Tuesday
        let d = day("2024-01-02", vec![]);
        assert_eq!(d.day_label("2024-01-01".parse().unwrap()), "Tue");
    }

    #[test]
    fn test_rolling_window_requires_two_days() {
        let forecast = Forecast {
            location: Location {
                name: "Moscow".to_string(),
            },
            current: Current {
                temperature: 5.9,
                condition: "Overcast".to_string(),
            },
            days: vec![day(
                "2024-01-01",
                vec![HourReading {
                    time: "2024-01-01 14:00".to_string(),
                    temperature: 5.9,
                    condition: "Overcast".to_string(),
                }],
            )],
        };

        assert!(matches!(
            forecast.rolling_window(14),
            Err(WindowError::WindowUnavailable)
        ));
    }
}
