//! Rolling 24-hour window construction
//!
//! Stitches "remaining hours of today" and "early hours of tomorrow" from
//! two independently-indexed daily hour arrays into one continuous,
//! chronologically ordered sequence anchored at the current hour. The
//! current hour is always injected by the caller, never read from the wall
//! clock here, so the whole module is pure and deterministic.

use thiserror::Error;

use crate::data::DayForecast;

/// Errors raised while deriving the rolling window
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WindowError {
    /// Today's hourly data does not cover the current hour, or fewer than
    /// two forecast days are available
    #[error("Rolling window unavailable: today's data does not cover the current hour")]
    WindowUnavailable,

    /// An hourly reading's timestamp could not be parsed into an hour-of-day
    #[error("Malformed hourly timestamp: {0}")]
    MalformedTimestamp(String),
}

/// One entry of the rolling 24-hour strip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowEntry {
    /// "now" for the first entry, a zero-padded two-digit hour otherwise
    pub label: String,
    /// Temperature in Celsius, truncated toward zero
    pub temperature: i32,
}

/// Dense hour-of-day lookup built from a day's hourly readings
///
/// Holds at most one temperature per hour-of-day. When two readings parse to
/// the same hour, the later one in iteration order silently overwrites the
/// earlier; hours with no reading stay empty. Built fresh per request.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct HourIndex {
    slots: [Option<i32>; 24],
}

impl HourIndex {
    /// Builds the lookup from a day's hourly readings.
    pub(crate) fn build(day: &DayForecast) -> Result<Self, WindowError> {
        let mut slots = [None; 24];
        for reading in &day.hours {
            let hour = parse_hour_of_day(&reading.time)?;
            slots[hour as usize] = Some(reading.temperature as i32);
        }
        Ok(Self { slots })
    }

    pub(crate) fn get(&self, hour: u8) -> Option<i32> {
        self.slots.get(hour as usize).copied().flatten()
    }
}

/// Extracts the hour-of-day from a "YYYY-MM-DD HH:MM" timestamp
///
/// Takes the time-of-day portion (everything after the last space) and
/// parses its first two characters as a base-10 integer. Anything that does
/// not yield an integer in 0..=23 is a malformed timestamp.
fn parse_hour_of_day(time: &str) -> Result<u8, WindowError> {
    let time_part = time
        .split(' ')
        .next_back()
        .ok_or_else(|| WindowError::MalformedTimestamp(time.to_string()))?;

    let hour: u8 = time_part
        .get(..2)
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| WindowError::MalformedTimestamp(time.to_string()))?;

    if hour > 23 {
        return Err(WindowError::MalformedTimestamp(time.to_string()));
    }
    Ok(hour)
}

/// Builds the rolling window from today's and tomorrow's forecasts.
///
/// The single hard precondition is that today's data covers `current_hour`;
/// if it does not, the window is unavailable and no partial sequence is
/// produced. Hours missing from either index are skipped silently, so the
/// result can be shorter on sparse data without being an error.
/// With full coverage on both days the strip spans a full 24 hours:
/// today's hours ascending from `current_hour` to 23, then tomorrow's
/// ascending from 0 to `current_hour`, so the wrap hour closes the strip.
pub fn build_window(
    today: &DayForecast,
    tomorrow: &DayForecast,
    current_hour: u8,
) -> Result<Vec<WindowEntry>, WindowError> {
    let today_index = HourIndex::build(today)?;
    let tomorrow_index = HourIndex::build(tomorrow)?;

    if today_index.get(current_hour).is_none() {
        return Err(WindowError::WindowUnavailable);
    }

    // Chronological (hour, temperature) pairs: rest of today, then the
    // start of tomorrow up to and including the wrap hour.
    let mut pairs: Vec<(u8, i32)> = Vec::with_capacity(24);
    for hour in current_hour..24 {
        if let Some(temp) = today_index.get(hour) {
            pairs.push((hour, temp));
        }
    }
    for hour in 0..=current_hour {
        if let Some(temp) = tomorrow_index.get(hour) {
            pairs.push((hour, temp));
        }
    }

    Ok(pairs
        .into_iter()
        .enumerate()
        .map(|(i, (hour, temperature))| WindowEntry {
            label: if i == 0 {
                "now".to_string()
            } else {
                format!("{hour:02}")
            },
            temperature,
        })
        .collect())
}
