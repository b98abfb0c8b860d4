//! Calendar keys and duration text for the attendance ledger.
//!
//! The ledger keys days as `DD-MM-YYYY` and stores values as `H:MM:SS` with
//! unpadded hours. Both forms live on disk, so parsing must accept anything
//! formatting can produce; hours are unbounded while minutes and seconds
//! stay below 60.

use std::fmt;

use chrono::{Local, NaiveDate};

use crate::error::{MinderError, Result};

/// A calendar date in the ledger's `DD-MM-YYYY` key form, taken from the
/// process-local clock.
///
/// Equality is the only comparison the watch loops need: a key that stops
/// matching "today" is a date rollover.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DayKey(String);

impl DayKey {
    /// Today according to the local clock.
    pub fn today() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    pub fn from_date(date: NaiveDate) -> Self {
        DayKey(date.format("%d-%m-%Y").to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Renders a second count as `H:MM:SS`, hours unpadded.
pub fn format_duration(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{hours}:{minutes:02}:{seconds:02}")
}

/// Parses an `H:MM:SS` duration back into a second count.
pub fn parse_duration(text: &str) -> Result<u64> {
    let invalid = |reason: &str| MinderError::InvalidDuration {
        text: text.to_string(),
        reason: reason.to_string(),
    };

    let mut fields = text.split(':');
    let (hours, minutes, seconds) =
        match (fields.next(), fields.next(), fields.next(), fields.next()) {
            (Some(h), Some(m), Some(s), None) => (h, m, s),
            _ => return Err(invalid("expected H:MM:SS")),
        };

    let hours: u64 = hours.parse().map_err(|_| invalid("hours not a number"))?;
    let minutes: u64 = minutes
        .parse()
        .map_err(|_| invalid("minutes not a number"))?;
    let seconds: u64 = seconds
        .parse()
        .map_err(|_| invalid("seconds not a number"))?;

    if minutes >= 60 {
        return Err(invalid("minutes out of range"));
    }
    if seconds >= 60 {
        return Err(invalid("seconds out of range"));
    }

    Ok(hours * 3600 + minutes * 60 + seconds)
}
