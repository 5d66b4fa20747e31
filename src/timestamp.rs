pub mod clock;
pub mod format;
pub mod parse;

use crate::err::InvalidDate;
use chrono::{DateTime, Utc};
use clock::{Clock, SystemClock};
use parse::Input;
use serde::Serialize;
use std::sync::Arc;

/// The JSON body returned by the timestamp API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimestampResult {
    /// Milliseconds since the epoch, `None` when the input was not a date.
    pub unix: Option<i64>,
    pub utc: String,
}

impl TimestampResult {
    pub fn invalid() -> Self {
        Self {
            unix: None,
            utc: InvalidDate.to_string(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.unix.is_some()
    }
}

impl From<DateTime<Utc>> for TimestampResult {
    fn from(instant: DateTime<Utc>) -> Self {
        Self {
            unix: Some(instant.timestamp_millis()),
            utc: format::to_utc_string(&instant),
        }
    }
}

impl From<Result<DateTime<Utc>, InvalidDate>> for TimestampResult {
    fn from(instant: Result<DateTime<Utc>, InvalidDate>) -> Self {
        match instant {
            Ok(instant) => instant.into(),
            Err(InvalidDate) => Self::invalid(),
        }
    }
}

/// Turns caller-supplied strings into timestamps.
///
/// Cloning is cheap, all clones share the same clock.
#[derive(Clone)]
pub struct TimestampResolver {
    clock: Arc<dyn Clock>,
}

impl Default for TimestampResolver {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

impl TimestampResolver {
    pub fn new(clock: impl Clock + 'static) -> Self {
        Self {
            clock: Arc::new(clock),
        }
    }

    /// Resolve an optional raw string to a timestamp
    ///
    /// # Arguments
    /// * `raw` - The path segment, if one was supplied
    ///
    /// # Returns
    /// * The current time if `raw` is absent or empty
    /// * `raw` read as epoch milliseconds if it is a plain number (whitespace alone is zero)
    /// * `raw` read as a calendar date otherwise
    /// * The `Invalid Date` result if none of the above names a valid instant
    pub fn resolve(&self, raw: Option<&str>) -> TimestampResult {
        let instant = match parse::classify(raw) {
            Input::Absent => Ok(self.clock.now()),
            Input::EpochMillis(millis) => millis.and_then(parse::instant_from_millis),
            Input::Calendar(input) => parse::parse_calendar(input),
        };

        instant.into()
    }
}

/// Resolve against the system clock.
pub fn resolve(raw: Option<&str>) -> TimestampResult {
    TimestampResolver::default().resolve(raw)
}
