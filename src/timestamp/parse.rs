use crate::err::InvalidDate;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Largest distance from the epoch, in milliseconds, of a representable instant.
pub const MAX_TIME_MILLIS: i64 = 8_640_000_000_000_000;

// Date-times without an offset are read as UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
];

const OFFSET_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
];

// The rendering produced by `format::to_utc_string`, including signed years
// that RFC 2822 cannot express.
const RENDERED_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%a %B %d %Y",
    "%d %B %Y",
];

/// What a raw path segment turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input<'a> {
    /// Nothing usable was supplied; use the current time.
    Absent,
    /// A plain decimal number, read as milliseconds since the epoch.
    EpochMillis(Result<i64, InvalidDate>),
    /// Anything else, handed to the calendar parser.
    Calendar(&'a str),
}

/// Decide how a raw segment is interpreted.
///
/// Only a missing or zero-length segment means "now"; whitespace alone is zero.
/// Numeric input wins over calendar input, so `"20161120"` is a count of
/// milliseconds and not the 20th of November.
pub fn classify(raw: Option<&str>) -> Input<'_> {
    let Some(raw) = raw else {
        return Input::Absent;
    };
    if raw.is_empty() {
        return Input::Absent;
    }

    // A blank but non-empty segment counts as the number zero.
    let raw = raw.trim();
    if raw.is_empty() {
        return Input::EpochMillis(Ok(0));
    }

    match parse_epoch_millis(raw) {
        Some(millis) => Input::EpochMillis(millis),
        None => Input::Calendar(raw),
    }
}

/// Strict decimal parse: `[+-]?digits[.digits]` or `[+-]?.digits`.
///
/// Returns `None` when the input is not numeric at all. The fractional part is
/// dropped, truncating toward zero. An integer part too large for `i64` is
/// still numeric, it just cannot name an instant.
pub fn parse_epoch_millis(input: &str) -> Option<Result<i64, InvalidDate>> {
    let (negative, unsigned) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    let (integer, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    if integer.is_empty() && fraction.is_empty() {
        return None;
    }
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(integer) || !all_digits(fraction) {
        return None;
    }

    if integer.is_empty() {
        return Some(Ok(0));
    }
    let magnitude = match integer.parse::<i64>() {
        Ok(magnitude) => magnitude,
        Err(_) => return Some(Err(InvalidDate)),
    };

    Some(Ok(if negative { -magnitude } else { magnitude }))
}

/// Turn a millisecond count into an instant, rejecting anything out of range.
pub fn instant_from_millis(millis: i64) -> Result<DateTime<Utc>, InvalidDate> {
    if !(-MAX_TIME_MILLIS..=MAX_TIME_MILLIS).contains(&millis) {
        return Err(InvalidDate);
    }
    DateTime::from_timestamp_millis(millis).ok_or(InvalidDate)
}

/// Parse a calendar string.
///
/// ISO-8601 strings are the supported input. RFC 2822 strings (the format
/// timestamps are rendered in) and a handful of legacy spellings are tolerated.
pub fn parse_calendar(input: &str) -> Result<DateTime<Utc>, InvalidDate> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return checked(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(input) {
        return checked(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(input, RENDERED_FORMAT) {
        return checked(dt.and_utc());
    }

    for format in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(input, format) {
            return checked(dt.with_timezone(&Utc));
        }
    }

    let naive = input
        .strip_suffix(['Z', 'z'])
        .unwrap_or(input);
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(naive, format) {
            return checked(dt.and_utc());
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(input, format) {
            return start_of_day(date);
        }
    }

    if let Some(date) = parse_year_month(input) {
        return start_of_day(date);
    }

    Err(InvalidDate)
}

// `YYYY-MM` names the first day of that month.
fn parse_year_month(input: &str) -> Option<NaiveDate> {
    let (year, month) = input.split_once('-')?;
    if year.len() != 4 || month.len() != 2 {
        return None;
    }
    if !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
}

fn start_of_day(date: NaiveDate) -> Result<DateTime<Utc>, InvalidDate> {
    let midnight = date.and_hms_opt(0, 0, 0).ok_or(InvalidDate)?;
    checked(midnight.and_utc())
}

fn checked(instant: DateTime<Utc>) -> Result<DateTime<Utc>, InvalidDate> {
    if instant.timestamp_millis().abs() > MAX_TIME_MILLIS {
        return Err(InvalidDate);
    }
    Ok(instant)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn millis(input: &str) -> Result<i64, InvalidDate> {
        parse_calendar(input).map(|dt| dt.timestamp_millis())
    }

    #[test]
    fn test_classify_absent() {
        assert_eq!(classify(None), Input::Absent);
        assert_eq!(classify(Some("")), Input::Absent);
    }

    #[test]
    fn test_classify_blank_is_zero() {
        assert_eq!(classify(Some(" ")), Input::EpochMillis(Ok(0)));
        assert_eq!(classify(Some("\t  ")), Input::EpochMillis(Ok(0)));
    }

    #[test]
    fn test_classify_numeric() {
        assert_eq!(
            classify(Some("1479663089000")),
            Input::EpochMillis(Ok(1479663089000))
        );
        assert_eq!(classify(Some("-1000")), Input::EpochMillis(Ok(-1000)));
        assert_eq!(classify(Some("+42")), Input::EpochMillis(Ok(42)));
        assert_eq!(classify(Some(" 7 ")), Input::EpochMillis(Ok(7)));
        assert_eq!(classify(Some("20161120")), Input::EpochMillis(Ok(20161120)));
    }

    #[test]
    fn test_classify_calendar() {
        assert_eq!(classify(Some("2016-11-20")), Input::Calendar("2016-11-20"));
        assert_eq!(classify(Some("12abc")), Input::Calendar("12abc"));
        assert_eq!(classify(Some("-")), Input::Calendar("-"));
        assert_eq!(classify(Some(".")), Input::Calendar("."));
        assert_eq!(classify(Some("1.2.3")), Input::Calendar("1.2.3"));
    }

    #[test]
    fn test_fraction_truncates_toward_zero() {
        assert_eq!(parse_epoch_millis("1.5"), Some(Ok(1)));
        assert_eq!(parse_epoch_millis("-1.9"), Some(Ok(-1)));
        assert_eq!(parse_epoch_millis("5."), Some(Ok(5)));
        assert_eq!(parse_epoch_millis(".5"), Some(Ok(0)));
        assert_eq!(parse_epoch_millis("-.5"), Some(Ok(0)));
    }

    #[test]
    fn test_overflowing_number_is_invalid() {
        assert_eq!(
            parse_epoch_millis("99999999999999999999999"),
            Some(Err(InvalidDate))
        );
    }

    #[test]
    fn test_instant_from_millis_range() {
        assert!(instant_from_millis(0).is_ok());
        assert!(instant_from_millis(-1000).is_ok());
        assert_eq!(instant_from_millis(MAX_TIME_MILLIS + 1), Err(InvalidDate));
        assert_eq!(instant_from_millis(-MAX_TIME_MILLIS - 1), Err(InvalidDate));
    }

    #[test]
    fn test_iso_date() {
        assert_eq!(millis("2016-11-20"), Ok(1479600000000));
        assert_eq!(millis("2016-11"), Ok(1477958400000));
    }

    #[test]
    fn test_iso_datetime() {
        assert_eq!(millis("2016-11-20T17:31:29Z"), Ok(1479663089000));
        assert_eq!(millis("2016-11-20T17:31:29"), Ok(1479663089000));
        assert_eq!(millis("2016-11-20T17:31"), Ok(1479663060000));
        assert_eq!(millis("2016-11-20T17:31Z"), Ok(1479663060000));
        assert_eq!(millis("2016-11-20 17:31:29"), Ok(1479663089000));
        assert_eq!(millis("2016-11-20T17:31:29.5+02:00"), Ok(1479655889500));
    }

    #[test]
    fn test_rfc2822() {
        assert_eq!(millis("Sun, 20 Nov 2016 17:31:29 GMT"), Ok(1479663089000));
    }

    #[test]
    fn test_rendered_signed_year() {
        assert_eq!(
            millis("Fri, 01 Jan -0001 00:00:00 GMT"),
            Ok(-62198755200000)
        );
        assert_eq!(millis("Thu, 01 Jan 1970 00:00:00 GMT"), Ok(0));
    }

    #[test]
    fn test_legacy_formats() {
        assert_eq!(millis("2016/11/20"), Ok(1479600000000));
        assert_eq!(millis("11/20/2016"), Ok(1479600000000));
        assert_eq!(millis("November 20, 2016"), Ok(1479600000000));
        assert_eq!(millis("Nov 20 2016"), Ok(1479600000000));
        assert_eq!(millis("20 November 2016"), Ok(1479600000000));
        assert_eq!(millis("Sun Nov 20 2016"), Ok(1479600000000));
    }

    #[test]
    fn test_invalid_calendar_strings() {
        assert_eq!(millis("this-is-not-a-date"), Err(InvalidDate));
        assert_eq!(millis("2016-13-01"), Err(InvalidDate));
        assert_eq!(millis("2016-02-30"), Err(InvalidDate));
        assert_eq!(millis("2016-11-20T25:00"), Err(InvalidDate));
        assert_eq!(millis("12abc"), Err(InvalidDate));
    }
}
