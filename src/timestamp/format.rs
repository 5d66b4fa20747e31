use chrono::{DateTime, Datelike, Utc};

/// Render an instant as `Www, dd Mmm yyyy hh:mm:ss GMT`.
///
/// Years are zero-padded to four digits; years before 1 BCE carry a leading `-`.
pub fn to_utc_string(instant: &DateTime<Utc>) -> String {
    let year = instant.year();
    let year = if year < 0 {
        format!("-{:04}", year.unsigned_abs())
    } else {
        format!("{:04}", year)
    };

    format!(
        "{} {} {}",
        instant.format("%a, %d %b"),
        year,
        instant.format("%H:%M:%S GMT")
    )
}
