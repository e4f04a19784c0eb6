//! Date helper functions

use chrono::{DateTime, Locale, TimeZone, Utc};

/// Format a date using a Moment.js-compatible format string, with month and
/// weekday names taken from `locale`
///
/// # Examples
/// ```ignore
/// format_date_localized(&date, "DD MMM YYYY", Locale::pt_BR) // -> "15 jan 2024"
/// ```
pub fn format_date_localized<Tz: TimeZone>(
    date: &DateTime<Tz>,
    format: &str,
    locale: Locale,
) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let chrono_format = moment_to_chrono_format(format);
    date.format_localized(&chrono_format, locale).to_string()
}

/// Resolve a language tag such as `pt-BR` to a formatting locale.
///
/// Unknown tags fall back to `POSIX` (English names).
pub fn parse_locale(language: &str) -> Locale {
    let name = language.replace('-', "_");
    Locale::try_from(name.as_str()).unwrap_or_else(|_| {
        tracing::warn!("Unknown language {:?}, formatting dates in POSIX", language);
        Locale::POSIX
    })
}

/// Parse a repository timestamp.
///
/// Prismic emits `2021-03-25T19:25:28+0000`; RFC 3339 is accepted as well.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%z")
        .or_else(|_| DateTime::parse_from_rfc3339(value))
        .map(|date| date.with_timezone(&Utc))
        .ok()
}

/// Whether a post was republished after its first publication
pub fn is_edited(
    first_published_at: Option<DateTime<Utc>>,
    last_published_at: Option<DateTime<Utc>>,
) -> bool {
    match (first_published_at, last_published_at) {
        (Some(first), Some(last)) => last > first,
        _ => false,
    }
}

/// Convert Moment.js format to chrono format
fn moment_to_chrono_format(format: &str) -> String {
    // Longest patterns first within each unit
    let replacements = [
        ("YYYY", "%Y"),
        ("YY", "%y"),
        ("MMMM", "%B"),
        ("MMM", "%b"),
        ("MM", "%m"),
        ("DD", "%d"),
        ("HH", "%H"),
        ("hh", "%I"),
        ("mm", "%M"),
        ("ss", "%S"),
        ("dddd", "%A"),
        ("ddd", "%a"),
    ];

    let mut result = format.to_string();

    for (from, to) in replacements {
        result = result.replace(from, to);
    }

    result
}
