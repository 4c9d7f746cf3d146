use thiserror::Error;
use time::{format_description::BorrowedFormatItem, macros::format_description, Date, Weekday};

static YMD_FMT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Returns `true` iff `s` is a real calendar date written exactly as
/// `YYYY-MM-DD`
pub fn is_parsable_date_string(s: &str) -> bool {
    parse_date_string(s).is_ok()
}

/// Parse a `YYYY-MM-DD` string.  Strings that only parse after
/// normalization (e.g., a missing zero pad) are rejected.
pub fn parse_date_string(s: &str) -> Result<Date, DateParseError> {
    Date::parse(s, YMD_FMT)
        .ok()
        .filter(|&date| format_date(date) == s)
        .ok_or_else(|| DateParseError(s.to_owned()))
}

/// Format a date as `YYYY-MM-DD`, with a leading `-` for negative years.  The
/// result always parses back with [`parse_date_string`].
pub fn format_date(date: Date) -> String {
    date.to_string()
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("invalid date {0:?}; expected a date of the form YYYY-MM-DD")]
pub struct DateParseError(String);

/// Parse a first-day-of-week value: either an English weekday name (full or
/// three-letter, case-insensitive) or a number from 0 (Sunday) to 6
/// (Saturday)
pub fn parse_weekday(s: &str) -> Result<Weekday, WeekdayParseError> {
    let wd = match s.trim().to_ascii_lowercase().as_str() {
        "0" | "sun" | "sunday" => Weekday::Sunday,
        "1" | "mon" | "monday" => Weekday::Monday,
        "2" | "tue" | "tuesday" => Weekday::Tuesday,
        "3" | "wed" | "wednesday" => Weekday::Wednesday,
        "4" | "thu" | "thursday" => Weekday::Thursday,
        "5" | "fri" | "friday" => Weekday::Friday,
        "6" | "sat" | "saturday" => Weekday::Saturday,
        _ => return Err(WeekdayParseError(s.to_owned())),
    };
    Ok(wd)
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("invalid weekday {0:?}; expected a weekday name or a number from 0 (Sunday) to 6 (Saturday)")]
pub struct WeekdayParseError(String);
