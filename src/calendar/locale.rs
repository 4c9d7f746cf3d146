use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use time::{Month, Weekday};

/// Language used for weekday and month names
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Locale {
    #[default]
    EnUs,
    De,
    Es,
    Fr,
}

// Indexed by number of days from Sunday
static EN_US_WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
static DE_WEEKDAYS: [&str; 7] = ["So", "Mo", "Di", "Mi", "Do", "Fr", "Sa"];
static ES_WEEKDAYS: [&str; 7] = ["dom", "lun", "mar", "mié", "jue", "vie", "sáb"];
static FR_WEEKDAYS: [&str; 7] = ["dim", "lun", "mar", "mer", "jeu", "ven", "sam"];

// Indexed by month number minus one
static EN_US_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];
static DE_MONTHS: [&str; 12] = [
    "Januar",
    "Februar",
    "März",
    "April",
    "Mai",
    "Juni",
    "Juli",
    "August",
    "September",
    "Oktober",
    "November",
    "Dezember",
];
static ES_MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];
static FR_MONTHS: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

impl Locale {
    pub fn code(self) -> &'static str {
        match self {
            Locale::EnUs => "en-US",
            Locale::De => "de",
            Locale::Es => "es",
            Locale::Fr => "fr",
        }
    }

    /// Abbreviated weekday name, at most three columns wide
    pub fn weekday_abbrev(self, wd: Weekday) -> &'static str {
        let names = match self {
            Locale::EnUs => &EN_US_WEEKDAYS,
            Locale::De => &DE_WEEKDAYS,
            Locale::Es => &ES_WEEKDAYS,
            Locale::Fr => &FR_WEEKDAYS,
        };
        names[usize::from(wd.number_days_from_sunday())]
    }

    pub fn month_name(self, month: Month) -> &'static str {
        let names = match self {
            Locale::EnUs => &EN_US_MONTHS,
            Locale::De => &DE_MONTHS,
            Locale::Es => &ES_MONTHS,
            Locale::Fr => &FR_MONTHS,
        };
        names[usize::from(u8::from(month) - 1)]
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Locale {
    type Err = LocaleParseError;

    fn from_str(s: &str) -> Result<Locale, LocaleParseError> {
        let lower = s.trim().to_ascii_lowercase().replace('_', "-");
        let lang = lower.split('-').next().unwrap_or_default();
        match lang {
            "en" => Ok(Locale::EnUs),
            "de" => Ok(Locale::De),
            "es" => Ok(Locale::Es),
            "fr" => Ok(Locale::Fr),
            _ => Err(LocaleParseError(s.to_owned())),
        }
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unsupported locale {0:?}; expected one of en-US, de, es, fr")]
pub struct LocaleParseError(String);
