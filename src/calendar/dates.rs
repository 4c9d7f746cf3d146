use super::parse::format_date;
use std::fmt;
use std::iter::successors;
use thiserror::Error;
use time::{Date, Duration, Month, Weekday};

pub const DAYS_IN_WEEK: usize = 7;

pub(crate) trait WeekdayExt {
    /// Number of days from `first_day` forwards to `self`, in `0..7`
    fn days_since(self, first_day: Weekday) -> u8;
}

impl WeekdayExt for Weekday {
    fn days_since(self, first_day: Weekday) -> u8 {
        (self.number_days_from_sunday() + 7 - first_day.number_days_from_sunday()) % 7
    }
}

/// Returns the first day of the week containing `date`, or `None` if that
/// day precedes the earliest representable date
pub fn week_start(date: Date, first_day: Weekday) -> Option<Date> {
    date.checked_sub(Duration::days(date.weekday().days_since(first_day).into()))
}

/// Returns the last day of the week containing `date`, or `None` if that
/// day follows the latest representable date
pub fn week_end(date: Date, first_day: Weekday) -> Option<Date> {
    date.checked_add(Duration::days(
        (6 - date.weekday().days_since(first_day)).into(),
    ))
}

/// Week of the year counted in whole seven-day steps from January 1st.
///
/// This is deliberately not the ISO 8601 week number: January 1st always
/// starts week 1, whatever day of the week it falls on.
pub fn week_number(date: Date) -> u8 {
    // ordinal() is at most 366, so this is at most 53
    u8::try_from((date.ordinal() - 1) / 7 + 1).unwrap_or(u8::MAX)
}

/// Identifier of a week, derived from its first day.  Identifiers compare in
/// time order and display as `week-YYYY-MM-DD`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct WeekId(Date);

impl WeekId {
    pub fn containing(date: Date, first_day: Weekday) -> Option<WeekId> {
        week_start(date, first_day).map(WeekId)
    }

    pub fn start(self) -> Date {
        self.0
    }
}

impl fmt::Display for WeekId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "week-{}", format_date(self.0))
    }
}

/// Inclusive range of dates that may be selected and navigated to.  A
/// missing end is unbounded.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DateBounds {
    pub min: Option<Date>,
    pub max: Option<Date>,
}

impl DateBounds {
    pub fn new(min: Option<Date>, max: Option<Date>) -> DateBounds {
        DateBounds { min, max }
    }

    pub fn contains(&self, date: Date) -> bool {
        self.min.map_or(true, |min| min <= date) && self.max.map_or(true, |max| date <= max)
    }

    /// Returns `true` if at least one day of `week` lies within the bounds
    pub fn overlaps(&self, week: &WeekData) -> bool {
        self.min.map_or(true, |min| min <= week.end())
            && self.max.map_or(true, |max| week.start() <= max)
    }
}

/// A single generated day
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct CalendarDate {
    date: Date,
    is_today: bool,
    is_current_month: bool,
    is_disabled: bool,
    week_number: u8,
}

impl CalendarDate {
    pub fn date(&self) -> Date {
        self.date
    }

    /// Same as `date_string()`; unique within a generated sequence
    pub fn id(&self) -> String {
        self.date_string()
    }

    pub fn date_string(&self) -> String {
        format_date(self.date)
    }

    pub fn day(&self) -> u8 {
        self.date.day()
    }

    pub fn month(&self) -> u8 {
        self.date.month().into()
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }

    /// Milliseconds since the Unix epoch at midnight UTC
    pub fn timestamp(&self) -> i64 {
        self.date.midnight().assume_utc().unix_timestamp() * 1000
    }

    pub fn is_today(&self) -> bool {
        self.is_today
    }

    /// Whether the date is in the same month as the date the week was
    /// generated from
    pub fn is_current_month(&self) -> bool {
        self.is_current_month
    }

    /// Whether the date lies outside the selectable bounds
    pub fn is_disabled(&self) -> bool {
        self.is_disabled
    }

    pub fn week_number(&self) -> u8 {
        self.week_number
    }
}

/// Seven consecutive days starting on the configured first day of the week
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct WeekData {
    id: WeekId,
    // The date the week was generated from; neighboring weeks are generated
    // from this date shifted by whole weeks.
    reference: Date,
    week_number: u8,
    dates: [CalendarDate; DAYS_IN_WEEK],
}

impl WeekData {
    pub fn id(&self) -> WeekId {
        self.id
    }

    pub fn week_number(&self) -> u8 {
        self.week_number
    }

    pub fn start(&self) -> Date {
        self.id.start()
    }

    pub fn end(&self) -> Date {
        self.dates[DAYS_IN_WEEK - 1].date
    }

    pub fn start_date(&self) -> String {
        format_date(self.start())
    }

    pub fn end_date(&self) -> String {
        format_date(self.end())
    }

    pub fn dates(&self) -> &[CalendarDate; DAYS_IN_WEEK] {
        &self.dates
    }

    pub fn contains(&self, date: Date) -> bool {
        self.start() <= date && date <= self.end()
    }
}

/// Builds weeks for a fixed first day of the week, "today", and set of
/// bounds
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WeekFactory {
    first_day: Weekday,
    today: Date,
    bounds: DateBounds,
}

impl WeekFactory {
    pub fn new(first_day: Weekday, today: Date) -> WeekFactory {
        WeekFactory {
            first_day,
            today,
            bounds: DateBounds::default(),
        }
    }

    pub fn bounds(mut self, bounds: DateBounds) -> WeekFactory {
        self.bounds = bounds;
        self
    }

    pub fn first_day(&self) -> Weekday {
        self.first_day
    }

    pub fn today(&self) -> Date {
        self.today
    }

    /// Returns the week containing `reference`, which can be at any day of
    /// the week.  Returns `None` if any day of that week is not
    /// representable.
    pub fn make(&self, reference: Date) -> Option<WeekData> {
        let start = week_start(reference, self.first_day)?;
        let week_number = week_number(reference);
        let month = reference.month();
        let dates: [CalendarDate; DAYS_IN_WEEK] = successors(Some(start), |d| d.next_day())
            .take(DAYS_IN_WEEK)
            .map(|date| self.calendar_date(date, month, week_number))
            .collect::<Vec<_>>()
            .try_into()
            .ok()?;
        Some(WeekData {
            id: WeekId(start),
            reference,
            week_number,
            dates,
        })
    }

    fn calendar_date(&self, date: Date, month: Month, week_number: u8) -> CalendarDate {
        CalendarDate {
            date,
            is_today: date == self.today,
            is_current_month: date.month() == month,
            is_disabled: !self.bounds.contains(date),
            week_number,
        }
    }

    pub fn week_before(&self, week: &WeekData) -> Option<WeekData> {
        week.reference
            .checked_sub(Duration::WEEK)
            .and_then(|d| self.make(d))
    }

    pub fn week_after(&self, week: &WeekData) -> Option<WeekData> {
        week.reference
            .checked_add(Duration::WEEK)
            .and_then(|d| self.make(d))
    }

    fn iter_weeks_before(&self, week: WeekData) -> impl Iterator<Item = WeekData> + '_ {
        successors(Some(week), |w| self.week_before(w)).skip(1)
    }

    fn iter_weeks_after(&self, week: WeekData) -> impl Iterator<Item = WeekData> + '_ {
        successors(Some(week), |w| self.week_after(w)).skip(1)
    }

    /// Returns the gapless sequence of whole weeks covering `start` through
    /// `end`, inclusive: the first week contains `start` and the last week
    /// contains `end`.
    pub fn range(&self, start: Date, end: Date) -> Result<Vec<WeekData>, RangeError> {
        if end < start {
            return Err(RangeError::Inverted { start, end });
        }
        let first = self.make(start).ok_or(OutOfTimeError)?;
        let last = WeekId::containing(end, self.first_day).ok_or(OutOfTimeError)?;
        let mut weeks = vec![first];
        weeks.extend(self.iter_weeks_after(first).take_while(|w| w.id() <= last));
        match weeks.last() {
            Some(w) if w.id() == last => Ok(weeks),
            _ => Err(OutOfTimeError.into()),
        }
    }

    /// Returns `week_count / 2` weeks before the week containing `center`,
    /// that week itself, and `week_count / 2` weeks after it
    pub fn around_date(
        &self,
        center: Date,
        week_count: usize,
    ) -> Result<Vec<WeekData>, OutOfTimeError> {
        let half = week_count / 2;
        let center_week = self.make(center).ok_or(OutOfTimeError)?;
        let mut weeks = Vec::with_capacity(half * 2 + 1);
        weeks.extend(self.iter_weeks_before(center_week).take(half));
        weeks.reverse();
        weeks.push(center_week);
        weeks.extend(self.iter_weeks_after(center_week).take(half));
        if weeks.len() == half * 2 + 1 {
            Ok(weeks)
        } else {
            Err(OutOfTimeError)
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
pub enum RangeError {
    #[error("end date {end} precedes start date {start}")]
    Inverted { start: Date, end: Date },
    #[error(transparent)]
    OutOfTime(#[from] OutOfTimeError),
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub struct OutOfTimeError;
