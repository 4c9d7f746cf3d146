use super::dates::{DateBounds, OutOfTimeError, RangeError, WeekData, WeekFactory};
use super::locale::Locale;
use super::lookup::{find_week_index, scroll_index, IndexFallback};
use super::parse::{format_date, parse_date_string, DateParseError};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;
use time::{Date, Duration, Weekday};

pub const DEFAULT_WEEK_COUNT: usize = 52;

/// Upper limit on `week_count`; more weeks than this would not fit between
/// the earliest and latest representable dates anyway
const MAX_WEEK_COUNT: usize = 1 << 20;

pub const DEFAULT_ITEM_WIDTH: u16 = 4;

pub const DEFAULT_COLUMN_GAP: u16 = 2;

/// Configuration for a [`StripNavigator`]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StripOptions {
    /// First day of each week.  Default: Monday.
    pub first_day: Weekday,
    /// Date selected and scrolled to on creation.  Default: today.
    pub initial_date: Option<Date>,
    /// Externally owned selection.  Setting this makes the navigator
    /// controlled.
    pub selected_date: Option<Date>,
    /// First date whose week is generated
    pub start_date: Option<Date>,
    /// Last date whose week is generated
    pub end_date: Option<Date>,
    /// Earliest selectable date; also used as `start_date` if that is unset
    pub min_date: Option<Date>,
    /// Latest selectable date; also used as `end_date` if that is unset
    pub max_date: Option<Date>,
    /// Number of weeks to generate when the range is open on one or both
    /// ends.  Default: 52.
    pub week_count: usize,
    pub marked_dates: BTreeSet<Date>,
    pub locale: Locale,
    /// Columns per day.  Default: 4.
    pub item_width: u16,
    /// Columns between adjacent weeks.  Default: 2.
    pub column_gap: u16,
}

impl Default for StripOptions {
    fn default() -> StripOptions {
        StripOptions {
            first_day: Weekday::Monday,
            initial_date: None,
            selected_date: None,
            start_date: None,
            end_date: None,
            min_date: None,
            max_date: None,
            week_count: DEFAULT_WEEK_COUNT,
            marked_dates: BTreeSet::new(),
            locale: Locale::default(),
            item_width: DEFAULT_ITEM_WIDTH,
            column_gap: DEFAULT_COLUMN_GAP,
        }
    }
}

impl StripOptions {
    pub fn new() -> StripOptions {
        StripOptions::default()
    }

    pub fn first_day(mut self, first_day: Weekday) -> StripOptions {
        self.first_day = first_day;
        self
    }

    pub fn initial_date(mut self, date: Date) -> StripOptions {
        self.initial_date = Some(date);
        self
    }

    pub fn selected_date(mut self, date: Date) -> StripOptions {
        self.selected_date = Some(date);
        self
    }

    pub fn start_date(mut self, date: Date) -> StripOptions {
        self.start_date = Some(date);
        self
    }

    pub fn end_date(mut self, date: Date) -> StripOptions {
        self.end_date = Some(date);
        self
    }

    pub fn min_date(mut self, date: Date) -> StripOptions {
        self.min_date = Some(date);
        self
    }

    pub fn max_date(mut self, date: Date) -> StripOptions {
        self.max_date = Some(date);
        self
    }

    pub fn week_count(mut self, week_count: usize) -> StripOptions {
        self.week_count = week_count;
        self
    }

    pub fn mark(mut self, date: Date) -> StripOptions {
        self.marked_dates.insert(date);
        self
    }

    pub fn locale(mut self, locale: Locale) -> StripOptions {
        self.locale = locale;
        self
    }

    pub fn item_width(mut self, item_width: u16) -> StripOptions {
        self.item_width = item_width;
        self
    }

    pub fn column_gap(mut self, column_gap: u16) -> StripOptions {
        self.column_gap = column_gap;
        self
    }

    fn bounded_week_count(&self) -> usize {
        self.week_count.clamp(1, MAX_WEEK_COUNT)
    }
}

/// Who owns the selected date
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SelectionMode {
    /// The navigator updates its selection itself and reports changes
    Uncontrolled,
    /// The navigator only reports requested selections; the owner applies
    /// them with [`StripNavigator::set_controlled_date`]
    Controlled,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum WeekSource {
    /// A fixed range of weeks
    Range,
    /// A window of weeks that slides and re-centers as needed
    Window { week_count: usize },
}

type ChangeCallback = Box<dyn FnMut(&str)>;

/// Week sequence plus selection and scroll state of a strip calendar
pub struct StripNavigator {
    options: StripOptions,
    factory: WeekFactory,
    source: WeekSource,
    weeks: Vec<WeekData>,
    mode: SelectionMode,
    selected: Date,
    initial_index: usize,
    current_index: usize,
    on_change: Option<ChangeCallback>,
}

impl StripNavigator {
    pub fn new(options: StripOptions, today: Date) -> Result<StripNavigator, RangeError> {
        if let (Some(min), Some(max)) = (options.min_date, options.max_date) {
            if max < min {
                return Err(RangeError::Inverted {
                    start: min,
                    end: max,
                });
            }
        }
        let bounds = DateBounds::new(options.min_date, options.max_date);
        let factory = WeekFactory::new(options.first_day, today).bounds(bounds);
        let (mode, selected) = match options.selected_date {
            Some(date) => (SelectionMode::Controlled, date),
            None => (
                SelectionMode::Uncontrolled,
                options.initial_date.unwrap_or(today),
            ),
        };
        let week_count = options.bounded_week_count();
        let span = Duration::weeks(i64::try_from(week_count - 1).unwrap_or(i64::MAX));
        let start = options.start_date.or(options.min_date);
        let end = options.end_date.or(options.max_date);
        let (source, weeks) = match (start, end) {
            (Some(start), Some(end)) => (WeekSource::Range, factory.range(start, end)?),
            (Some(start), None) => {
                let end = start.checked_add(span).unwrap_or(Date::MAX);
                (WeekSource::Range, factory.range(start, end)?)
            }
            (None, Some(end)) => {
                let start = end.checked_sub(span).unwrap_or(Date::MIN);
                (WeekSource::Range, factory.range(start, end)?)
            }
            (None, None) => (
                WeekSource::Window { week_count },
                factory.around_date(selected, week_count)?,
            ),
        };
        let selected = clamp_date(selected, selectable_span(source, bounds, &weeks));
        let initial_index = scroll_index(
            &weeks,
            selected,
            options.first_day,
            IndexFallback::Middle,
        );
        tracing::debug!(
            weeks = weeks.len(),
            initial_index,
            selected = %selected,
            mode = ?mode,
            "generated week strip"
        );
        Ok(StripNavigator {
            options,
            factory,
            source,
            weeks,
            mode,
            selected,
            initial_index,
            current_index: initial_index,
            on_change: None,
        })
    }

    /// Register the function to call with the new date (as `YYYY-MM-DD`)
    /// whenever the selection changes, or, for a controlled navigator,
    /// whenever a selection is requested
    pub fn on_date_change<F>(&mut self, callback: F)
    where
        F: FnMut(&str) + 'static,
    {
        self.on_change = Some(Box::new(callback));
    }

    pub fn options(&self) -> &StripOptions {
        &self.options
    }

    pub fn weeks(&self) -> &[WeekData] {
        &self.weeks
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn today(&self) -> Date {
        self.factory.today()
    }

    pub fn first_day(&self) -> Weekday {
        self.factory.first_day()
    }

    pub fn bounds(&self) -> DateBounds {
        DateBounds::new(self.options.min_date, self.options.max_date)
    }

    pub fn selected_date(&self) -> Date {
        self.selected
    }

    pub fn selected_date_string(&self) -> String {
        format_date(self.selected)
    }

    /// Index of the week scrolled to on creation
    pub fn initial_index(&self) -> usize {
        self.initial_index
    }

    /// Index of the week currently scrolled to
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_week(&self) -> Option<&WeekData> {
        self.weeks.get(self.current_index)
    }

    pub fn is_marked(&self, date: Date) -> bool {
        self.options.marked_dates.contains(&date)
    }

    pub fn is_disabled(&self, date: Date) -> bool {
        !self.bounds().contains(date)
    }

    pub fn is_selected(&self, date: Date) -> bool {
        self.selected == date
    }

    /// Whether `date` can become the selection: it lies within the bounds
    /// and, for a fixed range, within the generated weeks
    pub fn is_selectable(&self, date: Date) -> bool {
        let (lo, hi) = selectable_span(self.source, self.bounds(), &self.weeks);
        !lo.is_some_and(|lo| date < lo) && !hi.is_some_and(|hi| date > hi)
    }

    pub fn can_go_next(&self) -> bool {
        match self.weeks.get(self.current_index + 1) {
            Some(week) => self.bounds().overlaps(week),
            None => self.slid_week_after().is_some(),
        }
    }

    pub fn can_go_previous(&self) -> bool {
        match self
            .current_index
            .checked_sub(1)
            .and_then(|i| self.weeks.get(i))
        {
            Some(week) => self.bounds().overlaps(week),
            None => self.slid_week_before().is_some(),
        }
    }

    // The week a window would slide in when stepping past its end
    fn slid_week_after(&self) -> Option<WeekData> {
        if self.source == WeekSource::Range {
            return None;
        }
        self.weeks
            .last()
            .and_then(|w| self.factory.week_after(w))
            .filter(|w| self.bounds().overlaps(w))
    }

    fn slid_week_before(&self) -> Option<WeekData> {
        if self.source == WeekSource::Range {
            return None;
        }
        self.weeks
            .first()
            .and_then(|w| self.factory.week_before(w))
            .filter(|w| self.bounds().overlaps(w))
    }

    /// Scroll forwards one week.  Returns `false` and does nothing if that
    /// would pass the end of the sequence or the maximum date.
    pub fn go_to_next_week(&mut self) -> bool {
        if !self.can_go_next() {
            return false;
        }
        if self.current_index + 1 < self.weeks.len() {
            self.current_index += 1;
        } else if let Some(week) = self.slid_week_after() {
            self.weeks.rotate_left(1);
            if let Some(last) = self.weeks.last_mut() {
                *last = week;
            }
        }
        tracing::debug!(index = self.current_index, "scrolled to next week");
        true
    }

    /// Scroll backwards one week.  Returns `false` and does nothing if that
    /// would pass the start of the sequence or the minimum date.
    pub fn go_to_previous_week(&mut self) -> bool {
        if !self.can_go_previous() {
            return false;
        }
        if self.current_index > 0 {
            self.current_index -= 1;
        } else if let Some(week) = self.slid_week_before() {
            self.weeks.rotate_right(1);
            if let Some(first) = self.weeks.first_mut() {
                *first = week;
            }
        }
        tracing::debug!(index = self.current_index, "scrolled to previous week");
        true
    }

    /// Scroll to today's week and select today.  Returns `false` and does
    /// nothing if today is outside the bounds.
    pub fn go_to_today(&mut self) -> bool {
        self.jump_to(self.today())
    }

    /// Scroll to the week containing `date` and select it.  Unlike
    /// [`StripNavigator::select_date`], a controlled navigator also scrolls
    /// before its owner applies the selection.  Returns `false` and does
    /// nothing if the date is not selectable.
    pub fn jump_to(&mut self, date: Date) -> bool {
        if !self.is_selectable(date) {
            return false;
        }
        self.sync_index(date);
        self.select_date(date)
    }

    /// Select `date` and scroll to its week.  Returns `false` and does
    /// nothing if the date is not selectable.
    ///
    /// An uncontrolled navigator applies the selection before notifying the
    /// callback, and only notifies if the selection changed.  A controlled
    /// navigator only notifies.
    pub fn select_date(&mut self, date: Date) -> bool {
        if !self.is_selectable(date) {
            tracing::debug!(date = %date, "ignoring selection of unselectable date");
            return false;
        }
        match self.mode {
            SelectionMode::Uncontrolled => {
                let changed = self.selected != date;
                self.selected = date;
                self.sync_index(date);
                if changed {
                    self.notify(date);
                }
            }
            SelectionMode::Controlled => self.notify(date),
        }
        true
    }

    /// Validate and select a `YYYY-MM-DD` date string
    pub fn select_date_str(&mut self, s: &str) -> Result<bool, DateParseError> {
        let date = parse_date_string(s)?;
        Ok(self.select_date(date))
    }

    pub fn select_next_day(&mut self) -> bool {
        self.selected
            .next_day()
            .is_some_and(|date| self.select_date(date))
    }

    pub fn select_previous_day(&mut self) -> bool {
        self.selected
            .previous_day()
            .is_some_and(|date| self.select_date(date))
    }

    /// Apply an externally owned selection to a controlled navigator and
    /// scroll to its week
    pub fn set_controlled_date(&mut self, date: Date) -> Result<(), SelectionError> {
        if self.mode != SelectionMode::Controlled {
            return Err(SelectionError::Uncontrolled);
        }
        if !self.is_selectable(date) {
            return Err(SelectionError::Unselectable(date));
        }
        self.selected = date;
        self.sync_index(date);
        Ok(())
    }

    /// Point the scroll index at the week containing `date`.  A window that
    /// does not contain the date is regenerated around it; a fixed range
    /// keeps its current index.
    fn sync_index(&mut self, date: Date) {
        if let Some(i) = find_week_index(&self.weeks, date, self.first_day()) {
            self.current_index = i;
            return;
        }
        if let WeekSource::Window { week_count } = self.source {
            match self.recenter(date, week_count) {
                Ok(()) => tracing::debug!(date = %date, "re-centered week window"),
                Err(e) => tracing::warn!(date = %date, "could not re-center week window: {e}"),
            }
        }
    }

    fn recenter(&mut self, date: Date, week_count: usize) -> Result<(), OutOfTimeError> {
        self.weeks = self.factory.around_date(date, week_count)?;
        self.current_index = scroll_index(
            &self.weeks,
            date,
            self.first_day(),
            IndexFallback::Middle,
        );
        Ok(())
    }

    fn notify(&mut self, date: Date) {
        let s = format_date(date);
        tracing::info!(date = %s, "selected date changed");
        if let Some(callback) = self.on_change.as_mut() {
            callback(&s);
        }
    }
}

impl fmt::Debug for StripNavigator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StripNavigator")
            .field("options", &self.options)
            .field("factory", &self.factory)
            .field("source", &self.source)
            .field("weeks", &self.weeks.len())
            .field("mode", &self.mode)
            .field("selected", &self.selected)
            .field("initial_index", &self.initial_index)
            .field("current_index", &self.current_index)
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

// Earliest and latest selectable dates; `None` is unbounded
fn selectable_span(
    source: WeekSource,
    bounds: DateBounds,
    weeks: &[WeekData],
) -> (Option<Date>, Option<Date>) {
    if source != WeekSource::Range {
        return (bounds.min, bounds.max);
    }
    let lo = bounds.min.max(weeks.first().map(WeekData::start));
    let hi = match (bounds.max, weeks.last().map(WeekData::end)) {
        (Some(max), Some(end)) => Some(max.min(end)),
        (max, end) => max.or(end),
    };
    (lo, hi)
}

fn clamp_date(date: Date, (lo, hi): (Option<Date>, Option<Date>)) -> Date {
    let date = lo.map_or(date, |lo| date.max(lo));
    hi.map_or(date, |hi| date.min(hi))
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum SelectionError {
    #[error("the selection of an uncontrolled calendar cannot be set by its owner")]
    Uncontrolled,
    #[error("{0} is not a selectable date")]
    Unselectable(Date),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use time::macros::date;

    const TODAY: Date = date!(2025 - 01 - 15);

    fn recorder(nav: &mut StripNavigator) -> Rc<RefCell<Vec<String>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        nav.on_date_change(move |s| sink.borrow_mut().push(s.to_owned()));
        log
    }

    fn january() -> StripOptions {
        StripOptions::new()
            .start_date(date!(2025 - 01 - 01))
            .end_date(date!(2025 - 01 - 31))
    }

    #[test]
    fn test_range_initial_index() {
        let nav = StripNavigator::new(january(), TODAY).unwrap();
        assert_eq!(nav.weeks().len(), 5);
        assert_eq!(nav.mode(), SelectionMode::Uncontrolled);
        assert_eq!(nav.selected_date_string(), "2025-01-15");
        assert_eq!(nav.initial_index(), 2);
        assert_eq!(nav.current_index(), 2);
        assert_eq!(
            nav.current_week().unwrap().id().to_string(),
            "week-2025-01-13"
        );
    }

    #[test]
    fn test_initial_date_outside_range_is_clamped() {
        let options = january().initial_date(date!(2025 - 06 - 01));
        let nav = StripNavigator::new(options, TODAY).unwrap();
        assert_eq!(nav.selected_date(), date!(2025 - 02 - 02));
        assert_eq!(nav.initial_index(), 4);
        let options = january().initial_date(date!(2024 - 11 - 01));
        let nav = StripNavigator::new(options, TODAY).unwrap();
        assert_eq!(nav.selected_date(), date!(2024 - 12 - 30));
        assert_eq!(nav.initial_index(), 0);
    }

    #[test]
    fn test_today_before_minimum_is_clamped() {
        let options = StripOptions::new().min_date(date!(2025 - 02 - 01));
        let mut nav = StripNavigator::new(options, TODAY).unwrap();
        assert_eq!(nav.selected_date(), date!(2025 - 02 - 01));
        assert!(!nav.is_disabled(nav.selected_date()));
        assert_eq!(nav.current_index(), 0);
        assert!(nav
            .current_week()
            .is_some_and(|w| w.contains(date!(2025 - 02 - 01))));
        assert!(nav.select_next_day());
        assert_eq!(nav.selected_date(), date!(2025 - 02 - 02));
        assert!(!nav.go_to_today());
    }

    #[test]
    fn test_controlled_initial_date_is_clamped() {
        let options = january()
            .max_date(date!(2025 - 01 - 20))
            .selected_date(date!(2025 - 01 - 29));
        let nav = StripNavigator::new(options, TODAY).unwrap();
        assert_eq!(nav.selected_date(), date!(2025 - 01 - 20));
        assert_eq!(nav.current_index(), 3);
    }

    #[test]
    fn test_inverted_range() {
        let options = StripOptions::new()
            .start_date(date!(2025 - 01 - 31))
            .end_date(date!(2025 - 01 - 01));
        assert!(matches!(
            StripNavigator::new(options, TODAY),
            Err(RangeError::Inverted { .. })
        ));
        let options = StripOptions::new()
            .min_date(date!(2025 - 01 - 31))
            .max_date(date!(2025 - 01 - 01));
        assert!(matches!(
            StripNavigator::new(options, TODAY),
            Err(RangeError::Inverted { .. })
        ));
    }

    #[test]
    fn test_next_previous_within_range() {
        let mut nav = StripNavigator::new(january(), TODAY).unwrap();
        assert!(nav.can_go_next());
        assert!(nav.go_to_next_week());
        assert!(nav.go_to_next_week());
        assert_eq!(nav.current_index(), 4);
        assert!(!nav.can_go_next());
        assert!(!nav.go_to_next_week());
        assert_eq!(nav.current_index(), 4);
        for _ in 0..4 {
            assert!(nav.go_to_previous_week());
        }
        assert_eq!(nav.current_index(), 0);
        assert!(!nav.can_go_previous());
        assert!(!nav.go_to_previous_week());
        assert_eq!(nav.current_index(), 0);
        // Scrolling does not change the selection
        assert_eq!(nav.selected_date(), TODAY);
    }

    #[test]
    fn test_min_max_bounds() {
        let options = january()
            .min_date(date!(2025 - 01 - 10))
            .max_date(date!(2025 - 01 - 20));
        let mut nav = StripNavigator::new(options, TODAY).unwrap();
        assert_eq!(nav.current_index(), 2);
        assert!(nav.go_to_next_week());
        assert_eq!(nav.current_index(), 3);
        // The week of Jan 27 is entirely after the maximum
        assert!(!nav.can_go_next());
        assert!(!nav.go_to_next_week());
        assert_eq!(nav.current_index(), 3);
        assert!(nav.go_to_previous_week());
        assert!(nav.go_to_previous_week());
        assert_eq!(nav.current_index(), 1);
        // The week of Dec 30 is entirely before the minimum
        assert!(!nav.can_go_previous());
        assert!(!nav.go_to_previous_week());
        assert_eq!(nav.current_index(), 1);
    }

    #[test]
    fn test_min_max_as_range() {
        let options = StripOptions::new()
            .min_date(date!(2025 - 01 - 01))
            .max_date(date!(2025 - 01 - 31));
        let nav = StripNavigator::new(options, TODAY).unwrap();
        assert_eq!(nav.weeks().len(), 5);
        assert_eq!(nav.weeks()[0].start(), date!(2024 - 12 - 30));
        assert!(nav.weeks()[0].dates()[0].is_disabled());
        assert!(!nav.weeks()[0].dates()[2].is_disabled());
    }

    #[test]
    fn test_open_ended_range() {
        let options = StripOptions::new()
            .start_date(date!(2025 - 01 - 01))
            .week_count(10);
        let nav = StripNavigator::new(options, TODAY).unwrap();
        assert_eq!(nav.weeks().len(), 10);
        assert_eq!(nav.weeks()[0].start(), date!(2024 - 12 - 30));
        let options = StripOptions::new()
            .max_date(date!(2025 - 01 - 31))
            .week_count(3);
        let nav = StripNavigator::new(options, TODAY).unwrap();
        assert_eq!(nav.weeks().len(), 3);
        assert_eq!(nav.weeks()[2].end(), date!(2025 - 02 - 02));
    }

    #[test]
    fn test_select_date_updates_index_and_notifies() {
        let mut nav = StripNavigator::new(january(), TODAY).unwrap();
        let log = recorder(&mut nav);
        assert!(nav.select_date(date!(2025 - 01 - 28)));
        assert_eq!(nav.selected_date(), date!(2025 - 01 - 28));
        assert_eq!(nav.current_index(), 4);
        // Re-selecting the same date does not notify again
        assert!(nav.select_date(date!(2025 - 01 - 28)));
        assert_eq!(*log.borrow(), ["2025-01-28"]);
    }

    #[test]
    fn test_select_outside_range_is_noop() {
        let mut nav = StripNavigator::new(january(), TODAY).unwrap();
        let log = recorder(&mut nav);
        assert!(!nav.select_date(date!(2025 - 03 - 01)));
        assert_eq!(nav.selected_date(), TODAY);
        assert_eq!(nav.current_index(), 2);
        assert!(!nav.jump_to(date!(2024 - 12 - 29)));
        // The last generated day is still selectable, but not the day after
        assert!(nav.select_date(date!(2025 - 02 - 02)));
        assert!(!nav.select_next_day());
        assert_eq!(nav.selected_date(), date!(2025 - 02 - 02));
        assert_eq!(
            find_week_index(nav.weeks(), nav.selected_date(), nav.first_day()),
            Some(nav.current_index())
        );
        assert_eq!(*log.borrow(), ["2025-02-02"]);
    }

    #[test]
    fn test_select_disabled_is_noop() {
        let options = january().max_date(date!(2025 - 01 - 20));
        let mut nav = StripNavigator::new(options, TODAY).unwrap();
        let log = recorder(&mut nav);
        assert!(!nav.select_date(date!(2025 - 01 - 21)));
        assert_eq!(nav.selected_date(), TODAY);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_select_date_str() {
        let mut nav = StripNavigator::new(january(), TODAY).unwrap();
        assert_eq!(nav.select_date_str("2025-01-02"), Ok(true));
        assert_eq!(nav.current_index(), 0);
        assert!(nav.select_date_str("2025-1-2").is_err());
        assert_eq!(nav.selected_date(), date!(2025 - 01 - 02));
    }

    #[test]
    fn test_select_next_previous_day() {
        let options = january().max_date(date!(2025 - 01 - 20));
        let mut nav = StripNavigator::new(options, TODAY).unwrap();
        nav.select_date(date!(2025 - 01 - 19));
        assert_eq!(nav.current_index(), 2);
        assert!(nav.select_next_day());
        assert_eq!(nav.selected_date(), date!(2025 - 01 - 20));
        assert_eq!(nav.current_index(), 3);
        assert!(!nav.select_next_day());
        assert_eq!(nav.selected_date(), date!(2025 - 01 - 20));
        assert!(nav.select_previous_day());
        assert_eq!(nav.current_index(), 2);
    }

    #[test]
    fn test_go_to_today() {
        let options = january().initial_date(date!(2025 - 01 - 02));
        let mut nav = StripNavigator::new(options, TODAY).unwrap();
        let log = recorder(&mut nav);
        assert_eq!(nav.current_index(), 0);
        assert!(nav.go_to_today());
        assert_eq!(nav.selected_date(), TODAY);
        assert_eq!(nav.current_index(), 2);
        assert_eq!(*log.borrow(), ["2025-01-15"]);
        // Scrolled away but still selecting today: scroll back without
        // notifying
        nav.go_to_next_week();
        assert!(nav.go_to_today());
        assert_eq!(nav.current_index(), 2);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn test_go_to_today_out_of_bounds() {
        let options = january().min_date(date!(2025 - 01 - 20));
        let mut nav = StripNavigator::new(options, TODAY).unwrap();
        let before = nav.current_index();
        assert!(!nav.go_to_today());
        assert_eq!(nav.current_index(), before);
    }

    #[test]
    fn test_controlled_selection() {
        let options = january().selected_date(date!(2025 - 01 - 06));
        let mut nav = StripNavigator::new(options, TODAY).unwrap();
        let log = recorder(&mut nav);
        assert_eq!(nav.mode(), SelectionMode::Controlled);
        assert_eq!(nav.current_index(), 1);
        assert!(nav.select_date(date!(2025 - 01 - 29)));
        // Only the owner changes the selection
        assert_eq!(nav.selected_date(), date!(2025 - 01 - 06));
        assert_eq!(nav.current_index(), 1);
        assert_eq!(*log.borrow(), ["2025-01-29"]);
        nav.set_controlled_date(date!(2025 - 01 - 29)).unwrap();
        assert_eq!(nav.selected_date(), date!(2025 - 01 - 29));
        assert_eq!(nav.current_index(), 4);
    }

    #[test]
    fn test_controlled_rejects_unselectable_date() {
        let options = january()
            .min_date(date!(2025 - 01 - 06))
            .selected_date(date!(2025 - 01 - 06));
        let mut nav = StripNavigator::new(options, TODAY).unwrap();
        assert_eq!(
            nav.set_controlled_date(date!(2025 - 01 - 05)),
            Err(SelectionError::Unselectable(date!(2025 - 01 - 05)))
        );
        assert_eq!(
            nav.set_controlled_date(date!(2025 - 02 - 03)),
            Err(SelectionError::Unselectable(date!(2025 - 02 - 03)))
        );
        assert_eq!(nav.selected_date(), date!(2025 - 01 - 06));
        assert_eq!(nav.current_index(), 1);
    }

    #[test]
    fn test_controlled_go_to_today_scrolls() {
        let options = january().selected_date(date!(2025 - 01 - 29));
        let mut nav = StripNavigator::new(options, TODAY).unwrap();
        let log = recorder(&mut nav);
        assert!(nav.go_to_today());
        assert_eq!(nav.current_index(), 2);
        assert_eq!(nav.selected_date(), date!(2025 - 01 - 29));
        assert_eq!(*log.borrow(), ["2025-01-15"]);
    }

    #[test]
    fn test_jump_to() {
        let options = january().max_date(date!(2025 - 01 - 28));
        let mut nav = StripNavigator::new(options, TODAY).unwrap();
        let log = recorder(&mut nav);
        assert!(nav.jump_to(date!(2025 - 01 - 27)));
        assert_eq!(nav.current_index(), 4);
        assert_eq!(nav.selected_date(), date!(2025 - 01 - 27));
        assert!(!nav.jump_to(date!(2025 - 01 - 30)));
        assert_eq!(nav.selected_date(), date!(2025 - 01 - 27));
        assert_eq!(*log.borrow(), ["2025-01-27"]);
    }

    #[test]
    fn test_uncontrolled_rejects_external_selection() {
        let mut nav = StripNavigator::new(january(), TODAY).unwrap();
        assert_eq!(
            nav.set_controlled_date(date!(2025 - 01 - 20)),
            Err(SelectionError::Uncontrolled)
        );
        assert_eq!(nav.selected_date(), TODAY);
    }

    #[test]
    fn test_window_mode() {
        let options = StripOptions::new().week_count(4);
        let nav = StripNavigator::new(options, TODAY).unwrap();
        assert_eq!(nav.weeks().len(), 5);
        assert_eq!(nav.current_index(), 2);
        assert_eq!(
            nav.current_week().unwrap().id().to_string(),
            "week-2025-01-13"
        );
    }

    #[test]
    fn test_window_slides_past_end() {
        let options = StripOptions::new().week_count(2);
        let mut nav = StripNavigator::new(options, TODAY).unwrap();
        assert_eq!(nav.weeks().len(), 3);
        assert!(nav.go_to_next_week());
        assert_eq!(nav.current_index(), 2);
        assert!(nav.can_go_next());
        assert!(nav.go_to_next_week());
        assert_eq!(nav.current_index(), 2);
        let starts = nav.weeks().iter().map(WeekData::start).collect::<Vec<_>>();
        assert_eq!(
            starts,
            [
                date!(2025 - 01 - 13),
                date!(2025 - 01 - 20),
                date!(2025 - 01 - 27)
            ]
        );
        for _ in 0..4 {
            assert!(nav.go_to_previous_week());
        }
        assert_eq!(nav.current_index(), 0);
        assert_eq!(nav.weeks()[0].start(), date!(2024 - 12 - 30));
    }

    #[test]
    fn test_window_recenters_on_distant_selection() {
        let options = StripOptions::new().week_count(4);
        let mut nav = StripNavigator::new(options, TODAY).unwrap();
        assert!(nav.select_date(date!(2025 - 07 - 04)));
        assert_eq!(nav.weeks().len(), 5);
        assert_eq!(nav.current_index(), 2);
        assert_eq!(
            nav.current_week().unwrap().id().to_string(),
            "week-2025-06-30"
        );
        assert!(nav.go_to_today());
        assert_eq!(
            nav.current_week().unwrap().id().to_string(),
            "week-2025-01-13"
        );
    }

    #[test]
    fn test_sunday_first_day() {
        let options = january().first_day(Weekday::Sunday);
        let nav = StripNavigator::new(options, TODAY).unwrap();
        assert_eq!(nav.weeks()[0].start(), date!(2024 - 12 - 29));
        assert_eq!(nav.weeks().last().unwrap().end(), date!(2025 - 02 - 01));
        assert_eq!(
            nav.current_week().unwrap().id().to_string(),
            "week-2025-01-12"
        );
    }

    #[test]
    fn test_marked_dates() {
        let options = january().mark(date!(2025 - 01 - 20));
        let nav = StripNavigator::new(options, TODAY).unwrap();
        assert!(nav.is_marked(date!(2025 - 01 - 20)));
        assert!(!nav.is_marked(date!(2025 - 01 - 21)));
    }
}
