use super::dates::CalendarDate;
use super::locale::Locale;
use super::navigator::StripNavigator;
use super::parse::format_date;
use super::theme::{DayElementStyles, DayStates, Theme};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{StatefulWidget, Widget},
};
use time::Date;

/// Number of lines the strip occupies: header, day names, day numbers, and
/// markers
pub const STRIP_HEIGHT: u16 = 4;

const HEADER_ROW: u16 = 0;
const NAME_ROW: u16 = 1;
const NUMBER_ROW: u16 = 2;
const MARKER_ROW: u16 = 3;

/// Columns reserved on each side of the strip for the previous/next buttons
const BUTTON_WIDTH: u16 = 2;

const PREVIOUS_SYMBOL: char = '‹';
const NEXT_SYMBOL: char = '›';
const MARKER_SYMBOL: &str = "•";
const ACS_VLINE: char = '│';

/// Everything a [`DayRenderer`] knows about the day being drawn
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DayContext {
    pub date: CalendarDate,
    pub day_name: &'static str,
    pub is_today: bool,
    pub is_selected: bool,
    pub is_disabled: bool,
    pub is_marked: bool,
    /// Columns available to the day
    pub item_width: u16,
}

/// The three lines making up a drawn day.  Each line is drawn into a cell
/// `item_width` columns wide, honoring the line's alignment.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DayCell {
    pub name: Line<'static>,
    pub number: Line<'static>,
    pub indicator: Line<'static>,
}

/// Strategy for drawing individual days
pub trait DayRenderer {
    /// `styles` are the theme's styles for the day's states, already layered
    fn render_day(&self, day: &DayContext, styles: DayElementStyles) -> DayCell;
}

impl<T: DayRenderer + ?Sized> DayRenderer for &T {
    fn render_day(&self, day: &DayContext, styles: DayElementStyles) -> DayCell {
        (**self).render_day(day, styles)
    }
}

/// Draws the weekday name, the day of the month (bracketed for today), and a
/// dot under marked days
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DefaultDay;

impl DayRenderer for DefaultDay {
    fn render_day(&self, day: &DayContext, styles: DayElementStyles) -> DayCell {
        let number = if day.is_today && day.item_width >= 4 {
            format!("[{:2}]", day.date.day())
        } else {
            format!("{:2}", day.date.day())
        };
        let indicator = if day.is_marked {
            Line::styled(MARKER_SYMBOL, styles.indicator).centered()
        } else {
            Line::default()
        };
        DayCell {
            name: Line::styled(day.day_name, styles.day_name).centered(),
            number: Line::styled(number, styles.day_number).centered(),
            indicator,
        }
    }
}

/// Formats the header line from the selected date
pub type HeaderFormat = fn(Date, Locale) -> String;

fn default_header(date: Date, _locale: Locale) -> String {
    format_date(date)
}

/// A horizontal strip of weeks with a header and previous/next buttons,
/// starting at the navigator's current week and showing as many whole weeks
/// as fit
#[derive(Clone, Copy, Debug)]
pub struct StripCalendar<R = DefaultDay> {
    theme: Theme,
    renderer: R,
    header: HeaderFormat,
}

impl StripCalendar<DefaultDay> {
    pub fn new() -> StripCalendar<DefaultDay> {
        StripCalendar {
            theme: Theme::default(),
            renderer: DefaultDay,
            header: default_header,
        }
    }
}

impl Default for StripCalendar<DefaultDay> {
    fn default() -> StripCalendar<DefaultDay> {
        StripCalendar::new()
    }
}

impl<R: DayRenderer> StripCalendar<R> {
    pub fn theme(mut self, theme: Theme) -> StripCalendar<R> {
        self.theme = theme;
        self
    }

    pub fn header(mut self, header: HeaderFormat) -> StripCalendar<R> {
        self.header = header;
        self
    }

    pub fn renderer<R2: DayRenderer>(self, renderer: R2) -> StripCalendar<R2> {
        StripCalendar {
            theme: self.theme,
            renderer,
            header: self.header,
        }
    }

    /// Number of weeks drawn side by side in a strip `width` columns wide,
    /// including the buttons; always at least one
    pub fn visible_weeks(width: u16, item_width: u16, column_gap: u16) -> usize {
        let strip = width.saturating_sub(2 * BUTTON_WIDTH);
        let week = week_width(item_width);
        usize::from(
            (strip.saturating_add(column_gap) / week.saturating_add(column_gap).max(1)).max(1),
        )
    }

    fn day_context(&self, state: &StripNavigator, date: CalendarDate) -> DayContext {
        let options = state.options();
        DayContext {
            date,
            day_name: options.locale.weekday_abbrev(date.weekday()),
            is_today: date.is_today(),
            is_selected: state.is_selected(date.date()),
            is_disabled: date.is_disabled(),
            is_marked: state.is_marked(date.date()),
            item_width: options.item_width.max(1),
        }
    }
}

fn week_width(item_width: u16) -> u16 {
    item_width.max(1).saturating_mul(7)
}

impl<R: DayRenderer> StatefulWidget for StripCalendar<R> {
    type State = StripNavigator;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut StripNavigator) {
        buf.set_style(area, self.theme.base);
        let options = state.options();
        let item_width = options.item_width.max(1);
        let column_gap = options.column_gap;
        let mut canvas = StripCanvas::new(area, buf);
        let header = (self.header)(state.selected_date(), options.locale);
        canvas.print(HEADER_ROW, BUTTON_WIDTH, header, self.theme.header);
        canvas.put_char(
            NUMBER_ROW,
            0,
            PREVIOUS_SYMBOL,
            if state.can_go_previous() {
                self.theme.button
            } else {
                self.theme.button_disabled
            },
        );
        if let Some(x) = area.width.checked_sub(1).filter(|&x| x >= BUTTON_WIDTH) {
            canvas.put_char(
                NUMBER_ROW,
                x,
                NEXT_SYMBOL,
                if state.can_go_next() {
                    self.theme.button
                } else {
                    self.theme.button_disabled
                },
            );
        }
        let qty = Self::visible_weeks(area.width, item_width, column_gap);
        let stride = week_width(item_width).saturating_add(column_gap);
        let mut x0 = BUTTON_WIDTH;
        for (k, week) in state
            .weeks()
            .iter()
            .skip(state.current_index())
            .take(qty)
            .enumerate()
        {
            if k > 0 && column_gap > 0 {
                let bar = x0 - column_gap.div_ceil(2);
                for y in NAME_ROW..=MARKER_ROW {
                    canvas.put_char(y, bar, ACS_VLINE, self.theme.separator);
                }
            }
            for (j, &date) in std::iter::zip(0u16.., week.dates()) {
                let day = self.day_context(state, date);
                let styles = self.theme.days.resolve(DayStates {
                    is_today: day.is_today,
                    is_selected: day.is_selected,
                    is_disabled: day.is_disabled,
                });
                let cell = self.renderer.render_day(&day, styles);
                let x = x0.saturating_add(j.saturating_mul(item_width));
                canvas.cell(NAME_ROW, x, item_width, cell.name);
                canvas.cell(NUMBER_ROW, x, item_width, cell.number);
                canvas.cell(MARKER_ROW, x, item_width, cell.indicator);
            }
            x0 = x0.saturating_add(stride);
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
struct StripCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> StripCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    // Draw `line` into the `width` columns starting at (`x`, `y`), clipped to
    // the strip's area
    fn cell(&mut self, y: u16, x: u16, width: u16, line: Line<'_>) {
        if y < self.area.height && x < self.area.width {
            let rect = Rect {
                x: x + self.area.x,
                y: y + self.area.y,
                width: width.min(self.area.width - x),
                height: 1,
            };
            line.render(rect, self.buf);
        }
    }

    fn print(&mut self, y: u16, x: u16, s: String, style: Style) {
        let width = self.area.width.saturating_sub(x);
        self.cell(y, x, width, Line::styled(s, style));
    }

    fn put_char(&mut self, y: u16, x: u16, ch: char, style: Style) {
        if y < self.area.height && x < self.area.width {
            self.buf[(x + self.area.x, y + self.area.y)]
                .set_char(ch)
                .set_style(style);
        }
    }
}
