pub mod dates;
pub mod locale;
pub mod lookup;
pub mod navigator;
pub mod parse;
pub mod theme;
pub mod widget;
pub use self::dates::{CalendarDate, DateBounds, WeekData, WeekFactory, WeekId};
pub use self::locale::Locale;
pub use self::lookup::{find_week_index, scroll_index, IndexFallback};
pub use self::navigator::{SelectionError, SelectionMode, StripNavigator, StripOptions};
pub use self::parse::{is_parsable_date_string, parse_date_string};
pub use self::theme::{Theme, ThemeVariant};
pub use self::widget::{DayRenderer, DefaultDay, StripCalendar};
