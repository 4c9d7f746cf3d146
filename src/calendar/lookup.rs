use super::dates::{WeekData, WeekId};
use time::{Date, Weekday};

/// Returns the index of the week in `weeks` that contains `date`.  `weeks`
/// must be sorted by ID, as produced by `WeekFactory`.
pub fn find_week_index(weeks: &[WeekData], date: Date, first_day: Weekday) -> Option<usize> {
    let id = WeekId::containing(date, first_day)?;
    weeks.binary_search_by_key(&id, WeekData::id).ok()
}

/// Where to scroll when the target date is not in the week sequence
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum IndexFallback {
    Start,
    #[default]
    Middle,
    End,
}

impl IndexFallback {
    /// Resolve to an index into a sequence of `len` weeks.  Empty sequences
    /// resolve to 0.
    pub fn resolve(self, len: usize) -> usize {
        match self {
            IndexFallback::Start => 0,
            IndexFallback::Middle => len / 2,
            IndexFallback::End => len.saturating_sub(1),
        }
    }
}

/// Scroll index of the week containing `date`, or `fallback` if there is no
/// such week
pub fn scroll_index(
    weeks: &[WeekData],
    date: Date,
    first_day: Weekday,
    fallback: IndexFallback,
) -> usize {
    find_week_index(weeks, date, first_day).unwrap_or_else(|| fallback.resolve(weeks.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::dates::WeekFactory;
    use time::macros::date;
    use time::Weekday::*;

    fn january(first_day: Weekday) -> Vec<WeekData> {
        WeekFactory::new(first_day, date!(2025 - 01 - 15))
            .range(date!(2025 - 01 - 01), date!(2025 - 01 - 31))
            .unwrap()
    }

    #[test]
    fn test_find_selected_week() {
        let weeks = january(Monday);
        let i = find_week_index(&weeks, date!(2025 - 01 - 15), Monday).unwrap();
        assert_eq!(i, 2);
        assert_eq!(weeks[i].id().to_string(), "week-2025-01-13");
    }

    #[test]
    fn test_every_date_resolves_to_its_week() {
        for first_day in [Sunday, Monday, Thursday] {
            let weeks = january(first_day);
            for week in &weeks {
                for day in week.dates() {
                    let i = find_week_index(&weeks, day.date(), first_day).unwrap();
                    assert!(
                        weeks[i].contains(day.date()),
                        "{} should be in {}",
                        day.date_string(),
                        weeks[i].id()
                    );
                    assert_eq!(weeks[i].id(), week.id());
                }
            }
        }
    }

    #[test]
    fn test_find_outside_range() {
        let weeks = january(Monday);
        assert_eq!(find_week_index(&weeks, date!(2024 - 12 - 29), Monday), None);
        assert_eq!(find_week_index(&weeks, date!(2025 - 02 - 03), Monday), None);
        assert_eq!(find_week_index(&[], date!(2025 - 01 - 15), Monday), None);
    }

    #[test]
    fn test_scroll_index_fallback() {
        let weeks = january(Monday);
        let outside = date!(2026 - 06 - 01);
        assert_eq!(
            scroll_index(&weeks, outside, Monday, IndexFallback::Start),
            0
        );
        assert_eq!(
            scroll_index(&weeks, outside, Monday, IndexFallback::Middle),
            2
        );
        assert_eq!(scroll_index(&weeks, outside, Monday, IndexFallback::End), 4);
        assert_eq!(
            scroll_index(&weeks, date!(2025 - 01 - 30), Monday, IndexFallback::Start),
            4
        );
        assert_eq!(
            scroll_index(&[], outside, Monday, IndexFallback::End),
            0
        );
    }
}
