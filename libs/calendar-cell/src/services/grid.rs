use chrono::{Datelike, Days, NaiveDate};

use crate::models::{CalendarCell, CalendarState};

pub const GRID_CELLS: usize = 42;

/// Six weeks starting on the Sunday on or before the 1st of the month.
pub fn month_grid(state: &CalendarState, today: NaiveDate) -> Vec<CalendarCell> {
    let first = state.first_of_month();
    let offset = u64::from(first.weekday().num_days_from_sunday());
    let start = first.checked_sub_days(Days::new(offset)).unwrap_or(first);

    start
        .iter_days()
        .take(GRID_CELLS)
        .map(|date| CalendarCell {
            date,
            in_month: state.contains(date),
            is_today: date == today,
            is_selected: state.selected() == Some(date),
        })
        .collect()
}
