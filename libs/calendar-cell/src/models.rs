use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

use appointment_cell::models::Appointment;
use shared_utils::dates::month_name;

/// Years the calendar will display.
pub const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1..=9999;

/// Query string of the calendar page. Every part is optional and falls back
/// to today.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalendarQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

/// Month on display and the one selected day, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarState {
    year: i32,
    month: u32,
    selected: Option<NaiveDate>,
}

impl CalendarState {
    /// Current month with today selected.
    pub fn for_today(today: NaiveDate) -> Self {
        Self {
            year: today.year(),
            month: today.month(),
            selected: Some(today),
        }
    }

    /// Displayed month without a selection. An invalid month, or a year
    /// outside [`YEAR_RANGE`], falls back to today's.
    pub fn showing(year: i32, month: u32, today: NaiveDate) -> Self {
        if !YEAR_RANGE.contains(&year) || NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Self::showing(today.year(), today.month(), today);
        }
        Self {
            year,
            month,
            selected: None,
        }
    }

    /// Rebuilds the state from the query string. In the current month with
    /// no day chosen, today is selected.
    pub fn from_query(query: &CalendarQuery, today: NaiveDate) -> Self {
        let mut state = Self::showing(
            query.year.unwrap_or(today.year()),
            query.month.unwrap_or(today.month()),
            today,
        );

        match query.day.and_then(|day| NaiveDate::from_ymd_opt(state.year, state.month, day)) {
            Some(day) => {
                state.select(day);
            }
            None if state.is_current_month(today) => {
                state.select(today);
            }
            None => {}
        }

        state
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }

    pub fn first_of_month(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    pub fn is_current_month(&self, today: NaiveDate) -> bool {
        self.year == today.year() && self.month == today.month()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Selects `date` if it belongs to the displayed month, replacing any
    /// previous selection. Returns whether the selection changed.
    pub fn select(&mut self, date: NaiveDate) -> bool {
        if !self.contains(date) {
            return false;
        }
        self.selected = Some(date);
        true
    }

    pub fn previous(&self) -> Self {
        let (year, month) = if self.month == 1 {
            (self.year - 1, 12)
        } else {
            (self.year, self.month - 1)
        };
        Self { year, month, selected: None }
    }

    pub fn next(&self) -> Self {
        let (year, month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        Self { year, month, selected: None }
    }

    /// "Octubre 2025"
    pub fn title(&self) -> String {
        format!("{} {}", month_name(self.month), self.year)
    }

    pub fn href(&self) -> String {
        format!("/calendar?year={}&month={}", self.year, self.month)
    }

    pub fn day_href(&self, date: NaiveDate) -> String {
        format!("{}&day={}", self.href(), date.day())
    }
}

/// One of the 42 cells of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub in_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
}

/// Content of the day panel next to the grid.
#[derive(Debug, Clone, PartialEq)]
pub enum DayPanel {
    /// No day selected.
    Idle,
    /// Appointments of the day, sorted by time.
    Loaded(NaiveDate, Vec<Appointment>),
    Empty(NaiveDate),
    Failed(NaiveDate, String),
}
