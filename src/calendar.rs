use std::collections::HashSet;

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

use crate::model::booking::{Booking, BookingStatus};

/// A displayed month. Stored as its first day so the derived attributes never fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarMonth {
    first: NaiveDate,
}

impl CalendarMonth {
    /// `month` is zero-based (January = 0). Returns `None` for components chrono cannot represent.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if month > 11 {
            return None;
        }
        NaiveDate::from_ymd_opt(year, month + 1, 1).map(|first| CalendarMonth { first })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        CalendarMonth { first: date.with_day0(0).unwrap_or(date) }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    /// Zero-based month.
    pub fn month(&self) -> u32 {
        self.first.month0()
    }

    /// Weekday column of day 1, Sunday = 0.
    pub fn first_day_index(&self) -> u32 {
        self.first.weekday().num_days_from_sunday()
    }

    pub fn days_in_month(&self) -> u32 {
        match self.first.checked_add_months(Months::new(1)) {
            Some(next) => (next - self.first).num_days() as u32,
            // Only reachable in chrono's final representable month, which is December
            None => 31,
        }
    }

    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        self.first.with_day(day)
    }
}

/// Aggregate for one numbered day of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub day: u32,
    pub has_event: bool,
    pub is_today: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MonthCell {
    /// Leading placeholder that pushes day 1 into its weekday column.
    Blank,
    Day(DayCell),
}

/// `YYYY-MM-DD` for a zero-based month. Callers pass valid calendar components only.
pub fn format_date_key(year: i32, month: u32, day: u32) -> String {
    format!("{}-{:02}-{:02}", year, month + 1, day)
}

/// The adjacent month in `direction` (normally +1 or -1), rolling the year as needed.
pub fn shift_month(month: CalendarMonth, direction: i32) -> CalendarMonth {
    let step = Months::new(direction.unsigned_abs());
    let shifted = if direction >= 0 {
        month.first.checked_add_months(step)
    } else {
        month.first.checked_sub_months(step)
    };
    // Past chrono's supported range the cursor stays put
    shifted.map(|first| CalendarMonth { first }).unwrap_or(month)
}

/// Blank leading cells followed by one cell per day. Every booking marks its day,
/// whatever its status.
pub fn build_month_grid(bookings: &[Booking], month: CalendarMonth, today: NaiveDate) -> Vec<MonthCell> {
    let event_keys: HashSet<String> = bookings.iter().filter_map(Booking::date_key).collect();
    let leading = month.first_day_index() as usize;
    let days = month.days_in_month();

    let mut cells = Vec::with_capacity(leading + days as usize);
    cells.extend(std::iter::repeat_n(MonthCell::Blank, leading));
    for day in 1..=days {
        let key = format_date_key(month.year(), month.month(), day);
        let is_today = day == today.day() && month.month() == today.month0() && month.year() == today.year();
        cells.push(MonthCell::Day(DayCell { day, has_event: event_keys.contains(&key), is_today }));
    }
    cells
}

/// Visible bookings for one day, approved ones first. The sort is stable, so
/// bookings of equal rank keep their input order.
pub fn get_day_schedule(bookings: &[Booking], day: u32, month: u32, year: i32) -> Vec<&Booking> {
    let key = format_date_key(year, month, day);
    let mut daily: Vec<&Booking> = bookings
        .iter()
        .filter(|b| b.status.is_active() && b.date_key().as_deref() == Some(key.as_str()))
        .collect();
    daily.sort_by_key(|b| b.status != BookingStatus::Approved);
    daily
}
