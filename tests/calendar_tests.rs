mod common;

use chrono::NaiveDate;
use room_schedule_lambda_rust::calendar::{
    CalendarMonth, DayCell, MonthCell, build_month_grid, format_date_key, get_day_schedule, shift_month,
};
use room_schedule_lambda_rust::model::booking::BookingStatus;

use common::{booking, ids};

fn month(year: i32, m: u32) -> CalendarMonth {
    CalendarMonth::new(year, m).expect("valid month")
}

fn day_cells(cells: &[MonthCell]) -> Vec<DayCell> {
    cells
        .iter()
        .filter_map(|c| match c {
            MonthCell::Day(d) => Some(*d),
            MonthCell::Blank => None,
        })
        .collect()
}

#[test]
fn formats_date_keys_with_one_based_padded_month() {
    assert_eq!(format_date_key(2025, 0, 5), "2025-01-05");
    assert_eq!(format_date_key(2025, 11, 31), "2025-12-31");
}

#[test]
fn shifts_month_across_year_boundaries() {
    assert_eq!(shift_month(month(2025, 11), 1), month(2026, 0));
    assert_eq!(shift_month(month(2025, 0), -1), month(2024, 11));
    assert_eq!(shift_month(month(2025, 5), 1), month(2025, 6));
}

#[test]
fn rejects_out_of_range_months() {
    assert!(CalendarMonth::new(2025, 12).is_none());
    assert_eq!(CalendarMonth::from_date(NaiveDate::from_ymd_opt(2025, 3, 17).unwrap()), month(2025, 2));
}

#[test]
fn grid_has_leading_blanks_then_every_day() {
    // (year, month0, first weekday index, days)
    let cases = [(2025, 0, 3, 31), (2024, 1, 4, 29), (2025, 1, 6, 28), (2025, 5, 0, 30), (2025, 8, 1, 30)];
    let today = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();

    for (year, m, first, days) in cases {
        let cal = month(year, m);
        assert_eq!(cal.first_day_index(), first, "{}-{}", year, m);
        assert_eq!(cal.days_in_month(), days, "{}-{}", year, m);

        let cells = build_month_grid(&[], cal, today);
        assert_eq!(cells.len(), (first + days) as usize);
        assert!(cells[..first as usize].iter().all(|c| *c == MonthCell::Blank));
        let numbered: Vec<u32> = day_cells(&cells).iter().map(|d| d.day).collect();
        assert_eq!(numbered, (1..=days).collect::<Vec<u32>>());
    }
}

#[test]
fn every_status_marks_its_day_on_the_grid() {
    let bookings = vec![
        booking("a", "R1", "2025-01-05 09:00", BookingStatus::Rejected),
        booking("b", "R1", "2025-01-12 09:00", BookingStatus::Cancelled),
        booking("c", "R2", "2025-01-12 13:00", BookingStatus::Pending),
        booking("d", "R2", "2025-02-05 13:00", BookingStatus::Approved),
    ];
    let today = NaiveDate::from_ymd_opt(2025, 1, 20).unwrap();

    let days = day_cells(&build_month_grid(&bookings, month(2025, 0), today));
    let with_events: Vec<u32> = days.iter().filter(|d| d.has_event).map(|d| d.day).collect();
    assert_eq!(with_events, vec![5, 12]);

    let todays: Vec<u32> = days.iter().filter(|d| d.is_today).map(|d| d.day).collect();
    assert_eq!(todays, vec![20]);
}

#[test]
fn today_is_not_marked_in_other_months() {
    let today = NaiveDate::from_ymd_opt(2025, 1, 20).unwrap();
    let days = day_cells(&build_month_grid(&[], month(2024, 0), today));
    assert!(days.iter().all(|d| !d.is_today));
}

#[test]
fn bookings_without_start_never_mark_a_day() {
    let mut undated = booking("x", "R1", "2025-01-05 09:00", BookingStatus::Approved);
    undated.start_at = None;
    let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let days = day_cells(&build_month_grid(&[undated], month(2025, 0), today));
    assert!(days.iter().all(|d| !d.has_event));
}

#[test]
fn day_schedule_puts_approved_first_and_keeps_order() {
    let bookings = vec![
        booking("A", "R1", "2025-01-05 08:00", BookingStatus::Pending),
        booking("B", "R2", "2025-01-05 10:00", BookingStatus::Approved),
        booking("C", "R3", "2025-01-05 12:00", BookingStatus::Pending),
    ];
    let schedule = get_day_schedule(&bookings, 5, 0, 2025);
    assert_eq!(ids(&schedule), vec!["B", "A", "C"]);
}

#[test]
fn day_schedule_drops_rejected_cancelled_and_other_days() {
    let bookings = vec![
        booking("rej", "R1", "2025-01-05 08:00", BookingStatus::Rejected),
        booking("ok2", "R1", "2025-01-05 09:00", BookingStatus::Pending),
        booking("can", "R2", "2025-01-05 10:00", BookingStatus::Cancelled),
        booking("other", "R2", "2025-01-06 10:00", BookingStatus::Approved),
        booking("ok1", "R3", "2025-01-05 23:59", BookingStatus::Approved),
    ];
    let schedule = get_day_schedule(&bookings, 5, 0, 2025);
    assert_eq!(ids(&schedule), vec!["ok1", "ok2"]);
    assert!(schedule.iter().all(|b| b.status.is_active()));
}

#[test]
fn empty_day_schedule_is_an_empty_vec() {
    let bookings = vec![booking("a", "R1", "2025-01-05 08:00", BookingStatus::Approved)];
    assert!(get_day_schedule(&bookings, 6, 0, 2025).is_empty());
    assert!(get_day_schedule(&[], 6, 0, 2025).is_empty());
}

#[test]
fn repeated_calls_give_equal_results() {
    let bookings = vec![
        booking("A", "R1", "2025-03-05 08:00", BookingStatus::Pending),
        booking("B", "R2", "2025-03-05 10:00", BookingStatus::Approved),
    ];
    let today = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
    assert_eq!(build_month_grid(&bookings, month(2025, 2), today), build_month_grid(&bookings, month(2025, 2), today));
    assert_eq!(get_day_schedule(&bookings, 5, 2, 2025), get_day_schedule(&bookings, 5, 2, 2025));
    assert_eq!(format_date_key(2025, 2, 5), format_date_key(2025, 2, 5));
    assert_eq!(shift_month(month(2025, 2), 1), shift_month(month(2025, 2), 1));
}
