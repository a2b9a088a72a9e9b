use chrono::{NaiveDate, TimeZone, Utc};
use room_schedule_lambda_rust::api::{Backend, parse_bookings, parse_items, parse_notifications, parse_rooms};
use room_schedule_lambda_rust::calendar::get_day_schedule;
use room_schedule_lambda_rust::config::DEFAULT_TIME_ZONE;
use room_schedule_lambda_rust::model::booking::BookingStatus;
use room_schedule_lambda_rust::model::notification::NotificationKind;

fn load(name: &str) -> String {
    std::fs::read_to_string(format!("tests/{}", name)).unwrap_or_else(|e| panic!("failed to read {}: {}", name, e))
}

#[test]
fn parses_booking_records_into_local_bookings() {
    // Arrange
    let json = load("sample_bookings.json");

    // Act
    let bookings = parse_bookings(&json, DEFAULT_TIME_ZONE).expect("bookings parse");

    // Assert
    assert_eq!(bookings.len(), 5);

    let seminar = &bookings[0];
    assert_eq!(seminar.id.as_deref(), Some("PJM-001"));
    assert_eq!(seminar.activity_name.as_deref(), Some("Seminar Nasional"));
    assert_eq!(seminar.status, BookingStatus::Approved);
    assert_eq!(seminar.date_key().as_deref(), Some("2025-09-21"));

    // Numeric ids and plain-string activities are accepted; 20:30Z is 03:30 next day in Jakarta
    let robotics = &bookings[1];
    assert_eq!(robotics.id.as_deref(), Some("42"));
    assert_eq!(robotics.activity_name.as_deref(), Some("Latihan Rutin"));
    assert_eq!(robotics.date_key().as_deref(), Some("2025-09-22"));

    assert_eq!(bookings[2].status, BookingStatus::Rejected);
    assert_eq!(bookings[2].date_key().as_deref(), Some("2025-09-28"));

    // Null status defaults to pending; date-only start is midnight
    assert_eq!(bookings[3].status, BookingStatus::Pending);
    assert_eq!(bookings[3].start_at, NaiveDate::from_ymd_opt(2025, 9, 28).unwrap().and_hms_opt(0, 0, 0));

    // Garbage timestamp and unknown status never fail the whole list
    assert_eq!(bookings[4].start_at, None);
    assert_eq!(bookings[4].room_code, None);
    assert_eq!(bookings[4].status, BookingStatus::Pending);
}

#[test]
fn parsed_bookings_feed_the_day_schedule() {
    let bookings = parse_bookings(&load("sample_bookings.json"), DEFAULT_TIME_ZONE).expect("bookings parse");
    let on_28th = get_day_schedule(&bookings, 28, 8, 2025);
    let ids: Vec<&str> = on_28th.iter().filter_map(|b| b.id.as_deref()).collect();
    assert_eq!(ids, vec!["PJM-004"]);
}

#[test]
fn parses_rooms_with_optional_fields() {
    let rooms = parse_rooms(&load("sample_rooms.json")).expect("rooms parse");

    // The room without a code is dropped, the rest survive
    assert_eq!(rooms.len(), 4);
    assert_eq!(rooms[0].code, "R-101");
    assert_eq!(rooms[0].capacity.as_deref(), Some("200"));
    assert_eq!(rooms[1].capacity.as_deref(), Some("40"));
    assert_eq!(rooms[2].location, None);
    assert_eq!(rooms[2].capacity, None);
    assert_eq!(rooms[3].code, "104");
    assert_eq!(rooms[3].capacity, None);
}

#[test]
fn string_capacity_does_not_fail_the_room_list() {
    let body = serde_json::json!([
        { "kode_ruangan": "R1", "kapasitas": "200" },
        { "kode_ruangan": "R2" },
        { "kode_ruangan": 3, "kapasitas": 12 }
    ])
    .to_string();
    let rooms = parse_rooms(&body).expect("rooms parse");
    let capacities: Vec<Option<&str>> = rooms.iter().map(|r| r.capacity.as_deref()).collect();
    assert_eq!(capacities, vec![Some("200"), None, Some("12")]);
    assert_eq!(rooms[2].code, "3");
}

#[test]
fn parses_notifications() {
    let list = parse_notifications(&load("sample_notifications.json"), DEFAULT_TIME_ZONE).expect("notifications parse");
    assert_eq!(list.len(), 4);
    assert!(list[0].is_unread());
    assert_eq!(list[0].code.as_deref(), Some("NTF-1"));
    assert_eq!(list[0].kind, NotificationKind::StatusApproved);
    assert_eq!(list[0].created_at, Some(Utc.with_ymd_and_hms(2025, 9, 20, 2, 0, 0).unwrap()));
    assert_eq!(list[1].kind, NotificationKind::Other);
    assert_eq!(list[1].booking_code, None);
}

#[test]
fn numeric_ids_and_naive_timestamps_do_not_fail_the_notification_list() {
    let list = parse_notifications(&load("sample_notifications.json"), DEFAULT_TIME_ZONE).expect("notifications parse");

    let numeric = &list[2];
    assert_eq!(numeric.code.as_deref(), Some("7"));
    assert_eq!(numeric.booking_code.as_deref(), Some("42"));
    assert_eq!(numeric.kind, NotificationKind::RequestCreated);
    // Naive 09:00 is Jakarta local time, 02:00 UTC
    assert_eq!(numeric.created_at, Some(Utc.with_ymd_and_hms(2025, 9, 20, 2, 0, 0).unwrap()));

    let broken = &list[3];
    assert_eq!(broken.code.as_deref(), Some("8"));
    assert_eq!(broken.kind, NotificationKind::Other);
    assert_eq!(broken.created_at, None);
}

#[test]
fn parses_items_with_mixed_quantities() {
    let items = parse_items(&load("sample_items.json")).expect("items parse");
    assert_eq!(items.len(), 3);
    assert_eq!(items[0].code.as_deref(), Some("BRG-01"));
    assert_eq!(items[0].total.as_deref(), Some("10"));
    assert_eq!(items[0].available.as_deref(), Some("4"));
    assert_eq!(items[1].code.as_deref(), Some("2"));
    assert_eq!(items[1].available.as_deref(), Some("25"));
    assert_eq!(items[2].code, None);
    assert_eq!(items[2].name, None);
    assert_eq!(items[2].total, None);
}

#[test]
fn malformed_bodies_are_reported() {
    let err = parse_rooms("{\"not\": \"a list\"}").unwrap_err();
    assert!(err.contains("Failed to deserialize rooms"), "error was: {}", err);
}

#[test]
fn backend_debug_keeps_base_url_without_trailing_slash() {
    // Avoid network: only construction is exercised here
    let backend = Backend::new("http://localhost:8000/api/", None, DEFAULT_TIME_ZONE);
    let dbg = format!("{:?}", backend);
    assert!(dbg.contains("http://localhost:8000/api\""), "debug was: {}", dbg);
}
