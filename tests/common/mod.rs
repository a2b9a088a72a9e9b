// Shared fixtures; not every test binary uses all of them.
#![allow(dead_code)]

use chrono::NaiveDateTime;
use room_schedule_lambda_rust::model::booking::{Booking, BookingStatus};
use room_schedule_lambda_rust::model::room::Room;

pub fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").expect("fixture timestamp")
}

pub fn booking(id: &str, room: &str, start: &str, status: BookingStatus) -> Booking {
    Booking {
        id: Some(id.to_string()),
        room_code: Some(room.to_string()),
        start_at: Some(at(start)),
        end_at: None,
        status,
        borrower_name: None,
        activity_name: None,
        room_name: None,
    }
}

pub fn room(code: &str, name: &str) -> Room {
    Room { code: code.to_string(), name: Some(name.to_string()), location: None, capacity: None }
}

pub fn ids(bookings: &[&Booking]) -> Vec<String> {
    bookings.iter().map(|b| b.id.clone().unwrap_or_default()).collect()
}
