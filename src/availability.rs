use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use tracing::warn;

use crate::calendar::format_date_key;
use crate::model::booking::{Booking, BookingStatus};
use crate::model::room::Room;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RoomStatus {
    Available,
    Pending,
    Approved,
}

impl From<BookingStatus> for RoomStatus {
    fn from(status: BookingStatus) -> Self {
        match status {
            BookingStatus::Approved => RoomStatus::Approved,
            // Rejected and cancelled bookings are filtered before this point
            _ => RoomStatus::Pending,
        }
    }
}

/// Status of one room on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomAvailability<'a> {
    pub room: &'a Room,
    pub status: RoomStatus,
    pub booking: Option<&'a Booking>,
    /// Further active bookings for the same room and date, in input order.
    pub conflicts: Vec<&'a Booking>,
}

impl RoomAvailability<'_> {
    pub fn has_conflict(&self) -> bool {
        !self.conflicts.is_empty()
    }
}

/// One entry per room, in room order. The first active booking on `date` for a room
/// decides its status; any later ones are reported as conflicts.
pub fn resolve_availability<'a>(rooms: &'a [Room], bookings: &'a [Booking], date: NaiveDate) -> Vec<RoomAvailability<'a>> {
    let key = format_date_key(date.year(), date.month0(), date.day());
    let on_date: Vec<&Booking> = bookings
        .iter()
        .filter(|b| b.status.is_active() && b.date_key().as_deref() == Some(key.as_str()))
        .collect();

    rooms
        .iter()
        .map(|room| {
            let mut matches = on_date
                .iter()
                .copied()
                .filter(|b| b.room_code.as_deref() == Some(room.code.as_str()));
            match matches.next() {
                Some(first) => {
                    let conflicts: Vec<&Booking> = matches.collect();
                    if !conflicts.is_empty() {
                        warn!(room = %room.code, date = %key, extra = conflicts.len(), "Room is double-booked");
                    }
                    RoomAvailability { room, status: first.status.into(), booking: Some(first), conflicts }
                }
                None => RoomAvailability { room, status: RoomStatus::Available, booking: None, conflicts: Vec::new() },
            }
        })
        .collect()
}
