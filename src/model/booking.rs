use chrono::{Datelike, NaiveDateTime};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calendar::format_date_key;
use crate::model::field::{id_text, parse_local};

/// Approval state of a booking as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl BookingStatus {
    /// Lenient parse of the backend's status string. Unknown values fall back to `Pending`.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => BookingStatus::Pending,
            Some(s) if s.eq_ignore_ascii_case("PENDING") => BookingStatus::Pending,
            Some(s) if s.eq_ignore_ascii_case("APPROVED") => BookingStatus::Approved,
            Some(s) if s.eq_ignore_ascii_case("REJECTED") => BookingStatus::Rejected,
            Some(s) if s.eq_ignore_ascii_case("CANCELLED") => BookingStatus::Cancelled,
            Some(other) => {
                warn!(status = %other, "Unknown booking status; treating as PENDING");
                BookingStatus::Pending
            }
        }
    }

    /// Rejected and cancelled bookings are hidden from schedules and availability.
    pub fn is_active(self) -> bool {
        !matches!(self, BookingStatus::Rejected | BookingStatus::Cancelled)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Approved => "APPROVED",
            BookingStatus::Rejected => "REJECTED",
            BookingStatus::Cancelled => "CANCELLED",
        }
    }
}

/// The backend sends `kegiatan` either as a plain name or as a nested activity object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActivityField {
    Name(String),
    Detail { nama_kegiatan: Option<String> },
}

/// Booking exactly as `/jadwal-ruangan` returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRecord {
    #[serde(alias = "id")]
    pub kode_peminjaman: Option<serde_json::Value>,
    pub kode_ruangan: Option<serde_json::Value>,
    pub tanggal_mulai: Option<String>,
    pub tanggal_selesai: Option<String>,
    pub status: Option<String>,
    pub peminjam: Option<String>,
    pub kegiatan: Option<ActivityField>,
    pub nama_ruangan: Option<String>,
}

/// A room reservation with its timestamps already expressed in local time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Option<String>,
    pub room_code: Option<String>,
    pub start_at: Option<NaiveDateTime>,
    pub end_at: Option<NaiveDateTime>,
    pub status: BookingStatus,
    pub borrower_name: Option<String>,
    pub activity_name: Option<String>,
    pub room_name: Option<String>,
}

impl Booking {
    /// Convert a wire record, shifting zoned timestamps into `tz`.
    pub fn from_record(record: BookingRecord, tz: Tz) -> Self {
        let id = id_text(record.kode_peminjaman);
        let activity_name = record.kegiatan.and_then(|k| match k {
            ActivityField::Name(name) => Some(name),
            ActivityField::Detail { nama_kegiatan } => nama_kegiatan,
        });

        Booking {
            id,
            room_code: id_text(record.kode_ruangan),
            start_at: record.tanggal_mulai.as_deref().and_then(|s| parse_local(s, tz)),
            end_at: record.tanggal_selesai.as_deref().and_then(|s| parse_local(s, tz)),
            status: BookingStatus::parse(record.status.as_deref()),
            borrower_name: record.peminjam,
            activity_name,
            room_name: record.nama_ruangan,
        }
    }

    /// `YYYY-MM-DD` of the local start, or `None` when the booking has no start.
    pub fn date_key(&self) -> Option<String> {
        self.start_at.map(|dt| format_date_key(dt.year(), dt.month0(), dt.day()))
    }
}
