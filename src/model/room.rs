use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::model::field::{id_text, quantity_text};

/// Room exactly as `/ruangan` returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomRecord {
    pub kode_ruangan: Option<serde_json::Value>,
    pub nama_ruangan: Option<String>,
    pub lokasi: Option<String>,
    pub kapasitas: Option<serde_json::Value>,
}

/// A bookable room from the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub code: String,
    pub name: Option<String>,
    pub location: Option<String>,
    /// Display text; the backend sends numbers or numeric strings.
    pub capacity: Option<String>,
}

impl Room {
    /// Convert a wire record. Rooms without a code cannot be matched to bookings and are skipped.
    pub fn from_record(record: RoomRecord) -> Option<Self> {
        let Some(code) = id_text(record.kode_ruangan) else {
            warn!(name = ?record.nama_ruangan, "Skipping room without kode_ruangan");
            return None;
        };
        Some(Room {
            code,
            name: record.nama_ruangan,
            location: record.lokasi,
            capacity: quantity_text(record.kapasitas, "kapasitas"),
        })
    }
}
