use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::model::field::{id_text, parse_instant};

/// Backend status meaning "delivered but not yet read".
pub const UNREAD_STATUS: &str = "TERKIRIM";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NotificationKind {
    #[serde(rename = "PENGAJUAN_DIBUAT")]
    RequestCreated,
    #[serde(rename = "STATUS_APPROVED")]
    StatusApproved,
    #[serde(rename = "STATUS_REJECTED")]
    StatusRejected,
    #[serde(rename = "INFO_KEGIATAN")]
    ActivityInfo,
    #[serde(rename = "KEHADIRAN_DIVERIFIKASI")]
    AttendanceVerified,
    #[default]
    #[serde(other)]
    Other,
}

/// Notification exactly as `/notifikasi/me` returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationRecord {
    pub kode_notifikasi: Option<serde_json::Value>,
    pub kode_peminjaman: Option<serde_json::Value>,
    pub jenis_notifikasi: Option<serde_json::Value>,
    pub pesan: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<String>,
}

/// One entry of the notification dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub code: Option<String>,
    pub booking_code: Option<String>,
    pub kind: NotificationKind,
    pub message: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Notification {
    /// Convert a wire record. Naive `created_at` values are read as local time in `tz`.
    pub fn from_record(record: NotificationRecord, tz: Tz) -> Self {
        // Unknown or non-string kinds fall back to the generic bell
        let kind = record
            .jenis_notifikasi
            .and_then(|v| serde_json::from_value::<NotificationKind>(v).ok())
            .unwrap_or_default();

        Notification {
            code: id_text(record.kode_notifikasi),
            booking_code: id_text(record.kode_peminjaman),
            kind,
            message: record.pesan,
            status: record.status,
            created_at: record.created_at.as_deref().and_then(|s| parse_instant(s, tz)),
        }
    }

    pub fn is_unread(&self) -> bool {
        self.status.as_deref() == Some(UNREAD_STATUS)
    }
}

/// Body of `/notifikasi/count`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct UnreadCount {
    #[serde(default)]
    pub count: u64,
}
