use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;

use crate::model::notification::{Notification, NotificationKind};

/// The bell dropdown never lists more than this many entries.
pub const DROPDOWN_LIMIT: usize = 10;

const SHORT_MONTHS: [&str; 12] = ["Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des"];

/// Text for the unread badge; `None` hides it.
pub fn badge_label(count: u64) -> Option<String> {
    match count {
        0 => None,
        c if c > 99 => Some("99+".to_string()),
        c => Some(c.to_string()),
    }
}

pub fn has_unread(notifications: &[Notification]) -> bool {
    notifications.iter().any(Notification::is_unread)
}

/// The slice shown in the dropdown.
pub fn latest(notifications: &[Notification]) -> &[Notification] {
    &notifications[..notifications.len().min(DROPDOWN_LIMIT)]
}

/// Short "time ago" string. Anything a week or older is shown as a local date.
pub fn relative_time(created_at: DateTime<Utc>, now: DateTime<Utc>, tz: Tz) -> String {
    let secs = (now - created_at).num_seconds();
    let mins = secs / 60;
    let hours = mins / 60;
    let days = hours / 24;

    if secs < 60 {
        "Baru saja".to_string()
    } else if mins < 60 {
        format!("{} menit lalu", mins)
    } else if hours < 24 {
        format!("{} jam lalu", hours)
    } else if days < 7 {
        format!("{} hari lalu", days)
    } else {
        let local = created_at.with_timezone(&tz);
        format!("{} {} {}", local.day(), SHORT_MONTHS[local.month0() as usize], local.year())
    }
}

/// Icon styling for a notification kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Icon {
    pub accent: &'static str,
    pub path: &'static str,
}

pub const BELL_PATH: &str = "M15 17h5l-1.405-1.405A2.032 2.032 0 0118 14.158V11a6.002 6.002 0 00-4-5.659V5a2 2 0 10-4 0v.341C7.67 6.165 6 8.388 6 11v3.159c0 .538-.214 1.055-.595 1.436L4 17h5m6 0v1a3 3 0 11-6 0v-1m6 0H9";

impl NotificationKind {
    pub fn icon(self) -> Icon {
        match self {
            NotificationKind::RequestCreated => Icon {
                accent: "bg-yellow-100 text-yellow-600",
                path: "M9 12h6m-6 4h6m2 5H7a2 2 0 01-2-2V5a2 2 0 012-2h5.586a1 1 0 01.707.293l5.414 5.414a1 1 0 01.293.707V19a2 2 0 01-2 2z",
            },
            NotificationKind::StatusApproved => Icon { accent: "bg-green-100 text-green-600", path: "M5 13l4 4L19 7" },
            NotificationKind::StatusRejected => Icon { accent: "bg-red-100 text-red-600", path: "M6 18L18 6M6 6l12 12" },
            NotificationKind::ActivityInfo => Icon {
                accent: "bg-blue-100 text-blue-600",
                path: "M13 16h-1v-4h-1m1-4h.01M21 12a9 9 0 11-18 0 9 9 0 0118 0z",
            },
            NotificationKind::AttendanceVerified => Icon {
                accent: "bg-purple-100 text-purple-600",
                path: "M9 5H7a2 2 0 00-2 2v12a2 2 0 002 2h10a2 2 0 002-2V7a2 2 0 00-2-2h-2M9 5a2 2 0 002 2h2a2 2 0 002-2M9 5a2 2 0 012-2h2a2 2 0 012 2m-6 9l2 2 4-4",
            },
            NotificationKind::Other => Icon { accent: "bg-gray-100 text-gray-600", path: BELL_PATH },
        }
    }
}

/// Page a notification click leads to, depending on the viewer's role.
pub fn redirect_target(role: Option<&str>, booking_code: Option<&str>) -> Option<String> {
    let code = booking_code.filter(|c| !c.is_empty())?;
    let target = match role {
        Some("SARPRAS") => format!("verifikasi-peminjaman.html?id={}", code),
        Some("SECURITY") => "dashboard-security.html".to_string(),
        _ => "riwayat-peminjaman.html".to_string(),
    };
    Some(target)
}
