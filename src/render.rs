//! HTML fragments for the dashboard widgets. Markup only; all decisions come from
//! the calendar, availability and notification modules.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

use crate::availability::{RoomAvailability, RoomStatus};
use crate::calendar::{CalendarMonth, MonthCell};
use crate::model::booking::{Booking, BookingStatus};
use crate::model::item::Item;
use crate::model::notification::Notification;
use crate::model::room::Room;
use crate::notification::{self, BELL_PATH};

const MONTH_NAMES: [&str; 12] = [
    "Januari", "Februari", "Maret", "April", "Mei", "Juni", "Juli", "Agustus", "September", "Oktober", "November", "Desember",
];
const WEEKDAY_NAMES: [&str; 7] = ["Minggu", "Senin", "Selasa", "Rabu", "Kamis", "Jumat", "Sabtu"];

const CLOCK_PATH: &str = "M12 8v4l3 3m6-3a9 9 0 11-18 0 9 9 0 0118 0z";
const USER_PATH: &str = "M16 7a4 4 0 11-8 0 4 4 0 018 0zM12 14a7 7 0 00-7 7h14a7 7 0 00-7-7z";

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn or_fallback<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or(fallback)
}

fn icon(path: &str, class: &str) -> String {
    format!(
        r#"<svg class="{}" fill="none" stroke="currentColor" viewBox="0 0 24 24"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="{}"></path></svg>"#,
        class, path
    )
}

/// `HH:MM`, or `--:--` when the time is unknown.
pub fn format_time(dt: Option<NaiveDateTime>) -> String {
    dt.map(|d| d.format("%H:%M").to_string()).unwrap_or_else(|| "--:--".to_string())
}

/// e.g. `Januari 2025`.
pub fn month_label(month: CalendarMonth) -> String {
    format!("{} {}", MONTH_NAMES[month.month() as usize], month.year())
}

/// e.g. `Minggu, 5 Januari 2025`.
pub fn date_label(date: NaiveDate) -> String {
    format!(
        "{}, {} {} {}",
        WEEKDAY_NAMES[date.weekday().num_days_from_sunday() as usize],
        date.day(),
        MONTH_NAMES[date.month0() as usize],
        date.year()
    )
}

pub fn month_grid(cells: &[MonthCell]) -> String {
    let mut out = String::new();
    for cell in cells {
        match cell {
            MonthCell::Blank => out.push_str("<div></div>"),
            MonthCell::Day(d) => {
                let tone = if d.is_today {
                    "bg-orange-500 text-white shadow-md ring-2 ring-orange-100"
                } else {
                    "text-gray-700 hover:bg-orange-50"
                };
                let dot = match (d.has_event, d.is_today) {
                    (false, _) => "",
                    (true, true) => r#"<span class="absolute bottom-1 h-1.5 w-1.5 rounded-full bg-white"></span>"#,
                    (true, false) => r#"<span class="absolute bottom-1 h-1.5 w-1.5 rounded-full bg-red-500"></span>"#,
                };
                out.push_str(&format!(
                    r#"<div class="relative h-10 w-10 mx-auto flex flex-col items-center justify-center rounded-full cursor-pointer {}" data-day="{}"><span class="text-sm font-medium">{}</span>{}</div>"#,
                    tone, d.day, d.day, dot
                ));
            }
        }
    }
    out
}

fn status_badge(status: BookingStatus) -> &'static str {
    match status {
        BookingStatus::Pending => {
            r#"<span class="inline-flex items-center px-2.5 py-1 rounded-full text-xs font-bold bg-orange-100 text-orange-700 border border-orange-200">BOOKED</span>"#
        }
        BookingStatus::Approved => {
            r#"<span class="inline-flex items-center px-2.5 py-1 rounded-full text-xs font-bold bg-green-100 text-green-700 border border-green-200">APPROVED</span>"#
        }
        BookingStatus::Rejected => {
            r#"<span class="inline-flex items-center px-2.5 py-1 rounded-full text-xs font-bold bg-red-100 text-red-700 border border-red-200">REJECTED</span>"#
        }
        BookingStatus::Cancelled => {
            r#"<span class="inline-flex items-center px-2.5 py-1 rounded-full text-xs font-bold bg-gray-100 text-gray-700 border border-gray-200">CANCELLED</span>"#
        }
    }
}

/// Schedule cards for one day, or the empty state when there are none.
pub fn day_schedule(schedule: &[&Booking]) -> String {
    if schedule.is_empty() {
        return r#"<div class="flex flex-col items-center justify-center py-12 text-center"><h4 class="text-gray-900 font-semibold text-base mb-1">Tidak Ada Jadwal</h4><p class="text-gray-500 text-sm">Belum ada kegiatan yang terdaftar untuk tanggal ini.</p></div>"#.to_string();
    }

    schedule
        .iter()
        .map(|b| {
            format!(
                r#"<div class="bg-white rounded-2xl p-5 border border-gray-100 flex flex-col"><div class="flex items-center gap-1.5 text-xs font-semibold text-orange-600">{} {} - {}</div><p class="text-[10px] text-gray-400 uppercase font-semibold">Ruangan</p><h4 class="text-lg font-bold text-gray-900">{}</h4><p class="text-[10px] text-gray-400 uppercase font-semibold">Kegiatan</p><p class="text-sm font-medium text-gray-700">{}</p><p class="text-[10px] text-gray-400 uppercase font-semibold">Status</p>{}<div class="pt-2 border-t border-dashed border-gray-100 flex items-center gap-2 text-sm text-gray-500">{}<span class="font-medium">{}</span></div></div>"#,
                icon(CLOCK_PATH, "w-3.5 h-3.5"),
                format_time(b.start_at),
                format_time(b.end_at),
                escape(or_fallback(b.room_name.as_deref(), "Lokasi Belum Ditentukan")),
                escape(or_fallback(b.activity_name.as_deref(), "Penggunaan Ruangan")),
                status_badge(b.status),
                icon(USER_PATH, "w-4 h-4 text-gray-400"),
                escape(or_fallback(b.borrower_name.as_deref(), "-")),
            )
        })
        .collect()
}

/// Cards for the room availability modal.
pub fn room_cards(rooms: &[RoomAvailability<'_>]) -> String {
    if rooms.is_empty() {
        return r#"<div class="text-center text-gray-400 py-8"><p class="text-sm">Tidak ada data ruangan</p></div>"#.to_string();
    }

    let mut out = String::new();
    for entry in rooms {
        let (label, color) = match entry.status {
            RoomStatus::Available => ("AVAILABLE", "bg-gray-100 text-gray-700 border-gray-200"),
            RoomStatus::Pending => ("BOOKED", "bg-orange-100 text-orange-700 border-orange-200"),
            RoomStatus::Approved => ("APPROVED", "bg-green-100 text-green-700 border-green-200"),
        };
        let capacity = or_fallback(entry.room.capacity.as_deref(), "-");

        out.push_str(&format!(
            r#"<div class="border border-gray-200 rounded-xl p-4"><div class="flex items-start justify-between mb-3"><div class="flex-1"><h4 class="font-bold text-gray-900 text-base">{}</h4><p class="text-sm text-gray-500">{}</p><p class="text-xs text-gray-400 mt-0.5">Kapasitas: {} orang</p></div><span class="px-2.5 py-1 rounded-full text-xs font-bold {} border flex-shrink-0">{}</span></div>"#,
            escape(or_fallback(entry.room.name.as_deref(), &entry.room.code)),
            escape(or_fallback(entry.room.location.as_deref(), "Lokasi tidak tersedia")),
            escape(capacity),
            color,
            label
        ));

        if let Some(b) = entry.booking {
            out.push_str(&format!(
                r#"<div class="mt-3 pt-3 border-t border-gray-100 space-y-1 text-xs text-gray-600"><div class="flex items-center gap-2">{}<span>{} - {}</span></div><div class="flex items-center gap-2">{}<span>{}</span></div>"#,
                icon(CLOCK_PATH, "w-4 h-4 text-gray-400"),
                format_time(b.start_at),
                format_time(b.end_at),
                icon(USER_PATH, "w-4 h-4 text-gray-400"),
                escape(or_fallback(b.borrower_name.as_deref(), "-")),
            ));
            if let Some(activity) = b.activity_name.as_deref() {
                out.push_str(&format!(r#"<div class="flex items-center gap-2"><span>{}</span></div>"#, escape(activity)));
            }
            if entry.has_conflict() {
                out.push_str(&format!(
                    r#"<div class="text-red-600 font-semibold">+{} jadwal bentrok</div>"#,
                    entry.conflicts.len()
                ));
            }
            out.push_str("</div>");
        }
        out.push_str("</div>");
    }
    out
}

/// Dropdown body for the notification bell.
pub fn notification_panel(notifications: &[Notification], role: Option<&str>, now: DateTime<Utc>, tz: Tz) -> String {
    let mut out = String::from(
        r#"<div class="p-4 border-b border-gray-100 flex items-center justify-between"><h3 class="font-semibold text-gray-900">Notifikasi</h3>"#,
    );
    if notification::has_unread(notifications) {
        out.push_str(r#"<button data-action="mark-all-read" class="text-xs text-orange-600 font-medium">Tandai Semua Dibaca</button>"#);
    }
    out.push_str("</div>");

    if notifications.is_empty() {
        out.push_str(&format!(
            r#"<div class="p-8 text-center">{}<p class="text-gray-500 text-sm">Tidak ada notifikasi</p></div>"#,
            icon(BELL_PATH, "w-8 h-8 text-gray-400 mx-auto mb-3")
        ));
        return out;
    }

    out.push_str(r#"<div class="max-h-80 overflow-y-auto">"#);
    for n in notification::latest(notifications) {
        let unread = n.is_unread();
        let kind_icon = n.kind.icon();
        let href = notification::redirect_target(role, n.booking_code.as_deref()).unwrap_or_default();
        out.push_str(&format!(
            r#"<div class="p-4 border-b border-gray-50 cursor-pointer {}" data-code="{}" data-href="{}" data-unread="{}"><div class="flex gap-3"><div class="w-10 h-10 rounded-full flex items-center justify-center flex-shrink-0 {}">{}</div><div class="flex-1 min-w-0"><p class="text-sm text-gray-800{}">{}</p><p class="text-xs text-gray-400 mt-1">{}</p></div>{}</div></div>"#,
            if unread { "bg-blue-50 hover:bg-blue-100" } else { "bg-white hover:bg-gray-50" },
            escape(n.code.as_deref().unwrap_or("")),
            escape(&href),
            unread,
            kind_icon.accent,
            icon(kind_icon.path, "w-5 h-5"),
            if unread { " font-medium" } else { "" },
            escape(n.message.as_deref().unwrap_or("")),
            n.created_at.map(|at| notification::relative_time(at, now, tz)).unwrap_or_else(|| "-".to_string()),
            if unread { r#"<span class="w-2 h-2 bg-blue-500 rounded-full"></span>"# } else { "" },
        ));
    }
    out.push_str("</div>");
    out
}

/// Rows for the room directory table.
pub fn room_table(rooms: &[Room]) -> String {
    if rooms.is_empty() {
        return empty_row(4, "Tidak ada data ruangan.");
    }

    rooms
        .iter()
        .map(|r| {
            format!(
                r#"<tr class="hover:bg-gray-50 transition border-b border-gray-100 last:border-0"><td class="px-6 py-4 font-medium text-gray-900">{}</td><td class="px-6 py-4">{}</td><td class="px-6 py-4">{}</td><td class="px-6 py-4">{} Org</td></tr>"#,
                escape(or_fallback(Some(r.code.as_str()), "-")),
                escape(or_fallback(r.name.as_deref(), "-")),
                escape(or_fallback(r.location.as_deref(), "-")),
                escape(or_fallback(r.capacity.as_deref(), "0")),
            )
        })
        .collect()
}

/// Rows for the borrowable goods table.
pub fn item_table(items: &[Item]) -> String {
    if items.is_empty() {
        return empty_row(4, "Tidak ada data barang.");
    }

    items
        .iter()
        .map(|i| {
            format!(
                r#"<tr class="hover:bg-gray-50 transition border-b border-gray-100 last:border-0"><td class="px-6 py-4 font-medium text-gray-900">{}</td><td class="px-6 py-4">{}</td><td class="px-6 py-4">{}</td><td class="px-6 py-4 font-semibold text-green-600">{} Unit</td></tr>"#,
                escape(or_fallback(i.code.as_deref(), "-")),
                escape(or_fallback(i.name.as_deref(), "-")),
                escape(or_fallback(i.total.as_deref(), "-")),
                escape(or_fallback(i.available.as_deref(), "-")),
            )
        })
        .collect()
}

fn empty_row(columns: u8, text: &str) -> String {
    format!(r#"<tr><td colspan="{}" class="text-center py-4 text-gray-500">{}</td></tr>"#, columns, escape(text))
}

/// Table row shown when a directory table cannot be loaded.
pub fn table_error(columns: u8, message: &str) -> String {
    format!(r#"<tr><td colspan="{}" class="text-center py-4 text-red-500">{}</td></tr>"#, columns, escape(message))
}

/// Fragment shown when a widget's data cannot be fetched.
pub fn fetch_error(message: &str) -> String {
    format!(
        r#"<div class="flex flex-col items-center justify-center py-10 text-center"><p class="text-red-600 font-semibold text-sm">{}</p><p class="text-gray-400 text-xs mt-1">Silakan coba muat ulang halaman.</p></div>"#,
        escape(message)
    )
}
