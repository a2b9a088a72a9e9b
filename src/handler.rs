use chrono::{DateTime, Datelike, NaiveDate, Utc};
use chrono_tz::Tz;
use lambda_runtime::{Error, LambdaEvent};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::api::Backend;
use crate::availability::resolve_availability;
use crate::calendar::{CalendarMonth, build_month_grid, get_day_schedule};
use crate::config::{Config, parse_time_zone};
use crate::model::booking::Booking;
use crate::model::item::Item;
use crate::model::notification::Notification;
use crate::model::room::Room;
use crate::{notification, render};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Calendar,
    Availability,
    Notifications,
    Rooms,
    Items,
    #[serde(rename = "mark_read")]
    MarkRead,
    #[serde(rename = "mark_all_read")]
    MarkAllRead,
}

impl View {
    /// What the widget shows in place of its content when its data cannot be fetched.
    pub fn error_html(self) -> String {
        match self {
            View::Calendar => render::fetch_error("Gagal terhubung ke server"),
            View::Availability => render::fetch_error("Gagal memuat data ruangan"),
            View::Notifications | View::MarkRead | View::MarkAllRead => render::fetch_error("Gagal memuat notifikasi"),
            View::Rooms => render::table_error(4, "Gagal memuat data."),
            View::Items => render::table_error(4, "Gagal memuat barang."),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    pub view: View,
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default)]
    pub time_zone: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    /// Zero-based, like the calendar cursor in the browser.
    #[serde(default)]
    pub month: Option<u32>,
    #[serde(default)]
    pub day: Option<u32>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub notification_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    pub html: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
}

/// Merge request overrides into the environment defaults.
pub fn effective_config(request: &Request, defaults: Config) -> Result<Config, String> {
    let mut config = defaults;
    if let Some(base) = request.api_base_url.as_ref().filter(|b| !b.trim().is_empty()) {
        config.api_base_url = base.clone();
    }
    if request.api_token.is_some() {
        config.api_token = request.api_token.clone();
    }
    if let Some(name) = request.time_zone.as_deref() {
        config.time_zone = parse_time_zone(name)?;
    }
    Ok(config)
}

/// The month to show and the selected date inside it. Missing fields fall back to `today`.
pub fn select_date(request: &Request, today: NaiveDate) -> Result<(CalendarMonth, NaiveDate), String> {
    let year = request.year.unwrap_or(today.year());
    let month_index = request.month.unwrap_or(today.month0());
    let month = CalendarMonth::new(year, month_index).ok_or_else(|| format!("Invalid month {} of {}", month_index, year))?;

    let day = match request.day {
        Some(d) => d,
        None if CalendarMonth::from_date(today) == month => today.day(),
        None => 1,
    };
    let selected = month.date(day).ok_or_else(|| format!("Invalid day {} for {}-{:02}", day, year, month_index + 1))?;
    Ok((month, selected))
}

pub fn render_calendar(bookings: &[Booking], month: CalendarMonth, selected: NaiveDate, today: NaiveDate) -> String {
    let cells = build_month_grid(bookings, month, today);
    let schedule = get_day_schedule(bookings, selected.day(), selected.month0(), selected.year());
    format!(
        r#"<section data-widget="calendar"><h3 id="month-year-label">{}</h3><div id="calendar-grid" class="grid grid-cols-7 gap-1">{}</div></section><section data-widget="schedule"><h3 id="selected-date-label">{}</h3><div id="jadwal-list-container" class="space-y-3">{}</div></section>"#,
        render::month_label(month),
        render::month_grid(&cells),
        render::date_label(selected),
        render::day_schedule(&schedule)
    )
}

pub fn render_availability(rooms: &[Room], bookings: &[Booking], date: NaiveDate) -> String {
    let statuses = resolve_availability(rooms, bookings, date);
    format!(
        r#"<section data-widget="room-availability"><h3 id="modalDateLabel">{}</h3><div id="roomListContainer" class="space-y-3">{}</div></section>"#,
        render::date_label(date),
        render::room_cards(&statuses)
    )
}

pub fn render_notifications(notifications: &[Notification], role: Option<&str>, now: DateTime<Utc>, tz: Tz) -> String {
    format!(
        r#"<section data-widget="notifications" id="notification-dropdown">{}</section>"#,
        render::notification_panel(notifications, role, now, tz)
    )
}

pub fn render_room_directory(rooms: &[Room]) -> String {
    format!(
        r#"<tbody data-widget="room-directory" id="tabel-ruangan">{}</tbody>"#,
        render::room_table(rooms)
    )
}

pub fn render_items(items: &[Item]) -> String {
    format!(r#"<tbody data-widget="items" id="tabel-barang">{}</tbody>"#, render::item_table(items))
}

/// Error response for `view`, with the widget's own error fragment.
pub fn failed(view: View, context: &str, e: String) -> Response {
    error!(error = %e, "{} failed", context);
    Response { html: view.error_html(), message: format!("{} failed: {}", context, e), badge: None }
}

/// Fold a failed mark-as-read into the message of the re-rendered panel.
pub fn with_mark_failure(response: Response, result: Result<(), String>) -> Response {
    match result {
        Ok(()) => response,
        Err(e) => {
            error!(error = %e, "Failed to mark notifications as read");
            Response { message: format!("{}; mark read failed: {}", response.message, e), ..response }
        }
    }
}

/// Run a blocking backend call on the blocking pool.
async fn fetch<T, F>(backend: &Backend, call: F) -> Result<T, String>
where
    T: Send + 'static,
    F: FnOnce(&Backend) -> Result<T, String> + Send + 'static,
{
    // The blocking task must own its client
    let backend = backend.clone();
    match tokio::task::spawn_blocking(move || call(&backend)).await {
        Ok(result) => result,
        Err(e) => Err(format!("Fetch task join error: {}", e)),
    }
}

#[instrument(skip(event))]
pub async fn handler(event: LambdaEvent<Request>) -> Result<Response, Error> {
    let request = event.payload;
    let config = effective_config(&request, Config::from_env()?)?;
    let backend = Backend::new(&config.api_base_url, config.api_token.clone(), config.time_zone);

    let now = Utc::now();
    let today = now.with_timezone(&config.time_zone).date_naive();

    match request.view {
        View::Calendar => {
            let (month, selected) = select_date(&request, today)?;
            match fetch(&backend, Backend::fetch_bookings).await {
                Ok(bookings) => {
                    info!(bookings = bookings.len(), month = %render::month_label(month), "Rendering calendar");
                    Ok(Response {
                        html: render_calendar(&bookings, month, selected, today),
                        message: format!("Calendar for {}", render::month_label(month)),
                        badge: None,
                    })
                }
                Err(e) => Ok(failed(View::Calendar, "Calendar fetch", e)),
            }
        }
        View::Availability => {
            let (_, date) = select_date(&request, today)?;
            // Both lists are independent, fetch them side by side
            let (rooms, bookings) =
                tokio::join!(fetch(&backend, Backend::fetch_rooms), fetch(&backend, Backend::fetch_bookings));
            match (rooms, bookings) {
                (Ok(rooms), Ok(bookings)) => {
                    info!(rooms = rooms.len(), bookings = bookings.len(), %date, "Rendering room availability");
                    Ok(Response {
                        html: render_availability(&rooms, &bookings, date),
                        message: format!("Room availability for {}", date),
                        badge: None,
                    })
                }
                (Err(e), _) | (_, Err(e)) => Ok(failed(View::Availability, "Room availability fetch", e)),
            }
        }
        View::Rooms => match fetch(&backend, Backend::fetch_rooms).await {
            Ok(rooms) => {
                info!(rooms = rooms.len(), "Rendering room directory");
                Ok(Response {
                    html: render_room_directory(&rooms),
                    message: format!("{} rooms", rooms.len()),
                    badge: None,
                })
            }
            Err(e) => Ok(failed(View::Rooms, "Room directory fetch", e)),
        },
        View::Items => match fetch(&backend, Backend::fetch_items).await {
            Ok(items) => {
                info!(items = items.len(), "Rendering items");
                Ok(Response { html: render_items(&items), message: format!("{} items", items.len()), badge: None })
            }
            Err(e) => Ok(failed(View::Items, "Item list fetch", e)),
        },
        View::Notifications => Ok(notifications_response(&backend, request.role.as_deref(), now, config.time_zone).await),
        View::MarkRead => {
            let Some(code) = request.notification_code.clone().filter(|c| !c.is_empty()) else {
                return Err("mark_read requires notification_code".into());
            };
            let marked = fetch(&backend, move |b| b.mark_read(&code)).await;
            let response = notifications_response(&backend, request.role.as_deref(), now, config.time_zone).await;
            Ok(with_mark_failure(response, marked))
        }
        View::MarkAllRead => {
            let marked = fetch(&backend, Backend::mark_all_read).await;
            let response = notifications_response(&backend, request.role.as_deref(), now, config.time_zone).await;
            Ok(with_mark_failure(response, marked))
        }
    }
}

/// Dropdown plus badge, fetched together.
async fn notifications_response(backend: &Backend, role: Option<&str>, now: DateTime<Utc>, tz: Tz) -> Response {
    let (list, count) = tokio::join!(fetch(backend, Backend::fetch_notifications), fetch(backend, Backend::fetch_unread_count));
    let badge = match count {
        Ok(c) => notification::badge_label(c),
        Err(e) => {
            error!(error = %e, "Unread count check failed");
            None
        }
    };
    match list {
        Ok(list) => {
            info!(notifications = list.len(), badge = ?badge, "Rendering notifications");
            Response { html: render_notifications(&list, role, now, tz), message: format!("{} notifications", list.len()), badge }
        }
        Err(e) => Response { badge, ..failed(View::Notifications, "Notification fetch", e) },
    }
}
