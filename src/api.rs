use chrono_tz::Tz;
use serde::de::DeserializeOwned;
use tracing::{error, info, info_span, instrument};

use crate::model::booking::{Booking, BookingRecord};
use crate::model::item::{Item, ItemRecord};
use crate::model::notification::{Notification, NotificationRecord, UnreadCount};
use crate::model::room::{Room, RoomRecord};

/// Blocking client for the room-booking REST backend.
#[derive(Debug, Clone)]
pub struct Backend {
    base_url: String,
    token: Option<String>,
    tz: Tz,
}

impl Backend {
    /// `tz` is the zone booking timestamps are displayed in.
    pub fn new(base_url: &str, token: Option<String>, tz: Tz) -> Self {
        Self { base_url: base_url.trim_end_matches('/').to_string(), token, tz }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorization(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    /// GET `path` and return the raw body.
    fn get(&self, path: &str) -> Result<String, String> {
        let url = self.url(path);
        let response_result = {
            let _span = info_span!("backend_get", url = %url).entered();
            let mut request = ureq::get(&url).header("Accept", "application/json");
            if let Some(auth) = self.authorization() {
                request = request.header("Authorization", auth.as_str());
            }
            request.call()
        };
        match response_result {
            Ok(response) => {
                let mut body_reader = response.into_body();
                body_reader.read_to_string().map_err(|e| {
                    error!(error = %e, url = %url, "Failed to read response body");
                    format!("Failed to read response body: {}", e)
                })
            }
            Err(e) => {
                error!(error = %e, url = %url, "Request failed");
                Err(format!("Request failed: {}", e))
            }
        }
    }

    /// PATCH `path` with an empty body.
    fn patch(&self, path: &str) -> Result<(), String> {
        let url = self.url(path);
        let mut request = ureq::patch(&url);
        if let Some(auth) = self.authorization() {
            request = request.header("Authorization", auth.as_str());
        }
        match request.send_empty() {
            Ok(resp) => {
                info!(status = resp.status().as_u16(), url = %url, "PATCH succeeded");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, url = %url, "PATCH failed");
                Err(format!("PATCH {} failed: {}", path, e))
            }
        }
    }

    #[instrument(level = "info", skip(self))]
    pub fn fetch_bookings(&self) -> Result<Vec<Booking>, String> {
        let body = self.get("/jadwal-ruangan")?;
        let bookings = parse_bookings(&body, self.tz)?;
        info!(count = bookings.len(), "Fetched bookings");
        Ok(bookings)
    }

    #[instrument(level = "info", skip(self))]
    pub fn fetch_rooms(&self) -> Result<Vec<Room>, String> {
        let body = self.get("/ruangan")?;
        let rooms = parse_rooms(&body)?;
        info!(count = rooms.len(), "Fetched rooms");
        Ok(rooms)
    }

    #[instrument(level = "info", skip(self))]
    pub fn fetch_unread_count(&self) -> Result<u64, String> {
        let body = self.get("/notifikasi/count")?;
        let parsed: UnreadCount = deserialize(&body, "unread count")?;
        Ok(parsed.count)
    }

    #[instrument(level = "info", skip(self))]
    pub fn fetch_notifications(&self) -> Result<Vec<Notification>, String> {
        let body = self.get("/notifikasi/me")?;
        parse_notifications(&body, self.tz)
    }

    #[instrument(level = "info", skip(self))]
    pub fn fetch_items(&self) -> Result<Vec<Item>, String> {
        let body = self.get("/barang")?;
        let items = parse_items(&body)?;
        info!(count = items.len(), "Fetched items");
        Ok(items)
    }

    #[instrument(level = "info", skip(self))]
    pub fn mark_read(&self, notification_code: &str) -> Result<(), String> {
        self.patch(&format!("/notifikasi/{}/dibaca", notification_code))
    }

    #[instrument(level = "info", skip(self))]
    pub fn mark_all_read(&self) -> Result<(), String> {
        self.patch("/notifikasi/dibaca-semua")
    }
}

fn deserialize<T: DeserializeOwned>(body: &str, what: &str) -> Result<T, String> {
    serde_json::from_str::<T>(body).map_err(|e| {
        error!(error = %e, bytes = body.len(), "Failed to deserialize {}", what);
        format!("Failed to deserialize {}: {}", what, e)
    })
}

/// Parse a `/jadwal-ruangan` body (no network).
pub fn parse_bookings(body: &str, tz: Tz) -> Result<Vec<Booking>, String> {
    let records: Vec<BookingRecord> = deserialize(body, "bookings")?;
    Ok(records.into_iter().map(|r| Booking::from_record(r, tz)).collect())
}

/// Parse a `/ruangan` body (no network).
/// Rooms without a code are dropped.
pub fn parse_rooms(body: &str) -> Result<Vec<Room>, String> {
    let records: Vec<RoomRecord> = deserialize(body, "rooms")?;
    Ok(records.into_iter().filter_map(Room::from_record).collect())
}

/// Parse a `/notifikasi/me` body (no network). Naive timestamps are local to `tz`.
pub fn parse_notifications(body: &str, tz: Tz) -> Result<Vec<Notification>, String> {
    let records: Vec<NotificationRecord> = deserialize(body, "notifications")?;
    Ok(records.into_iter().map(|r| Notification::from_record(r, tz)).collect())
}

/// Parse a `/barang` body (no network).
pub fn parse_items(body: &str) -> Result<Vec<Item>, String> {
    let records: Vec<ItemRecord> = deserialize(body, "items")?;
    Ok(records.into_iter().map(Item::from).collect())
}
