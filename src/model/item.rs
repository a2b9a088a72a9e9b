use serde::{Deserialize, Serialize};

use crate::model::field::{id_text, quantity_text};

/// Borrowable item exactly as `/barang` returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemRecord {
    pub kode_barang: Option<serde_json::Value>,
    pub nama_barang: Option<String>,
    pub jumlah_total: Option<serde_json::Value>,
    pub jumlah_tersedia: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub code: Option<String>,
    pub name: Option<String>,
    pub total: Option<String>,
    pub available: Option<String>,
}

impl From<ItemRecord> for Item {
    fn from(record: ItemRecord) -> Self {
        Item {
            code: id_text(record.kode_barang),
            name: record.nama_barang,
            total: quantity_text(record.jumlah_total, "jumlah_total"),
            available: quantity_text(record.jumlah_tersedia, "jumlah_tersedia"),
        }
    }
}
