//! Dashboard summary - aggregate counts and the tiles that display them.
//!
//! Counts always cover the full collection. The active search filter and sort of the
//! list never change them.

use crate::{
    config::InventoryConfig,
    core::status,
    models::{MedicineRecord, Tone},
};
use chrono::NaiveDate;
use serde::Serialize;

/// Aggregate counts for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    /// Records held
    pub total: usize,
    /// Records below the low-stock threshold
    pub low_stock: usize,
    /// Counted with the summary expiry window, not the list window
    pub expiring_soon: usize,
}

/// Icon a renderer should draw on a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TileIcon {
    /// Stock boxes
    Inventory,
    /// Warning sign
    Warning,
    /// Calendar page
    Calendar,
}

/// One dashboard tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryTile {
    /// Caption
    pub title: &'static str,
    /// Count shown
    pub value: usize,
    /// Icon variant
    pub icon: TileIcon,
    /// Colour variant
    pub tone: Tone,
}

/// Counts over every record, judged against `today`.
#[must_use]
pub fn compute_summary(
    records: &[MedicineRecord],
    config: &InventoryConfig,
    today: NaiveDate,
) -> InventorySummary {
    records
        .iter()
        .fold(InventorySummary::default(), |mut acc, record| {
            acc.total += 1;
            if status::is_low_stock(record, config.low_stock_threshold) {
                acc.low_stock += 1;
            }
            if status::is_expiring_soon(record, today, config.summary_expiry_window_days) {
                acc.expiring_soon += 1;
            }
            acc
        })
}

impl InventorySummary {
    /// Tiles in dashboard order: total, low stock, expiring soon.
    #[must_use]
    pub fn tiles(&self) -> [SummaryTile; 3] {
        [
            SummaryTile {
                title: "Total Medicines",
                value: self.total,
                icon: TileIcon::Inventory,
                tone: Tone::Primary,
            },
            SummaryTile {
                title: "Low Stock",
                value: self.low_stock,
                icon: TileIcon::Warning,
                tone: Tone::Warning,
            },
            SummaryTile {
                title: "Expiring Soon",
                value: self.expiring_soon,
                icon: TileIcon::Calendar,
                tone: Tone::Error,
            },
        ]
    }
}
