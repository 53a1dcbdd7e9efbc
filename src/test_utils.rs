//! Shared test fixtures.
//!
//! Records are built with sensible defaults; dates are given as `YYYY-MM-DD` text so
//! a test reads like the API payload it stands for.

use crate::{
    config::InventoryConfig,
    core::InventoryView,
    models::{ExpiryDate, MedicineRecord},
};
use chrono::NaiveDate;
use tracing_subscriber::EnvFilter;

/// Routes `tracing` output through the test harness. Safe to call from every test.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace")),
        )
        .with_test_writer()
        .try_init();
}

/// Calendar date shorthand. Panics on an impossible date, which is a test bug.
#[allow(clippy::unwrap_used)]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Creates a record with only the required fields.
pub fn medicine(id: &str, name: &str, quantity: u32, expiry: &str) -> MedicineRecord {
    MedicineRecord::new(id, name, quantity, ExpiryDate::parse(expiry))
}

/// The two-record collection used throughout the documented scenarios.
pub fn scenario_records() -> Vec<MedicineRecord> {
    vec![
        medicine("1", "Paracetamol", 5, "2025-01-10"),
        medicine("2", "Ibuprofen", 20, "2024-06-01"),
    ]
}

/// A mixed collection with manufacturers, lower-case names and varied stock.
#[allow(clippy::unwrap_used)]
pub fn sample_view() -> InventoryView {
    let mut amoxicillin = medicine("a", "amoxicillin", 30, "2024-06-04");
    amoxicillin.manufacturer = Some("Sandoz".to_string());
    let mut zinc = medicine("z", "Zinc Sulfate", 8, "2026-02-14");
    zinc.manufacturer = Some("Nature Made".to_string());
    zinc.barcode = Some("0031604026189".to_string());
    let records = vec![
        medicine("p", "Paracetamol", 5, "2025-01-10"),
        amoxicillin,
        zinc,
        medicine("i", "Ibuprofen", 20, "2024-06-01"),
        medicine("m", "Ampicillin", 12, "2024-07-15"),
        medicine("c", "Cetirizine", 3, "2024-06-20"),
    ];
    InventoryView::with_records(InventoryConfig::default(), records).unwrap()
}
