//! Derived per-record flags: expired, expiring soon, low stock.
//!
//! Nothing here is stored. Flags are recomputed against a caller-supplied "today" so
//! the same record can be judged with the 7-day list window or the 30-day dashboard
//! window.

use crate::models::MedicineRecord;
use chrono::{Days, NaiveDate};
use serde::Serialize;

/// Flags computed for one record at view time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StatusFlags {
    /// Expiry date is before today
    pub is_expired: bool,
    /// Expiry date falls inside the window
    pub is_expiring_soon: bool,
    /// Quantity is below the threshold
    pub is_low_stock: bool,
    /// The expiry date could not be parsed; none of the date flags apply
    pub has_invalid_date: bool,
}

/// Row highlight used by the list. Expiry takes precedence over stock level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusBadge {
    /// Past its expiry date
    Expired,
    /// Inside the expiry window
    ExpiringSoon,
    /// Expiry date unreadable
    InvalidDate,
    /// Nothing to flag
    InStock,
}

/// `expiry < today`. Unparseable dates are never expired.
#[must_use]
pub fn is_expired(record: &MedicineRecord, today: NaiveDate) -> bool {
    record.expiry_date.date().is_some_and(|expiry| expiry < today)
}

/// `today <= expiry <= today + window_days`.
#[must_use]
pub fn is_expiring_soon(record: &MedicineRecord, today: NaiveDate, window_days: u32) -> bool {
    let Some(expiry) = record.expiry_date.date() else {
        return false;
    };
    let Some(horizon) = window_end(today, window_days) else {
        return expiry >= today;
    };
    expiry >= today && expiry <= horizon
}

/// `quantity < threshold`.
#[must_use]
pub const fn is_low_stock(record: &MedicineRecord, threshold: u32) -> bool {
    record.quantity < threshold
}

/// Last day inside the window. `None` if the window runs past the calendar range.
fn window_end(today: NaiveDate, window_days: u32) -> Option<NaiveDate> {
    today.checked_add_days(Days::new(u64::from(window_days)))
}

/// All flags for one record.
#[must_use]
pub fn status_flags(
    record: &MedicineRecord,
    today: NaiveDate,
    window_days: u32,
    low_stock_threshold: u32,
) -> StatusFlags {
    StatusFlags {
        is_expired: is_expired(record, today),
        is_expiring_soon: is_expiring_soon(record, today, window_days),
        is_low_stock: is_low_stock(record, low_stock_threshold),
        has_invalid_date: !record.expiry_date.is_valid(),
    }
}

impl StatusFlags {
    /// The single badge a row shows. An unreadable date wins, then expired.
    #[must_use]
    pub const fn badge(&self) -> StatusBadge {
        if self.has_invalid_date {
            StatusBadge::InvalidDate
        } else if self.is_expired {
            StatusBadge::Expired
        } else if self.is_expiring_soon {
            StatusBadge::ExpiringSoon
        } else {
            StatusBadge::InStock
        }
    }
}
