//! Medicine record - one inventory item as served by `/api/medicines`.
//!
//! Records are created, updated and deleted by the remote store; this crate only
//! holds a transient copy. The expiry date is kept alongside its raw text so that a
//! malformed value can still be displayed (with an "invalid date" marker) instead of
//! aborting the whole list.

use crate::errors::{Error, Result};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Marker rendered in place of an expiry date that could not be parsed.
pub const INVALID_DATE_MARKER: &str = "Invalid Date";

/// Expiry date of a record, either a parsed calendar date or the raw text that failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExpiryDate {
    /// A valid calendar date
    Valid(NaiveDate),
    /// Unparseable input, kept verbatim
    Invalid(String),
}

impl ExpiryDate {
    /// Parses `YYYY-MM-DD`, falling back to the date part of an RFC 3339 timestamp
    /// (the store serializes dates as `2025-01-10T00:00:00.000Z`).
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return Self::Valid(date);
        }
        if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
            return Self::Valid(timestamp.date_naive());
        }
        Self::Invalid(raw.to_string())
    }

    /// Returns the parsed date, if any.
    #[must_use]
    pub const fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::Valid(date) => Some(*date),
            Self::Invalid(_) => None,
        }
    }

    /// True when the text parsed to a calendar date.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// ISO 8601 date-only form, or [`INVALID_DATE_MARKER`].
    #[must_use]
    pub fn to_iso_string(&self) -> String {
        match self {
            Self::Valid(date) => date.format("%Y-%m-%d").to_string(),
            Self::Invalid(_) => INVALID_DATE_MARKER.to_string(),
        }
    }
}

impl From<NaiveDate> for ExpiryDate {
    fn from(date: NaiveDate) -> Self {
        Self::Valid(date)
    }
}

impl fmt::Display for ExpiryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso_string())
    }
}

impl Serialize for ExpiryDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Valid(date) => serializer.collect_str(&date.format("%Y-%m-%d")),
            Self::Invalid(raw) => serializer.serialize_str(raw),
        }
    }
}

impl<'de> Deserialize<'de> for ExpiryDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// One medicine in the inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineRecord {
    /// Opaque identifier assigned by the store
    #[serde(alias = "_id")]
    pub id: String,
    /// Display name, never empty
    pub name: String,
    /// Free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Units in stock
    pub quantity: u32,
    /// Unit price
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Calendar date after which the medicine must not be used
    pub expiry_date: ExpiryDate,
    /// Maker, searchable when enabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    /// Scannable code, expected to be unique when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
}

impl MedicineRecord {
    /// Builds a record with only the required fields set.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        quantity: u32,
        expiry_date: impl Into<ExpiryDate>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            quantity,
            price: None,
            expiry_date: expiry_date.into(),
            manufacturer: None,
            barcode: None,
        }
    }

    /// Checks the invariants a record must hold before it enters a collection.
    ///
    /// An unparseable expiry date is not an error here; it is reported as a
    /// parse warning by the view.
    ///
    /// # Errors
    /// Returns `Error::InvalidRecord` if the name is blank or the price is
    /// negative or not finite.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidRecord {
                message: format!("medicine {} has an empty name", self.id),
            });
        }
        if let Some(price) = self.price {
            if !price.is_finite() || price < 0.0 {
                return Err(Error::InvalidRecord {
                    message: format!("medicine {} has invalid price {price}", self.id),
                });
            }
        }
        Ok(())
    }

    /// Decodes the body of `GET /api/medicines`.
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed or any record fails validation.
    pub fn list_from_json(body: &str) -> Result<Vec<Self>> {
        let records: Vec<Self> = serde_json::from_str(body)?;
        for record in &records {
            record.validate()?;
        }
        Ok(records)
    }
}
