//! Inventory log entries served by `/api/inventory-logs`.
//!
//! The store records one entry per add/update/delete. The client only displays them,
//! so this module is limited to decoding and presentation hints.

use crate::errors::Result;
use crate::models::tone::Tone;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What happened to a medicine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogAction {
    /// Medicine created
    Added,
    /// Medicine edited
    Updated,
    /// Medicine removed
    Deleted,
    /// Any action string this client does not know about
    #[serde(other)]
    Other,
}

impl LogAction {
    /// Colour a log row is drawn with.
    #[must_use]
    pub const fn tone(self) -> Tone {
        match self {
            Self::Added => Tone::Success,
            Self::Updated => Tone::Info,
            Self::Deleted => Tone::Error,
            Self::Other => Tone::Neutral,
        }
    }
}

/// A single log line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryLogEntry {
    /// Store-assigned id
    #[serde(alias = "_id")]
    pub id: String,
    /// Name at the time of the action
    pub medicine_name: String,
    /// What happened
    pub action: LogAction,
    /// Free-text note from the store
    #[serde(default)]
    pub details: Option<String>,
    /// When it happened
    #[serde(alias = "createdAt")]
    pub date: DateTime<Utc>,
}

/// Decodes a log listing and orders it newest first.
///
/// # Errors
/// Returns an error if the body is not a JSON array of log entries.
pub fn logs_from_json(body: &str) -> Result<Vec<InventoryLogEntry>> {
    let mut entries: Vec<InventoryLogEntry> = serde_json::from_str(body)?;
    entries.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(entries)
}
