//! Data shapes exchanged with the inventory API.

pub mod inventory_log;
pub mod medicine;
pub mod tone;

pub use inventory_log::{InventoryLogEntry, LogAction};
pub use medicine::{ExpiryDate, INVALID_DATE_MARKER, MedicineRecord};
pub use tone::Tone;
