//! Core view-model logic, independent of any rendering layer.

/// CSV and PDF-table export projections
pub mod export;
/// Search filter and sort specifications
pub mod query;
/// Derived per-record flags (expired, expiring soon, low stock)
pub mod status;
/// Dashboard counts and tiles
pub mod summary;
/// The inventory list view-model
pub mod view;

pub use export::{ExportFormat, ExportPayload, ExportRow, PdfTable};
pub use query::{SortDirection, SortField, SortSpec};
pub use status::{StatusBadge, StatusFlags};
pub use summary::{InventorySummary, SummaryTile, TileIcon};
pub use view::{InventoryView, ListRow, MutationKind, MutationOutcome, ParseWarning};
