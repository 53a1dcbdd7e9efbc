//! CSV and PDF-table export of the medicine list.
//!
//! Both formats share one projection: `Name, Quantity, ExpiryDate` rows ordered by
//! expiry date ascending, whatever sort the list is showing. Rows with an unparseable
//! date go last and carry the invalid-date marker.

use crate::{
    core::query::{SortDirection, compare_expiry},
    errors::{Error, Result},
    models::MedicineRecord,
};
use serde::Serialize;
use std::str::FromStr;
use tracing::info;

/// Column headers, in export order.
pub const EXPORT_HEADER: [&str; 3] = ["Name", "Quantity", "ExpiryDate"];
/// Title printed above the PDF table.
pub const PDF_TITLE: &str = "Medicine Inventory";

/// Output requested by an export button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// `csv`: comma-separated text
    Csv,
    /// `pdf-table`: rows for a PDF table renderer
    PdfTable,
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "csv" => Ok(Self::Csv),
            "pdf-table" => Ok(Self::PdfTable),
            other => Err(Error::invalid_argument(format!(
                "unsupported export format '{other}' (expected csv or pdf-table)"
            ))),
        }
    }
}

/// One exported row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    /// Medicine name
    #[serde(rename = "Name")]
    pub name: String,
    /// Units in stock
    #[serde(rename = "Quantity")]
    pub quantity: u32,
    /// `YYYY-MM-DD`
    #[serde(rename = "ExpiryDate")]
    pub expiry_date: String,
}

impl ExportRow {
    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.quantity.to_string(),
            self.expiry_date.clone(),
        ]
    }
}

/// Input for a generic "header + rows" table renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PdfTable {
    /// Heading above the table
    pub title: String,
    /// Column headers
    pub head: Vec<String>,
    /// One cell list per row
    pub body: Vec<Vec<String>>,
}

/// Export result for either format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportPayload {
    /// CSV text with a header line
    Csv(String),
    /// Table payload
    PdfTable(PdfTable),
}

/// Projects records into export rows sorted by expiry date, ascending and stable.
#[must_use]
pub fn project(records: &[&MedicineRecord]) -> Vec<ExportRow> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| compare_expiry(a, b, SortDirection::Asc));
    sorted
        .into_iter()
        .map(|record| ExportRow {
            name: record.name.clone(),
            quantity: record.quantity,
            expiry_date: record.expiry_date.to_iso_string(),
        })
        .collect()
}

/// Renders rows as CSV text, header first, one line per row.
///
/// # Errors
/// Returns an error if the CSV writer fails.
pub fn render_csv(rows: &[ExportRow]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    if rows.is_empty() {
        writer.write_record(EXPORT_HEADER)?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| Error::Io(std::io::Error::other(e)))
}

/// Lays rows out for a PDF renderer under [`PDF_TITLE`].
#[must_use]
pub fn pdf_table(rows: &[ExportRow]) -> PdfTable {
    PdfTable {
        title: PDF_TITLE.to_string(),
        head: EXPORT_HEADER.iter().map(ToString::to_string).collect(),
        body: rows.iter().map(ExportRow::cells).collect(),
    }
}

/// Projects and formats records in one step.
///
/// # Errors
/// Returns an error if CSV rendering fails.
pub fn export(records: &[&MedicineRecord], format: ExportFormat) -> Result<ExportPayload> {
    let rows = project(records);
    info!("Exporting {} medicines as {:?}", rows.len(), format);
    match format {
        ExportFormat::Csv => render_csv(&rows).map(ExportPayload::Csv),
        ExportFormat::PdfTable => Ok(ExportPayload::PdfTable(pdf_table(&rows))),
    }
}
