//! Inventory view-model - search, sort, paging and local mirroring of server writes.
//!
//! The view owns a client-side copy of the medicine collection handed to it by the
//! data-fetching layer. It never talks to the network: a confirmed add/update/delete
//! is mirrored through [`InventoryView::apply_mutation`] so the list stays consistent
//! without a refetch. Derived views are computed on demand from the stored order,
//! which is the insertion order and the tie-breaker for every sort.

use crate::{
    config::InventoryConfig,
    core::{
        export::{self, ExportFormat, ExportPayload},
        query::{SearchFilter, SortSpec},
        status::{self, StatusFlags},
        summary::{self, InventorySummary},
    },
    errors::{Error, Result},
    models::{ExpiryDate, MedicineRecord},
};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info, trace, warn};

/// Kind of server-confirmed write being mirrored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    /// A record was created
    Add,
    /// A record was changed; matched by id
    Update,
    /// A record was deleted; matched by id
    Remove,
}

impl FromStr for MutationKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "add" => Ok(Self::Add),
            "update" => Ok(Self::Update),
            "remove" => Ok(Self::Remove),
            other => Err(Error::invalid_argument(format!(
                "unsupported mutation kind '{other}' (expected add, update or remove)"
            ))),
        }
    }
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Add => "add",
            Self::Update => "update",
            Self::Remove => "remove",
        })
    }
}

/// What a mirrored mutation did to the local collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The local collection changed
    Applied,
    /// No record with that id was held; the list may be stale
    NotFound,
}

/// A record whose expiry date could not be parsed. Non-fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseWarning {
    /// Id of the affected record
    pub record_id: String,
    /// The expiry text as received
    pub raw_value: String,
}

/// A record paired with the flags the list renders it with.
#[derive(Debug, Clone, Serialize)]
pub struct ListRow<'a> {
    /// The record as held by the view
    pub record: &'a MedicineRecord,
    /// Flags judged with the list expiry window
    pub status: StatusFlags,
}

/// Client-side view over a medicine collection.
#[derive(Debug, Clone, Default)]
pub struct InventoryView {
    records: Vec<MedicineRecord>,
    config: InventoryConfig,
    search_term: String,
    filter: SearchFilter,
    sort: Option<SortSpec>,
}

impl InventoryView {
    /// Creates an empty view.
    ///
    /// # Errors
    /// Returns `Error::Config` if the settings fail [`InventoryConfig::validate`].
    pub fn new(config: InventoryConfig) -> Result<Self> {
        config.validate()?;
        let filter = SearchFilter::new("", config.search_manufacturer);
        Ok(Self {
            records: Vec::new(),
            config,
            search_term: String::new(),
            filter,
            sort: None,
        })
    }

    /// Builds a view over an already fetched collection.
    ///
    /// # Errors
    /// Returns `Error::Config` for unusable settings, or `Error::InvalidRecord` if any
    /// record breaks the data-model invariants.
    pub fn with_records(config: InventoryConfig, records: Vec<MedicineRecord>) -> Result<Self> {
        let mut view = Self::new(config)?;
        view.replace_all(records)?;
        Ok(view)
    }

    /// Settings the view was built with.
    #[must_use]
    pub const fn config(&self) -> &InventoryConfig {
        &self.config
    }

    /// The full collection in insertion order, ignoring search and sort.
    #[must_use]
    pub fn records(&self) -> &[MedicineRecord] {
        &self.records
    }

    /// Current search term as typed.
    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Active sort, `None` for insertion order.
    #[must_use]
    pub const fn sort(&self) -> Option<SortSpec> {
        self.sort
    }

    /// Replaces the whole collection, as after a fresh `GET /api/medicines`.
    ///
    /// # Errors
    /// Returns `Error::InvalidRecord` if any record breaks the data-model invariants;
    /// the current collection is left untouched in that case.
    pub fn replace_all(&mut self, records: Vec<MedicineRecord>) -> Result<()> {
        for record in &records {
            record.validate()?;
        }
        self.records = records;
        for warning in self.parse_warnings() {
            warn!(
                "Medicine {} has an unparseable expiry date: {:?}",
                warning.record_id, warning.raw_value
            );
        }
        info!("Inventory view loaded with {} medicines.", self.records.len());
        Ok(())
    }

    /// Sets the case-insensitive substring filter. An empty term matches everything.
    pub fn set_search_term(&mut self, term: &str) {
        self.search_term = term.to_string();
        self.filter = SearchFilter::new(term, self.config.search_manufacturer);
        trace!("Search term set to {:?}", self.search_term);
    }

    /// Sets the active sort. Ties keep insertion order.
    pub fn set_sort(&mut self, spec: SortSpec) {
        debug!("Sorting by {} {:?}", spec.field, spec.direction);
        self.sort = Some(spec);
    }

    /// String form of [`Self::set_sort`], for values coming straight from the UI.
    ///
    /// # Errors
    /// Returns `Error::InvalidArgument` for an unknown field or direction; the
    /// current sort is kept.
    pub fn set_sort_str(&mut self, field: &str, direction: &str) -> Result<()> {
        let spec = SortSpec::parse(field, direction)?;
        self.set_sort(spec);
        Ok(())
    }

    /// Returns the list to insertion order.
    pub fn clear_sort(&mut self) {
        self.sort = None;
    }

    /// Records matching the search term, in insertion order.
    fn matching(&self) -> Vec<&MedicineRecord> {
        self.records
            .iter()
            .filter(|record| self.filter.matches(record))
            .collect()
    }

    /// Records matching the search term, in the active sort order.
    #[must_use]
    pub fn filtered(&self) -> Vec<&MedicineRecord> {
        let mut rows = self.matching();
        if let Some(spec) = self.sort {
            spec.sort(&mut rows);
        }
        rows
    }

    /// Number of records matching the search term.
    #[must_use]
    pub fn filtered_len(&self) -> usize {
        self.records
            .iter()
            .filter(|record| self.filter.matches(record))
            .count()
    }

    /// Slice of the filtered, sorted list for a 0-based page.
    ///
    /// A page past the end is empty, not an error.
    ///
    /// # Errors
    /// Returns `Error::InvalidArgument` if `page_size` is zero.
    pub fn get_page(&self, page_index: usize, page_size: usize) -> Result<Vec<&MedicineRecord>> {
        if page_size == 0 {
            return Err(Error::invalid_argument("page size must be a positive integer"));
        }
        let Some(start) = page_index.checked_mul(page_size) else {
            return Ok(Vec::new());
        };
        Ok(self
            .filtered()
            .into_iter()
            .skip(start)
            .take(page_size)
            .collect())
    }

    /// Number of pages the filtered list spans at `page_size`.
    ///
    /// # Errors
    /// Returns `Error::InvalidArgument` if `page_size` is zero.
    pub fn page_count(&self, page_size: usize) -> Result<usize> {
        if page_size == 0 {
            return Err(Error::invalid_argument("page size must be a positive integer"));
        }
        Ok(self.filtered_len().div_ceil(page_size))
    }

    /// A page with each row's flags, judged with the list expiry window.
    ///
    /// # Errors
    /// Returns `Error::InvalidArgument` if `page_size` is zero.
    pub fn page_rows(
        &self,
        page_index: usize,
        page_size: usize,
        today: NaiveDate,
    ) -> Result<Vec<ListRow<'_>>> {
        Ok(self
            .get_page(page_index, page_size)?
            .into_iter()
            .map(|record| ListRow {
                record,
                status: self.list_flags(record, today),
            })
            .collect())
    }

    /// Flags for one record using the list expiry window.
    #[must_use]
    pub fn list_flags(&self, record: &MedicineRecord, today: NaiveDate) -> StatusFlags {
        status::status_flags(
            record,
            today,
            self.config.list_expiry_window_days,
            self.config.low_stock_threshold,
        )
    }

    /// Dashboard tile counts over the whole collection. Search and sort are ignored.
    #[must_use]
    pub fn compute_summary(&self, today: NaiveDate) -> InventorySummary {
        summary::compute_summary(&self.records, &self.config, today)
    }

    /// Records expiring within the list window, for the alert banner.
    #[must_use]
    pub fn expiry_alerts(&self, today: NaiveDate) -> Vec<&MedicineRecord> {
        self.records
            .iter()
            .filter(|r| status::is_expiring_soon(r, today, self.config.list_expiry_window_days))
            .collect()
    }

    /// Records below the low-stock threshold (dashboard "low stock" tab).
    #[must_use]
    pub fn low_stock(&self) -> Vec<&MedicineRecord> {
        self.records
            .iter()
            .filter(|r| status::is_low_stock(r, self.config.low_stock_threshold))
            .collect()
    }

    /// Records expiring within the summary window (dashboard "expiring" tab).
    #[must_use]
    pub fn expiring_soon(&self, today: NaiveDate) -> Vec<&MedicineRecord> {
        self.records
            .iter()
            .filter(|r| status::is_expiring_soon(r, today, self.config.summary_expiry_window_days))
            .collect()
    }

    /// Looks up a scanned code. `None` when scanning is disabled or nothing matches.
    #[must_use]
    pub fn find_by_barcode(&self, code: &str) -> Option<&MedicineRecord> {
        if !self.config.barcode_scanning {
            return None;
        }
        let code = code.trim();
        self.records
            .iter()
            .find(|r| r.barcode.as_deref().is_some_and(|b| b == code))
    }

    /// One warning per record whose expiry text did not parse.
    #[must_use]
    pub fn parse_warnings(&self) -> Vec<ParseWarning> {
        self.records
            .iter()
            .filter_map(|r| match &r.expiry_date {
                ExpiryDate::Invalid(raw) => Some(ParseWarning {
                    record_id: r.id.clone(),
                    raw_value: raw.clone(),
                }),
                ExpiryDate::Valid(_) => None,
            })
            .collect()
    }

    /// Mirrors a server-confirmed write into the local collection.
    ///
    /// - `Add` appends; duplicate ids are the caller's problem.
    /// - `Update` replaces the record with the same id, or does nothing.
    /// - `Remove` drops the record with the same id, or does nothing.
    ///
    /// # Errors
    /// Returns `Error::InvalidRecord` if an added or updated record breaks the
    /// data-model invariants.
    pub fn apply_mutation(
        &mut self,
        kind: MutationKind,
        record: MedicineRecord,
    ) -> Result<MutationOutcome> {
        match kind {
            MutationKind::Add => {
                record.validate()?;
                debug!("Mirroring add of medicine {}", record.id);
                self.records.push(record);
                Ok(MutationOutcome::Applied)
            }
            MutationKind::Update => {
                record.validate()?;
                match self.records.iter_mut().find(|r| r.id == record.id) {
                    Some(slot) => {
                        debug!("Mirroring update of medicine {}", record.id);
                        *slot = record;
                        Ok(MutationOutcome::Applied)
                    }
                    None => {
                        warn!("Update for unknown medicine {}; list may be stale", record.id);
                        Ok(MutationOutcome::NotFound)
                    }
                }
            }
            MutationKind::Remove => Ok(self.remove(&record.id)),
        }
    }

    /// String form of [`Self::apply_mutation`].
    ///
    /// # Errors
    /// Returns `Error::InvalidArgument` for an unknown kind, or the errors of
    /// [`Self::apply_mutation`].
    pub fn apply_mutation_str(
        &mut self,
        kind: &str,
        record: MedicineRecord,
    ) -> Result<MutationOutcome> {
        let kind = kind.parse()?;
        self.apply_mutation(kind, record)
    }

    /// Drops the record with `id`; a no-op when it is absent.
    pub fn remove(&mut self, id: &str) -> MutationOutcome {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        if self.records.len() == before {
            debug!("Remove for unknown medicine {id}; nothing to do");
            MutationOutcome::NotFound
        } else {
            debug!("Mirroring removal of medicine {id}");
            MutationOutcome::Applied
        }
    }

    /// Export of the filtered list (every page), normalized to expiry order.
    ///
    /// The active sort is ignored: records sharing an expiry date keep insertion order.
    ///
    /// # Errors
    /// Returns an error if CSV rendering fails.
    pub fn export_rows(&self, format: ExportFormat) -> Result<ExportPayload> {
        export::export(&self.matching(), format)
    }

    /// String form of [`Self::export_rows`].
    ///
    /// # Errors
    /// Returns `Error::InvalidArgument` for an unknown format.
    pub fn export_rows_str(&self, format: &str) -> Result<ExportPayload> {
        self.export_rows(format.parse()?)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::query::{SortDirection, SortField};
    use crate::test_utils::{date, init_test_tracing, medicine, sample_view, scenario_records};

    fn names<'a>(records: &[&'a MedicineRecord]) -> Vec<&'a str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_sort_by_expiry_ascending() -> Result<()> {
        let mut view = InventoryView::with_records(InventoryConfig::default(), scenario_records())?;
        view.set_sort_str("expiryDate", "asc")?;
        assert_eq!(names(&view.filtered()), ["Ibuprofen", "Paracetamol"]);
        Ok(())
    }

    #[test]
    fn test_search_is_case_insensitive_and_applies_to_pages() -> Result<()> {
        let mut view = sample_view();
        view.set_search_term("CILLIN");
        let page = view.get_page(0, 10)?;
        assert!(!page.is_empty());
        assert!(page.iter().all(|r| r.name.to_lowercase().contains("cillin")));

        view.set_search_term("");
        assert_eq!(view.filtered_len(), view.records().len());
        Ok(())
    }

    #[test]
    fn test_quantity_sort_directions_are_reverses() {
        let mut view = sample_view();
        view.set_sort(SortSpec::new(SortField::Quantity, SortDirection::Asc));
        let ascending: Vec<u32> = view.filtered().iter().map(|r| r.quantity).collect();
        view.set_sort(SortSpec::new(SortField::Quantity, SortDirection::Desc));
        let mut descending: Vec<u32> = view.filtered().iter().map(|r| r.quantity).collect();
        descending.reverse();
        assert_eq!(ascending, descending);
    }

    #[test]
    fn test_ties_keep_insertion_order() -> Result<()> {
        let records = vec![
            medicine("1", "First", 5, "2025-01-01"),
            medicine("2", "Second", 5, "2025-01-01"),
            medicine("3", "Third", 5, "2025-01-01"),
        ];
        let mut view = InventoryView::with_records(InventoryConfig::default(), records)?;
        view.set_sort(SortSpec::new(SortField::Quantity, SortDirection::Desc));
        assert_eq!(names(&view.filtered()), ["First", "Second", "Third"]);
        view.set_sort(SortSpec::new(SortField::ExpiryDate, SortDirection::Desc));
        assert_eq!(names(&view.filtered()), ["First", "Second", "Third"]);
        Ok(())
    }

    #[test]
    fn test_invalid_dates_sort_to_end_in_both_directions() -> Result<()> {
        init_test_tracing();
        let mut broken = medicine("9", "Broken", 1, "2025-01-01");
        broken.expiry_date = ExpiryDate::parse("31/31/2031");
        let records = vec![
            broken,
            medicine("1", "Early", 1, "2024-01-01"),
            medicine("2", "Late", 1, "2026-01-01"),
        ];
        let mut view = InventoryView::with_records(InventoryConfig::default(), records)?;

        view.set_sort_str("expiryDate", "asc")?;
        assert_eq!(names(&view.filtered()), ["Early", "Late", "Broken"]);
        view.set_sort_str("expiryDate", "desc")?;
        assert_eq!(names(&view.filtered()), ["Late", "Early", "Broken"]);

        assert_eq!(view.parse_warnings().len(), 1);
        assert_eq!(view.parse_warnings()[0].record_id, "9");
        Ok(())
    }

    #[test]
    fn test_name_sort_descending() {
        let mut view = sample_view();
        view.set_sort(SortSpec::new(SortField::Name, SortDirection::Desc));
        let sorted = names(&view.filtered());
        assert_eq!(sorted.first(), Some(&"Zinc Sulfate"));
        assert_eq!(sorted.last(), Some(&"amoxicillin"));
    }

    #[test]
    fn test_page_beyond_range_is_empty() -> Result<()> {
        let view = InventoryView::with_records(InventoryConfig::default(), {
            let mut records = scenario_records();
            records.push(medicine("3", "Cetirizine", 12, "2025-03-03"));
            records
        })?;
        assert!(view.get_page(5, 10)?.is_empty());
        assert_eq!(view.get_page(0, 2)?.len(), 2);
        assert_eq!(view.get_page(1, 2)?.len(), 1);
        assert_eq!(view.page_count(2)?, 2);
        assert!(view.get_page(usize::MAX, 2)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_zero_page_size_is_invalid() {
        let view = sample_view();
        assert!(matches!(
            view.get_page(0, 0),
            Err(Error::InvalidArgument { message: _ })
        ));
        assert!(view.page_count(0).is_err());
    }

    #[test]
    fn test_update_replaces_matching_record_only() -> Result<()> {
        let mut view = InventoryView::with_records(InventoryConfig::default(), scenario_records())?;
        let mut updated = view.records()[0].clone();
        updated.quantity = 50;

        let outcome = view.apply_mutation_str("update", updated)?;
        assert_eq!(outcome, MutationOutcome::Applied);
        assert_eq!(view.records()[0].quantity, 50);
        assert_eq!(view.records()[1].quantity, 20);
        Ok(())
    }

    #[test]
    fn test_update_unknown_id_is_noop() -> Result<()> {
        init_test_tracing();
        let mut view = InventoryView::with_records(InventoryConfig::default(), scenario_records())?;
        let before = view.records().to_vec();
        let outcome = view.apply_mutation(
            MutationKind::Update,
            medicine("missing", "Ghost", 1, "2025-01-01"),
        )?;
        assert_eq!(outcome, MutationOutcome::NotFound);
        assert_eq!(view.records(), before.as_slice());
        Ok(())
    }

    #[test]
    fn test_remove_twice_is_idempotent() -> Result<()> {
        init_test_tracing();
        let mut view = InventoryView::with_records(InventoryConfig::default(), scenario_records())?;
        let target = view.records()[0].clone();

        let first = view.apply_mutation(MutationKind::Remove, target.clone())?;
        let second = view.apply_mutation(MutationKind::Remove, target)?;
        assert_eq!(first, MutationOutcome::Applied);
        assert_eq!(second, MutationOutcome::NotFound);
        assert_eq!(view.records().len(), 1);
        Ok(())
    }

    #[test]
    fn test_add_appends_and_validates() -> Result<()> {
        let mut view = InventoryView::with_records(InventoryConfig::default(), scenario_records())?;
        view.apply_mutation(MutationKind::Add, medicine("3", "Cetirizine", 3, "2025-02-02"))?;
        assert_eq!(view.records().last().unwrap().id, "3");

        let result = view.apply_mutation(MutationKind::Add, medicine("4", "", 3, "2025-02-02"));
        assert!(matches!(result, Err(Error::InvalidRecord { message: _ })));
        assert_eq!(view.records().len(), 3);
        Ok(())
    }

    #[test]
    fn test_unknown_mutation_kind_is_invalid_argument() {
        let mut view = sample_view();
        let result = view.apply_mutation_str("upsert", medicine("1", "A", 1, "2025-01-01"));
        assert!(matches!(result, Err(Error::InvalidArgument { message: _ })));
    }

    #[test]
    fn test_unknown_sort_keeps_previous_sort() {
        let mut view = sample_view();
        view.set_sort(SortSpec::new(SortField::Name, SortDirection::Asc));
        assert!(view.set_sort_str("barcode", "asc").is_err());
        assert_eq!(
            view.sort(),
            Some(SortSpec::new(SortField::Name, SortDirection::Asc))
        );
    }

    #[test]
    fn test_page_rows_carry_list_window_flags() -> Result<()> {
        let today = date(2024, 6, 1);
        let records = vec![
            medicine("1", "Soon", 40, "2024-06-05"),
            medicine("2", "Later", 40, "2024-06-20"),
            medicine("3", "Gone", 2, "2024-05-01"),
        ];
        let view = InventoryView::with_records(InventoryConfig::default(), records)?;
        let rows = view.page_rows(0, 10, today)?;

        assert!(rows[0].status.is_expiring_soon);
        assert!(!rows[1].status.is_expiring_soon);
        assert!(rows[2].status.is_expired);
        assert!(rows[2].status.is_low_stock);
        Ok(())
    }

    #[test]
    fn test_alert_and_tab_lists_use_their_windows() -> Result<()> {
        let today = date(2024, 6, 1);
        let records = vec![
            medicine("1", "Soon", 40, "2024-06-05"),
            medicine("2", "Later", 4, "2024-06-20"),
            medicine("3", "Far", 40, "2025-06-20"),
        ];
        let view = InventoryView::with_records(InventoryConfig::default(), records)?;

        assert_eq!(names(&view.expiry_alerts(today)), ["Soon"]);
        assert_eq!(names(&view.expiring_soon(today)), ["Soon", "Later"]);
        assert_eq!(names(&view.low_stock()), ["Later"]);
        Ok(())
    }

    #[test]
    fn test_find_by_barcode_respects_capability_flag() -> Result<()> {
        let mut record = medicine("1", "Aspirin", 10, "2025-01-01");
        record.barcode = Some("4006381333931".to_string());

        let disabled = InventoryView::with_records(InventoryConfig::default(), vec![record.clone()])?;
        assert!(disabled.find_by_barcode("4006381333931").is_none());

        let config = InventoryConfig {
            barcode_scanning: true,
            ..InventoryConfig::default()
        };
        let enabled = InventoryView::with_records(config, vec![record])?;
        assert_eq!(
            enabled.find_by_barcode(" 4006381333931 ").map(|r| r.id.as_str()),
            Some("1")
        );
        assert!(enabled.find_by_barcode("000").is_none());
        Ok(())
    }

    #[test]
    fn test_settings_built_in_code_are_validated() {
        let config = InventoryConfig {
            page_size_options: vec![5, 10],
            default_page_size: 25,
            ..InventoryConfig::default()
        };
        assert!(matches!(
            InventoryView::new(config),
            Err(Error::Config { message: _ })
        ));

        let config = InventoryConfig {
            page_size_options: vec![0, 10],
            ..InventoryConfig::default()
        };
        assert!(matches!(
            InventoryView::with_records(config, scenario_records()),
            Err(Error::Config { message: _ })
        ));
    }

    #[test]
    fn test_replace_all_rejects_invalid_batch() -> Result<()> {
        let mut view = InventoryView::with_records(InventoryConfig::default(), scenario_records())?;
        let result = view.replace_all(vec![medicine("x", " ", 1, "2025-01-01")]);
        assert!(result.is_err());
        assert_eq!(view.records().len(), 2);
        Ok(())
    }
}
