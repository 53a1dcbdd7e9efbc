//! Search and sort primitives used by the inventory view.

use crate::errors::{Error, Result};
use crate::models::MedicineRecord;
use feruca::Collator;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Column the list can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    /// Locale-aware by name
    Name,
    /// Numeric by units in stock
    Quantity,
    /// Chronological, unparseable dates last
    ExpiryDate,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first
    #[default]
    Asc,
    /// Largest first
    Desc,
}

/// Active sort of the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    /// Column sorted on
    pub field: SortField,
    /// Ascending or descending
    pub direction: SortDirection,
}

impl FromStr for SortField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "name" => Ok(Self::Name),
            "quantity" => Ok(Self::Quantity),
            "expiryDate" => Ok(Self::ExpiryDate),
            other => Err(Error::invalid_argument(format!(
                "unsupported sort field '{other}' (expected name, quantity or expiryDate)"
            ))),
        }
    }
}

impl FromStr for SortDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(Error::invalid_argument(format!(
                "unsupported sort direction '{other}' (expected asc or desc)"
            ))),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Name => "name",
            Self::Quantity => "quantity",
            Self::ExpiryDate => "expiryDate",
        })
    }
}

/// Locale-aware name order (CLDR root collation), then the raw text so that
/// names the collator treats as equal still have a fixed order.
#[must_use]
pub fn compare_names(collator: &mut Collator, a: &str, b: &str) -> Ordering {
    collator.collate(a, b).then_with(|| a.cmp(b))
}

/// Chronological order with unparseable dates after every valid one, whatever the
/// direction.
#[must_use]
pub fn compare_expiry(
    a: &MedicineRecord,
    b: &MedicineRecord,
    direction: SortDirection,
) -> Ordering {
    match (a.expiry_date.date(), b.expiry_date.date()) {
        (Some(left), Some(right)) => direction.apply(left.cmp(&right)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl SortDirection {
    const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

impl SortSpec {
    /// Pairs a field with a direction.
    #[must_use]
    pub const fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Parses a field/direction pair as received from the UI.
    ///
    /// # Errors
    /// Returns `Error::InvalidArgument` for an unknown field or direction.
    pub fn parse(field: &str, direction: &str) -> Result<Self> {
        Ok(Self::new(field.parse()?, direction.parse()?))
    }

    /// Compares two records under this spec.
    #[must_use]
    pub fn compare(
        &self,
        collator: &mut Collator,
        a: &MedicineRecord,
        b: &MedicineRecord,
    ) -> Ordering {
        match self.field {
            SortField::Name => self
                .direction
                .apply(compare_names(collator, &a.name, &b.name)),
            SortField::Quantity => self.direction.apply(a.quantity.cmp(&b.quantity)),
            SortField::ExpiryDate => compare_expiry(a, b, self.direction),
        }
    }

    /// Sorts rows in place. The sort is stable, so ties keep their incoming order.
    pub fn sort(&self, rows: &mut [&MedicineRecord]) {
        let mut collator = Collator::default();
        rows.sort_by(|a, b| self.compare(&mut collator, a, b));
    }
}

/// Case-insensitive search over the name and, when enabled, the manufacturer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    needle: String,
    include_manufacturer: bool,
}

impl SearchFilter {
    /// Lowercases `term`; an empty term matches everything.
    #[must_use]
    pub fn new(term: &str, include_manufacturer: bool) -> Self {
        Self {
            needle: term.to_lowercase(),
            include_manufacturer,
        }
    }

    /// Case-insensitive substring match on name, and on manufacturer when enabled.
    #[must_use]
    pub fn matches(&self, record: &MedicineRecord) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        if record.name.to_lowercase().contains(&self.needle) {
            return true;
        }
        self.include_manufacturer
            && record
                .manufacturer
                .as_deref()
                .is_some_and(|m| m.to_lowercase().contains(&self.needle))
    }
}
