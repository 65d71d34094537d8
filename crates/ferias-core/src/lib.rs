//! # ferias-core
//!
//! Core domain model and traits for the ferias vacation dashboard.
//!
//! This crate provides:
//! - Domain types: `VacationRecord`, `Roster`, `DateRange`, `FilterCriteria`
//! - Filter controls: option lists, default date window, input resolution
//! - The `Timeline` chart model and the `Renderer` trait
//! - Error types
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use ferias_core::{DateRange, FilterCriteria, Roster, Selection, SortKey, VacationRecord};
//!
//! let date = |m, d| NaiveDate::from_ymd_opt(2024, m, d).unwrap();
//! let roster = Roster::new(vec![
//!     VacationRecord::new("Bob", "MB", date(1, 5), 4),
//!     VacationRecord::new("Alice", "MA", date(1, 1), 10),
//! ])
//! .unwrap();
//!
//! let criteria = FilterCriteria {
//!     employee: Selection::All,
//!     department: Selection::All,
//!     range: DateRange::new(date(1, 1), date(1, 31)).unwrap(),
//!     sort: SortKey::ByName,
//! };
//! let view = criteria.apply(roster.records());
//! assert_eq!(view[0].name, "Alice");
//! ```

pub mod controls;
pub mod filter;
pub mod timeline;

pub use controls::{default_range, FilterInputs, FilterOptions};
pub use filter::FilterCriteria;
pub use timeline::{AxisTick, LegendEntry, Timeline, TimelineBar, WeekendBand};

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// Records
// ============================================================================

/// One row of the vacation spreadsheet
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VacationRecord {
    /// Employee name (not guaranteed unique: one employee may have several vacations)
    pub name: String,
    /// Department, used for colouring
    pub department: String,
    /// First day of the vacation
    pub start: NaiveDate,
    /// Length of the vacation in calendar days
    pub duration_days: u32,
    /// `start + duration_days`, derived on construction
    pub end: NaiveDate,
}

impl VacationRecord {
    /// Create a record, deriving the end date.
    ///
    /// An end date past the calendar limit saturates at `NaiveDate::MAX`.
    pub fn new(
        name: impl Into<String>,
        department: impl Into<String>,
        start: NaiveDate,
        duration_days: u32,
    ) -> Self {
        let end = start
            .checked_add_days(Days::new(u64::from(duration_days)))
            .unwrap_or(NaiveDate::MAX);
        Self {
            name: name.into(),
            department: department.into(),
            start,
            duration_days,
            end,
        }
    }

    /// Inclusive overlap with a date window
    pub fn overlaps(&self, range: &DateRange) -> bool {
        self.start <= range.end && self.end >= range.start
    }
}

/// The loaded, read-only record set together with its date bounds
#[derive(Clone, Debug)]
pub struct Roster {
    records: Vec<VacationRecord>,
    min_date: NaiveDate,
    max_date: NaiveDate,
}

impl Roster {
    /// Build a roster from records in source order.
    ///
    /// Returns `None` for an empty list, which has no date bounds.
    pub fn new(records: Vec<VacationRecord>) -> Option<Self> {
        let min_date = records.iter().map(|r| r.start).min()?;
        let max_date = records.iter().map(|r| r.end).max()?;
        Some(Self {
            records,
            min_date,
            max_date,
        })
    }

    pub fn records(&self) -> &[VacationRecord] {
        &self.records
    }

    /// Earliest vacation start
    pub fn min_date(&self) -> NaiveDate {
        self.min_date
    }

    /// Latest vacation end
    pub fn max_date(&self) -> NaiveDate {
        self.max_date
    }

    /// `[min_date, max_date]`, the interval date inputs are constrained to
    pub fn bounds(&self) -> DateRange {
        DateRange {
            start: self.min_date,
            end: self.max_date,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ============================================================================
// Date range
// ============================================================================

/// A closed date interval with `start <= end`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        if end < start {
            return Err(ValidationError::EndBeforeStart { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days between start and end (0 for a single-day range)
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Clamp a date into the range
    pub fn clamp(&self, date: NaiveDate) -> NaiveDate {
        date.clamp(self.start, self.end)
    }

    /// Every calendar day from start to end, inclusive
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }

    /// Saturdays inside the range
    pub fn saturdays(&self) -> impl Iterator<Item = NaiveDate> {
        self.days().filter(|d| d.weekday() == Weekday::Sat)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} – {}",
            self.start.format("%d/%m/%Y"),
            self.end.format("%d/%m/%Y")
        )
    }
}

// ============================================================================
// Selections and sort order
// ============================================================================

/// A select-box value: the "all" sentinel or one exact value
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    /// Interpret raw widget input; absent or blank means "all"
    pub fn from_input(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => Self::All,
            Some(v) => Self::Only(v.to_string()),
        }
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected == value,
        }
    }

    /// The selected value, `None` for "all"
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Only(v) => Some(v),
        }
    }
}

/// Vertical (lane) ordering of the chart
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    ByStartDate,
    ByName,
    ByDepartmentThenStartDate,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [
        SortKey::ByStartDate,
        SortKey::ByName,
        SortKey::ByDepartmentThenStartDate,
    ];

    /// Stable identifier used in URLs and on the command line
    pub fn key(self) -> &'static str {
        match self {
            Self::ByStartDate => "start",
            Self::ByName => "name",
            Self::ByDepartmentThenStartDate => "department",
        }
    }

    /// Label shown in the sort selector
    pub fn label(self) -> &'static str {
        match self {
            Self::ByStartDate => "Data de início",
            Self::ByName => "Nome",
            Self::ByDepartmentThenStartDate => "Área",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SortKey {
    type Err = ParseSortKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseSortKeyError(s.to_string()))
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Output rendering
pub trait Renderer {
    type Output;

    /// Render a timeline to the output format
    fn render(&self, timeline: &Timeline) -> Result<Self::Output, RenderError>;
}

// ============================================================================
// Errors
// ============================================================================

/// Rejected filter input; aborts the current render cycle only
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("A data final não pode ser anterior à data inicial!")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
}

/// Unknown sort order identifier
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown sort order '{0}' (expected start, name or department)")]
pub struct ParseSortKeyError(pub String);

/// Rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

// ============================================================================
// Tests
// ============================================================================
