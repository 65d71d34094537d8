//! Filter controls: selectable options, the default date window and
//! resolution of raw user input into [`FilterCriteria`].

use crate::{DateRange, FilterCriteria, Roster, Selection, SortKey, ValidationError};
use chrono::{Days, NaiveDate};
use serde::Serialize;

/// Days before today shown by default
pub const DEFAULT_LOOKBACK_DAYS: u64 = 15;
/// Days after today shown by default
pub const DEFAULT_LOOKAHEAD_DAYS: u64 = 30;

/// Distinct values offered by the employee and department selectors,
/// in order of first appearance in the source.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub employees: Vec<String>,
    pub departments: Vec<String>,
}

impl FilterOptions {
    pub fn from_roster(roster: &Roster) -> Self {
        let mut options = Self::default();
        for record in roster.records() {
            if !options.employees.contains(&record.name) {
                options.employees.push(record.name.clone());
            }
            if !options.departments.contains(&record.department) {
                options.departments.push(record.department.clone());
            }
        }
        options
    }
}

/// `[today - 15, today + 30]` with both ends clamped into `bounds`.
///
/// A window that misses the data entirely degrades to the data bounds
/// themselves instead of collapsing onto a single edge day.
pub fn default_range(today: NaiveDate, bounds: DateRange) -> DateRange {
    let start = today
        .checked_sub_days(Days::new(DEFAULT_LOOKBACK_DAYS))
        .unwrap_or(NaiveDate::MIN);
    let end = today
        .checked_add_days(Days::new(DEFAULT_LOOKAHEAD_DAYS))
        .unwrap_or(NaiveDate::MAX);
    if end < bounds.start || start > bounds.end {
        return bounds;
    }
    // Both ends are clamped into the same interval, so ordering is kept
    DateRange {
        start: bounds.clamp(start),
        end: bounds.clamp(end),
    }
}

/// Raw widget state for one interaction, before validation
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterInputs {
    pub employee: Selection,
    pub department: Selection,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub sort: SortKey,
}

impl FilterInputs {
    /// Dates as requested: user values where given, defaults elsewhere
    fn requested_dates(&self, bounds: DateRange, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let defaults = default_range(today, bounds);
        (
            self.start.unwrap_or(defaults.start()),
            self.end.unwrap_or(defaults.end()),
        )
    }

    /// Dates the inputs actually hold: requested dates clamped into the
    /// roster bounds.
    pub fn effective_dates(&self, roster: &Roster, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let bounds = roster.bounds();
        let (start, end) = self.requested_dates(bounds, today);
        (bounds.clamp(start), bounds.clamp(end))
    }

    /// Validate the inputs into criteria for the filter/sort step.
    ///
    /// Order is checked on the requested dates, before clamping, so a
    /// reversed pair outside the data never collapses into a valid day.
    pub fn resolve(
        &self,
        roster: &Roster,
        today: NaiveDate,
    ) -> Result<FilterCriteria, ValidationError> {
        let bounds = roster.bounds();
        let (start, end) = self.requested_dates(bounds, today);
        let requested = DateRange::new(start, end)?;
        Ok(FilterCriteria {
            employee: self.employee.clone(),
            department: self.department.clone(),
            range: DateRange {
                start: bounds.clamp(requested.start),
                end: bounds.clamp(requested.end),
            },
            sort: self.sort,
        })
    }
}
