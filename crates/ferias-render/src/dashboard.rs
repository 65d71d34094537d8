//! One dashboard interaction: inputs in, page model out

use crate::palette::DepartmentPalette;
use crate::timeline::build_timeline;
use chrono::NaiveDate;
use ferias_core::{DateRange, FilterInputs, FilterOptions, Roster, Timeline, ValidationError};

/// Everything the page shell needs for one render cycle.
///
/// Built from scratch on every interaction; holds no state between them.
#[derive(Clone, Debug)]
pub struct DashboardView {
    /// Selector contents (without the "all" sentinel)
    pub options: FilterOptions,
    /// Inputs as received, echoed back into the form
    pub inputs: FilterInputs,
    /// Effective start date shown in the date picker
    pub start: NaiveDate,
    /// Effective end date shown in the date picker
    pub end: NaiveDate,
    /// Limits of the date pickers
    pub bounds: DateRange,
    /// Records in the loaded sheet
    pub total_records: usize,
    /// The chart, or the validation error that aborted this cycle
    pub outcome: Result<Timeline, ValidationError>,
}

impl DashboardView {
    /// Options → resolve dates → validate → filter/sort → build the chart
    pub fn build(
        roster: &Roster,
        inputs: FilterInputs,
        today: NaiveDate,
        palette: &DepartmentPalette,
    ) -> Self {
        let (start, end) = inputs.effective_dates(roster, today);
        let outcome = inputs.resolve(roster, today).map(|criteria| {
            let view = criteria.apply(roster.records());
            build_timeline(&view, criteria.range, palette)
        });

        Self {
            options: FilterOptions::from_roster(roster),
            inputs,
            start,
            end,
            bounds: roster.bounds(),
            total_records: roster.len(),
            outcome,
        }
    }

    pub fn timeline(&self) -> Option<&Timeline> {
        self.outcome.as_ref().ok()
    }

    pub fn error(&self) -> Option<&ValidationError> {
        self.outcome.as_ref().err()
    }
}
