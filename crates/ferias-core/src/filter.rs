//! Row selection and ordering of the vacation table

use crate::{DateRange, Selection, SortKey, VacationRecord};
use serde::Serialize;

/// Validated filter state for one interaction
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FilterCriteria {
    pub employee: Selection,
    pub department: Selection,
    pub range: DateRange,
    pub sort: SortKey,
}

impl FilterCriteria {
    /// Whether a record passes every selection predicate
    pub fn selects(&self, record: &VacationRecord) -> bool {
        self.employee.matches(&record.name)
            && self.department.matches(&record.department)
            && record.overlaps(&self.range)
    }

    /// Filter then sort. Ties keep their filtered (source) order.
    pub fn apply<'a>(&self, records: &'a [VacationRecord]) -> Vec<&'a VacationRecord> {
        let mut selected: Vec<&VacationRecord> =
            records.iter().filter(|r| self.selects(r)).collect();
        sort_records(&mut selected, self.sort);
        selected
    }
}

/// Sort a filtered view in place
pub fn sort_records(records: &mut [&VacationRecord], key: SortKey) {
    match key {
        SortKey::ByStartDate => records.sort_by_key(|r| r.start),
        SortKey::ByName => records.sort_by(|a, b| a.name.cmp(&b.name)),
        SortKey::ByDepartmentThenStartDate => records.sort_by(|a, b| {
            a.department
                .cmp(&b.department)
                .then_with(|| a.start.cmp(&b.start))
        }),
    }
}
