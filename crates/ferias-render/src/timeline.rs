//! Build a [`Timeline`] from a filtered, sorted view

use crate::palette::DepartmentPalette;
use chrono::{Days, NaiveDate};
use ferias_core::{AxisTick, DateRange, Timeline, TimelineBar, VacationRecord, WeekendBand};

/// Map records to lanes and bars.
///
/// Lane order follows the first occurrence of each name in `records`, so
/// the chart mirrors whatever sort was applied upstream.
pub fn build_timeline(
    records: &[&VacationRecord],
    range: DateRange,
    palette: &DepartmentPalette,
) -> Timeline {
    let legend = palette.assign(records.iter().map(|r| r.department.as_str()));

    let mut lanes: Vec<String> = Vec::new();
    let mut bars = Vec::with_capacity(records.len());
    for record in records {
        let lane = match lanes.iter().position(|n| *n == record.name) {
            Some(idx) => idx,
            None => {
                lanes.push(record.name.clone());
                lanes.len() - 1
            }
        };
        let color = legend
            .iter()
            .find(|e| e.department == record.department)
            .map(|e| e.color.clone())
            .unwrap_or_default();
        bars.push(TimelineBar {
            lane,
            name: record.name.clone(),
            department: record.department.clone(),
            start: record.start,
            end: record.end,
            duration_days: record.duration_days,
            color,
        });
    }

    Timeline {
        range,
        lanes,
        bars,
        weekend_bands: weekend_bands(range),
        ticks: daily_ticks(range),
        legend,
    }
}

/// One band per Saturday in the range, covering Saturday and Sunday
pub fn weekend_bands(range: DateRange) -> Vec<WeekendBand> {
    range
        .saturdays()
        .map(|sat| WeekendBand {
            start: sat,
            end: sat.checked_add_days(Days::new(2)).unwrap_or(NaiveDate::MAX),
        })
        .collect()
}

/// A tick for every day, labelled `dd/mm`
pub fn daily_ticks(range: DateRange) -> Vec<AxisTick> {
    range
        .days()
        .map(|date| AxisTick {
            date,
            label: date.format("%d/%m").to_string(),
        })
        .collect()
}
