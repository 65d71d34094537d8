//! Renderer-independent chart model

use crate::DateRange;
use chrono::NaiveDate;
use serde::Serialize;

/// A Gantt-style chart ready to be drawn by any [`crate::Renderer`]
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Timeline {
    /// Visible horizontal axis, exactly the selected window
    pub range: DateRange,
    /// One lane per employee, top to bottom
    pub lanes: Vec<String>,
    pub bars: Vec<TimelineBar>,
    /// Saturday + Sunday shading, drawn beneath the bars
    pub weekend_bands: Vec<WeekendBand>,
    /// Daily axis ticks
    pub ticks: Vec<AxisTick>,
    /// Department colours in order of first appearance
    pub legend: Vec<LegendEntry>,
}

impl Timeline {
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Bars drawn in a given lane
    pub fn bars_in_lane(&self, lane: usize) -> impl Iterator<Item = &TimelineBar> {
        self.bars.iter().filter(move |b| b.lane == lane)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TimelineBar {
    /// Index into [`Timeline::lanes`]
    pub lane: usize,
    pub name: String,
    pub department: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub duration_days: u32,
    pub color: String,
}

/// Shaded weekend span `[start, end)`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct WeekendBand {
    /// The Saturday
    pub start: NaiveDate,
    /// The Monday after
    pub end: NaiveDate,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AxisTick {
    pub date: NaiveDate,
    /// `dd/mm`
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub department: String,
    pub color: String,
}
