//! # ferias-render
//!
//! Timeline building and rendering backends for the vacation dashboard.
//!
//! This crate provides:
//! - `build_timeline`: filtered records → lanes, bars, weekend bands, ticks
//! - `DepartmentPalette`: department colour lookup
//! - SVG timeline rendering
//! - HTML dashboard page (sidebar filters + embedded chart)
//! - Text listing for terminals
//!
//! ## Example
//!
//! ```rust,ignore
//! use ferias_core::Renderer;
//! use ferias_render::{build_timeline, DepartmentPalette, SvgRenderer};
//!
//! let view = criteria.apply(roster.records());
//! let timeline = build_timeline(&view, criteria.range, &DepartmentPalette::new());
//! let svg = SvgRenderer::default().render(&timeline)?;
//! ```

pub mod dashboard;
pub mod html;
pub mod palette;
pub mod timeline;

pub use dashboard::DashboardView;
pub use html::HtmlDashboardRenderer;
pub use palette::DepartmentPalette;
pub use timeline::{build_timeline, daily_ticks, weekend_bands};

use chrono::NaiveDate;
use ferias_core::{RenderError, Renderer, Timeline, TimelineBar};
use svg::node::element::{Element, Group, Line, Rectangle, Text};
use svg::node::Node;
use svg::Document;

/// Narrowest bar drawn, in pixels
const MIN_BAR_WIDTH: f64 = 2.0;

/// SVG timeline renderer configuration
#[derive(Clone, Debug)]
pub struct SvgRenderer {
    /// Width of the chart area (excluding labels) in pixels
    pub chart_width: u32,
    /// Height per employee lane in pixels
    pub row_height: u32,
    /// Width of the name column in pixels
    pub label_width: u32,
    /// Header height in pixels, room for the rotated date labels
    pub header_height: u32,
    /// Padding around the chart
    pub padding: u32,
    /// Emit `width="100%"` so the chart fills its container
    pub full_width: bool,
    /// Background color
    pub background_color: String,
    /// Grid line color
    pub grid_color: String,
    /// Weekend band fill
    pub weekend_color: String,
    /// Weekend band opacity
    pub weekend_opacity: f64,
    /// Text color
    pub text_color: String,
    /// Font family
    pub font_family: String,
    /// Font size in pixels
    pub font_size: u32,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            chart_width: 1100,
            row_height: 28,
            label_width: 160,
            header_height: 56,
            padding: 20,
            full_width: false,
            background_color: "#ffffff".into(),
            grid_color: "#d3d3d3".into(),
            weekend_color: "#add8e6".into(),
            weekend_opacity: 0.2,
            text_color: "#2c3e50".into(),
            font_family: "system-ui, -apple-system, sans-serif".into(),
            font_size: 12,
        }
    }
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure chart width
    pub fn chart_width(mut self, width: u32) -> Self {
        self.chart_width = width;
        self
    }

    /// Configure row height
    pub fn row_height(mut self, height: u32) -> Self {
        self.row_height = height;
        self
    }

    /// Scale to the width of the embedding element
    pub fn full_width(mut self) -> Self {
        self.full_width = true;
        self
    }

    fn total_width(&self) -> u32 {
        self.padding * 2 + self.label_width + self.chart_width
    }

    /// Lanes drawn; an empty chart keeps one blank row
    fn row_count(timeline: &Timeline) -> u32 {
        timeline.lanes.len().max(1) as u32
    }

    fn chart_top(&self) -> u32 {
        self.padding + self.header_height
    }

    fn chart_bottom(&self, rows: u32) -> u32 {
        self.chart_top() + rows * self.row_height
    }

    /// Whole days on the axis; the right edge is the end of the last day
    fn axis_days(timeline: &Timeline) -> i64 {
        timeline.range.span_days() + 1
    }

    fn pixels_per_day(&self, timeline: &Timeline) -> f64 {
        self.chart_width as f64 / Self::axis_days(timeline) as f64
    }

    /// X position of a date, clipped to the visible axis
    fn date_to_x(&self, date: NaiveDate, timeline: &Timeline, px_per_day: f64) -> f64 {
        let days = (date - timeline.range.start())
            .num_days()
            .clamp(0, Self::axis_days(timeline)) as f64;
        self.padding as f64 + self.label_width as f64 + days * px_per_day
    }

    /// Saturday/Sunday shading beneath everything else
    fn render_weekends(&self, timeline: &Timeline, rows: u32, px_per_day: f64) -> Group {
        let mut group = Group::new().set("class", "weekends");
        let top = self.chart_top();
        let bottom = self.chart_bottom(rows);

        for band in &timeline.weekend_bands {
            let x0 = self.date_to_x(band.start, timeline, px_per_day);
            let x1 = self.date_to_x(band.end, timeline, px_per_day);
            if x1 <= x0 {
                continue;
            }
            let rect = Rectangle::new()
                .set("x", x0)
                .set("y", top)
                .set("width", x1 - x0)
                .set("height", bottom - top)
                .set("fill", self.weekend_color.as_str())
                .set("fill-opacity", self.weekend_opacity)
                .set("stroke", "none");
            group = group.add(rect);
        }
        group
    }

    /// Daily vertical lines, one horizontal line per lane boundary
    fn render_grid(&self, timeline: &Timeline, rows: u32, px_per_day: f64) -> Group {
        let mut group = Group::new().set("class", "grid");
        let top = self.chart_top();
        let bottom = self.chart_bottom(rows);

        for i in 0..=rows {
            let y = top + i * self.row_height;
            let line = Line::new()
                .set("x1", self.padding)
                .set("y1", y)
                .set("x2", self.total_width() - self.padding)
                .set("y2", y)
                .set("stroke", self.grid_color.as_str())
                .set("stroke-width", 0.5);
            group = group.add(line);
        }

        for tick in &timeline.ticks {
            let x = self.date_to_x(tick.date, timeline, px_per_day);
            let line = Line::new()
                .set("x1", x)
                .set("y1", top)
                .set("x2", x)
                .set("y2", bottom)
                .set("stroke", self.grid_color.as_str())
                .set("stroke-width", 0.5);
            group = group.add(line);
        }
        group
    }

    /// Date labels rotated 90 degrees above the chart area
    fn render_header(&self, timeline: &Timeline, px_per_day: f64) -> Group {
        let mut group = Group::new().set("class", "header");
        let y = self.chart_top() - 6;

        for tick in &timeline.ticks {
            let x = self.date_to_x(tick.date, timeline, px_per_day);
            let label = Text::new(tick.label.as_str())
                .set("x", x)
                .set("y", y)
                .set("font-family", self.font_family.as_str())
                .set("font-size", self.font_size - 2)
                .set("fill", self.text_color.as_str())
                .set("text-anchor", "start")
                .set("dominant-baseline", "middle")
                .set("transform", format!("rotate(-90 {x} {y})"));
            group = group.add(label);
        }
        group
    }

    fn render_lane_labels(&self, timeline: &Timeline) -> Group {
        let mut group = Group::new().set("class", "lanes");
        let max_chars = (self.label_width.saturating_sub(16) / 7).max(6) as usize;

        for (row, name) in timeline.lanes.iter().enumerate() {
            let y = self.chart_top() + row as u32 * self.row_height + self.row_height / 2 + 4;
            let label = Text::new(truncate(name, max_chars))
                .set("x", self.padding + 8)
                .set("y", y)
                .set("font-family", self.font_family.as_str())
                .set("font-size", self.font_size)
                .set("fill", self.text_color.as_str());
            group = group.add(label);
        }
        group
    }

    fn render_bar(&self, bar: &TimelineBar, timeline: &Timeline, px_per_day: f64) -> Rectangle {
        let mut x_start = self.date_to_x(bar.start, timeline, px_per_day);
        let mut x_end = self.date_to_x(bar.end, timeline, px_per_day);
        // A selected bar that only touches the window edge keeps a sliver
        if x_end - x_start < MIN_BAR_WIDTH {
            let axis_end = (self.padding + self.label_width + self.chart_width) as f64;
            x_end = (x_start + MIN_BAR_WIDTH).min(axis_end);
            x_start = x_end - MIN_BAR_WIDTH;
        }

        let lane_top = self.chart_top() + bar.lane as u32 * self.row_height;
        let bar_height = (self.row_height as f64 * 0.6) as u32;
        let bar_y = lane_top + (self.row_height - bar_height) / 2;

        let mut tooltip = Element::new("title");
        tooltip.append(svg::node::Text::new(format!(
            "{}\nÁrea: {}\nInício: {}\nFim: {}\nDias: {}",
            bar.name,
            bar.department,
            bar.start.format("%d/%m/%Y"),
            bar.end.format("%d/%m/%Y"),
            bar.duration_days
        )));

        Rectangle::new()
            .set("x", x_start)
            .set("y", bar_y)
            .set("width", x_end - x_start)
            .set("height", bar_height)
            .set("rx", 2)
            .set("ry", 2)
            .set("fill", bar.color.as_str())
            .set("class", "vacation-bar")
            .set("data-department", bar.department.as_str())
            .add(tooltip)
    }

    /// Department legend under the chart
    fn render_legend(&self, timeline: &Timeline, y_offset: u32) -> Group {
        let mut group = Group::new().set("class", "legend");
        let y = y_offset as f64 + 15.0;
        let box_size = 12.0;
        let mut x = self.padding as f64;

        let title = Text::new("Área")
            .set("x", x)
            .set("y", y)
            .set("font-family", self.font_family.as_str())
            .set("font-size", self.font_size)
            .set("font-weight", "bold")
            .set("fill", self.text_color.as_str());
        group = group.add(title);
        x += 48.0;

        for entry in &timeline.legend {
            let swatch = Rectangle::new()
                .set("x", x)
                .set("y", y - box_size + 2.0)
                .set("width", box_size)
                .set("height", box_size)
                .set("rx", 2)
                .set("fill", entry.color.as_str());
            group = group.add(swatch);

            let label = Text::new(entry.department.as_str())
                .set("x", x + box_size + 5.0)
                .set("y", y)
                .set("font-family", self.font_family.as_str())
                .set("font-size", self.font_size - 1)
                .set("fill", self.text_color.as_str());
            group = group.add(label);

            // ~7px per character plus swatch and gap
            x += box_size + 20.0 + entry.department.chars().count() as f64 * 7.0;
        }
        group
    }
}

impl Renderer for SvgRenderer {
    type Output = String;

    fn render(&self, timeline: &Timeline) -> Result<String, RenderError> {
        let rows = Self::row_count(timeline);
        let px_per_day = self.pixels_per_day(timeline);

        let width = self.total_width();
        let legend_y = self.chart_bottom(rows) + 10;
        let height = legend_y + 30;

        let mut document = Document::new()
            .set("viewBox", (0, 0, width, height))
            .set("xmlns", "http://www.w3.org/2000/svg");
        document = if self.full_width {
            document.set("width", "100%")
        } else {
            document.set("width", width).set("height", height)
        };

        let background = Rectangle::new()
            .set("width", "100%")
            .set("height", "100%")
            .set("fill", self.background_color.as_str());
        document = document.add(background);

        document = document.add(self.render_weekends(timeline, rows, px_per_day));
        document = document.add(self.render_grid(timeline, rows, px_per_day));
        document = document.add(self.render_header(timeline, px_per_day));
        document = document.add(self.render_lane_labels(timeline));

        let mut bars = Group::new().set("class", "bars");
        for bar in &timeline.bars {
            bars = bars.add(self.render_bar(bar, timeline, px_per_day));
        }
        document = document.add(bars);

        if timeline.is_empty() {
            let note = Text::new("Nenhuma férias no período selecionado")
                .set("x", self.padding + self.label_width + self.chart_width / 2)
                .set("y", self.chart_top() + self.row_height / 2 + 4)
                .set("font-family", self.font_family.as_str())
                .set("font-size", self.font_size)
                .set("fill", self.text_color.as_str())
                .set("text-anchor", "middle");
            document = document.add(note);
        }

        document = document.add(self.render_legend(timeline, legend_y));

        let mut output = Vec::new();
        svg::write(&mut output, &document)
            .map_err(|e| RenderError::Format(format!("Failed to write SVG: {}", e)))?;

        String::from_utf8(output).map_err(|e| RenderError::Format(format!("Invalid UTF-8: {}", e)))
    }
}

/// Plain text listing for terminals
#[derive(Clone, Debug, Default)]
pub struct TextRenderer;

impl Renderer for TextRenderer {
    type Output = String;

    fn render(&self, timeline: &Timeline) -> Result<String, RenderError> {
        let mut out = format!(
            "Férias {} ({} registro{})\n",
            timeline.range,
            timeline.bars.len(),
            if timeline.bars.len() == 1 { "" } else { "s" }
        );
        if timeline.is_empty() {
            out.push_str("Nenhuma férias no período selecionado\n");
            return Ok(out);
        }

        let name_width = timeline
            .lanes
            .iter()
            .map(|n| n.chars().count())
            .max()
            .unwrap_or(0);
        let dept_width = timeline
            .legend
            .iter()
            .map(|e| e.department.chars().count())
            .max()
            .unwrap_or(0);

        for (lane, name) in timeline.lanes.iter().enumerate() {
            for bar in timeline.bars_in_lane(lane) {
                out.push_str(&format!(
                    "{:<nw$}  {:<dw$}  {} → {}  ({} dias)\n",
                    name,
                    bar.department,
                    bar.start.format("%d/%m/%Y"),
                    bar.end.format("%d/%m/%Y"),
                    bar.duration_days,
                    nw = name_width,
                    dw = dept_width,
                ));
            }
        }
        Ok(out)
    }
}

/// Truncate a string with ellipsis
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        format!(
            "{}…",
            s.chars().take(max.saturating_sub(1)).collect::<String>()
        )
    }
}

/// HTML-escape a string
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferias_core::{DateRange, VacationRecord};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn sample_timeline() -> Timeline {
        let records = vec![
            VacationRecord::new("Ana", "MB", date(2024, 3, 4), 5),
            VacationRecord::new("Rui", "Logística", date(2024, 2, 20), 30),
        ];
        let refs: Vec<&VacationRecord> = records.iter().collect();
        build_timeline(
            &refs,
            DateRange::new(date(2024, 3, 1), date(2024, 3, 10)).unwrap(),
            &DepartmentPalette::new(),
        )
    }

    #[test]
    fn svg_renderer_creation() {
        let renderer = SvgRenderer::new().chart_width(600).row_height(20);
        assert_eq!(renderer.chart_width, 600);
        assert_eq!(renderer.row_height, 20);
        assert_eq!(renderer.total_width(), 600 + 160 + 40);
    }

    #[test]
    fn svg_contains_bars_lanes_and_ticks() {
        let svg = SvgRenderer::default().render(&sample_timeline()).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("#2E86AB"));
        assert!(svg.contains("Ana"));
        assert!(svg.contains("Rui"));
        assert!(svg.contains("01/03"));
        assert!(svg.contains("10/03"));
        assert!(svg.contains("rotate(-90"));
        assert_eq!(svg.matches("class=\"vacation-bar\"").count(), 2);
    }

    #[test]
    fn svg_weekend_bands_are_faint_and_borderless() {
        let svg = SvgRenderer::default().render(&sample_timeline()).unwrap();
        assert!(svg.contains("class=\"weekends\""));
        assert_eq!(svg.matches("fill-opacity=\"0.2\"").count(), 2);
        assert!(svg.contains("stroke=\"none\""));
    }

    #[test]
    fn svg_bars_are_clipped_to_axis() {
        let renderer = SvgRenderer::default();
        let timeline = sample_timeline();
        let px = renderer.pixels_per_day(&timeline);
        // Rui starts before the window: clipped to the axis start
        let left = renderer.date_to_x(date(2024, 2, 20), &timeline, px);
        assert_eq!(left, (renderer.padding + renderer.label_width) as f64);
        let right = renderer.date_to_x(date(2024, 4, 1), &timeline, px);
        let axis_end = (renderer.padding + renderer.label_width + renderer.chart_width) as f64;
        assert!((right - axis_end).abs() < 1e-9);
    }

    #[test]
    fn single_day_window_still_draws_bars() {
        let records = vec![
            // Ends on the window day itself
            VacationRecord::new("Ana", "MB", date(2024, 3, 1), 10),
            VacationRecord::new("Rui", "MA", date(2024, 3, 10), 5),
        ];
        let refs: Vec<&VacationRecord> = records.iter().collect();
        let day = date(2024, 3, 11);
        let timeline = build_timeline(
            &refs,
            DateRange::new(day, day).unwrap(),
            &DepartmentPalette::new(),
        );
        let renderer = SvgRenderer::default();
        let px = renderer.pixels_per_day(&timeline);
        assert_eq!(px, renderer.chart_width as f64);

        let svg = renderer.render(&timeline).unwrap();
        assert_eq!(svg.matches("class=\"vacation-bar\"").count(), 2);
        assert!(svg.contains("11/03"));
        assert!(svg.contains(&format!("width=\"{}\"", MIN_BAR_WIDTH)));
    }

    #[test]
    fn last_day_of_window_has_width() {
        let renderer = SvgRenderer::default();
        let timeline = sample_timeline();
        let px = renderer.pixels_per_day(&timeline);
        assert!((px - renderer.chart_width as f64 / 10.0).abs() < 1e-9);
        let last = renderer.date_to_x(date(2024, 3, 10), &timeline, px);
        let after = renderer.date_to_x(date(2024, 3, 11), &timeline, px);
        assert!((after - last - px).abs() < 1e-9);
    }

    #[test]
    fn svg_full_width_mode() {
        let svg = SvgRenderer::new()
            .full_width()
            .render(&sample_timeline())
            .unwrap();
        assert!(svg.contains("width=\"100%\""));
    }

    #[test]
    fn svg_empty_timeline_renders_note() {
        let timeline = build_timeline(
            &[],
            DateRange::new(date(2024, 3, 1), date(2024, 3, 10)).unwrap(),
            &DepartmentPalette::new(),
        );
        let svg = SvgRenderer::default().render(&timeline).unwrap();
        assert!(svg.contains("Nenhuma férias"));
        assert!(!svg.contains("vacation-bar"));
    }

    #[test]
    fn text_renderer_lists_bars_in_lane_order() {
        let text = TextRenderer.render(&sample_timeline()).unwrap();
        assert!(text.starts_with("Férias 01/03/2024 – 10/03/2024 (2 registros)"));
        let ana = text.find("Ana").unwrap();
        let rui = text.find("Rui").unwrap();
        assert!(ana < rui);
        assert!(text.contains("04/03/2024 → 09/03/2024  (5 dias)"));
    }

    #[test]
    fn html_escape_works() {
        assert_eq!(html_escape("<a & \"b\">"), "&lt;a &amp; &quot;b&quot;&gt;");
    }

    #[test]
    fn truncate_works() {
        assert_eq!(truncate("Maria", 10), "Maria");
        assert_eq!(truncate("Maria Aparecida", 6), "Maria…");
    }
}
