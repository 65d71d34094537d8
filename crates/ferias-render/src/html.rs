//! HTML page shell
//!
//! Generates self-contained HTML pages with the SVG timeline embedded at
//! full width:
//! - the interactive dashboard (sidebar filters + chart or inline error)
//! - a standalone chart page for one-shot exports

use crate::dashboard::DashboardView;
use crate::{html_escape, SvgRenderer};
use ferias_core::{RenderError, Renderer, SortKey, Timeline};

/// Label of the "all employees" option
pub const ALL_EMPLOYEES: &str = "Todos";
/// Label of the "all departments" option
pub const ALL_DEPARTMENTS: &str = "Todas";

/// HTML dashboard renderer configuration
#[derive(Clone, Debug)]
pub struct HtmlDashboardRenderer {
    /// Page title, shown above the chart
    pub title: String,
    /// Chart renderer used for the embedded SVG
    pub chart: SvgRenderer,
    /// Submit the form whenever an input changes
    pub auto_submit: bool,
}

impl Default for HtmlDashboardRenderer {
    fn default() -> Self {
        Self {
            title: "Dashboard de Férias".into(),
            chart: SvgRenderer::default().full_width(),
            auto_submit: true,
        }
    }
}

impl HtmlDashboardRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Render the full dashboard for one interaction
    pub fn render_page(&self, view: &DashboardView) -> Result<String, RenderError> {
        let sidebar = self.render_sidebar(view);
        let main = match &view.outcome {
            Ok(timeline) => self.render_chart_section(timeline)?,
            // Validation failures abort the cycle: the message lives in the sidebar
            Err(_) => String::new(),
        };

        Ok(self.page(&format!(
            r#"    <div class="layout">
{sidebar}
        <main>
            <h1>{title}</h1>
{main}
        </main>
    </div>"#,
            sidebar = sidebar,
            title = html_escape(&self.title),
            main = main,
        )))
    }

    fn page(&self, body: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
{css}
    </style>
</head>
<body>
{body}
</body>
</html>"#,
            title = html_escape(&self.title),
            css = self.generate_css(),
            body = body,
        )
    }

    fn render_chart_section(&self, timeline: &Timeline) -> Result<String, RenderError> {
        let svg = self.chart.render(timeline)?;
        Ok(format!(
            r#"            <div class="chart-summary">{range} · {count} registro{plural}</div>
            <div class="chart">
{svg}
            </div>"#,
            range = timeline.range,
            count = timeline.bars.len(),
            plural = if timeline.bars.len() == 1 { "" } else { "s" },
            svg = svg,
        ))
    }

    fn render_sidebar(&self, view: &DashboardView) -> String {
        let onchange = if self.auto_submit {
            r#" onchange="this.form.submit()""#
        } else {
            ""
        };

        let employees = select_options(
            ALL_EMPLOYEES,
            &view.options.employees,
            view.inputs.employee.value(),
        );
        let departments = select_options(
            ALL_DEPARTMENTS,
            &view.options.departments,
            view.inputs.department.value(),
        );
        let sorts: String = SortKey::ALL
            .iter()
            .map(|k| {
                format!(
                    r#"<option value="{}"{}>{}</option>"#,
                    k.key(),
                    if *k == view.inputs.sort { " selected" } else { "" },
                    html_escape(k.label())
                )
            })
            .collect();

        let error = view
            .error()
            .map(|e| format!(r#"            <div class="error" role="alert">🚫 {}</div>"#, html_escape(&e.to_string())))
            .unwrap_or_default();

        let min = view.bounds.start().format("%Y-%m-%d");
        let max = view.bounds.end().format("%Y-%m-%d");

        format!(
            r#"        <aside class="sidebar">
            <h2>Filtros</h2>
            <form method="get" action="">
                <label for="employee">Colaborador</label>
                <select id="employee" name="employee"{onchange}>{employees}</select>
                <label for="department">Área</label>
                <select id="department" name="department"{onchange}>{departments}</select>
                <label for="start">Data inicial</label>
                <input type="date" id="start" name="start" value="{start}" min="{min}" max="{max}"{onchange}>
                <label for="end">Data final</label>
                <input type="date" id="end" name="end" value="{end}" min="{min}" max="{max}"{onchange}>
{error}
                <label for="sort">Ordenar eixo Y por</label>
                <select id="sort" name="sort"{onchange}>{sorts}</select>
                <noscript><button type="submit">Aplicar</button></noscript>
            </form>
            <p class="source">{total} registros carregados</p>
        </aside>"#,
            onchange = onchange,
            employees = employees,
            departments = departments,
            start = view.start.format("%Y-%m-%d"),
            end = view.end.format("%Y-%m-%d"),
            min = min,
            max = max,
            error = error,
            sorts = sorts,
            total = view.total_records,
        )
    }

    fn generate_css(&self) -> String {
        String::from(
            r#"        * { margin: 0; padding: 0; box-sizing: border-box; }
        body {
            font-family: system-ui, -apple-system, sans-serif;
            color: #2c3e50;
            background: #ffffff;
        }
        .layout {
            display: flex;
            min-height: 100vh;
        }
        .sidebar {
            width: 280px;
            flex-shrink: 0;
            padding: 24px 20px;
            background: #f0f2f6;
        }
        .sidebar h2 {
            font-size: 1.2rem;
            margin-bottom: 16px;
        }
        .sidebar label {
            display: block;
            font-size: 14px;
            margin: 14px 0 6px;
        }
        .sidebar select, .sidebar input {
            width: 100%;
            padding: 6px 8px;
            border: 1px solid rgba(128,128,128,0.4);
            border-radius: 4px;
            font-size: 14px;
            background: #ffffff;
        }
        .sidebar .error {
            margin-top: 14px;
            padding: 10px 12px;
            border-radius: 6px;
            background: #ffe9e9;
            color: #b00020;
            font-size: 14px;
        }
        .sidebar .source {
            margin-top: 24px;
            font-size: 12px;
            color: #6b7280;
        }
        main {
            flex: 1;
            min-width: 0;
            padding: 24px 32px;
        }
        main h1 {
            font-size: 2rem;
            font-weight: 700;
            margin-bottom: 16px;
        }
        .chart-summary {
            font-size: 13px;
            color: #6b7280;
            margin-bottom: 8px;
        }
        .chart {
            width: 100%;
        }
        .chart svg {
            display: block;
        }
        .vacation-bar:hover {
            opacity: 0.8;
        }"#,
        )
    }
}

impl Renderer for HtmlDashboardRenderer {
    type Output = String;

    /// Standalone page: title and chart, no filter sidebar
    fn render(&self, timeline: &Timeline) -> Result<String, RenderError> {
        let chart = self.render_chart_section(timeline)?;
        Ok(self.page(&format!(
            r#"    <main>
        <h1>{title}</h1>
{chart}
    </main>"#,
            title = html_escape(&self.title),
            chart = chart,
        )))
    }
}

/// `<option>` list headed by the "all" sentinel (empty value)
fn select_options(all_label: &str, values: &[String], selected: Option<&str>) -> String {
    let mut html = format!(
        r#"<option value=""{}>{}</option>"#,
        if selected.is_none() { " selected" } else { "" },
        all_label
    );
    for value in values {
        let escaped = html_escape(value);
        html.push_str(&format!(
            r#"<option value="{escaped}"{sel}>{escaped}</option>"#,
            escaped = escaped,
            sel = if selected == Some(value.as_str()) { " selected" } else { "" },
        ));
    }
    html
}
