//! HTTP dashboard
//!
//! Every GET of `/` is one render cycle: reload the sheet, resolve the query
//! string into filter inputs, build the view and return the page. Nothing is
//! kept between requests.

use crate::config::Settings;
use anyhow::Context;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use chrono::NaiveDate;
use ferias_core::{FilterInputs, Selection, SortKey};
use ferias_render::{html_escape, DashboardView, HtmlDashboardRenderer};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

#[derive(Clone)]
pub struct AppState {
    settings: Arc<Settings>,
    as_of: Option<NaiveDate>,
}

impl AppState {
    pub fn new(settings: Settings, as_of: Option<NaiveDate>) -> Self {
        Self {
            settings: Arc::new(settings),
            as_of,
        }
    }

    fn today(&self) -> NaiveDate {
        self.as_of
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

/// Form fields as submitted by the sidebar; all optional
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub employee: Option<String>,
    pub department: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub sort: Option<String>,
}

impl DashboardQuery {
    /// Lenient conversion: unparseable values fall back to their defaults
    pub fn to_inputs(&self) -> FilterInputs {
        FilterInputs {
            employee: Selection::from_input(self.employee.as_deref()),
            department: Selection::from_input(self.department.as_deref()),
            start: parse_query_date("start", self.start.as_deref()),
            end: parse_query_date("end", self.end.as_deref()),
            sort: match self.sort.as_deref().filter(|s| !s.is_empty()) {
                None => SortKey::default(),
                Some(s) => s.parse().unwrap_or_else(|e| {
                    warn!("{}", e);
                    SortKey::default()
                }),
            },
        }
    }
}

fn parse_query_date(field: &str, value: Option<&str>) -> Option<NaiveDate> {
    let value = value.map(str::trim).filter(|v| !v.is_empty())?;
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(e) => {
            warn!(field, value, "ignoring invalid date: {}", e);
            None
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard))
        .with_state(state)
}

async fn dashboard(State(state): State<AppState>, Query(query): Query<DashboardQuery>) -> Response {
    let inputs = query.to_inputs();
    debug!(?inputs, "dashboard request");
    let today = state.today();
    let settings = Arc::clone(&state.settings);

    let result = tokio::task::spawn_blocking(move || -> anyhow::Result<String> {
        let roster = settings
            .load()
            .with_context(|| format!("failed to load {}", settings.data.display()))?;
        let view = DashboardView::build(&roster, inputs, today, &settings.palette);
        let page = HtmlDashboardRenderer::new()
            .title(settings.title.clone())
            .render_page(&view)?;
        Ok(page)
    })
    .await;

    match result {
        Ok(Ok(page)) => Html(page).into_response(),
        Ok(Err(e)) => {
            error!("{:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Html(error_page(&format!("{:#}", e)))).into_response()
        }
        Err(e) => {
            error!("render task failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Html(error_page("render task failed"))).into_response()
        }
    }
}

fn error_page(message: &str) -> String {
    let escaped = html_escape(message);
    format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head><meta charset="UTF-8"><title>Erro</title></head>
<body><p role="alert">🚫 {escaped}</p></body>
</html>"#
    )
}

pub async fn serve(state: AppState, bind: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to bind {}", bind))?;
    info!(address = %listener.local_addr()?, "dashboard listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FileConfig;
    use axum::body::Body;
    use axum::http::Request;
    use pretty_assertions::assert_eq;
    use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
    use std::path::Path;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn write_sheet(path: &Path) {
        let rows: [(&str, &str, (u16, u8, u8), f64); 3] = [
            ("Bob", "MB", (2024, 3, 4), 5.0),
            ("Alice", "RH", (2024, 3, 6), 3.0),
            ("Carol", "MB", (2024, 3, 20), 10.0),
        ];
        let mut workbook = Workbook::new();
        let format = Format::new().set_num_format("yyyy-mm-dd");
        let sheet = workbook.add_worksheet();
        for (col, header) in ["Nome", "Area", "Inicio_Ferias", "Dias"].iter().enumerate() {
            sheet.write_string(0, col as u16, *header).unwrap();
        }
        for (i, (name, dept, (y, m, d), days)) in rows.iter().enumerate() {
            let row = i as u32 + 1;
            sheet.write_string(row, 0, *name).unwrap();
            sheet.write_string(row, 1, *dept).unwrap();
            let when = ExcelDateTime::from_ymd(*y, *m, *d).unwrap();
            sheet.write_datetime_with_format(row, 2, &when, &format).unwrap();
            sheet.write_number(row, 3, *days).unwrap();
        }
        workbook.save(path).unwrap();
    }

    fn state_for(path: &Path) -> AppState {
        let settings = Settings::resolve(&FileConfig::default(), Some(path.to_path_buf()), None);
        AppState::new(settings, Some(date(2024, 3, 5)))
    }

    async fn get_page(state: AppState, uri: &str) -> (StatusCode, String) {
        let response = router(state)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[test]
    fn query_maps_to_inputs() {
        let query = DashboardQuery {
            employee: Some("Bob".into()),
            department: Some(String::new()),
            start: Some("2024-03-01".into()),
            end: Some("not-a-date".into()),
            sort: Some("department".into()),
        };
        let inputs = query.to_inputs();
        assert_eq!(inputs.employee, Selection::Only("Bob".into()));
        assert_eq!(inputs.department, Selection::All);
        assert_eq!(inputs.start, Some(date(2024, 3, 1)));
        assert_eq!(inputs.end, None);
        assert_eq!(inputs.sort, SortKey::ByDepartmentThenStartDate);
    }

    #[test]
    fn empty_query_is_default_inputs() {
        assert_eq!(DashboardQuery::default().to_inputs(), FilterInputs::default());
    }

    #[test]
    fn unknown_sort_falls_back_to_start_date() {
        let query = DashboardQuery {
            sort: Some("salary".into()),
            ..DashboardQuery::default()
        };
        assert_eq!(query.to_inputs().sort, SortKey::ByStartDate);
    }

    #[test]
    fn error_page_escapes_message() {
        let page = error_page("failed to load <dados & \"ferias\">.xlsx");
        assert!(page.contains("failed to load &lt;dados &amp; &quot;ferias&quot;&gt;.xlsx"));
        assert!(!page.contains("<dados"));
    }

    #[tokio::test]
    async fn dashboard_renders_chart() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ferias.xlsx");
        write_sheet(&path);

        let (status, body) = get_page(state_for(&path), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<h2>Filtros</h2>"));
        assert!(body.contains("<svg"));
        assert!(body.contains(r#"<option value="Alice">Alice</option>"#));
    }

    #[tokio::test]
    async fn reversed_dates_show_error_without_chart() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ferias.xlsx");
        write_sheet(&path);

        let (status, body) = get_page(state_for(&path), "/?start=2024-03-20&end=2024-03-05").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("A data final não pode ser anterior à data inicial!"));
        assert!(!body.contains("<svg"));
    }

    #[tokio::test]
    async fn reversed_dates_outside_the_data_show_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ferias.xlsx");
        write_sheet(&path);

        let (status, body) = get_page(state_for(&path), "/?start=2024-02-01&end=2024-01-01").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("A data final não pode ser anterior à data inicial!"));
        assert!(!body.contains("<svg"));
    }

    #[tokio::test]
    async fn sheet_is_reloaded_per_request() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ferias.xlsx");
        write_sheet(&path);
        let state = state_for(&path);

        let (status, _) = get_page(state.clone(), "/").await;
        assert_eq!(status, StatusCode::OK);

        std::fs::remove_file(&path).unwrap();
        let (status, body) = get_page(state, "/").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.contains("File not found"));
    }
}
