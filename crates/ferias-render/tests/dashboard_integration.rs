//! Integration tests for the dashboard pipeline: roster → inputs → page

use chrono::NaiveDate;
use ferias_core::{FilterInputs, Renderer, Roster, Selection, SortKey, VacationRecord};
use ferias_render::{DashboardView, DepartmentPalette, HtmlDashboardRenderer, SvgRenderer, TextRenderer};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn team() -> Roster {
    Roster::new(vec![
        VacationRecord::new("Marta Sousa", "RH", date(2024, 7, 1), 15),
        VacationRecord::new("João Pires", "MB", date(2024, 7, 8), 10),
        VacationRecord::new("Beatriz Lopes", "MEC", date(2024, 6, 24), 5),
        VacationRecord::new("Tiago Alves", "Comercial", date(2024, 8, 5), 20),
        VacationRecord::new("Inês Costa", "Financeiro", date(2024, 7, 15), 7),
        VacationRecord::new("Marta Sousa", "RH", date(2024, 12, 23), 5),
    ])
    .unwrap()
}

#[test]
fn summer_window_renders_every_overlapping_vacation() {
    let roster = team();
    let inputs = FilterInputs {
        start: Some(date(2024, 7, 1)),
        end: Some(date(2024, 7, 31)),
        ..FilterInputs::default()
    };
    let view = DashboardView::build(&roster, inputs, date(2024, 7, 10), &DepartmentPalette::new());
    let timeline = view.timeline().unwrap();

    assert_eq!(
        timeline.lanes,
        vec!["Marta Sousa", "João Pires", "Inês Costa"]
    );
    assert_eq!(timeline.ticks.len(), 31);
    // Saturdays of July 2024: 6, 13, 20, 27
    assert_eq!(timeline.weekend_bands.len(), 4);

    let html = HtmlDashboardRenderer::new().render_page(&view).unwrap();
    for name in ["Marta Sousa", "João Pires", "Inês Costa"] {
        assert!(html.contains(name), "missing {name}");
    }
    // Fixed colours for known departments, fallback sequence for the rest
    assert!(html.contains("#2E86AB"));
    assert!(html.contains("#16A085"));
    assert!(html.contains("#636EFA"));
}

#[test]
fn employee_filter_keeps_both_vacations_in_one_lane() {
    let roster = team();
    let inputs = FilterInputs {
        employee: Selection::Only("Marta Sousa".into()),
        start: Some(date(2024, 6, 1)),
        end: Some(date(2024, 12, 31)),
        ..FilterInputs::default()
    };
    let view = DashboardView::build(&roster, inputs, date(2024, 7, 10), &DepartmentPalette::new());
    let timeline = view.timeline().unwrap();

    assert_eq!(timeline.lanes, vec!["Marta Sousa"]);
    assert_eq!(timeline.bars_in_lane(0).count(), 2);

    let text = TextRenderer.render(timeline).unwrap();
    assert!(text.contains("01/07/2024 → 16/07/2024"));
    assert!(text.contains("23/12/2024 → 28/12/2024"));
}

#[test]
fn department_sort_groups_lanes() {
    let roster = team();
    let inputs = FilterInputs {
        start: Some(date(2024, 6, 24)),
        end: Some(date(2024, 8, 31)),
        sort: SortKey::ByDepartmentThenStartDate,
        ..FilterInputs::default()
    };
    let view = DashboardView::build(&roster, inputs, date(2024, 7, 10), &DepartmentPalette::new());
    assert_eq!(
        view.timeline().unwrap().lanes,
        vec!["Tiago Alves", "Inês Costa", "João Pires", "Beatriz Lopes", "Marta Sousa"]
    );
}

#[test]
fn quiet_window_renders_empty_chart() {
    let roster = team();
    let inputs = FilterInputs {
        start: Some(date(2024, 9, 1)),
        end: Some(date(2024, 9, 30)),
        ..FilterInputs::default()
    };
    let view = DashboardView::build(&roster, inputs, date(2024, 9, 10), &DepartmentPalette::new());
    let timeline = view.timeline().unwrap();
    assert!(timeline.is_empty());

    let svg = SvgRenderer::new().render(timeline).unwrap();
    assert!(svg.contains("Nenhuma férias no período selecionado"));
}
