use trade_dashboard::domain::chart::{ChartKind, Mark, ViewId};
use trade_dashboard::domain::trade::TradeSnapshot;
use trade_dashboard::{DashboardError, ViewRegistry};

const FIXTURE: &str = include_str!("fixtures/dashboard_data.json");

fn fixture() -> TradeSnapshot {
    TradeSnapshot::from_json_str(FIXTURE).unwrap()
}

#[test]
fn every_panel_id_resolves() {
    let registry = ViewRegistry::default();
    let snapshot = fixture();
    for view in ViewId::all() {
        let by_panel = registry.render(&snapshot, view.panel_id()).unwrap();
        let by_key = registry.render(&snapshot, view.dataset_key()).unwrap();
        assert_eq!(by_panel, by_key);
        assert_eq!(by_panel.kind, view.chart_kind());
    }
}

#[test]
fn unknown_panel_is_an_error() {
    let err = ViewRegistry::default().render(&fixture(), "germany-summary").unwrap_err();
    assert!(matches!(err, DashboardError::UnknownView(id) if id == "germany-summary"));
}

#[test]
fn fixture_renders_everything_but_russia() {
    let rendered = ViewRegistry::default().render_all(&fixture());
    let views: Vec<ViewId> = rendered.iter().map(|(view, _)| *view).collect();
    assert_eq!(views, ViewId::all().collect::<Vec<_>>());

    for (view, result) in rendered {
        let descriptor = result.unwrap();
        assert_eq!(descriptor.is_empty, view == ViewId::RussiaTradeDynamics, "{view}");
    }
}

#[test]
fn sectors_render_as_two_donuts() {
    let descriptor = ViewRegistry::default().render(&fixture(), "economic-sectors-chart").unwrap();
    assert_eq!(descriptor.kind, ChartKind::DualDonut);
    assert_eq!(descriptor.series.len(), 2);
    assert!(descriptor.series.iter().all(|s| s.mark == Mark::Pie && s.hole == Some(0.4)));

    let export = descriptor.series_named("Экспорт").unwrap();
    assert_eq!(export.texts()[0], "40.0%");
    assert_eq!(export.hover()[3], "Добыча полезных ископаемых и энергетика<br>10.0%");
}

#[test]
fn geography_drops_unknown_region_after_shares() {
    let descriptor = ViewRegistry::default().render(&fixture(), "trade_geography").unwrap();
    let export = descriptor.series_named("Экспорт").unwrap();
    assert_eq!(export.len(), 4);
    assert_eq!(export.texts()[0], "58.3%");
    assert_eq!(export.hover()[0], "Европа<br>Экспорт: 70.0 млрд USD<br>Доля: 58.3%");

    let shown: f64 = export.values().iter().sum();
    assert!(shown < 99.5);
    let import = descriptor.series_named("Импорт").unwrap();
    assert_eq!(import.texts()[0], "71.4%");
}

#[test]
fn corrupt_record_propagates_with_index() {
    let snapshot = TradeSnapshot::from_json_str(
        r#"{"economic_sectors": [{"sector": "Лес", "X": 1, "M": 1}, {"sector": "Металлы", "X": -5, "M": 1}]}"#,
    )
    .unwrap();
    let err = ViewRegistry::default().render(&snapshot, "economic_sectors").unwrap_err();
    assert!(err.to_string().contains("record #1 of 'economic_sectors'"), "{err}");
}

#[test]
fn broken_view_fails_only_its_panel() {
    let snapshot = TradeSnapshot::from_json_str(
        r#"{"generated_at": "2024-05-01", "trade_dynamics": 5, "russia_trade_dynamics": [{"year": 2022, "X": 3e8, "M": 1e8}]}"#,
    )
    .unwrap();
    let rendered = ViewRegistry::default().render_all(&snapshot);

    for (view, result) in rendered {
        match view {
            ViewId::TradeDynamics => {
                let err = result.unwrap_err();
                assert!(err.to_string().contains("'trade_dynamics'"), "{err}");
            }
            ViewId::RussiaTradeDynamics => assert!(!result.unwrap().is_empty),
            _ => assert!(result.unwrap().is_empty, "{view}"),
        }
    }
}
