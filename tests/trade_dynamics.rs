use trade_dashboard::domain::chart::{AxisRef, Category, ChartKind, ViewId};
use trade_dashboard::domain::trade::TradeSnapshot;
use trade_dashboard::{ViewFilter, ViewRegistry};

fn two_years() -> TradeSnapshot {
    TradeSnapshot::from_json_str(
        r#"{"trade_dynamics": [
            {"year": 2023, "X": 120e9, "M": 70e9},
            {"year": 2021, "X": 100e9, "M": 80e9}
        ]}"#,
    )
    .unwrap()
}

#[test]
fn export_and_balance_in_billions() {
    let descriptor = ViewRegistry::default().render(&two_years(), "trade_dynamics").unwrap();
    assert_eq!(descriptor.kind, ChartKind::DualAxisTimeSeries);
    assert!(!descriptor.is_empty);

    let export = descriptor.series_named("Экспорт").unwrap();
    assert_eq!(export.categories(), &[Category::Year(2021), Category::Year(2023)]);
    assert_eq!(export.values(), &[100.0, 120.0]);
    assert_eq!(export.texts()[0], "100.0 млрд USD");
    assert_eq!(export.hover()[0], "Год: 2021<br>Экспорт: 100.0 млрд USD");

    let balance = descriptor.series_named("Сальдо").unwrap();
    assert_eq!(balance.values(), &[20.0, 50.0]);
    assert_eq!(balance.texts(), &["20.0 млрд USD".to_string(), "50.0 млрд USD".to_string()]);
    assert_eq!(balance.axis, AxisRef::Secondary);
}

#[test]
fn dual_axis_titles_carry_unit() {
    let descriptor = ViewRegistry::default().render(&two_years(), "trade-dynamics-chart").unwrap();
    assert_eq!(descriptor.view, ViewId::TradeDynamics);
    assert_eq!(descriptor.y_axis.title.as_deref(), Some("Объём торговли (млрд USD)"));
    let y2 = descriptor.y2_axis.expect("secondary axis");
    assert_eq!(y2.title.as_deref(), Some("Торговое сальдо (млрд USD)"));
}

#[test]
fn stored_balance_that_disagrees_is_rejected() {
    let snapshot = TradeSnapshot::from_json_str(
        r#"{"trade_dynamics": [{"year": 2021, "X": 100e9, "M": 80e9, "balance": 35e9}]}"#,
    )
    .unwrap();
    assert!(ViewRegistry::default().render(&snapshot, "trade_dynamics").is_err());
}

#[test]
fn year_range_outside_data_gives_empty_state() {
    let descriptor = ViewRegistry::default()
        .render_with(&two_years(), "trade_dynamics", &ViewFilter::years(2010, 2015))
        .unwrap();
    assert!(descriptor.is_empty);
    assert!(descriptor.series.is_empty());
}

#[test]
fn descriptor_serialises_for_the_shell() {
    let descriptor = ViewRegistry::default().render(&two_years(), "trade_dynamics").unwrap();
    let json: serde_json::Value = serde_json::from_str(&descriptor.to_json().unwrap()).unwrap();
    assert_eq!(json["view"], "trade_dynamics");
    assert_eq!(json["kind"], "dual_axis_time_series");
    assert_eq!(json["series"][0]["categories"][1], 2023);
    assert_eq!(json["series"][0]["colors"], "#27ae60");
    assert_eq!(json["series"][2]["axis"], "secondary");
}
