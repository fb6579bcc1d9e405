use trade_dashboard::domain::chart::{Category, Color, Orientation, SeriesColors};
use trade_dashboard::domain::trade::TradeSnapshot;
use trade_dashboard::{DashboardConfig, ViewRegistry};

const FIXTURE: &str = include_str!("fixtures/dashboard_data.json");

fn fixture() -> TradeSnapshot {
    TradeSnapshot::from_json_str(FIXTURE).unwrap()
}

fn labels(categories: &[Category]) -> Vec<String> {
    categories
        .iter()
        .map(|c| match c {
            Category::Label(label) => label.clone(),
            Category::Year(year) => year.to_string(),
        })
        .collect()
}

#[test]
fn single_growth_record() {
    let snapshot = TradeSnapshot::from_json_str(
        r#"{"export_growth": [{"commodity_name": "Машины и оборудование", "value_baseline": 5e9, "value_latest": 8e9}]}"#,
    )
    .unwrap();
    let descriptor = ViewRegistry::default().render(&snapshot, "export_growth").unwrap();
    let series = &descriptor.series[0];
    assert_eq!(series.values(), &[3.0]);
    assert_eq!(series.texts()[0], "+3.0 млрд USD");
    assert_eq!(series.hover()[0], "Машины и оборудование<br>Прирост: +3.0 млрд USD");
}

#[test]
fn growth_only_counts_qualifying_records() {
    let descriptor = ViewRegistry::default().render(&fixture(), "top-growth-export-chart").unwrap();
    assert_eq!(descriptor.title, "Топ-5 прироста по экспорту (2021→2023)");

    let series = &descriptor.series[0];
    assert_eq!(series.orientation, Orientation::Horizontal);
    assert_eq!(series.colors, SeriesColors::Uniform(Color::EXPORT_GROWTH));
    // falling, incomplete and off-period records are out
    assert_eq!(labels(series.categories()), vec!["Машины и оборудование", "Фармацевтическая продукция"]);
    assert_eq!(series.values(), &[3.0, 1.5]);
}

#[test]
fn growth_year_pair_comes_from_config() {
    let config = DashboardConfig { growth_years: (2020, 2023), ..DashboardConfig::default() };
    let descriptor = ViewRegistry::new(&config).render(&fixture(), "export_growth").unwrap();
    assert_eq!(descriptor.title, "Топ-5 прироста по экспорту (2020→2023)");
    assert_eq!(labels(descriptor.series[0].categories()), vec!["Оптические приборы", "Фармацевтическая продукция"]);
}

#[test]
fn stored_delta_rows_still_rank() {
    let snapshot = TradeSnapshot::from_json_str(r#"{"export_growth": [{"commodity_name": "Машины", "delta": 3e9}]}"#)
        .unwrap();
    let descriptor = ViewRegistry::default().render(&snapshot, "export_growth").unwrap();
    assert!(!descriptor.is_empty);
    let series = &descriptor.series[0];
    assert_eq!(series.values(), &[3.0]);
    assert_eq!(series.hover()[0], "Машины<br>Прирост: +3.0 млрд USD<br>Прирост: по сохранённой разнице");
}

#[test]
fn growth_row_without_figures_fails_the_panel() {
    let snapshot = TradeSnapshot::from_json_str(r#"{"import_growth": [{"commodity_name": "Машины"}]}"#).unwrap();
    let err = ViewRegistry::default().render(&snapshot, "import_growth").unwrap_err();
    assert!(err.to_string().contains("record #0 of 'import_growth'"), "{err}");
}

#[test]
fn growth_title_counts_configured_top() {
    let config = DashboardConfig { top_growth: 1, ..DashboardConfig::default() };
    let descriptor = ViewRegistry::new(&config).render(&fixture(), "export_growth").unwrap();
    assert_eq!(descriptor.title, "Топ-1 прироста по экспорту (2021→2023)");
    assert_eq!(descriptor.series[0].len(), 1);
}

#[test]
fn no_positive_delta_is_empty_state() {
    let snapshot = TradeSnapshot::from_json_str(
        r#"{"import_growth": [{"commodity_name": "Бумага и картон", "value_baseline": 6e9, "value_latest": 5e9}]}"#,
    )
    .unwrap();
    let descriptor = ViewRegistry::default().render(&snapshot, "import_growth").unwrap();
    assert!(descriptor.is_empty);
}

#[test]
fn declines_largest_drop_first() {
    let descriptor = ViewRegistry::default().render(&fixture(), "declining_commodities").unwrap();
    let series = &descriptor.series[0];
    assert_eq!(
        labels(series.categories()),
        vec!["Минеральное топливо, нефт...", "Удобрения", "Древесина и изделия из не..."]
    );
    assert_eq!(series.values(), &[-6.5, -3.1, -1.2]);
    assert_eq!(series.texts()[0], "-6.5 млрд USD");
    assert!(series.hover()[0].starts_with("Минеральное топливо, нефть и продукты их перегонки<br>"));
}

#[test]
fn top_commodities_cut_to_ten_with_long_budget() {
    let descriptor = ViewRegistry::default().render(&fixture(), "top_export_commodities").unwrap();
    let series = &descriptor.series[0];
    assert_eq!(series.len(), 10);
    assert_eq!(labels(series.categories())[0], "Древесина и изделия из неё; древесн...");
    assert_eq!(series.values()[0], 14.5);
}
