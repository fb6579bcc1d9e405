use quickcheck_macros::quickcheck;
use trade_dashboard::domain::trade::{LabelStyle, NumberFormatter, PlotPoint, UnitScale};

fn ru() -> NumberFormatter {
    NumberFormatter::new(LabelStyle::Russian)
}

fn compact() -> NumberFormatter {
    NumberFormatter::new(LabelStyle::Compact)
}

#[quickcheck]
fn format_is_deterministic(raw: f64) -> bool {
    ru().format(raw) == ru().format(raw) && compact().format(raw) == compact().format(raw)
}

#[quickcheck]
fn never_prints_negative_zero(raw: f64) -> bool {
    let text = ru().format(raw);
    !text.starts_with("-0.0 ") && text != "-0.0"
}

#[test]
fn russian_tiers() {
    let f = ru();
    assert_eq!(f.format(100e9), "100.0 млрд USD");
    assert_eq!(f.format(1234.5e9), "1 234.5 млрд USD");
    assert_eq!(f.format(1.5e6), "1.5 млн USD");
    assert_eq!(f.format(2_500.0), "2.5 тыс. USD");
    assert_eq!(f.format(12.0), "12.0 USD");
    assert_eq!(f.format(-20e9), "-20.0 млрд USD");
}

#[test]
fn rounded_thousand_is_promoted() {
    assert_eq!(ru().format(999_960.0), "1.0 млн USD");
    assert_eq!(ru().format(-999_999_999.0), "-1.0 млрд USD");
    assert_eq!(compact().format(999_999.0), "1.0M");
    assert_eq!(ru().format_signed(999_999.0), "+1.0 млн USD");
    // верхний разряд не переносится
    assert_eq!(ru().format(999.99e9), "1 000.0 млрд USD");
}

#[test]
fn compact_tiers() {
    let f = compact();
    assert_eq!(f.format(1.5e9), "1.5B");
    assert_eq!(f.format(1234.5e9), "1,234.5B");
    assert_eq!(f.format(7.2e6), "7.2M");
    assert_eq!(f.format(3_000.0), "3.0K");
    assert_eq!(f.format(0.0), "0.0");
}

#[test]
fn zero_and_missing() {
    let f = ru();
    assert_eq!(f.format(0.0), "0.0 USD");
    assert_eq!(f.format(-0.0), "0.0 USD");
    assert_eq!(f.format(0.04), "0.0 USD");
    assert_eq!(f.format(f64::NAN), "");
    assert_eq!(f.format_or_zero(f64::NAN), "0.0 USD");
}

#[test]
fn signed_convention() {
    let f = ru();
    assert_eq!(f.format_signed(3e9), "+3.0 млрд USD");
    assert_eq!(f.format_signed(-3e9), "-3.0 млрд USD");
    assert_eq!(f.format_signed(0.0), "0.0 USD");
}

#[test]
fn scaled_and_percent() {
    let f = ru();
    assert_eq!(f.format_scaled(20.0, UnitScale::Billions), "20.0 млрд USD");
    assert_eq!(f.format_scaled(250.0, UnitScale::Millions), "250.0 млн USD");
    assert_eq!(f.format_percent(12.34), "12.3%");
    assert_eq!(f.format_percent(-0.01), "0.0%");
}

#[test]
fn plot_point_text_comes_from_plotted_value() {
    let point = PlotPoint::money(50e9, UnitScale::Billions, &ru());
    assert_eq!(point.value(), 50.0);
    assert_eq!(point.text(), ru().format_scaled(point.value(), UnitScale::Billions));

    let growth = PlotPoint::signed_money(3e9, UnitScale::Billions, &ru());
    assert_eq!(growth.text(), "+3.0 млрд USD");
}
