use super::value_objects::{LabelStyle, UnitScale};

const TIERS: [f64; 4] = [1_000_000_000.0, 1_000_000.0, 1_000.0, 1.0];

/// Turns raw USD magnitudes into human strings ("1 234.5 млрд USD", "1.2B").
///
/// The label style is fixed at construction; every method is a pure function
/// of its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NumberFormatter {
    style: LabelStyle,
}

impl NumberFormatter {
    pub fn new(style: LabelStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> LabelStyle {
        self.style
    }

    /// Format a raw magnitude. Missing values (`NaN`, infinities) give an empty string.
    pub fn format(&self, raw: f64) -> String {
        if !raw.is_finite() {
            return String::new();
        }
        self.format_finite(raw).unwrap_or_else(|| self.zero_string())
    }

    /// Like [`format`](Self::format) but missing values render as the zero string
    pub fn format_or_zero(&self, raw: f64) -> String {
        if !raw.is_finite() {
            return self.zero_string();
        }
        self.format(raw)
    }

    /// Growth convention: strictly positive values get a leading "+"
    pub fn format_signed(&self, raw: f64) -> String {
        if !raw.is_finite() {
            return String::new();
        }
        match self.format_finite(raw) {
            Some(text) if raw > 0.0 => format!("+{}", text),
            Some(text) => text,
            None => self.zero_string(),
        }
    }

    /// Format a value already divided by `scale`; the raw magnitude is restored first
    pub fn format_scaled(&self, plotted: f64, scale: UnitScale) -> String {
        self.format(scale.to_raw(plotted))
    }

    pub fn format_signed_scaled(&self, plotted: f64, scale: UnitScale) -> String {
        self.format_signed(scale.to_raw(plotted))
    }

    pub fn format_percent(&self, pct: f64) -> String {
        if !pct.is_finite() {
            return String::new();
        }
        let text = format!("{:.1}", pct);
        if text == "-0.0" { "0.0%".to_string() } else { format!("{}%", text) }
    }

    pub fn zero_string(&self) -> String {
        match self.style {
            LabelStyle::Russian => "0.0 USD".to_string(),
            LabelStyle::Compact => "0.0".to_string(),
        }
    }

    /// `None` when the value rounds to zero in its tier
    fn format_finite(&self, raw: f64) -> Option<String> {
        let magnitude = raw.abs();
        let mut tier_index = TIERS
            .iter()
            .position(|tier| magnitude >= *tier)
            .unwrap_or(TIERS.len() - 1);
        let mut digits = format!("{:.1}", magnitude / TIERS[tier_index]);
        // 999.95 тыс. округляется до 1000.0: это уже следующий разряд
        if tier_index > 0 && digits == "1000.0" {
            tier_index -= 1;
            digits = format!("{:.1}", magnitude / TIERS[tier_index]);
        }
        if digits == "0.0" {
            return None;
        }

        let sign = if raw < 0.0 { "-" } else { "" };
        let grouped = group_thousands(&digits, self.separator());
        let text = match (self.style, self.unit_label(tier_index)) {
            (LabelStyle::Russian, unit) => format!("{}{} {}", sign, grouped, unit),
            (LabelStyle::Compact, unit) => format!("{}{}{}", sign, grouped, unit),
        };
        Some(text)
    }

    fn unit_label(&self, tier_index: usize) -> &'static str {
        match self.style {
            LabelStyle::Russian => ["млрд USD", "млн USD", "тыс. USD", "USD"][tier_index],
            LabelStyle::Compact => ["B", "M", "K", ""][tier_index],
        }
    }

    fn separator(&self) -> char {
        match self.style {
            LabelStyle::Russian => ' ',
            LabelStyle::Compact => ',',
        }
    }
}

/// "1234567.8" -> "1 234 567.8"
fn group_thousands(digits: &str, separator: char) -> String {
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));
    let mut grouped = String::with_capacity(digits.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    if !frac_part.is_empty() {
        grouped.push('.');
        grouped.push_str(frac_part);
    }
    grouped
}

/// A plotted number together with the string shown for it.
///
/// Both halves come from the same value, so hover text can never drift from
/// what the chart draws.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotPoint {
    value: f64,
    text: String,
}

impl PlotPoint {
    /// Raw USD converted to `scale`
    pub fn money(raw: f64, scale: UnitScale, formatter: &NumberFormatter) -> Self {
        let value = scale.to_plotted(raw);
        Self { text: formatter.format_scaled(value, scale), value }
    }

    /// Same as [`money`](Self::money) with the "+" growth convention
    pub fn signed_money(raw: f64, scale: UnitScale, formatter: &NumberFormatter) -> Self {
        let value = scale.to_plotted(raw);
        Self { text: formatter.format_signed_scaled(value, scale), value }
    }

    pub fn percent(pct: f64, formatter: &NumberFormatter) -> Self {
        Self { text: formatter.format_percent(pct), value: pct }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_parts(self) -> (f64, String) {
        (self.value, self.text)
    }
}
