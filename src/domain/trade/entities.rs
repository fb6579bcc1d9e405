pub use super::value_objects::{Usd, Year};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Relative tolerance for `balance == X - M`
const BALANCE_REL_TOLERANCE: f64 = 1e-6;
/// Absolute floor so tiny flows are not rejected over rounding noise
const BALANCE_ABS_TOLERANCE: f64 = 1.0;

/// Year row of `trade_dynamics` / `russia_trade_dynamics`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TradeFlowRecord {
    pub year: Year,
    #[serde(rename = "X")]
    pub export: Usd,
    #[serde(rename = "M")]
    pub import: Usd,
    #[serde(default)]
    pub balance: Option<Usd>,
}

impl TradeFlowRecord {
    pub fn new(year: i32, export: f64, import: f64) -> Self {
        Self { year: Year::from(year), export: Usd::from(export), import: Usd::from(import), balance: None }
    }

    /// Always X - M; a stored balance is only checked, never used
    pub fn derived_balance(&self) -> f64 {
        self.export.value() - self.import.value()
    }

    pub fn validate(&self) -> Result<(), String> {
        check_flows(self.export.value(), self.import.value())?;
        if let Some(stored) = self.balance {
            let derived = self.derived_balance();
            let scale = self.export.value().abs().max(self.import.value().abs());
            let tolerance = (scale * BALANCE_REL_TOLERANCE).max(BALANCE_ABS_TOLERANCE);
            if (stored.value() - derived).abs() > tolerance {
                return Err(format!(
                    "balance {} does not match X - M = {}",
                    stored.value(),
                    derived
                ));
            }
        }
        Ok(())
    }
}

/// Row of `top_partner_countries`.
///
/// Disaggregated flows may be missing; then only the raw turnover is known.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PartnerRecord {
    pub country_name: String,
    #[serde(rename = "X", default)]
    pub export: Option<Usd>,
    #[serde(rename = "M", default)]
    pub import: Option<Usd>,
    #[serde(default)]
    pub turnover: Option<Usd>,
}

impl PartnerRecord {
    pub fn new(country_name: &str, export: f64, import: f64) -> Self {
        Self {
            country_name: country_name.to_string(),
            export: Some(Usd::from(export)),
            import: Some(Usd::from(import)),
            turnover: None,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        match (self.export, self.import, self.turnover) {
            (Some(x), Some(m), _) => check_flows(x.value(), m.value()),
            (_, _, Some(t)) if t.value().is_finite() && t.value() >= 0.0 => Ok(()),
            (_, _, Some(t)) => Err(format!("turnover {} is not a non-negative number", t.value())),
            _ => Err("neither X/M nor turnover present".to_string()),
        }
    }
}

/// Row of `top_export_commodities` / `top_import_commodities`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CommodityValueRecord {
    pub commodity_name: String,
    #[serde(rename = "primaryValue")]
    pub value: Usd,
}

impl CommodityValueRecord {
    pub fn validate(&self) -> Result<(), String> {
        check_non_negative("primaryValue", self.value.value())
    }
}

/// Row of `economic_sectors`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SectorRecord {
    pub sector: String,
    #[serde(rename = "X")]
    pub export: Usd,
    #[serde(rename = "M")]
    pub import: Usd,
}

impl SectorRecord {
    pub fn validate(&self) -> Result<(), String> {
        check_flows(self.export.value(), self.import.value())
    }
}

/// Row of `trade_geography`. Stored shares are ignored and re-derived from X/M.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RegionRecord {
    pub world_part: String,
    #[serde(rename = "X")]
    pub export: Usd,
    #[serde(rename = "M")]
    pub import: Usd,
}

impl RegionRecord {
    pub fn validate(&self) -> Result<(), String> {
        check_flows(self.export.value(), self.import.value())
    }
}

/// Row of `export_growth` / `import_growth`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GrowthRecord {
    pub commodity_name: String,
    #[serde(default)]
    pub value_baseline: Option<Usd>,
    #[serde(default)]
    pub value_latest: Option<Usd>,
    #[serde(default)]
    pub baseline_year: Option<Year>,
    #[serde(default)]
    pub latest_year: Option<Year>,
    /// Precomputed `latest - baseline`, may be negative
    #[serde(default)]
    pub delta: Option<Usd>,
}

impl GrowthRecord {
    pub fn new(commodity_name: &str, baseline: f64, latest: f64) -> Self {
        Self {
            commodity_name: commodity_name.to_string(),
            value_baseline: Some(Usd::from(baseline)),
            value_latest: Some(Usd::from(latest)),
            baseline_year: None,
            latest_year: None,
            delta: None,
        }
    }

    /// Row that carries only the stored difference
    pub fn with_stored_delta(commodity_name: &str, delta: f64) -> Self {
        Self {
            commodity_name: commodity_name.to_string(),
            value_baseline: None,
            value_latest: None,
            baseline_year: None,
            latest_year: None,
            delta: Some(Usd::from(delta)),
        }
    }

    /// `latest - baseline` when both values are known
    pub fn derived_delta(&self) -> Option<f64> {
        match (self.value_baseline, self.value_latest) {
            (Some(baseline), Some(latest)) => Some(latest.value() - baseline.value()),
            _ => None,
        }
    }

    /// Derived delta, else the stored one. The flag is `true` for the stored fallback.
    pub fn delta(&self) -> Option<(f64, bool)> {
        match self.derived_delta() {
            Some(derived) => Some((derived, false)),
            None => self.delta.map(|stored| (stored.value(), true)),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        for (field, value) in [("value_baseline", self.value_baseline), ("value_latest", self.value_latest)] {
            if let Some(v) = value {
                check_non_negative(field, v.value())?;
            }
        }
        match self.delta {
            Some(stored) if !stored.value().is_finite() => Err("delta is not a finite number".to_string()),
            None if self.value_baseline.is_none() && self.value_latest.is_none() => {
                Err("neither values nor delta are present".to_string())
            }
            _ => Ok(()),
        }
    }
}

/// Row of `declining_commodities`; `change` is a signed raw USD delta
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DeclineRecord {
    pub commodity_name: String,
    pub change: Usd,
}

impl DeclineRecord {
    pub fn validate(&self) -> Result<(), String> {
        if self.change.value().is_finite() {
            Ok(())
        } else {
            Err("change is not a finite number".to_string())
        }
    }
}

/// Records that can check their own invariants after deserialisation
pub trait TradeRecord: DeserializeOwned {
    fn validate(&self) -> Result<(), String>;
}

macro_rules! impl_trade_record {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl TradeRecord for $ty {
                fn validate(&self) -> Result<(), String> {
                    <$ty>::validate(self)
                }
            }
        )+
    };
}

impl_trade_record!(
    TradeFlowRecord,
    PartnerRecord,
    CommodityValueRecord,
    SectorRecord,
    RegionRecord,
    GrowthRecord,
    DeclineRecord,
);

fn check_non_negative(field: &str, value: f64) -> Result<(), String> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(format!("{} = {} is not a non-negative number", field, value))
    }
}

fn check_flows(export: f64, import: f64) -> Result<(), String> {
    check_non_negative("X", export)?;
    check_non_negative("M", import)
}
