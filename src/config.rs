use crate::domain::errors::{DashboardError, DashboardResult};
use crate::domain::trade::LabelStyle;
use crate::domain::trade::services::AggregationSettings;
use serde::Deserialize;
use std::env;

pub const ENV_DATA_PATH: &str = "TRADE_DASHBOARD_DATA";
pub const ENV_KEY_PARTNER: &str = "TRADE_DASHBOARD_PARTNER";
pub const ENV_LABEL_STYLE: &str = "TRADE_DASHBOARD_LABELS";

/// Dashboard settings. Every field has a default, so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_path: String,
    pub label_style: LabelStyle,
    pub key_partner: String,
    pub top_commodities: usize,
    pub top_partners: usize,
    pub top_growth: usize,
    pub top_declines: usize,
    pub long_label_budget: usize,
    pub short_label_budget: usize,
    pub growth_years: (i32, i32),
    pub excluded_regions: Vec<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let aggregation = AggregationSettings::default();
        Self {
            data_path: "dashboard_data.json".to_string(),
            label_style: LabelStyle::Russian,
            key_partner: "Германия".to_string(),
            top_commodities: aggregation.top_commodities,
            top_partners: aggregation.top_partners,
            top_growth: aggregation.top_growth,
            top_declines: aggregation.top_declines,
            long_label_budget: aggregation.long_label_budget,
            short_label_budget: aggregation.short_label_budget,
            growth_years: aggregation.growth_years,
            excluded_regions: aggregation.excluded_regions,
        }
    }
}

impl DashboardConfig {
    pub fn from_json_str(json: &str) -> DashboardResult<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| DashboardError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overlaid with `TRADE_DASHBOARD_*` environment variables
    pub fn from_env() -> DashboardResult<Self> {
        Self::default().with_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from any key/value source
    pub fn with_overrides<F>(mut self, lookup: F) -> DashboardResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_DATA_PATH) {
            self.data_path = path;
        }
        if let Some(partner) = lookup(ENV_KEY_PARTNER) {
            self.key_partner = partner;
        }
        if let Some(style) = lookup(ENV_LABEL_STYLE) {
            self.label_style = style
                .parse()
                .map_err(|_| DashboardError::Config(format!("unknown label style '{}'", style)))?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> DashboardResult<()> {
        let (baseline, latest) = self.growth_years;
        if baseline >= latest {
            return Err(DashboardError::Config(format!(
                "growth_years must be increasing, got {}→{}",
                baseline, latest
            )));
        }
        if self.long_label_budget == 0 || self.short_label_budget == 0 {
            return Err(DashboardError::Config("label budgets must be positive".to_string()));
        }
        Ok(())
    }

    pub fn aggregation_settings(&self) -> AggregationSettings {
        AggregationSettings {
            top_commodities: self.top_commodities,
            top_partners: self.top_partners,
            top_growth: self.top_growth,
            top_declines: self.top_declines,
            long_label_budget: self.long_label_budget,
            short_label_budget: self.short_label_budget,
            growth_years: self.growth_years,
            excluded_regions: self.excluded_regions.clone(),
        }
    }
}
