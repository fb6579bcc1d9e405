use crate::{
    config::DashboardConfig,
    domain::{
        chart::{ChartDescriptor, ChartSpecBuilder, ViewId},
        errors::{DashboardError, DashboardResult},
        logging::LogComponent,
        trade::{
            CommodityValueRecord, DeclineRecord, FlowDirection, GrowthRecord, NumberFormatter, PartnerRecord,
            PartnerSummary, RegionRecord, SectorRecord, TradeFlowRecord, TradeSnapshot, UnitScale, ViewData,
            services::{PARTNERS_VIEW, TradeAggregator},
        },
    },
    log_debug, log_error, log_trace, log_warn,
};

/// Optional narrowing of a view. The default filter renders the view as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewFilter {
    /// Inclusive year range, applied to time series views
    pub years: Option<(i32, i32)>,
    /// Single partner, applied to the partner chart
    pub country: Option<String>,
}

impl ViewFilter {
    pub fn years(from: i32, to: i32) -> Self {
        Self { years: Some((from, to)), ..Self::default() }
    }

    pub fn country(name: impl Into<String>) -> Self {
        Self { country: Some(name.into()), ..Self::default() }
    }
}

/// Maps a view id to its records, aggregation and chart archetype.
///
/// The only place where an absent view becomes an empty-state descriptor;
/// every other error goes back to the caller unchanged.
#[derive(Debug, Clone)]
pub struct ViewRegistry {
    aggregator: TradeAggregator,
    builder: ChartSpecBuilder,
}

impl Default for ViewRegistry {
    fn default() -> Self {
        Self::new(&DashboardConfig::default())
    }
}

impl ViewRegistry {
    pub fn new(config: &DashboardConfig) -> Self {
        let settings = config.aggregation_settings();
        Self {
            builder: ChartSpecBuilder::new(&settings),
            aggregator: TradeAggregator::new(NumberFormatter::new(config.label_style), settings),
        }
    }

    pub fn aggregator(&self) -> &TradeAggregator {
        &self.aggregator
    }

    /// Render by dataset key or panel id
    pub fn render(&self, snapshot: &TradeSnapshot, view_id: &str) -> DashboardResult<ChartDescriptor> {
        self.render_with(snapshot, view_id, &ViewFilter::default())
    }

    pub fn render_with(
        &self,
        snapshot: &TradeSnapshot,
        view_id: &str,
        filter: &ViewFilter,
    ) -> DashboardResult<ChartDescriptor> {
        let view = parse_view_id(view_id)?;
        self.render_view(snapshot, view, filter)
    }

    pub fn render_view(
        &self,
        snapshot: &TradeSnapshot,
        view: ViewId,
        filter: &ViewFilter,
    ) -> DashboardResult<ChartDescriptor> {
        log_debug!(LogComponent::Application("ViewRegistry"), "Rendering {}", view);
        match self.aggregate(snapshot, view, filter) {
            Ok(data) => Ok(self.builder.build(view, &data)),
            Err(e) if e.is_missing_view() => {
                log_warn!(
                    LogComponent::Application("ViewRegistry"),
                    "{} has no data, showing empty-state: {}",
                    view.panel_id(),
                    e
                );
                Ok(self.builder.empty(view))
            }
            Err(e) => {
                log_error!(LogComponent::Application("ViewRegistry"), "{} failed: {}", view.panel_id(), e);
                Err(e)
            }
        }
    }

    /// Every view, each one rendered independently
    #[cfg(not(feature = "parallel"))]
    pub fn render_all(&self, snapshot: &TradeSnapshot) -> Vec<(ViewId, DashboardResult<ChartDescriptor>)> {
        ViewId::all()
            .map(|view| (view, self.render_view(snapshot, view, &ViewFilter::default())))
            .collect()
    }

    /// Every view, each one rendered independently
    #[cfg(feature = "parallel")]
    pub fn render_all(&self, snapshot: &TradeSnapshot) -> Vec<(ViewId, DashboardResult<ChartDescriptor>)> {
        use rayon::prelude::*;

        let views: Vec<ViewId> = ViewId::all().collect();
        views
            .into_par_iter()
            .map(|view| (view, self.render_view(snapshot, view, &ViewFilter::default())))
            .collect()
    }

    /// Summary of one partner. A snapshot without partner data has no such
    /// partner either.
    pub fn partner_summary(&self, snapshot: &TradeSnapshot, country: &str) -> DashboardResult<PartnerSummary> {
        let records = snapshot.view::<PartnerRecord>(PARTNERS_VIEW).map_err(|e| {
            if e.is_missing_view() { DashboardError::entity_not_found(PARTNERS_VIEW, country) } else { e }
        })?;
        self.aggregator.partner_summary(&records, country)
    }

    fn aggregate(&self, snapshot: &TradeSnapshot, view: ViewId, filter: &ViewFilter) -> DashboardResult<ViewData> {
        let key = view.dataset_key();
        log_trace!(LogComponent::Application("ViewRegistry"), "{} records: {:?}", key, snapshot.record_count(key));
        let agg = &self.aggregator;
        let data = match view {
            ViewId::TradeDynamics => {
                agg.trade_flows(&snapshot.view::<TradeFlowRecord>(key)?, UnitScale::Billions, filter.years)
            }
            ViewId::RussiaTradeDynamics => {
                agg.trade_flows(&snapshot.view::<TradeFlowRecord>(key)?, UnitScale::Millions, filter.years)
            }
            ViewId::TopExportCommodities => {
                agg.top_commodities(&snapshot.view::<CommodityValueRecord>(key)?, FlowDirection::Export)
            }
            ViewId::TopImportCommodities => {
                agg.top_commodities(&snapshot.view::<CommodityValueRecord>(key)?, FlowDirection::Import)
            }
            ViewId::EconomicSectors => agg.sector_shares(&snapshot.view::<SectorRecord>(key)?),
            ViewId::TradeGeography => agg.region_shares(&snapshot.view::<RegionRecord>(key)?),
            ViewId::TopPartnerCountries => {
                agg.top_partners(&snapshot.view::<PartnerRecord>(key)?, filter.country.as_deref())?
            }
            ViewId::DecliningCommodities => agg.declines(&snapshot.view::<DeclineRecord>(key)?),
            ViewId::ExportGrowth => agg.growth(&snapshot.view::<GrowthRecord>(key)?, FlowDirection::Export),
            ViewId::ImportGrowth => agg.growth(&snapshot.view::<GrowthRecord>(key)?, FlowDirection::Import),
        };
        Ok(data)
    }
}

pub fn parse_view_id(view_id: &str) -> DashboardResult<ViewId> {
    view_id.parse::<ViewId>().map_err(|_| DashboardError::UnknownView(view_id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(json: &str) -> TradeSnapshot {
        TradeSnapshot::from_json_str(json).unwrap()
    }

    #[test]
    fn unknown_id_is_rejected() {
        let err = ViewRegistry::default().render(&TradeSnapshot::default(), "germany-summary").unwrap_err();
        assert_eq!(err, DashboardError::UnknownView("germany-summary".to_string()));
    }

    #[test]
    fn absent_view_falls_back_to_empty_state() {
        let descriptor = ViewRegistry::default().render(&TradeSnapshot::default(), "russia-trade-chart").unwrap();
        assert!(descriptor.is_empty);
        assert_eq!(descriptor.view, ViewId::RussiaTradeDynamics);
    }

    #[test]
    fn invalid_record_is_not_masked() {
        let snapshot = snapshot(r#"{"trade_dynamics": [{"year": 2021, "X": 1e9}]}"#);
        let err = ViewRegistry::default().render(&snapshot, "trade_dynamics").unwrap_err();
        assert!(matches!(err, DashboardError::DataShape(_)));
        assert!(!err.is_missing_view());
    }

    #[test]
    fn russia_trade_is_in_millions() {
        let snapshot = snapshot(r#"{"russia_trade_dynamics": [{"year": 2022, "X": 250e6, "M": 100e6}]}"#);
        let descriptor = ViewRegistry::default().render(&snapshot, "russia_trade_dynamics").unwrap();
        let export = descriptor.series_named("Экспорт").unwrap();
        assert_eq!(export.values(), &[250.0]);
        assert_eq!(export.texts()[0], "250.0 млн USD");
    }

    #[test]
    fn year_filter_narrows_time_series() {
        let snapshot = snapshot(
            r#"{"trade_dynamics": [
                {"year": 2019, "X": 1e9, "M": 1e9},
                {"year": 2021, "X": 2e9, "M": 1e9},
                {"year": 2023, "X": 3e9, "M": 1e9}
            ]}"#,
        );
        let descriptor =
            ViewRegistry::default().render_with(&snapshot, "trade_dynamics", &ViewFilter::years(2020, 2023)).unwrap();
        assert_eq!(descriptor.series_named("Экспорт").unwrap().len(), 2);
    }

    #[test]
    fn summary_without_partner_view_is_entity_not_found() {
        let err = ViewRegistry::default().partner_summary(&TradeSnapshot::default(), "Германия").unwrap_err();
        assert!(matches!(err, DashboardError::EntityNotFound { .. }));
    }
}
