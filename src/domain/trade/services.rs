use super::aggregates::{
    FlowPoint, FlowSeries, PartnerSummary, PartnerTurnover, RankedItem, RankedValues, RankingKind,
    RegionShare, SectorShare, ViewData,
};
use super::entities::{
    CommodityValueRecord, DeclineRecord, GrowthRecord, PartnerRecord, RegionRecord, SectorRecord,
    TradeFlowRecord,
};
use super::formatting::{NumberFormatter, PlotPoint};
use super::value_objects::{FlowDirection, UnitScale};
use crate::domain::errors::{DashboardError, DashboardResult};

pub const ELLIPSIS: &str = "...";

/// Export part of turnover when a partner has no disaggregated flows.
/// Data-quality heuristic, results built from it are flagged `approximate`.
pub const APPROXIMATE_EXPORT_SHARE: f64 = 0.6;

pub const PARTNERS_VIEW: &str = "top_partner_countries";

/// Knobs of the aggregation step
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationSettings {
    pub top_commodities: usize,
    pub top_partners: usize,
    pub top_growth: usize,
    pub top_declines: usize,
    pub long_label_budget: usize,
    pub short_label_budget: usize,
    pub growth_years: (i32, i32),
    pub excluded_regions: Vec<String>,
}

impl Default for AggregationSettings {
    fn default() -> Self {
        Self {
            top_commodities: 10,
            top_partners: 10,
            top_growth: 5,
            top_declines: 10,
            long_label_budget: 35,
            short_label_budget: 25,
            growth_years: (2021, 2023),
            excluded_regions: vec!["Неизвестно".to_string()],
        }
    }
}

/// Domain service - turns typed records into chart-ready numbers.
///
/// Stateless apart from its settings; every method is a pure function of its
/// inputs.
#[derive(Debug, Clone, Default)]
pub struct TradeAggregator {
    formatter: NumberFormatter,
    settings: AggregationSettings,
}

impl TradeAggregator {
    pub fn new(formatter: NumberFormatter, settings: AggregationSettings) -> Self {
        Self { formatter, settings }
    }

    pub fn formatter(&self) -> &NumberFormatter {
        &self.formatter
    }

    pub fn settings(&self) -> &AggregationSettings {
        &self.settings
    }

    /// Export, import and balance per year, ascending by year.
    ///
    /// `years` keeps only records inside the inclusive range.
    pub fn trade_flows(
        &self,
        records: &[TradeFlowRecord],
        scale: UnitScale,
        years: Option<(i32, i32)>,
    ) -> ViewData {
        let mut selected: Vec<&TradeFlowRecord> = records
            .iter()
            .filter(|r| years.is_none_or(|(from, to)| (from..=to).contains(&r.year.value())))
            .collect();
        if selected.is_empty() {
            return ViewData::NoData;
        }
        selected.sort_by_key(|r| r.year);

        let points = selected
            .into_iter()
            .map(|r| FlowPoint {
                year: r.year,
                export: PlotPoint::money(r.export.value(), scale, &self.formatter),
                import: PlotPoint::money(r.import.value(), scale, &self.formatter),
                balance: PlotPoint::money(r.derived_balance(), scale, &self.formatter),
            })
            .collect();
        ViewData::Flows(FlowSeries { scale, points })
    }

    /// Top-N commodity groups by traded value
    pub fn top_commodities(&self, records: &[CommodityValueRecord], direction: FlowDirection) -> ViewData {
        let top = top_n_by(records, self.settings.top_commodities, |r| r.value.value());
        let items = top
            .into_iter()
            .map(|r| self.ranked_item(&r.commodity_name, r.value.value(), self.settings.long_label_budget, false))
            .collect();
        self.ranked(RankingKind::Volume(direction), items)
    }

    /// Top-N growth deltas over the configured year pair
    pub fn growth(&self, records: &[GrowthRecord], direction: FlowDirection) -> ViewData {
        let (baseline_year, latest_year) = self.settings.growth_years;
        let qualifying: Vec<(&GrowthRecord, f64, bool)> = records
            .iter()
            .filter(|r| r.baseline_year.is_none_or(|y| y.value() == baseline_year))
            .filter(|r| r.latest_year.is_none_or(|y| y.value() == latest_year))
            .filter_map(|r| r.delta().map(|(delta, stored)| (r, delta, stored)))
            .filter(|(_, delta, _)| *delta > 0.0)
            .collect();

        let top = top_n_by(&qualifying, self.settings.top_growth, |(_, delta, _)| *delta);
        let items = top
            .into_iter()
            .map(|(r, delta, stored)| RankedItem {
                precomputed: *stored,
                ..self.ranked_item(&r.commodity_name, *delta, self.settings.long_label_budget, true)
            })
            .collect();
        self.ranked(RankingKind::Growth(direction), items)
    }

    /// Largest drops first
    pub fn declines(&self, records: &[DeclineRecord]) -> ViewData {
        let falling: Vec<&DeclineRecord> = records.iter().filter(|r| r.change.value() < 0.0).collect();
        let top = top_n_by(&falling, self.settings.top_declines, |r| -r.change.value());
        let items = top
            .into_iter()
            .map(|r| self.ranked_item(&r.commodity_name, r.change.value(), self.settings.short_label_budget, false))
            .collect();
        self.ranked(RankingKind::Decline, items)
    }

    /// Export and import share of every sector, in input order
    pub fn sector_shares(&self, records: &[SectorRecord]) -> ViewData {
        if records.is_empty() {
            return ViewData::NoData;
        }
        let export_shares = compute_shares(&records.iter().map(|r| r.export.value()).collect::<Vec<_>>());
        let import_shares = compute_shares(&records.iter().map(|r| r.import.value()).collect::<Vec<_>>());

        let sectors = records
            .iter()
            .zip(export_shares.into_iter().zip(import_shares))
            .map(|(r, (export_pct, import_pct))| SectorShare {
                label: truncate_label(&r.sector, self.settings.short_label_budget),
                full_label: r.sector.clone(),
                export_share: PlotPoint::percent(export_pct, &self.formatter),
                import_share: PlotPoint::percent(import_pct, &self.formatter),
            })
            .collect();
        ViewData::Sectors(sectors)
    }

    /// Region shares are derived over every region, excluded ones are dropped afterwards
    pub fn region_shares(&self, records: &[RegionRecord]) -> ViewData {
        let export_shares = compute_shares(&records.iter().map(|r| r.export.value()).collect::<Vec<_>>());
        let import_shares = compute_shares(&records.iter().map(|r| r.import.value()).collect::<Vec<_>>());

        let regions: Vec<RegionShare> = records
            .iter()
            .zip(export_shares.into_iter().zip(import_shares))
            .filter(|(r, _)| !self.settings.excluded_regions.iter().any(|ex| ex == &r.world_part))
            .map(|(r, (export_pct, import_pct))| RegionShare {
                region: r.world_part.clone(),
                export_share: PlotPoint::percent(export_pct, &self.formatter),
                import_share: PlotPoint::percent(import_pct, &self.formatter),
                export: PlotPoint::money(r.export.value(), UnitScale::Billions, &self.formatter),
                import: PlotPoint::money(r.import.value(), UnitScale::Billions, &self.formatter),
            })
            .collect();
        if regions.is_empty() { ViewData::NoData } else { ViewData::Regions(regions) }
    }

    /// Top-N partners by turnover; `country` narrows the chart to one partner
    pub fn top_partners(&self, records: &[PartnerRecord], country: Option<&str>) -> DashboardResult<ViewData> {
        let flows: Vec<(&PartnerRecord, PartnerFlows)> =
            records.iter().map(|r| (r, PartnerFlows::of(r))).collect();

        let selected: Vec<&(&PartnerRecord, PartnerFlows)> = match country {
            Some(name) => {
                let found = flows
                    .iter()
                    .find(|(r, _)| r.country_name == name)
                    .ok_or_else(|| DashboardError::entity_not_found(PARTNERS_VIEW, name))?;
                vec![found]
            }
            None => top_n_by(&flows, self.settings.top_partners, |(_, f)| f.turnover()),
        };
        if selected.is_empty() {
            return Ok(ViewData::NoData);
        }

        let partners = selected
            .into_iter()
            .map(|(r, f)| PartnerTurnover {
                country: r.country_name.clone(),
                turnover: PlotPoint::money(f.turnover(), UnitScale::Billions, &self.formatter),
                balance: PlotPoint::money(f.balance(), UnitScale::Billions, &self.formatter),
                approximate: f.approximate,
            })
            .collect();
        Ok(ViewData::Partners(partners))
    }

    /// Summary figures for one partner, looked up by exact name
    pub fn partner_summary(&self, records: &[PartnerRecord], country: &str) -> DashboardResult<PartnerSummary> {
        let record = records
            .iter()
            .find(|r| r.country_name == country)
            .ok_or_else(|| DashboardError::entity_not_found(PARTNERS_VIEW, country))?;
        let flows = PartnerFlows::of(record);
        let money = |raw: f64| PlotPoint::money(raw, UnitScale::Billions, &self.formatter);

        Ok(PartnerSummary {
            country: record.country_name.clone(),
            turnover: money(flows.turnover()),
            export: money(flows.export),
            import: money(flows.import),
            balance: money(flows.balance()),
            approximate: flows.approximate,
        })
    }

    fn ranked_item(&self, name: &str, raw: f64, budget: usize, signed: bool) -> RankedItem {
        let amount = if signed {
            PlotPoint::signed_money(raw, UnitScale::Billions, &self.formatter)
        } else {
            PlotPoint::money(raw, UnitScale::Billions, &self.formatter)
        };
        RankedItem { label: truncate_label(name, budget), full_label: name.to_string(), amount, precomputed: false }
    }

    fn ranked(&self, kind: RankingKind, items: Vec<RankedItem>) -> ViewData {
        if items.is_empty() {
            return ViewData::NoData;
        }
        ViewData::Ranked(RankedValues { kind, scale: UnitScale::Billions, items })
    }
}

/// Export/import of one partner, exact or reconstructed from turnover
#[derive(Debug, Clone, Copy, PartialEq)]
struct PartnerFlows {
    export: f64,
    import: f64,
    approximate: bool,
}

impl PartnerFlows {
    fn of(record: &PartnerRecord) -> Self {
        match (record.export, record.import, record.turnover) {
            (Some(x), Some(m), _) => Self { export: x.value(), import: m.value(), approximate: false },
            (_, _, Some(t)) => Self {
                export: t.value() * APPROXIMATE_EXPORT_SHARE,
                import: t.value() * (1.0 - APPROXIMATE_EXPORT_SHARE),
                approximate: true,
            },
            // validate() rejects records without flows or turnover
            _ => Self { export: 0.0, import: 0.0, approximate: true },
        }
    }

    fn turnover(&self) -> f64 {
        self.export + self.import
    }

    fn balance(&self) -> f64 {
        self.export - self.import
    }
}

/// `value_i / sum * 100`; an all-zero (or empty) input gives 0% everywhere
pub fn compute_shares(values: &[f64]) -> Vec<f64> {
    let total: f64 = values.iter().sum();
    if total == 0.0 || !total.is_finite() {
        return vec![0.0; values.len()];
    }
    values.iter().map(|v| v / total * 100.0).collect()
}

/// First `n` items by `key` descending. The sort is stable, so equal keys keep
/// their input order.
pub fn top_n_by<T, F>(items: &[T], n: usize, key: F) -> Vec<&T>
where
    F: Fn(&T) -> f64,
{
    let mut ranked: Vec<&T> = items.iter().collect();
    ranked.sort_by(|a, b| key(b).total_cmp(&key(a)));
    ranked.truncate(n);
    ranked
}

/// Cut `label` to `budget` characters and append "..." when it was longer.
/// Counts chars, so a multi-byte character is never split.
pub fn truncate_label(label: &str, budget: usize) -> String {
    match label.char_indices().nth(budget) {
        Some((byte_idx, _)) => format!("{}{}", &label[..byte_idx], ELLIPSIS),
        None => label.to_string(),
    }
}
