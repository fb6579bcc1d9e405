//! Per-request results handed from the aggregator to the chart builder.

use super::formatting::PlotPoint;
use super::value_objects::{FlowDirection, UnitScale, Year};

/// One year of a flow chart; all three points share the chart's scale
#[derive(Debug, Clone, PartialEq)]
pub struct FlowPoint {
    pub year: Year,
    pub export: PlotPoint,
    pub import: PlotPoint,
    pub balance: PlotPoint,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlowSeries {
    pub scale: UnitScale,
    pub points: Vec<FlowPoint>,
}

/// Bar of a ranked chart (top commodities, growth, declines)
#[derive(Debug, Clone, PartialEq)]
pub struct RankedItem {
    pub label: String,
    pub full_label: String,
    pub amount: PlotPoint,
    /// Amount taken from a stored delta, not derived from the two values
    pub precomputed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingKind {
    Volume(FlowDirection),
    Growth(FlowDirection),
    Decline,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedValues {
    pub kind: RankingKind,
    pub scale: UnitScale,
    pub items: Vec<RankedItem>,
}

/// Sector slice of both donuts
#[derive(Debug, Clone, PartialEq)]
pub struct SectorShare {
    pub label: String,
    pub full_label: String,
    pub export_share: PlotPoint,
    pub import_share: PlotPoint,
}

/// Region group of the geography chart: plotted shares plus the money behind them
#[derive(Debug, Clone, PartialEq)]
pub struct RegionShare {
    pub region: String,
    pub export_share: PlotPoint,
    pub import_share: PlotPoint,
    pub export: PlotPoint,
    pub import: PlotPoint,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PartnerTurnover {
    pub country: String,
    pub turnover: PlotPoint,
    pub balance: PlotPoint,
    /// Flows came from the 60/40 turnover split, not from customs data
    pub approximate: bool,
}

/// Summary block for one named partner
#[derive(Debug, Clone, PartialEq)]
pub struct PartnerSummary {
    pub country: String,
    pub turnover: PlotPoint,
    pub export: PlotPoint,
    pub import: PlotPoint,
    pub balance: PlotPoint,
    pub approximate: bool,
}

/// Aggregated input of the chart builder
#[derive(Debug, Clone, PartialEq)]
pub enum ViewData {
    Flows(FlowSeries),
    Ranked(RankedValues),
    Sectors(Vec<SectorShare>),
    Regions(Vec<RegionShare>),
    Partners(Vec<PartnerTurnover>),
    NoData,
}

impl ViewData {
    pub fn is_no_data(&self) -> bool {
        matches!(self, ViewData::NoData)
    }
}
